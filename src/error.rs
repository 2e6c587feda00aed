//! Error types for pointfield.
//!
//! This module provides error types for GPU initialization, texture loading,
//! parameter validation, configuration loading and running a demo.

use thiserror::Error;

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support.")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reported no usable texture format.
    #[error("Surface has no supported texture formats for this adapter")]
    NoSurfaceFormat,
}

/// Errors that can occur during texture loading.
#[derive(Debug, Error)]
pub enum TextureError {
    /// Failed to decode the image file.
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),
    /// Failed to read file from disk.
    #[error("Failed to read texture file: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid generation parameters or point buffers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// A spiral needs at least one branch.
    #[error("branch count must be at least 1")]
    ZeroBranches,
    /// A numeric parameter was negative, NaN or infinite.
    #[error("`{name}` must be finite and non-negative, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f32,
    },
    /// Position and color buffers describe a different number of points.
    #[error("position buffer has {positions} floats but color buffer has {colors}; both must be 3 * count")]
    BufferMismatch { positions: usize, colors: usize },
}

/// Errors that can occur while loading or saving a demo configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write the configuration file.
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid configuration JSON.
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    /// The configuration parsed but holds invalid parameters.
    #[error("Invalid parameters in config: {0}")]
    Params(#[from] ParamError),
}

/// Errors that can occur when running a demo.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Failed to create or run the event loop.
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// Generation parameters were rejected.
    #[error("Invalid parameters: {0}")]
    Params(#[from] ParamError),
}
