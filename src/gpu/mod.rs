mod buffers;
pub mod camera;
#[cfg(feature = "egui")]
pub mod egui_integration;

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;
use winit::window::Window;

pub use buffers::PointBuffers;
pub use camera::OrbitCamera;

use buffers::POINT_STRIDE;
use crate::error::GpuError;
use crate::material::PointMaterial;
use crate::point_set::PointSet;
use crate::textures::TextureData;
use crate::viewport::Viewport;

pub(crate) const POINT_SHADER: &str = include_str!("points.wgsl");

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct Uniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    color: [f32; 3],
    point_size: f32,
    viewport_height: f32,
    time: f32,
    size_attenuation: u32,
    vertex_colors: u32,
    use_alpha_map: u32,
    decode_srgb: u32,
    _padding: [u32; 2],
}

/// Something drawn on top of the points in the same frame.
pub trait Overlay {
    /// Record draw commands into `encoder` targeting `view`.
    ///
    /// Returns extra command buffers that must be submitted before the
    /// encoder's own.
    fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
    ) -> Vec<wgpu::CommandBuffer>;
}

/// Window surface, point pipeline and the buffers of the current point set.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pipeline_layout: wgpu::PipelineLayout,
    shader: wgpu::ShaderModule,
    render_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_bind_group: wgpu::BindGroup,
    depth_texture: wgpu::TextureView,
    points: PointBuffers,
    material: PointMaterial,
    has_alpha_map: bool,
    pub camera: OrbitCamera,
}

impl GpuState {
    pub async fn new(
        window: Arc<Window>,
        points: &PointSet,
        material: PointMaterial,
        mut camera: OrbitCamera,
        alpha_map: Option<TextureData>,
    ) -> Result<Self, GpuError> {
        let size = window.inner_size();
        let viewport = Viewport::from_physical(size.width, size.height, window.scale_factor());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let info = adapter.get_info();
        tracing::info!(adapter = %info.name, backend = ?info.backend, "selected GPU adapter");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuError::NoSurfaceFormat)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let (width, height) = viewport.surface_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        tracing::info!(
            width = config.width,
            height = config.height,
            format = ?config.format,
            pixel_ratio = viewport.pixel_ratio(),
            "configured surface"
        );

        let depth_texture = create_depth_texture(&device, &config);
        camera.set_viewport(config.width, config.height);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Uniform Buffer"),
            size: std::mem::size_of::<Uniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        // Alpha map, or a white pixel the shader ignores.
        let has_alpha_map = alpha_map.is_some();
        let texture = alpha_map.unwrap_or_else(|| TextureData::solid(255, 255, 255, 255));
        let (texture_bind_group_layout, texture_bind_group) =
            create_texture_bind_group(&device, &queue, &texture);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Point Shader"),
            source: wgpu::ShaderSource::Wgsl(POINT_SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Point Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout, &texture_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline =
            create_point_pipeline(&device, &pipeline_layout, &shader, config.format, &material);

        let points = PointBuffers::new(&device, points);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline_layout,
            shader,
            render_pipeline,
            uniform_buffer,
            uniform_bind_group,
            texture_bind_group,
            depth_texture,
            points,
            material,
            has_alpha_map,
            camera,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn material(&self) -> &PointMaterial {
        &self.material
    }

    /// Reconfigure the surface for a new window size and scale factor.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            return;
        }
        let (width, height) = viewport.surface_size();
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture = create_depth_texture(&self.device, &self.config);
        self.camera.set_viewport(width, height);
        tracing::debug!(width, height, pixel_ratio = viewport.pixel_ratio(), "resized surface");
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Swap in buffers for a new point set and release the old ones.
    ///
    /// The new buffers are fully uploaded before the swap, so no frame can
    /// see a half-updated set.
    pub fn replace_points(&mut self, points: &PointSet) {
        let fresh = PointBuffers::new(&self.device, points);
        let old = std::mem::replace(&mut self.points, fresh);
        tracing::debug!(old = old.count(), new = self.points.count(), "replaced point buffers");
        old.destroy();
    }

    /// Re-upload positions of the current set after an in-place update.
    pub fn write_positions(&mut self, points: &PointSet) {
        self.points.write_positions(&self.queue, points);
    }

    /// Apply a new material, rebuilding the pipeline if blending or depth
    /// writes changed.
    pub fn set_material(&mut self, material: PointMaterial) {
        if self.material.needs_pipeline_rebuild(&material) {
            self.render_pipeline = create_point_pipeline(
                &self.device,
                &self.pipeline_layout,
                &self.shader,
                self.config.format,
                &material,
            );
            tracing::debug!(blend = ?material.blend_mode, depth_write = material.depth_write, "rebuilt point pipeline");
        }
        self.material = material;
    }

    fn update_uniforms(&mut self, model: Mat4, time: f32) {
        self.camera.update();

        let uniforms = Uniforms {
            view: self.camera.view_matrix().to_cols_array_2d(),
            proj: self.camera.projection_matrix().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            color: self.material.color.to_array(),
            point_size: self.material.size,
            viewport_height: self.config.height as f32,
            time,
            size_attenuation: self.material.size_attenuation as u32,
            vertex_colors: self.material.vertex_colors as u32,
            use_alpha_map: self.has_alpha_map as u32,
            decode_srgb: self.config.format.is_srgb() as u32,
            _padding: [0; 2],
        };

        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Draw one frame, then the overlay if any.
    pub fn render(
        &mut self,
        model: Mat4,
        time: f32,
        overlay: Option<&mut dyn Overlay>,
    ) -> Result<(), wgpu::SurfaceError> {
        self.update_uniforms(model, time);

        let output = self.surface.get_current_texture()?;
        if output.suboptimal {
            tracing::warn!("surface texture is suboptimal");
        }
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Point Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if self.points.count() > 0 {
                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                render_pass.set_bind_group(1, &self.texture_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.points.positions.slice(..));
                render_pass.set_vertex_buffer(1, self.points.colors.slice(..));
                render_pass.draw(0..6, 0..self.points.count());
            }
        }

        let extra = match overlay {
            Some(overlay) => overlay.draw(
                &self.device,
                &self.queue,
                &mut encoder,
                &view,
                [self.config.width, self.config.height],
            ),
            None => Vec::new(),
        };

        self.queue
            .submit(extra.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();

        Ok(())
    }

    /// Recover from a render error. Returns `false` if the loop should stop.
    pub fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> bool {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                tracing::debug!(error = %err, "reconfiguring surface");
                self.reconfigure();
                true
            }
            wgpu::SurfaceError::OutOfMemory => {
                tracing::error!("GPU out of memory, stopping");
                false
            }
            other => {
                tracing::error!(error = %other, "render error");
                true
            }
        }
    }
}

fn create_point_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    material: &PointMaterial,
) -> wgpu::RenderPipeline {
    let float3 = |location| {
        [wgpu::VertexAttribute {
            offset: 0,
            shader_location: location,
            format: wgpu::VertexFormat::Float32x3,
        }]
    };
    let position_attributes = float3(0);
    let color_attributes = float3(1);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Point Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: POINT_STRIDE,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &position_attributes,
                },
                wgpu::VertexBufferLayout {
                    array_stride: POINT_STRIDE,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &color_attributes,
                },
            ],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(material.blend_mode.to_blend_state()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: material.depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_texture_bind_group(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    texture: &TextureData,
) -> (wgpu::BindGroupLayout, wgpu::BindGroup) {
    let gpu_texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some("Alpha Map"),
            size: wgpu::Extent3d {
                width: texture.width,
                height: texture.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        &texture.data,
    );
    let view = gpu_texture.create_view(&wgpu::TextureViewDescriptor::default());

    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Alpha Map Sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });

    let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Alpha Map Bind Group Layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Alpha Map Bind Group"),
        layout: &layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    });

    (layout, bind_group)
}

fn create_depth_texture(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
