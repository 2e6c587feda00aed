//! Egui debug panel support.
//!
//! Only built with the `egui` feature.

use std::sync::Arc;
use winit::window::Window;

use super::Overlay;

/// Egui context, winit input state and wgpu renderer.
pub struct EguiIntegration {
    pub ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

/// Tessellated output of one egui pass.
pub struct EguiFrameOutput {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

impl EguiIntegration {
    pub fn new(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        window: &Arc<Window>,
    ) -> Self {
        let ctx = egui::Context::default();

        let mut style = egui::Style::default();
        style.visuals = egui::Visuals::dark();
        style.visuals.window_shadow = egui::Shadow::NONE;
        style.visuals.popup_shadow = egui::Shadow::NONE;
        ctx.set_style(style);

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let renderer = egui_wgpu::Renderer::new(
            device,
            output_format,
            None,  // depth format
            1,     // msaa samples
            false, // dithering
        );

        Self { ctx, state, renderer }
    }

    /// Feed a winit event to egui.
    ///
    /// Returns true if egui consumed it and camera controls should ignore it.
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Whether the pointer is over an egui area or a widget is being dragged.
    pub fn wants_pointer(&self) -> bool {
        self.ctx.wants_pointer_input() || self.ctx.is_pointer_over_area()
    }

    pub fn begin_pass(&mut self, window: &Window) {
        let raw_input = self.state.take_egui_input(window);
        self.ctx.begin_pass(raw_input);
    }

    pub fn end_pass(&mut self, window: &Window) -> EguiFrameOutput {
        let full_output = self.ctx.end_pass();

        self.state
            .handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        EguiFrameOutput {
            paint_jobs,
            textures_delta: full_output.textures_delta,
            pixels_per_point: full_output.pixels_per_point,
        }
    }

    /// Pair this frame's output with the integration for [`GpuState::render`].
    ///
    /// `render_scale` is surface pixels per window pixel, below 1.0 when the
    /// surface pixel ratio is capped.
    ///
    /// [`GpuState::render`]: super::GpuState::render
    pub fn paint<'a>(&'a mut self, output: EguiFrameOutput, render_scale: f32) -> EguiPaint<'a> {
        EguiPaint {
            integration: self,
            output,
            render_scale,
        }
    }
}

/// One frame of egui ready to draw over the points.
pub struct EguiPaint<'a> {
    integration: &'a mut EguiIntegration,
    output: EguiFrameOutput,
    render_scale: f32,
}

impl Overlay for EguiPaint<'_> {
    fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
    ) -> Vec<wgpu::CommandBuffer> {
        let renderer = &mut self.integration.renderer;
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: self.output.pixels_per_point * self.render_scale,
        };

        for (id, image_delta) in &self.output.textures_delta.set {
            renderer.update_texture(device, queue, *id, image_delta);
        }

        let extra = renderer.update_buffers(
            device,
            queue,
            encoder,
            &self.output.paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            renderer.render(
                &mut render_pass.forget_lifetime(),
                &self.output.paint_jobs,
                &screen_descriptor,
            );
        }

        for id in &self.output.textures_delta.free {
            renderer.free_texture(id);
        }

        extra
    }
}
