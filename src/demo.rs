//! Demo builder and runner.
//!
//! [`Demo`] wires a [`Scene`] and a [`GpuState`] into a winit window and
//! drives the frame loop: advance the clock, animate, upload changed
//! positions, draw the panel, regenerate on committed edits, render.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::animation::Animation;
use crate::config::DemoConfig;
use crate::error::DemoError;
use crate::generator::Generator;
use crate::gpu::{GpuState, OrbitCamera};
use crate::material::PointMaterial;
use crate::random::PointRng;
use crate::scene::Scene;
use crate::textures::load_alpha_map;
use crate::time::Clock;
use crate::viewport::Viewport;

#[cfg(feature = "egui")]
use crate::gpu::egui_integration::{EguiFrameOutput, EguiIntegration};
#[cfg(feature = "egui")]
use crate::gpu::Overlay;

/// A point-cloud demo ready to run.
///
/// ```ignore
/// use pointfield::prelude::*;
///
/// Demo::new(GalaxyParams::default())
///     .with_seed(7)
///     .with_animation(Animation::Spin { speed: 0.1 })
///     .run()?;
/// ```
pub struct Demo {
    config: DemoConfig,
}

impl Demo {
    /// Demo for `generator` with the variant's default setup.
    pub fn new(generator: impl Into<Generator>) -> Self {
        let generator = generator.into();
        let config = match generator {
            Generator::Galaxy(_) => DemoConfig::galaxy(),
            Generator::Scatter(_) => DemoConfig::scatter(),
        };
        Self {
            config: DemoConfig { generator, ..config },
        }
    }

    pub fn from_config(config: DemoConfig) -> Self {
        Self { config }
    }

    /// Fix the random seed so every run and every regeneration with the
    /// same parameters produces the same points.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn with_material<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut PointMaterial),
    {
        f(&mut self.config.material);
        self
    }

    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.config.animation = animation;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.window.title = title.into();
        self
    }

    /// Show or hide the debug panel. Has no effect without the `egui` feature.
    pub fn with_panel(mut self, show: bool) -> Self {
        self.config.show_panel = show;
        self
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Open the window and run until it is closed.
    pub fn run(self) -> Result<(), DemoError> {
        let rng = PointRng::new(self.config.seed);
        let scene = Scene::new(self.config.generator.clone(), self.config.animation, rng)?;
        tracing::info!(
            variant = scene.generator().name(),
            points = scene.points().len(),
            seed = ?self.config.seed,
            "starting demo"
        );

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self.config, scene);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct App {
    config: DemoConfig,
    scene: Scene,
    clock: Clock,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    #[cfg(feature = "egui")]
    egui: Option<EguiIntegration>,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
    /// First fatal error, returned from [`Demo::run`].
    error: Option<DemoError>,
}

impl App {
    fn new(config: DemoConfig, scene: Scene) -> Self {
        Self {
            config,
            scene,
            clock: Clock::new(),
            window: None,
            gpu_state: None,
            #[cfg(feature = "egui")]
            egui: None,
            mouse_pressed: false,
            last_mouse_pos: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), DemoError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window.title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.window = Some(window.clone());

        let alpha_map = load_alpha_map(self.config.material.alpha_map.as_deref());
        let camera = OrbitCamera::from(&self.config.camera);
        let gpu_state = pollster::block_on(GpuState::new(
            window.clone(),
            self.scene.points(),
            self.config.material.clone(),
            camera,
            alpha_map,
        ))?;

        #[cfg(feature = "egui")]
        if self.config.show_panel {
            self.egui = Some(EguiIntegration::new(
                gpu_state.device(),
                gpu_state.surface_format(),
                &window,
            ));
        }

        self.gpu_state = Some(gpu_state);
        self.clock = Clock::new();
        window.request_redraw();
        Ok(())
    }

    fn resize_to_window(&mut self) {
        if let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) {
            let size = window.inner_size();
            gpu_state.resize(Viewport::from_physical(size.width, size.height, window.scale_factor()));
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let elapsed = self.clock.tick();
        self.scene.tick(elapsed);

        let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) else {
            return;
        };

        if self.scene.take_dirty() {
            gpu_state.write_positions(self.scene.points());
        }

        #[cfg(feature = "egui")]
        let result = match self.egui.as_mut() {
            Some(egui) => {
                let output = draw_panel(egui, window, &mut self.scene, gpu_state, self.clock.fps());
                let size = window.inner_size();
                let render_scale =
                    Viewport::from_physical(size.width, size.height, window.scale_factor()).render_scale();
                let mut paint = egui.paint(output, render_scale as f32);
                let overlay: &mut dyn Overlay = &mut paint;
                gpu_state.render(self.scene.model_matrix(), elapsed, Some(overlay))
            }
            None => gpu_state.render(self.scene.model_matrix(), elapsed, None),
        };
        #[cfg(not(feature = "egui"))]
        let result = gpu_state.render(self.scene.model_matrix(), elapsed, None);

        if let Err(err) = result {
            if !gpu_state.handle_surface_error(err) {
                event_loop.exit();
                return;
            }
        }

        window.request_redraw();
    }
}

/// Run the panel for one frame and apply whatever it committed.
#[cfg(feature = "egui")]
fn draw_panel(
    egui: &mut EguiIntegration,
    window: &Window,
    scene: &mut Scene,
    gpu_state: &mut GpuState,
    fps: f32,
) -> EguiFrameOutput {
    egui.begin_pass(window);
    let mut material = gpu_state.material().clone();
    let response = crate::panel::show(&egui.ctx, scene, &mut material, fps);
    let output = egui.end_pass(window);

    if response.material_changed {
        gpu_state.set_material(material);
    }
    if response.regenerate {
        match scene.regenerate() {
            Ok(points) => gpu_state.replace_points(points),
            Err(err) => tracing::warn!(error = %err, "rejected parameters, keeping current points"),
        }
    }
    output
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(err) = self.init(event_loop) {
                tracing::error!(error = %err, "failed to start demo");
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        #[cfg(feature = "egui")]
        let consumed = match (&mut self.egui, &self.window) {
            (Some(egui), Some(window)) => egui.on_window_event(window, &event) || egui.wants_pointer(),
            _ => false,
        };
        #[cfg(not(feature = "egui"))]
        let consumed = false;

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.resize_to_window();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(named),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } if !consumed => match named {
                NamedKey::Space => self.clock.toggle_pause(),
                NamedKey::Escape => event_loop.exit(),
                _ => {}
            },
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed && !consumed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = position.x - last_x;
                        let dy = position.y - last_y;
                        if let Some(gpu_state) = &mut self.gpu_state {
                            gpu_state.camera.rotate(dx as f32, dy as f32);
                        }
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } if !consumed => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.camera.zoom(scroll);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{GalaxyParams, ScatterParams};
    use crate::material::BlendMode;

    #[test]
    fn test_new_picks_variant_defaults() {
        let galaxy = Demo::new(GalaxyParams::default());
        assert_eq!(galaxy.config().animation, Animation::Spin { speed: 0.1 });
        assert!(matches!(galaxy.config().generator, Generator::Galaxy(_)));

        let scatter = Demo::new(ScatterParams::default());
        assert_eq!(scatter.config().animation, Animation::Wave);
        assert!(matches!(scatter.config().generator, Generator::Scatter(_)));
    }

    #[test]
    fn test_builder_overrides() {
        let demo = Demo::new(GalaxyParams {
            count: 2000,
            ..Default::default()
        })
        .with_seed(7)
        .with_animation(Animation::None)
        .with_title("test")
        .with_panel(false)
        .with_material(|m| {
            m.size = 0.05;
            m.blend_mode = BlendMode::Alpha;
        });

        let config = demo.config();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.animation, Animation::None);
        assert_eq!(config.window.title, "test");
        assert!(!config.show_panel);
        assert_eq!(config.material.size, 0.05);
        assert_eq!(config.material.blend_mode, BlendMode::Alpha);
        match &config.generator {
            Generator::Galaxy(p) => assert_eq!(p.count, 2000),
            other => panic!("unexpected {}", other.name()),
        }
    }
}
