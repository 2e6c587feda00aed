//! Debug panel for live parameter tuning.
//!
//! Each control is bounded by a [`ParamRange`] from [`crate::params`]. Edits
//! to generator parameters are committed when a slider drag ends or a value
//! is typed, so dragging a slider doesn't regenerate every frame. Colors are
//! committed once their picker closes.
//!
//! Values loaded from a config may sit outside a control's range. They are
//! shown as-is and only bounded once the user edits them.

use egui::emath::Numeric;
use egui::{Context, Response, Ui};

use crate::animation::Animation;
use crate::generator::{GalaxyParams, Generator, ScatterParams};
use crate::material::PointMaterial;
use crate::params::{self as bounds, ParamRange};
use crate::scene::Scene;

pub const PANEL_WIDTH: f32 = 400.0;

/// What the user changed this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelResponse {
    /// Generator parameters were committed; the point set must be rebuilt.
    pub regenerate: bool,
    /// Material changed; no regeneration needed.
    pub material_changed: bool,
    /// Animation was switched.
    pub animation_changed: bool,
}

impl PanelResponse {
    fn merge(&mut self, other: PanelResponse) {
        self.regenerate |= other.regenerate;
        self.material_changed |= other.material_changed;
        self.animation_changed |= other.animation_changed;
    }
}

/// Show the panel for whichever variant `scene` holds.
pub fn show(ctx: &Context, scene: &mut Scene, material: &mut PointMaterial, fps: f32) -> PanelResponse {
    let mut response = PanelResponse::default();
    let mut animation = scene.animation();

    egui::SidePanel::right("pointfield_controls")
        .exact_width(PANEL_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("{} points  |  {:.0} fps", scene.points().len(), fps));
            ui.separator();

            match scene.generator_mut() {
                Generator::Galaxy(params) => {
                    response.merge(galaxy_controls(ui, params, material));
                }
                Generator::Scatter(params) => {
                    response.merge(scatter_controls(ui, params, material, &mut animation));
                }
            }
        });

    if response.animation_changed {
        scene.set_animation(animation);
    }
    response
}

/// Galaxy controls: count, size, radius, branches, spin, randomness and the
/// two gradient colors.
pub fn galaxy_controls(ui: &mut Ui, params: &mut GalaxyParams, material: &mut PointMaterial) -> PanelResponse {
    let mut response = PanelResponse::default();

    ui.heading("Galaxy");

    response.regenerate |= committed(&bounded_slider(ui, &mut params.count, bounds::galaxy::COUNT));
    response.material_changed |= bounded_slider(ui, &mut material.size, bounds::galaxy::SIZE).changed();
    response.regenerate |= committed(&bounded_slider(ui, &mut params.radius, bounds::galaxy::RADIUS));
    response.regenerate |= committed(&bounded_slider(ui, &mut params.branches, bounds::galaxy::BRANCHES));
    response.regenerate |= committed(&bounded_slider(ui, &mut params.spin, bounds::galaxy::SPIN));
    response.regenerate |= committed(&bounded_slider(ui, &mut params.randomness, bounds::galaxy::RANDOMNESS));

    ui.separator();
    ui.heading("Colors");

    response.regenerate |= color_picker(ui, "inside", &mut params.inner_color);
    response.regenerate |= color_picker(ui, "outside", &mut params.outer_color);

    response
}

/// Scatter controls: count, scale, size and the wave toggle.
pub fn scatter_controls(
    ui: &mut Ui,
    params: &mut ScatterParams,
    material: &mut PointMaterial,
    animation: &mut Animation,
) -> PanelResponse {
    let mut response = PanelResponse::default();

    ui.heading("Particles");

    response.regenerate |= committed(&bounded_slider(ui, &mut params.count, bounds::scatter::COUNT));
    response.regenerate |= committed(&bounded_slider(ui, &mut params.scale, bounds::scatter::SCALE));
    response.material_changed |= bounded_slider(ui, &mut material.size, bounds::scatter::SIZE).changed();

    ui.separator();

    let mut waving = *animation == Animation::Wave;
    if ui.checkbox(&mut waving, "Wave").changed() {
        *animation = if waving { Animation::Wave } else { Animation::None };
        response.animation_changed = true;
    }

    response
}

fn bounded_slider<N: Numeric>(ui: &mut Ui, value: &mut N, range: ParamRange) -> Response {
    ui.add(
        egui::Slider::new(value, N::from_f64(range.min)..=N::from_f64(range.max))
            .step_by(range.step)
            .clamping(egui::SliderClamping::Edits)
            .text(range.label),
    )
}

/// A drag that just ended, or a change that didn't come from dragging
/// (typed value, arrow keys).
fn committed(response: &Response) -> bool {
    response.drag_stopped() || (response.changed() && !response.dragged())
}

fn color_picker(ui: &mut Ui, label: &str, color: &mut crate::color::Color) -> bool {
    ui.horizontal(|ui| {
        ui.label(label);
        let mut rgb = color.to_array();
        let button = ui.color_edit_button_rgb(&mut rgb);
        if button.changed() {
            *color = crate::color::Color::from_array(rgb);
        }
        ui.label(color.to_hex());

        let pending_id = button.id.with("pending");
        let pending = ui.data_mut(|d| d.get_temp::<bool>(pending_id)).unwrap_or(false);
        let popup_open = ui.memory(|m| m.any_popup_open());
        let (pending, commit) = settle_edit(pending, button.changed(), popup_open);
        ui.data_mut(|d| d.insert_temp(pending_id, pending));
        commit
    })
    .inner
}

/// Track an edit made through a popup. Returns `(pending, commit)`: edits
/// accumulate while the popup is open and commit once it closes.
fn settle_edit(pending: bool, changed: bool, popup_open: bool) -> (bool, bool) {
    let pending = pending || changed;
    if pending && !popup_open {
        (false, true)
    } else {
        (pending, false)
    }
}
