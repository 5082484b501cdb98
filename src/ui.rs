// src/ui.rs

use shape_canvas::config::ControlSettings;
use shape_canvas::form::ControlForm;

/// Logical width of the control panel to the right of the canvas.
pub const PANEL_WIDTH: f32 = 340.0;

pub const INPUT_ERROR_MESSAGE: &str = "Please fill in all fields with valid numeric values.";

/// What the user asked for during this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UiActions {
    pub generate: bool,
    pub scale_changed: bool,
}

pub fn build_ui(
    ctx: &egui::Context,
    form: &mut ControlForm,
    controls: &ControlSettings,
    error: &mut Option<String>,
) -> UiActions {
    let mut actions = UiActions::default();

    egui::SidePanel::right("control_panel")
        .resizable(false)
        .exact_width(PANEL_WIDTH)
        .show(ctx, |ui| {
            ui.heading("Shape Generator");
            ui.separator();

            egui::Grid::new("shape_counts").num_columns(2).show(ui, |ui| {
                for (label, text) in form.count_fields_mut() {
                    ui.label(format!("{label}:"));
                    ui.add(egui::TextEdit::singleline(text).hint_text(label).desired_width(90.0));
                    ui.end_row();
                }
            });
            ui.separator();

            egui::Grid::new("region_bounds").num_columns(2).show(ui, |ui| {
                for (label, text) in form.bound_fields_mut() {
                    ui.label(format!("{label}:"));
                    ui.add(egui::TextEdit::singleline(text).hint_text(label).desired_width(90.0));
                    ui.end_row();
                }
            });
            ui.separator();

            ui.label("Settings:");
            ui.label("Scale:");
            actions.scale_changed = ui
                .add(egui::Slider::new(&mut form.scale, controls.scale_min..=controls.scale_max))
                .changed();
            ui.label("Density:");
            ui.add(egui::Slider::new(&mut form.density, controls.density_min..=controls.density_max));

            ui.checkbox(&mut form.fill, "Fill");
            ui.checkbox(&mut form.show_grid, "Show grid");
            actions.generate = ui.button("Generate").clicked();
        });

    let mut dismissed = false;
    if let Some(message) = error.as_deref() {
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
    }
    if dismissed {
        *error = None;
    }

    actions
}
