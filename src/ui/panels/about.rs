// UniAIMS - ui/panels/about.rs
//
// About dialog, opened from Help > About. Centred, fixed-size window.

use crate::app::state::AppState;
use crate::util::constants::{APP_NAME, APP_VERSION};
use egui::RichText;

/// Render the About dialog (if `state.show_about` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_about {
        return;
    }

    let mut open = true;
    egui::Window::new(format!("About {APP_NAME}"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(360.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(format!("\u{1f52c}  {APP_NAME}")).size(28.0).strong());
                ui.add_space(4.0);
                ui.label(RichText::new(format!("v{APP_VERSION}")).size(14.0).weak());
            });

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(8.0);

            ui.vertical_centered(|ui| {
                ui.label("Image analysis workstation for materials science.");
                ui.label("Particle and fiber recognition, charts and reports.");
            });

            ui.add_space(10.0);
            egui::Grid::new("about_stats").num_columns(2).show(ui, |ui| {
                ui.label(RichText::new("Data source").weak());
                ui.label("Built-in sample data");
                ui.end_row();
                ui.label(RichText::new("Workspace mode").weak());
                ui.label(state.mode().map_or("(none)", |m| m.label()));
                ui.end_row();
                ui.label(RichText::new("Report modules").weak());
                ui.label(state.report.modules().len().to_string());
                ui.end_row();
            });

            ui.add_space(8.0);
            ui.separator();
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("Built with Rust & egui").small().weak());
            });
            ui.add_space(8.0);
        });

    if !open {
        state.show_about = false;
    }
}
