// UniAIMS - ui/panels/warnings.rs
//
// Startup warnings (configuration problems, unreadable store) in a
// dismissable window. Opened automatically when any were collected.

use crate::app::state::AppState;
use crate::ui::theme;
use egui::RichText;

pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_warnings {
        return;
    }

    let mut open = true;
    let mut clear = false;
    egui::Window::new(format!("Warnings ({})", state.warnings.len()))
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_width(480.0)
        .show(ctx, |ui| {
            if state.warnings.is_empty() {
                ui.label(RichText::new("No warnings.").weak());
                return;
            }
            egui::ScrollArea::vertical()
                .id_salt("warnings_scroll")
                .max_height(300.0)
                .show(ui, |ui| {
                    for w in &state.warnings {
                        ui.label(RichText::new(format!("\u{26a0} {w}")).color(theme::WARNING_TEXT));
                    }
                });
            ui.add_space(6.0);
            if ui.button("Clear").clicked() {
                clear = true;
            }
        });

    if clear {
        state.warnings.clear();
    }
    if !open {
        state.show_warnings = false;
    }
}
