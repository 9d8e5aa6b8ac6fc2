// UniAIMS - ui/panels/export_modal.rs
//
// "Save to Dataset" dialog opened from the workstation sidebar. The target
// is always under `/mnt/`; confirming only records the request.

use crate::app::state::AppState;
use crate::ui::theme;
use egui::RichText;

pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.export_draft.open {
        return;
    }

    let mut open = true;
    let mut confirmed = false;
    let mut cancelled = false;
    let draft = &mut state.export_draft;

    egui::Window::new("Save to Dataset")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(
                RichText::new("Export the current annotations as a training dataset.")
                    .weak(),
            );
            ui.add_space(8.0);
            ui.label("Target Path");
            ui.horizontal(|ui| {
                ui.label(RichText::new("/mnt/").monospace().weak());
                ui.add(
                    egui::TextEdit::singleline(&mut draft.path)
                        .font(egui::TextStyle::Monospace)
                        .desired_width(300.0),
                );
            });
            ui.label(RichText::new(draft.full_path()).small().monospace().weak());
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui
                    .add(
                        egui::Button::new(RichText::new("Confirm").color(egui::Color32::WHITE))
                            .fill(theme::ACCENT),
                    )
                    .clicked()
                {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

    if confirmed {
        draft.confirm();
        state.status_message = format!("Dataset export queued to {}", state.export_draft.full_path());
    } else if cancelled || !open {
        draft.cancel();
    }
}
