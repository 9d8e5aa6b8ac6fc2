// UniAIMS - ui/panels/upload.rs
//
// "Create Analysis Task" form. Picking Particle/Fiber swaps the offered
// analysis methods; Start Analysis opens the workstation for the new task.

use crate::app::drafts::{subtasks, Device, MODEL_VERSIONS};
use crate::app::state::AppState;
use crate::core::model::Mode;
use crate::ui::{theme, widgets};
use egui::RichText;

const IMAGE_EXTENSIONS: &[&str] = &["tif", "tiff", "png", "jpg", "jpeg", "bmp"];

/// Render the upload form (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    if ui.link("\u{2190} Back to Dashboard").clicked() {
        state.navigate("/dashboard");
        return;
    }
    ui.add_space(6.0);
    widgets::page_header(
        ui,
        "Create Analysis Task",
        "Upload SEM images and choose how they should be analysed.",
    );

    let mut start = false;
    egui::ScrollArea::vertical()
        .id_salt("upload_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            let draft = &mut state.upload;

            // -----------------------------------------------------------------
            // Analysis mode
            // -----------------------------------------------------------------
            ui.strong("Analysis Mode");
            ui.horizontal(|ui| {
                for (mode, hint) in [
                    (Mode::Particle, "Detect and classify nanoparticles"),
                    (Mode::Fiber, "Analyze fiber networks & alignment"),
                ] {
                    let selected = draft.task_type() == mode;
                    let text = RichText::new(format!("{} Analysis\n{hint}", mode.label()));
                    let text = if selected {
                        text.color(theme::mode_colour(mode)).strong()
                    } else {
                        text
                    };
                    if ui
                        .add_sized([260.0, 48.0], egui::SelectableLabel::new(selected, text))
                        .clicked()
                        && !selected
                    {
                        draft.set_task_type(mode);
                    }
                }
            });
            ui.add_space(8.0);

            // -----------------------------------------------------------------
            // Method
            // -----------------------------------------------------------------
            ui.strong("Analysis Method");
            ui.label(RichText::new("Select the algorithm.").small().weak());
            ui.horizontal_wrapped(|ui| {
                for info in subtasks(draft.task_type()) {
                    let selected = draft.sub_type() == info.id;
                    if ui.selectable_label(selected, info.title).clicked() {
                        draft.set_sub_type(info.id);
                    }
                }
            });
            let info = draft.sub_type_info();
            egui::Frame::group(ui.style())
                .corner_radius(6.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new("About this Algorithm").strong());
                    ui.label(info.description);
                    ui.add_space(4.0);
                    ui.label(RichText::new("Capabilities").small().weak());
                    ui.horizontal_wrapped(|ui| {
                        for feature in info.features {
                            widgets::badge(ui, feature, theme::mode_colour(draft.task_type()));
                        }
                    });
                });
            ui.add_space(8.0);

            // -----------------------------------------------------------------
            // Task configuration
            // -----------------------------------------------------------------
            ui.strong("Task Configuration");
            egui::Grid::new("upload_config")
                .num_columns(2)
                .spacing([16.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Task Name");
                    ui.add(
                        egui::TextEdit::singleline(&mut draft.task_name)
                            .hint_text("e.g. Graphene Oxide Sample B")
                            .desired_width(320.0),
                    );
                    ui.end_row();

                    ui.label("Model Version:");
                    let current = MODEL_VERSIONS
                        .iter()
                        .find(|(id, _)| *id == draft.model_version)
                        .map_or(draft.model_version.as_str(), |(_, label)| label);
                    egui::ComboBox::from_id_salt("upload_model")
                        .selected_text(current.to_string())
                        .show_ui(ui, |ui| {
                            for (id, label) in MODEL_VERSIONS {
                                ui.selectable_value(&mut draft.model_version, id.to_string(), *label);
                            }
                        });
                    ui.end_row();

                    ui.label("Execution Device");
                    ui.horizontal(|ui| {
                        for device in [Device::Gpu, Device::Cpu] {
                            ui.radio_value(&mut draft.device, device, device.label());
                        }
                    });
                    ui.end_row();

                    ui.label("Description (Optional)");
                    ui.add(
                        egui::TextEdit::multiline(&mut draft.description)
                            .desired_rows(3)
                            .desired_width(320.0),
                    );
                    ui.end_row();
                });
            ui.add_space(8.0);

            // -----------------------------------------------------------------
            // Images
            // -----------------------------------------------------------------
            ui.strong("Upload SEM Images");
            ui.horizontal(|ui| {
                if ui.button("Add Images\u{2026}").clicked() {
                    if let Some(files) = rfd::FileDialog::new()
                        .add_filter("SEM images", IMAGE_EXTENSIONS)
                        .pick_files()
                    {
                        tracing::debug!(count = files.len(), "Images picked for upload");
                        draft.add_files(files);
                    }
                }
                ui.label(RichText::new(format!("{} selected", draft.files.len())).weak());
            });
            let mut remove = None;
            for (i, file) in draft.files.iter().enumerate() {
                ui.horizontal(|ui| {
                    let name = file.file_name().and_then(|n| n.to_str()).unwrap_or("?");
                    ui.label(RichText::new(name).monospace())
                        .on_hover_text(file.display().to_string());
                    if ui.small_button("\u{2716}").on_hover_text("Remove").clicked() {
                        remove = Some(i);
                    }
                });
            }
            if let Some(i) = remove {
                draft.files.remove(i);
            }

            ui.add_space(12.0);
            if ui
                .add(
                    egui::Button::new(RichText::new("Start Analysis \u{25b6}").color(egui::Color32::WHITE))
                        .fill(theme::ACCENT)
                        .min_size(egui::vec2(160.0, 32.0)),
                )
                .clicked()
            {
                start = true;
            }
        });

    if start {
        state.start_upload();
    }
}
