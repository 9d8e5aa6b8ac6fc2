// UniAIMS - ui/panels/data_batch.rs
//
// Data batch screens: the "Create Data Batch" form and the batch board with
// its overview, image browser and linked-task tabs.

use crate::app::state::AppState;
use crate::core::filter::filtered;
use crate::core::model::{LinkedTask, TaskType};
use crate::core::route::BatchTab;
use crate::ui::{theme, widgets};
use egui::RichText;

const IMAGE_EXTENSIONS: &[&str] = &["tif", "tiff", "png", "jpg", "jpeg", "bmp"];

// =============================================================================
// Create
// =============================================================================

/// Render the create-batch form.
pub fn render_new(ui: &mut egui::Ui, state: &mut AppState) {
    if ui.link("\u{2190} Back to Data Batches").clicked() {
        state.navigate("/dashboard?tab=data");
        return;
    }
    ui.add_space(6.0);
    widgets::page_header(ui, "Create Data Batch", "Group uploaded images into a reusable batch.");

    let mut submit = false;
    {
        let draft = &mut state.batch_draft;
        ui.strong("Batch Configuration");
        egui::Grid::new("batch_form")
            .num_columns(2)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                ui.label("Batch Name *");
                ui.add(
                    egui::TextEdit::singleline(&mut draft.title)
                        .hint_text("e.g. Graphene Oxide Samples Q4")
                        .desired_width(320.0),
                );
                ui.end_row();

                ui.label("Description");
                ui.add(
                    egui::TextEdit::multiline(&mut draft.description)
                        .desired_rows(3)
                        .desired_width(320.0),
                );
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.strong("Upload Images");
        ui.horizontal(|ui| {
            if ui.button("Add Images\u{2026}").clicked() {
                if let Some(files) = rfd::FileDialog::new()
                    .add_filter("Images", IMAGE_EXTENSIONS)
                    .pick_files()
                {
                    draft.add_files(files);
                }
            }
            ui.label(RichText::new(format!("{} files", draft.files.len())).weak());
        });

        let mut remove = None;
        egui::ScrollArea::vertical()
            .id_salt("batch_files")
            .max_height(200.0)
            .show(ui, |ui| {
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
            });
        if let Some(i) = remove {
            draft.remove_file(i);
        }

        ui.add_space(12.0);
        let can_submit = !draft.title.trim().is_empty();
        if ui
            .add_enabled(
                can_submit,
                egui::Button::new(RichText::new("Create Batch").color(egui::Color32::WHITE))
                    .fill(theme::ACCENT),
            )
            .on_disabled_hover_text("Enter a batch name first")
            .clicked()
        {
            submit = true;
        }
    }

    if submit {
        state.submit_batch();
    }
}

// =============================================================================
// Batch board
// =============================================================================

/// Render the batch board for `tab`.
pub fn render_batch(ui: &mut egui::Ui, state: &mut AppState, tab: BatchTab) {
    let Some(batch) = state.batch_view.as_ref().and_then(|v| v.batch.clone()) else {
        widgets::empty_state(ui, "This data batch could not be found.");
        return;
    };

    ui.horizontal(|ui| {
        ui.label(RichText::new("Data Board").small().weak());
        ui.label(RichText::new(&batch.id).monospace().weak());
    });
    ui.horizontal(|ui| {
        ui.heading(&batch.name);
        widgets::badge(ui, batch.status.label(), theme::batch_status_colour(batch.status));
    });
    ui.separator();

    let mut open: Option<String> = None;
    let Some(view) = state.batch_view.as_mut() else {
        return;
    };

    egui::ScrollArea::vertical()
        .id_salt("batch_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| match tab {
            BatchTab::Overview => overview(ui, view),
            BatchTab::Browser => browser(ui, view),
            BatchTab::Tasks => open = tasks(ui, view),
        });

    if let Some(path) = open {
        state.navigate(&path);
    }
}

fn overview(ui: &mut egui::Ui, view: &mut crate::app::views::BatchViewState) {
    let Some(batch) = view.batch.clone() else {
        return;
    };
    egui::Grid::new("batch_overview")
        .num_columns(2)
        .spacing([16.0, 8.0])
        .show(ui, |ui| {
            ui.label("Batch Name");
            ui.add(egui::TextEdit::singleline(&mut view.edit_name).desired_width(360.0));
            ui.end_row();

            ui.label("Description");
            ui.add(
                egui::TextEdit::multiline(&mut view.edit_description)
                    .desired_rows(3)
                    .desired_width(360.0),
            );
            ui.end_row();

            ui.label("Uploaded By");
            ui.label(format!("\u{1f464} {}", batch.uploader));
            ui.end_row();

            ui.label("Upload Date");
            ui.label(format!("\u{1f4c5} {}", batch.upload_date));
            ui.end_row();

            ui.label("Tags");
            ui.horizontal_wrapped(|ui| {
                for tag in &batch.tags {
                    widgets::badge(ui, tag, theme::ACCENT);
                }
            });
            ui.end_row();
        });

    ui.add_space(8.0);
    if ui
        .add_enabled(view.is_dirty(), egui::Button::new("\u{1f4be} Save Changes"))
        .clicked()
    {
        view.save();
    }

    ui.add_space(16.0);
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.0, theme::status_colour(crate::core::model::TaskStatus::Failed)))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("Danger Zone").strong());
            ui.label(
                RichText::new("Permanently delete this data batch and all associated files.")
                    .small()
                    .weak(),
            );
            if ui.button("Delete Batch").clicked() {
                tracing::warn!(batch_id = %batch.id, "Batch deletion requested; mock data is read-only");
            }
        });
}

fn browser(ui: &mut egui::Ui, view: &mut crate::app::views::BatchViewState) {
    let images = view.batch.as_ref().map(|b| b.images.clone()).unwrap_or_default();
    let total = images.len();
    if images.is_empty() {
        widgets::empty_state(ui, "No images uploaded to this batch yet.");
        return;
    }
    ui.horizontal_wrapped(|ui| {
        for img in view.images.slice(&images) {
            egui::Frame::group(ui.style())
                .corner_radius(6.0)
                .show(ui, |ui| {
                    ui.set_width(140.0);
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new("\u{1f5bc}").size(32.0).weak());
                    });
                    ui.label(RichText::new(&img.name).small().strong())
                        .on_hover_text(&img.name);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&img.size).small().weak());
                        let day = img.date.split(' ').next().unwrap_or(&img.date);
                        ui.label(RichText::new(day).small().weak());
                    });
                });
        }
    });
    ui.add_space(8.0);
    widgets::pagination(ui, "batch_images", &mut view.images, total);
}

/// Linked tasks with the shared filter toolbar. Returns a clicked row's target.
fn tasks(ui: &mut egui::Ui, view: &mut crate::app::views::BatchViewState) -> Option<String> {
    ui.label(RichText::new("Analysis & Training performed on this dataset").weak());
    ui.add_space(4.0);
    let linked: Vec<LinkedTask> = view
        .batch
        .as_ref()
        .map(|b| b.linked_tasks.clone())
        .unwrap_or_default();

    if widgets::filter_toolbar(
        ui,
        "linked",
        &mut view.linked.filter,
        &[TaskType::Particle, TaskType::Fiber, TaskType::Training],
    ) {
        view.linked.pager.page = 1;
    }

    let rows = filtered(&linked, &view.linked.filter);
    let total = rows.len();
    let mut open = None;

    if rows.is_empty() {
        widgets::empty_state(ui, "No linked tasks match the current filters.");
    } else {
        egui::Grid::new("linked_tasks")
            .num_columns(4)
            .striped(true)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                ui.strong("Task");
                ui.strong("Type");
                ui.strong("Date");
                ui.strong("Status");
                ui.end_row();
                for task in view.linked.pager.slice(&rows) {
                    if ui.link(format!("{}  {}", task.id, task.name)).clicked() {
                        open = Some(task.target_path());
                    }
                    widgets::badge(ui, task.task_type.label(), theme::type_colour(task.task_type));
                    ui.label(&task.date);
                    widgets::badge(ui, task.status.label(), theme::status_colour(task.status));
                    ui.end_row();
                }
            });
    }
    ui.add_space(8.0);
    widgets::pagination(ui, "linked", &mut view.linked.pager, total);
    open
}
