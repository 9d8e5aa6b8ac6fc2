// UniAIMS - ui/panels/dashboard.rs
//
// Dashboard: analysis tasks, fine-tuning jobs, compute resources and data
// batches, one tab each. The active tab and the grid/list toggle live in the
// route query (`tab`, `view`) so they survive back navigation.
//
// Task lists go through the shared filter toolbar and pager; clicking a task
// opens its workstation.

use crate::app::state::AppState;
use crate::app::views::{DashboardTab, ViewMode};
use crate::core::export::{default_file_name, ExportFormat};
use crate::core::model::{DataBatch, Task, TaskType};
use crate::ui::{theme, widgets};
use egui::RichText;

/// Render the dashboard (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let tab = state.dashboard.tab;
    let view = state.view_mode();

    ui.horizontal(|ui| {
        ui.heading("Dashboard");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let (label, target) = match tab {
                DashboardTab::Training => ("\u{2795} Start New Fine-tuning", "/finetune?tab=settings"),
                DashboardTab::Data => ("\u{2795} New Data Batch", "/data/new"),
                _ => ("\u{2795} Start New Analysis", "/upload"),
            };
            if ui
                .add(egui::Button::new(RichText::new(label).color(egui::Color32::WHITE)).fill(theme::ACCENT))
                .clicked()
            {
                state.navigate(target);
            }
        });
    });
    ui.add_space(4.0);

    // -------------------------------------------------------------------------
    // Tab strip and view toggle
    // -------------------------------------------------------------------------
    let mut next_tab = None;
    let mut next_view = None;
    ui.horizontal(|ui| {
        for t in DashboardTab::all() {
            if ui.selectable_label(tab == *t, t.label()).clicked() && tab != *t {
                next_tab = Some(*t);
            }
        }
        if matches!(tab, DashboardTab::Analysis | DashboardTab::Training | DashboardTab::Data) {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .selectable_label(view == ViewMode::List, "\u{2630}")
                    .on_hover_text("List view")
                    .clicked()
                {
                    next_view = Some(ViewMode::List);
                }
                if ui
                    .selectable_label(view == ViewMode::Grid, "\u{25a6}")
                    .on_hover_text("Grid view")
                    .clicked()
                {
                    next_view = Some(ViewMode::Grid);
                }
            });
        }
    });
    ui.separator();

    if let Some(t) = next_tab {
        state.set_query("tab", t.key());
        return;
    }
    if let Some(v) = next_view {
        state.set_query("view", v.key());
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("dashboard_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| match tab {
            DashboardTab::Analysis | DashboardTab::Training => task_tab(ui, state, tab, view),
            DashboardTab::Resources => resources_tab(ui, state),
            DashboardTab::Data => data_tab(ui, state, view),
        });
}

// =============================================================================
// Task lists
// =============================================================================

fn task_tab(ui: &mut egui::Ui, state: &mut AppState, tab: DashboardTab, view: ViewMode) {
    let (id, types): (&str, &[TaskType]) = match tab {
        DashboardTab::Training => ("training", &[]),
        _ => ("analysis", &[TaskType::Particle, TaskType::Fiber]),
    };

    ui.horizontal(|ui| {
        let list = match tab {
            DashboardTab::Training => &mut state.dashboard.training,
            _ => &mut state.dashboard.analysis,
        };
        if widgets::filter_toolbar(ui, id, &mut list.filter, types) {
            list.pager.page = 1;
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            export_menu(ui, state, tab);
        });
    });
    ui.add_space(6.0);

    let (rows, total) = state.visible_tasks(tab);
    let mut open: Option<String> = None;

    if rows.is_empty() {
        widgets::empty_state(ui, "No tasks match the current filters.");
    } else {
        match view {
            ViewMode::Grid => {
                ui.horizontal_wrapped(|ui| {
                    for task in &rows {
                        if task_card(ui, task).clicked() {
                            open = Some(task.target_path());
                        }
                    }
                });
            }
            ViewMode::List => {
                if let Some(path) = task_table(ui, id, &rows) {
                    open = Some(path);
                }
            }
        }
    }

    ui.add_space(8.0);
    let pager = match tab {
        DashboardTab::Training => &mut state.dashboard.training.pager,
        _ => &mut state.dashboard.analysis.pager,
    };
    widgets::pagination(ui, id, pager, total);

    if let Some(path) = open {
        state.navigate(&path);
    }
}

fn task_card(ui: &mut egui::Ui, task: &Task) -> egui::Response {
    let frame = egui::Frame::group(ui.style())
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.set_min_size(egui::vec2(theme::CARD_WIDTH, theme::CARD_HEIGHT));
            ui.set_max_width(theme::CARD_WIDTH);
            ui.horizontal(|ui| {
                widgets::badge(ui, task.task_type.label(), theme::type_colour(task.task_type));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    widgets::badge(ui, task.status.label(), theme::status_colour(task.status));
                });
            });
            ui.add_space(4.0);
            ui.label(RichText::new(&task.name).strong());
            ui.label(RichText::new(&task.id).monospace().weak());
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("\u{1f4c5} {}", task.date)).small());
                if task.items > 0 {
                    ui.label(RichText::new(format!("\u{25a3} {} items", task.items)).small());
                }
            });
            ui.label(RichText::new(format!("Model {}", task.model)).small().weak());
        });
    frame
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Striped table of tasks. Returns the target of a clicked row.
fn task_table(ui: &mut egui::Ui, id: &str, rows: &[Task]) -> Option<String> {
    let mut open = None;
    egui::Grid::new(format!("{id}_table"))
        .num_columns(6)
        .striped(true)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            ui.strong("Task Name");
            ui.strong("ID");
            ui.strong("Date");
            ui.strong("Items");
            ui.strong("Model");
            ui.strong("Status");
            ui.end_row();

            for task in rows {
                if ui.link(&task.name).clicked() {
                    open = Some(task.target_path());
                }
                ui.label(RichText::new(&task.id).monospace());
                ui.label(&task.date);
                ui.label(task.items.to_string());
                ui.label(&task.model);
                widgets::badge(ui, task.status.label(), theme::status_colour(task.status));
                ui.end_row();
            }
        });
    open
}

fn export_menu(ui: &mut egui::Ui, state: &mut AppState, tab: DashboardTab) {
    let has_rows = !state.filtered_tasks(tab).is_empty();
    ui.add_enabled_ui(has_rows, |ui| {
        ui.menu_button("\u{2b07} Export", |ui| {
            for format in [ExportFormat::Csv, ExportFormat::Json] {
                if ui.button(format!("Export {}...", format.label())).clicked() {
                    let name = default_file_name(
                        chrono::Local::now().naive_local(),
                        format.extension(),
                    );
                    if let Some(dest) = rfd::FileDialog::new()
                        .add_filter(format.label(), &[format.extension()])
                        .set_file_name(name)
                        .save_file()
                    {
                        // Failures land in the status bar.
                        let _ = state.export_tasks(tab, &dest, format);
                    }
                    ui.close_menu();
                }
            }
        });
    });
}

// =============================================================================
// Resources
// =============================================================================

fn resources_tab(ui: &mut egui::Ui, state: &mut AppState) {
    let pools = state.repo().resources();
    let queue = state.repo().user_queue();

    ui.columns(pools.len().max(1), |columns| {
        for (col, pool) in columns.iter_mut().zip(&pools) {
            egui::Frame::group(col.style())
                .corner_radius(8.0)
                .inner_margin(egui::Margin::same(12))
                .show(col, |ui| {
                    ui.label(RichText::new(format!("{} Resource Queue", pool.label)).strong());
                    ui.label(
                        RichText::new(if pool.label == "GPU" {
                            "High-performance training & inference"
                        } else {
                            "General processing & lightweight inference"
                        })
                        .small()
                        .weak(),
                    );
                    ui.add_space(6.0);
                    ui.add(
                        egui::ProgressBar::new(pool.utilisation())
                            .text(format!("{:.0}% in use", pool.utilisation() * 100.0)),
                    );
                    ui.horizontal(|ui| {
                        ui.label(format!(
                            "{} / {} {} available",
                            pool.available, pool.total, pool.unit
                        ));
                        ui.separator();
                        ui.label(format!("{} queued", pool.queued));
                    });
                });
        }
    });

    ui.add_space(12.0);
    ui.strong("Your Queue");
    if queue.is_empty() {
        widgets::empty_state(ui, "You have no queued jobs.");
        return;
    }
    egui::Grid::new("user_queue")
        .num_columns(5)
        .striped(true)
        .spacing([16.0, 6.0])
        .show(ui, |ui| {
            ui.strong("Rank");
            ui.strong("Job ID");
            ui.strong("Type");
            ui.strong("Submitted");
            ui.strong("Priority");
            ui.end_row();
            for entry in &queue {
                ui.label(format!("#{}", entry.rank));
                ui.label(RichText::new(format!("{} {}", entry.id, entry.name)).monospace());
                widgets::badge(ui, entry.task_type.label(), theme::type_colour(entry.task_type));
                ui.label(&entry.submitted);
                ui.label(&entry.priority);
                ui.end_row();
            }
        });
}

// =============================================================================
// Data batches
// =============================================================================

fn data_tab(ui: &mut egui::Ui, state: &mut AppState, view: ViewMode) {
    if widgets::filter_toolbar(ui, "batches", &mut state.dashboard.batches.filter, &[]) {
        state.dashboard.batches.pager.page = 1;
    }
    ui.add_space(6.0);

    let (rows, total) = state.visible_batches();
    let mut open: Option<String> = None;

    if rows.is_empty() {
        widgets::empty_state(ui, "No data batches match the current filters.");
    } else if view == ViewMode::Grid {
        ui.horizontal_wrapped(|ui| {
            for batch in &rows {
                if batch_card(ui, batch).clicked() {
                    open = Some(format!("/data/{}/overview", batch.id));
                }
            }
        });
    } else {
        egui::Grid::new("batch_table")
            .num_columns(5)
            .striped(true)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                ui.strong("Batch");
                ui.strong("Uploader");
                ui.strong("Images");
                ui.strong("Uploaded");
                ui.strong("Status");
                ui.end_row();
                for batch in &rows {
                    if ui.link(&batch.name).clicked() {
                        open = Some(format!("/data/{}/overview", batch.id));
                    }
                    ui.label(&batch.uploader);
                    ui.label(batch.image_count.to_string());
                    ui.label(&batch.upload_date);
                    widgets::badge(ui, batch.status.label(), theme::batch_status_colour(batch.status));
                    ui.end_row();
                }
            });
    }

    ui.add_space(8.0);
    widgets::pagination(ui, "batches", &mut state.dashboard.batches.pager, total);

    if let Some(path) = open {
        state.navigate(&path);
    }
}

fn batch_card(ui: &mut egui::Ui, batch: &DataBatch) -> egui::Response {
    egui::Frame::group(ui.style())
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.set_min_size(egui::vec2(theme::CARD_WIDTH, theme::CARD_HEIGHT));
            ui.set_max_width(theme::CARD_WIDTH);
            ui.horizontal(|ui| {
                ui.label(RichText::new(&batch.id).monospace().weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    widgets::badge(ui, batch.status.label(), theme::batch_status_colour(batch.status));
                });
            });
            ui.label(RichText::new(&batch.name).strong());
            ui.label(RichText::new(format!("{} \u{00b7} {}", batch.uploader, batch.upload_date)).small());
            ui.horizontal_wrapped(|ui| {
                for tag in &batch.tags {
                    widgets::badge(ui, tag, theme::ACCENT);
                }
            });
            ui.label(
                RichText::new(format!(
                    "{} images \u{00b7} {} linked tasks",
                    batch.image_count,
                    batch.linked_tasks.len()
                ))
                .small()
                .weak(),
            );
        })
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
}
