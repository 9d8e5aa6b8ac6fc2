// UniAIMS - ui/panels/reports.rs
//
// Report builder screen. Left: the ordered module list with expand,
// reorder and remove controls. Right: a live preview of every module.
// Templates are saved and loaded as JSON through native file dialogs.

use crate::app::state::AppState;
use crate::core::report::{ReportData, ReportModule};
use crate::ui::{theme, widgets};
use egui::RichText;
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

enum Action {
    Toggle(String),
    Remove(String),
    Move(usize, usize),
}

/// Render the report builder for the mounted task.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let task_id = state.route().task_id().unwrap_or_default().to_string();

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.heading("Report Builder");
            ui.label(
                RichText::new(format!("Task {task_id} \u{00b7} {} modules", state.report.modules().len()))
                    .weak(),
            );
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("\u{1f4c2} Load Template").clicked() {
                load_template(state);
            }
            if ui.button("\u{1f4be} Save Template").clicked() {
                save_template(state);
            }
        });
    });
    ui.separator();

    let mut action = None;
    egui::SidePanel::left("report_modules")
        .default_width(320.0)
        .resizable(true)
        .show_inside(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("report_module_list")
                .auto_shrink([false; 2])
                .show(ui, |ui| action = module_list(ui, state));
        });

    egui::CentralPanel::default().show_inside(ui, |ui| {
        egui::ScrollArea::vertical()
            .id_salt("report_preview")
            .auto_shrink([false; 2])
            .show(ui, |ui| preview(ui, state.report.modules()));
    });

    match action {
        Some(Action::Toggle(id)) => state.report.toggle_expanded(&id),
        Some(Action::Remove(id)) => {
            if state.report.remove(&id) {
                state.status_message = format!("Removed {id} from report.");
            }
        }
        Some(Action::Move(from, to)) => state.report.move_module(from, to),
        None => {}
    }
}

fn module_list(ui: &mut egui::Ui, state: &AppState) -> Option<Action> {
    let modules = state.report.modules();
    if modules.is_empty() {
        widgets::empty_state(ui, "No modules yet. Add charts from the analysis views.");
        return None;
    }

    let mut action = None;
    let last = modules.len() - 1;
    for (i, module) in modules.iter().enumerate() {
        let expanded = state.report.is_expanded(&module.id);
        egui::Frame::group(ui.style())
            .corner_radius(6.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    let arrow = if expanded { "\u{25be}" } else { "\u{25b8}" };
                    if ui.small_button(arrow).clicked() {
                        action = Some(Action::Toggle(module.id.clone()));
                    }
                    widgets::badge(ui, module.kind.label(), theme::series_colour(i));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("\u{1f5d1}").on_hover_text("Remove").clicked() {
                            action = Some(Action::Remove(module.id.clone()));
                        }
                        if ui
                            .add_enabled(i < last, egui::Button::new("\u{2b07}").small())
                            .on_hover_text("Move down")
                            .clicked()
                        {
                            action = Some(Action::Move(i, i + 1));
                        }
                        if ui
                            .add_enabled(i > 0, egui::Button::new("\u{2b06}").small())
                            .on_hover_text("Move up")
                            .clicked()
                        {
                            action = Some(Action::Move(i, i - 1));
                        }
                    });
                });
                ui.label(RichText::new(&module.title).strong());
                if expanded {
                    module_details(ui, module);
                }
            });
        ui.add_space(4.0);
    }
    action
}

fn module_details(ui: &mut egui::Ui, module: &ReportModule) {
    ui.label(RichText::new(&module.description).small());
    egui::Grid::new(("report_settings", module.id.as_str()))
        .num_columns(2)
        .spacing([12.0, 2.0])
        .show(ui, |ui| {
            ui.label(RichText::new("Attributes").small().weak());
            ui.label(RichText::new(module.attributes.join(", ")).small());
            ui.end_row();
            for (key, value) in &module.settings {
                ui.label(RichText::new(key).small().weak());
                ui.label(RichText::new(value.to_string()).small());
                ui.end_row();
            }
            ui.label(RichText::new("Images").small().weak());
            ui.label(RichText::new(format!("{} selected", module.images.len())).small())
                .on_hover_text(module.images.join("\n"));
            ui.end_row();
        });
}

// =============================================================================
// Preview
// =============================================================================

fn preview(ui: &mut egui::Ui, modules: &[ReportModule]) {
    ui.label(RichText::new("Preview").small().weak());
    for (i, module) in modules.iter().enumerate() {
        ui.add_space(8.0);
        ui.label(RichText::new(format!("{}. {}", i + 1, module.title)).strong());
        ui.label(RichText::new(&module.description).weak());
        let colour = theme::series_colour(i);
        let plot = Plot::new(("report_chart", module.id.as_str()))
            .height(theme::CHART_HEIGHT * 0.6)
            .allow_scroll(false)
            .allow_drag(false)
            .allow_zoom(false);
        match &module.data {
            Some(ReportData::Bars(values)) => {
                let labels: Vec<String> = values.iter().map(|(l, _)| l.clone()).collect();
                let bars = values
                    .iter()
                    .enumerate()
                    .map(|(x, (label, count))| {
                        Bar::new(x as f64, f64::from(*count)).name(label).fill(colour)
                    })
                    .collect();
                plot.x_axis_formatter(move |mark, _range| {
                    let idx = mark.value.round();
                    if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                        return String::new();
                    }
                    labels.get(idx as usize).cloned().unwrap_or_default()
                })
                .show(ui, |p| p.bar_chart(BarChart::new(bars).width(0.8)));
            }
            Some(ReportData::Scatter(points)) => {
                let pts: PlotPoints = points.iter().map(|(x, y)| [*x, *y]).collect();
                plot.show(ui, |p| p.points(Points::new(pts).radius(3.0).color(colour)));
            }
            Some(ReportData::Series(values)) => {
                let labels: Vec<String> = values.iter().map(|(l, _)| l.clone()).collect();
                let line: PlotPoints = values
                    .iter()
                    .enumerate()
                    .map(|(x, (_, y))| [x as f64, *y])
                    .collect();
                plot.x_axis_formatter(move |mark, _range| {
                    let idx = mark.value.round();
                    if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                        return String::new();
                    }
                    labels.get(idx as usize).cloned().unwrap_or_default()
                })
                .show(ui, |p| p.line(Line::new(line).color(colour).width(2.0)));
            }
            None => {
                ui.label(RichText::new("No preview data for this module.").italics().weak());
            }
        }
        ui.separator();
    }
}

// =============================================================================
// Templates
// =============================================================================

fn save_template(state: &mut AppState) {
    let json = match state.report.save_template() {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Could not serialise report template");
            state.status_message = format!("Template save failed: {e}");
            return;
        }
    };
    let Some(path) = rfd::FileDialog::new()
        .add_filter("Report template", &["json"])
        .set_file_name("report_template.json")
        .save_file()
    else {
        return;
    };
    match std::fs::write(&path, json) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "Report template saved");
            state.status_message = format!("Template saved to {}", path.display());
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Could not write report template");
            state.status_message = format!("Template save failed: {e}");
        }
    }
}

fn load_template(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("Report template", &["json"])
        .pick_file()
    else {
        return;
    };
    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Could not read report template");
            state.status_message = format!("Template load failed: {e}");
            return;
        }
    };
    state.status_message = match state.report.load_template(&json) {
        Ok(n) => format!("Loaded {n} modules from {}", path.display()),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Report template rejected");
            format!("Template load failed: {e}")
        }
    };
}
