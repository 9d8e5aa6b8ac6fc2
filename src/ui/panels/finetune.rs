// UniAIMS - ui/panels/finetune.rs
//
// Fine-tuning screen. The tab comes from the `tab` query parameter and is
// switched from the sidebar: configuration, training monitor, data manager
// and the annotation placeholder.

use crate::app::state::AppState;
use crate::app::views::FinetuneTab;
use crate::core::analysis::{seed_for, training_curve};
use crate::ui::{theme, widgets};
use egui::RichText;
use egui_plot::{Legend, Line, Plot, PlotPoints};

const SOURCE_TASKS: &[(&str, &str)] = &[
    ("T-1024", "T-1024: N95 Filter Analysis (15 labeled)"),
    ("T-1025", "T-1025: Carbon Nano Batch A (42 labeled)"),
    ("T-1029", "T-1029: Graphene Oxide (120 labeled)"),
];

const BASE_MODELS: &[(&str, &str)] = &[
    ("v1.1", "UniAIMS ResNet-50 v1.1 (Standard)"),
    ("v1.2", "UniAIMS ViT-B v1.2 (Beta)"),
    ("v0.9", "Legacy v0.9 (Stability)"),
];

const TOTAL_EPOCHS: u32 = 20;
const CURRENT_EPOCH: u32 = 14;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    match state.finetune_tab() {
        FinetuneTab::Settings => settings(ui, state),
        FinetuneTab::Training => training(ui, state),
        FinetuneTab::Data => data(ui, state),
        FinetuneTab::Annotation => annotation(ui, state),
    }
}

fn label_for<'a>(options: &'a [(&str, &'a str)], id: &str) -> Option<&'a str> {
    options.iter().find(|(k, _)| *k == id).map(|(_, v)| *v)
}

fn settings(ui: &mut egui::Ui, state: &mut AppState) {
    widgets::page_header(
        ui,
        "Training Configuration",
        "Setup parameters for a new fine-tuning session.",
    );

    let mut start = false;
    let ft = &mut state.finetune;
    egui::Grid::new("finetune_config")
        .num_columns(2)
        .spacing([16.0, 10.0])
        .show(ui, |ui| {
            ui.label("Job Name");
            ui.add(egui::TextEdit::singleline(&mut ft.job_name).desired_width(320.0));
            ui.end_row();

            ui.label("Source Task (Training Data)");
            let shown = label_for(SOURCE_TASKS, &ft.source_task)
                .unwrap_or("Select a completed task...")
                .to_string();
            egui::ComboBox::from_id_salt("finetune_source")
                .selected_text(shown)
                .width(320.0)
                .show_ui(ui, |ui| {
                    for (id, label) in SOURCE_TASKS {
                        ui.selectable_value(&mut ft.source_task, id.to_string(), *label);
                    }
                });
            ui.end_row();

            ui.label("Base Model Architecture");
            let shown = label_for(BASE_MODELS, &ft.base_model)
                .unwrap_or(ft.base_model.as_str())
                .to_string();
            egui::ComboBox::from_id_salt("finetune_model")
                .selected_text(shown)
                .width(320.0)
                .show_ui(ui, |ui| {
                    for (id, label) in BASE_MODELS {
                        ui.selectable_value(&mut ft.base_model, id.to_string(), *label);
                    }
                });
            ui.end_row();
        });

    ui.add_space(10.0);
    let ready = !ft.source_task.is_empty() && !ft.job_name.trim().is_empty();
    if ui
        .add_enabled(
            ready,
            egui::Button::new(RichText::new("\u{25b6} Start Training").color(egui::Color32::WHITE))
                .fill(theme::ACCENT),
        )
        .on_disabled_hover_text("Choose a source task first")
        .clicked()
    {
        tracing::info!(
            job = %ft.job_name,
            source_task = %ft.source_task,
            base_model = %ft.base_model,
            "Fine-tuning job submitted"
        );
        start = true;
    }
    ui.label(
        RichText::new("Tip: only completed tasks with labeled items can be used as training data.")
            .small()
            .weak(),
    );

    if start {
        state.status_message = "Fine-tuning job queued.".to_string();
        state.set_query("tab", "training");
    }
}

fn training(ui: &mut egui::Ui, state: &mut AppState) {
    widgets::page_header(ui, "Training Dashboard", "Real-time monitoring of model convergence.");

    let curve = training_curve(TOTAL_EPOCHS, seed_for(state.finetune.job_name.as_str()));
    let done: Vec<_> = curve.iter().take(CURRENT_EPOCH as usize).collect();

    ui.horizontal(|ui| {
        ui.label(RichText::new(&state.finetune.job_name).strong());
        widgets::badge(ui, "Running \u{2022} 2m 45s remaining", theme::ACCENT);
    });
    ui.add(
        egui::ProgressBar::new(CURRENT_EPOCH as f32 / TOTAL_EPOCHS as f32)
            .text(format!("Current Epoch {CURRENT_EPOCH} / {TOTAL_EPOCHS}")),
    );
    if let Some(last) = done.last() {
        ui.horizontal(|ui| {
            ui.label(format!("Training Loss {:.3}", last.loss));
            ui.separator();
            ui.label(format!("Validation Accuracy {:.1}%", last.accuracy * 100.0));
        });
    }
    ui.add_space(8.0);

    ui.columns(2, |cols| {
        let loss: PlotPoints = done.iter().map(|m| [f64::from(m.epoch), m.loss]).collect();
        Plot::new("training_loss")
            .height(theme::CHART_HEIGHT * 0.75)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Epoch")
            .show(&mut cols[0], |plot| {
                plot.line(Line::new(loss).color(theme::series_colour(3)).name("Training Loss"));
            });

        let accuracy: PlotPoints = done.iter().map(|m| [f64::from(m.epoch), m.accuracy]).collect();
        Plot::new("training_accuracy")
            .height(theme::CHART_HEIGHT * 0.75)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label("Epoch")
            .show(&mut cols[1], |plot| {
                plot.line(
                    Line::new(accuracy)
                        .color(theme::series_colour(1))
                        .name("Validation Accuracy"),
                );
            });
    });
}

fn data(ui: &mut egui::Ui, state: &mut AppState) {
    let datasets = state.repo().datasets();
    let mut open: Option<String> = None;

    ui.columns(2, |cols| {
        let ui = &mut cols[0];
        ui.strong("Data Repository");
        ui.label(RichText::new("Manage existing labeled datasets.").small().weak());
        ui.add_space(6.0);
        if datasets.is_empty() {
            widgets::empty_state(ui, "No datasets yet.");
        }
        for ds in &datasets {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&ds.name).strong());
                    ui.label(RichText::new(&ds.id).monospace().weak());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("\u{270e} Annotate").clicked() {
                            open = Some(ds.id.clone());
                        }
                    });
                });
                ui.label(
                    RichText::new(format!(
                        "{} \u{00b7} {} items \u{00b7} {}",
                        ds.size, ds.items, ds.last_modified
                    ))
                    .small()
                    .weak(),
                );
            });
        }

        let ui = &mut cols[1];
        ui.strong("Current Session");
        ui.label(
            RichText::new("Data from active analysis tasks available for training.")
                .small()
                .weak(),
        );
        ui.add_space(6.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("\u{2b06}").size(28.0).weak());
                ui.label("Drop Dataset Archive");
                ui.label(
                    RichText::new("Supports .zip containing images & XML/JSON")
                        .small()
                        .weak(),
                );
            });
        });
    });

    if let Some(id) = open {
        state.finetune.selected_dataset = Some(id.clone());
        state.navigate(&format!("/finetune?dataset={id}&tab=annotation"));
    }
}

fn annotation(ui: &mut egui::Ui, state: &mut AppState) {
    let dataset = state
        .location
        .query("dataset")
        .map(str::to_string)
        .or_else(|| state.finetune.selected_dataset.clone());

    ui.add_space(40.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new("\u{270e}").size(40.0).weak());
        ui.heading("Annotation Studio");
        if let Some(ds) = &dataset {
            let name = state
                .repo()
                .datasets()
                .into_iter()
                .find(|d| &d.id == ds)
                .map_or_else(|| ds.clone(), |d| d.name);
            ui.label(RichText::new(format!("Dataset: {name}")).strong());
        }
        ui.label(
            RichText::new(
                "This module is correctly linked but requires backend data integration to function.",
            )
            .weak(),
        );
    });
}
