// UniAIMS - ui/panels/analysis.rs
//
// Analysis views for one task: attribute histogram / violin, correlation
// scatter, image comparison and task comparison. Charts are drawn with
// egui_plot from the mock generators in core::analysis; each view can push
// its current chart into the session report.

use crate::app::state::AppState;
use crate::app::views::{AttributeState, ComparisonState, CorrelationState, TaskComparisonState};
use crate::core::analysis::{
    log_transform, mock_histogram, mock_scatter, regression_line, violin_profile, ChartKind,
    ImageSelection, ViolinProfile, YAxisMode, COMPARISON_ATTRIBUTES, PARTICLE_ATTRIBUTES,
};
use crate::core::model::{AnalysisImage, ComparisonTask};
use crate::core::report::ReportModule;
use crate::core::route::AnalysisView;
use crate::ui::{theme, widgets};
use egui::RichText;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points, Polygon};

const SCATTER_POINTS: usize = 60;

/// Render the analysis view for `view` (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState, view: AnalysisView) {
    let task_id = state.route().task_id().unwrap_or_default().to_string();
    let comparison_tasks = state.repo().task_comparison_tasks();

    ui.horizontal(|ui| {
        ui.heading("Analysis");
        ui.label(RichText::new(&task_id).monospace().weak());
    });

    let mut next_view = None;
    ui.horizontal(|ui| {
        for v in AnalysisView::all() {
            if ui.selectable_label(*v == view, v.label()).clicked() && *v != view {
                next_view = Some(*v);
            }
        }
    });
    ui.separator();
    if let Some(v) = next_view {
        state.navigate(&format!("/{task_id}/analysis/{}", v.segment()));
        return;
    }

    let active_images = state
        .analysis
        .as_ref()
        .map(|a| a.task_comparison.active_task.clone())
        .map(|id| state.repo().images_for_task(&id))
        .unwrap_or_default();

    let Some(analysis) = state.analysis.as_mut() else {
        widgets::empty_state(ui, "No analysis is loaded for this route.");
        return;
    };

    let module = egui::ScrollArea::vertical()
        .id_salt("analysis_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| match view {
            AnalysisView::Attribute => attribute_view(ui, &mut analysis.attribute),
            AnalysisView::Correlation => correlation_view(ui, &mut analysis.correlation),
            AnalysisView::Comparison => comparison_view(ui, &mut analysis.comparison),
            AnalysisView::TaskComparison => task_comparison_view(
                ui,
                &mut analysis.task_comparison,
                &comparison_tasks,
                &active_images,
            ),
        })
        .inner;

    if let Some(module) = module {
        let title = module.title.clone();
        state.report.add(module);
        state.status_message = format!("Added \u{201c}{title}\u{201d} to the report.");
    }
}

/// The shared "Add to Report" button.
fn add_to_report(ui: &mut egui::Ui) -> bool {
    ui.add(
        egui::Button::new(RichText::new("\u{2795} Add to Report").color(egui::Color32::WHITE))
            .fill(theme::ACCENT),
    )
    .clicked()
}

fn attribute_combo(ui: &mut egui::Ui, id: &str, label: &str, value: &mut String, options: &[&str]) {
    ui.horizontal(|ui| {
        ui.label(label);
        egui::ComboBox::from_id_salt(id)
            .selected_text(value.as_str())
            .show_ui(ui, |ui| {
                for option in options {
                    ui.selectable_value(value, option.to_string(), *option);
                }
            });
    });
}

fn image_picker(ui: &mut egui::Ui, selection: &mut ImageSelection) {
    ui.horizontal(|ui| {
        ui.strong("Images");
        let label = if selection.is_all_selected() { "Clear" } else { "Select All" };
        if ui.small_button(label).clicked() {
            selection.toggle_all();
        }
    });
    let ids: Vec<String> = selection.available().to_vec();
    for id in &ids {
        let mut checked = selection.is_selected(id);
        if ui.checkbox(&mut checked, id.as_str()).changed() {
            selection.toggle(id);
        }
    }
}

fn owned(ids: Vec<&str>) -> Vec<String> {
    ids.into_iter().map(str::to_string).collect()
}

// =============================================================================
// Attribute
// =============================================================================

fn attribute_view(ui: &mut egui::Ui, st: &mut AttributeState) -> Option<ReportModule> {
    let mut module = None;
    ui.columns(2, |cols| {
        let (left, right) = cols.split_at_mut(1);
        let controls = &mut left[0];
        let chart = &mut right[0];

        attribute_combo(controls, "attr_attribute", "Attribute", &mut st.attribute, PARTICLE_ATTRIBUTES);
        controls.add_space(6.0);
        image_picker(controls, &mut st.images);
        controls.add_space(6.0);

        controls.strong("Chart");
        controls.horizontal(|ui| {
            ui.radio_value(&mut st.chart, ChartKind::Histogram, "Histogram");
            ui.radio_value(&mut st.chart, ChartKind::Violin, "Violin");
        });
        controls.horizontal(|ui| {
            ui.label("Y-Axis");
            ui.radio_value(&mut st.y_axis, YAxisMode::Count, "Count");
            ui.radio_value(&mut st.y_axis, YAxisMode::Percentage, "Percentage");
        });
        controls.strong("Bins");
        egui::Grid::new("attr_bins").num_columns(2).show(controls, |ui| {
            ui.label("Start");
            ui.add(egui::DragValue::new(&mut st.bins.start).speed(0.5));
            ui.end_row();
            ui.label("End");
            ui.add(egui::DragValue::new(&mut st.bins.end).speed(0.5));
            ui.end_row();
            ui.label("Bin size");
            ui.add(egui::DragValue::new(&mut st.bins.bin_size).speed(0.1).range(0.1..=100.0));
            ui.end_row();
        });
        controls.label(RichText::new(format!("{} bins", st.bins.bin_count())).small().weak());

        let selected = st.images.selected();
        if selected.is_empty() {
            widgets::empty_state(chart, "Select at least one image to plot.");
            return;
        }

        let bins = mock_histogram(st.images.seed(&st.attribute));
        match st.chart {
            ChartKind::Histogram => {
                let labels: Vec<String> = bins.iter().map(|b| b.range.clone()).collect();
                let bars: Vec<Bar> = bins
                    .iter()
                    .enumerate()
                    .map(|(i, b)| Bar::new(i as f64, b.value(st.y_axis)).width(0.8).name(&b.range))
                    .collect();
                Plot::new("attribute_histogram")
                    .height(theme::CHART_HEIGHT)
                    .legend(Legend::default())
                    .allow_scroll(false)
                    .x_axis_formatter(move |mark, _range| {
                        let i = mark.value.round();
                        if (mark.value - i).abs() < 1e-6 && i >= 0.0 {
                            labels.get(i as usize).cloned().unwrap_or_default()
                        } else {
                            String::new()
                        }
                    })
                    .show(chart, |plot| {
                        plot.bar_chart(BarChart::new(bars).color(theme::series_colour(0)).name(&st.attribute));
                        if st.y_axis == YAxisMode::Percentage {
                            let cumulative: PlotPoints = bins
                                .iter()
                                .enumerate()
                                .map(|(i, b)| [i as f64, b.cumulative])
                                .collect();
                            plot.line(Line::new(cumulative).color(theme::series_colour(2)).name("Cumulative %"));
                        }
                    });
            }
            ChartKind::Violin => {
                let profiles: Vec<ViolinProfile> =
                    selected.iter().map(|id| violin_profile(&format!("{}:{id}", st.attribute))).collect();
                violin_plot(chart, "attribute_violin", &profiles, false);
            }
        }

        chart.add_space(8.0);
        if add_to_report(chart) {
            module = Some(ReportModule::attribute(
                &st.attribute,
                owned(st.images.selected()),
                &st.bins,
                st.y_axis,
                &bins,
            ));
        }
    });
    module
}

// =============================================================================
// Correlation
// =============================================================================

fn correlation_view(ui: &mut egui::Ui, st: &mut CorrelationState) -> Option<ReportModule> {
    let mut module = None;
    ui.columns(2, |cols| {
        let (left, right) = cols.split_at_mut(1);
        let controls = &mut left[0];
        let chart = &mut right[0];

        attribute_combo(controls, "corr_x", "X-Axis", &mut st.x_attribute, PARTICLE_ATTRIBUTES);
        attribute_combo(controls, "corr_y", "Y-Axis", &mut st.y_attribute, PARTICLE_ATTRIBUTES);
        controls.checkbox(&mut st.show_regression, "Show regression line");
        controls.checkbox(&mut st.log_x, "Log scale X");
        controls.checkbox(&mut st.log_y, "Log scale Y");
        controls.add_space(6.0);
        image_picker(controls, &mut st.images);

        if st.images.selected().is_empty() {
            widgets::empty_state(chart, "Select at least one image to plot.");
            return;
        }

        let seed = st.images.seed(&format!("{}|{}", st.x_attribute, st.y_attribute));
        let raw = mock_scatter(SCATTER_POINTS, seed);
        let points: Vec<(f64, f64)> = raw
            .iter()
            .filter_map(|p| log_transform(*p, st.log_x, st.log_y))
            .collect();
        let line = if st.show_regression {
            regression_line(&points)
        } else {
            Vec::new()
        };

        let x_name = st.x_attribute.clone();
        let y_name = st.y_attribute.clone();
        Plot::new("correlation_scatter")
            .height(theme::CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label(x_name)
            .y_axis_label(y_name)
            .show(chart, |plot| {
                let pts: PlotPoints = points.iter().map(|(x, y)| [*x, *y]).collect();
                plot.points(Points::new(pts).radius(3.0).color(theme::series_colour(0)).name("Particles"));
                if !line.is_empty() {
                    let fit: PlotPoints = line.iter().map(|(x, y)| [*x, *y]).collect();
                    plot.line(Line::new(fit).color(theme::series_colour(3)).width(2.0).name("Regression"));
                }
            });

        chart.add_space(8.0);
        if add_to_report(chart) {
            module = Some(ReportModule::correlation(
                &st.x_attribute,
                &st.y_attribute,
                owned(st.images.selected()),
                st.show_regression,
                st.log_x,
                st.log_y,
                points.clone(),
            ));
        }
    });
    module
}

// =============================================================================
// Image comparison
// =============================================================================

fn comparison_view(ui: &mut egui::Ui, st: &mut ComparisonState) -> Option<ReportModule> {
    let mut module = None;
    ui.columns(2, |cols| {
        let (left, right) = cols.split_at_mut(1);
        let controls = &mut left[0];
        let chart = &mut right[0];

        attribute_combo(controls, "cmp_attr", "Attribute", &mut st.attribute, COMPARISON_ATTRIBUTES);
        controls.checkbox(&mut st.log_scale, "Log scale");
        controls.add_space(6.0);
        image_picker(controls, &mut st.images);

        let profiles: Vec<ViolinProfile> = st
            .images
            .selected()
            .iter()
            .map(|id| violin_profile(&format!("{}:{id}", st.attribute)))
            .collect();
        if profiles.is_empty() {
            widgets::empty_state(chart, "Select images to compare.");
            return;
        }
        violin_plot(chart, "image_comparison", &profiles, st.log_scale);

        chart.add_space(8.0);
        if add_to_report(chart) {
            module = Some(ReportModule::comparison(&st.attribute, st.log_scale, &profiles));
        }
    });
    module
}

// =============================================================================
// Task comparison
// =============================================================================

fn task_comparison_view(
    ui: &mut egui::Ui,
    st: &mut TaskComparisonState,
    all_tasks: &[ComparisonTask],
    active_images: &[AnalysisImage],
) -> Option<ReportModule> {
    let mut module = None;

    // ---- Task chips ----
    let mut remove = None;
    ui.horizontal_wrapped(|ui| {
        for (i, task) in st.tasks.iter().enumerate() {
            let colour = theme::series_colour(i);
            let active = st.active_task == task.id;
            let text = RichText::new(&task.name).color(colour);
            let text = if task.is_current { text.strong() } else { text };
            if ui
                .selectable_label(active, text)
                .on_hover_text(&task.id)
                .clicked()
            {
                st.active_task = task.id.clone();
            }
            if !task.is_current && ui.small_button("\u{2716}").on_hover_text("Remove").clicked() {
                remove = Some(task.id.clone());
            }
        }
        if ui.button("\u{2795} Add Task").clicked() {
            st.dropdown_open = !st.dropdown_open;
        }
    });
    if let Some(id) = remove {
        st.remove_task(&id);
    }

    // ---- Picker ----
    if st.dropdown_open {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.add(
                egui::TextEdit::singleline(&mut st.search)
                    .hint_text("\u{1f50d} Search tasks")
                    .desired_width(240.0),
            );
            let candidates: Vec<ComparisonTask> =
                st.candidates(all_tasks).into_iter().cloned().collect();
            if candidates.is_empty() {
                ui.label(RichText::new("No matching tasks.").weak());
            }
            for task in &candidates {
                if ui
                    .selectable_label(false, format!("{}  {} ({} items, {})", task.id, task.name, task.count, task.date))
                    .clicked()
                {
                    st.add_task(task);
                }
            }
        });
    }
    ui.add_space(6.0);

    ui.horizontal(|ui| {
        attribute_combo(ui, "tc_attr", "Attribute", &mut st.attribute, COMPARISON_ATTRIBUTES);
        ui.checkbox(&mut st.log_scale, "Log scale");
    });

    let profiles: Vec<ViolinProfile> = st
        .tasks
        .iter()
        .map(|t| {
            let mut p = violin_profile(&format!("{}:{}", st.attribute, t.id));
            p.id = t.name.clone();
            p
        })
        .collect();
    if profiles.is_empty() {
        widgets::empty_state(ui, "Add a task to compare.");
    } else {
        violin_plot(ui, "task_comparison", &profiles, st.log_scale);
    }

    // ---- Image strip for the highlighted task ----
    if !st.active_task.is_empty() {
        ui.add_space(6.0);
        ui.strong(format!("Images of {}", st.active_task));
        let active = st.active_task.clone();
        ui.horizontal_wrapped(|ui| {
            for img in active_images {
                let mut checked = st.is_image_selected(&active, &img.id);
                if ui.checkbox(&mut checked, img.id.as_str()).changed() {
                    st.toggle_image(&active, &img.id);
                }
            }
        });
    }

    ui.add_space(8.0);
    if !profiles.is_empty() && add_to_report(ui) {
        module = Some(ReportModule::comparison(&st.attribute, st.log_scale, &profiles));
    }
    module
}

// =============================================================================
// Violin plot
// =============================================================================

/// One violin per profile at x = 0, 1, 2, ... with a point at the mean.
fn violin_plot(ui: &mut egui::Ui, id: &str, profiles: &[ViolinProfile], log_scale: bool) {
    let y = |v: f64| {
        if log_scale {
            log_transform((0.0, v.max(1e-3)), false, true).map_or(0.0, |p| p.1)
        } else {
            v
        }
    };
    let names: Vec<String> = profiles.iter().map(|p| p.id.clone()).collect();

    Plot::new(id)
        .height(theme::CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() < 1e-6 && i >= 0.0 {
                names.get(i as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .show(ui, |plot| {
            for (i, profile) in profiles.iter().enumerate() {
                let x0 = i as f64;
                let steps = profile.density.len().max(2);
                let at = |k: usize| profile.min + (profile.max - profile.min) * k as f64 / (steps - 1) as f64;
                let mut outline: Vec<[f64; 2]> = profile
                    .density
                    .iter()
                    .enumerate()
                    .map(|(k, d)| [x0 + d * 0.4, y(at(k))])
                    .collect();
                outline.extend(
                    profile
                        .density
                        .iter()
                        .enumerate()
                        .rev()
                        .map(|(k, d)| [x0 - d * 0.4, y(at(k))]),
                );
                let colour = theme::series_colour(i);
                plot.polygon(
                    Polygon::new(PlotPoints::from(outline))
                        .fill_color(colour.gamma_multiply(0.35))
                        .stroke(egui::Stroke::new(1.5, colour))
                        .name(&profile.id),
                );
                plot.points(
                    Points::new(PlotPoints::from(vec![[x0, y(profile.mean)]]))
                        .radius(4.0)
                        .color(colour),
                );
            }
        });
}
