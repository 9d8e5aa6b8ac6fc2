// UniAIMS - gui.rs
//
// Top-level eframe::App implementation.
// Owns the menu bar, status bar and context sidebar, and dispatches the
// central area on the current route.

use crate::app::state::AppState;
use crate::app::views::DashboardTab;
use crate::core::export::{default_file_name, ExportFormat};
use crate::core::route::{Route, RouteGroup};
use crate::ui;
use crate::util::constants::ROUTE_TRANSITION_SECS;

/// The UniAIMS application.
pub struct UniAimsApp {
    pub state: AppState,
    /// Theme settings last pushed into the egui context.
    applied_theme: Option<(bool, f32)>,
    /// Group of the route shown last frame.
    last_group: RouteGroup,
    /// When the current group transition started (egui time, seconds).
    transition_start: Option<f64>,
}

impl UniAimsApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        let last_group = state.route().group();
        Self {
            state,
            applied_theme: None,
            last_group,
            transition_start: None,
        }
    }

    fn sync_theme(&mut self, ctx: &egui::Context) {
        let wanted = (self.state.dark_mode, self.state.font_size);
        if self.applied_theme != Some(wanted) {
            ui::theme::apply(ctx, wanted.0, wanted.1);
            self.applied_theme = Some(wanted);
        }
    }

    /// Progress of the route-group transition in `0..=1`.
    fn transition_progress(&mut self, ctx: &egui::Context) -> f32 {
        let now = ctx.input(|i| i.time);
        let group = self.state.route().group();
        if group != self.last_group {
            tracing::debug!(from = ?self.last_group, to = ?group, "Route group transition");
            self.last_group = group;
            self.transition_start = Some(now);
        }
        let Some(start) = self.transition_start else {
            return 1.0;
        };
        let t = ((now - start) as f32 / ROUTE_TRANSITION_SECS).clamp(0.0, 1.0);
        if t >= 1.0 {
            self.transition_start = None;
        } else {
            ctx.request_repaint();
        }
        // Ease-out cubic.
        1.0 - (1.0 - t).powi(3)
    }

    fn export_menu(&mut self, ui: &mut egui::Ui) {
        let tab = match self.state.route() {
            Route::Dashboard => self.state.dashboard.tab,
            _ => DashboardTab::Analysis,
        };
        let has_tasks = matches!(tab, DashboardTab::Analysis | DashboardTab::Training)
            && !self.state.filtered_tasks(tab).is_empty();
        ui.add_enabled_ui(has_tasks, |ui| {
            ui.menu_button("Export", |ui| {
                for format in [ExportFormat::Csv, ExportFormat::Json] {
                    if ui.button(format!("Export {}\u{2026}", format.label())).clicked() {
                        let name = default_file_name(
                            chrono::Local::now().naive_local(),
                            format.extension(),
                        );
                        if let Some(dest) = rfd::FileDialog::new()
                            .add_filter(format.label(), &[format.extension()])
                            .set_file_name(name)
                            .save_file()
                        {
                            // Errors are reported through the status bar.
                            let _ = self.state.export_tasks(tab, &dest, format);
                        }
                        ui.close_menu();
                    }
                }
            });
        });
    }
}

impl eframe::App for UniAimsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_theme(ctx);

        // Alt+Left goes back, as in a browser.
        if ctx.input(|i| i.modifiers.alt && i.key_pressed(egui::Key::ArrowLeft)) {
            self.state.back();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New Analysis\u{2026}").clicked() {
                        self.state.navigate("/upload");
                        ui.close_menu();
                    }
                    if ui.button("New Data Batch\u{2026}").clicked() {
                        self.state.navigate("/data/new");
                        ui.close_menu();
                    }
                    ui.separator();
                    self.export_menu(ui);
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.checkbox(&mut self.state.dark_mode, "Dark Mode").changed() {
                        tracing::debug!(dark_mode = self.state.dark_mode, "Theme toggled");
                    }
                    ui.horizontal(|ui| {
                        ui.label("Font size");
                        ui.add(
                            egui::Slider::new(
                                &mut self.state.font_size,
                                crate::util::constants::MIN_FONT_SIZE
                                    ..=crate::util::constants::MAX_FONT_SIZE,
                            )
                            .step_by(0.5),
                        );
                    });
                    ui.separator();
                    if ui
                        .add_enabled(
                            self.state.route().has_sidebar(),
                            egui::Button::new(if self.state.nav.collapsed() {
                                "Expand Sidebar"
                            } else {
                                "Collapse Sidebar"
                            }),
                        )
                        .clicked()
                    {
                        self.state.nav.toggle_collapsed();
                        ui.close_menu();
                    }
                    let label = format!("Warnings ({})", self.state.warnings.len());
                    if ui.button(label).clicked() {
                        self.state.show_warnings = true;
                        ui.close_menu();
                    }
                });
                ui.menu_button("Navigate", |ui| {
                    if ui
                        .add_enabled(self.state.can_go_back(), egui::Button::new("\u{2190} Back"))
                        .clicked()
                    {
                        self.state.back();
                        ui.close_menu();
                    }
                    ui.separator();
                    for (label, target) in [
                        ("Dashboard", "/dashboard"),
                        ("Data Batches", "/dashboard?tab=data"),
                        ("Fine-tuning", "/finetune?tab=settings"),
                        ("Documentation", "/docs"),
                    ] {
                        if ui.button(label).clicked() {
                            self.state.navigate(target);
                            ui.close_menu();
                        }
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("Documentation").clicked() {
                        self.state.navigate("/docs");
                        ui.close_menu();
                    }
                    if ui.button("About UniAIMS").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    if !self.state.warnings.is_empty()
                        && ui
                            .small_button(
                                egui::RichText::new(format!("\u{26a0} {}", self.state.warnings.len()))
                                    .color(ui::theme::WARNING_TEXT),
                            )
                            .on_hover_text("Show warnings")
                            .clicked()
                    {
                        self.state.show_warnings = true;
                    }
                    ui.label(&self.state.status_message);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if let Some(mode) = self.state.mode() {
                            ui.label(
                                egui::RichText::new(mode.label())
                                    .color(ui::theme::mode_colour(mode)),
                            );
                            ui.separator();
                        }
                        ui.label(egui::RichText::new(self.state.location.href()).monospace().weak());
                        if self.state.debug_mode {
                            ui.separator();
                            ui.label(egui::RichText::new("DEBUG").small().weak());
                        }
                    });
                });
            });

        // Context sidebar (task, data batch and fine-tuning routes)
        if self.state.route().has_sidebar() {
            let width = ui::panels::sidebar::width(&self.state);
            egui::SidePanel::left("sidebar")
                .exact_width(width)
                .resizable(false)
                .show(ctx, |ui| ui::panels::sidebar::render(ui, &mut self.state));
        }

        // Central area; a group change fades the new screen in from below.
        let progress = self.transition_progress(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            if progress < 1.0 {
                ui.multiply_opacity(progress);
                ui.add_space((1.0 - progress) * 32.0);
            }
            central(ui, &mut self.state);
        });

        // Dialogs
        ui::panels::export_modal::render(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state);
        ui::panels::warnings::render(ctx, &mut self.state);
    }
}

/// Dispatch the central area on the current route.
fn central(ui: &mut egui::Ui, state: &mut AppState) {
    match state.route().clone() {
        Route::Dashboard | Route::Root => ui::panels::dashboard::render(ui, state),
        Route::Upload => ui::panels::upload::render(ui, state),
        Route::NewBatch => ui::panels::data_batch::render_new(ui, state),
        Route::Batch { tab, .. } => ui::panels::data_batch::render_batch(ui, state, tab),
        Route::Docs => ui::panels::docs::render(ui, state),
        Route::Finetune => ui::panels::finetune::render(ui, state),
        Route::Particles { .. } | Route::Fibers { .. } => {
            ui::panels::workstation::render(ui, state);
        }
        Route::Analysis { view, .. } => ui::panels::analysis::render(ui, state, view),
        Route::Reports { .. } => ui::panels::reports::render(ui, state),
        // Index routes are resolved when parsed; follow the redirect if one
        // is ever shown directly.
        Route::BatchIndex { .. } | Route::AnalysisIndex { .. } => {
            let target = state.route().clone().resolve().path();
            state.navigate(&target);
        }
        Route::NotFound(path) => not_found(ui, state, &path),
    }
}

fn not_found(ui: &mut egui::Ui, state: &mut AppState, path: &str) {
    ui.add_space(60.0);
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new("404").size(48.0).strong().weak());
        ui.heading("Page not found");
        ui.label(egui::RichText::new(path).monospace().weak());
        ui.add_space(12.0);
        if ui.button("Back to Dashboard").clicked() {
            state.navigate("/dashboard");
        }
    });
}
