// UniAIMS - ui/panels/workstation.rs
//
// Particle / fiber workstation: the pan-and-zoom canvas with its mock
// overlay, an image stepper, and the collapsible side panel.
//
// Canvas input maps straight onto `ViewTransform`:
//   Ctrl/Cmd + wheel  -> zoom (anchored at the content's top-left corner)
//   drag              -> pointer down / move / up
//   pointer leaves    -> ends the drag
// Everything is painted each frame from the transform; nothing is cached.

use crate::app::state::AppState;
use crate::app::views::{WorkstationPanel, WorkstationState};
use crate::core::canvas::Point;
use crate::core::model::{AnalysisImage, Mode};
use crate::ui::{theme, widgets};
use crate::util::constants::{CANVAS_CONTENT_HEIGHT, CANVAS_CONTENT_WIDTH, CANVAS_GRID_PITCH};
use egui::{pos2, vec2, Color32, RichText, Stroke};

/// Render the workstation for the mounted task (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let task_id = state.route().task_id().unwrap_or_default().to_string();
    let images = state.repo().analysis_images();
    let dark_mode = state.dark_mode;

    let mut open_analysis = false;
    let Some(ws) = state.workstation.as_mut() else {
        widgets::empty_state(ui, "No workstation is mounted for this route.");
        return;
    };

    egui::SidePanel::right("workstation_panel")
        .default_width(theme::WORKSTATION_PANEL_WIDTH)
        .resizable(true)
        .show_inside(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("workstation_panel_scroll")
                .show(ui, |ui| side_panel(ui, ws, &images));
        });

    egui::TopBottomPanel::top("workstation_toolbar").show_inside(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("{} Recognition", ws.mode.label()))
                    .strong()
                    .color(theme::mode_colour(ws.mode)),
            );
            ui.label(RichText::new(&task_id).monospace().weak());
            ui.separator();

            if ui
                .add_enabled(ws.image_index > 0, egui::Button::new("\u{25c0}"))
                .clicked()
            {
                ws.prev_image();
            }
            let name = images
                .get(ws.image_index)
                .map_or("(no images)", |i| i.id.as_str());
            ui.label(format!(
                "Image {} / {}  {name}",
                (ws.image_index + 1).min(images.len()),
                images.len()
            ));
            if ui
                .add_enabled(ws.image_index + 1 < images.len(), egui::Button::new("\u{25b6}"))
                .clicked()
            {
                ws.next_image(images.len());
            }
            ui.separator();

            ui.checkbox(&mut ws.show_overlay, "Overlay");
            if ui.button("Reset View").clicked() {
                ws.transform.reset();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("\u{2590} Analyze").clicked() {
                    open_analysis = true;
                }
                ui.label(RichText::new("Ctrl + scroll to zoom, drag to pan").small().weak());
            });
        });
    });

    egui::CentralPanel::default().show_inside(ui, |ui| {
        canvas(ui, ws, dark_mode);
    });

    if open_analysis {
        state.navigate(&format!("/{task_id}/analysis"));
    }
}

// =============================================================================
// Canvas
// =============================================================================

fn canvas(ui: &mut egui::Ui, ws: &mut WorkstationState, dark_mode: bool) {
    let rect = ui.available_rect_before_wrap();
    let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
    let to_local = |p: egui::Pos2| Point::new(p.x - rect.min.x, p.y - rect.min.y);

    // ---- Zoom ----
    if response.hovered() {
        let (wheel_y, modifier) =
            ui.input(|i| (i.raw_scroll_delta.y, i.modifiers.command || i.modifiers.ctrl));
        // egui reports wheel-up as positive; the transform expects DOM-style
        // deltas where wheel-down is positive.
        if wheel_y != 0.0 && ws.transform.zoom(-wheel_y, modifier) {
            tracing::trace!(scale = ws.transform.scale(), "Canvas zoom");
        }
    }

    // ---- Pan ----
    // egui reports the drag once the pointer passes the click threshold;
    // anchor it at the press so no travel is lost.
    if response.drag_started() {
        let origin = ui
            .input(|i| i.pointer.press_origin())
            .or_else(|| response.interact_pointer_pos());
        if let Some(p) = origin {
            ws.transform.pointer_down(to_local(p));
        }
    }
    if response.dragged() {
        if let Some(p) = response.interact_pointer_pos() {
            ws.transform.pointer_move(to_local(p));
        }
    }
    if response.drag_stopped() {
        ws.transform.pointer_up();
    }
    if ws.transform.is_dragging() && !response.contains_pointer() {
        ws.transform.pointer_leave();
    }

    // ---- Hover ----
    ws.hovered = response
        .hover_pos()
        .filter(|_| ws.show_overlay && !ws.transform.is_dragging())
        .and_then(|p| ws.overlay.hit_test(ws.transform.screen_to_content(to_local(p))));

    // ---- Paint ----
    let painter = ui.painter_at(rect);
    let t = ws.transform;
    let scale = t.scale();
    let to_screen = |p: Point| {
        let s = t.content_to_screen(p);
        pos2(rect.min.x + s.x, rect.min.y + s.y)
    };

    let size = t.content_screen_size();
    let content_rect = egui::Rect::from_min_size(to_screen(Point::ZERO), vec2(size.x, size.y));
    painter.rect_filled(content_rect, 4.0, theme::canvas_background(dark_mode));

    // Decorative dot grid, culled to the visible area.
    let dot = theme::canvas_grid_dot(dark_mode);
    let cols = (CANVAS_CONTENT_WIDTH / CANVAS_GRID_PITCH) as usize;
    let rows = (CANVAS_CONTENT_HEIGHT / CANVAS_GRID_PITCH) as usize;
    for row in 0..=rows {
        for col in 0..=cols {
            let p = to_screen(Point::new(
                col as f32 * CANVAS_GRID_PITCH,
                row as f32 * CANVAS_GRID_PITCH,
            ));
            if rect.contains(p) {
                painter.circle_filled(p, (scale * 0.8).max(0.5), dot);
            }
        }
    }

    if ws.show_overlay {
        match ws.mode {
            Mode::Particle => {
                for mark in &ws.overlay.particles {
                    let hovered = ws.hovered == Some(mark.id);
                    let colour = if hovered { theme::OVERLAY_HOVER } else { theme::OVERLAY_STROKE };
                    let c = to_screen(mark.center());
                    painter.circle(
                        c,
                        mark.radius * scale,
                        theme::OVERLAY_FILL,
                        Stroke::new(if hovered { 2.5 } else { 1.5 }, colour),
                    );
                }
            }
            Mode::Fiber => {
                for fiber in &ws.overlay.fibers {
                    let points: Vec<egui::Pos2> = fiber.points.iter().map(|p| to_screen(*p)).collect();
                    painter.add(egui::Shape::line(
                        points,
                        Stroke::new(fiber.width * scale, theme::OVERLAY_STROKE),
                    ));
                }
            }
        }
    }

    // Scale badge, pinned to the viewport corner.
    let badge_pos = rect.min + vec2(10.0, 10.0);
    let galley = painter.layout_no_wrap(
        format!("Scale: {}%", t.scale_percent()),
        egui::FontId::monospace(12.0),
        Color32::WHITE,
    );
    let badge_rect = egui::Rect::from_min_size(badge_pos, galley.size() + vec2(12.0, 6.0));
    painter.rect_filled(badge_rect, 4.0, Color32::from_black_alpha(160));
    painter.galley(badge_pos + vec2(6.0, 3.0), galley, Color32::WHITE);

    if let Some(id) = ws.hovered {
        if let Some(mark) = ws.overlay.particles.iter().find(|m| m.id == id) {
            let diameter_um = mark.radius * 2.0 * ws.scale_bar_um_per_px;
            response.on_hover_text(format!("Particle #{}  \u{2300} {diameter_um:.2} \u{00b5}m", mark.id + 1));
        }
    }
}

// =============================================================================
// Side panel
// =============================================================================

fn side_panel(ui: &mut egui::Ui, ws: &mut WorkstationState, images: &[AnalysisImage]) {
    for panel in WorkstationPanel::all() {
        let open = ws.active_panel == Some(*panel);
        let arrow = if open { "\u{25be}" } else { "\u{25b8}" };
        if ui
            .add_sized(
                [ui.available_width(), theme::ROW_HEIGHT + 4.0],
                egui::SelectableLabel::new(open, RichText::new(format!("{arrow} {}", panel.title())).strong()),
            )
            .clicked()
        {
            ws.toggle_panel(*panel);
        }
        if ws.active_panel == Some(*panel) {
            ui.indent(panel.title(), |ui| match panel {
                WorkstationPanel::Images => images_section(ui, ws, images),
                WorkstationPanel::Stats => stats_section(ui, ws, images),
                WorkstationPanel::ScaleBar => {
                    ui.horizontal(|ui| {
                        ui.label("\u{00b5}m per pixel");
                        ui.add(
                            egui::DragValue::new(&mut ws.scale_bar_um_per_px)
                                .speed(0.005)
                                .range(0.001..=10.0),
                        );
                    });
                    let bar_px = 100.0;
                    ui.label(
                        RichText::new(format!(
                            "{bar_px:.0} px = {:.2} \u{00b5}m",
                            bar_px * ws.scale_bar_um_per_px
                        ))
                        .small()
                        .weak(),
                    );
                }
                WorkstationPanel::Filters => {
                    ui.label("Sensitivity");
                    ui.add(egui::Slider::new(&mut ws.sensitivity, 0.0..=1.0));
                    ui.label("Min. diameter (\u{00b5}m)");
                    ui.add(
                        egui::DragValue::new(&mut ws.min_diameter_um)
                            .speed(0.1)
                            .range(0.0..=100.0),
                    );
                }
            });
        }
        ui.add_space(2.0);
    }
}

fn images_section(ui: &mut egui::Ui, ws: &mut WorkstationState, images: &[AnalysisImage]) {
    if images.is_empty() {
        ui.label(RichText::new("No images in this task.").weak());
        return;
    }
    for (i, img) in images.iter().enumerate() {
        ui.horizontal(|ui| {
            if ui.selectable_label(ws.image_index == i, &img.id).clicked() {
                ws.image_index = i;
            }
            widgets::badge(ui, img.status.label(), theme::image_status_colour(img.status));
        });
    }
}

fn stats_section(ui: &mut egui::Ui, ws: &WorkstationState, images: &[AnalysisImage]) {
    let current = images.get(ws.image_index).map_or(0, |i| i.count);
    egui::Grid::new("ws_stats").num_columns(2).show(ui, |ui| {
        ui.label("Current Image Count");
        ui.strong(current.to_string());
        ui.end_row();

        match ws.mode {
            Mode::Particle => {
                let marks = &ws.overlay.particles;
                let min_radius_px = ws.min_diameter_um / ws.scale_bar_um_per_px.max(f32::EPSILON) / 2.0;
                let shown = marks.iter().filter(|m| m.radius >= min_radius_px).count();
                ui.label("Overlay particles");
                ui.label(format!("{shown} / {}", marks.len()));
                ui.end_row();

                if !marks.is_empty() {
                    let mean_d = marks.iter().map(|m| m.radius * 2.0).sum::<f32>() / marks.len() as f32
                        * ws.scale_bar_um_per_px;
                    ui.label("Mean diameter");
                    ui.label(format!("{mean_d:.2} \u{00b5}m"));
                    ui.end_row();
                }
            }
            Mode::Fiber => {
                ui.label("Overlay fibers");
                ui.label(ws.overlay.fibers.len().to_string());
                ui.end_row();
            }
        }

        ui.label("Sensitivity");
        ui.label(format!("{:.0}%", ws.sensitivity * 100.0));
        ui.end_row();
    });
}
