// UniAIMS - ui/theme.rs
//
// Colour scheme, status/mode colour mapping, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::{BatchStatus, ImageStatus, Mode, TaskStatus, TaskType};
use egui::Color32;

/// Accent used for primary buttons, active menu items and the canvas badge.
pub const ACCENT: Color32 = Color32::from_rgb(37, 99, 235); // Blue 600

/// Colour for a task status badge.
pub fn status_colour(status: TaskStatus) -> Color32 {
    match status {
        TaskStatus::Completed => Color32::from_rgb(22, 163, 74),  // Green 600
        TaskStatus::Processing => Color32::from_rgb(37, 99, 235), // Blue 600
        TaskStatus::Failed => Color32::from_rgb(220, 38, 38),     // Red 600
    }
}

pub fn batch_status_colour(status: BatchStatus) -> Color32 {
    match status {
        BatchStatus::Ready => Color32::from_rgb(22, 163, 74),       // Green 600
        BatchStatus::Processing => Color32::from_rgb(217, 119, 6),  // Amber 600
        BatchStatus::Archived => Color32::from_rgb(107, 114, 128),  // Gray 500
    }
}

pub fn image_status_colour(status: ImageStatus) -> Color32 {
    match status {
        ImageStatus::Completed => Color32::from_rgb(22, 163, 74),   // Green 600
        ImageStatus::Processing => Color32::from_rgb(37, 99, 235),  // Blue 600
        ImageStatus::Pending => Color32::from_rgb(107, 114, 128),   // Gray 500
    }
}

/// Colour identifying a task type in lists and cards.
pub fn type_colour(task_type: TaskType) -> Color32 {
    match task_type {
        TaskType::Particle => Color32::from_rgb(79, 70, 229), // Indigo 600
        TaskType::Fiber => Color32::from_rgb(13, 148, 136),   // Teal 600
        TaskType::Training => Color32::from_rgb(147, 51, 234), // Purple 600
    }
}

pub fn mode_colour(mode: Mode) -> Color32 {
    match mode {
        Mode::Particle => type_colour(TaskType::Particle),
        Mode::Fiber => type_colour(TaskType::Fiber),
    }
}

/// Overlay stroke for detected particles and fibers on the canvas.
pub const OVERLAY_STROKE: Color32 = Color32::from_rgb(34, 197, 94); // Green 500
pub const OVERLAY_FILL: Color32 = Color32::from_rgba_premultiplied(34, 197, 94, 40);
pub const OVERLAY_HOVER: Color32 = Color32::from_rgb(250, 204, 21); // Yellow 400

/// Placeholder "image" block behind the overlay.
pub fn canvas_background(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(17, 24, 39) // Gray 900
    } else {
        Color32::from_rgb(229, 231, 235) // Gray 200
    }
}

pub fn canvas_grid_dot(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(55, 65, 81) // Gray 700
    } else {
        Color32::from_rgb(156, 163, 175) // Gray 400
    }
}

/// Chart series colours, cycled per image / task.
pub const SERIES: [Color32; 5] = [
    Color32::from_rgb(59, 130, 246), // Blue 500
    Color32::from_rgb(16, 185, 129), // Emerald 500
    Color32::from_rgb(245, 158, 11), // Amber 500
    Color32::from_rgb(239, 68, 68),  // Red 500
    Color32::from_rgb(139, 92, 246), // Violet 500
];

pub fn series_colour(index: usize) -> Color32 {
    SERIES[index % SERIES.len()]
}

/// Warning text colour (config warnings, empty-state hints).
pub const WARNING_TEXT: Color32 = Color32::from_rgb(253, 186, 116); // Orange 300

/// Layout constants.
pub const SIDEBAR_WIDTH: f32 = 250.0;
pub const SIDEBAR_COLLAPSED_WIDTH: f32 = 48.0;
pub const WORKSTATION_PANEL_WIDTH: f32 = 280.0;
pub const CARD_WIDTH: f32 = 240.0;
pub const CARD_HEIGHT: f32 = 120.0;
pub const ROW_HEIGHT: f32 = 22.0;
pub const CHART_HEIGHT: f32 = 320.0;
pub const STATUS_BAR_HEIGHT: f32 = 28.0;

/// Apply light/dark visuals and the body font size to the context.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    let mut visuals = if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };
    visuals.selection.bg_fill = ACCENT;
    visuals.hyperlink_color = ACCENT;
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        use egui::{FontFamily, FontId, TextStyle};
        style.text_styles = [
            (TextStyle::Small, FontId::new(font_size * 0.75, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(font_size, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(font_size, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(font_size * 1.5, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(font_size * 0.9, FontFamily::Monospace)),
        ]
        .into();
    });
}
