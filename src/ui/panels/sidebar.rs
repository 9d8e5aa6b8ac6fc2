// UniAIMS - ui/panels/sidebar.rs
//
// Context sidebar for task, data batch and fine-tuning routes.
// The menu is chosen from the route and the sticky mode; the panel shrinks
// to an icon strip when collapsed.

use crate::app::navigation::{is_item_active, sidebar_menu, MenuTarget};
use crate::app::state::AppState;
use crate::ui::theme;
use egui::RichText;

/// Render the sidebar contents into a side panel.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let collapsed = state.nav.collapsed();
    let sections = sidebar_menu(state.route(), state.mode());
    let tab = state.location.query("tab").map(str::to_string);

    // Collected during the draw and applied afterwards, so the loop only
    // needs shared access to `state`.
    let mut clicked: Option<MenuTarget> = None;

    ui.horizontal(|ui| {
        let toggle = if collapsed { "\u{00bb}" } else { "\u{00ab}" };
        if ui
            .small_button(toggle)
            .on_hover_text(if collapsed { "Expand sidebar" } else { "Collapse sidebar" })
            .clicked()
        {
            state.nav.toggle_collapsed();
        }
        if !collapsed {
            if let Some(mode) = state.mode() {
                ui.label(
                    RichText::new(mode.label())
                        .strong()
                        .color(theme::mode_colour(mode)),
                );
            }
            if let Some(task_id) = state.route().task_id() {
                ui.label(RichText::new(task_id).monospace().weak());
            }
        }
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .id_salt("sidebar_menu")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for section in &sections {
                if !collapsed {
                    ui.add_space(6.0);
                    ui.label(RichText::new(section.title.to_uppercase()).small().weak());
                }
                for item in &section.items {
                    let active = is_item_active(item, state.route(), tab.as_deref());
                    let text = if collapsed {
                        RichText::new(item.icon.glyph()).size(16.0)
                    } else {
                        RichText::new(format!("{}  {}", item.icon.glyph(), item.label))
                    };
                    let text = if active { text.color(theme::ACCENT).strong() } else { text };
                    let response = ui
                        .add_sized(
                            [ui.available_width(), theme::ROW_HEIGHT + 4.0],
                            egui::SelectableLabel::new(active, text),
                        )
                        .on_hover_text(item.label);
                    if response.clicked() {
                        clicked = Some(item.target.clone());
                    }
                }
            }

            if !collapsed {
                ui.add_space(12.0);
                ui.separator();
                if ui.link("\u{2190} Back to Dashboard").clicked() {
                    clicked = Some(MenuTarget::Path("/dashboard".to_string()));
                }
            }
        });

    match clicked {
        Some(MenuTarget::Path(path)) => state.navigate(&path),
        Some(MenuTarget::Query { key, value }) => state.set_query(key, value),
        Some(MenuTarget::OpenExportModal) => {
            state.export_draft.open = true;
            tracing::debug!("Save to dataset dialog opened");
        }
        None => {}
    }
}

/// Width of the side panel for the current collapse state.
pub fn width(state: &AppState) -> f32 {
    if state.nav.collapsed() {
        theme::SIDEBAR_COLLAPSED_WIDTH
    } else {
        theme::SIDEBAR_WIDTH
    }
}
