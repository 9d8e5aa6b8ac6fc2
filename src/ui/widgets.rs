// UniAIMS - ui/widgets.rs
//
// Small widgets shared by several panels: coloured badges, the list filter
// toolbar, the pagination row and the empty-list placeholder.

use crate::core::filter::{Pager, TaskFilter, TimeBucket};
use crate::core::model::{TaskStatus, TaskType};
use crate::util::constants::PAGE_SIZE_CHOICES;
use egui::{Color32, RichText};

/// A rounded label with a tinted background.
pub fn badge(ui: &mut egui::Ui, text: &str, colour: Color32) -> egui::Response {
    let bg = Color32::from_rgba_unmultiplied(colour.r(), colour.g(), colour.b(), 36);
    egui::Frame::new()
        .fill(bg)
        .corner_radius(4.0)
        .inner_margin(egui::Margin::symmetric(6, 1))
        .show(ui, |ui| {
            ui.label(RichText::new(text).color(colour).small().strong());
        })
        .response
}

/// Search box plus time/type/status combos. Returns true when anything changed.
///
/// `types` lists the task types offered by the type combo; pass an empty
/// slice to hide it.
pub fn filter_toolbar(
    ui: &mut egui::Ui,
    id: &str,
    filter: &mut TaskFilter,
    types: &[TaskType],
) -> bool {
    let before = filter.clone();
    ui.horizontal_wrapped(|ui| {
        ui.add(
            egui::TextEdit::singleline(&mut filter.search)
                .hint_text("\u{1f50d} Search by name or ID")
                .desired_width(220.0),
        );

        egui::ComboBox::from_id_salt(format!("{id}_time"))
            .selected_text(filter.time.label())
            .show_ui(ui, |ui| {
                for bucket in TimeBucket::all() {
                    ui.selectable_value(&mut filter.time, *bucket, bucket.label());
                }
            });

        if !types.is_empty() {
            egui::ComboBox::from_id_salt(format!("{id}_type"))
                .selected_text(filter.task_type.map_or("All Types", |t| t.label()))
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut filter.task_type, None, "All Types");
                    for t in types {
                        ui.selectable_value(&mut filter.task_type, Some(*t), t.label());
                    }
                });
        }

        egui::ComboBox::from_id_salt(format!("{id}_status"))
            .selected_text(filter.status.map_or("All Statuses", |s| s.label()))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter.status, None, "All Statuses");
                for s in TaskStatus::all() {
                    ui.selectable_value(&mut filter.status, Some(*s), s.label());
                }
            });

        if !filter.is_empty() && ui.small_button("Clear").clicked() {
            *filter = TaskFilter::default();
        }
    });
    *filter != before
}

/// "Showing a-b of n" with prev/next buttons and a page-size selector.
pub fn pagination(ui: &mut egui::Ui, id: &str, pager: &mut Pager, total: usize) {
    pager.clamp_to(total);
    ui.horizontal(|ui| {
        let first = if total == 0 {
            0
        } else {
            (pager.page - 1) * pager.per_page + 1
        };
        let last = (pager.page * pager.per_page).min(total);
        ui.label(RichText::new(format!("Showing {first}-{last} of {total}")).weak());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let pages = pager.page_count(total);
            if ui
                .add_enabled(pager.page < pages, egui::Button::new("\u{25b6}"))
                .clicked()
            {
                pager.next(total);
            }
            ui.label(format!("Page {} of {pages}", pager.page));
            if ui
                .add_enabled(pager.page > 1, egui::Button::new("\u{25c0}"))
                .clicked()
            {
                pager.prev();
            }

            let mut per_page = pager.per_page;
            egui::ComboBox::from_id_salt(format!("{id}_per_page"))
                .selected_text(format!("{per_page} / page"))
                .width(90.0)
                .show_ui(ui, |ui| {
                    for choice in PAGE_SIZE_CHOICES {
                        ui.selectable_value(&mut per_page, *choice, format!("{choice} / page"));
                    }
                });
            if per_page != pager.per_page {
                pager.set_per_page(per_page);
            }
        });
    });
}

/// Inline placeholder for a list with no rows.
pub fn empty_state(ui: &mut egui::Ui, message: &str) {
    ui.add_space(24.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(message).weak().italics());
    });
    ui.add_space(24.0);
}

/// Section heading with a weak subtitle underneath.
pub fn page_header(ui: &mut egui::Ui, title: &str, subtitle: &str) {
    ui.heading(title);
    if !subtitle.is_empty() {
        ui.label(RichText::new(subtitle).weak());
    }
    ui.add_space(8.0);
}
