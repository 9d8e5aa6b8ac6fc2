// UniAIMS - ui/panels/docs.rs
//
// Documentation browser: section tree with search on the left, page text on
// the right. Pages without written content show a placeholder.

use crate::app::state::AppState;
use crate::core::docs::{self, DocItem, DOC_SECTIONS};
use egui::RichText;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    egui::SidePanel::left("docs_tree")
        .default_width(240.0)
        .resizable(true)
        .show_inside(ui, |ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.docs.search)
                    .hint_text("\u{1f50d} Search docs")
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(6.0);
            egui::ScrollArea::vertical()
                .id_salt("docs_tree_scroll")
                .show(ui, |ui| tree(ui, state));
        });

    egui::CentralPanel::default().show_inside(ui, |ui| {
        egui::ScrollArea::vertical()
            .id_salt("docs_page_scroll")
            .auto_shrink([false; 2])
            .show(ui, |ui| page(ui, state.docs.active_page));
    });
}

fn tree(ui: &mut egui::Ui, state: &mut AppState) {
    let docs_state = &mut state.docs;

    // A non-empty search flattens the tree into matching pages.
    if !docs_state.search.trim().is_empty() {
        let hits = docs::search(&docs_state.search);
        if hits.is_empty() {
            ui.label(RichText::new("No pages match.").italics().weak());
        }
        for p in hits {
            let text = match docs::section_of(p) {
                Some(section) => format!("{p}  \u{00b7} {section}"),
                None => p.to_string(),
            };
            if ui.selectable_label(docs_state.active_page == p, text).clicked() {
                docs_state.active_page = p;
            }
        }
        return;
    }

    for section in DOC_SECTIONS {
        egui::CollapsingHeader::new(RichText::new(section.title).strong())
            .default_open(true)
            .show(ui, |ui| {
                for item in section.items {
                    match item {
                        DocItem::Page(p) => {
                            if ui.selectable_label(docs_state.active_page == *p, *p).clicked() {
                                docs_state.active_page = *p;
                            }
                        }
                        DocItem::Group { label, pages } => {
                            let open = pages.contains(&docs_state.active_page);
                            egui::CollapsingHeader::new(*label)
                                .default_open(open)
                                .show(ui, |ui| {
                                    for p in *pages {
                                        if ui
                                            .selectable_label(docs_state.active_page == *p, *p)
                                            .clicked()
                                        {
                                            docs_state.active_page = *p;
                                        }
                                    }
                                });
                        }
                    }
                }
            });
    }
}

fn page(ui: &mut egui::Ui, active: &str) {
    if let Some(section) = docs::section_of(active) {
        ui.label(RichText::new(format!("{section} \u{203a} {active}")).small().weak());
    }

    let Some(text) = docs::content(active) else {
        ui.heading(active);
        ui.add_space(12.0);
        ui.label(
            RichText::new("This page is coming soon. Check back after the next release.")
                .italics()
                .weak(),
        );
        return;
    };

    // Minimal markdown: headings, bullets and paragraphs.
    for line in text.lines() {
        let line = line.trim_end();
        if let Some(h) = line.strip_prefix("# ") {
            ui.heading(h);
        } else if let Some(h) = line.strip_prefix("## ") {
            ui.add_space(8.0);
            ui.label(RichText::new(h).size(17.0).strong());
        } else if let Some(h) = line.strip_prefix("### ") {
            ui.label(RichText::new(h).strong());
        } else if let Some(item) = line.strip_prefix("- ") {
            ui.horizontal_wrapped(|ui| {
                ui.label("\u{2022}");
                ui.label(item);
            });
        } else if line.is_empty() {
            ui.add_space(6.0);
        } else {
            ui.label(line);
        }
    }
}
