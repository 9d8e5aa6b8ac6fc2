// UniAIMS - ui/mod.rs
//
// UI layer: presentation only.
// Dependencies: app (state), core (read-only models), egui, egui_plot.
// File dialogs (rfd) are the only I/O reached from here.

pub mod panels;
pub mod theme;
pub mod widgets;
