// UniAIMS - app/mod.rs
//
// Application layer: navigation context, screen state, form drafts.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod drafts;
pub mod navigation;
pub mod state;
pub mod views;
