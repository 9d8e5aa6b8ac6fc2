// UniAIMS - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library plus data crates (serde, csv, chrono, rand).
// Must NOT depend on: ui, platform, app, or egui.

pub mod analysis;
pub mod canvas;
pub mod docs;
pub mod export;
pub mod filter;
pub mod model;
pub mod repository;
pub mod report;
pub mod route;
