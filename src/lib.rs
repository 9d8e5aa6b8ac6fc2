// UniAIMS - lib.rs
//
// Library entry point, exposing all non-GUI modules for integration testing.
//
// The window shell (`gui`) lives in `main.rs` and is not part of the
// library surface.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
