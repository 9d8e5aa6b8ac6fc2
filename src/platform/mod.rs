// UniAIMS - platform/mod.rs
//
// Platform abstraction layer: directories, config.toml, preference store.
// Dependencies: standard library, directories, toml, serde_json; the
// app layer's ModeStore trait.
// Must NOT depend on: ui.

pub mod config;
pub mod store;
