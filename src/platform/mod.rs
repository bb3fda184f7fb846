// SchedScope - platform/mod.rs
//
// Platform abstraction layer: config directories, config.toml, and
// interactive input selection.
// Must NOT depend on: ui, app.

pub mod config;
pub mod input;
