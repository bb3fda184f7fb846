// SchedScope - app/mod.rs
//
// Application layer: run orchestration and chart window state.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod pipeline;
pub mod state;
