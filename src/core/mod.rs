// SchedScope - core/mod.rs
//
// Core business logic layer: model, parser, statistics, report rendering.
// Must NOT depend on: ui, platform, app.

pub mod export;
pub mod model;
pub mod parser;
pub mod report;
pub mod stats;
