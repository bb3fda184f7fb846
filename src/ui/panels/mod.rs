// SchedScope - ui/panels/mod.rs

pub mod about;
pub mod stats;
pub mod timeline;
pub mod wait_chart;
