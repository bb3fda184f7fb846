// SchedScope - ui/theme.rs
//
// Colour scheme, task and criticality colour mapping, and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Line colours cycled across tasks in the wait-time chart.
const TASK_PALETTE: [Color32; 8] = [
    Color32::from_rgb(59, 130, 246),  // Blue 500
    Color32::from_rgb(236, 72, 153),  // Pink 500
    Color32::from_rgb(34, 197, 94),   // Green 500
    Color32::from_rgb(6, 182, 212),   // Cyan 500
    Color32::from_rgb(245, 158, 11),  // Amber 500
    Color32::from_rgb(139, 92, 246),  // Violet 500
    Color32::from_rgb(239, 68, 68),   // Red 500
    Color32::from_rgb(20, 184, 166),  // Teal 500
];

/// Colour for a task's line.
pub fn task_colour(task_id: usize) -> Color32 {
    TASK_PALETTE[task_id % TASK_PALETTE.len()]
}

/// Segment colour on the event timeline.
pub fn criticality_colour(critical: bool) -> Color32 {
    if critical {
        CRITICAL
    } else {
        BEST_EFFORT
    }
}

/// Critical (real-time) jobs.
pub const CRITICAL: Color32 = Color32::from_rgb(220, 38, 38); // Red 600

/// Best-effort jobs.
pub const BEST_EFFORT: Color32 = Color32::from_rgb(37, 99, 235); // Blue 600

/// Marker drawn at the finish of a job that missed its deadline.
pub const MISSED_MARKER: Color32 = Color32::from_rgb(250, 204, 21); // Yellow 400

/// Value colour for a metric that signals a problem.
pub const WARN_TEXT: Color32 = Color32::from_rgb(248, 113, 113);

/// Grid line colour.
pub const GRID: Color32 = Color32::from_rgb(75, 85, 99); // Gray 600

/// Layout constants.
pub const SIDEBAR_WIDTH: f32 = 320.0;
pub const LINE_WIDTH: f32 = 1.5;
pub const SEGMENT_WIDTH: f32 = 3.0;
pub const POINT_RADIUS: f32 = 2.5;
