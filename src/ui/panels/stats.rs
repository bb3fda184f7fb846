// SchedScope - ui/panels/stats.rs
//
// Side panel: the result set as a two-column grid, followed by per-task
// visibility toggles for the charts.

use crate::app::state::AppState;
use crate::core::report::{format_millis, format_value};
use crate::core::stats::MetricValue;
use crate::ui::theme;

/// Render the statistics sidebar contents.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.strong("Statistics");
    ui.add_space(4.0);

    egui::Grid::new("stats_grid")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .striped(true)
        .show(ui, |ui| {
            for metric in state.analysis.results.metrics() {
                // Per-task sequences are shown in the task table below.
                if matches!(metric.value, MetricValue::MillisPerTask(_)) {
                    continue;
                }
                ui.label(metric.label);
                let text = format_value(&metric.value);
                let alarming = match metric.value {
                    MetricValue::Flag(met) => !met,
                    MetricValue::Ratio(r) => r.missed > 0,
                    _ => false,
                };
                if alarming {
                    ui.colored_label(theme::WARN_TEXT, text);
                } else {
                    ui.label(text);
                }
                ui.end_row();
            }
        });

    ui.add_space(8.0);
    ui.separator();
    ui.horizontal(|ui| {
        ui.strong("Tasks");
        if ui.small_button("all / none").clicked() {
            state.toggle_all_tasks();
        }
    });

    let results = &state.analysis.results;
    egui::ScrollArea::vertical()
        .id_salt("task_table")
        .show(ui, |ui| {
            egui::Grid::new("task_grid")
                .num_columns(4)
                .spacing([10.0, 3.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.strong("Task");
                    ui.strong("Jobs");
                    ui.strong("Avg wait");
                    ui.strong("Median");
                    ui.end_row();

                    for (task_id, visible) in state.task_visible.iter_mut().enumerate() {
                        let label = egui::RichText::new(format!("task {task_id}"))
                            .color(theme::task_colour(task_id));
                        ui.checkbox(visible, label);
                        ui.label(
                            state
                                .analysis
                                .charts
                                .waits
                                .get(task_id)
                                .map_or(0, Vec::len)
                                .to_string(),
                        );
                        ui.label(
                            results
                                .average_wait_per_task
                                .get(task_id)
                                .map_or_else(String::new, |v| format_millis(*v)),
                        );
                        ui.label(
                            results
                                .median_wait_per_task
                                .get(task_id)
                                .map_or_else(String::new, |v| format_millis(*v)),
                        );
                        ui.end_row();
                    }
                });
        });
}
