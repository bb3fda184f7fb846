// SchedScope - ui/panels/timeline.rs
//
// Event timeline: x = time (ms), y = task id. One segment per job from start
// to finish, coloured by criticality. Jobs that missed their deadline get a
// marker at their finish point.

use crate::app::state::AppState;
use crate::ui::plot::{AxisRange, PlotFrame};
use crate::ui::theme;
use egui::{Pos2, Sense, Stroke};

/// Render the event timeline into the remaining space of `ui`.
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    let intervals = &state.analysis.charts.intervals;
    let visible: Vec<usize> = state.visible_tasks().collect();

    if visible.is_empty() {
        ui.centered_and_justified(|ui| ui.label("No tasks selected."));
        return;
    }

    let x = AxisRange::covering(
        visible
            .iter()
            .flat_map(|&t| intervals[t].iter())
            .flat_map(|i| [i.start_ms as f64, i.finish_ms as f64]),
    );
    // Half a row of padding above and below the outermost tasks.
    let y = AxisRange::new(-0.5, (state.task_count() as f64) - 0.5);

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let frame = PlotFrame::new(response.rect, x, y);
    let text_colour = ui.visuals().text_color();

    frame.draw_axes(&painter, "Time (ms)", "Task", text_colour, |v| {
        // Only label whole task rows.
        if (v - v.round()).abs() < 0.05 && v >= 0.0 {
            format!("{}", v.round() as i64)
        } else {
            String::new()
        }
    });

    for &task_id in &visible {
        let row = task_id as f64;
        for interval in &intervals[task_id] {
            let from = frame.to_screen(interval.start_ms as f64, row);
            let to = frame.to_screen(interval.finish_ms as f64, row);
            let colour = theme::criticality_colour(interval.critical);

            painter.line_segment([from, to], Stroke::new(theme::SEGMENT_WIDTH, colour));
            painter.circle_filled(from, theme::POINT_RADIUS, colour);
            painter.circle_filled(to, theme::POINT_RADIUS, colour);
            if !interval.deadline_met {
                painter.circle_stroke(
                    to,
                    theme::POINT_RADIUS * 2.0,
                    Stroke::new(1.5, theme::MISSED_MARKER),
                );
            }
        }
    }

    if state.show_legend {
        draw_legend(&painter, &frame, text_colour);
    }

    if let Some(pos) = response.hover_pos() {
        if frame.area.contains(pos) {
            let (t, row) = frame.to_data(pos);
            let task_id = row.round();
            if task_id >= 0.0 && state.is_task_visible(task_id as usize) {
                response.on_hover_text(format!("task {} at {t:.0} ms", task_id as usize));
            }
        }
    }
}

fn draw_legend(painter: &egui::Painter, frame: &PlotFrame, text_colour: egui::Color32) {
    let font = egui::FontId::proportional(11.0);
    let origin = frame.area.right_top() + egui::vec2(-110.0, 8.0);
    let rows = [
        (theme::CRITICAL, "critical"),
        (theme::BEST_EFFORT, "best effort"),
        (theme::MISSED_MARKER, "missed deadline"),
    ];
    for (row, (colour, label)) in rows.iter().enumerate() {
        let y = origin.y + row as f32 * 14.0;
        painter.circle_filled(Pos2::new(origin.x + 6.0, y + 6.0), theme::POINT_RADIUS * 1.5, *colour);
        painter.text(
            Pos2::new(origin.x + 16.0, y),
            egui::Align2::LEFT_TOP,
            *label,
            font.clone(),
            text_colour,
        );
    }
}
