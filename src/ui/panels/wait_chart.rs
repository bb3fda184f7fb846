// SchedScope - ui/panels/wait_chart.rs
//
// Line chart of wait time per job: x = job index, y = wait (ms),
// one line per visible task.

use crate::app::state::AppState;
use crate::core::report::format_millis;
use crate::ui::plot::{AxisRange, PlotFrame};
use crate::ui::theme;
use egui::{Pos2, Sense, Shape, Stroke};

/// Render the wait-time chart into the remaining space of `ui`.
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    let waits = &state.analysis.charts.waits;
    let visible: Vec<usize> = state.visible_tasks().collect();

    if visible.is_empty() {
        ui.centered_and_justified(|ui| ui.label("No tasks selected."));
        return;
    }

    let longest = visible.iter().map(|&t| waits[t].len()).max().unwrap_or(0);
    let x = AxisRange::new(0.0, longest.saturating_sub(1) as f64);
    // Keep zero on the axis so short waits are not exaggerated.
    let y = AxisRange::covering(
        visible
            .iter()
            .flat_map(|&t| waits[t].iter().map(|&w| w as f64))
            .chain(std::iter::once(0.0)),
    );

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let frame = PlotFrame::new(response.rect, x, y);
    let text_colour = ui.visuals().text_color();

    frame.draw_axes(&painter, "Job index", "Wait (ms)", text_colour, |v| {
        format!("{v:.0}")
    });

    for &task_id in &visible {
        let colour = theme::task_colour(task_id);
        let points: Vec<Pos2> = waits[task_id]
            .iter()
            .enumerate()
            .map(|(job, &wait)| frame.to_screen(job as f64, wait as f64))
            .collect();

        for p in &points {
            painter.circle_filled(*p, theme::POINT_RADIUS, colour);
        }
        if points.len() > 1 {
            painter.add(Shape::line(points, Stroke::new(theme::LINE_WIDTH, colour)));
        }
    }

    if state.show_legend {
        draw_legend(&painter, &frame, &visible, text_colour);
    }

    // Hover readout: nearest job index and the waits of visible tasks there.
    if let Some(pos) = response.hover_pos() {
        if frame.area.contains(pos) {
            let (hx, _) = frame.to_data(pos);
            let job = hx.round().max(0.0) as usize;
            let readout: Vec<String> = visible
                .iter()
                .filter_map(|&t| {
                    waits[t]
                        .get(job)
                        .map(|w| format!("task {t}: {} ms", format_millis(*w as f64)))
                })
                .collect();
            if !readout.is_empty() {
                response.on_hover_text(format!("job {job}\n{}", readout.join("\n")));
            }
        }
    }
}

fn draw_legend(painter: &egui::Painter, frame: &PlotFrame, tasks: &[usize], text_colour: egui::Color32) {
    let font = egui::FontId::proportional(11.0);
    let origin = frame.area.right_top() + egui::vec2(-90.0, 8.0);
    for (row, &task_id) in tasks.iter().enumerate() {
        let y = origin.y + row as f32 * 14.0;
        let colour = theme::task_colour(task_id);
        painter.line_segment(
            [Pos2::new(origin.x, y + 6.0), Pos2::new(origin.x + 16.0, y + 6.0)],
            Stroke::new(theme::LINE_WIDTH * 2.0, colour),
        );
        painter.text(
            Pos2::new(origin.x + 22.0, y),
            egui::Align2::LEFT_TOP,
            format!("task {task_id}"),
            font.clone(),
            text_colour,
        );
    }
}
