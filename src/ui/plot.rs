// SchedScope - ui/plot.rs
//
// Minimal 2-D plot frame: maps data coordinates into a screen rectangle and
// draws axes with tick labels. Shared by the wait-time chart and the event
// timeline.

use crate::util::constants;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke};

/// An inclusive data range along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Build a range from the data bounds.
    ///
    /// A degenerate range (one distinct value, or no data) is widened by one
    /// unit on each side so the mapping never divides by zero.
    pub fn new(min: f64, max: f64) -> Self {
        if !(min.is_finite() && max.is_finite()) || max <= min {
            let centre = if min.is_finite() { min } else { 0.0 };
            return Self {
                min: centre - 1.0,
                max: centre + 1.0,
            };
        }
        Self { min, max }
    }

    /// Range covering every value yielded by `values`.
    pub fn covering(values: impl IntoIterator<Item = f64>) -> Self {
        let (min, max) = values
            .into_iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        Self::new(min, max)
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Evenly spaced tick positions from `min` to `max`, both included.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let count = count.max(2);
        let step = self.span() / (count - 1) as f64;
        (0..count).map(|i| self.min + step * i as f64).collect()
    }
}

/// A data-to-screen mapping for one chart.
#[derive(Debug, Clone, Copy)]
pub struct PlotFrame {
    /// Plot area, inside the axis margins.
    pub area: Rect,
    pub x: AxisRange,
    pub y: AxisRange,
}

impl PlotFrame {
    /// Place a plot inside `outer`, leaving room for tick labels.
    pub fn new(outer: Rect, x: AxisRange, y: AxisRange) -> Self {
        let m = constants::CHART_MARGIN;
        let area = Rect::from_min_max(
            Pos2::new(outer.min.x + m, outer.min.y + m / 2.0),
            Pos2::new(outer.max.x - m / 2.0, outer.max.y - m),
        );
        Self { area, x, y }
    }

    /// Screen position of a data point. Larger y is drawn higher.
    pub fn to_screen(&self, x: f64, y: f64) -> Pos2 {
        let fx = ((x - self.x.min) / self.x.span()) as f32;
        let fy = ((y - self.y.min) / self.y.span()) as f32;
        Pos2::new(
            self.area.min.x + fx * self.area.width(),
            self.area.max.y - fy * self.area.height(),
        )
    }

    /// Data coordinates under a screen position.
    pub fn to_data(&self, pos: Pos2) -> (f64, f64) {
        let fx = ((pos.x - self.area.min.x) / self.area.width()) as f64;
        let fy = ((self.area.max.y - pos.y) / self.area.height()) as f64;
        (
            self.x.min + fx * self.x.span(),
            self.y.min + fy * self.y.span(),
        )
    }

    /// Draw both axes, grid lines, tick labels, and axis titles.
    pub fn draw_axes(
        &self,
        painter: &Painter,
        x_title: &str,
        y_title: &str,
        text_colour: Color32,
        format_y: impl Fn(f64) -> String,
    ) {
        let axis = Stroke::new(1.0, text_colour);
        let grid = Stroke::new(0.5, super::theme::GRID);
        let font = FontId::proportional(11.0);
        let a = self.area;

        painter.line_segment([a.left_bottom(), a.right_bottom()], axis);
        painter.line_segment([a.left_bottom(), a.left_top()], axis);

        for x in self.x.ticks(constants::CHART_AXIS_TICKS) {
            let p = self.to_screen(x, self.y.min);
            painter.line_segment([Pos2::new(p.x, a.min.y), p], grid);
            painter.text(
                Pos2::new(p.x, a.max.y + 4.0),
                Align2::CENTER_TOP,
                format!("{x:.0}"),
                font.clone(),
                text_colour,
            );
        }
        for y in self.y.ticks(constants::CHART_AXIS_TICKS) {
            let p = self.to_screen(self.x.min, y);
            painter.line_segment([p, Pos2::new(a.max.x, p.y)], grid);
            painter.text(
                Pos2::new(a.min.x - 6.0, p.y),
                Align2::RIGHT_CENTER,
                format_y(y),
                font.clone(),
                text_colour,
            );
        }

        painter.text(
            Pos2::new(a.center().x, a.max.y + 22.0),
            Align2::CENTER_TOP,
            x_title,
            font.clone(),
            text_colour,
        );
        painter.text(
            Pos2::new(a.min.x, a.min.y - 4.0),
            Align2::LEFT_BOTTOM,
            y_title,
            font,
            text_colour,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> PlotFrame {
        PlotFrame {
            area: Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(100.0, 50.0)),
            x: AxisRange::new(0.0, 10.0),
            y: AxisRange::new(0.0, 5.0),
        }
    }

    #[test]
    fn test_corners_map_to_area_corners() {
        let f = frame();
        assert_eq!(f.to_screen(0.0, 0.0), Pos2::new(0.0, 50.0));
        assert_eq!(f.to_screen(10.0, 5.0), Pos2::new(100.0, 0.0));
    }

    #[test]
    fn test_to_data_inverts_to_screen() {
        let f = frame();
        let (x, y) = f.to_data(f.to_screen(4.0, 2.0));
        assert!((x - 4.0).abs() < 1e-4);
        assert!((y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_range_is_widened() {
        assert_eq!(AxisRange::new(3.0, 3.0), AxisRange { min: 2.0, max: 4.0 });
        assert_eq!(
            AxisRange::covering(std::iter::empty()),
            AxisRange { min: -1.0, max: 1.0 }
        );
    }

    #[test]
    fn test_covering_and_ticks() {
        let r = AxisRange::covering([4.0, -2.0, 6.0]);
        assert_eq!(r, AxisRange { min: -2.0, max: 6.0 });
        assert_eq!(r.ticks(5), vec![-2.0, 0.0, 2.0, 4.0, 6.0]);
    }
}
