// SchedScope - core/report.rs
//
// Console rendering of the result set.
// Core layer: writes to any Write trait object.

use crate::core::stats::{MetricValue, ResultSet};
use crate::util::constants::REPORT_BANNER;
use std::io::{self, Write};

/// Format a millisecond value, keeping one decimal on whole numbers so a
/// column of averages reads consistently.
pub fn format_millis(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Render a metric value the way the console report prints it.
pub fn format_value(value: &MetricValue<'_>) -> String {
    match value {
        MetricValue::Flag(b) => b.to_string(),
        MetricValue::Ratio(r) => r.to_string(),
        MetricValue::Millis(v) => format_millis(*v),
        MetricValue::MillisPerTask(values) => {
            let parts: Vec<String> = values.iter().map(|v| format_millis(*v)).collect();
            format!("[{}]", parts.join(", "))
        }
        MetricValue::Count(n) => n.to_string(),
    }
}

/// `"<label>: <value>"` lines, in presentation order.
pub fn render_lines(results: &ResultSet) -> Vec<String> {
    results
        .metrics()
        .iter()
        .map(|m| format!("{}: {}", m.label, format_value(&m.value)))
        .collect()
}

/// Write the full statistics block, framed by banner lines.
pub fn write_report<W: Write>(results: &ResultSet, mut out: W) -> io::Result<()> {
    writeln!(out, "{REPORT_BANNER}")?;
    for line in render_lines(results) {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{REPORT_BANNER}")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stats::MissRatio;

    fn sample() -> ResultSet {
        ResultSet {
            all_deadlines_met: false,
            missed_deadlines: MissRatio { missed: 1, total: 2 },
            missed_critical_deadlines: MissRatio { missed: 1, total: 1 },
            missed_noncritical_deadlines: MissRatio { missed: 0, total: 1 },
            average_wait_overall: 3.5,
            average_wait_per_task: vec![3.5, 2.0],
            median_wait_overall: 3.0,
            median_wait_per_task: vec![3.5, 2.25],
            ready_queue_max: 2,
            ready_queue_current: 0,
            total_preemptions: 1,
            total_context_switches: 4,
        }
    }

    #[test]
    fn test_report_lines_follow_metric_order() {
        let lines = render_lines(&sample());
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "All deadlines were met: false");
        assert_eq!(lines[1], "Missed deadlines: 1/2");
        assert_eq!(lines[2], "Missed critical deadlines: 1/1");
        assert_eq!(lines[3], "Missed non-critical deadlines: 0/1");
        assert_eq!(lines[4], "Average wait time (ms): 3.5");
        assert_eq!(lines[5], "Average wait per task (ms): [3.5, 2.0]");
        assert_eq!(lines[6], "Median wait time (ms): 3.0");
        assert_eq!(lines[7], "Median wait per task (ms): [3.5, 2.25]");
        assert_eq!(lines[11], "Total context switches: 4");
    }

    #[test]
    fn test_write_report_is_framed_by_banners() {
        let mut buf = Vec::new();
        write_report(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 14);
        assert_eq!(lines[0], REPORT_BANNER);
        assert_eq!(lines[13], REPORT_BANNER);
    }

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(5.0), "5.0");
        assert_eq!(format_millis(-6.0), "-6.0");
        assert_eq!(format_millis(0.25), "0.25");
    }
}
