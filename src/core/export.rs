// SchedScope - core/export.rs
//
// CSV and JSON export of computed statistics.
// Writes to any Write trait object; `export_to_path` is the only function
// that creates a file.

use crate::core::model::ParseStats;
use crate::core::report::format_value;
use crate::core::stats::{Analysis, ResultSet};
use crate::util::constants;
use crate::util::error::ExportError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// Output format for `--export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!(
                "unknown export format '{other}', expected 'json' or 'csv'"
            )),
        }
    }
}

impl ExportFormat {
    /// Pick a format from a file extension, if it names one.
    pub fn from_extension(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

/// Self-describing snapshot of one run, as written by the JSON export.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub tool: &'static str,
    pub version: &'static str,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub parse: ParseStats,
    pub results: &'a ResultSet,
    pub waits_per_task: &'a [Vec<i128>],
}

impl<'a> Report<'a> {
    pub fn new(analysis: &'a Analysis, parse: ParseStats, source: &Path) -> Self {
        Self {
            tool: constants::APP_NAME,
            version: constants::APP_VERSION,
            generated_at: Utc::now(),
            source: source.display().to_string(),
            parse,
            results: &analysis.results,
            waits_per_task: &analysis.charts.waits,
        }
    }
}

/// Export the result set as `metric,value` rows.
///
/// Returns the number of metric rows written.
pub fn export_csv<W: Write>(
    results: &ResultSet,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["metric", "value"]).map_err(csv_err)?;

    let mut count = 0;
    for metric in results.metrics() {
        let value = format_value(&metric.value);
        csv_writer
            .write_record([metric.key, value.as_str()])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export the full report as pretty-printed JSON.
pub fn export_json<W: Write>(
    report: &Report<'_>,
    writer: W,
    export_path: &Path,
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, report).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })
}

/// Write the report to `writer` in `format`, then flush it.
///
/// A failed final flush is an error: the export is incomplete.
pub fn write_export<W: Write>(
    report: &Report<'_>,
    format: ExportFormat,
    mut writer: W,
    export_path: &Path,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Json => export_json(report, &mut writer, export_path)?,
        ExportFormat::Csv => {
            export_csv(report.results, &mut writer, export_path)?;
        }
    }

    writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })
}

/// Create `export_path` and write the report to it in `format`.
pub fn export_to_path(
    report: &Report<'_>,
    format: ExportFormat,
    export_path: &Path,
) -> Result<(), ExportError> {
    let file = std::fs::File::create(export_path).map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    write_export(report, format, std::io::BufWriter::new(file), export_path)?;

    tracing::info!(path = %export_path.display(), format = ?format, "Statistics exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stats::{ChartSeries, MissRatio};
    use std::path::PathBuf;

    fn make_analysis() -> Analysis {
        Analysis {
            results: ResultSet {
                all_deadlines_met: true,
                missed_deadlines: MissRatio { missed: 0, total: 2 },
                missed_critical_deadlines: MissRatio { missed: 0, total: 0 },
                missed_noncritical_deadlines: MissRatio { missed: 0, total: 2 },
                average_wait_overall: 3.5,
                average_wait_per_task: vec![3.5],
                median_wait_overall: 3.5,
                median_wait_per_task: vec![3.5],
                ready_queue_max: 2,
                ready_queue_current: 0,
                total_preemptions: 1,
                total_context_switches: 4,
            },
            charts: ChartSeries {
                waits: vec![vec![5, 2]],
                intervals: vec![vec![]],
            },
        }
    }

    #[test]
    fn test_csv_export() {
        let analysis = make_analysis();
        let mut buf = Vec::new();
        let count = export_csv(&analysis.results, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 12);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("metric,value"));
        assert!(output.contains("missed_deadlines,0/2"));
        // Sequences contain commas and must be quoted.
        assert!(output.contains("average_wait_per_task,\"[3.5]\""));
    }

    #[test]
    fn test_json_export() {
        let analysis = make_analysis();
        let report = Report::new(&analysis, ParseStats::default(), Path::new("run.log"));
        let mut buf = Vec::new();
        export_json(&report, &mut buf, &PathBuf::from("out.json")).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["tool"], "SchedScope");
        assert_eq!(value["source"], "run.log");
        assert_eq!(value["results"]["average_wait_overall"], 3.5);
        assert_eq!(value["results"]["missed_deadlines"]["total"], 2);
        assert_eq!(value["waits_per_task"][0][1], 2);
    }

    #[test]
    fn test_export_to_path_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        let analysis = make_analysis();
        let report = Report::new(&analysis, ParseStats::default(), Path::new("run.log"));

        export_to_path(&report, ExportFormat::Csv, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("total_context_switches,4"));
    }

    /// Accepts every write, then fails to flush like a full disk.
    struct FlushFails(Vec<u8>);

    impl Write for FlushFails {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("no space left on device"))
        }
    }

    #[test]
    fn test_json_flush_failure_is_reported() {
        let analysis = make_analysis();
        let report = Report::new(&analysis, ParseStats::default(), Path::new("run.log"));
        let path = PathBuf::from("out.json");

        let err = write_export(&report, ExportFormat::Json, FlushFails(Vec::new()), &path).unwrap_err();
        assert!(matches!(err, ExportError::Io { ref path, .. } if path.ends_with("out.json")));
    }

    #[test]
    fn test_write_export_flushes_into_writer() {
        let analysis = make_analysis();
        let report = Report::new(&analysis, ParseStats::default(), Path::new("run.log"));
        let mut buf = Vec::new();

        write_export(&report, ExportFormat::Json, &mut buf, Path::new("out.json")).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["results"]["total_preemptions"], 1);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ExportFormat::from_extension(Path::new("a/b.CSV")),
            Some(ExportFormat::Csv)
        );
        assert_eq!(
            ExportFormat::from_extension(Path::new("b.json")),
            Some(ExportFormat::Json)
        );
        assert_eq!(ExportFormat::from_extension(Path::new("b.txt")), None);
    }
}
