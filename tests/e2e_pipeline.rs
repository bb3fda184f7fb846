// SchedScope - tests/e2e_pipeline.rs
//
// End-to-end tests for the parse -> statistics -> report pipeline.
//
// These tests read real fixture files from disk and run them through the
// same entry points the binary uses, with no mocks.

use schedscope::app::pipeline::analyse_file;
use schedscope::core::export::{export_to_path, ExportFormat, Report};
use schedscope::core::parser::{parse_file, InputFormat, ParseConfig};
use schedscope::core::report::{render_lines, write_report};
use schedscope::core::stats::compute;
use schedscope::util::error::{EmptyDataError, FormatError, SchedScopeError};
use std::fs;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn config() -> ParseConfig {
    ParseConfig::default()
}

/// Count lines between the header and the kernel line that hold job data.
fn count_job_lines(content: &str) -> usize {
    content
        .lines()
        .skip_while(|l| !l.starts_with("task_id"))
        .skip(1)
        .take_while(|l| !l.starts_with("kstats"))
        .filter(|l| !l.trim().is_empty())
        .count()
}

// =============================================================================
// Scenarios
// =============================================================================

/// One task, two jobs, all deadlines met.
#[test]
fn e2e_single_task_scenario() {
    let output = analyse_file(&fixture("scenario_a.log"), &config()).unwrap();
    let r = &output.analysis.results;

    assert_eq!(output.analysis.charts.waits, vec![vec![5, 2]]);
    assert_eq!(r.average_wait_overall, 3.5);
    assert_eq!(r.median_wait_overall, 3.5);
    assert_eq!(r.missed_deadlines.to_string(), "0/2");
    assert!(r.all_deadlines_met);
    assert_eq!(output.parse.preamble_lines, 2);
}

/// Three interleaved tasks with console chatter around the data.
#[test]
fn e2e_multi_task_statistics() {
    let output = analyse_file(&fixture("multi_task.log"), &config()).unwrap();
    let r = &output.analysis.results;

    assert_eq!(
        output.analysis.charts.waits,
        vec![vec![0, 2, 1], vec![2, 6], vec![10, 50]]
    );
    assert_eq!(r.average_wait_per_task, vec![1.0, 4.0, 30.0]);
    assert_eq!(r.median_wait_per_task, vec![1.0, 4.0, 30.0]);

    // Pooled over all seven jobs, not the mean of per-task means (11.67).
    assert!((r.average_wait_overall - 71.0 / 7.0).abs() < 1e-12);
    // Median of the per-task medians [1, 4, 30].
    assert_eq!(r.median_wait_overall, 4.0);

    assert_eq!(r.missed_deadlines.to_string(), "1/7");
    assert_eq!(r.missed_critical_deadlines.to_string(), "0/5");
    assert_eq!(r.missed_noncritical_deadlines.to_string(), "1/2");
    assert_eq!(
        r.missed_critical_deadlines.total + r.missed_noncritical_deadlines.total,
        r.missed_deadlines.total
    );

    assert_eq!(r.total_context_switches, 57);
    assert_eq!(r.total_preemptions, 9);
    assert_eq!(r.ready_queue_max, 3);
    assert_eq!(r.ready_queue_current, 0);
}

/// Every job data line becomes exactly one job record.
#[test]
fn e2e_job_count_matches_data_lines() {
    let path = fixture("multi_task.log");
    let content = fs::read_to_string(&path).unwrap();
    let log = parse_file(&path, &config()).unwrap();

    let per_task: usize = log.tasks.iter().map(|(_, jobs)| jobs.len()).sum();
    assert_eq!(per_task, count_job_lines(&content));
    assert_eq!(per_task, log.tasks.job_count());
    assert_eq!(log.stats.job_lines as usize, per_task);

    let analysis = compute(&log).unwrap();
    assert_eq!(analysis.results.missed_deadlines.total, per_task);
}

/// A log without a kernel line is a format error.
#[test]
fn e2e_missing_kstats_is_format_error() {
    let result = analyse_file(&fixture("missing_kstats.log"), &config());
    assert!(
        matches!(
            result,
            Err(SchedScopeError::Format(FormatError::MissingKernelStats { .. }))
        ),
        "expected MissingKernelStats, got {result:?}"
    );
}

/// A task id with no job lines inside the range is an empty-data error.
#[test]
fn e2e_task_gap_is_empty_data_error() {
    let result = analyse_file(&fixture("task_gap.log"), &config());
    assert!(
        matches!(
            result,
            Err(SchedScopeError::EmptyData(EmptyDataError::TaskWithoutJobs { task_id: 1 }))
        ),
        "expected TaskWithoutJobs, got {result:?}"
    );
}

/// A header followed straight by the kernel line has zero tasks.
#[test]
fn e2e_header_without_jobs_is_empty_data_error() {
    let result = analyse_file(&fixture("header_only.log"), &config());
    assert!(
        matches!(result, Err(SchedScopeError::EmptyData(EmptyDataError::NoTasks))),
        "expected NoTasks, got {result:?}"
    );
}

/// A path that does not exist surfaces as an I/O error naming the path.
#[test]
fn e2e_nonexistent_file_is_io_error() {
    let path = fixture("does_not_exist.log");
    let err = analyse_file(&path, &config()).unwrap_err();
    assert!(matches!(err, SchedScopeError::Io { operation: "open", .. }));
    assert!(err.to_string().contains("does_not_exist.log"));
}

// =============================================================================
// Front ends and outputs
// =============================================================================

/// The CSV reader produces the same model as the plain-text reader.
#[test]
fn e2e_csv_reader_agrees_with_text_reader() {
    let path = fixture("multi_task.log");
    let text = parse_file(&path, &config()).unwrap();
    let csv = parse_file(
        &path,
        &ParseConfig {
            format: InputFormat::Csv,
        },
    )
    .unwrap();

    assert_eq!(text.tasks, csv.tasks);
    assert_eq!(text.kernel, csv.kernel);
}

/// Running the engine twice on one model gives identical results.
#[test]
fn e2e_statistics_are_deterministic() {
    let log = parse_file(&fixture("multi_task.log"), &config()).unwrap();
    let first = compute(&log).unwrap();
    let second = compute(&log).unwrap();
    assert_eq!(first, second);
    assert_eq!(render_lines(&first.results), render_lines(&second.results));
}

/// The console report prints every metric as "<name>: <value>".
#[test]
fn e2e_console_report() {
    let output = analyse_file(&fixture("multi_task.log"), &config()).unwrap();
    let mut buf = Vec::new();
    write_report(&output.analysis.results, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert!(text.contains("All deadlines were met: false\n"));
    assert!(text.contains("Missed deadlines: 1/7\n"));
    assert!(text.contains("Median wait per task (ms): [1.0, 4.0, 30.0]\n"));
    assert!(text.contains("Total context switches: 57\n"));
}

/// Exports written to disk parse back as the expected formats.
#[test]
fn e2e_export_json_and_csv() {
    let dir = tempfile::tempdir().unwrap();
    let output = analyse_file(&fixture("scenario_a.log"), &config()).unwrap();
    let report = Report::new(&output.analysis, output.parse, &output.source);

    let json_path = dir.path().join("stats.json");
    export_to_path(&report, ExportFormat::Json, &json_path).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["results"]["missed_deadlines"]["missed"], 0);
    assert_eq!(value["parse"]["job_lines"], 2);

    let csv_path = dir.path().join("stats.csv");
    export_to_path(&report, ExportFormat::Csv, &csv_path).unwrap();
    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 12);
    assert_eq!(&rows[1][0], "missed_deadlines");
    assert_eq!(&rows[1][1], "0/2");
}
