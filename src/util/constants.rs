// SchedScope - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "SchedScope";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "SchedScope";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Log format markers
// =============================================================================

/// First field of the job-section header line.
pub const JOB_HEADER_MARKER: &str = "task_id";

/// First field of the kernel counter line.
pub const KERNEL_LINE_MARKER: &str = "kstats";

/// Field separator used by both job and kernel lines.
pub const FIELD_SEPARATOR: char = ',';

/// Separator between key and value inside a kernel counter pair.
pub const KERNEL_PAIR_SEPARATOR: char = '=';

/// Number of fields a job record must carry.
pub const JOB_FIELD_COUNT: usize = 8;

/// Job record field names, in column order.
pub const JOB_FIELD_NAMES: [&str; JOB_FIELD_COUNT] = [
    "task_id",
    "job_id",
    "release_ms",
    "start_ms",
    "finish_ms",
    "deadline_ms",
    "critical",
    "deadline_met",
];

/// Kernel key holding the context switch counter.
pub const KSTAT_CONTEXT_SWITCHES: &str = "ctx";

/// Kernel key holding the preemption counter.
pub const KSTAT_PREEMPTIONS: &str = "preempt";

/// Kernel key holding the maximum ready queue depth.
pub const KSTAT_READYQ_MAX: &str = "readyq_max";

/// Kernel key holding the ready queue depth at halt.
pub const KSTAT_READYQ_CURRENT: &str = "readyq_cur";

// =============================================================================
// Parsing
// =============================================================================

/// Maximum length of a log line included in error messages and debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Console report
// =============================================================================

/// Banner printed above and below the statistics block.
pub const REPORT_BANNER: &str = "**********************************************";

/// Prompt shown when no input path is supplied on the command line.
pub const INPUT_PROMPT: &str = "Enter full file path: ";

// =============================================================================
// Chart window
// =============================================================================

/// Default chart window width in points.
pub const DEFAULT_WINDOW_WIDTH: f32 = 1100.0;

/// Default chart window height in points.
pub const DEFAULT_WINDOW_HEIGHT: f32 = 700.0;

/// Minimum user-configurable window dimension in points.
pub const MIN_WINDOW_DIMENSION: f32 = 400.0;

/// Maximum user-configurable window dimension in points.
pub const MAX_WINDOW_DIMENSION: f32 = 4_000.0;

/// Margin around the plot area inside a chart, in points.
pub const CHART_MARGIN: f32 = 48.0;

/// Number of tick labels drawn along each chart axis.
pub const CHART_AXIS_TICKS: usize = 5;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in config.toml.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
