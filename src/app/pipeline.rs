// SchedScope - app/pipeline.rs
//
// Orchestrates one run: parse the log, compute statistics.
// Runs to completion on the calling thread; nothing is shared between runs.

use crate::core::model::ParseStats;
use crate::core::parser::{self, ParseConfig};
use crate::core::stats::{self, Analysis};
use crate::util::error::Result;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Output of a successful run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// The analysed log file.
    pub source: PathBuf,
    pub parse: ParseStats,
    pub analysis: Analysis,
}

/// Parse `path` and derive the statistics.
///
/// Fails on unreadable input, malformed content, or empty task data. No
/// partial result is returned.
pub fn analyse_file(path: &Path, config: &ParseConfig) -> Result<RunOutput> {
    let started = Instant::now();

    let log = parser::parse_file(path, config)?;
    let analysis = stats::compute(&log)?;

    tracing::info!(
        path = %path.display(),
        tasks = log.tasks.task_count(),
        jobs = log.tasks.job_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Analysis complete"
    );

    Ok(RunOutput {
        source: path.to_path_buf(),
        parse: log.stats,
        analysis,
    })
}
