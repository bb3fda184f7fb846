// SchedScope - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary between the parser, the
// statistics engine, and the presentation layers.

use serde::Serialize;
use std::collections::BTreeMap;

// =============================================================================
// Job record (one line of the job section)
// =============================================================================

/// One executed job as recorded by the test harness.
///
/// Timestamps are milliseconds since harness start. The harness writes
/// `release_ms <= start_ms <= finish_ms` for a correct scheduler, but this is
/// not enforced: a violation is an instrumentation signal that the statistics
/// surface rather than hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    /// Owning task (thread) id. Dense from 0.
    pub task_id: usize,

    /// Sequence number of this job within its task.
    pub job_id: u64,

    /// When the job became ready to run.
    pub release_ms: i64,

    /// When the job was first dispatched onto the CPU.
    pub start_ms: i64,

    /// When the job completed.
    pub finish_ms: i64,

    /// Absolute deadline.
    pub deadline_ms: i64,

    /// Whether the job belongs to the deadline-critical class.
    pub critical: bool,

    /// Whether the harness observed `finish_ms <= deadline_ms`. Trusted as given.
    pub deadline_met: bool,
}

impl JobRecord {
    /// Time spent ready but not executing. May be negative on a broken trace.
    ///
    /// Widened to `i128` so any pair of `i64` timestamps has an exact difference.
    pub fn wait_ms(&self) -> i128 {
        i128::from(self.start_ms) - i128::from(self.release_ms)
    }
}

// =============================================================================
// Kernel snapshot (the terminal `kstats` line)
// =============================================================================

/// Kernel scheduler counters captured once at the end of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct KernelSnapshot {
    pub context_switches: u64,
    pub preemptions: u64,
    /// Deepest the ready queue got during the run.
    pub ready_queue_max: u64,
    /// Ready queue depth when the counters were read.
    pub ready_queue_current: u64,
}

// =============================================================================
// Task jobs
// =============================================================================

/// Jobs grouped by task, keyed by task id.
///
/// Each task holds its jobs in log order. Only task ids that appear in the
/// log are stored, so a huge or skipped id costs nothing here; the
/// statistics engine checks that the ids form the dense range `0..N`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskJobs {
    tasks: BTreeMap<usize, Vec<JobRecord>>,
}

impl TaskJobs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a job to its task's sequence.
    pub fn push(&mut self, job: JobRecord) {
        self.tasks.entry(job.task_id).or_default().push(job);
    }

    /// Number of distinct task ids seen.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Total number of jobs across all tasks.
    pub fn job_count(&self) -> usize {
        self.tasks.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Jobs of one task, or `None` if the log never mentions it.
    pub fn jobs(&self, task_id: usize) -> Option<&[JobRecord]> {
        self.tasks.get(&task_id).map(Vec::as_slice)
    }

    /// Lowest task id below the highest seen that has no jobs, if any.
    pub fn first_missing_id(&self) -> Option<usize> {
        self.tasks
            .keys()
            .enumerate()
            .find(|&(expected, &id)| id != expected)
            .map(|(expected, _)| expected)
    }

    /// Iterate `(task_id, jobs)` in task id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[JobRecord])> {
        self.tasks.iter().map(|(&id, jobs)| (id, jobs.as_slice()))
    }
}

impl FromIterator<JobRecord> for TaskJobs {
    fn from_iter<I: IntoIterator<Item = JobRecord>>(iter: I) -> Self {
        let mut tasks = TaskJobs::new();
        for job in iter {
            tasks.push(job);
        }
        tasks
    }
}

// =============================================================================
// Parse output
// =============================================================================

/// Bookkeeping gathered while parsing, reported at debug level and exported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Lines consumed, including the kernel line.
    pub lines_read: u64,

    /// Job records accepted.
    pub job_lines: u64,

    /// Non-blank lines before the job header (console chatter).
    pub preamble_lines: u64,

    /// 1-based line number of the kernel line.
    pub kernel_line: u64,
}

/// Complete typed model of one harness log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLog {
    pub kernel: KernelSnapshot,
    pub tasks: TaskJobs,
    pub stats: ParseStats,
}
