// SchedScope - core/stats.rs
//
// Scheduling-quality statistics derived from a parsed harness log.
// Pure computation: no I/O, deterministic for a given model.

use crate::core::model::{JobRecord, ParsedLog};
use crate::util::error::EmptyDataError;
use serde::Serialize;
use std::fmt;

// =============================================================================
// Result types
// =============================================================================

/// A "missed out of total" deadline count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MissRatio {
    pub missed: usize,
    pub total: usize,
}

impl MissRatio {
    fn record(&mut self, job: &JobRecord) {
        self.total += 1;
        if !job.deadline_met {
            self.missed += 1;
        }
    }

    /// Jobs of this class that met their deadline.
    pub fn met(&self) -> usize {
        self.total - self.missed
    }
}

impl fmt::Display for MissRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.missed, self.total)
    }
}

/// The fixed set of derived metrics for one run.
///
/// Field order is the presentation order; see [`ResultSet::metrics`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    pub all_deadlines_met: bool,
    pub missed_deadlines: MissRatio,
    pub missed_critical_deadlines: MissRatio,
    pub missed_noncritical_deadlines: MissRatio,
    /// Pooled mean over every job of every task.
    pub average_wait_overall: f64,
    pub average_wait_per_task: Vec<f64>,
    /// Median of the per-task medians, not of the individual waits.
    pub median_wait_overall: f64,
    pub median_wait_per_task: Vec<f64>,
    pub ready_queue_max: u64,
    pub ready_queue_current: u64,
    pub total_preemptions: u64,
    pub total_context_switches: u64,
}

/// Value of one named metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue<'a> {
    Flag(bool),
    Ratio(MissRatio),
    Millis(f64),
    MillisPerTask(&'a [f64]),
    Count(u64),
}

/// One entry of the ordered result listing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric<'a> {
    /// Stable machine-readable key, used by exports.
    pub key: &'static str,
    /// Human-readable label, used by the console report and the GUI.
    pub label: &'static str,
    pub value: MetricValue<'a>,
}

impl ResultSet {
    /// All metrics in their fixed presentation order.
    pub fn metrics(&self) -> [Metric<'_>; 12] {
        use MetricValue::*;
        let m = |key, label, value| Metric { key, label, value };
        [
            m("all_deadlines_met", "All deadlines were met", Flag(self.all_deadlines_met)),
            m("missed_deadlines", "Missed deadlines", Ratio(self.missed_deadlines)),
            m(
                "missed_critical_deadlines",
                "Missed critical deadlines",
                Ratio(self.missed_critical_deadlines),
            ),
            m(
                "missed_noncritical_deadlines",
                "Missed non-critical deadlines",
                Ratio(self.missed_noncritical_deadlines),
            ),
            m("average_wait_overall", "Average wait time (ms)", Millis(self.average_wait_overall)),
            m(
                "average_wait_per_task",
                "Average wait per task (ms)",
                MillisPerTask(&self.average_wait_per_task),
            ),
            m("median_wait_overall", "Median wait time (ms)", Millis(self.median_wait_overall)),
            m(
                "median_wait_per_task",
                "Median wait per task (ms)",
                MillisPerTask(&self.median_wait_per_task),
            ),
            m("ready_queue_max", "Max tasks in ready queue", Count(self.ready_queue_max)),
            m(
                "ready_queue_current",
                "Tasks in ready queue at completion",
                Count(self.ready_queue_current),
            ),
            m("total_preemptions", "Total preemptions", Count(self.total_preemptions)),
            m(
                "total_context_switches",
                "Total context switches",
                Count(self.total_context_switches),
            ),
        ]
    }
}

/// One job's execution window, for the event timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JobInterval {
    pub start_ms: i64,
    pub finish_ms: i64,
    pub critical: bool,
    pub deadline_met: bool,
}

/// Per-task series consumed by the charts. Never printed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    /// `waits[task][job]`, in job order.
    pub waits: Vec<Vec<i128>>,
    /// `intervals[task][job]`, in job order.
    pub intervals: Vec<Vec<JobInterval>>,
}

/// Everything the engine derives from one parsed log.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub results: ResultSet,
    pub charts: ChartSeries,
}

// =============================================================================
// Engine
// =============================================================================

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median, averaging the two central values for even lengths.
/// `None` for an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Compute the result set and chart series for a parsed log.
///
/// Fails when the log has no tasks, or when any task id below the highest one
/// has no jobs. Every average and median below is over a non-empty set.
pub fn compute(log: &ParsedLog) -> Result<Analysis, EmptyDataError> {
    if log.tasks.is_empty() {
        return Err(EmptyDataError::NoTasks);
    }
    // Chart series are indexed by task id, so the ids must be exactly 0..N.
    if let Some(task_id) = log.tasks.first_missing_id() {
        return Err(EmptyDataError::TaskWithoutJobs { task_id });
    }

    let task_count = log.tasks.task_count();
    let mut missed = MissRatio::default();
    let mut missed_critical = MissRatio::default();
    let mut missed_noncritical = MissRatio::default();
    let mut wait_sum: i128 = 0;
    let mut negative_waits: usize = 0;
    let mut average_per_task = Vec::with_capacity(task_count);
    let mut median_per_task = Vec::with_capacity(task_count);
    let mut charts = ChartSeries {
        waits: Vec::with_capacity(task_count),
        intervals: Vec::with_capacity(task_count),
    };

    for (_, jobs) in log.tasks.iter() {
        let mut waits = Vec::with_capacity(jobs.len());
        let mut intervals = Vec::with_capacity(jobs.len());
        for job in jobs {
            let wait = job.wait_ms();
            if wait < 0 {
                negative_waits += 1;
            }
            wait_sum += wait;
            waits.push(wait);
            intervals.push(JobInterval {
                start_ms: job.start_ms,
                finish_ms: job.finish_ms,
                critical: job.critical,
                deadline_met: job.deadline_met,
            });

            missed.record(job);
            if job.critical {
                missed_critical.record(job);
            } else {
                missed_noncritical.record(job);
            }
        }

        let as_f64: Vec<f64> = waits.iter().map(|&w| w as f64).collect();
        // A task is only stored once it has a job.
        average_per_task.push(mean(&as_f64).unwrap_or_default());
        median_per_task.push(median(&as_f64).unwrap_or_default());

        charts.waits.push(waits);
        charts.intervals.push(intervals);
    }

    if negative_waits > 0 {
        tracing::warn!(
            jobs = negative_waits,
            "Jobs started before their release time; check the harness timestamps"
        );
    }

    let results = ResultSet {
        all_deadlines_met: missed.missed == 0,
        missed_deadlines: missed,
        missed_critical_deadlines: missed_critical,
        missed_noncritical_deadlines: missed_noncritical,
        average_wait_overall: wait_sum as f64 / missed.total as f64,
        average_wait_per_task: average_per_task,
        median_wait_overall: median(&median_per_task).unwrap_or_default(),
        median_wait_per_task: median_per_task,
        ready_queue_max: log.kernel.ready_queue_max,
        ready_queue_current: log.kernel.ready_queue_current,
        total_preemptions: log.kernel.preemptions,
        total_context_switches: log.kernel.context_switches,
    };

    tracing::debug!(
        tasks = task_count,
        jobs = missed.total,
        missed = missed.missed,
        "Statistics computed"
    );

    Ok(Analysis { results, charts })
}
