// SchedScope - app/state.rs
//
// Chart window state. Holds the finished analysis plus view selections.
// Owned by the eframe::App implementation.

use crate::core::stats::Analysis;
use std::path::PathBuf;

/// Which chart the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartView {
    /// Wait time per job, one line per task.
    #[default]
    WaitTimes,
    /// Job execution windows per task.
    Timeline,
}

impl ChartView {
    pub fn title(&self) -> &'static str {
        match self {
            ChartView::WaitTimes => "Wait time for each job in each task",
            ChartView::Timeline => "Overview of events",
        }
    }
}

/// Top-level chart window state.
#[derive(Debug)]
pub struct AppState {
    /// File the analysis came from (shown in the title and status bar).
    pub source: PathBuf,

    pub analysis: Analysis,

    pub view: ChartView,

    /// Per-task visibility, indexed by task id.
    pub task_visible: Vec<bool>,

    pub show_legend: bool,

    pub show_about: bool,
}

impl AppState {
    pub fn new(source: PathBuf, analysis: Analysis) -> Self {
        let tasks = analysis.charts.waits.len();
        Self {
            source,
            analysis,
            view: ChartView::default(),
            task_visible: vec![true; tasks],
            show_legend: true,
            show_about: false,
        }
    }

    pub fn task_count(&self) -> usize {
        self.task_visible.len()
    }

    pub fn is_task_visible(&self, task_id: usize) -> bool {
        self.task_visible.get(task_id).copied().unwrap_or(false)
    }

    /// Show every task, or hide every task if all are already shown.
    pub fn toggle_all_tasks(&mut self) {
        let show = !self.task_visible.iter().all(|v| *v);
        self.task_visible.iter_mut().for_each(|v| *v = show);
    }

    /// Ids of the tasks currently drawn.
    pub fn visible_tasks(&self) -> impl Iterator<Item = usize> + '_ {
        self.task_visible
            .iter()
            .enumerate()
            .filter_map(|(id, visible)| visible.then_some(id))
    }

    /// Status bar text.
    pub fn status_line(&self) -> String {
        let r = &self.analysis.results;
        format!(
            "{} | {} tasks | missed {} | {} of {} tasks shown",
            self.source.display(),
            self.task_count(),
            r.missed_deadlines,
            self.visible_tasks().count(),
            self.task_count()
        )
    }
}
