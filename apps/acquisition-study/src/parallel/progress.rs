//! Progress tracking for parallel stage execution.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Progress tracker for parallel execution.
///
/// Workers report each completed task; an optional listener receives a
/// snapshot per report. Sends never block and a dropped receiver is
/// ignored, so losing a message only affects the display.
#[derive(Debug)]
pub struct ProgressTracker {
    total_tasks: u64,
    completed_tasks: AtomicU64,
    start_time: Instant,
    listener: Option<Sender<Progress>>,
}

impl ProgressTracker {
    /// Create a new progress tracker.
    #[must_use]
    pub fn new(total_tasks: u64) -> Self {
        Self {
            total_tasks,
            completed_tasks: AtomicU64::new(0),
            start_time: Instant::now(),
            listener: None,
        }
    }

    /// Forward a snapshot to `listener` after every completed task.
    #[must_use]
    pub fn with_listener(mut self, listener: Sender<Progress>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Mark a task as completed and return the resulting snapshot.
    pub fn task_completed(&self) -> Progress {
        self.completed_tasks.fetch_add(1, Ordering::Relaxed);
        let progress = self.progress();
        if let Some(listener) = &self.listener {
            let _ = listener.send(progress.clone());
        }
        progress
    }

    /// Get current progress.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn progress(&self) -> Progress {
        let completed = self.completed_tasks.load(Ordering::Relaxed);
        let elapsed = self.start_time.elapsed();

        let tasks_per_sec = if elapsed.as_secs_f64() > 0.0 {
            completed as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        let remaining = self.total_tasks.saturating_sub(completed);
        let eta_secs = if tasks_per_sec > 0.0 {
            (remaining as f64 / tasks_per_sec) as u64
        } else {
            0
        };

        Progress {
            total: self.total_tasks,
            completed,
            elapsed_secs: elapsed.as_secs(),
            eta_secs,
            tasks_per_sec,
        }
    }
}

/// Progress snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    /// Total number of tasks.
    pub total: u64,
    /// Completed tasks.
    pub completed: u64,
    /// Elapsed time in seconds.
    pub elapsed_secs: u64,
    /// Estimated time remaining in seconds.
    pub eta_secs: u64,
    /// Tasks processed per second.
    pub tasks_per_sec: f64,
}

impl Progress {
    /// Get completion percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.completed as f64 / self.total as f64) * 100.0
        }
    }
}
