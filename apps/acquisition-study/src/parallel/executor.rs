//! Parallel work distributor using Rayon.

use std::sync::mpsc::Sender;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{Level, debug, info, span};

use super::config::ParallelConfig;
use super::progress::{Progress, ProgressTracker};
use crate::error::{Result, StudyError};

/// Splits an ordered task list into contiguous chunks, one per execution
/// unit, and runs a worker over every task against a read-only payload.
///
/// Each chunk writes into its own buffer; buffers are merged once every
/// chunk has finished. The first worker error aborts the stage.
#[derive(Debug, Clone)]
pub struct WorkDistributor {
    config: ParallelConfig,
    listener: Option<Sender<Progress>>,
}

impl WorkDistributor {
    /// Create a new distributor.
    #[must_use]
    pub const fn new(config: ParallelConfig) -> Self {
        Self {
            config,
            listener: None,
        }
    }

    /// Forward a progress snapshot to `listener` after every completed task.
    #[must_use]
    pub fn with_progress_listener(mut self, listener: Sender<Progress>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Get effective thread count.
    #[must_use]
    pub fn effective_thread_count(&self) -> usize {
        if self.config.max_threads > 0 {
            self.config.max_threads
        } else {
            rayon::current_num_threads()
        }
    }

    /// Chunk length giving one contiguous chunk per execution unit.
    #[must_use]
    pub fn chunk_size(&self, task_count: usize) -> usize {
        task_count
            .div_ceil(self.effective_thread_count().max(1))
            .max(1)
    }

    /// Run `worker` over every task.
    ///
    /// `worker` returns `Ok(None)` to drop a task's output. The order of the
    /// merged output is not part of the contract; results must identify
    /// their task themselves.
    ///
    /// # Errors
    ///
    /// Returns [`StudyError::StageFailed`] wrapping the first worker error,
    /// or [`StudyError::ThreadPool`] if a dedicated pool cannot be built.
    #[allow(clippy::cast_possible_truncation)]
    pub fn run_chunked<T, P, R, F>(
        &self,
        stage: &str,
        tasks: &[T],
        payload: &P,
        worker: F,
    ) -> Result<Vec<R>>
    where
        T: Sync,
        P: Sync + ?Sized,
        R: Send,
        F: Fn(&T, &P) -> Result<Option<R>> + Sync,
    {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        let mut tracker = ProgressTracker::new(tasks.len() as u64);
        if let Some(listener) = &self.listener {
            tracker = tracker.with_listener(listener.clone());
        }
        let chunk_size = self.chunk_size(tasks.len());
        let start_time = Instant::now();

        info!(
            "Starting stage '{}': {} tasks, {} threads, chunk size {}",
            stage,
            tasks.len(),
            self.effective_thread_count(),
            chunk_size
        );

        let buffers = if tasks.len() >= self.config.min_parallel_tasks {
            self.install(|| {
                tasks
                    .par_chunks(chunk_size)
                    .map(|chunk| self.run_chunk(stage, chunk, payload, &worker, &tracker))
                    .collect::<Result<Vec<Vec<R>>>>()
            })?
        } else {
            self.run_chunk(stage, tasks, payload, &worker, &tracker)
                .map(|buffer| vec![buffer])
        };

        let results: Vec<R> = buffers
            .map_err(|e| StudyError::StageFailed {
                stage: stage.to_string(),
                source: Box::new(e),
            })?
            .into_iter()
            .flatten()
            .collect();
        let elapsed = start_time.elapsed();
        let final_progress = tracker.progress();

        info!(
            "Stage '{}' complete: {}/{} tasks, {} results in {:.2}s ({:.1} tasks/s)",
            stage,
            final_progress.completed,
            final_progress.total,
            results.len(),
            elapsed.as_secs_f64(),
            final_progress.tasks_per_sec
        );

        Ok(results)
    }

    fn run_chunk<T, P, R, F>(
        &self,
        stage: &str,
        chunk: &[T],
        payload: &P,
        worker: &F,
        tracker: &ProgressTracker,
    ) -> Result<Vec<R>>
    where
        P: ?Sized,
        F: Fn(&T, &P) -> Result<Option<R>>,
    {
        let _span = span!(Level::DEBUG, "stage_chunk", stage, tasks = chunk.len()).entered();
        let mut buffer = Vec::with_capacity(chunk.len());

        for task in chunk {
            if let Some(result) = worker(task, payload)? {
                buffer.push(result);
            }

            let progress = tracker.task_completed();
            if self.config.track_progress {
                debug!(
                    "Progress: {:.1}% ({}/{}) - ETA: {}s",
                    progress.percentage(),
                    progress.completed,
                    progress.total,
                    progress.eta_secs
                );
            }
        }

        Ok(buffer)
    }

    /// Run `op` on a dedicated pool when a thread limit is configured,
    /// otherwise on the global pool.
    fn install<OP, R>(&self, op: OP) -> Result<R>
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        if self.config.max_threads == 0 {
            return Ok(op());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.max_threads)
            .build()
            .map_err(|e| StudyError::ThreadPool {
                message: e.to_string(),
            })?;
        Ok(pool.install(op))
    }
}

impl Default for WorkDistributor {
    fn default() -> Self {
        Self::new(ParallelConfig::default())
    }
}
