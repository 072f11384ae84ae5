//! Parallel stage execution using Rayon.
//!
//! A stage is an ordered list of independent tasks (filter tuples, or
//! filtered samples) evaluated against a read-only payload. The
//! [`WorkDistributor`] cuts the list into one contiguous chunk per
//! execution unit and merges the per-chunk buffers when every chunk is
//! done.
//!
//! # Thread Pool Configuration
//!
//! With `max_threads = 0` the global Rayon pool is used (one thread per
//! core). A positive value runs each stage on a dedicated pool of that
//! size.
//!
//! # Example
//!
//! ```ignore
//! use acquisition_study::parallel::{ParallelConfig, WorkDistributor};
//!
//! let distributor = WorkDistributor::new(ParallelConfig::default());
//! let doubled = distributor.run_chunked("double", &tasks, &(), |task, ()| Ok(Some(task * 2)))?;
//! ```

mod config;
mod executor;
mod progress;

pub use config::ParallelConfig;
pub use executor::WorkDistributor;
pub use progress::{Progress, ProgressTracker};
