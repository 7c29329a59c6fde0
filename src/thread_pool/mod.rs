//! This module provides the thread pool implementations that a [`VarServer`] can run
//! its connection handlers on.
//!
//! [`NaiveThreadPool`] is the default: it spawns one detached thread per connection,
//! matching the one-task-per-client model of the protocol. [`SharedQueueThreadPool`]
//! and [`RayonThreadPool`] bound the number of concurrent handler threads instead.
//!
//! [`VarServer`]: crate::VarServer

use crate::Result;

/// A trait for spawning connection handlers onto a pool of threads.
pub trait ThreadPool {
    /// Creates a new thread pool with the given number of `threads`.
    ///
    /// Implementations that do not keep a fixed set of threads may ignore the count.
    fn new(threads: u32) -> Result<Self>
    where
        Self: Sized;

    /// Spawns a job into the pool.
    ///
    /// The job runs asynchronously with respect to the caller; the pool is never
    /// joined on.
    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static;
}

mod naive;
mod rayon_pool;
mod shared_queue;

pub use self::naive::NaiveThreadPool;
pub use self::rayon_pool::RayonThreadPool;
pub use self::shared_queue::SharedQueueThreadPool;
