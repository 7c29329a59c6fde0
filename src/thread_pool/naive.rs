use std::thread;

use super::ThreadPool;
use crate::Result;

/// A thread "pool" that is not actually a pool: every spawned job gets its own
/// detached thread, which lives until the job returns.
///
/// This is the connection model of the protocol itself (one thread per client, never
/// joined), so it is the server's default pool.
pub struct NaiveThreadPool;

impl ThreadPool for NaiveThreadPool {
    /// the thread count is ignored; there is no pool to size
    fn new(_threads: u32) -> Result<Self> {
        Ok(NaiveThreadPool)
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        thread::spawn(job);
    }
}
