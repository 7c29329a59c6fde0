use tracing::debug;

use super::ThreadPool;
use crate::{Result, VarError};

/// A thread pool that uses the work stealing scheduler implemented by the [`rayon`]
/// library.
///
/// Connection handlers are long-running jobs, so the pool size bounds the number of
/// concurrently served clients the same way [`SharedQueueThreadPool`] does.
///
/// [`rayon`]: https://docs.rs/rayon/latest/rayon/index.html
/// [`SharedQueueThreadPool`]: super::SharedQueueThreadPool
pub struct RayonThreadPool {
    pool: rayon::ThreadPool,
}

impl ThreadPool for RayonThreadPool {
    fn new(threads: u32) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads as usize)
            .build()
            .map_err(|e| VarError::ThreadPool(format!("{:?}", e)))?;
        debug!("created rayon thread pool with {} threads", threads);

        Ok(Self { pool })
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.pool.spawn(job);
    }
}
