use std::thread;

use crossbeam::channel::{self, Receiver, Sender};
use tracing::{debug, error};

use super::ThreadPool;
use crate::Result;

/// A thread pool implemented with a shared job queue (i.e. a channel).
///
/// This implementation uses the MPMC [`channel`] provided by the crossbeam crate as a
/// single producer, multiple consumer queue: the pool itself is the producer and the
/// worker threads are the consumers. Each job is one connection handler, so the pool
/// size bounds how many clients are served concurrently; further connections queue.
///
/// If a job panics, the worker that ran it is replaced with a fresh thread, so a
/// panicking handler never shrinks the pool.
///
/// [`channel`]: https://docs.rs/crossbeam/0.8.1/crossbeam/channel/index.html
pub struct SharedQueueThreadPool {
    /// the sending half of the job queue
    tx: Sender<Box<dyn FnOnce() + Send + 'static>>,
}

impl ThreadPool for SharedQueueThreadPool {
    /// Creates the pool with `threads` worker threads, each holding a clone of the
    /// receiving half of the job queue.
    fn new(threads: u32) -> Result<Self> {
        let (tx, rx) = channel::unbounded::<Box<dyn FnOnce() + Send + 'static>>();
        for _ in 0..threads {
            let task_rx = TaskReceiver(rx.clone());
            thread::Builder::new().spawn(move || run_tasks(task_rx))?;
        }
        Ok(SharedQueueThreadPool { tx })
    }

    /// Queues a job for the next idle worker.
    ///
    /// # Panics
    ///
    /// Panics if every worker thread has exited, since then nothing holds the
    /// receiving half of the queue.
    fn spawn<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.tx
            .send(Box::new(job))
            .expect("there are no threads in the pool");
    }
}

/// The receiving half of the job queue, held by one worker thread.
///
/// Its `Drop` impl is what restarts a worker whose job panicked: unwinding drops the
/// receiver, and the drop hook spawns a replacement around a fresh clone of it.
#[derive(Clone)]
struct TaskReceiver(Receiver<Box<dyn FnOnce() + Send + 'static>>);

impl Drop for TaskReceiver {
    fn drop(&mut self) {
        if thread::panicking() {
            debug!("worker panicked, starting a replacement thread");
            let task_rx = self.clone();
            if let Err(e) = thread::Builder::new().spawn(move || run_tasks(task_rx)) {
                error!("failed to spawn a replacement thread: {}", e);
            }
        }
    }
}

/// worker loop: wait for a job on the queue and run it, until the pool is dropped
fn run_tasks(rx: TaskReceiver) {
    loop {
        match rx.0.recv() {
            Ok(task) => task(),
            Err(_) => {
                debug!("worker exiting because the thread pool was destroyed");
                break;
            }
        }
    }
}
