//! Background flush worker.
//!
//! One dedicated thread drains a queue of delivery jobs in submission
//! order. Running every job on the same thread keeps flushes serialized,
//! so two batches are never delivered concurrently and snapshot saves
//! never interleave.

use parking_lot::{Condvar, Mutex};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, error, trace};

/// A unit of background work.
pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

/// Count of submitted jobs that have not finished.
#[derive(Debug, Default)]
pub(crate) struct Pending {
    count: Mutex<usize>,
    idle: Condvar,
}

impl Pending {
    pub(crate) fn get(&self) -> usize {
        *self.count.lock()
    }

    fn begin(&self) {
        *self.count.lock() += 1;
    }

    fn finish(&self) {
        let mut count = self.count.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.idle.notify_all();
        }
    }

    pub(crate) fn wait_idle(&self) {
        let mut count = self.count.lock();
        while *count > 0 {
            self.idle.wait(&mut count);
        }
    }

    pub(crate) fn wait_idle_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut count = self.count.lock();
        while *count > 0 {
            if self.idle.wait_until(&mut count, deadline).timed_out() {
                return *count == 0;
            }
        }
        true
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown"
    }
}

/// Serial executor for delivery jobs.
///
/// A job that panics is logged and counted as finished; the jobs queued
/// behind it still run.
pub(crate) struct FlushWorker {
    sender: Option<Sender<Job>>,
    handle: Option<JoinHandle<()>>,
    pending: Arc<Pending>,
}

impl FlushWorker {
    /// Spawns the worker thread.
    pub(crate) fn spawn(pending: Arc<Pending>) -> std::io::Result<Self> {
        let (sender, receiver) = mpsc::channel::<Job>();
        let thread_pending = Arc::clone(&pending);

        let handle = thread::Builder::new()
            .name("viewstats-flush".into())
            .spawn(move || {
                for job in receiver {
                    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
                        error!(reason = panic_reason(&*payload), "flush job panicked");
                    }
                    thread_pending.finish();
                }
                trace!("flush worker exiting");
            })?;

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
            pending,
        })
    }

    /// Queues `job`.
    ///
    /// If the worker is gone the job is handed back so the caller can run
    /// it inline; a submitted flush is always attempted at least once.
    pub(crate) fn submit(&self, job: Job) -> Result<(), Job> {
        let Some(sender) = &self.sender else {
            return Err(job);
        };

        self.pending.begin();
        match sender.send(job) {
            Ok(()) => Ok(()),
            Err(mpsc::SendError(job)) => {
                self.pending.finish();
                Err(job)
            }
        }
    }

    /// Stops accepting jobs, runs everything already queued, and joins the
    /// thread.
    pub(crate) fn shutdown(&mut self) {
        drop(self.sender.take());
        if let Some(handle) = self.handle.take() {
            let queued = self.pending.get();
            if queued > 0 {
                debug!(queued, "draining flush queue");
            }
            if handle.join().is_err() {
                error!("flush worker panicked");
            }
        }
    }
}

impl Drop for FlushWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
