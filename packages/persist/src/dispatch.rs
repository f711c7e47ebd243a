//! Background work with foreground completion.
//!
//! Async store operations make exactly one hop: the operation body runs on a
//! background worker, and the completion it produces runs on the foreground
//! context. `Dispatcher` abstracts the hop; `TokioDispatcher` is the
//! production implementation and `ForegroundQueue` is the foreground context
//! its completions are delivered to.

use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// A unit of foreground work.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// A unit of background work that yields the foreground job to run after it.
pub type Work = Box<dyn FnOnce() -> Job + Send + 'static>;

/// Schedules background work and delivers its completion to the foreground.
///
/// Implementations must run `work` off the calling thread and must run the
/// returned job exactly once, on the foreground context. Two dispatched works
/// may finish in any order.
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, work: Work);
}

/// The designated foreground context: a serial queue of jobs drained by the
/// thread that owns it.
///
/// Keep the queue on the thread that should observe completions (a UI or main
/// loop) and pass `handle()` to whatever posts to it.
pub struct ForegroundQueue {
    sender: mpsc::Sender<Job>,
    receiver: mpsc::Receiver<Job>,
}

impl ForegroundQueue {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// A cloneable handle for posting jobs to this queue.
    pub fn handle(&self) -> ForegroundHandle {
        ForegroundHandle {
            sender: self.sender.clone(),
        }
    }

    /// Run every job that is already queued. Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.receiver.try_recv() {
            job();
            ran += 1;
        }
        ran
    }

    /// Wait up to `timeout` for one job and run it. Returns whether a job ran.
    pub fn run_next(&self, timeout: Duration) -> bool {
        match self.receiver.recv_timeout(timeout) {
            Ok(job) => {
                job();
                true
            }
            Err(_) => false,
        }
    }

    /// Run jobs as they arrive until `done` returns true or `timeout` elapses.
    /// Returns the final value of `done`.
    pub fn run_until(&self, mut done: impl FnMut() -> bool, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while !done() {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            self.run_next(deadline - now);
        }
        true
    }
}

impl Default for ForegroundQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Posts jobs to a `ForegroundQueue` from any thread.
#[derive(Clone)]
pub struct ForegroundHandle {
    sender: mpsc::Sender<Job>,
}

impl ForegroundHandle {
    /// Queue `job`. Returns false if the queue has been dropped.
    pub fn post(&self, job: Job) -> bool {
        self.sender.send(job).is_ok()
    }
}

/// Runs work on tokio's blocking pool and posts completions to a foreground queue.
///
/// Dropping the dispatcher waits for work that is already running.
pub struct TokioDispatcher {
    runtime: tokio::runtime::Runtime,
    foreground: ForegroundHandle,
}

impl TokioDispatcher {
    pub fn new(foreground: ForegroundHandle) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(4)
            .thread_name("trunk-background")
            .build()?;

        Ok(Self {
            runtime,
            foreground,
        })
    }
}

impl Dispatcher for TokioDispatcher {
    fn dispatch(&self, work: Work) {
        let foreground = self.foreground.clone();
        self.runtime.spawn_blocking(move || {
            let job = work();
            if !foreground.post(job) {
                log::warn!("Foreground queue is gone; dropping completion");
            }
        });
    }
}
