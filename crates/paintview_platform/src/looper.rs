//! UI-thread message loop
//!
//! A [`MainLooper`] is prepared on the thread that owns the UI. Any thread can
//! hold a [`MainThread`] handle to post work onto it or to run a closure there
//! and wait for the result.

use std::cell::Cell;
use std::marker::PhantomData;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, ThreadId};

use crate::error::{PlatformError, Result};

type Job = Box<dyn FnOnce() + Send + 'static>;

enum Envelope {
    Run(Job),
    Quit,
}

/// The UI thread's job queue.
///
/// Not `Send`: it stays on the thread that prepared it.
pub struct MainLooper {
    rx: Receiver<Envelope>,
    main: MainThread,
    /// Set when `run_pending` stops at a quit request
    quit_pending: Cell<bool>,
    _not_send: PhantomData<*const ()>,
}

impl MainLooper {
    /// Prepare a looper for the calling thread
    pub fn prepare() -> Self {
        let (tx, rx) = mpsc::channel();
        let main = MainThread {
            tx,
            thread: thread::current().id(),
        };
        tracing::debug!(thread = ?main.thread, "main looper prepared");
        Self {
            rx,
            main,
            quit_pending: Cell::new(false),
            _not_send: PhantomData,
        }
    }

    /// A handle other threads use to reach this looper
    pub fn handle(&self) -> MainThread {
        self.main.clone()
    }

    /// Run jobs until [`MainThread::quit`] is called
    pub fn run(&self) {
        if self.quit_pending.replace(false) {
            tracing::debug!("main looper stopped");
            return;
        }
        while let Ok(envelope) = self.rx.recv() {
            match envelope {
                Envelope::Run(job) => job(),
                Envelope::Quit => break,
            }
        }
        tracing::debug!("main looper stopped");
    }

    /// Run every queued job without blocking; returns how many ran.
    ///
    /// A pending quit request stops the drain early and stays pending, so
    /// the next [`run`](Self::run) returns without blocking.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        if self.quit_pending.get() {
            return ran;
        }
        loop {
            match self.rx.try_recv() {
                Ok(Envelope::Run(job)) => {
                    job();
                    ran += 1;
                }
                Ok(Envelope::Quit) => {
                    self.quit_pending.set(true);
                    return ran;
                }
                Err(_) => return ran,
            }
        }
    }
}

impl std::fmt::Debug for MainLooper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainLooper")
            .field("thread", &self.main.thread)
            .finish()
    }
}

/// Cloneable, thread-safe handle to the UI thread
#[derive(Clone)]
pub struct MainThread {
    tx: Sender<Envelope>,
    thread: ThreadId,
}

impl std::fmt::Debug for MainThread {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MainThread")
            .field("thread", &self.thread)
            .finish()
    }
}

impl MainThread {
    /// Whether the caller is running on the UI thread
    pub fn is_current(&self) -> bool {
        thread::current().id() == self.thread
    }

    /// Queue `job` to run on the UI thread
    pub fn post(&self, job: impl FnOnce() + Send + 'static) -> Result<()> {
        self.tx
            .send(Envelope::Run(Box::new(job)))
            .map_err(|_| PlatformError::LooperGone)
    }

    /// Run `f` on the UI thread and wait for its result.
    ///
    /// Runs inline when already on the UI thread. Otherwise the call blocks
    /// until the looper gets to it, with no timeout.
    pub fn send_blocking<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce() -> R + Send + 'static,
    {
        if self.is_current() {
            return Ok(f());
        }
        let (reply_tx, reply_rx) = mpsc::sync_channel(1);
        self.post(move || {
            // the caller may have given up; nothing to do then
            let _ = reply_tx.send(f());
        })?;
        reply_rx.recv().map_err(|_| PlatformError::NoReply)
    }

    /// Ask [`MainLooper::run`] to return after the jobs queued so far
    pub fn quit(&self) -> Result<()> {
        self.tx
            .send(Envelope::Quit)
            .map_err(|_| PlatformError::LooperGone)
    }
}
