use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use crate::debugger::{ExecStatus, ExecutionEngine};

/// Reported by a background run when it stops on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunEvent {
    pub status: ExecStatus,
    pub pc: u32,
    pub steps: usize,
}

/// Handle to an engine stepping on a worker thread.
pub struct Worker {
    cancel: Arc<AtomicBool>,
    events: Receiver<RunEvent>,
    handle: Option<JoinHandle<()>>,
}

/// Step `engine` on a new thread until it traps, exits, runs `budget` steps
/// or is cancelled.
pub fn spawn_run<E>(engine: Arc<Mutex<E>>, budget: Option<usize>) -> Worker
where
    E: ExecutionEngine + 'static,
{
    let cancel = Arc::new(AtomicBool::new(false));
    let (tx, rx) = channel();
    let flag = cancel.clone();

    let handle = thread::spawn(move || {
        debug!("execution thread started");
        let mut steps = 0usize;
        while !flag.load(Ordering::Relaxed) {
            let (status, pc) = {
                let mut engine = engine.lock().unwrap_or_else(|e| e.into_inner());
                let status = engine.step();
                (status, engine.pc())
            };
            steps += 1;

            let exhausted = budget.is_some_and(|b| steps >= b);
            if status.stops_run() || exhausted {
                if tx.send(RunEvent { status, pc, steps }).is_err() {
                    warn!("run finished after the session was dropped");
                }
                break;
            }
        }
        debug!("execution thread exiting after {} step(s)", steps);
    });

    Worker {
        cancel,
        events: rx,
        handle: Some(handle),
    }
}

impl Worker {
    /// Non-blocking check for the stop event.
    pub fn try_event(&self) -> Option<RunEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Block until the run stops; `None` if it was cancelled.
    pub fn wait(&self) -> Option<RunEvent> {
        self.events.recv().ok()
    }

    /// Ask the thread to stop and wait for it.
    pub fn cancel(mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        self.join();
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("execution thread panicked");
            }
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        self.join();
    }
}
