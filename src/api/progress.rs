//! Periodic progress logging for batch runs.
//!
//! The monitor runs on its own thread and wakes every `interval` to log how
//! many files are done and an estimate of the time remaining. It exits as soon
//! as it receives the stop signal, which `ProgressMonitor::stop` (or dropping
//! the monitor) sends when the batch finishes.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam::channel::{self, RecvTimeoutError, Sender};
use tracing::{info, warn};

use crate::error::Result;

/// Interval between progress lines when none is configured.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_secs(10);

/// Remaining time extrapolated from the mean time per completed file.
/// `None` until at least one file has completed.
pub fn estimate_remaining(completed: usize, total: usize, elapsed: Duration) -> Option<Duration> {
    if completed == 0 {
        return None;
    }
    let remaining = total.saturating_sub(completed);
    Some(elapsed.mul_f64(remaining as f64 / completed as f64))
}

pub struct ProgressMonitor {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressMonitor {
    /// Spawn the monitor thread. `completed` is incremented by the batch
    /// workers after every file, whatever its outcome.
    pub fn start(total: usize, completed: Arc<AtomicUsize>, interval: Duration) -> Result<Self> {
        let (stop_tx, stop_rx) = channel::bounded::<()>(1);
        let started = Instant::now();

        let handle = std::thread::Builder::new()
            .name("apkraster-progress".to_string())
            .spawn(move || {
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            let done = completed.load(Ordering::Relaxed);
                            match estimate_remaining(done, total, started.elapsed()) {
                                Some(eta) => info!(
                                    "Progress: {}/{} files, estimated time remaining: {}s",
                                    done,
                                    total,
                                    eta.as_secs()
                                ),
                                None => info!("Progress: {}/{} files", done, total),
                            }
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                info!(
                    "Progress monitor stopped: {}/{} files in {:.1}s",
                    completed.load(Ordering::Relaxed),
                    total,
                    started.elapsed().as_secs_f64()
                );
            })?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Signal the monitor thread and wait for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            // A full or disconnected channel both mean the thread will exit.
            let _ = tx.try_send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Progress monitor thread panicked");
            }
        }
    }
}

impl Drop for ProgressMonitor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
