//! Wires window creation and application exit to the supervisor.

use crate::{ProcessSupervisor, StartOutcome, StopOutcome};

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use tracing::{error, info};

/// The only caller of the supervisor's start/stop operations.
///
/// Window creation may happen any number of times; the supervisor's
/// idempotent start keeps it to one backend. Exit handling runs once.
pub struct LifecycleController {
    supervisor: ProcessSupervisor,
    windows_created: AtomicU32,
    exit_handled: AtomicBool,
}

impl LifecycleController {
    pub fn new(supervisor: ProcessSupervisor) -> Self {
        Self {
            supervisor,
            windows_created: AtomicU32::new(0),
            exit_handled: AtomicBool::new(false),
        }
    }

    pub fn supervisor(&self) -> &ProcessSupervisor {
        &self.supervisor
    }

    pub fn windows_created(&self) -> u32 {
        self.windows_created.load(Ordering::SeqCst)
    }

    /// Start the backend for a newly created window. Failures are logged.
    pub async fn on_window_created(&self) -> Option<StartOutcome> {
        let count = self.windows_created.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Window created ({count} so far), ensuring backend is running");

        match self.supervisor.start().await {
            Ok(outcome) => {
                info!("Backend start: {outcome:?}");
                Some(outcome)
            }
            Err(e) => {
                error!("Failed to start backend: {e} ({})", e.recovery_hint());
                None
            }
        }
    }

    /// Stop the backend on application exit.
    ///
    /// Only the first call does anything; repeats return `None`.
    pub async fn on_exit_requested(&self) -> Option<StopOutcome> {
        if self.exit_handled.swap(true, Ordering::SeqCst) {
            info!("Exit already handled, skipping backend stop");
            return None;
        }

        info!("Application exiting, stopping backend");
        match self.supervisor.stop().await {
            Ok(outcome) => {
                info!("Backend stop: {outcome:?}");
                Some(outcome)
            }
            Err(e) => {
                error!("Failed to stop backend: {e}");
                None
            }
        }
    }
}
