use crate::ShutdownAck;

use serde::Serialize;

/// Current state of the supervised backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SupervisorState {
    /// No backend and none wanted
    Idle,
    /// Probing the port or spawning
    Starting,
    /// Backend is up; `pid` is `None` for an instance we did not spawn
    Running { port: u16, pid: Option<u32> },
    /// Backend exited on its own, restart scheduled
    #[serde(rename_all = "camelCase")]
    Restarting { attempt: u32, delay_ms: u64 },
    /// Shutdown request in flight
    Stopping,
}

impl SupervisorState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// A backend was already running or starting
    AlreadyRunning,
    /// Something already listens on the backend port; nothing spawned
    ExternalInstance,
    /// A new backend process was spawned
    Spawned { pid: Option<u32> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    /// No spawned backend to stop (a pending restart, if any, was cancelled)
    NotRunning,
    /// Shutdown was requested and the handle released
    ShutdownRequested { ack: ShutdownAck },
}
