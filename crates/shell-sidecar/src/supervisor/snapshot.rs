use crate::supervisor::SupervisorState;

use serde::Serialize;

/// Read-only view of the supervisor for diagnostics and the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendSnapshot {
    pub state: SupervisorState,
    pub pid: Option<u32>,
    pub last_exit_code: Option<i32>,
    pub restart_attempts: u32,
    pub spawn_count: u64,
    pub desired_running: bool,
}
