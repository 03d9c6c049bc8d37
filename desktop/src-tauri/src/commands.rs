//! Tauri IPC commands for frontend communication.

use shell_sidecar::{BackendSnapshot, LifecycleController, SupervisorError};

use std::sync::Arc;

use tauri::State;

/// Get current backend status. Read-only: never starts or stops anything.
#[tauri::command]
pub async fn get_backend_status(
    lifecycle: State<'_, Arc<LifecycleController>>,
) -> Result<BackendSnapshot, String> {
    lifecycle
        .supervisor()
        .snapshot()
        .await
        .map_err(|e| describe_error(&e))
}

/// Error text shown to the frontend: the error plus what to do about it.
pub(crate) fn describe_error(error: &SupervisorError) -> String {
    format!("{error}. {}", error.recovery_hint())
}
