//! Pushes supervisor state changes to the frontend.

use crate::EVENT_BACKEND_STATE_CHANGED;

use shell_sidecar::SupervisorState;

use tauri::{AppHandle, Emitter};
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub(crate) fn forward_state_changes(app: AppHandle, mut states: watch::Receiver<SupervisorState>) {
    tauri::async_runtime::spawn(async move {
        debug!("State subscription task started");

        while states.changed().await.is_ok() {
            let state = states.borrow_and_update().clone();
            info!("Emitting {EVENT_BACKEND_STATE_CHANGED}: {state:?}");

            if let Err(e) = app.emit(EVENT_BACKEND_STATE_CHANGED, &state) {
                warn!("Failed to emit {EVENT_BACKEND_STATE_CHANGED}: {e}");
            }
        }

        debug!("State subscription task finished");
    });
}
