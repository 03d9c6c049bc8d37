//! SIGINT/SIGTERM handling: stop the backend, then exit.

use crate::stop_backend;

use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use tauri::AppHandle;
use tracing::{error, info};

pub(crate) fn install(app: AppHandle) {
    std::thread::spawn(move || {
        let mut signals = match Signals::new([SIGINT, SIGTERM]) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to register signal handlers: {e}");
                return;
            }
        };

        if let Some(sig) = signals.forever().next() {
            info!("Received signal {sig}, shutting down...");
            stop_backend(&app);
            std::process::exit(0);
        }
    });
}
