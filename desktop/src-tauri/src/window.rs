//! Main window creation and geometry persistence.

use crate::MAIN_WINDOW_LABEL;

use shell_sidecar::LifecycleController;
use shell_state::{WindowGeometry, WindowStateStore};

use std::sync::Arc;

use tauri::{
    AppHandle, Manager, PhysicalSize, WebviewUrl, WebviewWindow, WebviewWindowBuilder, WindowEvent,
};
use tracing::{info, warn};

const WINDOW_TITLE: &str = "Sidecar Shell";
const PAGE: &str = "index.html";

/// Create the main window at the persisted size and make sure the backend runs.
pub(crate) fn open_main_window(app: &AppHandle) -> tauri::Result<WebviewWindow> {
    let store = app.state::<Arc<WindowStateStore>>().inner().clone();
    let geometry = store.load();

    let window = WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, WebviewUrl::App(PAGE.into()))
        .title(WINDOW_TITLE)
        .inner_size(f64::from(geometry.width), f64::from(geometry.height))
        .build()?;

    info!("Created main window at {}x{}", geometry.width, geometry.height);

    track_geometry(&window, store);

    if let Some(lifecycle) = app.try_state::<Arc<LifecycleController>>() {
        let lifecycle = lifecycle.inner().clone();
        tauri::async_runtime::spawn(async move {
            lifecycle.on_window_created().await;
        });
    }

    Ok(window)
}

/// Bring the main window forward, re-creating it if it was closed.
pub(crate) fn focus_main_window(app: &AppHandle) {
    if let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) {
        window.unminimize().ok();
        window.show().ok();
        window.set_focus().ok();
        return;
    }

    if let Err(e) = open_main_window(app) {
        warn!("Failed to re-create main window: {e}");
    }
}

/// Resizes queue a debounced save; closing writes immediately.
fn track_geometry(window: &WebviewWindow, store: Arc<WindowStateStore>) {
    let tracked = window.clone();

    window.on_window_event(move |event| match event {
        WindowEvent::Resized(_) => {
            if tracked.is_minimized().unwrap_or(false) {
                return;
            }
            if let Some(geometry) = current_geometry(&tracked) {
                store.queue_save(geometry);
            }
        }
        WindowEvent::CloseRequested { .. } => {
            if tracked.is_minimized().unwrap_or(false) {
                return;
            }
            if let Some(geometry) = current_geometry(&tracked) {
                store.flush_save(geometry);
            }
        }
        _ => {}
    });
}

fn current_geometry(window: &WebviewWindow) -> Option<WindowGeometry> {
    let scale_factor = window.scale_factor().ok()?;
    let size = window.inner_size().ok()?;
    geometry_from_physical(size, scale_factor)
}

/// Persisted geometry is in logical pixels so it survives DPI changes.
pub(crate) fn geometry_from_physical(
    size: PhysicalSize<u32>,
    scale_factor: f64,
) -> Option<WindowGeometry> {
    let logical = size.to_logical::<f64>(scale_factor);
    WindowGeometry::from_logical(logical.width, logical.height)
}
