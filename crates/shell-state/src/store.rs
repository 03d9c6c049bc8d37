//! Window state store with last-writer-wins debouncing.

use crate::{StateError, StateResult, WindowGeometry};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Persists [`WindowGeometry`] to a single JSON file.
///
/// - `load` never fails; missing or malformed data yields the fallback geometry
/// - `queue_save` schedules a write after the quiet period, replacing any
///   write still waiting, so a burst of resizes produces one write
/// - `flush_save` cancels the pending write and writes immediately
///
/// Every write replaces the whole file via temp file + rename.
pub struct WindowStateStore {
    path: PathBuf,
    debounce: Duration,
    fallback: WindowGeometry,
    runtime: Handle,
    pending: Mutex<Option<JoinHandle<()>>>,
    tickets: AtomicU64,
    /// Ticket of the newest save on disk; held for the duration of a write.
    written: Arc<Mutex<u64>>,
    writes: Arc<AtomicU64>,
}

impl WindowStateStore {
    pub fn new(
        path: PathBuf,
        debounce: Duration,
        fallback: WindowGeometry,
        runtime: Handle,
    ) -> Self {
        Self {
            path,
            debounce,
            fallback,
            runtime,
            pending: Mutex::new(None),
            tickets: AtomicU64::new(0),
            written: Arc::new(Mutex::new(0)),
            writes: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted geometry, falling back to the default on any problem.
    pub fn load(&self) -> WindowGeometry {
        match read_geometry(&self.path) {
            Ok(Some(geometry)) => {
                debug!(
                    "Loaded window state {}x{} from {}",
                    geometry.width,
                    geometry.height,
                    self.path.display()
                );
                geometry
            }
            Ok(None) => {
                info!("No window state at {}, using default", self.path.display());
                self.fallback
            }
            Err(e) => {
                warn!("Unable to load window state: {e}");
                self.fallback
            }
        }
    }

    /// Schedule a write after the quiet period, replacing any pending write.
    pub fn queue_save(&self, geometry: WindowGeometry) {
        if !geometry.is_valid() {
            warn!(
                "Ignoring invalid window geometry {}x{}",
                geometry.width, geometry.height
            );
            return;
        }

        let ticket = self.next_ticket();
        let path = self.path.clone();
        let delay = self.debounce;
        let written = self.written.clone();
        let writes = self.writes.clone();

        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let write = tokio::task::spawn_blocking(move || {
                persist(&path, geometry, ticket, &written, &writes);
            });
            if let Err(e) = write.await {
                warn!("Window state write task failed: {e}");
            }
        });

        if let Some(previous) = self.pending_slot().replace(task) {
            previous.abort();
        }
    }

    /// Write immediately, cancelling any pending debounced write.
    ///
    /// An invalid geometry is ignored and leaves any pending write in place.
    pub fn flush_save(&self, geometry: WindowGeometry) {
        if !geometry.is_valid() {
            warn!(
                "Ignoring invalid window geometry {}x{}",
                geometry.width, geometry.height
            );
            return;
        }

        if let Some(previous) = self.pending_slot().take() {
            previous.abort();
        }

        let ticket = self.next_ticket();
        persist(&self.path, geometry, ticket, &self.written, &self.writes);
    }

    /// Number of writes that reached disk successfully.
    pub fn writes_completed(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    fn next_ticket(&self) -> u64 {
        self.tickets.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn pending_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for WindowStateStore {
    fn drop(&mut self) {
        if let Some(pending) = self.pending_slot().take() {
            pending.abort();
        }
    }
}

/// Write `geometry` unless a newer save already reached disk.
pub(crate) fn persist(
    path: &Path,
    geometry: WindowGeometry,
    ticket: u64,
    written: &Mutex<u64>,
    writes: &AtomicU64,
) {
    let mut newest = written.lock().unwrap_or_else(PoisonError::into_inner);
    if ticket < *newest {
        debug!("Skipping window state save {ticket}, save {} is newer", *newest);
        return;
    }

    match write_geometry(path, &geometry) {
        Ok(()) => {
            *newest = ticket;
            writes.fetch_add(1, Ordering::SeqCst);
            debug!(
                "Saved window state {}x{} to {}",
                geometry.width,
                geometry.height,
                path.display()
            );
        }
        Err(e) if e.is_transient() => {
            warn!("Unable to save window state, next save will retry: {e}")
        }
        Err(e) => error!("Unable to save window state: {e}"),
    }
}

/// Read the geometry record. `Ok(None)` means no file exists yet.
pub(crate) fn read_geometry(path: &Path) -> StateResult<Option<WindowGeometry>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents =
        fs::read_to_string(path).map_err(|e| StateError::file_read(path.to_path_buf(), e))?;

    WindowGeometry::from_json(&contents)
        .map(Some)
        .ok_or_else(|| {
            StateError::corrupted(
                path.to_path_buf(),
                "expected {\"width\": <int > 0>, \"height\": <int > 0>}",
            )
        })
}

/// Replace the geometry record atomically.
///
/// 1. Writes to a sibling temp file
/// 2. Syncs to disk
/// 3. Renames over the final path
pub(crate) fn write_geometry(path: &Path, geometry: &WindowGeometry) -> StateResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| StateError::file_write(parent.to_path_buf(), e))?;
    }

    let json = serde_json::to_string(geometry)?;

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    {
        let mut file =
            fs::File::create(&temp_path).map_err(|e| StateError::file_write(temp_path.clone(), e))?;

        file.write_all(json.as_bytes())
            .map_err(|e| StateError::file_write(temp_path.clone(), e))?;

        file.sync_all()
            .map_err(|e| StateError::file_write(temp_path.clone(), e))?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        StateError::atomic_rename(temp_path.clone(), path.to_path_buf(), e)
    })?;

    Ok(())
}
