//! Forwarding of backend stdout/stderr into the log.

use crate::{BACKEND_LOG_TARGET, STDERR_RECORD_PREFIX};

use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

pub(crate) async fn forward_stdout<R>(stdout: R, generation: u64)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stdout);
    let mut buf = Vec::new();

    while let Some(line) = next_line(&mut reader, &mut buf, "stdout").await {
        info!(target: BACKEND_LOG_TARGET, generation, "{line}");
    }
}

/// Log each stderr line and append it to the error record, if configured.
pub(crate) async fn forward_stderr<R>(stderr: R, generation: u64, error_log: Option<PathBuf>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stderr);
    let mut buf = Vec::new();
    let mut record = ErrorRecord::new(error_log);

    while let Some(line) = next_line(&mut reader, &mut buf, "stderr").await {
        warn!(target: BACKEND_LOG_TARGET, generation, "{line}");
        record.append(&line).await;
    }
}

/// Read one raw line, decoding it lossily. `None` once the pipe is closed.
///
/// Bytes that are not UTF-8 are replaced rather than treated as an error,
/// so the pipe keeps being drained until the backend closes it.
pub(crate) async fn next_line<R>(
    reader: &mut BufReader<R>,
    buf: &mut Vec<u8>,
    stream: &str,
) -> Option<String>
where
    R: AsyncRead + Unpin,
{
    buf.clear();
    match reader.read_until(b'\n', buf).await {
        Ok(0) => None,
        Ok(_) => {
            let line = String::from_utf8_lossy(buf);
            Some(line.trim_end_matches(['\n', '\r']).to_owned())
        }
        Err(e) => {
            debug!("Backend {stream} closed: {e}");
            None
        }
    }
}

/// Lazily opened append-only file. Gives up after the first failure.
struct ErrorRecord {
    path: Option<PathBuf>,
    file: Option<File>,
}

impl ErrorRecord {
    fn new(path: Option<PathBuf>) -> Self {
        Self { path, file: None }
    }

    async fn append(&mut self, line: &str) {
        let Some(path) = self.path.clone() else {
            return;
        };

        if self.file.is_none() {
            match open_append(&path).await {
                Ok(file) => self.file = Some(file),
                Err(e) => {
                    warn!("Unable to open backend error log {}: {e}", path.display());
                    self.path = None;
                    return;
                }
            }
        }

        if let Some(file) = self.file.as_mut() {
            let entry = format!("{STDERR_RECORD_PREFIX} {line}\n");
            if let Err(e) = file.write_all(entry.as_bytes()).await {
                warn!("Unable to append to backend error log {}: {e}", path.display());
                self.path = None;
                self.file = None;
                return;
            }
            let _ = file.flush().await;
        }
    }
}

async fn open_append(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    OpenOptions::new().create(true).append(true).open(path).await
}
