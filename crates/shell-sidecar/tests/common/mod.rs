#![allow(dead_code)]

use shell_sidecar::{
    ExecutableResolver, ProcessSupervisor, RestartPolicy, SupervisorOptions, SupervisorState,
};

use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;
use tokio::runtime::Handle;
use tokio::sync::watch;

pub const SPAWN_LOG: &str = "spawns.log";
pub const ERROR_LOG: &str = "backend-error.log";
pub const WAIT_LIMIT: Duration = Duration::from_secs(10);

/// Records every spawn (one line holding PY_SERVER_PORT) and stays alive.
pub const LONG_RUNNING: &str = r#"echo "$PY_SERVER_PORT" >> spawns.log
exec sleep 30
"#;

/// Exits immediately with code 1 on every run.
pub const ALWAYS_CRASHES: &str = r#"echo "$PY_SERVER_PORT" >> spawns.log
exit 1
"#;

/// Exits with code 3 on its first run, then stays alive.
pub const CRASHES_ONCE: &str = r#"echo "$PY_SERVER_PORT" >> spawns.log
if [ ! -f crashed.marker ]; then
    touch crashed.marker
    exit 3
fi
exec sleep 30
"#;

/// A port nothing is listening on (bound then released).
pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

pub struct Backend {
    pub dir: TempDir,
    pub port: u16,
}

impl Backend {
    pub fn new(script: &str) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("backend.sh"), script).unwrap();

        Self {
            dir,
            port: free_port(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn options(&self, restart: RestartPolicy) -> SupervisorOptions {
        SupervisorOptions {
            host: String::from("127.0.0.1"),
            port: self.port,
            probe_timeout: Duration::from_millis(200),
            shutdown_path: String::from("/shutdown"),
            shutdown_timeout: Duration::from_millis(500),
            resolver: ExecutableResolver {
                executable_override: Some(PathBuf::from("sh")),
                app_dir: self.path().to_path_buf(),
                venv_dir: PathBuf::from("venv"),
                script: PathBuf::from("backend.sh"),
                port: self.port,
            },
            restart,
            error_log: Some(self.path().join("logs").join(ERROR_LOG)),
        }
    }

    pub fn supervisor(&self, restart: RestartPolicy) -> ProcessSupervisor {
        ProcessSupervisor::new(self.options(restart), &Handle::current())
    }

    /// Ports recorded by each spawned process, in spawn order.
    pub fn spawns(&self) -> Vec<String> {
        std::fs::read_to_string(self.path().join(SPAWN_LOG))
            .map(|contents| contents.lines().map(String::from).collect())
            .unwrap_or_default()
    }

    pub fn error_log(&self) -> String {
        std::fs::read_to_string(self.path().join("logs").join(ERROR_LOG)).unwrap_or_default()
    }
}

pub fn restart_after(delay: Duration) -> RestartPolicy {
    RestartPolicy {
        enabled: true,
        delay,
        max_attempts: None,
    }
}

pub async fn wait_for_state<F>(
    rx: &mut watch::Receiver<SupervisorState>,
    predicate: F,
) -> SupervisorState
where
    F: FnMut(&SupervisorState) -> bool,
{
    tokio::time::timeout(WAIT_LIMIT, rx.wait_for(predicate))
        .await
        .expect("timed out waiting for supervisor state")
        .expect("supervisor state channel closed")
        .clone()
}

pub async fn wait_until<F>(mut condition: F)
where
    F: FnMut() -> bool,
{
    tokio::time::timeout(WAIT_LIMIT, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
    })
    .await
    .expect("timed out waiting for condition");
}

#[cfg(unix)]
pub fn kill_backend(pid: u32) {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    kill(Pid::from_raw(pid as i32), Signal::SIGKILL).ok();
}

pub fn running_pid(state: &SupervisorState) -> Option<u32> {
    match state {
        SupervisorState::Running { pid, .. } => *pid,
        _ => None,
    }
}
