//! Backend sidecar supervision.
//!
//! Decides whether a backend is already reachable, spawns it when it is not,
//! restarts it after unexpected exits and asks it to shut down over HTTP.

mod error;
mod launch;
mod lifecycle;
mod probe;
mod restart_policy;
mod shutdown;
mod supervisor;

pub use error::{SupervisorError, SupervisorResult};
pub use launch::{ExecutableResolver, LaunchPlan};
pub use lifecycle::LifecycleController;
pub use probe::{PortProbe, ProbeOutcome};
pub use restart_policy::RestartPolicy;
pub use shutdown::{ShutdownAck, ShutdownCoordinator};
pub use supervisor::{
    BackendSnapshot, ProcessSupervisor, StartOutcome, StopOutcome, SupervisorOptions,
    SupervisorState,
};

#[cfg(test)]
mod tests;

/// Log target for lines forwarded from the backend's stdout/stderr.
pub const BACKEND_LOG_TARGET: &str = "backend";

const CONTROL_CHANNEL_CAPACITY: usize = 32;
const STDERR_RECORD_PREFIX: &str = "backend stderr:";

#[cfg(windows)]
const VENV_INTERPRETER: [&str; 2] = ["Scripts", "python.exe"];
#[cfg(not(windows))]
const VENV_INTERPRETER: [&str; 2] = ["bin", "python3"];

#[cfg(windows)]
const SYSTEM_INTERPRETER: &str = "python";
#[cfg(not(windows))]
const SYSTEM_INTERPRETER: &str = "python3";
