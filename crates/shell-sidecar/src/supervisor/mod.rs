pub(crate) mod command;
pub(crate) mod controller;
mod handle;
mod options;
pub(crate) mod output;
mod snapshot;
mod state;

pub use handle::ProcessSupervisor;
pub use options::SupervisorOptions;
pub use snapshot::BackendSnapshot;
pub use state::{StartOutcome, StopOutcome, SupervisorState};
