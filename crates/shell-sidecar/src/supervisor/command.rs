use crate::supervisor::{BackendSnapshot, StartOutcome, StopOutcome};
use crate::SupervisorResult;

use tokio::sync::oneshot;

/// Messages processed serially by the control task.
///
/// Public operations carry a reply channel. Exit and timer
/// notifications come from tasks the control task spawned itself.
#[derive(Debug)]
pub(crate) enum ControlCommand {
    Start {
        reply: oneshot::Sender<SupervisorResult<StartOutcome>>,
    },
    Stop {
        reply: oneshot::Sender<StopOutcome>,
    },
    Snapshot {
        reply: oneshot::Sender<BackendSnapshot>,
    },
    Exited {
        generation: u64,
        exit_code: Option<i32>,
    },
    RestartDue {
        token: u64,
    },
}
