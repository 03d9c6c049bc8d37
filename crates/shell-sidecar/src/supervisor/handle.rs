use crate::supervisor::command::ControlCommand;
use crate::supervisor::controller::Controller;
use crate::supervisor::{
    BackendSnapshot, StartOutcome, StopOutcome, SupervisorOptions, SupervisorState,
};
use crate::{CONTROL_CHANNEL_CAPACITY, SupervisorError, SupervisorResult};

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot, watch};

/// Cloneable handle to the backend supervisor.
///
/// Construct once per application. All handles talk to the same
/// control task, which owns the process handle and restart timer and
/// runs until the last handle is dropped.
#[derive(Clone)]
pub struct ProcessSupervisor {
    commands: mpsc::Sender<ControlCommand>,
    state_rx: watch::Receiver<SupervisorState>,
}

impl ProcessSupervisor {
    pub fn new(options: SupervisorOptions, runtime: &Handle) -> Self {
        let (state_tx, state_rx) = watch::channel(SupervisorState::Idle);
        let (commands, command_rx) = mpsc::channel(CONTROL_CHANNEL_CAPACITY);

        let controller = Controller::new(options, state_tx, commands.downgrade());
        runtime.spawn(controller.run(command_rx));

        Self { commands, state_rx }
    }

    /// Make sure a backend is running.
    ///
    /// Idempotent: returns [`StartOutcome::AlreadyRunning`] while a spawned
    /// backend is live, and spawns nothing when the port already answers.
    pub async fn start(&self) -> SupervisorResult<StartOutcome> {
        let (reply, response) = oneshot::channel();
        self.send(ControlCommand::Start { reply }).await?;
        response
            .await
            .map_err(|_| SupervisorError::control_channel_closed())?
    }

    /// Cancel any pending restart, release the handle and request a graceful shutdown.
    ///
    /// Does not wait for the process to exit.
    pub async fn stop(&self) -> SupervisorResult<StopOutcome> {
        let (reply, response) = oneshot::channel();
        self.send(ControlCommand::Stop { reply }).await?;
        response
            .await
            .map_err(|_| SupervisorError::control_channel_closed())
    }

    pub async fn snapshot(&self) -> SupervisorResult<BackendSnapshot> {
        let (reply, response) = oneshot::channel();
        self.send(ControlCommand::Snapshot { reply }).await?;
        response
            .await
            .map_err(|_| SupervisorError::control_channel_closed())
    }

    /// Get current state.
    pub fn state(&self) -> SupervisorState {
        self.state_rx.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SupervisorState> {
        self.state_rx.clone()
    }

    async fn send(&self, command: ControlCommand) -> SupervisorResult<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| SupervisorError::control_channel_closed())
    }
}
