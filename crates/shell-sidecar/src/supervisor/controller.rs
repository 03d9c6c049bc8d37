//! The control task: sole owner of the backend handle.
//!
//! Every state change happens while processing one [`ControlCommand`],
//! so a stop and an exit can never interleave halfway.

use crate::supervisor::command::ControlCommand;
use crate::supervisor::{
    BackendSnapshot, StartOutcome, StopOutcome, SupervisorOptions, SupervisorState, output,
};
use crate::{LaunchPlan, PortProbe, ShutdownCoordinator, SupervisorError, SupervisorResult};

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartTrigger {
    Request,
    Restart,
}

/// The spawned process we are responsible for.
struct LiveBackend {
    generation: u64,
    pid: Option<u32>,
}

struct PendingRestart {
    attempt: u32,
    /// Unique per scheduled restart, unlike `attempt` which resets on start.
    token: u64,
    timer: JoinHandle<()>,
}

pub(crate) struct Controller {
    options: SupervisorOptions,
    shutdown: ShutdownCoordinator,
    state_tx: watch::Sender<SupervisorState>,
    commands: mpsc::WeakSender<ControlCommand>,
    live: Option<LiveBackend>,
    pending_restart: Option<PendingRestart>,
    restart_tokens: u64,
    generation: u64,
    desired_running: bool,
    last_exit_code: Option<i32>,
    restart_attempts: u32,
    spawn_count: u64,
}

impl Controller {
    pub(crate) fn new(
        options: SupervisorOptions,
        state_tx: watch::Sender<SupervisorState>,
        commands: mpsc::WeakSender<ControlCommand>,
    ) -> Self {
        let shutdown = ShutdownCoordinator::new(
            &options.host,
            options.port,
            &options.shutdown_path,
            options.shutdown_timeout,
        );

        Self {
            options,
            shutdown,
            state_tx,
            commands,
            live: None,
            pending_restart: None,
            restart_tokens: 0,
            generation: 0,
            desired_running: false,
            last_exit_code: None,
            restart_attempts: 0,
            spawn_count: 0,
        }
    }

    /// Process commands until every [`ProcessSupervisor`](crate::ProcessSupervisor) handle is dropped.
    pub(crate) async fn run(mut self, mut commands: mpsc::Receiver<ControlCommand>) {
        debug!("Supervisor control task started");

        while let Some(command) = commands.recv().await {
            self.handle(command).await;
        }

        self.cancel_pending_restart();
        debug!("Supervisor control task finished");
    }

    async fn handle(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::Start { reply } => {
                let result = self.start(StartTrigger::Request).await;
                let _ = reply.send(result);
            }
            ControlCommand::Stop { reply } => {
                let outcome = self.stop().await;
                let _ = reply.send(outcome);
            }
            ControlCommand::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            ControlCommand::Exited {
                generation,
                exit_code,
            } => self.on_exited(generation, exit_code),
            ControlCommand::RestartDue { token } => self.on_restart_due(token).await,
        }
    }

    async fn start(&mut self, trigger: StartTrigger) -> SupervisorResult<StartOutcome> {
        if self.live.is_some() {
            debug!("Backend already running, start ignored");
            return Ok(StartOutcome::AlreadyRunning);
        }

        // An explicit start while a restart is pending pulls the restart forward.
        let pulled_forward = self.cancel_pending_restart();
        if trigger == StartTrigger::Request && !pulled_forward {
            self.restart_attempts = 0;
        }

        self.desired_running = true;
        self.set_state(SupervisorState::Starting);

        let (host, port) = (self.options.host.as_str(), self.options.port);
        if PortProbe::is_reachable(host, port, self.options.probe_timeout).await {
            info!("Port {port} on {host} already in use, assuming an external backend");
            self.set_state(SupervisorState::Running { port, pid: None });
            return Ok(StartOutcome::ExternalInstance);
        }

        let plan = self.options.resolver.plan();
        match self.spawn(plan) {
            Ok(pid) => Ok(StartOutcome::Spawned { pid }),
            Err(e) => {
                error!("{e}");
                self.desired_running = false;
                self.set_state(SupervisorState::Idle);
                Err(e)
            }
        }
    }

    fn spawn(&mut self, plan: LaunchPlan) -> SupervisorResult<Option<u32>> {
        info!(
            "Spawning backend: {} {} (cwd {})",
            plan.program.display(),
            plan.argument.display(),
            plan.working_dir.display()
        );

        let mut child = Command::new(&plan.program)
            .arg(&plan.argument)
            .current_dir(&plan.working_dir)
            .envs(plan.env.iter().map(|(key, value)| (key, value)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SupervisorError::spawn_failure(plan.program.clone(), e))?;

        self.generation += 1;
        self.spawn_count += 1;
        let generation = self.generation;
        let pid = child.id();

        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(output::forward_stdout(stdout, generation));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(output::forward_stderr(
                stderr,
                generation,
                self.options.error_log.clone(),
            ));
        }

        let commands = self.commands.clone();
        tokio::spawn(async move {
            let exit_code = match child.wait().await {
                Ok(status) => status.code(),
                Err(e) => {
                    warn!("Failed to wait for backend generation {generation}: {e}");
                    None
                }
            };

            if let Some(commands) = commands.upgrade() {
                let _ = commands
                    .send(ControlCommand::Exited {
                        generation,
                        exit_code,
                    })
                    .await;
            }
        });

        info!("Spawned backend with PID {pid:?} (generation {generation})");

        self.live = Some(LiveBackend { generation, pid });
        self.set_state(SupervisorState::Running {
            port: self.options.port,
            pid,
        });

        Ok(pid)
    }

    async fn stop(&mut self) -> StopOutcome {
        // Disarm first so nothing below can schedule another restart.
        self.desired_running = false;
        self.cancel_pending_restart();

        let Some(live) = self.live.take() else {
            debug!("No spawned backend to stop");
            self.set_state(SupervisorState::Idle);
            return StopOutcome::NotRunning;
        };

        info!(
            "Stopping backend PID {:?} (generation {}) via {}",
            live.pid,
            live.generation,
            self.shutdown.url()
        );
        self.set_state(SupervisorState::Stopping);

        let ack = self.shutdown.request_shutdown().await;

        self.set_state(SupervisorState::Idle);
        StopOutcome::ShutdownRequested { ack }
    }

    fn on_exited(&mut self, generation: u64, exit_code: Option<i32>) {
        let is_live = self
            .live
            .as_ref()
            .is_some_and(|live| live.generation == generation);

        if !is_live {
            debug!(
                "Ignoring exit of released backend generation {generation} (code {exit_code:?})"
            );
            return;
        }

        self.live = None;
        self.last_exit_code = exit_code;
        warn!("Backend exited unexpectedly with code {exit_code:?}");

        if !self.desired_running {
            self.set_state(SupervisorState::Idle);
            return;
        }

        let Some(delay) = self.options.restart.delay_for(self.restart_attempts) else {
            warn!(
                "Backend will not be restarted (restart disabled or {} attempts used)",
                self.restart_attempts
            );
            self.desired_running = false;
            self.set_state(SupervisorState::Idle);
            return;
        };

        self.restart_attempts += 1;
        let attempt = self.restart_attempts;
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        info!("Attempting to restart backend in {delay_ms}ms (attempt {attempt})");

        self.restart_tokens += 1;
        let token = self.restart_tokens;
        self.pending_restart = Some(PendingRestart {
            attempt,
            token,
            timer: self.schedule_restart(token, delay),
        });
        self.set_state(SupervisorState::Restarting { attempt, delay_ms });
    }

    fn schedule_restart(&self, token: u64, delay: Duration) -> JoinHandle<()> {
        let commands = self.commands.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            if let Some(commands) = commands.upgrade() {
                let _ = commands.send(ControlCommand::RestartDue { token }).await;
            }
        })
    }

    async fn on_restart_due(&mut self, token: u64) {
        let attempt = match &self.pending_restart {
            Some(pending) if pending.token == token => pending.attempt,
            _ => {
                debug!("Ignoring cancelled restart {token}");
                return;
            }
        };

        self.pending_restart = None;

        match self.start(StartTrigger::Restart).await {
            Ok(outcome) => info!("Restart attempt {attempt}: {outcome:?}"),
            Err(e) => error!("Restart attempt {attempt} failed: {e}"),
        }
    }

    /// Abort a scheduled restart. Returns whether one was pending.
    fn cancel_pending_restart(&mut self) -> bool {
        match self.pending_restart.take() {
            Some(pending) => {
                pending.timer.abort();
                info!("Cancelled pending restart attempt {}", pending.attempt);
                true
            }
            None => false,
        }
    }

    fn snapshot(&self) -> BackendSnapshot {
        BackendSnapshot {
            state: self.state_tx.borrow().clone(),
            pid: self.live.as_ref().and_then(|live| live.pid),
            last_exit_code: self.last_exit_code,
            restart_attempts: self.restart_attempts,
            spawn_count: self.spawn_count,
            desired_running: self.desired_running,
        }
    }

    fn set_state(&self, state: SupervisorState) {
        debug!("Supervisor state -> {state:?}");
        self.state_tx.send_replace(state);
    }
}
