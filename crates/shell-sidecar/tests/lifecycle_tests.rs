#![cfg(unix)]

mod common;

use common::{Backend, LONG_RUNNING, kill_backend, restart_after};

use shell_sidecar::{LifecycleController, StartOutcome, StopOutcome};

use std::path::PathBuf;
use std::time::Duration;

use googletest::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DELAY: Duration = Duration::from_millis(300);

#[tokio::test(flavor = "multi_thread")]
async fn given_several_window_created_events_then_single_backend() {
    let backend = Backend::new(LONG_RUNNING);
    let controller = LifecycleController::new(backend.supervisor(restart_after(DELAY)));

    let first = controller.on_window_created().await;
    let second = controller.on_window_created().await;
    let third = controller.on_window_created().await;

    let Some(StartOutcome::Spawned { pid: Some(pid) }) = first else {
        panic!("expected the first window to spawn the backend, got {first:?}");
    };
    assert_eq!(second, Some(StartOutcome::AlreadyRunning));
    assert_eq!(third, Some(StartOutcome::AlreadyRunning));
    assert_that!(controller.windows_created(), eq(3));
    assert_that!(
        controller.supervisor().snapshot().await.unwrap().spawn_count,
        eq(1)
    );

    kill_backend(pid);
}

#[tokio::test(flavor = "multi_thread")]
async fn given_repeated_exit_events_then_single_shutdown_request() {
    let backend = Backend::new(LONG_RUNNING);
    let controller = LifecycleController::new(backend.supervisor(restart_after(DELAY)));

    let Some(StartOutcome::Spawned { pid: Some(pid) }) = controller.on_window_created().await
    else {
        panic!("expected a spawn");
    };

    let listener = std::net::TcpListener::bind(("127.0.0.1", backend.port)).unwrap();
    let control = MockServer::builder().listener(listener).start().await;
    Mock::given(method("POST"))
        .and(path("/shutdown"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&control)
        .await;

    let first = controller.on_exit_requested().await;
    let second = controller.on_exit_requested().await;
    let third = controller.on_exit_requested().await;

    assert!(matches!(first, Some(StopOutcome::ShutdownRequested { .. })));
    assert_eq!(second, None);
    assert_eq!(third, None);

    kill_backend(pid);
}

#[tokio::test(flavor = "multi_thread")]
async fn given_no_window_ever_created_when_exit_requested_then_not_running() {
    let backend = Backend::new(LONG_RUNNING);
    let controller = LifecycleController::new(backend.supervisor(restart_after(DELAY)));

    let outcome = controller.on_exit_requested().await;

    assert_eq!(outcome, Some(StopOutcome::NotRunning));
    assert_that!(controller.windows_created(), eq(0));
}

#[tokio::test(flavor = "multi_thread")]
async fn given_spawn_failure_when_window_created_then_logged_and_none() {
    let backend = Backend::new(LONG_RUNNING);
    let mut options = backend.options(restart_after(DELAY));
    options.resolver.executable_override = Some(PathBuf::from("/nonexistent/python"));
    let supervisor =
        shell_sidecar::ProcessSupervisor::new(options, &tokio::runtime::Handle::current());
    let controller = LifecycleController::new(supervisor);

    let outcome = controller.on_window_created().await;

    assert_eq!(outcome, None);
    assert_that!(controller.windows_created(), eq(1));
}
