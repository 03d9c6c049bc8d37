use crate::RestartPolicy;

use shell_config::RestartSettings;

use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::{eq, none, some};

fn policy(enabled: bool, max_attempts: Option<u32>) -> RestartPolicy {
    RestartPolicy {
        enabled,
        delay: Duration::from_millis(250),
        max_attempts,
    }
}

#[test]
fn given_default_settings_when_built_then_fixed_five_second_uncapped() {
    let policy = RestartPolicy::from_settings(&RestartSettings::default());

    assert_that!(policy.enabled, eq(true));
    assert_that!(policy.delay, eq(Duration::from_secs(5)));
    assert_that!(policy.max_attempts, none());
}

#[test]
fn given_uncapped_policy_when_many_attempts_then_same_delay_every_time() {
    let policy = policy(true, None);

    for attempts in [0, 1, 10, 1_000, u32::MAX] {
        assert_that!(policy.delay_for(attempts), some(eq(Duration::from_millis(250))));
    }
}

#[test]
fn given_cap_when_attempts_reach_cap_then_no_restart() {
    let policy = policy(true, Some(2));

    assert_that!(policy.delay_for(0), some(eq(Duration::from_millis(250))));
    assert_that!(policy.delay_for(1), some(eq(Duration::from_millis(250))));
    assert_that!(policy.delay_for(2), none());
    assert_that!(policy.delay_for(3), none());
}

#[test]
fn given_disabled_policy_when_asked_then_never_restarts() {
    let policy = policy(false, None);

    assert_that!(policy.delay_for(0), none());
}
