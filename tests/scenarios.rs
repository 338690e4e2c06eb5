//! End-to-end scenarios for the event driver and simulator.

use posture::core::PostureState;
use posture::driver::{DriverEvent, EventDriver, TransitionOutcome};
use posture::simulation::{AttackStatus, Simulator};
use posture::snapshot::DiagramSnapshot;
use posture::stimulus::ScriptedStimulus;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

#[test]
fn low_severity_from_normal_becomes_suspicious() {
    let mut driver = EventDriver::posture();

    let outcome = driver.report_severity(1);

    assert!(outcome.is_accepted());
    assert_eq!(driver.current_state(), PostureState::Suspicious);
    assert_eq!(driver.transition_count(), 1);
}

#[test]
fn blocked_severity_from_suspicious_has_no_direct_path() {
    let mut driver = EventDriver::posture();
    driver.report_severity(1);

    let outcome = driver.report_severity(4);

    assert_eq!(
        outcome,
        TransitionOutcome::Rejected {
            from: PostureState::Suspicious,
            requested: PostureState::Blocked,
        }
    );
    assert_eq!(driver.current_state(), PostureState::Suspicious);
    assert_eq!(driver.transition_count(), 1);
}

#[test]
fn selecting_blocked_from_alert_is_critical() {
    let mut driver = EventDriver::posture();
    for level in [1, 2, 3] {
        assert!(driver.report_severity(level).is_accepted());
    }
    assert_eq!(driver.current_state(), PostureState::Alert);

    let outcome = driver.request_explicit_transition(PostureState::Blocked);

    assert_eq!(
        outcome,
        TransitionOutcome::Accepted {
            from: PostureState::Alert,
            to: PostureState::Blocked,
            critical: true,
        }
    );
}

#[test]
fn admin_reset_from_blocked() {
    let mut driver = EventDriver::posture();
    for level in [1, 2, 3, 4] {
        driver.report_severity(level);
    }
    assert_eq!(driver.current_state(), PostureState::Blocked);

    driver.reset();

    assert_eq!(driver.current_state(), PostureState::Normal);
    assert_eq!(driver.transition_count(), 0);
}

#[test]
fn two_step_escalation_counts_two() {
    let mut driver = EventDriver::posture();

    assert!(driver.report_severity(1).is_accepted());
    assert!(driver.report_severity(2).is_accepted());

    assert_eq!(driver.current_state(), PostureState::Warning);
    assert_eq!(driver.transition_count(), 2);
}

#[test]
fn admin_unlock_rule_also_works_as_explicit_transition() {
    let mut driver = EventDriver::posture();
    for level in [1, 2, 3, 4] {
        driver.report_severity(level);
    }

    let outcome = driver.request_explicit_transition(PostureState::Normal);

    assert!(outcome.is_accepted());
    assert!(!outcome.is_critical());
    assert_eq!(driver.transition_count(), 5);
}

#[test]
fn critical_listener_fires_for_alert_and_blocked_only() {
    let critical = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&critical);

    let mut driver = EventDriver::posture();
    driver.subscribe(move |event| {
        if let DriverEvent::Transitioned(t) = event {
            if t.critical {
                sink.lock().unwrap().push(t.to);
            }
        }
    });

    for level in [1, 2, 3, 4] {
        driver.report_severity(level);
    }

    assert_eq!(
        *critical.lock().unwrap(),
        vec![PostureState::Alert, PostureState::Blocked]
    );
}

#[test]
fn simulator_snapshot_reflects_driver() {
    let mut sim = Simulator::new(
        EventDriver::posture(),
        ScriptedStimulus::from_severities([1, 5, 2]),
    );

    assert_eq!(sim.run_ticks(3), 3);

    let snapshot = sim.snapshot();
    assert_eq!(snapshot, DiagramSnapshot::capture(sim.driver()));
    assert_eq!(snapshot.current_state, PostureState::Warning);
    assert_eq!(snapshot.transition_count, 2);

    let statuses: Vec<_> = sim.log().entries().map(|e| e.status).collect();
    assert_eq!(
        statuses,
        vec![
            AttackStatus::Warning,
            AttackStatus::Blocked,
            AttackStatus::Detected
        ]
    );
}

#[tokio::test]
async fn timer_loop_drives_scripted_attacks() {
    let mut sim = Simulator::new(
        EventDriver::posture(),
        ScriptedStimulus::from_severities([1, 2, 3]).quiet(),
    );
    let (_tx, rx) = watch::channel(false);

    let processed = sim.run(Duration::from_millis(1), rx).await;

    assert_eq!(processed, 3);
    assert_eq!(sim.driver().current_state(), PostureState::Alert);
    assert_eq!(sim.ticks(), 4);
}
