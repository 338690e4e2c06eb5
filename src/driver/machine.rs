//! Event driver that owns the automaton session.

use crate::core::{PostureState, State, TransitionHistory, TransitionRecord, TransitionTable};
use crate::driver::outcome::{DriverEvent, TransitionEvent, TransitionOutcome};
use crate::driver::session::AutomatonSession;
use chrono::Utc;
use tracing::{debug, info, warn};

/// Callback invoked for every driver event.
pub type Listener<S> = Box<dyn Fn(&DriverEvent<S>) + Send + Sync>;

/// Map a simulated severity to the state it should push the session toward.
///
/// Thresholds: 4 and above Blocked, 3 Alert, 2 Warning, anything lower
/// Suspicious. Normal is never a severity target.
pub fn severity_target(level: u8) -> PostureState {
    match level {
        4..=u8::MAX => PostureState::Blocked,
        3 => PostureState::Alert,
        2 => PostureState::Warning,
        _ => PostureState::Suspicious,
    }
}

/// Owns the session and translates stimuli into validated transitions.
///
/// Every request goes through the transition table. Accepted moves update
/// the session, append to history and notify listeners; rejected moves
/// change nothing.
///
/// # Example
///
/// ```rust
/// use posture::driver::EventDriver;
/// use posture::core::PostureState;
///
/// let mut driver = EventDriver::posture();
///
/// let outcome = driver.report_severity(1);
/// assert!(outcome.is_accepted());
/// assert_eq!(driver.current_state(), PostureState::Suspicious);
///
/// // No direct path from Suspicious to Blocked
/// let outcome = driver.report_severity(5);
/// assert!(!outcome.is_accepted());
/// assert_eq!(driver.transition_count(), 1);
/// ```
pub struct EventDriver<S: State = PostureState> {
    table: TransitionTable<S>,
    session: AutomatonSession<S>,
    history: TransitionHistory<S>,
    listeners: Vec<Listener<S>>,
}

impl<S: State> EventDriver<S> {
    /// Create a driver in `initial` with a fresh session.
    pub fn new(table: TransitionTable<S>, initial: S) -> Self {
        Self {
            table,
            session: AutomatonSession::new(initial),
            history: TransitionHistory::new(),
            listeners: Vec::new(),
        }
    }

    /// Replace the history with an empty one of the given capacity.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history = TransitionHistory::with_capacity(capacity);
        self
    }

    /// Register a callback for transition and reset events.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&DriverEvent<S>) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Move directly to `target`, e.g. after a click on a diagram node.
    ///
    /// Still validated against the table; moving to the current state is
    /// rejected unless the table lists a self-loop.
    pub fn request_explicit_transition(&mut self, target: S) -> TransitionOutcome<S> {
        self.apply(target)
    }

    /// Administrative unlock: back to the initial state with a zero count.
    ///
    /// Bypasses the table and clears the history. Calling it twice is the
    /// same as calling it once.
    pub fn reset(&mut self) {
        let from = self.session.current_state();
        self.session.reset();
        self.history.clear();

        info!(from = from.name(), "Session reset");
        self.notify(&DriverEvent::Reset { from });
    }

    pub fn current_state(&self) -> S {
        self.session.current_state()
    }

    pub fn transition_count(&self) -> u64 {
        self.session.transition_count()
    }

    /// Progress gauge shown beside the diagram: ten steps per cycle.
    pub fn progress_percent(&self) -> u8 {
        ((self.transition_count() % 10) * 10).min(100) as u8
    }

    pub fn session(&self) -> &AutomatonSession<S> {
        &self.session
    }

    pub fn table(&self) -> &TransitionTable<S> {
        &self.table
    }

    pub fn history(&self) -> &TransitionHistory<S> {
        &self.history
    }

    fn apply(&mut self, target: S) -> TransitionOutcome<S> {
        let from = self.session.current_state();

        let to = match self.table.attempt_transition(from, target) {
            Ok(to) => to,
            Err(rejected) => {
                debug!(
                    from = from.name(),
                    requested = target.name(),
                    "{rejected}"
                );
                return rejected.into();
            }
        };

        let count = self.session.advance(to);
        let critical = to.is_critical();
        self.history.record(TransitionRecord {
            from,
            to,
            timestamp: Utc::now(),
            sequence: count,
        });

        if critical {
            warn!(from = from.name(), to = to.name(), count, "Entered critical state");
        } else {
            info!(from = from.name(), to = to.name(), count, "Transition accepted");
        }

        self.notify(&DriverEvent::Transitioned(TransitionEvent {
            from,
            to,
            critical,
            count,
        }));

        TransitionOutcome::Accepted { from, to, critical }
    }

    fn notify(&self, event: &DriverEvent<S>) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl EventDriver<PostureState> {
    /// Driver over the default posture table, starting in Normal.
    pub fn posture() -> Self {
        Self::new(TransitionTable::posture(), PostureState::Normal)
    }

    /// Translate a severity level into a transition request.
    ///
    /// Uses [`severity_target`] for the requested state, then the same
    /// validation as an explicit request.
    pub fn report_severity(&mut self, level: u8) -> TransitionOutcome {
        let target = severity_target(level);
        debug!(level, target = target.name(), "Severity reported");
        self.apply(target)
    }
}

impl Default for EventDriver<PostureState> {
    fn default() -> Self {
        Self::posture()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use PostureState::*;

    #[test]
    fn severity_thresholds() {
        assert_eq!(severity_target(0), Suspicious);
        assert_eq!(severity_target(1), Suspicious);
        assert_eq!(severity_target(2), Warning);
        assert_eq!(severity_target(3), Alert);
        assert_eq!(severity_target(4), Blocked);
        assert_eq!(severity_target(5), Blocked);
    }

    #[test]
    fn severity_never_targets_normal() {
        for level in 0..=u8::MAX {
            assert_ne!(severity_target(level), Normal);
        }
    }

    #[test]
    fn low_severity_from_normal_is_accepted() {
        let mut driver = EventDriver::posture();

        let outcome = driver.report_severity(1);

        assert_eq!(
            outcome,
            TransitionOutcome::Accepted {
                from: Normal,
                to: Suspicious,
                critical: false
            }
        );
        assert_eq!(driver.transition_count(), 1);
    }

    #[test]
    fn skipping_levels_is_rejected_without_mutation() {
        let mut driver = EventDriver::posture();
        driver.report_severity(1);

        let outcome = driver.report_severity(4);

        assert_eq!(
            outcome,
            TransitionOutcome::Rejected {
                from: Suspicious,
                requested: Blocked
            }
        );
        assert_eq!(driver.current_state(), Suspicious);
        assert_eq!(driver.transition_count(), 1);
        assert_eq!(driver.history().len(), 1);
    }

    #[test]
    fn explicit_request_to_current_state_is_rejected() {
        let mut driver = EventDriver::posture();

        let outcome = driver.request_explicit_transition(Normal);

        assert!(!outcome.is_accepted());
        assert_eq!(driver.transition_count(), 0);
    }

    #[test]
    fn explicit_request_into_blocked_is_critical() {
        let mut driver = EventDriver::posture();
        for target in [Suspicious, Warning, Alert] {
            assert!(driver.request_explicit_transition(target).is_accepted());
        }

        let outcome = driver.request_explicit_transition(Blocked);

        assert!(outcome.is_critical());
        assert_eq!(driver.current_state(), Blocked);
        assert_eq!(driver.transition_count(), 4);
    }

    #[test]
    fn reset_returns_to_normal_and_is_idempotent() {
        let mut driver = EventDriver::posture();
        driver.report_severity(1);
        driver.report_severity(2);

        driver.reset();
        let once = (driver.current_state(), driver.transition_count());
        driver.reset();
        let twice = (driver.current_state(), driver.transition_count());

        assert_eq!(once, (Normal, 0));
        assert_eq!(once, twice);
        assert!(driver.history().is_empty());
    }

    #[test]
    fn listeners_receive_accepted_transitions_and_resets() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);

        let mut driver = EventDriver::posture();
        driver.subscribe(move |event| sink.lock().unwrap().push(*event));

        driver.report_severity(1);
        driver.report_severity(5); // rejected, no event
        driver.reset();

        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                DriverEvent::Transitioned(TransitionEvent {
                    from: Normal,
                    to: Suspicious,
                    critical: false,
                    count: 1,
                }),
                DriverEvent::Reset { from: Suspicious },
            ]
        );
    }

    #[test]
    fn progress_wraps_every_ten_transitions() {
        let mut driver = EventDriver::posture();
        assert_eq!(driver.progress_percent(), 0);

        for i in 1..=10u64 {
            let target = if i % 2 == 1 { Suspicious } else { Normal };
            assert!(driver.request_explicit_transition(target).is_accepted());
            assert_eq!(u64::from(driver.progress_percent()), (i % 10) * 10);
        }
    }

    #[test]
    fn history_capacity_is_configurable() {
        let mut driver = EventDriver::posture().with_history_capacity(3);
        for i in 0..6 {
            let target = if i % 2 == 0 { Suspicious } else { Normal };
            driver.request_explicit_transition(target);
        }

        assert_eq!(driver.history().len(), 3);
        assert_eq!(driver.history().last().map(|r| r.sequence), Some(6));
    }
}
