//! Timer-driven attack simulation feeding the event driver.

use crate::config::{ConfigError, SimulationConfig};
use crate::driver::EventDriver;
use crate::simulation::log::{AttackLog, AttackLogEntry};
use crate::snapshot::DiagramSnapshot;
use crate::stimulus::{AttackEvent, RandomStimulus, StimulusSource};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Couples a stimulus source to an [`EventDriver`] and records every attack.
///
/// All calls run on one execution context; the timer loop and direct
/// calls such as [`Simulator::driver_mut`] never overlap.
///
/// # Example
///
/// ```rust
/// use posture::core::PostureState;
/// use posture::driver::EventDriver;
/// use posture::simulation::Simulator;
/// use posture::stimulus::ScriptedStimulus;
///
/// let mut sim = Simulator::new(EventDriver::posture(), ScriptedStimulus::from_severities([1, 2]));
/// assert_eq!(sim.run_ticks(2), 2);
/// assert_eq!(sim.driver().current_state(), PostureState::Warning);
/// ```
pub struct Simulator<St: StimulusSource> {
    driver: EventDriver,
    stimulus: St,
    log: AttackLog,
    active: bool,
    active_threats: u64,
    ticks: u64,
}

impl<St: StimulusSource> Simulator<St> {
    pub fn new(driver: EventDriver, stimulus: St) -> Self {
        Self {
            driver,
            stimulus,
            log: AttackLog::default(),
            active: true,
            active_threats: 0,
            ticks: 0,
        }
    }

    /// Apply retention settings from `config`.
    pub fn with_config(mut self, config: &SimulationConfig) -> Self {
        self.log = AttackLog::with_capacity(config.log_capacity);
        self.driver = self.driver.with_history_capacity(config.history_capacity);
        self
    }

    /// Pull one tick from the stimulus. Inactive simulators ignore ticks.
    pub fn tick(&mut self) -> Option<&AttackLogEntry> {
        if !self.active {
            return None;
        }
        self.ticks += 1;

        match self.stimulus.next_tick() {
            Some(event) => Some(self.process_attack(event)),
            None => {
                debug!(tick = self.ticks, "Quiet tick");
                None
            }
        }
    }

    /// Feed one attack through the driver and log it.
    pub fn process_attack(&mut self, event: AttackEvent) -> &AttackLogEntry {
        let outcome = self.driver.report_severity(event.severity);
        let entry = AttackLogEntry::new(event, outcome);

        if entry.status.is_active_threat() {
            self.active_threats += 1;
        }

        info!(
            kind = %entry.kind,
            ip = %entry.ip,
            status = ?entry.status,
            accepted = outcome.is_accepted(),
            "Attack processed"
        );

        self.log.push(entry)
    }

    /// Run `n` ticks synchronously. Returns the number of attacks processed.
    pub fn run_ticks(&mut self, n: usize) -> usize {
        (0..n).filter(|_| self.tick().is_some()).count()
    }

    /// Tick every `period` until `shutdown` carries `true`, its sender is
    /// dropped, or the stimulus is exhausted.
    ///
    /// The first tick fires one period after the call. Returns the number
    /// of attacks processed.
    pub async fn run(&mut self, period: Duration, mut shutdown: watch::Receiver<bool>) -> usize {
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut processed = 0;
        info!(period_ms = period.as_millis() as u64, "Simulation started");

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                _ = timer.tick() => {
                    if self.tick().is_some() {
                        processed += 1;
                    }
                    if self.stimulus.is_exhausted() {
                        break;
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        info!(processed, "Simulation stopped");
        processed
    }

    /// Power toggle. While inactive, ticks are ignored.
    pub fn set_active(&mut self, active: bool) {
        if self.active != active {
            info!(active, "Protection system toggled");
        }
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn driver(&self) -> &EventDriver {
        &self.driver
    }

    /// Direct access for explicit transitions, resets and subscriptions.
    pub fn driver_mut(&mut self) -> &mut EventDriver {
        &mut self.driver
    }

    pub fn log(&self) -> &AttackLog {
        &self.log
    }

    /// Empty the attack log. Counters and posture are untouched.
    pub fn clear_log(&mut self) {
        self.log.clear();
        info!("Attack log cleared");
    }

    /// Dismiss every recorded attack: empties the log and zeroes the
    /// active threat count. Posture is left to [`EventDriver::reset`].
    pub fn clear_attacks(&mut self) {
        self.log.clear();
        self.active_threats = 0;
        info!("Attacks cleared");
    }

    /// Attacks classified Warning or Alert so far.
    pub fn active_threats(&self) -> u64 {
        self.active_threats
    }

    /// Ticks handled while active.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn snapshot(&self) -> DiagramSnapshot {
        DiagramSnapshot::capture(&self.driver)
    }
}

impl Simulator<RandomStimulus> {
    /// Random simulation with every setting taken from `config`.
    ///
    /// The config is validated first, so hand-built values are checked
    /// the same way as parsed ones.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let stimulus = match config.seed {
            Some(seed) => RandomStimulus::new(seed),
            None => RandomStimulus::from_entropy(),
        }
        .with_attack_probability(config.attack_probability);

        Ok(Self::new(EventDriver::posture(), stimulus).with_config(config))
    }
}
