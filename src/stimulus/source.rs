//! Injectable stimulus sources.

use crate::stimulus::attack::{AttackEvent, AttackKind};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use std::net::Ipv4Addr;
use uuid::Builder;

const USERNAMES: [&str; 5] = ["admin", "root", "user", "test", "guest"];

/// Produces at most one attack per timer tick.
///
/// The simulator pulls from this on every tick, so tests can swap the
/// random generator for a fixed script.
pub trait StimulusSource {
    /// The attack for this tick, or `None` for a quiet tick.
    fn next_tick(&mut self) -> Option<AttackEvent>;

    /// Whether the source will never produce another event.
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// Seeded pseudo-random attack generator.
///
/// Not suitable for anything but cosmetic variety.
pub struct RandomStimulus {
    rng: ChaCha8Rng,
    attack_probability: f64,
}

impl RandomStimulus {
    /// Default chance that a tick produces an attack.
    pub const DEFAULT_ATTACK_PROBABILITY: f64 = 0.3;

    pub fn new(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::from_rng(ChaCha8Rng::from_entropy())
    }

    fn from_rng(rng: ChaCha8Rng) -> Self {
        Self {
            rng,
            attack_probability: Self::DEFAULT_ATTACK_PROBABILITY,
        }
    }

    /// Probability is clamped to [0, 1]; NaN means no attacks.
    pub fn with_attack_probability(mut self, probability: f64) -> Self {
        self.attack_probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self
    }

    fn generate(&mut self) -> AttackEvent {
        let kind = *AttackKind::ALL
            .choose(&mut self.rng)
            .unwrap_or(&AttackKind::BruteForce);
        let username = USERNAMES.choose(&mut self.rng).copied().unwrap_or("admin");
        let ip = Ipv4Addr::new(
            192,
            168,
            self.rng.gen_range(0..255),
            self.rng.gen_range(0..255),
        );

        AttackEvent {
            id: Builder::from_random_bytes(self.rng.gen()).into_uuid(),
            kind,
            ip,
            username: username.to_string(),
            severity: self.rng.gen_range(1..=5),
            response_time_ms: self.rng.gen_range(10..50),
        }
    }
}

impl StimulusSource for RandomStimulus {
    fn next_tick(&mut self) -> Option<AttackEvent> {
        if self.rng.gen_bool(self.attack_probability) {
            Some(self.generate())
        } else {
            None
        }
    }
}

/// Fixed sequence of ticks, for deterministic runs.
#[derive(Clone, Debug, Default)]
pub struct ScriptedStimulus {
    ticks: VecDeque<Option<AttackEvent>>,
}

impl ScriptedStimulus {
    pub fn new() -> Self {
        Self::default()
    }

    /// One attack per tick with the given severities.
    pub fn from_severities(severities: impl IntoIterator<Item = u8>) -> Self {
        severities
            .into_iter()
            .fold(Self::new(), |script, level| {
                script.then(AttackEvent::with_severity(level))
            })
    }

    pub fn then(mut self, event: AttackEvent) -> Self {
        self.ticks.push_back(Some(event));
        self
    }

    /// A tick with no attack.
    pub fn quiet(mut self) -> Self {
        self.ticks.push_back(None);
        self
    }

    pub fn remaining(&self) -> usize {
        self.ticks.len()
    }
}

impl StimulusSource for ScriptedStimulus {
    fn next_tick(&mut self) -> Option<AttackEvent> {
        self.ticks.pop_front().flatten()
    }

    fn is_exhausted(&self) -> bool {
        self.ticks.is_empty()
    }
}
