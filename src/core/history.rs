//! Bounded history of accepted transitions.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single accepted transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the transition was accepted
    pub timestamp: DateTime<Utc>,
    /// Session transition count after this transition
    pub sequence: u64,
}

/// Ordered, capacity-bounded history of accepted transitions.
///
/// When full, the oldest record is evicted.
///
/// # Example
///
/// ```rust
/// use posture::core::{PostureState, TransitionHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let mut history = TransitionHistory::with_capacity(2);
/// for (i, (from, to)) in [
///     (PostureState::Normal, PostureState::Suspicious),
///     (PostureState::Suspicious, PostureState::Warning),
///     (PostureState::Warning, PostureState::Alert),
/// ]
/// .into_iter()
/// .enumerate()
/// {
///     history.record(TransitionRecord { from, to, timestamp: Utc::now(), sequence: i as u64 + 1 });
/// }
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(
///     history.path(),
///     vec![&PostureState::Suspicious, &PostureState::Warning, &PostureState::Alert]
/// );
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "", from = "HistoryParts<S>")]
pub struct TransitionHistory<S: State> {
    records: VecDeque<TransitionRecord<S>>,
    capacity: usize,
}

/// Serialized form, normalized through `with_capacity` on load.
#[derive(Deserialize)]
#[serde(bound = "")]
struct HistoryParts<S: State> {
    records: VecDeque<TransitionRecord<S>>,
    capacity: usize,
}

impl<S: State> From<HistoryParts<S>> for TransitionHistory<S> {
    fn from(parts: HistoryParts<S>) -> Self {
        let mut history = Self::with_capacity(parts.capacity);
        for record in parts.records {
            history.record(record);
        }
        history
    }
}

impl<S: State> TransitionHistory<S> {
    pub const DEFAULT_CAPACITY: usize = 100;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, record: TransitionRecord<S>) {
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// States traversed: the first retained `from`, then each `to`.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(&first.from);
        }
        path.extend(self.records.iter().map(|r| &r.to));
        path
    }

    /// Time between the first and last retained record.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn records(&self) -> impl DoubleEndedIterator<Item = &TransitionRecord<S>> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord<S>> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<S: State> Default for TransitionHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PostureState;
    use PostureState::*;

    fn record(from: PostureState, to: PostureState, sequence: u64) -> TransitionRecord<PostureState> {
        TransitionRecord {
            from,
            to,
            timestamp: Utc::now(),
            sequence,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: TransitionHistory<PostureState> = TransitionHistory::new();
        assert!(history.is_empty());
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
        assert_eq!(history.capacity(), 100);
    }

    #[test]
    fn path_returns_state_sequence() {
        let mut history = TransitionHistory::new();
        history.record(record(Normal, Suspicious, 1));
        history.record(record(Suspicious, Warning, 2));

        assert_eq!(history.path(), vec![&Normal, &Suspicious, &Warning]);
        assert_eq!(history.last().map(|r| r.sequence), Some(2));
    }

    #[test]
    fn oldest_record_is_evicted_at_capacity() {
        let mut history = TransitionHistory::with_capacity(2);
        history.record(record(Normal, Suspicious, 1));
        history.record(record(Suspicious, Warning, 2));
        history.record(record(Warning, Alert, 3));

        let sequences: Vec<u64> = history.records().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![2, 3]);
    }

    #[test]
    fn zero_capacity_keeps_one_record() {
        let mut history = TransitionHistory::with_capacity(0);
        history.record(record(Normal, Suspicious, 1));
        history.record(record(Suspicious, Normal, 2));

        assert_eq!(history.len(), 1);
        assert_eq!(history.capacity(), 1);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = TransitionHistory::new();
        let start = Utc::now();
        history.record(TransitionRecord {
            from: Normal,
            to: Suspicious,
            timestamp: start,
            sequence: 1,
        });
        history.record(TransitionRecord {
            from: Suspicious,
            to: Warning,
            timestamp: start + chrono::Duration::milliseconds(250),
            sequence: 2,
        });

        assert_eq!(history.duration(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn clear_empties_history() {
        let mut history = TransitionHistory::new();
        history.record(record(Normal, Suspicious, 1));
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = TransitionHistory::new();
        history.record(record(Normal, Suspicious, 1));

        let json = serde_json::to_string(&history).unwrap();
        let back: TransitionHistory<PostureState> = serde_json::from_str(&json).unwrap();

        assert_eq!(back.len(), 1);
        assert_eq!(back.path(), history.path());
    }

    #[test]
    fn zero_capacity_from_json_is_clamped() {
        let mut history: TransitionHistory<PostureState> =
            serde_json::from_str(r#"{"records":[],"capacity":0}"#).unwrap();
        assert_eq!(history.capacity(), 1);

        for i in 0..50 {
            history.record(record(Normal, Suspicious, i));
        }

        assert_eq!(history.len(), 1);
        assert_eq!(history.last().map(|r| r.sequence), Some(49));
    }

    #[test]
    fn oversized_json_keeps_newest_records() {
        let mut source = TransitionHistory::with_capacity(5);
        for i in 1..=5 {
            source.record(record(Normal, Suspicious, i));
        }
        let mut json: serde_json::Value = serde_json::to_value(&source).unwrap();
        json["capacity"] = 2.into();

        let history: TransitionHistory<PostureState> = serde_json::from_value(json).unwrap();

        let sequences: Vec<u64> = history.records().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![4, 5]);
        assert_eq!(history.capacity(), 2);
    }
}
