//! Bounded attack log, newest entry first.

use crate::driver::TransitionOutcome;
use crate::simulation::status::{AttackStatus, ResponseAction};
use crate::stimulus::{AttackEvent, AttackKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::net::Ipv4Addr;
use uuid::Uuid;

/// One processed attack.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttackLogEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub ip: Ipv4Addr,
    pub kind: AttackKind,
    pub username: String,
    pub status: AttackStatus,
    pub action: ResponseAction,
    pub response_time_ms: u32,
    pub outcome: TransitionOutcome,
}

impl AttackLogEntry {
    pub fn new(event: AttackEvent, outcome: TransitionOutcome) -> Self {
        let status = AttackStatus::from_severity(event.severity);
        Self {
            id: event.id,
            timestamp: Utc::now(),
            ip: event.ip,
            kind: event.kind,
            username: event.username,
            status,
            action: status.action(),
            response_time_ms: event.response_time_ms,
            outcome,
        }
    }

    /// The entry as one line of the log table.
    pub fn row_text(&self) -> String {
        format!(
            "{} {} {} {} {} {}ms",
            self.timestamp.format("%H:%M:%S"),
            self.ip,
            self.kind.tag(),
            self.status.tag(),
            self.action.tag(),
            self.response_time_ms
        )
    }
}

#[derive(Clone, Debug)]
pub struct AttackLog {
    entries: VecDeque<AttackLogEntry>,
    capacity: usize,
}

impl AttackLog {
    pub const DEFAULT_CAPACITY: usize = 15;

    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert at the front, dropping the oldest entry when full.
    pub fn push(&mut self, entry: AttackLogEntry) -> &AttackLogEntry {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
        &self.entries[0]
    }

    pub fn entries(&self) -> impl Iterator<Item = &AttackLogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&AttackLogEntry> {
        self.entries.front()
    }

    /// Entries of one attack kind, newest first.
    pub fn by_kind(&self, kind: AttackKind) -> impl Iterator<Item = &AttackLogEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    /// Entries whose table row mentions `term`, case-insensitively.
    ///
    /// The row holds time, source IP, type, status, action and response
    /// time; usernames are not shown and not searched.
    pub fn search<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a AttackLogEntry> + 'a {
        let term = term.to_lowercase();
        self.entries
            .iter()
            .filter(move |e| e.row_text().to_lowercase().contains(&term))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for AttackLog {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}
