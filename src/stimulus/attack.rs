//! Simulated attack events.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use uuid::Uuid;

/// Category of a simulated attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackKind {
    BruteForce,
    Ddos,
    Phishing,
    Malware,
}

impl AttackKind {
    pub const ALL: [AttackKind; 4] = [
        AttackKind::BruteForce,
        AttackKind::Ddos,
        AttackKind::Phishing,
        AttackKind::Malware,
    ];

    /// Short uppercase tag used in log tables.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::BruteForce => "BRUTEFORCE",
            Self::Ddos => "DDOS",
            Self::Phishing => "PHISHING",
            Self::Malware => "MALWARE",
        }
    }

    /// Notification text for an attack from `ip`.
    pub fn message(&self, ip: Ipv4Addr) -> String {
        match self {
            Self::BruteForce => format!("Brute force attack from {ip}"),
            Self::Ddos => format!("DDoS attack detected from {ip}"),
            Self::Phishing => format!("Phishing attempt from {ip}"),
            Self::Malware => format!("Malware attack from {ip}"),
        }
    }
}

impl fmt::Display for AttackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

/// One simulated attack as produced by a stimulus source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackEvent {
    pub id: Uuid,
    pub kind: AttackKind,
    pub ip: Ipv4Addr,
    pub username: String,
    /// Seriousness from 1 (lowest) to 5
    pub severity: u8,
    pub response_time_ms: u32,
}

impl AttackEvent {
    /// A fixed-shape event carrying only a severity.
    pub fn with_severity(severity: u8) -> Self {
        Self {
            id: Uuid::nil(),
            kind: AttackKind::BruteForce,
            ip: Ipv4Addr::new(192, 168, 0, 1),
            username: "admin".to_string(),
            severity,
            response_time_ms: 10,
        }
    }

    pub fn message(&self) -> String {
        self.kind.message(self.ip)
    }
}
