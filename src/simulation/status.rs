//! Classification of an attack by severity.

use serde::{Deserialize, Serialize};

/// Status shown in the attack log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttackStatus {
    Detected,
    Warning,
    Alert,
    Blocked,
}

/// Response taken for an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseAction {
    Monitor,
    Warn,
    Alert,
    Block,
}

impl AttackStatus {
    /// Uppercase label, as serialized and shown in the log table.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Detected => "DETECTED",
            Self::Warning => "WARNING",
            Self::Alert => "ALERT",
            Self::Blocked => "BLOCKED",
        }
    }

    /// Same thresholds as the driver's severity mapping.
    pub fn from_severity(level: u8) -> Self {
        match level {
            4..=u8::MAX => Self::Blocked,
            3 => Self::Alert,
            2 => Self::Warning,
            _ => Self::Detected,
        }
    }

    pub fn action(&self) -> ResponseAction {
        match self {
            Self::Detected => ResponseAction::Monitor,
            Self::Warning => ResponseAction::Warn,
            Self::Alert => ResponseAction::Alert,
            Self::Blocked => ResponseAction::Block,
        }
    }

    /// Alert and Warning attacks count toward active threats.
    pub fn is_active_threat(&self) -> bool {
        matches!(self, Self::Alert | Self::Warning)
    }
}

impl ResponseAction {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Monitor => "MONITOR",
            Self::Warn => "WARN",
            Self::Alert => "ALERT",
            Self::Block => "BLOCK",
        }
    }
}
