//! State trait and the security posture states.
//!
//! States are immutable values defined once. The trait keeps the
//! transition table and driver generic, while `PostureState` is the
//! fixed five-level escalation ladder used by the dashboard.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::hash::Hash;

/// Trait for automaton states.
///
/// All methods are pure. States are small `Copy` values compared by
/// identity, so tables can index and hash them freely.
///
/// # Example
///
/// ```rust
/// use posture::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl State for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
///
///     fn rank(&self) -> u8 {
///         match self {
///             Self::Open => 0,
///             Self::Closed => 1,
///         }
///     }
/// }
///
/// assert_eq!(Door::Closed.name(), "Closed");
/// assert!(!Door::Closed.is_critical());
/// ```
pub trait State:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Display label for logs and diagram nodes.
    fn name(&self) -> &str;

    /// Severity rank; higher means more escalated.
    fn rank(&self) -> u8;

    /// Whether entering this state should raise heightened alerting.
    ///
    /// Default implementation returns `false`.
    fn is_critical(&self) -> bool {
        false
    }
}

/// Security posture of the monitored system.
///
/// Variants are declared in rank order, Normal lowest and Blocked highest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostureState {
    Normal,
    Suspicious,
    Warning,
    Alert,
    Blocked,
}

impl PostureState {
    /// Every state, ordered by rank.
    pub const ALL: [PostureState; 5] = [
        PostureState::Normal,
        PostureState::Suspicious,
        PostureState::Warning,
        PostureState::Alert,
        PostureState::Blocked,
    ];

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Suspicious => "Suspicious",
            Self::Warning => "Warning",
            Self::Alert => "Alert",
            Self::Blocked => "Blocked",
        }
    }

    /// Layout and color used when drawing this state as a diagram node.
    pub fn style(&self) -> DiagramStyle {
        let (x, color, description) = match self {
            Self::Normal => (100.0, "#00ff88", "Normal operation"),
            Self::Suspicious => (250.0, "#ffcc00", "Suspicious activity detected"),
            Self::Warning => (400.0, "#ff9500", "High risk detected"),
            Self::Alert => (550.0, "#ff375f", "Immediate action required"),
            Self::Blocked => (700.0, "#ff0000", "IP blocked"),
        };

        DiagramStyle {
            x,
            y: 150.0,
            radius: 40.0,
            color,
            description,
        }
    }
}

impl State for PostureState {
    fn name(&self) -> &str {
        self.label()
    }

    fn rank(&self) -> u8 {
        *self as u8
    }

    fn is_critical(&self) -> bool {
        matches!(self, Self::Alert | Self::Blocked)
    }
}

impl fmt::Display for PostureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Drawing attributes of a diagram node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DiagramStyle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: &'static str,
    pub description: &'static str,
}
