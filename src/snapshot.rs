//! Read-only view of the automaton for diagram rendering.

use crate::core::{DiagramStyle, PostureState, TransitionRule};
use crate::driver::EventDriver;
use serde::Serialize;

/// A diagram node.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NodeView {
    pub state: PostureState,
    pub label: &'static str,
    pub style: DiagramStyle,
    /// True for the node to highlight
    pub active: bool,
}

/// Everything a renderer needs to draw one frame.
///
/// Captured by value, so a renderer may hold it while the driver moves on.
///
/// # Example
///
/// ```rust
/// use posture::driver::EventDriver;
/// use posture::snapshot::DiagramSnapshot;
///
/// let mut driver = EventDriver::posture();
/// driver.report_severity(1);
///
/// let snapshot = DiagramSnapshot::capture(&driver);
/// assert_eq!(snapshot.transition_count, 1);
/// assert_eq!(snapshot.nodes.iter().filter(|n| n.active).count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiagramSnapshot {
    pub nodes: Vec<NodeView>,
    pub transitions: Vec<TransitionRule<PostureState>>,
    pub current_state: PostureState,
    pub transition_count: u64,
    pub progress_percent: u8,
}

impl DiagramSnapshot {
    pub fn capture(driver: &EventDriver) -> Self {
        let current = driver.current_state();
        let nodes = driver
            .table()
            .states()
            .iter()
            .map(|&state| NodeView {
                state,
                label: state.label(),
                style: state.style(),
                active: state == current,
            })
            .collect();

        Self {
            nodes,
            transitions: driver.table().rules().to_vec(),
            current_state: current,
            transition_count: driver.transition_count(),
            progress_percent: driver.progress_percent(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
