//! Attack simulation around the event driver.

mod log;
mod simulator;
mod status;

pub use log::{AttackLog, AttackLogEntry};
pub use simulator::Simulator;
pub use status::{AttackStatus, ResponseAction};
