//! Defines the public event types broadcast by a running traffic light.
//!
//! Observers that need to see *every* transition subscribe to these
//! strongly-typed streams instead of pulling from the handoff queue, which
//! delivers each event to only one consumer.

use crate::common::Phase;
use tokio::time::Instant;

/// Fired on every phase transition of the light.
#[derive(Debug, Clone)]
pub struct PhaseEvent {
    /// The phase the light just switched to.
    pub phase: Phase,
    /// Monotonic transition counter, starting at 1 for the first toggle.
    pub cycle: u64,
    /// When the transition happened.
    pub at: Instant,
}

/// Events related to the lifecycle of the light itself.
#[derive(Debug, Clone)]
pub enum SystemEvent {
    /// Fired once when the cycle loop is started via `simulate`.
    CyclerStarted { timestamp: Instant },
    /// Fired once when the cycle loop has been stopped and joined.
    CyclerShutdown,
}
