//! # Ampel
//!
//! A concurrent, event-driven two-phase traffic light engine.
//!
//! Ampel models a single traffic light that cycles between red and green
//! at randomized intervals on a background tokio task, and lets any number
//! of other tasks suspend until the light reaches a given phase.
//!
//! ## Core Concepts
//!
//! - **Phase**: the light's two-valued state, red or green. Toggling is
//!   total and symmetric.
//! - **Cycle loop**: one background task per light that dwells for a
//!   random duration (4-6 s by default), toggles the phase, and announces
//!   the change.
//! - **BlockingQueue**: a suspending FIFO handoff between the cycle loop
//!   and a single logical observer; backs `wait_for_phase`.
//! - **Broadcast events**: `PhaseEvent`/`SystemEvent` streams for any
//!   number of subscribers that each need to see every transition.
//! - **Configuration-Driven**: dwell range, starting phase, and channel
//!   capacity come from a `CyclerConfig`, often loaded from a file.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ampel::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // 1. Create a light with the default 4-6 second cycle.
//!     let light = TrafficLight::new(CyclerConfig::default())?;
//!
//!     // 2. Subscribe to the transition stream before starting it.
//!     let mut phases = light.subscribe_phases();
//!     tokio::spawn(async move {
//!         while let Ok(event) = phases.recv().await {
//!             println!("light switched to {} (cycle {})", event.phase, event.cycle);
//!         }
//!     });
//!
//!     // 3. Start the cycle loop.
//!     light.simulate().await?;
//!
//!     // 4. Block this task until the light turns green.
//!     light.wait_for_green().await;
//!     assert_eq!(light.current_phase(), Phase::Green);
//!
//!     // 5. Stop the loop and join it.
//!     light.shutdown().await?;
//!     Ok(())
//! }
//! ```

pub const ENGINE_NAME: &str = "Ampel Engine";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Declare all the modules in the crate.
pub mod common;
pub mod config;
pub mod engine;
pub mod events;
pub mod queue;

/// A prelude module for easy importing of the most common Ampel types.
pub mod prelude {
    pub use crate::common::Phase;
    pub use crate::config::CyclerConfig;
    pub use crate::engine::TrafficLight;
    pub use crate::events::{PhaseEvent, SystemEvent};
    pub use crate::queue::BlockingQueue;
}
