//! Contains common, primitive types shared across the crate.
//!
//! This module defines the [`Phase`] value that the whole engine revolves
//! around. Keeping it `repr(u8)` lets the light store its current phase in
//! an atomic and hand out lock-free reads.

use serde::Deserialize;
use std::fmt;

/// One of the two mutually exclusive states a traffic light can display.
///
/// There is no third state and no "unknown" value: toggling is total and
/// symmetric (Red becomes Green, Green becomes Red).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Phase {
    Red = 0,
    Green = 1,
}

impl Phase {
    /// Returns the opposite phase.
    pub fn toggled(self) -> Phase {
        match self {
            Phase::Red => Phase::Green,
            Phase::Green => Phase::Red,
        }
    }

    /// Reconstructs a `Phase` from its `repr(u8)` discriminant.
    ///
    /// Only the two valid discriminants are ever stored, so anything else
    /// maps to `Red` rather than introducing a panic path.
    pub(crate) fn from_u8(raw: u8) -> Phase {
        match raw {
            1 => Phase::Green,
            _ => Phase::Red,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Red => write!(f, "red"),
            Phase::Green => write!(f, "green"),
        }
    }
}
