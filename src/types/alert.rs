//! Alert labels shown and spoken to the wearer

use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-facing label derived from the latest readings.
///
/// Variants are declared in priority order, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertLabel {
    Fall,
    Horn,
    Obstacle,
    KeepWalking,
}

impl AlertLabel {
    pub const fn text(self) -> &'static str {
        match self {
            Self::Fall => "FALL DETECTED - HELP! FLASHING SOS LIGHTS!",
            Self::Horn => "HORN DETECTED ! Go slowly",
            Self::Obstacle => "Obstacle Ahead - STOP! CHANGE DIRECTION!",
            Self::KeepWalking => "Keep Walking Safely",
        }
    }

    pub const fn severity(self) -> Severity {
        match self {
            Self::KeepWalking => Severity::Safe,
            Self::Obstacle => Severity::Caution,
            Self::Fall | Self::Horn => Severity::Danger,
        }
    }
}

impl fmt::Display for AlertLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Color tier used by the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Green
    Safe,
    /// Orange
    Caution,
    /// Red
    Danger,
}
