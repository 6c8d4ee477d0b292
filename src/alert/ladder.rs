//! Priority ladder mapping raw readings to an alert label.
//!
//! First match wins:
//! 1. fall marker
//! 2. horn marker
//! 3. obstacle marker, or proximity under the threshold
//! 4. keep walking
//!
//! Rule 3 fuses the distance sensor with the raw alert, so a `NONE` alert can
//! still raise an obstacle. Fall and horn have no distance trigger.

use crate::config::defaults::OBSTACLE_THRESHOLD_MM;
use crate::telemetry::Readings;
use crate::types::AlertLabel;

pub const FALL_MARKER: &str = "FALL_DETECTED";
pub const HORN_MARKER: &str = "HORN";
pub const OBSTACLE_MARKER: &str = "OBSTACLE";

/// Decide with the reference proximity threshold.
pub fn decide(raw_alert: &str, proximity_mm: u32) -> AlertLabel {
    decide_with_threshold(raw_alert, proximity_mm, OBSTACLE_THRESHOLD_MM)
}

pub fn decide_with_threshold(raw_alert: &str, proximity_mm: u32, threshold_mm: u32) -> AlertLabel {
    if raw_alert.contains(FALL_MARKER) {
        AlertLabel::Fall
    } else if raw_alert.contains(HORN_MARKER) {
        AlertLabel::Horn
    } else if raw_alert.contains(OBSTACLE_MARKER) || proximity_mm < threshold_mm {
        AlertLabel::Obstacle
    } else {
        AlertLabel::KeepWalking
    }
}

/// Ladder with a configurable proximity threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertPolicy {
    pub proximity_threshold_mm: u32,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            proximity_threshold_mm: OBSTACLE_THRESHOLD_MM,
        }
    }
}

impl AlertPolicy {
    pub const fn new(proximity_threshold_mm: u32) -> Self {
        Self { proximity_threshold_mm }
    }

    pub fn decide(&self, readings: &Readings) -> AlertLabel {
        decide_with_threshold(
            readings.raw_alert.as_str(),
            readings.proximity_mm,
            self.proximity_threshold_mm,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RawAlert, RAW_ALERT_FALL, RAW_ALERT_HORN, RAW_ALERT_OBSTACLE};

    #[test]
    fn clear_path_keeps_walking() {
        assert_eq!(decide("NONE", 1200).text(), "Keep Walking Safely");
    }

    #[test]
    fn close_reading_raises_obstacle_without_marker() {
        assert_eq!(
            decide("NONE", 500).text(),
            "Obstacle Ahead - STOP! CHANGE DIRECTION!"
        );
    }

    #[test]
    fn fall_outranks_safe_distance() {
        assert_eq!(
            decide(RAW_ALERT_FALL, 1200).text(),
            "FALL DETECTED - HELP! FLASHING SOS LIGHTS!"
        );
    }

    #[test]
    fn fall_outranks_close_distance() {
        assert_eq!(decide(RAW_ALERT_FALL, 200), AlertLabel::Fall);
    }

    #[test]
    fn horn_outranks_obstacle() {
        assert_eq!(decide(RAW_ALERT_HORN, 300).text(), "HORN DETECTED ! Go slowly");
        assert_eq!(decide("HORN OBSTACLE", 1500), AlertLabel::Horn);
        assert_eq!(decide("FALL_DETECTED HORN", 1500), AlertLabel::Fall);
    }

    #[test]
    fn obstacle_marker_at_safe_distance() {
        assert_eq!(decide(RAW_ALERT_OBSTACLE, 1500), AlertLabel::Obstacle);
    }

    #[test]
    fn threshold_is_strict() {
        assert_eq!(decide("NONE", 800), AlertLabel::KeepWalking);
        assert_eq!(decide("NONE", 799), AlertLabel::Obstacle);
        assert_eq!(decide("NONE", 0), AlertLabel::Obstacle);
    }

    #[test]
    fn decide_is_deterministic() {
        for raw in ["NONE", RAW_ALERT_FALL, RAW_ALERT_HORN, RAW_ALERT_OBSTACLE, "", "garbage"] {
            for prox in [0, 799, 800, 1500, u32::MAX] {
                assert_eq!(decide(raw, prox), decide(raw, prox));
            }
        }
    }

    #[test]
    fn policy_uses_configured_threshold() {
        let policy = AlertPolicy::new(1000);
        let readings = Readings {
            raw_alert: RawAlert::Clear,
            proximity_mm: 900,
        };
        assert_eq!(policy.decide(&readings), AlertLabel::Obstacle);
        assert_eq!(AlertPolicy::default().decide(&readings), AlertLabel::KeepWalking);
    }
}
