//! Telemetry frame types
//!
//! A [`Frame`] is one self-contained sample from the sensor node. Field names
//! on the wire (`timestamp`, `imu`, `tof_mm`, `alert`) are the compatibility
//! contract between sender and receiver.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Text the sensor node sends when nothing is wrong.
pub const RAW_ALERT_NONE: &str = "NONE";
/// Text the sensor node sends for an obstacle in front of the wearer.
pub const RAW_ALERT_OBSTACLE: &str = "OBSTACLE_AHEAD. STOP!";
/// Text the sensor node sends after a tumble.
pub const RAW_ALERT_FALL: &str = "FALL_DETECTED. GET UP SLOWLY!";
/// Text the sensor node sends when a vehicle horn is heard.
pub const RAW_ALERT_HORN: &str = "HORN SOUND DETECTED. BE CAREFUL! FLASHING LIGHTS!";

/// One telemetry sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Wall-clock seconds at generation time
    pub timestamp: f64,
    /// Six-axis IMU reading
    #[serde(rename = "imu")]
    pub motion: Motion,
    /// Time-of-flight distance (mm)
    #[serde(rename = "tof_mm")]
    pub proximity_mm: u32,
    /// Sensor-side classification
    #[serde(rename = "alert")]
    pub raw_alert: RawAlert,
}

/// Six-axis motion sample.
///
/// Accelerations in m/s², angular rates in deg/s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub ax: f64,
    pub ay: f64,
    pub az: f64,
    pub gx: f64,
    pub gy: f64,
    pub gz: f64,
}

impl Motion {
    /// Axis values in [`Axis::ALL`] order.
    pub const fn values(&self) -> [f64; 6] {
        [self.ax, self.ay, self.az, self.gx, self.gy, self.gz]
    }

    pub const fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Ax => self.ax,
            Axis::Ay => self.ay,
            Axis::Az => self.az,
            Axis::Gx => self.gx,
            Axis::Gy => self.gy,
            Axis::Gz => self.gz,
        }
    }
}

/// Motion axis identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Ax,
    Ay,
    Az,
    Gx,
    Gy,
    Gz,
}

impl Axis {
    pub const ALL: [Self; 6] = [Self::Ax, Self::Ay, Self::Az, Self::Gx, Self::Gy, Self::Gz];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Ax => "ax",
            Self::Ay => "ay",
            Self::Az => "az",
            Self::Gx => "gx",
            Self::Gy => "gy",
            Self::Gz => "gz",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Ax => 0,
            Self::Ay => 1,
            Self::Az => 2,
            Self::Gx => 3,
            Self::Gy => 4,
            Self::Gz => 5,
        }
    }
}

// ============================================================================
// Raw Alert
// ============================================================================

/// Sensor-side classification carried in the `alert` field.
///
/// Serialized as its text form so frames stay readable by any receiver that
/// only knows the free-text encoding. Unrecognised texts are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RawAlert {
    #[default]
    Clear,
    ObstacleAhead,
    FallDetected,
    HornDetected,
    Other(String),
}

impl RawAlert {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Clear => RAW_ALERT_NONE,
            Self::ObstacleAhead => RAW_ALERT_OBSTACLE,
            Self::FallDetected => RAW_ALERT_FALL,
            Self::HornDetected => RAW_ALERT_HORN,
            Self::Other(text) => text,
        }
    }
}

impl From<String> for RawAlert {
    fn from(text: String) -> Self {
        match text.as_str() {
            RAW_ALERT_NONE => Self::Clear,
            RAW_ALERT_OBSTACLE => Self::ObstacleAhead,
            RAW_ALERT_FALL => Self::FallDetected,
            RAW_ALERT_HORN => Self::HornDetected,
            _ => Self::Other(text),
        }
    }
}

impl From<&str> for RawAlert {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

impl From<RawAlert> for String {
    fn from(alert: RawAlert) -> Self {
        match alert {
            RawAlert::Other(text) => text,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RawAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
