//! Shared data structures for the telemetry pipeline
//!
//! - Frame / Motion / RawAlert: what the sensor node sends
//! - AlertLabel / Severity: what the monitor shows and speaks

mod alert;
mod frame;

pub use alert::*;
pub use frame::*;
