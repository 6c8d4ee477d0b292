//! System-wide default constants.
//!
//! Reference values for the sensor node, the monitor and the alert policy.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Sensor Node
// ============================================================================

/// Destination host for simulated frames.
pub const SENDER_HOST: &str = "127.0.0.1";

/// Destination ports. Two listeners receive an independent copy of every frame.
pub const SENDER_PORTS: [u16; 2] = [5005, 5007];

/// Generator tick interval (ms). 100 ms = 10 Hz.
pub const SENDER_TICK_INTERVAL_MS: u64 = 100;

/// Minimum time a scenario stays active before it is re-drawn (seconds).
pub const SCENARIO_DWELL_SECS: f64 = 5.0;

// ============================================================================
// Monitor
// ============================================================================

/// Wildcard interface the monitor listens on.
pub const RECEIVER_BIND_HOST: &str = "0.0.0.0";

/// Port the monitor listens on.
pub const RECEIVER_PORT: u16 = 5007;

/// Samples kept per motion axis.
pub const MOTION_BUFFER_CAPACITY: usize = 100;

/// Largest datagram accepted by the listener (bytes).
pub const MAX_DATAGRAM_BYTES: usize = 2048;

/// Smallest receive buffer the config validator accepts (bytes).
///
/// One encoded frame is roughly 200 bytes.
pub const MIN_DATAGRAM_BYTES: usize = 256;

/// Proximity reported before the first frame arrives (mm).
pub const INITIAL_PROXIMITY_MM: u32 = 1500;

// ============================================================================
// Alerts
// ============================================================================

/// Proximity below which an obstacle label is raised regardless of raw alert (mm).
pub const OBSTACLE_THRESHOLD_MM: u32 = 800;

/// Interval between alert evaluations (ms). Speech is debounced at this cadence.
pub const ALERT_EVALUATION_INTERVAL_MS: u64 = 1_500;

/// Display refresh interval (ms).
pub const UI_TICK_MS: u64 = 100;

// ============================================================================
// Speech
// ============================================================================

/// Speaking rate passed to the external speech command (words per minute).
pub const SPEECH_RATE_WPM: u32 = 170;
