//! Wire encoding for telemetry frames.
//!
//! One frame per datagram, encoded as a JSON object:
//!
//! ```json
//! {"timestamp": 1718000000.1, "imu": {"ax": 0.01, "ay": -0.02, "az": 9.81,
//!  "gx": 0.0, "gy": 0.03, "gz": -0.01}, "tof_mm": 1200, "alert": "NONE"}
//! ```

use super::TransportError;
use crate::types::Frame;

pub fn encode(frame: &Frame) -> Result<Vec<u8>, TransportError> {
    serde_json::to_vec(frame).map_err(TransportError::Encode)
}

/// Decode one datagram payload. Unknown extra fields are ignored; missing
/// required fields, wrong types and negative distances are rejected.
pub fn decode(bytes: &[u8]) -> Result<Frame, TransportError> {
    serde_json::from_slice(bytes).map_err(TransportError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{ManualClock, ScenarioGenerator};
    use crate::types::{Motion, RawAlert};
    use std::time::Duration;

    const SENDER_PAYLOAD: &str = r#"{"timestamp": 1718000000.25, "imu": {"ax": 0.01, "ay": -0.02, "az": 9.81, "gx": 0.0, "gy": 0.03, "gz": -0.01}, "tof_mm": 640, "alert": "OBSTACLE_AHEAD. STOP!"}"#;

    #[test]
    fn decodes_sensor_node_payload() {
        let frame = decode(SENDER_PAYLOAD.as_bytes()).unwrap();
        assert_eq!(frame.proximity_mm, 640);
        assert_eq!(frame.raw_alert, RawAlert::ObstacleAhead);
        assert!((frame.motion.az - 9.81).abs() < 1e-12);
        assert!((frame.timestamp - 1_718_000_000.25).abs() < 1e-6);
    }

    #[test]
    fn custom_alert_text_survives_the_wire() {
        let frame = Frame {
            timestamp: 42.0,
            motion: Motion { ax: -7.5, gz: 9.25, ..Motion::default() },
            proximity_mm: 901,
            raw_alert: RawAlert::Other("CUSTOM".to_string()),
        };
        let bytes = encode(&frame).unwrap();
        assert_eq!(decode(&bytes).unwrap(), frame);
    }

    #[test]
    fn generated_frames_decode_bit_exact() {
        let mut node = ScenarioGenerator::new(ManualClock::new(1_718_000_000.0), 5.0, Some(11));
        for _ in 0..1000 {
            node.clock().advance(Duration::from_millis(100));
            let frame = node.tick();
            let decoded = decode(&encode(&frame).unwrap()).unwrap();
            assert_eq!(decoded, frame);
            for (sent, got) in frame.motion.values().iter().zip(decoded.motion.values()) {
                assert_eq!(sent.to_bits(), got.to_bits());
            }
        }
    }

    #[test]
    fn rejects_missing_field() {
        let payload = r#"{"timestamp": 1.0, "imu": {"ax": 0, "ay": 0, "az": 0, "gx": 0, "gy": 0, "gz": 0}, "alert": "NONE"}"#;
        let err = decode(payload.as_bytes()).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
        assert!(err.to_string().contains("tof_mm"));
    }

    #[test]
    fn rejects_missing_axis() {
        let payload = r#"{"timestamp": 1.0, "imu": {"ax": 0, "ay": 0, "az": 0, "gx": 0, "gy": 0}, "tof_mm": 5, "alert": "NONE"}"#;
        assert!(decode(payload.as_bytes()).is_err());
    }

    #[test]
    fn rejects_negative_distance() {
        let payload = r#"{"timestamp": 1.0, "imu": {"ax": 0, "ay": 0, "az": 0, "gx": 0, "gy": 0, "gz": 0}, "tof_mm": -3, "alert": "NONE"}"#;
        assert!(decode(payload.as_bytes()).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(decode(b"not json at all").is_err());
        assert!(decode(&[0xff, 0xfe, 0x00]).is_err());
        assert!(decode(b"").is_err());
    }
}
