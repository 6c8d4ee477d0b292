//! Pipeline Integration Tests
//!
//! Runs the sensor-node side (generator + sender) against a live ingestor over
//! loopback UDP and checks what the alert engine derives from the result.

use std::net::SocketAddr;
use std::time::Duration;

use third_eye::alert::decide;
use third_eye::scenario::{ManualClock, Scenario, ScenarioGenerator};
use third_eye::telemetry::{IngestorStart, TelemetryContext, TelemetryIngestor};
use third_eye::transport::{encode, FrameReceiver, FrameSender};
use third_eye::types::{Axis, Frame, Motion, RawAlert};
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;

fn loopback() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 0))
}

/// Start an ingestor on an ephemeral port and return its address.
fn start_ingestor(ctx: &TelemetryContext, cancel: &CancellationToken) -> SocketAddr {
    // Grab a free port, release it, then hand it to the ingestor
    let probe = std::net::UdpSocket::bind(loopback()).expect("probe bind");
    let addr = probe.local_addr().expect("probe addr");
    drop(probe);

    let start = TelemetryIngestor::start(ctx, addr, 2048, cancel.clone()).expect("ingestor start");
    assert!(start.is_started(), "ingestor should own the fresh port");
    addr
}

/// Poll until at least `frames` frames have been ingested, or give up.
async fn wait_for_frames(ctx: &TelemetryContext, frames: u64) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while ctx.counters().await.frames_ingested < frames {
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for {} frames (have {:?})",
            frames,
            ctx.counters().await
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

fn frame(raw_alert: RawAlert, proximity_mm: u32, v: f64) -> Frame {
    Frame {
        timestamp: v,
        motion: Motion { ax: v, ay: v, az: 9.8 + v, gx: v, gy: v, gz: v },
        proximity_mm,
        raw_alert,
    }
}

#[tokio::test]
async fn malformed_datagrams_do_not_stop_the_listener() {
    let ctx = TelemetryContext::new(100);
    let cancel = CancellationToken::new();
    let addr = start_ingestor(&ctx, &cancel);

    let raw = UdpSocket::bind(loopback()).await.unwrap();
    raw.send_to(b"garbage", addr).await.unwrap();
    raw.send_to(br#"{"timestamp": 1.0, "alert": "NONE"}"#, addr)
        .await
        .unwrap();
    let good = encode(&frame(RawAlert::Clear, 500, 1.0)).unwrap();
    raw.send_to(&good, addr).await.unwrap();

    wait_for_frames(&ctx, 1).await;
    let snap = ctx.snapshot().await;
    assert_eq!(snap.counters.decode_failures, 2);
    assert_eq!(snap.proximity_mm, 500);
    assert_eq!(snap.motion.len(), 1);

    let readings = ctx.readings().await;
    assert_eq!(
        decide(readings.raw_alert.as_str(), readings.proximity_mm).text(),
        "Obstacle Ahead - STOP! CHANGE DIRECTION!"
    );

    cancel.cancel();
}

#[tokio::test]
async fn end_to_end_labels() {
    let cases = [
        (RawAlert::Clear, 1200, "Keep Walking Safely"),
        (RawAlert::Clear, 500, "Obstacle Ahead - STOP! CHANGE DIRECTION!"),
        (RawAlert::FallDetected, 1200, "FALL DETECTED - HELP! FLASHING SOS LIGHTS!"),
    ];

    let ctx = TelemetryContext::new(100);
    let cancel = CancellationToken::new();
    let addr = start_ingestor(&ctx, &cancel);
    let mut sender = FrameSender::bind(vec![addr]).await.unwrap();

    for (i, (raw_alert, proximity_mm, expected)) in cases.into_iter().enumerate() {
        sender
            .send(&frame(raw_alert, proximity_mm, i as f64))
            .await
            .unwrap();
        wait_for_frames(&ctx, i as u64 + 1).await;

        let readings = ctx.readings().await;
        assert_eq!(decide(readings.raw_alert.as_str(), readings.proximity_mm).text(), expected);
    }

    cancel.cancel();
}

#[tokio::test]
async fn generated_stream_fills_history_to_capacity() {
    let ctx = TelemetryContext::new(20);
    let cancel = CancellationToken::new();
    let addr = start_ingestor(&ctx, &cancel);

    let mut sender = FrameSender::bind(vec![addr]).await.unwrap();
    let mut generator = ScenarioGenerator::new(ManualClock::new(0.0), 5.0, Some(11));

    let mut sent = Vec::new();
    for _ in 0..35 {
        generator.clock().advance(Duration::from_millis(100));
        let frame = generator.tick();
        sender.send(&frame).await.unwrap();
        sent.push(frame);
        // Keep loopback ordering simple
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    wait_for_frames(&ctx, 35).await;

    let snap = ctx.snapshot().await;
    assert_eq!(snap.motion.len(), 20);
    for axis in Axis::ALL {
        assert_eq!(snap.motion.axis(axis).len(), 20);
    }
    let expected_az: Vec<f64> = sent[15..].iter().map(|f| f.motion.az).collect();
    assert_eq!(snap.motion.axis(Axis::Az).to_vec(), expected_az);
    // 3.5 s of frames: still inside the first dwell
    assert_eq!(generator.state().scenario, Scenario::Normal);
    assert_eq!(snap.raw_alert, RawAlert::Clear);

    cancel.cancel();
}

#[tokio::test]
async fn second_context_abstains_on_busy_port() {
    let first = TelemetryContext::new(10);
    let cancel = CancellationToken::new();
    let addr = start_ingestor(&first, &cancel);

    let second = TelemetryContext::new(10);
    let start = TelemetryIngestor::start(&second, addr, 2048, cancel.clone()).unwrap();
    assert!(matches!(start, IngestorStart::AlreadyRunning));

    // The first listener keeps working
    let mut sender = FrameSender::bind(vec![addr]).await.unwrap();
    sender.send(&frame(RawAlert::HornDetected, 1000, 0.0)).await.unwrap();
    wait_for_frames(&first, 1).await;
    assert_eq!(first.readings().await.raw_alert, RawAlert::HornDetected);

    cancel.cancel();
}

#[tokio::test]
async fn receiver_binds_are_exclusive_across_the_process() {
    let held = FrameReceiver::bind(loopback(), 2048).unwrap();
    assert!(FrameReceiver::bind(held.local_addr(), 2048).is_err());
}
