//! Integration tests for the decode request orchestrator.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use decode_bridge::{DecodeOrchestrator, ReportDecoder};
use station_common::{DecodedObservation, Measurement, StationError};

/// Decoder that records the order it services requests in and echoes the
/// raw text length as the air temperature, so results are distinguishable.
struct RecordingDecoder {
    log: Arc<Mutex<Vec<String>>>,
    delay: Duration,
}

#[async_trait]
impl ReportDecoder for RecordingDecoder {
    async fn decode(&self, raw_text: &str) -> Option<DecodedObservation> {
        self.log.lock().unwrap().push(raw_text.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let mut obs = DecodedObservation::default();
        obs.air_temperature = station_common::Field::Value(Measurement::of(raw_text.len() as f64));
        Some(obs)
    }
}

/// Decoder whose per-request latency is controlled by the report text.
struct PacedDecoder;

#[async_trait]
impl ReportDecoder for PacedDecoder {
    async fn decode(&self, raw_text: &str) -> Option<DecodedObservation> {
        if raw_text.starts_with("slow") {
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
        Some(DecodedObservation::default())
    }
}

/// Decoder that tracks its maximum observed concurrency.
struct ConcurrencyProbe {
    current: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

#[async_trait]
impl ReportDecoder for ConcurrencyProbe {
    async fn decode(&self, _raw_text: &str) -> Option<DecodedObservation> {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(5)).await;
        self.current.fetch_sub(1, Ordering::SeqCst);
        Some(DecodedObservation::default())
    }
}

// ============================================================================
// Buffering and ordering
// ============================================================================

#[tokio::test]
async fn test_requests_buffered_during_init_drain_fifo() {
    let orchestrator = Arc::new(DecodeOrchestrator::new());
    let log = Arc::new(Mutex::new(Vec::new()));

    let reports = ["AAXX 1", "AAXX 22", "AAXX 333", "AAXX 4444", "AAXX 55555"];
    let tickets: Vec<_> = reports
        .iter()
        .map(|raw| orchestrator.submit(raw, Uuid::new_v4()))
        .collect();

    // Slow boot: everything above stays buffered until the backend is up.
    let decoder = RecordingDecoder {
        log: Arc::clone(&log),
        delay: Duration::ZERO,
    };
    orchestrator
        .initialize(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(decoder)
        })
        .await
        .unwrap();

    for (ticket, raw) in tickets.into_iter().zip(reports) {
        let obs = orchestrator
            .await_result(ticket, Duration::from_secs(1))
            .await
            .unwrap()
            .expect("decoder returns a record");
        let value = obs.air_temperature.value().unwrap().value.get().unwrap();
        assert_eq!(value as usize, raw.len(), "result correlated to its request");
    }

    let serviced = log.lock().unwrap().clone();
    assert_eq!(serviced, reports, "buffered requests drained in arrival order");
}

#[tokio::test]
async fn test_backend_services_one_request_at_a_time() {
    let orchestrator = Arc::new(DecodeOrchestrator::new());
    let peak = Arc::new(AtomicUsize::new(0));
    let decoder = ConcurrencyProbe {
        current: Arc::new(AtomicUsize::new(0)),
        peak: Arc::clone(&peak),
    };
    orchestrator.initialize(async { Ok(decoder) }).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..10 {
        let orchestrator = Arc::clone(&orchestrator);
        handles.push(tokio::spawn(async move {
            orchestrator.decode(&format!("AAXX {i}")).await.unwrap()
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(peak.load(Ordering::SeqCst), 1, "no parallel decode execution");
}

// ============================================================================
// Timeout behavior
// ============================================================================

#[tokio::test]
async fn test_timeout_does_not_block_other_awaits() {
    let orchestrator = Arc::new(DecodeOrchestrator::new());
    orchestrator.initialize(async { Ok(PacedDecoder) }).await.unwrap();

    let slow = orchestrator.submit("slow 83415", Uuid::new_v4());
    let fast = orchestrator.submit("fast 83415", Uuid::new_v4());

    let (slow_result, fast_result) = tokio::join!(
        orchestrator.await_result(slow, Duration::from_millis(50)),
        orchestrator.await_result(fast, Duration::from_secs(2)),
    );

    assert!(
        matches!(slow_result, Err(StationError::DecodeTimeout(50))),
        "slow request fails with timeout, got {slow_result:?}"
    );
    assert!(fast_result.is_ok(), "fast request unaffected by the timeout");
}

#[tokio::test]
async fn test_backend_survives_a_timed_out_request() {
    let orchestrator = Arc::new(DecodeOrchestrator::new());
    orchestrator.initialize(async { Ok(PacedDecoder) }).await.unwrap();

    let slow = orchestrator.submit("slow 83415", Uuid::new_v4());
    let result = orchestrator.await_result(slow, Duration::from_millis(20)).await;
    assert!(matches!(result, Err(StationError::DecodeTimeout(_))));

    // The late response is dropped; the backend keeps serving new requests
    // once its in-flight computation completes.
    let next = orchestrator.decode("fast 83415").await;
    assert!(next.is_ok(), "backend still serving after a timeout");
}
