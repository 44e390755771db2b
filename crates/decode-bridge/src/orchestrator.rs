//! Decode request orchestrator.
//!
//! Owns the single long-lived decoder backend and all in-flight
//! request/response correlation. Requests submitted before the backend has
//! finished booting are buffered in arrival order and drained strictly FIFO;
//! the backend services one request at a time. Each pending request is a
//! oneshot resolved directly by the backend loop; a timed-out request's map
//! entry is removed, so a late response is dropped rather than orphaned.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use station_common::{DecodedObservation, StationError, StationResult};

use crate::decoder::{DecodeRequest, ReportDecoder};

/// Default deadline for one decode result.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

type PendingMap = Arc<Mutex<HashMap<Uuid, oneshot::Sender<Option<DecodedObservation>>>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackendState {
    Idle,
    Booting,
    Ready,
    Failed,
}

/// Handle to one in-flight decode request.
///
/// Consumed by [`DecodeOrchestrator::await_result`]; dropping it abandons
/// the request (its map entry is cleaned up when the backend responds).
#[derive(Debug)]
pub struct DecodeTicket {
    correlation_id: Uuid,
    receiver: oneshot::Receiver<Option<DecodedObservation>>,
}

impl DecodeTicket {
    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Orchestrates the decode backend lifecycle and request correlation.
pub struct DecodeOrchestrator {
    sender: mpsc::UnboundedSender<DecodeRequest>,
    /// Held until `initialize` hands it to the backend task.
    receiver: Mutex<Option<mpsc::UnboundedReceiver<DecodeRequest>>>,
    pending: PendingMap,
    state: Mutex<BackendState>,
}

impl DecodeOrchestrator {
    /// Create an orchestrator with the backend not yet started. Submissions
    /// are accepted immediately and buffered until initialization completes.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver: Mutex::new(Some(receiver)),
            pending: Arc::new(Mutex::new(HashMap::new())),
            state: Mutex::new(BackendState::Idle),
        }
    }

    /// Boot the decoder backend exactly once per orchestrator lifetime.
    ///
    /// A second call fails with `AlreadyInitialized` regardless of whether
    /// the first succeeded. A boot failure is fatal: it is surfaced here,
    /// never retried, and every buffered or future submission fails with
    /// `BackendUnavailable`.
    pub async fn initialize<D, F>(&self, boot: F) -> StationResult<()>
    where
        D: ReportDecoder + 'static,
        F: Future<Output = anyhow::Result<D>>,
    {
        {
            let mut state = self.state.lock().unwrap();
            if *state != BackendState::Idle {
                return Err(StationError::AlreadyInitialized);
            }
            *state = BackendState::Booting;
        }

        let decoder = match boot.await {
            Ok(decoder) => decoder,
            Err(err) => {
                *self.state.lock().unwrap() = BackendState::Failed;
                // Dropping the channel end fails buffered requests; their
                // oneshot senders go down with the pending map.
                self.receiver.lock().unwrap().take();
                self.pending.lock().unwrap().clear();
                error!(error = %err, "decoder backend failed to initialize");
                return Err(StationError::BackendInit(err.to_string()));
            }
        };

        let Some(receiver) = self.receiver.lock().unwrap().take() else {
            // Unreachable from the state machine, but refuse rather than panic.
            return Err(StationError::AlreadyInitialized);
        };
        let pending = Arc::clone(&self.pending);
        tokio::spawn(backend_loop(decoder, receiver, pending));

        *self.state.lock().unwrap() = BackendState::Ready;
        info!("decoder backend ready");
        Ok(())
    }

    /// Enqueue one raw report for decoding.
    ///
    /// Absent or empty text short-circuits to an already-resolved `None`
    /// ticket without ever engaging the backend.
    pub fn submit(&self, raw_text: &str, correlation_id: Uuid) -> DecodeTicket {
        let (tx, rx) = oneshot::channel();
        let ticket = DecodeTicket {
            correlation_id,
            receiver: rx,
        };

        if raw_text.trim().is_empty() {
            debug!(%correlation_id, "empty report text, skipping decode");
            let _ = tx.send(None);
            return ticket;
        }

        self.pending.lock().unwrap().insert(correlation_id, tx);

        let request = DecodeRequest {
            correlation_id,
            raw_text: raw_text.to_string(),
        };
        if self.sender.send(request).is_err() {
            // Backend boot failed and the channel is gone; dropping the
            // pending sender resolves the awaiter with BackendUnavailable.
            self.pending.lock().unwrap().remove(&correlation_id);
            warn!(%correlation_id, "decode request rejected, backend unavailable");
        }

        ticket
    }

    /// Wait for the correlated result, up to `timeout`.
    ///
    /// Timeout removes the pending entry (the request is cancelled from the
    /// caller's point of view; the backend's in-flight computation runs to
    /// completion and its late response is dropped). Fails the affected
    /// request only; concurrent awaits on other IDs are untouched.
    pub async fn await_result(
        &self,
        ticket: DecodeTicket,
        timeout: Duration,
    ) -> StationResult<Option<DecodedObservation>> {
        let correlation_id = ticket.correlation_id;
        match tokio::time::timeout(timeout, ticket.receiver).await {
            Ok(Ok(observation)) => Ok(observation),
            Ok(Err(_)) => Err(StationError::BackendUnavailable),
            Err(_) => {
                self.pending.lock().unwrap().remove(&correlation_id);
                warn!(%correlation_id, timeout_ms = timeout.as_millis() as u64, "decode timed out");
                Err(StationError::DecodeTimeout(timeout.as_millis() as u64))
            }
        }
    }

    /// Submit and await with the default deadline.
    pub async fn decode(&self, raw_text: &str) -> StationResult<Option<DecodedObservation>> {
        let ticket = self.submit(raw_text, Uuid::new_v4());
        self.await_result(ticket, Duration::from_millis(DEFAULT_TIMEOUT_MS))
            .await
    }
}

impl Default for DecodeOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

/// The single-threaded backend: drains requests strictly FIFO, one at a
/// time, and resolves each pending oneshot directly.
async fn backend_loop<D: ReportDecoder>(
    decoder: D,
    mut receiver: mpsc::UnboundedReceiver<DecodeRequest>,
    pending: PendingMap,
) {
    while let Some(request) = receiver.recv().await {
        let observation = decoder.decode(&request.raw_text).await;
        let entry = pending.lock().unwrap().remove(&request.correlation_id);
        match entry {
            Some(tx) => {
                // The awaiter may have dropped its ticket in the meantime.
                let _ = tx.send(observation);
            }
            None => {
                debug!(correlation_id = %request.correlation_id, "dropping late decode response");
            }
        }
    }
    debug!("decoder backend loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct NullDecoder;

    #[async_trait]
    impl ReportDecoder for NullDecoder {
        async fn decode(&self, _raw_text: &str) -> Option<DecodedObservation> {
            None
        }
    }

    #[tokio::test]
    async fn test_empty_input_never_engages_backend() {
        // No initialize call at all; the empty-input path must still resolve.
        let orchestrator = DecodeOrchestrator::new();
        let ticket = orchestrator.submit("   ", Uuid::new_v4());
        let result = orchestrator
            .await_result(ticket, Duration::from_millis(50))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_initialize_is_not_reentrant() {
        let orchestrator = DecodeOrchestrator::new();
        orchestrator.initialize(async { Ok(NullDecoder) }).await.unwrap();
        let second = orchestrator.initialize(async { Ok(NullDecoder) }).await;
        assert!(matches!(second, Err(StationError::AlreadyInitialized)));
    }

    #[tokio::test]
    async fn test_boot_failure_is_fatal_for_submissions() {
        let orchestrator = DecodeOrchestrator::new();
        let buffered = orchestrator.submit("AAXX 01004", Uuid::new_v4());

        let result = orchestrator
            .initialize(async { Err::<NullDecoder, _>(anyhow::anyhow!("payload fetch failed")) })
            .await;
        assert!(matches!(result, Err(StationError::BackendInit(_))));

        let buffered = orchestrator
            .await_result(buffered, Duration::from_millis(50))
            .await;
        assert!(matches!(buffered, Err(StationError::BackendUnavailable)));

        let late = orchestrator.submit("AAXX 01004", Uuid::new_v4());
        let late = orchestrator.await_result(late, Duration::from_millis(50)).await;
        assert!(matches!(late, Err(StationError::BackendUnavailable)));
    }
}
