//! Report decoder collaborator contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use station_common::DecodedObservation;

/// The textual-report decoder. Its grammar is a black box; it either
/// produces a structured record or `None` for "could not decode" (which is
/// not an error).
#[async_trait]
pub trait ReportDecoder: Send + Sync {
    async fn decode(&self, raw_text: &str) -> Option<DecodedObservation>;
}

/// One decode request crossing the backend boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeRequest {
    pub correlation_id: Uuid,
    pub raw_text: String,
}

/// The backend's eventual answer, matched to its request by ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeResponse {
    pub correlation_id: Uuid,
    pub observation: Option<DecodedObservation>,
}
