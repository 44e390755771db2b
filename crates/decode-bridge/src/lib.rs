//! Bridge between symbol compilation and the report decoder backend.
//!
//! The decoder is an opaque collaborator living behind an asynchronous
//! message boundary. One backend instance serves the whole process and
//! handles exactly one request at a time; this crate owns its lifecycle and
//! correlates requests to responses by ID.

pub mod decoder;
pub mod orchestrator;

pub use decoder::{DecodeRequest, DecodeResponse, ReportDecoder};
pub use orchestrator::{DecodeOrchestrator, DecodeTicket, DEFAULT_TIMEOUT_MS};
