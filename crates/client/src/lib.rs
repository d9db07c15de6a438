//! HTTP data layer for Graha.
//!
//! Authoritative state lives in the remote back-office API; this crate is
//! the typed boundary in front of it. Wire payloads are normalized here
//! (camelCase/snake_case duality, stringified decimals) so that core logic
//! only ever sees one canonical shape.
//!
//! Every operation is an independent request/response round-trip. Writes
//! are validated by `graha-core` before anything is sent; the dependent
//! refreshes after a successful write are requested independently, and a
//! failed refresh surfaces as a non-fatal warning, never a rollback.
//!
//! # Modules
//!
//! - `http` - transport trait, reqwest implementation, response envelope
//! - `wire` - wire DTOs and normalization into core types
//! - `rab` - RAB item listings (with explicit draft fallback) and
//!   per-item realizations
//! - `realizations` - record/update/delete with side-effect sequencing
//! - `summary` - milestone budget summary assembly
//! - `progress` - workflow progress snapshot and sync
//! - `accounts` - chart-of-accounts lookups with short-lived caching

pub mod accounts;
pub mod error;
pub mod http;
pub mod progress;
pub mod rab;
pub mod realizations;
pub mod summary;
pub mod wire;

pub use accounts::AccountsClient;
pub use error::ClientError;
pub use http::{HttpTransport, Transport};
pub use progress::ProgressClient;
pub use rab::RabItemsClient;
pub use realizations::{
    DeleteOutcome, RealizationsClient, RecordOutcome, RefreshTarget, RefreshWarning,
};
pub use summary::MilestoneSummaryClient;
