//! Actual-cost realization entries and recording validation.
//!
//! A realization is an actual recorded cost, optionally linked to a RAB
//! item. Recording is validated here before anything touches the network:
//! amounts, mandatory expense classification, progress on linked entries,
//! and funding-account balances.

pub mod error;
pub mod recorder;
pub mod types;

pub use error::RealizationError;
pub use recorder::{RealizationRecorder, ValidatedRecord};
pub use types::{CostCategory, CostRealization, CostType, RealizationUpdate, RecordRealization};
