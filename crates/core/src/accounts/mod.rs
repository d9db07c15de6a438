//! Chart-of-account classification and funding rules.
//!
//! The chart of accounts is owned by the remote API; this module only
//! classifies fetched accounts: which ones may carry an expense, which ones
//! may fund one, and which funding accounts are exempt from balance checks.

pub mod types;

pub use types::{AccountSubType, AccountType, ChartAccount, FundingClass};
