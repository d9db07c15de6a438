//! RAB line items, variance analysis and milestone budget summary.

pub mod summary;
pub mod types;
pub mod variance;


pub use summary::{CategoryBreakdown, MilestoneBudgetSummary};
pub use types::{
    ApprovalStatus, BudgetLineItem, ItemSource, ItemStatusCounts, ItemType, RabAggregate,
    RabItemListing, RealizationStatus,
};
pub use variance::{BudgetStatus, VarianceResult};
