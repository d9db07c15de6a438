//! Realization domain types.

use chrono::{DateTime, Utc};
use graha_shared::types::{AccountId, MilestoneId, Money, RabItemId, RealizationId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budget::types::ItemType;

/// Expense category of a realization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    /// Physical materials.
    Materials,
    /// Wages and labor.
    Labor,
    /// Equipment rental and operation.
    Equipment,
    /// Subcontracted work.
    Subcontractor,
    /// Contingency reserve spend.
    Contingency,
    /// Indirect project costs.
    Indirect,
    /// Overhead (kasbon, site office, ...).
    Overhead,
    /// Anything else.
    Other,
}

impl CostCategory {
    /// Infers the category from a RAB item's type.
    ///
    /// Fixed mapping: material -> materials, service -> labor,
    /// equipment -> equipment, subcontractor -> subcontractor;
    /// an unknown item type falls back to other.
    #[must_use]
    pub const fn for_item_type(item_type: Option<ItemType>) -> Self {
        match item_type {
            Some(ItemType::Material) => Self::Materials,
            Some(ItemType::Service) => Self::Labor,
            Some(ItemType::Equipment) => Self::Equipment,
            Some(ItemType::Subcontractor) => Self::Subcontractor,
            None => Self::Other,
        }
    }

    /// Parses a category from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "materials" => Some(Self::Materials),
            "labor" => Some(Self::Labor),
            "equipment" => Some(Self::Equipment),
            "subcontractor" => Some(Self::Subcontractor),
            "contingency" => Some(Self::Contingency),
            "indirect" => Some(Self::Indirect),
            "overhead" => Some(Self::Overhead),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Returns the wire representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Materials => "materials",
            Self::Labor => "labor",
            Self::Equipment => "equipment",
            Self::Subcontractor => "subcontractor",
            Self::Contingency => "contingency",
            Self::Indirect => "indirect",
            Self::Overhead => "overhead",
            Self::Other => "other",
        }
    }
}

/// Nature of a cost entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostType {
    /// Planned cost (forecast entry).
    Planned,
    /// Actual incurred cost.
    Actual,
    /// Cost arising from an approved change order.
    ChangeOrder,
    /// Unforeseen cost.
    Unforeseen,
}

/// An actual-cost entry, optionally linked to a RAB item.
///
/// Entries with `rab_item_id == None` are "additional costs" (kasbon,
/// overhead, petty expenses) counted outside the RAB actuals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostRealization {
    /// Realization ID.
    pub id: RealizationId,
    /// Owning milestone.
    pub milestone_id: MilestoneId,
    /// Linked RAB item, if any.
    pub rab_item_id: Option<RabItemId>,
    /// Expense category.
    pub category: CostCategory,
    /// Nature of the cost.
    pub cost_type: CostType,
    /// Amount in whole Rupiah, always positive.
    pub amount: Money,
    /// What the cost was for.
    pub description: String,
    /// Purchase-order number the expense traces to, if any.
    pub reference_number: Option<String>,
    /// Expense account classifying the cost.
    pub expense_account_id: AccountId,
    /// Funding account. `None` means unlimited personal/owner capital.
    pub source_account_id: Option<AccountId>,
    /// Progress contribution (0-100). Present exactly when RAB-linked.
    pub progress: Option<Decimal>,
    /// User who recorded the entry.
    pub recorded_by: Option<UserId>,
    /// When the entry was recorded.
    pub recorded_at: Option<DateTime<Utc>>,
}

impl CostRealization {
    /// Returns true if the entry is an additional cost (not RAB-linked).
    #[must_use]
    pub const fn is_additional_cost(&self) -> bool {
        self.rab_item_id.is_none()
    }
}

/// Input for recording a new realization.
#[derive(Debug, Clone)]
pub struct RecordRealization {
    /// RAB item to record against; `None` records an additional cost.
    pub rab_item_id: Option<RabItemId>,
    /// Item type of the linked item, for category inference.
    pub item_type: Option<ItemType>,
    /// Explicit category; required for additional costs, ignored when the
    /// entry is RAB-linked (the item's type decides).
    pub category: Option<CostCategory>,
    /// Nature of the cost.
    pub cost_type: CostType,
    /// Amount in whole Rupiah; must be positive.
    pub amount: Money,
    /// What the cost is for.
    pub description: String,
    /// Purchase-order number to trace the expense to.
    pub reference_number: Option<String>,
    /// Expense account; mandatory for every realization.
    pub expense_account_id: Option<AccountId>,
    /// Funding account; `None` means owner capital, never validated.
    pub source_account_id: Option<AccountId>,
    /// Progress contribution (0-100); required when RAB-linked.
    pub progress: Option<Decimal>,
}

/// Input for editing an existing realization.
#[derive(Debug, Clone, Default)]
pub struct RealizationUpdate {
    /// New amount.
    pub amount: Option<Money>,
    /// New description.
    pub description: Option<String>,
    /// New expense account.
    pub expense_account_id: Option<AccountId>,
    /// New funding account (`Some(None)` switches to owner capital).
    pub source_account_id: Option<Option<AccountId>>,
    /// New progress contribution.
    pub progress: Option<Decimal>,
}
