//! RAB line-item domain types.

use graha_shared::types::{Money, RabItemId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// RAB item classification, driving the procurement workflow and the
/// expense-category inference when a realization is recorded against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Physical material purchased via purchase orders.
    Material,
    /// Contracted service work.
    Service,
    /// Rented or operated equipment.
    Equipment,
    /// Subcontracted work packages.
    Subcontractor,
}

impl ItemType {
    /// Parses an item type from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "material" => Some(Self::Material),
            "service" => Some(Self::Service),
            "equipment" => Some(Self::Equipment),
            "subcontractor" => Some(Self::Subcontractor),
            _ => None,
        }
    }

    /// Returns the wire representation of the item type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::Service => "service",
            Self::Equipment => "equipment",
            Self::Subcontractor => "subcontractor",
        }
    }
}

/// Approval state of a RAB item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Item is still being drafted.
    Draft,
    /// Item has been submitted for approval.
    Pending,
    /// Item has been approved and may receive realizations.
    Approved,
    /// Item was rejected.
    Rejected,
}

impl ApprovalStatus {
    /// Parses an approval status from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

/// Derived realization state of a RAB item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RealizationStatus {
    /// No actual cost and no progress recorded.
    NotStarted,
    /// Some actual cost or progress recorded.
    InProgress,
    /// Progress has reached 100%.
    Completed,
    /// Actual cost exceeds the planned amount.
    OverBudget,
}

/// A budgeted line item (RAB item) with its realization aggregate.
///
/// Invariant: `actual_amount` equals the sum of the amounts of all
/// realizations linked to this item. The backing store re-derives it on
/// every realization mutation; this type never mutates it locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLineItem {
    /// RAB item ID.
    pub id: RabItemId,
    /// What is being procured.
    pub description: String,
    /// Work-category name the item belongs to (milestone linking key).
    pub category: String,
    /// Item classification. `None` when the store carries an unknown type;
    /// category inference then falls back to `other`.
    pub item_type: Option<ItemType>,
    /// Unit of measure.
    pub unit: String,
    /// Budgeted quantity.
    pub quantity: Decimal,
    /// Budgeted unit price.
    pub unit_price: Money,
    /// Planned amount (quantity x unit price, supplied by the store).
    pub planned_amount: Money,
    /// Actual amount: sum of linked realization amounts.
    pub actual_amount: Money,
    /// Physical progress, 0-100.
    pub progress_percentage: Decimal,
    /// Number of realizations recorded against this item.
    pub realization_count: u32,
    /// Approval state.
    pub approval_status: ApprovalStatus,
}

impl BudgetLineItem {
    /// Planned minus actual. Positive means under budget.
    #[must_use]
    pub fn variance(&self) -> Money {
        self.planned_amount - self.actual_amount
    }

    /// Derives the realization state from amounts and progress.
    ///
    /// Over-budget wins over completed: an item that overshot its plan is
    /// flagged even at 100% progress.
    #[must_use]
    pub fn realization_status(&self) -> RealizationStatus {
        if self.actual_amount > self.planned_amount {
            RealizationStatus::OverBudget
        } else if self.progress_percentage >= Decimal::ONE_HUNDRED {
            RealizationStatus::Completed
        } else if self.actual_amount.is_positive() || self.progress_percentage > Decimal::ZERO {
            RealizationStatus::InProgress
        } else {
            RealizationStatus::NotStarted
        }
    }
}

/// Origin of a RAB item listing.
///
/// When a milestone's linked category has no approved items, the store may
/// serve draft items instead so that recording is not blocked. That
/// substitution is tagged explicitly, never silent: callers must warn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSource {
    /// Listing contains approved items.
    Approved,
    /// No approved items existed; listing contains draft/pending items.
    DraftFallback,
}

/// A RAB item listing with its origin tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RabItemListing {
    /// Where the items came from.
    pub source: ItemSource,
    /// The items.
    pub items: Vec<BudgetLineItem>,
}

impl RabItemListing {
    /// Returns true if the caller must surface a draft-items warning.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source == ItemSource::DraftFallback
    }

    /// Aggregates the listing for summary computation.
    #[must_use]
    pub fn aggregate(&self) -> RabAggregate {
        RabAggregate::from_items(&self.items)
    }
}

/// Per-status item counts for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStatusCounts {
    /// Items with progress at 100%.
    pub completed: u32,
    /// Items with partial actuals or progress.
    pub in_progress: u32,
    /// Items with no actuals and no progress.
    pub not_started: u32,
    /// Items whose actuals exceed plan.
    pub over_budget: u32,
}

/// RAB-level aggregate used by the milestone budget summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RabAggregate {
    /// Sum of planned amounts.
    pub total_planned: Money,
    /// Sum of actual amounts.
    pub total_actual: Money,
    /// Number of items.
    pub items_count: u32,
    /// Per-status counts, when available.
    pub status_counts: Option<ItemStatusCounts>,
}

impl RabAggregate {
    /// An empty aggregate (no RAB items linked).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_planned: Money::ZERO,
            total_actual: Money::ZERO,
            items_count: 0,
            status_counts: None,
        }
    }

    /// Builds the aggregate from a fetched item list.
    #[must_use]
    pub fn from_items(items: &[BudgetLineItem]) -> Self {
        let mut counts = ItemStatusCounts::default();
        for item in items {
            match item.realization_status() {
                RealizationStatus::Completed => counts.completed += 1,
                RealizationStatus::InProgress => counts.in_progress += 1,
                RealizationStatus::NotStarted => counts.not_started += 1,
                RealizationStatus::OverBudget => counts.over_budget += 1,
            }
        }

        Self {
            total_planned: items.iter().map(|i| i.planned_amount).sum(),
            total_actual: items.iter().map(|i| i.actual_amount).sum(),
            items_count: u32::try_from(items.len()).unwrap_or(u32::MAX),
            status_counts: Some(counts),
        }
    }

    /// RAB variance: planned minus actual across all items.
    #[must_use]
    pub fn variance(&self) -> Money {
        self.total_planned - self.total_actual
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(planned: i64, actual: i64, progress: Decimal) -> BudgetLineItem {
        BudgetLineItem {
            id: RabItemId::new(),
            description: "Besi beton 10mm".to_string(),
            category: "Pekerjaan Struktur".to_string(),
            item_type: Some(ItemType::Material),
            unit: "btg".to_string(),
            quantity: dec!(100),
            unit_price: Money::from_rupiah(planned / 100),
            planned_amount: Money::from_rupiah(planned),
            actual_amount: Money::from_rupiah(actual),
            progress_percentage: progress,
            realization_count: 1,
            approval_status: ApprovalStatus::Approved,
        }
    }

    #[test]
    fn test_status_not_started() {
        assert_eq!(
            item(1_000_000, 0, dec!(0)).realization_status(),
            RealizationStatus::NotStarted
        );
    }

    #[test]
    fn test_status_in_progress() {
        assert_eq!(
            item(1_000_000, 400_000, dec!(40)).realization_status(),
            RealizationStatus::InProgress
        );
        // Progress without spend still counts as started.
        assert_eq!(
            item(1_000_000, 0, dec!(10)).realization_status(),
            RealizationStatus::InProgress
        );
    }

    #[test]
    fn test_status_completed() {
        assert_eq!(
            item(6_000_000, 6_000_000, dec!(100)).realization_status(),
            RealizationStatus::Completed
        );
    }

    #[test]
    fn test_status_over_budget_wins() {
        assert_eq!(
            item(1_000_000, 1_200_000, dec!(100)).realization_status(),
            RealizationStatus::OverBudget
        );
    }

    #[test]
    fn test_item_variance() {
        assert_eq!(
            item(1_000_000, 800_000, dec!(50)).variance(),
            Money::from_rupiah(200_000)
        );
        assert_eq!(
            item(1_000_000, 1_200_000, dec!(50)).variance(),
            Money::from_rupiah(-200_000)
        );
    }

    #[test]
    fn test_item_type_parse() {
        assert_eq!(ItemType::parse("material"), Some(ItemType::Material));
        assert_eq!(ItemType::parse("SERVICE"), Some(ItemType::Service));
        assert_eq!(ItemType::parse("labour"), None);
    }

    #[test]
    fn test_aggregate_from_items() {
        let items = vec![
            item(6_000_000, 6_000_000, dec!(100)), // completed
            item(2_000_000, 500_000, dec!(25)),    // in progress
            item(1_000_000, 0, dec!(0)),           // not started
            item(500_000, 700_000, dec!(80)),      // over budget
        ];
        let agg = RabAggregate::from_items(&items);
        assert_eq!(agg.total_planned, Money::from_rupiah(9_500_000));
        assert_eq!(agg.total_actual, Money::from_rupiah(7_200_000));
        assert_eq!(agg.items_count, 4);
        let counts = agg.status_counts.unwrap();
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.not_started, 1);
        assert_eq!(counts.over_budget, 1);
        assert_eq!(agg.variance(), Money::from_rupiah(2_300_000));
    }

    #[test]
    fn test_fallback_listing_flag() {
        let listing = RabItemListing {
            source: ItemSource::DraftFallback,
            items: vec![],
        };
        assert!(listing.is_fallback());
    }
}
