//! Milestone budget summary aggregation.
//!
//! Combines the milestone budget, the RAB actuals and the unlinked
//! additional costs into the single object the UI renders. Derived on
//! every read; never persisted as authoritative state.

use graha_shared::types::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{ItemStatusCounts, RabAggregate};
use super::variance::BudgetStatus;
use crate::realization::types::{CostCategory, CostRealization};

/// Total spend for one cost category, for display charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// Cost category.
    pub category: CostCategory,
    /// Total amount recorded in the category.
    pub total: Money,
}

/// Unified milestone budget summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneBudgetSummary {
    /// Milestone budget (planned allocation).
    pub budget: Money,
    /// Sum of planned amounts across linked RAB items.
    pub rab_planned: Money,
    /// Sum of realized amounts across linked RAB items.
    pub rab_actual: Money,
    /// Sum of realizations not linked to any RAB item.
    pub additional_costs: Money,
    /// `rab_actual + additional_costs`.
    pub total_spent: Money,
    /// `budget - total_spent`. Positive means under budget.
    pub variance: Money,
    /// Variance as a percentage of budget, rounded to 2 decimals.
    pub variance_percent: Decimal,
    /// `rab_planned - rab_actual` (RAB items only).
    pub rab_variance: Money,
    /// Status classification; see `BudgetStatus::classify`.
    pub status: BudgetStatus,
    /// Spend as a percentage of budget, capped at 100 (display bars only).
    pub progress_percent: Decimal,
    /// Number of linked RAB items.
    pub items_count: u32,
    /// Per-status item counts, passed through from the backing aggregate.
    pub status_counts: Option<ItemStatusCounts>,
    /// Per-category spend breakdown, when supplied.
    pub breakdown: Vec<CategoryBreakdown>,
}

impl MilestoneBudgetSummary {
    /// Computes the summary from the milestone budget, the RAB aggregate
    /// and the additional-cost total.
    #[must_use]
    pub fn compute(budget: Money, rab: &RabAggregate, additional_costs: Money) -> Self {
        let total_spent = rab.total_actual + additional_costs;
        let variance = budget - total_spent;

        let progress_percent = total_spent
            .percent_of(budget)
            .min(Decimal::ONE_HUNDRED);

        Self {
            budget,
            rab_planned: rab.total_planned,
            rab_actual: rab.total_actual,
            additional_costs,
            total_spent,
            variance,
            variance_percent: variance.percent_of(budget),
            rab_variance: rab.variance(),
            status: BudgetStatus::classify(budget, variance),
            progress_percent,
            items_count: rab.items_count,
            status_counts: rab.status_counts,
            breakdown: Vec::new(),
        }
    }

    /// Attaches a per-category breakdown.
    #[must_use]
    pub fn with_breakdown(mut self, breakdown: Vec<CategoryBreakdown>) -> Self {
        self.breakdown = breakdown;
        self
    }
}

/// Sums realization amounts per category, largest first.
#[must_use]
pub fn category_breakdown(realizations: &[CostRealization]) -> Vec<CategoryBreakdown> {
    let mut totals: Vec<CategoryBreakdown> = Vec::new();
    for real in realizations {
        match totals.iter_mut().find(|b| b.category == real.category) {
            Some(entry) => entry.total += real.amount,
            None => totals.push(CategoryBreakdown {
                category: real.category,
                total: real.amount,
            }),
        }
    }
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}

/// Sums the amounts of realizations not linked to any RAB item.
#[must_use]
pub fn additional_costs_total(realizations: &[CostRealization]) -> Money {
    realizations
        .iter()
        .filter(|r| r.is_additional_cost())
        .map(|r| r.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use graha_shared::types::{AccountId, MilestoneId, RabItemId, RealizationId};
    use crate::realization::types::CostType;
    use rust_decimal_macros::dec;

    fn realization(category: CostCategory, amount: i64, linked: bool) -> CostRealization {
        CostRealization {
            id: RealizationId::new(),
            milestone_id: MilestoneId::new(),
            rab_item_id: linked.then(RabItemId::new),
            category,
            cost_type: CostType::Actual,
            amount: Money::from_rupiah(amount),
            description: "test".to_string(),
            reference_number: None,
            expense_account_id: AccountId::new(),
            source_account_id: None,
            progress: None,
            recorded_by: None,
            recorded_at: None,
        }
    }

    #[test]
    fn test_summary_under_budget() {
        let rab = RabAggregate {
            total_planned: Money::from_rupiah(6_000_000),
            total_actual: Money::from_rupiah(6_000_000),
            items_count: 1,
            status_counts: None,
        };
        let summary = MilestoneBudgetSummary::compute(
            Money::from_rupiah(10_000_000),
            &rab,
            Money::from_rupiah(500_000),
        );

        assert_eq!(summary.rab_actual, Money::from_rupiah(6_000_000));
        assert_eq!(summary.additional_costs, Money::from_rupiah(500_000));
        assert_eq!(summary.total_spent, Money::from_rupiah(6_500_000));
        assert_eq!(summary.variance, Money::from_rupiah(3_500_000));
        assert_eq!(summary.variance_percent, dec!(35.00));
        assert_eq!(summary.status, BudgetStatus::Under);
        assert_eq!(summary.progress_percent, dec!(65.00));
        assert_eq!(summary.rab_variance, Money::ZERO);
    }

    #[test]
    fn test_summary_over_budget_caps_progress() {
        let rab = RabAggregate {
            total_planned: Money::from_rupiah(10_000_000),
            total_actual: Money::from_rupiah(11_000_000),
            items_count: 3,
            status_counts: None,
        };
        let summary =
            MilestoneBudgetSummary::compute(Money::from_rupiah(10_000_000), &rab, Money::ZERO);

        assert_eq!(summary.variance, Money::from_rupiah(-1_000_000));
        assert_eq!(summary.status, BudgetStatus::Over);
        assert_eq!(summary.progress_percent, dec!(100));
    }

    #[test]
    fn test_summary_zero_budget() {
        let summary = MilestoneBudgetSummary::compute(
            Money::ZERO,
            &RabAggregate::empty(),
            Money::ZERO,
        );
        assert_eq!(summary.variance_percent, Decimal::ZERO);
        assert_eq!(summary.progress_percent, Decimal::ZERO);
    }

    #[test]
    fn test_additional_costs_only_counts_unlinked() {
        let realizations = vec![
            realization(CostCategory::Materials, 2_000_000, true),
            realization(CostCategory::Overhead, 300_000, false),
            realization(CostCategory::Indirect, 200_000, false),
        ];
        assert_eq!(
            additional_costs_total(&realizations),
            Money::from_rupiah(500_000)
        );
    }

    #[test]
    fn test_category_breakdown_sorted_desc() {
        let realizations = vec![
            realization(CostCategory::Materials, 100_000, true),
            realization(CostCategory::Labor, 400_000, true),
            realization(CostCategory::Materials, 200_000, false),
        ];
        let breakdown = category_breakdown(&realizations);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, CostCategory::Labor);
        assert_eq!(breakdown[0].total, Money::from_rupiah(400_000));
        assert_eq!(breakdown[1].category, CostCategory::Materials);
        assert_eq!(breakdown[1].total, Money::from_rupiah(300_000));
    }
}
