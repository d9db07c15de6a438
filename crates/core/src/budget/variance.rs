//! Budget variance calculation and status classification.

use graha_shared::types::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Milestone budget status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// Variance is at least 10% of the budget.
    Under,
    /// Variance is non-negative but below the 10% threshold.
    OnTrack,
    /// Spending exceeds the budget.
    Over,
}

impl BudgetStatus {
    /// Classifies a milestone's variance against its budget.
    ///
    /// Precedence is load-bearing and must not be reordered:
    /// 1. `under` when `variance >= budget * 0.10`
    /// 2. `over` when `variance < 0`
    /// 3. `on_track` otherwise
    ///
    /// With a zero budget a zero variance therefore classifies as `under`.
    #[must_use]
    pub fn classify(budget: Money, variance: Money) -> Self {
        let threshold = budget.amount() * Decimal::new(10, 2);
        if variance.amount() >= threshold {
            Self::Under
        } else if variance.is_negative() {
            Self::Over
        } else {
            Self::OnTrack
        }
    }

    /// Returns the wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Under => "under",
            Self::OnTrack => "on_track",
            Self::Over => "over",
        }
    }
}

/// Planned-vs-actual variance for a single budget line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarianceResult {
    /// Planned amount.
    pub planned: Money,
    /// Actual amount.
    pub actual: Money,
    /// Planned minus actual.
    pub variance: Money,
    /// Variance as a percentage of plan, rounded to 2 decimals.
    pub variance_percent: Decimal,
    /// Actual as a percentage of plan, rounded to 2 decimals.
    pub utilization_percent: Decimal,
}

impl VarianceResult {
    /// Calculates variance between planned and actual amounts.
    ///
    /// Percentages are zero when the plan is zero; never divides by zero.
    #[must_use]
    pub fn calculate(planned: Money, actual: Money) -> Self {
        let variance = planned - actual;
        Self {
            planned,
            actual,
            variance,
            variance_percent: variance.percent_of(planned),
            utilization_percent: actual.percent_of(planned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_variance_under_plan() {
        let result = VarianceResult::calculate(
            Money::from_rupiah(1_000_000),
            Money::from_rupiah(800_000),
        );
        assert_eq!(result.variance, Money::from_rupiah(200_000));
        assert_eq!(result.variance_percent, dec!(20.00));
        assert_eq!(result.utilization_percent, dec!(80.00));
    }

    #[test]
    fn test_variance_over_plan() {
        let result = VarianceResult::calculate(
            Money::from_rupiah(1_000_000),
            Money::from_rupiah(1_200_000),
        );
        assert_eq!(result.variance, Money::from_rupiah(-200_000));
        assert_eq!(result.variance_percent, dec!(-20.00));
        assert_eq!(result.utilization_percent, dec!(120.00));
    }

    #[test]
    fn test_zero_plan_percentages() {
        let result = VarianceResult::calculate(Money::ZERO, Money::from_rupiah(500_000));
        assert_eq!(result.variance_percent, Decimal::ZERO);
        assert_eq!(result.utilization_percent, Decimal::ZERO);
    }

    // Classification boundaries: exactly 10% is under, exactly zero is
    // on_track, one Rupiah over is over.
    #[rstest]
    #[case(10_000_000, 1_000_000, BudgetStatus::Under)]
    #[case(10_000_000, 999_999, BudgetStatus::OnTrack)]
    #[case(10_000_000, 0, BudgetStatus::OnTrack)]
    #[case(10_000_000, -1, BudgetStatus::Over)]
    #[case(10_000_000, 3_500_000, BudgetStatus::Under)]
    fn test_classification_boundaries(
        #[case] budget: i64,
        #[case] variance: i64,
        #[case] expected: BudgetStatus,
    ) {
        assert_eq!(
            BudgetStatus::classify(Money::from_rupiah(budget), Money::from_rupiah(variance)),
            expected
        );
    }

    #[test]
    fn test_zero_budget_zero_variance_is_under() {
        // Degenerate corner of the precedence rule: 0 >= 0.
        assert_eq!(
            BudgetStatus::classify(Money::ZERO, Money::ZERO),
            BudgetStatus::Under
        );
    }

    #[test]
    fn test_status_as_str() {
        assert_eq!(BudgetStatus::Under.as_str(), "under");
        assert_eq!(BudgetStatus::OnTrack.as_str(), "on_track");
        assert_eq!(BudgetStatus::Over.as_str(), "over");
    }
}
