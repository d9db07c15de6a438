//! Milestone budget summary assembly.
//!
//! The summary is derived on every read: the RAB aggregate comes from the
//! items listing, additional costs from the milestone's cost entries, and
//! the budget figure from the cost-summary endpoint. Core does the math;
//! nothing here is persisted.

use std::sync::Arc;

use graha_core::budget::summary::{
    additional_costs_total, category_breakdown, MilestoneBudgetSummary,
};
use graha_core::budget::types::RabItemListing;
use graha_core::realization::types::CostRealization;
use graha_shared::types::{MilestoneId, Money, ProjectId};
use rust_decimal::Decimal;

use crate::error::ClientError;
use crate::http::Transport;
use crate::rab::RabItemsClient;
use crate::realizations::RealizationsClient;
use crate::wire::CostSummaryDto;

/// Derives the milestone budget summary from the backing store.
pub struct MilestoneSummaryClient<T: Transport> {
    transport: Arc<T>,
    rab: RabItemsClient<T>,
}

impl<T: Transport> MilestoneSummaryClient<T> {
    /// Creates a client over the given transport.
    pub fn new(transport: Arc<T>) -> Self {
        let rab = RabItemsClient::new(Arc::clone(&transport));
        Self { transport, rab }
    }

    /// Fetches everything the summary needs and computes it.
    ///
    /// Issues three reads (cost summary, RAB items, cost entries); callers
    /// that just recorded a write must await that write's response first -
    /// the store re-derives item actuals on write, and a summary read that
    /// races it observes the previous state.
    pub async fn fetch(
        &self,
        realizations: &RealizationsClient<T>,
        project: ProjectId,
        milestone: MilestoneId,
    ) -> Result<MilestoneBudgetSummary, ClientError> {
        let budget = self.milestone_budget(project, milestone).await?;
        let listing = self.rab.list_for_milestone(project, milestone).await?;
        let costs = realizations.list_for_milestone(project, milestone).await?;

        Ok(Self::assemble(budget, &listing, &costs))
    }

    /// Pure assembly step, split out for testing.
    #[must_use]
    pub fn assemble(
        budget: Money,
        listing: &RabItemListing,
        costs: &[CostRealization],
    ) -> MilestoneBudgetSummary {
        let rab = listing.aggregate();
        let additional = additional_costs_total(costs);
        MilestoneBudgetSummary::compute(budget, &rab, additional)
            .with_breakdown(category_breakdown(costs))
    }

    async fn milestone_budget(
        &self,
        project: ProjectId,
        milestone: MilestoneId,
    ) -> Result<Money, ClientError> {
        let data = self
            .transport
            .get(&format!(
                "projects/{project}/milestones/{milestone}/costs/summary"
            ))
            .await?;
        let summary: CostSummaryDto = serde_json::from_value(data)?;
        Ok(Money::new(summary.budget.unwrap_or(Decimal::ZERO)))
    }
}
