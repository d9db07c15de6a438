//! Recording, editing and deleting realizations.
//!
//! Writes are validated in core before anything is sent. After a write
//! succeeds, the dependent views (linked item, milestone summary, funding
//! balances) are refreshed as independent requests, in order. There is no
//! cross-request atomicity: a refresh that fails after a successful write
//! leaves the write in place and surfaces a non-fatal warning instead of
//! rolling back.

use std::sync::Arc;

use graha_core::realization::recorder::RealizationRecorder;
use graha_core::realization::types::{CostRealization, RealizationUpdate, RecordRealization};
use graha_shared::types::{MilestoneId, ProjectId, RabItemId, RealizationId};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::warn;

use crate::accounts::AccountsClient;
use crate::error::ClientError;
use crate::http::Transport;
use crate::wire::{CostSummaryDto, RealizationDto};

/// Which dependent view failed to refresh after a successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTarget {
    /// The linked RAB item's realization list.
    Item,
    /// The milestone cost summary.
    Summary,
    /// The funding-account balances.
    Balances,
}

/// A non-fatal post-write refresh failure.
///
/// The write itself applied; only the named view may be stale.
#[derive(Debug, Clone)]
pub struct RefreshWarning {
    /// The view that failed to refresh.
    pub target: RefreshTarget,
    /// What went wrong.
    pub message: String,
}

/// Outcome of a record or update: the written entity plus any refresh
/// warnings. An empty warning list means every dependent view was
/// refreshed.
#[derive(Debug)]
pub struct RecordOutcome {
    /// The realization as persisted by the store.
    pub realization: CostRealization,
    /// Non-fatal refresh failures.
    pub warnings: Vec<RefreshWarning>,
}

/// Outcome of a delete.
#[derive(Debug)]
pub struct DeleteOutcome {
    /// Non-fatal refresh failures.
    pub warnings: Vec<RefreshWarning>,
}

/// Resource client for cost realizations.
pub struct RealizationsClient<T: Transport> {
    transport: Arc<T>,
    accounts: AccountsClient<T>,
}

impl<T: Transport> RealizationsClient<T> {
    /// Creates a client over the given transport.
    pub fn new(transport: Arc<T>, accounts: AccountsClient<T>) -> Self {
        Self { transport, accounts }
    }

    /// Lists every cost entry of a milestone (RAB-linked and additional).
    pub async fn list_for_milestone(
        &self,
        project: ProjectId,
        milestone: MilestoneId,
    ) -> Result<Vec<CostRealization>, ClientError> {
        let data = self
            .transport
            .get(&format!("projects/{project}/milestones/{milestone}/costs"))
            .await?;
        let rows: Vec<RealizationDto> = serde_json::from_value(data)?;
        rows.into_iter()
            .map(|dto| dto.into_realization(milestone))
            .collect()
    }

    /// Records a new realization.
    ///
    /// Validation (amount, expense account, progress, funding balance)
    /// happens before the request is sent; a rejected input never reaches
    /// the network. The funding balance is re-fetched for the check, not
    /// read from cache - and even then the check is best-effort: another
    /// user may spend from the same account concurrently.
    pub async fn record(
        &self,
        project: ProjectId,
        milestone: MilestoneId,
        input: RecordRealization,
    ) -> Result<RecordOutcome, ClientError> {
        let funding = match input.source_account_id {
            Some(id) => self.accounts.funding_account_fresh(id).await?,
            None => None,
        };
        let validated = RealizationRecorder::validate(&input, funding.as_ref())
            .map_err(ClientError::Validation)?;

        let mut body = json!({
            "costCategory": validated.category,
            "costType": input.cost_type,
            "amount": input.amount.amount(),
            "description": input.description,
        });
        if let Some(account) = input.expense_account_id {
            body["accountId"] = json!(account);
        }
        if let Some(reference) = &input.reference_number {
            body["referenceNumber"] = json!(reference);
        }
        if let Some(source) = input.source_account_id {
            body["sourceAccountId"] = json!(source);
        }
        if let Some(item) = input.rab_item_id {
            body["rabItemId"] = json!(item);
            body["progress"] = json!(validated.progress);
        }

        let data = self
            .transport
            .post(
                &format!("projects/{project}/milestones/{milestone}/costs"),
                body,
            )
            .await?;
        let realization: RealizationDto = serde_json::from_value(data)?;
        let realization = realization.into_realization(milestone)?;

        let warnings = self
            .refresh_after_write(
                project,
                milestone,
                input.rab_item_id,
                input.source_account_id.is_some(),
            )
            .await;

        Ok(RecordOutcome {
            realization,
            warnings,
        })
    }

    /// Edits an existing realization.
    ///
    /// `current` is the entry as last fetched; it supplies the old amount
    /// and funding account for the balance-delta rule (same account: only
    /// the increase must be covered; changed account: the full new
    /// amount).
    pub async fn update(
        &self,
        project: ProjectId,
        milestone: MilestoneId,
        current: &CostRealization,
        update: RealizationUpdate,
    ) -> Result<RecordOutcome, ClientError> {
        let new_amount = update.amount.unwrap_or(current.amount);
        let new_source = update
            .source_account_id
            .unwrap_or(current.source_account_id);

        let funding = match new_source {
            Some(id) => self.accounts.funding_account_fresh(id).await?,
            None => None,
        };
        RealizationRecorder::validate_update(
            current.amount,
            current.source_account_id,
            new_amount,
            new_source,
            funding.as_ref(),
        )
        .map_err(ClientError::Validation)?;

        let mut body = serde_json::Map::new();
        if let Some(amount) = update.amount {
            body.insert("amount".to_string(), json!(amount.amount()));
        }
        if let Some(description) = &update.description {
            body.insert("description".to_string(), json!(description));
        }
        if let Some(account) = update.expense_account_id {
            body.insert("accountId".to_string(), json!(account));
        }
        if let Some(source) = &update.source_account_id {
            body.insert(
                "sourceAccountId".to_string(),
                source.map_or(Value::Null, |id| json!(id)),
            );
        }
        if let Some(progress) = update.progress {
            body.insert(
                "progress".to_string(),
                json!(progress.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)),
            );
        }

        let data = self
            .transport
            .put(&format!("realizations/{}", current.id), Value::Object(body))
            .await?;
        let realization: RealizationDto = serde_json::from_value(data)?;
        let realization = realization.into_realization(milestone)?;

        let touched_balance =
            current.source_account_id.is_some() || new_source.is_some();
        let warnings = self
            .refresh_after_write(project, milestone, current.rab_item_id, touched_balance)
            .await;

        Ok(RecordOutcome {
            realization,
            warnings,
        })
    }

    /// Deletes a realization.
    ///
    /// The store restores any consumed funding balance and re-derives the
    /// owning item's actual amount and progress; the refreshes here pull
    /// those derived views back in.
    pub async fn delete(
        &self,
        project: ProjectId,
        milestone: MilestoneId,
        id: RealizationId,
        rab_item_id: Option<RabItemId>,
        had_funding_account: bool,
    ) -> Result<DeleteOutcome, ClientError> {
        self.transport
            .delete(&format!("realizations/{id}"))
            .await?;

        let warnings = self
            .refresh_after_write(project, milestone, rab_item_id, had_funding_account)
            .await;
        Ok(DeleteOutcome { warnings })
    }

    /// Refreshes the views a write invalidates, one independent request
    /// each, collecting failures as warnings instead of failing the write.
    async fn refresh_after_write(
        &self,
        project: ProjectId,
        milestone: MilestoneId,
        rab_item_id: Option<RabItemId>,
        touched_balance: bool,
    ) -> Vec<RefreshWarning> {
        let mut warnings = Vec::new();

        if let Some(item) = rab_item_id {
            if let Err(err) = self
                .transport
                .get(&format!("rab-items/{item}/realizations"))
                .await
            {
                warn!(%item, error = %err, "item refresh failed after write");
                warnings.push(RefreshWarning {
                    target: RefreshTarget::Item,
                    message: err.to_string(),
                });
            }
        }

        match self
            .transport
            .get(&format!(
                "projects/{project}/milestones/{milestone}/costs/summary"
            ))
            .await
            .and_then(|data| Ok(serde_json::from_value::<CostSummaryDto>(data)?))
        {
            Ok(_) => {}
            Err(err) => {
                warn!(%milestone, error = %err, "summary refresh failed after write");
                warnings.push(RefreshWarning {
                    target: RefreshTarget::Summary,
                    message: err.to_string(),
                });
            }
        }

        if touched_balance {
            self.accounts.invalidate();
            if let Err(err) = self.accounts.funding_accounts().await {
                warn!(error = %err, "balance refresh failed after write");
                warnings.push(RefreshWarning {
                    target: RefreshTarget::Balances,
                    message: err.to_string(),
                });
            }
        }

        warnings
    }
}
