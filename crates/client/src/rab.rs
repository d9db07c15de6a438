//! RAB item listings and per-item realizations.

use std::sync::Arc;

use graha_core::budget::types::{ItemSource, RabItemListing};
use graha_core::realization::types::CostRealization;
use graha_shared::types::{MilestoneId, ProjectId, RabItemId};
use tracing::warn;

use crate::error::ClientError;
use crate::http::Transport;
use crate::wire::{RabItemDto, RealizationDto};

/// Resource client for budgeted line items.
pub struct RabItemsClient<T: Transport> {
    transport: Arc<T>,
}

impl<T: Transport> RabItemsClient<T> {
    /// Creates a client over the given transport.
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Lists the RAB items backing a milestone.
    ///
    /// Approved items are fetched first. When none exist, the listing
    /// falls back to draft/pending items so recording is not blocked -
    /// tagged `DraftFallback` so callers can surface an explicit warning
    /// instead of silently treating drafts as approved.
    pub async fn list_for_milestone(
        &self,
        project: ProjectId,
        milestone: MilestoneId,
    ) -> Result<RabItemListing, ClientError> {
        let approved = self
            .fetch_items(project, milestone, Some("approved"))
            .await?;
        if !approved.items.is_empty() {
            return Ok(approved);
        }

        let fallback = self.fetch_items(project, milestone, None).await?;
        if fallback.items.is_empty() {
            // Nothing at all: an empty approved listing, not a fallback.
            return Ok(RabItemListing {
                source: ItemSource::Approved,
                items: vec![],
            });
        }

        warn!(
            %milestone,
            count = fallback.items.len(),
            "no approved RAB items; serving draft items as fallback"
        );
        Ok(RabItemListing {
            source: ItemSource::DraftFallback,
            items: fallback.items,
        })
    }

    /// Fetches the realizations recorded against one item.
    ///
    /// The sequence is finite and materialized from the backing store; it
    /// reflects the store state at fetch time.
    pub async fn realizations(
        &self,
        milestone: MilestoneId,
        item: RabItemId,
    ) -> Result<Vec<CostRealization>, ClientError> {
        let data = self
            .transport
            .get(&format!("rab-items/{item}/realizations"))
            .await?;
        let rows: Vec<RealizationDto> = serde_json::from_value(data)?;
        rows.into_iter()
            .map(|dto| dto.into_realization(milestone))
            .collect()
    }

    async fn fetch_items(
        &self,
        project: ProjectId,
        milestone: MilestoneId,
        approval_status: Option<&str>,
    ) -> Result<RabItemListing, ClientError> {
        let mut path = format!("projects/{project}/milestones/{milestone}/rab-items");
        if let Some(status) = approval_status {
            path.push_str(&format!("?approval_status={status}"));
        }

        let data = self.transport.get(&path).await?;
        let rows: Vec<RabItemDto> = serde_json::from_value(data)?;
        Ok(RabItemListing {
            source: ItemSource::Approved,
            items: rows.into_iter().map(RabItemDto::into_item).collect(),
        })
    }
}
