//! Workflow progress snapshot fetch and sync.

use std::sync::Arc;

use chrono::Utc;
use graha_core::workflow::types::WorkflowProgress;
use graha_shared::types::{MilestoneId, ProjectId};
use serde_json::json;

use crate::error::ClientError;
use crate::http::Transport;
use crate::wire::ProgressDto;

/// Resource client for milestone workflow progress.
pub struct ProgressClient<T: Transport> {
    transport: Arc<T>,
}

impl<T: Transport> ProgressClient<T> {
    /// Creates a client over the given transport.
    pub fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Fetches the current progress snapshot.
    ///
    /// `overall_progress` is the store's precomputed aggregate and is
    /// carried through untouched; use [`Self::sync`] to force a
    /// server-side recomputation.
    pub async fn fetch(
        &self,
        project: ProjectId,
        milestone: MilestoneId,
    ) -> Result<WorkflowProgress, ClientError> {
        let data = self
            .transport
            .get(&format!(
                "projects/{project}/milestones/{milestone}/progress"
            ))
            .await?;
        let dto: ProgressDto = serde_json::from_value(data)?;
        Ok(dto.into_progress(milestone, Utc::now()))
    }

    /// Forces the store to recompute the snapshot, then returns it.
    pub async fn sync(
        &self,
        project: ProjectId,
        milestone: MilestoneId,
    ) -> Result<WorkflowProgress, ClientError> {
        let data = self
            .transport
            .post(
                &format!("projects/{project}/milestones/{milestone}/sync"),
                json!({}),
            )
            .await?;
        let dto: ProgressDto = serde_json::from_value(data)?;
        Ok(dto.into_progress(milestone, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockTransport;
    use graha_core::workflow::types::StageStatus;
    use mockall::predicate::str::contains;
    use serde_json::json;

    fn progress_payload(approved_count: u32) -> serde_json::Value {
        json!({
            "workflow_progress": {
                "rab_approved": { "status": true, "total_items": 3, "total_value": "9000000" },
                "purchase_orders": {
                    "total_count": 3,
                    "approved_count": approved_count,
                    "pending_count": 3 - approved_count,
                    "total_value": 9_000_000
                },
                "receipts": { "received_count": 0, "expected_count": approved_count },
                "berita_acara": { "total_count": 0, "completed_percentage": 0 },
                "payments": { "paid_count": 0, "payment_percentage": 0 }
            },
            "overall_progress": 30,
            "last_synced": "2026-07-10T12:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_fetch_resolves_stages() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .with(contains("/progress"))
            .times(1)
            .returning(|_| Ok(progress_payload(3)));

        let client = ProgressClient::new(Arc::new(transport));
        let progress = client
            .fetch(ProjectId::new(), MilestoneId::new())
            .await
            .unwrap();

        assert_eq!(progress.overall_progress, 30);
        assert_eq!(
            progress.purchase_orders.stage_status(),
            StageStatus::Completed
        );
        assert_eq!(progress.receipts.stage_status(), StageStatus::Pending);
    }

    #[tokio::test]
    async fn test_sync_posts_then_returns_snapshot() {
        let mut transport = MockTransport::new();
        transport
            .expect_post()
            .with(contains("/sync"), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(progress_payload(2)));

        let client = ProgressClient::new(Arc::new(transport));
        let progress = client
            .sync(ProjectId::new(), MilestoneId::new())
            .await
            .unwrap();
        assert_eq!(
            progress.purchase_orders.stage_status(),
            StageStatus::Active
        );
    }
}
