//! Stage status resolution and advisory alert generation.
//!
//! Every status here is a pure function of one snapshot: resolving twice
//! from unchanged counts yields identical results, and no stage consults
//! another stage's status.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::types::{
    AlertSeverity, BeritaAcaraStage, PaymentStage, PurchaseOrderEntry, PurchaseOrderStage,
    PurchaseOrderStatus, RabApprovedStage, ReceiptEntry, ReceiptStage, StageAlert, StageStatus,
    WorkflowProgress, WorkflowStage,
};

/// Days an approved PO may wait for a receipt before an alert is raised.
const RECEIPT_ALERT_AFTER_DAYS: i64 = 7;
/// Days after which the alert escalates to high severity.
const RECEIPT_ALERT_HIGH_AFTER_DAYS: i64 = 14;

impl RabApprovedStage {
    /// Completed once the linked RAB is approved; pending until then.
    #[must_use]
    pub const fn stage_status(&self) -> StageStatus {
        if self.status {
            StageStatus::Completed
        } else {
            StageStatus::Pending
        }
    }
}

impl PurchaseOrderStage {
    /// Completed when every raised PO is approved (and at least one
    /// exists); active while any PO exists; pending otherwise.
    #[must_use]
    pub const fn stage_status(&self) -> StageStatus {
        if self.approved_count >= self.total_count && self.total_count > 0 {
            StageStatus::Completed
        } else if self.total_count > 0 {
            StageStatus::Active
        } else {
            StageStatus::Pending
        }
    }
}

impl ReceiptStage {
    /// Completed when every expected receipt arrived (and any were
    /// expected); active once the first receipt arrives; pending otherwise.
    #[must_use]
    pub const fn stage_status(&self) -> StageStatus {
        if self.received_count >= self.expected_count && self.expected_count > 0 {
            StageStatus::Completed
        } else if self.received_count > 0 {
            StageStatus::Active
        } else {
            StageStatus::Pending
        }
    }
}

impl BeritaAcaraStage {
    /// Completed at 100% certified completion; active while any
    /// certificate exists; pending otherwise.
    #[must_use]
    pub fn stage_status(&self) -> StageStatus {
        if self.completed_percentage >= Decimal::ONE_HUNDRED {
            StageStatus::Completed
        } else if self.total_count > 0 {
            StageStatus::Active
        } else {
            StageStatus::Pending
        }
    }
}

impl PaymentStage {
    /// Completed at 100% payment; active once anything is paid; pending
    /// otherwise.
    #[must_use]
    pub fn stage_status(&self) -> StageStatus {
        if self.payment_percentage >= Decimal::ONE_HUNDRED {
            StageStatus::Completed
        } else if self.paid_count > 0 {
            StageStatus::Active
        } else {
            StageStatus::Pending
        }
    }
}

impl WorkflowProgress {
    /// Resolves all five stage statuses, in workflow order.
    #[must_use]
    pub fn stage_statuses(&self) -> [(WorkflowStage, StageStatus); 5] {
        [
            (WorkflowStage::RabApproval, self.rab_approved.stage_status()),
            (
                WorkflowStage::PurchaseOrders,
                self.purchase_orders.stage_status(),
            ),
            (WorkflowStage::Receipts, self.receipts.stage_status()),
            (WorkflowStage::BeritaAcara, self.berita_acara.stage_status()),
            (WorkflowStage::Payments, self.payments.stage_status()),
        ]
    }
}

/// Generates delivery-delay alerts for approved POs with no receipt.
///
/// An approved PO with no matching receipt after seven days yields a
/// `delivery_delay` alert, escalating to high severity after fourteen.
/// Alerts are advisory only and never affect stage status.
#[must_use]
pub fn receipt_alerts(
    pos: &[PurchaseOrderEntry],
    receipts: &[ReceiptEntry],
    now: DateTime<Utc>,
) -> Vec<StageAlert> {
    let mut alerts = Vec::new();

    for po in pos {
        if po.status != PurchaseOrderStatus::Approved {
            continue;
        }
        if receipts.iter().any(|r| r.po_number == po.po_number) {
            continue;
        }

        let days_waiting = (now - po.date).num_days();
        if days_waiting > RECEIPT_ALERT_AFTER_DAYS {
            alerts.push(StageAlert {
                kind: "delivery_delay".to_string(),
                severity: if days_waiting > RECEIPT_ALERT_HIGH_AFTER_DAYS {
                    AlertSeverity::High
                } else {
                    AlertSeverity::Medium
                },
                message: format!(
                    "{} approved {days_waiting} days ago, no receipt yet",
                    po.po_number
                ),
                po_number: Some(po.po_number.clone()),
                days_waiting,
            });
        }
    }

    alerts
}
