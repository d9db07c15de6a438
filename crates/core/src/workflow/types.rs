//! Workflow domain types.

use chrono::{DateTime, Utc};
use graha_shared::types::{MilestoneId, Money, PurchaseOrderId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status of a single workflow stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    /// Nothing has happened in this stage yet.
    Pending,
    /// The stage has started but is not complete.
    Active,
    /// The stage is complete.
    Completed,
}

impl StageStatus {
    /// Returns the wire representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// The five workflow stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    /// RAB approval.
    RabApproval,
    /// Purchase orders.
    PurchaseOrders,
    /// Goods receipts (Tanda Terima).
    Receipts,
    /// Acceptance certificates (Berita Acara).
    BeritaAcara,
    /// Progress payments.
    Payments,
}

/// Lifecycle status of a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    /// Draft, not yet submitted.
    Draft,
    /// Awaiting approval.
    Pending,
    /// Approved for purchase.
    Approved,
    /// Goods received.
    Received,
    /// Cancelled.
    Cancelled,
    /// Any status this core does not track.
    #[serde(other)]
    Unknown,
}

/// One purchase order in the PO stage snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderEntry {
    /// Purchase order ID.
    pub po_id: PurchaseOrderId,
    /// Human-readable PO number.
    pub po_number: String,
    /// Supplier name.
    pub supplier: String,
    /// Total PO value.
    pub value: Money,
    /// PO status.
    pub status: PurchaseOrderStatus,
    /// When the PO was created/approved.
    pub date: DateTime<Utc>,
}

/// One goods receipt in the receipt stage snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptEntry {
    /// Receipt number.
    pub receipt_number: String,
    /// PO the receipt belongs to.
    pub po_number: String,
    /// When the goods arrived.
    pub received_date: DateTime<Utc>,
    /// Received value.
    pub value: Money,
}

/// Severity of an advisory stage alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Worth a look.
    Medium,
    /// Needs attention.
    High,
}

/// Non-fatal advisory attached to a stage. Never affects stage status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageAlert {
    /// Alert kind (e.g. "delivery_delay").
    pub kind: String,
    /// Severity.
    pub severity: AlertSeverity,
    /// Human-readable message.
    pub message: String,
    /// PO the alert concerns, if any.
    pub po_number: Option<String>,
    /// How many days the condition has persisted.
    pub days_waiting: i64,
}

/// RAB approval stage snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RabApprovedStage {
    /// Whether the linked category's RAB is approved.
    pub status: bool,
    /// Number of approved items.
    pub total_items: u32,
    /// Total approved value.
    pub total_value: Money,
    /// When approval happened.
    pub approved_date: Option<DateTime<Utc>>,
}

/// Purchase order stage snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderStage {
    /// POs raised against the category.
    pub total_count: u32,
    /// POs approved.
    pub approved_count: u32,
    /// POs awaiting approval.
    pub pending_count: u32,
    /// Total PO value.
    pub total_value: Money,
    /// Per-PO detail.
    pub items: Vec<PurchaseOrderEntry>,
}

/// Goods receipt stage snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptStage {
    /// Receipts recorded.
    pub received_count: u32,
    /// Receipts expected (approved POs).
    pub expected_count: u32,
    /// Value received so far.
    pub received_value: Money,
    /// Value still outstanding.
    pub pending_value: Money,
    /// Per-receipt detail.
    pub items: Vec<ReceiptEntry>,
    /// Advisory alerts (e.g. overdue deliveries).
    pub alerts: Vec<StageAlert>,
}

/// Berita Acara (acceptance certificate) stage snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeritaAcaraStage {
    /// Certificates issued.
    pub total_count: u32,
    /// Average completion percentage across certificates.
    pub completed_percentage: Decimal,
    /// Total certified value.
    pub total_value: Money,
}

/// Progress payment stage snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStage {
    /// Payments completed.
    pub paid_count: u32,
    /// Value paid out.
    pub paid_value: Money,
    /// Value still unpaid.
    pub pending_value: Money,
    /// Paid value as a percentage of the approved RAB value.
    pub payment_percentage: Decimal,
}

/// Workflow progress snapshot for one milestone.
///
/// `overall_progress` is a precomputed aggregate owned by the backing
/// store; it is carried through as-is and never recomputed here. A `sync`
/// call forces server-side recomputation and refreshes this snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowProgress {
    /// Milestone this snapshot belongs to.
    pub milestone_id: MilestoneId,
    /// RAB approval stage.
    pub rab_approved: RabApprovedStage,
    /// Purchase order stage.
    pub purchase_orders: PurchaseOrderStage,
    /// Goods receipt stage.
    pub receipts: ReceiptStage,
    /// Berita Acara stage.
    pub berita_acara: BeritaAcaraStage,
    /// Payment stage.
    pub payments: PaymentStage,
    /// Authoritative overall progress, 0-100.
    pub overall_progress: u8,
    /// When the store last recomputed this snapshot.
    pub last_synced: DateTime<Utc>,
}
