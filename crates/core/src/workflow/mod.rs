//! Five-stage procurement workflow resolution.
//!
//! A milestone linked to a RAB category moves through five ordered stages:
//! RAB approval, purchase orders, goods receipts, acceptance certificates
//! (Berita Acara) and progress payments. Each stage's status is a pure
//! function of its snapshot counts - never set directly, never dependent
//! on another stage's status.
//!
//! # Modules
//!
//! - `types` - Stage snapshots and the workflow progress aggregate
//! - `stage` - Status resolution and advisory alert generation

pub mod stage;
pub mod types;

#[cfg(test)]
mod props;

pub use stage::receipt_alerts;
pub use types::{
    AlertSeverity, BeritaAcaraStage, PaymentStage, PurchaseOrderEntry, PurchaseOrderStage,
    PurchaseOrderStatus, RabApprovedStage, ReceiptEntry, ReceiptStage, StageAlert, StageStatus,
    WorkflowProgress, WorkflowStage,
};
