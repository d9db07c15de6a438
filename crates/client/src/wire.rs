//! Wire DTOs and normalization into core types.
//!
//! The remote API is not consistent about field spelling: depending on the
//! endpoint the same field arrives as `rabItemId` or `rab_item_id`, and
//! decimal values arrive as JSON numbers or as strings ("6000000.00").
//! Everything is normalized here, once, at the boundary - core logic never
//! branches on spelling.

use chrono::{DateTime, Utc};
use graha_core::accounts::types::{AccountSubType, AccountType, ChartAccount};
use graha_core::budget::types::{ApprovalStatus, BudgetLineItem, ItemType};
use graha_core::realization::types::{CostCategory, CostRealization, CostType};
use graha_core::workflow::types::{
    BeritaAcaraStage, PaymentStage, PurchaseOrderEntry, PurchaseOrderStage, PurchaseOrderStatus,
    RabApprovedStage, ReceiptEntry, ReceiptStage, StageAlert, WorkflowProgress,
};
use graha_shared::types::{
    AccountId, MilestoneId, Money, PurchaseOrderId, RabItemId, RealizationId, UserId,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ClientError;

/// A RAB item row as served by the items endpoint.
#[derive(Debug, Deserialize)]
pub struct RabItemDto {
    /// Item ID.
    pub id: Uuid,
    /// Item description.
    #[serde(default)]
    pub description: String,
    /// Work-category name.
    #[serde(default)]
    pub category: Option<String>,
    /// Item type string.
    #[serde(default, alias = "itemType")]
    pub item_type: Option<String>,
    /// Unit of measure.
    #[serde(default)]
    pub unit: Option<String>,
    /// Budgeted quantity.
    #[serde(default)]
    pub quantity: Option<Decimal>,
    /// Budgeted unit price.
    #[serde(default, alias = "unitPrice")]
    pub unit_price: Option<Decimal>,
    /// Planned amount; recomputed from quantity x unit price when absent.
    #[serde(default, alias = "plannedAmount", alias = "totalBudget", alias = "total_budget")]
    pub planned_amount: Option<Decimal>,
    /// Realized amount.
    #[serde(default, alias = "actualAmount", alias = "totalAmount")]
    pub actual_amount: Option<Decimal>,
    /// Physical progress.
    #[serde(default, alias = "progressPercentage")]
    pub progress_percentage: Option<Decimal>,
    /// Number of realizations.
    #[serde(default, alias = "realizationCount")]
    pub realization_count: Option<u32>,
    /// Approval status string.
    #[serde(default, alias = "approvalStatus", alias = "status")]
    pub approval_status: Option<String>,
}

impl RabItemDto {
    /// Normalizes into the canonical core type.
    #[must_use]
    pub fn into_item(self) -> BudgetLineItem {
        let quantity = self.quantity.unwrap_or(Decimal::ZERO);
        let unit_price = Money::new(self.unit_price.unwrap_or(Decimal::ZERO));
        let planned = self
            .planned_amount
            .map_or_else(|| unit_price * quantity, Money::new);

        BudgetLineItem {
            id: RabItemId::from_uuid(self.id),
            description: self.description,
            category: self.category.unwrap_or_default(),
            item_type: self.item_type.as_deref().and_then(ItemType::parse),
            unit: self.unit.unwrap_or_default(),
            quantity,
            unit_price,
            planned_amount: planned,
            actual_amount: Money::new(self.actual_amount.unwrap_or(Decimal::ZERO)),
            progress_percentage: self.progress_percentage.unwrap_or(Decimal::ZERO),
            realization_count: self.realization_count.unwrap_or(0),
            approval_status: self
                .approval_status
                .as_deref()
                .and_then(ApprovalStatus::parse)
                .unwrap_or(ApprovalStatus::Draft),
        }
    }
}

/// A cost/realization row as served by the costs endpoints.
#[derive(Debug, Deserialize)]
pub struct RealizationDto {
    /// Realization ID.
    pub id: Uuid,
    /// Owning milestone.
    #[serde(default, alias = "milestoneId")]
    pub milestone_id: Option<Uuid>,
    /// Linked RAB item.
    #[serde(default, alias = "rabItemId")]
    pub rab_item_id: Option<Uuid>,
    /// Category string.
    #[serde(default, alias = "costCategory")]
    pub cost_category: Option<String>,
    /// Cost type string.
    #[serde(default, alias = "costType")]
    pub cost_type: Option<String>,
    /// Amount.
    #[serde(default, alias = "actualValue", alias = "actual_value")]
    pub amount: Option<Decimal>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// PO reference number.
    #[serde(default, alias = "referenceNumber")]
    pub reference_number: Option<String>,
    /// Expense account.
    #[serde(default, alias = "accountId", alias = "account_id", alias = "expenseAccountId")]
    pub expense_account_id: Option<Uuid>,
    /// Funding account.
    #[serde(default, alias = "sourceAccountId")]
    pub source_account_id: Option<Uuid>,
    /// Progress contribution.
    #[serde(default)]
    pub progress: Option<Decimal>,
    /// Recording user.
    #[serde(default, alias = "recordedBy")]
    pub recorded_by: Option<Uuid>,
    /// Recording timestamp.
    #[serde(default, alias = "recordedAt", alias = "createdAt", alias = "created_at")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl RealizationDto {
    /// Normalizes into the canonical core type.
    ///
    /// `milestone_id` falls back to the requesting context when the row
    /// does not carry one.
    ///
    /// # Errors
    ///
    /// Returns a decode error when the row is missing its amount or
    /// expense account.
    pub fn into_realization(
        self,
        milestone: MilestoneId,
    ) -> Result<CostRealization, ClientError> {
        let amount = self
            .amount
            .ok_or_else(|| ClientError::Decode(format!("realization {} has no amount", self.id)))?;
        let expense_account_id = self.expense_account_id.ok_or_else(|| {
            ClientError::Decode(format!("realization {} has no expense account", self.id))
        })?;

        Ok(CostRealization {
            id: RealizationId::from_uuid(self.id),
            milestone_id: self
                .milestone_id
                .map_or(milestone, MilestoneId::from_uuid),
            rab_item_id: self.rab_item_id.map(RabItemId::from_uuid),
            category: self
                .cost_category
                .as_deref()
                .and_then(CostCategory::parse)
                .unwrap_or(CostCategory::Other),
            cost_type: self
                .cost_type
                .as_deref()
                .and_then(parse_cost_type)
                .unwrap_or(CostType::Actual),
            amount: Money::new(amount),
            description: self.description.unwrap_or_default(),
            reference_number: self.reference_number,
            expense_account_id: AccountId::from_uuid(expense_account_id),
            source_account_id: self.source_account_id.map(AccountId::from_uuid),
            progress: self.progress,
            recorded_by: self.recorded_by.map(UserId::from_uuid),
            recorded_at: self.recorded_at,
        })
    }
}

fn parse_cost_type(s: &str) -> Option<CostType> {
    match s.to_lowercase().as_str() {
        "planned" => Some(CostType::Planned),
        "actual" => Some(CostType::Actual),
        "change_order" => Some(CostType::ChangeOrder),
        "unforeseen" => Some(CostType::Unforeseen),
        _ => None,
    }
}

/// A chart-of-accounts row.
#[derive(Debug, Deserialize)]
pub struct ChartAccountDto {
    /// Account ID.
    pub id: Uuid,
    /// Account code.
    #[serde(default, alias = "accountCode", alias = "account_code")]
    pub code: Option<String>,
    /// Account name.
    #[serde(default, alias = "accountName", alias = "account_name")]
    pub name: Option<String>,
    /// Account type string.
    #[serde(default, alias = "accountType")]
    pub account_type: Option<String>,
    /// Sub-type string.
    #[serde(default, alias = "accountSubType")]
    pub account_sub_type: Option<String>,
    /// Hierarchy level.
    #[serde(default)]
    pub level: Option<u8>,
    /// Control-account flag.
    #[serde(default, alias = "isControlAccount")]
    pub is_control_account: Option<bool>,
    /// Current balance.
    #[serde(default, alias = "currentBalance")]
    pub current_balance: Option<Decimal>,
    /// Active flag.
    #[serde(default, alias = "isActive")]
    pub is_active: Option<bool>,
}

impl ChartAccountDto {
    /// Normalizes into the canonical core type. Rows whose account type is
    /// missing or unknown are dropped (`None`).
    #[must_use]
    pub fn into_account(self) -> Option<ChartAccount> {
        let account_type = AccountType::parse(self.account_type.as_deref()?)?;
        Some(ChartAccount {
            id: AccountId::from_uuid(self.id),
            code: self.code.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            account_type,
            account_sub_type: self.account_sub_type.as_deref().map(parse_sub_type),
            level: self.level.unwrap_or(2),
            is_control_account: self.is_control_account.unwrap_or(false),
            current_balance: Money::new(self.current_balance.unwrap_or(Decimal::ZERO)),
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

fn parse_sub_type(s: &str) -> AccountSubType {
    if s.eq_ignore_ascii_case("CASH_AND_BANK") {
        AccountSubType::CashAndBank
    } else {
        AccountSubType::Other
    }
}

/// Milestone cost summary aggregate as served by the summary endpoint.
#[derive(Debug, Deserialize)]
pub struct CostSummaryDto {
    /// Milestone budget.
    #[serde(default)]
    pub budget: Option<Decimal>,
    /// Total of actual-type costs.
    #[serde(default, alias = "totalActual")]
    pub total_actual: Option<Decimal>,
}

/// Workflow progress payload: `{ workflow_progress: {...}, overall_progress, last_synced }`.
#[derive(Debug, Deserialize)]
pub struct ProgressDto {
    /// Milestone the snapshot belongs to.
    #[serde(default, alias = "milestoneId")]
    pub milestone_id: Option<Uuid>,
    /// Stage snapshots.
    #[serde(alias = "workflowProgress")]
    pub workflow_progress: WorkflowStagesDto,
    /// Authoritative overall progress.
    #[serde(default, alias = "overallProgress")]
    pub overall_progress: Option<Decimal>,
    /// Last server-side recomputation.
    #[serde(default, alias = "lastSynced")]
    pub last_synced: Option<DateTime<Utc>>,
}

/// The five stage snapshots.
#[derive(Debug, Deserialize)]
pub struct WorkflowStagesDto {
    /// RAB stage.
    pub rab_approved: RabStageDto,
    /// PO stage.
    pub purchase_orders: PoStageDto,
    /// Receipt stage.
    pub receipts: ReceiptStageDto,
    /// Berita Acara stage.
    pub berita_acara: BaStageDto,
    /// Payment stage.
    pub payments: PaymentStageDto,
}

/// RAB stage snapshot.
#[derive(Debug, Deserialize)]
pub struct RabStageDto {
    /// Approval flag.
    #[serde(default)]
    pub status: bool,
    /// Approved item count.
    #[serde(default, alias = "totalItems")]
    pub total_items: Option<u32>,
    /// Approved value.
    #[serde(default, alias = "totalValue")]
    pub total_value: Option<Decimal>,
    /// Approval date.
    #[serde(default, alias = "approvedDate")]
    pub approved_date: Option<DateTime<Utc>>,
}

/// PO stage snapshot.
#[derive(Debug, Deserialize)]
pub struct PoStageDto {
    /// POs raised.
    #[serde(default, alias = "totalCount")]
    pub total_count: Option<u32>,
    /// POs approved.
    #[serde(default, alias = "approvedCount")]
    pub approved_count: Option<u32>,
    /// POs pending.
    #[serde(default, alias = "pendingCount")]
    pub pending_count: Option<u32>,
    /// Total PO value.
    #[serde(default, alias = "totalValue")]
    pub total_value: Option<Decimal>,
    /// Per-PO entries.
    #[serde(default)]
    pub items: Vec<PoEntryDto>,
}

/// One PO entry.
#[derive(Debug, Deserialize)]
pub struct PoEntryDto {
    /// PO ID.
    #[serde(alias = "poId")]
    pub po_id: Uuid,
    /// PO number.
    #[serde(alias = "poNumber")]
    pub po_number: String,
    /// Supplier name.
    #[serde(default)]
    pub supplier: Option<String>,
    /// PO value.
    #[serde(default)]
    pub value: Option<Decimal>,
    /// PO status string.
    #[serde(default)]
    pub status: Option<String>,
    /// PO date.
    pub date: DateTime<Utc>,
}

/// Receipt stage snapshot.
#[derive(Debug, Deserialize)]
pub struct ReceiptStageDto {
    /// Receipts recorded.
    #[serde(default, alias = "receivedCount")]
    pub received_count: Option<u32>,
    /// Receipts expected.
    #[serde(default, alias = "expectedCount")]
    pub expected_count: Option<u32>,
    /// Value received.
    #[serde(default, alias = "receivedValue")]
    pub received_value: Option<Decimal>,
    /// Value outstanding.
    #[serde(default, alias = "pendingValue")]
    pub pending_value: Option<Decimal>,
    /// Per-receipt entries.
    #[serde(default)]
    pub items: Vec<ReceiptEntryDto>,
    /// Advisory alerts.
    #[serde(default)]
    pub alerts: Vec<AlertDto>,
}

/// One receipt entry.
#[derive(Debug, Deserialize)]
pub struct ReceiptEntryDto {
    /// Receipt number.
    #[serde(alias = "receiptNumber")]
    pub receipt_number: String,
    /// PO number.
    #[serde(alias = "poNumber")]
    pub po_number: String,
    /// Receipt date.
    #[serde(alias = "receivedDate")]
    pub received_date: DateTime<Utc>,
    /// Received value.
    #[serde(default)]
    pub value: Option<Decimal>,
}

/// One advisory alert.
#[derive(Debug, Deserialize)]
pub struct AlertDto {
    /// Alert kind.
    #[serde(default, alias = "type")]
    pub kind: Option<String>,
    /// Severity string.
    #[serde(default)]
    pub severity: Option<String>,
    /// Message.
    #[serde(default)]
    pub message: Option<String>,
    /// PO the alert concerns.
    #[serde(default, alias = "poNumber")]
    pub po_number: Option<String>,
    /// Days the condition has persisted.
    #[serde(default, alias = "daysWaiting")]
    pub days_waiting: Option<i64>,
}

/// Berita Acara stage snapshot.
#[derive(Debug, Deserialize)]
pub struct BaStageDto {
    /// Certificates issued.
    #[serde(default, alias = "totalCount")]
    pub total_count: Option<u32>,
    /// Certified completion percentage.
    #[serde(default, alias = "completedPercentage")]
    pub completed_percentage: Option<Decimal>,
    /// Certified value.
    #[serde(default, alias = "totalValue")]
    pub total_value: Option<Decimal>,
}

/// Payment stage snapshot.
#[derive(Debug, Deserialize)]
pub struct PaymentStageDto {
    /// Payments completed.
    #[serde(default, alias = "paidCount")]
    pub paid_count: Option<u32>,
    /// Value paid.
    #[serde(default, alias = "paidValue")]
    pub paid_value: Option<Decimal>,
    /// Value unpaid.
    #[serde(default, alias = "pendingValue")]
    pub pending_value: Option<Decimal>,
    /// Payment percentage.
    #[serde(default, alias = "paymentPercentage")]
    pub payment_percentage: Option<Decimal>,
}

impl ProgressDto {
    /// Normalizes into the canonical core type.
    ///
    /// `overall_progress` is carried through as-is (clamped to 0-100),
    /// never recomputed from the stages.
    #[must_use]
    pub fn into_progress(self, milestone: MilestoneId, fetched_at: DateTime<Utc>) -> WorkflowProgress {
        let wp = self.workflow_progress;
        WorkflowProgress {
            milestone_id: self
                .milestone_id
                .map_or(milestone, MilestoneId::from_uuid),
            rab_approved: RabApprovedStage {
                status: wp.rab_approved.status,
                total_items: wp.rab_approved.total_items.unwrap_or(0),
                total_value: money_or_zero(wp.rab_approved.total_value),
                approved_date: wp.rab_approved.approved_date,
            },
            purchase_orders: PurchaseOrderStage {
                total_count: wp.purchase_orders.total_count.unwrap_or(0),
                approved_count: wp.purchase_orders.approved_count.unwrap_or(0),
                pending_count: wp.purchase_orders.pending_count.unwrap_or(0),
                total_value: money_or_zero(wp.purchase_orders.total_value),
                items: wp
                    .purchase_orders
                    .items
                    .into_iter()
                    .map(PoEntryDto::into_entry)
                    .collect(),
            },
            receipts: ReceiptStage {
                received_count: wp.receipts.received_count.unwrap_or(0),
                expected_count: wp.receipts.expected_count.unwrap_or(0),
                received_value: money_or_zero(wp.receipts.received_value),
                pending_value: money_or_zero(wp.receipts.pending_value),
                items: wp
                    .receipts
                    .items
                    .into_iter()
                    .map(ReceiptEntryDto::into_entry)
                    .collect(),
                alerts: wp.receipts.alerts.into_iter().map(AlertDto::into_alert).collect(),
            },
            berita_acara: BeritaAcaraStage {
                total_count: wp.berita_acara.total_count.unwrap_or(0),
                completed_percentage: wp
                    .berita_acara
                    .completed_percentage
                    .unwrap_or(Decimal::ZERO),
                total_value: money_or_zero(wp.berita_acara.total_value),
            },
            payments: PaymentStage {
                paid_count: wp.payments.paid_count.unwrap_or(0),
                paid_value: money_or_zero(wp.payments.paid_value),
                pending_value: money_or_zero(wp.payments.pending_value),
                payment_percentage: wp.payments.payment_percentage.unwrap_or(Decimal::ZERO),
            },
            overall_progress: self
                .overall_progress
                .and_then(|p| p.round().to_u8())
                .unwrap_or(0)
                .min(100),
            last_synced: self.last_synced.unwrap_or(fetched_at),
        }
    }
}

impl PoEntryDto {
    fn into_entry(self) -> PurchaseOrderEntry {
        PurchaseOrderEntry {
            po_id: PurchaseOrderId::from_uuid(self.po_id),
            po_number: self.po_number,
            supplier: self.supplier.unwrap_or_default(),
            value: money_or_zero(self.value),
            status: self
                .status
                .as_deref()
                .map_or(PurchaseOrderStatus::Unknown, parse_po_status),
            date: self.date,
        }
    }
}

impl ReceiptEntryDto {
    fn into_entry(self) -> ReceiptEntry {
        ReceiptEntry {
            receipt_number: self.receipt_number,
            po_number: self.po_number,
            received_date: self.received_date,
            value: money_or_zero(self.value),
        }
    }
}

impl AlertDto {
    fn into_alert(self) -> StageAlert {
        use graha_core::workflow::types::AlertSeverity;
        StageAlert {
            kind: self.kind.unwrap_or_else(|| "advisory".to_string()),
            severity: match self.severity.as_deref() {
                Some("high") => AlertSeverity::High,
                _ => AlertSeverity::Medium,
            },
            message: self.message.unwrap_or_default(),
            po_number: self.po_number,
            days_waiting: self.days_waiting.unwrap_or(0),
        }
    }
}

fn parse_po_status(s: &str) -> PurchaseOrderStatus {
    match s.to_lowercase().as_str() {
        "draft" => PurchaseOrderStatus::Draft,
        "pending" => PurchaseOrderStatus::Pending,
        "approved" => PurchaseOrderStatus::Approved,
        "received" => PurchaseOrderStatus::Received,
        "cancelled" => PurchaseOrderStatus::Cancelled,
        _ => PurchaseOrderStatus::Unknown,
    }
}

fn money_or_zero(value: Option<Decimal>) -> Money {
    Money::new(value.unwrap_or(Decimal::ZERO))
}
