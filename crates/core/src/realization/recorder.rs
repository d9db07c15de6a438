//! Stateless validation engine for recording and editing realizations.
//!
//! Everything here runs before any network call: a rejected input is never
//! submitted. Balance checks are read-validated optimistically against the
//! last fetched account snapshot — concurrent recordings by other users
//! against the same account can race, so a passing check is best-effort,
//! not a correctness guarantee against overspend.

use graha_shared::types::{AccountId, Money};
use rust_decimal::Decimal;

use super::error::RealizationError;
use super::types::{CostCategory, RecordRealization};
use crate::accounts::types::ChartAccount;

/// Result of validating a record input: the resolved category and the
/// clamped progress contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecord {
    /// Resolved expense category.
    pub category: CostCategory,
    /// Progress contribution clamped to [0, 100]; present exactly when
    /// the entry is RAB-linked.
    pub progress: Option<Decimal>,
}

/// Stateless engine enforcing the recording rules.
pub struct RealizationRecorder;

impl RealizationRecorder {
    /// Validates a record input against the (optionally resolved) funding
    /// account.
    ///
    /// `funding` is the fetched account matching `input.source_account_id`;
    /// pass `None` when no funding account is referenced. Omitting the
    /// funding account entirely is valid and means unlimited owner capital.
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` - amount is zero or negative
    /// * `MissingExpenseAccount` - no expense classification
    /// * `MissingProgress` - RAB-linked without a progress contribution
    /// * `MissingCategory` - additional cost without a category
    /// * `UnknownFundingAccount` - referenced funding account not resolved
    /// * `InvalidFundingAccount` - funding account not cash/bank
    /// * `InsufficientBalance` - non-exempt account cannot cover the amount
    pub fn validate(
        input: &RecordRealization,
        funding: Option<&ChartAccount>,
    ) -> Result<ValidatedRecord, RealizationError> {
        if !input.amount.is_positive() {
            return Err(RealizationError::InvalidAmount);
        }

        if input.expense_account_id.is_none() {
            return Err(RealizationError::MissingExpenseAccount);
        }

        let (category, progress) = if input.rab_item_id.is_some() {
            let progress = input.progress.ok_or(RealizationError::MissingProgress)?;
            (
                CostCategory::for_item_type(input.item_type),
                Some(clamp_progress(progress)),
            )
        } else {
            let category = input.category.ok_or(RealizationError::MissingCategory)?;
            (category, None)
        };

        if let Some(source_id) = input.source_account_id {
            let account = funding
                .filter(|a| a.id == source_id)
                .ok_or(RealizationError::UnknownFundingAccount)?;
            Self::check_funding(account, input.amount)?;
        }

        Ok(ValidatedRecord { category, progress })
    }

    /// Validates that an expense account may classify a realization.
    pub fn check_expense_account(account: &ChartAccount) -> Result<(), RealizationError> {
        if account.is_operational_expense() {
            Ok(())
        } else {
            Err(RealizationError::InvalidExpenseAccount)
        }
    }

    /// Validates a funding account against a required amount.
    ///
    /// Owner-capital and petty-cash accounts are exempt from the balance
    /// check; all other cash/bank accounts must cover the amount.
    pub fn check_funding(
        account: &ChartAccount,
        required: Money,
    ) -> Result<(), RealizationError> {
        if !account.is_funding_eligible() {
            return Err(RealizationError::InvalidFundingAccount);
        }

        if account.funding_class().is_balance_checked() && required > account.current_balance {
            return Err(RealizationError::InsufficientBalance {
                account_name: account.name.clone(),
                available: account.current_balance,
                required,
            });
        }

        Ok(())
    }

    /// Balance an edit must be able to draw from the (new) funding account.
    ///
    /// Keeping the same account only requires covering the amount
    /// *increase* (the old amount is already drawn); switching accounts
    /// requires the full new amount, since the old account is restored
    /// first.
    #[must_use]
    pub fn required_balance_for_update(
        old_amount: Money,
        old_source: Option<AccountId>,
        new_amount: Money,
        new_source: Option<AccountId>,
    ) -> Money {
        if new_source == old_source {
            let delta = new_amount - old_amount;
            if delta.is_positive() { delta } else { Money::ZERO }
        } else {
            new_amount
        }
    }

    /// Validates an edit's amount and funding change.
    ///
    /// # Errors
    ///
    /// Same funding errors as [`Self::validate`], plus `InvalidAmount` for
    /// a non-positive new amount.
    pub fn validate_update(
        old_amount: Money,
        old_source: Option<AccountId>,
        new_amount: Money,
        new_source: Option<AccountId>,
        funding: Option<&ChartAccount>,
    ) -> Result<(), RealizationError> {
        if !new_amount.is_positive() {
            return Err(RealizationError::InvalidAmount);
        }

        let Some(source_id) = new_source else {
            return Ok(());
        };

        let account = funding
            .filter(|a| a.id == source_id)
            .ok_or(RealizationError::UnknownFundingAccount)?;

        if !account.is_funding_eligible() {
            return Err(RealizationError::InvalidFundingAccount);
        }

        let required =
            Self::required_balance_for_update(old_amount, old_source, new_amount, new_source);
        if required.is_positive()
            && account.funding_class().is_balance_checked()
            && required > account.current_balance
        {
            return Err(RealizationError::InsufficientBalance {
                account_name: account.name.clone(),
                available: account.current_balance,
                required,
            });
        }

        Ok(())
    }
}

fn clamp_progress(progress: Decimal) -> Decimal {
    progress.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::types::{AccountSubType, AccountType};
    use crate::budget::types::ItemType;
    use crate::realization::types::CostType;
    use graha_shared::types::RabItemId;
    use rust_decimal_macros::dec;

    fn bank_account(balance: i64) -> ChartAccount {
        ChartAccount {
            id: AccountId::new(),
            code: "1102.01".to_string(),
            name: "Bank BCA Operasional".to_string(),
            account_type: AccountType::Asset,
            account_sub_type: Some(AccountSubType::CashAndBank),
            level: 2,
            is_control_account: false,
            current_balance: Money::from_rupiah(balance),
            is_active: true,
        }
    }

    fn owner_cash_account() -> ChartAccount {
        ChartAccount {
            name: "Kas Tunai Proyek".to_string(),
            code: "1101.07".to_string(),
            current_balance: Money::ZERO,
            ..bank_account(0)
        }
    }

    fn linked_input(amount: i64, progress: Option<Decimal>) -> RecordRealization {
        RecordRealization {
            rab_item_id: Some(RabItemId::new()),
            item_type: Some(ItemType::Material),
            category: None,
            cost_type: CostType::Actual,
            amount: Money::from_rupiah(amount),
            description: "Pembelian besi".to_string(),
            reference_number: None,
            expense_account_id: Some(AccountId::new()),
            source_account_id: None,
            progress,
        }
    }

    fn additional_input(amount: i64) -> RecordRealization {
        RecordRealization {
            rab_item_id: None,
            item_type: None,
            category: Some(CostCategory::Overhead),
            cost_type: CostType::Unforeseen,
            amount: Money::from_rupiah(amount),
            description: "Kasbon lapangan".to_string(),
            reference_number: None,
            expense_account_id: Some(AccountId::new()),
            source_account_id: None,
            progress: None,
        }
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        assert!(matches!(
            RealizationRecorder::validate(&linked_input(0, Some(dec!(50))), None),
            Err(RealizationError::InvalidAmount)
        ));
        assert!(matches!(
            RealizationRecorder::validate(&linked_input(-100, Some(dec!(50))), None),
            Err(RealizationError::InvalidAmount)
        ));
    }

    #[test]
    fn test_rejects_missing_expense_account() {
        let mut input = linked_input(100_000, Some(dec!(50)));
        input.expense_account_id = None;
        assert!(matches!(
            RealizationRecorder::validate(&input, None),
            Err(RealizationError::MissingExpenseAccount)
        ));
    }

    #[test]
    fn test_linked_requires_progress() {
        assert!(matches!(
            RealizationRecorder::validate(&linked_input(100_000, None), None),
            Err(RealizationError::MissingProgress)
        ));
    }

    #[test]
    fn test_additional_requires_category() {
        let mut input = additional_input(100_000);
        input.category = None;
        assert!(matches!(
            RealizationRecorder::validate(&input, None),
            Err(RealizationError::MissingCategory)
        ));
    }

    #[test]
    fn test_progress_is_clamped() {
        let validated =
            RealizationRecorder::validate(&linked_input(100_000, Some(dec!(150))), None).unwrap();
        assert_eq!(validated.progress, Some(dec!(100)));

        let validated =
            RealizationRecorder::validate(&linked_input(100_000, Some(dec!(-5))), None).unwrap();
        assert_eq!(validated.progress, Some(dec!(0)));
    }

    #[test]
    fn test_category_inferred_from_item_type() {
        let validated =
            RealizationRecorder::validate(&linked_input(100_000, Some(dec!(50))), None).unwrap();
        assert_eq!(validated.category, CostCategory::Materials);

        let mut input = linked_input(100_000, Some(dec!(50)));
        input.item_type = Some(ItemType::Service);
        // An explicit category on a linked entry is ignored.
        input.category = Some(CostCategory::Overhead);
        let validated = RealizationRecorder::validate(&input, None).unwrap();
        assert_eq!(validated.category, CostCategory::Labor);

        input.item_type = None;
        let validated = RealizationRecorder::validate(&input, None).unwrap();
        assert_eq!(validated.category, CostCategory::Other);
    }

    #[test]
    fn test_omitted_source_account_skips_validation() {
        // No funding account at all: owner capital, always valid.
        let validated =
            RealizationRecorder::validate(&additional_input(999_000_000), None).unwrap();
        assert_eq!(validated.category, CostCategory::Overhead);
    }

    #[test]
    fn test_bank_account_insufficient_balance() {
        let bank = bank_account(500_000);
        let mut input = additional_input(1_000_000);
        input.source_account_id = Some(bank.id);

        let err = RealizationRecorder::validate(&input, Some(&bank)).unwrap_err();
        match err {
            RealizationError::InsufficientBalance {
                account_name,
                available,
                required,
            } => {
                assert_eq!(account_name, "Bank BCA Operasional");
                assert_eq!(available, Money::from_rupiah(500_000));
                assert_eq!(required, Money::from_rupiah(1_000_000));
            }
            other => panic!("expected InsufficientBalance, got {other:?}"),
        }
    }

    #[test]
    fn test_bank_account_sufficient_balance() {
        let bank = bank_account(2_000_000);
        let mut input = additional_input(1_000_000);
        input.source_account_id = Some(bank.id);
        assert!(RealizationRecorder::validate(&input, Some(&bank)).is_ok());
    }

    #[test]
    fn test_exact_balance_is_sufficient() {
        let bank = bank_account(1_000_000);
        let mut input = additional_input(1_000_000);
        input.source_account_id = Some(bank.id);
        assert!(RealizationRecorder::validate(&input, Some(&bank)).is_ok());
    }

    #[test]
    fn test_owner_cash_bypasses_balance() {
        let kas = owner_cash_account();
        let mut input = additional_input(1_000_000);
        input.source_account_id = Some(kas.id);
        assert!(RealizationRecorder::validate(&input, Some(&kas)).is_ok());
    }

    #[test]
    fn test_petty_cash_bypasses_balance() {
        let mut kas = bank_account(0);
        kas.name = "Kas Kecil".to_string();
        let mut input = additional_input(1_000_000);
        input.source_account_id = Some(kas.id);
        assert!(RealizationRecorder::validate(&input, Some(&kas)).is_ok());
    }

    #[test]
    fn test_unknown_funding_account() {
        let mut input = additional_input(100_000);
        input.source_account_id = Some(AccountId::new());
        assert!(matches!(
            RealizationRecorder::validate(&input, None),
            Err(RealizationError::UnknownFundingAccount)
        ));

        // A fetched account with a different id does not count.
        let bank = bank_account(1_000_000);
        assert!(matches!(
            RealizationRecorder::validate(&input, Some(&bank)),
            Err(RealizationError::UnknownFundingAccount)
        ));
    }

    #[test]
    fn test_non_cash_bank_funding_rejected() {
        let mut receivable = bank_account(10_000_000);
        receivable.account_sub_type = Some(AccountSubType::Other);
        let mut input = additional_input(100_000);
        input.source_account_id = Some(receivable.id);
        assert!(matches!(
            RealizationRecorder::validate(&input, Some(&receivable)),
            Err(RealizationError::InvalidFundingAccount)
        ));
    }

    #[test]
    fn test_expense_account_check() {
        let mut expense = bank_account(0);
        expense.account_type = AccountType::Expense;
        expense.account_sub_type = None;
        assert!(RealizationRecorder::check_expense_account(&expense).is_ok());

        expense.is_control_account = true;
        assert!(matches!(
            RealizationRecorder::check_expense_account(&expense),
            Err(RealizationError::InvalidExpenseAccount)
        ));
    }

    #[test]
    fn test_update_same_account_requires_only_increase() {
        let source = Some(AccountId::new());
        assert_eq!(
            RealizationRecorder::required_balance_for_update(
                Money::from_rupiah(300_000),
                source,
                Money::from_rupiah(500_000),
                source,
            ),
            Money::from_rupiah(200_000)
        );
        // Decreases never require balance.
        assert_eq!(
            RealizationRecorder::required_balance_for_update(
                Money::from_rupiah(500_000),
                source,
                Money::from_rupiah(300_000),
                source,
            ),
            Money::ZERO
        );
    }

    #[test]
    fn test_update_changed_account_requires_full_amount() {
        let old = Some(AccountId::new());
        let new = Some(AccountId::new());
        assert_eq!(
            RealizationRecorder::required_balance_for_update(
                Money::from_rupiah(300_000),
                old,
                Money::from_rupiah(500_000),
                new,
            ),
            Money::from_rupiah(500_000)
        );
    }

    #[test]
    fn test_validate_update_balance_check() {
        let bank = bank_account(100_000);
        let old_source = Some(AccountId::new());

        // Same account, increase of 200k against 100k balance: rejected.
        let err = RealizationRecorder::validate_update(
            Money::from_rupiah(300_000),
            Some(bank.id),
            Money::from_rupiah(500_000),
            Some(bank.id),
            Some(&bank),
        )
        .unwrap_err();
        assert!(matches!(err, RealizationError::InsufficientBalance { .. }));
        assert_eq!(err.shortfall(), Money::from_rupiah(100_000));

        // Decrease on the same account: always fine.
        assert!(
            RealizationRecorder::validate_update(
                Money::from_rupiah(500_000),
                Some(bank.id),
                Money::from_rupiah(300_000),
                Some(bank.id),
                Some(&bank),
            )
            .is_ok()
        );

        // Switching accounts requires the full new amount.
        assert!(matches!(
            RealizationRecorder::validate_update(
                Money::from_rupiah(50_000),
                old_source,
                Money::from_rupiah(150_000),
                Some(bank.id),
                Some(&bank),
            ),
            Err(RealizationError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn test_validate_update_to_owner_capital() {
        // Clearing the funding account (owner capital) needs no check.
        assert!(
            RealizationRecorder::validate_update(
                Money::from_rupiah(500_000),
                Some(AccountId::new()),
                Money::from_rupiah(900_000),
                None,
                None,
            )
            .is_ok()
        );
    }
}
