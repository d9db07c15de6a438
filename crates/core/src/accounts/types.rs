//! Chart-of-account domain types.

use graha_shared::types::{AccountId, Money};
use serde::{Deserialize, Serialize};

/// Top-level account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Asset account (cash, bank, receivables, ...).
    Asset,
    /// Liability account.
    Liability,
    /// Equity account.
    Equity,
    /// Revenue account.
    Revenue,
    /// Expense account.
    Expense,
}

impl AccountType {
    /// Parses an account type from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ASSET" => Some(Self::Asset),
            "LIABILITY" => Some(Self::Liability),
            "EQUITY" => Some(Self::Equity),
            "REVENUE" => Some(Self::Revenue),
            "EXPENSE" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Returns the wire representation of the account type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "ASSET",
            Self::Liability => "LIABILITY",
            Self::Equity => "EQUITY",
            Self::Revenue => "REVENUE",
            Self::Expense => "EXPENSE",
        }
    }
}

/// Account sub-classification. Only cash-and-bank matters to this core;
/// everything else is carried opaquely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountSubType {
    /// Cash or bank account usable as a funding source.
    CashAndBank,
    /// Any other sub-type.
    #[serde(other)]
    Other,
}

/// A chart-of-accounts entry as served by the remote API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartAccount {
    /// Account ID.
    pub id: AccountId,
    /// Account code (e.g. "1101.07").
    pub code: String,
    /// Account name (e.g. "Kas Tunai Proyek").
    pub name: String,
    /// Top-level account type.
    pub account_type: AccountType,
    /// Sub-classification, when the API supplies one.
    pub account_sub_type: Option<AccountSubType>,
    /// Hierarchy level (1 = control/root accounts).
    pub level: u8,
    /// Control accounts aggregate children and never carry postings.
    pub is_control_account: bool,
    /// Current balance in whole Rupiah.
    pub current_balance: Money,
    /// Whether the account is active.
    pub is_active: bool,
}

impl ChartAccount {
    /// Returns true if this account may classify an expense.
    ///
    /// Only operational EXPENSE accounts qualify: level >= 2 and not a
    /// control account.
    #[must_use]
    pub fn is_operational_expense(&self) -> bool {
        self.account_type == AccountType::Expense && self.level >= 2 && !self.is_control_account
    }

    /// Returns true if this account may fund a realization.
    #[must_use]
    pub fn is_funding_eligible(&self) -> bool {
        self.is_active
            && self.account_type == AccountType::Asset
            && self.account_sub_type == Some(AccountSubType::CashAndBank)
    }

    /// Classifies this account for funding-balance purposes.
    #[must_use]
    pub fn funding_class(&self) -> FundingClass {
        let name = self.name.to_lowercase();
        if name.contains("kas tunai") || self.code == "1101.07" {
            FundingClass::OwnerCapital
        } else if name.contains("kas kecil") || name.contains("petty cash") {
            FundingClass::PettyCash
        } else {
            FundingClass::Bank
        }
    }
}

/// Funding classification for balance validation.
///
/// Owner-capital and petty-cash accounts are exempt from balance checks;
/// every other cash-and-bank account must cover the requested amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingClass {
    /// Unlimited owner cash ("Kas Tunai" / code 1101.07). Never checked.
    OwnerCapital,
    /// Petty cash. Never checked.
    PettyCash,
    /// Regular bank/cash account. Balance-checked.
    Bank,
}

impl FundingClass {
    /// Returns true if recordings against this class require a balance check.
    #[must_use]
    pub const fn is_balance_checked(&self) -> bool {
        matches!(self, Self::Bank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graha_shared::types::Money;

    fn account(name: &str, code: &str) -> ChartAccount {
        ChartAccount {
            id: AccountId::new(),
            code: code.to_string(),
            name: name.to_string(),
            account_type: AccountType::Asset,
            account_sub_type: Some(AccountSubType::CashAndBank),
            level: 2,
            is_control_account: false,
            current_balance: Money::from_rupiah(1_000_000),
            is_active: true,
        }
    }

    #[test]
    fn test_owner_capital_by_name() {
        assert_eq!(
            account("Kas Tunai Proyek", "1101.01").funding_class(),
            FundingClass::OwnerCapital
        );
    }

    #[test]
    fn test_owner_capital_by_code() {
        assert_eq!(
            account("Cash on Hand", "1101.07").funding_class(),
            FundingClass::OwnerCapital
        );
    }

    #[test]
    fn test_petty_cash_by_name() {
        assert_eq!(
            account("Kas Kecil Kantor", "1101.02").funding_class(),
            FundingClass::PettyCash
        );
        assert_eq!(
            account("Petty Cash", "1101.03").funding_class(),
            FundingClass::PettyCash
        );
    }

    #[test]
    fn test_bank_is_balance_checked() {
        let bank = account("Bank BCA Operasional", "1102.01");
        assert_eq!(bank.funding_class(), FundingClass::Bank);
        assert!(bank.funding_class().is_balance_checked());
        assert!(!FundingClass::OwnerCapital.is_balance_checked());
        assert!(!FundingClass::PettyCash.is_balance_checked());
    }

    #[test]
    fn test_operational_expense_filter() {
        let mut acc = account("Beban Material", "5101.01");
        acc.account_type = AccountType::Expense;
        assert!(acc.is_operational_expense());

        acc.level = 1;
        assert!(!acc.is_operational_expense());

        acc.level = 2;
        acc.is_control_account = true;
        assert!(!acc.is_operational_expense());
    }

    #[test]
    fn test_funding_eligibility() {
        let acc = account("Bank BCA", "1102.01");
        assert!(acc.is_funding_eligible());

        let mut expense = account("Beban Lain", "5102.01");
        expense.account_type = AccountType::Expense;
        assert!(!expense.is_funding_eligible());

        let mut inactive = account("Bank Lama", "1102.99");
        inactive.is_active = false;
        assert!(!inactive.is_funding_eligible());

        let mut receivable = account("Piutang Usaha", "1201.01");
        receivable.account_sub_type = Some(AccountSubType::Other);
        assert!(!receivable.is_funding_eligible());
    }

    #[test]
    fn test_account_type_parse() {
        assert_eq!(AccountType::parse("EXPENSE"), Some(AccountType::Expense));
        assert_eq!(AccountType::parse("asset"), Some(AccountType::Asset));
        assert_eq!(AccountType::parse("UNKNOWN"), None);
    }

    #[test]
    fn test_sub_type_tolerates_unknown() {
        let sub: AccountSubType = serde_json::from_str("\"FIXED_ASSET\"").unwrap();
        assert_eq!(sub, AccountSubType::Other);
        let cash: AccountSubType = serde_json::from_str("\"CASH_AND_BANK\"").unwrap();
        assert_eq!(cash, AccountSubType::CashAndBank);
    }
}
