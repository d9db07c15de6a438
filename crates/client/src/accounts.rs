//! Chart-of-accounts lookups.
//!
//! Account lists change rarely, so they are cached for a short while.
//! Balance validation never trusts the cache: the funding account is
//! re-fetched on every write.

use std::sync::Arc;
use std::time::Duration;

use graha_core::accounts::types::ChartAccount;
use graha_shared::types::AccountId;
use moka::sync::Cache;

use crate::error::ClientError;
use crate::http::Transport;
use crate::wire::ChartAccountDto;

const CACHE_TTL: Duration = Duration::from_secs(60);

const EXPENSE_PATH: &str = "chart-of-accounts?account_type=EXPENSE&is_active=true";
const FUNDING_PATH: &str =
    "chart-of-accounts?account_type=ASSET&sub_type=CASH_AND_BANK&is_active=true";

/// Resource client for the chart of accounts.
pub struct AccountsClient<T: Transport> {
    transport: Arc<T>,
    cache: Cache<&'static str, Arc<Vec<ChartAccount>>>,
}

impl<T: Transport> Clone for AccountsClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            cache: self.cache.clone(),
        }
    }
}

impl<T: Transport> AccountsClient<T> {
    /// Creates a client over the given transport.
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            cache: Cache::builder()
                .max_capacity(4)
                .time_to_live(CACHE_TTL)
                .build(),
        }
    }

    /// Lists accounts eligible to classify an expense: operational
    /// EXPENSE accounts (level >= 2, not control accounts).
    pub async fn expense_accounts(&self) -> Result<Vec<ChartAccount>, ClientError> {
        let accounts = self.cached(EXPENSE_PATH).await?;
        Ok(accounts
            .iter()
            .filter(|a| a.is_operational_expense())
            .cloned()
            .collect())
    }

    /// Lists accounts eligible to fund a realization: active ASSET
    /// accounts of the cash-and-bank sub-type.
    pub async fn funding_accounts(&self) -> Result<Vec<ChartAccount>, ClientError> {
        let accounts = self.cached(FUNDING_PATH).await?;
        Ok(accounts
            .iter()
            .filter(|a| a.is_funding_eligible())
            .cloned()
            .collect())
    }

    /// Fetches one funding account, bypassing the cache.
    ///
    /// Balance checks must see the latest fetched balance, so the cache is
    /// never consulted here. Returns `None` when the account is not among
    /// the funding-eligible set.
    pub async fn funding_account_fresh(
        &self,
        id: AccountId,
    ) -> Result<Option<ChartAccount>, ClientError> {
        let accounts = self.fetch(FUNDING_PATH).await?;
        self.cache.insert(FUNDING_PATH, Arc::new(accounts.clone()));
        Ok(accounts.into_iter().find(|a| a.id == id))
    }

    /// Drops cached account lists; the next read re-fetches.
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }

    async fn cached(&self, path: &'static str) -> Result<Arc<Vec<ChartAccount>>, ClientError> {
        if let Some(accounts) = self.cache.get(path) {
            return Ok(accounts);
        }
        let accounts = Arc::new(self.fetch(path).await?);
        self.cache.insert(path, Arc::clone(&accounts));
        Ok(accounts)
    }

    async fn fetch(&self, path: &str) -> Result<Vec<ChartAccount>, ClientError> {
        let data = self.transport.get(path).await?;
        let rows: Vec<ChartAccountDto> = serde_json::from_value(data)?;
        Ok(rows
            .into_iter()
            .filter_map(ChartAccountDto::into_account)
            .collect())
    }
}
