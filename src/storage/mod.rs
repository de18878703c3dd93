//! Persistence collaborator contract and the in-memory implementation.

pub mod json_backend;

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{BudgetConfig, Transaction};
use crate::errors::BudgetError;

pub use json_backend::JsonStore;

/// Abstraction over backends capable of storing budget configurations and
/// spending transactions. The core never retries a failing backend; any
/// failure surfaces as [`BudgetError::Upstream`].
pub trait SpendingStore: Send + Sync {
    fn find_budget_config(&self, owner_id: Uuid) -> Result<Option<BudgetConfig>, BudgetError>;
    fn upsert_budget_config(&self, config: BudgetConfig) -> Result<BudgetConfig, BudgetError>;
    /// Returns one owner's transactions in ascending creation order,
    /// optionally restricted to those created at or after `since`.
    fn find_transactions(
        &self,
        owner_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Transaction>, BudgetError>;
    fn insert_transaction(&self, transaction: Transaction) -> Result<Transaction, BudgetError>;
    /// Cascading owner deletion: drops the configuration and every
    /// transaction belonging to `owner_id`.
    fn delete_owner(&self, owner_id: Uuid) -> Result<(), BudgetError>;
}

/// Mutex-held in-memory store for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    configs: Mutex<HashMap<Uuid, BudgetConfig>>,
    transactions: Mutex<Vec<Transaction>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpendingStore for MemoryStore {
    fn find_budget_config(&self, owner_id: Uuid) -> Result<Option<BudgetConfig>, BudgetError> {
        let configs = self
            .configs
            .lock()
            .map_err(|_| BudgetError::Upstream("config store lock poisoned".into()))?;
        Ok(configs.get(&owner_id).cloned())
    }

    fn upsert_budget_config(&self, config: BudgetConfig) -> Result<BudgetConfig, BudgetError> {
        let mut configs = self
            .configs
            .lock()
            .map_err(|_| BudgetError::Upstream("config store lock poisoned".into()))?;
        configs.insert(config.owner_id, config.clone());
        Ok(config)
    }

    fn find_transactions(
        &self,
        owner_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Transaction>, BudgetError> {
        let transactions = self
            .transactions
            .lock()
            .map_err(|_| BudgetError::Upstream("transaction store lock poisoned".into()))?;
        let mut matched: Vec<Transaction> = transactions
            .iter()
            .filter(|txn| txn.owner_id == owner_id)
            .filter(|txn| since.map_or(true, |cutoff| txn.created_at >= cutoff))
            .cloned()
            .collect();
        matched.sort_by_key(|txn| txn.created_at);
        Ok(matched)
    }

    fn insert_transaction(&self, transaction: Transaction) -> Result<Transaction, BudgetError> {
        let mut transactions = self
            .transactions
            .lock()
            .map_err(|_| BudgetError::Upstream("transaction store lock poisoned".into()))?;
        transactions.push(transaction.clone());
        Ok(transaction)
    }

    fn delete_owner(&self, owner_id: Uuid) -> Result<(), BudgetError> {
        let mut configs = self
            .configs
            .lock()
            .map_err(|_| BudgetError::Upstream("config store lock poisoned".into()))?;
        configs.remove(&owner_id);
        let mut transactions = self
            .transactions
            .lock()
            .map_err(|_| BudgetError::Upstream("transaction store lock poisoned".into()))?;
        transactions.retain(|txn| txn.owner_id != owner_id);
        Ok(())
    }
}
