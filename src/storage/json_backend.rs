//! Single-document JSON persistence with atomic staged writes.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{BudgetConfig, Transaction};
use crate::errors::BudgetError;
use crate::storage::SpendingStore;

const TMP_EXTENSION: &str = "tmp";

/// On-disk document holding every owner's configuration and transactions.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    configs: Vec<BudgetConfig>,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

/// File-backed [`SpendingStore`] persisting one pretty-printed JSON
/// document. Writes stage to a temporary file and rename into place so a
/// crash mid-save never corrupts the document.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Default location under the platform data directory.
    pub fn default_path() -> Result<PathBuf, BudgetError> {
        let base = dirs::data_dir()
            .ok_or_else(|| BudgetError::Upstream("no platform data directory".into()))?;
        Ok(base.join("mealbudget").join("spending.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StoreDocument, BudgetError> {
        if !self.path.exists() {
            return Ok(StoreDocument::default());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, document: &StoreDocument) -> Result<(), BudgetError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension(TMP_EXTENSION);
        let json = serde_json::to_string_pretty(document)?;
        fs::write(&tmp, json)?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>, BudgetError> {
        self.lock
            .lock()
            .map_err(|_| BudgetError::Upstream("json store lock poisoned".into()))
    }
}

impl SpendingStore for JsonStore {
    fn find_budget_config(&self, owner_id: Uuid) -> Result<Option<BudgetConfig>, BudgetError> {
        let _guard = self.guard()?;
        let document = self.load()?;
        Ok(document
            .configs
            .into_iter()
            .find(|config| config.owner_id == owner_id))
    }

    fn upsert_budget_config(&self, config: BudgetConfig) -> Result<BudgetConfig, BudgetError> {
        let _guard = self.guard()?;
        let mut document = self.load()?;
        document
            .configs
            .retain(|existing| existing.owner_id != config.owner_id);
        document.configs.push(config.clone());
        self.save(&document)?;
        Ok(config)
    }

    fn find_transactions(
        &self,
        owner_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Transaction>, BudgetError> {
        let _guard = self.guard()?;
        let document = self.load()?;
        let mut matched: Vec<Transaction> = document
            .transactions
            .into_iter()
            .filter(|txn| txn.owner_id == owner_id)
            .filter(|txn| since.map_or(true, |cutoff| txn.created_at >= cutoff))
            .collect();
        matched.sort_by_key(|txn| txn.created_at);
        Ok(matched)
    }

    fn insert_transaction(&self, transaction: Transaction) -> Result<Transaction, BudgetError> {
        let _guard = self.guard()?;
        let mut document = self.load()?;
        document.transactions.push(transaction.clone());
        self.save(&document)?;
        Ok(transaction)
    }

    fn delete_owner(&self, owner_id: Uuid) -> Result<(), BudgetError> {
        let _guard = self.guard()?;
        let mut document = self.load()?;
        document.configs.retain(|config| config.owner_id != owner_id);
        document
            .transactions
            .retain(|txn| txn.owner_id != owner_id);
        self.save(&document)
    }
}
