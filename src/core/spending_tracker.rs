//! Wires the pure budget services to the storage collaborator.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::Clock;
use crate::core::services::{
    AdmissionService, AdmissionVerdict, AggregationService, BudgetInsights, BudgetSnapshot,
    HistoryRange, HistoryService, InsightsService, RejectionReason, SnapshotService,
    SpendingHistory,
};
use crate::domain::{BudgetConfig, Money, RecurrenceUnit, Transaction};
use crate::errors::BudgetError;
use crate::period::Period;
use crate::storage::SpendingStore;

/// Budget status response: the fresh snapshot plus the period's
/// transactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverview {
    #[serde(flatten)]
    pub snapshot: BudgetSnapshot,
    pub transactions: Vec<Transaction>,
}

/// Partial budget update; at least one field must be present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPatch {
    pub budget_amount: Option<Money>,
    pub time_unit: Option<String>,
}

/// Per-request orchestration over a [`SpendingStore`] and an injected
/// [`Clock`]. Each call reads the current instant once and recomputes
/// everything from live storage reads; nothing here is cached.
pub struct SpendingTracker {
    store: Arc<dyn SpendingStore>,
    clock: Arc<dyn Clock>,
}

impl SpendingTracker {
    pub fn new(store: Arc<dyn SpendingStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Returns the owner's current-period snapshot and its transactions.
    pub fn budget_overview(&self, owner_id: Uuid) -> Result<BudgetOverview, BudgetError> {
        let config = self.require_config(owner_id)?;
        let now = self.clock.now();
        let period = Period::resolve(config.time_unit, now);
        let transactions = self.store.find_transactions(owner_id, Some(period.start))?;
        let total_spent = AggregationService::total_spent(&transactions, &period);
        let snapshot = SnapshotService::snapshot(&config, total_spent, period);
        tracing::debug!(
            owner = %owner_id,
            unit = %config.time_unit,
            total = %total_spent,
            "computed budget overview"
        );
        Ok(BudgetOverview {
            snapshot,
            transactions,
        })
    }

    /// Applies a partial budget update, validating amount and unit the
    /// way the write API does.
    pub fn update_budget(
        &self,
        owner_id: Uuid,
        patch: BudgetPatch,
    ) -> Result<BudgetConfig, BudgetError> {
        if patch.budget_amount.is_none() && patch.time_unit.is_none() {
            return Err(BudgetError::Validation(
                "budgetAmount or timeUnit is required".into(),
            ));
        }
        let unit = patch
            .time_unit
            .as_deref()
            .map(str::parse::<RecurrenceUnit>)
            .transpose()?;
        if let Some(amount) = patch.budget_amount {
            if amount.is_negative() {
                return Err(BudgetError::Validation(
                    "budgetAmount must be greater than or equal to 0".into(),
                ));
            }
        }

        let mut config = self.require_config(owner_id)?;
        if let Some(amount) = patch.budget_amount {
            config.budget_amount = amount;
        }
        if let Some(unit) = unit {
            config.time_unit = unit;
        }
        tracing::info!(owner = %owner_id, unit = %config.time_unit, "budget updated");
        self.store.upsert_budget_config(config)
    }

    /// Admission then persistence: records a spending transaction if the
    /// verdict allows it.
    ///
    /// The snapshot is rebuilt from a fresh storage read on every call, so
    /// a previously computed remaining value is never trusted. Two
    /// concurrent submissions may still both pass the check before either
    /// persists; resolving that race is a storage-backend concern.
    pub fn record_spending(
        &self,
        owner_id: Uuid,
        amount: Money,
        location_id: Uuid,
    ) -> Result<Transaction, BudgetError> {
        let now = self.clock.now();
        let config = self.store.find_budget_config(owner_id)?;
        let transactions = match &config {
            Some(config) => {
                let period = Period::resolve(config.time_unit, now);
                self.store.find_transactions(owner_id, Some(period.start))?
            }
            None => Vec::new(),
        };

        match AdmissionService::admit(amount, config.as_ref(), &transactions, now) {
            AdmissionVerdict::Accept => {
                let transaction = Transaction::new(owner_id, amount, location_id, now);
                tracing::info!(owner = %owner_id, amount = %amount, "spending admitted");
                self.store.insert_transaction(transaction)
            }
            AdmissionVerdict::Reject(reason) => {
                tracing::debug!(owner = %owner_id, amount = %amount, ?reason, "spending rejected");
                Err(match reason {
                    RejectionReason::ExceedsBudget { remaining, .. } => {
                        BudgetError::BudgetExceeded {
                            message: reason.message(),
                            remaining,
                        }
                    }
                    other => BudgetError::Validation(other.message()),
                })
            }
        }
    }

    /// Ranged spending history, newest first, at most `limit` records.
    pub fn spending_history(
        &self,
        owner_id: Uuid,
        range: HistoryRange,
        limit: usize,
    ) -> Result<SpendingHistory, BudgetError> {
        let now = self.clock.now();
        // Fetch without a cutoff; the service filters to the window so
        // calendar-aligned and rolling ranges share one code path.
        let transactions = self.store.find_transactions(owner_id, None)?;
        Ok(HistoryService::history(&transactions, range, limit, now))
    }

    /// Trailing-30-day projection, health score, and top locations.
    pub fn insights(&self, owner_id: Uuid) -> Result<BudgetInsights, BudgetError> {
        let config = self.require_config(owner_id)?;
        let now = self.clock.now();
        let window = Period::trailing_days(30, now);
        let transactions = self.store.find_transactions(owner_id, Some(window.start))?;
        Ok(InsightsService::insights(&transactions, &config, now))
    }

    /// Cascading removal of everything stored for an owner.
    pub fn forget_owner(&self, owner_id: Uuid) -> Result<(), BudgetError> {
        tracing::info!(owner = %owner_id, "removing owner data");
        self.store.delete_owner(owner_id)
    }

    fn require_config(&self, owner_id: Uuid) -> Result<BudgetConfig, BudgetError> {
        self.store
            .find_budget_config(owner_id)?
            .ok_or_else(|| BudgetError::NotFound("User budget data not found".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::{MemoryStore, SpendingStore as _};
    use chrono::{TimeZone, Utc};

    fn tracker_at(instant: chrono::DateTime<Utc>) -> (SpendingTracker, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let tracker = SpendingTracker::new(store.clone(), Arc::new(FixedClock(instant)));
        (tracker, store)
    }

    fn noon() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn overview_requires_a_configured_budget() {
        let (tracker, _store) = tracker_at(noon());
        let err = tracker
            .budget_overview(Uuid::new_v4())
            .expect_err("missing config must 404");
        assert!(matches!(err, BudgetError::NotFound(_)));
    }

    #[test]
    fn update_budget_rejects_an_empty_patch() {
        let (tracker, store) = tracker_at(noon());
        let owner = Uuid::new_v4();
        store
            .upsert_budget_config(
                BudgetConfig::new(owner, Money::from_cents(100), RecurrenceUnit::Daily).unwrap(),
            )
            .unwrap();
        let err = tracker
            .update_budget(owner, BudgetPatch::default())
            .expect_err("empty patch must fail");
        assert!(matches!(err, BudgetError::Validation(ref m) if m.contains("required")));
    }

    #[test]
    fn update_budget_validates_the_unit_string() {
        let (tracker, store) = tracker_at(noon());
        let owner = Uuid::new_v4();
        store
            .upsert_budget_config(
                BudgetConfig::new(owner, Money::from_cents(100), RecurrenceUnit::Daily).unwrap(),
            )
            .unwrap();
        let patch = BudgetPatch {
            budget_amount: None,
            time_unit: Some("yearly".into()),
        };
        let err = tracker
            .update_budget(owner, patch)
            .expect_err("unknown unit must fail");
        assert!(matches!(err, BudgetError::Validation(_)));
    }

    #[test]
    fn unconfigured_owner_can_spend_up_to_the_ceiling() {
        let (tracker, _store) = tracker_at(noon());
        let owner = Uuid::new_v4();
        tracker
            .record_spending(owner, Money::from_major(9999.99), Uuid::new_v4())
            .expect("no budget, no constraint");
        let err = tracker
            .record_spending(owner, Money::from_major(10000.01), Uuid::new_v4())
            .expect_err("ceiling still applies");
        assert!(matches!(err, BudgetError::Validation(_)));
    }
}
