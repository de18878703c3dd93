//! Derived budget status, computed fresh per request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{BudgetConfig, Money, RecurrenceUnit};
use crate::period::Period;

/// A non-persisted view of budget status for one period.
///
/// `remaining_budget` may be negative: overspend is reported, never
/// clamped. `percentage_used` is 0 for a zero budget regardless of spend,
/// a policy guard against division by zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSnapshot {
    pub budget_amount: Money,
    pub time_unit: RecurrenceUnit,
    pub total_spent: Money,
    pub remaining_budget: Money,
    pub percentage_used: f64,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
}

/// Computes budget snapshots from already-aggregated spend.
pub struct SnapshotService;

impl SnapshotService {
    /// Pure function of its inputs; identical inputs yield identical
    /// snapshots.
    pub fn snapshot(config: &BudgetConfig, total_spent: Money, period: Period) -> BudgetSnapshot {
        let remaining = config.budget_amount - total_spent;
        let percentage_used = if config.budget_amount.is_positive() {
            round2(total_spent.percent_of(config.budget_amount))
        } else {
            0.0
        };
        BudgetSnapshot {
            budget_amount: config.budget_amount,
            time_unit: config.time_unit,
            total_spent,
            remaining_budget: remaining,
            percentage_used,
            period_start: period.start,
            period_end: period.end,
        }
    }
}

/// Rounds to two decimals for the presentation boundary.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn config(cents: i64, unit: RecurrenceUnit) -> BudgetConfig {
        BudgetConfig::new(Uuid::new_v4(), Money::from_cents(cents), unit).unwrap()
    }

    fn sample_period() -> Period {
        Period::resolve(
            RecurrenceUnit::Weekly,
            Utc.with_ymd_and_hms(2024, 10, 16, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn remaining_goes_negative_on_overspend() {
        let snapshot = SnapshotService::snapshot(
            &config(5000, RecurrenceUnit::Weekly),
            Money::from_cents(5500),
            sample_period(),
        );
        assert_eq!(snapshot.remaining_budget, Money::from_cents(-500));
        assert_eq!(snapshot.percentage_used, 110.0);
    }

    #[test]
    fn zero_budget_reports_zero_percent_for_any_spend() {
        for spent in [0, 1, 123_456] {
            let snapshot = SnapshotService::snapshot(
                &config(0, RecurrenceUnit::Daily),
                Money::from_cents(spent),
                sample_period(),
            );
            assert_eq!(snapshot.percentage_used, 0.0);
        }
    }

    #[test]
    fn snapshot_is_idempotent_for_identical_inputs() {
        let config = config(10_000, RecurrenceUnit::Monthly);
        let period = sample_period();
        let first = SnapshotService::snapshot(&config, Money::from_cents(3333), period);
        let second = SnapshotService::snapshot(&config, Money::from_cents(3333), period);
        assert_eq!(first, second);
    }

    #[test]
    fn percentage_is_rounded_to_two_decimals() {
        let snapshot = SnapshotService::snapshot(
            &config(30_000, RecurrenceUnit::Monthly),
            Money::from_cents(10_000),
            sample_period(),
        );
        assert_eq!(snapshot.percentage_used, 33.33);
    }
}
