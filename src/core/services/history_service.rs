//! Ranged spending history with per-location breakdown.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::core::services::{AggregationService, LocationSpend};
use crate::domain::{Money, RecurrenceUnit, Transaction};
use crate::period::Period;

/// Query range for the history view. Unlike the budget period, `Yearly`
/// is available here, and anything unrecognized falls back to a rolling
/// 30-day lookback.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRange {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    #[default]
    Rolling30,
}

impl<'de> Deserialize<'de> for HistoryRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(HistoryRange::parse(&value))
    }
}

impl HistoryRange {
    /// Parses a query-string value, defaulting on unknown input.
    pub fn parse(value: &str) -> Self {
        match value {
            "daily" => HistoryRange::Daily,
            "weekly" => HistoryRange::Weekly,
            "monthly" => HistoryRange::Monthly,
            "yearly" => HistoryRange::Yearly,
            _ => HistoryRange::Rolling30,
        }
    }

    fn window(self, now: DateTime<Utc>) -> Period {
        match self {
            HistoryRange::Daily => Period::resolve(RecurrenceUnit::Daily, now),
            HistoryRange::Weekly => Period::resolve(RecurrenceUnit::Weekly, now),
            HistoryRange::Monthly => Period::resolve(RecurrenceUnit::Monthly, now),
            HistoryRange::Yearly => {
                let jan_first = now
                    .date_naive()
                    .with_month(1)
                    .and_then(|d| d.with_day(1))
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    .and_utc();
                Period {
                    start: jan_first,
                    end: now,
                }
            }
            HistoryRange::Rolling30 => Period::trailing_days(30, now),
        }
    }
}

/// Aggregate counters for one history window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub total_transactions: usize,
    pub total_spent: Money,
    pub average_spending: Money,
}

/// History report: summary, per-location breakdown, and the newest
/// transactions up to the caller's limit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpendingHistory {
    pub range: HistoryRange,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub summary: HistorySummary,
    pub spending_by_location: Vec<LocationSpend>,
    pub transactions: Vec<Transaction>,
}

pub struct HistoryService;

impl HistoryService {
    /// Summarizes one owner's transactions over `range`, newest first,
    /// keeping at most `limit` individual records in the report.
    pub fn history(
        transactions: &[Transaction],
        range: HistoryRange,
        limit: usize,
        now: DateTime<Utc>,
    ) -> SpendingHistory {
        let window = range.window(now);
        let mut in_window: Vec<Transaction> = transactions
            .iter()
            .filter(|txn| window.contains(txn.created_at))
            .cloned()
            .collect();
        in_window.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        in_window.truncate(limit);

        let total_spent = AggregationService::total_spent(&in_window, &window);
        let average_spending = if in_window.is_empty() {
            Money::ZERO
        } else {
            Money::from_major(total_spent.to_major() / in_window.len() as f64)
        };

        SpendingHistory {
            range,
            period_start: window.start,
            period_end: window.end,
            summary: HistorySummary {
                total_transactions: in_window.len(),
                total_spent,
                average_spending,
            },
            spending_by_location: AggregationService::spend_by_location(&in_window, &window),
            transactions: in_window,
        }
    }
}
