//! Read-only trailing-window analytics over the same aggregation
//! primitive the ledger uses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::services::snapshot_service::round2;
use crate::core::services::{AggregationService, LocationSpend};
use crate::domain::{BudgetConfig, Money, RecurrenceUnit, Transaction};
use crate::period::Period;

/// Insights always reason in trailing 30-day terms for comparability,
/// independent of the owner's configured recurrence unit.
pub const INSIGHTS_WINDOW_DAYS: i64 = 30;

/// Health-score thresholds for the recommendation tiers.
const CAUTION_THRESHOLD: f64 = 0.0;
const SUCCESS_THRESHOLD: f64 = 20.0;

/// Number of top spending locations reported.
const TOP_LOCATIONS: usize = 5;

/// Recommendation tier derived from the projected-surplus health score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Warning,
    Caution,
    Success,
}

impl Recommendation {
    fn for_score(health_score: f64) -> Self {
        if health_score < CAUTION_THRESHOLD {
            Recommendation::Warning
        } else if health_score < SUCCESS_THRESHOLD {
            Recommendation::Caution
        } else {
            Recommendation::Success
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Recommendation::Warning => "You are projected to exceed your monthly budget",
            Recommendation::Caution => "You are close to your budget limit",
            Recommendation::Success => "You are within your budget",
        }
    }

    pub fn suggestion(self) -> &'static str {
        match self {
            Recommendation::Warning => "Consider reducing spending or increasing your budget",
            Recommendation::Caution => "Monitor your spending closely this month",
            Recommendation::Success => "Great job managing your spending!",
        }
    }
}

/// Projection and ranking report over the trailing 30-day window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetInsights {
    pub health_score: f64,
    pub total_spent_last_30_days: Money,
    pub average_daily_spending: Money,
    pub projected_monthly_spending: Money,
    pub budget_amount: Money,
    pub time_unit: RecurrenceUnit,
    pub top_spending_locations: Vec<LocationSpend>,
    pub recommendation: Recommendation,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

/// Builds [`BudgetInsights`] from an owner's recent transactions.
pub struct InsightsService;

impl InsightsService {
    /// The projection assumes the trailing rate continues unchanged, so
    /// projected monthly spend equals the 30-day total; the average daily
    /// figure is rounded for display only.
    pub fn insights(
        transactions: &[Transaction],
        config: &BudgetConfig,
        now: DateTime<Utc>,
    ) -> BudgetInsights {
        let window = Period::trailing_days(INSIGHTS_WINDOW_DAYS, now);
        let total_spent = AggregationService::total_spent(transactions, &window);
        let projected_monthly = total_spent;
        let average_daily =
            Money::from_major(total_spent.to_major() / INSIGHTS_WINDOW_DAYS as f64);

        let health_score = if config.budget_amount.is_positive() {
            let budget = config.budget_amount.to_major();
            round2((budget - projected_monthly.to_major()) / budget * 100.0)
        } else {
            0.0
        };

        let mut ranked = AggregationService::spend_by_location(transactions, &window);
        ranked.sort_by(|a, b| b.total.cmp(&a.total));
        ranked.truncate(TOP_LOCATIONS);

        BudgetInsights {
            health_score,
            total_spent_last_30_days: total_spent,
            average_daily_spending: average_daily,
            projected_monthly_spending: projected_monthly,
            budget_amount: config.budget_amount,
            time_unit: config.time_unit,
            top_spending_locations: ranked,
            recommendation: Recommendation::for_score(health_score),
            window_start: window.start,
            window_end: window.end,
        }
    }
}
