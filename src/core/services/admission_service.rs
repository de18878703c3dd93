//! Accept/reject policy applied before a spending transaction persists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::services::{AggregationService, SnapshotService};
use crate::domain::{BudgetConfig, Money, RecurrenceUnit, Transaction};
use crate::period::Period;

/// Absolute per-transaction ceiling, independent of any configured budget.
pub const TRANSACTION_CEILING: Money = Money::from_cents(10_000_00);

/// Why a proposed transaction was not admitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", tag = "reason")]
pub enum RejectionReason {
    InvalidAmount,
    AmountTooLarge,
    ExceedsBudget {
        remaining: Money,
        unit: RecurrenceUnit,
    },
}

impl RejectionReason {
    /// The user-facing message surfaced by the API layer.
    pub fn message(&self) -> String {
        match self {
            RejectionReason::InvalidAmount => "amount must be greater than 0".into(),
            RejectionReason::AmountTooLarge => {
                "Amount cannot exceed $10,000. Please contact support for larger transactions."
                    .into()
            }
            RejectionReason::ExceedsBudget { remaining, unit } => format!(
                "Transaction would exceed your {unit} budget. You have ${remaining} remaining."
            ),
        }
    }
}

/// Outcome of the admission check. The controller only returns a verdict;
/// persistence on `Accept` is the caller's responsibility, so the
/// check-then-act sequence is not atomic against concurrent submissions.
#[derive(Debug, Clone, PartialEq)]
pub enum AdmissionVerdict {
    Accept,
    Reject(RejectionReason),
}

/// Runs the per-request Validate -> CheckCeiling -> CheckBudget -> Admit
/// sequence.
pub struct AdmissionService;

impl AdmissionService {
    /// Decides whether `proposed` may be recorded for the owner of
    /// `config` at instant `now`.
    ///
    /// `transactions` must be the owner's live transaction set; the
    /// current period's snapshot is recomputed from it on every call so a
    /// stale remaining value is never trusted. An owner without a budget
    /// configuration skips the budget check entirely, as does a zero
    /// budget: budgeting is optional and zero means unconstrained, not
    /// "reject everything".
    pub fn admit(
        proposed: Money,
        config: Option<&BudgetConfig>,
        transactions: &[Transaction],
        now: DateTime<Utc>,
    ) -> AdmissionVerdict {
        if !proposed.is_positive() {
            return AdmissionVerdict::Reject(RejectionReason::InvalidAmount);
        }
        if proposed > TRANSACTION_CEILING {
            return AdmissionVerdict::Reject(RejectionReason::AmountTooLarge);
        }
        if let Some(config) = config.filter(|config| config.budget_amount.is_positive()) {
            let period = Period::resolve(config.time_unit, now);
            let total_spent = AggregationService::total_spent(transactions, &period);
            let snapshot = SnapshotService::snapshot(config, total_spent, period);
            if proposed > snapshot.remaining_budget {
                return AdmissionVerdict::Reject(RejectionReason::ExceedsBudget {
                    remaining: snapshot.remaining_budget,
                    unit: config.time_unit,
                });
            }
        }
        AdmissionVerdict::Accept
    }
}
