use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::money::Money;
use crate::errors::BudgetError;

/// Enumerates the cadences over which a budget resets.
///
/// `Unspecified` models the fallback path for configurations whose stored
/// unit string is missing or unrecognized: such budgets are evaluated over
/// a rolling 7-day lookback rather than a calendar-aligned period. The
/// variant is accepted on read but rejected on write.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceUnit {
    Daily,
    Weekly,
    Monthly,
    #[default]
    Unspecified,
}

impl<'de> Deserialize<'de> for RecurrenceUnit {
    /// Reads are tolerant: anything but the three canonical wire strings
    /// lands on the `Unspecified` fallback. Write-path validation goes
    /// through [`FromStr`] instead.
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(value.parse().unwrap_or(RecurrenceUnit::Unspecified))
    }
}

impl RecurrenceUnit {
    /// Wire representation, exactly `daily`, `weekly`, or `monthly`.
    pub fn as_str(self) -> &'static str {
        match self {
            RecurrenceUnit::Daily => "daily",
            RecurrenceUnit::Weekly => "weekly",
            RecurrenceUnit::Monthly => "monthly",
            RecurrenceUnit::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for RecurrenceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurrenceUnit {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "daily" => Ok(RecurrenceUnit::Daily),
            "weekly" => Ok(RecurrenceUnit::Weekly),
            "monthly" => Ok(RecurrenceUnit::Monthly),
            _ => Err(BudgetError::Validation(
                "timeUnit must be one of: daily, weekly, monthly".into(),
            )),
        }
    }
}

/// A user's configured spending guardrail: one per owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetConfig {
    pub owner_id: Uuid,
    pub budget_amount: Money,
    pub time_unit: RecurrenceUnit,
}

impl BudgetConfig {
    /// Creates a configuration, enforcing the non-negative amount invariant.
    pub fn new(
        owner_id: Uuid,
        budget_amount: Money,
        time_unit: RecurrenceUnit,
    ) -> Result<Self, BudgetError> {
        if budget_amount.is_negative() {
            return Err(BudgetError::Validation(
                "budgetAmount must be greater than or equal to 0".into(),
            ));
        }
        Ok(Self {
            owner_id,
            budget_amount,
            time_unit,
        })
    }
}
