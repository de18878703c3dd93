use thiserror::Error;

use crate::domain::money::Money;

/// Error type that captures the failures surfaced by the budget core.
///
/// `Validation` and `BudgetExceeded` are caller-correctable; `NotFound`
/// signals an absent user, budget configuration, or location; `Upstream`
/// wraps a storage collaborator failure and is never retried here.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("{message}")]
    BudgetExceeded { message: String, remaining: Money },
    #[error("Upstream failure: {0}")]
    Upstream(String),
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        BudgetError::Upstream(format!("IO error: {err}"))
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        BudgetError::Upstream(format!("Serialization error: {err}"))
    }
}
