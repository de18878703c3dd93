use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::money::Money;

/// A recorded spending event against a location.
///
/// Immutable after creation; `created_at` is the sole temporal key used
/// for period membership.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub amount: Money,
    pub location_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Creates a transaction with a fresh identifier. The timestamp is
    /// supplied by the caller so the admission path stays deterministic.
    pub fn new(
        owner_id: Uuid,
        amount: Money,
        location_id: Uuid,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            amount,
            location_id,
            created_at,
        }
    }
}
