//! Pure reductions over collaborator-supplied transaction sequences.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Money, Transaction};
use crate::period::Period;

/// Total spent against one location within a window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocationSpend {
    pub location_id: Uuid,
    pub total: Money,
    pub count: usize,
}

/// Sums and groups transaction amounts within a period.
///
/// Callers supply exactly one owner's transactions; owner filtering is a
/// precondition on the input, not a check performed here.
pub struct AggregationService;

impl AggregationService {
    /// Sums the amounts of transactions that fall inside `period`.
    /// Returns zero for an empty input.
    pub fn total_spent(transactions: &[Transaction], period: &Period) -> Money {
        transactions
            .iter()
            .filter(|txn| period.contains(txn.created_at))
            .map(|txn| txn.amount)
            .sum()
    }

    /// Groups in-period transactions by location, preserving the order in
    /// which each location is first encountered so downstream ranking can
    /// break ties stably.
    pub fn spend_by_location(transactions: &[Transaction], period: &Period) -> Vec<LocationSpend> {
        let mut groups: Vec<LocationSpend> = Vec::new();
        for txn in transactions
            .iter()
            .filter(|txn| period.contains(txn.created_at))
        {
            match groups
                .iter_mut()
                .find(|group| group.location_id == txn.location_id)
            {
                Some(group) => {
                    group.total += txn.amount;
                    group.count += 1;
                }
                None => groups.push(LocationSpend {
                    location_id: txn.location_id,
                    total: txn.amount,
                    count: 1,
                }),
            }
        }
        groups
    }
}
