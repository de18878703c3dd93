#![doc(test(attr(deny(warnings))))]

//! Mealbudget Core offers the budget-period, spending-aggregation, and
//! admission primitives that power the meal planner's budget API.

pub mod clock;
pub mod core;
pub mod domain;
pub mod errors;
pub mod period;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Mealbudget Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
