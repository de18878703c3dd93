pub mod services;
pub mod spending_tracker;

pub use spending_tracker::{BudgetOverview, BudgetPatch, SpendingTracker};
