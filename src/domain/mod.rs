pub mod budget;
pub mod money;
pub mod transaction;

pub use budget::{BudgetConfig, RecurrenceUnit};
pub use money::Money;
pub use transaction::Transaction;
