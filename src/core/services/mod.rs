pub mod admission_service;
pub mod aggregation_service;
pub mod history_service;
pub mod insights_service;
pub mod snapshot_service;

pub use admission_service::{AdmissionService, AdmissionVerdict, RejectionReason};
pub use aggregation_service::{AggregationService, LocationSpend};
pub use history_service::{HistoryRange, HistoryService, HistorySummary, SpendingHistory};
pub use insights_service::{BudgetInsights, InsightsService, Recommendation};
pub use snapshot_service::{BudgetSnapshot, SnapshotService};
