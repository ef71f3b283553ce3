//! Repository traits for record operations.

pub mod dashboard;
pub mod expenses;
pub mod lifecycle;
pub mod records;
pub mod subscriptions;
pub mod trash;

pub use dashboard::DashboardRepo;
pub use expenses::ExpenseRepo;
pub use lifecycle::LifecycleRepo;
pub use records::RecordRepo;
pub use subscriptions::SubscriptionRepo;
pub use trash::TrashRepo;
