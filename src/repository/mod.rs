use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::subscription::Subscription;
use crate::domain::total_filter::TotalFilter;

pub mod filter;
pub mod postgres;

pub use filter::SubscriptionFilter;
pub use postgres::PgSubscriptionRepository;

/// Storage for subscriptions. Every operation is a single statement.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    async fn create(&self, subscription: &Subscription) -> Result<(), RepositoryError>;

    /// Returns `Ok(None)` when no subscription has the given id.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Subscription>, RepositoryError>;

    /// Overwrites every mutable column of the row keyed by `subscription.id`.
    async fn update(&self, subscription: &Subscription) -> Result<(), RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;

    async fn list(&self, filter: &SubscriptionFilter)
        -> Result<Vec<Subscription>, RepositoryError>;

    async fn calculate_total(&self, filter: &TotalFilter) -> Result<i64, RepositoryError>;
}

#[derive(thiserror::Error)]
pub enum RepositoryError {
    #[error("Subscription not found.")]
    NotFound,
    #[error("Failed to execute query.")]
    Database(#[from] sqlx::Error),
}

impl std::fmt::Debug for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::NotFound => write!(f, "{}", self),
            RepositoryError::Database(err) => write!(f, "{}\nCaused by:\n\t{:?}", self, err),
        }
    }
}
