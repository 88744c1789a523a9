use std::sync::Arc;
use uuid::Uuid;

use crate::domain::new_subscription::NewSubscription;
use crate::domain::subscription::Subscription;
use crate::domain::total_filter::TotalFilter;
use crate::repository::{RepositoryError, SubscriptionFilter, SubscriptionRepository};

/// Assigns identifiers and validates subscriptions before they reach the repository.
#[derive(Clone)]
pub struct SubscriptionService {
    repository: Arc<dyn SubscriptionRepository>,
}

#[derive(thiserror::Error)]
pub enum SubscriptionServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("Subscription not found.")]
    NotFound,
    #[error("Failed to access the subscriptions store.")]
    Store(#[source] sqlx::Error),
}

impl std::fmt::Debug for SubscriptionServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionServiceError::Store(err) => {
                write!(f, "{}\nCaused by:\n\t{:?}", self, err)
            }
            _ => write!(f, "{}", self),
        }
    }
}

impl From<RepositoryError> for SubscriptionServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => SubscriptionServiceError::NotFound,
            RepositoryError::Database(err) => SubscriptionServiceError::Store(err),
        }
    }
}

impl SubscriptionService {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> SubscriptionService {
        SubscriptionService { repository }
    }

    #[tracing::instrument(name = "Create a subscription", skip(self, new_subscription))]
    pub async fn create(
        &self,
        new_subscription: NewSubscription,
    ) -> Result<Subscription, SubscriptionServiceError> {
        let subscription = new_subscription.with_id(Uuid::new_v4());

        subscription
            .validate()
            .map_err(SubscriptionServiceError::Validation)?;
        self.repository.create(&subscription).await?;

        tracing::info!(subscription_id = %subscription.id, "Subscription created");

        Ok(subscription)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Subscription>, SubscriptionServiceError> {
        Ok(self.repository.get_by_id(id).await?)
    }

    #[tracing::instrument(
        name = "Update a subscription",
        skip(self, subscription),
        fields(subscription_id = %subscription.id)
    )]
    pub async fn update(
        &self,
        subscription: &Subscription,
    ) -> Result<(), SubscriptionServiceError> {
        subscription
            .validate()
            .map_err(SubscriptionServiceError::Validation)?;

        Ok(self.repository.update(subscription).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), SubscriptionServiceError> {
        Ok(self.repository.delete(id).await?)
    }

    pub async fn list(
        &self,
        filter: &SubscriptionFilter,
    ) -> Result<Vec<Subscription>, SubscriptionServiceError> {
        Ok(self.repository.list(filter).await?)
    }

    pub async fn calculate_total(
        &self,
        filter: &TotalFilter,
    ) -> Result<i64, SubscriptionServiceError> {
        filter
            .validate()
            .map_err(SubscriptionServiceError::Validation)?;

        Ok(self.repository.calculate_total(filter).await?)
    }
}
