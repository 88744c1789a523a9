use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use uuid::Uuid;

use crate::domain::new_subscription::{NewSubscription, NewSubscriptionBody};
use crate::domain::subscription_patch::{SubscriptionPatch, SubscriptionPatchBody};
use crate::routes::error_chain_fmt;
use crate::service::{SubscriptionService, SubscriptionServiceError};

#[derive(thiserror::Error)]
pub enum SubscriptionError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("Subscription not found.")]
    NotFound,
    #[error("Something went wrong while handling the subscription.")]
    Unexpected(#[source] SubscriptionServiceError),
}

impl std::fmt::Debug for SubscriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubscriptionError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubscriptionError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            SubscriptionError::NotFound => StatusCode::NOT_FOUND,
            SubscriptionError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SubscriptionServiceError> for SubscriptionError {
    fn from(err: SubscriptionServiceError) -> Self {
        match err {
            SubscriptionServiceError::Validation(message) => {
                SubscriptionError::InvalidRequest(message)
            }
            SubscriptionServiceError::NotFound => SubscriptionError::NotFound,
            err @ SubscriptionServiceError::Store(_) => {
                tracing::error!("Subscriptions store failure: {:?}", err);
                SubscriptionError::Unexpected(err)
            }
        }
    }
}

pub(crate) fn parse_subscription_id(id: &str) -> Result<Uuid, SubscriptionError> {
    Uuid::parse_str(id).map_err(|_| SubscriptionError::InvalidRequest(String::from("invalid UUID")))
}

/// Empty query values count as absent.
pub(crate) fn parse_user_id(user_id: Option<&str>) -> Result<Option<Uuid>, SubscriptionError> {
    match user_id.filter(|value| !value.is_empty()) {
        Some(value) => Uuid::parse_str(value)
            .map(Some)
            .map_err(|_| SubscriptionError::InvalidRequest(String::from("invalid user_id"))),
        None => Ok(None),
    }
}

#[tracing::instrument(
    name = "Creating a new subscription handler",
    skip(body, service),
    fields(
        service_name = %body.service_name,
        user_id = %body.user_id
    )
)]
pub async fn handle_create_subscription(
    body: web::Json<NewSubscriptionBody>,
    service: web::Data<SubscriptionService>,
) -> Result<HttpResponse, SubscriptionError> {
    let new_subscription = NewSubscription::try_from(body).map_err(|err| {
        tracing::error!("Validation error: {:?}", err);
        SubscriptionError::InvalidRequest(err)
    })?;
    let subscription = service.create(new_subscription).await?;

    Ok(HttpResponse::Created().json(subscription))
}

#[tracing::instrument(name = "Fetching a subscription handler", skip(service))]
pub async fn handle_get_subscription(
    path: web::Path<String>,
    service: web::Data<SubscriptionService>,
) -> Result<HttpResponse, SubscriptionError> {
    let id = parse_subscription_id(&path)?;

    match service.get(id).await? {
        Some(subscription) => Ok(HttpResponse::Ok().json(subscription)),
        None => Err(SubscriptionError::NotFound),
    }
}

/// Fetches the record, applies the supplied fields and writes the whole row back.
#[tracing::instrument(name = "Updating a subscription handler", skip(body, service))]
pub async fn handle_update_subscription(
    path: web::Path<String>,
    body: web::Json<SubscriptionPatchBody>,
    service: web::Data<SubscriptionService>,
) -> Result<HttpResponse, SubscriptionError> {
    let id = parse_subscription_id(&path)?;
    let patch =
        SubscriptionPatch::try_from(body.into_inner()).map_err(SubscriptionError::InvalidRequest)?;

    let mut subscription = service.get(id).await?.ok_or(SubscriptionError::NotFound)?;

    patch.apply_to(&mut subscription);
    service.update(&subscription).await?;

    Ok(HttpResponse::Ok().json(subscription))
}

#[tracing::instrument(name = "Deleting a subscription handler", skip(service))]
pub async fn handle_delete_subscription(
    path: web::Path<String>,
    service: web::Data<SubscriptionService>,
) -> Result<HttpResponse, SubscriptionError> {
    let id = parse_subscription_id(&path)?;

    service.delete(id).await?;

    Ok(HttpResponse::NoContent().finish())
}
