use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::repository::SubscriptionFilter;
use crate::routes::subscriptions::{parse_user_id, SubscriptionError};
use crate::service::SubscriptionService;

#[derive(Deserialize, Debug)]
pub struct ListParameters {
    pub user_id: Option<String>,
    pub service_name: Option<String>,
}

#[tracing::instrument(name = "Listing subscriptions handler", skip(service))]
pub async fn handle_list_subscriptions(
    parameters: web::Query<ListParameters>,
    service: web::Data<SubscriptionService>,
) -> Result<HttpResponse, SubscriptionError> {
    let parameters = parameters.into_inner();
    let user_id = parse_user_id(parameters.user_id.as_deref())?;
    let filter = SubscriptionFilter::new(user_id, parameters.service_name);

    let subscriptions = service.list(&filter).await?;

    Ok(HttpResponse::Ok().json(subscriptions))
}
