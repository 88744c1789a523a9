use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::month_year::MonthYear;
use crate::domain::total_filter::TotalFilter;
use crate::routes::subscriptions::{parse_user_id, SubscriptionError};
use crate::service::SubscriptionService;

#[derive(Deserialize, Debug)]
pub struct TotalParameters {
    pub user_id: Option<String>,
    pub service_name: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Serialize)]
struct TotalResponse {
    total: i64,
}

fn parse_bound(value: Option<&str>, name: &str) -> Result<MonthYear, SubscriptionError> {
    let value = value.filter(|value| !value.is_empty()).ok_or_else(|| {
        SubscriptionError::InvalidRequest(String::from("dates 'from' and 'to' are required"))
    })?;

    MonthYear::parse(value)
        .map_err(|_| SubscriptionError::InvalidRequest(format!("invalid date '{}'", name)))
}

#[tracing::instrument(name = "Calculating subscriptions total handler", skip(service))]
pub async fn handle_calculate_total(
    parameters: web::Query<TotalParameters>,
    service: web::Data<SubscriptionService>,
) -> Result<HttpResponse, SubscriptionError> {
    let parameters = parameters.into_inner();
    let from = parse_bound(parameters.from.as_deref(), "from")?;
    let to = parse_bound(parameters.to.as_deref(), "to")?;
    let filter = TotalFilter {
        user_id: parse_user_id(parameters.user_id.as_deref())?,
        service_name: parameters.service_name.filter(|name| !name.is_empty()),
        from,
        to,
    };

    let total = service.calculate_total(&filter).await?;

    Ok(HttpResponse::Ok().json(TotalResponse { total }))
}
