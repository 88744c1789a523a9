use actix_web::web;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::month_year::MonthYear;
use crate::domain::subscription::Subscription;

/// A subscription that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: MonthYear,
    pub end_date: Option<MonthYear>,
}

#[derive(Deserialize, Debug)]
pub struct NewSubscriptionBody {
    pub service_name: String,
    pub price: i32,
    pub user_id: String,
    pub start_date: String,
    pub end_date: Option<String>,
}

impl NewSubscription {
    pub fn with_id(self, id: Uuid) -> Subscription {
        Subscription {
            id,
            service_name: self.service_name,
            price: self.price,
            user_id: self.user_id,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

impl TryFrom<NewSubscriptionBody> for NewSubscription {
    type Error = String;

    fn try_from(body: NewSubscriptionBody) -> Result<Self, Self::Error> {
        let user_id = Uuid::parse_str(&body.user_id)
            .map_err(|_| format!("{} is not a valid user_id", body.user_id))?;
        let start_date = MonthYear::parse(&body.start_date)
            .map_err(|err| format!("invalid start_date: {}", err))?;
        let end_date = body
            .end_date
            .as_deref()
            .map(MonthYear::parse)
            .transpose()
            .map_err(|err| format!("invalid end_date: {}", err))?;

        Ok(NewSubscription {
            service_name: body.service_name,
            price: body.price,
            user_id,
            start_date,
            end_date,
        })
    }
}

impl TryFrom<web::Json<NewSubscriptionBody>> for NewSubscription {
    type Error = String;

    fn try_from(body: web::Json<NewSubscriptionBody>) -> Result<Self, Self::Error> {
        body.into_inner().try_into()
    }
}
