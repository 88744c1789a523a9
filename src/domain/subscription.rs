use serde::Serialize;
use uuid::Uuid;

use crate::domain::month_year::MonthYear;

/// A user's paid enrollment in a service. `price` is in the smallest currency unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    pub id: Uuid,
    pub service_name: String,
    pub price: i32,
    pub user_id: Uuid,
    pub start_date: MonthYear,
    pub end_date: Option<MonthYear>,
}

impl Subscription {
    pub fn validate(&self) -> Result<(), String> {
        if self.service_name.is_empty() {
            return Err(String::from("service name is required"));
        }

        if self.price <= 0 {
            return Err(String::from("price must be positive"));
        }

        if self.start_date.is_zero() {
            return Err(String::from("start date is required"));
        }

        if let Some(end_date) = self.end_date {
            if end_date < self.start_date {
                return Err(String::from("end date cannot be before start date"));
            }
        }

        Ok(())
    }
}
