//! Optional equality filters shared by the list and total queries.
//!
//! Predicates are always emitted in the same order (`user_id`, then
//! `service_name`) and every value goes through a bound parameter.

use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::total_filter::TotalFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    UserId(Uuid),
    ServiceName(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub column: &'static str,
    pub value: FilterValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionFilter {
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
}

impl SubscriptionFilter {
    pub fn new(user_id: Option<Uuid>, service_name: Option<String>) -> SubscriptionFilter {
        SubscriptionFilter {
            user_id,
            service_name,
        }
    }

    /// An empty service name counts as "no filter", not as "match the empty string".
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::with_capacity(2);

        if let Some(user_id) = self.user_id {
            predicates.push(Predicate {
                column: "user_id",
                value: FilterValue::UserId(user_id),
            });
        }

        if let Some(service_name) = self.service_name.as_ref().filter(|name| !name.is_empty()) {
            predicates.push(Predicate {
                column: "service_name",
                value: FilterValue::ServiceName(service_name.clone()),
            });
        }

        predicates
    }

    /// Appends ` AND <column> = $n` for each predicate. The builder numbers the
    /// placeholders, so this must run after any binds of the base query.
    pub fn push_predicates<'args>(&self, query: &mut QueryBuilder<'args, Postgres>) {
        for predicate in self.predicates() {
            query.push(" AND ").push(predicate.column).push(" = ");

            match predicate.value {
                FilterValue::UserId(user_id) => query.push_bind(user_id),
                FilterValue::ServiceName(service_name) => query.push_bind(service_name),
            };
        }
    }
}

impl From<&TotalFilter> for SubscriptionFilter {
    fn from(filter: &TotalFilter) -> Self {
        SubscriptionFilter::new(filter.user_id, filter.service_name.clone())
    }
}
