use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{postgres::PgRow, PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::domain::month_year::MonthYear;
use crate::domain::subscription::Subscription;
use crate::domain::total_filter::TotalFilter;
use crate::repository::{RepositoryError, SubscriptionFilter, SubscriptionRepository};

const SELECT_SUBSCRIPTIONS: &str = r#"
    SELECT id, service_name, price, user_id, start_date, end_date
    FROM subscriptions
"#;

pub struct PgSubscriptionRepository {
    db_pool: PgPool,
}

impl PgSubscriptionRepository {
    pub fn new(db_pool: PgPool) -> PgSubscriptionRepository {
        PgSubscriptionRepository { db_pool }
    }
}

fn subscription_from_row(row: &PgRow) -> Result<Subscription, sqlx::Error> {
    let start_date: NaiveDate = row.try_get("start_date")?;
    let end_date: Option<NaiveDate> = row.try_get("end_date")?;

    Ok(Subscription {
        id: row.try_get("id")?,
        service_name: row.try_get("service_name")?,
        price: row.try_get("price")?,
        user_id: row.try_get("user_id")?,
        start_date: MonthYear::from_date(start_date),
        end_date: end_date.map(MonthYear::from_date),
    })
}

pub(crate) fn list_query(filter: &SubscriptionFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(SELECT_SUBSCRIPTIONS);

    query.push("WHERE 1=1");
    filter.push_predicates(&mut query);

    query
}

/// A subscription counts towards the total when its active span overlaps the
/// window: it started no later than `to` and has not ended before `from`.
pub(crate) fn total_query(filter: &TotalFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(
        "SELECT COALESCE(SUM(price), 0)::BIGINT AS total FROM subscriptions WHERE start_date <= ",
    );

    query
        .push_bind(filter.to.as_date())
        .push(" AND (end_date IS NULL OR end_date >= ")
        .push_bind(filter.from.as_date())
        .push(")");
    SubscriptionFilter::from(filter).push_predicates(&mut query);

    query
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    #[tracing::instrument(
        name = "Insert a new subscription into the database",
        skip(self, subscription),
        fields(subscription_id = %subscription.id)
    )]
    async fn create(&self, subscription: &Subscription) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (id, service_name, price, user_id, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(subscription.id)
        .bind(&subscription.service_name)
        .bind(subscription.price)
        .bind(subscription.user_id)
        .bind(subscription.start_date.as_date())
        .bind(subscription.end_date.map(|date| date.as_date()))
        .execute(&self.db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            err
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Fetch a subscription by id", skip(self))]
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Subscription>, RepositoryError> {
        let query = format!("{} WHERE id = $1", SELECT_SUBSCRIPTIONS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|err| {
                tracing::error!("Failed to execute query: {:?}", err);
                err
            })?;

        match row {
            Some(row) => Ok(Some(subscription_from_row(&row)?)),
            None => Ok(None),
        }
    }

    #[tracing::instrument(
        name = "Update a subscription in the database",
        skip(self, subscription),
        fields(subscription_id = %subscription.id)
    )]
    async fn update(&self, subscription: &Subscription) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE subscriptions
            SET service_name = $1,
                price = $2,
                start_date = $3,
                end_date = $4,
                updated_at = NOW()
            WHERE id = $5
            "#,
        )
        .bind(&subscription.service_name)
        .bind(subscription.price)
        .bind(subscription.start_date.as_date())
        .bind(subscription.end_date.map(|date| date.as_date()))
        .bind(subscription.id)
        .execute(&self.db_pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute query: {:?}", err);
            err
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Delete a subscription from the database", skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await
            .map_err(|err| {
                tracing::error!("Failed to execute query: {:?}", err);
                err
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "List subscriptions", skip(self))]
    async fn list(
        &self,
        filter: &SubscriptionFilter,
    ) -> Result<Vec<Subscription>, RepositoryError> {
        let rows = list_query(filter)
            .build()
            .fetch_all(&self.db_pool)
            .await
            .map_err(|err| {
                tracing::error!("Failed to execute query: {:?}", err);
                err
            })?;

        rows.iter()
            .map(subscription_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepositoryError::from)
    }

    #[tracing::instrument(name = "Calculate the total price of subscriptions", skip(self))]
    async fn calculate_total(&self, filter: &TotalFilter) -> Result<i64, RepositoryError> {
        let row = total_query(filter)
            .build()
            .fetch_one(&self.db_pool)
            .await
            .map_err(|err| {
                tracing::error!("Failed to execute query: {:?}", err);
                err
            })?;

        Ok(row.try_get("total")?)
    }
}
