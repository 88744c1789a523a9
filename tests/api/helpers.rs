use reqwest::Response;
use sqlx::{migrate, Connection, Executor, PgConnection, PgPool};
use std::sync::Once;
use uuid::Uuid;

use subscription_tracker::{
    config::{get_configuration, DatabaseSettings, Settings},
    startup::{get_connection_db_pool, Application},
    telemetry::{get_subscriber, init_subscriber},
};

static TRACING: Once = Once::new();

pub struct TestApp {
    pub config: Settings,
    pub address: String,
    pub db_pool: PgPool,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        // Logs are only printed when TEST_LOG is set, e.g. `TEST_LOG=true cargo test`
        TRACING.call_once(|| {
            let name = String::from("test");
            let filter = String::from("debug");

            if std::env::var("TEST_LOG").is_ok() {
                init_subscriber(get_subscriber(name, filter, std::io::stdout))
                    .expect("Failed to init tracing.");
            } else {
                init_subscriber(get_subscriber(name, filter, std::io::sink))
                    .expect("Failed to init tracing.");
            }
        });

        let mut config = get_configuration().expect("Missing configuration file.");
        let db_test_name = format!("db_{}", Uuid::new_v4().to_string().replace('-', "_"));

        // We are using port 0 as way to define a different port per each test. Port 0 is a special case that operating systems
        // take into account: when port is 0, the OS will search for the first available port
        config.set_app_port(0);

        let db_pool = configure_db(&mut config.database, db_test_name).await;

        let application = Application::build(config.clone())
            .await
            .expect("Failed to build application.");

        let address = format!("http://127.0.0.1:{}", application.get_port());

        tokio::spawn(application.run_until_stopped());

        TestApp {
            address,
            config,
            db_pool,
            client: reqwest::Client::new(),
        }
    }

    pub async fn post_subscription(&self, body: &serde_json::Value) -> Response {
        self.client
            .post(&format!("{}/subscriptions", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_subscription(&self, id: &str) -> Response {
        self.client
            .get(&format!("{}/subscriptions/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn patch_subscription(&self, id: &str, body: &serde_json::Value) -> Response {
        self.client
            .patch(&format!("{}/subscriptions/{}", self.address, id))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete_subscription(&self, id: &str) -> Response {
        self.client
            .delete(&format!("{}/subscriptions/{}", self.address, id))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn list_subscriptions(&self, query: &[(&str, &str)]) -> Response {
        self.client
            .get(&format!("{}/subscriptions/list", self.address))
            .query(query)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_total(&self, query: &[(&str, &str)]) -> Response {
        self.client
            .get(&format!("{}/subscriptions/total", self.address))
            .query(query)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Creates a subscription through the API and returns its identifier.
    pub async fn create_subscription(&self, body: serde_json::Value) -> String {
        let response = self.post_subscription(&body).await;

        assert_eq!(201, response.status().as_u16());

        let created: serde_json::Value = response.json().await.expect("Invalid JSON body.");

        created["id"]
            .as_str()
            .expect("Missing subscription id.")
            .to_string()
    }

    pub async fn total_for(&self, query: &[(&str, &str)]) -> i64 {
        let response = self.get_total(query).await;

        assert_eq!(200, response.status().as_u16());

        let body: serde_json::Value = response.json().await.expect("Invalid JSON body.");

        body["total"].as_i64().expect("Missing total.")
    }
}

async fn configure_db(db_config: &mut DatabaseSettings, db_test_name: String) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect_with(&db_config.get_server_options())
        .await
        .expect("Failed to connect to Postgres.");

    connection
        .execute(&*format!(r#"CREATE DATABASE "{}";"#, db_test_name))
        .await
        .expect("Failed to create database.");

    connection
        .close()
        .await
        .expect("Failed to close connection.");

    // Execute migrations
    db_config.set_name(db_test_name);

    let db_pool = get_connection_db_pool(db_config);

    migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run migrations.");

    db_pool
}
