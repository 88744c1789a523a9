use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Pool, Postgres};
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use crate::config::{DatabaseSettings, Settings};
use crate::repository::PgSubscriptionRepository;
use crate::routes::{
    handle_calculate_total, handle_create_subscription, handle_delete_subscription,
    handle_get_subscription, handle_list_subscriptions, handle_update_subscription,
    health_check,
};
use crate::service::SubscriptionService;

pub struct Application {
    pub port: u16,
    pub server: Server,
    db_pool: PgPool,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, std::io::Error> {
        let db_pool = get_connection_db_pool(&config.database);
        let repository = PgSubscriptionRepository::new(db_pool.clone());
        let service = SubscriptionService::new(Arc::new(repository));

        let listener = TcpListener::bind(config.get_address())?;
        let port = listener.local_addr()?.port();
        let server = run(listener, service, config.get_shutdown_timeout())?;

        Ok(Self {
            port,
            server,
            db_pool,
        })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    /// Runs until a shutdown signal stops the server, then releases the pool.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        let result = self.server.await;

        tracing::info!("Server stopped, closing the database pool");
        self.db_pool.close().await;

        result
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Literal paths must be registered before `/subscriptions/{id}` to win the match
    cfg.route("/health_check", web::get().to(health_check))
        .route("/subscriptions", web::post().to(handle_create_subscription))
        .route(
            "/subscriptions/list",
            web::get().to(handle_list_subscriptions),
        )
        .route("/subscriptions/total", web::get().to(handle_calculate_total))
        .route("/subscriptions/{id}", web::get().to(handle_get_subscription))
        .route(
            "/subscriptions/{id}",
            web::patch().to(handle_update_subscription),
        )
        .route(
            "/subscriptions/{id}",
            web::delete().to(handle_delete_subscription),
        );
}

pub fn run(
    listener: TcpListener,
    service: SubscriptionService,
    shutdown_timeout: u64,
) -> Result<Server, std::io::Error> {
    let service = web::Data::new(service);

    let server = HttpServer::new(move || {
        // App is where your application logic lives: routing, middlewares, request handler, etc
        App::new()
            // 'wrap' method adds a middleware to the App. This specific middleware provide incoming
            // request logger
            .wrap(TracingLogger::default())
            .configure(configure_routes)
            .app_data(service.clone())
    })
    // On SIGINT/SIGTERM stop accepting and give in-flight requests this long to finish
    .shutdown_timeout(shutdown_timeout)
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn get_connection_db_pool(config: &DatabaseSettings) -> Pool<Postgres> {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(config.get_db_options())
}
