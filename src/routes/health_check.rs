use actix_web::HttpResponse;

/// Endpoint used by clients and orchestrators to know if the server is up
#[tracing::instrument(name = "Health Check handler")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
