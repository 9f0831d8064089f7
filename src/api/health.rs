use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::database::StoreHandle;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub store_ready: bool,
    pub timestamp: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Document store is not connected yet", body = HealthResponse)
    )
)]
pub async fn health_check(store: web::Data<StoreHandle>) -> impl Responder {
    let store_ready = store.is_ready();
    let body = HealthResponse {
        status: if store_ready { "healthy" } else { "starting" }.to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store_ready,
        timestamp: chrono::Utc::now().timestamp(),
    };

    if store_ready {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
