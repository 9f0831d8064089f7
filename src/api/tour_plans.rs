use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::{
    api::records,
    database::StoreHandle,
    models::{EmailQuery, InsertAck},
    services::records_service::TOUR_PLANS,
};

#[utoipa::path(
    get,
    path = "/tour-plan",
    tag = "Tour Plans",
    params(EmailQuery),
    responses(
        (status = 200, description = "Tour plans of the email, [] when none", body = [Object]),
        (status = 400, description = "Missing email"),
        (status = 503, description = "Document store is not ready"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_tour_plans(store: web::Data<StoreHandle>, query: web::Query<EmailQuery>) -> HttpResponse {
    log::info!("🧭 GET /tour-plan - email: {:?}", query.filter());
    records::list(&store, &query, TOUR_PLANS).await
}

#[utoipa::path(
    post,
    path = "/tour-plan",
    tag = "Tour Plans",
    request_body = Object,
    responses(
        (status = 201, description = "Tour plan created", body = InsertAck),
        (status = 400, description = "Missing email"),
        (status = 503, description = "Document store is not ready"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_tour_plan(store: web::Data<StoreHandle>, body: web::Json<Value>) -> HttpResponse {
    log::info!("📝 POST /tour-plan");
    records::create(&store, body, TOUR_PLANS).await
}
