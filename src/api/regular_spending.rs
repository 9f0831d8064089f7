use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::{
    api::records,
    database::StoreHandle,
    models::{EmailQuery, InsertAck},
    services::records_service::REGULAR_SPENDING,
};

#[utoipa::path(
    get,
    path = "/regular-spending",
    tag = "Regular Spending",
    params(EmailQuery),
    responses(
        (status = 200, description = "Spending records of the email", body = [Object]),
        (status = 400, description = "Missing email"),
        (status = 503, description = "Document store is not ready")
    )
)]
pub async fn list_spending(store: web::Data<StoreHandle>, query: web::Query<EmailQuery>) -> HttpResponse {
    log::info!("💸 GET /regular-spending - email: {:?}", query.filter());
    records::list(&store, &query, REGULAR_SPENDING).await
}

#[utoipa::path(
    post,
    path = "/regular-spending",
    tag = "Regular Spending",
    request_body = Object,
    responses(
        (status = 201, description = "Spending record created", body = InsertAck),
        (status = 400, description = "Missing email"),
        (status = 503, description = "Document store is not ready")
    )
)]
pub async fn create_spending(store: web::Data<StoreHandle>, body: web::Json<Value>) -> HttpResponse {
    log::info!("📝 POST /regular-spending");
    records::create(&store, body, REGULAR_SPENDING).await
}
