use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::{
    api::records,
    database::StoreHandle,
    models::{EmailQuery, InsertAck},
    services::records_service::BOOKINGS,
};

#[utoipa::path(
    get,
    path = "/bookings",
    tag = "Bookings",
    params(EmailQuery),
    responses(
        (status = 200, description = "Bookings of the email, [] when none", body = [Object]),
        (status = 400, description = "Missing email"),
        (status = 503, description = "Document store is not ready"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_bookings(store: web::Data<StoreHandle>, query: web::Query<EmailQuery>) -> HttpResponse {
    log::info!("🏨 GET /bookings - email: {:?}", query.filter());
    records::list(&store, &query, BOOKINGS).await
}

#[utoipa::path(
    post,
    path = "/bookings",
    tag = "Bookings",
    request_body = Object,
    responses(
        (status = 201, description = "Booking created", body = InsertAck),
        (status = 400, description = "Missing email"),
        (status = 503, description = "Document store is not ready"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_booking(store: web::Data<StoreHandle>, body: web::Json<Value>) -> HttpResponse {
    log::info!("📝 POST /bookings");
    records::create(&store, body, BOOKINGS).await
}
