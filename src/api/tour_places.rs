use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::{
    api::error_response,
    database::StoreHandle,
    models::InsertAck,
    services::tour_places_service::{self, HOTEL, TOUR_GUIDE},
};

#[utoipa::path(
    get,
    path = "/tour-places",
    tag = "Tour Places",
    responses(
        (status = 200, description = "All tour places", body = [Object]),
        (status = 503, description = "Document store is not ready"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_tour_places(store: web::Data<StoreHandle>) -> HttpResponse {
    log::info!("🗺️  GET /tour-places");

    let store = match store.get() {
        Ok(store) => store,
        Err(e) => return error_response("Error listing tour places", &e),
    };

    match tour_places_service::list_tour_places(store.as_ref()).await {
        Ok(places) => HttpResponse::Ok().json(places),
        Err(e) => error_response("Error listing tour places", &e),
    }
}

#[utoipa::path(
    post,
    path = "/tour-places",
    tag = "Tour Places",
    request_body = Object,
    responses(
        (status = 201, description = "Tour place created", body = InsertAck),
        (status = 400, description = "Missing name"),
        (status = 503, description = "Document store is not ready"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_tour_place(store: web::Data<StoreHandle>, body: web::Json<Value>) -> HttpResponse {
    log::info!("📝 POST /tour-places");

    let store = match store.get() {
        Ok(store) => store,
        Err(e) => return error_response("Error creating tour place", &e),
    };

    match tour_places_service::create_tour_place(store.as_ref(), body.into_inner()).await {
        Ok(ack) => {
            log::info!("✅ Tour place created: {}", ack.inserted_id);
            HttpResponse::Created().json(ack)
        }
        Err(e) => error_response("Error creating tour place", &e),
    }
}

#[utoipa::path(
    get,
    path = "/tour-places/{id}",
    tag = "Tour Places",
    params(("id" = String, Path, description = "Tour place ObjectId")),
    responses(
        (status = 200, description = "The tour place", body = Object),
        (status = 404, description = "Tour place not found"),
        (status = 500, description = "Malformed id or internal error")
    )
)]
pub async fn get_tour_place(store: web::Data<StoreHandle>, id: web::Path<String>) -> HttpResponse {
    log::info!("📍 GET /tour-places/{}", id);

    let store = match store.get() {
        Ok(store) => store,
        Err(e) => return error_response("Error fetching tour place", &e),
    };

    match tour_places_service::get_tour_place(store.as_ref(), &id).await {
        Ok(place) => HttpResponse::Ok().json(place),
        Err(e) => error_response("Error fetching tour place", &e),
    }
}

async fn get_field(store: web::Data<StoreHandle>, id: &str, field: &str) -> HttpResponse {
    log::info!("📍 GET /tour-places/{}/{}", id, field);

    let context = format!("Error fetching {} of tour place", field);
    let store = match store.get() {
        Ok(store) => store,
        Err(e) => return error_response(&context, &e),
    };

    match tour_places_service::get_tour_place_field(store.as_ref(), id, field).await {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(&context, &e),
    }
}

#[utoipa::path(
    get,
    path = "/tour-places/{id}/hotel",
    tag = "Tour Places",
    params(("id" = String, Path, description = "Tour place ObjectId")),
    responses(
        (status = 200, description = "Hotels of the place, [] when none", body = [Object]),
        (status = 404, description = "Tour place not found"),
        (status = 500, description = "Malformed id or internal error")
    )
)]
pub async fn get_hotels(store: web::Data<StoreHandle>, id: web::Path<String>) -> HttpResponse {
    get_field(store, &id, HOTEL).await
}

#[utoipa::path(
    get,
    path = "/tour-places/{id}/tourGuide",
    tag = "Tour Places",
    params(("id" = String, Path, description = "Tour place ObjectId")),
    responses(
        (status = 200, description = "Tour guides of the place, [] when none", body = [Object]),
        (status = 404, description = "Tour place not found"),
        (status = 500, description = "Malformed id or internal error")
    )
)]
pub async fn get_tour_guides(store: web::Data<StoreHandle>, id: web::Path<String>) -> HttpResponse {
    get_field(store, &id, TOUR_GUIDE).await
}
