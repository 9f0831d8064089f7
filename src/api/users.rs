use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::{
    api::error_response,
    database::StoreHandle,
    models::{EmailQuery, InsertAck, UpdateAck},
    services::users_service,
};

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(EmailQuery),
    responses(
        (status = 200, description = "Users, optionally filtered by email", body = [Object]),
        (status = 503, description = "Document store is not ready"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_users(store: web::Data<StoreHandle>, query: web::Query<EmailQuery>) -> HttpResponse {
    log::info!("👥 GET /users - email filter: {:?}", query.filter());

    let store = match store.get() {
        Ok(store) => store,
        Err(e) => return error_response("Error listing users", &e),
    };

    match users_service::list_users(store.as_ref(), query.filter()).await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => error_response("Error listing users", &e),
    }
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = Object,
    responses(
        (status = 201, description = "User created", body = InsertAck),
        (status = 400, description = "Missing email or user already exists"),
        (status = 503, description = "Document store is not ready"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_user(store: web::Data<StoreHandle>, body: web::Json<Value>) -> HttpResponse {
    log::info!("📝 POST /users");

    let store = match store.get() {
        Ok(store) => store,
        Err(e) => return error_response("Error creating user", &e),
    };

    match users_service::create_user(store.as_ref(), body.into_inner()).await {
        Ok(ack) => {
            log::info!("✅ User created: {}", ack.inserted_id);
            HttpResponse::Created().json(ack)
        }
        Err(e) => error_response("Error creating user", &e),
    }
}

#[utoipa::path(
    get,
    path = "/users/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "The user", body = Object),
        (status = 404, description = "User not found"),
        (status = 503, description = "Document store is not ready"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_user(store: web::Data<StoreHandle>, email: web::Path<String>) -> HttpResponse {
    log::info!("👤 GET /users/{}", email);

    let store = match store.get() {
        Ok(store) => store,
        Err(e) => return error_response("Error fetching user", &e),
    };

    match users_service::get_user(store.as_ref(), &email).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => error_response("Error fetching user", &e),
    }
}

/// PATCH and PUT /users/{email} behave the same: a `$set` of the body fields.
#[utoipa::path(
    method(patch, put),
    path = "/users/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    request_body = Object,
    responses(
        (status = 200, description = "User updated", body = UpdateAck),
        (status = 400, description = "Empty update or email already taken"),
        (status = 404, description = "User not found"),
        (status = 503, description = "Document store is not ready"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_user(
    store: web::Data<StoreHandle>,
    email: web::Path<String>,
    body: web::Json<Value>,
) -> HttpResponse {
    log::info!("🔧 Update /users/{}", email);

    let store = match store.get() {
        Ok(store) => store,
        Err(e) => return error_response("Error updating user", &e),
    };

    match users_service::update_user(store.as_ref(), &email, body.into_inner()).await {
        Ok(ack) => {
            log::info!("✅ User {} updated ({} modified)", email, ack.modified_count);
            HttpResponse::Ok().json(ack)
        }
        Err(e) => error_response("Error updating user", &e),
    }
}
