//! Shared handler bodies for the email-keyed record routes.

use actix_web::{web, HttpResponse};
use serde_json::Value;

use crate::{
    api::error_response,
    database::StoreHandle,
    models::EmailQuery,
    services::records_service::{self, RecordKind},
};

/// GET with a required `?email=`, answering every matching record
pub async fn list(store: &StoreHandle, query: &EmailQuery, kind: RecordKind) -> HttpResponse {
    let context = format!("Error listing {}", kind.label.to_lowercase());

    let email = match query.required() {
        Ok(email) => email,
        Err(e) => return error_response(&context, &e),
    };
    let store = match store.get() {
        Ok(store) => store,
        Err(e) => return error_response(&context, &e),
    };

    match records_service::list_records(store.as_ref(), kind, email).await {
        Ok(records) => {
            log::info!("✅ {} records for {}: {}", kind.label, email, records.as_array().map_or(0, Vec::len));
            HttpResponse::Ok().json(records)
        }
        Err(e) => error_response(&context, &e),
    }
}

/// GET with a required `?email=`, answering the first matching record
pub async fn fetch_one(store: &StoreHandle, query: &EmailQuery, kind: RecordKind) -> HttpResponse {
    let context = format!("Error fetching {}", kind.label.to_lowercase());

    let email = match query.required() {
        Ok(email) => email,
        Err(e) => return error_response(&context, &e),
    };
    let store = match store.get() {
        Ok(store) => store,
        Err(e) => return error_response(&context, &e),
    };

    match records_service::get_record(store.as_ref(), kind, email).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(e) => error_response(&context, &e),
    }
}

pub async fn create(store: &StoreHandle, body: web::Json<Value>, kind: RecordKind) -> HttpResponse {
    let context = format!("Error saving {}", kind.label.to_lowercase());

    let store = match store.get() {
        Ok(store) => store,
        Err(e) => return error_response(&context, &e),
    };

    match records_service::create_record(store.as_ref(), kind, body.into_inner()).await {
        Ok(ack) => HttpResponse::Created().json(ack),
        Err(e) => error_response(&context, &e),
    }
}
