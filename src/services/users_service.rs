// ==================== USERS ====================
// Users are keyed by email. The gateway enforces email uniqueness on create
// and on updates that change the email.

use mongodb::bson::{doc, Document};
use serde_json::Value;

use crate::{
    database::DocumentStore,
    models::{
        self, documents_to_json, document_to_json, json_to_document, normalize_email, normalized_email,
        InsertAck, UpdateAck,
    },
    utils::AppError,
};

/// GET /users - all users, or the users matching `email`
pub async fn list_users(store: &dyn DocumentStore, email: Option<&str>) -> Result<Value, AppError> {
    let filter = match email {
        Some(email) => doc! { "email": email },
        None => Document::new(),
    };
    let users = store.find(models::USERS, filter).await?;
    Ok(documents_to_json(users))
}

/// GET /users/{email}
pub async fn get_user(store: &dyn DocumentStore, email: &str) -> Result<Value, AppError> {
    let email = normalize_email(email);
    store
        .find_one(models::USERS, doc! { "email": email }, None)
        .await?
        .map(document_to_json)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// POST /users - rejects an email that is already registered
pub async fn create_user(store: &dyn DocumentStore, body: Value) -> Result<InsertAck, AppError> {
    let mut user = json_to_document(body)?;
    let email = normalized_email(&mut user)?;

    let existing = store
        .find_one(models::USERS, doc! { "email": &email }, None)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let inserted_id = store.insert_one(models::USERS, user).await?;
    log::info!("👤 User {} registered", email);
    Ok(InsertAck::from(inserted_id))
}

/// PATCH/PUT /users/{email} - `$set` the body fields on the user
pub async fn update_user(
    store: &dyn DocumentStore,
    email: &str,
    body: Value,
) -> Result<UpdateAck, AppError> {
    let email = normalize_email(email);
    let mut fields = json_to_document(body)?;
    fields.remove("_id");

    if fields.is_empty() {
        return Err(AppError::InvalidRequest("No fields to update".to_string()));
    }

    if fields.contains_key("email") {
        let new_email = normalized_email(&mut fields)
            .map_err(|_| AppError::InvalidRequest("Field 'email' must be a non-empty string".to_string()))?;

        if new_email != email {
            let taken = store
                .find_one(models::USERS, doc! { "email": &new_email }, None)
                .await?;
            if taken.is_some() {
                return Err(AppError::Conflict("User already exists".to_string()));
            }
        }
    }

    let outcome = store
        .update_one(models::USERS, doc! { "email": email }, fields)
        .await?;

    if outcome.matched_count == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(UpdateAck::from(outcome))
}
