// ==================== EMAIL-KEYED RECORDS ====================
// Wallets, regular spending, bookings and tour plans all hang off a user's
// email. Nothing checks that the email belongs to a registered user.

use mongodb::bson::doc;
use serde_json::Value;

use crate::{
    database::DocumentStore,
    models::{self, documents_to_json, document_to_json, json_to_document, normalized_email, InsertAck},
    utils::AppError,
};

/// A collection of records owned by an email address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordKind {
    pub collection: &'static str,
    /// Singular label used in messages and logs
    pub label: &'static str,
}

pub const TOURIST_WALLET: RecordKind = RecordKind {
    collection: models::TOURIST_WALLET,
    label: "Tourist wallet",
};

pub const REGULAR_SPENDING: RecordKind = RecordKind {
    collection: models::REGULAR_SPENDING,
    label: "Regular spending",
};

pub const BOOKINGS: RecordKind = RecordKind {
    collection: models::BOOKINGS,
    label: "Booking",
};

pub const TOUR_PLANS: RecordKind = RecordKind {
    collection: models::TOUR_PLANS,
    label: "Tour plan",
};

/// Every record of `kind` owned by `email`, oldest first. No match is an empty list.
pub async fn list_records(
    store: &dyn DocumentStore,
    kind: RecordKind,
    email: &str,
) -> Result<Value, AppError> {
    let records = store.find(kind.collection, doc! { "email": email }).await?;
    Ok(documents_to_json(records))
}

/// First record of `kind` owned by `email`
pub async fn get_record(
    store: &dyn DocumentStore,
    kind: RecordKind,
    email: &str,
) -> Result<Value, AppError> {
    store
        .find_one(kind.collection, doc! { "email": email }, None)
        .await?
        .map(document_to_json)
        .ok_or_else(|| AppError::NotFound(format!("{} not found", kind.label)))
}

/// Stores the request body as a new record. The body must carry `email`.
pub async fn create_record(
    store: &dyn DocumentStore,
    kind: RecordKind,
    body: Value,
) -> Result<InsertAck, AppError> {
    let mut record = json_to_document(body)?;
    let email = normalized_email(&mut record)?;

    let inserted_id = store.insert_one(kind.collection, record).await?;
    log::info!("🧾 {} saved for {}", kind.label, email);
    Ok(InsertAck::from(inserted_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryStore;
    use serde_json::json;

    #[actix_web::test]
    async fn test_wallet_lookup() {
        let store = InMemoryStore::new();
        let ack = create_record(&store, TOURIST_WALLET, json!({ "email": "a@x.com", "balance": 100 }))
            .await
            .unwrap();
        assert!(ack.acknowledged);

        let wallet = get_record(&store, TOURIST_WALLET, "a@x.com").await.unwrap();
        assert_eq!(wallet["balance"], 100);
        assert_eq!(wallet["_id"], ack.inserted_id);

        let err = get_record(&store, TOURIST_WALLET, "b@x.com").await.unwrap_err();
        assert_eq!(err, AppError::NotFound("Tourist wallet not found".to_string()));
    }

    #[actix_web::test]
    async fn test_records_are_one_to_many() {
        let store = InMemoryStore::new();
        for place in ["Bandarban", "Sylhet"] {
            create_record(&store, BOOKINGS, json!({ "email": "a@x.com", "place": place }))
                .await
                .unwrap();
        }
        create_record(&store, BOOKINGS, json!({ "email": "b@x.com", "place": "Rangamati" }))
            .await
            .unwrap();

        let bookings = list_records(&store, BOOKINGS, "a@x.com").await.unwrap();
        assert_eq!(bookings[0]["place"], "Bandarban");
        assert_eq!(bookings[1]["place"], "Sylhet");
        assert_eq!(bookings.as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_no_records_is_empty_list() {
        let store = InMemoryStore::new();
        let plans = list_records(&store, TOUR_PLANS, "nobody@x.com").await.unwrap();
        assert_eq!(plans, json!([]));
    }

    #[actix_web::test]
    async fn test_tour_plan_body_is_stored() {
        let store = InMemoryStore::new();
        create_record(&store, TOUR_PLANS, json!({ "email": "a@x.com", "days": 3 }))
            .await
            .unwrap();

        let plans = list_records(&store, TOUR_PLANS, "a@x.com").await.unwrap();
        assert_eq!(plans[0]["days"], 3);
    }

    #[actix_web::test]
    async fn test_create_requires_email() {
        let store = InMemoryStore::new();
        let err = create_record(&store, REGULAR_SPENDING, json!({ "amount": 250 }))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
        assert_eq!(store.count(models::REGULAR_SPENDING), 0);
    }

    #[actix_web::test]
    async fn test_padded_email_is_stored_trimmed() {
        let store = InMemoryStore::new();
        create_record(&store, TOURIST_WALLET, json!({ "email": "\ta@x.com  ", "balance": 50 }))
            .await
            .unwrap();

        let wallet = get_record(&store, TOURIST_WALLET, "a@x.com").await.unwrap();
        assert_eq!(wallet["email"], "a@x.com");
        assert_eq!(wallet["balance"], 50);
    }
}
