// ==================== TOUR PLACES ====================
// Tour places are addressed by their store-generated ObjectId.

use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use serde_json::Value;

use crate::{
    database::DocumentStore,
    models::{self, bson_to_json, documents_to_json, document_to_json, json_to_document, required_str, InsertAck},
    utils::AppError,
};

/// Fields of a tour place that can be fetched on their own
pub const HOTEL: &str = "hotel";
pub const TOUR_GUIDE: &str = "tourGuide";

/// A malformed id is a server error, not a 400: clients send ids they got from us.
fn parse_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::MalformedId(id.to_string()))
}

/// GET /tour-places
pub async fn list_tour_places(store: &dyn DocumentStore) -> Result<Value, AppError> {
    let places = store.find(models::TOUR_PLACES, Document::new()).await?;
    Ok(documents_to_json(places))
}

/// GET /tour-places/{id}
pub async fn get_tour_place(store: &dyn DocumentStore, id: &str) -> Result<Value, AppError> {
    let oid = parse_id(id)?;
    store
        .find_one(models::TOUR_PLACES, doc! { "_id": oid }, None)
        .await?
        .map(document_to_json)
        .ok_or_else(|| AppError::NotFound("Tour place not found".to_string()))
}

/// GET /tour-places/{id}/{field} - the field value, `[]` when the place lacks it
pub async fn get_tour_place_field(
    store: &dyn DocumentStore,
    id: &str,
    field: &str,
) -> Result<Value, AppError> {
    let oid = parse_id(id)?;
    let mut projection = Document::new();
    projection.insert(field, 1);

    let mut place = store
        .find_one(models::TOUR_PLACES, doc! { "_id": oid }, Some(projection))
        .await?
        .ok_or_else(|| AppError::NotFound("Tour place not found".to_string()))?;

    Ok(match place.remove(field) {
        None | Some(Bson::Null) => Value::Array(Vec::new()),
        Some(value) => bson_to_json(value),
    })
}

/// POST /tour-places
pub async fn create_tour_place(store: &dyn DocumentStore, body: Value) -> Result<InsertAck, AppError> {
    let place = json_to_document(body)?;
    required_str(&place, "name")?;

    let inserted_id = store.insert_one(models::TOUR_PLACES, place).await?;
    Ok(InsertAck::from(inserted_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryStore;
    use serde_json::json;

    async fn seed(store: &InMemoryStore, place: Value) -> String {
        create_tour_place(store, place).await.unwrap().inserted_id
    }

    #[actix_web::test]
    async fn test_get_by_id() {
        let store = InMemoryStore::new();
        let id = seed(&store, json!({ "name": "Sajek Valley" })).await;

        let place = get_tour_place(&store, &id).await.unwrap();
        assert_eq!(place["name"], "Sajek Valley");
        assert_eq!(place["_id"], id);
    }

    #[actix_web::test]
    async fn test_unknown_id_is_not_found() {
        let store = InMemoryStore::new();
        let err = get_tour_place(&store, &ObjectId::new().to_hex()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[actix_web::test]
    async fn test_malformed_id() {
        let store = InMemoryStore::new();
        let err = get_tour_place(&store, "not-an-id").await.unwrap_err();
        assert_eq!(err, AppError::MalformedId("not-an-id".to_string()));
    }

    #[actix_web::test]
    async fn test_field_projection() {
        let store = InMemoryStore::new();
        let id = seed(
            &store,
            json!({
                "name": "Srimangal",
                "hotel": [{ "name": "Tea Resort" }],
                "tourGuide": [{ "name": "Rahim", "phone": "01700000000" }]
            }),
        )
        .await;

        let hotels = get_tour_place_field(&store, &id, HOTEL).await.unwrap();
        assert_eq!(hotels, json!([{ "name": "Tea Resort" }]));

        let guides = get_tour_place_field(&store, &id, TOUR_GUIDE).await.unwrap();
        assert_eq!(guides[0]["name"], "Rahim");
    }

    #[actix_web::test]
    async fn test_missing_field_is_empty_array() {
        let store = InMemoryStore::new();
        let id = seed(&store, json!({ "name": "Kuakata", "tourGuide": null })).await;

        assert_eq!(get_tour_place_field(&store, &id, HOTEL).await.unwrap(), json!([]));
        assert_eq!(get_tour_place_field(&store, &id, TOUR_GUIDE).await.unwrap(), json!([]));
    }

    #[actix_web::test]
    async fn test_field_of_missing_place() {
        let store = InMemoryStore::new();
        let err = get_tour_place_field(&store, &ObjectId::new().to_hex(), HOTEL)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
