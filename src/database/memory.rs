use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::collections::HashMap;
use std::sync::RwLock;

use super::store::{DocumentStore, UpdateOutcome};
use crate::utils::AppError;

/// Process-local document store.
///
/// Collections are kept in insertion order, which matches the ascending `_id`
/// order the MongoDB backend returns for generated ids.
#[derive(Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in `collection`
    #[cfg(test)]
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .map(|c| c.get(collection).map(Vec::len).unwrap_or(0))
            .unwrap_or(0)
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

fn is_truthy(value: &Bson) -> bool {
    match value {
        Bson::Boolean(b) => *b,
        Bson::Int32(n) => *n != 0,
        Bson::Int64(n) => *n != 0,
        Bson::Double(n) => *n != 0.0,
        Bson::Null => false,
        _ => true,
    }
}

fn project(document: &Document, projection: &Document) -> Document {
    let mut projected = Document::new();
    if let Some(id) = document.get("_id") {
        projected.insert("_id", id.clone());
    }
    for (field, flag) in projection {
        if field == "_id" {
            if !is_truthy(flag) {
                projected.remove("_id");
            }
            continue;
        }
        if is_truthy(flag) {
            if let Some(value) = document.get(field) {
                projected.insert(field.clone(), value.clone());
            }
        }
    }
    projected
}

/// `$set` of a single field. A dotted key addresses a nested document and
/// creates missing levels, as MongoDB does. Array positions (`items.0`) are
/// not supported and fail like a path through a scalar.
fn set_field(document: &mut Document, path: &str, value: Bson) -> Result<bool, AppError> {
    let Some((head, rest)) = path.split_once('.') else {
        if document.get(path) == Some(&value) {
            return Ok(false);
        }
        document.insert(path, value);
        return Ok(true);
    };

    if !document.contains_key(head) {
        document.insert(head, Document::new());
    }
    match document.get_mut(head) {
        Some(Bson::Document(inner)) => set_field(inner, rest, value),
        _ => Err(AppError::DatabaseError(format!(
            "Cannot create field '{}' in element '{}'",
            rest, head
        ))),
    }
}

fn lock_error<T>(_: T) -> AppError {
    AppError::DatabaseError("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError> {
        let collections = self.collections.read().map_err(lock_error)?;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| matches(d, &filter)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
        projection: Option<Document>,
    ) -> Result<Option<Document>, AppError> {
        let collections = self.collections.read().map_err(lock_error)?;
        let found = collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches(d, &filter)));

        Ok(found.map(|doc| match &projection {
            Some(p) => project(doc, p),
            None => doc.clone(),
        }))
    }

    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<Bson, AppError> {
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };

        let mut collections = self.collections.write().map_err(lock_error)?;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|d| d.get("_id") == Some(&id)) {
            return Err(AppError::DatabaseError(format!(
                "duplicate key error: _id {} already exists in {}",
                id, collection
            )));
        }
        docs.push(document);
        Ok(id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateOutcome, AppError> {
        let mut collections = self.collections.write().map_err(lock_error)?;
        let target = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| matches(d, &filter)));

        let Some(document) = target else {
            return Ok(UpdateOutcome::default());
        };

        // Applied to a copy so a failing path leaves the document untouched
        let mut updated = document.clone();
        let mut modified = false;
        for (key, value) in fields {
            modified |= set_field(&mut updated, &key, value)?;
        }
        *document = updated;

        Ok(UpdateOutcome {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn close(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[actix_web::test]
    async fn test_insert_assigns_object_id() {
        let store = InMemoryStore::new();
        let id = store.insert_one("users", doc! { "email": "a@x.com" }).await.unwrap();
        assert!(matches!(id, Bson::ObjectId(_)));

        let found = store
            .find_one("users", doc! { "_id": id.clone() }, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get_str("email").unwrap(), "a@x.com");
    }

    #[actix_web::test]
    async fn test_find_keeps_insertion_order() {
        let store = InMemoryStore::new();
        for amount in [30, 10, 20] {
            store
                .insert_one("bookings", doc! { "email": "a@x.com", "amount": amount })
                .await
                .unwrap();
        }
        store.insert_one("bookings", doc! { "email": "b@x.com", "amount": 99 }).await.unwrap();

        let found = store.find("bookings", doc! { "email": "a@x.com" }).await.unwrap();
        let amounts: Vec<i32> = found.iter().map(|d| d.get_i32("amount").unwrap()).collect();
        assert_eq!(amounts, vec![30, 10, 20]);
    }

    #[actix_web::test]
    async fn test_find_on_missing_collection_is_empty() {
        let store = InMemoryStore::new();
        let found = store.find("nothing", Document::new()).await.unwrap();
        assert!(found.is_empty());
    }

    #[actix_web::test]
    async fn test_projection_keeps_id_and_field() {
        let store = InMemoryStore::new();
        let id = store
            .insert_one("tourPlaces", doc! { "name": "Sajek", "hotel": [{ "name": "Cloud Inn" }] })
            .await
            .unwrap();

        let projected = store
            .find_one("tourPlaces", doc! { "_id": id }, Some(doc! { "hotel": 1 }))
            .await
            .unwrap()
            .unwrap();
        assert!(projected.contains_key("_id"));
        assert!(projected.contains_key("hotel"));
        assert!(!projected.contains_key("name"));
    }

    #[actix_web::test]
    async fn test_update_counts() {
        let store = InMemoryStore::new();
        store.insert_one("users", doc! { "email": "a@x.com", "name": "A" }).await.unwrap();

        let outcome = store
            .update_one("users", doc! { "email": "a@x.com" }, doc! { "name": "B" })
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome { matched_count: 1, modified_count: 1 });

        let unchanged = store
            .update_one("users", doc! { "email": "a@x.com" }, doc! { "name": "B" })
            .await
            .unwrap();
        assert_eq!(unchanged, UpdateOutcome { matched_count: 1, modified_count: 0 });

        let missing = store
            .update_one("users", doc! { "email": "z@x.com" }, doc! { "name": "B" })
            .await
            .unwrap();
        assert_eq!(missing, UpdateOutcome::default());
    }

    #[actix_web::test]
    async fn test_dotted_key_sets_nested_field() {
        let store = InMemoryStore::new();
        store
            .insert_one("users", doc! { "email": "a@x.com", "profile": { "city": "Dhaka", "age": 30 } })
            .await
            .unwrap();

        let outcome = store
            .update_one("users", doc! { "email": "a@x.com" }, doc! { "profile.city": "Sylhet", "prefs.lang": "bn" })
            .await
            .unwrap();
        assert_eq!(outcome.modified_count, 1);

        let user = store.find_one("users", doc! { "email": "a@x.com" }, None).await.unwrap().unwrap();
        assert!(!user.contains_key("profile.city"));
        let profile = user.get_document("profile").unwrap();
        assert_eq!(profile.get_str("city").unwrap(), "Sylhet");
        assert_eq!(profile.get_i32("age").unwrap(), 30);
        assert_eq!(user.get_document("prefs").unwrap().get_str("lang").unwrap(), "bn");
    }

    #[actix_web::test]
    async fn test_dotted_key_through_scalar_fails_without_changes() {
        let store = InMemoryStore::new();
        store.insert_one("users", doc! { "email": "a@x.com", "name": "A" }).await.unwrap();

        let err = store
            .update_one("users", doc! { "email": "a@x.com" }, doc! { "role": "guide", "name.first": "B" })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));

        let user = store.find_one("users", doc! { "email": "a@x.com" }, None).await.unwrap().unwrap();
        assert_eq!(user.get_str("name").unwrap(), "A");
        assert!(!user.contains_key("role"));
    }

    #[actix_web::test]
    async fn test_duplicate_id_rejected() {
        let store = InMemoryStore::new();
        store.insert_one("users", doc! { "_id": "fixed" }).await.unwrap();
        let err = store.insert_one("users", doc! { "_id": "fixed" }).await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
        assert_eq!(store.count("users"), 1);
    }
}
