//! Conversions between request/response JSON and stored BSON documents.

use mongodb::bson::{self, Bson, Document};
use serde_json::{Map, Value};

use crate::utils::AppError;

/// Renders a stored value as plain JSON: ObjectIds as hex strings,
/// dates as RFC 3339, everything else as relaxed extended JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Value::from(dt.timestamp_millis()),
        },
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_json(doc: Document) -> Value {
    Value::Object(
        doc.into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect::<Map<String, Value>>(),
    )
}

pub fn documents_to_json(docs: Vec<Document>) -> Value {
    Value::Array(docs.into_iter().map(document_to_json).collect())
}

/// Request bodies must be JSON objects
pub fn json_to_document(value: Value) -> Result<Document, AppError> {
    if !value.is_object() {
        return Err(AppError::InvalidRequest(
            "Request body must be a JSON object".to_string(),
        ));
    }
    bson::to_document(&value)
        .map_err(|e| AppError::InvalidRequest(format!("Unsupported document: {}", e)))
}

/// Non-empty string field, or a 400 naming the field
pub fn required_str<'a>(doc: &'a Document, field: &str) -> Result<&'a str, AppError> {
    match doc.get_str(field) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::InvalidRequest(format!("Field '{}' is required", field))),
    }
}

/// Canonical form of an owner email. Bodies, paths and `?email=` all go
/// through this so a stored email is found by the same value it was sent as.
pub fn normalize_email(email: &str) -> &str {
    email.trim()
}

/// Required `email` field, rewritten in `doc` in its normalized form
pub fn normalized_email(doc: &mut Document) -> Result<String, AppError> {
    let email = normalize_email(required_str(doc, "email")?).to_string();
    doc.insert("email", email.clone());
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId, DateTime};
    use serde_json::json;

    #[test]
    fn test_object_id_renders_as_hex() {
        let oid = ObjectId::new();
        let rendered = document_to_json(doc! { "_id": oid, "name": "Cox's Bazar" });
        assert_eq!(rendered, json!({ "_id": oid.to_hex(), "name": "Cox's Bazar" }));
    }

    #[test]
    fn test_nested_values() {
        let rendered = document_to_json(doc! {
            "hotel": [{ "name": "Sea Pearl", "rooms": 12_i64 }],
            "rating": 4.5,
            "visible": true,
            "note": Bson::Null,
        });
        assert_eq!(
            rendered,
            json!({
                "hotel": [{ "name": "Sea Pearl", "rooms": 12 }],
                "rating": 4.5,
                "visible": true,
                "note": null
            })
        );
    }

    #[test]
    fn test_datetime_renders_as_rfc3339() {
        let dt = DateTime::from_millis(0);
        assert_eq!(bson_to_json(Bson::DateTime(dt)), json!("1970-01-01T00:00:00Z"));
    }

    #[test]
    fn test_body_must_be_object() {
        assert!(json_to_document(json!([1, 2])).is_err());
        assert!(json_to_document(json!("user")).is_err());

        let doc = json_to_document(json!({ "email": "a@x.com", "balance": 100 })).unwrap();
        assert_eq!(doc.get_str("email").unwrap(), "a@x.com");
        assert_eq!(doc.get_i64("balance").unwrap(), 100);
    }

    #[test]
    fn test_required_str() {
        let doc = doc! { "email": "a@x.com", "blank": "  ", "count": 3 };
        assert_eq!(required_str(&doc, "email").unwrap(), "a@x.com");
        assert!(required_str(&doc, "blank").is_err());
        assert!(required_str(&doc, "count").is_err());
        assert!(required_str(&doc, "missing").is_err());
    }

    #[test]
    fn test_email_field_is_stored_trimmed() {
        let mut doc = doc! { "email": "  a@x.com\t", "balance": 10 };
        assert_eq!(normalized_email(&mut doc).unwrap(), "a@x.com");
        assert_eq!(doc.get_str("email").unwrap(), "a@x.com");

        let mut blank = doc! { "email": "   " };
        assert!(normalized_email(&mut blank).is_err());
    }
}
