use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

use crate::database::UpdateOutcome;

/// Acknowledgment returned by create endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    #[schema(example = "66f1c0ffee0ddba11ca7e0a1")]
    pub inserted_id: String,
}

impl From<Bson> for InsertAck {
    fn from(id: Bson) -> Self {
        let inserted_id = match id {
            Bson::ObjectId(oid) => oid.to_hex(),
            Bson::String(s) => s,
            other => other.to_string(),
        };
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Acknowledgment returned by update endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

impl From<UpdateOutcome> for UpdateAck {
    fn from(outcome: UpdateOutcome) -> Self {
        Self {
            acknowledged: true,
            matched_count: outcome.matched_count,
            modified_count: outcome.modified_count,
            upserted_count: 0,
            upserted_id: None,
        }
    }
}
