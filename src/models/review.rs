use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// Free-form feedback, loosely tied to a camp or user. Append-only.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Review {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camp_id: Option<String>,
    #[serde(flatten)]
    pub extra: Document,
}
