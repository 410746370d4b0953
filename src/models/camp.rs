use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// A camp offering. `guests` starts unset and is incremented by one for each
/// join; the first join creates the field.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Camp {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<i64>,
    #[serde(flatten)]
    pub extra: Document,
}
