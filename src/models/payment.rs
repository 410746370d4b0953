use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// A recorded payment. Append-only: never updated after insert. `camp_id`
/// carries the item reference used to flip the matching participant to
/// "Paid".
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct Payment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub email: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub camp_id: String,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Document,
}
