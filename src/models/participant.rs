use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// A registration of interest in a camp. `camp_id` is the key the payment
/// flow filters on when marking a registration paid. `status` moves from
/// unset to "Paid" once; `confirm` moves from unset to "Confirmed".
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Participant {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub camp_id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<String>,
    #[serde(flatten)]
    pub extra: Document,
}
