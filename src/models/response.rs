use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use serde::Serialize;

/// Result of an insert. `inserted_id` is None when nothing was inserted
/// (e.g. a duplicate user registration), with `message` saying why.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct InsertResponse {
    pub inserted_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<InsertOneResult> for InsertResponse {
    fn from(result: InsertOneResult) -> Self {
        Self {
            inserted_id: result.inserted_id.as_object_id().map(|id| id.to_hex()),
            message: None,
        }
    }
}

/// Result of an update-one. A `matched_count` of 0 means the filter hit
/// nothing and the update was a no-op.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UpdateResponse {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<UpdateResult> for UpdateResponse {
    fn from(result: UpdateResult) -> Self {
        Self {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub deleted_count: u64,
}

impl From<DeleteResult> for DeleteResponse {
    fn from(result: DeleteResult) -> Self {
        Self {
            deleted_count: result.deleted_count,
        }
    }
}
