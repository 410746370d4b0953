use futures::stream::StreamExt;
use mongodb::bson::{doc, Document};
use serde::Deserialize;

use crate::{
    database::MongoDB,
    models::{Camp, DeleteResponse, InsertResponse, UpdateResponse},
    utils::error::AppError,
    utils::ids::parse_object_id,
};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateCampRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub organizer: Option<String>,
    pub price: Option<f64>,
}

fn build_update_doc(request: &UpdateCampRequest) -> Document {
    let mut set = Document::new();
    if let Some(name) = &request.name {
        set.insert("name", name.as_str());
    }
    if let Some(location) = &request.location {
        set.insert("location", location.as_str());
    }
    if let Some(organizer) = &request.organizer {
        set.insert("organizer", organizer.as_str());
    }
    if let Some(price) = request.price {
        set.insert("price", price);
    }
    set
}

pub async fn create_camp(db: &MongoDB, camp: Camp) -> Result<InsertResponse, AppError> {
    let collection = db.collection::<Camp>("camps");

    let result = collection
        .insert_one(camp)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(result.into())
}

pub async fn list_camps(db: &MongoDB) -> Result<Vec<Camp>, AppError> {
    let collection = db.collection::<Camp>("camps");

    let mut cursor = collection
        .find(doc! {})
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut camps = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(camp) => camps.push(camp),
            Err(e) => log::error!("Error reading camp document: {}", e),
        }
    }

    Ok(camps)
}

pub async fn get_camp(db: &MongoDB, id: &str) -> Result<Camp, AppError> {
    let oid = parse_object_id(id)?;
    let collection = db.collection::<Camp>("camps");

    collection
        .find_one(doc! { "_id": oid })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Camp not found".to_string()))
}

pub async fn update_camp(
    db: &MongoDB,
    id: &str,
    request: UpdateCampRequest,
) -> Result<UpdateResponse, AppError> {
    let oid = parse_object_id(id)?;

    let set = build_update_doc(&request);
    if set.is_empty() {
        return Err(AppError::InvalidRequest("no fields to update".to_string()));
    }

    let collection = db.collection::<Camp>("camps");

    let result = collection
        .update_one(doc! { "_id": oid }, doc! { "$set": set })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(result.into())
}

/// Registers one more guest on a camp. The counter is created by the first
/// join and grows by exactly one per call.
pub async fn join_camp(db: &MongoDB, id: &str) -> Result<UpdateResponse, AppError> {
    let oid = parse_object_id(id)?;
    let collection = db.collection::<Camp>("camps");

    let result = collection
        .update_one(doc! { "_id": oid }, doc! { "$inc": { "guests": 1 } })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if result.matched_count == 0 {
        return Err(AppError::NotFound("Camp not found".to_string()));
    }

    Ok(result.into())
}

pub async fn delete_camp(db: &MongoDB, id: &str) -> Result<DeleteResponse, AppError> {
    let oid = parse_object_id(id)?;
    let collection = db.collection::<Camp>("camps");

    let result = collection
        .delete_one(doc! { "_id": oid })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(result.into())
}
