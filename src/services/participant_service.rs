use futures::stream::StreamExt;
use mongodb::bson::doc;

use crate::{
    database::MongoDB,
    models::{DeleteResponse, InsertResponse, Participant, UpdateResponse},
    utils::error::AppError,
    utils::ids::parse_object_id,
};

/// Inserts the registration as-is. There is no dedup against an existing
/// camp_id+email pair, so repeated registrations create repeated documents.
pub async fn register_participant(
    db: &MongoDB,
    participant: Participant,
) -> Result<InsertResponse, AppError> {
    let collection = db.collection::<Participant>("participant");

    let result = collection
        .insert_one(participant)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(result.into())
}

pub async fn list_participants(db: &MongoDB) -> Result<Vec<Participant>, AppError> {
    let collection = db.collection::<Participant>("participant");

    let mut cursor = collection
        .find(doc! {})
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut participants = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(participant) => participants.push(participant),
            Err(e) => log::error!("Error reading participant document: {}", e),
        }
    }

    Ok(participants)
}

/// A missing participant is not an error here: the lookup responds with
/// JSON null, matching the behavior the frontend was built against.
pub async fn get_participant(db: &MongoDB, id: &str) -> Result<Option<Participant>, AppError> {
    let oid = parse_object_id(id)?;
    let collection = db.collection::<Participant>("participant");

    collection
        .find_one(doc! { "_id": oid })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
}

/// Marks a registration "Confirmed". Unconditional: confirming twice is a
/// no-op on the second call (modified_count 0).
pub async fn confirm_participant(db: &MongoDB, id: &str) -> Result<UpdateResponse, AppError> {
    let oid = parse_object_id(id)?;
    let collection = db.collection::<Participant>("participant");

    let result = collection
        .update_one(doc! { "_id": oid }, doc! { "$set": { "confirm": "Confirmed" } })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(result.into())
}

pub async fn delete_participant(db: &MongoDB, id: &str) -> Result<DeleteResponse, AppError> {
    let oid = parse_object_id(id)?;
    let collection = db.collection::<Participant>("participant");

    let result = collection
        .delete_one(doc! { "_id": oid })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(result.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> MongoDB {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017/campAidTest".to_string());
        MongoDB::new(&uri).await.expect("MongoDB must be running")
    }

    fn participant(camp_id: &str, email: &str) -> Participant {
        serde_json::from_value(serde_json::json!({
            "camp_id": camp_id,
            "email": email,
        }))
        .unwrap()
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_duplicate_registrations_are_allowed() {
        let db = test_db().await;
        let camp_id = uuid::Uuid::new_v4().to_string();

        register_participant(&db, participant(&camp_id, "a@example.com"))
            .await
            .unwrap();
        register_participant(&db, participant(&camp_id, "a@example.com"))
            .await
            .unwrap();

        let collection = db.collection::<Participant>("participant");
        let count = collection
            .count_documents(doc! { "camp_id": &camp_id })
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_confirm_sets_confirmed() {
        let db = test_db().await;
        let camp_id = uuid::Uuid::new_v4().to_string();

        let created = register_participant(&db, participant(&camp_id, "a@example.com"))
            .await
            .unwrap();
        let id = created.inserted_id.unwrap();

        let result = confirm_participant(&db, &id).await.unwrap();
        assert_eq!(result.modified_count, 1);

        let stored = get_participant(&db, &id).await.unwrap().unwrap();
        assert_eq!(stored.confirm.as_deref(), Some("Confirmed"));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_missing_participant_reads_as_none() {
        let db = test_db().await;
        let missing = mongodb::bson::oid::ObjectId::new().to_hex();
        assert!(get_participant(&db, &missing).await.unwrap().is_none());
    }
}
