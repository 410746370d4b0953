use futures::stream::StreamExt;
use mongodb::bson::doc;
use serde::Serialize;

use crate::{
    database::MongoDB,
    models::{DeleteResponse, InsertResponse, UpdateResponse, User},
    utils::error::AppError,
    utils::ids::parse_object_id,
};

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AdminFlagResponse {
    pub admin: bool,
}

/// Inserts the user unless one with the same email already exists. The
/// duplicate case is not an error: it responds with a message and no id.
pub async fn create_user(db: &MongoDB, user: User) -> Result<InsertResponse, AppError> {
    let collection = db.collection::<User>("users");

    let existing = collection
        .find_one(doc! { "email": &user.email })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if existing.is_some() {
        return Ok(InsertResponse {
            inserted_id: None,
            message: Some("user already exists".to_string()),
        });
    }

    let result = collection
        .insert_one(user)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(result.into())
}

pub async fn find_by_email(db: &MongoDB, email: &str) -> Result<Option<User>, AppError> {
    let collection = db.collection::<User>("users");

    collection
        .find_one(doc! { "email": email })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))
}

/// Role lookup used by both the admin guard and GET /users/admin/{email}.
/// An unknown email is simply not an admin.
pub async fn is_admin(db: &MongoDB, email: &str) -> Result<bool, AppError> {
    let user = find_by_email(db, email).await?;
    Ok(user.map(|u| u.is_admin()).unwrap_or(false))
}

pub async fn list_users(db: &MongoDB) -> Result<Vec<User>, AppError> {
    let collection = db.collection::<User>("users");

    let mut cursor = collection
        .find(doc! {})
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut users = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(user) => users.push(user),
            Err(e) => log::error!("Error reading user document: {}", e),
        }
    }

    Ok(users)
}

/// Unconditional promotion; there is no demotion path, only deletion.
pub async fn promote_to_admin(db: &MongoDB, id: &str) -> Result<UpdateResponse, AppError> {
    let oid = parse_object_id(id)?;
    let collection = db.collection::<User>("users");

    let result = collection
        .update_one(doc! { "_id": oid }, doc! { "$set": { "role": "admin" } })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(result.into())
}

pub async fn delete_user(db: &MongoDB, id: &str) -> Result<DeleteResponse, AppError> {
    let oid = parse_object_id(id)?;
    let collection = db.collection::<User>("users");

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

    fn user(email: &str) -> User {
        serde_json::from_value(serde_json::json!({
            "email": email,
            "name": "Test User",
        }))
        .unwrap()
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_duplicate_registration_keeps_one_document() {
        let db = test_db().await;
        let email = format!("dup-{}@example.com", uuid::Uuid::new_v4());

        let first = create_user(&db, user(&email)).await.unwrap();
        assert!(first.inserted_id.is_some());

        let second = create_user(&db, user(&email)).await.unwrap();
        assert!(second.inserted_id.is_none());
        assert_eq!(second.message.as_deref(), Some("user already exists"));

        let collection = db.collection::<User>("users");
        let count = collection
            .count_documents(doc! { "email": &email })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_promote_then_admin_flag() {
        let db = test_db().await;
        let email = format!("admin-{}@example.com", uuid::Uuid::new_v4());

        let created = create_user(&db, user(&email)).await.unwrap();
        let id = created.inserted_id.unwrap();

        assert!(!is_admin(&db, &email).await.unwrap());

        let result = promote_to_admin(&db, &id).await.unwrap();
        assert_eq!(result.modified_count, 1);

        assert!(is_admin(&db, &email).await.unwrap());
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_delete_user_by_malformed_id_is_rejected() {
        let db = test_db().await;
        let err = delete_user(&db, "not-an-id").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }
}
