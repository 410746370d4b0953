use futures::stream::StreamExt;
use mongodb::bson::doc;

use crate::{
    database::MongoDB,
    models::{InsertResponse, Review},
    utils::error::AppError,
};

pub async fn create_review(db: &MongoDB, review: Review) -> Result<InsertResponse, AppError> {
    let collection = db.collection::<Review>("reviews");

    let result = collection
        .insert_one(review)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(result.into())
}

pub async fn list_reviews(db: &MongoDB) -> Result<Vec<Review>, AppError> {
    let collection = db.collection::<Review>("reviews");

    let mut cursor = collection
        .find(doc! {})
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut reviews = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(review) => reviews.push(review),
            Err(e) => log::error!("Error reading review document: {}", e),
        }
    }

    Ok(reviews)
}
