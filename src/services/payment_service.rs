use futures::stream::StreamExt;
use mongodb::bson::doc;

use crate::{
    database::MongoDB,
    models::{Participant, Payment, UpdateResponse},
    utils::error::AppError,
};

/// Records a payment, then flips the matching registration to "Paid".
///
/// Two sequential single-document writes: the payment insert is not rolled
/// back if the participant update fails, and a payment whose camp_id matches
/// no registration leaves a recorded payment and a no-op update
/// (matched_count 0). The participant update result is the response body.
pub async fn record_payment(db: &MongoDB, payment: Payment) -> Result<UpdateResponse, AppError> {
    let payments = db.collection::<Payment>("payments");
    let camp_id = payment.camp_id.clone();

    let inserted = payments
        .insert_one(payment)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    log::info!(
        "💾 Payment recorded: {:?}, marking registrations for camp {} as Paid",
        inserted.inserted_id,
        camp_id
    );

    let participants = db.collection::<Participant>("participant");

    let result = participants
        .update_one(
            doc! { "camp_id": &camp_id },
            doc! { "$set": { "status": "Paid" } },
        )
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if result.matched_count == 0 {
        log::warn!("⚠️ No registration matched camp {} for this payment", camp_id);
    }

    Ok(result.into())
}

pub async fn list_payments(db: &MongoDB) -> Result<Vec<Payment>, AppError> {
    let collection = db.collection::<Payment>("payments");

    let mut cursor = collection
        .find(doc! {})
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut payments = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(payment) => payments.push(payment),
            Err(e) => log::error!("Error reading payment document: {}", e),
        }
    }

    Ok(payments)
}

pub async fn payments_by_email(db: &MongoDB, email: &str) -> Result<Vec<Payment>, AppError> {
    let collection = db.collection::<Payment>("payments");

    let mut cursor = collection
        .find(doc! { "email": email })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut payments = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(payment) => payments.push(payment),
            Err(e) => log::error!("Error reading payment document: {}", e),
        }
    }

    Ok(payments)
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

    fn payment(camp_id: &str, email: &str) -> Payment {
        serde_json::from_value(serde_json::json!({
            "email": email,
            "amount": 25.0,
            "currency": "usd",
            "camp_id": camp_id,
        }))
        .unwrap()
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
    async fn test_payment_marks_only_matching_registration() {
        let db = test_db().await;
        let paid_camp = uuid::Uuid::new_v4().to_string();
        let other_camp = uuid::Uuid::new_v4().to_string();

        let participants = db.collection::<Participant>("participant");
        crate::services::participant_service::register_participant(
            &db,
            participant(&paid_camp, "payer@example.com"),
        )
        .await
        .unwrap();
        crate::services::participant_service::register_participant(
            &db,
            participant(&other_camp, "other@example.com"),
        )
        .await
        .unwrap();

        let result = record_payment(&db, payment(&paid_camp, "payer@example.com"))
            .await
            .unwrap();
        assert_eq!(result.matched_count, 1);
        assert_eq!(result.modified_count, 1);

        let paid = participants
            .find_one(doc! { "camp_id": &paid_camp })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(paid.status.as_deref(), Some("Paid"));

        let untouched = participants
            .find_one(doc! { "camp_id": &other_camp })
            .await
            .unwrap()
            .unwrap();
        assert!(untouched.status.is_none());
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mismatched_camp_id_is_a_silent_noop() {
        // A payment whose camp_id matches no registration still gets
        // recorded; the response carries matched_count 0 instead of an error.
        let db = test_db().await;
        let camp_id = uuid::Uuid::new_v4().to_string();

        let result = record_payment(&db, payment(&camp_id, "noone@example.com"))
            .await
            .unwrap();
        assert_eq!(result.matched_count, 0);
        assert_eq!(result.modified_count, 0);

        let payments = db.collection::<Payment>("payments");
        let stored = payments
            .find_one(doc! { "camp_id": &camp_id })
            .await
            .unwrap();
        assert!(stored.is_some());
    }
}
