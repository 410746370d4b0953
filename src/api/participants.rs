use actix_web::{web, HttpResponse, ResponseError};

use crate::{database::MongoDB, models::Participant, services::participant_service};

pub async fn register_participant(
    db: web::Data<MongoDB>,
    participant: web::Json<Participant>,
) -> HttpResponse {
    log::info!(
        "📝 POST /participant - camp: {}, email: {}",
        participant.camp_id,
        participant.email
    );

    match participant_service::register_participant(&db, participant.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error registering participant: {}", e);
            e.error_response()
        }
    }
}

pub async fn list_participants(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("📋 GET /participant");

    match participant_service::list_participants(&db).await {
        Ok(participants) => HttpResponse::Ok().json(participants),
        Err(e) => {
            log::error!("❌ Error fetching participants: {}", e);
            e.error_response()
        }
    }
}

pub async fn get_participant(db: web::Data<MongoDB>, id: web::Path<String>) -> HttpResponse {
    log::info!("🔎 GET /participant/{}", id);

    match participant_service::get_participant(&db, &id).await {
        // a missing participant responds with JSON null, not 404
        Ok(participant) => HttpResponse::Ok().json(participant),
        Err(e) => {
            log::warn!("❌ Error fetching participant {}: {}", id, e);
            e.error_response()
        }
    }
}

// Deliberately unauthenticated: confirmation links are opened outside a
// session in the frontend this serves.
pub async fn confirm_participant(db: web::Data<MongoDB>, id: web::Path<String>) -> HttpResponse {
    log::info!("✔️ PATCH /participant/{} - confirming", id);

    match participant_service::confirm_participant(&db, &id).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error confirming participant {}: {}", id, e);
            e.error_response()
        }
    }
}

pub async fn delete_participant(db: web::Data<MongoDB>, id: web::Path<String>) -> HttpResponse {
    log::info!("🗑️ DELETE /participant/{}", id);

    match participant_service::delete_participant(&db, &id).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error deleting participant {}: {}", id, e);
            e.error_response()
        }
    }
}
