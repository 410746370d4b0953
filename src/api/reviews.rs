use actix_web::{web, HttpResponse, ResponseError};

use crate::{database::MongoDB, models::Review, services::review_service};

pub async fn create_review(db: web::Data<MongoDB>, review: web::Json<Review>) -> HttpResponse {
    log::info!("📝 POST /reviews");

    match review_service::create_review(&db, review.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error creating review: {}", e);
            e.error_response()
        }
    }
}

pub async fn list_reviews(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("📋 GET /reviews");

    match review_service::list_reviews(&db).await {
        Ok(reviews) => HttpResponse::Ok().json(reviews),
        Err(e) => {
            log::error!("❌ Error fetching reviews: {}", e);
            e.error_response()
        }
    }
}
