use actix_web::{web, HttpResponse, ResponseError};

use crate::{
    database::MongoDB,
    models::Camp,
    services::camp_service,
    services::camp_service::UpdateCampRequest,
};

pub async fn create_camp(db: web::Data<MongoDB>, camp: web::Json<Camp>) -> HttpResponse {
    log::info!("📝 POST /camps - name: {}", camp.name);

    match camp_service::create_camp(&db, camp.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error creating camp: {}", e);
            e.error_response()
        }
    }
}

pub async fn list_camps(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("📋 GET /camps");

    match camp_service::list_camps(&db).await {
        Ok(camps) => HttpResponse::Ok().json(camps),
        Err(e) => {
            log::error!("❌ Error fetching camps: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/camps/{id}",
    tag = "Camps",
    responses(
        (status = 200, description = "Camp document"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Camp not found")
    )
)]
pub async fn get_camp(db: web::Data<MongoDB>, id: web::Path<String>) -> HttpResponse {
    log::info!("🔎 GET /camps/{}", id);

    match camp_service::get_camp(&db, &id).await {
        Ok(camp) => HttpResponse::Ok().json(camp),
        Err(e) => {
            log::warn!("❌ Error fetching camp {}: {}", id, e);
            e.error_response()
        }
    }
}

pub async fn update_camp(
    db: web::Data<MongoDB>,
    id: web::Path<String>,
    request: web::Json<UpdateCampRequest>,
) -> HttpResponse {
    log::info!("🔧 PATCH /camps/{}", id);

    match camp_service::update_camp(&db, &id, request.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error updating camp {}: {}", id, e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/camps/{id}",
    tag = "Camps",
    responses(
        (status = 200, description = "Guest count incremented by one", body = crate::models::UpdateResponse),
        (status = 404, description = "Camp not found")
    )
)]
pub async fn join_camp(db: web::Data<MongoDB>, id: web::Path<String>) -> HttpResponse {
    log::info!("➕ PUT /camps/{} - registering guest", id);

    match camp_service::join_camp(&db, &id).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::warn!("❌ Error joining camp {}: {}", id, e);
            e.error_response()
        }
    }
}

pub async fn delete_camp(db: web::Data<MongoDB>, id: web::Path<String>) -> HttpResponse {
    log::info!("🗑️ DELETE /camps/{}", id);

    match camp_service::delete_camp(&db, &id).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error deleting camp {}: {}", id, e);
            e.error_response()
        }
    }
}
