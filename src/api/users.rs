use actix_web::{web, HttpResponse, ResponseError};

use crate::{
    database::MongoDB,
    models::User,
    services::auth_service::Claims,
    services::user_service,
    services::user_service::AdminFlagResponse,
    utils::error::AppError,
};

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Inserted, or 'user already exists' with no id", body = crate::models::InsertResponse)
    )
)]
pub async fn create_user(db: web::Data<MongoDB>, user: web::Json<User>) -> HttpResponse {
    log::info!("📝 POST /users - email: {}", user.email);

    match user_service::create_user(&db, user.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error creating user: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/users/admin/{email}",
    tag = "Users",
    responses(
        (status = 200, description = "Admin flag for the caller's own email", body = AdminFlagResponse),
        (status = 403, description = "Asked about someone else's email")
    ),
    security(("bearer_auth" = []))
)]
pub async fn check_admin(
    db: web::Data<MongoDB>,
    claims: web::ReqData<Claims>,
    email: web::Path<String>,
) -> HttpResponse {
    let email = email.into_inner();
    log::info!("🔎 GET /users/admin/{}", email);

    // callers may only ask about themselves
    if email != claims.email {
        return AppError::Forbidden("forbidden access".to_string()).error_response();
    }

    match user_service::is_admin(&db, &email).await {
        Ok(admin) => HttpResponse::Ok().json(AdminFlagResponse { admin }),
        Err(e) => {
            log::error!("❌ Error checking admin flag: {}", e);
            e.error_response()
        }
    }
}

pub async fn list_users(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("📋 GET /users");

    match user_service::list_users(&db).await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => {
            log::error!("❌ Error fetching users: {}", e);
            e.error_response()
        }
    }
}

pub async fn promote_admin(db: web::Data<MongoDB>, id: web::Path<String>) -> HttpResponse {
    log::info!("🛡️ PATCH /users/admin/{}", id);

    match user_service::promote_to_admin(&db, &id).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error promoting user: {}", e);
            e.error_response()
        }
    }
}

pub async fn delete_user(db: web::Data<MongoDB>, id: web::Path<String>) -> HttpResponse {
    log::info!("🗑️ DELETE /users/{}", id);

    match user_service::delete_user(&db, &id).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error deleting user: {}", e);
            e.error_response()
        }
    }
}
