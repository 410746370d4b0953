use actix_web::{web, HttpResponse, ResponseError};
use serde_json::{Map, Value};

use crate::services::auth_service;
use crate::services::auth_service::TokenResponse;

#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    responses(
        (status = 200, description = "Signed session token", body = TokenResponse),
        (status = 400, description = "Missing email in claims")
    )
)]
pub async fn issue_jwt(user: web::Json<Map<String, Value>>) -> HttpResponse {
    log::info!("🔐 POST /jwt");

    match auth_service::issue_token(user.into_inner()) {
        Ok(token) => HttpResponse::Ok().json(TokenResponse { token }),
        Err(e) => {
            log::warn!("❌ Token issue failed: {}", e);
            e.error_response()
        }
    }
}
