use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CampAid API",
        version = "1.0.0",
        description = "Backend API for the CampAid camp-registration app. \n\n**Authentication:** Bearer JWT from `POST /jwt`; admin routes additionally require the `admin` role.",
        contact(
            name = "CampAid Team"
        )
    ),
    paths(
        // Auth
        crate::api::auth::issue_jwt,

        // Health
        crate::api::health::health_check,

        // Users
        crate::api::users::create_user,
        crate::api::users::check_admin,

        // Camps
        crate::api::camps::get_camp,
        crate::api::camps::join_camp,

        // Payments
        crate::api::payments::create_payment_intent,
        crate::api::payments::record_payment,
    ),
    components(
        schemas(
            crate::services::auth_service::TokenResponse,
            crate::services::user_service::AdminFlagResponse,
            crate::services::camp_service::UpdateCampRequest,
            crate::services::stripe_service::CreatePaymentIntentRequest,
            crate::services::stripe_service::PaymentIntentResponse,
            crate::models::response::InsertResponse,
            crate::models::response::UpdateResponse,
            crate::models::response::DeleteResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Session token issuance. Tokens carry the user's email and expire after one hour."),
        (name = "Health", description = "Liveness and service status endpoints."),
        (name = "Users", description = "User registration, admin flags and admin-only user management."),
        (name = "Camps", description = "Camp catalog: browse, join, and admin-only management."),
        (name = "Payments", description = "Stripe payment intents and the recorded payment log."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            );
        }
    }
}
