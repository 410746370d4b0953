mod api;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::{RequireAdmin, RequireAuth};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let mongodb_uri = env::var("MONGODB_URI").expect("MONGODB_URI must be set");

    log::info!("🚀 Starting CampAid service...");

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");

    let allowed_origins = env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| {
        "http://localhost:5173,http://localhost:5174,https://camp-aid.web.app,https://camp-aid.firebaseapp.com".to_string()
    });

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);
        for origin in allowed_origins.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            cors = cors.allowed_origin(origin);
        }

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi),
            )
            // Liveness & health
            .route("/", web::get().to(api::health::liveness))
            .route("/health", web::get().to(api::health::health_check))
            // Session tokens
            .route("/jwt", web::post().to(api::auth::issue_jwt))
            // Users
            .service(
                web::resource("/users")
                    .route(web::post().to(api::users::create_user))
                    .route(
                        web::get()
                            .wrap(RequireAdmin)
                            .wrap(RequireAuth)
                            .to(api::users::list_users),
                    ),
            )
            // GET takes an email (self-only check), PATCH takes a document id
            .service(
                web::resource("/users/admin/{email}")
                    .route(web::get().wrap(RequireAuth).to(api::users::check_admin))
                    .route(
                        web::patch()
                            .wrap(RequireAdmin)
                            .wrap(RequireAuth)
                            .to(api::users::promote_admin),
                    ),
            )
            .service(
                web::resource("/users/{id}").route(
                    web::delete()
                        .wrap(RequireAdmin)
                        .wrap(RequireAuth)
                        .to(api::users::delete_user),
                ),
            )
            // Camps
            .service(
                web::resource("/camps")
                    .route(
                        web::post()
                            .wrap(RequireAdmin)
                            .wrap(RequireAuth)
                            .to(api::camps::create_camp),
                    )
                    .route(web::get().to(api::camps::list_camps)),
            )
            .service(
                web::resource("/camps/{id}")
                    .route(web::get().to(api::camps::get_camp))
                    .route(web::patch().to(api::camps::update_camp))
                    .route(web::put().to(api::camps::join_camp))
                    .route(
                        web::delete()
                            .wrap(RequireAdmin)
                            .wrap(RequireAuth)
                            .to(api::camps::delete_camp),
                    ),
            )
            // Participants
            .service(
                web::resource("/participant")
                    .route(
                        web::post()
                            .wrap(RequireAuth)
                            .to(api::participants::register_participant),
                    )
                    .route(web::get().to(api::participants::list_participants)),
            )
            .service(
                web::resource("/participant/{id}")
                    .route(web::get().to(api::participants::get_participant))
                    .route(web::patch().to(api::participants::confirm_participant))
                    .route(web::delete().to(api::participants::delete_participant)),
            )
            // Payments
            .route(
                "/create-payment-intent",
                web::post().to(api::payments::create_payment_intent),
            )
            .service(
                web::resource("/payments")
                    .route(web::post().to(api::payments::record_payment))
                    .route(web::get().to(api::payments::list_payments)),
            )
            .service(
                web::resource("/payments/{email}").route(
                    web::get()
                        .wrap(RequireAuth)
                        .to(api::payments::payments_by_email),
                ),
            )
            // Reviews
            .service(
                web::resource("/reviews")
                    .route(web::post().to(api::reviews::create_review))
                    .route(web::get().to(api::reviews::list_reviews)),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
