use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::database::MongoDB;
use crate::services::{auth_service, user_service};
use crate::utils::error::AppError;

/// Rejects requests without a valid `Authorization: Bearer <token>` header.
/// On success the decoded claims are attached to the request extensions for
/// handlers (`web::ReqData<Claims>`) and downstream guards.
pub struct RequireAuth;

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware { service }))
    }
}

pub struct RequireAuthMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let auth_header = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        log::debug!(
            "verify token: authorization header present: {}",
            auth_header.is_some()
        );

        let token = match auth_header.as_deref().and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) => token.to_owned(),
            None => {
                return Box::pin(async move {
                    Err(AppError::Unauthorized("unauthorized access".to_string()).into())
                });
            }
        };

        match auth_service::verify_token(&token) {
            Ok(claims) => {
                log::debug!("decoded claims: {:?}", claims);
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res)
                })
            }
            Err(e) => {
                log::warn!("❌ Token verification failed: {}", e);
                Box::pin(async move {
                    Err(AppError::Unauthorized("unauthorized access".to_string()).into())
                })
            }
        }
    }
}

/// Role guard for admin-only routes. Composed after `RequireAuth`: reads the
/// email from the attached claims and looks the user up on every request, so
/// a promotion or deletion takes effect immediately.
pub struct RequireAdmin;

impl<S, B> Transform<S, ServiceRequest> for RequireAdmin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAdminMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAdminMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireAdminMiddleware<S> {
    // Rc lets the role lookup await before dispatching to the inner service
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireAdminMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let email = req
                .extensions()
                .get::<auth_service::Claims>()
                .map(|claims| claims.email.clone());

            let email = match email {
                Some(email) => email,
                // no claims attached: RequireAuth did not run on this route
                None => {
                    return Err(AppError::Unauthorized("unauthorized access".to_string()).into());
                }
            };

            let db = match req.app_data::<web::Data<MongoDB>>() {
                Some(db) => db.clone(),
                None => {
                    return Err(AppError::Internal("database handle missing".to_string()).into());
                }
            };

            if !user_service::is_admin(&db, &email).await? {
                log::warn!("⛔ Forbidden: {} is not an admin", email);
                return Err(AppError::Forbidden("forbidden access".to_string()).into());
            }

            service.call(req).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use serde_json::{Map, Value};

    async fn protected() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    fn bearer(email: &str) -> String {
        let mut user = Map::new();
        user.insert("email".to_string(), Value::String(email.to_string()));
        let token = auth_service::issue_token(user).unwrap();
        format!("Bearer {}", token)
    }

    #[actix_rt::test]
    async fn test_missing_header_is_unauthorized() {
        let app = test::init_service(
            App::new().route("/guarded", web::get().to(protected).wrap(RequireAuth)),
        )
        .await;

        let req = test::TestRequest::get().uri("/guarded").to_request();
        let status = match test::try_call_service(&app, req).await {
            Ok(res) => res.status(),
            Err(err) => err.as_response_error().error_response().status(),
        };
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_invalid_token_is_unauthorized() {
        let app = test::init_service(
            App::new().route("/guarded", web::get().to(protected).wrap(RequireAuth)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/guarded")
            .insert_header(("Authorization", "Bearer not-a-token"))
            .to_request();
        let status = match test::try_call_service(&app, req).await {
            Ok(res) => res.status(),
            Err(err) => err.as_response_error().error_response().status(),
        };
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_non_bearer_scheme_is_unauthorized() {
        let app = test::init_service(
            App::new().route("/guarded", web::get().to(protected).wrap(RequireAuth)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/guarded")
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_request();
        let status = match test::try_call_service(&app, req).await {
            Ok(res) => res.status(),
            Err(err) => err.as_response_error().error_response().status(),
        };
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_valid_token_passes_and_attaches_claims() {
        async fn echo_email(claims: web::ReqData<auth_service::Claims>) -> HttpResponse {
            HttpResponse::Ok().body(claims.email.clone())
        }

        let app = test::init_service(
            App::new().route("/guarded", web::get().to(echo_email).wrap(RequireAuth)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/guarded")
            .insert_header(("Authorization", bearer("bob@example.com")))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body = test::read_body(res).await;
        assert_eq!(body, "bob@example.com");
    }

    #[actix_rt::test]
    async fn test_admin_guard_without_claims_is_unauthorized() {
        // RequireAdmin alone (not composed after RequireAuth) finds no
        // claims and rejects before touching the database
        let app = test::init_service(
            App::new().route("/admin", web::get().to(protected).wrap(RequireAdmin)),
        )
        .await;

        let req = test::TestRequest::get().uri("/admin").to_request();
        let status = match test::try_call_service(&app, req).await {
            Ok(res) => res.status(),
            Err(err) => err.as_response_error().error_response().status(),
        };
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
