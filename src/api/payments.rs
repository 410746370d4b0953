use actix_web::{web, HttpResponse, ResponseError};

use crate::{
    database::MongoDB,
    models::Payment,
    services::auth_service::Claims,
    services::payment_service,
    services::stripe_service,
    services::stripe_service::CreatePaymentIntentRequest,
    utils::error::AppError,
};

#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    request_body = CreatePaymentIntentRequest,
    responses(
        (status = 200, description = "Client secret for completing the payment", body = stripe_service::PaymentIntentResponse),
        (status = 500, description = "Payment processor unreachable")
    )
)]
pub async fn create_payment_intent(
    request: web::Json<CreatePaymentIntentRequest>,
) -> HttpResponse {
    log::info!("💳 POST /create-payment-intent - price: {}", request.price);

    match stripe_service::create_payment_intent(request.price).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Error creating payment intent: {}", e);
            e.error_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/payments",
    tag = "Payments",
    responses(
        (status = 200, description = "Participant update result; matched_count 0 when no registration matched", body = crate::models::UpdateResponse)
    )
)]
pub async fn record_payment(db: web::Data<MongoDB>, payment: web::Json<Payment>) -> HttpResponse {
    log::info!(
        "💾 POST /payments - email: {}, camp: {}",
        payment.email,
        payment.camp_id
    );

    match payment_service::record_payment(&db, payment.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error recording payment: {}", e);
            e.error_response()
        }
    }
}

pub async fn list_payments(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("📋 GET /payments");

    match payment_service::list_payments(&db).await {
        Ok(payments) => HttpResponse::Ok().json(payments),
        Err(e) => {
            log::error!("❌ Error fetching payments: {}", e);
            e.error_response()
        }
    }
}

pub async fn payments_by_email(
    db: web::Data<MongoDB>,
    claims: web::ReqData<Claims>,
    email: web::Path<String>,
) -> HttpResponse {
    let email = email.into_inner();
    log::info!("📋 GET /payments/{}", email);

    // callers may only read their own payment history
    if email != claims.email {
        return AppError::Forbidden("forbidden access".to_string()).error_response();
    }

    match payment_service::payments_by_email(&db, &email).await {
        Ok(payments) => HttpResponse::Ok().json(payments),
        Err(e) => {
            log::error!("❌ Error fetching payments for {}: {}", email, e);
            e.error_response()
        }
    }
}
