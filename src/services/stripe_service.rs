use serde::{Deserialize, Serialize};

use crate::utils::error::AppError;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreatePaymentIntentRequest {
    pub price: f64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PaymentIntentResponse {
    /// Client-side secret the frontend uses to complete the charge. The
    /// intent itself lives on Stripe; nothing is persisted here.
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    client_secret: String,
}

/// Price in major units to an integer amount in cents, truncated.
pub fn amount_in_cents(price: f64) -> i64 {
    (price * 100.0) as i64
}

fn get_stripe_secret_key() -> Result<String, AppError> {
    std::env::var("STRIPE_SECRET_KEY")
        .map_err(|_| AppError::PaymentError("STRIPE_SECRET_KEY not set".to_string()))
}

/// Creates a hosted payment intent (card, usd) and returns only the client
/// secret needed to complete the payment.
pub async fn create_payment_intent(price: f64) -> Result<PaymentIntentResponse, AppError> {
    let secret_key = get_stripe_secret_key()?;
    let amount = amount_in_cents(price);

    log::info!("💳 Creating payment intent: {} cents (usd)", amount);

    let params = [
        ("amount", amount.to_string()),
        ("currency", "usd".to_string()),
        ("payment_method_types[]", "card".to_string()),
    ];

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/payment_intents", STRIPE_API_BASE))
        .bearer_auth(&secret_key)
        .form(&params)
        .send()
        .await
        .map_err(|e| AppError::PaymentError(format!("Failed to reach Stripe: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::PaymentError(format!(
            "Stripe API error: {}",
            response.status()
        )));
    }

    let intent: StripePaymentIntent = response
        .json()
        .await
        .map_err(|e| AppError::PaymentError(format!("Failed to parse Stripe response: {}", e)))?;

    log::info!("✅ Payment intent created");

    Ok(PaymentIntentResponse {
        client_secret: intent.client_secret,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_is_price_times_100() {
        assert_eq!(amount_in_cents(25.0), 2500);
    }

    #[test]
    fn test_amount_truncates_fractional_cents() {
        // 19.99 * 100 lands just below 1999 in f64 and truncates down
        assert_eq!(amount_in_cents(19.99), 1998);
        assert_eq!(amount_in_cents(0.1), 10);
    }

    #[test]
    fn test_zero_price() {
        assert_eq!(amount_in_cents(0.0), 0);
    }

    #[test]
    fn test_client_secret_wire_name() {
        let response = PaymentIntentResponse {
            client_secret: "pi_123_secret_456".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["clientSecret"], "pi_123_secret_456");
    }
}
