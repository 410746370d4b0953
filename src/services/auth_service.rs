use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::utils::error::AppError;

/// Session tokens live for one hour; there is no refresh flow, expired
/// tokens go back through POST /jwt.
const TOKEN_TTL_HOURS: i64 = 1;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub email: String,
    pub iat: usize, // issued at
    pub exp: usize, // expiration
    pub jti: String, // JWT ID
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

fn get_jwt_secret() -> String {
    std::env::var("ACCESS_TOKEN_SECRET")
        .unwrap_or_else(|_| "default-secret-change-me".to_string())
}

/// Signs whatever identity object the client sent, carrying unmodeled fields
/// through as flattened claims. Only `email` is required.
pub fn issue_token(user: Map<String, Value>) -> Result<String, AppError> {
    let email = user
        .get("email")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::InvalidRequest("email is required".to_string()))?
        .to_string();

    let mut extra = user;
    // reserved claim names are stamped by the service, never client-supplied
    for reserved in ["email", "iat", "exp", "jti"] {
        extra.remove(reserved);
    }

    let now = Utc::now();
    let iat = now.timestamp() as usize;
    let exp = (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;

    let claims = Claims {
        email,
        iat,
        exp,
        jti: Uuid::new_v4().to_string(),
        extra,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(get_jwt_secret().as_ref()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

// Verify JWT token (signature and expiry)
pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(get_jwt_secret().as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_object(email: &str) -> Map<String, Value> {
        let mut user = Map::new();
        user.insert("email".to_string(), Value::String(email.to_string()));
        user.insert("name".to_string(), Value::String("Bob".to_string()));
        user
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let token = issue_token(claims_object("bob@example.com")).unwrap();
        let claims = verify_token(&token).unwrap();

        assert_eq!(claims.email, "bob@example.com");
        assert_eq!(claims.extra.get("name").and_then(Value::as_str), Some("Bob"));
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_issue_requires_email() {
        let mut user = Map::new();
        user.insert("name".to_string(), Value::String("Bob".to_string()));

        let err = issue_token(user).unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let token = issue_token(claims_object("bob@example.com")).unwrap();
        let mut tampered = token.clone();
        tampered.push('x');

        assert!(verify_token(&tampered).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = Claims {
            email: "bob@example.com".to_string(),
            iat: (Utc::now() - Duration::hours(2)).timestamp() as usize,
            exp: (Utc::now() - Duration::hours(1)).timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            extra: Map::new(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(get_jwt_secret().as_ref()),
        )
        .unwrap();

        let err = verify_token(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(verify_token("not-a-jwt").is_err());
    }
}
