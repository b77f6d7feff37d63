use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lodgera_core::{models::UserRole, AppError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims: the user id and its role, signed with HS256.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

pub fn issue_token(
    user_id: Uuid,
    role: UserRole,
    secret: &str,
    expiry_hours: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        role,
        exp: (now + Duration::hours(expiry_hours)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}

/// Decode and verify a token. Expired or tampered tokens all surface as
/// the same `Unauthorized` so the response does not leak which check
/// failed.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn round_trip_preserves_claims() {
        let user_id = Uuid::new_v4();
        let token = issue_token(user_id, UserRole::Admin, SECRET, 1).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, UserRole::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = issue_token(Uuid::new_v4(), UserRole::Client, SECRET, 1).unwrap();
        assert!(verify_token(&token, "another-secret-another-secret!!!").is_err());
    }

    #[test]
    fn rejects_expired_token() {
        // Negative expiry puts exp well past the default leeway.
        let token = issue_token(Uuid::new_v4(), UserRole::Client, SECRET, -2).unwrap();
        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(verify_token("not-a-token", SECRET).is_err());
    }
}
