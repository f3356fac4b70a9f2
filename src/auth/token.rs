//! JWT claims and the signing/verification wrapper.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::Role;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Holds the derived signing keys; cheap to clone into the app state.
///
/// Tokens are stateless: expiry is checked at the claim level only, there is
/// no server-side revocation list.
#[derive(Clone)]
pub struct TokenManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_minutes: i64,
}

impl TokenManager {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_minutes,
        }
    }

    pub fn issue(&self, user_id: Uuid, role: Role) -> ApiResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            role,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::minutes(self.ttl_minutes)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| ApiError::Internal(err.into()))
    }

    pub fn verify(&self, token: &str) -> ApiResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => ApiError::TokenExpired,
                _ => ApiError::InvalidToken,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_round_trip() {
        let manager = TokenManager::new("segredo-de-teste", 30);
        let user_id = Uuid::now_v7();
        let token = manager.issue(user_id, Role::Admin).unwrap();
        let claims = manager.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_is_distinguished() {
        let manager = TokenManager::new("segredo-de-teste", -5);
        let token = manager.issue(Uuid::now_v7(), Role::Usuario).unwrap();
        assert!(matches!(manager.verify(&token), Err(ApiError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let manager = TokenManager::new("segredo-a", 30);
        let token = manager.issue(Uuid::now_v7(), Role::Usuario).unwrap();
        let other = TokenManager::new("segredo-b", 30);
        assert!(matches!(other.verify(&token), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        let manager = TokenManager::new("segredo-de-teste", 30);
        assert!(matches!(manager.verify("nao-e-um-jwt"), Err(ApiError::InvalidToken)));
    }
}
