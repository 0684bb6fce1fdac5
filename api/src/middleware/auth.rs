//! Bearer token authentication

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use quickdesk_support::application::dto::Actor;
use quickdesk_support::{EntityId, Role, User};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::middleware::permissions::{has_permission, Permission};
use crate::ApiState;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: EntityId,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub exp: usize,
}

pub fn create_token(user: &User, secret: &str, ttl_hours: i64) -> Result<String, ApiError> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(ttl_hours))
        .ok_or_else(|| ApiError::Internal("token expiry out of range".into()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        username: user.username.clone(),
        role: user.role,
        exp: expiration,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| ApiError::Internal(format!("failed to sign token: {e}")))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// The authenticated caller. Missing token is 401, a bad one 403.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn id(&self) -> EntityId {
        self.0.sub
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn actor(&self) -> Actor {
        Actor { id: self.0.sub, name: self.0.username.clone(), role: self.0.role }
    }

    pub fn require(&self, permission: Permission) -> Result<(), ApiError> {
        if has_permission(&Permission::for_role(self.0.role), permission) {
            Ok(())
        } else {
            Err(ApiError::Forbidden("Admin access required".into()))
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<ApiState>) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .filter(|token| !token.is_empty())
            .ok_or(ApiError::MissingToken)?;

        let claims = verify_token(token, &state.config.jwt_secret).map_err(|e| {
            tracing::debug!(error = %e, "rejected bearer token");
            ApiError::InvalidToken
        })?;
        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let user = User::new("ana", "ana@example.com", "h", Role::Agent, vec![]);
        let token = create_token(&user, "secret", 24).unwrap();

        let claims = verify_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, Role::Agent);
        assert_eq!(claims.username, "ana");

        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let user = User::new("ana", "ana@example.com", "h", Role::User, vec![]);
        let token = create_token(&user, "secret", -2).unwrap();
        assert!(verify_token(&token, "secret").is_err());
    }
}
