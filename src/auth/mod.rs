pub mod password;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::config_loader;
use crate::config::config_model::AuthSecret;
use crate::domain::value_objects::enums::roles::Role;
use crate::infrastructure::axum_http::error_responses::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: String,
    pub exp: usize,
}

/// Authenticated identity extracted from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthUser {
    /// Explicit capability check; routes gate on the tagged role rather
    /// than inspecting claim strings ad hoc.
    pub fn require(&self, role: Role) -> Result<(), AppError> {
        if self.role == role {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

pub fn issue_token(user_id: Uuid, role: Role, auth_secret: &AuthSecret) -> anyhow::Result<String> {
    let exp = (Utc::now() + Duration::seconds(auth_secret.token_ttl_secs)).timestamp() as usize;
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth_secret.jwt_secret.as_bytes()),
    )?;

    Ok(token)
}

pub fn verify_token(token: &str, jwt_secret: &str) -> anyhow::Result<Claims> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let validation = Validation::new(jsonwebtoken::Algorithm::HS256);

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| anyhow::anyhow!("JWT validation failed: {}", e))?;

    Ok(token_data.claims)
}

/// Decodes a bearer token into an [`AuthUser`], loading the signing secret
/// from the environment.
pub fn authenticate(token: &str) -> anyhow::Result<AuthUser> {
    let auth_secret = config_loader::get_auth_secret()?;
    let claims = verify_token(token, &auth_secret.jwt_secret)?;
    let role = Role::try_from(claims.role.as_str())?;

    Ok(AuthUser {
        user_id: claims.sub,
        role,
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Missing Authorization header".to_string(),
            ))?;

        let auth_str = auth_header.to_str().map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header".to_string(),
            )
        })?;

        if !auth_str.starts_with("Bearer ") {
            return Err((
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format".to_string(),
            ));
        }

        let token = &auth_str[7..];

        authenticate(token).map_err(|e| (StatusCode::UNAUTHORIZED, e.to_string()))
    }
}
