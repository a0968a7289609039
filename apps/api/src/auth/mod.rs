//! Authentication: password login, HS256 bearer tokens and the `AuthedUser`
//! extractor every protected handler takes.

pub mod handlers;
pub mod password;
pub mod repository;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Recruiter,
    Interviewer,
    Candidate,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Recruiter => "recruiter",
            Role::Interviewer => "interviewer",
            Role::Candidate => "candidate",
            Role::Admin => "admin",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "recruiter" => Some(Role::Recruiter),
            "interviewer" => Some(Role::Interviewer),
            "candidate" => Some(Role::Candidate),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub exp: usize,
}

/// The verified caller, available to any handler that takes it as an argument.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl AuthedUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fails with 403 unless the caller holds one of `roles` (admins always pass).
    pub fn require_any(&self, roles: &[Role]) -> Result<(), AppError> {
        if self.is_admin() || roles.contains(&self.role) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }

    pub fn require_recruiter(&self) -> Result<(), AppError> {
        self.require_any(&[Role::Recruiter])
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        self.require_any(&[])
    }

    /// Fails with 403 unless the caller owns the resource or is an admin.
    pub fn require_owner(&self, owner_id: &str) -> Result<(), AppError> {
        if self.is_admin() || self.id == owner_id {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

/// Signs a token for `sub` that expires `ttl_secs` from now.
pub fn issue_token(
    sub: &str,
    email: &str,
    role: Role,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, AppError> {
    let exp = (Utc::now().timestamp() + ttl_secs).max(0) as usize;
    let claims = Claims {
        sub: sub.to_string(),
        email: email.to_string(),
        role,
        exp,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to sign token: {e}")))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        warn!(error = %e, "JWT validation failed");
        AppError::Unauthorized("invalid or expired token".into())
    })
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("missing Authorization header".into()))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("expected 'Bearer <token>'".into()))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = verify_token(token, &state.config.jwt_secret)?;
        Ok(AuthedUser {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}
