//! Axum route handlers for sign-in and account management.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password::{hash_password, validate_new_password, verify_password};
use crate::auth::{issue_token, repository, AuthedUser, Role};
use crate::errors::AppError;
use crate::models::user::UserRow;
use crate::state::AppState;

const BAD_CREDENTIALS: &str = "invalid email or password";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: UserRow,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub name: String,
    pub role: Role,
    pub password: String,
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Checks `password` against the stored account. Unknown email and wrong
/// password fail identically.
pub async fn authenticate(user: Option<UserRow>, password: &str) -> Result<(UserRow, Role), AppError> {
    let user = user.ok_or_else(|| AppError::Unauthorized(BAD_CREDENTIALS.into()))?;
    if !verify_password(password, &user.password_hash).await? {
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.into()));
    }
    let role = Role::parse(&user.role).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("user {} has unknown role '{}'", user.id, user.role))
    })?;
    Ok((user, role))
}

fn user_id(user: &AuthedUser) -> Result<Uuid, AppError> {
    Uuid::parse_str(&user.id)
        .map_err(|_| AppError::Unauthorized("token subject is not a user id".into()))
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = normalize_email(&req.email);
    let found = repository::find_by_email(&state.db, &email).await?;
    let (user, role) = authenticate(found, &req.password).await.map_err(|e| {
        if matches!(e, AppError::Unauthorized(_)) {
            warn!("Failed login attempt");
        }
        e
    })?;

    let ttl = state.config.jwt_ttl_secs;
    let token = issue_token(
        &user.id.to_string(),
        &user.email,
        role,
        &state.config.jwt_secret,
        ttl,
    )?;
    info!("User {} signed in", user.id);

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer",
        expires_in: ttl,
        user,
    }))
}

/// PUT /api/v1/auth/password
pub async fn handle_change_password(
    State(state): State<AppState>,
    user: AuthedUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<StatusCode, AppError> {
    let id = user_id(&user)?;
    let stored = repository::find_by_id(&state.db, id).await?;
    let (account, _) = authenticate(stored, &req.current_password).await?;

    validate_new_password(&req.new_password)?;
    let hash = hash_password(&req.new_password).await?;
    repository::update_password_hash(&state.db, account.id, &hash).await?;

    info!("User {} changed their password", account.id);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/users (admin)
pub async fn handle_create_user(
    State(state): State<AppState>,
    user: AuthedUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserRow>), AppError> {
    user.require_admin()?;

    let email = normalize_email(&req.email);
    if !crate::jobs::panelists::looks_like_email(&email) {
        return Err(AppError::Validation(format!("'{email}' is not a valid email")));
    }
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    validate_new_password(&req.password)?;

    let hash = hash_password(&req.password).await?;
    let row = repository::insert_user(&state.db, &email, name, req.role, &hash)
        .await?
        .ok_or_else(|| AppError::Conflict(format!("{email} is already registered")))?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/v1/auth/users/:id/password (admin)
pub async fn handle_reset_password(
    State(state): State<AppState>,
    user: AuthedUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<StatusCode, AppError> {
    user.require_admin()?;
    validate_new_password(&req.new_password)?;

    let hash = hash_password(&req.new_password).await?;
    if !repository::update_password_hash(&state.db, id, &hash).await? {
        return Err(AppError::NotFound(format!("User {id} not found")));
    }
    info!("Admin {} reset the password of user {id}", user.id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_for_tests;
    use chrono::Utc;

    async fn account(role: &str, password: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: "recruiter@company.com".into(),
            name: "Rita Recruiter".into(),
            role: role.into(),
            password_hash: hash_for_tests(password).await,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Recruiter@Company.COM "), "recruiter@company.com");
    }

    #[tokio::test]
    async fn test_authenticate_accepts_correct_password() {
        let stored = account("recruiter", "hunter2-hunter2").await;
        let (user, role) = authenticate(Some(stored.clone()), "hunter2-hunter2").await.unwrap();
        assert_eq!(user.id, stored.id);
        assert_eq!(role, Role::Recruiter);
    }

    #[tokio::test]
    async fn test_authenticate_rejects_wrong_password_and_unknown_user_alike() {
        let stored = account("recruiter", "hunter2-hunter2").await;
        let wrong = authenticate(Some(stored), "nope-nope").await.unwrap_err();
        let unknown = authenticate(None, "hunter2-hunter2").await.unwrap_err();
        match (wrong, unknown) {
            (AppError::Unauthorized(a), AppError::Unauthorized(b)) => assert_eq!(a, b),
            other => panic!("expected two Unauthorized errors, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_authenticate_flags_unknown_role() {
        let stored = account("superuser", "hunter2-hunter2").await;
        let err = authenticate(Some(stored), "hunter2-hunter2").await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_login_token_carries_account_identity() {
        let stored = account("interviewer", "hunter2-hunter2").await;
        let (user, role) = authenticate(Some(stored), "hunter2-hunter2").await.unwrap();
        let token = issue_token(&user.id.to_string(), &user.email, role, "secret", 3600).unwrap();
        let claims = crate::auth::verify_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.role, Role::Interviewer);
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let row = UserRow {
            id: Uuid::nil(),
            email: "a@b.co".into(),
            name: "A".into(),
            role: "admin".into(),
            password_hash: "$2b$04$secret".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@b.co");
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let user = AuthedUser {
            id: "legacy-id".into(),
            email: "x@y.co".into(),
            role: Role::Recruiter,
        };
        assert!(matches!(user_id(&user), Err(AppError::Unauthorized(_))));
    }
}
