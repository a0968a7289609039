use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::auth::Role;
use crate::models::user::UserRow;

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>> {
    Ok(sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?)
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRow>> {
    Ok(sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?)
}

/// Returns `None` when the email is already registered.
pub async fn insert_user(
    pool: &PgPool,
    email: &str,
    name: &str,
    role: Role,
    password_hash: &str,
) -> Result<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (id, email, name, role, password_hash)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(name)
    .bind(role.as_str())
    .bind(password_hash)
    .fetch_optional(pool)
    .await?;

    if let Some(user) = &row {
        info!("Registered {} user {}", user.role, user.id);
    }
    Ok(row)
}

pub async fn update_password_hash(pool: &PgPool, id: Uuid, password_hash: &str) -> Result<bool> {
    let result = sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1")
        .bind(id)
        .bind(password_hash)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Creates the bootstrap admin on first start. An existing account with that
/// email is left untouched.
pub async fn seed_admin(pool: &PgPool, email: &str, password: &str) -> Result<()> {
    if find_by_email(pool, email).await?.is_some() {
        return Ok(());
    }
    let hash = hash_password(password).await?;
    if insert_user(pool, email, "Administrator", Role::Admin, &hash)
        .await?
        .is_some()
    {
        info!("Seeded admin account {email}");
    }
    Ok(())
}
