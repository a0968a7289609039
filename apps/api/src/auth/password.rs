//! bcrypt password hashing. Hashing is CPU-bound and runs on the blocking pool.

use crate::errors::AppError;

/// Work factor for stored hashes.
pub const HASH_COST: u32 = 10;
pub const MIN_PASSWORD_LEN: usize = 8;

pub fn validate_new_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password.trim().is_empty() {
        return Err(AppError::Validation("password cannot be blank".into()));
    }
    Ok(())
}

pub async fn hash_password(password: &str) -> Result<String, AppError> {
    hash_with_cost(password, HASH_COST).await
}

async fn hash_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("hashing task failed: {e}")))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {e}")))
}

/// False for a wrong password. An unreadable stored hash is an internal error.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let (password, hash) = (password.to_string(), hash.to_string());
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("hashing task failed: {e}")))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("stored password hash unreadable: {e}")))
}

#[cfg(test)]
pub(crate) async fn hash_for_tests(password: &str) -> String {
    // bcrypt's minimum cost keeps the suite fast
    hash_with_cost(password, 4).await.unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_for_tests("correct horse").await;
        assert!(hash.starts_with("$2"));
        assert!(verify_password("correct horse", &hash).await.unwrap());
        assert!(!verify_password("wrong horse", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_password_hashes_differently() {
        let a = hash_for_tests("s3cret-pass").await;
        let b = hash_for_tests("s3cret-pass").await;
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_garbage_hash_is_internal_error() {
        let err = verify_password("anything", "not-a-bcrypt-hash").await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_new_password("short").is_err());
        assert!(validate_new_password("        ").is_err());
        assert!(validate_new_password("long enough").is_ok());
    }
}
