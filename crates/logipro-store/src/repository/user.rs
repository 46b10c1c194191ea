//! # User Repository
//!
//! Broker accounts. Passwords are stored as Argon2 PHC strings.
//!
//! ## Account Lifecycle
//! ```text
//!   create()                 approve()
//!  ─────────► [pending] ──────────────────► [approved] ──► sign-in allowed
//!                │
//!                └── verify_credentials() still succeeds; the caller
//!                    decides whether an unapproved user may continue
//! ```
//!
//! Hashing and verification run on tokio's blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};

// =============================================================================
// Types
// =============================================================================

/// An account as seen by the rest of the app. The hash never leaves this
/// module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub approved: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    password_hash: String,
    approved: bool,
    is_admin: bool,
    created_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
}

impl UserRow {
    fn into_user(self) -> (User, String) {
        let user = User {
            id: self.id,
            email: self.email,
            approved: self.approved,
            is_admin: self.is_admin,
            created_at: self.created_at,
            approved_at: self.approved_at,
        };
        (user, self.password_hash)
    }
}

const SELECT_USER: &str = r#"
    SELECT id, email, password_hash, approved, is_admin, created_at, approved_at
    FROM users
"#;

/// Lowercases and trims an e-mail so lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Hashes a password with a fresh random salt.
pub async fn hash_password(password: &str) -> DbResult<String> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DbError::PasswordHash(e.to_string()))
    })
    .await
    .map_err(|e| DbError::Internal(format!("hashing task failed: {}", e)))?
}

/// Checks a password against a stored hash. A malformed hash never matches.
pub async fn verify_password(password: &str, hash: &str) -> bool {
    let password = password.to_string();
    let hash = hash.to_string();

    tokio::task::spawn_blocking(move || {
        let parsed = match PasswordHash::new(&hash) {
            Ok(h) => h,
            Err(_) => return false,
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
    .await
    .unwrap_or(false)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for account operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Creates an account. New accounts start unapproved.
    ///
    /// Password rules are the caller's concern; this only hashes.
    ///
    /// ## Errors
    /// - [`DbError::UniqueViolation`] if the e-mail is taken
    pub async fn create(&self, email: &str, password: &str, is_admin: bool) -> DbResult<User> {
        let email = normalize_email(email);
        let hash = hash_password(password).await?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            email,
            approved: false,
            is_admin,
            created_at: Utc::now(),
            approved_at: None,
        };

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, approved, is_admin, created_at, approved_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&hash)
        .bind(user.approved)
        .bind(user.is_admin)
        .bind(user.created_at)
        .bind(user.approved_at)
        .execute(&self.pool)
        .await;

        match result.map_err(DbError::from) {
            Ok(_) => {}
            Err(DbError::UniqueViolation { .. }) => {
                return Err(DbError::duplicate("email", user.email));
            }
            Err(e) => return Err(e),
        }

        info!(user_id = %user.id, is_admin, "Account created");
        Ok(user)
    }

    async fn fetch_row(&self, clause: &str, value: &str) -> DbResult<Option<UserRow>> {
        let sql = format!("{} WHERE {} = ?1", SELECT_USER, clause);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn get(&self, id: &str) -> DbResult<Option<User>> {
        Ok(self
            .fetch_row("id", id)
            .await?
            .map(|row| row.into_user().0))
    }

    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        Ok(self
            .fetch_row("email", &normalize_email(email))
            .await?
            .map(|row| row.into_user().0))
    }

    /// Returns the account if the e-mail exists and the password matches.
    ///
    /// Approval is not checked here.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> DbResult<Option<User>> {
        let Some(row) = self.fetch_row("email", &normalize_email(email)).await? else {
            debug!("Unknown e-mail");
            return Ok(None);
        };

        let (user, hash) = row.into_user();
        if verify_password(password, &hash).await {
            Ok(Some(user))
        } else {
            debug!(user_id = %user.id, "Password mismatch");
            Ok(None)
        }
    }

    /// Marks an account approved.
    pub async fn approve(&self, id: &str) -> DbResult<User> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE users SET approved = 1, approved_at = COALESCE(approved_at, ?1) WHERE id = ?2",
        )
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        info!(user_id = %id, "Account approved");
        self.get(id)
            .await?
            .ok_or_else(|| DbError::not_found("User", id))
    }

    /// Replaces an account's password hash.
    pub async fn set_password(&self, id: &str, password: &str) -> DbResult<()> {
        let hash = hash_password(password).await?;

        let result = sqlx::query("UPDATE users SET password_hash = ?1 WHERE id = ?2")
            .bind(&hash)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        info!(user_id = %id, "Password changed");
        Ok(())
    }

    /// Accounts waiting for approval, oldest first.
    pub async fn list_pending(&self) -> DbResult<Vec<User>> {
        let sql = format!("{} WHERE approved = 0 ORDER BY created_at", SELECT_USER);
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|row| row.into_user().0).collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn users() -> UserRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().users()
    }

    #[tokio::test]
    async fn test_hash_roundtrip() {
        let hash = hash_password("gizli-sifre").await.unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("gizli-sifre", &hash).await);
        assert!(!verify_password("yanlis-sifre", &hash).await);
        assert!(!verify_password("gizli-sifre", "not-a-hash").await);
    }

    #[tokio::test]
    async fn test_create_and_verify() {
        let repo = users().await;

        let user = repo.create(" Ali@Example.com ", "gizli-sifre", false).await.unwrap();
        assert_eq!(user.email, "ali@example.com");
        assert!(!user.approved);

        let found = repo.verify_credentials("ALI@example.com", "gizli-sifre").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id.clone()));

        assert_eq!(repo.verify_credentials("ali@example.com", "yanlis").await.unwrap(), None);
        assert_eq!(repo.verify_credentials("yok@example.com", "gizli-sifre").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let repo = users().await;
        repo.create("ali@example.com", "gizli-sifre", false).await.unwrap();

        let err = repo.create("ALI@example.com", "baska-sifre", false).await.unwrap_err();
        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "email");
                assert_eq!(value, "ali@example.com");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_approve_and_pending() {
        let repo = users().await;
        let a = repo.create("a@example.com", "gizli-sifre", false).await.unwrap();
        let b = repo.create("b@example.com", "gizli-sifre", false).await.unwrap();

        assert_eq!(repo.list_pending().await.unwrap().len(), 2);

        let approved = repo.approve(&a.id).await.unwrap();
        assert!(approved.approved);
        assert!(approved.approved_at.is_some());

        let pending = repo.list_pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, b.id);

        assert!(matches!(repo.approve("missing").await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_set_password() {
        let repo = users().await;
        let user = repo.create("a@example.com", "eski-sifre", false).await.unwrap();

        repo.set_password(&user.id, "Yeni-sifre1").await.unwrap();

        assert!(repo.verify_credentials("a@example.com", "eski-sifre").await.unwrap().is_none());
        assert!(repo.verify_credentials("a@example.com", "Yeni-sifre1").await.unwrap().is_some());
    }
}
