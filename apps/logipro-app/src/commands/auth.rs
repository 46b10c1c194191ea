//! # Account Commands
//!
//! Brokers sign up themselves but can only sign in once an admin approves
//! the account.
//!
//! ```text
//!  sign_up ──► pending ──approve_user (admin e-mail + password)──► approved
//!                                                                      │
//!  sign_in ◄───────────────────────────────────────────────────────────┘
//!     │
//!     └─► SessionState now scopes every entity command to this user
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use logipro_core::validation::{validate_email, validate_password, validate_password_basic};
use logipro_store::{DbError, User};

use crate::error::{ApiError, ErrorCode};
use crate::state::{DbState, SessionState};

const BAD_CREDENTIALS: &str = "E-posta veya şifre hatalı";
const NOT_APPROVED: &str = "Hesabınız henüz onaylanmadı";
const ADMIN_ONLY: &str = "Bu işlem için yönetici yetkisi gerekir";
const EMAIL_TAKEN: &str = "Bu e-posta adresi zaten kayıtlı";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpInput {
    pub email: String,
    pub password: String,
}

/// Creates a pending account.
pub async fn sign_up(db: &DbState, input: SignUpInput) -> Result<User, ApiError> {
    let email = input.email.trim();
    validate_email(email)?;
    validate_password_basic(&input.password)?;

    let user = db
        .inner()
        .users()
        .create(email, &input.password, false)
        .await
        .map_err(|e| match e {
            DbError::UniqueViolation { .. } => ApiError::new(ErrorCode::AlreadyExists, EMAIL_TAKEN),
            other => ApiError::from(other),
        })?;

    info!(user_id = %user.id, "Account created, awaiting approval");
    Ok(user)
}

/// Checks credentials and approval, then opens the session.
pub async fn sign_in(
    db: &DbState,
    session: &SessionState,
    email: &str,
    password: &str,
) -> Result<User, ApiError> {
    let user = db
        .inner()
        .users()
        .verify_credentials(email, password)
        .await?
        .ok_or_else(|| {
            warn!("Sign-in rejected");
            ApiError::unauthorized(BAD_CREDENTIALS)
        })?;

    if !user.approved {
        return Err(ApiError::new(ErrorCode::NotApproved, NOT_APPROVED));
    }

    session.sign_in(user.clone());
    Ok(user)
}

pub fn sign_out(session: &SessionState) {
    session.sign_out();
}

/// Verifies the admin's credentials, then approves `user_id`.
pub async fn approve_user(
    db: &DbState,
    admin_email: &str,
    admin_password: &str,
    user_id: &str,
) -> Result<User, ApiError> {
    validate_password_basic(admin_password)?;

    let users = db.inner().users();
    let admin = users
        .verify_credentials(admin_email, admin_password)
        .await?
        .ok_or_else(|| ApiError::unauthorized(BAD_CREDENTIALS))?;

    if !admin.is_admin {
        warn!(user_id = %admin.id, "Approval attempted without admin rights");
        return Err(ApiError::new(ErrorCode::Forbidden, ADMIN_ONLY));
    }

    let user = users.approve(user_id).await?;
    info!(user_id = %user.id, admin_id = %admin.id, "Account approved");
    Ok(user)
}

/// Accounts waiting for approval. Admin session only.
pub async fn list_pending_users(db: &DbState, session: &SessionState) -> Result<Vec<User>, ApiError> {
    let current = session
        .current_user()
        .ok_or_else(|| ApiError::unauthorized(BAD_CREDENTIALS))?;
    if !current.is_admin {
        return Err(ApiError::new(ErrorCode::Forbidden, ADMIN_ONLY));
    }

    Ok(db.inner().users().list_pending().await?)
}

/// Changing a password applies the strict rule; sign-up only the length rule.
pub async fn change_password(
    db: &DbState,
    session: &SessionState,
    current_password: &str,
    new_password: &str,
) -> Result<(), ApiError> {
    let user = session
        .current_user()
        .ok_or_else(|| ApiError::unauthorized(BAD_CREDENTIALS))?;

    validate_password(new_password)?;

    let users = db.inner().users();
    if users
        .verify_credentials(&user.email, current_password)
        .await?
        .is_none()
    {
        return Err(ApiError::unauthorized(BAD_CREDENTIALS));
    }

    users.set_password(&user.id, new_password).await?;
    info!(user_id = %user.id, "Password changed");
    Ok(())
}
