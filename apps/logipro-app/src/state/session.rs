//! # Session State
//!
//! The signed-in broker. Every entity command reads the user id from here
//! to scope its document paths to `users/{uid}/data/...`.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

use logipro_store::User;

use crate::error::ApiError;

/// Message shown when a command runs without a signed-in user.
const SIGN_IN_REQUIRED: &str = "Bu işlem için giriş yapmalısınız";

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    user: Arc<RwLock<Option<User>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<User>> {
        self.user.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<User>> {
        self.user.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn sign_in(&self, user: User) {
        info!(user_id = %user.id, "Signed in");
        *self.write() = Some(user);
    }

    pub fn sign_out(&self) {
        if let Some(user) = self.write().take() {
            info!(user_id = %user.id, "Signed out");
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.read().clone()
    }

    /// Id of the signed-in user, or [`ErrorCode::Unauthorized`](crate::error::ErrorCode::Unauthorized).
    pub fn user_id(&self) -> Result<String, ApiError> {
        self.read()
            .as_ref()
            .map(|u| u.id.clone())
            .ok_or_else(|| ApiError::unauthorized(SIGN_IN_REQUIRED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::Utc;

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            approved: true,
            is_admin: false,
            created_at: Utc::now(),
            approved_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_sign_in_and_out() {
        let session = SessionState::new();
        assert_eq!(session.user_id().unwrap_err().code, ErrorCode::Unauthorized);

        session.sign_in(user("u1"));
        assert_eq!(session.user_id().unwrap(), "u1");

        let shared = session.clone();
        shared.sign_out();
        assert!(session.current_user().is_none());
    }
}
