use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Input validation, run before any store access.
    pub fn validate(&self) -> Result<(), ApiError> {
        let username_len = self.username.chars().count();
        if !(3..=50).contains(&username_len) {
            return Err(ApiError::Validation(
                "username must be 3 to 50 characters".into(),
            ));
        }
        if !is_valid_email(&self.email) {
            return Err(ApiError::Validation("invalid email format".into()));
        }
        if self.password.chars().count() < 6 {
            return Err(ApiError::Validation(
                "password must be at least 6 characters".into(),
            ));
        }
        Ok(())
    }
}

/// Request body for login. The identifier matches a username exactly or an
/// email case-insensitively.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn req(username: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn accepts_a_well_formed_registration() {
        assert!(req("alice", "alice@x.com", "secret1").validate().is_ok());
    }

    #[test]
    fn rejects_short_and_long_usernames() {
        assert!(req("ab", "a@x.com", "secret1").validate().is_err());
        let long = "a".repeat(51);
        assert!(req(&long, "a@x.com", "secret1").validate().is_err());
        let max = "a".repeat(50);
        assert!(req(&max, "a@x.com", "secret1").validate().is_ok());
    }

    #[test]
    fn rejects_bad_emails() {
        for email in ["plainaddress", "no@tld", "two@@x.com", "spaces in@x.com"] {
            let err = req("alice", email, "secret1").validate().unwrap_err();
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn rejects_short_passwords() {
        assert!(req("alice", "a@x.com", "12345").validate().is_err());
        assert!(req("alice", "a@x.com", "123456").validate().is_ok());
    }
}
