use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest},
        jwt::JwtKeys,
        password,
    },
    error::ApiError,
    state::AppState,
    users::repo::User,
};

const DEFAULT_BIO: &str = "Hi! I'm new here.";

/// One message for both unknown-identifier and wrong-password so a caller
/// cannot probe which accounts exist.
const INVALID_CREDENTIALS: &str = "invalid username/email or password";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    payload.username = payload.username.trim().to_string();
    // Emails canonicalize case-insensitively; usernames stay case-sensitive.
    payload.email = payload.email.trim().to_lowercase();
    payload.validate()?;

    if User::username_taken(&state.db, &payload.username).await? {
        warn!(username = %payload.username, "username already taken");
        return Err(ApiError::Conflict("username is already taken".into()));
    }
    if User::email_taken(&state.db, &payload.email).await? {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("email is already registered".into()));
    }

    let hash = password::hash_password(&payload.password)?;

    // The unique indexes on username/email are the backstop if a concurrent
    // registration slips between the checks above and this insert; the
    // violation maps to the same Conflict.
    let user = User::create(&state.db, &payload.username, &payload.email, &hash, DEFAULT_BIO)
        .await?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "registration successful".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    payload.username_or_email = payload.username_or_email.trim().to_string();

    let user = User::find_by_identifier(&state.db, &payload.username_or_email)
        .await?
        .ok_or_else(|| {
            warn!("login with unknown identifier");
            ApiError::Unauthorized(INVALID_CREDENTIALS.into())
        })?;

    if !password::verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.username, &user.email)?;

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
        username: user.username,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn login_response_serializes_token_and_identity() {
        let response = LoginResponse {
            token: "abc.def.ghi".into(),
            user_id: Uuid::new_v4(),
            username: "alice".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("abc.def.ghi"));
        assert!(json.contains("alice"));
    }
}
