use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::dto::MessageResponse,
    auth::AuthUser,
    error::ApiError,
    follows::repo,
    state::AppState,
    users::{dto::UserSummary, repo::User},
};

pub fn follow_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/follows/user/:user_id",
            post(follow_user).delete(unfollow_user),
        )
        .route("/follows/followers/:user_id", get(list_followers))
        .route("/follows/following/:user_id", get(list_following))
}

#[instrument(skip(state))]
pub async fn follow_user(
    State(state): State<AppState>,
    AuthUser(follower): AuthUser,
    Path(following): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if follower == following {
        return Err(ApiError::Validation("you cannot follow yourself".into()));
    }

    if !User::exists(&state.db, following).await? {
        return Err(ApiError::NotFound("user not found".into()));
    }

    if repo::exists(&state.db, follower, following).await? {
        warn!(follower = %follower, following = %following, "duplicate follow");
        return Err(ApiError::Conflict(
            "you are already following this user".into(),
        ));
    }

    // Constraint backstop for concurrent duplicates, same as likes.
    repo::create(&state.db, follower, following).await?;

    info!(follower = %follower, following = %following, "user followed");
    Ok(Json(MessageResponse {
        message: "you are now following this user".into(),
    }))
}

#[instrument(skip(state))]
pub async fn unfollow_user(
    State(state): State<AppState>,
    AuthUser(follower): AuthUser,
    Path(following): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let rows = repo::delete(&state.db, follower, following).await?;
    if rows == 0 {
        return Err(ApiError::NotFound(
            "you are not following this user".into(),
        ));
    }

    info!(follower = %follower, following = %following, "user unfollowed");
    Ok(Json(MessageResponse {
        message: "you are no longer following this user".into(),
    }))
}

#[instrument(skip(state))]
pub async fn list_followers(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    if !User::exists(&state.db, user_id).await? {
        return Err(ApiError::NotFound("user not found".into()));
    }
    let users = repo::followers_of(&state.db, user_id).await?;
    Ok(Json(users))
}

#[instrument(skip(state))]
pub async fn list_following(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    if !User::exists(&state.db, user_id).await? {
        return Err(ApiError::NotFound("user not found".into()));
    }
    let users = repo::following_of(&state.db, user_id).await?;
    Ok(Json(users))
}
