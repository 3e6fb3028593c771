use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::ApiError,
    likes::{dto::LikeResponse, repo},
    posts::repo::Post,
    state::AppState,
};

pub fn like_routes() -> Router<AppState> {
    Router::new().route(
        "/likes/post/:post_id",
        post(like_post).delete(unlike_post),
    )
}

/// Repeated likes are rejected, not absorbed: the second call conflicts.
#[instrument(skip(state))]
pub async fn like_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<LikeResponse>, ApiError> {
    if !Post::exists(&state.db, post_id).await? {
        return Err(ApiError::NotFound("post not found".into()));
    }

    if repo::exists(&state.db, user_id, post_id).await? {
        warn!(user_id = %user_id, post_id = %post_id, "duplicate like");
        return Err(ApiError::Conflict("you have already liked this post".into()));
    }

    // A concurrent duplicate slips past the pre-check and trips the unique
    // constraint instead, mapping to the same Conflict.
    repo::create(&state.db, user_id, post_id).await?;

    let likes_count = repo::count_for_post(&state.db, post_id).await?;
    info!(user_id = %user_id, post_id = %post_id, "post liked");
    Ok(Json(LikeResponse {
        message: "post liked".into(),
        likes_count,
    }))
}

#[instrument(skip(state))]
pub async fn unlike_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<LikeResponse>, ApiError> {
    let rows = repo::delete(&state.db, user_id, post_id).await?;
    if rows == 0 {
        return Err(ApiError::NotFound("you have not liked this post".into()));
    }

    let likes_count = repo::count_for_post(&state.db, post_id).await?;
    info!(user_id = %user_id, post_id = %post_id, "post unliked");
    Ok(Json(LikeResponse {
        message: "like removed".into(),
        likes_count,
    }))
}
