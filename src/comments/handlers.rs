use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{require_owner, AuthUser},
    comments::{
        dto::{CommentDto, CreateCommentRequest},
        repo,
    },
    error::ApiError,
    posts::repo::Post,
    state::AppState,
};

pub fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/comments/post/:post_id",
            get(list_comments).post(add_comment),
        )
        .route("/comments/:id", delete(delete_comment))
}

#[instrument(skip(state, payload))]
pub async fn add_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentDto>), ApiError> {
    payload.validate()?;

    if !Post::exists(&state.db, post_id).await? {
        return Err(ApiError::NotFound("post not found".into()));
    }

    let row = repo::create(&state.db, user_id, post_id, &payload.content).await?;
    info!(comment_id = %row.id, post_id = %post_id, "comment added");
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Vec<CommentDto>>, ApiError> {
    if !Post::exists(&state.db, post_id).await? {
        return Err(ApiError::NotFound("post not found".into()));
    }
    let rows = repo::list_for_post(&state.db, post_id).await?;
    Ok(Json(rows.into_iter().map(CommentDto::from).collect()))
}

#[instrument(skip(state))]
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let comment = repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("comment not found".into()))?;
    require_owner(comment.user_id, caller)?;

    let rows = repo::delete(&state.db, id).await?;
    if rows == 0 {
        return Err(ApiError::NotFound("comment not found".into()));
    }

    info!(comment_id = %id, user_id = %caller, "comment deleted");
    Ok(StatusCode::NO_CONTENT)
}
