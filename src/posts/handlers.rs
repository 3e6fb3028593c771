use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Redirect,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{require_owner, AuthUser},
    error::ApiError,
    media::{self, UploadItem},
    posts::{
        dto::{
            validate_caption, validate_location, CreatedPostResponse, Pagination, PostDto,
            UpdatePostRequest,
        },
        repo::{self, Post},
    },
    state::AppState,
};

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post))
        .route("/posts/feed", get(get_feed))
        .route(
            "/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/posts/:id/image", get(get_image))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024))
}

/// Multipart post creation: required `image` file, optional `caption` and
/// `location` text fields.
#[instrument(skip(state, mp))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut mp: Multipart,
) -> Result<(StatusCode, HeaderMap, Json<CreatedPostResponse>), ApiError> {
    let mut image: Option<UploadItem> = None;
    let mut caption: Option<String> = None;
    let mut location: Option<String> = None;

    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|_| ApiError::Validation("malformed multipart body".into()))?
    {
        match field.name() {
            Some("image") => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".into());
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::Validation("could not read image field".into()))?;
                if !data.is_empty() {
                    image = Some(UploadItem {
                        body: data,
                        content_type,
                    });
                }
            }
            Some("caption") => {
                caption = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| ApiError::Validation("could not read caption field".into()))?,
                );
            }
            Some("location") => {
                location = Some(field.text().await.map_err(|_| {
                    ApiError::Validation("could not read location field".into())
                })?);
            }
            _ => {}
        }
    }

    let image = image.ok_or_else(|| ApiError::Validation("image file is required".into()))?;
    validate_caption(caption.as_deref())?;
    validate_location(location.as_deref())?;

    let key = media::store_image(&state, "posts", user_id, image).await?;
    let post = Post::create(
        &state.db,
        user_id,
        &key,
        caption.as_deref(),
        location.as_deref(),
    )
    .await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::LOCATION,
        format!("/api/posts/{}", post.id)
            .parse()
            .expect("valid header value"),
    );

    info!(post_id = %post.id, user_id = %user_id, "post created");
    Ok((
        StatusCode::CREATED,
        headers,
        Json(CreatedPostResponse {
            id: post.id,
            created_at: post.created_at,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    AuthUser(viewer): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PostDto>, ApiError> {
    let row = repo::detail(&state.db, id, viewer)
        .await?
        .ok_or_else(|| ApiError::NotFound("post not found".into()))?;
    Ok(Json(row.into()))
}

#[instrument(skip(state))]
pub async fn get_feed(
    State(state): State<AppState>,
    AuthUser(viewer): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<PostDto>>, ApiError> {
    let rows = repo::feed(&state.db, viewer, p.limit, p.offset).await?;
    Ok(Json(rows.into_iter().map(PostDto::from).collect()))
}

/// 302 to a presigned URL for the post image.
#[instrument(skip(state))]
pub async fn get_image(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Redirect, ApiError> {
    let post = Post::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("post not found".into()))?;
    let url = media::presign(&state, &post.image_path).await?;
    Ok(Redirect::temporary(&url))
}

#[instrument(skip(state, payload))]
pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<StatusCode, ApiError> {
    payload.validate()?;

    let post = Post::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("post not found".into()))?;
    require_owner(post.author_id, caller)?;

    // Absent fields keep their stored value.
    let caption = payload.caption.as_deref().or(post.caption.as_deref());
    let location = payload.location.as_deref().or(post.location.as_deref());

    let rows = Post::update(&state.db, id, caption, location).await?;
    if rows == 0 {
        return Err(ApiError::NotFound("post not found".into()));
    }

    info!(post_id = %id, "post updated");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let post = Post::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("post not found".into()))?;
    require_owner(post.author_id, caller)?;

    let rows = Post::delete(&state.db, id).await?;
    if rows == 0 {
        return Err(ApiError::NotFound("post not found".into()));
    }
    // Row first, then blob: a dangling object is recoverable, a dangling
    // reference is not.
    media::delete_image(&state, &post.image_path).await;

    info!(post_id = %id, user_id = %caller, "post deleted");
    Ok(StatusCode::NO_CONTENT)
}
