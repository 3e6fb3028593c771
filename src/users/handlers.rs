use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::Redirect,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{require_owner, AuthUser},
    error::ApiError,
    media::{self, UploadItem},
    state::AppState,
    users::{
        dto::{validate_bio, UserProfile},
        repo::{self, User},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:id", get(get_user).put(update_user))
        .route("/users/:id/avatar", get(get_avatar))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(viewer): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, ApiError> {
    let row = repo::profile(&state.db, id, viewer)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".into()))?;
    Ok(Json(UserProfile::from_row(row, viewer)))
}

/// Multipart profile update: optional `bio` text field, optional
/// `profile_picture` file field. Owner only.
#[instrument(skip(state, mp))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<Uuid>,
    mut mp: Multipart,
) -> Result<StatusCode, ApiError> {
    require_owner(id, caller)?;

    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".into()))?;

    let mut bio: Option<String> = None;
    let mut picture: Option<UploadItem> = None;

    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|_| ApiError::Validation("malformed multipart body".into()))?
    {
        match field.name() {
            Some("bio") => {
                bio = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| ApiError::Validation("could not read bio field".into()))?,
                );
            }
            Some("profile_picture") => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".into());
                let data = field.bytes().await.map_err(|_| {
                    ApiError::Validation("could not read profile_picture field".into())
                })?;
                if !data.is_empty() {
                    picture = Some(UploadItem {
                        body: data,
                        content_type,
                    });
                }
            }
            _ => {}
        }
    }

    if let Some(ref bio) = bio {
        validate_bio(bio)?;
    }

    let new_picture = match picture {
        Some(item) => {
            let key = media::store_image(&state, "profiles", id, item).await?;
            // Replacing the avatar removes the previous object.
            if let Some(ref old) = user.profile_picture {
                media::delete_image(&state, old).await;
            }
            Some(key)
        }
        None => user.profile_picture.clone(),
    };

    let final_bio = bio.unwrap_or_else(|| user.bio.clone());
    let rows = User::set_profile(&state.db, id, &final_bio, new_picture.as_deref()).await?;
    if rows == 0 {
        // The row vanished between fetch and save.
        return Err(ApiError::NotFound("user not found".into()));
    }

    info!(user_id = %id, "profile updated");
    Ok(StatusCode::NO_CONTENT)
}

/// 302 to a presigned URL for the user's profile picture.
#[instrument(skip(state))]
pub async fn get_avatar(
    State(state): State<AppState>,
    AuthUser(_viewer): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Redirect, ApiError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".into()))?;
    let key = user
        .profile_picture
        .ok_or_else(|| ApiError::NotFound("user has no profile picture".into()))?;
    let url = media::presign(&state, &key).await?;
    Ok(Redirect::temporary(&url))
}
