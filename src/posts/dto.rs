use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;
use crate::posts::repo::PostDetailRow;

pub(crate) const CAPTION_MAX_CHARS: usize = 2200;
pub(crate) const LOCATION_MAX_CHARS: usize = 100;

#[derive(Debug, Serialize)]
pub struct PostDto {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub image_path: String,
    pub caption: Option<String>,
    pub location: Option<String>,
    pub created_at: OffsetDateTime,
    pub likes_count: i64,
    pub comments_count: i64,
    pub is_liked_by_current_user: bool,
}

impl From<PostDetailRow> for PostDto {
    fn from(r: PostDetailRow) -> Self {
        Self {
            id: r.id,
            author_id: r.author_id,
            author_username: r.author_username,
            image_path: r.image_path,
            caption: r.caption,
            location: r.location,
            created_at: r.created_at,
            likes_count: r.likes_count,
            comments_count: r.comments_count,
            is_liked_by_current_user: r.is_liked_by_current_user,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedPostResponse {
    pub id: Uuid,
    pub created_at: OffsetDateTime,
}

/// Partial update: absent fields keep their current value.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub caption: Option<String>,
    pub location: Option<String>,
}

impl UpdatePostRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_caption(self.caption.as_deref())?;
        validate_location(self.location.as_deref())
    }
}

pub(crate) fn validate_caption(caption: Option<&str>) -> Result<(), ApiError> {
    if let Some(c) = caption {
        if c.chars().count() > CAPTION_MAX_CHARS {
            return Err(ApiError::Validation(format!(
                "caption must not exceed {} characters",
                CAPTION_MAX_CHARS
            )));
        }
    }
    Ok(())
}

pub(crate) fn validate_location(location: Option<&str>) -> Result<(), ApiError> {
    if let Some(l) = location {
        if l.chars().count() > LOCATION_MAX_CHARS {
            return Err(ApiError::Validation(format!(
                "location must not exceed {} characters",
                LOCATION_MAX_CHARS
            )));
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caption_and_location_bounds() {
        assert!(validate_caption(None).is_ok());
        assert!(validate_caption(Some(&"x".repeat(2200))).is_ok());
        assert!(validate_caption(Some(&"x".repeat(2201))).is_err());
        assert!(validate_location(Some(&"x".repeat(100))).is_ok());
        assert!(validate_location(Some(&"x".repeat(101))).is_err());
    }

    #[test]
    fn pagination_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.limit, 20);
        assert_eq!(p.offset, 0);
    }
}
