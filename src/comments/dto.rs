use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::comments::repo::CommentRow;
use crate::error::ApiError;

pub(crate) const CONTENT_MAX_CHARS: usize = 500;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

impl CreateCommentRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        let len = self.content.chars().count();
        if !(1..=CONTENT_MAX_CHARS).contains(&len) {
            return Err(ApiError::Validation(format!(
                "comment must be 1 to {} characters",
                CONTENT_MAX_CHARS
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CommentDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub post_id: Uuid,
    pub content: String,
    pub created_at: OffsetDateTime,
}

impl From<CommentRow> for CommentDto {
    fn from(r: CommentRow) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            username: r.username,
            post_id: r.post_id,
            content: r.content,
            created_at: r.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_bounds() {
        let empty = CreateCommentRequest { content: "".into() };
        assert!(empty.validate().is_err());
        let ok = CreateCommentRequest { content: "x".repeat(500) };
        assert!(ok.validate().is_ok());
        let long = CreateCommentRequest { content: "x".repeat(501) };
        assert!(long.validate().is_err());
    }
}
