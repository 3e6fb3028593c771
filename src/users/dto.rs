use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;
use crate::users::repo::ProfileRow;

pub(crate) const BIO_MAX_CHARS: usize = 500;

/// Profile as shown to a viewer. The email is included only when the viewer
/// owns the profile.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub profile_picture: Option<String>,
    pub bio: String,
    pub created_at: OffsetDateTime,
    pub posts_count: i64,
    pub followers_count: i64,
    pub following_count: i64,
    pub is_following: bool,
    pub is_my_profile: bool,
}

impl UserProfile {
    pub fn from_row(row: ProfileRow, viewer: Uuid) -> Self {
        let is_my_profile = row.id == viewer;
        Self {
            id: row.id,
            username: row.username,
            email: is_my_profile.then_some(row.email),
            profile_picture: row.profile_picture,
            bio: row.bio,
            created_at: row.created_at,
            posts_count: row.posts_count,
            followers_count: row.followers_count,
            following_count: row.following_count,
            is_following: row.is_following,
            is_my_profile,
        }
    }
}

/// Compact user representation used by follower/following listings.
#[derive(Debug, Serialize, FromRow)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub profile_picture: Option<String>,
    pub bio: String,
}

pub(crate) fn validate_bio(bio: &str) -> Result<(), ApiError> {
    if bio.chars().count() > BIO_MAX_CHARS {
        return Err(ApiError::Validation(format!(
            "bio must not exceed {} characters",
            BIO_MAX_CHARS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: Uuid) -> ProfileRow {
        ProfileRow {
            id,
            username: "alice".into(),
            email: "alice@x.com".into(),
            bio: "hello".into(),
            profile_picture: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
            posts_count: 3,
            followers_count: 2,
            following_count: 1,
            is_following: false,
        }
    }

    #[test]
    fn email_is_visible_only_to_the_owner() {
        let id = Uuid::new_v4();
        let own = UserProfile::from_row(row(id), id);
        assert_eq!(own.email.as_deref(), Some("alice@x.com"));
        assert!(own.is_my_profile);

        let other = UserProfile::from_row(row(id), Uuid::new_v4());
        assert!(other.email.is_none());
        assert!(!other.is_my_profile);
        let json = serde_json::to_string(&other).unwrap();
        assert!(!json.contains("alice@x.com"));
    }

    #[test]
    fn bio_length_is_bounded() {
        assert!(validate_bio(&"x".repeat(500)).is_ok());
        assert!(validate_bio(&"x".repeat(501)).is_err());
    }
}
