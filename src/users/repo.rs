use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub bio: String,
    pub profile_picture: Option<String>,
    pub created_at: OffsetDateTime,
}

impl User {
    pub async fn create(
        db: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
        bio: &str,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, bio)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, bio, profile_picture, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(bio)
        .fetch_one(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, bio, profile_picture, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Login lookup: exact username match, or case-insensitive email match
    /// (emails are stored lowercased).
    pub async fn find_by_identifier(
        db: &PgPool,
        identifier: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, bio, profile_picture, created_at
            FROM users
            WHERE username = $1 OR email = lower($1)
            "#,
        )
        .bind(identifier)
        .fetch_optional(db)
        .await
    }

    pub async fn username_taken(db: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(r#"SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)"#)
            .bind(username)
            .fetch_one(db)
            .await
    }

    pub async fn email_taken(db: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(r#"SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)"#)
            .bind(email)
            .fetch_one(db)
            .await
    }

    pub async fn exists(db: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(r#"SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)"#)
            .bind(id)
            .fetch_one(db)
            .await
    }

    /// Overwrite the mutable profile fields. Returns the number of rows
    /// touched so the caller can tell a vanished user apart from success.
    pub async fn set_profile(
        db: &PgPool,
        id: Uuid,
        bio: &str,
        profile_picture: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET bio = $2, profile_picture = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(bio)
        .bind(profile_picture)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }
}

/// Profile page projection: the user row plus the counters and the
/// viewer-relative follow edge, computed store-side in one round trip.
#[derive(Debug, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub profile_picture: Option<String>,
    pub created_at: OffsetDateTime,
    pub posts_count: i64,
    pub followers_count: i64,
    pub following_count: i64,
    pub is_following: bool,
}

pub async fn profile(
    db: &PgPool,
    id: Uuid,
    viewer: Uuid,
) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(
        r#"
        SELECT u.id, u.username, u.email, u.bio, u.profile_picture, u.created_at,
               (SELECT COUNT(*) FROM posts p WHERE p.author_id = u.id) AS posts_count,
               (SELECT COUNT(*) FROM follows f WHERE f.following_id = u.id) AS followers_count,
               (SELECT COUNT(*) FROM follows f WHERE f.follower_id = u.id) AS following_count,
               EXISTS(
                   SELECT 1 FROM follows f
                   WHERE f.follower_id = $2 AND f.following_id = u.id
               ) AS is_following
        FROM users u
        WHERE u.id = $1
        "#,
    )
    .bind(id)
    .bind(viewer)
    .fetch_optional(db)
    .await
}
