use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub image_path: String,
    pub caption: Option<String>,
    pub location: Option<String>,
    pub created_at: OffsetDateTime,
}

impl Post {
    pub async fn create(
        db: &PgPool,
        author_id: Uuid,
        image_path: &str,
        caption: Option<&str>,
        location: Option<&str>,
    ) -> Result<Post, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (author_id, image_path, caption, location)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author_id, image_path, caption, location, created_at
            "#,
        )
        .bind(author_id)
        .bind(image_path)
        .bind(caption)
        .bind(location)
        .fetch_one(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_id, image_path, caption, location, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn exists(db: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(r#"SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)"#)
            .bind(id)
            .fetch_one(db)
            .await
    }

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        caption: Option<&str>,
        location: Option<&str>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET caption = $2, location = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(caption)
        .bind(location)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    /// Removing a post cascades its comments and likes at the store level.
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(r#"DELETE FROM posts WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Post as a viewer sees it: author name, counters, and the viewer-relative
/// like edge, all resolved store-side.
#[derive(Debug, FromRow)]
pub struct PostDetailRow {
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

const DETAIL_SELECT: &str = r#"
    SELECT p.id, p.author_id, u.username AS author_username, p.image_path,
           p.caption, p.location, p.created_at,
           (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS likes_count,
           (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comments_count,
           EXISTS(
               SELECT 1 FROM likes l WHERE l.post_id = p.id AND l.user_id = $1
           ) AS is_liked_by_current_user
    FROM posts p
    JOIN users u ON u.id = p.author_id
"#;

pub async fn detail(
    db: &PgPool,
    post_id: Uuid,
    viewer: Uuid,
) -> Result<Option<PostDetailRow>, sqlx::Error> {
    sqlx::query_as::<_, PostDetailRow>(&format!("{} WHERE p.id = $2", DETAIL_SELECT))
        .bind(viewer)
        .bind(post_id)
        .fetch_optional(db)
        .await
}

/// Posts authored by the viewer and everyone they follow, newest first.
pub async fn feed(
    db: &PgPool,
    viewer: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostDetailRow>, sqlx::Error> {
    sqlx::query_as::<_, PostDetailRow>(&format!(
        r#"{}
        WHERE p.author_id = $1
           OR p.author_id IN (SELECT following_id FROM follows WHERE follower_id = $1)
        ORDER BY p.created_at DESC
        LIMIT $2 OFFSET $3
        "#,
        DETAIL_SELECT
    ))
    .bind(viewer)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
}
