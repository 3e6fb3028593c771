use sqlx::PgPool;
use uuid::Uuid;

use crate::users::dto::UserSummary;

pub async fn exists(db: &PgPool, follower: Uuid, following: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND following_id = $2)"#,
    )
    .bind(follower)
    .bind(following)
    .fetch_one(db)
    .await
}

/// Insert under the (follower_id, following_id) unique constraint and the
/// follower <> following check.
pub async fn create(db: &PgPool, follower: Uuid, following: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(r#"INSERT INTO follows (follower_id, following_id) VALUES ($1, $2)"#)
        .bind(follower)
        .bind(following)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn delete(db: &PgPool, follower: Uuid, following: Uuid) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query(r#"DELETE FROM follows WHERE follower_id = $1 AND following_id = $2"#)
            .bind(follower)
            .bind(following)
            .execute(db)
            .await?;
    Ok(result.rows_affected())
}

/// Users who follow `user_id` (incoming edges).
pub async fn followers_of(db: &PgPool, user_id: Uuid) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT u.id, u.username, u.profile_picture, u.bio
        FROM follows f
        JOIN users u ON u.id = f.follower_id
        WHERE f.following_id = $1
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Users `user_id` follows (outgoing edges).
pub async fn following_of(db: &PgPool, user_id: Uuid) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT u.id, u.username, u.profile_picture, u.bio
        FROM follows f
        JOIN users u ON u.id = f.following_id
        WHERE f.follower_id = $1
        ORDER BY f.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}
