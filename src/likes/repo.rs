use sqlx::PgPool;
use uuid::Uuid;

pub async fn exists(db: &PgPool, user_id: Uuid, post_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = $1 AND post_id = $2)"#,
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_one(db)
    .await
}

/// Insert under the (user_id, post_id) unique constraint; the constraint,
/// not this function, is what makes a duplicate impossible under races.
pub async fn create(db: &PgPool, user_id: Uuid, post_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query(r#"INSERT INTO likes (user_id, post_id) VALUES ($1, $2)"#)
        .bind(user_id)
        .bind(post_id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn delete(db: &PgPool, user_id: Uuid, post_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM likes WHERE user_id = $1 AND post_id = $2"#)
        .bind(user_id)
        .bind(post_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count_for_post(db: &PgPool, post_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM likes WHERE post_id = $1"#)
        .bind(post_id)
        .fetch_one(db)
        .await
}
