use sqlx::PgPool;
use uuid::Uuid;

/// Add a user's vote to an opinion (idempotent - no effect if the pair
/// already exists). The UNIQUE (opinion_id, user_id) constraint makes
/// this safe under concurrent toggles.
/// Returns true when a new vote row was inserted.
pub async fn create_vote(
    pool: &PgPool,
    opinion_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO opinion_votes (opinion_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (opinion_id, user_id) DO NOTHING
        "#,
    )
    .bind(opinion_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove a user's vote from an opinion (idempotent - returns false if
/// the vote does not exist)
pub async fn delete_vote(
    pool: &PgPool,
    opinion_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM opinion_votes
        WHERE opinion_id = $1 AND user_id = $2
        "#,
    )
    .bind(opinion_id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Count votes for an opinion
pub async fn count_votes(pool: &PgPool, opinion_id: Uuid) -> Result<i64, sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM opinion_votes
        WHERE opinion_id = $1
        "#,
    )
    .bind(opinion_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Get total vote counts across all opinions for multiple posts
pub async fn count_votes_batch(
    pool: &PgPool,
    post_ids: &[Uuid],
) -> Result<Vec<(Uuid, i64)>, sqlx::Error> {
    let counts = sqlx::query_as::<_, (Uuid, i64)>(
        r#"
        SELECT o.post_id, COUNT(v.id) AS count
        FROM opinions o
        JOIN opinion_votes v ON v.opinion_id = o.id
        WHERE o.post_id = ANY($1)
        GROUP BY o.post_id
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(counts)
}
