use crate::models::{Opinion, OpinionWithVotes};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new opinion on a post
pub async fn create_opinion(
    pool: &PgPool,
    post_id: Uuid,
    content: &str,
) -> Result<Opinion, sqlx::Error> {
    let opinion = sqlx::query_as::<_, Opinion>(
        r#"
        INSERT INTO opinions (post_id, content)
        VALUES ($1, $2)
        RETURNING id, post_id, content, created_at, updated_at
        "#,
    )
    .bind(post_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(opinion)
}

/// Get a single opinion by ID
pub async fn find_opinion_by_id(
    pool: &PgPool,
    opinion_id: Uuid,
) -> Result<Option<Opinion>, sqlx::Error> {
    let opinion = sqlx::query_as::<_, Opinion>(
        r#"
        SELECT id, post_id, content, created_at, updated_at
        FROM opinions
        WHERE id = $1
        "#,
    )
    .bind(opinion_id)
    .fetch_optional(pool)
    .await?;

    Ok(opinion)
}

/// Get all opinions for a post, each with its voter count
pub async fn get_post_opinions(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Vec<OpinionWithVotes>, sqlx::Error> {
    let opinions = sqlx::query_as::<_, OpinionWithVotes>(
        r#"
        SELECT o.id, o.post_id, o.content, COUNT(v.id) AS vote_count,
               o.created_at, o.updated_at
        FROM opinions o
        LEFT JOIN opinion_votes v ON v.opinion_id = o.id
        WHERE o.post_id = $1
        GROUP BY o.id
        ORDER BY o.created_at ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(opinions)
}

/// Get opinion counts for multiple posts
pub async fn count_opinions_batch(
    pool: &PgPool,
    post_ids: &[Uuid],
) -> Result<Vec<(Uuid, i64)>, sqlx::Error> {
    let counts = sqlx::query_as::<_, (Uuid, i64)>(
        r#"
        SELECT post_id, COUNT(*) AS count
        FROM opinions
        WHERE post_id = ANY($1)
        GROUP BY post_id
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(counts)
}

/// Get the most-voted opinion's content for multiple posts.
///
/// Ties on the vote count resolve to the earliest-created opinion,
/// with the id as a final tie-break so the order is total.
pub async fn top_opinions_batch(
    pool: &PgPool,
    post_ids: &[Uuid],
) -> Result<Vec<(Uuid, String)>, sqlx::Error> {
    let rows = sqlx::query_as::<_, (Uuid, String)>(
        r#"
        SELECT DISTINCT ON (o.post_id) o.post_id, o.content
        FROM opinions o
        LEFT JOIN opinion_votes v ON v.opinion_id = o.id
        WHERE o.post_id = ANY($1)
        GROUP BY o.id
        ORDER BY o.post_id, COUNT(v.id) DESC, o.created_at ASC, o.id ASC
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
