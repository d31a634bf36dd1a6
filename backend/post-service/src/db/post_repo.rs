use crate::models::Post;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new post
/// Returns the created post
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    title: &str,
    content: &str,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (author_id, title, content)
        VALUES ($1, $2, $3)
        RETURNING id, author_id, title, content, created_at, updated_at
        "#,
    )
    .bind(author_id)
    .bind(title)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, title, content, created_at, updated_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// List all posts in descending order by creation date
pub async fn list_posts(pool: &PgPool) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, title, content, created_at, updated_at
        FROM posts
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Find posts whose title or content contains the term, case-insensitively
pub async fn search_posts(pool: &PgPool, term: &str) -> Result<Vec<Post>, sqlx::Error> {
    let search_pattern = like_pattern(term);

    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, author_id, title, content, created_at, updated_at
        FROM posts
        WHERE title ILIKE $1 OR content ILIKE $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(&search_pattern)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Update a post's content; scoped to the author
/// Returns true when a row was updated
pub async fn update_post_content(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    content: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET content = $1, updated_at = NOW()
        WHERE id = $2 AND author_id = $3
        "#,
    )
    .bind(content)
    .bind(post_id)
    .bind(author_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a post; scoped to the author. Owned opinions and their votes
/// are dropped by the ON DELETE CASCADE constraints.
pub async fn delete_post(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM posts
        WHERE id = $1 AND author_id = $2
        "#,
    )
    .bind(post_id)
    .bind(author_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Escape LIKE metacharacters so the term matches as a literal substring.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_term() {
        assert_eq!(like_pattern("cat"), "%cat%");
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }

    #[test]
    fn test_like_pattern_empty_term_matches_everything() {
        assert_eq!(like_pattern(""), "%%");
    }
}
