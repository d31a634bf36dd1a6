/// Post service - post management and the aggregation layer
use crate::db::{opinion_repo, post_repo, vote_repo};
use crate::error::Result;
use crate::models::{Post, PostWithStats};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List posts with aggregates, optionally filtered by a search
    /// term. A blank or whitespace-only term lists everything.
    pub async fn list_posts(&self, term: Option<&str>) -> Result<Vec<PostWithStats>> {
        let posts = match term {
            Some(t) if !t.trim().is_empty() => post_repo::search_posts(&self.pool, t).await?,
            _ => post_repo::list_posts(&self.pool).await?,
        };

        self.annotate(posts).await
    }

    /// Get a post by ID with aggregates
    pub async fn get_post(&self, post_id: Uuid) -> Result<Option<PostWithStats>> {
        let Some(post) = post_repo::find_post_by_id(&self.pool, post_id).await? else {
            return Ok(None);
        };

        Ok(self.annotate(vec![post]).await?.pop())
    }

    /// Create a new post
    pub async fn create_post(&self, author_id: Uuid, title: &str, content: &str) -> Result<Post> {
        let post = post_repo::create_post(&self.pool, author_id, title, content).await?;
        Ok(post)
    }

    /// Update a post's content; scoped to the author
    pub async fn update_content(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<bool> {
        let updated = post_repo::update_post_content(&self.pool, post_id, author_id, content).await?;
        Ok(updated)
    }

    /// Delete a post; scoped to the author. Owned opinions and their
    /// votes go with it.
    pub async fn delete_post(&self, post_id: Uuid, author_id: Uuid) -> Result<bool> {
        let deleted = post_repo::delete_post(&self.pool, post_id, author_id).await?;
        Ok(deleted)
    }

    /// Annotate posts with their aggregates in three batch queries,
    /// regardless of how many posts are in the set.
    async fn annotate(&self, posts: Vec<Post>) -> Result<Vec<PostWithStats>> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
        let opinion_counts = opinion_repo::count_opinions_batch(&self.pool, &post_ids).await?;
        let vote_counts = vote_repo::count_votes_batch(&self.pool, &post_ids).await?;
        let top_opinions = opinion_repo::top_opinions_batch(&self.pool, &post_ids).await?;

        Ok(merge_stats(posts, &opinion_counts, &vote_counts, top_opinions))
    }
}

/// Assemble `PostWithStats` DTOs from the batch query outputs.
///
/// Every opinion counts as one impression on top of however many votes
/// it received, so a post's impression count is its opinion count plus
/// its total vote count.
pub(crate) fn merge_stats(
    posts: Vec<Post>,
    opinion_counts: &[(Uuid, i64)],
    vote_counts: &[(Uuid, i64)],
    top_opinions: Vec<(Uuid, String)>,
) -> Vec<PostWithStats> {
    let opinion_counts: HashMap<Uuid, i64> = opinion_counts.iter().copied().collect();
    let vote_counts: HashMap<Uuid, i64> = vote_counts.iter().copied().collect();
    let mut top_opinions: HashMap<Uuid, String> = top_opinions.into_iter().collect();

    posts
        .into_iter()
        .map(|post| {
            let opinion_count = opinion_counts.get(&post.id).copied().unwrap_or(0);
            let vote_count = vote_counts.get(&post.id).copied().unwrap_or(0);
            let top_opinion = top_opinions.remove(&post.id);

            PostWithStats {
                id: post.id,
                author_id: post.author_id,
                title: post.title,
                content: post.content,
                created_at: post.created_at,
                updated_at: post.updated_at,
                opinion_count,
                impression_count: opinion_count + vote_count,
                top_opinion,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post(title: &str, content: &str) -> Post {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_impressions_are_opinions_plus_votes() {
        // Two opinions, three votes across them: 2 + 3 = 5 impressions
        let p = post("Cats", "Cats are great");
        let id = p.id;

        let stats = merge_stats(
            vec![p],
            &[(id, 2)],
            &[(id, 3)],
            vec![(id, "Agreed".to_string())],
        );

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].opinion_count, 2);
        assert_eq!(stats[0].impression_count, 5);
        assert_eq!(stats[0].top_opinion.as_deref(), Some("Agreed"));
    }

    #[test]
    fn test_post_without_opinions_has_no_aggregates() {
        let p = post("Quiet", "Nothing here yet");
        let id = p.id;

        let stats = merge_stats(vec![p], &[], &[], vec![]);

        assert_eq!(stats[0].id, id);
        assert_eq!(stats[0].opinion_count, 0);
        assert_eq!(stats[0].impression_count, 0);
        assert!(stats[0].top_opinion.is_none());
    }

    #[test]
    fn test_voteless_opinions_still_count_as_impressions() {
        let p = post("Cats", "Cats are great");
        let id = p.id;

        // Four opinions, none of them voted on
        let stats = merge_stats(vec![p], &[(id, 4)], &[], vec![(id, "First".to_string())]);

        assert_eq!(stats[0].opinion_count, 4);
        assert_eq!(stats[0].impression_count, 4);
    }

    #[test]
    fn test_aggregates_keyed_per_post() {
        let p1 = post("Cats", "Cats are great");
        let p2 = post("Dogs", "Dogs are fine too");
        let (id1, id2) = (p1.id, p2.id);

        let stats = merge_stats(
            vec![p1, p2],
            &[(id1, 2), (id2, 1)],
            &[(id1, 3)],
            vec![(id1, "Agreed".to_string()), (id2, "Nah".to_string())],
        );

        assert_eq!(stats[0].impression_count, 5);
        assert_eq!(stats[1].impression_count, 1);
        assert_eq!(stats[1].top_opinion.as_deref(), Some("Nah"));
    }
}
