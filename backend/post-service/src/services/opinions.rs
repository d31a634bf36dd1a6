/// Opinion service - opinion creation, retrieval, and the vote toggle
use crate::db::{opinion_repo, post_repo, vote_repo};
use crate::error::{AppError, Result};
use crate::models::{Opinion, OpinionWithVotes};
use sqlx::PgPool;
use uuid::Uuid;

pub struct OpinionService {
    pool: PgPool,
}

impl OpinionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new opinion on a post
    pub async fn create_opinion(&self, post_id: Uuid, content: &str) -> Result<Opinion> {
        if post_repo::find_post_by_id(&self.pool, post_id).await?.is_none() {
            return Err(AppError::NotFound(format!("post {}", post_id)));
        }

        let opinion = opinion_repo::create_opinion(&self.pool, post_id, content).await?;
        Ok(opinion)
    }

    /// Get a post's opinions, each with its voter count
    pub async fn get_post_opinions(&self, post_id: Uuid) -> Result<Vec<OpinionWithVotes>> {
        if post_repo::find_post_by_id(&self.pool, post_id).await?.is_none() {
            return Err(AppError::NotFound(format!("post {}", post_id)));
        }

        let opinions = opinion_repo::get_post_opinions(&self.pool, post_id).await?;
        Ok(opinions)
    }

    /// Toggle a user's vote on an opinion: removes the vote when the
    /// user is already a voter, adds it otherwise.
    /// Returns the resulting voter count for the opinion.
    pub async fn toggle_vote(&self, opinion_id: Uuid, user_id: Uuid) -> Result<i64> {
        if opinion_repo::find_opinion_by_id(&self.pool, opinion_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!("opinion {}", opinion_id)));
        }

        let removed = vote_repo::delete_vote(&self.pool, opinion_id, user_id).await?;
        if !removed {
            // A concurrent toggle may have inserted the pair already;
            // ON CONFLICT DO NOTHING keeps the flip idempotent.
            vote_repo::create_vote(&self.pool, opinion_id, user_id).await?;
        }

        let count = vote_repo::count_votes(&self.pool, opinion_id).await?;
        Ok(count)
    }
}
