/// Data models for post-service
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a user-authored piece of content
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Opinion entity - a short comment attached to a post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Opinion {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Vote entity - membership of a user in an opinion's voter set
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OpinionVote {
    pub id: Uuid,
    pub opinion_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Post annotated with derived engagement attributes.
///
/// The aggregation layer computes these once, in bulk; callers read
/// them from here and never recompute them.
#[derive(Debug, Clone, Serialize)]
pub struct PostWithStats {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Number of opinions submitted for the post
    pub opinion_count: i64,
    /// Opinion count plus every vote on the post's opinions; an
    /// opinion with zero votes still counts as one impression
    pub impression_count: i64,
    /// Content of the most-voted opinion; absent when the post has
    /// no opinions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_opinion: Option<String>,
}

/// Opinion annotated with its voter count
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OpinionWithVotes {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub vote_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
