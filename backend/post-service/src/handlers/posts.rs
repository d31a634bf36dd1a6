/// Post handlers - HTTP endpoints for post operations
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::{OpinionService, PostService};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Request body for creating a post
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 30, message = "title must be between 1 and 30 characters"))]
    pub title: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "content must be between 1 and 255 characters"
    ))]
    pub content: String,
}

/// Request body for updating a post's content
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "content must be between 1 and 255 characters"
    ))]
    pub content: String,
}

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// One post together with its opinions
#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub post: crate::models::PostWithStats,
    pub opinions: Vec<crate::models::OpinionWithVotes>,
}

/// List all posts with aggregates
pub async fn list_posts(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service.list_posts(None).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Search posts by title or content; a blank query lists everything
pub async fn search_posts(
    pool: web::Data<PgPool>,
    query: web::Query<SearchParams>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service.list_posts(Some(&query.q)).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Create a new post
pub async fn create_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(user_id.0, &req.title, &req.content)
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// Get a post by ID with its aggregates and opinions
pub async fn get_post(pool: web::Data<PgPool>, post_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    match service.get_post(*post_id).await? {
        Some(post) => {
            let opinions = OpinionService::new((**pool).clone())
                .get_post_opinions(*post_id)
                .await?;
            Ok(HttpResponse::Ok().json(PostDetailResponse { post, opinions }))
        }
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Update a post's content
pub async fn update_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = PostService::new((**pool).clone());
    let updated = service
        .update_content(*post_id, user_id.0, &req.content)
        .await?;

    if updated {
        Ok(HttpResponse::Ok().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}

/// Delete a post
pub async fn delete_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let deleted = service.delete_post(*post_id, user_id.0).await?;

    if deleted {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_content_bounds_accepted() {
        let req = CreatePostRequest {
            title: "t".repeat(30),
            content: "c".repeat(255),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_overlong_title_rejected() {
        let req = CreatePostRequest {
            title: "t".repeat(31),
            content: "fine".to_string(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_overlong_content_rejected() {
        let req = CreatePostRequest {
            title: "fine".to_string(),
            content: "c".repeat(256),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("content"));
    }

    #[test]
    fn test_empty_title_rejected() {
        let req = CreatePostRequest {
            title: String::new(),
            content: "fine".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_content_bound() {
        assert!(UpdatePostRequest {
            content: "c".repeat(255)
        }
        .validate()
        .is_ok());
        assert!(UpdatePostRequest {
            content: "c".repeat(256)
        }
        .validate()
        .is_err());
    }
}
