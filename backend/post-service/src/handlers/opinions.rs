/// Opinion handlers - HTTP endpoints for opinion and vote operations
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::OpinionService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Request body for creating an opinion
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOpinionRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "content must be between 1 and 255 characters"
    ))]
    pub content: String,
}

/// Create a new opinion on a post
pub async fn create_opinion(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    _user_id: UserId,
    req: web::Json<CreateOpinionRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = OpinionService::new((**pool).clone());
    let opinion = service.create_opinion(*post_id, &req.content).await?;

    Ok(HttpResponse::Created().json(opinion))
}

/// Get opinions for a post, each with its voter count
pub async fn get_post_opinions(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = OpinionService::new((**pool).clone());
    let opinions = service.get_post_opinions(*post_id).await?;

    Ok(HttpResponse::Ok().json(opinions))
}

/// Toggle the caller's vote on an opinion; responds with the new count
pub async fn toggle_vote(
    pool: web::Data<PgPool>,
    opinion_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = OpinionService::new((**pool).clone());
    let vote_count = service.toggle_vote(*opinion_id, user_id.0).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "vote_count": vote_count })))
}
