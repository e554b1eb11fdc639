use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::AppError,
    models::post::{CreatePostRequest, UpdatePostRequest},
    services::PostService,
};

/// Query parameters addressing a single post.
#[derive(Debug, Deserialize)]
pub struct PostIdParams {
    pub id: i64,
}

/// Fetch a single post projection, comment count included.
pub async fn get_post(
    State(posts): State<PostService>,
    Query(params): Query<PostIdParams>,
) -> Result<impl IntoResponse, AppError> {
    let post = posts
        .get_post(params.id)
        .await?
        .ok_or(AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(post))
}

/// Create a new post.
pub async fn create_post(
    State(posts): State<PostService>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    posts.create_post(&payload).await?;

    Ok(StatusCode::CREATED)
}

/// Update title and/or article of an existing post.
pub async fn update_post(
    State(posts): State<PostService>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if !posts.update_post(&payload).await? {
        return Err(AppError::NotFound("Post not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a post and, through the FK cascade, all of its comments.
pub async fn remove_post(
    State(posts): State<PostService>,
    Query(params): Query<PostIdParams>,
) -> Result<impl IntoResponse, AppError> {
    if !posts.delete_post(params.id).await? {
        return Err(AppError::NotFound("Post not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
