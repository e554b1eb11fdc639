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
    models::comment::{CreateCommentRequest, CreateCommentStatus, UpdateCommentRequest},
    services::CommentService,
};

/// Query parameters for fetching one nesting level of a post's thread.
#[derive(Debug, Deserialize)]
pub struct FetchParams {
    pub post_id: i64,
    pub nesting_level: i64,
}

#[derive(Debug, Deserialize)]
pub struct CommentIdParams {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ChildrenParams {
    pub parent_comment_id: i64,
}

/// Fetch a post's comments at one nesting level.
/// 404 when the post itself is unknown; an empty level is just an empty list.
pub async fn get_comments(
    State(comments): State<CommentService>,
    Query(params): Query<FetchParams>,
) -> Result<impl IntoResponse, AppError> {
    let level = comments
        .get_comments(params.post_id, params.nesting_level)
        .await?
        .ok_or(AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(level))
}

/// Create a comment, replying either to the post or to another comment.
pub async fn create_comment(
    State(comments): State<CommentService>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    match comments.create_comment(&payload).await? {
        CreateCommentStatus::Created => Ok(StatusCode::CREATED),
        CreateCommentStatus::Rejected(reason) => Err(AppError::NotFound(reason.to_string())),
    }
}

/// Edit a comment body.
pub async fn update_comment(
    State(comments): State<CommentService>,
    Json(payload): Json<UpdateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if !comments.update_comment(&payload).await? {
        return Err(AppError::NotFound("Comment not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Soft-delete a comment. Repeating the call reports 404 since the row
/// is already marked.
pub async fn remove_comment(
    State(comments): State<CommentService>,
    Query(params): Query<CommentIdParams>,
) -> Result<impl IntoResponse, AppError> {
    if !comments.delete_comment(params.id).await? {
        return Err(AppError::NotFound(
            "Comment not found, maybe it already been deleted".to_string(),
        ));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// List the direct replies of a comment, soft-deleted ones included.
pub async fn get_child_comments(
    State(comments): State<CommentService>,
    Query(params): Query<ChildrenParams>,
) -> Result<impl IntoResponse, AppError> {
    let children = comments.get_children(params.parent_comment_id).await?;

    Ok(Json(children))
}
