use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Author sentinel written by a soft delete.
pub const DELETED_AUTHOR: &str = "Unknown";
/// Body sentinel written by a soft delete.
pub const DELETED_BODY: &str = "Comment was deleted";

/// Represents the 'comments' table in the database.
///
/// `parent_comment_id` is 0 for top-level comments; `nesting_level` is
/// always the parent's level + 1, or 0 at the top.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub author: String,
    pub body: String,
    pub parent_comment_id: i64,
    pub nesting_level: i64,
    pub is_deleted: bool,
    pub created_date: chrono::DateTime<chrono::Utc>,
    pub updated_date: Option<chrono::DateTime<chrono::Utc>>,
    pub post_id: i64,
}

/// DTO for creating a new comment.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(
        min = 1,
        max = 128,
        message = "Author length must be between 1 and 128 chars"
    ))]
    pub author: String,

    #[validate(length(
        min = 1,
        max = 496,
        message = "Body length must be between 1 and 496 chars"
    ))]
    pub body: String,

    /// 0 means a top-level comment on the post itself.
    #[validate(range(min = 0))]
    #[serde(default)]
    pub parent_comment_id: i64,

    pub post_id: i64,
}

/// DTO for editing a comment body.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    pub id: i64,

    #[validate(length(
        min = 1,
        max = 496,
        message = "Body length must be between 1 and 496 chars"
    ))]
    pub new_body: String,
}

/// Outcome of a comment creation attempt. Rejections carry the
/// human-readable reason surfaced to the caller.
#[derive(Debug, PartialEq, Eq)]
pub enum CreateCommentStatus {
    Created,
    Rejected(&'static str),
}
