use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'posts' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub article: String,

    pub created_date: chrono::DateTime<chrono::Utc>,
    pub updated_date: Option<chrono::DateTime<chrono::Utc>>,
}

/// Read projection for a single post. The article body is not exposed
/// here, only the metadata plus a computed comment count.
#[derive(Debug, Serialize, FromRow)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub created_date: chrono::DateTime<chrono::Utc>,
    pub updated_date: Option<chrono::DateTime<chrono::Utc>>,
    pub count_of_comments: i64,
}

/// DTO for creating a new post.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(
        min = 1,
        max = 248,
        message = "Title length must be between 1 and 248 chars"
    ))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 5000,
        message = "Article length must be between 1 and 5000 chars"
    ))]
    pub article: String,
}

/// DTO for updating a post. Absent fields keep their stored value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    pub id: i64,

    #[validate(length(
        min = 1,
        max = 248,
        message = "Title length must be between 1 and 248 chars"
    ))]
    pub new_title: Option<String>,

    #[validate(length(
        min = 1,
        max = 5000,
        message = "Article length must be between 1 and 5000 chars"
    ))]
    pub new_article: Option<String>,
}
