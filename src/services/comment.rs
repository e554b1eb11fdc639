use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::comment::{
        Comment, CreateCommentRequest, CreateCommentStatus, DELETED_AUTHOR, DELETED_BODY,
        UpdateCommentRequest,
    },
};

/// Comment lifecycle and threading rules.
#[derive(Clone)]
pub struct CommentService {
    pool: SqlitePool,
}

impl CommentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Loads the comments of a post at exactly one nesting level, in
    /// storage order. `None` means the post itself does not exist; a
    /// post with no comments at that level yields an empty list.
    pub async fn get_comments(
        &self,
        post_id: i64,
        nesting_level: i64,
    ) -> Result<Option<Vec<Comment>>, AppError> {
        let post = sqlx::query_scalar::<_, i64>("SELECT id FROM posts WHERE id = ?")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        if post.is_none() {
            return Ok(None);
        }

        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT
                id, author, body, parent_comment_id, nesting_level,
                is_deleted, created_date, updated_date, post_id
            FROM comments
            WHERE post_id = ? AND nesting_level = ?
            ORDER BY id
            "#,
        )
        .bind(post_id)
        .bind(nesting_level)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(comments))
    }

    /// Creates a comment, computing its nesting level from the parent.
    ///
    /// The parent lookup and the insert are separate statements: a
    /// parent soft-deleted between the check and the insert still
    /// yields an inserted row.
    pub async fn create_comment(
        &self,
        req: &CreateCommentRequest,
    ) -> Result<CreateCommentStatus, AppError> {
        let post = sqlx::query_scalar::<_, i64>("SELECT id FROM posts WHERE id = ?")
            .bind(req.post_id)
            .fetch_optional(&self.pool)
            .await?;

        if post.is_none() {
            return Ok(CreateCommentStatus::Rejected("Reply to unknown post"));
        }

        let mut nesting_level: i64 = 0;
        if req.parent_comment_id > 0 {
            // Parent lookup is scoped to the target post.
            let parent = sqlx::query_as::<_, Comment>(
                r#"
                SELECT
                    id, author, body, parent_comment_id, nesting_level,
                    is_deleted, created_date, updated_date, post_id
                FROM comments
                WHERE id = ? AND post_id = ?
                "#,
            )
            .bind(req.parent_comment_id)
            .bind(req.post_id)
            .fetch_optional(&self.pool)
            .await?;

            match parent {
                Some(parent) if !parent.is_deleted => nesting_level = parent.nesting_level + 1,
                _ => return Ok(CreateCommentStatus::Rejected("Reply to unknown comment")),
            }
        }

        sqlx::query(
            r#"
            INSERT INTO comments (author, body, parent_comment_id, nesting_level, post_id, created_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&req.author)
        .bind(&req.body)
        .bind(req.parent_comment_id)
        .bind(nesting_level)
        .bind(req.post_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create comment: {:?}", e);
            AppError::from(e)
        })?;

        Ok(CreateCommentStatus::Created)
    }

    /// Edits a comment body. Soft-deleted comments are not exempt.
    pub async fn update_comment(&self, req: &UpdateCommentRequest) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE comments SET body = ?, updated_date = ? WHERE id = ?")
            .bind(&req.new_body)
            .bind(Utc::now())
            .bind(req.id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Soft delete: scrubs author and body to the sentinels and marks
    /// the row. Only affects rows not already deleted, so a repeat call
    /// reports no row affected. The row itself is kept and replies to
    /// it stay where they are.
    pub async fn delete_comment(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET author = ?, body = ?, is_deleted = TRUE
            WHERE id = ? AND is_deleted = FALSE
            "#,
        )
        .bind(DELETED_AUTHOR)
        .bind(DELETED_BODY)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All direct replies to a comment, deleted ones included, in
    /// storage order. An unknown parent id simply yields an empty list.
    pub async fn get_children(&self, parent_comment_id: i64) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT
                id, author, body, parent_comment_id, nesting_level,
                is_deleted, created_date, updated_date, post_id
            FROM comments
            WHERE parent_comment_id = ?
            ORDER BY id
            "#,
        )
        .bind(parent_comment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}
