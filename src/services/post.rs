use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::post::{CreatePostRequest, PostResponse, UpdatePostRequest},
};

/// Post CRUD over the shared connection pool.
///
/// The pool is the session factory: every statement checks a connection
/// out and hands it back on all exit paths.
#[derive(Clone)]
pub struct PostService {
    pool: SqlitePool,
}

impl PostService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetches a post projection by id, with the size of its comment
    /// collection (soft-deleted rows included). `None` means not found.
    pub async fn get_post(&self, id: i64) -> Result<Option<PostResponse>, AppError> {
        let post = sqlx::query_as::<_, PostResponse>(
            r#"
            SELECT
                p.id, p.title, p.created_date, p.updated_date,
                (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS count_of_comments
            FROM posts p
            WHERE p.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    pub async fn create_post(&self, req: &CreatePostRequest) -> Result<(), AppError> {
        sqlx::query("INSERT INTO posts (title, article, created_date) VALUES (?, ?, ?)")
            .bind(&req.title)
            .bind(&req.article)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create post: {:?}", e);
                AppError::from(e)
            })?;

        Ok(())
    }

    /// Overwrites the provided fields and stamps `updated_date`.
    /// Returns whether a row was affected (false means not found).
    pub async fn update_post(&self, req: &UpdatePostRequest) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = COALESCE(?, title),
                article = COALESCE(?, article),
                updated_date = ?
            WHERE id = ?
            "#,
        )
        .bind(&req.new_title)
        .bind(&req.new_article)
        .bind(Utc::now())
        .bind(req.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Hard delete. Comments go with the post via the FK cascade.
    pub async fn delete_post(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
