use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::{AppError, Result};
use crate::models::first_row;

/// Feedback post row from the `feedback` table
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Feedback {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Owning user, fixed at creation
    pub username: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

const COLUMNS: &str = "id, title, content, username, created_at, updated_at";

impl Feedback {
    /// Ownership check used to gate deletion
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.username == username
    }

    /// Insert a post attributed to `username`
    ///
    /// Fails with `UserNotFound` when no such user exists.
    pub async fn create(
        pool: &SqlitePool,
        username: &str,
        title: &str,
        content: &str,
    ) -> Result<Feedback> {
        let result = sqlx::query_as::<_, Feedback>(&format!(
            "INSERT INTO feedback (title, content, username) VALUES (?, ?, ?) RETURNING {COLUMNS}"
        ))
        .bind(title)
        .bind(content)
        .bind(username)
        .fetch_all(pool)
        .await
        .map(first_row);

        match result {
            Ok(Some(post)) => {
                tracing::info!("Feedback {} created by {}", post.id, post.username);
                Ok(post)
            }
            Ok(None) => Err(sqlx::Error::RowNotFound.into()),
            Err(e) if is_foreign_key_violation(&e) => {
                tracing::warn!("Feedback for non-existent user: {}", username);
                Err(AppError::UserNotFound)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Feedback>> {
        let post = sqlx::query_as::<_, Feedback>(&format!(
            "SELECT {COLUMNS} FROM feedback WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(post)
    }

    /// Like `find`, but a missing post is an error
    pub async fn get(pool: &SqlitePool, id: i64) -> Result<Feedback> {
        Self::find(pool, id).await?.ok_or(AppError::FeedbackNotFound)
    }

    /// All posts owned by `username`, oldest first
    pub async fn for_user(pool: &SqlitePool, username: &str) -> Result<Vec<Feedback>> {
        let posts = sqlx::query_as::<_, Feedback>(&format!(
            "SELECT {COLUMNS} FROM feedback WHERE username = ? ORDER BY id"
        ))
        .bind(username)
        .fetch_all(pool)
        .await?;

        Ok(posts)
    }

    /// Overwrite title and content; the owner is left alone
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        title: &str,
        content: &str,
    ) -> Result<Feedback> {
        let rows = sqlx::query_as::<_, Feedback>(&format!(
            "UPDATE feedback SET title = ?, content = ?, updated_at = CURRENT_TIMESTAMP
             WHERE id = ? RETURNING {COLUMNS}"
        ))
        .bind(title)
        .bind(content)
        .bind(id)
        .fetch_all(pool)
        .await?;

        first_row(rows).ok_or(AppError::FeedbackNotFound)
    }

    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
        let rows = sqlx::query("DELETE FROM feedback WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::FeedbackNotFound);
        }

        tracing::info!("Feedback {} deleted", id);
        Ok(())
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.is_foreign_key_violation() || db.message().contains("FOREIGN KEY constraint failed")
        }
        _ => false,
    }
}
