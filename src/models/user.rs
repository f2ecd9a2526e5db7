use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::{AppError, Result};
use crate::models::first_row;
use crate::security::{hash_password, verify_against_dummy, verify_password};

/// User row from the `users` table
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Primary key
    pub username: String,
    /// Argon2id PHC string, never the plaintext
    #[serde(skip_serializing)]
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: NaiveDateTime,
}

/// Registration input, password still in plaintext
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Hash the password and insert a new user
    ///
    /// The primary key on `username` is the uniqueness check: a conflicting
    /// insert comes back as `AppError::UserAlreadyExists` and nothing is written.
    pub async fn register(pool: &SqlitePool, new_user: NewUser) -> Result<User> {
        let NewUser {
            username,
            password,
            email,
            first_name,
            last_name,
        } = new_user;

        let hashed = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        let result = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password, email, first_name, last_name)
             VALUES (?, ?, ?, ?, ?)
             RETURNING username, password, email, first_name, last_name, created_at",
        )
        .bind(&username)
        .bind(&hashed)
        .bind(&email)
        .bind(&first_name)
        .bind(&last_name)
        .fetch_all(pool)
        .await
        .map(first_row);

        match result {
            Ok(Some(user)) => {
                tracing::info!("New user registered: {}", user.username);
                Ok(user)
            }
            Ok(None) => Err(sqlx::Error::RowNotFound.into()),
            Err(e) if is_unique_violation(&e) => {
                tracing::info!("Registration rejected, username exists: {}", username);
                Err(AppError::UserAlreadyExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check a username/password pair
    ///
    /// Returns `None` for an unknown username and for a wrong password alike.
    pub async fn authenticate(
        pool: &SqlitePool,
        username: &str,
        password: &str,
    ) -> Result<Option<User>> {
        let password = password.to_string();

        let Some(user) = Self::find(pool, username).await? else {
            tokio::task::spawn_blocking(move || verify_against_dummy(&password)).await?;
            tracing::info!("Failed login attempt");
            return Ok(None);
        };

        let stored = user.password.clone();
        let valid =
            tokio::task::spawn_blocking(move || verify_password(&password, &stored)).await??;

        if valid {
            Ok(Some(user))
        } else {
            tracing::info!("Failed login attempt");
            Ok(None)
        }
    }

    pub async fn find(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, password, email, first_name, last_name, created_at
             FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Like `find`, but a missing user is an error
    pub async fn get(pool: &SqlitePool, username: &str) -> Result<User> {
        Self::find(pool, username)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    /// Delete a user; their feedback goes with them via `ON DELETE CASCADE`
    pub async fn delete(pool: &SqlitePool, username: &str) -> Result<()> {
        let rows = sqlx::query("DELETE FROM users WHERE username = ?")
            .bind(username)
            .execute(pool)
            .await?
            .rows_affected();

        if rows == 0 {
            tracing::warn!("Delete attempt for non-existent user: {}", username);
            return Err(AppError::UserNotFound);
        }

        tracing::info!("User and all associated feedback deleted: {}", username);
        Ok(())
    }
}

/// SQLite reports both UNIQUE and PRIMARY KEY conflicts with this message
fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.is_unique_violation() || db.message().contains("UNIQUE constraint failed")
        }
        _ => false,
    }
}
