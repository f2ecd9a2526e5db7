//! Session identity and flash notices
//!
//! The authenticated username lives under [`SESSION_USERNAME_KEY`] in the
//! `tower-sessions` session. Handlers never read it directly: protected
//! routes take an [`AuthUser`] argument, which is the session gate.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::{session, Session};

use crate::constants::{MSG_LOGIN_FIRST, SESSION_FLASHES_KEY, SESSION_USERNAME_KEY};
use crate::error::AppError;

// =============================================================================
// Flash Notices
// =============================================================================

/// Notice category, used as the CSS class of the rendered message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Primary,
    Info,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Primary => "primary",
            FlashLevel::Info => "info",
            FlashLevel::Danger => "danger",
        }
    }
}

/// One-shot message shown on the next rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Queue a notice for the next rendered page
pub async fn flash(
    session: &Session,
    level: FlashLevel,
    message: impl Into<String>,
) -> Result<(), session::Error> {
    let mut flashes: Vec<Flash> = session.get(SESSION_FLASHES_KEY).await?.unwrap_or_default();
    flashes.push(Flash {
        level,
        message: message.into(),
    });
    session.insert(SESSION_FLASHES_KEY, flashes).await
}

/// Drain pending notices
pub async fn take_flashes(session: &Session) -> Result<Vec<Flash>, session::Error> {
    Ok(session
        .remove::<Vec<Flash>>(SESSION_FLASHES_KEY)
        .await?
        .unwrap_or_default())
}

// =============================================================================
// Session Identity
// =============================================================================

pub async fn current_username(session: &Session) -> Result<Option<String>, session::Error> {
    session.get(SESSION_USERNAME_KEY).await
}

/// Establish `username` as the session identity
///
/// The session id is rotated first so a pre-login id can't be reused.
pub async fn log_in(session: &Session, username: &str) -> Result<(), session::Error> {
    session.cycle_id().await?;
    session.insert(SESSION_USERNAME_KEY, username).await
}

/// Clear the session identity, returning who was logged in
pub async fn log_out(session: &Session) -> Result<Option<String>, session::Error> {
    session.remove::<String>(SESSION_USERNAME_KEY).await
}

/// What every rendered page needs from the session
#[derive(Debug, Default)]
pub struct PageContext {
    pub username: Option<String>,
    pub flashes: Vec<Flash>,
}

impl PageContext {
    /// Read the identity and drain the flashes
    pub async fn load(session: &Session) -> Result<Self, session::Error> {
        Ok(Self {
            username: current_username(session).await?,
            flashes: take_flashes(session).await?,
        })
    }
}

// =============================================================================
// Session Gate
// =============================================================================

/// The authenticated identity of the current request
///
/// Extracting this is the login check: without a username in the session
/// the request is answered with a notice and a redirect to `/`, before the
/// handler body (and any data access) runs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match current_username(&session).await {
            Ok(Some(username)) => Ok(AuthUser { username }),
            Ok(None) => {
                tracing::debug!("Unauthenticated request to {}", parts.uri.path());
                flash(&session, FlashLevel::Danger, MSG_LOGIN_FIRST)
                    .await
                    .map_err(|e| AppError::from(e).into_response())?;
                Err(Redirect::to("/").into_response())
            }
            Err(e) => Err(AppError::from(e).into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn new_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_flashes_drain_in_order() {
        let session = new_session();

        flash(&session, FlashLevel::Success, "first").await.unwrap();
        flash(&session, FlashLevel::Danger, "second").await.unwrap();

        let flashes = take_flashes(&session).await.unwrap();
        assert_eq!(flashes.len(), 2);
        assert_eq!(flashes[0].message, "first");
        assert_eq!(flashes[1].level, FlashLevel::Danger);

        // Taken once, gone
        assert!(take_flashes(&session).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_log_in_and_out() {
        let session = new_session();
        assert_eq!(current_username(&session).await.unwrap(), None);

        log_in(&session, "alice").await.unwrap();
        assert_eq!(
            current_username(&session).await.unwrap().as_deref(),
            Some("alice")
        );

        assert_eq!(log_out(&session).await.unwrap().as_deref(), Some("alice"));
        assert_eq!(current_username(&session).await.unwrap(), None);
        // Logging out twice is harmless
        assert_eq!(log_out(&session).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_page_context_takes_flashes() {
        let session = new_session();
        log_in(&session, "alice").await.unwrap();
        flash(&session, FlashLevel::Info, "hello").await.unwrap();

        let page = PageContext::load(&session).await.unwrap();
        assert_eq!(page.username.as_deref(), Some("alice"));
        assert_eq!(page.flashes.len(), 1);

        let page = PageContext::load(&session).await.unwrap();
        assert!(page.flashes.is_empty());
    }

    #[test]
    fn test_flash_level_names() {
        assert_eq!(FlashLevel::Success.as_str(), "success");
        assert_eq!(
            serde_json::to_string(&FlashLevel::Danger).unwrap(),
            "\"danger\""
        );
    }
}
