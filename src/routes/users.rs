use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};
use tower_sessions::Session;

use crate::constants::MSG_USER_DELETED;
use crate::error::Result;
use crate::models::{Feedback, User};
use crate::session::{self, flash, AuthUser, FlashLevel, PageContext};
use crate::views;
use crate::AppState;

/// `GET /users/:username`
///
/// Any logged-in user may view any user's page.
pub async fn show_user(
    State(state): State<AppState>,
    auth: AuthUser,
    session: Session,
    Path(username): Path<String>,
) -> Result<Html<String>> {
    tracing::debug!("{} viewing user page of {}", auth.username, username);

    let user = User::get(&state.pool, &username).await?;
    let posts = Feedback::for_user(&state.pool, &user.username).await?;
    let page = PageContext::load(&session).await?;

    Ok(Html(views::user_page(&page, &user, &posts)))
}

/// `POST /users/:username/delete`
///
/// Deletes the logged-in account regardless of the path segment. Feedback
/// goes with it through the foreign key cascade.
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    session: Session,
) -> Result<Redirect> {
    User::delete(&state.pool, &auth.username).await?;

    session::log_out(&session).await?;
    flash(&session, FlashLevel::Info, MSG_USER_DELETED).await?;

    Ok(Redirect::to("/"))
}
