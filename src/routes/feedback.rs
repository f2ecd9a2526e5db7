use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tower_sessions::Session;

use crate::constants::{
    MSG_FEEDBACK_ADDED, MSG_FEEDBACK_UPDATED, MSG_POST_DELETED, MSG_POST_NOT_DELETED,
};
use crate::error::{AppError, Result};
use crate::models::Feedback;
use crate::routes::user_path;
use crate::routes::validation::{FeedbackForm, FieldErrors};
use crate::session::{flash, AuthUser, FlashLevel, PageContext};
use crate::views;
use crate::AppState;

/// Ids that don't parse can't name a post
fn parse_post_id(raw: &str) -> Result<i64> {
    raw.parse().map_err(|_| AppError::FeedbackNotFound)
}

async fn render_form(
    session: &Session,
    status: StatusCode,
    heading: &str,
    action: &str,
    form: &FeedbackForm,
    errors: &FieldErrors,
) -> Result<Response> {
    let page = PageContext::load(session).await?;
    Ok((
        status,
        Html(views::feedback_page(&page, heading, action, form, errors)),
    )
        .into_response())
}

/// `GET /users/:username/feedback/add`
pub async fn add_feedback_form(
    _auth: AuthUser,
    session: Session,
    Path(username): Path<String>,
) -> Result<Response> {
    render_form(
        &session,
        StatusCode::OK,
        "Add Feedback",
        &format!("/users/{}/feedback/add", username),
        &FeedbackForm::default(),
        &FieldErrors::default(),
    )
    .await
}

/// `POST /users/:username/feedback/add`
///
/// NOTE: only checks that someone is logged in; the post is attributed to
/// the path username even when that isn't the session user.
pub async fn add_feedback(
    State(state): State<AppState>,
    _auth: AuthUser,
    session: Session,
    Path(username): Path<String>,
    Form(form): Form<FeedbackForm>,
) -> Result<Response> {
    if let Err(errors) = form.validate() {
        return render_form(
            &session,
            StatusCode::UNPROCESSABLE_ENTITY,
            "Add Feedback",
            &format!("/users/{}/feedback/add", username),
            &form,
            &errors,
        )
        .await;
    }

    let post = Feedback::create(&state.pool, &username, form.title.trim(), &form.content).await?;
    flash(&session, FlashLevel::Success, MSG_FEEDBACK_ADDED).await?;

    Ok(Redirect::to(&user_path(&post.username)).into_response())
}

/// `GET /feedback/:post_id/edit`
pub async fn edit_feedback_form(
    State(state): State<AppState>,
    _auth: AuthUser,
    session: Session,
    Path(post_id): Path<String>,
) -> Result<Response> {
    let post = Feedback::get(&state.pool, parse_post_id(&post_id)?).await?;

    let form = FeedbackForm {
        title: post.title,
        content: post.content,
    };

    render_form(
        &session,
        StatusCode::OK,
        "Edit Feedback",
        &format!("/feedback/{}/edit", post.id),
        &form,
        &FieldErrors::default(),
    )
    .await
}

/// `POST /feedback/:post_id/edit`
///
/// Rewrites title and content, never the owner.
/// NOTE: does not compare the session user with the post owner.
pub async fn edit_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    session: Session,
    Path(post_id): Path<String>,
    Form(form): Form<FeedbackForm>,
) -> Result<Response> {
    let post = Feedback::get(&state.pool, parse_post_id(&post_id)?).await?;

    if let Err(errors) = form.validate() {
        return render_form(
            &session,
            StatusCode::UNPROCESSABLE_ENTITY,
            "Edit Feedback",
            &format!("/feedback/{}/edit", post.id),
            &form,
            &errors,
        )
        .await;
    }

    if !post.is_owned_by(&auth.username) {
        tracing::warn!(
            "Feedback {} owned by {} edited by {}",
            post.id,
            post.username,
            auth.username
        );
    }

    Feedback::update(&state.pool, post.id, form.title.trim(), &form.content).await?;
    flash(&session, FlashLevel::Success, MSG_FEEDBACK_UPDATED).await?;

    Ok(Redirect::to(&user_path(&auth.username)).into_response())
}

/// `POST /feedback/:post_id/delete`
///
/// Only the owner may delete; anyone else gets a notice and the post stays.
pub async fn delete_feedback(
    State(state): State<AppState>,
    auth: AuthUser,
    session: Session,
    Path(post_id): Path<String>,
) -> Result<Redirect> {
    let post = Feedback::get(&state.pool, parse_post_id(&post_id)?).await?;

    if post.is_owned_by(&auth.username) {
        Feedback::delete(&state.pool, post.id).await?;
        flash(&session, FlashLevel::Success, MSG_POST_DELETED).await?;
    } else {
        tracing::warn!(
            "User {} tried to delete feedback {} owned by {}",
            auth.username,
            post.id,
            post.username
        );
        flash(&session, FlashLevel::Danger, MSG_POST_NOT_DELETED).await?;
    }

    Ok(Redirect::to(&user_path(&auth.username)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_post_id() {
        assert_eq!(parse_post_id("42").unwrap(), 42);
        assert!(matches!(
            parse_post_id("abc"),
            Err(AppError::FeedbackNotFound)
        ));
        assert!(matches!(parse_post_id(""), Err(AppError::FeedbackNotFound)));
    }
}
