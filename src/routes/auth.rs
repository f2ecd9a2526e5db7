use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tower_sessions::Session;

use crate::constants::{ERR_USERNAME_TAKEN, MSG_GOODBYE, MSG_INVALID_CREDENTIALS, MSG_REGISTERED};
use crate::error::{AppError, Result};
use crate::models::User;
use crate::routes::user_path;
use crate::routes::validation::{FieldErrors, LoginForm, RegisterForm};
use crate::session::{self, flash, FlashLevel, PageContext};
use crate::views;
use crate::AppState;

/// `GET /`
pub async fn redirect_to_register() -> Redirect {
    Redirect::to("/register")
}

/// `GET /register`
pub async fn register_form(session: Session) -> Result<Response> {
    render_register(
        &session,
        StatusCode::OK,
        &RegisterForm::default(),
        &FieldErrors::default(),
    )
    .await
}

/// `POST /register`
///
/// On success the new user is logged in and sent to their page. Invalid
/// input and taken usernames re-render the form with field errors.
pub async fn register_user(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    if let Err(errors) = form.validate() {
        return render_register(&session, StatusCode::UNPROCESSABLE_ENTITY, &form, &errors).await;
    }

    let user = match User::register(&state.pool, form.to_new_user()).await {
        Ok(user) => user,
        Err(AppError::UserAlreadyExists) => {
            let mut errors = FieldErrors::default();
            errors.add("username", ERR_USERNAME_TAKEN);
            return render_register(&session, StatusCode::UNPROCESSABLE_ENTITY, &form, &errors)
                .await;
        }
        Err(e) => return Err(e),
    };

    session::log_in(&session, &user.username).await?;
    flash(&session, FlashLevel::Success, MSG_REGISTERED).await?;

    Ok(Redirect::to(&user_path(&user.username)).into_response())
}

async fn render_register(
    session: &Session,
    status: StatusCode,
    form: &RegisterForm,
    errors: &FieldErrors,
) -> Result<Response> {
    let page = PageContext::load(session).await?;
    Ok((status, Html(views::register_page(&page, form, errors))).into_response())
}

/// `GET /login`
pub async fn login_form(session: Session) -> Result<Response> {
    render_login(
        &session,
        StatusCode::OK,
        &LoginForm::default(),
        &FieldErrors::default(),
        None,
    )
    .await
}

/// `POST /login`
///
/// Unknown usernames and wrong passwords get the same response.
pub async fn login_user(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if let Err(errors) = form.validate() {
        return render_login(
            &session,
            StatusCode::UNPROCESSABLE_ENTITY,
            &form,
            &errors,
            None,
        )
        .await;
    }

    let Some(user) = User::authenticate(&state.pool, form.username.trim(), &form.password).await?
    else {
        return render_login(
            &session,
            StatusCode::UNAUTHORIZED,
            &form,
            &FieldErrors::default(),
            Some(MSG_INVALID_CREDENTIALS),
        )
        .await;
    };

    session::log_in(&session, &user.username).await?;
    flash(
        &session,
        FlashLevel::Primary,
        format!("Welcome Back, {}!", user.username),
    )
    .await?;

    Ok(Redirect::to(&user_path(&user.username)).into_response())
}

async fn render_login(
    session: &Session,
    status: StatusCode,
    form: &LoginForm,
    errors: &FieldErrors,
    notice: Option<&str>,
) -> Result<Response> {
    let page = PageContext::load(session).await?;
    Ok((status, Html(views::login_page(&page, form, errors, notice))).into_response())
}

/// `GET /logout`
pub async fn logout_user(session: Session) -> Result<Redirect> {
    if let Some(username) = session::log_out(&session).await? {
        tracing::info!("User logged out: {}", username);
    }
    flash(&session, FlashLevel::Info, MSG_GOODBYE).await?;

    Ok(Redirect::to("/"))
}
