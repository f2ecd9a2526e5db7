pub mod auth;
pub mod feedback;
pub mod health;
pub mod users;
pub mod validation;

pub use auth::{
    login_form, login_user, logout_user, redirect_to_register, register_form, register_user,
};
pub use feedback::{
    add_feedback, add_feedback_form, delete_feedback, edit_feedback, edit_feedback_form,
};
pub use health::health_check;
pub use users::{delete_user, show_user};

use axum::{
    routing::{get, post},
    Router,
};
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::AppState;

/// Path of a user's detail page
pub fn user_path(username: &str) -> String {
    format!("/users/{}", username)
}

/// Build the application router
///
/// Sessions live in an in-memory store owned by the returned router, so
/// clones of it share logins.
pub fn router(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.config.secure_cookies())
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            state.config.session_inactivity_secs,
        )));

    let log_requests = state.config.log_requests;

    let app = Router::new()
        .route("/", get(redirect_to_register))
        .route("/register", get(register_form).post(register_user))
        .route("/login", get(login_form).post(login_user))
        .route("/logout", get(logout_user))
        .route("/users/:username", get(show_user))
        .route("/users/:username/delete", post(delete_user))
        .route(
            "/users/:username/feedback/add",
            get(add_feedback_form).post(add_feedback),
        )
        .route(
            "/feedback/:post_id/edit",
            get(edit_feedback_form).post(edit_feedback),
        )
        .route("/feedback/:post_id/delete", post(delete_feedback))
        .route("/health", get(health_check))
        .layer(session_layer)
        .with_state(state);

    if log_requests {
        app.layer(TraceLayer::new_for_http())
    } else {
        app
    }
}
