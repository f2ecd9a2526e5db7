//! Server-side HTML pages
//!
//! Every value that came from a user goes through [`escape`] before it is
//! interpolated.

use axum::http::StatusCode;
use std::fmt::Write;

use crate::models::{Feedback, User};
use crate::routes::validation::{FeedbackForm, FieldErrors, LoginForm, RegisterForm};
use crate::session::PageContext;

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

fn layout(title: &str, page: &PageContext, body: &str) -> String {
    let mut nav = String::new();
    match &page.username {
        Some(username) => {
            let username = escape(username);
            let _ = write!(
                nav,
                r#"<a href="/users/{username}">{username}</a> <a href="/logout">Logout</a>"#
            );
        }
        None => nav.push_str(r#"<a href="/login">Login</a> <a href="/register">Register</a>"#),
    }

    let mut flashes = String::new();
    for flash in &page.flashes {
        let _ = write!(
            flashes,
            r#"<div class="alert alert-{}">{}</div>"#,
            flash.level.as_str(),
            escape(&flash.message)
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} | Feedback</title>
</head>
<body>
<nav>{nav}</nav>
<main>
{flashes}
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

fn field_errors(errors: &FieldErrors, field: &str) -> String {
    errors
        .get(field)
        .iter()
        .map(|message| format!(r#"<small class="error">{}</small>"#, escape(message)))
        .collect()
}

fn input(label: &str, name: &str, kind: &str, value: &str, errors: &FieldErrors) -> String {
    format!(
        r#"<p><label for="{name}">{label}</label>
<input id="{name}" name="{name}" type="{kind}" value="{value}">{errors}</p>
"#,
        value = escape(value),
        errors = field_errors(errors, name),
    )
}

fn textarea(label: &str, name: &str, value: &str, errors: &FieldErrors) -> String {
    format!(
        r#"<p><label for="{name}">{label}</label>
<textarea id="{name}" name="{name}">{value}</textarea>{errors}</p>
"#,
        value = escape(value),
        errors = field_errors(errors, name),
    )
}

pub fn register_page(page: &PageContext, form: &RegisterForm, errors: &FieldErrors) -> String {
    let body = format!(
        r#"<h1>Register</h1>
<form method="POST" action="/register">
{}{}{}{}{}<button type="submit">Register</button>
</form>"#,
        input("Username", "username", "text", &form.username, errors),
        // Never echo a password back
        input("Password", "password", "password", "", errors),
        input("Email", "email", "email", &form.email, errors),
        input("First Name", "first_name", "text", &form.first_name, errors),
        input("Last Name", "last_name", "text", &form.last_name, errors),
    );
    layout("Register", page, &body)
}

pub fn login_page(
    page: &PageContext,
    form: &LoginForm,
    errors: &FieldErrors,
    notice: Option<&str>,
) -> String {
    let notice = notice
        .map(|n| format!(r#"<div class="alert alert-danger">{}</div>"#, escape(n)))
        .unwrap_or_default();

    let body = format!(
        r#"<h1>Login</h1>
{notice}
<form method="POST" action="/login">
{}{}<button type="submit">Login</button>
</form>"#,
        input("Username", "username", "text", &form.username, errors),
        input("Password", "password", "password", "", errors),
    );
    layout("Login", page, &body)
}

pub fn user_page(page: &PageContext, user: &User, posts: &[Feedback]) -> String {
    let username = escape(&user.username);

    let mut list = String::new();
    for post in posts {
        let _ = write!(
            list,
            r#"<li>
<h3>{title}</h3>
<p>{content}</p>
<a href="/feedback/{id}/edit">Edit</a>
<form method="POST" action="/feedback/{id}/delete"><button type="submit">Delete</button></form>
</li>
"#,
            id = post.id,
            title = escape(&post.title),
            content = escape(&post.content),
        );
    }
    if list.is_empty() {
        list.push_str("<li>No feedback yet.</li>\n");
    }

    let body = format!(
        r#"<h1>{username}</h1>
<ul class="user-info">
<li>Name: {name}</li>
<li>Email: {email}</li>
</ul>
<h2>Feedback</h2>
<ul class="feedback">
{list}</ul>
<a href="/users/{username}/feedback/add">Add Feedback</a>
<form method="POST" action="/users/{username}/delete"><button type="submit">Delete Account</button></form>"#,
        name = escape(&user.full_name()),
        email = escape(&user.email),
    );
    layout(&user.username, page, &body)
}

/// Shared by the add and edit routes; `action` is the form's POST target
pub fn feedback_page(
    page: &PageContext,
    heading: &str,
    action: &str,
    form: &FeedbackForm,
    errors: &FieldErrors,
) -> String {
    let body = format!(
        r#"<h1>{heading}</h1>
<form method="POST" action="{action}">
{}{}<button type="submit">Save</button>
</form>"#,
        input("Title", "title", "text", &form.title, errors),
        textarea("Content", "content", &form.content, errors),
        heading = escape(heading),
        action = escape(action),
    );
    layout(heading, page, &body)
}

/// Bare error page; used where no session is at hand
pub fn error_page(status: StatusCode, message: &str) -> String {
    layout(
        status.canonical_reason().unwrap_or("Error"),
        &PageContext::default(),
        &format!(
            "<h1>{}</h1>\n<p>{}</p>\n<a href=\"/\">Home</a>",
            status.as_u16(),
            escape(message)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Flash, FlashLevel};

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(
            escape(r#"<script>alert("x's")</script> & more"#),
            "&lt;script&gt;alert(&quot;x&#x27;s&quot;)&lt;/script&gt; &amp; more"
        );
    }

    #[test]
    fn test_layout_shows_flashes_and_nav() {
        let page = PageContext {
            username: Some("alice".to_string()),
            flashes: vec![Flash {
                level: FlashLevel::Success,
                message: "<b>hi</b>".to_string(),
            }],
        };

        let html = layout("Title", &page, "<p>body</p>");
        assert!(html.contains(r#"<div class="alert alert-success">&lt;b&gt;hi&lt;/b&gt;</div>"#));
        assert!(html.contains(r#"href="/logout""#));
        assert!(html.contains("<p>body</p>"));

        let html = layout("Title", &PageContext::default(), "");
        assert!(html.contains(r#"href="/login""#));
        assert!(!html.contains("alert"));
    }

    #[test]
    fn test_register_page_keeps_values_but_not_password() {
        let form = RegisterForm {
            username: "alice".to_string(),
            password: "secret1".to_string(),
            email: "a@x.com".to_string(),
            ..Default::default()
        };
        let mut errors = FieldErrors::default();
        errors.add("username", "Username taken. Please pick another");

        let html = register_page(&PageContext::default(), &form, &errors);
        assert!(html.contains(r#"value="alice""#));
        assert!(html.contains(r#"value="a@x.com""#));
        assert!(!html.contains("secret1"));
        assert!(html.contains("Username taken. Please pick another"));
    }

    #[test]
    fn test_login_page_notice() {
        let html = login_page(
            &PageContext::default(),
            &LoginForm::default(),
            &FieldErrors::default(),
            Some("Invalid username/password"),
        );
        assert!(html.contains("Invalid username/password"));
    }

    #[test]
    fn test_feedback_page_escapes_content() {
        let form = FeedbackForm {
            title: "Hi".to_string(),
            content: "</textarea><script>".to_string(),
        };

        let html = feedback_page(
            &PageContext::default(),
            "Edit Feedback",
            "/feedback/1/edit",
            &form,
            &FieldErrors::default(),
        );
        assert!(html.contains(r#"action="/feedback/1/edit""#));
        assert!(html.contains("&lt;/textarea&gt;&lt;script&gt;"));
        assert!(!html.contains("</textarea><script>"));
    }

    #[test]
    fn test_error_page() {
        let html = error_page(StatusCode::NOT_FOUND, "Feedback not found");
        assert!(html.contains("<h1>404</h1>"));
        assert!(html.contains("Feedback not found"));
    }
}
