use serde::Deserialize;
use std::collections::BTreeMap;

use crate::constants::{
    ERR_INVALID_EMAIL, ERR_REQUIRED, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_TITLE_LEN, MAX_USERNAME_LEN,
};
use crate::models::NewUser;

/// Field name -> messages, in field order for stable rendering
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert into a `Result` so callers can `?`-style branch on it
    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn required(errors: &mut FieldErrors, field: &'static str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.add(field, ERR_REQUIRED);
        return false;
    }
    true
}

fn max_len(errors: &mut FieldErrors, field: &'static str, value: &str, max: usize) {
    if value.trim().chars().count() > max {
        errors.add(field, format!("Field cannot be longer than {} characters.", max));
    }
}

/// Usernames end up in URL paths, so keep them to a path-safe alphabet
fn is_valid_username(username: &str) -> bool {
    username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Shape check only: `local@domain.tld`, no whitespace
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

// =============================================================================
// Forms
// =============================================================================

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if required(&mut errors, "username", &self.username) {
            max_len(&mut errors, "username", &self.username, MAX_USERNAME_LEN);
            if !is_valid_username(self.username.trim()) {
                errors.add(
                    "username",
                    "Usernames may only contain letters, digits, '.', '_' and '-'.",
                );
            }
        }

        required(&mut errors, "password", &self.password);

        if required(&mut errors, "email", &self.email) {
            max_len(&mut errors, "email", &self.email, MAX_EMAIL_LEN);
            if !is_valid_email(self.email.trim()) {
                errors.add("email", ERR_INVALID_EMAIL);
            }
        }

        if required(&mut errors, "first_name", &self.first_name) {
            max_len(&mut errors, "first_name", &self.first_name, MAX_NAME_LEN);
        }

        if required(&mut errors, "last_name", &self.last_name) {
            max_len(&mut errors, "last_name", &self.last_name, MAX_NAME_LEN);
        }

        errors.into_result()
    }

    /// Trimmed registration input; the password is taken as typed
    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        required(&mut errors, "username", &self.username);
        required(&mut errors, "password", &self.password);
        errors.into_result()
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct FeedbackForm {
    pub title: String,
    pub content: String,
}

impl FeedbackForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if required(&mut errors, "title", &self.title) {
            max_len(&mut errors, "title", &self.title, MAX_TITLE_LEN);
        }
        required(&mut errors, "content", &self.content);

        errors.into_result()
    }
}
