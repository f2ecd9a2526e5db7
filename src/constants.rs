// =============================================================================
// Session Keys
// =============================================================================

/// Session key holding the authenticated username
pub const SESSION_USERNAME_KEY: &str = "username";

/// Session key holding pending flash notices
pub const SESSION_FLASHES_KEY: &str = "_flashes";

// =============================================================================
// Field Limits
// =============================================================================

/// Column widths of the `users` table
pub const MAX_USERNAME_LEN: usize = 20;
pub const MAX_EMAIL_LEN: usize = 50;
pub const MAX_NAME_LEN: usize = 30;

/// Column width of `feedback.title`
pub const MAX_TITLE_LEN: usize = 100;

// =============================================================================
// Notices
// =============================================================================

pub const MSG_LOGIN_FIRST: &str = "Please login first!";

pub const MSG_REGISTERED: &str = "Welcome! Successfully Created Your Account!";

/// Shown for unknown usernames and wrong passwords alike
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid username/password";

pub const MSG_GOODBYE: &str = "Goodbye!";

pub const MSG_USER_DELETED: &str = "The user has been deleted";

pub const MSG_FEEDBACK_ADDED: &str = "Feedback added!";

pub const MSG_FEEDBACK_UPDATED: &str = "Feedback updated!";

pub const MSG_POST_DELETED: &str = "Post was deleted";

pub const MSG_POST_NOT_DELETED: &str = "Could not delete post";

// =============================================================================
// Error Messages
// =============================================================================

pub const ERR_USERNAME_TAKEN: &str = "Username taken. Please pick another";

pub const ERR_REQUIRED: &str = "This field is required.";

pub const ERR_INVALID_EMAIL: &str = "Invalid email address.";
