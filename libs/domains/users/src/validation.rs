use regex::Regex;
use std::sync::LazyLock;

use crate::error::{UserError, UserResult};
use crate::models::NewUser;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

pub const MSG_ALL_FIELDS_REQUIRED: &str = "All fields are required";
pub const MSG_NAME_EMPTY: &str = "Name cannot be empty";
pub const MSG_INVALID_EMAIL: &str = "Invalid email format";
pub const MSG_USER_ID_REQUIRED: &str = "User ID is required";

/// Validate and normalize create input.
///
/// Checks run in order and the first failure is returned. The email shape is
/// checked on the raw value, before lowercasing.
pub fn validate_new_user(name: &str, email: &str) -> UserResult<NewUser> {
    if name.is_empty() || email.is_empty() {
        return Err(UserError::InvalidArgument(MSG_ALL_FIELDS_REQUIRED.to_string()));
    }

    let name = name.trim();
    if name.is_empty() {
        return Err(UserError::InvalidArgument(MSG_NAME_EMPTY.to_string()));
    }

    if !EMAIL_SHAPE.is_match(email) {
        return Err(UserError::InvalidArgument(MSG_INVALID_EMAIL.to_string()));
    }

    Ok(NewUser {
        name: name.to_string(),
        email: email.to_lowercase(),
    })
}

/// Reject the zero id, which is what an unset id decodes to on the wire.
pub fn validate_user_id(id: i32) -> UserResult<i32> {
    if id == 0 {
        return Err(UserError::InvalidArgument(MSG_USER_ID_REQUIRED.to_string()));
    }
    Ok(id)
}
