use std::borrow::Cow;
use validator::{Validate, ValidationError};

pub fn validate<T: Validate>(val: &T) -> Result<(), validator::ValidationErrors> {
    val.validate()
}

/// Usernames consist of ASCII letters, digits, dash and underscore.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let valid = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("username_charset");
        err.message = Some(Cow::from(
            "A username consists of alphabets, digits, dash and underscore.",
        ));
        Err(err)
    }
}
