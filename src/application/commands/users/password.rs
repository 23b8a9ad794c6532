use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::user::Username;

const PASSWORD_LEN: std::ops::RangeInclusive<usize> = 10..=128;

/// Long enough to resist guessing, short enough to keep hashing cheap, mixing
/// letters with digits, and not built around the username.
pub(super) fn validate_password(username: &Username, password: &str) -> ApplicationResult<()> {
    let length = password.chars().count();
    if !PASSWORD_LEN.contains(&length) {
        return Err(ApplicationError::validation(format!(
            "password must be {} to {} characters",
            PASSWORD_LEN.start(),
            PASSWORD_LEN.end()
        )));
    }

    let has_letter = password.chars().any(char::is_alphabetic);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_letter && has_digit) {
        return Err(ApplicationError::validation(
            "password must contain both letters and digits",
        ));
    }

    if password
        .to_lowercase()
        .contains(&username.as_str().to_lowercase())
    {
        return Err(ApplicationError::validation(
            "password must not contain the username",
        ));
    }

    Ok(())
}
