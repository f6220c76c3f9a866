// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Maximum username length.
pub const USERNAME_MAX_LEN: usize = 150;
/// Minimum username length.
pub const USERNAME_MIN_LEN: usize = 3;

/// Validates a username and returns it trimmed.
///
/// Usernames are 3 to 150 characters drawn from letters, digits and
/// `@ . + - _`.
///
/// # Errors
///
/// Returns `DomainError::InvalidUsername` describing the first rule broken.
pub fn validate_username(username: &str) -> Result<String, DomainError> {
    let trimmed: &str = username.trim();
    let len: usize = trimmed.chars().count();

    if len < USERNAME_MIN_LEN {
        return Err(DomainError::InvalidUsername {
            reason: format!("must be at least {USERNAME_MIN_LEN} characters"),
        });
    }
    if len > USERNAME_MAX_LEN {
        return Err(DomainError::InvalidUsername {
            reason: format!("must be at most {USERNAME_MAX_LEN} characters"),
        });
    }
    if let Some(bad) = trimmed
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')))
    {
        return Err(DomainError::InvalidUsername {
            reason: format!("character '{bad}' is not allowed"),
        });
    }

    Ok(trimmed.to_string())
}

/// Validates an email address and returns it trimmed.
///
/// The check is structural only: exactly one `@`, a non-empty local part,
/// and a domain containing a dot that neither starts nor ends the domain.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is malformed.
pub fn validate_email(email: &str) -> Result<String, DomainError> {
    let trimmed: &str = email.trim();
    let invalid = || DomainError::InvalidEmail(email.to_string());

    let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
        || trimmed.chars().any(char::is_whitespace)
    {
        return Err(invalid());
    }

    Ok(trimmed.to_string())
}

/// Validates a required text field, returning it trimmed.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` if the value is blank, or
/// `DomainError::FieldTooLong` if it exceeds `max` characters.
pub fn validate_required_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    if trimmed.chars().count() > max {
        return Err(DomainError::FieldTooLong { field, max });
    }
    Ok(trimmed.to_string())
}

/// Validates an optional text field. Blank input collapses to `None`.
///
/// # Errors
///
/// Returns `DomainError::FieldTooLong` if the value exceeds `max` characters.
pub fn validate_optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, DomainError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => {
            if trimmed.chars().count() > max {
                return Err(DomainError::FieldTooLong { field, max });
            }
            Ok(Some(trimmed.to_string()))
        }
    }
}

/// Validates that a quantity is strictly positive.
///
/// # Errors
///
/// Returns `DomainError::InvalidQuantity` if `value <= 0`.
pub const fn validate_quantity(field: &'static str, value: i64) -> Result<i64, DomainError> {
    if value <= 0 {
        return Err(DomainError::InvalidQuantity { field, value });
    }
    Ok(value)
}
