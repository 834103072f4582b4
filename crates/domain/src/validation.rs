// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;
use time::macros::format_description;

use crate::error::DomainError;

/// Validates the fields of a user directory entry.
///
/// # Arguments
///
/// * `user_id` - The identifier to register
/// * `name` - The display name
/// * `email` - The contact email
///
/// # Errors
///
/// Returns an error if:
/// - Any field is empty or whitespace
/// - The email has no `@` separating a local part and a domain
pub fn validate_user_fields(user_id: &str, name: &str, email: &str) -> Result<(), DomainError> {
    if user_id.trim().is_empty() {
        return Err(DomainError::InvalidInput {
            field: String::from("user_id"),
            message: String::from("User id cannot be empty"),
        });
    }

    if name.trim().is_empty() {
        return Err(DomainError::InvalidInput {
            field: String::from("name"),
            message: String::from("Name cannot be empty"),
        });
    }

    let well_formed: bool = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !well_formed {
        return Err(DomainError::InvalidInput {
            field: String::from("email"),
            message: format!("'{email}' is not a valid email address"),
        });
    }

    Ok(())
}

/// Trims comment text and rejects it if nothing remains.
///
/// # Errors
///
/// Returns `InvalidInput` if the text is empty or whitespace only.
pub fn normalize_comment_text(text: &str) -> Result<String, DomainError> {
    let trimmed: &str = text.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput {
            field: String::from("text"),
            message: String::from("Comment text cannot be empty"),
        });
    }
    Ok(trimmed.to_string())
}

/// Collapses a blank optional text field to `None`.
#[must_use]
pub fn normalize_optional_text(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
}

/// Earliest year a stored date may carry.
pub const MIN_CALENDAR_YEAR: i32 = 1;

/// Latest year a stored date may carry.
pub const MAX_CALENDAR_YEAR: i32 = 9999;

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// Only years `0001` through `9999` are accepted, so every stored date keeps
/// its four-digit text form and sorts chronologically as text.
///
/// # Errors
///
/// Returns `DateParseError` if the string is not a valid date, or
/// `InvalidInput` if its year falls outside the supported range.
pub fn parse_calendar_date(value: &str) -> Result<Date, DomainError> {
    let date: Date = Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|e| DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        })?;
    if !(MIN_CALENDAR_YEAR..=MAX_CALENDAR_YEAR).contains(&date.year()) {
        return Err(DomainError::InvalidInput {
            field: String::from("date"),
            message: format!(
                "Year {} is outside {MIN_CALENDAR_YEAR:04}..={MAX_CALENDAR_YEAR}",
                date.year()
            ),
        });
    }
    Ok(date)
}
