//! Built-in validators for the common field types.

use regex::Regex;

use super::result::ValidationResult;
use super::validator::{Validator, from_predicate};
use crate::error::BinderError;

// String rules

/// Require non-blank text.
pub fn required(msg: impl Into<String>) -> impl Validator<String> {
    from_predicate(|v: &String| !v.trim().is_empty(), msg)
}

/// Require at least `min` characters.
pub fn min_length(min: usize, msg: impl Into<String>) -> impl Validator<String> {
    from_predicate(move |v: &String| v.chars().count() >= min, msg)
}

/// Require at most `max` characters.
pub fn max_length(max: usize, msg: impl Into<String>) -> impl Validator<String> {
    from_predicate(move |v: &String| v.chars().count() <= max, msg)
}

/// Require the text to match a regular expression.
///
/// Fails with [`BinderError::InvalidPattern`] if `pattern` does not compile.
pub fn pattern(
    pattern: &str,
    msg: impl Into<String>,
) -> Result<impl Validator<String>, BinderError> {
    let re = Regex::new(pattern)?;
    Ok(from_predicate(move |v: &String| re.is_match(v), msg))
}

/// Require a valid email address. Empty text passes; combine with
/// [`required`] to reject it.
pub fn email(msg: impl Into<String>) -> impl Validator<String> {
    from_predicate(
        |v: &String| v.is_empty() || email_address::EmailAddress::is_valid(v),
        msg,
    )
}

/// Require the text to contain `substr`.
pub fn contains(substr: impl Into<String>, msg: impl Into<String>) -> impl Validator<String> {
    let substr = substr.into();
    from_predicate(move |v: &String| v.contains(&substr), msg)
}

/// Pass every value, trimmed of surrounding whitespace.
pub fn trimmed() -> impl Validator<String> {
    |v: String| ValidationResult::Ok(v.trim().to_string())
}

// Bool rules

/// Require a checked checkbox.
pub fn checked(msg: impl Into<String>) -> impl Validator<bool> {
    from_predicate(|v: &bool| *v, msg)
}

// Option rules

/// Require a value to be present.
pub fn present<T: Send + Sync + 'static>(msg: impl Into<String>) -> impl Validator<Option<T>> {
    from_predicate(|v: &Option<T>| v.is_some(), msg)
}

/// Require a number within `min..=max`. An absent number passes; combine
/// with [`present`] to reject it.
pub fn in_range(min: i64, max: i64, msg: impl Into<String>) -> impl Validator<Option<i64>> {
    from_predicate(
        move |v: &Option<i64>| v.is_none_or(|n| (min..=max).contains(&n)),
        msg,
    )
}
