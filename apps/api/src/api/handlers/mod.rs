// HTTP handlers, one per (verb, resource) pair

pub mod auth;
pub mod courses;
pub mod reservations;
pub mod users;

use crate::api::errors::ApiError;

/// Validates a required body field
///
/// Missing fields and values rejected by `parse` both yield a 400.
pub(crate) fn required<T>(
    field: &str,
    value: Option<String>,
    parse: impl FnOnce(String) -> Result<T, String>,
) -> Result<T, ApiError> {
    let value = value.ok_or_else(|| ApiError::bad_request(format!("{} is required", field)))?;
    parse(value).map_err(|e| ApiError::bad_request(format!("{}: {}", field, e)))
}

/// Validates an optional body field, 400 if present but invalid
pub(crate) fn optional<T>(
    field: &str,
    value: Option<String>,
    parse: impl FnOnce(String) -> Result<T, String>,
) -> Result<Option<T>, ApiError> {
    value
        .map(|v| parse(v).map_err(|e| ApiError::bad_request(format!("{}: {}", field, e))))
        .transpose()
}
