//! Request payload validation helpers.
//!
//! Request bodies deserialize into structs of `Option` fields; handlers then
//! promote each field explicitly, so a missing or malformed value turns into
//! a field-level validation error instead of a generic deserialization
//! failure.

use chrono::{NaiveDate, NaiveTime};

use crate::error::ApiError;

/// Promote a required field, or fail with a per-field validation error
pub fn require<T>(field: &'static str, value: Option<T>) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::field_error(field, "This field is required"))
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ApiError::field_error(field, "Expected a date in YYYY-MM-DD format"))
}

/// Parse a `HH:MM:SS` time; seconds may be omitted
pub fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, ApiError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| ApiError::field_error(field, "Expected a time in HH:MM[:SS] format"))
}
