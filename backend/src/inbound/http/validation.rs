//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every validation failure carries machine-readable `details` alongside
//! the human message so clients can highlight the offending field.

use serde_json::json;

use crate::domain::Error;

/// Error for a required field that was absent from the payload.
pub(crate) fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("{field} is required")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

/// Error for a field whose value could not be interpreted.
pub(crate) fn invalid_field_error(
    field: &str,
    value: impl Into<String>,
    code: &str,
    message: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "value": value.into(),
        "code": code,
    }))
}
