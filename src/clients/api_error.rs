//! Classification of API rejections.
//!
//! An error body such as
//! `{"message": "Validation Failed", "errors": [{"code": "missing_field", "field": "title"}]}`
//! is decoded into a [`RequestError`] and combined with the HTTP status into a
//! [`ClassifiedError`] whose message is computed once, at construction.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Error code for a field holding an invalid value.
pub const CODE_INVALID: &str = "invalid";
/// Error code for a required field that was not supplied.
pub const CODE_MISSING_FIELD: &str = "missing_field";
/// Error code for a resource that already exists.
pub const CODE_ALREADY_EXISTS: &str = "already_exists";

/// One record of the `errors` array in an error body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldError {
    /// Machine-readable error code, e.g. `invalid`.
    pub code: Option<String>,
    /// Name of the offending field.
    pub field: Option<String>,
    /// Name of the resource the field belongs to.
    pub resource: Option<String>,
    /// The rejected value, if reported. Non-string values are kept as JSON text.
    #[serde(deserialize_with = "lenient_string")]
    pub value: Option<String>,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

/// Decoded error body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestError {
    /// Top-level message, e.g. `Validation Failed`.
    pub message: Option<String>,
    /// Per-field error records, in the order the server listed them.
    pub errors: Vec<FieldError>,
}

/// Kind of a failed call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A field held an invalid value.
    FieldInvalid,
    /// A required field was missing.
    FieldMissing,
    /// The resource already exists.
    ResourceExists,
    /// Some other field-level error.
    FieldGeneric,
    /// The connection failed or the status was unclassified.
    Transport,
    /// No field-level detail is available.
    Unknown,
}

impl ErrorKind {
    fn of(record: &FieldError) -> Self {
        match record.code.as_deref() {
            Some(CODE_INVALID) => Self::FieldInvalid,
            Some(CODE_MISSING_FIELD) => Self::FieldMissing,
            Some(CODE_ALREADY_EXISTS) => Self::ResourceExists,
            _ => Self::FieldGeneric,
        }
    }
}

/// An API rejection: a classified status plus its decoded error body.
///
/// The message is stable and meant to be shown as-is. With field records it
/// holds one line per record, in order; without records it is
/// `"{status}: {message}"`.
///
/// # Example
///
/// ```rust
/// use github_api::clients::{ClassifiedError, ErrorKind, FieldError, RequestError};
///
/// let body = RequestError {
///     message: Some("Validation Failed".to_string()),
///     errors: vec![FieldError {
///         code: Some("missing_field".to_string()),
///         field: Some("due".to_string()),
///         ..FieldError::default()
///     }],
/// };
///
/// let error = ClassifiedError::new(422, body);
/// assert_eq!(error.kind(), ErrorKind::FieldMissing);
/// assert_eq!(error.message(), "422: Missing required field 'due'");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ClassifiedError {
    status: u16,
    kind: ErrorKind,
    field: Option<String>,
    resource: Option<String>,
    value: Option<String>,
    error: RequestError,
    message: String,
}

impl ClassifiedError {
    /// Classifies an error body received with `status`.
    ///
    /// Kind, field, resource and value are taken from the first record.
    #[must_use]
    pub fn new(status: u16, error: RequestError) -> Self {
        let message = format_errors(status, &error);
        let first = error.errors.first();

        Self {
            status,
            kind: first.map_or(ErrorKind::Unknown, ErrorKind::of),
            field: first.and_then(|r| r.field.clone()),
            resource: first.and_then(|r| r.resource.clone()),
            value: first.and_then(|r| r.value.clone()),
            error,
            message,
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the offending field of the first record.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the resource of the first record.
    #[must_use]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Returns the rejected value of the first record.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the decoded error body.
    #[must_use]
    pub const fn error(&self) -> &RequestError {
        &self.error
    }

    /// Returns the formatted message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Formats every record of `error` as one line.
///
/// Falls back to the top-level message when there are no records.
#[must_use]
pub fn format_errors(status: u16, error: &RequestError) -> String {
    if error.errors.is_empty() {
        return format!("{status}: {}", error.message.as_deref().unwrap_or_default());
    }

    let mut message = String::new();
    for (i, record) in error.errors.iter().enumerate() {
        if i > 0 {
            message.push('\n');
        }
        format_record(&mut message, status, record);
    }
    message
}

fn format_record(out: &mut String, status: u16, record: &FieldError) {
    let field = record.field.as_deref().unwrap_or_default();
    let resource = record.resource.as_deref().unwrap_or_default();

    let line = match (record.code.as_deref(), record.value.as_deref()) {
        (Some(CODE_INVALID), Some(value)) => {
            format!("{status}: Invalid value of '{value}' for field '{field}'")
        }
        (Some(CODE_INVALID), None) => format!("{status}: Invalid value for field '{field}'"),
        (Some(CODE_MISSING_FIELD), _) => format!("{status}: Missing required field '{field}'"),
        (Some(CODE_ALREADY_EXISTS), _) => {
            format!("{status}: {resource} resource with field '{field}' already exists")
        }
        _ => format!("{status}: Error with field '{field}' in {resource} resource"),
    };
    out.push_str(&line);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(status: u16, body: &str) -> ClassifiedError {
        ClassifiedError::new(status, serde_json::from_str(body).unwrap())
    }

    #[test]
    fn test_invalid_field() {
        let error = classify(400, r#"{"errors":[{"code":"invalid", "field":"page"}]}"#);
        assert_eq!(error.message(), "400: Invalid value for field 'page'");
        assert_eq!(error.kind(), ErrorKind::FieldInvalid);
        assert_eq!(error.field(), Some("page"));
    }

    #[test]
    fn test_invalid_field_value() {
        let error = classify(
            401,
            r#"{"errors":[{"code":"invalid", "field":"name", "value":"100"}]}"#,
        );
        assert_eq!(error.message(), "401: Invalid value of '100' for field 'name'");
        assert_eq!(error.value(), Some("100"));
    }

    #[test]
    fn test_missing_field() {
        let error = classify(422, r#"{"errors":[{"code":"missing_field", "field":"due"}]}"#);
        assert_eq!(error.message(), "422: Missing required field 'due'");
        assert_eq!(error.kind(), ErrorKind::FieldMissing);
    }

    #[test]
    fn test_existent_field() {
        let error = classify(
            500,
            r#"{"errors":[{"code":"already_exists", "field":"severity", "resource":"Issue"}]}"#,
        );
        assert_eq!(
            error.message(),
            "500: Issue resource with field 'severity' already exists"
        );
        assert_eq!(error.kind(), ErrorKind::ResourceExists);
        assert_eq!(error.resource(), Some("Issue"));
    }

    #[test]
    fn test_generic_field_error() {
        let error = classify(400, r#"{"errors":[{"field":"priority", "resource":"Gist"}]}"#);
        assert_eq!(
            error.message(),
            "400: Error with field 'priority' in Gist resource"
        );
        assert_eq!(error.kind(), ErrorKind::FieldGeneric);
    }

    #[test]
    fn test_multiple_records_are_newline_joined_in_order() {
        let error = classify(
            422,
            r#"{"message":"Validation Failed","errors":[
                {"code":"missing_field","field":"title"},
                {"code":"invalid","field":"state","value":"maybe"}
            ]}"#,
        );
        assert_eq!(
            error.message(),
            "422: Missing required field 'title'\n422: Invalid value of 'maybe' for field 'state'"
        );
        assert_eq!(error.kind(), ErrorKind::FieldMissing);
        assert_eq!(error.to_string(), error.message());
    }

    #[test]
    fn test_body_without_records_uses_top_level_message() {
        let error = classify(404, r#"{"message":"Not Found"}"#);
        assert_eq!(error.message(), "404: Not Found");
        assert_eq!(error.kind(), ErrorKind::Unknown);
        assert_eq!(error.field(), None);
        assert_eq!(error.status(), 404);
    }

    #[test]
    fn test_unknown_record_fields_are_ignored() {
        let error = classify(
            422,
            r#"{"errors":[{"code":"custom","field":"x","resource":"Repo","message":"nope"}],
                "documentation_url":"https://example.com"}"#,
        );
        assert_eq!(error.message(), "422: Error with field 'x' in Repo resource");
    }

    #[test]
    fn test_numeric_value_is_kept_as_text() {
        let error = classify(
            422,
            r#"{"errors":[{"code":"invalid","field":"number","value":42}]}"#,
        );
        assert_eq!(error.message(), "422: Invalid value of '42' for field 'number'");
    }
}
