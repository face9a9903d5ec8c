//! Wire format encoding and decoding.
//!
//! Payloads are JSON with snake_case field names, which is also the naming
//! Rust structs use, so serde's default field mapping is the wire mapping.
//! Dates go through [`date::DateCodec`].
//!
//! # Overview
//!
//! - [`JsonCodec`]: Stateless encode/decode service configured once at construction
//! - [`DecodeError`]: A body could not be serialized or deserialized
//! - [`date`]: Multi-format date codec and serde adapters

pub mod date;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub use date::{DateCodec, DateFormatError, DATE_CODEC};

/// Error returned when a request or response body cannot be (de)serialized.
///
/// This indicates a client or protocol bug rather than a rejected request.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A typed result was expected but the body was empty.
    #[error("Empty response body")]
    EmptyBody,

    /// The body was not valid JSON for the expected shape.
    #[error("Invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON encode/decode service.
///
/// The null policy is fixed at construction: unless configured otherwise,
/// object fields holding `null` are dropped from encoded request bodies.
///
/// # Example
///
/// ```rust
/// use github_api::codec::JsonCodec;
/// use serde_json::json;
///
/// let codec = JsonCodec::new();
/// let body = codec.to_json(&json!({"title": "Bug", "body": null})).unwrap();
/// assert_eq!(body, r#"{"title":"Bug"}"#);
///
/// let codec = JsonCodec::new().with_serialize_nulls(true);
/// let body = codec.to_json(&json!({"body": null})).unwrap();
/// assert_eq!(body, r#"{"body":null}"#);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsonCodec {
    serialize_nulls: bool,
}

impl JsonCodec {
    /// Creates a codec that omits null fields.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            serialize_nulls: false,
        }
    }

    /// Sets whether null object fields are written.
    #[must_use]
    pub const fn with_serialize_nulls(mut self, serialize_nulls: bool) -> Self {
        self.serialize_nulls = serialize_nulls;
        self
    }

    /// Returns `true` if null object fields are written.
    #[must_use]
    pub const fn serializes_nulls(&self) -> bool {
        self.serialize_nulls
    }

    /// Encodes a value as a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Json`] if the value cannot be serialized.
    pub fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, DecodeError> {
        let mut value = serde_json::to_value(value)?;
        if !self.serialize_nulls {
            strip_nulls(&mut value);
        }
        Ok(serde_json::to_string(&value)?)
    }

    /// Decodes a JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::EmptyBody`] for an empty or blank body and
    /// [`DecodeError::Json`] for malformed JSON or an unexpected shape.
    pub fn from_json<T: DeserializeOwned>(&self, body: &str) -> Result<T, DecodeError> {
        if body.trim().is_empty() {
            return Err(DecodeError::EmptyBody);
        }
        Ok(serde_json::from_str(body)?)
    }
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}
