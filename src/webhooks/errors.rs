//! Webhook-specific error types.
//!
//! # Example
//!
//! ```rust
//! use github_api::webhooks::WebhookError;
//!
//! let error = WebhookError::UnsupportedType {
//!     webhook_type: "deployment".to_string(),
//! };
//! assert!(error.to_string().contains("deployment"));
//! ```

use thiserror::Error;

/// Error type for webhook verification and payload decoding.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The signature header does not match the body.
    ///
    /// The message is intentionally generic.
    #[error("Webhook signature verification failed")]
    InvalidSignature,

    /// The webhook secret cannot be used as an HMAC key.
    #[error("Webhook secret must not be empty")]
    InvalidSecret,

    /// The delivery type has no payload mapping.
    #[error("Unsupported webhook type: {webhook_type}")]
    UnsupportedType {
        /// The `X-GitHub-Event` value.
        webhook_type: String,
    },

    /// The delivery carried no type header.
    #[error("Webhook delivery has no event type")]
    MissingType,

    /// The body is valid JSON but not an object.
    #[error("Expected json object")]
    NotAnObject,

    /// The body is not valid JSON or does not fit the payload type.
    #[error("Invalid webhook payload: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_signature_message_is_generic() {
        let message = WebhookError::InvalidSignature.to_string();
        assert_eq!(message, "Webhook signature verification failed");
        assert!(!message.contains("secret"));
    }

    #[test]
    fn test_not_an_object_message() {
        assert_eq!(WebhookError::NotAnObject.to_string(), "Expected json object");
    }

    #[test]
    fn test_decode_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: WebhookError = json_error.into();
        assert!(matches!(error, WebhookError::Decode(_)));
        let _: &dyn std::error::Error = &error;
    }
}
