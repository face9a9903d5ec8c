//! Webhook signature verification.
//!
//! GitHub signs each delivery with HMAC-SHA256 over the raw body, keyed by
//! the hook's secret, and sends the result in the `X-Hub-Signature-256`
//! header as `sha256=<hex digest>`.
//!
//! - [`verify_webhook`]: verifies a whole delivery, with an optional previous
//!   secret for rotation, and returns its [`WebhookContext`]
//! - [`verify_signature`]: the low-level check for custom integrations
//!
//! # Example
//!
//! ```rust
//! use github_api::webhooks::{compute_signature, verify_webhook, WebhookPayload, WebhookRequest};
//!
//! let body = br#"{"zen": "Keep it logically awesome.", "hook_id": 1}"#;
//! let signature = compute_signature(body, "my-secret").unwrap();
//!
//! let request = WebhookRequest::new(
//!     body.to_vec(),
//!     signature,
//!     Some("ping".to_string()),
//!     Some("72d3162e-cc78-11e3-81ab-4c9367dc0958".to_string()),
//! );
//!
//! let context = verify_webhook("my-secret", None, &request).unwrap();
//! assert_eq!(context.webhook_type(), Some("ping"));
//! assert!(matches!(
//!     context.decode_payload(request.body()),
//!     Ok(WebhookPayload::Ping(_))
//! ));
//! ```
//!
//! All digest comparisons are constant time.

use std::collections::HashMap;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::webhooks::{WebhookError, WebhookPayload};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the `sha256=<hex>` signature.
pub const HEADER_SIGNATURE: &str = "X-Hub-Signature-256";

/// Header carrying the delivery type, e.g. `push`.
pub const HEADER_EVENT: &str = "X-GitHub-Event";

/// Header carrying the unique delivery identifier.
pub const HEADER_DELIVERY: &str = "X-GitHub-Delivery";

/// Prefix of the signature header value.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Computes the signature header value for a body.
///
/// # Errors
///
/// Returns [`WebhookError::InvalidSecret`] if the secret is empty.
pub fn compute_signature(body: &[u8], secret: &str) -> Result<String, WebhookError> {
    if secret.is_empty() {
        return Err(WebhookError::InvalidSecret);
    }
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| WebhookError::InvalidSecret)?;
    mac.update(body);
    Ok(format!(
        "{SIGNATURE_PREFIX}{}",
        hex::encode(mac.finalize().into_bytes())
    ))
}

/// Checks a signature header value against a body.
///
/// Returns `false` for an empty secret, a missing `sha256=` prefix or a
/// mismatched digest. Hex digits are compared case-insensitively.
#[must_use]
pub fn verify_signature(body: &[u8], signature: &str, secret: &str) -> bool {
    let Ok(expected) = compute_signature(body, secret) else {
        return false;
    };
    let received = signature.trim().to_ascii_lowercase();
    expected.as_bytes().ct_eq(received.as_bytes()).into()
}

/// An incoming delivery: raw body plus the headers verification needs.
///
/// The body is kept as bytes so the signature is computed over exactly
/// what was received.
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    body: Vec<u8>,
    signature: String,
    webhook_type: Option<String>,
    delivery_id: Option<String>,
}

impl WebhookRequest {
    /// Creates a request from its body and header values.
    #[must_use]
    pub const fn new(
        body: Vec<u8>,
        signature: String,
        webhook_type: Option<String>,
        delivery_id: Option<String>,
    ) -> Self {
        Self {
            body,
            signature,
            webhook_type,
            delivery_id,
        }
    }

    /// Creates a request from a header map, looking names up
    /// case-insensitively. A missing signature header yields an empty
    /// signature, which never verifies.
    #[must_use]
    pub fn from_headers(body: Vec<u8>, headers: &HashMap<String, Vec<String>>) -> Self {
        let header = |name: &str| {
            headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .and_then(|(_, values)| values.first())
                .cloned()
        };
        Self {
            body,
            signature: header(HEADER_SIGNATURE).unwrap_or_default(),
            webhook_type: header(HEADER_EVENT),
            delivery_id: header(HEADER_DELIVERY),
        }
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    #[must_use]
    pub fn webhook_type(&self) -> Option<&str> {
        self.webhook_type.as_deref()
    }

    #[must_use]
    pub fn delivery_id(&self) -> Option<&str> {
        self.delivery_id.as_deref()
    }
}

/// Metadata of a delivery whose signature verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookContext {
    webhook_type: Option<String>,
    delivery_id: Option<String>,
}

impl WebhookContext {
    /// Returns the delivery type, e.g. `push`.
    #[must_use]
    pub fn webhook_type(&self) -> Option<&str> {
        self.webhook_type.as_deref()
    }

    /// Returns the delivery identifier.
    #[must_use]
    pub fn delivery_id(&self) -> Option<&str> {
        self.delivery_id.as_deref()
    }

    /// Decodes the verified body by this delivery's type.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::MissingType`] if the delivery had no type,
    /// and otherwise the errors of [`WebhookPayload::decode`].
    pub fn decode_payload(&self, body: &[u8]) -> Result<WebhookPayload, WebhookError> {
        let webhook_type = self.webhook_type().ok_or(WebhookError::MissingType)?;
        WebhookPayload::decode(webhook_type, body)
    }
}

/// Verifies a delivery and returns its context.
///
/// The signature is checked against `secret`, then against `old_secret` if
/// one is given, so deliveries signed before a secret rotation still verify.
///
/// # Errors
///
/// Returns [`WebhookError::InvalidSecret`] if `secret` is empty and
/// [`WebhookError::InvalidSignature`] if no secret matches.
pub fn verify_webhook(
    secret: &str,
    old_secret: Option<&str>,
    request: &WebhookRequest,
) -> Result<WebhookContext, WebhookError> {
    if secret.is_empty() {
        return Err(WebhookError::InvalidSecret);
    }

    let verified = verify_signature(request.body(), request.signature(), secret)
        || old_secret.is_some_and(|old| verify_signature(request.body(), request.signature(), old));

    if !verified {
        tracing::warn!(
            "Rejected webhook delivery {} with invalid signature",
            request.delivery_id().unwrap_or("<unknown>")
        );
        return Err(WebhookError::InvalidSignature);
    }

    Ok(WebhookContext {
        webhook_type: request.webhook_type.clone(),
        delivery_id: request.delivery_id.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "It's a Secret to Everybody";
    const BODY: &[u8] = b"Hello, World!";

    #[test]
    fn test_compute_signature_matches_known_digest() {
        assert_eq!(
            compute_signature(BODY, SECRET).unwrap(),
            "sha256=757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17"
        );
    }

    #[test]
    fn test_compute_signature_rejects_empty_secret() {
        assert!(matches!(
            compute_signature(BODY, ""),
            Err(WebhookError::InvalidSecret)
        ));
    }

    #[test]
    fn test_verify_signature() {
        let signature = compute_signature(BODY, SECRET).unwrap();
        assert!(verify_signature(BODY, &signature, SECRET));
        let upper_hex = format!(
            "{SIGNATURE_PREFIX}{}",
            signature.trim_start_matches(SIGNATURE_PREFIX).to_ascii_uppercase()
        );
        assert!(verify_signature(BODY, &upper_hex, SECRET));
        assert!(!verify_signature(b"Hello, World?", &signature, SECRET));
        assert!(!verify_signature(BODY, &signature, "other"));
        assert!(!verify_signature(BODY, signature.trim_start_matches(SIGNATURE_PREFIX), SECRET));
        assert!(!verify_signature(BODY, "", SECRET));
    }

    #[test]
    fn test_verify_webhook_returns_context() {
        let request = WebhookRequest::new(
            BODY.to_vec(),
            compute_signature(BODY, SECRET).unwrap(),
            Some("push".to_string()),
            Some("delivery-1".to_string()),
        );
        let context = verify_webhook(SECRET, None, &request).unwrap();
        assert_eq!(context.webhook_type(), Some("push"));
        assert_eq!(context.delivery_id(), Some("delivery-1"));
    }

    #[test]
    fn test_verify_webhook_falls_back_to_old_secret() {
        let request = WebhookRequest::new(
            BODY.to_vec(),
            compute_signature(BODY, "old-secret").unwrap(),
            None,
            None,
        );
        assert!(matches!(
            verify_webhook(SECRET, None, &request),
            Err(WebhookError::InvalidSignature)
        ));
        assert!(verify_webhook(SECRET, Some("old-secret"), &request).is_ok());
    }

    #[test]
    fn test_verify_webhook_rejects_empty_secret() {
        let request = WebhookRequest::new(BODY.to_vec(), String::new(), None, None);
        assert!(matches!(
            verify_webhook("", None, &request),
            Err(WebhookError::InvalidSecret)
        ));
    }

    #[test]
    fn test_request_from_headers_is_case_insensitive() {
        let mut headers: HashMap<String, Vec<String>> = HashMap::new();
        headers.insert("x-hub-signature-256".to_string(), vec!["sha256=00".to_string()]);
        headers.insert("X-GITHUB-EVENT".to_string(), vec!["issues".to_string()]);

        let request = WebhookRequest::from_headers(BODY.to_vec(), &headers);
        assert_eq!(request.signature(), "sha256=00");
        assert_eq!(request.webhook_type(), Some("issues"));
        assert_eq!(request.delivery_id(), None);
    }

    #[test]
    fn test_decode_payload_requires_type() {
        let request = WebhookRequest::new(
            b"{}".to_vec(),
            compute_signature(b"{}", SECRET).unwrap(),
            None,
            None,
        );
        let context = verify_webhook(SECRET, None, &request).unwrap();
        assert!(matches!(
            context.decode_payload(request.body()),
            Err(WebhookError::MissingType)
        ));
    }
}
