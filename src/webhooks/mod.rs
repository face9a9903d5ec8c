//! Webhook deliveries: signature verification and payload decoding.
//!
//! # Overview
//!
//! - [`verify_webhook`]: checks the `X-Hub-Signature-256` header of a
//!   [`WebhookRequest`] and returns its [`WebhookContext`]
//! - [`WebhookPayload`]: a delivery body decoded by its `X-GitHub-Event` type
//! - [`WebhookError`]: error type for both
//!
//! # Example
//!
//! ```rust
//! use github_api::webhooks::{WebhookError, WebhookPayload};
//!
//! let payload = WebhookPayload::decode("push", br#"{"ref": "refs/heads/main"}"#).unwrap();
//! assert!(matches!(payload, WebhookPayload::Push(_)));
//!
//! let error = WebhookPayload::decode("deployment", b"{}").unwrap_err();
//! assert!(matches!(error, WebhookError::UnsupportedType { .. }));
//! ```
//!
//! All types in this module are `Send + Sync`.

mod errors;
mod types;
mod verification;

pub use errors::WebhookError;
pub use types::{
    event_type_for, is_supported_type, PingWebhookPayload, PushWebhookPayload, WebhookPayload,
    TYPE_PING, TYPE_PUSH,
};
pub use verification::{
    compute_signature, verify_signature, verify_webhook, WebhookContext, WebhookRequest,
    HEADER_DELIVERY, HEADER_EVENT, HEADER_SIGNATURE, SIGNATURE_PREFIX,
};

// Verify webhook types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebhookRequest>();
    assert_send_sync::<WebhookContext>();
    assert_send_sync::<WebhookPayload>();
    assert_send_sync::<WebhookError>();
};
