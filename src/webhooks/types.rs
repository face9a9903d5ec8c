//! Webhook delivery types and their payloads.
//!
//! A delivery's type comes from the `X-GitHub-Event` header. `push` and
//! `ping` have dedicated payloads; the other supported types reuse the
//! matching [`EventPayload`] variant.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::events::{types as event_types, EventPayload};
use crate::models::{Commit, CommitUser, Repository, RepositoryHook, User};
use crate::webhooks::WebhookError;

pub const TYPE_PUSH: &str = "push";
pub const TYPE_PING: &str = "ping";

/// Delivery types that map onto an event payload, with the event type each
/// maps to.
const EVENT_TYPES: [(&str, &str); 18] = [
    ("commit_comment", event_types::COMMIT_COMMENT),
    ("create", event_types::CREATE),
    ("delete", event_types::DELETE),
    ("download", event_types::DOWNLOAD),
    ("follow", event_types::FOLLOW),
    ("fork", event_types::FORK),
    ("fork_apply", event_types::FORK_APPLY),
    ("gist", event_types::GIST),
    ("gollum", event_types::GOLLUM),
    ("issue_comment", event_types::ISSUE_COMMENT),
    ("issues", event_types::ISSUES),
    ("member", event_types::MEMBER),
    ("public", event_types::PUBLIC),
    ("pull_request", event_types::PULL_REQUEST),
    ("pull_request_review_comment", event_types::PULL_REQUEST_REVIEW_COMMENT),
    ("release", event_types::RELEASE),
    ("team_add", event_types::TEAM_ADD),
    ("watch", event_types::WATCH),
];

/// Returns the event type a delivery type maps to.
///
/// `push` and `ping` have dedicated payloads and return `None`.
#[must_use]
pub fn event_type_for(webhook_type: &str) -> Option<&'static str> {
    EVENT_TYPES
        .iter()
        .find(|(name, _)| *name == webhook_type)
        .map(|(_, event_type)| *event_type)
}

/// Returns `true` if [`WebhookPayload::decode`] accepts the delivery type.
#[must_use]
pub fn is_supported_type(webhook_type: &str) -> bool {
    webhook_type == TYPE_PUSH || webhook_type == TYPE_PING || event_type_for(webhook_type).is_some()
}

/// Payload of a `push` delivery.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PushWebhookPayload {
    /// Full ref that was pushed, e.g. `refs/heads/main`.
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,

    /// SHA of the ref before the push.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,

    /// SHA of the ref after the push.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub forced: Option<bool>,

    /// Base ref, for pushes of a tag or branch created from another.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_ref: Option<String>,

    /// Compare URL for the pushed range.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commits: Vec<Commit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_commit: Option<Commit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,

    /// Git identity of whoever pushed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pusher: Option<CommitUser>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
}

/// Payload of the `ping` delivery sent when a hook is created.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PingWebhookPayload {
    /// A random line of GitHub zen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zen: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook: Option<RepositoryHook>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<User>,
}

/// A decoded webhook delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookPayload {
    Push(PushWebhookPayload),
    Ping(PingWebhookPayload),
    /// Any other supported type, decoded as its event payload.
    Event(EventPayload),
}

impl WebhookPayload {
    /// Decodes a delivery body by its `X-GitHub-Event` type.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::Decode`] if the body is not JSON or does not fit the type
    /// - [`WebhookError::NotAnObject`] if the body is not a JSON object
    /// - [`WebhookError::UnsupportedType`] if the type has no payload mapping
    pub fn decode(webhook_type: &str, body: &[u8]) -> Result<Self, WebhookError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(webhook_type, value)
    }

    /// Decodes an already parsed delivery body.
    ///
    /// # Errors
    ///
    /// Same as [`WebhookPayload::decode`], minus JSON syntax errors.
    pub fn from_value(webhook_type: &str, value: Value) -> Result<Self, WebhookError> {
        if !value.is_object() {
            return Err(WebhookError::NotAnObject);
        }

        match webhook_type {
            TYPE_PUSH => Ok(Self::Push(serde_json::from_value(value)?)),
            TYPE_PING => Ok(Self::Ping(serde_json::from_value(value)?)),
            other => {
                let decoded = event_type_for(other)
                    .and_then(|event_type| EventPayload::decode_variant(event_type, &value))
                    .ok_or_else(|| WebhookError::UnsupportedType {
                        webhook_type: other.to_string(),
                    })?;
                Ok(Self::Event(decoded?))
            }
        }
    }

    /// Returns the event payload for types that map onto one.
    #[must_use]
    pub const fn as_event(&self) -> Option<&EventPayload> {
        match self {
            Self::Event(payload) => Some(payload),
            Self::Push(_) | Self::Ping(_) => None,
        }
    }
}
