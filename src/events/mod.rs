//! Activity events and their type-dependent payloads.
//!
//! Events from the `/events` family of endpoints carry a `type` string and a
//! `payload` object whose shape depends on that type. [`Event`] decodes the
//! payload into the matching [`EventPayload`] variant.
//!
//! # Example
//!
//! ```rust
//! use github_api::events::{Event, EventPayload};
//!
//! let event: Event = serde_json::from_str(
//!     r#"{"id": "1", "type": "WatchEvent", "payload": {"action": "started"}}"#,
//! )
//! .unwrap();
//!
//! match event.payload {
//!     Some(EventPayload::Watch(watch)) => assert_eq!(watch.action.as_deref(), Some("started")),
//!     other => panic!("unexpected payload {other:?}"),
//! }
//! ```
//!
//! Decoding never fails on the payload: an unknown or missing `type`, or a
//! payload that does not fit its variant, yields [`EventPayload::Unknown`]
//! holding the raw JSON.

mod payload;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::User;

pub use payload::{
    CommitCommentPayload, CreatePayload, DeletePayload, DownloadPayload, EventPayload,
    FollowPayload, ForkApplyPayload, ForkPayload, GistPayload, GollumPayload,
    IssueCommentPayload, IssuesPayload, MemberPayload, PublicPayload, PullRequestPayload,
    PullRequestReviewCommentPayload, PushPayload, ReleasePayload, TeamAddPayload, WatchPayload,
};

/// Event type names, as sent in the `type` field.
pub mod types {
    pub const COMMIT_COMMENT: &str = "CommitCommentEvent";
    pub const CREATE: &str = "CreateEvent";
    pub const DELETE: &str = "DeleteEvent";
    pub const DOWNLOAD: &str = "DownloadEvent";
    pub const FOLLOW: &str = "FollowEvent";
    pub const FORK: &str = "ForkEvent";
    pub const FORK_APPLY: &str = "ForkApplyEvent";
    pub const GIST: &str = "GistEvent";
    pub const GOLLUM: &str = "GollumEvent";
    pub const ISSUE_COMMENT: &str = "IssueCommentEvent";
    pub const ISSUES: &str = "IssuesEvent";
    pub const MEMBER: &str = "MemberEvent";
    pub const PUBLIC: &str = "PublicEvent";
    pub const PULL_REQUEST: &str = "PullRequestEvent";
    pub const PULL_REQUEST_REVIEW_COMMENT: &str = "PullRequestReviewCommentEvent";
    pub const PUSH: &str = "PushEvent";
    pub const RELEASE: &str = "ReleaseEvent";
    pub const TEAM_ADD: &str = "TeamAddEvent";
    pub const WATCH: &str = "WatchEvent";

    /// Every type with a dedicated payload variant.
    pub const ALL: [&str; 19] = [
        COMMIT_COMMENT,
        CREATE,
        DELETE,
        DOWNLOAD,
        FOLLOW,
        FORK,
        FORK_APPLY,
        GIST,
        GOLLUM,
        ISSUE_COMMENT,
        ISSUES,
        MEMBER,
        PUBLIC,
        PULL_REQUEST,
        PULL_REQUEST_REVIEW_COMMENT,
        PUSH,
        RELEASE,
        TEAM_ADD,
        WATCH,
    ];
}

/// The abbreviated repository embedded in an event.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct EventRepository {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// `owner/name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// An activity event.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(from = "RawEvent")]
pub struct Event {
    /// Event identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Event type, e.g. `PushEvent`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,

    /// Whether the event is visible to everyone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,

    /// Repository the event happened in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<EventRepository>,

    /// Account that triggered the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<User>,

    /// Organization, for organization events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<User>,

    #[serde(
        with = "crate::codec::date::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    /// Decoded payload; `None` when the event carries no payload object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<EventPayload>,
}

impl Event {
    /// Returns `true` if the payload decoded into a dedicated variant.
    #[must_use]
    pub fn has_known_payload(&self) -> bool {
        self.payload.as_ref().is_some_and(|payload| !payload.is_unknown())
    }
}

/// Wire shape of an event before payload dispatch.
#[derive(Deserialize, Default)]
#[serde(default)]
struct RawEvent {
    id: Option<String>,
    #[serde(rename = "type")]
    event_type: Option<String>,
    public: Option<bool>,
    repo: Option<EventRepository>,
    actor: Option<User>,
    org: Option<User>,
    #[serde(with = "crate::codec::date::optional")]
    created_at: Option<DateTime<Utc>>,
    payload: Option<Value>,
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        let payload = raw.payload.and_then(|value| {
            EventPayload::from_value(raw.event_type.as_deref().unwrap_or_default(), value)
        });
        Self {
            id: raw.id,
            event_type: raw.event_type,
            public: raw.public,
            repo: raw.repo,
            actor: raw.actor,
            org: raw.org,
            created_at: raw.created_at,
            payload,
        }
    }
}
