//! Repositories and the resources that hang off them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::User;

/// A repository.
///
/// Events embed an abbreviated form carrying only `id`, `name` and `url`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Repository {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Short name, or `owner/name` in event payloads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// `owner/name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fork: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_branch: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub forks_count: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stargazers_count: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone_url: Option<String>,

    /// Creation time. Push webhooks send this as epoch seconds.
    #[serde(
        with = "crate::codec::date::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(
        with = "crate::codec::date::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,

    /// Last push. Push webhooks send this as epoch seconds.
    #[serde(
        with = "crate::codec::date::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub pushed_at: Option<DateTime<Utc>>,
}

/// A release.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Release {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,

    #[serde(
        with = "crate::codec::date::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(
        with = "crate::codec::date::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<DateTime<Utc>>,
}

/// A legacy repository download.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Download {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_count: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

/// A repository webhook, as embedded in ping deliveries.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RepositoryHook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// `web` for webhooks; service hooks carry the service name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    /// Subscribed event types.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,

    /// Hook configuration, e.g. `url` and `content_type`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub config: BTreeMap<String, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(
        with = "crate::codec::date::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(
        with = "crate::codec::date::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}
