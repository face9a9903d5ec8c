//! Gists and wiki pages.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;

/// A file inside a gist.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GistFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_url: Option<String>,

    /// File content; only present on single-gist responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A gist.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Gist {
    /// Gist identifier. Not numeric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<User>,

    /// Files keyed by file name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub files: BTreeMap<String, GistFile>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,

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
    pub updated_at: Option<DateTime<Utc>>,
}

/// A wiki page touched by a Gollum event.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct WikiPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// `created` or `edited`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    /// Latest commit of the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}
