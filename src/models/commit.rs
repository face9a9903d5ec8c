//! Commits as embedded in push payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author or committer identity of a commit.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CommitUser {
    /// Name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Login, when the identity maps to an account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Authoring or commit date.
    #[serde(
        with = "crate::codec::date::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,
}

/// A commit.
///
/// Push events name the hash `sha`; webhook deliveries name it `id`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Commit {
    /// Commit hash.
    #[serde(alias = "id", skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,

    /// Commit message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Author identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<CommitUser>,

    /// Committer identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committer: Option<CommitUser>,

    /// Whether the commit is new to the repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct: Option<bool>,

    /// API URL of the commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Commit timestamp, as sent in webhook deliveries.
    #[serde(
        with = "crate::codec::date::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,

    /// Paths added by the commit.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,

    /// Paths removed by the commit.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<String>,

    /// Paths modified by the commit.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modified: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_hash_accepts_id_alias() {
        let commit: Commit = serde_json::from_str(
            r#"{"id": "abc123", "timestamp": "2015/11/09 19:16:01 +0000", "modified": ["README"]}"#,
        )
        .unwrap();
        assert_eq!(commit.sha.as_deref(), Some("abc123"));
        assert_eq!(commit.timestamp.map(|d| d.timestamp()), Some(1_447_096_561));
        assert_eq!(commit.modified, vec!["README".to_string()]);
    }
}
