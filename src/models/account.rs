//! Users, organizations and teams.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user or organization account.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct User {
    /// The unique identifier of the account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Login name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,

    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Public email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// `User` or `Organization`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,

    /// Avatar image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    /// API URL of the account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Web URL of the account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,

    /// When the account was created.
    #[serde(
        with = "crate::codec::date::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// An organization team.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Team {
    /// The unique identifier of the team.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Team name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// `pull`, `push` or `admin`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,

    /// Number of members.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members_count: Option<u64>,

    /// Number of repositories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repos_count: Option<u64>,

    /// API URL of the team.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_type_field_is_renamed() {
        let user: User =
            serde_json::from_str(r#"{"login": "github", "type": "Organization"}"#).unwrap();
        assert_eq!(user.account_type.as_deref(), Some("Organization"));

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["type"], "Organization");
        assert!(json.get("id").is_none());
    }
}
