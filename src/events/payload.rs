//! Payload variants, one per event type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types;
use crate::models::{
    Comment, Commit, CommitComment, Download, Gist, Issue, PullRequest, Release, Repository,
    Team, User, WikiPage,
};

/// A comment was made on a commit.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CommitCommentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<CommitComment>,
}

/// A repository, branch or tag was created.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CreatePayload {
    /// `repository`, `branch` or `tag`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,

    /// Name of the branch or tag; `null` for repositories.
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_branch: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A branch or tag was deleted.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DeletePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,

    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DownloadPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<Download>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct FollowPayload {
    /// The account that was followed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ForkPayload {
    /// The newly created fork.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forkee: Option<Repository>,
}

/// A patch was applied from the fork queue.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ForkApplyPayload {
    /// Branch name the patch was applied to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GistPayload {
    /// `create` or `update`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gist: Option<Gist>,
}

/// Wiki pages were created or updated.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GollumPayload {
    pub pages: Vec<WikiPage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct IssueCommentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<Issue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Comment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct IssuesPayload {
    /// `opened`, `closed` or `reopened`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<Issue>,
}

/// A collaborator was added to a repository.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct MemberPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// A private repository was open sourced. Carries no fields.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PublicPayload {}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PullRequestPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PullRequestReviewCommentPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<CommitComment>,
}

/// Commits were pushed to a branch.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PushPayload {
    /// SHA of the most recent commit after the push.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,

    /// Full ref that was pushed, e.g. `refs/heads/master`.
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,

    /// Number of commits in the push.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Pushed commits, oldest first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commits: Vec<Commit>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ReleasePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<Release>,
}

/// A user or repository was added to a team.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TeamAddPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<Repository>,
}

/// A repository was starred.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct WatchPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// A decoded event payload.
///
/// Serializes as the bare payload object, without a tag.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum EventPayload {
    CommitComment(CommitCommentPayload),
    Create(CreatePayload),
    Delete(DeletePayload),
    Download(DownloadPayload),
    Follow(FollowPayload),
    Fork(ForkPayload),
    ForkApply(ForkApplyPayload),
    Gist(GistPayload),
    Gollum(GollumPayload),
    IssueComment(IssueCommentPayload),
    Issues(IssuesPayload),
    Member(MemberPayload),
    Public(PublicPayload),
    PullRequest(PullRequestPayload),
    PullRequestReviewComment(PullRequestReviewCommentPayload),
    Push(PushPayload),
    Release(ReleasePayload),
    TeamAdd(TeamAddPayload),
    Watch(WatchPayload),
    /// The type has no dedicated variant, or the payload did not fit it.
    Unknown(Value),
}

impl EventPayload {
    /// Decodes `value` as the payload of an event of type `event_type`.
    ///
    /// Returns `None` if `value` is not a JSON object. Never fails otherwise:
    /// unknown types and payloads that do not fit their variant become
    /// [`EventPayload::Unknown`].
    #[must_use]
    pub fn from_value(event_type: &str, value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }

        match Self::decode_variant(event_type, &value) {
            Some(Ok(payload)) => Some(payload),
            Some(Err(e)) => {
                tracing::debug!("Payload did not fit event type '{}': {}", event_type, e);
                Some(Self::Unknown(value))
            }
            None => Some(Self::Unknown(value)),
        }
    }

    /// Decodes `value` into the dedicated variant for `event_type`.
    ///
    /// Returns `None` if the type has no dedicated variant.
    pub(crate) fn decode_variant(
        event_type: &str,
        value: &Value,
    ) -> Option<Result<Self, serde_json::Error>> {
        let decoded = match event_type {
            types::COMMIT_COMMENT => decode(value, Self::CommitComment),
            types::CREATE => decode(value, Self::Create),
            types::DELETE => decode(value, Self::Delete),
            types::DOWNLOAD => decode(value, Self::Download),
            types::FOLLOW => decode(value, Self::Follow),
            types::FORK => decode(value, Self::Fork),
            types::FORK_APPLY => decode(value, Self::ForkApply),
            types::GIST => decode(value, Self::Gist),
            types::GOLLUM => decode(value, Self::Gollum),
            types::ISSUE_COMMENT => decode(value, Self::IssueComment),
            types::ISSUES => decode(value, Self::Issues),
            types::MEMBER => decode(value, Self::Member),
            types::PUBLIC => decode(value, Self::Public),
            types::PULL_REQUEST => decode(value, Self::PullRequest),
            types::PULL_REQUEST_REVIEW_COMMENT => decode(value, Self::PullRequestReviewComment),
            types::PUSH => decode(value, Self::Push),
            types::RELEASE => decode(value, Self::Release),
            types::TEAM_ADD => decode(value, Self::TeamAdd),
            types::WATCH => decode(value, Self::Watch),
            _ => return None,
        };
        Some(decoded)
    }

    /// Returns `true` for [`EventPayload::Unknown`].
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Returns the event type this variant belongs to; `None` for
    /// [`EventPayload::Unknown`].
    #[must_use]
    pub const fn event_type(&self) -> Option<&'static str> {
        Some(match self {
            Self::CommitComment(_) => types::COMMIT_COMMENT,
            Self::Create(_) => types::CREATE,
            Self::Delete(_) => types::DELETE,
            Self::Download(_) => types::DOWNLOAD,
            Self::Follow(_) => types::FOLLOW,
            Self::Fork(_) => types::FORK,
            Self::ForkApply(_) => types::FORK_APPLY,
            Self::Gist(_) => types::GIST,
            Self::Gollum(_) => types::GOLLUM,
            Self::IssueComment(_) => types::ISSUE_COMMENT,
            Self::Issues(_) => types::ISSUES,
            Self::Member(_) => types::MEMBER,
            Self::Public(_) => types::PUBLIC,
            Self::PullRequest(_) => types::PULL_REQUEST,
            Self::PullRequestReviewComment(_) => types::PULL_REQUEST_REVIEW_COMMENT,
            Self::Push(_) => types::PUSH,
            Self::Release(_) => types::RELEASE,
            Self::TeamAdd(_) => types::TEAM_ADD,
            Self::Watch(_) => types::WATCH,
            Self::Unknown(_) => return None,
        })
    }
}

fn decode<P: DeserializeOwned>(
    value: &Value,
    variant: fn(P) -> EventPayload,
) -> Result<EventPayload, serde_json::Error> {
    P::deserialize(value).map(variant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_payload_is_none() {
        assert_eq!(EventPayload::from_value(types::PUSH, json!([1, 2])), None);
        assert_eq!(EventPayload::from_value(types::PUSH, Value::Null), None);
        assert_eq!(EventPayload::from_value("", json!("text")), None);
    }

    #[test]
    fn test_gollum_pages() {
        let payload = EventPayload::from_value(
            types::GOLLUM,
            json!({"pages": [{"page_name": "Home", "action": "edited", "sha": "91ea1b"}]}),
        );
        let Some(EventPayload::Gollum(gollum)) = payload else {
            panic!("expected a gollum payload");
        };
        assert_eq!(gollum.pages[0].page_name.as_deref(), Some("Home"));
        assert_eq!(gollum.pages[0].action.as_deref(), Some("edited"));
    }

    #[test]
    fn test_create_ref_field_is_renamed() {
        let payload = EventPayload::from_value(
            types::CREATE,
            json!({"ref_type": "tag", "ref": "v1.0", "master_branch": "master"}),
        );
        let Some(EventPayload::Create(create)) = payload else {
            panic!("expected a create payload");
        };
        assert_eq!(create.git_ref.as_deref(), Some("v1.0"));
        assert_eq!(create.ref_type.as_deref(), Some("tag"));
    }

    #[test]
    fn test_issue_comment_payload() {
        let payload = EventPayload::from_value(
            types::ISSUE_COMMENT,
            json!({
                "action": "created",
                "issue": {"number": 2, "title": "Spelling error"},
                "comment": {"id": 99, "body": "Fixed"}
            }),
        )
        .unwrap();
        let EventPayload::IssueComment(payload) = payload else {
            panic!("expected an issue comment payload");
        };
        assert_eq!(payload.issue.and_then(|i| i.number), Some(2));
        assert_eq!(payload.comment.and_then(|c| c.body).as_deref(), Some("Fixed"));
    }
}
