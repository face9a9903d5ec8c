//! Wire models shared by event and webhook payloads.
//!
//! Every field is optional so that partial representations (for example the
//! abbreviated repository embedded in an event) decode without error. Dates
//! accept every format the [`DateCodec`](crate::codec::DateCodec) reads and
//! are written in its primary format.
//!
//! # Example
//!
//! ```rust
//! use github_api::models::Issue;
//!
//! let issue: Issue = serde_json::from_str(
//!     r#"{"number": 7, "title": "Crash", "state": "open", "created_at": "2015-11-09T19:16:01Z"}"#,
//! )
//! .unwrap();
//! assert_eq!(issue.number, Some(7));
//! assert_eq!(issue.created_at.map(|d| d.timestamp()), Some(1_447_096_561));
//! ```

mod account;
mod commit;
mod gist;
mod issue;
mod repository;

pub use account::{Team, User};
pub use commit::{Commit, CommitUser};
pub use gist::{Gist, GistFile, WikiPage};
pub use issue::{Comment, CommitComment, Issue, Label, PullRequest, PullRequestRef};
pub use repository::{Download, Release, Repository, RepositoryHook};
