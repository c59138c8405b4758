//! Git commit types

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Represents a commit read from a commit store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The commit SHA (40 hex characters)
    pub sha: String,
    /// Commit message
    pub message: String,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Committer timestamp
    pub timestamp: DateTime<Utc>,
    /// Parent commit SHAs
    pub parents: Vec<String>,
}

impl Commit {
    /// Build a commit from a git2 commit object
    pub(crate) fn from_git2(git_commit: &git2::Commit<'_>) -> Self {
        let sha = git_commit.id().to_string();
        let author = git_commit.author();

        Self {
            message: String::from_utf8_lossy(git_commit.message_bytes()).into_owned(),
            author: String::from_utf8_lossy(author.name_bytes()).into_owned(),
            author_email: String::from_utf8_lossy(author.email_bytes()).into_owned(),
            timestamp: commit_time(&sha, git_commit.time().seconds()),
            parents: git_commit.parent_ids().map(|id| id.to_string()).collect(),
            sha,
        }
    }

    /// Get the short SHA (first 7 characters)
    #[must_use]
    pub fn short_sha(&self) -> &str {
        &self.sha[..7.min(self.sha.len())]
    }

    /// Get the first line of the commit message (subject)
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

/// Commit time in UTC; out-of-range timestamps pin to the Unix epoch
fn commit_time(sha: &str, seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0).single().unwrap_or_else(|| {
        debug!(sha, seconds, "Commit timestamp out of range");
        DateTime::<Utc>::UNIX_EPOCH
    })
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: short_sha returns at most 7 characters
        #[test]
        fn prop_short_sha_length(sha in "[0-9a-f]{1,40}") {
            let commit = Commit {
                sha,
                message: String::new(),
                author: String::new(),
                author_email: String::new(),
                timestamp: Utc::now(),
                parents: vec![],
            };
            prop_assert!(commit.short_sha().len() <= 7);
            prop_assert!(commit.sha.starts_with(commit.short_sha()));
        }

        /// Property: subject is always a prefix of message
        #[test]
        fn prop_subject_is_prefix_of_message(message in ".*") {
            let commit = Commit {
                sha: "a".repeat(40),
                message,
                author: String::new(),
                author_email: String::new(),
                timestamp: Utc::now(),
                parents: vec![],
            };
            prop_assert!(commit.message.starts_with(commit.subject()));
        }
    }
}
