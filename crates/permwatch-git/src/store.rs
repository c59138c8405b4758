// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Read-only commit stores
//!
//! The history pipeline needs exactly two capabilities from version control:
//! listing commits in causal order and reading a path at a commit. Anything
//! that provides both can stand in for a git repository.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::commit::Commit;
use crate::error::GitError;

/// Configuration for walking commits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Keep only the N most recent commits
    pub limit: Option<usize>,
    /// Start from this commit (defaults to HEAD)
    pub from_ref: Option<String>,
}

impl WalkOptions {
    /// Create options for walking the N most recent commits
    #[must_use]
    pub fn latest(n: usize) -> Self {
        Self {
            limit: Some(n),
            ..Default::default()
        }
    }

    /// Set the starting reference
    #[must_use]
    pub fn from(mut self, reference: &str) -> Self {
        self.from_ref = Some(reference.to_string());
        self
    }
}

/// A read-only source of commits and their file contents
pub trait CommitStore {
    /// List commits oldest-first
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidReference` if the starting reference cannot
    /// be resolved, or another `GitError` if the history cannot be walked.
    fn commits(&self, options: &WalkOptions) -> Result<Vec<Commit>, GitError>;

    /// Read the content of `path` at `commit`
    ///
    /// Returns `None` when the path does not exist at that commit or cannot
    /// be read as text.
    fn read_path(&self, commit: &Commit, path: &str) -> Option<String>;
}

/// In-memory commit store
///
/// Each commit carries its own complete file map, so deleting a file is
/// simply omitting it from the next commit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    commits: Vec<Commit>,
    files: HashMap<String, HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a commit whose tree holds `files`
    ///
    /// The SHA is derived from the commit's position so callers don't have
    /// to invent one.
    pub fn push(
        &mut self,
        author: &str,
        message: &str,
        timestamp: DateTime<Utc>,
        files: &[(&str, &str)],
    ) -> &Commit {
        let sha = format!("{:040x}", self.commits.len() + 1);
        let parents = self
            .commits
            .last()
            .map(|parent| vec![parent.sha.clone()])
            .unwrap_or_default();

        self.files.insert(
            sha.clone(),
            files
                .iter()
                .map(|(path, content)| ((*path).to_string(), (*content).to_string()))
                .collect(),
        );
        self.commits.push(Commit {
            sha,
            message: message.to_string(),
            author: author.to_string(),
            author_email: String::new(),
            timestamp,
            parents,
        });
        &self.commits[self.commits.len() - 1]
    }
}

impl CommitStore for MemoryStore {
    fn commits(&self, options: &WalkOptions) -> Result<Vec<Commit>, GitError> {
        let end = match options.from_ref.as_deref() {
            None | Some("HEAD") => self.commits.len(),
            Some(reference) => {
                self.commits
                    .iter()
                    .position(|c| !reference.is_empty() && c.sha.starts_with(reference))
                    .ok_or_else(|| GitError::InvalidReference {
                        reference: reference.to_string(),
                    })?
                    + 1
            }
        };
        let start = options
            .limit
            .map_or(0, |limit| end.saturating_sub(limit));
        Ok(self.commits[start..end].to_vec())
    }

    fn read_path(&self, commit: &Commit, path: &str) -> Option<String> {
        self.files.get(&commit.sha)?.get(path).cloned()
    }
}
