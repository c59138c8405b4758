// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Git repository access
//!
//! This module walks commits and reads tracked files from a repository
//! using the `git2` crate.

use std::path::Path;

use git2::{ErrorCode, Oid, Repository, Sort};
use tracing::debug;

use crate::commit::Commit;
use crate::error::GitError;
use crate::store::{CommitStore, WalkOptions};

/// A git repository wrapper implementing [`CommitStore`]
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open a git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path is not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Open a git repository that has a working tree
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path is not a git repository,
    /// or `GitError::BareRepository` if it has no working tree.
    pub fn open_worktree(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Self::open(path)?;
        if repo.is_bare() {
            return Err(GitError::BareRepository {
                path: path.display().to_string(),
            });
        }
        Ok(repo)
    }

    /// Check if the repository is bare
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }

    /// Get the repository path
    #[must_use]
    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    /// Get the working directory path (None for bare repos)
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Resolve a reference (branch, tag, or SHA) to a commit id
    fn resolve_ref(&self, reference: &str) -> Result<Oid, GitError> {
        let invalid = || GitError::InvalidReference {
            reference: reference.to_string(),
        };
        let commit = self
            .repo
            .revparse_single(reference)
            .map_err(|_| invalid())?
            .peel_to_commit()
            .map_err(|_| invalid())?;
        Ok(commit.id())
    }

    /// Read a UTF-8 blob at `path` in the tree of commit `sha`
    fn read_blob(&self, sha: &str, path: &str) -> Result<Option<String>, git2::Error> {
        let tree = self.repo.find_commit(Oid::from_str(sha)?)?.tree()?;
        let entry = match tree.get_path(Path::new(path)) {
            Ok(entry) => entry,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        let blob = entry.to_object(&self.repo)?.peel_to_blob()?;
        Ok(std::str::from_utf8(blob.content()).ok().map(str::to_string))
    }
}

impl CommitStore for GitRepo {
    fn commits(&self, options: &WalkOptions) -> Result<Vec<Commit>, GitError> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

        // Start from specified ref or HEAD
        if let Some(ref from_ref) = options.from_ref {
            revwalk.push(self.resolve_ref(from_ref)?)?;
        } else {
            match self.repo.head() {
                Ok(_) => revwalk.push_head()?,
                Err(e) if e.code() == ErrorCode::UnbornBranch => {
                    debug!(path = %self.path().display(), "HEAD is unborn, no commits to walk");
                    return Ok(Vec::new());
                }
                Err(e) => return Err(e.into()),
            }
        }

        let limit = options.limit.unwrap_or(usize::MAX);
        let mut commits = Vec::new();

        for oid_result in revwalk.take(limit) {
            let git_commit = self.repo.find_commit(oid_result?)?;
            commits.push(Commit::from_git2(&git_commit));
        }

        // Walk from the first commit to the last
        commits.reverse();
        Ok(commits)
    }

    fn read_path(&self, commit: &Commit, path: &str) -> Option<String> {
        match self.read_blob(&commit.sha, path) {
            Ok(content) => content,
            Err(e) => {
                debug!(sha = %commit.short_sha(), path, error = %e, "Unreadable snapshot, treating as absent");
                None
            }
        }
    }
}
