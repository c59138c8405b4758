// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository analysis entry point
//!
//! Opens the repository and builds its permission history. Problems with the
//! repository itself (missing, not a repository, bare, unknown revision) are
//! reported and yield an empty history so the dashboard still gets a valid
//! document.

use std::path::Path;

use permwatch_git::{GitError, GitRepo, History, HistoryOptions, build_history};
use tracing::{error, info};

/// Analyze the repository at `repo_path`
///
/// # Errors
///
/// Returns `GitError` only for faults while walking an otherwise valid
/// repository, such as a corrupt object database.
pub fn analyze_repo(repo_path: &Path, options: &HistoryOptions) -> Result<History, GitError> {
    info!(path = %repo_path.display(), file = %options.tracked_path, "Analyzing repository");

    let result = GitRepo::open_worktree(repo_path).and_then(|repo| build_history(&repo, options));

    match result {
        Ok(history) => Ok(history),
        Err(e) if e.is_configuration() => {
            error!(error = %e, "Cannot analyze repository, reporting empty history");
            Ok(History::default())
        }
        Err(e) => Err(e),
    }
}
