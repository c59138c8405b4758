// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! permwatch-git: permission history from git commits
//!
//! This library crate walks a repository's history, extracts the permission
//! set of a tracked file at every commit, and reports how it changed, grouped
//! by service namespace.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use permwatch_git::{GitRepo, HistoryOptions, build_history};
//!
//! let repo = GitRepo::open_worktree(".").expect("open repo");
//! let history = build_history(&repo, &HistoryOptions::default().tracking("permissions.json"))
//!     .expect("walk commits");
//!
//! for record in history.records() {
//!     println!("{} +{} -{}", record.hash, record.stats.added_count, record.stats.removed_count);
//! }
//! ```

pub mod commit;
pub mod diff;
pub mod error;
pub mod history;
pub mod permissions;
pub mod repo;
pub mod store;

pub use commit::Commit;
pub use diff::{NamespaceGroups, PermissionDiff};
pub use error::GitError;
pub use history::{
    FoldState, History, HistoryOptions, HistoryRecord, RecordStats, ReportPolicy, build_history,
};
pub use permissions::{PermissionSet, extract};
pub use repo::GitRepo;
pub use store::{CommitStore, MemoryStore, WalkOptions};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::Commit;
    pub use crate::error::GitError;
    pub use crate::history::{History, HistoryOptions, ReportPolicy, build_history};
    pub use crate::repo::GitRepo;
    pub use crate::store::{CommitStore, WalkOptions};
}
