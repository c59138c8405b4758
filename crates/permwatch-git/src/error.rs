// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for permwatch-git

use thiserror::Error;

/// Errors that can occur while opening or walking a repository
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// Repository has no working tree
    #[error("Repository is bare: {path}")]
    BareRepository {
        /// The path of the bare repository
        path: String,
    },

    /// Invalid commit reference (branch, tag, or SHA)
    #[error("Invalid commit reference: {reference}")]
    InvalidReference {
        /// The reference string that could not be resolved
        reference: String,
    },
}

impl GitError {
    /// Whether this error stems from the caller's repository settings
    /// rather than from a fault while reading objects
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::RepositoryNotFound { .. }
                | Self::BareRepository { .. }
                | Self::InvalidReference { .. }
        )
    }
}
