// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Permission history folding
//!
//! Walks commits oldest to newest, diffs each commit's permission set against
//! the previous commit's, and keeps the commits that pass the configured
//! [`ReportPolicy`]. The result is returned newest first.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use permwatch_git::{HistoryOptions, MemoryStore, build_history};
//!
//! let mut store = MemoryStore::new();
//! store.push("dev", "init", Utc::now(), &[]);
//! store.push("dev", "add role", Utc::now(), &[("permissions.json", r#"["storage.buckets.get"]"#)]);
//!
//! let history = build_history(&store, &HistoryOptions::default()).expect("walk");
//! assert_eq!(history.len(), 1);
//! assert_eq!(history.records()[0].stats.added_count, 1);
//! ```

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::commit::Commit;
use crate::diff::PermissionDiff;
use crate::error::GitError;
use crate::permissions::{self, PermissionSet};
use crate::store::{CommitStore, WalkOptions};

/// Default tracked file path
pub const DEFAULT_TRACKED_PATH: &str = "permissions.json";

/// Commits read per batch before extraction
pub const SNAPSHOT_CHUNK: usize = 64;

/// Message markers accepted by [`ReportPolicy::DiffAndMessage`] by default
pub const DEFAULT_MARKERS: &[&str] = &["automated update", "release"];

/// Decides which commits with a non-empty diff are reported
///
/// The first commit with a non-empty diff is always reported, whatever the
/// policy says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportPolicy {
    /// Report every commit that changes the permission set
    DiffOnly,
    /// Report changes whose message contains one of the markers
    /// (case-insensitive)
    DiffAndMessage {
        /// Lowercased message markers
        markers: Vec<String>,
    },
}

impl Default for ReportPolicy {
    fn default() -> Self {
        Self::with_markers(DEFAULT_MARKERS.iter().copied())
    }
}

impl ReportPolicy {
    /// Message-gated policy with custom markers
    pub fn with_markers<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::DiffAndMessage {
            markers: markers
                .into_iter()
                .map(|m| m.as_ref().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    /// Whether this policy accepts a commit with the given message
    #[must_use]
    pub fn accepts(&self, message: &str) -> bool {
        match self {
            Self::DiffOnly => true,
            Self::DiffAndMessage { markers } => {
                let message = message.to_lowercase();
                markers.iter().any(|m| message.contains(m.as_str()))
            }
        }
    }
}

/// Options for building a permission history
#[derive(Debug, Clone)]
pub struct HistoryOptions {
    /// Repository-relative path of the tracked file
    pub tracked_path: String,
    /// Which commits to walk
    pub walk: WalkOptions,
    /// Which changes to report
    pub policy: ReportPolicy,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            tracked_path: DEFAULT_TRACKED_PATH.to_string(),
            walk: WalkOptions::default(),
            policy: ReportPolicy::default(),
        }
    }
}

impl HistoryOptions {
    /// Track a different file
    #[must_use]
    pub fn tracking(mut self, path: &str) -> Self {
        self.tracked_path = path.to_string();
        self
    }

    /// Use a different report policy
    #[must_use]
    pub fn with_policy(mut self, policy: ReportPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use different walk options
    #[must_use]
    pub fn with_walk(mut self, walk: WalkOptions) -> Self {
        self.walk = walk;
        self
    }
}

/// Summary statistics for one reported commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStats {
    /// Size of the permission set at this commit
    pub total_permissions: usize,
    /// Distinct services among dotted permissions at this commit
    pub service_count: usize,
    /// Permissions added by this commit
    pub added_count: usize,
    /// Permissions removed by this commit
    pub removed_count: usize,
}

/// One reported commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Commit SHA
    pub hash: String,
    /// Author name
    pub author: String,
    /// Committer timestamp
    pub date: DateTime<Utc>,
    /// Trimmed commit message
    pub message: String,
    /// Summary statistics
    pub stats: RecordStats,
    /// Added and removed permissions by namespace
    pub diff: PermissionDiff,
}

impl HistoryRecord {
    fn new(commit: &Commit, current: &PermissionSet, diff: PermissionDiff) -> Self {
        let stats = RecordStats {
            total_permissions: current.len(),
            service_count: permissions::service_count(current),
            added_count: diff.added_count(),
            removed_count: diff.removed_count(),
        };
        Self {
            hash: commit.sha.clone(),
            author: commit.author.clone(),
            date: commit.timestamp,
            message: commit.message.trim().to_string(),
            stats,
            diff,
        }
    }
}

/// State carried from one commit to the next while folding
#[derive(Debug, Clone, Default)]
pub struct FoldState {
    previous: PermissionSet,
    emitted_any: bool,
}

impl FoldState {
    /// Start from an empty baseline
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the permission set of the commit before the walk window
    #[must_use]
    pub fn with_baseline(previous: PermissionSet) -> Self {
        Self {
            previous,
            emitted_any: false,
        }
    }

    /// Permission set of the last commit stepped over
    #[must_use]
    pub fn previous(&self) -> &PermissionSet {
        &self.previous
    }

    /// Whether any record has been produced yet
    #[must_use]
    pub fn emitted_any(&self) -> bool {
        self.emitted_any
    }

    /// Advance over one commit
    ///
    /// Returns a record if the commit is reportable. The baseline moves to
    /// `current` either way, so later diffs are taken against the true prior
    /// state rather than the last reported one.
    pub fn step(
        &mut self,
        commit: &Commit,
        current: PermissionSet,
        policy: &ReportPolicy,
    ) -> Option<HistoryRecord> {
        let diff = PermissionDiff::between(&self.previous, &current);
        let reportable =
            !diff.is_empty() && (!self.emitted_any || policy.accepts(&commit.message));

        let record = if reportable {
            self.emitted_any = true;
            Some(HistoryRecord::new(commit, &current, diff))
        } else {
            if !diff.is_empty() {
                debug!(sha = %commit.short_sha(), subject = commit.subject(), "Change suppressed by report policy");
            }
            None
        };

        self.previous = current;
        record
    }
}

/// Reported commits, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History(Vec<HistoryRecord>);

impl History {
    /// Assemble from records in fold (oldest-first) order
    #[must_use]
    pub fn from_oldest_first(mut records: Vec<HistoryRecord>) -> Self {
        records.reverse();
        Self(records)
    }

    /// Records, newest first
    #[must_use]
    pub fn records(&self) -> &[HistoryRecord] {
        &self.0
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no commit was reported
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take the records, newest first
    #[must_use]
    pub fn into_records(self) -> Vec<HistoryRecord> {
        self.0
    }
}

/// Resolve and extract the permission set at every commit
///
/// Reads go through the store one commit at a time, [`SNAPSHOT_CHUNK`]
/// commits per batch; each batch is parsed in parallel and appended in
/// commit order. At most one batch of raw file contents is held at once.
pub fn snapshot_sets<S>(store: &S, commits: &[Commit], tracked_path: &str) -> Vec<PermissionSet>
where
    S: CommitStore + ?Sized,
{
    let mut sets = Vec::with_capacity(commits.len());
    for chunk in commits.chunks(SNAPSHOT_CHUNK) {
        let contents: Vec<Option<String>> = chunk
            .iter()
            .map(|commit| store.read_path(commit, tracked_path))
            .collect();

        sets.par_extend(
            contents
                .par_iter()
                .map(|content| permissions::extract(content.as_deref())),
        );
    }
    sets
}

/// Walk the store and build the permission history
///
/// When the walk is limited, the commit just before the window seeds the
/// baseline, so the oldest commit in the window reports only its own change.
///
/// # Errors
///
/// Returns `GitError` if the commit list cannot be read. Per-commit read
/// faults never fail the walk.
pub fn build_history<S>(store: &S, options: &HistoryOptions) -> Result<History, GitError>
where
    S: CommitStore + ?Sized,
{
    let (seed, commits) = windowed_commits(store, &options.walk)?;
    debug!(commits = commits.len(), path = %options.tracked_path, "Walking commits");

    let baseline = seed
        .map(|commit| permissions::extract(store.read_path(&commit, &options.tracked_path).as_deref()))
        .unwrap_or_default();
    let sets = snapshot_sets(store, &commits, &options.tracked_path);

    let mut state = FoldState::with_baseline(baseline);
    let records: Vec<HistoryRecord> = commits
        .iter()
        .zip(sets)
        .filter_map(|(commit, current)| state.step(commit, current, &options.policy))
        .collect();

    info!(
        walked = commits.len(),
        reported = records.len(),
        "Permission history built"
    );

    Ok(History::from_oldest_first(records))
}

/// List the walk window plus, for a limited walk, the commit preceding it
fn windowed_commits<S>(
    store: &S,
    walk: &WalkOptions,
) -> Result<(Option<Commit>, Vec<Commit>), GitError>
where
    S: CommitStore + ?Sized,
{
    let Some(limit) = walk.limit else {
        return Ok((None, store.commits(walk)?));
    };

    let widened = WalkOptions {
        limit: Some(limit.saturating_add(1)),
        ..walk.clone()
    };
    let mut commits = store.commits(&widened)?;
    let seed = (commits.len() > limit).then(|| commits.remove(0));
    Ok((seed, commits))
}
