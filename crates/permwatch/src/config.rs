//! Configuration for the permwatch CLI
//!
//! This module provides the command-line configuration, including the
//! repository to analyze, where to write output, which file to track, and
//! logging options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use permwatch_git::history::DEFAULT_TRACKED_PATH;
use permwatch_git::{HistoryOptions, ReportPolicy, WalkOptions};

/// Permission Watchdog - permission change history from git
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "permwatch")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Path to the git repository to analyze
    ///
    /// Must be a non-bare repository.
    #[arg(long, env = "PERMWATCH_REPO_PATH")]
    pub repo_path: PathBuf,

    /// Directory to save the generated output
    ///
    /// Created if it does not exist.
    #[arg(long, env = "PERMWATCH_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Repository-relative path of the file to track
    #[arg(long, default_value = DEFAULT_TRACKED_PATH)]
    pub file_pattern: String,

    /// Walk history from this revision instead of HEAD
    #[arg(long)]
    pub rev: Option<String>,

    /// Only walk the N most recent commits
    ///
    /// The commit just before the window is read as the baseline, so the
    /// oldest walked commit reports only its own change.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Which permission changes are reported
    #[arg(long, value_enum, default_value_t = Policy::DiffAndMessage)]
    pub policy: Policy,

    /// Commit message marker for the diff-and-message policy (repeatable)
    ///
    /// Replaces the default markers ("automated update", "release").
    /// Matching is case-insensitive.
    #[arg(long = "marker", value_name = "TEXT")]
    pub markers: Vec<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Reporting policy selectable from the command line
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Policy {
    /// Report changes whose commit message carries a marker
    #[default]
    DiffAndMessage,
    /// Report every change to the permission set
    DiffOnly,
}

impl Config {
    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }

    /// Commit walk options from `--rev` and `--limit`
    #[must_use]
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            limit: self.limit,
            from_ref: self.rev.clone(),
        }
    }

    /// Report policy from `--policy` and `--marker`
    #[must_use]
    pub fn report_policy(&self) -> ReportPolicy {
        match self.policy {
            Policy::DiffOnly => ReportPolicy::DiffOnly,
            Policy::DiffAndMessage if self.markers.is_empty() => ReportPolicy::default(),
            Policy::DiffAndMessage => ReportPolicy::with_markers(&self.markers),
        }
    }

    /// Full history options for this run
    #[must_use]
    pub fn history_options(&self) -> HistoryOptions {
        HistoryOptions::default()
            .tracking(&self.file_pattern)
            .with_walk(self.walk_options())
            .with_policy(self.report_policy())
    }

    /// Validate the configuration
    ///
    /// Repository problems are not checked here; an unusable repository
    /// produces an empty history instead of failing the run.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `--limit` is zero
    /// - `--file-pattern` is empty
    /// - The output path exists but is not a directory
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limit == Some(0) {
            return Err(ConfigError::ZeroLimit);
        }
        if self.file_pattern.trim().is_empty() {
            return Err(ConfigError::EmptyFilePattern);
        }
        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(ConfigError::OutputNotDirectory(self.output_dir.clone()));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Commit limit of zero
    #[error("--limit must be at least 1")]
    ZeroLimit,

    /// Tracked file path is empty
    #[error("--file-pattern must not be empty")]
    EmptyFilePattern,

    /// Output path is not a directory
    #[error("Output path is not a directory: {0}")]
    OutputNotDirectory(PathBuf),
}
