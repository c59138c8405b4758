// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! CLI flag parsing tests
//!
//! These tests verify argument parsing, defaults, and how flags map onto
//! the history options.

use clap::Parser;
use permwatch::config::{Config, Policy};
use permwatch_git::{ReportPolicy, WalkOptions};
use std::path::PathBuf;
use tracing::Level;

fn parse(extra: &[&str]) -> Result<Config, clap::Error> {
    let mut args = vec![
        "permwatch",
        "--repo-path",
        "/srv/roles",
        "--output-dir",
        "/tmp/site",
    ];
    args.extend_from_slice(extra);
    Config::try_parse_from(args)
}

// ============================================================================
// Required flags
// ============================================================================

#[test]
fn test_required_flags() {
    let config = parse(&[]).expect("parse should succeed");
    assert_eq!(config.repo_path, PathBuf::from("/srv/roles"));
    assert_eq!(config.output_dir, PathBuf::from("/tmp/site"));
}

#[test]
fn test_missing_output_dir_fails() {
    let result = Config::try_parse_from(["permwatch", "--repo-path", "/srv/roles"]);
    let err = result.expect_err("missing --output-dir should fail").to_string();
    assert!(err.contains("--output-dir"), "unexpected error: {}", err);
}

#[test]
fn test_missing_repo_path_fails() {
    let result = Config::try_parse_from(["permwatch", "--output-dir", "/tmp/site"]);
    assert!(result.is_err());
}

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn test_defaults() {
    let config = parse(&[]).expect("parse should succeed");
    assert_eq!(config.file_pattern, "permissions.json");
    assert_eq!(config.policy, Policy::DiffAndMessage);
    assert!(config.markers.is_empty());
    assert!(config.rev.is_none());
    assert!(config.limit.is_none());
    assert_eq!(config.log_level(), Level::INFO);
    assert_eq!(config.report_policy(), ReportPolicy::default());
    assert_eq!(config.walk_options(), WalkOptions::default());
}

// ============================================================================
// Tracking and walk flags
// ============================================================================

#[test]
fn test_file_pattern() {
    let config = parse(&["--file-pattern", "iam/valid_permissions.txt"]).expect("parse");
    assert_eq!(config.history_options().tracked_path, "iam/valid_permissions.txt");
}

#[test]
fn test_rev_and_limit() {
    let config = parse(&["--rev", "release-2026", "--limit", "25"]).expect("parse");
    assert_eq!(
        config.walk_options(),
        WalkOptions::latest(25).from("release-2026")
    );
}

#[test]
fn test_limit_must_be_a_number() {
    assert!(parse(&["--limit", "many"]).is_err());
}

// ============================================================================
// Policy flags
// ============================================================================

#[test]
fn test_policy_diff_only() {
    let config = parse(&["--policy", "diff-only"]).expect("parse");
    assert_eq!(config.policy, Policy::DiffOnly);
    assert_eq!(config.report_policy(), ReportPolicy::DiffOnly);
}

#[test]
fn test_policy_unknown_value_fails() {
    assert!(parse(&["--policy", "everything"]).is_err());
}

#[test]
fn test_repeated_markers() {
    let config = parse(&["--marker", "Sync", "--marker", "bump roles"]).expect("parse");
    assert_eq!(config.markers, vec!["Sync".to_string(), "bump roles".to_string()]);
    let policy = config.report_policy();
    assert!(policy.accepts("SYNC from upstream"));
    assert!(policy.accepts("bump roles for storage"));
    assert!(!policy.accepts("Automated update"));
}

// ============================================================================
// Logging flags
// ============================================================================

#[test]
fn test_verbose_short_flag_v() {
    let config = parse(&["-v"]).expect("parse");
    assert!(config.verbose);
    assert_eq!(config.log_level(), Level::DEBUG);
}

#[test]
fn test_quiet_long_flag() {
    let config = parse(&["--quiet"]).expect("parse");
    assert!(config.quiet);
    assert_eq!(config.log_level(), Level::WARN);
}

#[test]
fn test_verbose_wins_over_quiet() {
    let config = parse(&["-v", "-q"]).expect("parse");
    assert_eq!(config.log_level(), Level::DEBUG);
}
