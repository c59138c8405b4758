// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Permission set extraction
//!
//! Turns the raw content of a tracked file into a [`PermissionSet`]. The same
//! extractor handles a JSON manifest and a plain-text list with no format
//! metadata: JSON is attempted first and anything that fails to parse falls
//! back to one permission per non-blank line.

use std::collections::BTreeSet;

use serde_json::Value;

/// Preferred object field holding the permission list
pub const VALID_PERMISSIONS_FIELD: &str = "valid_permissions";

/// Secondary object field holding the permission list
pub const PERMISSIONS_FIELD: &str = "permissions";

/// The full set of permission strings in effect at one commit
pub type PermissionSet = BTreeSet<String>;

/// Extract a permission set from file content
///
/// Absent or empty content yields an empty set. Extraction never fails.
#[must_use]
pub fn extract(content: Option<&str>) -> PermissionSet {
    let Some(content) = content.filter(|c| !c.is_empty()) else {
        return PermissionSet::new();
    };

    match serde_json::from_str::<Value>(content) {
        Ok(value) => from_json(&value),
        Err(_) => from_lines(content),
    }
}

fn from_json(value: &Value) -> PermissionSet {
    match value {
        Value::Object(map) => {
            let list = map
                .get(VALID_PERMISSIONS_FIELD)
                .or_else(|| map.get(PERMISSIONS_FIELD))
                .or_else(|| map.values().find(|v| v.is_array()));
            match list {
                Some(Value::Array(items)) => collect_items(items),
                _ => PermissionSet::new(),
            }
        }
        Value::Array(items) => collect_items(items),
        _ => PermissionSet::new(),
    }
}

fn collect_items(items: &[Value]) -> PermissionSet {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        })
        .collect()
}

/// Characters that end a line in a plain-text permissions list
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}',
    '\u{2029}',
];

fn from_lines(content: &str) -> PermissionSet {
    content
        .split(LINE_BREAKS)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Grouping key for a permission: the text before the first dot, or the
/// whole string when it has no dot
#[must_use]
pub fn namespace(permission: &str) -> &str {
    permission.split('.').next().unwrap_or(permission)
}

/// Service of a permission, present only for dotted permissions
#[must_use]
pub fn service(permission: &str) -> Option<&str> {
    permission
        .split_once('.')
        .map(|(service, _)| service)
}

/// Number of distinct services among the dotted permissions of a set
#[must_use]
pub fn service_count(permissions: &PermissionSet) -> usize {
    permissions
        .iter()
        .filter_map(|p| service(p))
        .collect::<BTreeSet<_>>()
        .len()
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: line extraction never yields blank or untrimmed entries
        #[test]
        fn prop_line_entries_are_trimmed(lines in proptest::collection::vec("[ a-z.]{0,12}", 0..10)) {
            let content = lines.join("\n");
            for permission in extract(Some(&content)) {
                prop_assert!(!permission.is_empty());
                prop_assert_eq!(permission.trim(), permission.as_str());
            }
        }

        /// Property: a JSON list round-trips through extraction as a set
        #[test]
        fn prop_json_list_matches_set(items in proptest::collection::vec("[a-z]{1,6}(\\.[a-z]{1,6}){0,2}", 0..20)) {
            let content = serde_json::to_string(&items).expect("serialize");
            let expected: PermissionSet = items.into_iter().collect();
            prop_assert_eq!(extract(Some(&content)), expected);
        }

        /// Property: every service is also the namespace of its permission
        #[test]
        fn prop_service_agrees_with_namespace(permission in "[a-z.]{0,20}") {
            if let Some(service) = service(&permission) {
                prop_assert_eq!(service, namespace(&permission));
            }
        }
    }
}
