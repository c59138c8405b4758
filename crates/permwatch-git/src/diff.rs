// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Namespace-grouped permission set differences

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::permissions::{PermissionSet, namespace};

/// Permissions grouped by namespace, each bucket sorted ascending
pub type NamespaceGroups = BTreeMap<String, Vec<String>>;

/// Permissions added and removed between two consecutive states
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionDiff {
    /// Permissions present now but not before
    pub added: NamespaceGroups,
    /// Permissions present before but not now
    pub removed: NamespaceGroups,
}

impl PermissionDiff {
    /// Compute the difference from `previous` to `current`
    #[must_use]
    pub fn between(previous: &PermissionSet, current: &PermissionSet) -> Self {
        Self {
            added: group_by_namespace(current.difference(previous)),
            removed: group_by_namespace(previous.difference(current)),
        }
    }

    /// True when nothing was added or removed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Total number of added permissions across all namespaces
    #[must_use]
    pub fn added_count(&self) -> usize {
        self.added.values().map(Vec::len).sum()
    }

    /// Total number of removed permissions across all namespaces
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.removed.values().map(Vec::len).sum()
    }
}

fn group_by_namespace<'a>(permissions: impl Iterator<Item = &'a String>) -> NamespaceGroups {
    let mut groups = NamespaceGroups::new();
    for permission in permissions {
        groups
            .entry(namespace(permission).to_string())
            .or_default()
            .push(permission.clone());
    }
    for bucket in groups.values_mut() {
        bucket.sort();
    }
    groups
}
