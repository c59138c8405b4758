#![no_main]

use libfuzzer_sys::fuzz_target;
use permwatch_git::diff::PermissionDiff;
use permwatch_git::permissions::extract;

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    let current = extract(Some(content));
    for permission in &current {
        assert!(!permission.is_empty() || content.trim_start().starts_with(['[', '{']));
    }

    let diff = PermissionDiff::between(&Default::default(), &current);
    assert_eq!(diff.added_count(), current.len());
    assert_eq!(diff.removed_count(), 0);
});
