// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

use chrono::{TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use permwatch_git::permissions::{PermissionSet, extract};
use permwatch_git::{HistoryOptions, MemoryStore, PermissionDiff, build_history};

const SERVICES: &[&str] = &["storage", "compute", "iam", "pubsub", "bigquery"];

fn permissions(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("{}.resource{}.get", SERVICES[i % SERVICES.len()], i))
        .collect()
}

fn manifest(n: usize) -> String {
    serde_json::json!({ "valid_permissions": permissions(n) }).to_string()
}

fn extract_benchmark(c: &mut Criterion) {
    let json = manifest(2_000);
    let text = permissions(2_000).join("\n");

    c.bench_function("extract_json_manifest", |b| {
        b.iter(|| extract(Some(std::hint::black_box(&json))))
    });
    c.bench_function("extract_line_fallback", |b| {
        b.iter(|| extract(Some(std::hint::black_box(&text))))
    });
}

fn diff_benchmark(c: &mut Criterion) {
    let previous: PermissionSet = permissions(2_000).into_iter().collect();
    let current: PermissionSet = permissions(2_100).into_iter().skip(100).collect();

    c.bench_function("diff_2000", |b| {
        b.iter(|| PermissionDiff::between(std::hint::black_box(&previous), &current))
    });
}

fn history_benchmark(c: &mut Criterion) {
    let mut store = MemoryStore::new();
    for i in 0..200 {
        let ts = Utc.timestamp_opt(1_767_225_600 + i * 60, 0).unwrap();
        let content = manifest(500 + i as usize);
        store.push("bench", "Automated update", ts, &[("permissions.json", content.as_str())]);
    }
    let options = HistoryOptions::default();

    c.bench_function("build_history_200_commits", |b| {
        b.iter(|| build_history(std::hint::black_box(&store), &options))
    });
}

criterion_group!(benches, extract_benchmark, diff_benchmark, history_benchmark);
criterion_main!(benches);
