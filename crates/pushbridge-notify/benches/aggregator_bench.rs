// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the push aggregation path in pushbridge-notify.

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use pushbridge_bridge::prefs::MemoryStore;
use pushbridge_bridge::traits::{KeyValueStore, NotificationPresenter};
use pushbridge_core::BridgeConfig;
use pushbridge_core::error::Result;
use pushbridge_core::types::{NotificationRequest, PushPayload};
use pushbridge_notify::{NotificationCenter, parse_log_or_empty};

struct NullPresenter;

impl NotificationPresenter for NullPresenter {
    fn notify(&self, request: &NotificationRequest) -> Result<()> {
        black_box(request);
        Ok(())
    }

    fn cancel(&self, _id: i32) -> Result<()> {
        Ok(())
    }
}

fn seeded_log(len: usize) -> String {
    let entries: Vec<String> = (0..len).map(|n| format!("reply #{n} in a busy topic")).collect();
    serde_json::to_string(&entries).expect("serialize seed")
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// One push on top of an existing backlog: load, append, persist, render.
///
/// Backlog sizes 0, 10, 100, 1000 — the log is unbounded while the app
/// stays in the background.
fn bench_on_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("on_push");
    let config = BridgeConfig::default();

    for backlog in [0usize, 10, 100, 1000] {
        let seed = seeded_log(backlog);
        group.bench_with_input(BenchmarkId::from_parameter(backlog), &seed, |b, seed| {
            b.iter(|| {
                let store = Arc::new(MemoryStore::new());
                store
                    .set(&config.prefs_namespace, &config.log_key, seed)
                    .expect("seed log");
                let center = NotificationCenter::new(store, Arc::new(NullPresenter), &config);
                let outcome = center
                    .aggregator()
                    .on_push(black_box(&PushPayload::with_body("new reply")))
                    .expect("push");
                black_box(outcome);
            });
        });
    }

    group.finish();
}

/// Recovery path for a corrupted persisted value.
fn bench_parse_malformed(c: &mut Criterion) {
    let garbage = "x".repeat(4096);
    c.bench_function("parse_log_or_empty (malformed 4 KiB)", |b| {
        b.iter(|| black_box(parse_log_or_empty(Some(black_box(&garbage)))));
    });
}

criterion_group!(benches, bench_on_push, bench_parse_malformed);
criterion_main!(benches);
