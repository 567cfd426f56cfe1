//! Performance benchmarks for DevFlow.
//!
//! This module contains benchmarks for:
//! - Intent matching against the scenario catalog
//! - Template synchronization into fresh and existing trees
//! - Toolchain scanning and review aggregation
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use devflow::init::{synchronize, SyncOptions};
use devflow::preset::match_preset;
use devflow::review::{aggregate, ExternalSignals};
use devflow::scanner::detect_test_commands;

// ============================================================================
// Mock Data Fixtures
// ============================================================================

mod fixtures {
    use std::path::Path;

    /// Intents of increasing length, mixing keyword families.
    pub fn intents() -> Vec<(&'static str, String)> {
        let long = "需要修复支付接口的 bug 并补充回归测试, then refactor the module ".repeat(20);
        vec![
            ("empty", String::new()),
            ("no_match", "探索新的商业机会".to_string()),
            ("single", "需要修复支付接口的 bug".to_string()),
            ("mixed", "fix bug and add tests, then refactor the architecture".to_string()),
            ("long", long),
        ]
    }

    /// Write a template tree with `num_files` files spread over a few folders.
    pub fn write_template(root: &Path, num_files: usize) {
        for i in 0..num_files {
            let dir = root.join(".devflow").join(format!("group_{}", i % 8));
            std::fs::create_dir_all(&dir).expect("Failed to create template dir");
            std::fs::write(dir.join(format!("file_{i}.json")), format!("{{\"n\": {i}}}"))
                .expect("Failed to write template file");
        }
    }

    /// A workspace with some step artifacts and a package.json.
    pub fn write_workspace(root: &Path) {
        let steps = root.join(".devflow").join("steps");
        std::fs::create_dir_all(&steps).expect("Failed to create steps dir");
        std::fs::write(
            steps.join("step-01.requirements.json"),
            r#"{"status": "approved", "summary": "Checkout flow"}"#,
        )
        .expect("Failed to write step");
        std::fs::write(steps.join("step-02.api-contract.json"), r#"{"status": "draft"}"#)
            .expect("Failed to write step");
        std::fs::write(
            root.join("package.json"),
            r#"{"scripts": {"test": "vitest run", "lint": "eslint ."}}"#,
        )
        .expect("Failed to write package.json");
    }
}

// ============================================================================
// Intent Matching Benchmarks
// ============================================================================

fn bench_match_preset(c: &mut Criterion) {
    let mut group = c.benchmark_group("preset/match");

    for (name, intent) in fixtures::intents() {
        group.throughput(Throughput::Bytes(intent.len() as u64));
        group.bench_with_input(BenchmarkId::new("match_preset", name), &intent, |b, intent| {
            b.iter(|| black_box(match_preset(black_box(intent))));
        });
    }

    group.finish();
}

// ============================================================================
// Template Synchronization Benchmarks
// ============================================================================

fn bench_synchronize(c: &mut Criterion) {
    let mut group = c.benchmark_group("init/synchronize");
    let rt = tokio::runtime::Runtime::new().expect("Failed to create runtime");

    for num_files in [10, 100, 500] {
        let source = tempfile::tempdir().expect("Failed to create temp dir");
        fixtures::write_template(source.path(), num_files);

        group.throughput(Throughput::Elements(num_files as u64));

        group.bench_with_input(BenchmarkId::new("fresh", num_files), &num_files, |b, _| {
            b.iter_batched(
                || tempfile::tempdir().expect("Failed to create temp dir"),
                |dest| {
                    let results = rt
                        .block_on(synchronize(source.path(), dest.path(), &SyncOptions::default()))
                        .expect("sync failed");
                    black_box(results)
                },
                criterion::BatchSize::PerIteration,
            );
        });

        let existing = tempfile::tempdir().expect("Failed to create temp dir");
        rt.block_on(synchronize(source.path(), existing.path(), &SyncOptions::default()))
            .expect("sync failed");

        group.bench_with_input(BenchmarkId::new("all_skipped", num_files), &num_files, |b, _| {
            b.iter(|| {
                let results = rt
                    .block_on(synchronize(source.path(), existing.path(), &SyncOptions::default()))
                    .expect("sync failed");
                black_box(results)
            });
        });
    }

    group.finish();
}

// ============================================================================
// Review Benchmarks
// ============================================================================

fn bench_review(c: &mut Criterion) {
    let mut group = c.benchmark_group("review");
    let rt = tokio::runtime::Runtime::new().expect("Failed to create runtime");
    let workspace = tempfile::tempdir().expect("Failed to create temp dir");
    fixtures::write_workspace(workspace.path());

    group.bench_function("detect_test_commands", |b| {
        b.iter(|| black_box(detect_test_commands(black_box(workspace.path()))));
    });

    group.bench_function("aggregate", |b| {
        b.iter(|| {
            let report = rt.block_on(aggregate(workspace.path(), ExternalSignals::default()));
            black_box(report)
        });
    });

    group.finish();
}

// ============================================================================
// Criterion Groups and Main
// ============================================================================

criterion_group!(preset_benches, bench_match_preset,);

criterion_group!(init_benches, bench_synchronize,);

criterion_group!(review_benches, bench_review,);

criterion_main!(preset_benches, init_benches, review_benches,);
