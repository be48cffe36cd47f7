//! Benchmarks for rule synthesis.
//!
//! Covers each stage on its own and end-to-end:
//! - distance scoring and the full edit matrix
//! - path enumeration (explodes with repeated characters)
//! - translation plus folding
//! - candidate analysis against a small word list

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rulegen::prelude::*;

// ============================================================================
// Test Data Generation
// ============================================================================

fn generate_test_pairs() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        // (name, word, password)
        ("identical", "password", "password"),
        ("suffix_digit", "password", "password1"),
        ("leet", "password", "P@ssw0rd!"),
        ("prefix_suffix", "dragon", "123dragon!!"),
        ("case_only", "monkey", "MONKEY"),
        ("swap", "letmein", "eltmein"),
        ("repeated_chars", "aaaaaa", "aAaAaA"),
        ("far", "sunshine", "5un5h1n3_2024"),
    ]
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_levenshtein(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance/levenshtein");

    for (name, word, password) in generate_test_pairs() {
        group.throughput(Throughput::Bytes((word.len() + password.len()) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(word, password),
            |b, &(w, p)| {
                b.iter(|| levenshtein(black_box(w), black_box(p)));
            },
        );
    }

    group.finish();
}

fn bench_reverse_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance/reverse_paths");

    for (name, word, password) in generate_test_pairs() {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(word, password),
            |b, &(w, p)| {
                b.iter(|| {
                    let matrix = EditMatrix::new(black_box(w), black_box(p));
                    reverse_paths(&matrix)
                });
            },
        );
    }

    group.finish();
}

fn bench_synthesize(c: &mut Criterion) {
    let mut group = c.benchmark_group("synth/synthesize");

    for (name, word, password) in generate_test_pairs() {
        for style in [RuleStyle::Advanced, RuleStyle::Simple] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", style), name),
                &(word, password),
                |b, &(w, p)| {
                    b.iter(|| synthesize(black_box(w), black_box(p), style));
                },
            );
        }
    }

    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidate/analyze");

    let dict = WordList::from_terms([
        "password", "passport", "dragon", "monkey", "sunshine", "letmein", "shadow", "master",
        "football", "baseball", "welcome", "princess", "qwerty", "trustno1",
    ]);
    let generator = CandidateGenerator::new(dict, RulegenConfig::default());

    for password in ["P@ssw0rd!", "Dragon2024", "m0nk3y", "sunshine123", "nomatch"] {
        group.bench_with_input(BenchmarkId::from_parameter(password), password, |b, p| {
            b.iter(|| generator.analyze(black_box(p)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_levenshtein,
    bench_reverse_paths,
    bench_synthesize,
    bench_analyze
);
criterion_main!(benches);
