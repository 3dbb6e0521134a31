//! Benchmark suite for adapt-algo
//!
//! Run with: cargo bench

use adapt_algo::{detect_blockages, estimate_ability, DifficultyLevel, ResponseRecord};
use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};

fn base_time() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
}

fn sample_history(n: usize) -> Vec<ResponseRecord> {
    (0..n)
        .map(|i| ResponseRecord {
            learner_id: "learner_bench".to_string(),
            item_id: format!("item_{i}"),
            subject: "math".to_string(),
            difficulty: match i % 5 {
                0 => DifficultyLevel::VeryEasy,
                1 => DifficultyLevel::Easy,
                2 => DifficultyLevel::Medium,
                3 => DifficultyLevel::Hard,
                _ => DifficultyLevel::VeryHard,
            },
            is_correct: i % 3 != 0,
            response_time_secs: 4.0 + (i % 7) as f64,
            timestamp: base_time() - Duration::minutes(i as i64),
        })
        .collect()
}

fn bench_estimate_ability(c: &mut Criterion) {
    let history = sample_history(100);
    c.bench_function("estimate_ability/100", |b| {
        b.iter(|| estimate_ability("learner_bench", &history, base_time()))
    });
}

fn bench_detect_blockages(c: &mut Criterion) {
    let history = sample_history(50);
    c.bench_function("detect_blockages/50", |b| {
        b.iter(|| detect_blockages(&history))
    });
}

criterion_group!(benches, bench_estimate_ability, bench_detect_blockages);
criterion_main!(benches);
