//! Benchmarks for dataset generation and the social views
//!
//! Run with: cargo bench

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use touchgrass::challenges::{ChallengeBoard, ChallengeFilter};
use touchgrass::domain::ChallengeCategory;
use touchgrass::mock::{generate_users, MockDataset};
use touchgrass::social::{rank_users, LeaderboardMetric};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let now = Utc::now();

    group.bench_function("dataset", |b| {
        b.iter(|| MockDataset::generate(black_box(42), now))
    });

    for size in [50, 500, 5000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("users_{}", size), |b| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(7);
                generate_users(&mut rng, black_box(size), now)
            })
        });
    }

    group.finish();
}

fn bench_leaderboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("leaderboard");
    let now = Utc::now();

    for size in [50, 5000] {
        let mut rng = StdRng::seed_from_u64(7);
        let users = generate_users(&mut rng, size, now);

        group.throughput(Throughput::Elements(size as u64));
        for metric in LeaderboardMetric::all() {
            group.bench_function(format!("{:?}_{}", metric, size).to_lowercase(), |b| {
                b.iter(|| rank_users(black_box(&users), *metric, 10))
            });
        }
    }

    group.finish();
}

fn bench_board(c: &mut Criterion) {
    let dataset = MockDataset::generate(42, Utc::now());
    let board = ChallengeBoard::new(dataset.challenges);

    let filter = ChallengeFilter {
        active: Some(true),
        category: Some(ChallengeCategory::Outdoor),
        ..Default::default()
    };

    c.bench_function("board_filter", |b| b.iter(|| board.list(black_box(&filter))));
}

criterion_group!(benches, bench_generate, bench_leaderboard, bench_board);
criterion_main!(benches);
