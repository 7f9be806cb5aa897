use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde::Serialize;
use sjson::Config;

#[derive(Clone, Serialize)]
struct GitHubRepo {
    id: u64,
    name: String,
    repo: String,
    description: Option<String>,
    #[serde(rename = "createdAt")]
    created_at: String,
    stars: u64,
    forks: u64,
    score: f64,
    topics: Vec<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    labels: HashMap<String, u32>,
}

sjson::encode_struct!(GitHubRepo {
    id: u64 => "id",
    name: String => "name",
    repo: String => "repo",
    description: Option<String> => "description",
    created_at: String => "createdAt",
    stars: u64 => "stars",
    forks: u64 => "forks",
    score: f64 => "score",
    topics: Vec<String> => "topics",
    #[omitempty]
    labels: HashMap<String, u32> => "labels",
});

fn generate_repos(count: usize) -> Vec<GitHubRepo> {
    (0..count)
        .map(|i| GitHubRepo {
            id: 10_000 + i as u64,
            name: format!("project-{i}"),
            repo: format!("owner-{}/project-{i}", i % 17),
            description: (i % 3 != 0).then(|| format!("Tool number {i}\nwith \"quotes\"")),
            created_at: format!("2024-01-{:02}T12:00:00Z", i % 28 + 1),
            stars: (i as u64 * 7919) % 100_000,
            forks: (i as u64 * 104_729) % 5_000,
            score: i as f64 / 7.0,
            topics: (0..i % 4).map(|t| format!("topic-{t}")).collect(),
            labels: (0..i % 5)
                .map(|l| (format!("label-{l}"), l as u32))
                .collect(),
        })
        .collect()
}

fn bench_repos(c: &mut Criterion) {
    let repos = generate_repos(500);
    let sorted = Config::new().with_sort_map_keys(true);

    let mut group = c.benchmark_group("github_repos");
    group.bench_function("encode_sjson", |b| {
        b.iter(|| {
            let encoded = sjson::to_vec(black_box(&repos)).expect("encode failed");
            black_box(encoded);
        });
    });
    group.bench_function("encode_sjson_sorted", |b| {
        b.iter(|| {
            let encoded =
                sjson::to_vec_with_config(black_box(&repos), sorted).expect("encode failed");
            black_box(encoded);
        });
    });
    group.bench_function("encode_serde_json", |b| {
        b.iter(|| {
            let encoded = serde_json::to_vec(black_box(&repos)).expect("json encode failed");
            black_box(encoded);
        });
    });
    group.finish();
}

fn bench_value(c: &mut Criterion) {
    let repos = generate_repos(200);
    let value = serde_json::to_value(&repos).expect("to_value failed");

    let mut group = c.benchmark_group("json_value");
    group.bench_function("encode_sjson", |b| {
        b.iter(|| {
            let encoded = sjson::to_vec(black_box(&value)).expect("encode failed");
            black_box(encoded);
        });
    });
    group.bench_function("encode_serde_json", |b| {
        b.iter(|| {
            let encoded = serde_json::to_vec(black_box(&value)).expect("json encode failed");
            black_box(encoded);
        });
    });
    group.finish();
}

fn bench_numbers(c: &mut Criterion) {
    let ints: Vec<i64> = (0..4096).map(|i| i * 2_654_435_761 - 1_000_000).collect();
    let floats: Vec<f64> = (0..4096).map(|i| i as f64 * 0.731).collect();

    let mut group = c.benchmark_group("numbers");
    group.bench_function("ints", |b| {
        b.iter(|| black_box(sjson::to_vec(black_box(&ints)).expect("encode failed")));
    });
    group.bench_function("floats", |b| {
        b.iter(|| black_box(sjson::to_vec(black_box(&floats)).expect("encode failed")));
    });
    group.finish();
}

criterion_group!(benches, bench_repos, bench_value, bench_numbers);
criterion_main!(benches);
