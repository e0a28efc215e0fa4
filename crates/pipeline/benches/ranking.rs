//! Benchmarks for scoring and ranking
//!
//! Run with: cargo bench --package pipeline
//!
//! Ranks a synthetic batch mixing trusted, untrusted and malformed links.

use catalog::{AiTool, Language, Level, Pricing, Resource, ResourceKind, ResourceMetadata};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pipeline::filters::DuplicateLinkFilter;
use pipeline::{ResourceRanker, sort_by_preference};

const HOSTS: [&str; 6] = [
    "https://www.youtube.com/@channel",
    "https://www.coursera.org/learn/course",
    "https://github.com/org/repo",
    "https://example.com/page",
    "udemy.com/no-scheme",
    "https://developer.mozilla.org/docs/",
];

fn build_batch(size: usize) -> Vec<Resource> {
    (0..size)
        .map(|i| {
            let url = format!("{}{}", HOSTS[i % HOSTS.len()], i);
            Resource::new(
                url,
                ResourceMetadata {
                    title: format!("resource {i}"),
                    description: String::new(),
                    kind: ResourceKind::Course,
                    level: Level::Beginner,
                    language: if i % 3 == 0 { Language::Arabic } else { Language::English },
                    rating: if i % 4 == 0 { None } else { Some((i % 5) as f64 + 1.0) },
                    topics: (0..i % 6).map(|t| format!("topic {t}")).collect(),
                },
            )
        })
        .collect()
}

fn bench_filter_and_sort(c: &mut Criterion) {
    let ranker = ResourceRanker::default();
    let batch = build_batch(500);

    c.bench_function("filter_and_sort_500", |b| {
        b.iter(|| {
            let ranked = ranker.filter_and_sort(black_box(batch.clone()));
            black_box(ranked)
        })
    });
}

fn bench_filter_and_sort_dedup(c: &mut Criterion) {
    let ranker = ResourceRanker::default().with_filter(DuplicateLinkFilter);
    let batch = build_batch(500);

    c.bench_function("filter_and_sort_dedup_500", |b| {
        b.iter(|| {
            let ranked = ranker.filter_and_sort(black_box(batch.clone()));
            black_box(ranked)
        })
    });
}

fn bench_sort_by_preference(c: &mut Criterion) {
    let tools: Vec<AiTool> = (0..200)
        .map(|i| AiTool {
            name: format!("tool {i}"),
            description: String::new(),
            url: format!("https://tool{i}.ai"),
            pricing: [Pricing::Free, Pricing::Freemium, Pricing::Paid][i % 3],
            arabic_support: i % 2 == 0,
            rating: if i % 7 == 0 { None } else { Some((i % 5) as f64) },
            tags: vec![],
            features: vec![],
            recommended: i % 11 == 0,
            popularity: (i % 13) as f64,
        })
        .collect();

    c.bench_function("sort_by_preference_200", |b| {
        b.iter(|| {
            let sorted = sort_by_preference(black_box(tools.clone()), "أدوات الكتابة");
            black_box(sorted)
        })
    });
}

criterion_group!(
    benches,
    bench_filter_and_sort,
    bench_filter_and_sort_dedup,
    bench_sort_by_preference
);
criterion_main!(benches);
