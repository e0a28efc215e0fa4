//! Integration tests for the pipeline.
//!
//! These tests verify that link validation, scoring and filtering work
//! together on a realistic batch, including a custom platform table loaded
//! from configuration.

use catalog::{
    Language, Level, PlatformTable, RankingConfig, Resource, ResourceKind, ResourceMetadata,
    ScoringWeights,
};
use pipeline::filters::*;
use pipeline::{ResourceRanker, ResourceScorer};
use std::sync::Arc;

fn metadata(
    title: &str,
    language: Language,
    rating: Option<f64>,
    topics: &[&str],
) -> ResourceMetadata {
    ResourceMetadata {
        title: title.to_string(),
        description: String::new(),
        kind: ResourceKind::Course,
        level: Level::Intermediate,
        language,
        rating,
        topics: topics.iter().map(|t| t.to_string()).collect(),
    }
}

fn create_test_batch() -> Vec<Resource> {
    vec![
        Resource::new(
            "https://www.youtube.com/@elzero",
            metadata("Elzero", Language::Arabic, Some(4.5), &["html", "css"]),
        ),
        Resource::new(
            "https://github.com/rust-lang/book",
            metadata("The Book", Language::English, None, &[]),
        ),
        Resource::new(
            "https://example.com/course",
            metadata("Unlisted", Language::Arabic, Some(5.0), &["a", "b", "c", "d"]),
        ),
        Resource::new(
            "udemy.com/course/no-scheme",
            metadata("No scheme", Language::English, Some(5.0), &[]),
        ),
        Resource::new(
            "https://www.w3schools.com/css/",
            metadata("W3 CSS", Language::English, None, &[]),
        ),
        Resource::new(
            "https://m.youtube.com/@elzero?si=share",
            metadata("Elzero again", Language::Arabic, Some(4.0), &["html"]),
        ),
    ]
}

#[test]
fn test_default_ranking_end_to_end() {
    let ranker = ResourceRanker::default();
    let ranked = ranker.filter_and_sort(create_test_batch());

    let titles: Vec<&str> = ranked.iter().map(|r| r.metadata.title.as_str()).collect();
    // Elzero 1.0 (clamped), Elzero again 0.8+0.1+0.16+0.05 = 1.0 (clamped),
    // The Book 0.8, W3 CSS 0.75; unlisted and scheme-less links are gone.
    assert_eq!(titles, vec!["Elzero", "Elzero again", "The Book", "W3 CSS"]);

    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert!(ranked.iter().all(|r| r.score > 0.5 && r.score <= 1.0));
}

#[test]
fn test_dedup_and_language_filters() {
    let ranker = ResourceRanker::default()
        .with_filter(DuplicateLinkFilter)
        .with_filter(LanguageFilter::new(Language::Arabic));

    let ranked = ranker.filter_and_sort(create_test_batch());
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].metadata.title, "Elzero");
}

#[test]
fn test_configured_platforms_and_weights() {
    let toml = r#"
        [scoring]
        min_score = 0.7
        language_bonus = 0.0

        [[platforms]]
        domain_suffix = "academy.hsoub.com"
        display_name = "Hsoub Academy"
        kind = "course"
        base_weight = 0.9

        [[platforms]]
        domain_suffix = "github.com"
        display_name = "GitHub"
        kind = "documentation"
        base_weight = 0.6
    "#;
    let cfg = RankingConfig::from_toml_str(toml).unwrap();
    let table = Arc::new(cfg.platform_table().unwrap());
    let ranker = ResourceRanker::new(ResourceScorer::new(table, cfg.scoring));

    let resources = vec![
        Resource::new(
            "https://github.com/rust-lang/book",
            metadata("GitHub", Language::English, None, &[]),
        ),
        Resource::new(
            "https://academy.hsoub.com/programming/python/",
            metadata("Hsoub", Language::Arabic, None, &[]),
        ),
        Resource::new(
            "https://www.coursera.org/learn/x",
            metadata("Coursera", Language::English, Some(5.0), &[]),
        ),
    ];

    let ranked = ranker.filter_and_sort(resources);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].metadata.title, "Hsoub");
    assert!((ranked[0].score - 0.9).abs() < 1e-9);
}

#[test]
fn test_shared_scorer_across_threads() {
    let scorer = Arc::new(ResourceScorer::new(
        Arc::new(PlatformTable::builtin()),
        ScoringWeights::default(),
    ));
    let meta = metadata("x", Language::English, None, &[]);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let scorer = scorer.clone();
            let meta = meta.clone();
            std::thread::spawn(move || scorer.score("https://github.com/x", &meta))
        })
        .collect();

    for handle in handles {
        let score = handle.join().unwrap();
        assert!((score - 0.8).abs() < 1e-9);
    }
}
