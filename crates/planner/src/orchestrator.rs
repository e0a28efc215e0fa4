//! # Plan Orchestrator
//!
//! Coordinates one request end to end:
//! 1. Reject empty input
//! 2. Serve the model text from the cache, or fetch it from the source
//! 3. Unwrap the API envelope and parse the text
//! 4. Validate and rank every resource link
//! 5. Remember the text for later identical requests
//!
//! Plans are ranked per level. Course links are normalized and ranked as
//! courses; YouTube entries are canonicalized to their channel link, entries
//! that do not point at a channel are dropped, and the rest are ranked as
//! videos. Tool recommendations keep the model's entries but are reordered by
//! preference.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use catalog::parser::{parse_plan, parse_tools, unwrap_envelope};
use catalog::{
    AiTool, LearningPlan, LearningResource, Level, RankingConfig, Resource, ResourceKind,
};
use pipeline::{ResourceRanker, ResourceScorer, sort_by_preference};

use crate::cache::ResponseCache;
use crate::source::{GenerationRequest, ResponseSource};

/// Input rejected before any model call is made.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("topic must not be empty")]
    EmptyTopic,

    #[error("search query must not be empty")]
    EmptyQuery,
}

/// Model text for one request, and whether it came from the cache.
struct ModelText {
    text: String,
    cached: bool,
}

/// Main orchestrator: owns the source, the ranker and the response cache.
pub struct PlanOrchestrator {
    source: Arc<dyn ResponseSource>,
    ranker: Arc<ResourceRanker>,
    cache: ResponseCache,
}

impl PlanOrchestrator {
    pub fn new(
        source: Arc<dyn ResponseSource>,
        ranker: Arc<ResourceRanker>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            source,
            ranker,
            cache: ResponseCache::new(cache_ttl),
        }
    }

    /// Build an orchestrator whose ranker and cache follow `config`.
    pub fn from_config(source: Arc<dyn ResponseSource>, config: &RankingConfig) -> Result<Self> {
        let platforms = config
            .platform_table()
            .context("Invalid trusted platform table")?;
        let scorer = ResourceScorer::new(Arc::new(platforms), config.scoring);
        Ok(Self::new(
            source,
            Arc::new(ResourceRanker::new(scorer)),
            Duration::from_secs(config.cache_ttl_secs),
        ))
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn ranker(&self) -> &ResourceRanker {
        &self.ranker
    }

    /// Generate a ranked three-level learning plan for `topic`.
    pub fn generate_plan(&self, topic: &str) -> Result<LearningPlan> {
        self.generate_plan_at(topic, Utc::now())
    }

    /// `generate_plan` with an explicit creation time, which also fixes the
    /// plan id.
    pub fn generate_plan_at(&self, topic: &str, created_at: DateTime<Utc>) -> Result<LearningPlan> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(RequestError::EmptyTopic.into());
        }

        let start_time = Instant::now();
        let request = GenerationRequest::plan(topic);
        let response = self.model_text(&request)?;

        let mut plan = parse_plan(&response.text, created_at)
            .with_context(|| format!("Failed to parse learning plan for {topic:?}"))?;
        info!(
            "Parsed plan {} for {:?} with {} resources",
            plan.id,
            topic,
            plan.resource_count()
        );

        if !response.cached {
            self.cache.insert(&request, response.text);
        }

        self.rank_plan(&mut plan);

        info!(
            "Generated plan for {:?} in {:.2?}: {} resources kept",
            topic,
            start_time.elapsed(),
            plan.resource_count()
        );
        Ok(plan)
    }

    /// Recommend AI tools for `query`, most preferable first.
    ///
    /// A response that cannot be parsed yields an empty list.
    pub fn search_tools(&self, query: &str) -> Result<Vec<AiTool>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RequestError::EmptyQuery.into());
        }

        let start_time = Instant::now();
        let request = GenerationRequest::tools(query);
        let response = self.model_text(&request)?;

        let mut tools = match parse_tools(&response.text) {
            Ok(tools) => tools,
            Err(err) => {
                warn!("Could not parse tool recommendations for {:?}: {}", query, err);
                return Ok(Vec::new());
            }
        };

        if !response.cached {
            self.cache.insert(&request, response.text);
        }

        for tool in &mut tools {
            tool.url = linkcheck::normalize(&tool.url);
        }
        let tools = sort_by_preference(tools, query);

        info!(
            "Found {} tools for {:?} in {:.2?}",
            tools.len(),
            query,
            start_time.elapsed()
        );
        Ok(tools)
    }

    /// Validate and rank the resources of every level in place.
    pub fn rank_plan(&self, plan: &mut LearningPlan) {
        for level in Level::ALL {
            let path = plan.paths.get_mut(level);

            let courses = std::mem::take(&mut path.courses);
            let course_count = courses.len();
            path.courses = self.rank_resources(
                courses
                    .into_iter()
                    .map(|mut entry| {
                        entry.url = linkcheck::normalize(&entry.url);
                        entry
                    })
                    .collect(),
                ResourceKind::Course,
                level,
            );

            let youtube = std::mem::take(&mut path.youtube);
            let youtube_count = youtube.len();
            let channels: Vec<LearningResource> = youtube
                .into_iter()
                .filter_map(|mut entry| {
                    entry.url = linkcheck::canonicalize_youtube(&entry.url);
                    if linkcheck::is_youtube_channel(&entry.url) {
                        Some(entry)
                    } else {
                        debug!("Dropping non-channel YouTube link {:?}", entry.url);
                        None
                    }
                })
                .collect();
            path.youtube = self.rank_resources(channels, ResourceKind::Video, level);

            info!(
                "Ranked {} level: courses {}/{}, youtube {}/{}",
                level,
                path.courses.len(),
                course_count,
                path.youtube.len(),
                youtube_count
            );
        }
    }

    /// Rank plan entries and hand back the survivors, best first, with their
    /// score attached.
    fn rank_resources(
        &self,
        entries: Vec<LearningResource>,
        kind: ResourceKind,
        level: Level,
    ) -> Vec<LearningResource> {
        let resources: Vec<Resource> = entries
            .iter()
            .map(|entry| Resource::new(entry.url.clone(), entry.to_metadata(kind, level)))
            .collect();
        let keys: Vec<Resource> = resources.clone();
        let mut slots: Vec<Option<LearningResource>> = entries.into_iter().map(Some).collect();

        // A ranked resource belongs to the first unclaimed entry with the same
        // link and metadata. Identical inputs score identically and the sort is
        // stable, so claims follow input order.
        self.ranker
            .filter_and_sort(resources)
            .into_iter()
            .filter_map(|scored| {
                let index = (0..keys.len()).find(|&i| {
                    slots[i].is_some()
                        && keys[i].url == scored.url
                        && keys[i].metadata == scored.metadata
                })?;
                let mut entry = slots[index].take()?;
                entry.score = Some(scored.score);
                Some(entry)
            })
            .collect()
    }

    /// Model text for `request`: from the cache when fresh, otherwise fetched
    /// from the source and unwrapped.
    fn model_text(&self, request: &GenerationRequest) -> Result<ModelText> {
        if let Some(text) = self.cache.get(request) {
            debug!("Cache hit for {:?} {:?}", request.kind, request.query);
            return Ok(ModelText { text, cached: true });
        }

        let fetch_start = Instant::now();
        let body = self
            .source
            .fetch(request)
            .with_context(|| {
                format!("{} failed to answer {:?}", self.source.name(), request.kind)
            })?;
        info!(
            "Fetched {:?} response for {:?} from {} in {:.2?}",
            request.kind,
            request.query,
            self.source.name(),
            fetch_start.elapsed()
        );

        let text = unwrap_envelope(&body).context("Model API returned an unusable response")?;
        Ok(ModelText { text, cached: false })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RequestKind, StaticSource};
    use catalog::{ApiErrorKind, ParseError};
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn empty_level(level: &str) -> String {
        format!(
            r#"{{"level": "{level}", "description": "", "steps": [], "resources": {{"youtube": [], "courses": []}}}}"#
        )
    }

    fn plan_text() -> String {
        format!(
            r#"{{
  "topic": "Python",
  "paths": {{
    "beginner": {{
      "level": "beginner",
      "description": "basics",
      "steps": ["install", "syntax"],
      "resources": {{
        "youtube": [
          {{"title": "Elzero", "channelUrl": "youtube.com/@ElzeroWebSchool", "language": "arabic", "rating": 5}},
          {{"title": "A video", "channelUrl": "https://www.youtube.com/watch?v=abc"}},
          {{"title": "Mirror", "channelUrl": "https://m.youtube.com/channel/UC123?si=x", "language": "english"}}
        ],
        "courses": [
          {{"title": "Coursera", "url": "coursera.org/learn/python", "language": "english", "rating": 4.5, "topics": ["a", "b"]}},
          {{"title": "Blog", "url": "https://someblog.example/python"}},
          {{"title": "Udemy", "url": "https://www.udemy.com/course/python", "language": "english"}}
        ]
      }}
    }},
    "intermediate": {},
    "advanced": {}
  }}
}}"#,
            empty_level("intermediate"),
            empty_level("advanced")
        )
    }

    fn tools_text() -> &'static str {
        r#"{"tools": [
            {"name": "Paid", "url": "paid.ai", "pricing": "paid", "rating": 4.9},
            {"name": "Pick", "url": "https://pick.ai", "pricing": "free", "rating": 3.0, "recommended": true},
            {"name": "Free", "url": "https://free.ai", "pricing": "free", "rating": 4.9}
        ]}"#
    }

    /// Counts fetches so cache behavior is observable
    struct CountingSource {
        inner: StaticSource,
        calls: AtomicUsize,
    }

    impl ResponseSource for CountingSource {
        fn name(&self) -> &str {
            "CountingSource"
        }

        fn fetch(&self, request: &GenerationRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch(request)
        }
    }

    fn counting(inner: StaticSource) -> Arc<CountingSource> {
        Arc::new(CountingSource {
            inner,
            calls: AtomicUsize::new(0),
        })
    }

    fn orchestrator(source: Arc<dyn ResponseSource>) -> PlanOrchestrator {
        PlanOrchestrator::new(source, Arc::new(ResourceRanker::default()), Duration::from_secs(300))
    }

    // ============================================================================
    // Plans
    // ============================================================================

    #[test]
    fn test_generate_plan_ranks_each_level() {
        let source = StaticSource::new().with_response(RequestKind::Plan, plan_text());
        let orch = orchestrator(Arc::new(source));

        let plan = orch.generate_plan_at("Python", fixed_time()).unwrap();
        assert_eq!(plan.id, fixed_time().timestamp_millis().to_string());
        assert_eq!(plan.topic, "Python");

        let beginner = &plan.paths.beginner;
        // Untrusted blog dropped; scheme-less Coursera link normalized and ranked first
        let course_urls: Vec<&str> = beginner.courses.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(
            course_urls,
            vec!["https://coursera.org/learn/python", "https://www.udemy.com/course/python"]
        );
        let top = beginner.courses[0].score.unwrap();
        assert!((top - 1.0).abs() < 1e-9);
        assert!((beginner.courses[1].score.unwrap() - 0.9).abs() < 1e-9);

        // Video link dropped; channels canonicalized; Arabic channel ranks first
        let channel_urls: Vec<&str> = beginner.youtube.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(
            channel_urls,
            vec![
                "https://www.youtube.com/@ElzeroWebSchool",
                "https://www.youtube.com/channel/UC123",
            ]
        );
        assert!(beginner.youtube.iter().all(|entry| entry.score.is_some()));

        assert!(plan.paths.intermediate.courses.is_empty());
        assert_eq!(plan.resource_count(), 4);
    }

    #[test]
    fn test_same_link_entries_keep_their_own_scores() {
        let courses = r#"
            {"title": "Low", "url": "https://github.com/a", "language": "english"},
            {"title": "High", "url": "https://github.com/a", "language": "arabic", "rating": 5}"#;
        let text = format!(
            r#"{{"topic": "git", "paths": {{"beginner": {{"level": "beginner",
                "resources": {{"youtube": [], "courses": [{courses}]}}}},
              "intermediate": {}, "advanced": {}}}}}"#,
            empty_level("intermediate"),
            empty_level("advanced")
        );
        let orch = orchestrator(Arc::new(
            StaticSource::new().with_response(RequestKind::Plan, text),
        ));

        let plan = orch.generate_plan("git").unwrap();
        let ranked: Vec<(&str, f64)> = plan
            .paths
            .beginner
            .courses
            .iter()
            .map(|c| (c.title.as_str(), c.score.unwrap()))
            .collect();
        // High: 0.8 + 0.1 + 0.2 clamped to 1.0; Low: 0.8
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].0, "High");
        assert!((ranked[0].1 - 1.0).abs() < 1e-9);
        assert_eq!(ranked[1].0, "Low");
        assert!((ranked[1].1 - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_expired_responses_are_dropped_from_cache() {
        let source = StaticSource::new().with_response(RequestKind::Tools, tools_text());
        let orch = PlanOrchestrator::new(
            Arc::new(source),
            Arc::new(ResourceRanker::default()),
            Duration::from_millis(1),
        );

        for i in 0..20 {
            orch.search_tools(&format!("query {i}")).unwrap();
        }
        std::thread::sleep(Duration::from_millis(5));
        orch.search_tools("one more").unwrap();

        assert_eq!(orch.cache().len(), 1);
    }

    #[test]
    fn test_generate_plan_uses_cache() {
        let source = counting(StaticSource::new().with_response(RequestKind::Plan, plan_text()));
        let orch = orchestrator(source.clone());

        orch.generate_plan("Python").unwrap();
        orch.generate_plan("  python ").unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(orch.cache().len(), 1);
    }

    #[test]
    fn test_generate_plan_rejects_empty_topic() {
        let orch = orchestrator(Arc::new(StaticSource::new()));
        let err = orch.generate_plan("   ").unwrap_err();
        assert_eq!(err.downcast_ref::<RequestError>(), Some(&RequestError::EmptyTopic));
    }

    #[test]
    fn test_generate_plan_errors_are_not_cached() {
        let source = counting(
            StaticSource::new().with_response(RequestKind::Plan, r#"{"topic": "x"}"#),
        );
        let orch = orchestrator(source.clone());

        let err = orch.generate_plan("x").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ParseError>(),
            Some(ParseError::MissingField("paths"))
        ));
        assert!(orch.cache().is_empty());

        orch.generate_plan("x").unwrap_err();
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_api_error_envelope_is_reported() {
        let body = r#"{"error": {"code": 403, "status": "PERMISSION_DENIED"}}"#;
        let orch = orchestrator(Arc::new(
            StaticSource::new().with_response(RequestKind::Plan, body),
        ));

        let err = orch.generate_plan("rust").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ParseError>(),
            Some(ParseError::Api(ApiErrorKind::PermissionDenied))
        ));
    }

    #[test]
    fn test_missing_response_propagates() {
        let orch = orchestrator(Arc::new(StaticSource::new()));
        let err = orch.generate_plan("rust").unwrap_err();
        assert!(format!("{err:#}").contains("StaticSource"));
    }

    // ============================================================================
    // Tools
    // ============================================================================

    #[test]
    fn test_search_tools_sorted_and_normalized() {
        let orch = orchestrator(Arc::new(
            StaticSource::new().with_response(RequestKind::Tools, tools_text()),
        ));

        let tools = orch.search_tools("writing").unwrap();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Pick", "Free", "Paid"]);
        assert_eq!(tools[2].url, "https://paid.ai");
    }

    #[test]
    fn test_search_tools_unparseable_is_empty() {
        let source =
            counting(StaticSource::new().with_response(RequestKind::Tools, "no json here"));
        let orch = orchestrator(source.clone());

        assert!(orch.search_tools("anything").unwrap().is_empty());
        assert!(orch.cache().is_empty());
        assert_eq!(
            orch.search_tools(" ").unwrap_err().downcast_ref::<RequestError>(),
            Some(&RequestError::EmptyQuery)
        );
    }

    #[test]
    fn test_from_config() {
        let config = RankingConfig::from_toml_str("cache_ttl_secs = 0").unwrap();
        let source = counting(StaticSource::new().with_response(RequestKind::Tools, tools_text()));
        let orch = PlanOrchestrator::from_config(source.clone(), &config).unwrap();

        assert_eq!(orch.cache().ttl(), Duration::ZERO);
        orch.search_tools("q").unwrap();
        orch.search_tools("q").unwrap();
        // Zero TTL: every call goes to the source
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
