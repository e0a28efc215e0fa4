//! Where model responses come from.
//!
//! The orchestrator does not talk to the network itself: it asks a
//! `ResponseSource` for the raw text the model produced. A hosted-API client
//! implements this trait outside this workspace; `StaticSource` serves fixed
//! responses for the CLI and tests.

use anyhow::Result;
use std::collections::HashMap;
use thiserror::Error;

/// What the model was asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// A three-level learning plan for a topic
    Plan,
    /// AI tool recommendations for a query
    Tools,
}

/// A request for model output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenerationRequest {
    pub kind: RequestKind,
    pub query: String,
}

impl GenerationRequest {
    pub fn plan(topic: impl Into<String>) -> Self {
        Self {
            kind: RequestKind::Plan,
            query: topic.into(),
        }
    }

    pub fn tools(query: impl Into<String>) -> Self {
        Self {
            kind: RequestKind::Tools,
            query: query.into(),
        }
    }
}

/// Errors a response source can report.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("no response available for {kind:?} request {query:?}")]
    NoResponse { kind: RequestKind, query: String },
}

/// Supplier of raw model output.
///
/// `Send + Sync` so one source can back an orchestrator shared across
/// threads.
pub trait ResponseSource: Send + Sync {
    /// Returns the name of this source (for logging/debugging)
    fn name(&self) -> &str;

    /// Fetch the raw response body for `request`.
    ///
    /// The body may be a full API envelope or bare model text; the parser
    /// accepts both.
    fn fetch(&self, request: &GenerationRequest) -> Result<String>;
}

/// Serves canned responses, one per request kind.
///
/// A response registered for a kind answers every query of that kind.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    responses: HashMap<RequestKind, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the response for `kind` (builder pattern).
    pub fn with_response(mut self, kind: RequestKind, body: impl Into<String>) -> Self {
        self.responses.insert(kind, body.into());
        self
    }
}

impl ResponseSource for StaticSource {
    fn name(&self) -> &str {
        "StaticSource"
    }

    fn fetch(&self, request: &GenerationRequest) -> Result<String> {
        self.responses.get(&request.kind).cloned().ok_or_else(|| {
            SourceError::NoResponse {
                kind: request.kind,
                query: request.query.clone(),
            }
            .into()
        })
    }
}
