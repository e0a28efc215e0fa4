//! Parser for model output.
//!
//! The language model is asked for JSON, but what comes back is free-form
//! text: the JSON may be wrapped in prose or code fences, fields may be
//! missing, and numbers sometimes arrive as strings. This module handles:
//! - unwrapping the API response envelope (`candidates[0].content.parts[0].text`)
//! - extracting the outermost `{ ... }` block from the text
//! - walking the JSON tree by hand, so one malformed field never sinks the
//!   whole document
//!
//! Structural problems (no JSON, a missing plan level) are errors; bad or
//! absent optional fields fall back to neutral values.

use crate::error::{ApiErrorKind, ParseError, Result};
use crate::types::*;
use chrono::{DateTime, Utc};
use serde_json::Value;

// =============================================================================
// Envelope and JSON extraction
// =============================================================================

/// Return the model's text from a raw API body.
///
/// Bodies that are not an API envelope (plain model text, or JSON without
/// `candidates`/`error`) are returned unchanged.
pub fn unwrap_envelope(body: &str) -> Result<String> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return Ok(body.to_string()),
    };

    if let Some(error) = value.get("error") {
        let status = error.get("status").and_then(Value::as_str).unwrap_or("UNKNOWN");
        return Err(ParseError::Api(ApiErrorKind::from_status(status)));
    }

    if value.get("candidates").is_none() {
        return Ok(body.to_string());
    }

    value
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
        .ok_or(ParseError::EmptyResponse)
}

/// Slice from the first `{` to the last `}` of `text`, inclusive.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

fn parse_json_value(text: &str) -> Result<Value> {
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if value.is_object() || value.is_array() {
            return Ok(value);
        }
    }
    let block = extract_json_object(trimmed).ok_or(ParseError::NoJsonObject)?;
    Ok(serde_json::from_str(block)?)
}

// =============================================================================
// Field helpers
// =============================================================================

fn str_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Numbers may arrive as JSON numbers or as numeric strings.
fn num_field(value: &Value, key: &str) -> Option<f64> {
    let number = match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn bool_field(value: &Value, key: &str) -> Option<bool> {
    match value.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// A list of strings; non-string items are skipped, a bare string becomes a
/// one-element list.
fn string_list(value: &Value, key: &str) -> Vec<String> {
    match value.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

pub fn parse_language(s: &str) -> Language {
    match s.trim().to_lowercase().as_str() {
        "arabic" | "ar" | "العربية" | "عربي" => Language::Arabic,
        _ => Language::English,
    }
}

pub fn parse_level(s: &str) -> Option<Level> {
    match s.trim().to_ascii_lowercase().as_str() {
        "beginner" => Some(Level::Beginner),
        "intermediate" => Some(Level::Intermediate),
        "advanced" => Some(Level::Advanced),
        _ => None,
    }
}

/// Unknown tiers are treated as paid, the least preferred tier.
pub fn parse_pricing(s: &str) -> Pricing {
    match s.trim().to_ascii_lowercase().as_str() {
        "free" => Pricing::Free,
        "freemium" => Pricing::Freemium,
        _ => Pricing::Paid,
    }
}

fn parse_access(s: &str) -> Access {
    match s.trim().to_ascii_lowercase().as_str() {
        "paid" => Access::Paid,
        _ => Access::Free,
    }
}

// =============================================================================
// Learning plans
// =============================================================================

/// Parse a plan from model text, stamping it with `created_at`.
///
/// The plan id is the creation time in milliseconds.
pub fn parse_plan(text: &str, created_at: DateTime<Utc>) -> Result<LearningPlan> {
    let root = parse_json_value(text)?;

    let topic = str_field(&root, "topic").ok_or(ParseError::MissingField("topic"))?;
    let paths = root
        .get("paths")
        .filter(|p| p.is_object())
        .ok_or(ParseError::MissingField("paths"))?;

    let beginner = parse_path(paths, Level::Beginner)?;
    let intermediate = parse_path(paths, Level::Intermediate)?;
    let advanced = parse_path(paths, Level::Advanced)?;

    Ok(LearningPlan {
        id: created_at.timestamp_millis().to_string(),
        topic,
        paths: PlanPaths {
            beginner,
            intermediate,
            advanced,
        },
        created_at,
    })
}

fn parse_path(paths: &Value, level: Level) -> Result<LearningPath> {
    let path = paths
        .get(level.as_str())
        .filter(|p| p.is_object())
        .ok_or(ParseError::MissingLevel(level))?;

    let resources = path
        .get("resources")
        .ok_or(ParseError::MissingResources(level))?;
    let youtube = resources
        .get("youtube")
        .and_then(Value::as_array)
        .ok_or(ParseError::MissingResources(level))?;
    let courses = resources
        .get("courses")
        .and_then(Value::as_array)
        .ok_or(ParseError::MissingResources(level))?;

    Ok(LearningPath {
        level,
        description: str_field(path, "description").unwrap_or_default(),
        steps: string_list(path, "steps"),
        youtube: youtube.iter().filter_map(parse_resource).collect(),
        courses: courses.iter().filter_map(parse_resource).collect(),
    })
}

fn parse_resource(value: &Value) -> Option<LearningResource> {
    if !value.is_object() {
        tracing::warn!("skipping non-object resource entry: {}", value);
        return None;
    }

    // YouTube entries carry their link as `channelUrl`
    let url = str_field(value, "channelUrl")
        .or_else(|| str_field(value, "url"))
        .unwrap_or_default();
    let title = str_field(value, "title").unwrap_or_default();
    if url.is_empty() {
        tracing::warn!("resource {:?} has no link", title);
    }

    Some(LearningResource {
        title,
        url,
        description: str_field(value, "description").unwrap_or_default(),
        language: str_field(value, "language")
            .map(|s| parse_language(&s))
            .unwrap_or(Language::English),
        access: str_field(value, "type")
            .map(|s| parse_access(&s))
            .unwrap_or(Access::Free),
        platform: str_field(value, "platform"),
        channel: str_field(value, "channel"),
        year: num_field(value, "year")
            .filter(|y| (0.0..=f64::from(u16::MAX)).contains(y))
            .map(|y| y as u16),
        rating: num_field(value, "rating"),
        topics: string_list(value, "topics"),
        level: str_field(value, "level").and_then(|s| parse_level(&s)),
        score: None,
    })
}

// =============================================================================
// AI tools
// =============================================================================

/// Parse tool recommendations from model text.
///
/// Accepts `{"tools": [...]}` or a bare array. Entries without a name are
/// dropped.
pub fn parse_tools(text: &str) -> Result<Vec<AiTool>> {
    let root = parse_json_value(text)?;
    let items = match &root {
        Value::Array(items) => items,
        other => other
            .get("tools")
            .and_then(Value::as_array)
            .ok_or(ParseError::MissingField("tools"))?,
    };

    Ok(items.iter().filter_map(parse_tool).collect())
}

fn parse_tool(value: &Value) -> Option<AiTool> {
    let Some(name) = str_field(value, "name") else {
        tracing::warn!("skipping tool entry without a name");
        return None;
    };

    Some(AiTool {
        name,
        description: str_field(value, "description").unwrap_or_default(),
        url: str_field(value, "url").unwrap_or_default(),
        pricing: str_field(value, "pricing")
            .map(|s| parse_pricing(&s))
            .unwrap_or(Pricing::Paid),
        arabic_support: bool_field(value, "arabicSupport").unwrap_or(false),
        rating: num_field(value, "rating"),
        tags: string_list(value, "tags"),
        features: string_list(value, "features"),
        recommended: bool_field(value, "recommended").unwrap_or(false),
        popularity: num_field(value, "popularity").unwrap_or(0.0),
    })
}
