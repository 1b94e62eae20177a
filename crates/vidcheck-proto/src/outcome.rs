//! Failure taxonomy and per-scenario outcomes.
//!
//! Every way a check can go wrong maps to one `CheckFailure` variant, and
//! every failure is recoverable at the scenario boundary: it becomes a failed
//! `ScenarioOutcome` and the run moves on to the next scenario.

use chrono::{DateTime, Local};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckFailure {
    #[error("HTTP {code}")]
    HttpStatus { code: u16 },

    #[error("request timeout ({0}s)")]
    Timeout(u64),

    #[error("request error: {0}")]
    Transport(String),

    #[error("invalid JSON response: {0}")]
    MalformedBody(String),

    #[error("API returned success=false: {0}")]
    ApiFailure(String),

    #[error("missing expected field: {0}")]
    MissingKey(String),

    #[error("video missing required field: {0}")]
    MissingField(String),

    #[error("platform mismatch: expected {expected}, got {actual}")]
    PlatformMismatch { expected: String, actual: String },

    #[error("videos not sorted by popularity: {prev} < {next} at position {index}")]
    OrderingViolation { index: usize, prev: i64, next: i64 },

    #[error("possible duplicates: {before} -> {after}")]
    CountAnomaly { before: u64, after: u64 },

    #[error("no videos returned")]
    EmptyListing,

    #[error("invalid embed URL: {0}")]
    EmbedUrlFormat(String),

    #[error("invalid channel format: {0}")]
    ChannelFormat(String),

    #[error("missing platforms in listing: {0}")]
    PlatformsAbsent(String),

    #[error("{0}")]
    BadViewCount(String),
}

/// One scenario's verdict. Created once when the scenario finishes and only
/// read by the reporter afterwards.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    pub passed: bool,
    pub message: String,
    /// Truncated response body, echoed by the reporter on failure only.
    pub detail: Option<String>,
    pub timestamp: DateTime<Local>,
}

impl ScenarioOutcome {
    pub fn passed(name: &str, message: String) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message,
            detail: None,
            timestamp: Local::now(),
        }
    }

    pub fn failed(name: &str, failure: &CheckFailure, detail: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: failure.to_string(),
            detail,
            timestamp: Local::now(),
        }
    }
}

/// Clip a response body to `max_chars` for diagnostics output.
pub fn truncate_preview(body: &str, max_chars: usize) -> String {
    if body.chars().count() <= max_chars {
        return body.to_string();
    }
    let clipped: String = body.chars().take(max_chars).collect();
    format!("{}...", clipped)
}
