//! What the aggregation service promises over the wire.
//!
//! Every listing endpoint wraps its payload in the same envelope:
//! `{success: bool, count: int, videos: [...], error?: string}`. The video
//! records inside are only ever inspected structurally: the service is free
//! to add fields, and platforms beyond the two we know about are validated
//! against an empty extra-field set rather than rejected.

use serde_json::Value;

/// Platform tag for videos ingested from YouTube trending.
pub const YOUTUBE: &str = "youtube";

/// Platform tag for videos ingested from Reddit.
pub const REDDIT: &str = "reddit";

/// Top-level keys every listing envelope must carry, in check order.
pub const ENVELOPE_KEYS: [&str; 3] = ["success", "count", "videos"];

/// Fields every video record must carry regardless of platform, in check order.
pub const BASE_FIELDS: [&str; 4] = ["videoId", "platform", "title", "embedUrl"];

/// Extra required fields per platform. Platforms not listed here require
/// nothing beyond [`BASE_FIELDS`]; adding a platform is a new row, not a new
/// code path.
const PLATFORM_FIELDS: &[(&str, &[&str])] = &[
    (YOUTUBE, &["thumbnail", "channel", "viewCount", "publishedAt"]),
    (REDDIT, &["channel", "publishedAt"]),
];

/// Known `embedUrl` prefixes per platform.
const EMBED_PREFIXES: &[(&str, &str)] = &[(YOUTUBE, "https://www.youtube.com/embed/")];

/// Known `channel` naming prefixes per platform (reddit channels are subreddits).
const CHANNEL_PREFIXES: &[(&str, &str)] = &[(REDDIT, "r/")];

pub fn platform_fields(platform: &str) -> &'static [&'static str] {
    PLATFORM_FIELDS
        .iter()
        .find(|(p, _)| *p == platform)
        .map(|(_, fields)| *fields)
        .unwrap_or(&[])
}

pub fn embed_prefix(platform: &str) -> Option<&'static str> {
    EMBED_PREFIXES
        .iter()
        .find(|(p, _)| *p == platform)
        .map(|(_, prefix)| *prefix)
}

pub fn channel_prefix(platform: &str) -> Option<&'static str> {
    CHANNEL_PREFIXES
        .iter()
        .find(|(p, _)| *p == platform)
        .map(|(_, prefix)| *prefix)
}

/// The `videos` payload of a listing envelope. Missing or mistyped payloads
/// read as empty; envelope validation has already reported those.
pub fn videos(body: &Value) -> &[Value] {
    body["videos"].as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// The envelope `count` field, when present and numeric.
pub fn count(body: &Value) -> Option<u64> {
    body["count"].as_u64()
}

/// The platform tag of a single record ("" when absent or mistyped).
pub fn platform_of(record: &Value) -> &str {
    record["platform"].as_str().unwrap_or("")
}

/// View counts arrive as a JSON number from some backends and as a decimal
/// string from others; both coerce. Absent counts read as 0 so records the
/// service never counted sort last.
pub fn view_count(record: &Value) -> Result<i64, String> {
    match &record["viewCount"] {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| format!("viewCount out of range: {}", n)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("viewCount not numeric: {:?}", s)),
        other => Err(format!("viewCount not numeric: {}", other)),
    }
}
