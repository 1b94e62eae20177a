//! Pure validators for listing envelopes and video records.
//!
//! Both walk a parsed `serde_json::Value` and stop at the first violation;
//! callers get exactly one failure per record, in the order the fields are
//! declared. Unknown extra fields never fail anything.

use serde_json::Value;

use crate::contract;
use crate::outcome::CheckFailure;

/// Check the listing envelope: the `success` flag must be truthy and every
/// key in `required` (caller-declared order) must be present.
pub fn validate_envelope(body: &Value, required: &[&str]) -> Result<(), CheckFailure> {
    if !is_truthy(&body["success"]) {
        let reason = body["error"]
            .as_str()
            .unwrap_or("Unknown error")
            .to_string();
        return Err(CheckFailure::ApiFailure(reason));
    }

    for key in required {
        if body.get(key).is_none() {
            return Err(CheckFailure::MissingKey((*key).to_string()));
        }
    }

    Ok(())
}

/// Check one video record against the contract for `expected_platform`:
/// base fields first, then the platform tag itself, then the platform's
/// extra fields from the contract table.
pub fn validate_video(record: &Value, expected_platform: &str) -> Result<(), CheckFailure> {
    for field in contract::BASE_FIELDS {
        if record.get(field).is_none() {
            return Err(CheckFailure::MissingField(field.to_string()));
        }
    }

    let actual = contract::platform_of(record);
    if actual != expected_platform {
        return Err(CheckFailure::PlatformMismatch {
            expected: expected_platform.to_string(),
            actual: actual.to_string(),
        });
    }

    for field in contract::platform_fields(expected_platform) {
        if record.get(field).is_none() {
            return Err(CheckFailure::MissingField(field.to_string()));
        }
    }

    Ok(())
}

/// Check that `records` are in non-increasing view-count order, pairwise over
/// every adjacent pair.
pub fn validate_popularity_order(records: &[Value]) -> Result<(), CheckFailure> {
    let mut prev: Option<i64> = None;
    for (index, record) in records.iter().enumerate() {
        let views = contract::view_count(record).map_err(CheckFailure::BadViewCount)?;
        if let Some(prev_views) = prev {
            if prev_views < views {
                return Err(CheckFailure::OrderingViolation {
                    index,
                    prev: prev_views,
                    next: views,
                });
            }
        }
        prev = Some(views);
    }
    Ok(())
}

// The service is loosely typed: some deployments report success as 1/0.
fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        _ => false,
    }
}
