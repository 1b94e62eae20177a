//! Single-shot HTTP probe against one endpoint.

use serde_json::Value;
use std::time::Duration;
use vidcheck_proto::outcome::{truncate_preview, CheckFailure};

/// What one request came back as. Produced once, never mutated.
#[derive(Debug)]
pub struct ProbeResult {
    pub status: ProbeStatus,
    /// Parsed JSON body; present only when `status` is `Ok`.
    pub body: Option<Value>,
}

#[derive(Debug)]
pub enum ProbeStatus {
    Ok,
    /// Non-2xx response; `preview` is the raw body clipped for diagnostics.
    HttpError { code: u16, preview: String },
    Timeout,
    Transport(String),
    MalformedBody(String),
}

/// GET `url` once. No retries; callers that want repopulation call again
/// explicitly.
pub async fn probe(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
    preview_chars: usize,
) -> ProbeResult {
    tracing::debug!("GET {}", url);

    let resp = match client.get(url).timeout(timeout).send().await {
        Ok(r) => r,
        Err(e) => return failed(classify_request_error(e)),
    };

    let code = resp.status();
    let text = match resp.text().await {
        Ok(t) => t,
        Err(e) => return failed(classify_request_error(e)),
    };

    if !code.is_success() {
        return failed(ProbeStatus::HttpError {
            code: code.as_u16(),
            preview: truncate_preview(&text, preview_chars),
        });
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(body) => ProbeResult {
            status: ProbeStatus::Ok,
            body: Some(body),
        },
        Err(e) => failed(ProbeStatus::MalformedBody(e.to_string())),
    }
}

impl ProbeResult {
    /// Collapse into the parsed body or the failure it maps to, with the
    /// body preview (if any) for the report.
    pub fn into_body(self, timeout_secs: u64) -> Result<Value, (CheckFailure, Option<String>)> {
        match self.status {
            ProbeStatus::Ok => match self.body {
                Some(body) => Ok(body),
                None => Err((CheckFailure::MalformedBody("empty body".to_string()), None)),
            },
            ProbeStatus::HttpError { code, preview } => {
                Err((CheckFailure::HttpStatus { code }, Some(preview)))
            }
            ProbeStatus::Timeout => Err((CheckFailure::Timeout(timeout_secs), None)),
            ProbeStatus::Transport(msg) => Err((CheckFailure::Transport(msg), None)),
            ProbeStatus::MalformedBody(msg) => Err((CheckFailure::MalformedBody(msg), None)),
        }
    }
}

fn failed(status: ProbeStatus) -> ProbeResult {
    ProbeResult { status, body: None }
}

fn classify_request_error(e: reqwest::Error) -> ProbeStatus {
    if e.is_timeout() {
        ProbeStatus::Timeout
    } else {
        ProbeStatus::Transport(e.to_string())
    }
}
