//! The checks themselves, one module per scenario.
//!
//! Scenarios run strictly sequentially: the catalog and storage checks read
//! records that the trending/reddit checks caused the service to ingest, so
//! the order in [`run_all`] is a real data dependency, not a preference.
//! Within a scenario every step gates the next and the first failure wins;
//! a failing scenario never stops its siblings.

pub mod catalog;
pub mod reddit;
pub mod storage;
pub mod youtube;

use serde_json::Value;

use vidcheck_proto::config::Config;
use vidcheck_proto::contract;
use vidcheck_proto::outcome::{truncate_preview, CheckFailure, ScenarioOutcome};
use vidcheck_proto::validate;

use crate::probe::probe;
use crate::report::Report;

/// Everything a scenario needs: one shared client and the run's config.
pub struct CheckContext {
    pub client: reqwest::Client,
    pub cfg: Config,
}

impl CheckContext {
    pub fn new(cfg: Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("vidcheck/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(cfg.connect_timeout())
            .timeout(cfg.request_timeout())
            .build()?;
        Ok(Self { client, cfg })
    }
}

/// A scenario step that did not survive: the failure plus an optional
/// clipped response body for the report.
#[derive(Debug)]
pub struct Failed {
    pub failure: CheckFailure,
    pub detail: Option<String>,
}

impl Failed {
    /// Attach the offending body, clipped, so the report can echo it.
    pub fn with_preview(failure: CheckFailure, body: &Value, max_chars: usize) -> Self {
        Self {
            failure,
            detail: Some(truncate_preview(&body.to_string(), max_chars)),
        }
    }
}

impl From<CheckFailure> for Failed {
    fn from(failure: CheckFailure) -> Self {
        Self {
            failure,
            detail: None,
        }
    }
}

/// Shared first steps of every scenario: probe the endpoint, then validate
/// the listing envelope. Returns the parsed body for scenario assertions.
pub(crate) async fn fetch_listing(ctx: &CheckContext, path: &str) -> Result<Value, Failed> {
    let url = ctx.cfg.endpoint(path);
    let preview_chars = ctx.cfg.checks.preview_chars;

    let result = probe(&ctx.client, &url, ctx.cfg.request_timeout(), preview_chars).await;
    let body = result
        .into_body(ctx.cfg.api.timeout_secs)
        .map_err(|(failure, detail)| Failed { failure, detail })?;

    validate::validate_envelope(&body, &contract::ENVELOPE_KEYS)
        .map_err(|failure| Failed::with_preview(failure, &body, preview_chars))?;

    match contract::count(&body) {
        Some(count) => tracing::info!("{} ok, count: {}", path, count),
        None => tracing::info!("{} ok", path),
    }

    Ok(body)
}

/// Run every scenario in its declared order, recording each outcome as it
/// lands so the operator sees progress live.
pub async fn run_all(ctx: &CheckContext, report: &mut Report) {
    report.record(run("youtube trending", youtube::check(ctx)).await);
    report.record(run("reddit videos", reddit::check(ctx)).await);
    report.record(run("catalog queries", catalog::check(ctx)).await);
    report.record(run("storage idempotence", storage::check(ctx)).await);
}

async fn run(
    name: &str,
    check: impl std::future::Future<Output = Result<String, Failed>>,
) -> ScenarioOutcome {
    match check.await {
        Ok(message) => {
            tracing::info!(scenario = name, "passed: {}", message);
            ScenarioOutcome::passed(name, message)
        }
        Err(failed) => {
            tracing::warn!(scenario = name, "failed: {}", failed.failure);
            ScenarioOutcome::failed(name, &failed.failure, failed.detail)
        }
    }
}
