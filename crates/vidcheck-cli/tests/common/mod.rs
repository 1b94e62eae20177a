//! In-process stand-in for the aggregation service.
//!
//! Ingestion endpoints upsert fixture records into a shared in-memory store
//! keyed by videoId, the way the real service deduplicates; the catalog
//! endpoint filters and sorts whatever is stored. A duplicating variant
//! mints fresh ids on every fetch to model a broken upsert.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use vidcheck_cli::scenarios::CheckContext;
use vidcheck_proto::config::Config;

#[derive(Clone, Default)]
pub struct MockHub {
    store: Arc<Mutex<BTreeMap<String, Value>>>,
    fetches: Arc<Mutex<u32>>,
    /// When true, every trending fetch mints fresh videoIds instead of
    /// re-upserting the same ones.
    duplicate_on_refetch: bool,
}

impl MockHub {
    pub fn duplicating() -> Self {
        Self {
            duplicate_on_refetch: true,
            ..Self::default()
        }
    }

    pub fn router(self) -> Router {
        Router::new()
            .route("/api/youtube/trending", get(youtube_trending))
            .route("/api/reddit/videos", get(reddit_videos))
            .route("/api/videos", get(videos))
            .with_state(self)
    }

    pub fn upsert_records(&self, records: &[Value]) {
        let mut store = self.store.lock().unwrap();
        for record in records {
            let id = record["videoId"].as_str().unwrap().to_string();
            store.insert(id, record.clone());
        }
    }

    /// The catalog listing: stored records, optionally filtered by
    /// `platform` and sorted by `sort=popular`, wrapped in the envelope.
    pub fn listing(&self, params: &HashMap<String, String>) -> Value {
        let mut records: Vec<Value> = self.store.lock().unwrap().values().cloned().collect();
        if let Some(platform) = params.get("platform") {
            records.retain(|v| v["platform"] == platform.as_str());
        }
        if params.get("sort").map(|s| s == "popular").unwrap_or(false) {
            records.sort_by_key(|v| std::cmp::Reverse(stored_view_count(v)));
        }
        envelope(records)
    }
}

async fn youtube_trending(State(hub): State<MockHub>) -> Json<Value> {
    let generation = {
        let mut fetches = hub.fetches.lock().unwrap();
        *fetches += 1;
        if hub.duplicate_on_refetch {
            *fetches
        } else {
            0
        }
    };
    let records = youtube_records(generation);
    hub.upsert_records(&records);
    Json(envelope(records))
}

async fn reddit_videos(State(hub): State<MockHub>) -> Json<Value> {
    let records = reddit_records();
    hub.upsert_records(&records);
    Json(envelope(records))
}

async fn videos(
    State(hub): State<MockHub>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    Json(hub.listing(&params))
}

pub fn envelope(records: Vec<Value>) -> Value {
    json!({"success": true, "count": records.len(), "videos": records})
}

pub fn youtube_records(generation: u32) -> Vec<Value> {
    [("1", "1500"), ("2", "900"), ("3", "300")]
        .iter()
        .map(|(n, views)| {
            json!({
                "videoId": format!("yt-{}-{}", generation, n),
                "platform": "youtube",
                "title": format!("Trending {}", n),
                "embedUrl": format!("https://www.youtube.com/embed/yt-{}-{}", generation, n),
                "thumbnail": format!("https://i.ytimg.com/vi/yt-{}-{}/default.jpg", generation, n),
                "channel": "Some Channel",
                "viewCount": views,
                "publishedAt": "2024-01-01T00:00:00Z"
            })
        })
        .collect()
}

pub fn reddit_records() -> Vec<Value> {
    [("1", 120), ("2", 80)]
        .iter()
        .map(|(n, views)| {
            json!({
                "videoId": format!("rd-{}", n),
                "platform": "reddit",
                "title": format!("Reddit clip {}", n),
                "embedUrl": format!("https://v.redd.it/rd-{}", n),
                "channel": "r/videos",
                "viewCount": views,
                "publishedAt": "2024-01-02T00:00:00Z"
            })
        })
        .collect()
}

// Fixture counts arrive as strings for youtube and numbers for reddit, like
// the live backends they imitate.
fn stored_view_count(record: &Value) -> i64 {
    match &record["viewCount"] {
        Value::Number(n) => n.as_i64().unwrap_or(0),
        Value::String(s) => s.parse().unwrap_or(0),
        _ => 0,
    }
}

/// Serve any router on an ephemeral local port, returning its base URL.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("mock server addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });
    format!("http://{}", addr)
}

pub async fn spawn_hub() -> String {
    serve(MockHub::default().router()).await
}

pub async fn spawn_duplicating_hub() -> String {
    serve(MockHub::duplicating().router()).await
}

/// Config pointed at a mock: short timeouts, no ingest pauses.
pub fn test_config(base_url: &str) -> Config {
    let mut cfg = Config::default();
    cfg.api.base_url = base_url.to_string();
    cfg.api.timeout_secs = 5;
    cfg.api.connect_timeout_secs = 5;
    cfg.checks.pause_secs = 0;
    cfg
}

pub fn ctx(cfg: Config) -> CheckContext {
    CheckContext::new(cfg).expect("build check context")
}
