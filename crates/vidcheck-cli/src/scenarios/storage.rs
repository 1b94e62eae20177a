//! Storage idempotence: ingestion is triggered for both platforms, then
//! again for YouTube, and the per-platform count must stay within the
//! configured growth tolerance: upsert semantics observed from outside.
//!
//! The pauses between calls give the aggregator room to settle and keep us
//! under whatever rate limit its upstream sources enforce; they are delays,
//! not synchronization.

use tokio::time::sleep;

use vidcheck_proto::contract;
use vidcheck_proto::outcome::CheckFailure;

use super::{fetch_listing, CheckContext, Failed};

pub async fn check(ctx: &CheckContext) -> Result<String, Failed> {
    let preview_chars = ctx.cfg.checks.preview_chars;
    let pause = ctx.cfg.ingest_pause();

    // Populate both platforms first.
    fetch_listing(ctx, "/youtube/trending").await?;
    sleep(pause).await;
    fetch_listing(ctx, "/reddit/videos").await?;
    sleep(pause).await;

    let listing = fetch_listing(ctx, "/videos").await?;
    let videos = contract::videos(&listing);
    if videos.is_empty() {
        return Err(Failed::with_preview(
            CheckFailure::EmptyListing,
            &listing,
            preview_chars,
        ));
    }

    let missing: Vec<&str> = [contract::YOUTUBE, contract::REDDIT]
        .into_iter()
        .filter(|p| !videos.iter().any(|v| contract::platform_of(v) == *p))
        .collect();
    if !missing.is_empty() {
        return Err(Failed::with_preview(
            CheckFailure::PlatformsAbsent(missing.join(", ")),
            &listing,
            preview_chars,
        ));
    }

    let before = videos
        .iter()
        .filter(|v| contract::platform_of(v) == contract::YOUTUBE)
        .count() as u64;

    // Trigger the same ingestion source again and watch the count.
    fetch_listing(ctx, "/youtube/trending").await?;
    sleep(pause).await;

    let filtered = fetch_listing(ctx, &format!("/videos?platform={}", contract::YOUTUBE)).await?;
    let after =
        contract::count(&filtered).unwrap_or(contract::videos(&filtered).len() as u64);

    // Trending rotates, so some growth is normal; doubling is not.
    if after as f64 > before as f64 * ctx.cfg.checks.growth_tolerance {
        return Err(Failed::with_preview(
            CheckFailure::CountAnomaly { before, after },
            &filtered,
            preview_chars,
        ));
    }

    Ok(format!(
        "upsert holding: {} -> {} youtube videos, {} total",
        before,
        after,
        videos.len()
    ))
}
