//! YouTube trending: the listing must be non-empty, leading records must
//! carry the full youtube schema, and the first embed URL must point at the
//! YouTube embed player.

use vidcheck_proto::contract;
use vidcheck_proto::outcome::CheckFailure;
use vidcheck_proto::validate;

use super::{fetch_listing, CheckContext, Failed};

pub async fn check(ctx: &CheckContext) -> Result<String, Failed> {
    let body = fetch_listing(ctx, "/youtube/trending").await?;
    let preview_chars = ctx.cfg.checks.preview_chars;

    let videos = contract::videos(&body);
    if videos.is_empty() {
        return Err(Failed::with_preview(
            CheckFailure::EmptyListing,
            &body,
            preview_chars,
        ));
    }

    for video in videos.iter().take(ctx.cfg.checks.sample_size) {
        validate::validate_video(video, contract::YOUTUBE)
            .map_err(|failure| Failed::with_preview(failure, video, preview_chars))?;
    }

    let embed_url = videos[0]["embedUrl"].as_str().unwrap_or("");
    if let Some(prefix) = contract::embed_prefix(contract::YOUTUBE) {
        if !embed_url.starts_with(prefix) {
            return Err(CheckFailure::EmbedUrlFormat(embed_url.to_string()).into());
        }
    }

    Ok(format!("fetched {} trending videos", videos.len()))
}
