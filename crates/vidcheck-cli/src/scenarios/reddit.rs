//! Reddit videos: non-empty listing, leading records carry the reddit
//! schema, and the first record's channel follows the `r/<subreddit>`
//! convention.

use vidcheck_proto::contract;
use vidcheck_proto::outcome::CheckFailure;
use vidcheck_proto::validate;

use super::{fetch_listing, CheckContext, Failed};

pub async fn check(ctx: &CheckContext) -> Result<String, Failed> {
    let body = fetch_listing(ctx, "/reddit/videos").await?;
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
        validate::validate_video(video, contract::REDDIT)
            .map_err(|failure| Failed::with_preview(failure, video, preview_chars))?;
    }

    let channel = videos[0]["channel"].as_str().unwrap_or("");
    if let Some(prefix) = contract::channel_prefix(contract::REDDIT) {
        if !channel.starts_with(prefix) {
            return Err(CheckFailure::ChannelFormat(channel.to_string()).into());
        }
    }

    Ok(format!("fetched {} reddit videos", videos.len()))
}
