//! Catalog queries: the stored listing unfiltered, filtered per platform,
//! and sorted by popularity. Filter and ordering assertions run over every
//! returned record, not a sample.

use vidcheck_proto::contract;
use vidcheck_proto::outcome::CheckFailure;
use vidcheck_proto::validate;

use super::{fetch_listing, CheckContext, Failed};

pub async fn check(ctx: &CheckContext) -> Result<String, Failed> {
    let preview_chars = ctx.cfg.checks.preview_chars;

    let all = fetch_listing(ctx, "/videos").await?;
    let total = contract::count(&all).unwrap_or(contract::videos(&all).len() as u64);

    for platform in [contract::YOUTUBE, contract::REDDIT] {
        let body = fetch_listing(ctx, &format!("/videos?platform={}", platform)).await?;
        for video in contract::videos(&body) {
            let actual = contract::platform_of(video);
            if actual != platform {
                return Err(Failed::with_preview(
                    CheckFailure::PlatformMismatch {
                        expected: platform.to_string(),
                        actual: actual.to_string(),
                    },
                    video,
                    preview_chars,
                ));
            }
        }
    }

    let popular = fetch_listing(ctx, "/videos?sort=popular").await?;
    validate::validate_popularity_order(contract::videos(&popular))
        .map_err(|failure| Failed::with_preview(failure, &popular, preview_chars))?;

    Ok(format!("all catalog queries passing, total videos: {}", total))
}
