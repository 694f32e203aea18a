//! Chronological post listing.
//!
//! A page is a post when its tag list contains `post` or `posts`; the
//! listing is ordered newest-first, with undated posts at the end. Like nav
//! construction this is a pure function over the frozen page collection.

use crate::content::meta::{PageMeta, Pages};
use crate::site::nav::has_post_tag;
use crate::utils::date::DateTimeUtc;

/// Build the post listing, newest first.
pub fn build_posts(pages: &Pages) -> Vec<&PageMeta> {
    let mut posts: Vec<&PageMeta> = pages
        .iter()
        .filter(|page| {
            page.front
                .as_ref()
                .is_some_and(|front| has_post_tag(&front.tags))
        })
        .collect();

    // Descending by date; `None < Some(_)` puts undated posts last
    posts.sort_by(|a, b| date_of(b).cmp(&date_of(a)));
    posts
}

fn date_of(page: &PageMeta) -> Option<DateTimeUtc> {
    page.front.as_ref().and_then(|front| front.date)
}

// ============================================================================
// Tests
// ============================================================================
