//! Navigation menu construction from page metadata.
//!
//! `build_nav` turns the frozen page collection into an ordered list of
//! entries for one menu location. It is a pure function: malformed or
//! missing metadata excludes a page or falls back to a default, it never
//! fails, and re-running it over unchanged input yields identical output.

use crate::content::meta::{PageMeta, Pages};
use crate::content::frontmatter::FrontMatter;
use regex::Regex;
use std::cmp::Ordering;
use std::path::Path;
use std::sync::LazyLock;

/// Menu location used when front matter does not specify one.
///
/// A page with a valid title and no `menu` block lands in the primary nav;
/// the explicit location `"none"` opts a page out of every menu.
pub const DEFAULT_LOCATION: &str = "primary";

/// Site-verification files like `/google1a2b3c.html` never appear in menus.
static VERIFICATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^/google[a-z0-9]+\.html$").expect("static regex"));

// ============================================================================
// Nav Entry
// ============================================================================

/// A single navigation menu entry.
///
/// Constructed once per build and handed to the layout; never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct NavEntry {
    pub title: String,
    pub url: String,
    /// Explicit menu position; entries without one sort after those with.
    pub order: Option<f64>,
    /// External links open in a new tab.
    pub external: bool,
}

/// The two menus consumed by the layout.
#[derive(Debug, Default)]
pub struct SiteNav {
    pub primary: Vec<NavEntry>,
    pub secondary: Vec<NavEntry>,
}

impl SiteNav {
    pub fn from_pages(pages: &Pages) -> Self {
        Self {
            primary: build_nav(pages, "primary"),
            secondary: build_nav(pages, "secondary"),
        }
    }
}

// ============================================================================
// Construction
// ============================================================================

/// Build the ordered entry list for one menu location.
pub fn build_nav(pages: &Pages, location: &str) -> Vec<NavEntry> {
    let mut entries: Vec<NavEntry> = pages
        .iter()
        .filter_map(|page| nav_entry(page, location))
        .collect();
    entries.sort_by(compare_entries);
    entries
}

/// Map a page to a nav entry, or `None` when any exclusion rule applies.
fn nav_entry(page: &PageMeta, location: &str) -> Option<NavEntry> {
    // Pages without metadata are never menu candidates
    let front = page.front.as_ref()?;

    // A meaningful title is required to be considered at all
    let title = front.title.as_deref()?;
    if title.trim().is_empty() {
        return None;
    }

    if front.draft || front.menu.hide {
        return None;
    }
    if page.url.is_empty() {
        return None;
    }
    if page.url.starts_with("/admin") {
        return None;
    }
    if is_post_page(front, &page.paths.source) {
        return None;
    }
    if is_verification_url(&page.url) {
        return None;
    }

    let resolved = front.menu.location.as_deref().unwrap_or(DEFAULT_LOCATION);
    if resolved == "none" || resolved != location {
        return None;
    }

    Some(NavEntry {
        title: front
            .menu
            .title
            .clone()
            .unwrap_or_else(|| nonempty_or_slug(title, page)),
        url: front.menu.url.clone().unwrap_or_else(|| page.url.clone()),
        order: front.menu.order,
        external: front.menu.external,
    })
}

/// Page title, falling back to the filesystem-derived slug.
fn nonempty_or_slug(title: &str, page: &PageMeta) -> String {
    if title.is_empty() {
        page.file_slug().to_owned()
    } else {
        title.to_owned()
    }
}

// ============================================================================
// Convention Predicates
// ============================================================================

/// Whether a page is a blog post, by tag or by folder convention.
///
/// Tag matching is case-sensitive and exact (`post` / `posts`); the folder
/// convention matches a `/posts/` (or `\posts\`) segment in the source path.
pub fn is_post_page(front: &FrontMatter, source: &Path) -> bool {
    if has_post_tag(&front.tags) {
        return true;
    }
    let source = source.to_string_lossy();
    source.contains("/posts/") || source.contains("\\posts\\")
}

/// Exact-match check for the `post`/`posts` tags.
pub fn has_post_tag(tags: &[String]) -> bool {
    tags.iter().any(|tag| tag == "post" || tag == "posts")
}

/// Whether a URL names a search-engine site-verification file.
pub fn is_verification_url(url: &str) -> bool {
    VERIFICATION_RE.is_match(url)
}

// ============================================================================
// Ordering
// ============================================================================

/// Two-tier total order: explicitly ordered entries first (ascending,
/// title tie-break), then the rest by title.
fn compare_entries(a: &NavEntry, b: &NavEntry) -> Ordering {
    match (a.order, b.order) {
        (Some(x), Some(y)) => x
            .partial_cmp(&y)
            .unwrap_or(Ordering::Equal)
            .then_with(|| compare_titles(&a.title, &b.title)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => compare_titles(&a.title, &b.title),
    }
}

/// Case-insensitive title comparison, with a case-sensitive tie-break for
/// determinism.
fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

// ============================================================================
// Tests
// ============================================================================
