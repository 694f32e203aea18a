//! Front-matter extraction and normalization.
//!
//! Content files may open with a YAML block delimited by `---` lines. The
//! raw shape is loose (tags may be a single string or a list, the menu map
//! is optional, `order` may be a number or a numeric string). Everything is
//! coerced exactly once here into [`FrontMatter`], so the rest of the
//! pipeline operates on fully-typed records.

use crate::utils::date::DateTimeUtc;
use serde::Deserialize;
use serde_yaml::Value;
use std::path::PathBuf;

// ============================================================================
// Normalized Types
// ============================================================================

/// Normalized front matter for a content page.
///
/// `None` fields mean "absent in the source"; collection-shaped fields are
/// always materialized (absent tags become an empty list).
#[derive(Debug, Clone, Default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub tags: Vec<String>,
    pub draft: bool,
    pub date: Option<DateTimeUtc>,
    pub layout: Layout,
    /// Output-path override (pretty URL is derived from it).
    pub url: Option<PathBuf>,
    pub menu: Menu,
}

/// Normalized `menu` settings. Absent menu map yields the default.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    pub location: Option<String>,
    pub hide: bool,
    pub order: Option<f64>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub external: bool,
}

/// Built-in page layout, selected by the `layout` front-matter key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    /// Header with primary nav, body, footer with secondary nav.
    #[default]
    Default,
    /// `Default` plus the chronological post listing.
    Posts,
}

// ============================================================================
// Raw (wire) Types
// ============================================================================

/// Raw front matter as written in YAML. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct RawFrontMatter {
    title: Option<String>,
    tags: Option<TagList>,
    #[serde(default)]
    draft: bool,
    date: Option<String>,
    layout: Option<String>,
    url: Option<PathBuf>,
    menu: Option<RawMenu>,
}

/// Tags may be written as a single string or a list of strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagList {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Default, Deserialize)]
struct RawMenu {
    location: Option<String>,
    #[serde(default)]
    hide: bool,
    /// Number or numeric string; anything else coerces to unset.
    order: Option<Value>,
    title: Option<String>,
    url: Option<String>,
    #[serde(default)]
    external: bool,
}

// ============================================================================
// Extraction
// ============================================================================

/// Split a content file into its front-matter block and body.
///
/// The block must start on the first line. Returns `(None, source)` when the
/// file has no block or the opening delimiter is never closed.
pub fn split_front_matter(source: &str) -> (Option<&str>, &str) {
    let Some(rest) = source.strip_prefix("---") else {
        return (None, source);
    };
    let Some(rest) = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")) else {
        return (None, source);
    };

    let mut pos = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            return (Some(&rest[..pos]), &rest[pos + line.len()..]);
        }
        pos += line.len();
    }

    (None, source)
}

/// Parse a front-matter block into its normalized form.
///
/// Returns `Ok(None)` for an empty block (the page carries no metadata) and
/// `Err` for YAML that does not parse; callers treat both as "no metadata".
pub fn parse_front_matter(yaml: &str) -> Result<Option<FrontMatter>, serde_yaml::Error> {
    let value: Value = serde_yaml::from_str(yaml)?;

    let empty = match &value {
        Value::Null => true,
        Value::Mapping(map) => map.is_empty(),
        _ => false,
    };
    if empty {
        return Ok(None);
    }

    let raw: RawFrontMatter = serde_yaml::from_value(value)?;
    Ok(Some(normalize(raw)))
}

// ============================================================================
// Normalization
// ============================================================================

fn normalize(raw: RawFrontMatter) -> FrontMatter {
    let menu = raw.menu.unwrap_or_default();

    FrontMatter {
        title: raw.title,
        tags: match raw.tags {
            Some(TagList::One(tag)) => vec![tag],
            Some(TagList::Many(tags)) => tags,
            None => Vec::new(),
        },
        draft: raw.draft,
        date: raw.date.as_deref().and_then(DateTimeUtc::parse),
        layout: match raw.layout.as_deref() {
            Some("posts") => Layout::Posts,
            _ => Layout::Default,
        },
        url: raw.url,
        menu: Menu {
            location: menu.location,
            hide: menu.hide,
            order: coerce_order(menu.order.as_ref()),
            title: menu.title,
            url: menu.url,
            external: menu.external,
        },
    }
}

/// Coerce a raw `menu.order` value to a finite number.
///
/// Accepts numbers and numeric strings; booleans coerce to 1/0. Anything
/// else, including non-finite results, is unset.
fn coerce_order(value: Option<&Value>) -> Option<f64> {
    let order = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => return None,
    };
    order.is_finite().then_some(order)
}

// ============================================================================
// Tests
// ============================================================================
