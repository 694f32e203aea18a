//! URL normalization for active-link detection.
//!
//! Used by the layout to decide which nav entry points at the page being
//! rendered. Not part of navigation construction itself.

/// Normalize a URL for comparison.
///
/// Empty or whitespace-only input yields `/`. A trailing `index.html` is
/// stripped (case-insensitively). External URLs (anything starting with
/// `http`) are returned as-is; internal URLs are guaranteed exactly one
/// trailing slash unless the result is already `/`.
pub fn normalize(url: &str) -> String {
    let mut url = url.trim().to_owned();
    if url.is_empty() {
        return "/".into();
    }

    let len = url.len();
    if len >= 10 && url[len - 10..].eq_ignore_ascii_case("index.html") {
        url.truncate(len - 10);
    }

    if url.starts_with("http") {
        return url;
    }

    if url != "/" && !url.ends_with('/') {
        url.push('/');
    }
    url
}

/// Check whether a nav link points at the page currently being rendered.
pub fn is_current_url(link_url: &str, page_url: &str) -> bool {
    normalize(link_url) == normalize(page_url)
}

// ============================================================================
// Tests
// ============================================================================
