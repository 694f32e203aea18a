//! HTML minification for rendered output files.
//!
//! Wraps the `minify_html` crate. Minification only applies to files whose
//! output path ends in `.html`; everything else passes through untouched.

use crate::config::SiteConfig;
use std::borrow::Cow;
use std::path::Path;

/// Minify rendered output based on its destination path and config.
///
/// Returns `Cow::Borrowed` when minification is disabled or the destination
/// is not an `.html` file, `Cow::Owned` otherwise.
pub fn minify<'a>(dest: &Path, content: &'a [u8], config: &SiteConfig) -> Cow<'a, [u8]> {
    if !config.build.minify.enable || !is_html(dest) {
        return Cow::Borrowed(content);
    }
    Cow::Owned(minify_html_inner(content, config))
}

/// Check whether a destination path is an HTML file.
fn is_html(dest: &Path) -> bool {
    dest.extension().is_some_and(|ext| ext == "html")
}

/// Minify HTML content using the `minify_html` crate.
///
/// Whitespace collapse and doctype shortening are part of the single minify
/// pass; comment removal follows `[build.minify] comments`.
fn minify_html_inner(html: &[u8], config: &SiteConfig) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = !config.build.minify.comments;
    cfg.minify_css = true;
    cfg.minify_js = true;
    cfg.remove_bangs = true;
    cfg.remove_processing_instructions = true;
    minify_html::minify(html, &cfg)
}

// ============================================================================
// Tests
// ============================================================================
