//! Single-page processing: load, render, write.

use crate::config::SiteConfig;
use crate::content::frontmatter::{parse_front_matter, split_front_matter};
use crate::content::is_up_to_date;
use crate::content::markdown;
use crate::content::meta::PageMeta;
use crate::log;
use crate::site::nav::SiteNav;
use crate::site::render::render_page;
use crate::utils::minify::minify;
use anyhow::Result;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Load a content file into a `PageMeta`: extract and normalize front
/// matter, render the Markdown body.
///
/// Unparseable front matter degrades to "no metadata" with a warning; the
/// page still renders.
pub fn load_page(path: &Path, config: &SiteConfig) -> Result<PageMeta> {
    let source = fs::read_to_string(path)?;
    let (block, body) = split_front_matter(&source);

    let front = match block {
        Some(yaml) => match parse_front_matter(yaml) {
            Ok(front) => front,
            Err(err) => {
                log!("warn"; "{}: ignoring front matter: {err}", path.display());
                None
            }
        },
        None => None,
    };

    let html_body = markdown::render(body, &config.build.markdown);
    PageMeta::from_source(path.to_path_buf(), config, front, html_body)
}

/// Render a page through the layout and write it to its destination.
///
/// Skips pages whose destination is newer than the source and every shared
/// dependency (unless `clean`). Draft pages are the caller's concern; they
/// participate in nav filtering but are never written.
pub fn write_page(
    page: &PageMeta,
    posts: &[&PageMeta],
    nav: &SiteNav,
    config: &SiteConfig,
    clean: bool,
    deps_mtime: Option<SystemTime>,
    log_file: bool,
) -> Result<()> {
    if !clean && is_up_to_date(&page.paths.source, &page.paths.dest, deps_mtime) {
        return Ok(());
    }

    if log_file {
        log!("content"; "{}", page.paths.relative);
    }

    let html = render_page(page, posts, nav, config);
    let output = minify(&page.paths.dest, html.as_bytes(), config);

    if let Some(parent) = page.paths.dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&page.paths.dest, &output)?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
