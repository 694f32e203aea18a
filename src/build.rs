//! Site building orchestration.
//!
//! Coordinates page rendering and asset processing.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── load pages ──────► Pages (collected and frozen, sorted by source)
//!     │                          │
//!     ├── SiteNav::from_pages ───┤  pure, single pass over the collection
//!     ├── build_posts ───────────┘
//!     │
//!     └── rayon::join
//!             ├── write_page() for every non-draft page
//!             └── process_asset() / process_rel_asset() / passthrough
//! ```

use crate::{
    config::SiteConfig,
    content::{
        collect_all_files, deps_mtime, load_page, process_asset, process_passthrough,
        process_rel_asset, write_page,
    },
    content::meta::Pages,
    log,
    site::nav::SiteNav,
    site::posts::build_posts,
};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::{fs, path::Path};

/// Build the entire site.
///
/// Pages are loaded and frozen first; navigation menus and the post listing
/// are then derived once from the complete collection, and page write-out
/// runs in parallel with asset copying. If `config.build.clean` is true,
/// the output directory is cleared first.
pub fn build_site(config: &'static SiteConfig) -> Result<()> {
    let output = &config.build.output;
    let clean = config.build.clean;

    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)?;

    // Collect source files, separating pages from content-relative assets
    let (md_files, rel_asset_files): (Vec<_>, Vec<_>) = collect_all_files(&config.build.content)
        .into_iter()
        .partition(|path| path.extension().is_some_and(|ext| ext == "md"));
    let asset_files = collect_all_files(&config.build.assets);

    // Every page embeds nav and post data, so any content or config change
    // invalidates all rendered pages
    let deps = deps_mtime(md_files.iter().chain(std::iter::once(&config.config_path)));

    // ========================================================================
    // Collect and freeze the page list
    // ========================================================================

    let mut items = md_files
        .par_iter()
        .map(|path| load_page(path, config))
        .collect::<Result<Vec<_>>>()?;
    items.sort_by(|a, b| a.paths.source.cmp(&b.paths.source));
    let pages = Pages { items };

    if pages.is_empty() {
        log!("warn"; "no pages found in {}", config.build.content.display());
    } else {
        log!("content"; "found {} pages", pages.len());
    }

    let nav = SiteNav::from_pages(&pages);
    let posts = build_posts(&pages);
    log!(
        "nav";
        "{} primary, {} secondary entries, {} posts",
        nav.primary.len(),
        nav.secondary.len(),
        posts.len()
    );

    // ========================================================================
    // Write pages + process assets
    // ========================================================================

    let (pages_result, assets_result) = rayon::join(
        || {
            pages
                .items
                .par_iter()
                .filter(|page| !page.is_draft())
                .try_for_each(|page| write_page(page, &posts, &nav, config, clean, deps, false))
        },
        || -> Result<()> {
            let (assets_res, rel_res) = rayon::join(
                || {
                    asset_files
                        .par_iter()
                        .try_for_each(|path| process_asset(path, config, clean, false))
                },
                || {
                    rel_asset_files
                        .par_iter()
                        .try_for_each(|path| process_rel_asset(path, config, clean, false))
                },
            );
            assets_res?;
            rel_res?;

            config
                .build
                .passthrough
                .iter()
                .try_for_each(|entry| process_passthrough(entry, config, clean))
        },
    );

    pages_result?;
    assets_result?;

    log_build_result(output)?;
    Ok(())
}

/// Log build result based on output directory contents
fn log_build_result(output: &Path) -> Result<()> {
    let file_count = fs::read_dir(output)?.filter_map(Result::ok).count();

    if file_count == 0 {
        log!("warn"; "output is empty, check if content has .md files");
    } else {
        log!("build"; "done");
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
