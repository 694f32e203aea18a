//! Page metadata and path/URL derivation.
//!
//! `PageMeta` is the primary metadata structure for content pages: source
//! and destination paths, the site-relative URL, and the normalized front
//! matter. The full collection (`Pages`) is frozen before navigation and
//! post listings are built from it.
//!
//! # Path Derivation
//!
//! | Source                  | Output                        | URL          |
//! |-------------------------|-------------------------------|--------------|
//! | `content/index.md`      | `public/index.html`           | `/`          |
//! | `content/about.md`      | `public/about/index.html`     | `/about/`    |
//! | `content/team/index.md` | `public/team/index.html`      | `/team/`     |
//! | front matter `url: x/y` | `public/x/y/index.html`       | `/x/y/`      |

use crate::config::SiteConfig;
use crate::content::frontmatter::FrontMatter;
use anyhow::{Result, anyhow};
use std::path::{Component, Path, PathBuf};

// ============================================================================
// Page Metadata
// ============================================================================

/// Metadata and rendered body for a single content page.
#[derive(Debug, Clone)]
pub struct PageMeta {
    /// Path information
    pub paths: PagePaths,
    /// Site-relative URL with a trailing slash (`/about/`, `/` for root)
    pub url: String,
    /// Normalized front matter (`None` when the page had no or empty block)
    pub front: Option<FrontMatter>,
    /// Markdown body rendered to HTML
    pub html_body: String,
}

/// Path information for a page.
#[derive(Debug, Clone)]
pub struct PagePaths {
    /// Source .md file path
    pub source: PathBuf,
    /// Destination HTML file path
    pub dest: PathBuf,
    /// Relative path without extension (for logging)
    pub relative: String,
}

impl PageMeta {
    /// Create `PageMeta` from a source .md file path.
    ///
    /// # Errors
    ///
    /// Returns error if the file is not a .md file inside the content
    /// directory, or its path is not valid UTF-8.
    pub fn from_source(
        source: PathBuf,
        config: &SiteConfig,
        front: Option<FrontMatter>,
        html_body: String,
    ) -> Result<Self> {
        let content_dir = &config.build.content;
        let output_dir = &config.build.output;

        // Strip content dir and .md extension
        let relative = source
            .strip_prefix(content_dir)
            .map_err(|_| anyhow!("File is not in content directory: {}", source.display()))?
            .to_str()
            .ok_or_else(|| anyhow!("Invalid path encoding"))?
            .strip_suffix(".md")
            .ok_or_else(|| anyhow!("Not a .md file: {}", source.display()))?
            .replace('\\', "/");

        // `index` and `section/index` collapse onto their directory
        let pretty = relative.strip_suffix("/index").unwrap_or(&relative);
        let is_root_index = pretty == "index";

        // Compute destination, honoring the front-matter url override
        let dest_dir = if let Some(url) = front.as_ref().and_then(|front| front.url.clone()) {
            output_dir.join(strip_leading_separators(&url))
        } else if is_root_index {
            output_dir.clone()
        } else {
            output_dir.join(pretty)
        };
        let dest = dest_dir.join("index.html");

        // Derive the site-relative URL from the final destination
        let url = url_from_output_path(&dest, config)?;
        let url = url
            .strip_suffix("index.html")
            .map(str::to_owned)
            .unwrap_or(url);

        Ok(Self {
            paths: PagePaths {
                source,
                dest,
                relative,
            },
            url,
            front,
            html_body,
        })
    }

    /// Filesystem-derived slug: the file stem, skipping `index` segments.
    ///
    /// `about.md` → `"about"`, `team/index.md` → `"team"`, the root
    /// `index.md` → `""`.
    pub fn file_slug(&self) -> &str {
        self.paths
            .relative
            .split('/')
            .rev()
            .find(|segment| *segment != "index")
            .unwrap_or("")
    }

    /// Whether the page is excluded from write-out.
    pub fn is_draft(&self) -> bool {
        self.front.as_ref().is_some_and(|front| front.draft)
    }
}

/// Strip leading `/` (and `.`) components from an override path so it
/// always lands inside the output directory.
fn strip_leading_separators(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect()
}

/// Generate a URL path from an output file path.
///
/// Handles output-root stripping and cross-platform separators.
pub fn url_from_output_path(path: &Path, config: &SiteConfig) -> Result<String> {
    let output_root = &config.build.output;

    let rel_to_output = path
        .strip_prefix(output_root)
        .map_err(|_| anyhow!("Path is not in output directory: {}", path.display()))?;

    let path_str = rel_to_output.to_string_lossy().replace('\\', "/");

    Ok(if path_str.starts_with('/') {
        path_str
    } else {
        format!("/{path_str}")
    })
}

// ============================================================================
// Page Collection
// ============================================================================

/// Collection of all pages in the site, frozen before nav construction.
#[derive(Debug, Default)]
pub struct Pages {
    pub items: Vec<PageMeta>,
}

impl Pages {
    /// Get iterator over pages.
    pub fn iter(&self) -> impl Iterator<Item = &PageMeta> {
        self.items.iter()
    }

    /// Number of pages.
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================
