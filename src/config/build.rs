//! `[build]` section configuration.
//!
//! Contains build settings including paths, markdown rendering options,
//! minification, and passthrough copies.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Main BuildConfig
// ============================================================================

/// `[build]` section in breeze.toml - build pipeline configuration.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"      # Source directory
/// output = "public"        # Output directory
/// assets = "assets"        # Static assets directory
///
/// [build.markdown]
/// breaks = true
///
/// [[build.passthrough]]
/// from = "admin/config.yml"
/// to = "admin/config.yml"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Content source directory (Markdown files).
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Static assets directory (images, CSS, JS).
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,

    /// Clear output directory before each build.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    /// Markdown rendering options.
    #[serde(default)]
    pub markdown: MarkdownConfig,

    /// HTML minification settings.
    #[serde(default)]
    pub minify: MinifyConfig,

    /// Explicit source-to-output copy mappings.
    #[serde(default)]
    pub passthrough: Vec<CopyEntry>,

    /// Custom `<head>` elements.
    #[serde(default)]
    pub head: HeadConfig,
}

// ============================================================================
// Sub-configurations
// ============================================================================

/// `[build.markdown]` section - options for the Markdown renderer.
///
/// Mirrors the renderer option set of the site this generator builds:
/// raw HTML passthrough, newline-to-break promotion, bare-URL autolinking,
/// and pipe tables.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct MarkdownConfig {
    /// Pass raw HTML through to the output (escaped as text when false).
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub html: bool,

    /// Render single newlines as `<br>`.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub breaks: bool,

    /// Autolink bare `http(s)://` URLs in text.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub linkify: bool,

    /// Enable pipe tables.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub tables: bool,
}

/// `[build.minify]` section - HTML minification settings.
///
/// Applies only to output files ending in `.html`. Whitespace collapse and
/// doctype shortening are inherent to the minifier pass; `comments` controls
/// comment stripping.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct MinifyConfig {
    /// Minify HTML output.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Strip HTML comments.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub comments: bool,
}

/// Passthrough copy entry for `[build.passthrough]`.
///
/// # Formats
/// ```toml
/// # Same relative path in the output tree
/// passthrough = ["favicon.ico"]
///
/// # Explicit destination
/// passthrough = [
///     { from = "admin/config.yml", to = "admin/config.yml" },
///     { from = "vendor/alpine/cdn.min.js", to = "static/js/alpine.js" },
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CopyEntry {
    /// Source path copied to the same relative output path.
    Simple(PathBuf),
    /// Source path with an explicit output destination.
    WithTarget { from: PathBuf, to: PathBuf },
}

impl CopyEntry {
    /// Get the source path for this entry (relative to the project root).
    pub fn from(&self) -> &Path {
        match self {
            CopyEntry::Simple(path) => path,
            CopyEntry::WithTarget { from, .. } => from,
        }
    }

    /// Get the destination path (relative to the output directory).
    pub fn to(&self) -> &Path {
        match self {
            CopyEntry::Simple(path) => path,
            CopyEntry::WithTarget { to, .. } => to,
        }
    }
}

/// `[build.head]` section for custom head elements
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct HeadConfig {
    /// Favicon URL path (as copied into the output tree)
    #[serde(default)]
    pub icon: Option<String>,

    /// CSS stylesheet URL paths
    #[serde(default)]
    pub styles: Vec<String>,

    /// Script entries (URL paths)
    #[serde(default)]
    pub scripts: Vec<ScriptEntry>,
}

/// Script entry for `[build.head.scripts]`.
///
/// # Formats
/// ```toml
/// # Simple path
/// scripts = ["/static/js/app.js"]
///
/// # With loading options
/// scripts = [
///     { path = "/static/js/app.js", defer = true },
///     { path = "/static/js/analytics.js", async = true },
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScriptEntry {
    /// Simple path string.
    Simple(String),
    /// Path with `defer`/`async` attributes.
    WithOptions {
        path: String,
        #[serde(default)]
        defer: bool,
        #[serde(default)]
        r#async: bool,
    },
}

impl ScriptEntry {
    /// Get the path for this script entry
    pub fn path(&self) -> &str {
        match self {
            ScriptEntry::Simple(path) => path,
            ScriptEntry::WithOptions { path, .. } => path,
        }
    }

    /// Check if defer attribute should be added
    pub fn is_defer(&self) -> bool {
        match self {
            ScriptEntry::Simple(_) => false,
            ScriptEntry::WithOptions { defer, .. } => *defer,
        }
    }

    /// Check if async attribute should be added
    pub fn is_async(&self) -> bool {
        match self {
            ScriptEntry::Simple(_) => false,
            ScriptEntry::WithOptions { r#async, .. } => *r#async,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
