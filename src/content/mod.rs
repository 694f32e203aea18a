//! Content collection and page processing.
//!
//! This module owns the input side of the build pipeline:
//!
//! - **frontmatter**: extract and normalize YAML front matter
//! - **meta**: page metadata, path and URL derivation
//! - **markdown**: render page bodies to HTML
//! - **page**: load/write a single page
//! - **assets**: copy static files and passthrough mappings
//!
//! # Build Flow
//!
//! ```text
//! collect_all_files() ──► load_page() ──► write_page() / process_asset()
//!        │                    │                  │
//!        ▼                    ▼                  ▼
//!    PathBuf[]           PageMeta[]        Output files
//! ```

pub mod assets;
pub mod frontmatter;
pub mod markdown;
pub mod meta;
pub mod page;

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

// ============================================================================
// Public API
// ============================================================================

pub use assets::{process_asset, process_passthrough, process_rel_asset};
pub use page::{load_page, write_page};

// ============================================================================
// Shared utilities
// ============================================================================

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

/// Collect all files from a directory recursively.
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Check if destination is up-to-date compared to source and dependencies.
pub fn is_up_to_date(src: &Path, dst: &Path, deps_mtime: Option<SystemTime>) -> bool {
    let Ok(src_meta) = src.metadata() else {
        return false;
    };
    let Ok(dst_meta) = dst.metadata() else {
        return false;
    };

    let Ok(src_time) = src_meta.modified() else {
        return false;
    };
    let Ok(dst_time) = dst_meta.modified() else {
        return false;
    };

    // Check if source is newer than destination
    if src_time > dst_time {
        return false;
    }

    // Check if any dependency is newer than destination
    if let Some(deps) = deps_mtime
        && deps > dst_time
    {
        return false;
    }

    true
}

/// Latest modification time across a set of files.
///
/// Pages embed nav and post data from every other page, so a change to any
/// content file (or the config) invalidates all of them.
pub fn deps_mtime<'a>(files: impl IntoIterator<Item = &'a PathBuf>) -> Option<SystemTime> {
    files
        .into_iter()
        .filter_map(|path| path.metadata().and_then(|meta| meta.modified()).ok())
        .max()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_collect_all_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.md"), "a").unwrap();
        fs::write(dir.path().join("sub/b.md"), "b").unwrap();
        fs::write(dir.path().join(".DS_Store"), "junk").unwrap();

        let mut files = collect_all_files(dir.path());
        files.sort();

        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.md"));
        assert!(files[1].ends_with("sub/b.md"));
    }

    #[test]
    fn test_collect_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        let files = collect_all_files(&dir.path().join("nope"));
        assert!(files.is_empty());
    }

    #[test]
    fn test_is_up_to_date_missing_dest() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.md");
        fs::write(&src, "x").unwrap();

        assert!(!is_up_to_date(&src, &dir.path().join("dst.html"), None));
    }

    #[test]
    fn test_is_up_to_date_fresh_dest() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.md");
        let dst = dir.path().join("dst.html");
        fs::write(&src, "x").unwrap();
        fs::write(&dst, "y").unwrap();

        assert!(is_up_to_date(&src, &dst, None));
    }

    #[test]
    fn test_is_up_to_date_newer_dep_invalidates() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.md");
        let dst = dir.path().join("dst.html");
        fs::write(&src, "x").unwrap();
        fs::write(&dst, "y").unwrap();

        let future = SystemTime::now() + std::time::Duration::from_secs(60);
        assert!(!is_up_to_date(&src, &dst, Some(future)));
    }

    #[test]
    fn test_deps_mtime() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::write(&a, "x").unwrap();
        fs::write(&b, "y").unwrap();

        let files = vec![a, b, dir.path().join("missing")];
        assert!(deps_mtime(files.iter()).is_some());
        assert!(deps_mtime(std::iter::empty::<&PathBuf>()).is_none());
    }
}
