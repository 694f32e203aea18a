//! Static asset copying: assets-directory mirroring, content-relative
//! files, and explicit passthrough mappings.

use crate::config::{CopyEntry, SiteConfig};
use crate::content::{collect_all_files, is_up_to_date};
use crate::log;
use anyhow::{Result, anyhow};
use std::fs;
use std::path::Path;

/// Process an asset file from the assets directory.
///
/// The file lands at the same relative path under the output directory.
pub fn process_asset(
    asset_path: &Path,
    config: &SiteConfig,
    clean: bool,
    log_file: bool,
) -> Result<()> {
    let relative = asset_path
        .strip_prefix(&config.build.assets)
        .map_err(|_| anyhow!("File is not in assets directory: {}", asset_path.display()))?;
    let dest = config.build.output.join(relative);

    if !clean && is_up_to_date(asset_path, &dest, None) {
        return Ok(());
    }

    if log_file {
        log!("assets"; "{}", relative.display());
    }

    copy_file(asset_path, &dest)
}

/// Process an asset file from the content directory (non-.md files).
pub fn process_rel_asset(
    path: &Path,
    config: &SiteConfig,
    clean: bool,
    log_file: bool,
) -> Result<()> {
    let relative = path
        .strip_prefix(&config.build.content)
        .map_err(|_| anyhow!("File is not in content directory: {}", path.display()))?;
    let dest = config.build.output.join(relative);

    if !clean && is_up_to_date(path, &dest, None) {
        return Ok(());
    }

    if log_file {
        log!("content"; "{}", relative.display());
    }

    copy_file(path, &dest)
}

/// Process one `[[build.passthrough]]` mapping.
///
/// The source is resolved against the project root and may be a single
/// file or a directory (copied recursively). Missing sources are logged
/// and skipped rather than failing the build.
pub fn process_passthrough(entry: &CopyEntry, config: &SiteConfig, clean: bool) -> Result<()> {
    let source = config.get_root().join(entry.from());
    let dest = config.build.output.join(entry.to());

    if !source.exists() {
        log!("warn"; "passthrough source not found: {}", source.display());
        return Ok(());
    }

    if source.is_dir() {
        for file in collect_all_files(&source) {
            let relative = file
                .strip_prefix(&source)
                .map_err(|_| anyhow!("File escaped passthrough source: {}", file.display()))?;
            let file_dest = dest.join(relative);
            if clean || !is_up_to_date(&file, &file_dest, None) {
                copy_file(&file, &file_dest)?;
            }
        }
        return Ok(());
    }

    if !clean && is_up_to_date(&source, &dest, None) {
        return Ok(());
    }
    copy_file(&source, &dest)
}

/// Copy a file, creating parent directories as needed.
fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest)?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
