use crate::error::{AppError, Result};
use crate::matcher::PathMatcher;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// A file discovered during a scan: absolute path plus the path relative to
/// the scan root it was found under. Constructed fresh per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub relative_path: PathBuf,
}

impl FileEntry {
    /// Relative path rendered with `/` separators regardless of host
    /// convention, as used in headers and glob matching.
    pub fn relative_slash(&self) -> String {
        let segments: Vec<String> = self
            .relative_path
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        segments.join("/")
    }
}

/// Enumerates regular files under `scan_root`, pruning ignored directories
/// before descent and admitting files through `matcher`. Symbolic links are
/// not followed. The result is sorted lexicographically by relative path,
/// which is the order the aggregation output preserves.
pub fn collect_files(
    scan_root: &Path,
    matcher: &PathMatcher,
    use_gitignore: bool,
) -> Result<Vec<FileEntry>> {
    let root_meta = fs::metadata(scan_root)
        .map_err(|_| AppError::PathNotFound(scan_root.to_path_buf()))?;
    if !root_meta.is_dir() {
        return Err(AppError::PathNotFound(scan_root.to_path_buf()));
    }

    log::debug!("Collecting files under: {}", scan_root.display());

    let mut builder = WalkBuilder::new(scan_root);
    builder.hidden(false);
    builder.follow_links(false);
    builder.ignore(use_gitignore);
    builder.git_ignore(use_gitignore);
    builder.git_global(use_gitignore);
    builder.git_exclude(use_gitignore);
    builder.parents(use_gitignore);
    builder.require_git(false);

    // The filter closure must own its state; pruning happens here so ignored
    // directories are never descended into.
    let filter_matcher = matcher.clone();
    let filter_root = scan_root.to_path_buf();
    builder.filter_entry(move |entry| {
        if entry.depth() == 0 {
            return true;
        }
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
        if !is_dir {
            return true;
        }
        match entry.path().strip_prefix(&filter_root) {
            Ok(relative) => {
                if filter_matcher.prunes(relative) {
                    log::trace!("Pruning ignored directory: {}", relative.display());
                    false
                } else {
                    true
                }
            }
            Err(_) => true,
        }
    });

    let mut entries = Vec::new();
    for result in builder.build() {
        match result {
            Ok(entry) => {
                if entry.depth() == 0 {
                    continue;
                }
                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    continue;
                }
                let relative = match entry.path().strip_prefix(scan_root) {
                    Ok(rel) => rel.to_path_buf(),
                    Err(_) => {
                        log::warn!(
                            "Could not relativize walked path: {}",
                            entry.path().display()
                        );
                        continue;
                    }
                };
                if matcher.admits(&relative) {
                    entries.push(FileEntry {
                        path: entry.path().to_path_buf(),
                        relative_path: relative,
                    });
                }
            }
            Err(e) => {
                log::warn!("Error walking directory: {}", e);
            }
        }
    }

    entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    log::debug!(
        "Collected {} files under {}",
        entries.len(),
        scan_root.display()
    );
    Ok(entries)
}
