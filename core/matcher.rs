use crate::error::{AppError, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::path::Path;

// Appended to a directory path before matching so that file-shaped patterns
// like `**/node_modules/**` also match the directory itself.
const DIR_MATCH_PROBE: &str = "__dir_probe__";

/// Pure admission predicate: extension filter plus ignore globs, evaluated
/// against paths relative to the scan root. Holds no other state and
/// performs no I/O.
#[derive(Debug, Clone)]
pub struct PathMatcher {
    ignore_set: GlobSet,
    extensions: Vec<String>,
}

impl PathMatcher {
    /// Extensions are matched case-sensitively, without a leading dot; an
    /// empty list disables extension filtering entirely.
    pub fn new(ignored_paths: &[String], extensions: &[String]) -> Result<Self> {
        Ok(Self {
            ignore_set: build_glob_set(ignored_paths)?,
            extensions: extensions.to_vec(),
        })
    }

    pub fn from_config(config: &crate::config::AggregatorConfig) -> Result<Self> {
        Self::new(&config.ignored_paths, &config.file_extensions)
    }

    /// Whether a file at `relative_path` (relative to the scan root) is
    /// admitted into the result set.
    pub fn admits(&self, relative_path: &Path) -> bool {
        if !self.extensions.is_empty() {
            let extension = relative_path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("");
            if !self.extensions.iter().any(|allowed| allowed == extension) {
                log::trace!(
                    "Path rejected by extension filter: {}",
                    relative_path.display()
                );
                return false;
            }
        }

        if self.ignore_set.is_match(relative_path) {
            log::trace!("Path rejected by ignore set: {}", relative_path.display());
            return false;
        }

        true
    }

    /// Whether a directory at `relative_dir` should be pruned from the walk
    /// (neither descended into nor listed).
    pub fn prunes(&self, relative_dir: &Path) -> bool {
        self.ignore_set.is_match(relative_dir)
            || self.ignore_set.is_match(relative_dir.join(DIR_MATCH_PROBE))
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern_str in patterns {
        let mut processed_pattern = pattern_str.trim().to_string();
        if processed_pattern.ends_with('/') && processed_pattern.len() > 1 {
            processed_pattern.push_str("**");
        }
        // literal_separator keeps `*` within a single path segment; only
        // `**` crosses segment boundaries.
        match GlobBuilder::new(&processed_pattern)
            .literal_separator(true)
            .build()
        {
            Ok(glob) => {
                log::trace!(
                    "Adding ignore pattern: {} (processed as {})",
                    pattern_str,
                    processed_pattern
                );
                builder.add(glob);
            }
            Err(e) => {
                return Err(AppError::Glob(format!(
                    "Invalid glob pattern \"{}\" (processed as \"{}\"): {}",
                    pattern_str, processed_pattern, e
                )));
            }
        }
    }
    builder.build().map_err(|e| AppError::Glob(e.to_string()))
}
