use crate::collect::{self, FileEntry};
use crate::config::AggregatorConfig;
use crate::error::{AppError, Result};
use crate::matcher::PathMatcher;
use crate::progress::{CancellationToken, Progress, ProgressSink};
use crate::tree;
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// Outcome of one aggregation run. Cancellation is a first-class outcome,
/// not an error: a cancelled run carries no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationResult {
    Completed(String),
    Cancelled,
}

impl AggregationResult {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AggregationResult::Cancelled)
    }

    pub fn text(&self) -> &str {
        match self {
            AggregationResult::Completed(text) => text,
            AggregationResult::Cancelled => "",
        }
    }

    pub fn into_text(self) -> String {
        match self {
            AggregationResult::Completed(text) => text,
            AggregationResult::Cancelled => String::new(),
        }
    }
}

/// Runs a full aggregation: preamble blocks, optional tree section, then
/// the matched file contents in collector order.
///
/// Preambles are concatenated verbatim; locating and reading them is the
/// caller's concern. File reads run concurrently within each batch of
/// `config.batch_size` files, output order stays the collector's, and the
/// cancellation token is polled at batch boundaries only, so in-flight
/// reads of the current batch complete before a cancellation takes effect.
/// A failed read aborts the whole run.
pub fn aggregate(
    project_root: &Path,
    config: &AggregatorConfig,
    preambles: &[String],
    progress: &dyn ProgressSink,
    cancel: &CancellationToken,
) -> Result<AggregationResult> {
    if cancel.is_cancelled() {
        log::info!("Aggregation cancelled before any work started.");
        return Ok(AggregationResult::Cancelled);
    }

    let matcher = PathMatcher::from_config(config)?;
    let mut output = String::new();

    for preamble in preambles {
        output.push_str(preamble);
    }

    if config.generate_tree_structure {
        let tree_root = config.tree_scan_root(project_root);
        log::debug!("Generating tree section for: {}", tree_root.display());
        let entries = collect::collect_files(&tree_root, &matcher, config.use_gitignore)
            .map_err(|e| AppError::discovery(&tree_root, e))?;
        let label = tree::tree_root_label(&tree_root, config.tree_depth);
        let nodes = tree::build_tree(&entries, config.tree_depth);
        output.push_str(&tree::render_tree(&label, &nodes));
        output.push('\n');
    }

    let scan_root = config.aggregation_scan_root(project_root);
    let entries = collect::collect_files(&scan_root, &matcher, config.use_gitignore)
        .map_err(|e| AppError::discovery(&scan_root, e))?;

    let total = entries.len();
    let batch_size = config.batch_size.max(1);
    let mut processed = 0usize;
    log::info!(
        "Aggregating {} files in batches of {}.",
        total,
        batch_size
    );

    for batch in entries.chunks(batch_size) {
        if cancel.is_cancelled() {
            log::info!(
                "Aggregation cancelled after {} of {} files; discarding output.",
                processed,
                total
            );
            return Ok(AggregationResult::Cancelled);
        }

        let contents: Vec<String> = batch
            .par_iter()
            .map(read_file_text)
            .collect::<Result<_>>()?;

        for (entry, content) in batch.iter().zip(contents) {
            if config.include_file_headers {
                output.push_str("--- ");
                output.push_str(&entry.relative_slash());
                output.push_str(" ---\n\n");
            }
            output.push_str(&content);
            output.push_str("\n\n");
        }

        processed += batch.len();
        progress.report(Progress { processed, total });
    }

    Ok(AggregationResult::Completed(output))
}

fn read_file_text(entry: &FileEntry) -> Result<String> {
    let bytes = fs::read(&entry.path).map_err(|e| AppError::FileRead {
        path: entry.path.clone(),
        source: e,
    })?;
    // Decoded as text unconditionally; there is no binary detection or
    // skipping, so invalid UTF-8 degrades to replacement characters.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
