use crate::cli_args::{RunArgs, RunOpts};
use crate::output;
use crate::signal;
use crate::{Outcome, load_config_for_command, merge_config_with_cli_overrides};
use aggrecat_core::{self as core, AggregationResult, AggregatorConfig, Progress};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

// Handles both `full` and `files`; the two differ only in whether the tree
// section is generated.
pub fn handle_full_command(args: RunArgs, include_tree: bool, quiet: bool) -> Result<Outcome> {
    let project_root =
        AggregatorConfig::determine_project_root(args.project.project_root.as_ref())
            .context("Failed to determine project root")?;
    log::info!("Project root determined: {}", project_root.display());

    let config = load_config_for_command(&project_root, &args.project)
        .context("Failed to load configuration")?;
    let mut config = merge_config_with_cli_overrides(config, &args.filters, Some(&args.run));
    config.generate_tree_structure = include_tree;

    if config.batch_size == 0 {
        anyhow::bail!(core::AppError::InvalidArgument(
            "Batch size must be greater than zero.".to_string()
        ));
    }

    let preambles = gather_preambles(&project_root, &args.run);
    let cancel = signal::install_cancel_handler()?;

    let progress_quiet = quiet;
    let progress = move |p: Progress| {
        if !progress_quiet {
            eprintln!(
                "Processed {}/{} files ({:.0}%)",
                p.processed,
                p.total,
                p.fraction() * 100.0
            );
        }
    };

    log::info!("Starting aggregation for: {}", project_root.display());
    let result = core::aggregate(&project_root, &config, &preambles, &progress, &cancel)
        .context("Aggregation failed")?;

    match result {
        AggregationResult::Cancelled => Ok(Outcome::Cancelled),
        AggregationResult::Completed(text) => {
            output::write_result(&text, args.output.save.as_deref(), quiet)?;
            Ok(Outcome::Completed)
        }
    }
}

// The engine only concatenates pre-fetched text blocks; locating and
// reading the special files happens here.
fn gather_preambles(project_root: &Path, run: &RunOpts) -> Vec<String> {
    let mut preambles = Vec::new();
    if run.include_masterplan {
        push_preamble(&mut preambles, project_root, "masterplan.md");
    }
    if run.include_package_json {
        push_preamble(&mut preambles, project_root, "package.json");
    }
    preambles
}

fn push_preamble(preambles: &mut Vec<String>, project_root: &Path, file_name: &str) {
    let path = project_root.join(file_name);
    match fs::read_to_string(&path) {
        Ok(content) => {
            log::debug!("Including preamble file: {}", path.display());
            preambles.push(format!("{}\n\n", content.trim_end()));
        }
        Err(e) => {
            log::warn!("Skipping preamble file '{}': {}", path.display(), e);
        }
    }
}
