use crate::cli_args::TreeArgs;
use crate::output;
use crate::{Outcome, load_config_for_command, merge_config_with_cli_overrides};
use aggrecat_core::{self as core, AggregatorConfig};
use anyhow::{Context, Result};

pub fn handle_tree_command(args: TreeArgs, quiet: bool) -> Result<Outcome> {
    let project_root =
        AggregatorConfig::determine_project_root(args.project.project_root.as_ref())
            .context("Failed to determine project root")?;
    log::info!("Project root determined: {}", project_root.display());

    let config = load_config_for_command(&project_root, &args.project)
        .context("Failed to load configuration")?;
    let mut config = merge_config_with_cli_overrides(config, &args.filters, None);
    if let Some(tree_start) = &args.tree_start {
        config.tree_start_path = tree_start.clone();
    }
    if let Some(depth) = args.tree_depth {
        config.tree_depth = depth;
    }

    let matcher = core::PathMatcher::from_config(&config)?;
    let tree_root = config.tree_scan_root(&project_root);
    let entries = core::collect_files(&tree_root, &matcher, config.use_gitignore)
        .map_err(|e| core::AppError::discovery(&tree_root, e))?;
    log::debug!("Collected {} entries for the tree.", entries.len());

    let label = core::tree_root_label(&tree_root, config.tree_depth);
    let nodes = core::build_tree(&entries, config.tree_depth);
    let rendered = core::render_tree(&label, &nodes);

    output::write_result(&rendered, args.output.save.as_deref(), quiet)?;
    Ok(Outcome::Completed)
}
