mod cli_args;
mod commands;
mod output;
mod signal;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use colored::*;
use std::path::Path;
use std::process;

use aggrecat_core::{AggregatorConfig, AppError};
use cli_args::{Cli, Commands, FilterOpts, ProjectOpts, RunOpts};

/// What a command run amounted to. Cancellation is not an error and maps to
/// its own exit code.
pub enum Outcome {
    Completed,
    Cancelled,
}

fn main() {
    let cli_args = Cli::parse();

    setup_logging(cli_args.quiet, cli_args.verbose);

    let quiet = cli_args.quiet;
    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(cli_args, quiet) {
        Ok(Outcome::Completed) => {
            log::info!("Application finished successfully.");
            0
        }
        Ok(Outcome::Cancelled) => {
            if !quiet {
                eprintln!("{}", "Aggregation cancelled; no output produced.".yellow());
            }
            130
        }
        Err(e) => {
            let exit_code = match e.downcast_ref::<AppError>() {
                Some(AppError::Config(_)) => 1,
                Some(AppError::TomlParse(_)) => 1,
                Some(AppError::TomlSerialize(_)) => 1,
                Some(AppError::Glob(_)) => 1,
                Some(AppError::InvalidArgument(_)) => 1,
                Some(AppError::Io(_)) => 2,
                Some(AppError::PathNotFound(_)) => 2,
                Some(AppError::Discovery { .. }) => 2,
                Some(AppError::FileRead { .. }) => 2,
                Some(AppError::FileWrite { .. }) => 2,
                Some(AppError::Ignore(_)) => 2,
                Some(_) => 1,
                None => 1,
            };

            eprintln!("{} {:#}", "Error:".red().bold(), e);
            exit_code
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run_app(cli: Cli, quiet: bool) -> Result<Outcome> {
    match cli.command {
        None => {
            Cli::command().print_help()?;
            Ok(Outcome::Completed)
        }
        Some(Commands::Full(args)) => {
            log::debug!("Executing 'full' command...");
            commands::full::handle_full_command(args, true, quiet)
        }
        Some(Commands::Files(args)) => {
            log::debug!("Executing 'files' command...");
            commands::full::handle_full_command(args, false, quiet)
        }
        Some(Commands::Tree(args)) => {
            log::debug!("Executing 'tree' command...");
            commands::tree::handle_tree_command(args, quiet)
        }
        Some(Commands::Config(args)) => {
            log::debug!("Executing 'config' command...");
            commands::config::handle_config_command(&args)?;
            Ok(Outcome::Completed)
        }
        Some(Commands::Completion(args)) => {
            log::debug!("Executing 'completion' command...");
            commands::completion::handle_completion_command(&args)?;
            Ok(Outcome::Completed)
        }
    }
}

// Shared by every command that needs a resolved configuration.
pub fn load_config_for_command(
    project_root: &Path,
    project_opts: &ProjectOpts,
) -> Result<AggregatorConfig> {
    let config_path = AggregatorConfig::resolve_config_path(
        project_root,
        project_opts.config_file.as_ref(),
        project_opts.disable_config_file,
    )
    .context("Failed to resolve configuration path")?;

    match &config_path {
        Some(path) => AggregatorConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(AggregatorConfig::default()),
    }
}

pub fn merge_config_with_cli_overrides(
    mut config: AggregatorConfig,
    filters: &FilterOpts,
    run: Option<&RunOpts>,
) -> AggregatorConfig {
    log::trace!("Applying CLI overrides to config...");

    if !filters.ignore.is_empty() {
        config.ignored_paths = filters.ignore.clone();
    }
    if !filters.extensions.is_empty() {
        config.file_extensions = filters.extensions.clone();
    }
    if filters.use_gitignore {
        config.use_gitignore = true;
    }

    if let Some(run) = run {
        if let Some(start) = &run.start {
            config.aggregation_start_path = start.clone();
        }
        if let Some(tree_start) = &run.tree_start {
            config.tree_start_path = tree_start.clone();
        }
        if let Some(depth) = run.tree_depth {
            config.tree_depth = depth;
        }
        if let Some(batch_size) = run.batch_size {
            config.batch_size = batch_size;
        }
        if run.headers {
            config.include_file_headers = true;
        }
        if run.no_headers {
            config.include_file_headers = false;
        }
    }

    log::trace!("Config after CLI overrides: {:?}", config);
    config
}
