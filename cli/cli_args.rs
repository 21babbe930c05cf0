use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct ProjectOpts {
    #[arg(
        long,
        help = "Specify the target project directory (default: current dir).",
        help_heading = "Project Setup",
        value_name = "PATH"
    )]
    pub project_root: Option<PathBuf>,

    #[arg(
        long,
        help = "Specify path/filename of the TOML config file (default: aggrecat.toml in the project root).",
        value_name = "CONFIG_FILE",
        conflicts_with = "disable_config_file",
        help_heading = "Project Setup"
    )]
    pub config_file: Option<String>,

    #[arg(
        long,
        help = "Disable loading any TOML config file.",
        conflicts_with = "config_file",
        help_heading = "Project Setup"
    )]
    pub disable_config_file: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterOpts {
    #[arg(
        long = "ignore",
        help = "Glob pattern to exclude (repeatable; replaces the configured set).",
        value_name = "GLOB",
        help_heading = "Filtering"
    )]
    pub ignore: Vec<String>,

    #[arg(
        short = 'e',
        long = "extension",
        help = "Admit only files with this extension, no leading dot (repeatable).",
        value_name = "EXT",
        help_heading = "Filtering"
    )]
    pub extensions: Vec<String>,

    #[arg(
        long,
        help = "Additionally apply .gitignore rules while walking.",
        help_heading = "Filtering"
    )]
    pub use_gitignore: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunOpts {
    #[arg(
        long,
        help = "Start aggregation at this path relative to the project root.",
        value_name = "PATH",
        help_heading = "Aggregation"
    )]
    pub start: Option<String>,

    #[arg(
        long,
        help = "Start the tree at this path relative to the project root.",
        value_name = "PATH",
        help_heading = "Aggregation"
    )]
    pub tree_start: Option<String>,

    #[arg(
        long,
        help = "Number of leading path segments stripped from the rendered tree.",
        value_name = "N",
        help_heading = "Aggregation"
    )]
    pub tree_depth: Option<usize>,

    #[arg(
        long,
        help = "Files read concurrently per batch.",
        value_name = "N",
        help_heading = "Aggregation"
    )]
    pub batch_size: Option<usize>,

    #[arg(
        long,
        help = "Emit a '--- path ---' header before each file [default].",
        conflicts_with = "no_headers",
        help_heading = "Aggregation"
    )]
    pub headers: bool,

    #[arg(
        long,
        help = "Suppress per-file headers.",
        conflicts_with = "headers",
        help_heading = "Aggregation"
    )]
    pub no_headers: bool,

    #[arg(
        long,
        help = "Prepend the project's masterplan.md as a preamble block.",
        help_heading = "Aggregation"
    )]
    pub include_masterplan: bool,

    #[arg(
        long,
        help = "Prepend the project's package.json as a preamble block.",
        help_heading = "Aggregation"
    )]
    pub include_package_json: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputOpts {
    #[arg(
        short = 's',
        long,
        help = "Write the result to this file instead of stdout.",
        value_name = "PATH",
        help_heading = "Output"
    )]
    pub save: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Aggregate a directory subtree into a single text blob.",
    long_about = "aggrecat scans a directory subtree, filters entries by configurable \ninclusion/exclusion rules, and produces a textual tree diagram and a single \nconcatenated blob of the matched file contents.",
    help_template = "{about-section}\nUsage: {usage}\n\n{all-args}{after-help}",
    after_help = "EXAMPLES:\n  aggrecat full --save context.txt\n  aggrecat files -e rs -e toml --no-headers\n  aggrecat tree --tree-depth 1",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        global = true,
        help = "Silence informational messages and warnings."
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(
        visible_alias = "f",
        about = "Generate the directory tree followed by all matched file contents."
    )]
    Full(RunArgs),

    #[command(about = "Aggregate matched file contents only, without the tree section.")]
    Files(RunArgs),

    #[command(visible_alias = "t", about = "Render only the directory tree.")]
    Tree(TreeArgs),

    #[command(about = "Print the default configuration file structure.")]
    Config(ConfigArgs),

    #[command(about = "Generate shell completion scripts.")]
    Completion(CompletionArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub project: ProjectOpts,
    #[command(flatten)]
    pub filters: FilterOpts,
    #[command(flatten)]
    pub run: RunOpts,
    #[command(flatten)]
    pub output: OutputOpts,
}

#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    #[command(flatten)]
    pub project: ProjectOpts,
    #[command(flatten)]
    pub filters: FilterOpts,

    #[arg(
        long,
        help = "Start the tree at this path relative to the project root.",
        value_name = "PATH",
        help_heading = "Aggregation"
    )]
    pub tree_start: Option<String>,

    #[arg(
        long,
        help = "Number of leading path segments stripped from the rendered tree.",
        value_name = "N",
        help_heading = "Aggregation"
    )]
    pub tree_depth: Option<usize>,

    #[command(flatten)]
    pub output: OutputOpts,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {}

#[derive(Args, Debug, Clone)]
pub struct CompletionArgs {
    #[arg(value_enum, help = "Shell to generate a completion script for.")]
    pub shell: Shell,
}
