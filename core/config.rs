use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILENAME: &str = "aggrecat.toml";
pub const DEFAULT_BATCH_SIZE: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AggregatorConfig {
    #[serde(default = "default_ignored_paths")]
    pub ignored_paths: Vec<String>,
    #[serde(default = "default_true")]
    pub include_file_headers: bool,
    #[serde(default = "default_true")]
    pub generate_tree_structure: bool,
    #[serde(default)]
    pub tree_start_path: String,
    #[serde(default)]
    pub aggregation_start_path: String,
    #[serde(default)]
    pub file_extensions: Vec<String>,
    #[serde(default)]
    pub tree_depth: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default)]
    pub use_gitignore: bool,
}

fn default_true() -> bool {
    true
}
fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}
fn default_ignored_paths() -> Vec<String> {
    vec!["**/node_modules/**".to_string(), "**/.git/**".to_string()]
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            ignored_paths: default_ignored_paths(),
            include_file_headers: default_true(),
            generate_tree_structure: default_true(),
            tree_start_path: String::new(),
            aggregation_start_path: String::new(),
            file_extensions: Vec::new(),
            tree_depth: 0,
            batch_size: default_batch_size(),
            use_gitignore: false,
        }
    }
}

impl AggregatorConfig {
    /// Absolute directory the tree section scans, `tree_start_path` resolved
    /// against the project root.
    pub fn tree_scan_root(&self, project_root: &Path) -> PathBuf {
        join_start_path(project_root, &self.tree_start_path)
    }

    /// Absolute directory the aggregation scans.
    pub fn aggregation_scan_root(&self, project_root: &Path) -> PathBuf {
        join_start_path(project_root, &self.aggregation_start_path)
    }

    pub fn determine_project_root(cli_project_root: Option<&PathBuf>) -> Result<PathBuf> {
        let path_to_resolve = match cli_project_root {
            Some(p) => {
                let expanded = shellexpand::tilde(&p.to_string_lossy().to_string()).into_owned();
                PathBuf::from(expanded)
            }
            None => env::current_dir().map_err(AppError::Io)?,
        };

        path_to_resolve.canonicalize().map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to canonicalize project root '{}': {}",
                    path_to_resolve.display(),
                    e
                ),
            ))
        })
    }

    pub fn resolve_config_path(
        project_root: &Path,
        cli_config_file: Option<&String>,
        cli_disable_config: bool,
    ) -> Result<Option<PathBuf>> {
        if cli_disable_config {
            log::debug!("Config file loading disabled via CLI flag.");
            return Ok(None);
        }

        match cli_config_file {
            Some(p_str) => {
                let expanded = shellexpand::tilde(p_str);
                let path = PathBuf::from(expanded.as_ref());
                let path = if path.is_absolute() {
                    path
                } else {
                    project_root.join(path)
                };
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Specified config file not found at path: {}",
                        path.display()
                    )));
                }
                log::debug!("Using specified config file path: {}", path.display());
                Ok(Some(path))
            }
            None => {
                let default_path = project_root.join(DEFAULT_CONFIG_FILENAME);
                if default_path.exists() {
                    log::debug!("Using default config file path: {}", default_path.display());
                    Ok(Some(default_path))
                } else {
                    log::debug!(
                        "No config file specified and default not found at: {}",
                        default_path.display()
                    );
                    Ok(None)
                }
            }
        }
    }

    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        log::info!("Loading configuration from: {}", config_path.display());
        let toml_content = fs::read_to_string(config_path).map_err(|e| AppError::FileRead {
            path: config_path.to_path_buf(),
            source: e,
        })?;
        toml::from_str::<AggregatorConfig>(&toml_content).map_err(|e| {
            AppError::TomlParse(format!(
                "Error parsing config file '{}': {}. Check TOML syntax and structure.",
                config_path.display(),
                e
            ))
        })
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(AppError::TomlSerialize)
    }
}

fn join_start_path(project_root: &Path, start: &str) -> PathBuf {
    let trimmed = start.trim_start_matches("./").trim_end_matches(['/', '\\']);
    if trimmed.is_empty() || trimmed == "." {
        project_root.to_path_buf()
    } else {
        project_root.join(trimmed)
    }
}
