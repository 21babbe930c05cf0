pub mod aggregate;
pub mod collect;
pub mod config;
pub mod error;
pub mod matcher;
pub mod progress;
pub mod tree;

pub use aggregate::{AggregationResult, aggregate};
pub use collect::{FileEntry, collect_files};
pub use config::{AggregatorConfig, DEFAULT_BATCH_SIZE, DEFAULT_CONFIG_FILENAME};
pub use error::{AppError, Result};
pub use matcher::PathMatcher;
pub use progress::{CancellationToken, NoProgress, Progress, ProgressSink};
pub use tree::{TreeNode, build_tree, render_tree, tree_root_label};
