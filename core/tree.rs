use crate::collect::FileEntry;
use std::path::{Component, Path};

/// One level of the rendered hierarchy. A node with no children is a leaf;
/// whether a name is a leaf or an interior node is decided purely by whether
/// any path treats it as an interior segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub name: String,
    pub children: Vec<TreeNode>,
}

/// Builds the nested structure from collected entries. The first
/// `tree_depth` path segments of every entry are dropped; entries left with
/// no segments contribute nothing (they are excluded from the rendered
/// tree, not an error).
pub fn build_tree(entries: &[FileEntry], tree_depth: usize) -> Vec<TreeNode> {
    log::debug!(
        "Building tree structure from {} entries (depth {}).",
        entries.len(),
        tree_depth
    );
    let mut root_nodes: Vec<TreeNode> = Vec::new();

    for entry in entries {
        let components: Vec<String> = entry
            .relative_path
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        if components.len() <= tree_depth {
            log::trace!(
                "Entry shallower than tree depth, skipping: {}",
                entry.relative_path.display()
            );
            continue;
        }
        insert_node(&mut root_nodes, &components[tree_depth..]);
    }

    root_nodes
}

fn insert_node(current_level: &mut Vec<TreeNode>, components: &[String]) {
    let Some((component_name, remaining)) = components.split_first() else {
        return;
    };

    match current_level.binary_search_by(|node| node.name.as_str().cmp(component_name)) {
        Ok(index) => {
            insert_node(&mut current_level[index].children, remaining);
        }
        Err(insertion_point) => {
            let mut new_node = TreeNode {
                name: component_name.clone(),
                children: Vec::new(),
            };
            insert_node(&mut new_node.children, remaining);
            current_level.insert(insertion_point, new_node);
        }
    }
}

/// Label for the rendered root line: the base name of the tree scan root
/// when no depth truncation applies, otherwise the base name of its parent,
/// so the label stays meaningful once leading segments are stripped.
pub fn tree_root_label(tree_scan_root: &Path, tree_depth: usize) -> String {
    let labeled = if tree_depth == 0 {
        tree_scan_root.file_name()
    } else {
        tree_scan_root.parent().and_then(|p| p.file_name())
    };
    labeled
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string())
}

/// Renders the tree depth-first, preserving child order. Ends with a
/// trailing newline.
pub fn render_tree(label: &str, nodes: &[TreeNode]) -> String {
    let mut output = String::new();
    output.push_str(label);
    output.push('\n');
    for (i, node) in nodes.iter().enumerate() {
        render_node(node, &mut output, "", i == nodes.len() - 1);
    }
    output
}

fn render_node(node: &TreeNode, output: &mut String, prefix: &str, is_last: bool) {
    let connector = if is_last { "└── " } else { "├── " };
    output.push_str(prefix);
    output.push_str(connector);
    output.push_str(&node.name);
    output.push('\n');

    let child_prefix = if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };
    for (i, child) in node.children.iter().enumerate() {
        render_node(child, output, &child_prefix, i == node.children.len() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entries(paths: &[&str]) -> Vec<FileEntry> {
        paths
            .iter()
            .map(|p| FileEntry {
                path: PathBuf::from("/scan").join(p),
                relative_path: PathBuf::from(p),
            })
            .collect()
    }

    #[test]
    fn builds_nested_nodes_with_sorted_children() {
        let tree = build_tree(&entries(&["d.rs", "a/c.rs", "a/b.rs"]), 0);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].name, "a");
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].name, "b.rs");
        assert_eq!(tree[0].children[1].name, "c.rs");
        assert_eq!(tree[1].name, "d.rs");
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn shared_prefixes_merge_into_one_node() {
        let tree = build_tree(&entries(&["src/a/one.rs", "src/a/two.rs", "src/b.rs"]), 0);
        assert_eq!(tree.len(), 1);
        let src = &tree[0];
        assert_eq!(src.name, "src");
        assert_eq!(src.children.len(), 2);
        assert_eq!(src.children[0].name, "a");
        assert_eq!(src.children[0].children.len(), 2);
        assert_eq!(src.children[1].name, "b.rs");
    }

    #[test]
    fn depth_truncation_strips_leading_segments() {
        let tree = build_tree(&entries(&["x/one.rs", "x/two.rs", "top.rs"]), 1);
        // `top.rs` has fewer segments than the depth and disappears.
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].name, "one.rs");
        assert_eq!(tree[1].name, "two.rs");
    }

    #[test]
    fn depth_beyond_all_paths_yields_empty_tree() {
        let tree = build_tree(&entries(&["a/b.rs"]), 5);
        assert!(tree.is_empty());
    }

    #[test]
    fn renders_connectors_and_continuation_prefixes() {
        let tree = build_tree(&entries(&["a/b.rs", "a/c.rs", "d.rs"]), 0);
        let rendered = render_tree("root", &tree);
        let expected = "\
root
├── a
│   ├── b.rs
│   └── c.rs
└── d.rs
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn root_label_uses_parent_once_depth_strips_segments() {
        let root = Path::new("/projects/demo/fixtures");
        assert_eq!(tree_root_label(root, 0), "fixtures");
        assert_eq!(tree_root_label(root, 1), "demo");
        assert_eq!(tree_root_label(Path::new("/"), 0), ".");
    }

    #[test]
    fn empty_tree_renders_label_only() {
        let rendered = render_tree("fixtures", &[]);
        assert_eq!(rendered, "fixtures\n");
    }
}
