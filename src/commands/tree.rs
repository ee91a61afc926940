//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays a role's
//! resolved dependency graph in a hierarchical format.
//!
//! ## Functionality
//!
//! - **Dependency Tree Visualization**: Displays the dependency graph of a
//!   resolved role
//! - **Depth Control**: Supports `--depth` flag to limit tree depth
//! - **Diamond Marking**: A role already printed elsewhere in the tree is
//!   marked `(shared)` and its subtree is not repeated
//!
//! This command is a safe, read-only operation that does not modify any
//! files.

use anyhow::Result;
use clap::Args;
use ptree::{print_tree, TreeItem};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use rolegraph::cache::RoleCache;
use rolegraph::definition::RoleDefinition;
use rolegraph::locator::RoleSearch;
use rolegraph::reference::{RoleKey, RoleReference};
use rolegraph::resolver::RoleGraphResolver;

/// Display a role's dependency tree
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Name of the role to resolve
    #[arg(value_name = "ROLE")]
    pub role: String,

    /// Additional directory to search for roles (repeatable)
    #[arg(long = "roles-path", value_name = "DIR", env = "ROLEGRAPH_ROLES_PATH")]
    pub roles_path: Vec<PathBuf>,

    /// Maximum depth to display in the tree.
    ///
    /// If not specified, displays the full tree.
    /// Use 0 to show only the root role, 1 to show its direct
    /// dependencies, etc.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,
}

/// Execute the `tree` command.
///
/// Resolves the named role and renders its dependency graph as a tree.
pub fn execute(args: TreeArgs) -> Result<()> {
    let search = if args.roles_path.is_empty() {
        RoleSearch::default()
    } else {
        RoleSearch::new(args.roles_path.clone())
    };

    let resolver = RoleGraphResolver::new(RoleCache::new());
    let root = resolver
        .resolve(&RoleReference::new(args.role.clone(), search))
        .map_err(|e| anyhow::anyhow!("Failed to resolve role '{}': {}", args.role, e))?;

    println!("🌳 Dependency tree for role: {}", root.name());

    let mut seen = HashSet::new();
    let tree_root = build_tree_node(
        &root,
        args.depth.unwrap_or(usize::MAX),
        0,
        &mut seen,
    )?;
    print_tree(&tree_root).map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;

    Ok(())
}

/// Build a tree node from a resolved role definition
fn build_tree_node(
    role: &Arc<RoleDefinition>,
    max_depth: usize,
    current_depth: usize,
    seen: &mut HashSet<RoleKey>,
) -> Result<TreeNode> {
    let mut label = role.name().to_string();
    if role.key().has_overrides() {
        label.push_str(" (parameterized)");
    }

    if seen.contains(role.key()) {
        // Subtree already rendered elsewhere (diamond dependency)
        label.push_str(" (shared)");
        return Ok(TreeNode {
            label,
            children: vec![],
        });
    }

    if current_depth >= max_depth {
        // Cut off without marking: the subtree was not rendered, so a
        // later occurrence at a shallower depth must still expand it.
        return Ok(TreeNode {
            label,
            children: vec![],
        });
    }
    seen.insert(role.key().clone());

    let children = role
        .direct_dependencies()?
        .iter()
        .map(|child| build_tree_node(child, max_depth, current_depth + 1, seen))
        .collect::<Result<Vec<_>>>()?;

    Ok(TreeNode { label, children })
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> std::borrow::Cow<'_, [Self::Child]> {
        std::borrow::Cow::Borrowed(&self.children)
    }
}
