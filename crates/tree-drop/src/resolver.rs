//! Resolving dropped ids back into tree nodes.

use async_trait::async_trait;

use crate::tree::TreeNode;

/// Source of the current tree, supplied by the host.
#[async_trait]
pub trait TreeProvider: Send + Sync {
    /// Root nodes of the tree as the host currently knows it. `None` means no tree is loaded.
    async fn get_children(&self) -> Option<Vec<TreeNode>>;
}

/// A fixed tree, for hosts that already hold a full snapshot (and for tests).
#[derive(Debug, Clone, Default)]
pub struct TreeSnapshot {
    roots: Vec<TreeNode>,
}

impl TreeSnapshot {
    pub fn new(roots: Vec<TreeNode>) -> Self {
        Self { roots }
    }

    /// Parses a snapshot from the host's JSON array of root nodes.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

#[async_trait]
impl TreeProvider for TreeSnapshot {
    async fn get_children(&self) -> Option<Vec<TreeNode>> {
        Some(self.roots.clone())
    }
}

/// Finds the node with `id`, depth-first in pre-order. The first match wins.
///
/// Nodes that were never expanded (`children == None`) are treated as leaves.
pub fn find_node_by_id<'a>(id: &str, roots: &'a [TreeNode]) -> Option<&'a TreeNode> {
    let mut stack: Vec<&TreeNode> = roots.iter().rev().collect();
    while let Some(node) = stack.pop() {
        log::trace!("Comparing {}", node.id);
        if node.id == id {
            return Some(node);
        }
        if let Some(children) = &node.children {
            stack.extend(children.iter().rev());
        }
    }
    None
}

/// Resolves every id, in order, silently dropping the ones that aren't in the tree.
pub fn resolve_nodes<'a, S: AsRef<str>>(ids: &[S], roots: &'a [TreeNode]) -> Vec<&'a TreeNode> {
    ids.iter()
        .filter_map(|id| {
            let id = id.as_ref();
            let node = find_node_by_id(id, roots);
            if node.is_none() {
                log::debug!("resolve_nodes: no node with id {}, skipping", id);
            }
            node
        })
        .collect()
}
