//! Pre-order tree traversal
//!
//! Children are owned, so a [`TreeNode`] can't contain a cycle and every
//! walk terminates.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// A node with an id and ordered children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = TreeNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Total number of nodes, this one included
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }
}

/// Visit `node`, then each child subtree in order
pub fn walk_pre_order<'a, F>(node: &'a TreeNode, visit: &mut F)
where
    F: FnMut(&'a TreeNode),
{
    visit(node);
    for child in &node.children {
        walk_pre_order(child, visit);
    }
}

/// Same order as [`walk_pre_order`], with the depth of each node (root = 0)
pub fn walk_pre_order_with_depth<'a, F>(node: &'a TreeNode, visit: &mut F)
where
    F: FnMut(&'a TreeNode, usize),
{
    fn walk<'a, F: FnMut(&'a TreeNode, usize)>(node: &'a TreeNode, depth: usize, visit: &mut F) {
        visit(node, depth);
        for child in &node.children {
            walk(child, depth + 1, visit);
        }
    }
    walk(node, 0, visit);
}

/// Walk the tree and emit each node id as a tracing event
#[instrument(level = "debug", skip(node), fields(root = %node.id))]
pub fn traverse_tree(node: &TreeNode) {
    walk_pre_order(node, &mut |n| info!(id = %n.id, "visit"));
}

/// Node ids in pre-order
pub fn pre_order_ids(node: &TreeNode) -> Vec<&str> {
    let mut ids = Vec::with_capacity(node.size());
    walk_pre_order(node, &mut |n| ids.push(n.id.as_str()));
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        TreeNode::new("root").with_children([
            TreeNode::new("B").with_children([TreeNode::new("D")]),
            TreeNode::new("C"),
        ])
    }

    #[test]
    fn visits_in_pre_order() {
        assert_eq!(pre_order_ids(&sample()), vec!["root", "B", "D", "C"]);
    }

    #[test]
    fn single_node() {
        assert_eq!(pre_order_ids(&TreeNode::new("only")), vec!["only"]);
    }

    #[test]
    fn depth_follows_nesting() {
        let tree = sample();
        let mut seen = Vec::new();
        walk_pre_order_with_depth(&tree, &mut |n, d| seen.push((n.id.clone(), d)));
        assert_eq!(
            seen,
            vec![
                ("root".to_string(), 0),
                ("B".to_string(), 1),
                ("D".to_string(), 2),
                ("C".to_string(), 1),
            ]
        );
    }

    #[test]
    fn size_counts_all_nodes() {
        assert_eq!(sample().size(), 4);
    }

    #[test]
    fn traverse_tree_runs_without_subscriber() {
        traverse_tree(&sample());
    }

    #[test]
    fn deserializes_with_missing_children() {
        let tree: TreeNode =
            serde_json::from_str(r#"{"id": "a", "children": [{"id": "b"}]}"#).unwrap();
        assert_eq!(tree, TreeNode::new("a").with_children([TreeNode::new("b")]));
    }

    #[test]
    fn deep_chain_is_walked_fully() {
        let mut node = TreeNode::new("leaf");
        for i in 0..200 {
            node = TreeNode::new(format!("n{i}")).with_children([node]);
        }
        let ids = pre_order_ids(&node);
        assert_eq!(ids.len(), 201);
        assert_eq!(ids.first(), Some(&"n199"));
        assert_eq!(ids.last(), Some(&"leaf"));
    }
}
