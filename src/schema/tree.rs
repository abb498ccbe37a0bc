//! Linear postorder expression trees.

use serde::{Deserialize, Serialize};

use super::Node;

/// An expression tree stored as a flat node sequence in children-before-parent
/// order; the last node is the root.
///
/// Every node's children occupy a contiguous block immediately preceding it,
/// so the whole structure can be traversed with subtree lengths alone, no
/// pointers. The tree exclusively owns its node buffer; indices are
/// structural.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Build a tree from a postorder node sequence and compute the derived
    /// per-node caches.
    ///
    /// # Panics
    /// Panics if the sequence is empty or is not a valid postorder encoding
    /// of exactly one rooted tree.
    pub fn new(nodes: Vec<Node>) -> Self {
        let mut tree = Self { nodes };
        tree.update_nodes();
        tree
    }

    /// Recompute the subtree `length` and `depth` caches in a single stack
    /// pass, validating the postorder invariant along the way.
    ///
    /// # Panics
    /// Panics if the node sequence is not a valid encoding of one tree.
    pub fn update_nodes(&mut self) {
        assert!(!self.nodes.is_empty(), "a tree has at least one node");
        let mut stack: Vec<(usize, usize)> = Vec::with_capacity(self.nodes.len());
        for node in &mut self.nodes {
            assert!(
                node.arity <= stack.len(),
                "node arity exceeds the available child subtrees"
            );
            let mut length = 1;
            let mut depth = 0;
            for _ in 0..node.arity {
                let (child_length, child_depth) = stack.pop().expect("arity checked above");
                length += child_length;
                depth = depth.max(child_depth);
            }
            node.length = length;
            node.depth = depth + 1;
            stack.push((length, depth + 1));
        }
        assert!(stack.len() == 1, "node sequence encodes more than one tree");
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a constructed tree; present for completeness.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Height of the tree.
    pub fn depth(&self) -> usize {
        self.root().depth
    }

    /// The root node (last element of the buffer).
    pub fn root(&self) -> &Node {
        self.nodes.last().expect("a tree has at least one node")
    }

    /// Shared view of the node buffer.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Mutable view of the node buffer.
    ///
    /// Changing `arity` or moving subtrees invalidates the derived caches;
    /// call [`Tree::update_nodes`] afterwards.
    pub fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Replace the node buffer with another postorder sequence of the same
    /// tree shape, recomputing the derived caches.
    pub(crate) fn replace_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
        self.update_nodes();
    }

    /// Iterator over the child root indices of the node at `index`, first
    /// child first (the first child's subtree sits immediately before its
    /// parent).
    pub fn children(&self, index: usize) -> Children<'_> {
        Children {
            nodes: &self.nodes,
            cursor: index.saturating_sub(1),
            remaining: self.nodes[index].arity,
        }
    }
}

/// Iterator over a node's child root indices. See [`Tree::children`].
#[derive(Debug)]
pub struct Children<'a> {
    nodes: &'a [Node],
    cursor: usize,
    remaining: usize,
}

impl Iterator for Children<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.cursor;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.cursor = index - self.nodes[index].length;
        }
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Children<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::symbol_hash;

    fn var(name: &str) -> Node {
        let mut node = Node::variable();
        node.hash_value = symbol_hash(name);
        node.calculated_hash = node.hash_value;
        node
    }

    fn function(name: &str, arity: usize) -> Node {
        Node::function(symbol_hash(name), arity)
    }

    #[test]
    fn caches_for_flat_binary_tree() {
        // add(y, x) stored as [x, y, add]
        let tree = Tree::new(vec![var("x"), var("y"), function("add", 2)]);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.root().length, 3);
        assert_eq!(tree.nodes()[0].length, 1);
        assert_eq!(tree.nodes()[0].depth, 1);
    }

    #[test]
    fn caches_for_nested_tree() {
        // mul(add(y, x), z) stored as [z, x, y, add, mul]
        let tree = Tree::new(vec![
            var("z"),
            var("x"),
            var("y"),
            function("add", 2),
            function("mul", 2),
        ]);
        assert_eq!(tree.root().length, 5);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.nodes()[3].length, 3);
        assert_eq!(tree.nodes()[3].depth, 2);
    }

    #[test]
    fn children_walk_subtree_blocks() {
        let tree = Tree::new(vec![
            var("z"),
            var("x"),
            var("y"),
            function("add", 2),
            function("mul", 2),
        ]);
        let children: Vec<usize> = tree.children(4).collect();
        assert_eq!(children, vec![3, 0]);
        let grandchildren: Vec<usize> = tree.children(3).collect();
        assert_eq!(grandchildren, vec![2, 1]);
        assert_eq!(tree.children(0).count(), 0);
    }

    #[test]
    fn child_lengths_sum_to_parent_length() {
        let tree = Tree::new(vec![
            var("z"),
            var("x"),
            var("y"),
            function("add", 2),
            function("mul", 2),
        ]);
        for index in 0..tree.len() {
            let child_sum: usize = tree
                .children(index)
                .map(|child| tree.nodes()[child].length)
                .sum();
            assert_eq!(tree.nodes()[index].length, child_sum + 1);
        }
    }

    #[test]
    #[should_panic(expected = "more than one tree")]
    fn two_roots_rejected() {
        let _ = Tree::new(vec![var("x"), var("y")]);
    }

    #[test]
    #[should_panic(expected = "arity exceeds")]
    fn missing_children_rejected() {
        let _ = Tree::new(vec![var("x"), function("add", 2)]);
    }

    #[test]
    #[should_panic(expected = "at least one node")]
    fn empty_sequence_rejected() {
        let _ = Tree::new(Vec::new());
    }

    #[test]
    fn serializes_round_trip() {
        let tree = Tree::new(vec![var("x"), var("y"), function("add", 2)]);
        let json = serde_json::to_string(&tree).expect("serializable");
        let back: Tree = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(tree, back);
    }
}
