//! Expression tree node types.

use serde::{Deserialize, Serialize};

use super::grammar::symbol_hash;

/// Classification of a node's symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Numeric constant leaf.
    Constant,
    /// Input variable leaf.
    Variable,
    /// Function symbol with one or more children.
    Function,
}

/// A single symbol occurrence inside a [`Tree`](super::Tree).
///
/// `hash_value` identifies the symbol itself (which variable or function);
/// `calculated_hash` is context-dependent and filled in by
/// [`hash_tree`](crate::compute::hash_tree). The `length` and `depth` caches
/// are derived from the surrounding tree and maintained by
/// [`Tree::update_nodes`](super::Tree::update_nodes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Symbol classification.
    pub kind: NodeKind,
    /// Number of children; 0 iff the node is a leaf.
    pub arity: usize,
    /// Numeric payload: constant value, working storage for variables.
    pub value: f64,
    /// Static identity hash of the symbol.
    pub hash_value: u64,
    /// Context-dependent structural hash.
    pub calculated_hash: u64,
    /// Subtree node count including this node.
    pub length: usize,
    /// Subtree height; 1 for leaves.
    pub depth: usize,
}

impl Node {
    /// A constant leaf carrying `value`.
    pub fn constant(value: f64) -> Self {
        let hash = symbol_hash("constant");
        Self {
            kind: NodeKind::Constant,
            arity: 0,
            value,
            hash_value: hash,
            calculated_hash: hash,
            length: 1,
            depth: 1,
        }
    }

    /// A variable leaf. The concrete variable identity is assigned later by
    /// the creator (or the caller) via `hash_value`.
    pub fn variable() -> Self {
        let hash = symbol_hash("variable");
        Self {
            kind: NodeKind::Variable,
            arity: 0,
            value: 0.0,
            hash_value: hash,
            calculated_hash: hash,
            length: 1,
            depth: 1,
        }
    }

    /// A function symbol with the given identity hash and arity.
    ///
    /// # Panics
    /// Panics if `arity` is zero; zero-arity symbols are leaves.
    pub fn function(hash_value: u64, arity: usize) -> Self {
        assert!(arity > 0, "function symbols need at least one child");
        Self {
            kind: NodeKind::Function,
            arity,
            value: 0.0,
            hash_value,
            calculated_hash: hash_value,
            length: 1,
            depth: 1,
        }
    }

    /// True iff the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.arity == 0
    }

    /// True iff the node is a variable leaf.
    pub fn is_variable(&self) -> bool {
        self.kind == NodeKind::Variable
    }

    /// True iff the node is a constant leaf.
    pub fn is_constant(&self) -> bool {
        self.kind == NodeKind::Constant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_have_zero_arity() {
        assert!(Node::constant(1.5).is_leaf());
        assert!(Node::variable().is_leaf());
        assert!(!Node::function(symbol_hash("add"), 2).is_leaf());
    }

    #[test]
    fn kind_matches_constructor() {
        assert_eq!(Node::constant(0.0).kind, NodeKind::Constant);
        assert_eq!(Node::variable().kind, NodeKind::Variable);
        assert_eq!(Node::function(1, 2).kind, NodeKind::Function);
    }

    #[test]
    #[should_panic(expected = "at least one child")]
    fn zero_arity_function_rejected() {
        let _ = Node::function(1, 0);
    }
}
