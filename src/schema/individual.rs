//! Candidate solutions carried between generations.

use serde::{Deserialize, Serialize};

use super::Tree;

/// A candidate solution: an expression tree plus its externally computed
/// fitness. The fitness value is opaque to this crate; ranking is delegated
/// to caller-supplied comparison callbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// The genotype.
    pub tree: Tree,
    /// Externally computed quality value.
    pub fitness: f64,
}

impl Individual {
    /// Pair a tree with its fitness.
    pub fn new(tree: Tree, fitness: f64) -> Self {
        Self { tree, fitness }
    }
}
