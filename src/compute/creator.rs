//! Constrained random construction of expression trees.

use log::debug;
use rand::Rng;
use rand_distr::StandardNormal;
use thiserror::Error;

use crate::schema::{Grammar, Node, Tree, Variable};

/// Errors surfaced by [`BalancedTreeCreator::create`].
///
/// These are precondition violations; construction never returns a partially
/// built tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CreatorError {
    /// The requested node count was zero.
    #[error("target length must be greater than zero")]
    ZeroTargetLength,
    /// No input variables to assign to variable leaves.
    #[error("cannot assign variable leaves without input variables")]
    NoVariables,
}

/// Builds trees of approximately a requested size by breadth-first expansion
/// under the grammar's arity constraints.
///
/// Constant leaves draw their value from N(0, 1); variable leaves pick one of
/// the input variables uniformly. An optional irregularity bias forces leaves
/// into open child slots with the given probability, producing asymmetric
/// shapes instead of the default balanced ones.
pub struct BalancedTreeCreator<'a, G> {
    grammar: &'a G,
    variables: Vec<Variable>,
    irregularity_bias: f64,
}

impl<'a, G: Grammar> BalancedTreeCreator<'a, G> {
    /// Create a creator over the given grammar and input variables.
    pub fn new(grammar: &'a G, variables: Vec<Variable>) -> Self {
        Self {
            grammar,
            variables,
            irregularity_bias: 0.0,
        }
    }

    /// Set the probability of forcing a leaf into an open child slot.
    ///
    /// # Panics
    /// Panics during generation if `bias` is outside `[0, 1]`.
    pub fn with_irregularity_bias(mut self, bias: f64) -> Self {
        self.irregularity_bias = bias;
        self
    }

    /// Build a tree with as close to `target_len` nodes as the grammar's
    /// arity limits allow.
    ///
    /// # Panics
    /// Panics if the grammar configuration makes every length unreachable
    /// (invariant violation, not a recoverable condition).
    pub fn create<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        target_len: usize,
    ) -> Result<Tree, CreatorError> {
        if target_len == 0 {
            return Err(CreatorError::ZeroTargetLength);
        }
        if self.variables.is_empty() {
            return Err(CreatorError::NoVariables);
        }

        let (min_function_arity, max_function_arity) = self.grammar.function_arity_limits();

        // length one is a single leaf; otherwise the minimum achievable
        // length is min_function_arity + 1
        let mut target_len = target_len;
        if target_len > 1 && target_len < min_function_arity + 1 {
            debug!(
                "target length {target_len} is unreachable, snapping to {}",
                min_function_arity + 1
            );
            target_len = min_function_arity + 1;
        }

        let max_arity = max_function_arity.min(target_len - 1);
        let min_arity = min_function_arity.min(max_arity);

        let mut root = self.grammar.sample(rng, min_arity, max_arity);
        self.init_leaf(rng, &mut root);

        if root.is_leaf() {
            return Ok(Tree::new(vec![root]));
        }

        // worklist of (node, index of its first child in the worklist); the
        // buffer doubles as the FIFO expansion queue, so processing order is
        // breadth-first
        let mut worklist: Vec<(Node, usize)> = Vec::with_capacity(target_len);
        worklist.push((root, 0));

        let mut open_slots = root.arity;

        let mut current = 0;
        while current < worklist.len() {
            let node = worklist[current].0;
            worklist[current].1 = worklist.len();
            for _ in 0..node.arity {
                let mut max_arity = if open_slots > worklist.len() + 1
                    && rng.gen_bool(self.irregularity_bias)
                {
                    0
                } else {
                    max_function_arity.min(target_len.saturating_sub(open_slots + 1))
                };

                // certain lengths cannot be generated using the available
                // symbols; push the shared target towards an achievable value
                while max_arity > 0 && max_arity < min_function_arity {
                    target_len = target_len.saturating_sub(min_function_arity - max_arity);
                    assert!(
                        target_len == 1 || target_len >= min_function_arity + 1,
                        "length adjustment left no achievable target"
                    );
                    debug!("shrunk target length to {target_len}");
                    max_arity = max_function_arity.min(target_len.saturating_sub(open_slots + 1));
                }
                let min_arity = min_function_arity.min(max_arity);

                let mut child = self.grammar.sample(rng, min_arity, max_arity);
                self.init_leaf(rng, &mut child);
                open_slots += child.arity;
                worklist.push((child, 0));
            }
            current += 1;
        }

        let mut nodes = vec![Node::constant(0.0); worklist.len()];
        let mut idx = worklist.len();
        emit_postfix(&worklist, 0, &mut nodes, &mut idx);
        debug_assert_eq!(idx, 0);

        Ok(Tree::new(nodes))
    }

    /// Assign leaf payloads: a uniformly chosen variable identity for
    /// variable leaves, and an N(0, 1) draw as value for every leaf.
    fn init_leaf<R: Rng + ?Sized>(&self, rng: &mut R, node: &mut Node) {
        if !node.is_leaf() {
            return;
        }
        if node.is_variable() {
            let variable = &self.variables[rng.gen_range(0..self.variables.len())];
            node.hash_value = variable.hash;
            node.calculated_hash = variable.hash;
        }
        node.value = rng.sample(StandardNormal);
    }
}

/// Write the subtree rooted at worklist `entry` into `nodes`, ending just
/// before `*idx`, children before parent. Each recursive call claims the
/// contiguous block immediately preceding its parent's slot.
fn emit_postfix(worklist: &[(Node, usize)], entry: usize, nodes: &mut [Node], idx: &mut usize) {
    let (node, child_start) = worklist[entry];
    *idx -= 1;
    nodes[*idx] = node;
    for child in child_start..child_start + node.arity {
        emit_postfix(worklist, child, nodes, idx);
    }
}
