//! Structural hashing and canonical child ordering.

use std::hash::Hasher;

use crate::schema::{Node, Tree};

/// Equivalence policy realized by [`hash_tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashMode {
    /// Child order is significant: two trees hash equally iff they are
    /// structurally identical including child order.
    Strict,
    /// Children are treated as an unordered set: trees differing only in the
    /// order of a node's children hash equally.
    Relaxed,
}

/// Interchangeable 64-bit hash back-ends.
///
/// The back-end only affects collision probability and throughput, never the
/// equivalence policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashFunction {
    /// `rustc-hash` FxHasher: fast multiplicative mixing.
    Fx,
    /// FNV-1a.
    Fnv,
}

impl HashFunction {
    fn combine(self, words: &[u64]) -> u64 {
        match self {
            HashFunction::Fx => finish::<rustc_hash::FxHasher>(words),
            HashFunction::Fnv => finish::<fnv::FnvHasher>(words),
        }
    }
}

fn finish<H: Hasher + Default>(words: &[u64]) -> u64 {
    let mut hasher = H::default();
    for word in words {
        hasher.write_u64(*word);
    }
    hasher.finish()
}

/// Compute `calculated_hash` for every node and return the root hash.
///
/// A single front-to-back pass suffices: children precede their parent in the
/// encoding, so child hashes are always available when a node is reached.
/// Leaves keep their identity hash; an internal node combines its children's
/// hashes (sorted ascending first under [`HashMode::Relaxed`]) followed by
/// its own identity hash. Linear in tree size.
pub fn hash_tree(tree: &mut Tree, function: HashFunction, mode: HashMode) -> u64 {
    let mut buffer: Vec<u64> = Vec::new();
    for index in 0..tree.len() {
        if tree.nodes()[index].is_leaf() {
            let node = &mut tree.nodes_mut()[index];
            node.calculated_hash = node.hash_value;
            continue;
        }
        buffer.clear();
        for child in tree.children(index) {
            buffer.push(tree.nodes()[child].calculated_hash);
        }
        if mode == HashMode::Relaxed {
            buffer.sort_unstable();
        }
        buffer.push(tree.nodes()[index].hash_value);
        tree.nodes_mut()[index].calculated_hash = function.combine(&buffer);
    }
    tree.root().calculated_hash
}

/// Reorder every internal node's children ascending by
/// `(calculated_hash, hash_value)` and re-linearize the encoding, producing
/// the canonical physical layout for [`HashMode::Relaxed`] equivalence.
///
/// Expects a prior [`hash_tree`] pass; idempotent. Child subtrees move as
/// blocks, so the derived caches stay consistent. O(n log max_arity).
pub fn sort_tree(tree: &mut Tree) {
    let len = tree.len();
    let mut nodes = vec![*tree.root(); len];
    let mut idx = len;
    emit_canonical(tree, len - 1, &mut nodes, &mut idx);
    debug_assert_eq!(idx, 0);
    tree.replace_nodes(nodes);
}

/// Write the subtree rooted at `index` into `nodes` ending just before
/// `*idx`, with children emitted in canonical order.
fn emit_canonical(tree: &Tree, index: usize, nodes: &mut [Node], idx: &mut usize) {
    let node = tree.nodes()[index];
    *idx -= 1;
    nodes[*idx] = node;
    if node.is_leaf() {
        return;
    }
    let mut children: Vec<usize> = tree.children(index).collect();
    children.sort_by_key(|&child| {
        let child_node = &tree.nodes()[child];
        (child_node.calculated_hash, child_node.hash_value)
    });
    for child in children {
        emit_canonical(tree, child, nodes, idx);
    }
}
