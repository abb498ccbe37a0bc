//! Structural core for tree-based genetic programming.
//!
//! This crate generates, canonicalizes, and recombines tree-shaped symbolic
//! expressions representing candidate solutions (e.g. symbolic-regression
//! models). It covers three tightly related pieces:
//!
//! - a constrained random tree generator producing syntactically valid
//!   expression trees of approximately a requested size under grammar arity
//!   rules ([`compute::BalancedTreeCreator`]),
//! - content-derived subtree identities under order-sensitive and
//!   order-invariant equivalence policies, with canonical child reordering
//!   ([`compute::hash_tree`], [`compute::sort_tree`]),
//! - a replace-worst strategy merging an evaluated candidate pool back into
//!   the surviving population ([`compute::ReplaceWorstReinserter`]).
//!
//! Fitness evaluation, selection, and variation operators live outside this
//! crate; populations carry opaque fitness values and caller-supplied
//! comparison callbacks.
//!
//! # Architecture
//!
//! - `schema`: the data model — postorder trees, nodes, symbol catalogs,
//!   individuals
//! - `compute`: the algorithms operating on it
//!
//! # Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use symtree::{
//!     compute::{BalancedTreeCreator, HashFunction, HashMode, hash_tree, sort_tree},
//!     schema::{PrimitiveSet, Variable},
//! };
//!
//! let grammar = PrimitiveSet::arithmetic();
//! let variables = vec![Variable::new("x"), Variable::new("y")];
//! let creator = BalancedTreeCreator::new(&grammar, variables).with_irregularity_bias(0.1);
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut tree = creator.create(&mut rng, 15).expect("valid target length");
//!
//! let root_hash = hash_tree(&mut tree, HashFunction::Fx, HashMode::Relaxed);
//! sort_tree(&mut tree); // canonical child order
//! assert_eq!(hash_tree(&mut tree, HashFunction::Fx, HashMode::Relaxed), root_hash);
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{
    BalancedTreeCreator, CreatorError, HashFunction, HashMode, ReplaceWorstReinserter, hash_tree,
    sort_tree,
};
pub use schema::{Grammar, Individual, Node, NodeKind, PrimitiveSet, Tree, Variable};
