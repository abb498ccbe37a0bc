//! Primitive catalogs sampled during tree construction.

use std::hash::{Hash, Hasher};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Node;

/// Identity hash for a named symbol.
pub fn symbol_hash(name: &str) -> u64 {
    let mut hasher = rustc_hash::FxHasher::default();
    name.hash(&mut hasher);
    hasher.finish()
}

/// An input variable identified by a name-derived hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Display name, e.g. `x3`.
    pub name: String,
    /// Identity hash assigned to variable leaves referencing this variable.
    pub hash: u64,
}

impl Variable {
    /// Create a variable; the identity hash derives from the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let hash = symbol_hash(&name);
        Self { name, hash }
    }
}

/// The catalog capability consumed by the tree creator: arity limits over the
/// function symbols plus windowed random sampling.
pub trait Grammar {
    /// Minimum and maximum arity over all function symbols.
    ///
    /// Stable for the duration of a creator call.
    fn function_arity_limits(&self) -> (usize, usize);

    /// Sample a symbol with arity in `[min_arity, max_arity]`, uniformly over
    /// the admissible symbols. Leaf symbols are included when
    /// `min_arity == 0`.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R, min_arity: usize, max_arity: usize) -> Node;
}

/// A named function symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSymbol {
    /// Display name, e.g. `add`.
    pub name: String,
    /// Identity hash derived from the name.
    pub hash: u64,
    /// Number of children the symbol requires.
    pub arity: usize,
}

/// A concrete symbol catalog.
///
/// Variable and constant leaves are always available; function symbols are
/// registered explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrimitiveSet {
    functions: Vec<FunctionSymbol>,
}

impl PrimitiveSet {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function symbol; its identity hash derives from the name.
    ///
    /// # Panics
    /// Panics if `arity` is zero.
    pub fn with_function(mut self, name: &str, arity: usize) -> Self {
        assert!(arity > 0, "function symbols need at least one child");
        self.functions.push(FunctionSymbol {
            name: name.to_owned(),
            hash: symbol_hash(name),
            arity,
        });
        self
    }

    /// The standard arithmetic catalog: add, sub, mul, div.
    pub fn arithmetic() -> Self {
        Self::new()
            .with_function("add", 2)
            .with_function("sub", 2)
            .with_function("mul", 2)
            .with_function("div", 2)
    }

    /// Registered function symbols.
    pub fn functions(&self) -> &[FunctionSymbol] {
        &self.functions
    }
}

impl Grammar for PrimitiveSet {
    fn function_arity_limits(&self) -> (usize, usize) {
        assert!(
            !self.functions.is_empty(),
            "primitive set has no function symbols"
        );
        let min = self.functions.iter().map(|f| f.arity).min().expect("non-empty");
        let max = self.functions.iter().map(|f| f.arity).max().expect("non-empty");
        (min, max)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R, min_arity: usize, max_arity: usize) -> Node {
        // variable and constant leaves join the candidate pool when the
        // window opens at zero
        let leaf_kinds = if min_arity == 0 { 2 } else { 0 };
        let candidates: Vec<&FunctionSymbol> = self
            .functions
            .iter()
            .filter(|f| f.arity >= min_arity && f.arity <= max_arity)
            .collect();
        let total = candidates.len() + leaf_kinds;
        assert!(
            total > 0,
            "no symbol with arity in [{min_arity}, {max_arity}]"
        );
        let pick = rng.gen_range(0..total);
        if pick < leaf_kinds {
            if pick == 0 {
                Node::variable()
            } else {
                Node::constant(0.0)
            }
        } else {
            let symbol = candidates[pick - leaf_kinds];
            Node::function(symbol.hash, symbol.arity)
        }
    }
}
