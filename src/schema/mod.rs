//! Schema module - expression tree data model and symbol catalogs.

mod grammar;
mod individual;
mod node;
mod tree;

pub use grammar::*;
pub use individual::*;
pub use node::*;
pub use tree::*;
