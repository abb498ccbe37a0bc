//! Compute module - tree construction, structural hashing, and population
//! replacement.

mod creator;
mod hashing;
mod reinserter;

pub use creator::*;
pub use hashing::*;
pub use reinserter::*;
