//! PQ-tree: a compact representation of permutation families.
//!
//! A PQ-tree encodes every ordering of a fixed element universe that is
//! consistent with the consecutivity constraints applied so far:
//! - **P-nodes** allow their children in any order
//! - **Q-nodes** allow their children in stored or fully reversed order
//! - **Leaves** carry the elements themselves
//!
//! [`PQTree::reduce`] narrows the family so a given subset stays contiguous
//! in every remaining ordering; [`PQTree::all_frontiers`] materializes the
//! family under an explicit budget.

pub mod error;
pub mod frontier;
pub mod node;
pub mod reduce;
pub mod tree;

pub use error::{ReduceError, TreeError};
pub use frontier::{EnumerationBudget, Frontiers};
pub use node::PQNode;
pub use reduce::Reduction;
pub use tree::PQTree;
