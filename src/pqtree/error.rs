use crate::Id;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors that can occur while constructing a PQ-tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Element {0} appears more than once in the universe")]
    DuplicateElement(Id),

    #[error("Cannot build a tree over an empty universe")]
    EmptyUniverse,
}

/// Errors that can occur during a reduction.
///
/// Every variant is recoverable: a failed [`reduce`](super::PQTree::reduce)
/// leaves the tree exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ReduceError {
    #[error("Subset references element {0}, which is not in the universe")]
    UnknownElement(Id),

    #[error("Subset references element {0} more than once")]
    DuplicateElement(Id),

    #[error("Subset cannot be made contiguous under the current tree")]
    Unsatisfiable,
}
