//! Errors reported by [`Tree`](crate::Tree) mutations.

use thiserror::Error;

/// The ways an insert or delete can be refused. Neither leaves the tree modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The value being inserted is already stored in the tree.
    #[error("value already in tree, no duplicates")]
    Duplicate,
    /// The value being deleted is not stored in the tree.
    #[error("value not in tree")]
    NotFound,
}
