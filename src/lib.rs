//! This crate exposes a Binary Search Tree (BST) that keeps itself balanced
//! by rebuilding rather than rotating.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)`. The tree in
//! [`balanced`] is built from a sorted, deduplicated array by always picking
//! the middle element as the subtree root, which keeps the height at
//! `O(lg N)`. Inserts don't rebalance. Deletes finish by checking the balance
//! of the whole tree and, if it has drifted, flattening it back into a sorted
//! array and building it again from scratch.
//!
//! ```
//! use rebuild_bst::balanced::Tree;
//!
//! let mut tree = Tree::from_values(vec![5, 3, 1, 4, 2, 3]);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
//!
//! assert!(tree.insert(6).is_ok());
//! assert!(tree.insert(6).is_err());
//!
//! assert_eq!(tree.delete(&3), Ok(3));
//! assert!(!tree.contains(&3));
//! assert!(tree.is_balanced());
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod balanced;
pub mod error;
mod pretty;
pub mod sort;
mod util;

pub use balanced::{Node, Tree};
pub use error::TreeError;
