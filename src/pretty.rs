//! Sideways rendering of a [`Tree`], one node per line.
//!
//! The right subtree is drawn above a node and the left subtree below it, so reading the output
//! top to bottom lists the values in descending order.
//!
//! ```text
//! │       ┌── 7
//! │   ┌── 6
//! │   │   └── 5
//! └── 4
//!     │   ┌── 3
//!     └── 2
//!         └── 1
//! ```

use std::fmt;

use crate::balanced::{Node, Tree};

impl<T: fmt::Display> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => write_node(f, root, "", true),
            None => Ok(()),
        }
    }
}

/// `is_left` is true for the root and every left child. Those hang below their parent so they
/// get the closing connector.
fn write_node<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    node: &Node<T>,
    prefix: &str,
    is_left: bool,
) -> fmt::Result {
    if let Some(right) = node.right() {
        let prefix = format!("{prefix}{}", if is_left { "│   " } else { "    " });
        write_node(f, right, &prefix, false)?;
    }

    let connector = if is_left { "└── " } else { "┌── " };
    writeln!(f, "{prefix}{connector}{}", node.value())?;

    if let Some(left) = node.left() {
        let prefix = format!("{prefix}{}", if is_left { "    " } else { "│   " });
        write_node(f, left, &prefix, true)?;
    }

    Ok(())
}
