//! A BST that is balanced on construction and rebuilt, rather than rotated, when it drifts out
//! of balance.
//!
//! Building always sorts and deduplicates the input and then picks the middle element of each
//! sorted range as the root of the subtree for that range. Inserting never rebalances. Deleting
//! always finishes with a balance check of the whole tree, and an unbalanced tree is flattened
//! and built again from scratch.
//!
//! # Examples
//!
//! ```
//! use rebuild_bst::balanced::Tree;
//! use rebuild_bst::TreeError;
//!
//! let mut tree = Tree::from_values(vec![7, 1, 6, 2, 5, 3, 4, 4]);
//!
//! // The middle of `[1, 2, 3, 4, 5, 6, 7]` is the root.
//! assert_eq!(tree.root().map(|n| *n.value()), Some(4));
//! assert_eq!(tree.height(), 3);
//!
//! // No duplicates.
//! assert_eq!(tree.insert(4), Err(TreeError::Duplicate));
//!
//! // Inserting doesn't rebalance...
//! tree.insert(8).unwrap();
//! tree.insert(9).unwrap();
//! assert!(!tree.is_balanced());
//!
//! // ...but deleting does.
//! assert_eq!(tree.delete(&1), Ok(1));
//! assert!(tree.is_balanced());
//! assert_eq!(tree.delete(&1), Err(TreeError::NotFound));
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::mem;

use tracing::{debug, trace, warn};

use crate::error::TreeError;
use crate::sort::{MergeSort, Sorter};
use crate::util::midpoint;

/// An owning link to a child. `None` marks the empty pointer at the bottom of a subtree.
type Link<T> = Option<Box<Node<T>>>;

/// A Binary Search Tree holding distinct values. This can be used for inserting, finding, and
/// deleting values.
#[derive(Clone, Debug)]
pub struct Tree<T> {
    root: Link<T>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    // Inserts can leave a long chain so drop with a stack instead of recursing.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// The root node, if the tree isn't empty.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Counts the nodes in the tree.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Number of levels in the tree. An empty tree has a height of 0 and a single node has a
    /// height of 1.
    pub fn height(&self) -> usize {
        self.root().map_or(0, Node::height)
    }

    /// Whether, for every node, the heights of its two subtrees differ by at most one.
    pub fn is_balanced(&self) -> bool {
        self.root().map_or(true, Node::is_balanced)
    }

    /// Number of edges from the root to the first node holding `target`, or `None` if no node
    /// holds it.
    ///
    /// The search visits the left subtree before the right one and does not use the ordering of
    /// the tree, so it only needs `PartialEq`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::balanced::Tree;
    ///
    /// let tree = Tree::from_values(vec![1, 2, 3]);
    ///
    /// assert_eq!(tree.depth(&2), Some(0));
    /// assert_eq!(tree.depth(&3), Some(1));
    /// assert_eq!(tree.depth(&4), None);
    /// ```
    pub fn depth(&self, target: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        Node::depth(self.root(), target)
    }

    /// Whether the left and right subtrees of `root` mirror each other, both in shape and in
    /// values. An absent `root` is never mirrored.
    pub fn is_mirrored_at(root: Option<&Node<T>>) -> bool
    where
        T: PartialEq,
    {
        root.map_or(false, |root| Node::mirrors(root.left(), root.right()))
    }

    /// [`Tree::is_mirrored_at`] starting from this tree's root.
    pub fn is_mirrored(&self) -> bool
    where
        T: PartialEq,
    {
        Self::is_mirrored_at(self.root())
    }

    /// Visits nodes breadth first, each level from left to right.
    pub fn level_order(&self, mut visit: impl FnMut(&Node<T>)) {
        let mut queue: VecDeque<&Node<T>> = self.root().into_iter().collect();

        while let Some(node) = queue.pop_front() {
            visit(node);
            queue.extend(node.left());
            queue.extend(node.right());
        }
    }

    /// Visits nodes in exactly the reverse of [`Tree::level_order`].
    pub fn reversed_level_order(&self, mut visit: impl FnMut(&Node<T>)) {
        let mut queue: VecDeque<&Node<T>> = self.root().into_iter().collect();
        let mut stack = Vec::new();

        while let Some(node) = queue.pop_front() {
            stack.push(node);
            queue.extend(node.left());
            queue.extend(node.right());
        }

        while let Some(node) = stack.pop() {
            visit(node);
        }
    }

    /// Visits the left subtree, then the node, then the right subtree. Values are seen in
    /// ascending order.
    pub fn in_order(&self, mut visit: impl FnMut(&Node<T>)) {
        if let Some(root) = self.root() {
            root.walk_in_order(&mut visit);
        }
    }

    /// Visits the left subtree, then the node, then the right subtree.
    ///
    /// **Note** this is the same order as [`Tree::in_order`], not the node-first order the name
    /// usually implies. Callers depend on it.
    pub fn pre_order(&self, mut visit: impl FnMut(&Node<T>)) {
        if let Some(root) = self.root() {
            root.walk_in_order(&mut visit);
        }
    }

    /// Visits the left subtree, then the right subtree, then the node.
    pub fn post_order(&self, mut visit: impl FnMut(&Node<T>)) {
        if let Some(root) = self.root() {
            root.walk_post_order(&mut visit);
        }
    }

    /// Borrowing iterator over the values in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root())
    }
}

impl<T: Ord> Tree<T> {
    /// Builds a balanced tree from `values` in any order. Duplicates are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::balanced::Tree;
    ///
    /// let tree = Tree::from_values(vec![3, 1, 2, 1]);
    ///
    /// assert_eq!(tree.len(), 3);
    /// assert!(tree.is_balanced());
    /// ```
    pub fn from_values(values: Vec<T>) -> Self {
        Self::from_values_with(values, &MergeSort)
    }

    /// Like [`Tree::from_values`] but sorts and deduplicates with the given [`Sorter`].
    pub fn from_values_with<S: Sorter>(values: Vec<T>, sorter: &S) -> Self {
        let sorted = sorter.sort_unique(values);
        debug!(nodes = sorted.len(), "building tree");

        Self {
            root: Node::build(sorted.len(), &mut sorted.into_iter()),
        }
    }

    /// Whether some node in the tree holds `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::balanced::Tree;
    ///
    /// let tree = Tree::from_values(vec![1, 2]);
    ///
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&42));
    /// ```
    pub fn contains(&self, value: &T) -> bool {
        self.root().map_or(false, |n| n.contains(value))
    }

    /// Adds `value` as a new leaf. The tree is not rebalanced afterwards, so a run of inserts can
    /// leave it lopsided until the next [`Tree::delete`] or [`Tree::rebalance`].
    ///
    /// # Errors
    ///
    /// [`TreeError::Duplicate`] if the value is already in the tree. The tree is left unchanged.
    pub fn insert(&mut self, value: T) -> Result<(), TreeError> {
        let result = Node::insert(&mut self.root, value);
        if let Err(err) = &result {
            warn!(%err, "insert refused");
        }
        result
    }

    /// Removes `value` from the tree and returns it, then rebalances the tree if needed.
    ///
    /// A node with two children takes the value of its in-order successor (the leftmost node of
    /// its right subtree) and that successor is unlinked instead.
    ///
    /// # Errors
    ///
    /// [`TreeError::NotFound`] if the value is not in the tree. The tree is left unchanged.
    pub fn delete(&mut self, value: &T) -> Result<T, TreeError> {
        match Node::remove(&mut self.root, value) {
            Some(removed) => {
                self.rebalance();
                Ok(removed)
            }
            None => {
                let err = TreeError::NotFound;
                warn!(%err, "delete refused");
                Err(err)
            }
        }
    }

    /// Rebuilds the tree from its sorted values if it isn't balanced. Every node is replaced.
    pub fn rebalance(&mut self) {
        if self.is_balanced() {
            trace!("tree already balanced");
            return;
        }

        let mut sorted = Vec::new();
        Node::flatten(self.root.take(), &mut sorted);
        debug!(nodes = sorted.len(), "rebuilding unbalanced tree");

        self.root = Node::build(sorted.len(), &mut sorted.into_iter());
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_values(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A `Node` holds one value and owns up to two children.
#[derive(Clone, Debug)]
pub struct Node<T> {
    data: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            left: None,
            right: None,
        }
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.data
    }

    /// The root of the left subtree.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Number of levels in the subtree rooted at this node. A node with no children has a
    /// height of 1.
    pub fn height(&self) -> usize {
        let left_height = self.left().map_or(0, Self::height);
        let right_height = self.right().map_or(0, Self::height);
        1 + left_height.max(right_height)
    }

    /// Whether every node in this subtree has child heights differing by at most one.
    pub fn is_balanced(&self) -> bool {
        Self::checked_height(Some(self)).is_some()
    }

    /// Builds the subtree for the next `len` values of the ascending `values`.
    ///
    /// An in-order walk of the finished subtree consumes `values` front to back, so the left
    /// subtree is built first, then the middle value is taken, then the right subtree.
    fn build<I: Iterator<Item = T>>(len: usize, values: &mut I) -> Link<T> {
        if len == 0 {
            return None;
        }

        let mid = midpoint(0, len - 1);
        let left = Self::build(mid, values);
        let data = values.next()?;
        let right = Self::build(len - mid - 1, values);

        Some(Box::new(Self { data, left, right }))
    }

    /// Moves every value under `link` into `out` in ascending order.
    fn flatten(link: Link<T>, out: &mut Vec<T>) {
        if let Some(node) = link {
            let Self { data, left, right } = *node;
            Self::flatten(left, out);
            out.push(data);
            Self::flatten(right, out);
        }
    }

    /// The height of `node`, or `None` as soon as any subtree is found unbalanced.
    fn checked_height(node: Option<&Self>) -> Option<usize> {
        let Some(node) = node else {
            return Some(0);
        };

        let left = Self::checked_height(node.left())?;
        let right = Self::checked_height(node.right())?;
        if left.abs_diff(right) > 1 {
            return None;
        }

        Some(1 + left.max(right))
    }

    fn depth(node: Option<&Self>, target: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        let node = node?;
        if node.data == *target {
            return Some(0);
        }

        let left = Self::depth(node.left(), target);
        if let Some(depth) = left {
            return Some(depth + 1);
        }

        let right = Self::depth(node.right(), target);
        if let Some(depth) = right {
            return Some(depth + 1);
        }

        // Both are `None` here. This leans on `None` ordering below every `Some`.
        left.max(right)
    }

    fn mirrors(a: Option<&Self>, b: Option<&Self>) -> bool
    where
        T: PartialEq,
    {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                a.data == b.data
                    && Self::mirrors(a.left(), b.right())
                    && Self::mirrors(a.right(), b.left())
            }
            _ => false,
        }
    }

    fn walk_in_order<F: FnMut(&Self)>(&self, visit: &mut F) {
        if let Some(left) = self.left() {
            left.walk_in_order(visit);
        }
        visit(self);
        if let Some(right) = self.right() {
            right.walk_in_order(visit);
        }
    }

    fn walk_post_order<F: FnMut(&Self)>(&self, visit: &mut F) {
        if let Some(left) = self.left() {
            left.walk_post_order(visit);
        }
        if let Some(right) = self.right() {
            right.walk_post_order(visit);
        }
        visit(self);
    }
}

impl<T: Ord> Node<T> {
    /// Whether `value` is in the subtree rooted at this node.
    pub fn contains(&self, value: &T) -> bool {
        match value.cmp(&self.data) {
            Ordering::Less => self.left().map_or(false, |n| n.contains(value)),
            Ordering::Equal => true,
            Ordering::Greater => self.right().map_or(false, |n| n.contains(value)),
        }
    }

    fn insert(link: &mut Link<T>, value: T) -> Result<(), TreeError> {
        match link {
            None => {
                *link = Some(Box::new(Self::new(value)));
                Ok(())
            }
            Some(node) => match value.cmp(&node.data) {
                Ordering::Less => Self::insert(&mut node.left, value),
                Ordering::Equal => Err(TreeError::Duplicate),
                Ordering::Greater => Self::insert(&mut node.right, value),
            },
        }
    }

    /// Removes the node holding `value` from the subtree owned by `link`, returning its value.
    /// `link` is the parent's slot for the subtree, so unlinking a node is just reassigning it.
    fn remove(link: &mut Link<T>, value: &T) -> Option<T> {
        let ordering = value.cmp(&link.as_ref()?.data);
        match ordering {
            Ordering::Less => Self::remove(&mut link.as_mut()?.left, value),
            Ordering::Greater => Self::remove(&mut link.as_mut()?.right, value),
            Ordering::Equal => {
                let mut target = link.take()?;
                match (target.left.take(), target.right.take()) {
                    (None, None) => {
                        let Self { data, .. } = *target;
                        Some(data)
                    }
                    (Some(child), None) | (None, Some(child)) => {
                        *link = Some(child);
                        let Self { data, .. } = *target;
                        Some(data)
                    }
                    (Some(left), Some(right)) => {
                        let (successor, rest) = Self::pop_min(right);
                        let removed = mem::replace(&mut target.data, successor);
                        target.left = Some(left);
                        target.right = rest;
                        *link = Some(target);
                        Some(removed)
                    }
                }
            }
        }
    }

    /// Unlinks the leftmost node of the subtree rooted at `node`. Returns its value and what is
    /// left of the subtree. The leftmost node's right child takes its place.
    fn pop_min(mut node: Box<Self>) -> (T, Link<T>) {
        match node.left.take() {
            None => {
                let Self { data, right, .. } = *node;
                (data, right)
            }
            Some(left) => {
                let (min, rest) = Self::pop_min(left);
                node.left = rest;
                (min, Some(node))
            }
        }
    }
}

/// An iterator over the values of a [`Tree`] in ascending order. See [`Tree::iter`].
pub struct Iter<'a, T> {
    /// Nodes whose value hasn't been yielded yet but whose left subtree has been queued.
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a Node<T>>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(&node.data)
    }
}
