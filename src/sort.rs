//! Sorting used to turn an arbitrary array into the input of a tree build.
//!
//! A [`Tree`](crate::Tree) is only ever built from values that are ascending and distinct. Any
//! [`Sorter`] can provide that ordering. [`MergeSort`] is the default.
//!
//! # Examples
//!
//! ```
//! use rebuild_bst::sort::{MergeSort, Sorter};
//!
//! let sorted = MergeSort.sort_unique(vec![3, 1, 2, 3, 1]);
//! assert_eq!(sorted, vec![1, 2, 3]);
//! ```

/// Produces an ascending sequence holding each distinct input value exactly once.
pub trait Sorter {
    /// Sorts `values` ascending and removes duplicates. When several values compare equal the
    /// first one in the input is kept.
    fn sort_unique<T: Ord>(&self, values: Vec<T>) -> Vec<T>;
}

/// A stable, top-down merge sort followed by removal of adjacent duplicates.
#[derive(Debug, Default, Clone, Copy)]
pub struct MergeSort;

impl Sorter for MergeSort {
    fn sort_unique<T: Ord>(&self, values: Vec<T>) -> Vec<T> {
        let mut sorted = merge_sort(values);
        sorted.dedup();
        sorted
    }
}

/// Defers to the standard library's stable [`slice::sort`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StdSort;

impl Sorter for StdSort {
    fn sort_unique<T: Ord>(&self, mut values: Vec<T>) -> Vec<T> {
        values.sort();
        values.dedup();
        values
    }
}

fn merge_sort<T: Ord>(mut values: Vec<T>) -> Vec<T> {
    if values.len() <= 1 {
        return values;
    }

    let right = values.split_off(values.len() / 2);
    merge(merge_sort(values), merge_sort(right))
}

/// Merges two ascending runs. On ties the left run goes first which is what keeps the sort stable.
fn merge<T: Ord>(left: Vec<T>, right: Vec<T>) -> Vec<T> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => l <= r,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        merged.extend(if take_left { left.next() } else { right.next() });
    }

    merged
}
