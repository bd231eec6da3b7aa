/// Index of the element that becomes the root of the subtree built from `values[start..=end]`.
///
/// Ties go to the lower index, so a range of even length puts the extra element on the right.
pub(crate) fn midpoint(start: usize, end: usize) -> usize {
    start + (end - start) / 2
}
