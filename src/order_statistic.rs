use core::error::Error;
use core::fmt;

/// A 0-indexed position in the sorted order of a tree.
///
/// `Rank(0)` is the smallest element, `Rank(len - 1)` the largest. Wrapping
/// the index in a newtype keeps rank-based indexing visibly distinct from
/// slice indexing at call sites:
///
/// ```rust
/// use osavl_tree::{OSAvlTree, Rank};
///
/// let tree = OSAvlTree::from([30, 10, 20]);
/// assert_eq!(tree[Rank(1)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Rank(pub usize);

/// The error returned by [`OSAvlTree::at`](crate::OSAvlTree::at) when the
/// requested rank is not less than the tree's length.
///
/// Carries both the offending rank and the tree's length at the time of the
/// call, so callers can report or recover without a second lookup.
///
/// ```rust
/// use osavl_tree::{OSAvlTree, Rank};
///
/// let tree = OSAvlTree::from([10, 20]);
/// let error = tree.at(Rank(5)).unwrap_err();
/// assert_eq!(error.rank(), Rank(5));
/// assert_eq!(error.len(), 2);
/// assert_eq!(error.to_string(), "rank 5 out of bounds for tree of length 2");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RankError {
    rank: Rank,
    len: usize,
}

impl RankError {
    pub(crate) const fn new(rank: Rank, len: usize) -> Self {
        Self { rank, len }
    }

    /// The rank that was requested.
    #[must_use]
    pub const fn rank(&self) -> Rank {
        self.rank
    }

    /// The length of the tree when the lookup failed.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }
}

impl fmt::Display for RankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rank {} out of bounds for tree of length {}", self.rank.0, self.len)
    }
}

impl Error for RankError {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_reports_rank_and_length() {
        let error = RankError::new(Rank(7), 3);
        assert_eq!(error.rank(), Rank(7));
        assert_eq!(error.len(), 3);
        assert_eq!(error.to_string(), "rank 7 out of bounds for tree of length 3");
    }

    #[test]
    fn ranks_order_by_index() {
        assert!(Rank(0) < Rank(1));
        assert_eq!(Rank(4), Rank(4));
    }
}
