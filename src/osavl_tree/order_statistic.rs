//! Rank (order-statistic) access for [`OSAvlTree`].
//!
//! Every node tracks its subtree size, so positional queries descend the tree
//! instead of iterating: the k-th smallest element, the rank of a value, and
//! removal by rank are all O(log n).

use core::borrow::Borrow;
use core::ops::Index;

use super::OSAvlTree;
use crate::order_statistic::{Rank, RankError};

impl<T> OSAvlTree<T> {
    /// Returns a reference to the element at `rank` (0-indexed, sorted
    /// order), or `None` if `rank` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::{OSAvlTree, Rank};
    ///
    /// let tree = OSAvlTree::from([30, 10, 20]);
    /// assert_eq!(tree.get_by_rank(Rank(0)), Some(&10));
    /// assert_eq!(tree.get_by_rank(Rank(3)), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get_by_rank(&self, rank: Rank) -> Option<&T> {
        self.raw.get_by_rank(rank.0).map(|handle| &self.raw.node(handle).value)
    }

    /// Returns a reference to the element at `rank`, or a [`RankError`]
    /// carrying the rank and the tree's length if `rank` is out of bounds.
    ///
    /// The panicking counterpart is `tree[rank]` via the [`Index`]
    /// implementation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::{OSAvlTree, Rank};
    ///
    /// let tree = OSAvlTree::from([30, 10, 20]);
    /// assert_eq!(tree.at(Rank(2)), Ok(&30));
    /// assert!(tree.at(Rank(9)).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`RankError`] when `rank >= self.len()`; an empty tree has no
    /// valid rank at all.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn at(&self, rank: Rank) -> Result<&T, RankError> {
        self.get_by_rank(rank).ok_or(RankError::new(rank, self.len()))
    }
}

impl<T: Ord> OSAvlTree<T> {
    /// Returns the rank of the first element equal to `value`, or `None` if
    /// no such element is present.
    ///
    /// With duplicates present, this is the rank of the smallest-ranked
    /// occurrence; the other occupied ranks follow contiguously.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::from([5, 3, 5, 7]);
    /// assert_eq!(tree.rank_of(&5), Some(1));
    /// assert_eq!(tree.rank_of(&7), Some(3));
    /// assert_eq!(tree.rank_of(&4), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn rank_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(value)?;
        Some(self.raw.count_less(value))
    }

    /// Removes and returns the element at `rank`, or `None` if `rank` is out
    /// of bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::{OSAvlTree, Rank};
    ///
    /// let mut tree = OSAvlTree::from([17, 6, 8, 7, 13, 1, 16]);
    /// assert_eq!(tree.remove_by_rank(Rank(3)), Some(8));
    /// assert_eq!(tree.remove_by_rank(Rank(6)), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove_by_rank(&mut self, rank: Rank) -> Option<T> {
        let handle = self.raw.get_by_rank(rank.0)?;
        Some(self.raw.erase(handle).0)
    }
}

impl<T> Index<Rank> for OSAvlTree<T> {
    type Output = T;

    /// Returns a reference to the element at `rank`.
    ///
    /// # Panics
    ///
    /// Panics if `rank >= self.len()`; use [`OSAvlTree::at`] for a fallible
    /// lookup.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::{OSAvlTree, Rank};
    ///
    /// let tree = OSAvlTree::from([30, 10, 20]);
    /// assert_eq!(tree[Rank(1)], 20);
    /// ```
    fn index(&self, rank: Rank) -> &T {
        self.get_by_rank(rank).expect("`OSAvlTree::index()` - rank out of bounds!")
    }
}
