//! An ordered multiset with O(log n) positional (rank) access.

use core::borrow::Borrow;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use alloc::vec;

use crate::raw::{Handle, RawOSAvlTree};

mod capacity;
pub mod cursor;
mod order_statistic;

use cursor::Cursor;

/// An ordered collection backed by an order-statistic AVL tree.
///
/// `OSAvlTree` keeps its elements sorted at all times and, unlike
/// `std::collections::BTreeSet`, is a *multiset*: inserting an element equal
/// to one already present stores both, with equal elements kept in insertion
/// order. The tree additionally maintains subtree sizes, so the k-th smallest
/// element is reachable in O(log n) via [`at`](Self::at) or
/// [`Rank`](crate::Rank) indexing rather than by iteration.
///
/// # Examples
///
/// ```rust
/// use osavl_tree::{OSAvlTree, Rank};
///
/// let mut tree = OSAvlTree::new();
/// for value in [17, 6, 8, 7, 13, 1, 16] {
///     tree.insert(value);
/// }
///
/// assert_eq!(tree.len(), 7);
/// assert_eq!(tree[Rank(3)], 8);
/// assert_eq!(tree.rank_of(&13), Some(4));
///
/// assert_eq!(tree.remove_by_rank(Rank(3)), Some(8));
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 6, 7, 13, 16, 17]);
/// ```
///
/// # Equality
///
/// `PartialEq` on trees is *structural*: two trees are equal only if they
/// have the same shape with equal values at corresponding nodes. Trees that
/// hold the same elements but were built in a different insertion order may
/// compare unequal; compare [`iter`](Self::iter) sequences for content
/// equality. See [`PartialEq`](#impl-PartialEq-for-OSAvlTree<T>).
pub struct OSAvlTree<T> {
    pub(crate) raw: RawOSAvlTree<T>,
}

impl<T> OSAvlTree<T> {
    /// Creates a new, empty tree.
    ///
    /// Does not allocate until the first insertion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::OSAvlTree;
    ///
    /// let tree: OSAvlTree<i64> = OSAvlTree::new();
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> Self {
        Self { raw: RawOSAvlTree::new() }
    }

    /// Returns the number of elements in the tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::from([10, 20, 10]);
    /// assert_eq!(tree.len(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes all elements from the tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::OSAvlTree;
    ///
    /// let mut tree = OSAvlTree::from([1, 2, 3]);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a reference to the smallest element, or `None` if the tree is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::from([30, 10, 20]);
    /// assert_eq!(tree.first(), Some(&10));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first().map(|handle| &self.raw.node(handle).value)
    }

    /// Returns a reference to the largest element, or `None` if the tree is
    /// empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last().map(|handle| &self.raw.node(handle).value)
    }

    /// Returns a double-ended iterator over the elements in sorted order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::from([3, 1, 2]);
    /// let mut iter = tree.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next_back(), Some(&3));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) for a full traversal; each step is amortized O(1).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Swaps the contents of two trees.
    ///
    /// Cursors into either tree are invalidated by the swap.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::OSAvlTree;
    ///
    /// let mut a = OSAvlTree::from([1, 2]);
    /// let mut b = OSAvlTree::from([9]);
    /// a.swap(&mut b);
    /// assert_eq!(a.first(), Some(&9));
    /// assert_eq!(b.len(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }
}

impl<T: Ord> OSAvlTree<T> {
    /// Inserts `value` into the tree and returns a cursor at the new element.
    ///
    /// Insertion never fails: a value equal to one already present is stored
    /// as an additional element, after the existing equal elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::OSAvlTree;
    ///
    /// let mut tree = OSAvlTree::new();
    /// let cursor = tree.insert(42);
    /// assert_eq!(cursor.value(), Some(&42));
    ///
    /// tree.insert(42);
    /// assert_eq!(tree.len(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, value: T) -> Cursor<'_, T> {
        let handle = self.raw.insert(value);
        Cursor::new(&self.raw, Some(handle))
    }

    /// Removes *all* elements equal to `value` and returns how many were
    /// removed.
    ///
    /// The value may be any borrowed form of `T`, with `Ord` agreeing between
    /// the forms.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::OSAvlTree;
    ///
    /// let mut tree = OSAvlTree::from([5, 3, 5, 5, 7]);
    /// assert_eq!(tree.remove(&5), 3);
    /// assert_eq!(tree.remove(&5), 0);
    /// assert_eq!(tree.len(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(k log n), where k is the number of elements removed.
    pub fn remove<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        // Rebalancing between erasures can move remaining duplicates to
        // either side of the search path, so each round re-runs the search
        // instead of walking successors.
        let mut removed = 0;
        while let Some(handle) = self.raw.find(value) {
            self.raw.erase(handle);
            removed += 1;
        }
        removed
    }

    /// Returns `true` if the tree contains an element equal to `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::from([1, 2, 3]);
    /// assert!(tree.contains(&2));
    /// assert!(!tree.contains(&4));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.find(value).is_some()
    }

    /// Returns the number of elements equal to `value`.
    ///
    /// Computed from the subtree size aggregates, without visiting the
    /// duplicates themselves.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::from([5, 3, 5, 5, 7]);
    /// assert_eq!(tree.count(&5), 3);
    /// assert_eq!(tree.count(&4), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn count<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.count_less_or_equal(value) - self.raw.count_less(value)
    }

    /// Removes and returns the smallest element, or `None` if the tree is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::OSAvlTree;
    ///
    /// let mut tree = OSAvlTree::from([2, 1, 3]);
    /// assert_eq!(tree.pop_first(), Some(1));
    /// assert_eq!(tree.pop_first(), Some(2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_first(&mut self) -> Option<T> {
        let handle = self.raw.first()?;
        Some(self.raw.erase(handle).0)
    }

    /// Removes and returns the largest element, or `None` if the tree is
    /// empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_last(&mut self) -> Option<T> {
        let handle = self.raw.last()?;
        Some(self.raw.erase(handle).0)
    }
}

impl<T: Clone> Clone for OSAvlTree<T> {
    /// Returns a deep copy with the same shape as `self`, so clones compare
    /// equal under the tree's structural `PartialEq`.
    ///
    /// # Complexity
    ///
    /// O(n)
    fn clone(&self) -> Self {
        Self { raw: self.raw.clone() }
    }
}

impl<T> Default for OSAvlTree<T> {
    /// Creates an empty tree.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for OSAvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Structural equality.
///
/// Trees compare equal only if corresponding nodes hold equal values with
/// structurally equal subtrees, so two trees with identical content can
/// compare unequal when their insertion histories produced different shapes:
///
/// ```rust
/// use osavl_tree::OSAvlTree;
///
/// // Both rebalance to the shape 2 / (1, 3).
/// assert_eq!(OSAvlTree::from([1, 2, 3]), OSAvlTree::from([2, 1, 3]));
///
/// // Same content, different shapes.
/// assert_ne!(OSAvlTree::from([1, 2, 3, 4]), OSAvlTree::from([4, 3, 2, 1]));
/// ```
impl<T: PartialEq> PartialEq for OSAvlTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw.structural_eq(&other.raw)
    }
}

impl<T: Eq> Eq for OSAvlTree<T> {}

impl<T: Hash> Hash for OSAvlTree<T> {
    /// Hashes the length and the sorted element sequence. Structurally equal
    /// trees have equal sequences, so equal trees hash equally.
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: Ord> FromIterator<T> for OSAvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for OSAvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.raw.insert(value);
        }
    }
}

impl<'a, T: Ord + Copy + 'a> Extend<&'a T> for OSAvlTree<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for OSAvlTree<T> {
    /// ```rust
    /// use osavl_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::from([3, 1, 2]);
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// ```
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

/// A double-ended iterator over the elements of an [`OSAvlTree`] in sorted
/// order, created by [`OSAvlTree::iter`].
///
/// Steps via parent links; no heap allocation.
pub struct Iter<'a, T> {
    tree: &'a RawOSAvlTree<T>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

// Not derived: a derive would demand `T: Clone`, and the iterator only copies
// its borrow and handles.
impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front.take()?;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.front = self.tree.successor(handle);
        }
        Some(&self.tree.node(handle).value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back.take()?;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.back = self.tree.predecessor(handle);
        }
        Some(&self.tree.node(handle).value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An owning iterator over the elements of an [`OSAvlTree`] in sorted order,
/// created by the [`IntoIterator`] implementation.
///
/// Drains the tree up front with a single O(n) in-order walk instead of
/// erasing and rebalancing element by element.
#[derive(Debug)]
pub struct IntoIter<T> {
    values: vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.values.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.values.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for OSAvlTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter { values: self.raw.drain_to_vec().into_iter() }
    }
}

impl<'a, T> IntoIterator for &'a OSAvlTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
