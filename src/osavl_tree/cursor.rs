//! Cursors over an [`OSAvlTree`].
//!
//! A cursor points at a single element of the tree, with one extra "ghost"
//! position that sits between the largest and smallest elements and
//! represents past-the-end. Stepping is circular through the ghost: moving
//! forward from the largest element reaches the ghost, and moving forward
//! again wraps to the smallest.
//!
//! Cursors hold a handle into the tree's node arena, not a path, so they
//! survive rotations and unrelated insertions or removals elsewhere in the
//! tree. Removing the element a cursor points at invalidates that cursor
//! only.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::ptr;

use super::OSAvlTree;
use crate::raw::{Handle, RawOSAvlTree};

/// A read-only cursor over an [`OSAvlTree`].
///
/// `Cursor` is `Copy`; taking a snapshot before stepping is free.
///
/// # Examples
///
/// ```rust
/// use osavl_tree::OSAvlTree;
///
/// let tree = OSAvlTree::from([20, 10, 30]);
/// let mut cursor = tree.cursor_front();
/// assert_eq!(cursor.value(), Some(&10));
///
/// cursor.move_next();
/// cursor.move_next();
/// assert_eq!(cursor.value(), Some(&30));
///
/// cursor.move_next();
/// assert_eq!(cursor.value(), None); // the ghost
///
/// cursor.move_next();
/// assert_eq!(cursor.value(), Some(&10)); // wrapped around
/// ```
pub struct Cursor<'a, T> {
    tree: &'a RawOSAvlTree<T>,
    /// `None` is the ghost position.
    current: Option<Handle>,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(tree: &'a RawOSAvlTree<T>, current: Option<Handle>) -> Self {
        Self { tree, current }
    }

    /// Returns a reference to the element under the cursor, or `None` at the
    /// ghost position.
    #[must_use]
    pub fn value(&self) -> Option<&'a T> {
        self.current.map(|handle| &self.tree.node(handle).value)
    }

    /// Moves to the next element in sorted order.
    ///
    /// Moving forward from the largest element reaches the ghost; moving
    /// forward from the ghost reaches the smallest element.
    ///
    /// # Complexity
    ///
    /// Amortized O(1) over a full traversal, worst case O(log n).
    pub fn move_next(&mut self) {
        self.current = match self.current {
            Some(handle) => self.tree.successor(handle),
            None => self.tree.first(),
        };
    }

    /// Moves to the previous element in sorted order.
    ///
    /// Mirror image of [`move_next`](Self::move_next): moving backward from
    /// the ghost reaches the largest element.
    pub fn move_prev(&mut self) {
        self.current = match self.current {
            Some(handle) => self.tree.predecessor(handle),
            None => self.tree.last(),
        };
    }

    /// Returns the element after the cursor without moving it.
    #[must_use]
    pub fn peek_next(&self) -> Option<&'a T> {
        let mut next = *self;
        next.move_next();
        next.value()
    }

    /// Returns the element before the cursor without moving it.
    #[must_use]
    pub fn peek_prev(&self) -> Option<&'a T> {
        let mut prev = *self;
        prev.move_prev();
        prev.value()
    }

    /// Returns the rank of the element under the cursor, or `None` at the
    /// ghost position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::from([20, 10, 30]);
    /// let cursor = tree.find(&20);
    /// assert_eq!(cursor.rank(), Some(1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn rank(&self) -> Option<usize> {
        self.current.map(|handle| self.tree.rank_of_handle(handle))
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

// Bound-free like `Clone`: the position is printable even when the elements
// are not. The ghost renders as `rank: None`.
impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("rank", &self.rank()).finish()
    }
}

/// Positional equality: cursors are equal iff they point at the same
/// position (including the ghost) of the *same* tree. Element values are
/// never compared.
impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}

impl<T> Eq for Cursor<'_, T> {}

/// Positional ordering: cursors compare by rank, with the ghost ordered
/// after every element. Cursors into different trees are unordered
/// (`partial_cmp` returns `None`).
///
/// Since elements are sorted, the cursor on the smaller of two unequal
/// values always compares less; for equal duplicates, the earlier position
/// compares less, keeping the ordering consistent with the positional
/// [`PartialEq`].
impl<T> PartialOrd for Cursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !ptr::eq(self.tree, other.tree) {
            return None;
        }
        let position = |cursor: &Self| cursor.rank().unwrap_or(cursor.tree.len());
        Some(position(self).cmp(&position(other)))
    }
}

/// A cursor over an [`OSAvlTree`] that can remove the element it points at.
///
/// Steps exactly like [`Cursor`], ghost position included. Holding a
/// `CursorMut` borrows the tree mutably, so no other access is possible
/// until it is dropped.
///
/// # Examples
///
/// ```rust
/// use osavl_tree::OSAvlTree;
///
/// let mut tree = OSAvlTree::from([20, 10, 30]);
/// let mut cursor = tree.find_mut(&20);
/// assert_eq!(cursor.remove_current(), Some(20));
/// // Removal advances to the next element in sorted order.
/// assert_eq!(cursor.value(), Some(&30));
/// ```
pub struct CursorMut<'a, T> {
    tree: &'a mut RawOSAvlTree<T>,
    current: Option<Handle>,
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut").field("rank", &self.rank()).finish()
    }
}

impl<T> CursorMut<'_, T> {
    /// Returns a reference to the element under the cursor, or `None` at the
    /// ghost position.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.current.map(|handle| &self.tree.node(handle).value)
    }

    /// Moves to the next element in sorted order, wrapping through the ghost
    /// position like [`Cursor::move_next`].
    pub fn move_next(&mut self) {
        self.current = match self.current {
            Some(handle) => self.tree.successor(handle),
            None => self.tree.first(),
        };
    }

    /// Moves to the previous element in sorted order, wrapping through the
    /// ghost position like [`Cursor::move_prev`].
    pub fn move_prev(&mut self) {
        self.current = match self.current {
            Some(handle) => self.tree.predecessor(handle),
            None => self.tree.last(),
        };
    }

    /// Returns the rank of the element under the cursor, or `None` at the
    /// ghost position.
    #[must_use]
    pub fn rank(&self) -> Option<usize> {
        self.current.map(|handle| self.tree.rank_of_handle(handle))
    }

    /// Returns a read-only cursor at the same position, borrowing from this
    /// one.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.tree, self.current)
    }
}

impl<T: Ord> CursorMut<'_, T> {
    /// Removes and returns the element under the cursor, advancing to the
    /// next element in sorted order (the ghost if the largest element was
    /// removed). Returns `None` at the ghost position, without moving.
    ///
    /// Only the removed element's position is invalidated; the rebalancing
    /// this triggers does not disturb other cursors' handles.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove_current(&mut self) -> Option<T> {
        let handle = self.current?;
        let (value, successor) = self.tree.erase(handle);
        self.current = successor;
        Some(value)
    }
}

impl<T> OSAvlTree<T> {
    /// Returns a cursor at the smallest element, or at the ghost position if
    /// the tree is empty.
    #[must_use]
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        Cursor::new(&self.raw, self.raw.first())
    }

    /// Returns a cursor at the largest element, or at the ghost position if
    /// the tree is empty.
    #[must_use]
    pub fn cursor_back(&self) -> Cursor<'_, T> {
        Cursor::new(&self.raw, self.raw.last())
    }

    /// Returns a cursor at the element with the given rank, or at the ghost
    /// position if `rank` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::{OSAvlTree, Rank};
    ///
    /// let tree = OSAvlTree::from([30, 10, 20]);
    /// assert_eq!(tree.cursor_at(Rank(2)).value(), Some(&30));
    /// assert_eq!(tree.cursor_at(Rank(3)).value(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn cursor_at(&self, rank: crate::Rank) -> Cursor<'_, T> {
        Cursor::new(&self.raw, self.raw.get_by_rank(rank.0))
    }

    /// Returns a mutable cursor at the smallest element, or at the ghost
    /// position if the tree is empty.
    #[must_use]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        let current = self.raw.first();
        CursorMut { tree: &mut self.raw, current }
    }

    /// Returns a mutable cursor at the element with the given rank, or at
    /// the ghost position if `rank` is out of bounds.
    #[must_use]
    pub fn cursor_at_mut(&mut self, rank: crate::Rank) -> CursorMut<'_, T> {
        let current = self.raw.get_by_rank(rank.0);
        CursorMut { tree: &mut self.raw, current }
    }
}

impl<T: Ord> OSAvlTree<T> {
    /// Searches for `value` and returns a cursor at an element equal to it,
    /// or at the ghost position if no such element is present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::OSAvlTree;
    ///
    /// let tree = OSAvlTree::from([20, 10, 30]);
    /// assert_eq!(tree.find(&20).value(), Some(&20));
    /// assert_eq!(tree.find(&25).value(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn find<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Cursor::new(&self.raw, self.raw.find(value))
    }

    /// Searches for `value` and returns a mutable cursor at an element equal
    /// to it, or at the ghost position if no such element is present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn find_mut<Q>(&mut self, value: &Q) -> CursorMut<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let current = self.raw.find(value);
        CursorMut { tree: &mut self.raw, current }
    }
}
