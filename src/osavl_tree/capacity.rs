//! Capacity management for [`OSAvlTree`].

use super::OSAvlTree;
use crate::raw::RawOSAvlTree;

impl<T> OSAvlTree<T> {
    /// Creates a new, empty tree with room for at least `capacity` elements
    /// before reallocating node storage.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use osavl_tree::OSAvlTree;
    ///
    /// let tree: OSAvlTree<i64> = OSAvlTree::with_capacity(64);
    /// assert!(tree.capacity() >= 64);
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { raw: RawOSAvlTree::with_capacity(capacity) }
    }

    /// Returns the number of elements the tree can hold without reallocating
    /// node storage.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
