use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;
use super::size::Size;

/// Inline stack for iterative in-order walks.
///
/// An AVL tree of height h needs at most h entries; 16 inline slots cover
/// trees of a few thousand elements before spilling to the heap.
type TraversalStack = SmallVec<[Handle; 16]>;

/// The core AVL tree implementation backing `OSAvlTree`.
///
/// Nodes live in a slot arena and reference each other by handle. `root` is
/// the only entry point; an empty tree is `root: None`. Every mutating
/// operation restores the two structural invariants before returning: BST
/// ordering (left `<=` node `<=` right; insertion routes ties right, but
/// rotations may move an equal element into a left subtree) and AVL balance
/// (child heights differ by at most 1), with `size`/`height` aggregates
/// consistent at every node.
pub(crate) struct RawOSAvlTree<T> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

impl<T> RawOSAvlTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with the specified capacity.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of elements in the tree.
    ///
    /// Reads the root's subtree size; O(1).
    pub(crate) fn len(&self) -> usize {
        self.root.map_or(0, |root| self.nodes.get(root).size.get())
    }

    /// Returns true if the tree contains no elements.
    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the capacity of the tree.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns a reference to a node by handle.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    /// Returns the handle of the smallest element, if any. O(log n).
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.leftmost(root))
    }

    /// Returns the handle of the largest element, if any. O(log n).
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.rightmost(root))
    }

    /// Returns the handle of the in-order successor of `handle`, or `None`
    /// past the largest element.
    ///
    /// Walks parent links: with a right child, the successor is that
    /// subtree's leftmost node; otherwise ascend while the current node is
    /// its parent's right child.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        let node = self.nodes.get(handle);
        if let Some(right) = node.right {
            return Some(self.leftmost(right));
        }

        let mut current = handle;
        let mut parent = node.parent;
        while let Some(p) = parent {
            let p_node = self.nodes.get(p);
            if p_node.left == Some(current) {
                return Some(p);
            }
            current = p;
            parent = p_node.parent;
        }
        None
    }

    /// Returns the handle of the in-order predecessor of `handle`, or `None`
    /// before the smallest element. Mirror image of [`successor`](Self::successor).
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        let node = self.nodes.get(handle);
        if let Some(left) = node.left {
            return Some(self.rightmost(left));
        }

        let mut current = handle;
        let mut parent = node.parent;
        while let Some(p) = parent {
            let p_node = self.nodes.get(p);
            if p_node.right == Some(current) {
                return Some(p);
            }
            current = p;
            parent = p_node.parent;
        }
        None
    }

    /// Returns the handle of the element at `rank` (0-indexed, sorted order).
    ///
    /// Pure order-statistic descent over the `size` aggregates; never
    /// compares values. O(log n).
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len() {
            return None;
        }

        let mut current = self.root?;
        let mut remaining = rank;
        loop {
            let node = self.nodes.get(current);
            let left_size = self.link_size(node.left);
            match remaining.cmp(&left_size) {
                Ordering::Less => {
                    current = node.left.expect("`RawOSAvlTree::get_by_rank()` - size invariant violated (left)!");
                }
                Ordering::Equal => return Some(current),
                Ordering::Greater => {
                    remaining -= left_size + 1;
                    current = node.right.expect("`RawOSAvlTree::get_by_rank()` - size invariant violated (right)!");
                }
            }
        }
    }

    /// Returns the rank of the element at `handle`.
    ///
    /// Dual of [`get_by_rank`](Self::get_by_rank): starts from the node's own
    /// left-subtree size and ascends, adding the skipped portion whenever the
    /// walk arrives from a right child. O(log n).
    pub(crate) fn rank_of_handle(&self, handle: Handle) -> usize {
        let mut rank = self.link_size(self.nodes.get(handle).left);
        let mut current = handle;
        while let Some(p) = self.nodes.get(current).parent {
            let p_node = self.nodes.get(p);
            if p_node.right == Some(current) {
                rank += 1 + self.link_size(p_node.left);
            }
            current = p;
        }
        rank
    }

    fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.nodes.get(handle).left {
            handle = left;
        }
        handle
    }

    fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.nodes.get(handle).right {
            handle = right;
        }
        handle
    }

    #[inline]
    fn link_size(&self, link: Option<Handle>) -> usize {
        link.map_or(0, |h| self.nodes.get(h).size.get())
    }

    #[inline]
    fn link_height(&self, link: Option<Handle>) -> i16 {
        link.map_or(0, |h| self.nodes.get(h).height)
    }

    fn balance_factor(&self, handle: Handle) -> i16 {
        let node = self.nodes.get(handle);
        self.link_height(node.left) - self.link_height(node.right)
    }

    /// Recomputes `size` and `height` of `handle` from its children.
    fn update_aggregates(&mut self, handle: Handle) {
        let (left, right) = {
            let node = self.nodes.get(handle);
            (node.left, node.right)
        };
        let size = 1 + self.link_size(left) + self.link_size(right);
        let height = 1 + self.link_height(left).max(self.link_height(right));
        let node = self.nodes.get_mut(handle);
        node.size = Size::new(size);
        node.height = height;
    }

    fn update_height(&mut self, handle: Handle) {
        let (left, right) = {
            let node = self.nodes.get(handle);
            (node.left, node.right)
        };
        let height = 1 + self.link_height(left).max(self.link_height(right));
        self.nodes.get_mut(handle).height = height;
    }

    /// Replaces the link from `parent` (or the root link) that points at
    /// `old` with `new`, and updates `new`'s parent back-reference.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let p_node = self.nodes.get_mut(p);
                let go_left = p_node.left == Some(old);
                p_node.set_child(go_left, new);
            }
        }
        if let Some(n) = new {
            self.nodes.get_mut(n).parent = parent;
        }
    }

    /// Sets `parent`'s child link on one side and the child's back-reference.
    fn link_child(&mut self, parent: Handle, go_left: bool, child: Option<Handle>) {
        self.nodes.get_mut(parent).set_child(go_left, child);
        if let Some(c) = child {
            self.nodes.get_mut(c).parent = Some(parent);
        }
    }

    /// Single left rotation: promotes the right child into `handle`'s
    /// structural position and returns it.
    ///
    /// Relinks only; no node is moved or reallocated, so handles elsewhere in
    /// the tree stay valid. Aggregates are recomputed for the demoted node
    /// first (the promoted node's aggregates depend on it); the caller's
    /// ascent refreshes everything above.
    fn rotate_left(&mut self, handle: Handle) -> Handle {
        let promoted = self.nodes.get(handle).right.expect("`RawOSAvlTree::rotate_left()` - node has no right child!");
        let displaced = self.nodes.get(promoted).left;
        let parent = self.nodes.get(handle).parent;

        self.replace_child(parent, handle, Some(promoted));
        self.link_child(handle, false, displaced);
        self.link_child(promoted, true, Some(handle));

        self.update_aggregates(handle);
        self.update_aggregates(promoted);
        promoted
    }

    /// Single right rotation, mirror image of [`rotate_left`](Self::rotate_left).
    fn rotate_right(&mut self, handle: Handle) -> Handle {
        let promoted = self.nodes.get(handle).left.expect("`RawOSAvlTree::rotate_right()` - node has no left child!");
        let displaced = self.nodes.get(promoted).right;
        let parent = self.nodes.get(handle).parent;

        self.replace_child(parent, handle, Some(promoted));
        self.link_child(handle, true, displaced);
        self.link_child(promoted, false, Some(handle));

        self.update_aggregates(handle);
        self.update_aggregates(promoted);
        promoted
    }

    /// Restores the AVL invariant at `handle` if its balance factor exceeds
    /// ±1, composing a double rotation from singles when the heavy child
    /// leans the opposite way. Returns the subtree root now occupying
    /// `handle`'s old structural position.
    fn rebalance(&mut self, handle: Handle) -> Handle {
        let balance = self.balance_factor(handle);
        if balance > 1 {
            let left = self.nodes.get(handle).left.expect("`RawOSAvlTree::rebalance()` - left-heavy node has no left child!");
            if self.balance_factor(left) < 0 {
                self.rotate_left(left);
            }
            self.rotate_right(handle)
        } else if balance < -1 {
            let right = self.nodes.get(handle).right.expect("`RawOSAvlTree::rebalance()` - right-heavy node has no right child!");
            if self.balance_factor(right) > 0 {
                self.rotate_right(right);
            }
            self.rotate_left(handle)
        } else {
            handle
        }
    }

    /// Drains all elements in sorted order by an iterative in-order walk.
    /// O(n); avoids per-element rebalancing, unlike repeated erasure.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let mut result = Vec::with_capacity(self.len());
        let mut stack = TraversalStack::new();
        let mut current = self.root;

        loop {
            while let Some(handle) = current {
                stack.push(handle);
                current = self.nodes.get(handle).left;
            }
            let Some(handle) = stack.pop() else { break };
            current = self.nodes.get(handle).right;
            result.push(self.nodes.take(handle).value);
        }

        self.nodes.clear();
        self.root = None;
        result
    }
}

impl<T: Ord> RawOSAvlTree<T> {
    /// Inserts `value` and returns the handle of the new leaf.
    ///
    /// Always succeeds; duplicates route to the right of equal nodes, so
    /// equal elements keep their insertion order. Subtree sizes along the
    /// descent are incremented on the way down; heights are fixed on the way
    /// back up.
    pub(crate) fn insert(&mut self, value: T) -> Handle {
        let Some(root) = self.root else {
            let leaf = self.nodes.alloc(Node::new_leaf(value, None));
            self.root = Some(leaf);
            return leaf;
        };

        let mut current = root;
        loop {
            let node = self.nodes.get_mut(current);
            node.size = Size::new(node.size.get() + 1);
            let go_left = value < node.value;
            match node.child(go_left) {
                Some(child) => current = child,
                None => {
                    let leaf = self.nodes.alloc(Node::new_leaf(value, Some(current)));
                    self.nodes.get_mut(current).set_child(go_left, Some(leaf));
                    self.retrace_insert(current);
                    return leaf;
                }
            }
        }
    }

    /// Ascends from the new leaf's parent, recomputing heights.
    ///
    /// A single insertion creates at most one AVL violation, and one
    /// (possibly double) rotation at the lowest unbalanced ancestor
    /// rebalances the whole path, so the ascent stops after the first
    /// rotation - or as soon as an ancestor's height is unchanged, since no
    /// higher node can then be affected.
    fn retrace_insert(&mut self, from: Handle) {
        let mut current = Some(from);
        while let Some(handle) = current {
            let old_height = self.nodes.get(handle).height;
            self.update_height(handle);
            if self.balance_factor(handle).abs() > 1 {
                self.rebalance(handle);
                break;
            }
            if self.nodes.get(handle).height == old_height {
                break;
            }
            current = self.nodes.get(handle).parent;
        }
    }

    /// Removes the element at `handle`, returning its value and the handle of
    /// its in-order successor (`None` if the largest element was removed).
    ///
    /// A node with at most one child is spliced out directly. A node with two
    /// children is replaced by its in-order successor *node* - the successor
    /// is relinked into the removed node's structural position rather than
    /// having its value copied, so the successor's handle (and any cursor on
    /// it) survives the erase. Only the erased handle is invalidated.
    pub(crate) fn erase(&mut self, handle: Handle) -> (T, Option<Handle>) {
        let succ = self.successor(handle);
        let (left, right, parent) = {
            let node = self.nodes.get(handle);
            (node.left, node.right, node.parent)
        };

        let retrace_from = if self.nodes.get(handle).is_spliceable() {
            let child = left.or(right);
            self.replace_child(parent, handle, child);
            parent
        } else {
            // The in-order successor of an interior node is the leftmost node
            // of its right subtree; it exists and has no left child.
            let succ_h = succ.expect("`RawOSAvlTree::erase()` - interior node has no successor!");
            let succ_parent =
                self.nodes.get(succ_h).parent.expect("`RawOSAvlTree::erase()` - successor has no parent!");

            if succ_parent == handle {
                // Successor is the direct right child; it keeps its own right
                // subtree and adopts the removed node's left subtree.
                self.replace_child(parent, handle, Some(succ_h));
                self.link_child(succ_h, true, left);
                Some(succ_h)
            } else {
                // Splice the successor from its original slot, then relink it
                // into the removed node's exact position.
                let succ_right = self.nodes.get(succ_h).right;
                self.replace_child(Some(succ_parent), succ_h, succ_right);
                self.replace_child(parent, handle, Some(succ_h));
                self.link_child(succ_h, true, left);
                self.link_child(succ_h, false, right);
                Some(succ_parent)
            }
        };

        self.retrace_erase(retrace_from);
        let node = self.nodes.take(handle);
        (node.value, succ)
    }

    /// Ascends from the structural point of removal to the root, recomputing
    /// aggregates and re-checking balance at *every* level.
    ///
    /// Unlike insertion, a deletion can shrink subtree height at each
    /// ancestor in turn, so one rotation is not enough: the ascent must
    /// continue to the root rather than stop at the first rotation.
    fn retrace_erase(&mut self, from: Option<Handle>) {
        let mut current = from;
        while let Some(handle) = current {
            self.update_aggregates(handle);
            let handle = self.rebalance(handle);
            current = self.nodes.get(handle).parent;
        }
    }

    /// Searches for `value` and returns the first exact match on the search
    /// path, or `None`.
    pub(crate) fn find<Q>(&self, value: &Q) -> Option<Handle>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match value.cmp(node.value.borrow()) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }
        None
    }

    /// Counts elements strictly less than `value` using the size aggregates.
    ///
    /// This is also the rank the first occurrence of `value` has (or would
    /// have) in sorted order. O(log n).
    pub(crate) fn count_less<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut count = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if node.value.borrow() < value {
                count += 1 + self.link_size(node.left);
                current = node.right;
            } else {
                current = node.left;
            }
        }
        count
    }

    /// Counts elements less than or equal to `value`. O(log n).
    pub(crate) fn count_less_or_equal<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut count = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if node.value.borrow() <= value {
                count += 1 + self.link_size(node.left);
                current = node.right;
            } else {
                current = node.left;
            }
        }
        count
    }
}

impl<T: PartialEq> RawOSAvlTree<T> {
    /// Shape-sensitive structural equality: trees are equal iff corresponding
    /// nodes hold equal values with structurally equal left and right
    /// subtrees. Two trees holding the same multiset but built in different
    /// insertion orders may compare unequal.
    pub(crate) fn structural_eq(&self, other: &Self) -> bool {
        self.eq_subtree(self.root, other, other.root)
    }

    fn eq_subtree(&self, a: Option<Handle>, other: &Self, b: Option<Handle>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(x), Some(y)) => {
                let x_node = self.nodes.get(x);
                let y_node = other.nodes.get(y);
                x_node.value == y_node.value
                    && self.eq_subtree(x_node.left, other, y_node.left)
                    && self.eq_subtree(x_node.right, other, y_node.right)
            }
            _ => false,
        }
    }
}

impl<T: Clone> Clone for RawOSAvlTree<T> {
    /// Deep copy: a disjoint node graph with the same shape and the same
    /// `size`/`height` aggregates. Recursion depth is the tree height,
    /// O(log n) for an AVL tree.
    fn clone(&self) -> Self {
        fn clone_subtree<T: Clone>(
            src: &Arena<Node<T>>,
            dst: &mut Arena<Node<T>>,
            handle: Handle,
            parent: Option<Handle>,
        ) -> Handle {
            let node = src.get(handle);
            let new = dst.alloc(Node {
                value: node.value.clone(),
                parent,
                left: None,
                right: None,
                size: node.size,
                height: node.height,
            });
            if let Some(left) = node.left {
                let new_left = clone_subtree(src, dst, left, Some(new));
                dst.get_mut(new).left = Some(new_left);
            }
            if let Some(right) = node.right {
                let new_right = clone_subtree(src, dst, right, Some(new));
                dst.get_mut(new).right = Some(new_right);
            }
            new
        }

        let mut nodes = Arena::with_capacity(self.len());
        let root = self.root.map(|root| clone_subtree(&self.nodes, &mut nodes, root, None));
        Self { nodes, root }
    }
}
