use super::handle::Handle;
use super::size::Size;

/// One tree vertex.
///
/// Child links (`left`/`right`) own their subtrees in the logical sense: a
/// node is freed exactly when it is erased or when the tree that reaches it
/// through child links is cleared. The `parent` link is a non-owning
/// back-reference used for in-order stepping and bottom-up rebalancing.
///
/// `size` counts the nodes of the subtree rooted here, including this node.
/// `height` is the longest root-to-leaf path of that subtree; a leaf has
/// height 1 and an absent child contributes 0.
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) parent: Option<Handle>,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    pub(crate) size: Size,
    pub(crate) height: i16,
}

impl<T> Node<T> {
    /// Creates a new leaf node below `parent`.
    pub(crate) const fn new_leaf(value: T, parent: Option<Handle>) -> Self {
        Self {
            value,
            parent,
            left: None,
            right: None,
            size: Size::ONE,
            height: 1,
        }
    }

    /// Returns the child link on the given side.
    #[inline]
    pub(crate) const fn child(&self, go_left: bool) -> Option<Handle> {
        if go_left { self.left } else { self.right }
    }

    /// Sets the child link on the given side.
    #[inline]
    pub(crate) const fn set_child(&mut self, go_left: bool, child: Option<Handle>) {
        if go_left {
            self.left = child;
        } else {
            self.right = child;
        }
    }

    /// Returns true if this node has at most one child.
    #[inline]
    pub(crate) const fn is_spliceable(&self) -> bool {
        self.left.is_none() || self.right.is_none()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn leaf_aggregates() {
        let node = Node::new_leaf(42u32, None);
        assert_eq!(node.size.get(), 1);
        assert_eq!(node.height, 1);
        assert!(node.is_spliceable());
    }

    #[test]
    fn child_links_by_side() {
        let mut node = Node::new_leaf(0u32, None);
        let left = Handle::new(1);
        let right = Handle::new(2);

        node.set_child(true, Some(left));
        node.set_child(false, Some(right));

        assert_eq!(node.child(true), Some(left));
        assert_eq!(node.child(false), Some(right));
        assert!(!node.is_spliceable());
    }
}
