use super::handle::Handle;

/// A subtree element count, stored once per node.
///
/// Piggybacks on [`Handle`]'s nonzero representation, so it shares both the
/// niche (an `Option<Size>` would be free) and the upper bound: a subtree can
/// never count more elements than the arena can address.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Size(Handle);

impl Size {
    /// The largest representable count, equal to `Handle::MAX`.
    pub(crate) const MAX: usize = Handle::MAX;
    /// The size of a leaf. A node counts itself, so no valid node has size 0.
    pub(crate) const ONE: Self = Self::new(1);

    /// Wraps a count.
    ///
    /// # Panics
    ///
    /// Panics if `count > Size::MAX`.
    #[inline]
    pub(crate) const fn new(count: usize) -> Self {
        assert!(count <= Self::MAX, "`Size::new()` - `count` > `Size::MAX`!");
        Self(Handle::new(count))
    }

    /// Returns the count this size wraps.
    #[inline]
    pub(crate) const fn get(self) -> usize {
        self.0.index()
    }
}
