use core::num::NonZero;

// Narrow handles in tests so capacity overflow is actually reachable.
#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// A stable index into the node arena.
///
/// Stored with a +1 bias so the backing integer is never zero, which lets
/// `Option<Handle>` use the niche and cost nothing over a bare `Handle`.
/// Handles are not reused while the node they name is alive, and rotations
/// relink nodes without moving them, so a handle identifies the same element
/// for that element's entire lifetime.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// The largest representable arena index.
    pub(crate) const MAX: usize = (RawHandle::MAX - 1) as usize;

    /// Wraps an arena index.
    ///
    /// # Panics
    ///
    /// Panics if `index > Handle::MAX`.
    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::new()` - `index` > `Handle::MAX`!");
        // The +1 bias keeps the value nonzero; the assert above rules out
        // overflow of the narrow integer.
        #[allow(clippy::cast_possible_truncation)]
        match NonZero::new((index + 1) as RawHandle) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    /// Returns the arena index this handle wraps.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
