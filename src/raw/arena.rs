use alloc::vec::Vec;

use super::handle::Handle;

enum Slot<T> {
    Occupied(T),
    /// A freed slot, linking to the next free slot (if any).
    Vacant(Option<Handle>),
}

/// Slot storage for tree nodes.
///
/// The free list is threaded through the vacant slots themselves, so the
/// arena's only overhead beyond the slots is the head of that list. Freed
/// slots are reused by later allocations in LIFO order; the backing `Vec`
/// never shrinks while the tree is live, and `clear()` releases everything at
/// once.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<Handle>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `element`, reusing the most recently freed slot if one exists.
    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        self.len += 1;
        if let Some(handle) = self.free_head {
            let slot = &mut self.slots[handle.index()];
            let Slot::Vacant(next_free) = *slot else {
                panic!("`Arena::alloc()` - free list reached an occupied slot!");
            };
            self.free_head = next_free;
            *slot = Slot::Occupied(element);
            handle
        } else {
            // `Handle::new` rejects indices above `Handle::MAX`, so the slot
            // count (and with it every subtree size) stays within `Size::MAX`.
            let handle = Handle::new(self.slots.len());
            self.slots.push(Slot::Occupied(element));
            handle
        }
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        match &self.slots[handle.index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant(_) => panic!("`Arena::get()` - `handle` is vacant!"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        match &mut self.slots[handle.index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant(_) => panic!("`Arena::get_mut()` - `handle` is vacant!"),
        }
    }

    /// Removes and returns the element at `handle`, pushing the slot onto the
    /// free list.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = core::mem::replace(&mut self.slots[handle.index()], Slot::Vacant(self.free_head));
        let Slot::Occupied(element) = slot else {
            panic!("`Arena::take()` - `handle` is vacant!");
        };
        self.free_head = Some(handle);
        self.len -= 1;
        element
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}
