//! # Slot Pool
//!
//! Fixed-capacity arena for short-lived objects such as trail particles.

/// A fixed-capacity pool with a free list.
///
/// Slots are reused after removal. Handles carry a generation so a stale
/// handle never reaches the object that later took its slot.
///
/// # Thread Safety
///
/// Not thread-safe. Owned by a single emitter on the render thread.
///
/// # Example
///
/// ```rust,ignore
/// let mut pool: SlotPool<Spark> = SlotPool::with_capacity(512);
///
/// let handle = pool.insert(Spark::new())?;
/// pool.retain_mut(|spark| spark.tick());
/// ```
#[derive(Debug)]
pub struct SlotPool<T> {
    /// Slot storage, allocated once.
    slots: Box<[Slot<T>]>,
    /// Indices of vacant slots.
    free_list: Vec<usize>,
    /// Occupied slot count.
    len: usize,
}

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    generation: u32,
}

/// Handle to an object in a [`SlotPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotHandle {
    index: usize,
    generation: u32,
}

impl SlotHandle {
    /// Slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

impl<T> SlotPool<T> {
    /// Creates a pool with every slot pre-allocated.
    ///
    /// A zero capacity yields a pool that rejects every insert.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let slots: Vec<Slot<T>> = (0..capacity)
            .map(|_| Slot {
                value: None,
                generation: 0,
            })
            .collect();

        Self {
            slots: slots.into_boxed_slice(),
            // Reversed so slot 0 is handed out first
            free_list: (0..capacity).rev().collect(),
            len: 0,
        }
    }

    /// Total capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Occupied slots.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when nothing is stored.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when every slot is occupied.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.free_list.is_empty()
    }

    /// Stores `value`, or returns `None` when the pool is full.
    pub fn insert(&mut self, value: T) -> Option<SlotHandle> {
        let index = self.free_list.pop()?;
        let slot = &mut self.slots[index];
        slot.value = Some(value);
        self.len += 1;

        Some(SlotHandle {
            index,
            generation: slot.generation,
        })
    }

    /// Removes and returns the object behind `handle`.
    pub fn remove(&mut self, handle: SlotHandle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        let value = slot.value.take()?;
        Self::release(slot, &mut self.free_list, &mut self.len, handle.index);
        Some(value)
    }

    /// Looks up an object.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: SlotHandle) -> Option<&T> {
        let slot = self.slots.get(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_ref()
    }

    /// Looks up an object mutably.
    #[inline]
    pub fn get_mut(&mut self, handle: SlotHandle) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.value.as_mut()
    }

    /// Iterates occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(|slot| slot.value.as_ref())
    }

    /// Visits every object; those for which `keep` returns `false` are
    /// removed. Each removed object is dropped exactly once and its slot
    /// becomes available immediately. Returns the number removed.
    pub fn retain_mut(&mut self, mut keep: impl FnMut(&mut T) -> bool) -> usize {
        let mut removed = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(value) = slot.value.as_mut() else {
                continue;
            };
            if !keep(value) {
                slot.value = None;
                Self::release(slot, &mut self.free_list, &mut self.len, index);
                removed += 1;
            }
        }
        removed
    }

    /// Removes everything. No memory is freed.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                Self::release(slot, &mut self.free_list, &mut self.len, index);
            }
        }
    }

    fn release(slot: &mut Slot<T>, free_list: &mut Vec<usize>, len: &mut usize, index: usize) {
        slot.generation = slot.generation.wrapping_add(1);
        free_list.push(index);
        *len -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_insert_remove() {
        let mut pool: SlotPool<u32> = SlotPool::with_capacity(4);

        let h1 = pool.insert(42).unwrap();
        assert_eq!(pool.get(h1), Some(&42));
        assert_eq!(pool.len(), 1);

        assert_eq!(pool.remove(h1), Some(42));
        assert_eq!(pool.len(), 0);
        assert_eq!(pool.remove(h1), None);
    }

    #[test]
    fn test_pool_full() {
        let mut pool: SlotPool<u8> = SlotPool::with_capacity(2);
        assert!(pool.insert(1).is_some());
        assert!(pool.insert(2).is_some());
        assert!(pool.is_full());
        assert!(pool.insert(3).is_none());
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_stale_handle_rejected() {
        let mut pool: SlotPool<u32> = SlotPool::with_capacity(1);
        let old = pool.insert(1).unwrap();
        pool.remove(old);
        let new = pool.insert(2).unwrap();

        assert_eq!(old.index(), new.index());
        assert_eq!(pool.get(old), None);
        assert_eq!(pool.get(new), Some(&2));
    }

    #[test]
    fn test_retain_mut_removes_once() {
        let mut pool: SlotPool<i32> = SlotPool::with_capacity(8);
        for i in 0..8 {
            pool.insert(i);
        }

        let removed = pool.retain_mut(|v| {
            *v += 100;
            *v % 2 == 0
        });

        assert_eq!(removed, 4);
        assert_eq!(pool.len(), 4);
        assert!(pool.iter().all(|v| *v >= 100 && *v % 2 == 0));

        // Freed slots are reusable straight away
        for i in 0..4 {
            assert!(pool.insert(i).is_some());
        }
        assert!(pool.is_full());
    }

    #[test]
    fn test_clear() {
        let mut pool: SlotPool<u32> = SlotPool::with_capacity(3);
        pool.insert(1);
        pool.insert(2);
        pool.clear();
        assert!(pool.is_empty());
        assert_eq!(pool.iter().count(), 0);
        assert_eq!(pool.capacity(), 3);
    }
}
