//! Fixed-capacity slot storage
//!
//! Blocks and items never grow past a compile-time capacity. Each slot carries
//! an active flag; inactive slots hold `T::default()` and are reused by
//! `activate_first_free`.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Slot<T> {
    active: bool,
    value: T,
}

/// Fixed-capacity arena with per-slot active flags
#[derive(Debug, Clone, PartialEq)]
pub struct SlotPool<T, const N: usize> {
    slots: [Slot<T>; N],
}

impl<T: Copy + Default, const N: usize> Default for SlotPool<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default, const N: usize> SlotPool<T, N> {
    /// All slots inactive, holding `T::default()`
    pub fn new() -> Self {
        Self {
            slots: [Slot::default(); N],
        }
    }

    /// Deactivate every slot and reset its value
    pub fn clear(&mut self) {
        self.slots = [Slot::default(); N];
    }

    /// Overwrite slot `index` and mark it active
    pub fn set(&mut self, index: usize, value: T) {
        self.slots[index] = Slot {
            active: true,
            value,
        };
    }

    /// Put `value` in the lowest-index inactive slot.
    ///
    /// Returns the slot index, or `None` when every slot is in use.
    pub fn activate_first_free(&mut self, value: T) -> Option<usize> {
        let index = self.slots.iter().position(|slot| !slot.active)?;
        self.set(index, value);
        Some(index)
    }

    /// Mark a slot inactive and reset it to the default value
    pub fn deactivate(&mut self, index: usize) {
        self.slots[index] = Slot::default();
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.slots[index].active
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots
            .get(index)
            .filter(|slot| slot.active)
            .map(|slot| &slot.value)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots
            .get_mut(index)
            .filter(|slot| slot.active)
            .map(|slot| &mut slot.value)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.active).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|slot| slot.active)
    }

    /// Iterate active slots in index order
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.active)
            .map(|(i, slot)| (i, &slot.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_free_reuses_lowest_index() {
        let mut pool: SlotPool<u32, 4> = SlotPool::new();
        assert_eq!(pool.activate_first_free(10), Some(0));
        assert_eq!(pool.activate_first_free(11), Some(1));
        assert_eq!(pool.activate_first_free(12), Some(2));

        pool.deactivate(1);
        assert_eq!(pool.get(1), None);
        assert_eq!(pool.activate_first_free(13), Some(1));
        assert_eq!(pool.get(1), Some(&13));
    }

    #[test]
    fn test_full_pool_rejects() {
        let mut pool: SlotPool<u8, 2> = SlotPool::new();
        pool.activate_first_free(1);
        pool.activate_first_free(2);
        assert!(pool.is_full());
        assert_eq!(pool.activate_first_free(3), None);
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn test_iter_active_skips_inactive() {
        let mut pool: SlotPool<u8, 5> = SlotPool::new();
        pool.set(0, 1);
        pool.set(3, 4);
        let seen: Vec<_> = pool.iter_active().map(|(i, v)| (i, *v)).collect();
        assert_eq!(seen, vec![(0, 1), (3, 4)]);

        pool.clear();
        assert_eq!(pool.active_count(), 0);
    }
}
