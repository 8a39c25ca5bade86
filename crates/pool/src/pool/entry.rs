//! Entry arena backing the pool
//!
//! Every entry ever created lives in one `Vec` and is addressed by index.
//! Two intrusive stacks are threaded through `Entry::next`:
//!
//! - `live`: entries holding a value, newest first
//! - `free`: retired entries holding `None`, most recently retired first
//!
//! Entries move between the two stacks and are never removed from the
//! arena, so the number of entries only grows. The arena has no locking of
//! its own; `Pool` keeps it behind a mutex.

use std::collections::TryReserveError;

/// One arena slot
#[derive(Debug)]
struct Entry<T> {
    value: Option<T>,
    next: Option<usize>,
}

/// Outcome of [`FreeList::push`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    /// A retired entry was taken off the free stack
    Reused,
    /// The arena grew by one entry
    Allocated,
}

/// Index-based live/free stacks over a growable entry arena
#[derive(Debug)]
pub(crate) struct FreeList<T> {
    entries: Vec<Entry<T>>,
    live: Option<usize>,
    free: Option<usize>,
    live_len: usize,
}

impl<T> FreeList<T> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            live: None,
            free: None,
            live_len: 0,
        }
    }

    /// Reserve room for `additional` more entries without creating them
    pub(crate) fn reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.entries.try_reserve_exact(additional)
    }

    /// Store `value` as the new live head
    pub(crate) fn push(&mut self, value: T) -> Slot {
        let (index, slot) = match self.free {
            Some(index) => {
                let entry = &mut self.entries[index];
                self.free = entry.next;
                entry.value = Some(value);
                (index, Slot::Reused)
            }
            None => {
                self.entries.push(Entry {
                    value: Some(value),
                    next: None,
                });
                (self.entries.len() - 1, Slot::Allocated)
            }
        };

        self.entries[index].next = self.live;
        self.live = Some(index);
        self.live_len += 1;
        slot
    }

    /// Detach the live head, retire its entry and hand back the value
    pub(crate) fn pop(&mut self) -> Option<T> {
        let index = self.live?;
        let entry = &mut self.entries[index];
        self.live = entry.next;

        // Retired entries must not keep the old value alive.
        let value = entry.value.take();
        entry.next = self.free;
        self.free = Some(index);
        self.live_len -= 1;

        debug_assert!(value.is_some(), "live entry {index} held no value");
        value
    }

    pub(crate) fn live_len(&self) -> usize {
        self.live_len
    }

    pub(crate) fn free_len(&self) -> usize {
        self.entries.len() - self.live_len
    }

    pub(crate) fn total_entries(&self) -> usize {
        self.entries.len()
    }

    #[cfg_attr(not(feature = "logging"), allow(dead_code))]
    pub(crate) fn reserved(&self) -> usize {
        self.entries.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    impl<T> FreeList<T> {
        /// Walk a stack from its head, collecting indices
        fn walk(&self, mut cursor: Option<usize>) -> Vec<usize> {
            let mut indices = Vec::new();
            while let Some(index) = cursor {
                indices.push(index);
                cursor = self.entries[index].next;
            }
            indices
        }

        /// Both stacks together cover each entry exactly once
        fn assert_partitioned(&self) {
            let live = self.walk(self.live);
            let free = self.walk(self.free);
            assert_eq!(live.len(), self.live_len);
            assert_eq!(live.len() + free.len(), self.entries.len());

            let mut seen = vec![false; self.entries.len()];
            for index in live.iter().chain(free.iter()) {
                assert!(!seen[*index], "entry {index} is on both stacks");
                seen[*index] = true;
            }
            for index in &live {
                assert!(self.entries[*index].value.is_some());
            }
            for index in &free {
                assert!(self.entries[*index].value.is_none());
            }
        }
    }

    #[test]
    fn test_empty() {
        let mut list = FreeList::<u32>::new();
        assert_eq!(list.pop(), None);
        assert_eq!(list.total_entries(), 0);
        list.assert_partitioned();
    }

    #[test]
    fn test_lifo_order() {
        let mut list = FreeList::new();
        assert_eq!(list.push("a"), Slot::Allocated);
        assert_eq!(list.push("b"), Slot::Allocated);
        assert_eq!(list.pop(), Some("b"));
        assert_eq!(list.pop(), Some("a"));
        assert_eq!(list.pop(), None);
        list.assert_partitioned();
    }

    #[test]
    fn test_entries_are_recycled() {
        let mut list = FreeList::new();
        list.push(1);
        list.push(2);
        list.pop();
        list.pop();
        assert_eq!(list.free_len(), 2);

        assert_eq!(list.push(3), Slot::Reused);
        assert_eq!(list.push(4), Slot::Reused);
        assert_eq!(list.push(5), Slot::Allocated);
        assert_eq!(list.total_entries(), 3);
        assert_eq!(list.free_len(), 0);
        list.assert_partitioned();
    }

    #[test]
    fn test_most_recently_retired_entry_reused_first() {
        let mut list = FreeList::new();
        list.push('x');
        list.push('y');
        // 'y' sits in entry 1 and is retired first, then entry 0.
        list.pop();
        list.pop();
        assert_eq!(list.walk(list.free), vec![0, 1]);

        list.push('z');
        assert_eq!(list.live, Some(0));
        assert_eq!(list.walk(list.free), vec![1]);
        list.assert_partitioned();
    }

    #[test]
    fn test_retired_entry_releases_value() {
        let shared = Arc::new(String::from("payload"));
        let mut list = FreeList::new();
        list.push(Arc::clone(&shared));
        assert_eq!(Arc::strong_count(&shared), 2);

        let popped = list.pop().unwrap();
        drop(popped);
        assert_eq!(Arc::strong_count(&shared), 1);
        list.assert_partitioned();
    }

    #[test]
    fn test_reserve_does_not_create_entries() {
        let mut list = FreeList::<u8>::new();
        list.reserve(32).unwrap();
        assert!(list.reserved() >= 32);
        assert_eq!(list.total_entries(), 0);
        assert_eq!(list.pop(), None);
    }

    #[test]
    fn test_reserve_overflow_is_reported() {
        let mut list = FreeList::<u64>::new();
        assert!(list.reserve(usize::MAX).is_err());
    }

    #[test]
    fn test_interleaved_operations_keep_partition() {
        let mut list = FreeList::new();
        for round in 0..50u32 {
            for i in 0..(round % 7) {
                list.push(round * 10 + i);
            }
            for _ in 0..(round % 5) {
                list.pop();
            }
            list.assert_partitioned();
        }
    }
}
