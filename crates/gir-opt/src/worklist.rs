//! Ordered work set used by passes that mutate the graph while consuming their work items.

use std::hash::Hash;

use ahash::AHashMap;

///Set with insertion-order iteration. Insertion, membership test and removal are O(1).
///
/// Removed entries leave a tombstone in place, so removing while other items are pending
/// never shifts anything.
#[derive(Debug, Clone)]
pub struct WorkSet<T: Copy + Eq + Hash> {
    slots: Vec<Option<T>>,
    index: AHashMap<T, usize>,
    ///Everything before `head` was already popped or removed.
    head: usize,
}

impl<T: Copy + Eq + Hash> Default for WorkSet<T> {
    fn default() -> Self {
        WorkSet {
            slots: Vec::new(),
            index: AHashMap::default(),
            head: 0,
        }
    }
}

impl<T: Copy + Eq + Hash> WorkSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    ///Appends `item`, returns false if it was already pending.
    pub fn insert(&mut self, item: T) -> bool {
        if self.index.contains_key(&item) {
            return false;
        }
        self.index.insert(item, self.slots.len());
        self.slots.push(Some(item));
        true
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index.contains_key(item)
    }

    ///Removes `item` if it is pending. Returns true if it was.
    pub fn remove(&mut self, item: &T) -> bool {
        if let Some(slot) = self.index.remove(item) {
            self.slots[slot] = None;
            true
        } else {
            false
        }
    }

    ///Takes the oldest pending item.
    pub fn pop_front(&mut self) -> Option<T> {
        while self.head < self.slots.len() {
            let slot = self.head;
            self.head += 1;
            if let Some(item) = self.slots[slot].take() {
                self.index.remove(&item);
                return Some(item);
            }
        }

        //fully drained, reuse the allocation
        self.slots.clear();
        self.head = 0;
        None
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    ///Pending items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots[self.head..].iter().filter_map(|s| s.as_ref())
    }
}

impl<T: Copy + Eq + Hash> Extend<T> for WorkSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}
