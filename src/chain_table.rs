//! ChainTable: slot array plus singly linked overflow chains.
//!
//! Entries live in a slotmap arena; each slot and each entry's `next`
//! field holds an arena key, so an entry has exactly one owner (its slot
//! or its chain predecessor) and growth relinks keys instead of moving
//! items. Every entry caches the comparer hash computed at insertion; the
//! comparer is never asked to hash an item again after that.

use crate::comparer::Comparer;
use crate::config::SetConfig;
use crate::hash_index::{self, HashIndex, MAX_BITS};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Arena key of one chain entry.
    pub(crate) struct EntryKey;
}

#[derive(Debug, Clone)]
pub(crate) struct Entry<T> {
    pub(crate) item: T,
    pub(crate) hash: u32,
    pub(crate) next: Option<EntryKey>,
}

/// Result of the combined search / update / add primitive.
#[derive(Debug)]
pub(crate) enum Probe<T> {
    /// An equal entry exists and was left untouched.
    Found { key: EntryKey },
    /// An equal entry existed and its stored item was replaced.
    Updated { key: EntryKey, old: T },
    /// No equal entry existed; the item was appended at the chain tail.
    Added { key: EntryKey },
    /// No equal entry existed and adding was not requested.
    Missing(T),
}

/// Monotonic structural version: bumped by every insert, removal, clear
/// and growth. Detached cursors capture it and compare on each step.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub(crate) struct Stamp(u64);

impl Stamp {
    #[inline]
    pub(crate) fn get(&self) -> u64 {
        self.0
    }

    #[inline]
    pub(crate) fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// Where a lookup ended: on a match, or at the tail of the target chain.
enum Locate {
    Found(EntryKey),
    Vacant {
        slot: usize,
        tail: Option<EntryKey>,
    },
}

/// Traversal position: next slot to open, and next entry of the open chain.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub(crate) struct Position {
    pub(crate) slot: usize,
    pub(crate) next: Option<EntryKey>,
}

#[derive(Clone)]
pub(crate) struct ChainTable<T, C> {
    pub(crate) comparer: C,
    pub(crate) index: HashIndex,
    pub(crate) origin_bits: u32,
    pub(crate) load_factor: f64,
    pub(crate) resize_threshold: usize,
    pub(crate) slots: Vec<Option<EntryKey>>,
    pub(crate) entries: SlotMap<EntryKey, Entry<T>>,
    pub(crate) size: usize,
    pub(crate) stamp: Stamp,
}

pub(crate) fn threshold(slot_count: usize, load_factor: f64) -> usize {
    (slot_count as f64 * load_factor).floor() as usize
}

impl<T, C> ChainTable<T, C>
where
    C: Comparer<T>,
{
    /// Builds an empty table; `config` must already be validated.
    pub(crate) fn new(config: &SetConfig, comparer: C) -> Self {
        let bits = config.initial_bits();
        let index = HashIndex::new(hash_index::choose_multiplier(config.hashing), bits);
        let slot_count = index.slot_count();
        tracing::trace!(
            bits,
            multiplier = index.multiplier(),
            load_factor = config.load_factor,
            "allocating chain table"
        );
        Self {
            comparer,
            index,
            origin_bits: bits,
            load_factor: config.load_factor,
            resize_threshold: threshold(slot_count, config.load_factor),
            slots: vec![None; slot_count],
            entries: SlotMap::with_capacity_and_key(slot_count),
            size: 0,
            stamp: Stamp::default(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn stamp(&self) -> u64 {
        self.stamp.get()
    }

    pub(crate) fn get(&self, key: EntryKey) -> Option<&T> {
        self.entries.get(key).map(|e| &e.item)
    }

    fn locate(&self, item: &T) -> (u32, Locate) {
        let hash = self.comparer.hash(item);
        let slot = self.index.slot(hash);
        let mut tail = None;
        let mut cursor = self.slots[slot];
        while let Some(k) = cursor {
            let e = &self.entries[k];
            if e.hash == hash && self.comparer.equals(&e.item, item) {
                return (hash, Locate::Found(k));
            }
            tail = Some(k);
            cursor = e.next;
        }
        (hash, Locate::Vacant { slot, tail })
    }

    /// Key of the stored entry equal to `item`, if any.
    pub(crate) fn find_key(&self, item: &T) -> Option<EntryKey> {
        match self.locate(item).1 {
            Locate::Found(k) => Some(k),
            Locate::Vacant { .. } => None,
        }
    }

    /// Walks the chain for `item`; replaces the stored item when `update` is
    /// set, appends a new tail entry when `add` is set and nothing matched.
    /// Grows the table synchronously once `size` exceeds the threshold.
    pub(crate) fn search_or_update_or_add(
        &mut self,
        item: T,
        add: bool,
        update: bool,
    ) -> Probe<T> {
        let (hash, located) = self.locate(&item);
        match located {
            Locate::Found(key) if update => {
                let old = core::mem::replace(&mut self.entries[key].item, item);
                Probe::Updated { key, old }
            }
            Locate::Found(key) => Probe::Found { key },
            Locate::Vacant { .. } if !add => Probe::Missing(item),
            Locate::Vacant { slot, tail } => {
                let key = self.entries.insert(Entry {
                    item,
                    hash,
                    next: None,
                });
                match tail {
                    Some(t) => self.entries[t].next = Some(key),
                    None => self.slots[slot] = Some(key),
                }
                self.size += 1;
                self.stamp.bump();
                if self.size > self.resize_threshold && self.index.bits() < MAX_BITS {
                    self.resize(self.index.bits() + 1);
                }
                Probe::Added { key }
            }
        }
    }

    /// Unlinks and returns the stored item equal to `item`.
    pub(crate) fn remove(&mut self, item: &T) -> Option<T> {
        let key = self.find_key(item)?;
        self.remove_key(key)
    }

    /// Unlinks the entry at `key` (head or interior of its chain).
    pub(crate) fn remove_key(&mut self, key: EntryKey) -> Option<T> {
        let (hash, next) = {
            let e = self.entries.get(key)?;
            (e.hash, e.next)
        };
        let slot = self.index.slot(hash);
        if self.slots[slot] == Some(key) {
            self.slots[slot] = next;
        } else {
            let mut cursor = self.slots[slot];
            while let Some(k) = cursor {
                let e = &mut self.entries[k];
                if e.next == Some(key) {
                    e.next = next;
                    break;
                }
                cursor = e.next;
            }
        }
        let entry = self.entries.remove(key)?;
        self.size -= 1;
        self.stamp.bump();
        Some(entry.item)
    }

    /// Reallocates the slot array at `2^new_bits` and relinks every entry,
    /// prepending onto its new chain. Chain order is not preserved.
    pub(crate) fn resize(&mut self, new_bits: u32) {
        let new_index = self.index.with_bits(new_bits);
        let mut new_slots = vec![None; new_index.slot_count()];
        for head in self.slots.iter_mut() {
            let mut cursor = head.take();
            while let Some(k) = cursor {
                let e = &mut self.entries[k];
                cursor = e.next;
                let slot = new_index.slot(e.hash);
                e.next = new_slots[slot];
                new_slots[slot] = Some(k);
            }
        }
        tracing::debug!(
            old_bits = self.index.bits(),
            new_bits,
            size = self.size,
            "growing chain table"
        );
        self.index = new_index;
        self.slots = new_slots;
        self.resize_threshold = threshold(self.slots.len(), self.load_factor);
        self.stamp.bump();
    }

    /// Drops every entry and returns to the configured initial capacity.
    pub(crate) fn clear(&mut self) {
        tracing::debug!(size = self.size, bits = self.origin_bits, "clearing chain table");
        self.index = self.index.with_bits(self.origin_bits);
        self.slots = vec![None; self.index.slot_count()];
        self.entries.clear();
        self.size = 0;
        self.resize_threshold = threshold(self.slots.len(), self.load_factor);
        self.stamp.bump();
    }

    /// Advances `pos` in slot-major, then chain order.
    pub(crate) fn step(&self, pos: &mut Position) -> Option<(EntryKey, &T)> {
        loop {
            if let Some(k) = pos.next {
                let e = self.entries.get(k)?;
                pos.next = e.next;
                return Some((k, &e.item));
            }
            if pos.slot >= self.slots.len() {
                return None;
            }
            pos.next = self.slots[pos.slot];
            pos.slot += 1;
        }
    }

    /// Head item of `slot`'s chain.
    pub(crate) fn head(&self, slot: usize) -> Option<&T> {
        let k = (*self.slots.get(slot)?)?;
        self.get(k)
    }

    pub(crate) fn keys(&self) -> Keys<'_, T, C> {
        Keys {
            table: self,
            pos: Position::default(),
        }
    }

    pub(crate) fn chain_len(&self, slot: usize) -> usize {
        let mut n = 0;
        let mut cursor = self.slots[slot];
        while let Some(k) = cursor {
            n += 1;
            cursor = self.entries.get(k).and_then(|e| e.next);
        }
        n
    }
}

/// Entry keys in traversal order.
pub(crate) struct Keys<'a, T, C> {
    table: &'a ChainTable<T, C>,
    pos: Position,
}

impl<'a, T, C> Iterator for Keys<'a, T, C>
where
    C: Comparer<T>,
{
    type Item = (EntryKey, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.table.step(&mut self.pos)
    }
}
