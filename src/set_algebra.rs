//! Set algebra over any finite operand.
//!
//! Every operation picks a path from what the operand can do. The fast
//! path needs a cheap count and a membership test driven by a comparer
//! equal to this set's comparer; only then can counts and membership
//! answers be trusted under this set's notion of equality. Everything
//! else gets a single generic pass over the operand's items, which may
//! contain duplicates.

use crate::chain_table::EntryKey;
use crate::comparer::Comparer;
use crate::config::SetConfig;
use crate::linear_hash_set::{Iter, LinearHashSet};
use core::hash::{BuildHasher, Hash};
use slotmap::SecondaryMap;
use std::collections::BTreeSet;

/// The "other" side of a set-algebra operation.
///
/// `items` must be repeatable and finite. The remaining methods advertise
/// optional capabilities; the defaults advertise none.
pub trait SetOperand<T, C> {
    type Items<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// Every element, duplicates included.
    fn items(&self) -> Self::Items<'_>;

    /// Element count, if it is cheap to get.
    fn count_hint(&self) -> Option<usize> {
        None
    }

    /// Membership under the operand's own comparer, if it is cheap to answer.
    /// An operand that reports a [`comparer`](Self::comparer) should answer.
    fn contains_item(&self, _item: &T) -> Option<bool> {
        None
    }

    /// True when no two items are equal under the operand's comparer.
    fn is_distinct(&self) -> bool {
        false
    }

    /// Comparer behind `contains_item` and `is_distinct`, when it is a `C`.
    fn comparer(&self) -> Option<&C> {
        None
    }
}

impl<T, C> SetOperand<T, C> for [T] {
    type Items<'a>
        = core::slice::Iter<'a, T>
    where
        T: 'a;

    fn items(&self) -> Self::Items<'_> {
        self.iter()
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T, C, const N: usize> SetOperand<T, C> for [T; N] {
    type Items<'a>
        = core::slice::Iter<'a, T>
    where
        T: 'a;

    fn items(&self) -> Self::Items<'_> {
        self.iter()
    }

    fn count_hint(&self) -> Option<usize> {
        Some(N)
    }
}

impl<T, C> SetOperand<T, C> for Vec<T> {
    type Items<'a>
        = core::slice::Iter<'a, T>
    where
        T: 'a;

    fn items(&self) -> Self::Items<'_> {
        self.iter()
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T, C, S> SetOperand<T, C> for std::collections::HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Items<'a>
        = std::collections::hash_set::Iter<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn items(&self) -> Self::Items<'_> {
        self.iter()
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.len())
    }

    fn contains_item(&self, item: &T) -> Option<bool> {
        Some(self.contains(item))
    }

    fn is_distinct(&self) -> bool {
        true
    }
}

impl<T, C, S> SetOperand<T, C> for hashbrown::HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    type Items<'a>
        = hashbrown::hash_set::Iter<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn items(&self) -> Self::Items<'_> {
        self.iter()
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.len())
    }

    fn contains_item(&self, item: &T) -> Option<bool> {
        Some(self.contains(item))
    }

    fn is_distinct(&self) -> bool {
        true
    }
}

impl<T, C> SetOperand<T, C> for BTreeSet<T>
where
    T: Ord,
{
    type Items<'a>
        = std::collections::btree_set::Iter<'a, T>
    where
        T: 'a;

    fn items(&self) -> Self::Items<'_> {
        self.iter()
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.len())
    }

    fn contains_item(&self, item: &T) -> Option<bool> {
        Some(self.contains(item))
    }

    fn is_distinct(&self) -> bool {
        true
    }
}

impl<T, C> SetOperand<T, C> for LinearHashSet<T, C>
where
    C: Comparer<T>,
{
    type Items<'a>
        = Iter<'a, T, C>
    where
        Self: 'a,
        T: 'a;

    fn items(&self) -> Self::Items<'_> {
        self.iter()
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.len())
    }

    fn contains_item(&self, item: &T) -> Option<bool> {
        Some(self.contains(item))
    }

    fn is_distinct(&self) -> bool {
        true
    }

    fn comparer(&self) -> Option<&C> {
        Some(LinearHashSet::comparer(self))
    }
}

impl<T, C> LinearHashSet<T, C>
where
    C: Comparer<T>,
{
    /// Operand count, when the operand holds no duplicates and its comparer
    /// equals ours. Only then does the count measure distinct items.
    fn matched_count<O>(&self, other: &O) -> Option<usize>
    where
        O: SetOperand<T, C> + ?Sized,
    {
        if !other.is_distinct() {
            return None;
        }
        let count = other.count_hint()?;
        match other.comparer() {
            Some(c) if c == self.comparer() => Some(count),
            _ => None,
        }
    }

    /// Membership in a fast-path operand.
    fn member_of<O>(&self, other: &O, item: &T) -> bool
    where
        O: SetOperand<T, C> + ?Sized,
    {
        match other.contains_item(item) {
            Some(found) => found,
            None => other.items().any(|o| self.comparer().equals(o, item)),
        }
    }

    /// One pass over `other`: how many distinct stored items it hits, and
    /// how many of its elements miss. Duplicates in `other` hit at most once.
    fn tally<O>(&self, other: &O, stop_on_miss: bool) -> (usize, usize)
    where
        O: SetOperand<T, C> + ?Sized,
    {
        let mut hit: SecondaryMap<EntryKey, ()> = SecondaryMap::with_capacity(self.len());
        let mut missed = 0;
        for item in other.items() {
            match self.table.find_key(item) {
                Some(key) => {
                    hit.insert(key, ());
                }
                None => {
                    missed += 1;
                    if stop_on_miss {
                        break;
                    }
                }
            }
        }
        (hit.len(), missed)
    }

    /// Adds every element of `other` not already present.
    pub fn union_with<O>(&mut self, other: &O) -> bool
    where
        O: SetOperand<T, C> + ?Sized,
        T: Clone,
    {
        let mut changed = false;
        for item in other.items() {
            if !self.contains(item) {
                changed |= self.add_silently(item.clone());
            }
        }
        if changed {
            self.events.changed();
        }
        changed
    }

    /// Keeps only the items that also occur in `other`.
    pub fn intersect_with<O>(&mut self, other: &O) -> bool
    where
        O: SetOperand<T, C> + ?Sized,
    {
        if self.is_empty() {
            return false;
        }
        if other.count_hint() == Some(0) {
            self.clear();
            return true;
        }
        let doomed: Vec<EntryKey> = if self.matched_count(other).is_some() {
            self.table
                .keys()
                .filter(|(_, item)| !self.member_of(other, item))
                .map(|(k, _)| k)
                .collect()
        } else {
            let mut hit: SecondaryMap<EntryKey, ()> = SecondaryMap::with_capacity(self.len());
            for item in other.items() {
                if let Some(key) = self.table.find_key(item) {
                    hit.insert(key, ());
                    if hit.len() == self.len() {
                        break;
                    }
                }
            }
            self.table
                .keys()
                .filter(|(k, _)| !hit.contains_key(*k))
                .map(|(k, _)| k)
                .collect()
        };
        self.remove_keys(doomed) > 0
    }

    /// Removes every element of `other`; elements absent here are ignored.
    pub fn except_with<O>(&mut self, other: &O) -> bool
    where
        O: SetOperand<T, C> + ?Sized,
    {
        if self.is_empty() {
            return false;
        }
        self.remove_all(other.items()) > 0
    }

    /// Keeps the items in exactly one of `self` and `other`.
    pub fn symmetric_except_with<O>(&mut self, other: &O) -> bool
    where
        O: SetOperand<T, C> + ?Sized,
        T: Clone,
        C: Clone,
    {
        if self.is_empty() {
            return self.union_with(other);
        }
        let mut changed = false;
        if self.matched_count(other).is_some() {
            for item in other.items() {
                if self.remove_silently(item).is_none() {
                    self.add_silently(item.clone());
                }
                changed = true;
            }
        } else {
            // other \ self, deduplicated through a scratch set.
            let mut fresh = LinearHashSet::from_validated(&SetConfig::default(), self.comparer().clone());
            for item in other.items() {
                if !self.contains(item) {
                    fresh.add_silently(item.clone());
                }
            }
            for item in other.items() {
                changed |= self.remove_silently(item).is_some();
            }
            for item in fresh.into_items() {
                changed |= self.add_silently(item);
            }
        }
        if changed {
            self.events.changed();
        }
        changed
    }

    /// True when every item here also occurs in `other`.
    pub fn is_subset_of<O>(&self, other: &O) -> bool
    where
        O: SetOperand<T, C> + ?Sized,
    {
        if self.is_empty() {
            return true;
        }
        if let Some(count) = self.matched_count(other) {
            return self.len() <= count && self.iter().all(|item| self.member_of(other, item));
        }
        let (hits, _) = self.tally(other, false);
        hits == self.len()
    }

    /// Subset, with at least one element of `other` missing here.
    pub fn is_proper_subset_of<O>(&self, other: &O) -> bool
    where
        O: SetOperand<T, C> + ?Sized,
    {
        if let Some(count) = self.matched_count(other) {
            return self.len() < count && self.iter().all(|item| self.member_of(other, item));
        }
        if self.is_empty() {
            return other.items().next().is_some();
        }
        let (hits, misses) = self.tally(other, false);
        hits == self.len() && misses > 0
    }

    /// True when every element of `other` occurs here.
    pub fn is_superset_of<O>(&self, other: &O) -> bool
    where
        O: SetOperand<T, C> + ?Sized,
    {
        if other.count_hint() == Some(0) {
            return true;
        }
        if let Some(count) = self.matched_count(other) {
            if count > self.len() {
                return false;
            }
        }
        other.items().all(|item| self.contains(item))
    }

    /// Superset, with at least one item here missing from `other`.
    pub fn is_proper_superset_of<O>(&self, other: &O) -> bool
    where
        O: SetOperand<T, C> + ?Sized,
    {
        if self.is_empty() {
            return false;
        }
        if let Some(count) = self.matched_count(other) {
            return count < self.len() && other.items().all(|item| self.contains(item));
        }
        let (hits, misses) = self.tally(other, true);
        misses == 0 && hits < self.len()
    }

    /// Same items as `other`, ignoring order and duplicates in `other`.
    pub fn set_equals<O>(&self, other: &O) -> bool
    where
        O: SetOperand<T, C> + ?Sized,
    {
        if let Some(count) = self.matched_count(other) {
            return count == self.len() && self.iter().all(|item| self.member_of(other, item));
        }
        let (hits, misses) = self.tally(other, true);
        misses == 0 && hits == self.len()
    }

    /// True when at least one element of `other` occurs here.
    pub fn overlaps<O>(&self, other: &O) -> bool
    where
        O: SetOperand<T, C> + ?Sized,
    {
        if self.is_empty() {
            return false;
        }
        match self.matched_count(other) {
            Some(count) if count > self.len() => {
                self.iter().any(|item| self.member_of(other, item))
            }
            _ => other.items().any(|item| self.contains(item)),
        }
    }

    fn into_items(self) -> impl Iterator<Item = T> {
        self.table.entries.into_iter().map(|(_, e)| e.item)
    }
}
