//! LinearHashSet: the public set surface over `ChainTable`.
//!
//! This layer owns the event hub and the `choose` rotor, and turns the
//! table's combined search/update/add primitive into the item API.

use crate::chain_table::{ChainTable, EntryKey, Keys, Position, Probe};
use crate::comparer::{Comparer, DefaultComparer};
use crate::config::SetConfig;
use crate::error::SetError;
use crate::events::{EventHub, SetObserver};
use core::cell::Cell;
use core::fmt;
use core::iter::FusedIterator;

/// Outcome of a lookup that may also insert: whether an equal item was
/// already present, and the canonical stored item.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Lookup<V> {
    pub found: bool,
    pub value: V,
}

/// Chained hash set with per-table randomized multiplicative hashing.
///
/// Membership is defined by the comparer `C`. Capacity only ever grows,
/// except that [`clear`](Self::clear) returns to the configured initial
/// capacity. Not thread-safe; callers serialize access.
///
/// ```
/// use linear_hash_set::LinearHashSet;
///
/// let mut set: LinearHashSet<&str> = LinearHashSet::new();
/// assert!(set.add("apple"));
/// assert!(!set.add("apple"));
/// assert!(set.contains(&"apple"));
/// assert_eq!(set.len(), 1);
/// ```
pub struct LinearHashSet<T, C = DefaultComparer> {
    pub(crate) table: ChainTable<T, C>,
    pub(crate) events: EventHub<T>,
    last_chosen: Cell<usize>,
}

impl<T> LinearHashSet<T>
where
    DefaultComparer: Comparer<T>,
{
    /// Empty set with capacity 16, load factor 0.66 and a randomized multiplier.
    pub fn new() -> Self {
        Self::from_validated(&SetConfig::default(), DefaultComparer::default())
    }

    /// Empty set sized for `capacity` (rounded up to a power of two, at least 16).
    pub fn with_capacity(capacity: usize) -> Result<Self, SetError> {
        Self::with_config(SetConfig::new().with_capacity(capacity))
    }

    pub fn with_config(config: SetConfig) -> Result<Self, SetError> {
        Self::with_config_and_comparer(config, DefaultComparer::default())
    }
}

impl<T, C> LinearHashSet<T, C>
where
    C: Comparer<T>,
{
    pub fn with_comparer(comparer: C) -> Self {
        Self::from_validated(&SetConfig::default(), comparer)
    }

    /// Validates `config` before allocating anything.
    pub fn with_config_and_comparer(config: SetConfig, comparer: C) -> Result<Self, SetError> {
        config.validate()?;
        Ok(Self::from_validated(&config, comparer))
    }

    pub(crate) fn from_validated(config: &SetConfig, comparer: C) -> Self {
        Self {
            table: ChainTable::new(config, comparer),
            events: EventHub::default(),
            last_chosen: Cell::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Current slot count.
    pub fn capacity(&self) -> usize {
        self.table.slot_count()
    }

    pub fn load_factor(&self) -> f64 {
        self.table.load_factor
    }

    pub fn comparer(&self) -> &C {
        &self.table.comparer
    }

    /// Structural version; changes on every insert, removal, clear and growth.
    pub fn stamp(&self) -> u64 {
        self.table.stamp()
    }

    /// Registers an observer for change notifications.
    pub fn observe<O>(&mut self, observer: O)
    where
        O: SetObserver<T> + 'static,
    {
        self.events.subscribe(Box::new(observer));
    }

    pub fn contains(&self, item: &T) -> bool {
        self.table.find_key(item).is_some()
    }

    /// The stored item equal to `item`, which may be a different instance.
    pub fn find(&self, item: &T) -> Option<&T> {
        let key = self.table.find_key(item)?;
        self.table.get(key)
    }

    /// Returns the stored item equal to `item`, inserting `item` first if
    /// nothing equal was present.
    pub fn find_or_add(&mut self, item: T) -> Lookup<&T> {
        let (found, key) = match self.table.search_or_update_or_add(item, true, false) {
            Probe::Found { key } => (true, key),
            Probe::Added { key } => {
                self.notify_added(key);
                self.events.changed();
                (false, key)
            }
            Probe::Updated { .. } | Probe::Missing(_) => {
                unreachable!("probe with add and without update")
            }
        };
        let value = self
            .table
            .get(key)
            .expect("entry must exist immediately after lookup");
        Lookup { found, value }
    }

    /// Adds `item` if no equal item is present. Keeps the first stored
    /// item on duplicates.
    pub fn add(&mut self, item: T) -> bool {
        let added = self.add_silently(item);
        if added {
            self.events.changed();
        }
        added
    }

    /// Adds every item; returns how many were new.
    pub fn add_all<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let mut added = 0;
        for item in items {
            if self.add_silently(item) {
                added += 1;
            }
        }
        if added > 0 {
            self.events.changed();
        }
        added
    }

    /// Replaces the stored item equal to `item`; returns the old one.
    /// Never inserts.
    pub fn update(&mut self, item: T) -> Option<T> {
        match self.table.search_or_update_or_add(item, false, true) {
            Probe::Updated { key, old } => {
                self.notify_updated(key, &old);
                self.events.changed();
                Some(old)
            }
            _ => None,
        }
    }

    /// Replaces the stored item equal to `item`, or inserts `item`.
    /// Returns the replaced item, if there was one.
    pub fn update_or_add(&mut self, item: T) -> Option<T> {
        let old = match self.table.search_or_update_or_add(item, true, true) {
            Probe::Updated { key, old } => {
                self.notify_updated(key, &old);
                Some(old)
            }
            Probe::Added { key } => {
                self.notify_added(key);
                None
            }
            Probe::Found { .. } | Probe::Missing(_) => {
                unreachable!("probe with add and update")
            }
        };
        self.events.changed();
        old
    }

    pub fn remove(&mut self, item: &T) -> bool {
        self.take(item).is_some()
    }

    /// Removes the stored item equal to `item` and hands it back.
    pub fn take(&mut self, item: &T) -> Option<T> {
        let removed = self.remove_silently(item)?;
        self.events.changed();
        Some(removed)
    }

    /// Removes every listed item that is present; absent items are skipped.
    /// Returns how many were removed.
    pub fn remove_all<'a, I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut removed = 0;
        for item in items {
            if self.is_empty() {
                break;
            }
            if self.remove_silently(item).is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            self.events.changed();
        }
        removed
    }

    /// Keeps only the items for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let doomed: Vec<EntryKey> = self
            .table
            .keys()
            .filter(|(_, item)| !keep(*item))
            .map(|(k, _)| k)
            .collect();
        self.remove_keys(doomed)
    }

    /// Removes everything and returns to the configured initial capacity.
    pub fn clear(&mut self) {
        let count = self.table.len();
        self.table.clear();
        self.last_chosen.set(0);
        if count > 0 {
            self.events.cleared(count);
            self.events.changed();
        }
    }

    /// Items in slot-major, then chain order. Unrelated to insertion order.
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter {
            keys: self.table.keys(),
            remaining: self.table.len(),
        }
    }

    /// A traversal that does not borrow the set and fails once the set changes.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            stamp: self.table.stamp(),
            pos: Position::default(),
        }
    }

    /// Some stored item. Successive calls rotate through occupied slots.
    pub fn choose(&self) -> Result<&T, SetError> {
        if self.is_empty() {
            return Err(SetError::NoSuchItem);
        }
        let slots = self.table.slot_count();
        let mut slot = self.last_chosen.get() % slots;
        for _ in 0..slots {
            slot = (slot + 1) % slots;
            if let Some(item) = self.table.head(slot) {
                self.last_chosen.set(slot);
                return Ok(item);
            }
        }
        Err(SetError::NoSuchItem)
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub(crate) fn add_silently(&mut self, item: T) -> bool {
        match self.table.search_or_update_or_add(item, true, false) {
            Probe::Added { key } => {
                self.notify_added(key);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn remove_silently(&mut self, item: &T) -> Option<T> {
        let removed = self.table.remove(item)?;
        self.events.removed(&removed);
        Some(removed)
    }

    /// Removes the given entries with one trailing change signal.
    pub(crate) fn remove_keys(&mut self, keys: Vec<EntryKey>) -> usize {
        let mut removed = 0;
        for key in keys {
            if let Some(item) = self.table.remove_key(key) {
                self.events.removed(&item);
                removed += 1;
            }
        }
        if removed > 0 {
            self.events.changed();
        }
        removed
    }

    fn notify_added(&mut self, key: EntryKey) {
        if self.events.is_active() {
            if let Some(item) = self.table.get(key) {
                self.events.added(item);
            }
        }
    }

    fn notify_updated(&mut self, key: EntryKey, old: &T) {
        if self.events.is_active() {
            if let Some(new) = self.table.get(key) {
                self.events.updated(new, old);
            }
        }
    }
}

/// Detached, restartable traversal guarded by the set's structural stamp.
///
/// ```
/// use linear_hash_set::{LinearHashSet, SetError};
///
/// let mut set: LinearHashSet<u32> = (1..=3).collect();
/// let mut cursor = set.cursor();
/// assert!(cursor.next(&set).unwrap().is_some());
/// set.add(4);
/// assert!(matches!(cursor.next(&set), Err(SetError::CollectionModified { .. })));
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    stamp: u64,
    pos: Position,
}

impl Cursor {
    /// Next item, `Ok(None)` at the end, or `CollectionModified` if `set`
    /// changed since this cursor was created or last reset.
    pub fn next<'a, T, C>(&mut self, set: &'a LinearHashSet<T, C>) -> Result<Option<&'a T>, SetError>
    where
        C: Comparer<T>,
    {
        let found = set.table.stamp();
        if found != self.stamp {
            return Err(SetError::CollectionModified {
                expected: self.stamp,
                found,
            });
        }
        Ok(set.table.step(&mut self.pos).map(|(_, item)| item))
    }

    /// Restarts from the beginning against the set's current version.
    pub fn reset<T, C>(&mut self, set: &LinearHashSet<T, C>)
    where
        C: Comparer<T>,
    {
        self.stamp = set.table.stamp();
        self.pos = Position::default();
    }
}

/// Borrowing iterator over a [`LinearHashSet`].
pub struct Iter<'a, T, C> {
    keys: Keys<'a, T, C>,
    remaining: usize,
}

impl<'a, T, C> Iterator for Iter<'a, T, C>
where
    C: Comparer<T>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (_, item) = self.keys.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, C> ExactSizeIterator for Iter<'_, T, C> where C: Comparer<T> {}
impl<T, C> FusedIterator for Iter<'_, T, C> where C: Comparer<T> {}

impl<'a, T, C> IntoIterator for &'a LinearHashSet<T, C>
where
    C: Comparer<T>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for LinearHashSet<T>
where
    DefaultComparer: Comparer<T>,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Clones items and comparer; observers stay with the original.
impl<T, C> Clone for LinearHashSet<T, C>
where
    T: Clone,
    C: Comparer<T> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            events: EventHub::default(),
            last_chosen: Cell::new(self.last_chosen.get()),
        }
    }
}

impl<T, C> fmt::Debug for LinearHashSet<T, C>
where
    T: fmt::Debug,
    C: Comparer<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> PartialEq for LinearHashSet<T, C>
where
    C: Comparer<T>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl<T, C> Eq for LinearHashSet<T, C> where C: Comparer<T> {}

impl<T, C> Extend<T> for LinearHashSet<T, C>
where
    C: Comparer<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<T, C> FromIterator<T> for LinearHashSet<T, C>
where
    C: Comparer<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::with_comparer(C::default());
        set.add_all(iter);
        set
    }
}
