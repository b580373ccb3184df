//! Invariant checking and chain-length statistics.
//!
//! Used by tests and for tuning hash functions; nothing here is part of
//! the functional contract of the set.

use crate::chain_table::threshold;
use crate::comparer::Comparer;
use crate::linear_hash_set::LinearHashSet;

/// Snapshot of table shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStats {
    /// Number of live items
    pub size: usize,
    /// Number of slots (`2^bits`)
    pub slots: usize,
    /// Slots whose chain is non-empty
    pub occupied_slots: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    pub bits: u32,
    /// Size above which the next insert grows the table
    pub resize_threshold: usize,
    /// size / slots
    pub fill: f64,
}

impl<T, C> LinearHashSet<T, C>
where
    C: Comparer<T>,
{
    /// Re-derives every structural invariant from live state. Each
    /// violation is logged at error level; scanning continues past the
    /// first one. Returns `true` when the table is consistent.
    pub fn check_invariants(&self) -> bool {
        let t = &self.table;
        let mut ok = true;

        if t.slots.len() != t.index.slot_count() {
            tracing::error!(
                slots = t.slots.len(),
                bits = t.index.bits(),
                "slot array length is not 2^bits"
            );
            ok = false;
        }

        let expected_threshold = threshold(t.slots.len(), t.load_factor);
        if t.resize_threshold != expected_threshold {
            tracing::error!(
                threshold = t.resize_threshold,
                expected = expected_threshold,
                "resize threshold out of sync with capacity"
            );
            ok = false;
        }

        // A chain longer than the arena means a cycle.
        let limit = t.entries.len();
        let mut reachable = 0usize;
        for (slot, head) in t.slots.iter().enumerate() {
            let mut walked = 0usize;
            let mut cursor = *head;
            while let Some(k) = cursor {
                let Some(entry) = t.entries.get(k) else {
                    tracing::error!(slot, "chain links to a freed entry");
                    ok = false;
                    break;
                };
                walked += 1;
                if walked > limit {
                    tracing::error!(slot, "chain does not terminate");
                    ok = false;
                    break;
                }
                let home = t.index.slot(entry.hash);
                if home != slot {
                    tracing::error!(slot, home, hash = entry.hash, "entry stored in the wrong slot");
                    ok = false;
                }
                if t.comparer.hash(&entry.item) != entry.hash {
                    tracing::error!(slot, hash = entry.hash, "cached hash differs from comparer hash");
                    ok = false;
                }
                let mut later = entry.next;
                while let Some(l) = later {
                    let Some(other) = t.entries.get(l) else { break };
                    if t.comparer.equals(&entry.item, &other.item) {
                        tracing::error!(slot, "duplicate item in chain");
                        ok = false;
                        break;
                    }
                    later = other.next;
                }
                cursor = entry.next;
            }
            reachable += walked;
        }

        if reachable != t.size {
            tracing::error!(size = t.size, reachable, "size does not match reachable entries");
            ok = false;
        }
        if t.entries.len() != t.size {
            tracing::error!(
                size = t.size,
                stored = t.entries.len(),
                "arena holds entries not accounted for by size"
            );
            ok = false;
        }
        ok
    }

    /// Maps chain length to the number of slots whose chain has that length.
    /// Empty slots are counted under length 0.
    pub fn bucket_cost_distribution(&self) -> hashbrown::HashMap<usize, usize> {
        let mut dist = hashbrown::HashMap::new();
        for slot in 0..self.table.slot_count() {
            *dist.entry(self.table.chain_len(slot)).or_insert(0) += 1;
        }
        dist
    }

    pub fn stats(&self) -> TableStats {
        let t = &self.table;
        let lengths = (0..t.slot_count()).map(|slot| t.chain_len(slot));
        let (occupied_slots, longest_chain) =
            lengths.fold((0, 0), |(occ, max), n| (occ + (n > 0) as usize, max.max(n)));
        TableStats {
            size: t.size,
            slots: t.slot_count(),
            occupied_slots,
            longest_chain,
            bits: t.index.bits(),
            resize_threshold: t.resize_threshold,
            fill: t.size as f64 / t.slot_count() as f64,
        }
    }
}
