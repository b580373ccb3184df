//! linear-hash-set: an in-memory chained hash set with randomized
//! multiplicative hashing, versioned traversal and a set-algebra API.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a set whose correctness can be checked layer by layer, from
//!   the index function up to the set-algebra fast paths.
//! - Layers:
//!   - `hash_index`: `(hash * multiplier) >> (32 - bits)` with an odd,
//!     per-table multiplier.
//!   - `ChainTable<T, C>`: slot array of `2^bits` chain heads over a
//!     slotmap arena of entries; one combined search/update/add
//!     primitive, removal, synchronous growth, clear.
//!   - `LinearHashSet<T, C>`: public item API, change notifications,
//!     iteration, detached cursors and `choose`.
//!   - `set_algebra`: union/intersect/except/symmetric-except and the
//!     subset/superset/equality/overlap predicates, choosing a fast or a
//!     generic path from the operand's advertised capabilities.
//!   - `diagnostics`: invariant checker and chain-length histogram.
//!
//! Constraints
//! - Single-threaded: `!Send` (boxed observers) and `!Sync` (the
//!   `choose` rotor is a `Cell`). Callers serialize all access.
//! - Set semantics under the configured comparer; the first stored item
//!   wins unless an update operation is used.
//! - O(1) expected search/insert/remove; growth doubles the slot count
//!   inside the insert that crosses `floor(slots * load_factor)`.
//! - Capacity never shrinks on removal. `clear` returns to the
//!   configured initial capacity.
//!
//! Table invariants (checked by `check_invariants`)
//! - `slots.len() == 2^bits`.
//! - Every entry reachable from slot `i` has `index(entry.hash) == i`.
//! - `size` equals the number of reachable entries.
//! - `resize_threshold == floor(slots.len() * load_factor)`.
//! - No two stored items are equal under the comparer.
//!
//! Chain order
//! - Inserts append at the chain tail; growth relinks by prepending onto
//!   the new chains. Order within a chain says nothing about insertion
//!   order once the table has grown, and iteration order (slot-major,
//!   then chain) is unrelated to insertion order.
//!
//! Hashing
//! - Each entry caches its comparer hash; growth recomputes only the
//!   slot index, never calls back into the comparer.
//! - `HashingMode::Randomized` draws an odd multiplier per table from
//!   the thread-local generator so colliding inputs cannot be crafted
//!   against a known index function. `HashingMode::Deterministic` fixes
//!   the multiplier for reproducible layouts.
//!
//! Versioning
//! - Every structural mutation (insert, remove, clear, growth) bumps the
//!   table stamp. `iter()` borrows the set, so the compiler already rules
//!   out mutation during it; `Cursor` does not borrow and instead fails
//!   with `SetError::CollectionModified` on the first step after a change.
//!
//! Notifications
//! - Observers registered with `observe` get item-level hooks plus one
//!   aggregate `on_changed` per mutating call. Bulk and set-algebra
//!   mutators never signal `on_changed` per item.
//!
//! Notes and non-goals
//! - No open addressing, no shrink-on-removal, no persistence.
//! - An operand cannot alias the set it is applied to (borrowing rules
//!   forbid `a.except_with(&a)`); apply to a clone instead.

mod chain_table;
pub mod comparer;
pub mod config;
mod diagnostics;
pub mod error;
pub mod events;
mod hash_index;
pub mod linear_hash_set;
mod linear_hash_set_proptest;
pub mod set_algebra;

// Public surface
pub use comparer::{Comparer, DefaultComparer};
pub use config::{HashingMode, SetConfig, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};
pub use diagnostics::TableStats;
pub use error::SetError;
pub use events::SetObserver;
pub use hash_index::DETERMINISTIC_MULTIPLIER;
pub use linear_hash_set::{Cursor, Iter, LinearHashSet, Lookup};
pub use set_algebra::SetOperand;
