//! Error type shared by construction, `choose` and detached cursors.

use thiserror::Error;

/// Failures reported by [`LinearHashSet`](crate::LinearHashSet).
///
/// Most operations report their outcome through `bool`/`Option` returns;
/// only construction, [`choose`](crate::LinearHashSet::choose) and
/// [`Cursor::next`](crate::Cursor::next) can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SetError {
    #[error("load factor {0} is outside the valid range [0.1, 0.9]")]
    InvalidLoadFactor(f64),
    #[error("initial capacity must be positive, got {0}")]
    InvalidCapacity(usize),
    #[error("no such item: the set is empty")]
    NoSuchItem,
    #[error("collection modified during traversal (cursor stamp {expected}, set stamp {found})")]
    CollectionModified { expected: u64, found: u64 },
}
