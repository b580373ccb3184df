//! Equality comparers: the pair (hash, equality) that defines set membership.

use core::hash::{BuildHasher, BuildHasherDefault, Hash};
use std::collections::hash_map::DefaultHasher;

/// Hash derivation plus equality test for items of type `T`.
///
/// Items that compare equal must produce the same hash; keeping the two
/// consistent is the implementor's obligation. Two comparers that are
/// `==` must agree on every item, which is what lets set-algebra
/// operations trust another set's membership test.
pub trait Comparer<T: ?Sized>: PartialEq {
    fn hash(&self, item: &T) -> u32;
    fn equals(&self, a: &T, b: &T) -> bool;
}

/// Comparer backed by `T: Hash + Eq` and a `BuildHasher`.
///
/// The default hasher builder is unkeyed: randomization against
/// adversarial inputs comes from the per-table index multiplier, and an
/// unkeyed builder keeps two default comparers equal to each other.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DefaultComparer<S = BuildHasherDefault<DefaultHasher>> {
    hash_builder: S,
}

impl<S> DefaultComparer<S> {
    pub fn with_hasher(hash_builder: S) -> Self {
        Self { hash_builder }
    }

    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }
}

impl<T, S> Comparer<T> for DefaultComparer<S>
where
    T: ?Sized + Hash + Eq,
    S: BuildHasher + PartialEq,
{
    #[inline]
    fn hash(&self, item: &T) -> u32 {
        let h = self.hash_builder.hash_one(item);
        (h ^ (h >> 32)) as u32
    }

    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }
}
