#![cfg(test)]

// Property tests for LinearHashSet kept inside the crate so they can reach
// the table internals (invariant checks, slot layout).

use crate::comparer::Comparer;
use crate::config::{HashingMode, SetConfig};
use crate::error::SetError;
use crate::linear_hash_set::LinearHashSet;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

// Pool-indexed operations so shrinking converges on small pools and short
// op lists.
#[derive(Clone, Debug)]
enum Op {
    Add(usize),
    AddAll(Vec<usize>),
    Remove(usize),
    RemoveAll(Vec<usize>),
    Update(usize),
    UpdateOrAdd(usize),
    Contains(usize),
    Choose,
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<u32>, Vec<Op>)> {
    proptest::collection::vec(any::<u32>(), 1..=40).prop_flat_map(|pool| {
        let idx = 0..pool.len();
        let op = prop_oneof![
            6 => idx.clone().prop_map(Op::Add),
            2 => proptest::collection::vec(idx.clone(), 0..12).prop_map(Op::AddAll),
            3 => idx.clone().prop_map(Op::Remove),
            1 => proptest::collection::vec(idx.clone(), 0..12).prop_map(Op::RemoveAll),
            1 => idx.clone().prop_map(Op::Update),
            1 => idx.clone().prop_map(Op::UpdateOrAdd),
            2 => idx.clone().prop_map(Op::Contains),
            1 => Just(Op::Choose),
            1 => Just(Op::Clear),
            1 => Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

/// Sends every item to one of four hash codes to stress long chains.
#[derive(Clone, Debug, Default, PartialEq)]
struct FewHashes;

impl Comparer<u32> for FewHashes {
    fn hash(&self, item: &u32) -> u32 {
        item % 4
    }
    fn equals(&self, a: &u32, b: &u32) -> bool {
        a == b
    }
}

fn run_state_machine<C: Comparer<u32>>(
    mut sut: LinearHashSet<u32, C>,
    pool: &[u32],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model: HashSet<u32> = HashSet::new();
    let initial_capacity = sut.capacity();

    for op in ops {
        let capacity_before = sut.capacity();
        let is_clear = matches!(op, Op::Clear);
        match op {
            Op::Add(i) => {
                let v = pool[i];
                prop_assert_eq!(sut.add(v), model.insert(v));
            }
            Op::AddAll(is) => {
                let vs: Vec<u32> = is.iter().map(|&i| pool[i]).collect();
                let expected = vs.iter().filter(|v| model.insert(**v)).count();
                prop_assert_eq!(sut.add_all(vs), expected);
            }
            Op::Remove(i) => {
                let v = pool[i];
                let len = sut.len();
                prop_assert_eq!(sut.remove(&v), model.remove(&v));
                prop_assert!(sut.len() <= len);
            }
            Op::RemoveAll(is) => {
                let vs: Vec<u32> = is.iter().map(|&i| pool[i]).collect();
                let expected = vs.iter().filter(|v| model.remove(*v)).count();
                prop_assert_eq!(sut.remove_all(&vs), expected);
            }
            Op::Update(i) => {
                let v = pool[i];
                prop_assert_eq!(sut.update(v), model.get(&v).copied());
            }
            Op::UpdateOrAdd(i) => {
                let v = pool[i];
                let had = !model.insert(v);
                prop_assert_eq!(sut.update_or_add(v).is_some(), had);
            }
            Op::Contains(i) => {
                let v = pool[i];
                prop_assert_eq!(sut.contains(&v), model.contains(&v));
            }
            Op::Choose => match sut.choose() {
                Ok(v) => prop_assert!(model.contains(v)),
                Err(e) => {
                    prop_assert_eq!(e, SetError::NoSuchItem);
                    prop_assert!(model.is_empty());
                }
            },
            Op::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), initial_capacity);
            }
            Op::Iterate => {
                let seen: Vec<u32> = sut.iter().copied().collect();
                let distinct: BTreeSet<u32> = seen.iter().copied().collect();
                prop_assert_eq!(seen.len(), distinct.len());
                prop_assert_eq!(distinct, model.iter().copied().collect::<BTreeSet<_>>());
            }
        }

        // Post-conditions after each op
        prop_assert!(sut.check_invariants());
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        if !is_clear {
            prop_assert!(sut.capacity() >= capacity_before);
        }
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashSet.
// - add/remove/update report presence exactly like the model.
// - Capacity never shrinks except through clear.
// - check_invariants holds after every operation.
// - Iteration yields each live item exactly once.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(LinearHashSet::new(), &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_deterministic((pool, ops) in arb_scenario()) {
        let config = SetConfig::new().with_hashing(HashingMode::Deterministic);
        run_state_machine(LinearHashSet::with_config(config).unwrap(), &pool, ops)?;
    }

    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(LinearHashSet::with_comparer(FewHashes), &pool, ops)?;
    }

    #[test]
    fn prop_growth_keeps_every_item(n in 0u32..1500, capacity in 1usize..100) {
        let mut s = LinearHashSet::with_capacity(capacity).unwrap();
        s.add_all(0..n);
        prop_assert!(s.check_invariants());
        let back: BTreeSet<u32> = s.to_vec().into_iter().collect();
        prop_assert_eq!(back, (0..n).collect::<BTreeSet<_>>());
        prop_assert!(s.len() <= (s.capacity() as f64 * s.load_factor()) as usize);
    }
}
