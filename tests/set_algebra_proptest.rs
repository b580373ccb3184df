use linear_hash_set::LinearHashSet;
use proptest::prelude::*;
use std::collections::BTreeSet;

// Compare every set-algebra operation against BTreeSet, through both the
// fast path (LinearHashSet operand) and the generic path (Vec operand with
// duplicates).
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_algebra_matches_reference(
        a in proptest::collection::vec(0u16..64, 0..40),
        b in proptest::collection::vec(0u16..64, 0..40),
    ) {
        let ra: BTreeSet<u16> = a.iter().copied().collect();
        let rb: BTreeSet<u16> = b.iter().copied().collect();
        let sa: LinearHashSet<u16> = a.iter().copied().collect();
        let sb: LinearHashSet<u16> = b.iter().copied().collect();

        let check = |s: &LinearHashSet<u16>, r: BTreeSet<u16>| -> Result<(), TestCaseError> {
            prop_assert!(s.check_invariants());
            prop_assert_eq!(s.iter().copied().collect::<BTreeSet<_>>(), r);
            Ok(())
        };

        for fast in [true, false] {
            let mut u = sa.clone();
            let mut i = sa.clone();
            let mut d = sa.clone();
            let mut x = sa.clone();
            if fast {
                u.union_with(&sb);
                i.intersect_with(&sb);
                d.except_with(&sb);
                x.symmetric_except_with(&sb);
            } else {
                u.union_with(&b);
                i.intersect_with(&b);
                d.except_with(&b);
                x.symmetric_except_with(&b);
            }
            check(&u, ra.union(&rb).copied().collect())?;
            check(&i, ra.intersection(&rb).copied().collect())?;
            check(&d, ra.difference(&rb).copied().collect())?;
            check(&x, ra.symmetric_difference(&rb).copied().collect())?;
        }

        for (subset, proper_subset, superset, proper_superset, equals, overlaps) in [
            (
                sa.is_subset_of(&sb),
                sa.is_proper_subset_of(&sb),
                sa.is_superset_of(&sb),
                sa.is_proper_superset_of(&sb),
                sa.set_equals(&sb),
                sa.overlaps(&sb),
            ),
            (
                sa.is_subset_of(&b),
                sa.is_proper_subset_of(&b),
                sa.is_superset_of(&b),
                sa.is_proper_superset_of(&b),
                sa.set_equals(&b),
                sa.overlaps(&b),
            ),
        ] {
            prop_assert_eq!(subset, ra.is_subset(&rb));
            prop_assert_eq!(proper_subset, ra.is_subset(&rb) && ra.len() < rb.len());
            prop_assert_eq!(superset, ra.is_superset(&rb));
            prop_assert_eq!(proper_superset, ra.is_superset(&rb) && ra.len() > rb.len());
            prop_assert_eq!(equals, ra == rb);
            prop_assert_eq!(overlaps, !ra.is_disjoint(&rb));
        }
    }
}
