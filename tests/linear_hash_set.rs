// LinearHashSet integration suite.
//
// Each test documents the behavior it verifies. Core properties exercised:
// - Set semantics: duplicates rejected, first stored item kept.
// - Growth: synchronous doubling when size crosses floor(slots * 0.66),
//   never losing items.
// - Versioning: detached cursors fail after any structural change.
// - Diagnostics: invariants hold after every public operation.
use linear_hash_set::{
    Comparer, HashingMode, LinearHashSet, SetConfig, SetError, SetObserver, DEFAULT_LOAD_FACTOR,
};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

fn deterministic() -> SetConfig {
    SetConfig::new().with_hashing(HashingMode::Deterministic)
}

// Test: the documented growth scenario.
// Assumes: capacity 16 and load factor 0.66 give threshold 10.
// Verifies: items 1..=10 fit without growth; the 11th triggers exactly one
// doubling; all 11 items stay retrievable.
#[test]
fn eleventh_insert_grows_once() {
    let mut s: LinearHashSet<u32> = LinearHashSet::with_config(deterministic()).unwrap();
    assert_eq!(s.stats().resize_threshold, 10);
    for v in 1..=10 {
        s.add(v);
        assert_eq!(s.capacity(), 16);
    }
    s.add(11);
    assert_eq!(s.capacity(), 32);
    assert_eq!(s.stats().bits, 5);
    for v in 1..=11 {
        assert!(s.contains(&v), "lost {v} across growth");
    }
    assert!(s.check_invariants());
}

// Test: growth never loses entries.
// Verifies: N items read back through to_vec() for N below, at and far
// above the initial threshold.
#[test]
fn read_back_after_growth() {
    for n in [1u32, 16, 17, 1000] {
        let mut s = LinearHashSet::with_capacity(16).unwrap();
        s.add_all(0..n);
        let back: BTreeSet<u32> = s.to_vec().into_iter().collect();
        assert_eq!(back, (0..n).collect::<BTreeSet<_>>(), "n = {n}");
        assert_eq!(s.len(), n as usize);
        assert!(s.check_invariants());
    }
}

// Test: duplicate add and absent remove.
// Verifies: second add returns false and leaves size alone; removing an
// absent item reports not-found without changing size.
#[test]
fn duplicate_add_and_absent_remove() {
    let mut s: LinearHashSet<String> = LinearHashSet::new();
    assert!(s.add("x".into()));
    assert!(!s.add("x".into()));
    assert_eq!(s.len(), 1);
    assert!(!s.remove(&"y".to_string()));
    assert_eq!(s.take(&"y".to_string()), None);
    assert_eq!(s.len(), 1);
    assert!(s.check_invariants());
}

// Test: canonical stored instance.
// Assumes: a comparer that ignores part of the item.
// Verifies: add keeps the first instance, update_or_add replaces it.
#[test]
fn first_instance_wins_until_updated() {
    #[derive(Clone, Debug, PartialEq)]
    struct Name;
    impl Comparer<(String, u32)> for Name {
        fn hash(&self, item: &(String, u32)) -> u32 {
            item.0.len() as u32
        }
        fn equals(&self, a: &(String, u32), b: &(String, u32)) -> bool {
            a.0 == b.0
        }
    }
    let mut s = LinearHashSet::with_comparer(Name);
    s.add(("ann".to_string(), 1));
    s.add(("ann".to_string(), 2));
    assert_eq!(s.find(&("ann".to_string(), 0)).map(|e| e.1), Some(1));
    let old = s.update_or_add(("ann".to_string(), 3));
    assert_eq!(old.map(|e| e.1), Some(1));
    assert_eq!(s.find(&("ann".to_string(), 0)).map(|e| e.1), Some(3));
    assert_eq!(s.len(), 1);
}

// Test: enumeration guard.
// Verifies: adding during a cursor traversal fails the next step with
// CollectionModified; the set itself is unaffected.
#[test]
fn cursor_fails_after_concurrent_add() {
    let mut s: LinearHashSet<u32> = (0..10).collect();
    let mut cursor = s.cursor();
    let first = cursor.next(&s).unwrap().copied();
    assert!(first.is_some());
    assert!(s.add(100));
    match cursor.next(&s) {
        Err(SetError::CollectionModified { expected, found }) => assert!(found > expected),
        other => panic!("expected CollectionModified, got {:?}", other),
    }
    assert_eq!(s.len(), 11);
    assert!(s.check_invariants());
}

// Test: remove and clear also invalidate cursors; reset restarts cleanly.
#[test]
fn cursor_fails_after_remove_and_clear() {
    let mut s: LinearHashSet<u32> = (0..10).collect();
    let mut cursor = s.cursor();
    s.remove(&3);
    assert!(cursor.next(&s).is_err());
    cursor.reset(&s);
    assert!(cursor.next(&s).is_ok());
    s.clear();
    assert!(cursor.next(&s).is_err());
    cursor.reset(&s);
    assert_eq!(cursor.next(&s), Ok(None));
}

// Test: choose on an empty set reports NoSuchItem, and a member otherwise.
#[test]
fn choose_contract() {
    let mut s: LinearHashSet<u32> = LinearHashSet::new();
    assert_eq!(s.choose(), Err(SetError::NoSuchItem));
    s.add(42);
    assert_eq!(s.choose(), Ok(&42));
    assert_eq!(s.choose(), Ok(&42));
    s.remove(&42);
    assert_eq!(s.choose(), Err(SetError::NoSuchItem));
}

// Test: clear discards growth history.
#[test]
fn clear_returns_to_configured_capacity() {
    let mut s = LinearHashSet::with_config(deterministic().with_capacity(64)).unwrap();
    s.add_all(0..500u32);
    assert!(s.capacity() > 64);
    s.clear();
    assert_eq!(s.capacity(), 64);
    assert_eq!(s.stats().resize_threshold, (64.0 * DEFAULT_LOAD_FACTOR) as usize);
    s.add(1);
    assert!(s.contains(&1));
}

// Test: configuration validation happens before any allocation.
#[test]
fn invalid_configuration() {
    assert!(matches!(
        LinearHashSet::<u32>::with_config(SetConfig::new().with_load_factor(0.0)),
        Err(SetError::InvalidLoadFactor(_))
    ));
    assert!(matches!(
        LinearHashSet::<u32>::with_capacity(0),
        Err(SetError::InvalidCapacity(0))
    ));
    let s = LinearHashSet::<u32>::with_config(SetConfig::new().with_load_factor(0.9)).unwrap();
    assert_eq!(s.load_factor(), 0.9);
}

// Test: randomized tables still agree on membership.
// Assumes: two tables with independently drawn multipliers.
// Verifies: layout may differ, set equality and membership do not.
#[test]
fn randomized_tables_agree() {
    let a: LinearHashSet<u32> = (0..200).collect();
    let b: LinearHashSet<u32> = (0..200).rev().collect();
    assert_eq!(a, b);
    assert!(a.iter().all(|v| b.contains(v)));
}

// Test: deterministic mode reproduces iteration order.
#[test]
fn deterministic_layout_is_reproducible() {
    let mut a = LinearHashSet::with_config(deterministic()).unwrap();
    let mut b = LinearHashSet::with_config(deterministic()).unwrap();
    a.add_all(0..300u32);
    b.add_all(0..300u32);
    assert_eq!(a.to_vec(), b.to_vec());
    assert_eq!(a.bucket_cost_distribution(), b.bucket_cost_distribution());
}

#[derive(Debug, PartialEq)]
enum Note {
    Added(u32),
    Removed(u32),
    Cleared(usize),
    Changed,
}

struct Journal(Rc<RefCell<Vec<Note>>>);

impl SetObserver<u32> for Journal {
    fn on_added(&mut self, item: &u32) {
        self.0.borrow_mut().push(Note::Added(*item));
    }
    fn on_removed(&mut self, item: &u32) {
        self.0.borrow_mut().push(Note::Removed(*item));
    }
    fn on_cleared(&mut self, count: usize) {
        self.0.borrow_mut().push(Note::Cleared(count));
    }
    fn on_changed(&mut self) {
        self.0.borrow_mut().push(Note::Changed);
    }
}

// Test: notification batching.
// Verifies: bulk and set-algebra mutators raise one item event per
// affected item and one trailing Changed; no-op calls raise nothing.
#[test]
fn notifications_are_batched() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut s: LinearHashSet<u32> = LinearHashSet::new();
    s.observe(Journal(log.clone()));

    s.add_all([1, 2]);
    assert_eq!(
        log.borrow().as_slice(),
        &[Note::Added(1), Note::Added(2), Note::Changed]
    );
    log.borrow_mut().clear();

    s.union_with(&vec![2u32, 3, 3]);
    assert_eq!(log.borrow().as_slice(), &[Note::Added(3), Note::Changed]);
    log.borrow_mut().clear();

    s.except_with(&vec![7u32, 8]);
    assert!(log.borrow().is_empty());

    s.except_with(&vec![1u32]);
    assert_eq!(log.borrow().as_slice(), &[Note::Removed(1), Note::Changed]);
    log.borrow_mut().clear();

    s.clear();
    assert_eq!(log.borrow().as_slice(), &[Note::Cleared(2), Note::Changed]);
}
