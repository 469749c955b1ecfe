#![cfg(test)]

// Property tests for Set and Hashtable kept inside the crate so one
// state machine can drive every container shape.

use crate::error::InsertError;
use crate::hashtable::Hashtable;
use crate::set::Set;
use crate::test_support::ConstBuildHasher;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::{BTreeSet, HashMap};
use std::hash::BuildHasher;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Find(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            idx.clone().prop_map(OpI::Find),
            prop_oneof![contains_pool, "[a-z]{0,5}".prop_map(|s| s)].prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// The surface shared by Set and Hashtable.
trait Sut {
    fn insert(&mut self, key: &str, v: i32) -> Result<(), InsertError>;
    fn find(&self, key: &str) -> Option<&i32>;
    fn find_mut(&mut self, key: &str) -> Option<&mut i32>;
    fn contains_key(&self, key: &str) -> bool;
    fn keys(&self) -> Vec<String>;
    fn len(&self) -> usize;
}

impl Sut for Set<i32> {
    fn insert(&mut self, key: &str, v: i32) -> Result<(), InsertError> {
        Set::insert(self, key, v)
    }
    fn find(&self, key: &str) -> Option<&i32> {
        Set::find(self, key)
    }
    fn find_mut(&mut self, key: &str) -> Option<&mut i32> {
        Set::find_mut(self, key)
    }
    fn contains_key(&self, key: &str) -> bool {
        Set::contains_key(self, key)
    }
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_string()).collect()
    }
    fn len(&self) -> usize {
        Set::len(self)
    }
}

impl<S: BuildHasher> Sut for Hashtable<i32, S> {
    fn insert(&mut self, key: &str, v: i32) -> Result<(), InsertError> {
        Hashtable::insert(self, key, v)
    }
    fn find(&self, key: &str) -> Option<&i32> {
        Hashtable::find(self, key)
    }
    fn find_mut(&mut self, key: &str) -> Option<&mut i32> {
        Hashtable::find_mut(self, key)
    }
    fn contains_key(&self, key: &str) -> bool {
        Hashtable::contains_key(self, key)
    }
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_string()).collect()
    }
    fn len(&self) -> usize {
        Hashtable::len(self)
    }
}

// State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - Duplicate keys are rejected and the stored value is left untouched.
// - `find` returns exactly the value first inserted (plus in-place mutations).
// - `contains_key` parity with the model for pooled and fresh keys.
// - Iteration yields each live key exactly once; key set equals the model's.
// - `len` parity with the model after each op.
fn run_scenario<C: Sut>(
    sut: &mut C,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();
    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = &pool[i];
                let already = model.contains_key(k);
                match sut.insert(k, v) {
                    Ok(()) => {
                        prop_assert!(!already, "insert must fail on duplicate");
                        model.insert(k.clone(), v);
                    }
                    Err(InsertError::DuplicateKey) => {
                        prop_assert!(already, "duplicate error only when key exists");
                        prop_assert_eq!(sut.find(k), model.get(k));
                    }
                    Err(InsertError::AllocFailed) => {
                        // Allocation failure is covered by tests/alloc_failure.rs.
                        prop_assert!(false, "unexpected allocation failure");
                    }
                }
            }
            OpI::Find(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.find(k), model.get(k));
            }
            OpI::Contains(s) => {
                prop_assert_eq!(sut.contains_key(&s), model.contains_key(&s));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(v) = sut.find_mut(k) {
                    *v = v.saturating_add(d);
                    let mv = model.get_mut(k).expect("present in model");
                    *mv = mv.saturating_add(d);
                } else {
                    prop_assert!(!model.contains_key(k));
                }
            }
            OpI::Iterate => {
                let keys = sut.keys();
                let s_keys: BTreeSet<_> = keys.iter().cloned().collect();
                prop_assert_eq!(s_keys.len(), keys.len(), "each key visited once");
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(s_keys, m_keys);
            }
        }
        prop_assert_eq!(sut.len(), model.len());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_set_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: Set<i32> = Set::new();
        run_scenario(&mut sut, &pool, ops)?;
    }

    #[test]
    fn prop_hashtable_state_machine((pool, ops) in arb_scenario(), nslots in 1usize..=16) {
        let mut sut: Hashtable<i32> = Hashtable::new(nslots).unwrap();
        run_scenario(&mut sut, &pool, ops)?;
        prop_assert_eq!(sut.slot_count(), nslots);
    }

    #[test]
    fn prop_hashtable_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let mut sut: Hashtable<i32, ConstBuildHasher> =
            Hashtable::with_hasher(8, ConstBuildHasher).unwrap();
        run_scenario(&mut sut, &pool, ops)?;
        prop_assert!((1..8).all(|i| sut.slot(i).is_some_and(Set::is_empty)));
    }

    /// Same key, same slot, for the whole process.
    #[test]
    fn prop_slot_index_is_stable(key in "\\PC{0,12}", nslots in 1usize..=64) {
        let ht: Hashtable<i32> = Hashtable::new(nslots).unwrap();
        let first = ht.slot_index(&key);
        prop_assert!(first < nslots);
        prop_assert_eq!(ht.slot_index(&key), first);
        let other: Hashtable<i32> = Hashtable::new(nslots).unwrap();
        prop_assert_eq!(other.slot_index(&key), first);
    }
}
