#![cfg(test)]

// Property tests for ChainedMap kept inside the crate so they can check
// bucket placement directly.

use crate::chained_map::ChainedMap;
use crate::hashing::{bucket_of, fnv1a};
use crate::MAX_LOAD_FACTOR;
use hashbrown::HashMap;
use proptest::prelude::*;
use std::collections::BTreeSet;

// Pool-indexed operations: indices shrink to earlier keys, the pool and the
// op list shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Get(usize),
    Pop(usize),
    Contains(String),
    Clear,
    Copy,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<OpI>)> {
    (1usize..=6, proptest::collection::vec("[a-z]{0,6}", 1..=24)).prop_flat_map(|(cap, pool)| {
        let idx = proptest::sample::select((0..pool.len()).collect::<Vec<usize>>());
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => idx.clone().prop_map(OpI::Get),
            2 => idx.clone().prop_map(OpI::Pop),
            1 => "[a-z]{0,6}".prop_map(OpI::Contains),
            1 => Just(OpI::Clear),
            1 => Just(OpI::Copy),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (cap, pool.clone(), ops))
    })
}

// Property: state-machine equivalence against hashbrown::HashMap.
// Invariants exercised after every operation:
// - `put` returns the model's previous value; `get`/`pop` agree with it,
//   including stored values of -1.
// - `len` parity; load factor stays at or below the threshold after a put.
// - Every key is reachable from bucket `fnv1a(key) mod capacity`.
// - A copy taken mid-sequence is unaffected by later mutation.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((cap, pool, ops) in arb_scenario()) {
        let mut sut = ChainedMap::new(cap).unwrap();
        let mut model: HashMap<String, i32> = HashMap::new();
        let mut snapshot: Option<(ChainedMap, HashMap<String, i32>)> = None;

        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = &pool[i];
                    let prev = sut.put(k, v).unwrap();
                    prop_assert_eq!(prev, model.insert(k.clone(), v));
                    prop_assert!(sut.load_factor() <= MAX_LOAD_FACTOR);
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k), model.get(k).copied());
                }
                OpI::Pop(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.pop(k), model.remove(k));
                    prop_assert!(!sut.contains(k));
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(sut.contains(&s), model.contains_key(&s));
                }
                OpI::Clear => {
                    let cap_before = sut.capacity();
                    sut.clear();
                    model.clear();
                    prop_assert_eq!(sut.capacity(), cap_before);
                }
                OpI::Copy => {
                    snapshot = Some((sut.copy(), model.clone()));
                }
                OpI::Iterate => {
                    let keys: Vec<&str> = sut.iter().map(|(k, _)| k).collect();
                    let unique: BTreeSet<&str> = keys.iter().copied().collect();
                    prop_assert_eq!(keys.len(), unique.len(), "key yielded twice");
                    let m_keys: BTreeSet<&str> = model.keys().map(String::as_str).collect();
                    prop_assert_eq!(unique, m_keys);
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());

            // Iteration is bucket-major, so bucket indices never decrease.
            let buckets: Vec<usize> = sut
                .iter()
                .map(|(k, _)| bucket_of(fnv1a(k), sut.capacity()))
                .collect();
            prop_assert!(buckets.windows(2).all(|w| w[0] <= w[1]));

            if let Some((copy, frozen)) = &snapshot {
                prop_assert_eq!(copy.len(), frozen.len());
                for (k, v) in frozen {
                    prop_assert_eq!(copy.get(k), Some(*v));
                }
            }
        }
    }
}

// Property: growth preserves every entry, whatever the starting capacity
// and insertion order.
proptest! {
    #[test]
    fn prop_growth_preserves_entries(
        cap in 1usize..=8,
        entries in proptest::collection::hash_map("[a-z0-9]{1,8}", any::<i32>(), 0..200),
    ) {
        let mut sut = ChainedMap::new(cap).unwrap();
        for (k, v) in &entries {
            prop_assert_eq!(sut.put(k, *v).unwrap(), None);
        }
        prop_assert_eq!(sut.len(), entries.len());
        prop_assert!(sut.capacity() >= cap);
        // Capacity is the starting size times a power of two.
        let ratio = sut.capacity() / cap;
        prop_assert_eq!(sut.capacity() % cap, 0);
        prop_assert!(ratio.is_power_of_two());
        for (k, v) in &entries {
            prop_assert_eq!(sut.get(k), Some(*v));
        }
    }
}
