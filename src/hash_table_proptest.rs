#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can check
// slot-level invariants that the public API does not expose.

use crate::config::{CountPolicy, TableConfig};
use crate::hash_table::HashTable;
use hashbrown::HashMap;
use proptest::prelude::*;

// Pool-indexed operations: indices shrink to earlier keys, the pool shrinks,
// and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, u8),
    Delete(usize),
    Search(usize),
    Probe(String),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,6}", 1..=40).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<u8>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            3 => idx.clone().prop_map(OpI::Delete),
            2 => idx.clone().prop_map(OpI::Search),
            1 => "[a-z]{0,6}".prop_map(OpI::Probe),
        ];
        proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Small bases make growth, shrinking and tombstone build-up frequent.
fn arb_config() -> impl Strategy<Value = TableConfig> {
    (2usize..=12, 0usize..=2).prop_map(|(base, extra)| {
        TableConfig::new()
            .with_min_base_size(base)
            .with_initial_base_size(base << extra)
    })
}

// Property: state-machine equivalence against hashbrown::HashMap.
// Invariants exercised across random operation sequences:
// - `search` agrees with the model for pooled and arbitrary keys.
// - `insert` of an existing key updates in place and leaves `len` unchanged.
// - `delete` reports removal exactly when the model held the key.
// - After every op: capacity is prime and equals next_prime(base_size),
//   base_size never drops below the floor, count equals occupied slots, and
//   occupied keys are unique.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), config in arb_config()) {
        let mut sut = HashTable::with_config(config).unwrap();
        let mut model: HashMap<String, String> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = &pool[i];
                    let v = v.to_string();
                    sut.insert(k, &v).unwrap();
                    model.insert(k.clone(), v);
                }
                OpI::Delete(i) => {
                    let k = &pool[i];
                    let removed = sut.delete(k).unwrap();
                    prop_assert_eq!(removed, model.remove(k).is_some());
                }
                OpI::Search(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.search(k), model.get(k).map(String::as_str));
                }
                OpI::Probe(k) => {
                    prop_assert_eq!(sut.search(&k), model.get(&k).map(String::as_str));
                    prop_assert_eq!(sut.contains_key(&k), model.contains_key(&k));
                }
            }
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            sut.assert_invariants();
        }

        for (k, v) in &model {
            prop_assert_eq!(sut.search(k), Some(v.as_str()));
        }
    }
}

// Property: under the legacy policy the count may drift low on misses, but
// lookups stay correct and a resize never loses a live entry.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_legacy_count_keeps_lookups_correct((pool, ops) in arb_scenario()) {
        let config = TableConfig::new()
            .with_initial_base_size(4)
            .with_min_base_size(4)
            .with_count_policy(CountPolicy::Legacy);
        let mut sut = HashTable::with_config(config).unwrap();
        let mut model: HashMap<String, String> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let v = v.to_string();
                    sut.insert(&pool[i], &v).unwrap();
                    model.insert(pool[i].clone(), v);
                }
                OpI::Delete(i) => {
                    let removed = sut.delete(&pool[i]).unwrap();
                    prop_assert_eq!(removed, model.remove(&pool[i]).is_some());
                }
                OpI::Search(i) => {
                    prop_assert_eq!(sut.search(&pool[i]), model.get(&pool[i]).map(String::as_str));
                }
                OpI::Probe(k) => {
                    prop_assert_eq!(sut.search(&k), model.get(&k).map(String::as_str));
                }
            }
            prop_assert!(sut.len() <= model.len());
            sut.assert_invariants();
        }
    }
}
