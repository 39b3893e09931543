// HashTable property tests against the public API.
//
// Property 1: round-trip. After inserting every pair (later duplicates
//  overwrite earlier ones), each key maps to its last value and len()
//  equals the number of distinct keys.
//
// Property 2: delete/search parity across growth and shrink.
//  - Model: std HashMap.
//  - Operations: insert, delete, search on a pool of keys large enough to
//    push the table through several resizes.
//  - Invariant: search(k) == model.get(k) for every pooled key after every
//    op; capacity == next_prime(base_size); base_size >= the floor.
use prime_probe_table::{is_prime, next_prime, HashTable, TableConfig};
use proptest::prelude::*;
use std::collections::HashMap;

// Property 1: round-trip with overwrite.
proptest! {
    #[test]
    fn prop_round_trip(pairs in proptest::collection::vec(("[ -~]{0,12}", "[ -~]{0,12}"), 0..300)) {
        let mut t = HashTable::new();
        let mut model = HashMap::new();
        for (k, v) in &pairs {
            t.insert(k, v).unwrap();
            model.insert(k.clone(), v.clone());
        }
        prop_assert_eq!(t.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(t.search(k), Some(v.as_str()));
        }
    }
}

// Property 2: delete/search parity through resizes.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_resize_parity(
        pool_size in 1usize..400,
        ops in proptest::collection::vec((0u8..=2u8, 0usize..400usize), 1..600),
    ) {
        let floor = 8;
        let mut t = HashTable::with_config(
            TableConfig::new().with_initial_base_size(floor).with_min_base_size(floor),
        )
        .unwrap();
        let mut model: HashMap<String, String> = HashMap::new();

        for (op, raw) in ops {
            let key = format!("key-{}", raw % pool_size);
            match op {
                0 => {
                    let value = format!("{raw}");
                    t.insert(&key, &value).unwrap();
                    model.insert(key.clone(), value);
                }
                1 => {
                    let removed = t.delete(&key).unwrap();
                    prop_assert_eq!(removed, model.remove(&key).is_some());
                }
                _ => {
                    prop_assert_eq!(t.search(&key), model.get(&key).map(String::as_str));
                }
            }
            prop_assert_eq!(t.len(), model.len());
            prop_assert!(t.base_size() >= floor);
            prop_assert!(is_prime(t.capacity()).is_prime());
            prop_assert_eq!(t.capacity(), next_prime(t.base_size()));
        }

        for i in 0..pool_size {
            let key = format!("key-{i}");
            prop_assert_eq!(t.search(&key), model.get(&key).map(String::as_str));
        }
    }
}
