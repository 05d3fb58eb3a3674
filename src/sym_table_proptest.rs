#![cfg(test)]

// Property tests for SymTable kept inside the crate so they can call the
// crate-private chain invariant check after every step.

use crate::sym_table::{InsertError, SymTable};
use proptest::prelude::*;
use std::cell::Cell;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, usize),
    Insert(usize, usize),
    Remove(usize),
    Take(usize),
    Get(usize),
    Contains(String),
    MapAdd(i32),
    Iterate,
    Clear,
}

const VALUES: usize = 6;

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-c]{0,3}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let val = 0..VALUES;
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            4 => (idx.clone(), val.clone()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => (idx.clone(), val.clone()).prop_map(|(i, v)| OpI::Insert(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => idx.clone().prop_map(OpI::Take),
            2 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-c]{0,3}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            1 => (-5i32..=5).prop_map(OpI::MapAdd),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: State-machine equivalence against a head-first Vec model.
// Invariants exercised across random operation sequences:
// - Duplicate keys are rejected; the first bound value survives.
// - `get` returns the very reference that was bound (pointer identity).
// - `remove`/`take` unlink exactly the matching binding; others keep order.
// - Traversal is reverse insertion order and visits each binding once.
// - `map` adds its delta once per binding to the bound values.
// - `len`/`is_empty` parity with the model and chain/arena agreement after each op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let values: Vec<Cell<i32>> = (0..VALUES as i32).map(Cell::new).collect();
        let mut expected: Vec<i32> = (0..VALUES as i32).collect();
        let mut sut: SymTable<Cell<i32>> = SymTable::new();
        // Head first: (key, index into `values`).
        let mut model: Vec<(String, usize)> = Vec::new();

        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = &pool[i];
                    let already = model.iter().any(|(mk, _)| mk == k);
                    let inserted = sut.put(k, &values[v]);
                    prop_assert_eq!(inserted, !already);
                    if inserted {
                        model.insert(0, (k.clone(), v));
                    }
                }
                OpI::Insert(i, v) => {
                    let k = &pool[i];
                    let already = model.iter().any(|(mk, _)| mk == k);
                    match sut.insert(k, &values[v]) {
                        Ok(()) => {
                            prop_assert!(!already, "insert must fail on duplicate");
                            model.insert(0, (k.clone(), v));
                        }
                        Err(InsertError::DuplicateKey) => {
                            prop_assert!(already, "duplicate error only when key exists");
                        }
                    }
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    let pos = model.iter().position(|(mk, _)| mk == k);
                    prop_assert_eq!(sut.remove(k), pos.is_some());
                    if let Some(p) = pos {
                        model.remove(p);
                    }
                    prop_assert!(sut.get(k).is_none());
                }
                OpI::Take(i) => {
                    let k = &pool[i];
                    let pos = model.iter().position(|(mk, _)| mk == k);
                    match (sut.take(k), pos) {
                        (Some(got), Some(p)) => {
                            let (_, v) = model.remove(p);
                            prop_assert!(core::ptr::eq(got, &values[v]));
                        }
                        (None, None) => {}
                        (got, pos) => prop_assert!(false, "take mismatch: {:?} vs {:?}", got, pos),
                    }
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    let m = model.iter().find(|(mk, _)| mk == k).map(|(_, v)| *v);
                    match (sut.get(k), m) {
                        (Some(got), Some(v)) => prop_assert!(core::ptr::eq(got, &values[v])),
                        (None, None) => {}
                        (got, m) => prop_assert!(false, "get mismatch: {:?} vs {:?}", got, m),
                    }
                    prop_assert_eq!(sut.contains(k), m.is_some());
                }
                OpI::Contains(s) => {
                    let has_model = model.iter().any(|(mk, _)| *mk == s);
                    prop_assert_eq!(sut.contains(&s), has_model);
                }
                OpI::MapAdd(d) => {
                    let mut visits = 0usize;
                    sut.map(
                        |_, v, n: &mut usize| {
                            v.set(v.get().wrapping_add(d));
                            *n += 1;
                        },
                        &mut visits,
                    );
                    prop_assert_eq!(visits, model.len());
                    for (_, v) in &model {
                        expected[*v] = expected[*v].wrapping_add(d);
                    }
                }
                OpI::Iterate => {
                    let s_keys: Vec<&str> = sut.keys().collect();
                    let m_keys: Vec<&str> = model.iter().map(|(k, _)| k.as_str()).collect();
                    prop_assert_eq!(s_keys, m_keys);
                }
                OpI::Clear => {
                    sut.clear();
                    model.clear();
                }
            }

            // Post-conditions after each op
            sut.check_invariants();
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            let observed: Vec<i32> = values.iter().map(Cell::get).collect();
            prop_assert_eq!(&observed, &expected);
        }
    }
}
