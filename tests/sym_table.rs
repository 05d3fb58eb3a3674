// SymTable integration suite.
//
// Each test documents what behavior is being verified. The core invariants
// exercised:
// - Uniqueness: duplicate put is rejected and the first value stays bound.
// - Identity: get returns the exact reference that was bound.
// - Order: traversal runs most-recently-inserted first.
// - Ownership: the table owns key copies only; values are never dropped.
use std::cell::{Cell, RefCell};
use symtable::{InsertError, SymTable};

// Test: put/get/contains basics with a duplicate.
// Verifies: second put of "a" returns false, get("a") is still 1, len is 2.
#[test]
fn duplicate_put_scenario() {
    let (one, two, three) = (1, 2, 3);
    let mut t = SymTable::new();
    assert!(t.put("a", &one));
    assert!(t.put("b", &two));
    assert!(!t.put("a", &three));
    assert_eq!(t.get("a"), Some(&1));
    assert_eq!(t.len(), 2);
}

// Test: remove is idempotent in outcome.
// Verifies: first remove true, size drops to 0, second remove false.
#[test]
fn remove_scenario() {
    let five = 5;
    let mut t = SymTable::new();
    t.put("x", &five);
    assert!(t.remove("x"));
    assert_eq!(t.len(), 0);
    assert!(!t.remove("x"));
}

// Test: empty table.
// Verifies: no size, no membership, no value, zero visits.
#[test]
fn empty_scenario() {
    let t: SymTable<i32> = SymTable::default();
    assert_eq!(t.len(), 0);
    assert!(!t.contains("z"));
    assert!(t.get("z").is_none());
    let mut visits = 0;
    t.map(|_, _, n: &mut i32| *n += 1, &mut visits);
    assert_eq!(visits, 0);
}

// Test: reference identity.
// Verifies: get hands back the same address that was bound, not a copy.
#[test]
fn get_returns_same_reference() {
    let values: Vec<String> = (0..4).map(|i| format!("value-{i}")).collect();
    let mut t = SymTable::new();
    for (i, v) in values.iter().enumerate() {
        t.put(&format!("k{i}"), v);
    }
    for (i, v) in values.iter().enumerate() {
        let got = t.get(&format!("k{i}")).expect("bound");
        assert!(std::ptr::eq(got, v));
    }
}

// Test: keys are copied at insert time.
// Verifies: mutating the caller's key buffer afterwards does not affect lookups.
#[test]
fn key_is_copied_on_put() {
    let v = 0;
    let mut buf = String::from("name");
    let mut t = SymTable::new();
    t.put(&buf, &v);
    buf.clear();
    buf.push_str("other");
    assert!(t.contains("name"));
    assert!(!t.contains("other"));
}

// Test: bulk apply.
// Verifies: a visitor adding Δ through RefCell raises every bound value by Δ,
// and the context counts one visit per binding.
#[test]
fn map_adds_delta_to_every_value() {
    let cells: Vec<RefCell<i64>> = (10..20).map(RefCell::new).collect();
    let mut t = SymTable::new();
    for (i, c) in cells.iter().enumerate() {
        t.put(&i.to_string(), c);
    }

    struct Ctx {
        delta: i64,
        visits: usize,
    }
    let mut ctx = Ctx {
        delta: 2,
        visits: 0,
    };
    t.map(
        |_, v, c: &mut Ctx| {
            *v.borrow_mut() += c.delta;
            c.visits += 1;
        },
        &mut ctx,
    );

    assert_eq!(ctx.visits, cells.len());
    for (i, _) in cells.iter().enumerate() {
        assert_eq!(*t.get(&i.to_string()).unwrap().borrow(), 10 + i as i64 + 2);
    }
}

// Test: traversal order via map, iter and IntoIterator.
// Verifies: all three agree on reverse insertion order.
#[test]
fn traversal_order_agrees_across_apis() {
    let v = ();
    let mut t = SymTable::new();
    for k in ["first", "second", "third"] {
        t.put(k, &v);
    }
    let mut mapped = Vec::new();
    t.map(|k, _, out: &mut Vec<String>| out.push(k.to_owned()), &mut mapped);
    let iterated: Vec<String> = t.iter().map(|(k, _)| k.to_owned()).collect();
    let mut looped = Vec::new();
    for (k, _) in &t {
        looped.push(k.to_owned());
    }
    assert_eq!(mapped, ["third", "second", "first"]);
    assert_eq!(iterated, mapped);
    assert_eq!(looped, mapped);
}

// Test: Result flavored insert.
// Verifies: DuplicateKey is reported and is a std error.
#[test]
fn insert_result_flavor() {
    let v = 1;
    let mut t = SymTable::new();
    assert_eq!(t.insert("k", &v), Ok(()));
    let err = t.insert("k", &v).unwrap_err();
    assert_eq!(err, InsertError::DuplicateKey);
    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert!(!boxed.to_string().is_empty());
}

// Test: unsized values.
// Verifies: string slices can be bound directly without a wrapper.
#[test]
fn str_values() {
    let greeting = String::from("hello");
    let mut t: SymTable<str> = SymTable::new();
    t.put("greeting", greeting.as_str());
    t.put("static", "world");
    assert_eq!(t.get("greeting"), Some("hello"));
    assert_eq!(t.get("static"), Some("world"));
}

// Test: the table never drops bound values.
// Verifies: dropping a table with N bindings leaves every value alive and
// its drop counter untouched; values drop only when the caller releases them.
#[test]
fn drop_releases_bindings_not_values() {
    struct Tracked<'a> {
        drops: &'a Cell<usize>,
    }
    impl Drop for Tracked<'_> {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    let drops = Cell::new(0);
    let values: Vec<Tracked<'_>> = (0..8).map(|_| Tracked { drops: &drops }).collect();
    {
        let mut t = SymTable::new();
        for (i, v) in values.iter().enumerate() {
            assert!(t.put(&format!("k{i}"), v));
        }
        assert_eq!(t.len(), 8);
        assert!(t.remove("k3"));
        assert!(t.take("k5").is_some());
        t.clear();
        for (i, v) in values.iter().enumerate() {
            t.put(&format!("again{i}"), v);
        }
        SymTable::free(Some(t));
    }
    assert_eq!(drops.get(), 0);
    drop(values);
    assert_eq!(drops.get(), 8);
}

// Test: one value bound under many keys.
// Verifies: the table stores references, so aliasing is visible through every key.
#[test]
fn shared_value_under_many_keys() {
    let shared = Cell::new(0);
    let mut t = SymTable::new();
    for k in ["a", "b", "c"] {
        t.put(k, &shared);
    }
    t.for_each(|_, v| v.set(v.get() + 1));
    assert_eq!(shared.get(), 3);
    assert!(std::ptr::eq(t.get("a").unwrap(), t.get("c").unwrap()));
}

// Test: size accounting over a longer sequence.
// Verifies: len equals distinct keys put minus successful removes.
#[test]
fn len_tracks_distinct_puts_minus_removes() {
    let v = 0;
    let mut t = SymTable::new();
    let mut expected = 0usize;
    for round in 0..3 {
        for i in 0..50 {
            if t.put(&format!("k{}", i % 20), &v) {
                expected += 1;
            }
        }
        for i in (round..50).step_by(3) {
            if t.remove(&format!("k{i}")) {
                expected -= 1;
            }
        }
        assert_eq!(t.len(), expected);
    }
}
