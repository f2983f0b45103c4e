//! `at_left_or_default` / `at_right_or_default`: the default value of a side
//! belongs to at most one pair, and asking for it under a new key takes it
//! away from the previous holder.

use sonic_bimap::BiMap;

fn pairs(map: &BiMap<i32, String>) -> Vec<(i32, String)> {
    map.iter_left().map(|(l, r)| (*l, r.clone())).collect()
}

fn build(pairs: &[(i32, &str)]) -> BiMap<i32, String> {
    let mut map = BiMap::new();
    for &(l, r) in pairs {
        assert!(!map.insert(l, r.to_string()).is_end());
    }
    map
}

#[test]
fn existing_key_returns_its_value() {
    let mut map = build(&[(1, "a"), (2, "b")]);
    assert_eq!(map.at_left_or_default(2), "b");
    assert_eq!(map.len(), 2);
    map.assert_valid().unwrap();
}

#[test]
fn absent_default_is_inserted() {
    let mut map = build(&[(1, "a")]);
    assert_eq!(map.at_left_or_default(5), "");
    assert_eq!(map.len(), 2);
    assert_eq!(map.at_right(&String::new()), Ok(&5));
    map.assert_valid().unwrap();
}

#[test]
fn default_is_stolen_from_previous_holder() {
    let mut map = build(&[(1, "a"), (2, "")]);
    assert_eq!(map.at_left_or_default(3), "");

    assert_eq!(map.len(), 2);
    assert_eq!(map.at_right(&String::new()), Ok(&3));
    assert!(map.find_left(&2).is_end());
    assert_eq!(map.at_left(&1), Ok(&"a".to_string()));
    assert_eq!(pairs(&map), vec![(1, "a".to_string()), (3, String::new())]);
    map.assert_valid().unwrap();
}

#[test]
fn eviction_in_singleton_map() {
    let mut map = build(&[(7, "")]);
    assert_eq!(map.at_left_or_default(9), "");
    assert_eq!(pairs(&map), vec![(9, String::new())]);
    map.assert_valid().unwrap();
}

/// Each case places the holder of the default right value `0` at a different
/// position of the right tree; the left tree shapes vary along with it.
#[test]
fn eviction_covers_every_holder_shape() {
    let cases: &[&[(i32, i32)]] = &[
        // root with two children
        &[(50, 0), (20, -5), (80, 5)],
        // root with one child
        &[(50, 0), (20, 5)],
        // only node
        &[(50, 0)],
        // leaf
        &[(50, 10), (20, -10), (80, 20), (10, 0)],
        // inner node with two children
        &[(1, 10), (2, -10), (3, 20), (4, 0), (5, -5), (6, 5)],
        // inner node with a lesser child only
        &[(1, 10), (2, 5), (3, 0), (4, -3)],
    ];
    for input in cases {
        for new_key in [-1, 0, 7, 45, 55, 100] {
            let mut map = BiMap::<i32, i32>::new();
            for &(l, r) in input.iter() {
                map.insert(l, r);
            }
            map.assert_valid().unwrap();
            if map.contains_left(&new_key) {
                continue;
            }
            let holder = *map.at_right(&0).unwrap();
            let len = map.len();

            assert_eq!(*map.at_left_or_default(new_key), 0);
            map.assert_valid().unwrap();

            assert_eq!(map.len(), len);
            assert!(map.find_left(&holder).is_end());
            assert_eq!(map.at_right(&0), Ok(&new_key));
            for &(l, r) in input.iter().filter(|(l, _)| *l != holder) {
                assert_eq!(map.at_left(&l), Ok(&r));
                assert_eq!(map.at_right(&r), Ok(&l));
            }
            let lefts: Vec<i32> = map.iter_left().map(|(l, _)| *l).collect();
            let mut sorted = lefts.clone();
            sorted.sort();
            assert_eq!(lefts, sorted);
        }
    }
}

#[test]
fn right_side_default_evicts_left_default_holder() {
    let mut map = BiMap::<i32, &str>::new();
    map.insert(0, "zero");
    map.insert(5, "five");
    map.insert(-5, "minus five");

    assert_eq!(*map.at_right_or_default("nil"), 0);
    assert!(map.find_right(&"zero").is_end());
    assert_eq!(map.at_left(&0), Ok(&"nil"));
    assert_eq!(map.len(), 3);
    map.assert_valid().unwrap();

    assert_eq!(*map.at_right_or_default("five"), 5);
    assert_eq!(map.len(), 3);
}

#[test]
fn repeated_eviction_keeps_one_holder() {
    let mut map = BiMap::<i32, String>::new();
    for i in 0..10 {
        map.insert(i * 2, format!("x{i}"));
    }
    for key in [3, 7, 1, 19, 11, 5] {
        assert_eq!(map.at_left_or_default(key), "");
        map.assert_valid().unwrap();
        assert_eq!(map.at_right(&String::new()), Ok(&key));
    }
    // first call inserted a new pair, the rest moved the default along
    assert_eq!(map.len(), 11);
}

#[test]
fn eviction_emits_trace_event() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        let mut map = build(&[(1, ""), (2, "b")]);
        assert_eq!(map.at_left_or_default(3), "");
        assert!(map.find_left(&1).is_end());
    });
}
