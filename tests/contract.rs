use std::collections::BTreeSet;

use compact_str::CompactString;
use copse::{make_word_set, AvlSet, EmptySet, HashSet, Set, SetKind, VectorSet};
use rand::prelude::*;

/// The number of operations replayed against each set.
const TEST_SIZE: usize = 10_000;

/// Keys are drawn from a small range so that repeats are common.
const KEY_RANGE: u64 = 2_000;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn mix_hash(key: &u64) -> u32 {
    (key.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 32) as u32
}

fn zero_hash(_: &u64) -> u32 {
    0
}

/// Replays a seeded stream of adds and lookups on a set and on a BTreeSet, and asserts identical
/// results at every step.
fn replay(set: &mut dyn Set<u64>, seed: u64) -> BTreeSet<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut model = BTreeSet::new();

    for _ in 0..TEST_SIZE {
        let key = rng.random_range(0..KEY_RANGE);
        if rng.random_bool(0.6) {
            set.add(key);
            model.insert(key);
        } else {
            assert_eq!(set.contains(&key), model.contains(&key), "contains({key})");
        }
        assert_eq!(set.size(), model.len());
    }

    for key in 0..KEY_RANGE {
        assert_eq!(set.contains(&key), model.contains(&key), "contains({key})");
    }

    model
}

// ─── Each implementation against the model ──────────────────────────────────

#[test]
fn balanced_avl_set_matches_btreeset() {
    init_logging();
    let mut set: AvlSet<u64> = AvlSet::new(true);
    let model = replay(&mut set, 1);

    assert!(set.iter().eq(model.iter()));
    assert!(set.height() <= 16);
}

#[test]
fn unbalanced_avl_set_matches_btreeset() {
    init_logging();
    let mut set: AvlSet<u64> = AvlSet::new(false);
    let model = replay(&mut set, 2);

    assert!(set.iter().eq(model.iter()));
}

#[test]
fn hash_set_matches_btreeset() {
    init_logging();
    let mut set: HashSet<u64, _> = HashSet::new(mix_hash);
    let model = replay(&mut set, 3);

    assert!(5 * set.size() <= 4 * set.capacity());
    let chained: usize = (0..set.capacity()).map(|index| set.elements_at_index(index)).sum();
    assert_eq!(chained, model.len());
}

#[test]
fn hash_set_with_constant_hash_matches_btreeset() {
    init_logging();
    let mut set: HashSet<u64, _> = HashSet::new(zero_hash);
    let model = replay(&mut set, 4);

    assert_eq!(set.elements_at_index(0), model.len());
    for key in &model {
        assert!(set.is_element_at_index(key, 0));
    }
}

#[test]
fn vector_set_matches_btreeset() {
    let mut set: VectorSet<u64> = VectorSet::new();
    replay(&mut set, 5);
}

#[test]
fn empty_set_never_contains() {
    let mut set = EmptySet::new();
    for key in 0..KEY_RANGE {
        set.add(key);
        assert!(!set.contains(&key));
    }
    assert_eq!(set.size(), 0);
}

// ─── Uniform use through the trait ───────────────────────────────────────────

#[test]
fn every_set_counts_distinct_keys() {
    init_logging();
    let mut sets: Vec<Box<dyn Set<u64>>> = vec![
        Box::new(AvlSet::<u64>::new(true)),
        Box::new(AvlSet::<u64>::new(false)),
        Box::new(HashSet::<u64, _>::new(mix_hash)),
        Box::new(HashSet::<u64, _>::new(zero_hash)),
        Box::new(VectorSet::<u64>::new()),
    ];

    for set in &mut sets {
        for key in [5, 3, 5, 9, 3, 1, 5] {
            set.add(key);
        }
        assert_eq!(set.size(), 4);
        assert!(!set.is_empty());
        assert!([1, 3, 5, 9].iter().all(|key| set.contains(key)));
        assert!(![0, 2, 4, 6].iter().any(|key| set.contains(key)));
    }
}

#[test]
fn copies_do_not_share_keys() {
    let mut avl: AvlSet<u64> = (0..100).collect();
    let mut avl_copy = avl.clone();
    avl_copy.extend(100..200);
    avl.add(1_000);

    assert_eq!(avl.size(), 101);
    assert_eq!(avl_copy.size(), 200);
    assert!(!avl.contains(&150));
    assert!(!avl_copy.contains(&1_000));

    let mut hash: HashSet<u64, _> = HashSet::new(mix_hash);
    hash.extend(0..100);
    let mut hash_copy = hash.clone();
    hash_copy.extend(100..200);
    hash.add(1_000);

    assert_eq!(hash.size(), 101);
    assert_eq!(hash_copy.size(), 200);
    assert!(!hash.contains(&150));
    assert!(!hash_copy.contains(&1_000));
}

#[test]
fn taken_sets_start_over() {
    let mut avl: AvlSet<u64> = (0..100).collect();
    let avl_moved = avl.take();
    assert_eq!(avl_moved.size(), 100);
    assert_eq!(avl.size(), 0);
    avl.add(7);
    assert!(avl.contains(&7) && !avl.contains(&8));

    let mut hash: HashSet<u64, _> = HashSet::new(mix_hash);
    hash.extend(0..100);
    let hash_moved = hash.take();
    assert_eq!(hash_moved.size(), 100);
    assert_eq!(hash.size(), 0);
    assert_eq!(hash.capacity(), copse::DEFAULT_CAPACITY);
    hash.add(7);
    assert!(hash.contains(&7) && !hash.contains(&8));
}

// ─── Word sets from configuration ───────────────────────────────────────────

#[test]
fn word_sets_from_configuration() {
    init_logging();
    let words = ["set", "the", "controls", "for", "the", "heart", "of", "the", "sun"];

    for name in ["AVL", "HASH ZERO", "HASH SUM", "HASH PRODUCT", "VECTOR"] {
        let kind: SetKind = name.parse().unwrap();
        let mut set = make_word_set(kind).unwrap();

        for word in words {
            set.add(CompactString::new(word));
        }

        assert_eq!(set.size(), 7, "{name}");
        assert!(set.contains(&CompactString::new("heart")), "{name}");
        assert!(!set.contains(&CompactString::new("moon")), "{name}");
    }

    let kind: SetKind = "SKIPLIST".parse().unwrap();
    assert!(make_word_set(kind).is_err());
    assert!("TREE".parse::<SetKind>().is_err());
}
