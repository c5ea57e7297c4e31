//! Baseline sets, used to put the real collections in perspective
#![warn(missing_docs)]

extern crate alloc;

use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::set::Set;

//-----------------------------------------------------------------------------------------------//

/// A set of keys stored in an unsorted vector.
///
/// Every `add` and `contains` scans the whole vector, so both are O(n).
#[derive(Clone, Debug)]
pub struct VectorSet<K>
where
    K: Eq,
{
    key_slice: Vec<K>,
}

impl<K> VectorSet<K>
where
    K: Eq,
{
    /// Constructor
    pub fn new() -> VectorSet<K> {
        VectorSet {
            key_slice: Vec::new(),
        }
    }
}

impl<K> Set<K> for VectorSet<K>
where
    K: Eq,
{
    fn add(&mut self, key: K) {
        if !self.contains(&key) {
            self.key_slice.push(key);
        }
    }

    fn contains(&self, key: &K) -> bool {
        self.key_slice.iter().any(|k| k == key)
    }

    #[inline]
    fn size(&self) -> usize {
        self.key_slice.len()
    }
}

impl<K> Default for VectorSet<K>
where
    K: Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

//-----------------------------------------------------------------------------------------------//

/// A set that is always empty.
///
/// Adding is a no-op and nothing is ever contained. It measures the cost of everything around a
/// set, such as reading and splitting input, with the set itself factored out.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptySet<K> {
    key: PhantomData<K>,
}

impl<K> EmptySet<K> {
    /// Constructor
    pub fn new() -> EmptySet<K> {
        EmptySet { key: PhantomData }
    }
}

impl<K> Set<K> for EmptySet<K> {
    #[inline]
    fn add(&mut self, _key: K) {}

    #[inline]
    fn contains(&self, _key: &K) -> bool {
        false
    }

    #[inline]
    fn size(&self) -> usize {
        0
    }
}

//-----------------------------------------------------------------------------------------------//

#[test]
// A vector set keeps one copy of each key
fn test_baseline_0() {
    let mut set = VectorSet::new();

    set.add(11);
    set.add(1);
    set.add(11);

    debug_assert_eq!(set.size(), 2);
    debug_assert!(set.contains(&11));
    debug_assert!(set.contains(&1));
    debug_assert!(!set.contains(&5));
}

#[test]
// An empty set stays empty
fn test_baseline_1() {
    let mut set = EmptySet::new();

    set.add(11);

    debug_assert!(set.is_empty());
    debug_assert!(!set.contains(&11));
}
