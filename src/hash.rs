//! Implementation of a set, backed by a separately chained hash table
#![warn(missing_docs)]

extern crate alloc;

use alloc::{vec, vec::Vec};
use core::{fmt, mem};
use log::debug;

use crate::set::Set;

//-----------------------------------------------------------------------------------------------//

/// The number of buckets in a newly constructed `HashSet`
pub const DEFAULT_CAPACITY: usize = 10;

/// A set of keys, implemented using a separately chained hash table.
///
/// The hash function is supplied at construction and fixed for the lifetime of the set. A key
/// lives in the chain of bucket `hash(key) % capacity`. As soon as an insertion takes the load
/// factor `size / capacity` above 0.8, the table is rebuilt with `capacity * 2 + 1` buckets and
/// every key is rehashed, before `add` returns.
///
/// A poor hash function never makes the set incorrect, only slower: with a constant hash every
/// key shares one chain and lookups become linear.
///
/// Keys are stored in a single array in the order they were added. Chains link entries by index,
/// so growing the table relinks entries without moving any key. Cloning a `HashSet` copies every
/// chain into a table of the same capacity.
#[derive(Clone)]
pub struct HashSet<K, F>
where
    F: Fn(&K) -> u32,
{
    // Head entry of each chain, `usize::MAX` for an empty chain
    bucket: Vec<usize>,
    // Following entry in the same chain, per entry
    next: Vec<usize>,
    key_slice: Vec<K>,
    hash: F,
}

impl<K, F> HashSet<K, F>
where
    F: Fn(&K) -> u32,
{
    /// Constructor
    ///
    /// The table starts with `DEFAULT_CAPACITY` buckets.
    pub fn new(hash: F) -> HashSet<K, F> {
        HashSet {
            bucket: vec![!0; DEFAULT_CAPACITY],
            next: Vec::new(),
            key_slice: Vec::new(),
            hash,
        }
    }

    /// Get the number of buckets in the table
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bucket.len()
    }

    /// Get the length of the chain at a bucket.
    ///
    /// Returns 0 if `index` is outside the table.
    pub fn elements_at_index(&self, index: usize) -> usize {
        if index >= self.bucket.len() {
            return 0;
        }

        let mut count = 0;
        let mut x = self.bucket[index];
        while !x != 0 {
            count += 1;
            x = self.next[x];
        }
        count
    }

    /// Move the contents out of the set.
    ///
    /// The set is left empty with `DEFAULT_CAPACITY` buckets and the same hash function, ready for
    /// reuse.
    pub fn take(&mut self) -> HashSet<K, F>
    where
        F: Clone,
    {
        let hash = self.hash.clone();
        mem::replace(self, HashSet::new(hash))
    }

    // Get the bucket for a key at the current capacity
    #[inline]
    fn index(&self, key: &K) -> usize {
        (self.hash)(key) as usize % self.bucket.len()
    }

    // Rebuild the table with `capacity * 2 + 1` buckets
    //
    // Chains are walked front to back and each entry is pushed onto the front of its new chain,
    // so entries that stay together come out in reverse order.
    fn grow(&mut self) {
        let capacity = self.bucket.len() * 2 + 1;
        let mut bucket = vec![!0; capacity];

        for &head in &self.bucket {
            let mut x = head;
            while !x != 0 {
                let y = self.next[x];
                let index = (self.hash)(&self.key_slice[x]) as usize % capacity;
                self.next[x] = bucket[index];
                bucket[index] = x;
                x = y;
            }
        }

        debug!(
            "grew hash set from {} to {} buckets holding {} keys",
            self.bucket.len(),
            capacity,
            self.key_slice.len()
        );
        self.bucket = bucket;
    }

    // Debug tests
    #[cfg(test)]
    fn check(&self) {
        let mut count = 0;
        for (index, &head) in self.bucket.iter().enumerate() {
            let mut x = head;
            while !x != 0 {
                debug_assert_eq!(self.index(&self.key_slice[x]), index);
                count += 1;
                x = self.next[x];
            }
        }

        debug_assert_eq!(count, self.key_slice.len());
        debug_assert_eq!(self.next.len(), self.key_slice.len());
        debug_assert!(5 * self.key_slice.len() <= 4 * self.bucket.len());
    }
}

impl<K, F> HashSet<K, F>
where
    K: Eq,
    F: Fn(&K) -> u32,
{
    /// Check if a key is in the chain of a particular bucket.
    ///
    /// Returns `false` if `index` is outside the table.
    pub fn is_element_at_index(&self, key: &K, index: usize) -> bool {
        if index >= self.bucket.len() {
            return false;
        }
        self.find(key, index)
    }

    // Search the chain at a bucket for a key
    fn find(&self, key: &K, index: usize) -> bool {
        let mut x = self.bucket[index];
        while !x != 0 {
            if self.key_slice[x] == *key {
                return true;
            }
            x = self.next[x];
        }
        false
    }
}

impl<K, F> Set<K> for HashSet<K, F>
where
    K: Eq,
    F: Fn(&K) -> u32,
{
    fn add(&mut self, key: K) {
        let index = self.index(&key);
        if self.find(&key, index) {
            return;
        }

        self.next.push(self.bucket[index]);
        self.bucket[index] = self.key_slice.len();
        self.key_slice.push(key);

        // Load factor above 0.8
        if 5 * self.key_slice.len() > 4 * self.bucket.len() {
            self.grow();
        }
    }

    fn contains(&self, key: &K) -> bool {
        self.find(key, self.index(key))
    }

    #[inline]
    fn size(&self) -> usize {
        self.key_slice.len()
    }
}

impl<K, F> Extend<K> for HashSet<K, F>
where
    K: Eq,
    F: Fn(&K) -> u32,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<K, F> fmt::Debug for HashSet<K, F>
where
    F: Fn(&K) -> u32,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashSet")
            .field("size", &self.key_slice.len())
            .field("capacity", &self.bucket.len())
            .finish_non_exhaustive()
    }
}

//-----------------------------------------------------------------------------------------------//

#[cfg(test)]
fn zero_hash<K>(_: &K) -> u32 {
    0
}

#[cfg(test)]
fn identity_hash(key: &u32) -> u32 {
    *key
}

#[test]
// Bucket introspection with a constant hash
fn test_hash_0() {
    let mut set = HashSet::new(zero_hash::<i32>);

    set.add(11);
    set.add(1);
    set.add(5);

    debug_assert_eq!(set.size(), 3);
    debug_assert_eq!(set.elements_at_index(0), 3);
    debug_assert_eq!(set.elements_at_index(1), 0);

    for key in [11, 1, 5] {
        debug_assert!(set.contains(&key));
        debug_assert!(set.is_element_at_index(&key, 0));
        debug_assert!(!set.is_element_at_index(&key, 1));
    }
    debug_assert!(!set.contains(&6));
}

#[test]
// Introspection outside the table
fn test_hash_1() {
    let mut set = HashSet::new(identity_hash);
    set.add(3);

    debug_assert_eq!(set.capacity(), DEFAULT_CAPACITY);
    debug_assert_eq!(set.elements_at_index(3), 1);
    debug_assert_eq!(set.elements_at_index(DEFAULT_CAPACITY), 0);
    debug_assert_eq!(set.elements_at_index(usize::MAX), 0);
    debug_assert!(!set.is_element_at_index(&3, DEFAULT_CAPACITY));
    debug_assert!(!set.is_element_at_index(&3, usize::MAX));
}

#[test]
// The table grows as soon as the load factor passes 0.8
fn test_hash_2() {
    let mut set = HashSet::new(identity_hash);

    for key in 0..8 {
        set.add(key);
    }
    debug_assert_eq!(set.capacity(), 10);

    set.add(8);
    debug_assert_eq!(set.capacity(), 21);
    set.check();

    for key in 9..16 {
        set.add(key);
    }
    debug_assert_eq!(set.capacity(), 21);

    set.add(16);
    debug_assert_eq!(set.capacity(), 43);
    set.check();

    for key in 0..17 {
        debug_assert!(set.contains(&key));
    }
    debug_assert_eq!(set.size(), 17);
}

#[test]
// Growing the table moves keys to the bucket for the new capacity
fn test_hash_3() {
    let mut set = HashSet::new(identity_hash);

    for key in 10..18 {
        set.add(key);
    }
    debug_assert!(set.is_element_at_index(&15, 5));
    debug_assert_eq!(set.elements_at_index(5), 1);

    set.add(18);
    debug_assert_eq!(set.capacity(), 21);
    debug_assert!(!set.is_element_at_index(&15, 5));
    debug_assert!(set.is_element_at_index(&15, 15));
    debug_assert_eq!(set.elements_at_index(5), 0);
}

#[test]
// Adding a key twice changes neither the size nor the capacity
fn test_hash_4() {
    let mut set = HashSet::new(identity_hash);

    for _ in 0..3 {
        for key in 0..8 {
            set.add(key);
        }
    }

    debug_assert_eq!(set.size(), 8);
    debug_assert_eq!(set.capacity(), 10);
    set.check();
}

#[test]
// A clone is independent of its source
fn test_hash_5() {
    let mut source = HashSet::new(identity_hash);
    source.extend(0..5);

    let mut copy = source.clone();
    debug_assert_eq!(copy.capacity(), source.capacity());

    copy.add(100);
    source.add(200);

    debug_assert_eq!(source.size(), 6);
    debug_assert_eq!(copy.size(), 6);
    debug_assert!(!source.contains(&100));
    debug_assert!(!copy.contains(&200));

    // Growing one table leaves the other alone
    copy.extend(10..20);
    debug_assert_eq!(source.capacity(), 10);
    debug_assert_eq!(copy.capacity(), 21);
    source.check();
    copy.check();
}

#[test]
// Taking the contents leaves an empty, usable set
fn test_hash_6() {
    let mut source = HashSet::new(identity_hash);
    source.extend(0..20);

    let moved = source.take();

    debug_assert_eq!(moved.size(), 20);
    debug_assert_eq!(moved.capacity(), 43);
    debug_assert!(moved.contains(&19));

    debug_assert_eq!(source.size(), 0);
    debug_assert_eq!(source.capacity(), DEFAULT_CAPACITY);
    debug_assert!(!source.contains(&19));

    source.add(19);
    debug_assert!(source.contains(&19));
    debug_assert!(source.is_element_at_index(&19, 9));
    source.check();
}

#[test]
// A constant hash keeps every key in one chain, through every resize
fn test_hash_7() {
    const COUNT: u32 = 1000;

    let mut set = HashSet::new(zero_hash::<u32>);
    set.extend(0..COUNT);

    debug_assert_eq!(set.size(), COUNT as usize);
    debug_assert_eq!(set.elements_at_index(0), COUNT as usize);
    debug_assert!((1..set.capacity()).all(|index| set.elements_at_index(index) == 0));
    debug_assert!((0..COUNT).all(|key| set.contains(&key)));
    debug_assert!(!set.contains(&COUNT));
    set.check();
}

#[test]
// Debug output reports size and capacity
fn test_hash_8() {
    use alloc::format;

    let mut set = HashSet::new(identity_hash);
    set.extend([1, 2]);

    debug_assert_eq!(format!("{set:?}"), "HashSet { size: 2, capacity: 10, .. }");
}

#[test]
// A stress test with adding and checking
fn test_hash_9() {
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut set = HashSet::new(|key: &u64| (key.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 32) as u32);
    for _ in 0..COUNT {
        let key = rng.random_range(0..u64::MAX);
        set.add(key);
    }

    debug_assert_eq!(set.size(), COUNT);
    set.check();

    let mut rng = SmallRng::seed_from_u64(1234567890);

    for _ in 0..COUNT {
        let key = rng.random_range(0..u64::MAX);
        debug_assert!(set.contains(&key));
    }
}
