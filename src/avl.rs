//! Implementation of a set, backed by an AVL tree
#![warn(missing_docs)]

extern crate alloc;

use alloc::vec::Vec;
use core::{fmt, iter::FusedIterator, mem};

use crate::{set::Set, util::Tree};

//-----------------------------------------------------------------------------------------------//

/// A set of keys, implemented using an AVL tree.
///
/// Keys are stored in a single array in the order they were first added, and do not move as the
/// tree rotates around them. With balancing enabled (the default) the heights of the two subtrees
/// of every node differ by at most one, so `add` and `contains` take O(log n) time. With balancing
/// disabled the tree is a plain binary search tree and ascending input degrades it to a chain.
///
/// Cloning an `AvlSet` copies every key and node, so a clone never shares structure with its
/// source.
#[derive(Clone)]
pub struct AvlSet<K>
where
    K: Ord,
{
    tree: Tree,
    key_slice: Vec<K>,
}

impl<K> AvlSet<K>
where
    K: Ord,
{
    /// Constructor
    ///
    /// `balance` chooses between an AVL tree and an unbalanced binary search tree, and cannot be
    /// changed later.
    pub fn new(balance: bool) -> AvlSet<K> {
        AvlSet {
            tree: Tree::new(balance),
            key_slice: Vec::new(),
        }
    }

    /// Constructor
    pub fn with_capacity(capacity: usize, balance: bool) -> AvlSet<K> {
        AvlSet {
            tree: Tree::with_capacity(capacity, balance),
            key_slice: Vec::with_capacity(capacity),
        }
    }

    /// Check if the set keeps its tree balanced
    #[inline]
    pub fn is_balancing(&self) -> bool {
        self.tree.is_balancing()
    }

    /// Get the height of the tree, which is -1 for an empty set
    #[inline]
    pub fn height(&self) -> isize {
        self.tree.height()
    }

    /// Reserves capacity for at least `additional` more keys
    pub fn reserve(&mut self, additional: usize) {
        self.tree.reserve(additional);
        self.key_slice.reserve(additional);
    }

    /// Get the number of times a key has been added.
    ///
    /// Returns 0 if the key is not in the set. This is a diagnostic counter and plays no part in
    /// membership.
    pub fn occurrences(&self, key: &K) -> usize {
        let leaf = self.tree.get_k(key, &self.key_slice);
        if !leaf == 0 {
            0
        } else {
            self.tree.occurrences(leaf)
        }
    }

    /// Visit every key in pre-order (node, left subtree, right subtree)
    pub fn preorder<F>(&self, mut visit: F)
    where
        F: FnMut(&K),
    {
        let mut leaf = self.tree.preorder_first();
        while !leaf != 0 {
            visit(&self.key_slice[leaf]);
            leaf = self.tree.preorder_next(leaf);
        }
    }

    /// Visit every key in in-order (left subtree, node, right subtree), which is ascending order
    pub fn inorder<F>(&self, mut visit: F)
    where
        F: FnMut(&K),
    {
        let mut leaf = self.tree.first();
        while !leaf != 0 {
            visit(&self.key_slice[leaf]);
            leaf = self.tree.next(leaf);
        }
    }

    /// Visit every key in post-order (left subtree, right subtree, node)
    pub fn postorder<F>(&self, mut visit: F)
    where
        F: FnMut(&K),
    {
        let mut leaf = self.tree.postorder_first();
        while !leaf != 0 {
            visit(&self.key_slice[leaf]);
            leaf = self.tree.postorder_next(leaf);
        }
    }

    /// Iterate over the keys in ascending order
    pub fn iter(&self) -> AvlSetIterator<'_, K> {
        AvlSetIterator {
            set: self,
            leaf: self.tree.first(),
            count: self.tree.count(),
        }
    }

    /// Move the contents out of the set, leaving it empty.
    ///
    /// The emptied set keeps its balancing choice and is ready for reuse.
    pub fn take(&mut self) -> AvlSet<K> {
        let balance = self.tree.is_balancing();
        mem::replace(self, AvlSet::new(balance))
    }
}

impl<K> Set<K> for AvlSet<K>
where
    K: Ord,
{
    fn add(&mut self, key: K) {
        let leaf = self.tree.set_k(&key, &self.key_slice);
        if leaf == self.key_slice.len() {
            self.key_slice.push(key);
        }
    }

    fn contains(&self, key: &K) -> bool {
        !self.tree.get_k(key, &self.key_slice) != 0
    }

    #[inline]
    fn size(&self) -> usize {
        self.tree.count()
    }
}

impl<K> Default for AvlSet<K>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new(true)
    }
}

impl<K> fmt::Debug for AvlSet<K>
where
    K: Ord + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, K> IntoIterator for &'a AvlSet<K>
where
    K: Ord,
{
    type Item = &'a K;
    type IntoIter = AvlSetIterator<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> FromIterator<K> for AvlSet<K>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0, true);
        set.extend(iter);
        set
    }
}

impl<K> Extend<K> for AvlSet<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over an `AvlSet`, in ascending order
pub struct AvlSetIterator<'a, K>
where
    K: Ord,
{
    set: &'a AvlSet<K>,
    leaf: usize,
    count: usize,
}

impl<'a, K> Iterator for AvlSetIterator<'a, K>
where
    K: Ord,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if !self.leaf == 0 {
            return None;
        }

        let leaf = self.leaf;
        self.leaf = self.set.tree.next(self.leaf);
        self.count -= 1;

        Some(&self.set.key_slice[leaf])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.count, Some(self.count))
    }
}

impl<K> ExactSizeIterator for AvlSetIterator<'_, K> where K: Ord {}

impl<K> FusedIterator for AvlSetIterator<'_, K> where K: Ord {}

//-----------------------------------------------------------------------------------------------//

#[test]
// An empty set
fn test_avl_0() {
    let set: AvlSet<i32> = AvlSet::default();

    debug_assert!(set.is_balancing());
    debug_assert!(set.is_empty());
    debug_assert_eq!(set.size(), 0);
    debug_assert_eq!(set.height(), -1);
    debug_assert!(!set.contains(&0));
    debug_assert_eq!(set.iter().next(), None);
}

#[test]
// A very simple test of adding to a set
fn test_avl_1() {
    let mut set = AvlSet::new(true);

    set.add(11);
    set.add(1);
    set.add(5);

    debug_assert!(set.contains(&11));
    debug_assert!(set.contains(&1));
    debug_assert!(set.contains(&5));

    debug_assert!(!set.contains(&21));
    debug_assert!(!set.contains(&2));
    debug_assert!(!set.contains(&9));

    debug_assert_eq!(set.size(), 3);
}

#[test]
// The height depends on balancing
fn test_avl_2() {
    let mut balanced = AvlSet::new(true);
    let mut unbalanced = AvlSet::new(false);

    for key in [1, 2, 3] {
        balanced.add(key);
        unbalanced.add(key);
    }

    debug_assert_eq!(balanced.height(), 1);
    debug_assert_eq!(unbalanced.height(), 2);
}

#[test]
// Traversals of an unbalanced tree
fn test_avl_3() {
    use alloc::vec;

    let mut set = AvlSet::new(false);
    for key in [10, 20, 30, 40, 50] {
        set.add(key);
    }

    let mut pre = Vec::new();
    let mut ino = Vec::new();
    let mut post = Vec::new();

    set.preorder(|key| pre.push(*key));
    set.inorder(|key| ino.push(*key));
    set.postorder(|key| post.push(*key));

    debug_assert_eq!(pre, vec![10, 20, 30, 40, 50]);
    debug_assert_eq!(ino, vec![10, 20, 30, 40, 50]);
    debug_assert_eq!(post, vec![50, 40, 30, 20, 10]);
}

#[test]
// Traversals of a balanced tree
fn test_avl_4() {
    use alloc::vec;

    let mut set = AvlSet::new(true);
    for key in [10, 20, 30, 40, 50] {
        set.add(key);
    }

    let mut pre = Vec::new();
    let mut ino = Vec::new();
    let mut post = Vec::new();

    set.preorder(|key| pre.push(*key));
    set.inorder(|key| ino.push(*key));
    set.postorder(|key| post.push(*key));

    debug_assert_eq!(set.height(), 2);
    debug_assert_eq!(pre, vec![20, 10, 40, 30, 50]);
    debug_assert_eq!(ino, vec![10, 20, 30, 40, 50]);
    debug_assert_eq!(post, vec![10, 30, 50, 40, 20]);
}

#[test]
// Adding a key twice changes neither the size nor the shape
fn test_avl_5() {
    let mut set = AvlSet::new(true);

    set.add(7);
    set.add(3);
    set.add(7);
    set.add(7);

    debug_assert_eq!(set.size(), 2);
    debug_assert_eq!(set.height(), 1);
    debug_assert_eq!(set.occurrences(&7), 3);
    debug_assert_eq!(set.occurrences(&3), 1);
    debug_assert_eq!(set.occurrences(&4), 0);
    set.tree.check(&set.key_slice);
}

#[test]
// A set of strings iterates in ascending order
fn test_avl_6() {
    use alloc::{
        string::{String, ToString},
        vec,
    };

    let mut set = AvlSet::default();

    set.add("Five".to_string());
    set.add("One".to_string());
    set.add("Nine".to_string());

    debug_assert!(set.contains(&"Five".to_string()));
    debug_assert!(!set.contains(&"Seven".to_string()));

    let v: Vec<String> = set.iter().cloned().collect();
    debug_assert_eq!(
        v,
        vec!["Five".to_string(), "Nine".to_string(), "One".to_string()]
    );
    debug_assert_eq!(set.iter().len(), 3);
}

#[test]
// A clone is independent of its source
fn test_avl_7() {
    let mut source: AvlSet<i32> = [1, 2, 3].into_iter().collect();
    let mut copy = source.clone();

    copy.add(4);
    source.add(0);

    debug_assert_eq!(source.size(), 4);
    debug_assert_eq!(copy.size(), 4);
    debug_assert!(!source.contains(&4));
    debug_assert!(!copy.contains(&0));

    source.tree.check(&source.key_slice);
    copy.tree.check(&copy.key_slice);
}

#[test]
// Taking the contents leaves an empty, usable set
fn test_avl_8() {
    let mut source = AvlSet::new(false);
    source.extend([3, 1, 2]);

    let moved = source.take();

    debug_assert_eq!(moved.size(), 3);
    debug_assert!(moved.contains(&2));
    debug_assert_eq!(source.size(), 0);
    debug_assert_eq!(source.height(), -1);
    debug_assert!(!source.is_balancing());

    source.add(2);
    debug_assert!(source.contains(&2));
    debug_assert_eq!(source.size(), 1);
}

#[test]
// Sorted input with and without balancing
fn test_avl_9() {
    const COUNT: usize = 2000;

    let balanced: AvlSet<usize> = (0..COUNT).collect();
    let mut unbalanced = AvlSet::new(false);
    unbalanced.extend(0..COUNT);

    debug_assert_eq!(balanced.size(), COUNT);
    debug_assert_eq!(unbalanced.size(), COUNT);
    debug_assert!(balanced.height() <= 11);
    debug_assert_eq!(unbalanced.height(), COUNT as isize - 1);

    balanced.tree.check(&balanced.key_slice);
    unbalanced.tree.check(&unbalanced.key_slice);
    debug_assert!(balanced.iter().copied().eq(0..COUNT));
}

#[test]
// Debug output lists keys in ascending order
fn test_avl_10() {
    use alloc::format;

    let set: AvlSet<i32> = [5, 1, 9].into_iter().collect();
    debug_assert_eq!(format!("{set:?}"), "{1, 5, 9}");
}

#[test]
// A stress test with adding and checking
fn test_avl_11() {
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut set = AvlSet::new(true);
    for i in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        set.add(key);

        if i % 10000 == 0 {
            set.tree.check(&set.key_slice);
        }
    }

    debug_assert_eq!(set.size(), COUNT);
    set.tree.check(&set.key_slice);

    let mut rng = SmallRng::seed_from_u64(1234567890);

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        debug_assert!(set.contains(&key));
    }
}
