//! Utility types to support height balanced (AVL) binary trees

#![warn(missing_docs)]

extern crate alloc;
use alloc::vec::Vec;

use core::{cmp::Ordering, fmt::Display};
use log::trace;

//-----------------------------------------------------------------------------------------------//

// A leaf in an AVL tree
#[derive(Clone)]
struct Leaf {
    parent: usize,
    left: usize,
    right: usize,
    height: isize,
    count: usize,
}

//-----------------------------------------------------------------------------------------------//

/// A tree of integer leaves
///
/// Leaves are numbered in the order they were inserted, starting at zero, and are never removed.
/// The keys themselves are held by the caller in a slice indexed by leaf, so a new key belongs at
/// the end of that slice once `set_k` has returned a leaf equal to the slice length.
#[derive(Clone)]
pub struct Tree {
    leaf: Vec<Leaf>,
    root: usize,
    balance: bool,
}

impl Tree {
    /// Construct an empty tree
    ///
    /// When `balance` is false no rotations are ever performed and the tree degrades to a plain
    /// binary search tree. The choice is fixed for the lifetime of the tree.
    pub fn new(balance: bool) -> Tree {
        Tree {
            leaf: Vec::new(),
            root: !0,
            balance,
        }
    }

    /// Construct an empty tree, pre-allocating a given capacity
    pub fn with_capacity(capacity: usize, balance: bool) -> Tree {
        Tree {
            leaf: Vec::with_capacity(capacity),
            root: !0,
            balance,
        }
    }

    /// Get the number of leaves in the tree
    #[inline]
    pub fn count(&self) -> usize {
        self.leaf.len()
    }

    /// Check if the tree has no leaves
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.leaf.is_empty()
    }

    /// Check if the tree rebalances itself on insertion
    #[inline]
    pub fn is_balancing(&self) -> bool {
        self.balance
    }

    /// Get the height of the tree
    ///
    /// A tree with a single leaf has height 0, and by convention an empty tree has height -1.
    #[inline]
    pub fn height(&self) -> isize {
        height(&self.leaf, self.root)
    }

    /// Reserves capacity for at least `additional` more leaves
    pub fn reserve(&mut self, additional: usize) {
        self.leaf.reserve(additional);
    }

    /// Get a leaf by key
    ///
    /// If the key is not found, then `usize::MAX` is returned. If the slice of keys is not sorted
    /// properly according to the binary tree, then the results are undefined.
    pub fn get_k<K: Ord>(&self, key: &K, key_slice: &[K]) -> usize {
        get_k(&self.leaf, self.root, key, key_slice)
    }

    /// Insert a leaf by key
    ///
    /// If the key is already present its leaf is returned and the occurrence count of that leaf
    /// is incremented. Otherwise a new leaf is created, numbered `count()` before the call, and
    /// the path back to the root is retraced to refresh the cached heights, rotating any leaf that
    /// has become unbalanced when balancing is enabled. The caller is expected to store the key
    /// at the new index.
    pub fn set_k<K: Ord>(&mut self, key: &K, key_slice: &[K]) -> usize {
        let leaf = match locate_k(&self.leaf, self.root, key, key_slice) {
            Location::Found(leaf) => {
                self.leaf[leaf].count += 1;
                return leaf;
            }
            Location::Root => {
                let leaf = self.alloc(!0);
                self.root = leaf;
                return leaf;
            }
            Location::Left(parent) => {
                let leaf = self.alloc(parent);
                self.leaf[parent].left = leaf;
                leaf
            }
            Location::Right(parent) => {
                let leaf = self.alloc(parent);
                self.leaf[parent].right = leaf;
                leaf
            }
        };

        let parent = self.leaf[leaf].parent;
        self.root = retrace(&mut self.leaf, parent, key, key_slice, self.balance);
        leaf
    }

    /// Get the number of times the key of a leaf has been inserted
    ///
    /// This is a diagnostic counter only: it starts at one when the leaf is created and grows by
    /// one for every repeated insertion of an equal key.
    #[inline]
    pub fn occurrences(&self, leaf: usize) -> usize {
        self.leaf[leaf].count
    }

    /// Get the first leaf in key order
    ///
    /// Returns `usize::MAX` if the tree is empty.
    pub fn first(&self) -> usize {
        first(&self.leaf, self.root)
    }

    /// Get the next leaf in key order
    ///
    /// Returns `usize::MAX` after the last leaf.
    pub fn next(&self, leaf: usize) -> usize {
        next(&self.leaf, leaf)
    }

    /// Get the first leaf of a pre-order walk, which is the root
    #[inline]
    pub fn preorder_first(&self) -> usize {
        self.root
    }

    /// Get the next leaf of a pre-order walk (root, left, right)
    pub fn preorder_next(&self, leaf: usize) -> usize {
        preorder_next(&self.leaf, leaf)
    }

    /// Get the first leaf of a post-order walk
    pub fn postorder_first(&self) -> usize {
        postorder_first(&self.leaf, self.root)
    }

    /// Get the next leaf of a post-order walk (left, right, root)
    pub fn postorder_next(&self, leaf: usize) -> usize {
        postorder_next(&self.leaf, leaf)
    }

    // Allocate a new leaf
    fn alloc(&mut self, parent: usize) -> usize {
        let leaf = self.leaf.len();
        self.leaf.push(Leaf {
            parent,
            left: !0,
            right: !0,
            height: 0,
            count: 1,
        });
        leaf
    }

    // Debug tests
    #[cfg(test)]
    pub(crate) fn check<K: Ord>(&self, key_slice: &[K]) {
        debug_assert_eq!(self.leaf.len(), key_slice.len());
        check_tree(&self.leaf, self.root);
        debug_assert_eq!(check_count(&self.leaf, self.root), self.count());
        check_height(&self.leaf, self.root, self.balance);
        check_k(&self.leaf, self.root, key_slice);
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new(true)
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[ ")?;
        let mut leaf = self.first();
        while !leaf != 0 {
            write!(f, "{leaf} ")?;
            leaf = self.next(leaf);
        }
        write!(f, "]")?;
        Ok(())
    }
}

//-----------------------------------------------------------------------------------------------//

// IMPLEMENTATION NOTE
//
// The functions below are low level. They are not 'unsafe' in the Rust sense, but they implement
// very low level operations. Use with caution.

enum Location {
    Found(usize),
    Root,
    Left(usize),
    Right(usize),
}

// Get the cached height of a leaf, or -1 for a missing leaf
#[inline]
fn height(leaf: &[Leaf], x: usize) -> isize {
    if !x == 0 {
        -1
    } else {
        leaf[x].height
    }
}

// Recompute the height of a leaf from its children
#[inline]
fn update(leaf: &mut [Leaf], x: usize) {
    leaf[x].height = 1 + height(leaf, leaf[x].left).max(height(leaf, leaf[x].right));
}

// Get a leaf in a tree
fn get_k<K: Ord>(leaf: &[Leaf], mut x: usize, key: &K, key_slice: &[K]) -> usize {
    // `x` should be a root
    debug_assert!(!x == 0 || leaf[x].parent == !0);

    loop {
        if !x == 0 {
            return !0;
        }

        match key.cmp(&key_slice[x]) {
            Ordering::Equal => {
                return x;
            }
            Ordering::Less => x = leaf[x].left,
            Ordering::Greater => x = leaf[x].right,
        }
    }
}

// Locate a leaf in a tree, or if not found identify where to insert it
fn locate_k<K: Ord>(leaf: &[Leaf], mut x: usize, key: &K, key_slice: &[K]) -> Location {
    // `x` should be a root
    debug_assert!(!x == 0 || leaf[x].parent == !0);

    // First leaf is a special case
    if !x == 0 {
        return Location::Root;
    }

    loop {
        match key.cmp(&key_slice[x]) {
            Ordering::Equal => return Location::Found(x),
            Ordering::Less => {
                let y = leaf[x].left;
                if !y == 0 {
                    return Location::Left(x);
                }
                x = y;
            }
            Ordering::Greater => {
                let y = leaf[x].right;
                if !y == 0 {
                    return Location::Right(x);
                }
                x = y;
            }
        }
    }
}

// Walk from a leaf up to the root after an insertion below it
//
// Each leaf on the way has its height recomputed from its children and, if balancing is enabled,
// is rotated when its children differ in height by two. After a rotation the walk carries on from
// the leaf that replaced it. Returns the root of the tree, which may have changed.
fn retrace<K: Ord>(
    leaf: &mut [Leaf],
    mut x: usize,
    key: &K,
    key_slice: &[K],
    balance: bool,
) -> usize {
    loop {
        update(leaf, x);
        if balance {
            x = rebalance(leaf, x, key, key_slice);
        }

        let y = leaf[x].parent;
        if !y == 0 {
            return x;
        }
        x = y;
    }
}

// Rotate a leaf that has become unbalanced by inserting `key` below it
//
// The child on the heavy side is never the freshly inserted leaf, because a single leaf cannot
// outweigh its sibling by two, so its key is always present in `key_slice`. Returns the leaf now
// at the position of `x`.
fn rebalance<K: Ord>(leaf: &mut [Leaf], x: usize, key: &K, key_slice: &[K]) -> usize {
    let l = leaf[x].left;
    let r = leaf[x].right;

    match height(leaf, l) - height(leaf, r) {
        2 => {
            if *key < key_slice[l] {
                rotate_right(leaf, x)
            } else {
                rotate_left(leaf, l);
                rotate_right(leaf, x)
            }
        }
        -2 => {
            if *key > key_slice[r] {
                rotate_left(leaf, x)
            } else {
                rotate_right(leaf, r);
                rotate_left(leaf, x)
            }
        }
        d => {
            debug_assert!(d.abs() <= 1);
            x
        }
    }
}

// Rotate right, promoting the left child of `x` into its place
//
// The parent of `x` is relinked to the promoted leaf. Heights are recomputed bottom-up, so `x`
// before its new parent.
fn rotate_right(leaf: &mut [Leaf], x: usize) -> usize {
    let y = leaf[x].left;
    debug_assert!(!y != 0);

    let b = leaf[y].right;
    let p = leaf[x].parent;

    leaf[x].left = b;
    if !b != 0 {
        leaf[b].parent = x;
    }

    leaf[y].right = x;
    leaf[x].parent = y;
    leaf[y].parent = p;

    if !p != 0 {
        if leaf[p].left == x {
            leaf[p].left = y;
        } else {
            debug_assert_eq!(leaf[p].right, x);
            leaf[p].right = y;
        }
    }

    update(leaf, x);
    update(leaf, y);

    trace!("rotated right at leaf {x}, promoted leaf {y}");
    y
}

// Rotate left, promoting the right child of `x` into its place
fn rotate_left(leaf: &mut [Leaf], x: usize) -> usize {
    let y = leaf[x].right;
    debug_assert!(!y != 0);

    let b = leaf[y].left;
    let p = leaf[x].parent;

    leaf[x].right = b;
    if !b != 0 {
        leaf[b].parent = x;
    }

    leaf[y].left = x;
    leaf[x].parent = y;
    leaf[y].parent = p;

    if !p != 0 {
        if leaf[p].left == x {
            leaf[p].left = y;
        } else {
            debug_assert_eq!(leaf[p].right, x);
            leaf[p].right = y;
        }
    }

    update(leaf, x);
    update(leaf, y);

    trace!("rotated left at leaf {x}, promoted leaf {y}");
    y
}

// Get the first leaf (the left-most)
fn first(leaf: &[Leaf], mut x: usize) -> usize {
    // `x` should be a root
    debug_assert!(!x == 0 || leaf[x].parent == !0);

    if !x == 0 {
        return !0;
    }

    loop {
        let y = leaf[x].left;
        if !y == 0 {
            return x;
        }
        x = y;
    }
}

// Get the logical successor to a leaf
fn next(leaf: &[Leaf], mut x: usize) -> usize {
    let mut y = leaf[x].right;
    if !y != 0 {
        loop {
            let z = leaf[y].left;
            if !z == 0 {
                return y;
            }
            y = z;
        }
    }

    loop {
        let y = leaf[x].parent;
        if !y == 0 {
            return !0;
        }
        if leaf[y].left == x {
            return y;
        }
        debug_assert_eq!(leaf[y].right, x);
        x = y;
    }
}

// Get the successor to a leaf in a pre-order walk
fn preorder_next(leaf: &[Leaf], mut x: usize) -> usize {
    let y = leaf[x].left;
    if !y != 0 {
        return y;
    }

    let y = leaf[x].right;
    if !y != 0 {
        return y;
    }

    // Climb until we arrive from the left at a leaf with a right subtree
    loop {
        let y = leaf[x].parent;
        if !y == 0 {
            return !0;
        }
        if leaf[y].left == x {
            let z = leaf[y].right;
            if !z != 0 {
                return z;
            }
        }
        x = y;
    }
}

// Get the first leaf of a post-order walk, the deepest leaf reached by preferring left
fn postorder_first(leaf: &[Leaf], mut x: usize) -> usize {
    if !x == 0 {
        return !0;
    }

    loop {
        let y = leaf[x].left;
        if !y != 0 {
            x = y;
            continue;
        }
        let z = leaf[x].right;
        if !z != 0 {
            x = z;
            continue;
        }
        return x;
    }
}

// Get the successor to a leaf in a post-order walk
fn postorder_next(leaf: &[Leaf], x: usize) -> usize {
    let y = leaf[x].parent;
    if !y == 0 {
        return !0;
    }

    if leaf[y].left == x {
        let z = leaf[y].right;
        if !z != 0 {
            return postorder_first(leaf, z);
        }
    }

    y
}

//-----------------------------------------------------------------------------------------------//

// DEBUG : Check the tree structure
#[cfg(test)]
fn check_tree(leaf: &[Leaf], root: usize) {
    // Check we are starting at the root
    debug_assert!(!root == 0 || leaf[root].parent == !0);

    // Iterate over leaves and check each one
    let mut x = first(leaf, root);

    while !x != 0 {
        let y = leaf[x].left;
        let z = leaf[x].right;

        if !y != 0 {
            debug_assert_eq!(x, leaf[y].parent);
        }

        if !z != 0 {
            debug_assert_eq!(x, leaf[z].parent);
        }

        x = next(leaf, x);
    }
}

// DEBUG : Check the leaf count
#[cfg(test)]
fn check_count(leaf: &[Leaf], root: usize) -> usize {
    let mut x = first(leaf, root);
    let mut count = 0;

    while !x != 0 {
        count += 1;
        x = next(leaf, x);
    }

    count
}

// DEBUG : Check the cached heights, and the AVL property when balancing
#[cfg(test)]
fn check_height(leaf: &[Leaf], root: usize, balance: bool) {
    let mut x = postorder_first(leaf, root);

    while !x != 0 {
        let l = height(leaf, leaf[x].left);
        let r = height(leaf, leaf[x].right);

        debug_assert_eq!(leaf[x].height, 1 + l.max(r));
        if balance {
            debug_assert!((l - r).abs() <= 1);
        }

        x = postorder_next(leaf, x);
    }
}

// DEBUG : Check the key order
#[cfg(test)]
fn check_k<K: Ord>(leaf: &[Leaf], root: usize, key_slice: &[K]) {
    let mut x = first(leaf, root);
    if !x == 0 {
        return;
    }

    let mut y = next(leaf, x);
    while !y != 0 {
        debug_assert!(key_slice[x] < key_slice[y]);
        x = y;
        y = next(leaf, y);
    }
}

//-----------------------------------------------------------------------------------------------//

// Insert a key into a tree and its key slice
#[cfg(test)]
fn insert(tree: &mut Tree, key_slice: &mut Vec<usize>, key: usize) -> usize {
    let leaf = tree.set_k(&key, key_slice);
    if leaf == key_slice.len() {
        key_slice.push(key);
    }
    leaf
}

// Collect the keys of a pre-order walk
#[cfg(test)]
fn preorder_keys(tree: &Tree, key_slice: &[usize]) -> Vec<usize> {
    let mut keys = Vec::new();
    let mut leaf = tree.preorder_first();
    while !leaf != 0 {
        keys.push(key_slice[leaf]);
        leaf = tree.preorder_next(leaf);
    }
    keys
}

#[test]
// An empty tree
fn test_tree_0() {
    let tree = Tree::new(true);

    debug_assert_eq!(tree.count(), 0);
    debug_assert!(tree.is_empty());
    debug_assert_eq!(tree.height(), -1);
    debug_assert_eq!(tree.first(), !0);
    debug_assert_eq!(tree.preorder_first(), !0);
    debug_assert_eq!(tree.postorder_first(), !0);
}

#[test]
// Each of the four rotation cases at the root
fn test_tree_1() {
    use alloc::vec;

    for order in [[3, 2, 1], [3, 1, 2], [1, 2, 3], [1, 3, 2]] {
        let mut tree = Tree::new(true);
        let mut key_slice = Vec::new();

        for key in order {
            insert(&mut tree, &mut key_slice, key);
        }

        tree.check(&key_slice);
        debug_assert_eq!(tree.height(), 1);
        debug_assert_eq!(preorder_keys(&tree, &key_slice), vec![2, 1, 3]);
    }
}

#[test]
// A rotation below the root relinks the parent
fn test_tree_2() {
    use alloc::vec;

    let mut tree = Tree::new(true);
    let mut key_slice = Vec::new();

    for key in [5, 3, 8, 2, 1] {
        insert(&mut tree, &mut key_slice, key);
    }

    tree.check(&key_slice);
    debug_assert_eq!(tree.height(), 2);
    debug_assert_eq!(preorder_keys(&tree, &key_slice), vec![5, 2, 1, 3, 8]);

    // A double rotation within the right subtree
    for key in [6, 7, 9] {
        insert(&mut tree, &mut key_slice, key);
    }

    tree.check(&key_slice);
    debug_assert_eq!(tree.height(), 3);
    debug_assert_eq!(preorder_keys(&tree, &key_slice), vec![5, 2, 1, 3, 7, 6, 8, 9]);
}

#[test]
// Without balancing, ascending keys form a chain
fn test_tree_3() {
    let mut tree = Tree::new(false);
    let mut key_slice = Vec::new();

    for key in 0..100 {
        insert(&mut tree, &mut key_slice, key);
    }

    tree.check(&key_slice);
    debug_assert_eq!(tree.height(), 99);
    debug_assert_eq!(tree.first(), 0);
    debug_assert_eq!(tree.postorder_first(), 99);
}

#[test]
// Repeated keys reuse their leaf and bump its occurrence count
fn test_tree_4() {
    let mut tree = Tree::new(true);
    let mut key_slice = Vec::new();

    let a = insert(&mut tree, &mut key_slice, 4);
    insert(&mut tree, &mut key_slice, 6);
    let b = insert(&mut tree, &mut key_slice, 4);
    insert(&mut tree, &mut key_slice, 4);

    debug_assert_eq!(a, b);
    debug_assert_eq!(tree.count(), 2);
    debug_assert_eq!(tree.occurrences(a), 3);
    debug_assert_eq!(tree.occurrences(tree.get_k(&6, &key_slice)), 1);
    debug_assert_eq!(tree.get_k(&5, &key_slice), !0);
}

#[test]
// Leaves are displayed in key order
fn test_tree_5() {
    use alloc::string::ToString;

    let mut tree = Tree::new(true);
    let mut key_slice = Vec::new();

    for key in [5, 1, 9] {
        insert(&mut tree, &mut key_slice, key);
    }

    debug_assert_eq!(tree.to_string(), "[ 1 0 2 ]");
}

#[test]
// A stress test, checking the structure as it grows
fn test_tree_6() {
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut tree = Tree::new(true);
    let mut key_slice = Vec::new();

    for i in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        insert(&mut tree, &mut key_slice, key);

        if i % 10000 == 0 {
            tree.check(&key_slice);
        }
    }

    tree.check(&key_slice);

    // An AVL tree is never more than about 1.44 log2(n) high
    debug_assert!(tree.height() <= 24);
}
