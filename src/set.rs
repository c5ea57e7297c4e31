//! The contract shared by every set collection
#![warn(missing_docs)]

//-----------------------------------------------------------------------------------------------//

/// A collection of unique keys that supports insertion, membership and size.
///
/// Implementations are interchangeable behind `dyn Set<K>`. There is no removal, so `size` is
/// always the number of distinct keys ever added. `add` is the only mutator: any number of
/// readers may share a set, but a writer needs it exclusively, which the borrow checker enforces.
pub trait Set<K> {
    /// Add a key to the set.
    ///
    /// If an equal key is already present, membership and size are unchanged.
    fn add(&mut self, key: K);

    /// Check if an equal key has been added to the set
    fn contains(&self, key: &K) -> bool;

    /// Get the number of distinct keys in the set
    fn size(&self) -> usize;

    /// Check if the set has no keys
    #[inline]
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

//-----------------------------------------------------------------------------------------------//

/// Introspection of a set organised as a skip list.
///
/// A skip list keeps every key on level 0 and promotes each inserted key to the level above with
/// an independent biased coin flip, stopping at the first failure. Two sentinel keys, below and
/// above every real key, bound each level. `add` and `contains` are expected O(log n).
///
/// No skip list is provided by this crate; the trait fixes the shape one must have. All queries
/// answer 0 or `false` for a level that does not exist, rather than panicking.
pub trait LevelIntrospection<K>: Set<K> {
    /// Get the number of levels currently in use
    fn level_count(&self) -> usize;

    /// Get the number of keys on a level, not counting the sentinels
    fn elements_on_level(&self, level: usize) -> usize;

    /// Check if a key occupies a particular level
    fn is_element_on_level(&self, key: &K, level: usize) -> bool;
}
