//! Choosing a set from a configuration string
#![warn(missing_docs)]

extern crate alloc;

use alloc::{boxed::Box, string::ToString};
use compact_str::CompactString;
use core::{
    fmt::{self, Display},
    str::FromStr,
};
use log::debug;

use crate::{
    avl::AvlSet,
    baseline::{EmptySet, VectorSet},
    error::{Error, Result},
    hash::HashSet,
    hashing,
    set::Set,
};

//-----------------------------------------------------------------------------------------------//

/// The kinds of set a word set can be built from.
///
/// Each kind has a configuration name, which is what `FromStr` accepts and `Display` writes.
///
/// | Kind          | Name             |
/// |:--------------|:-----------------|
/// | `Avl`         | `"AVL"`          |
/// | `Empty`       | `"EMPTY"`        |
/// | `HashZero`    | `"HASH ZERO"`    |
/// | `HashSum`     | `"HASH SUM"`     |
/// | `HashProduct` | `"HASH PRODUCT"` |
/// | `Vector`      | `"VECTOR"`       |
/// | `SkipList`    | `"SKIPLIST"`     |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetKind {
    /// A balanced `AvlSet`
    Avl,
    /// An `EmptySet`
    Empty,
    /// A `HashSet` using `hash_as_zero`
    HashZero,
    /// A `HashSet` using `hash_as_sum`
    HashSum,
    /// A `HashSet` using `hash_as_product`
    HashProduct,
    /// A `VectorSet`
    Vector,
    /// A skip list, which is not implemented
    SkipList,
}

impl SetKind {
    /// Every kind of set, in the order they are usually listed
    pub const ALL: [SetKind; 7] = [
        SetKind::Avl,
        SetKind::Empty,
        SetKind::HashZero,
        SetKind::HashSum,
        SetKind::HashProduct,
        SetKind::Vector,
        SetKind::SkipList,
    ];

    /// Get the configuration name of the kind
    pub fn name(self) -> &'static str {
        match self {
            SetKind::Avl => "AVL",
            SetKind::Empty => "EMPTY",
            SetKind::HashZero => "HASH ZERO",
            SetKind::HashSum => "HASH SUM",
            SetKind::HashProduct => "HASH PRODUCT",
            SetKind::Vector => "VECTOR",
            SetKind::SkipList => "SKIPLIST",
        }
    }

    /// Check if `make_word_set` can build this kind
    #[inline]
    pub fn is_implemented(self) -> bool {
        !matches!(self, SetKind::SkipList)
    }
}

impl Display for SetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SetKind {
    type Err = Error;

    /// Parse a configuration name. Surrounding whitespace is ignored, case is not.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        SetKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| Error::InvalidKind(s.to_string()))
    }
}

//-----------------------------------------------------------------------------------------------//

/// A set of words, chosen at run time
pub type WordSet = Box<dyn Set<CompactString>>;

/// Build an empty word set of the given kind.
///
/// Fails with `Error::Unimplemented` for a kind with no implementation.
pub fn make_word_set(kind: SetKind) -> Result<WordSet> {
    let set: WordSet = match kind {
        SetKind::Avl => Box::new(AvlSet::new(true)),
        SetKind::Empty => Box::new(EmptySet::new()),
        SetKind::HashZero => Box::new(HashSet::new(|word: &CompactString| {
            hashing::hash_as_zero(word)
        })),
        SetKind::HashSum => Box::new(HashSet::new(|word: &CompactString| {
            hashing::hash_as_sum(word)
        })),
        SetKind::HashProduct => Box::new(HashSet::new(|word: &CompactString| {
            hashing::hash_as_product(word)
        })),
        SetKind::Vector => Box::new(VectorSet::new()),
        SetKind::SkipList => return Err(Error::Unimplemented(kind)),
    };

    debug!("built {kind} word set");
    Ok(set)
}

//-----------------------------------------------------------------------------------------------//

#[test]
// Every kind parses from its own name
fn test_config_0() {
    for kind in SetKind::ALL {
        debug_assert_eq!(kind.to_string().parse::<SetKind>(), Ok(kind));
    }

    debug_assert_eq!("  HASH SUM\n".parse::<SetKind>(), Ok(SetKind::HashSum));
}

#[test]
// Unknown names are rejected with the original text
fn test_config_1() {
    debug_assert_eq!(
        "hash sum".parse::<SetKind>(),
        Err(Error::InvalidKind("hash sum".to_string()))
    );
    debug_assert_eq!(
        "".parse::<SetKind>(),
        Err(Error::InvalidKind("".to_string()))
    );
    debug_assert_eq!(
        Error::InvalidKind("TRIE".to_string()).to_string(),
        "invalid search structure type: TRIE"
    );
}

#[test]
// The skip list cannot be built
fn test_config_2() {
    debug_assert!(!SetKind::SkipList.is_implemented());
    debug_assert_eq!(
        make_word_set(SetKind::SkipList).err(),
        Some(Error::Unimplemented(SetKind::SkipList))
    );
    debug_assert_eq!(
        Error::Unimplemented(SetKind::SkipList).to_string(),
        "search structure not implemented: SKIPLIST"
    );
}

#[test]
// Every implemented kind behaves as a set of words
fn test_config_3() {
    let words = ["the", "quick", "brown", "fox", "the", "lazy", "dog"];

    for kind in SetKind::ALL.into_iter().filter(|kind| kind.is_implemented()) {
        let mut set = match make_word_set(kind) {
            Ok(set) => set,
            Err(error) => panic!("{error}"),
        };

        for word in words {
            set.add(CompactString::new(word));
        }

        if kind == SetKind::Empty {
            debug_assert_eq!(set.size(), 0);
            debug_assert!(!set.contains(&CompactString::new("fox")));
        } else {
            debug_assert_eq!(set.size(), 6);
            debug_assert!(set.contains(&CompactString::new("fox")));
            debug_assert!(!set.contains(&CompactString::new("cat")));
        }
    }
}
