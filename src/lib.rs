//! ## Introduction
//!
//! This crate implements a small family of interchangeable set collections. Every collection
//! stores unique elements and satisfies the same [`Set`] trait, so callers such as a spell
//! checker can pick a backing structure at run time and only ever talk to `add`, `contains`
//! and `size`.
//!
//! ## Contents
//!
//! <center>
//!
//! | Type        | Stores | Organised By      | Extras                                |
//! |:------------|:-------|:------------------|:--------------------------------------|
//! | `AvlSet`    | Key    | Ord (AVL tree)    | height, traversals, ascending `iter`  |
//! | `HashSet`   | Key    | Injected hash     | capacity, bucket introspection        |
//! | `VectorSet` | Key    | Insertion order   | baseline, linear scan                 |
//! | `EmptySet`  | -      | -                 | baseline, always empty                |
//!
//! </center>
//!
//! The balancing of an `AvlSet` can be switched off at construction, in which case it behaves
//! as a plain binary search tree. A `HashSet` is a separately chained table that grows to
//! `capacity * 2 + 1` buckets whenever its load factor exceeds 0.8.
//!
//! Word sets for the spell-check shell are built from a configuration string with
//! [`make_word_set`], which parses into a [`SetKind`].
//!
//! The crate exposes an additional type `util::Tree` that provides the foundation of `AvlSet`.
//! It manages a set of `usize` indices into an external vector of keys, without storing the
//! vector itself.
//!
//! ## Logging
//!
//! Rotations and table growth are reported through the `log` facade at `trace` and `debug`
//! level. The crate never installs a logger itself.

#![no_std]
#![warn(missing_docs)]

mod avl;
mod baseline;
mod config;
mod error;
mod hash;
pub mod hashing;
mod set;
pub mod util;

pub use avl::*;
pub use baseline::*;
pub use config::*;
pub use error::*;
pub use hash::*;
pub use set::*;
