//! Errors raised while configuring a set
#![warn(missing_docs)]

extern crate alloc;

use alloc::string::String;
use core::fmt::{Display, Formatter};

use crate::config::SetKind;

/// Result type for set configuration
pub type Result<T> = core::result::Result<T, Error>;

/// Error type for set configuration.
///
/// Operations on the sets themselves cannot fail; only choosing a set from a configuration string
/// can.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The configuration string names no known kind of set.
    InvalidKind(String),

    /// The kind of set is known but has no implementation.
    Unimplemented(SetKind),
}

impl core::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidKind(kind) => write!(f, "invalid search structure type: {kind}"),
            Error::Unimplemented(kind) => write!(f, "search structure not implemented: {kind}"),
        }
    }
}
