//! Error types of this library.

use std::error::Error;
use std::io;
use std::{fmt, result};

/// A specialized Result type for this library.
pub type Result<T, E = FindSimitemError> = result::Result<T, E>;

/// Errors in find-simitem.
#[derive(Debug)]
pub enum FindSimitemError {
    /// Contains [`InputError`].
    Input(InputError),
    /// Contains [`LookupError`].
    Lookup(LookupError),
    /// Contains [`io::Error`].
    Io(io::Error),
}

impl fmt::Display for FindSimitemError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Input(e) => e.fmt(f),
            Self::Lookup(e) => e.fmt(f),
            Self::Io(e) => e.fmt(f),
        }
    }
}

impl Error for FindSimitemError {}

impl From<io::Error> for FindSimitemError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl FindSimitemError {
    pub(crate) const fn input(msg: &'static str) -> Self {
        Self::Input(InputError { msg })
    }

    pub(crate) const fn lookup(item_id: u32) -> Self {
        Self::Lookup(LookupError { item_id })
    }
}

/// Error used when the input data is unusable.
#[derive(Debug)]
pub struct InputError {
    msg: &'static str,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InputError: {}", self.msg)
    }
}

/// Error used when a queried item id is not in the catalog.
#[derive(Debug)]
pub struct LookupError {
    item_id: u32,
}

impl LookupError {
    /// Gets the item id that failed to resolve.
    pub const fn item_id(&self) -> u32 {
        self.item_id
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LookupError: item id {} is not in the catalog", self.item_id)
    }
}
