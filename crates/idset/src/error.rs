use crate::{DecodeError, FormatError};

/// A result type defaulting to the crate [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `idset` can produce.
///
/// Every error is local to the call that reported it: a failed mutation
/// leaves the set untouched and a failed decode produces no set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An id or range bound is negative, reversed, or outside the universe of
    /// the set.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// A string does not match the RFC22 idset grammar.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A bracket template could not be formatted.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Errors raised when an id or range is not acceptable to a set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum RangeError {
    /// The range `lo-hi` has `lo > hi`.
    #[error("invalid range {lo}-{hi}: lower bound exceeds upper bound")]
    Reversed {
        /// Lower bound as given.
        lo: u32,
        /// Upper bound as given.
        hi: u32,
    },

    /// A negative value was offered as an id.
    #[error("negative id {id}")]
    Negative {
        /// The rejected value.
        id: i128,
    },

    /// The id is not below the universe size of the set.
    #[error("id {id} out of range for idset of size {size}")]
    OutOfBounds {
        /// The rejected value.
        id: i128,
        /// Universe size the id was checked against.
        size: u32,
    },
}
