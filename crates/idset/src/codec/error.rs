/// Errors raised while decoding an RFC22 idset string.
///
/// Positions are byte offsets into the decoded string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// A `[` without a closing `]` (or the reverse), or a bracket anywhere
    /// other than around the whole list.
    #[error("unbalanced brackets")]
    UnbalancedBrackets,

    /// Nothing between two commas, or a leading or trailing comma.
    #[error("empty term at {pos}")]
    EmptyTerm {
        /// Offset of the empty term.
        pos: usize,
    },

    /// A byte that is neither a digit nor a separator.
    #[error("invalid byte {byte:#04x} at {pos}")]
    InvalidByte {
        /// Offset of the byte.
        pos: usize,
        /// The offending byte.
        byte: u8,
    },

    /// A number with a superfluous leading zero, such as `01`.
    #[error("leading zero at {pos}")]
    LeadingZero {
        /// Offset of the number.
        pos: usize,
    },

    /// A range missing one of its bounds, such as `0-` or `-5`.
    #[error("range bound missing at {pos}")]
    MissingBound {
        /// Offset where the bound was expected.
        pos: usize,
    },

    /// A number too large to be an id.
    #[error("id too large at {pos}")]
    Overflow {
        /// Offset of the number.
        pos: usize,
    },

    /// A range `lo-hi` with `hi <= lo`.
    #[error("invalid range {lo}-{hi}")]
    ReversedRange {
        /// Lower bound as written.
        lo: u32,
        /// Upper bound as written.
        hi: u32,
    },
}
