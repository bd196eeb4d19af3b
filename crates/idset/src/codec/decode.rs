use crate::{DecodeError, Error, IdSet, MAX_SIZE, Result};
use core::str::FromStr;
#[cfg(feature = "tracing")]
use tracing::instrument;

impl IdSet {
    /// Decodes an RFC22 idset string such as `"0,5,7-9"` or `"[0-3]"`.
    ///
    /// Terms do not have to be sorted or disjoint; overlapping and duplicate
    /// terms are merged. The empty string (or `"[]"`) decodes to an empty set.
    ///
    /// ```
    /// use idset::{DecodeError, Error, IdSet};
    ///
    /// let ids = IdSet::decode("7,0-3,2")?;
    /// assert_eq!(ids.to_string(), "0-3,7");
    ///
    /// let err = IdSet::decode("3-1").unwrap_err();
    /// assert_eq!(err, Error::Decode(DecodeError::ReversedRange { lo: 3, hi: 1 }));
    /// # Ok::<(), idset::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the input does not follow the grammar:
    /// stray brackets, empty terms, non-digits, leading zeros, missing range
    /// bounds, numbers too large to be ids, or ranges whose upper bound does
    /// not exceed the lower one.
    #[cfg_attr(feature = "tracing", instrument(level = "trace"))]
    pub fn decode(s: &str) -> Result<Self> {
        let mut set = Self::new();
        match decode_terms(s.as_bytes(), |lo, hi| set.insert_unchecked(lo, hi)) {
            Ok(()) => Ok(set),
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %e, "idset decode failed");
                Err(Error::Decode(e))
            }
        }
    }
}

impl FromStr for IdSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

/// Parses `input` and hands every term to `emit` as an inclusive range.
/// Nothing is emitted past the first error, but earlier terms may have been.
fn decode_terms<F>(input: &[u8], mut emit: F) -> Result<(), DecodeError>
where
    F: FnMut(u32, u32),
{
    let (body, offset) = strip_brackets(input)?;
    if body.is_empty() {
        return Ok(());
    }
    if body.iter().any(|&b| b == b'[' || b == b']') {
        return Err(DecodeError::UnbalancedBrackets);
    }

    let mut pos = offset;
    for term in body.split(|&b| b == b',') {
        let (lo, hi) = decode_term(term, pos)?;
        emit(lo, hi);
        pos += term.len() + 1;
    }
    Ok(())
}

/// Removes one pair of enclosing brackets, returning the body and its offset.
fn strip_brackets(input: &[u8]) -> Result<(&[u8], usize), DecodeError> {
    match (input.first(), input.last()) {
        (Some(b'['), Some(b']')) if input.len() >= 2 => Ok((&input[1..input.len() - 1], 1)),
        (Some(b'['), _) | (_, Some(b']')) => Err(DecodeError::UnbalancedBrackets),
        _ => Ok((input, 0)),
    }
}

/// Decodes `N` or `N-M` starting at byte offset `pos`.
fn decode_term(term: &[u8], pos: usize) -> Result<(u32, u32), DecodeError> {
    if term.is_empty() {
        return Err(DecodeError::EmptyTerm { pos });
    }
    let Some(dash) = term.iter().position(|&b| b == b'-') else {
        let id = decode_number(term, pos)?;
        return Ok((id, id));
    };

    let (lo, hi) = (&term[..dash], &term[dash + 1..]);
    if lo.is_empty() {
        return Err(DecodeError::MissingBound { pos });
    }
    if hi.is_empty() {
        return Err(DecodeError::MissingBound {
            pos: pos + dash + 1,
        });
    }
    let lo = decode_number(lo, pos)?;
    let hi = decode_number(hi, pos + dash + 1)?;
    if hi <= lo {
        return Err(DecodeError::ReversedRange { lo, hi });
    }
    Ok((lo, hi))
}

/// Decodes a non-empty decimal number naming a valid id.
fn decode_number(digits: &[u8], pos: usize) -> Result<u32, DecodeError> {
    let mut value = 0u64;
    for (i, &b) in digits.iter().enumerate() {
        if !b.is_ascii_digit() {
            return Err(DecodeError::InvalidByte { pos: pos + i, byte: b });
        }
        value = value.saturating_mul(10).saturating_add(u64::from(b - b'0'));
    }
    if digits.len() > 1 && digits[0] == b'0' {
        return Err(DecodeError::LeadingZero { pos });
    }
    if value >= u64::from(MAX_SIZE) {
        return Err(DecodeError::Overflow { pos });
    }
    Ok(value as u32)
}
