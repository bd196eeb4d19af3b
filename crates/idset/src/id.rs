use crate::RangeError;

/// Sentinel returned by [`IdSet::first`](crate::IdSet::first),
/// [`IdSet::next`](crate::IdSet::next) and [`IdSet::last`](crate::IdSet::last)
/// when no such id exists. It is never a member of any set.
pub const INVALID_ID: u32 = u32::MAX;

/// The largest universe an [`IdSet`](crate::IdSet) can have. A set of this
/// size accepts every id below [`INVALID_ID`].
pub const MAX_SIZE: u32 = INVALID_ID;

/// Universe used when a zero size is requested from
/// [`IdSet::with_size`](crate::IdSet::with_size).
pub const DEFAULT_SIZE: u32 = 1024;

/// Trait for converting primitive integers into ids.
///
/// Conversion only rejects values that can never be ids (negative values and
/// values at or above [`MAX_SIZE`]); the bound of a particular set is checked
/// when the id is inserted.
pub trait ToId: Copy {
    /// Converts this value into an id.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::Negative`] for negative values and
    /// [`RangeError::OutOfBounds`] for values that do not fit below
    /// [`MAX_SIZE`].
    fn to_id(self) -> Result<u32, RangeError>;
}

macro_rules! impl_to_id {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToId for $ty {
                #[inline]
                #[allow(clippy::cast_lossless, clippy::unnecessary_cast)]
                fn to_id(self) -> Result<u32, RangeError> {
                    let wide = self as i128;
                    if wide < 0 {
                        return Err(RangeError::Negative { id: wide });
                    }
                    if wide >= MAX_SIZE as i128 {
                        return Err(RangeError::OutOfBounds {
                            id: wide,
                            size: MAX_SIZE,
                        });
                    }
                    Ok(wide as u32)
                }
            }
        )*
    };
}

impl_to_id!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, i128);

/// Checks `id < size`.
#[inline]
pub(crate) const fn check_bound(id: u32, size: u32) -> Result<u32, RangeError> {
    if id >= size {
        return Err(RangeError::OutOfBounds {
            id: id as i128,
            size,
        });
    }
    Ok(id)
}

/// Checks `lo <= hi` and `hi < size`.
#[inline]
pub(crate) const fn check_range(lo: u32, hi: u32, size: u32) -> Result<(), RangeError> {
    if lo > hi {
        return Err(RangeError::Reversed { lo, hi });
    }
    if let Err(e) = check_bound(lo, size) {
        return Err(e);
    }
    if let Err(e) = check_bound(hi, size) {
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_to_id() {
        assert_eq!(0u8.to_id(), Ok(0));
        assert_eq!(4095u16.to_id(), Ok(4095));
        assert_eq!((INVALID_ID - 1).to_id(), Ok(INVALID_ID - 1));
        assert_eq!(
            INVALID_ID.to_id(),
            Err(RangeError::OutOfBounds {
                id: INVALID_ID as i128,
                size: MAX_SIZE
            })
        );
        assert_eq!(
            u64::MAX.to_id(),
            Err(RangeError::OutOfBounds {
                id: u64::MAX as i128,
                size: MAX_SIZE
            })
        );
    }

    #[test]
    fn signed_to_id() {
        assert_eq!(7i32.to_id(), Ok(7));
        assert_eq!((-1i32).to_id(), Err(RangeError::Negative { id: -1 }));
        assert_eq!(
            i64::MIN.to_id(),
            Err(RangeError::Negative {
                id: i64::MIN as i128
            })
        );
    }

    #[test]
    fn range_checks() {
        assert_eq!(check_range(3, 3, 4), Ok(()));
        assert_eq!(
            check_range(3, 1, 4),
            Err(RangeError::Reversed { lo: 3, hi: 1 })
        );
        assert_eq!(
            check_range(1, 4, 4),
            Err(RangeError::OutOfBounds { id: 4, size: 4 })
        );
    }
}
