use crate::{IdSet, RangeError, Result, ToId};
use alloc::{borrow::Cow, collections::BTreeSet, string::String, vec::Vec};
use core::iter::Peekable;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, RangeInclusive, Sub, SubAssign};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// An argument to the set algebra of [`IdSet`].
///
/// Operands may be an existing set, an RFC22 string, or any collection of
/// primitive integers. [`Operand::coerce`] turns any of them into a set, which
/// is the only place operand errors arise.
///
/// ```
/// use idset::{IdSet, Operand};
/// use std::collections::BTreeSet;
///
/// let base: IdSet = "0-3".parse()?;
/// let other: IdSet = "10".parse()?;
/// let all = base.union([
///     Operand::from(&other),
///     Operand::from("5-6"),
///     Operand::from(BTreeSet::from([8u32, 9])),
///     Operand::ids(12..14u64),
/// ])?;
/// assert_eq!(all.to_string(), "0-3,5-6,8-10,12-13");
/// # Ok::<(), idset::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand<'a> {
    /// An existing set, used as is.
    Set(&'a IdSet),
    /// An RFC22 string, decoded on coercion.
    Text(&'a str),
    /// Integers, checked when the operand is built. The first value that
    /// cannot be an id is kept and reported on coercion.
    Ids(core::result::Result<Vec<u32>, RangeError>),
}

impl<'a> Operand<'a> {
    /// Builds an operand from any collection of primitive integers.
    pub fn ids<I>(ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToId,
    {
        Self::Ids(ids.into_iter().map(ToId::to_id).collect())
    }

    /// Converts the operand into a set.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`](crate::DecodeError) for malformed text and a
    /// [`RangeError`] for integers that cannot be ids.
    pub fn coerce(self) -> Result<Cow<'a, IdSet>> {
        match self {
            Self::Set(set) => Ok(Cow::Borrowed(set)),
            Self::Text(text) => IdSet::decode(text).map(Cow::Owned),
            Self::Ids(ids) => IdSet::try_from_ids(ids?).map(Cow::Owned),
        }
    }
}

impl<'a> From<&'a IdSet> for Operand<'a> {
    fn from(set: &'a IdSet) -> Self {
        Self::Set(set)
    }
}

impl<'a> From<&'a str> for Operand<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Operand<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text.as_str())
    }
}

impl<T: ToId> FromIterator<T> for Operand<'_> {
    fn from_iter<I: IntoIterator<Item = T>>(ids: I) -> Self {
        Self::ids(ids)
    }
}

impl<T: ToId> From<Vec<T>> for Operand<'_> {
    fn from(ids: Vec<T>) -> Self {
        Self::ids(ids)
    }
}

impl<T: ToId> From<&[T]> for Operand<'_> {
    fn from(ids: &[T]) -> Self {
        Self::ids(ids.iter().copied())
    }
}

impl<T: ToId, const N: usize> From<[T; N]> for Operand<'_> {
    fn from(ids: [T; N]) -> Self {
        Self::ids(ids)
    }
}

impl<T: ToId> From<BTreeSet<T>> for Operand<'_> {
    fn from(ids: BTreeSet<T>) -> Self {
        Self::ids(ids)
    }
}

impl<T: ToId> From<&BTreeSet<T>> for Operand<'_> {
    fn from(ids: &BTreeSet<T>) -> Self {
        Self::ids(ids.iter().copied())
    }
}

#[cfg(feature = "std")]
impl<T: ToId, S> From<std::collections::HashSet<T, S>> for Operand<'_> {
    fn from(ids: std::collections::HashSet<T, S>) -> Self {
        Self::ids(ids)
    }
}

impl IdSet {
    /// Returns the union of this set and every operand. Nothing is mutated.
    ///
    /// # Errors
    ///
    /// Returns the first coercion error among the operands.
    pub fn union<'a, I>(&self, operands: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Operand<'a>>,
    {
        let mut result = self.clone();
        for operand in operands {
            let other = operand.into().coerce()?;
            result = union(&result, &other);
        }
        Ok(result)
    }

    /// Returns the intersection of this set and every operand. Nothing is
    /// mutated.
    ///
    /// # Errors
    ///
    /// Returns the first coercion error among the operands.
    pub fn intersect<'a, I>(&self, operands: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Operand<'a>>,
    {
        let mut result = self.clone();
        for operand in operands {
            let other = operand.into().coerce()?;
            result = intersect(&result, &other);
        }
        Ok(result)
    }

    /// Removes every id of `operand` from this set.
    ///
    /// Ids of the operand outside this set's universe are simply absent here,
    /// so they are not an error.
    ///
    /// ```
    /// use idset::IdSet;
    ///
    /// let mut ids: IdSet = "0-9".parse()?;
    /// ids.subtract("2-5")?;
    /// ids.subtract(vec![9u32])?;
    /// assert_eq!(ids.to_string(), "0-1,6-8");
    /// # Ok::<(), idset::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the coercion error of the operand; the set is unchanged.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
    pub fn subtract<'a>(&mut self, operand: impl Into<Operand<'a>>) -> Result<()> {
        let other = operand.into().coerce()?;
        for range in other.ranges() {
            let (lo, hi) = range.into_inner();
            self.remove_unchecked(lo, hi);
        }
        Ok(())
    }

    /// Adds every id of `operand` to this set.
    ///
    /// # Errors
    ///
    /// Returns the coercion error of the operand, or a
    /// [`RangeError`](crate::RangeError) if one
    /// of its ids is outside this set's universe; the set is unchanged.
    pub fn add<'a>(&mut self, operand: impl Into<Operand<'a>>) -> Result<()> {
        let other = operand.into().coerce()?;
        if other.is_empty() {
            return Ok(());
        }
        self.ensure_fits(other.last())?;
        for range in other.ranges() {
            let (lo, hi) = range.into_inner();
            self.insert_unchecked(lo, hi);
        }
        Ok(())
    }

    /// Returns `true` if both sets hold exactly the same ids. Same as `==`.
    #[inline]
    pub fn equal(&self, other: &IdSet) -> bool {
        self == other
    }
}

/// Sweeps two ascending range sequences, yielding ranges of the merged
/// sequence in `lo` order.
struct MergeByLo<A: Iterator, B: Iterator> {
    a: Peekable<A>,
    b: Peekable<B>,
}

impl<A, B> Iterator for MergeByLo<A, B>
where
    A: Iterator<Item = RangeInclusive<u32>>,
    B: Iterator<Item = RangeInclusive<u32>>,
{
    type Item = RangeInclusive<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        let take_b = match (self.a.peek(), self.b.peek()) {
            (Some(x), Some(y)) => y.start() < x.start(),
            (Some(_), None) => false,
            (None, _) => true,
        };
        if take_b { self.b.next() } else { self.a.next() }
    }
}

fn union(a: &IdSet, b: &IdSet) -> IdSet {
    let mut out = a.empty_like(b.size());
    let mut merged = MergeByLo {
        a: a.ranges().peekable(),
        b: b.ranges().peekable(),
    };
    let Some(first) = merged.next() else {
        return out;
    };
    let (mut lo, mut hi) = first.into_inner();
    for range in merged {
        let (next_lo, next_hi) = range.into_inner();
        if u64::from(next_lo) <= u64::from(hi) + 1 {
            hi = hi.max(next_hi);
        } else {
            out.push_unchecked(lo, hi);
            (lo, hi) = (next_lo, next_hi);
        }
    }
    out.push_unchecked(lo, hi);
    out
}

fn intersect(a: &IdSet, b: &IdSet) -> IdSet {
    let mut out = a.empty_like(b.size());
    let mut xs = a.ranges().peekable();
    let mut ys = b.ranges().peekable();
    while let (Some(x), Some(y)) = (xs.peek(), ys.peek()) {
        let lo = *x.start().max(y.start());
        let hi = *x.end().min(y.end());
        if lo <= hi {
            out.push_unchecked(lo, hi);
        }
        if x.end() < y.end() {
            xs.next();
        } else {
            ys.next();
        }
    }
    out
}

impl BitOr for &IdSet {
    type Output = IdSet;

    fn bitor(self, rhs: &IdSet) -> IdSet {
        union(self, rhs)
    }
}

impl BitAnd for &IdSet {
    type Output = IdSet;

    fn bitand(self, rhs: &IdSet) -> IdSet {
        intersect(self, rhs)
    }
}

impl Sub for &IdSet {
    type Output = IdSet;

    fn sub(self, rhs: &IdSet) -> IdSet {
        let mut out = self.clone();
        out -= rhs;
        out
    }
}

impl BitOrAssign<&IdSet> for IdSet {
    fn bitor_assign(&mut self, rhs: &IdSet) {
        *self = union(self, rhs);
    }
}

impl BitAndAssign<&IdSet> for IdSet {
    fn bitand_assign(&mut self, rhs: &IdSet) {
        *self = intersect(self, rhs);
    }
}

impl SubAssign<&IdSet> for IdSet {
    fn sub_assign(&mut self, rhs: &IdSet) {
        for range in rhs.ranges() {
            let (lo, hi) = range.into_inner();
            self.remove_unchecked(lo, hi);
        }
    }
}
