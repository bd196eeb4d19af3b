mod iter;

pub use iter::*;

use crate::{
    DEFAULT_SIZE, EncodeFlags, INVALID_ID, MAX_SIZE, Result, ToId,
    id::{check_bound, check_range},
};
use alloc::{collections::BTreeMap, vec::Vec};
use core::{fmt, hash};
#[cfg(feature = "tracing")]
use tracing::instrument;

bitflags::bitflags! {
    /// Options for [`IdSet::with_size`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CreateFlags: u32 {
        /// Grow the universe instead of failing when an id at or above the
        /// current size is set.
        const AUTOGROW = 0x4;
    }
}

/// A set of non-negative integer ids.
///
/// Members are stored as sorted, disjoint, non-adjacent inclusive ranges, so
/// the cost of a set depends on how fragmented it is rather than how many ids
/// it holds. Ranges that touch or overlap are always merged on insertion.
///
/// Each set has a universe `size`; ids must be below it. Sets built with
/// [`IdSet::new`], decoded from text, or collected from integers use
/// [`MAX_SIZE`]. The size never takes part in equality.
///
/// # Example
///
/// ```
/// use idset::{EncodeFlags, IdSet, INVALID_ID};
///
/// let mut ids = IdSet::new();
/// ids.set_range(0, 3)?;
/// ids.set(4)?;
/// assert_eq!(ids.encode(EncodeFlags::RANGE), "0-4");
///
/// assert_eq!(ids.first(), 0);
/// assert_eq!(ids.next(2), 3);
/// assert_eq!(ids.next(ids.last()), INVALID_ID);
/// # Ok::<(), idset::Error>(())
/// ```
#[derive(Clone)]
pub struct IdSet {
    // ranges[lo] = hi for every member range lo..=hi
    ranges: BTreeMap<u32, u32>,
    count: u64,
    size: u32,
    autogrow: bool,
}

#[inline]
const fn width(lo: u32, hi: u32) -> u64 {
    (hi - lo) as u64 + 1
}

impl IdSet {
    /// Creates an empty set accepting every id below [`INVALID_ID`].
    pub const fn new() -> Self {
        Self {
            ranges: BTreeMap::new(),
            count: 0,
            size: MAX_SIZE,
            autogrow: false,
        }
    }

    /// Creates an empty set whose ids must be below `size`.
    ///
    /// A `size` of zero selects [`DEFAULT_SIZE`]. With
    /// [`CreateFlags::AUTOGROW`] the universe is enlarged on demand, up to
    /// [`MAX_SIZE`].
    ///
    /// ```
    /// use idset::{CreateFlags, IdSet};
    ///
    /// let mut fixed = IdSet::with_size(100, CreateFlags::empty());
    /// assert!(fixed.set(99).is_ok());
    /// assert!(fixed.set(100).is_err());
    ///
    /// let mut growing = IdSet::with_size(1, CreateFlags::AUTOGROW);
    /// growing.set(2).unwrap();
    /// assert!(growing.size() > 2);
    /// ```
    pub const fn with_size(size: u32, flags: CreateFlags) -> Self {
        Self {
            ranges: BTreeMap::new(),
            count: 0,
            size: if size == 0 { DEFAULT_SIZE } else { size },
            autogrow: flags.contains(CreateFlags::AUTOGROW),
        }
    }

    /// Creates a set holding the inclusive range `lo..=hi`.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`](crate::RangeError) if `lo > hi` or
    /// `hi >= MAX_SIZE`.
    pub fn from_range(lo: u32, hi: u32) -> Result<Self> {
        let mut set = Self::new();
        set.set_range(lo, hi)?;
        Ok(set)
    }

    /// Creates a set from a collection of primitive integers.
    ///
    /// Every element is validated before anything is inserted, so either all
    /// of them end up in the set or an error is returned.
    ///
    /// ```
    /// use idset::{IdSet, RangeError, Error};
    ///
    /// let ids = IdSet::try_from_ids([3u32, 0, 1, 2, 2])?;
    /// assert_eq!(ids.to_string(), "0-3");
    ///
    /// let err = IdSet::try_from_ids([1i32, -1]).unwrap_err();
    /// assert_eq!(err, Error::Range(RangeError::Negative { id: -1 }));
    /// # Ok::<(), idset::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`](crate::RangeError) if any element is negative
    /// or not below [`MAX_SIZE`].
    pub fn try_from_ids<I, T>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: ToId,
    {
        let mut set = Self::new();
        set.try_extend(ids)?;
        Ok(set)
    }

    /// Inserts every element of `ids`, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`](crate::RangeError) if any element is negative
    /// or outside the universe of this set. The set is unchanged on error.
    pub fn try_extend<I, T>(&mut self, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: ToId,
    {
        let limit = self.limit();
        let mut ids = ids
            .into_iter()
            .map(|v| v.to_id().and_then(|id| check_bound(id, limit)))
            .collect::<core::result::Result<Vec<u32>, _>>()?;
        ids.sort_unstable();
        ids.dedup();

        let Some(&max) = ids.last() else {
            return Ok(());
        };
        self.grow_to(max);

        let mut runs = ids.into_iter();
        let Some(first) = runs.next() else {
            return Ok(());
        };
        let (mut lo, mut hi) = (first, first);
        for id in runs {
            if id == hi + 1 {
                hi = id;
            } else {
                self.insert_unchecked(lo, hi);
                (lo, hi) = (id, id);
            }
        }
        self.insert_unchecked(lo, hi);
        Ok(())
    }

    /// Returns the universe size: ids must be below this value.
    #[inline]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns the number of ids in the set.
    #[inline]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Returns `true` if the set holds no ids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Returns the number of disjoint ranges the set is stored as.
    #[inline]
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    /// Adds `id` to the set.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`](crate::RangeError) if `id` is outside the
    /// universe of the set.
    #[inline]
    pub fn set(&mut self, id: u32) -> Result<()> {
        self.set_range(id, id)
    }

    /// Adds every id in `lo..=hi` to the set, merging it with any range it
    /// overlaps or touches.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`](crate::RangeError) if `lo > hi` or `hi` is
    /// outside the universe of the set.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn set_range(&mut self, lo: u32, hi: u32) -> Result<()> {
        check_range(lo, hi, self.limit())?;
        self.grow_to(hi);
        self.insert_unchecked(lo, hi);
        Ok(())
    }

    /// Removes `id` from the set. Removing an absent id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`](crate::RangeError) if `id` is outside the
    /// universe of the set.
    #[inline]
    pub fn clear(&mut self, id: u32) -> Result<()> {
        self.clear_range(id, id)
    }

    /// Removes every id in `lo..=hi` from the set, splitting or trimming the
    /// ranges it intersects.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`](crate::RangeError) if `lo > hi` or `hi` is
    /// outside the universe of the set.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn clear_range(&mut self, lo: u32, hi: u32) -> Result<()> {
        check_range(lo, hi, self.limit())?;
        self.remove_unchecked(lo, hi);
        Ok(())
    }

    /// Returns `true` if `id` is in the set.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`](crate::RangeError) if `id` is outside the
    /// universe of the set.
    pub fn test(&self, id: u32) -> Result<bool> {
        check_bound(id, self.limit())?;
        Ok(self.contains(id))
    }

    /// Returns `true` if every id in `lo..=hi` is in the set.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`](crate::RangeError) if `lo > hi` or `hi` is
    /// outside the universe of the set.
    pub fn contains_range(&self, lo: u32, hi: u32) -> Result<bool> {
        check_range(lo, hi, self.limit())?;
        Ok(self
            .range_containing(lo)
            .is_some_and(|(_, range_hi)| range_hi >= hi))
    }

    /// Returns the smallest id in the set, or [`INVALID_ID`] if it is empty.
    pub fn first(&self) -> u32 {
        self.ranges
            .first_key_value()
            .map_or(INVALID_ID, |(&lo, _)| lo)
    }

    /// Returns the largest id in the set, or [`INVALID_ID`] if it is empty.
    pub fn last(&self) -> u32 {
        self.ranges
            .last_key_value()
            .map_or(INVALID_ID, |(_, &hi)| hi)
    }

    /// Returns the smallest id in the set strictly greater than `id`, or
    /// [`INVALID_ID`] if there is none. `id` does not have to be a member.
    pub fn next(&self, id: u32) -> u32 {
        let Some(target) = id.checked_add(1) else {
            return INVALID_ID;
        };
        if self.contains(target) {
            return target;
        }
        self.ranges
            .range(target..)
            .next()
            .map_or(INVALID_ID, |(&lo, _)| lo)
    }

    /// Returns an iterator over the ids of the set in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.ranges(), self.count)
    }

    /// Returns an iterator over the ranges of the set in ascending order.
    ///
    /// ```
    /// use idset::IdSet;
    ///
    /// let ids: IdSet = "0,5,7-9".parse()?;
    /// assert_eq!(ids.ranges().collect::<Vec<_>>(), vec![0..=0, 5..=5, 7..=9]);
    /// # Ok::<(), idset::Error>(())
    /// ```
    pub fn ranges(&self) -> Ranges<'_> {
        Ranges::new(self.ranges.iter())
    }

    /// Membership without bound checks; ids beyond the universe are absent.
    pub(crate) fn contains(&self, id: u32) -> bool {
        self.range_containing(id).is_some()
    }

    /// The range holding `id`, if any.
    fn range_containing(&self, id: u32) -> Option<(u32, u32)> {
        let (&lo, &hi) = self.ranges.range(..=id).next_back()?;
        (hi >= id).then_some((lo, hi))
    }

    /// Upper bound (exclusive) that mutations and queries are validated
    /// against. Autogrow sets accept anything they could grow to.
    #[inline]
    pub(crate) const fn limit(&self) -> u32 {
        if self.autogrow { MAX_SIZE } else { self.size }
    }

    /// Widens the universe so `id` fits. Callers validate `id` against
    /// [`IdSet::limit`] first.
    fn grow_to(&mut self, id: u32) {
        if id < self.size {
            return;
        }
        let grown = (u64::from(id) + 1)
            .next_power_of_two()
            .min(u64::from(MAX_SIZE)) as u32;
        #[cfg(feature = "tracing")]
        tracing::debug!(from = self.size, to = grown, "idset autogrow");
        self.size = grown;
    }

    /// An empty set with the same universe as `self`, widened to `size`.
    pub(crate) fn empty_like(&self, size: u32) -> Self {
        Self {
            ranges: BTreeMap::new(),
            count: 0,
            size: self.size.max(size),
            autogrow: self.autogrow,
        }
    }

    /// Makes room for `id` or fails, without touching the members.
    pub(crate) fn ensure_fits(&mut self, id: u32) -> Result<()> {
        check_bound(id, self.limit())?;
        self.grow_to(id);
        Ok(())
    }

    /// Inserts `lo..=hi`, merging with neighbours. Bounds are not checked.
    pub(crate) fn insert_unchecked(&mut self, lo: u32, hi: u32) {
        let (mut lo, mut hi) = (lo, hi);

        // At most one range starting at or before `lo` can overlap or touch.
        if let Some((&prev_lo, &prev_hi)) = self.ranges.range(..=lo).next_back() {
            if prev_hi >= hi {
                return;
            }
            if u64::from(prev_hi) + 1 >= u64::from(lo) {
                lo = prev_lo;
                self.remove_entry(prev_lo, prev_hi);
            }
        }

        // Any number of ranges starting inside `lo..=hi + 1` are absorbed.
        loop {
            let touching = hi.saturating_add(1);
            let Some((&next_lo, &next_hi)) = self.ranges.range(lo..=touching).next() else {
                break;
            };
            hi = hi.max(next_hi);
            self.remove_entry(next_lo, next_hi);
        }

        self.ranges.insert(lo, hi);
        self.count += width(lo, hi);
    }

    /// Removes `lo..=hi`. Bounds are not checked.
    pub(crate) fn remove_unchecked(&mut self, lo: u32, hi: u32) {
        // A range starting before `lo` may reach into, or straddle, the gap.
        if let Some((&prev_lo, &prev_hi)) = self.ranges.range(..lo).next_back() {
            if prev_hi >= lo {
                self.remove_entry(prev_lo, prev_hi);
                self.insert_entry(prev_lo, lo - 1);
                if prev_hi > hi {
                    self.insert_entry(hi + 1, prev_hi);
                    return;
                }
            }
        }

        loop {
            let Some((&next_lo, &next_hi)) = self.ranges.range(lo..=hi).next() else {
                break;
            };
            self.remove_entry(next_lo, next_hi);
            if next_hi > hi {
                self.insert_entry(hi + 1, next_hi);
                break;
            }
        }
    }

    /// Appends a range that lies strictly after, and is not adjacent to,
    /// every range already present.
    pub(crate) fn push_unchecked(&mut self, lo: u32, hi: u32) {
        debug_assert!(
            self.ranges
                .last_key_value()
                .is_none_or(|(_, &last)| u64::from(last) + 1 < u64::from(lo))
        );
        self.insert_entry(lo, hi);
    }

    #[inline]
    fn insert_entry(&mut self, lo: u32, hi: u32) {
        self.ranges.insert(lo, hi);
        self.count += width(lo, hi);
    }

    #[inline]
    fn remove_entry(&mut self, lo: u32, hi: u32) {
        self.ranges.remove(&lo);
        self.count -= width(lo, hi);
    }
}

impl Default for IdSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for IdSet {
    /// Two sets are equal when they hold the same ids, whatever their
    /// universe sizes.
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.ranges == other.ranges
    }
}

impl Eq for IdSet {}

impl hash::Hash for IdSet {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.ranges.hash(state);
    }
}

impl fmt::Debug for IdSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IdSet")
            .field(&self.encode(EncodeFlags::RANGE))
            .finish()
    }
}

impl<'a> IntoIterator for &'a IdSet {
    type Item = u32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
