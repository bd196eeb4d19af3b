use alloc::collections::btree_map;
use core::iter::{Flatten, FusedIterator};
use core::ops::RangeInclusive;

/// Iterator over the ranges of an [`IdSet`](crate::IdSet), ascending.
///
/// Created by [`IdSet::ranges`](crate::IdSet::ranges).
#[derive(Clone, Debug)]
pub struct Ranges<'a> {
    inner: btree_map::Iter<'a, u32, u32>,
}

impl<'a> Ranges<'a> {
    pub(crate) fn new(inner: btree_map::Iter<'a, u32, u32>) -> Self {
        Self { inner }
    }
}

impl Iterator for Ranges<'_> {
    type Item = RangeInclusive<u32>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(&lo, &hi)| lo..=hi)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Ranges<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(&lo, &hi)| lo..=hi)
    }
}

impl ExactSizeIterator for Ranges<'_> {}
impl FusedIterator for Ranges<'_> {}

/// Iterator over the ids of an [`IdSet`](crate::IdSet), ascending and without
/// duplicates.
///
/// Created by [`IdSet::iter`](crate::IdSet::iter). Each call restarts from the
/// smallest id.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    ids: Flatten<Ranges<'a>>,
    remaining: u64,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(ranges: Ranges<'a>, count: u64) -> Self {
        Self {
            ids: ranges.flatten(),
            remaining: count,
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<u32> {
        let id = self.ids.next()?;
        self.remaining -= 1;
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }

    fn count(self) -> usize {
        match usize::try_from(self.remaining) {
            Ok(n) => n,
            Err(_) => self.ids.count(),
        }
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<u32> {
        let id = self.ids.next_back()?;
        self.remaining -= 1;
        Some(id)
    }
}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use crate::IdSet;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn iter_crosses_range_boundaries() {
        let ids: IdSet = "1,3-5,9".parse().unwrap();
        assert_eq!(ids.iter().collect::<Vec<_>>(), vec![1, 3, 4, 5, 9]);
        assert_eq!(ids.iter().rev().collect::<Vec<_>>(), vec![9, 5, 4, 3, 1]);
    }

    #[test]
    fn iter_is_restartable() {
        let ids: IdSet = "7-9".parse().unwrap();
        let first: Vec<u32> = ids.iter().collect();
        let second: Vec<u32> = (&ids).into_iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn iter_size_hint_tracks_both_ends() {
        let ids: IdSet = "0-3,10".parse().unwrap();
        let mut it = ids.iter();
        assert_eq!(it.size_hint(), (5, Some(5)));
        assert_eq!(it.next(), Some(0));
        assert_eq!(it.next_back(), Some(10));
        assert_eq!(it.next_back(), Some(3));
        assert_eq!(it.size_hint(), (2, Some(2)));
        assert_eq!(it.clone().count(), 2);
        assert_eq!(it.collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn count_matches_a_full_walk() {
        let ids: IdSet = "0-4095,5000,6000-6999".parse().unwrap();
        let mut it = ids.iter();
        it.nth(9);
        it.next_back();
        let walked = it.clone().fold(0usize, |n, _| n + 1);
        assert_eq!(it.count(), walked);
        assert_eq!(walked, 5097 - 11);
    }

    #[test]
    fn empty_set_iterates_nothing() {
        let ids = IdSet::new();
        assert_eq!(ids.iter().next(), None);
        assert_eq!(ids.ranges().len(), 0);
    }
}
