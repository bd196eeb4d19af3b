use crate::{EncodeFlags, IdSet};
use alloc::string::String;
use core::fmt::{self, Write};

impl IdSet {
    /// Encodes the set as an RFC22 idset string.
    ///
    /// An empty set encodes as `""`, or `"[]"` with
    /// [`EncodeFlags::BRACKETS`].
    ///
    /// ```
    /// use idset::{EncodeFlags, IdSet};
    ///
    /// let ids: IdSet = "0-3,7".parse()?;
    /// assert_eq!(ids.encode(EncodeFlags::empty()), "0,1,2,3,7");
    /// assert_eq!(ids.encode(EncodeFlags::RANGE), "0-3,7");
    /// assert_eq!(ids.encode(EncodeFlags::RANGE | EncodeFlags::BRACKETS), "[0-3,7]");
    /// # Ok::<(), idset::Error>(())
    /// ```
    pub fn encode(&self, flags: EncodeFlags) -> String {
        let mut out = String::new();
        // fmt::Write for String never fails
        let _ = self.encode_to(&mut out, flags);
        out
    }

    /// Writes the RFC22 encoding of the set into `out` without building an
    /// intermediate string.
    ///
    /// See also: [`IdSet::encode`] for an allocating version.
    ///
    /// # Errors
    ///
    /// Returns an error only if `out` does.
    pub fn encode_to<W: Write>(&self, out: &mut W, flags: EncodeFlags) -> fmt::Result {
        let brackets = flags.contains(EncodeFlags::BRACKETS);
        let collapse = flags.contains(EncodeFlags::RANGE);

        if brackets {
            out.write_char('[')?;
        }
        let mut sep = "";
        for range in self.ranges() {
            let (lo, hi) = range.into_inner();
            if collapse && hi > lo {
                write!(out, "{sep}{lo}-{hi}")?;
                sep = ",";
                continue;
            }
            for id in lo..=hi {
                write!(out, "{sep}{id}")?;
                sep = ",";
            }
        }
        if brackets {
            out.write_char(']')?;
        }
        Ok(())
    }
}

impl fmt::Display for IdSet {
    /// Writes the set with [`EncodeFlags::RANGE`]; the alternate form
    /// (`{:#}`) also adds brackets.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = if f.alternate() {
            EncodeFlags::RANGE | EncodeFlags::BRACKETS
        } else {
            EncodeFlags::RANGE
        };
        self.encode_to(f, flags)
    }
}

#[cfg(test)]
mod tests {
    use crate::{EncodeFlags, IdSet};
    use alloc::format;
    use alloc::string::ToString;

    #[test]
    fn encode_without_flags_lists_every_id() {
        let ids = IdSet::from_range(0, 3).unwrap();
        assert_eq!(ids.encode(EncodeFlags::empty()), "0,1,2,3");
    }

    #[test]
    fn encode_empty() {
        let ids = IdSet::new();
        assert_eq!(ids.encode(EncodeFlags::empty()), "");
        assert_eq!(ids.encode(EncodeFlags::RANGE), "");
        assert_eq!(ids.encode(EncodeFlags::BRACKETS), "[]");
        assert_eq!(
            ids.encode(EncodeFlags::RANGE | EncodeFlags::BRACKETS),
            "[]"
        );
    }

    #[test]
    fn encode_range_collapses_runs_of_two() {
        let ids = IdSet::try_from_ids([4u32, 5, 9]).unwrap();
        assert_eq!(ids.encode(EncodeFlags::RANGE), "4-5,9");
    }

    #[test]
    fn display_uses_ranges() {
        let ids = IdSet::try_from_ids([0u32, 1, 2, 8]).unwrap();
        assert_eq!(ids.to_string(), "0-2,8");
        assert_eq!(format!("{ids:#}"), "[0-2,8]");
        assert_eq!(format!("{ids:?}"), "IdSet(\"0-2,8\")");
    }

    #[test]
    fn encode_large_list() {
        let ids = IdSet::from_range(0, 5000).unwrap();
        let s = ids.encode(EncodeFlags::empty());
        let mut count = 0u32;
        for (expected, tok) in s.split(',').enumerate() {
            assert_eq!(tok.parse::<usize>().unwrap(), expected);
            count += 1;
        }
        assert_eq!(count, 5001);
    }
}
