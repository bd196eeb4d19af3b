//! Bracket templates: strings with embedded idsets such as `node[0-3]`.

use crate::{INVALID_ID, IdSet, Result};
use alloc::{string::String, vec::Vec};
use core::fmt::Write;
use core::iter::FusedIterator;

/// Errors raised while formatting a bracket template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    /// The template has no `[` followed by a `]`.
    #[error("template has no bracketed idset")]
    MissingBrackets,
}

/// Finds the first `[` at or after `from` and the first `]` after it.
fn find_group(template: &str, from: usize) -> Option<(usize, usize)> {
    let open = from + template[from..].find('[')?;
    let close = open + 1 + template[open + 1..].find(']')?;
    Some((open, close))
}

/// Replaces the first bracketed group of `template` with `id`.
///
/// Whatever sits between the brackets is discarded.
///
/// ```
/// use idset::format_first;
///
/// assert_eq!(format_first("node[]", 42)?, "node42");
/// assert_eq!(format_first("r[0-3]n", 7)?, "r7n");
/// assert!(format_first("node", 42).is_err());
/// # Ok::<(), idset::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`FormatError::MissingBrackets`] if the template has no `[`
/// followed by a `]`.
pub fn format_first(template: &str, id: u32) -> Result<String> {
    let (open, close) = find_group(template, 0).ok_or(FormatError::MissingBrackets)?;
    let mut out = String::with_capacity(template.len() + 10);
    out.push_str(&template[..open]);
    // fmt::Write for String never fails
    let _ = write!(out, "{id}");
    out.push_str(&template[close + 1..]);
    Ok(out)
}

/// Expands every bracketed idset of `template`, host-list style.
///
/// Each `[idset]` group is replaced by each of its ids in turn. With several
/// groups the output is their cartesian product, with the last group varying
/// fastest. A template without a complete group yields itself once; an empty
/// group yields nothing. All groups are decoded up front, so a bad group
/// fails here rather than halfway through iteration. Drop the iterator to
/// stop early.
///
/// ```
/// use idset::expand;
///
/// let hosts: Vec<String> = expand("r[0-1]n[0-1]")?.collect();
/// assert_eq!(hosts, ["r0n0", "r0n1", "r1n0", "r1n1"]);
///
/// assert_eq!(expand("foo")?.collect::<Vec<_>>(), ["foo"]);
/// assert_eq!(expand("foo[]")?.count(), 0);
/// assert!(expand("[foo]").is_err());
/// # Ok::<(), idset::Error>(())
/// ```
///
/// # Errors
///
/// Returns a [`DecodeError`](crate::DecodeError) if a bracketed group is not
/// a valid idset.
pub fn expand(template: &str) -> Result<Expand<'_>> {
    let mut literals = Vec::new();
    let mut groups = Vec::new();
    let mut pos = 0;
    while let Some((open, close)) = find_group(template, pos) {
        literals.push(&template[pos..open]);
        groups.push(IdSet::decode(&template[open + 1..close])?);
        pos = close + 1;
    }
    literals.push(&template[pos..]);

    let cursor: Vec<u32> = groups.iter().map(IdSet::first).collect();
    let done = cursor.contains(&INVALID_ID);
    Ok(Expand {
        literals,
        groups,
        cursor,
        done,
    })
}

/// Iterator over the expansions of a bracket template.
///
/// Created by [`expand`].
#[derive(Clone, Debug)]
pub struct Expand<'a> {
    // one more literal than groups: text before, between and after them
    literals: Vec<&'a str>,
    groups: Vec<IdSet>,
    cursor: Vec<u32>,
    done: bool,
}

impl Expand<'_> {
    fn render(&self) -> String {
        let mut out = String::new();
        for (i, literal) in self.literals.iter().enumerate() {
            out.push_str(literal);
            if let Some(id) = self.cursor.get(i) {
                let _ = write!(out, "{id}");
            }
        }
        out
    }

    /// Steps the cursor like an odometer; sets `done` once it wraps.
    fn advance(&mut self) {
        for (group, id) in self.groups.iter().zip(self.cursor.iter_mut()).rev() {
            let next = group.next(*id);
            if next != INVALID_ID {
                *id = next;
                return;
            }
            *id = group.first();
        }
        self.done = true;
    }
}

impl Iterator for Expand<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let out = self.render();
        self.advance();
        Some(out)
    }
}

impl FusedIterator for Expand<'_> {}
