//! Compact sets of non-negative integer ids.
//!
//! An [`IdSet`] stores its members as a sorted sequence of disjoint,
//! non-adjacent inclusive ranges, so a set like `0-4095` costs one entry no
//! matter how many ids it covers. Single ids can still be set, cleared and
//! tested in logarithmic time.
//!
//! Sets are exchanged as RFC22 idset strings: a comma separated list of ids
//! and `lo-hi` ranges such as `0,5,7-9`, optionally wrapped in brackets.
//!
//! ```
//! use idset::{EncodeFlags, IdSet};
//!
//! let mut ids: IdSet = "0-3".parse()?;
//! ids.set(4)?;
//! ids.clear_range(1, 2)?;
//!
//! assert_eq!(ids.encode(EncodeFlags::RANGE), "0,3-4");
//! assert_eq!(ids.encode(EncodeFlags::empty()), "0,3,4");
//! assert_eq!(ids.encode(EncodeFlags::RANGE | EncodeFlags::BRACKETS), "[0,3-4]");
//! assert_eq!(ids.count(), 3);
//! # Ok::<(), idset::Error>(())
//! ```
//!
//! # Features
//!
//! - `std`: enables `std` support in dependencies (default).
//! - `serde`: `Serialize`/`Deserialize` for [`IdSet`] as an RFC22 string.
//! - `tracing`: trace spans on mutating and decoding entry points.
#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod algebra;
mod codec;
mod error;
mod format;
mod id;
#[cfg(feature = "serde")]
mod serde;
mod set;

pub use crate::algebra::*;
pub use crate::codec::*;
pub use crate::error::*;
pub use crate::format::*;
pub use crate::id::*;
pub use crate::set::*;
