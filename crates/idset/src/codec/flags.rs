bitflags::bitflags! {
    /// Presentation options for [`IdSet::encode`](crate::IdSet::encode).
    ///
    /// The flags only change how a set is written; decoding any combination
    /// yields the same set.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EncodeFlags: u32 {
        /// Wrap the output in `[` and `]`, e.g. `[0-3]`.
        const BRACKETS = 0x1;
        /// Collapse runs of two or more consecutive ids into `lo-hi`.
        const RANGE = 0x2;
    }
}
