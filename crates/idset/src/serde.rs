use crate::{EncodeFlags, IdSet, ToId};
use alloc::vec::Vec;
use core::fmt;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

impl Serialize for IdSet {
    /// Serializes the set as its RFC22 string with ranges collapsed.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&self.encode(EncodeFlags::RANGE))
    }
}

impl<'de> Deserialize<'de> for IdSet {
    /// Deserializes a set from an RFC22 string or a sequence of non-negative
    /// integers.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The string is not a valid idset
    /// - An element of the sequence is negative or too large to be an id
    /// - The value is neither a string nor a sequence
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdSetVisitor;

        impl<'de> Visitor<'de> for IdSetVisitor {
            type Value = IdSet;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an RFC22 idset string or a sequence of ids")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                IdSet::decode(v).map_err(de::Error::custom)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut ids = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
                while let Some(id) = seq.next_element::<i64>()? {
                    ids.push(id.to_id().map_err(de::Error::custom)?);
                }
                IdSet::try_from_ids(ids).map_err(de::Error::custom)
            }
        }

        d.deserialize_any(IdSetVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::{IdSet, RangeError};
    use alloc::string::ToString;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
    struct Job {
        ranks: IdSet,
    }

    #[test]
    fn string_roundtrip() {
        let job = Job {
            ranks: "0-3,8".parse().unwrap(),
        };
        let json = serde_json::to_string(&job).expect("serialize");
        assert_eq!(json, r#"{"ranks":"0-3,8"}"#);
        let back: Job = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, job);
    }

    #[test]
    fn from_integer_sequence() {
        let job: Job = serde_json::from_value(json!({"ranks": [3, 1, 2, 7]}))
            .expect("deserialize");
        assert_eq!(job.ranks.to_string(), "1-3,7");
    }

    #[test]
    fn bracketed_string() {
        let job: Job = serde_json::from_value(json!({"ranks": "[4-6]"}))
            .expect("deserialize");
        assert_eq!(job.ranks.to_string(), "4-6");
    }

    #[test]
    fn negative_element_fails() {
        let err = serde_json::from_value::<Job>(json!({"ranks": [1, -2]}))
            .expect_err("should fail");
        assert!(
            err.to_string()
                .contains(&RangeError::Negative { id: -2 }.to_string()),
            "{err}"
        );
    }

    #[test]
    fn invalid_string_fails() {
        let err = serde_json::from_value::<Job>(json!({"ranks": "3-1"}))
            .expect_err("should fail");
        assert!(err.to_string().contains("invalid range 3-1"), "{err}");
    }

    #[test]
    fn wrong_type_fails() {
        let err = serde_json::from_value::<Job>(json!({"ranks": true}))
            .expect_err("should fail");
        assert!(err.to_string().contains("invalid type"), "{err}");
    }
}
