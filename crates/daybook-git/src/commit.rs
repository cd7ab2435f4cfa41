// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commit record types

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Timestamp layout requested from `git log` and used in the analysis document
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One commit read from a repository's log
///
/// The timestamp is the author date in the committer's local time, with no
/// timezone attached, at minute precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// The commit SHA
    pub hash: String,
    /// Local author date
    #[serde(with = "minute_format")]
    pub date: NaiveDateTime,
    /// Subject line of the commit message
    pub message: String,
    /// Author name
    pub author: String,
    /// Base directory name of the repository the commit came from
    pub repo: String,
}

impl CommitRecord {
    /// Calendar day the commit belongs to
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    /// Time of day as `HH:MM`
    #[must_use]
    pub fn time_of_day(&self) -> String {
        self.date.format("%H:%M").to_string()
    }
}

/// Serde adapter for `YYYY-MM-DD HH:MM` timestamps
pub mod minute_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serialize a timestamp as `YYYY-MM-DD HH:MM`
    pub fn serialize<S: Serializer>(date: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&date.format(TIMESTAMP_FORMAT))
    }

    /// Deserialize a `YYYY-MM-DD HH:MM` timestamp
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(D::Error::custom)
    }

    /// Same layout for optional timestamps, `null` when absent
    pub mod option {
        use super::TIMESTAMP_FORMAT;
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer, de::Error};

        /// Serialize an optional timestamp
        pub fn serialize<S: Serializer>(
            date: &Option<NaiveDateTime>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => s.collect_str(&date.format(TIMESTAMP_FORMAT)),
                None => s.serialize_none(),
            }
        }

        /// Deserialize an optional timestamp
        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            Option::<String>::deserialize(d)?
                .map(|raw| NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT))
                .transpose()
                .map_err(D::Error::custom)
        }
    }
}
