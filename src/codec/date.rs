//! Date codec for the API wire format.
//!
//! Dates arrive either as JSON numbers (Unix timestamps in seconds or
//! milliseconds) or as strings in one of three textual formats. Dates are
//! always written in the primary format.
//!
//! # Example
//!
//! ```rust
//! use github_api::codec::DATE_CODEC;
//! use serde_json::json;
//!
//! let instant = DATE_CODEC.decode(&json!("2015-11-09T19:16:01Z")).unwrap();
//! assert_eq!(instant.timestamp(), 1_447_096_561);
//! assert_eq!(DATE_CODEC.encode(&instant), "2015-11-09T19:16:01+0000");
//!
//! let instant = DATE_CODEC.decode(&json!(1_470_680_416)).unwrap();
//! assert_eq!(instant.timestamp(), 1_470_680_416);
//! ```

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use thiserror::Error;

/// Timestamps above this value are milliseconds; at or below it, seconds.
///
/// Inherited from the wire format, which carries no unit marker.
pub const TIMESTAMP_MILLIS_THRESHOLD: i64 = 10_000_000_000;

/// The codec shared by every serde adapter in this crate.
pub static DATE_CODEC: DateCodec = DateCodec::new();

/// Error returned when a wire value cannot be decoded into an instant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateFormatError {
    /// The JSON value was neither a string nor a number.
    #[error("Expected either string or number primitive, found {found}")]
    UnsupportedValue {
        /// JSON type name of the rejected value.
        found: &'static str,
    },

    /// No known format (and no numeric fallback) matched the string.
    #[error("Unparseable date: '{value}'")]
    Unparseable {
        /// The rejected input.
        value: String,
    },

    /// The timestamp is outside the representable range.
    #[error("Timestamp {timestamp} is out of range")]
    TimestampOutOfRange {
        /// The rejected timestamp.
        timestamp: i64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Zone {
    /// The pattern carries an offset.
    Explicit,
    /// No offset in the pattern; the instant is UTC, optionally followed by `Z`.
    Zulu,
}

/// One textual wire format.
///
/// A format is an immutable pattern, so a shared format has no per-call
/// state that concurrent callers could interleave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateFormat {
    pattern: &'static str,
    zone: Zone,
}

impl DateFormat {
    /// `yyyy-MM-ddTHH:mm:ss` followed by a numeric offset.
    pub const PRIMARY: Self = Self {
        pattern: "%Y-%m-%dT%H:%M:%S%z",
        zone: Zone::Explicit,
    };

    /// `yyyy/MM/dd HH:mm:ss` followed by a space and a numeric offset.
    pub const LEGACY_SLASHED: Self = Self {
        pattern: "%Y/%m/%d %H:%M:%S %z",
        zone: Zone::Explicit,
    };

    /// `yyyy-MM-ddTHH:mm:ss` in UTC, with or without a trailing `Z`.
    pub const LEGACY_ZULU: Self = Self {
        pattern: "%Y-%m-%dT%H:%M:%S",
        zone: Zone::Zulu,
    };

    /// Returns the chrono pattern of this format.
    #[must_use]
    pub const fn pattern(&self) -> &'static str {
        self.pattern
    }

    fn parse(&self, value: &str) -> Option<DateTime<Utc>> {
        match self.zone {
            Zone::Explicit => DateTime::parse_from_str(value, self.pattern)
                .ok()
                .map(|instant| instant.with_timezone(&Utc)),
            Zone::Zulu => {
                let (naive, rest) = NaiveDateTime::parse_and_remainder(value, self.pattern).ok()?;
                matches!(rest, "" | "Z").then(|| Utc.from_utc_datetime(&naive))
            }
        }
    }

    fn format(&self, instant: &DateTime<Utc>) -> String {
        instant.format(self.pattern).to_string()
    }
}

/// Bidirectional converter between wire date values and [`DateTime<Utc>`].
///
/// Decoding tries the formats in order, then falls back to reading the
/// string as a numeric timestamp. Encoding always uses the first format.
///
/// `DateCodec` holds only immutable format descriptions, so a single
/// instance (see [`DATE_CODEC`]) is shared freely across threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateCodec {
    formats: [DateFormat; 3],
}

impl DateCodec {
    /// Creates a codec with the primary format and both legacy formats.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            formats: [
                DateFormat::PRIMARY,
                DateFormat::LEGACY_SLASHED,
                DateFormat::LEGACY_ZULU,
            ],
        }
    }

    /// Returns the formats tried when decoding, in order.
    #[must_use]
    pub const fn formats(&self) -> &[DateFormat] {
        &self.formats
    }

    /// Decodes a JSON primitive into an instant.
    ///
    /// # Errors
    ///
    /// Returns [`DateFormatError::UnsupportedValue`] for anything other than
    /// a string or number, and [`DateFormatError::Unparseable`] or
    /// [`DateFormatError::TimestampOutOfRange`] if no interpretation fits.
    pub fn decode(&self, value: &Value) -> Result<DateTime<Utc>, DateFormatError> {
        match value {
            Value::Number(number) => {
                #[allow(clippy::cast_possible_truncation)]
                let timestamp = number
                    .as_i64()
                    .or_else(|| number.as_f64().map(|f| f as i64))
                    .ok_or_else(|| DateFormatError::Unparseable {
                        value: number.to_string(),
                    })?;
                Self::decode_timestamp(timestamp)
            }
            Value::String(text) => self.decode_str(text),
            Value::Null => Err(DateFormatError::UnsupportedValue { found: "null" }),
            Value::Bool(_) => Err(DateFormatError::UnsupportedValue { found: "boolean" }),
            Value::Array(_) => Err(DateFormatError::UnsupportedValue { found: "array" }),
            Value::Object(_) => Err(DateFormatError::UnsupportedValue { found: "object" }),
        }
    }

    /// Decodes a date string, trying each format before the numeric fallback.
    ///
    /// # Errors
    ///
    /// Returns [`DateFormatError::Unparseable`] if no format matches and the
    /// string is not an integer timestamp.
    pub fn decode_str(&self, value: &str) -> Result<DateTime<Utc>, DateFormatError> {
        let trimmed = value.trim();
        if let Some(instant) = self.formats.iter().find_map(|format| format.parse(trimmed)) {
            return Ok(instant);
        }

        trimmed
            .parse::<i64>()
            .map_err(|_| DateFormatError::Unparseable {
                value: value.to_string(),
            })
            .and_then(Self::decode_timestamp)
    }

    /// Interprets a Unix timestamp, in seconds up to
    /// [`TIMESTAMP_MILLIS_THRESHOLD`] and in milliseconds above it.
    ///
    /// # Errors
    ///
    /// Returns [`DateFormatError::TimestampOutOfRange`] if the instant cannot
    /// be represented.
    pub fn decode_timestamp(timestamp: i64) -> Result<DateTime<Utc>, DateFormatError> {
        let instant = if timestamp > TIMESTAMP_MILLIS_THRESHOLD {
            Utc.timestamp_millis_opt(timestamp).single()
        } else {
            Utc.timestamp_opt(timestamp, 0).single()
        };
        instant.ok_or(DateFormatError::TimestampOutOfRange { timestamp })
    }

    /// Encodes an instant in the primary format, e.g. `2015-11-09T19:16:01+0000`.
    ///
    /// Sub-second precision is dropped.
    #[must_use]
    pub fn encode(&self, instant: &DateTime<Utc>) -> String {
        self.formats[0].format(instant)
    }
}

impl Default for DateCodec {
    fn default() -> Self {
        Self::new()
    }
}

// Verify DateCodec is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DateCodec>();
};

/// Serde adapter for required date fields.
///
/// ```rust
/// use chrono::{DateTime, Utc};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Milestone {
///     #[serde(with = "github_api::codec::date::required")]
///     due_on: DateTime<Utc>,
/// }
///
/// let milestone: Milestone = serde_json::from_str(r#"{"due_on": 1470680416}"#).unwrap();
/// assert_eq!(milestone.due_on.timestamp(), 1_470_680_416);
/// ```
pub mod required {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use super::DATE_CODEC;

    /// Writes the instant in the primary format.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        instant: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&DATE_CODEC.encode(instant))
    }

    /// Reads any supported wire representation.
    ///
    /// # Errors
    ///
    /// Returns a deserializer error wrapping the date format failure.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        DATE_CODEC.decode(&value).map_err(de::Error::custom)
    }
}

/// Serde adapter for optional date fields. `null` and missing values map to
/// `None`; pair with `#[serde(default)]`.
pub mod optional {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use super::DATE_CODEC;

    /// Writes the instant in the primary format, or `null`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        instant: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match instant {
            Some(instant) => serializer.serialize_str(&DATE_CODEC.encode(instant)),
            None => serializer.serialize_none(),
        }
    }

    /// Reads any supported wire representation, or `null`.
    ///
    /// # Errors
    ///
    /// Returns a deserializer error wrapping the date format failure.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            value => DATE_CODEC.decode(&value).map(Some).map_err(de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_seconds_number_and_string_agree() {
        let from_number = DATE_CODEC.decode(&json!(1_470_680_416)).unwrap();
        let from_string = DATE_CODEC.decode(&json!("1470680416")).unwrap();
        assert_eq!(from_number.timestamp(), 1_470_680_416);
        assert_eq!(from_number, from_string);
    }

    #[test]
    fn test_decode_zulu_format() {
        let instant = DATE_CODEC.decode(&json!("2015-11-09T19:16:01Z")).unwrap();
        assert_eq!(instant.timestamp(), 1_447_096_561);
    }

    #[test]
    fn test_decode_zulu_format_without_designator() {
        let instant = DATE_CODEC.decode_str("2015-11-09T19:16:01").unwrap();
        assert_eq!(instant.timestamp(), 1_447_096_561);
    }

    #[test]
    fn test_decode_primary_format_with_offset() {
        let instant = DATE_CODEC.decode_str("2015-11-09T21:16:01+0200").unwrap();
        assert_eq!(instant.timestamp(), 1_447_096_561);
    }

    #[test]
    fn test_decode_legacy_slashed_format() {
        let instant = DATE_CODEC.decode_str("2015/11/09 11:16:01 -0800").unwrap();
        assert_eq!(instant.timestamp(), 1_447_096_561);
    }

    #[test]
    fn test_threshold_boundary_is_seconds() {
        let instant = DATE_CODEC.decode(&json!(TIMESTAMP_MILLIS_THRESHOLD)).unwrap();
        assert_eq!(instant.timestamp(), TIMESTAMP_MILLIS_THRESHOLD);
    }

    #[test]
    fn test_above_threshold_is_milliseconds() {
        let instant = DATE_CODEC.decode(&json!(1_470_680_416_123_i64)).unwrap();
        assert_eq!(instant.timestamp(), 1_470_680_416);
        assert_eq!(instant.timestamp_subsec_millis(), 123);

        let instant = DATE_CODEC.decode(&json!("1470680416000")).unwrap();
        assert_eq!(instant.timestamp(), 1_470_680_416);
    }

    #[test]
    fn test_round_trip_at_second_precision() {
        let instant = Utc.timestamp_opt(1_447_096_561, 0).single().unwrap();
        let encoded = DATE_CODEC.encode(&instant);
        assert_eq!(encoded, "2015-11-09T19:16:01+0000");
        assert_eq!(DATE_CODEC.decode_str(&encoded).unwrap(), instant);
    }

    #[test]
    fn test_encode_drops_subseconds() {
        let instant = Utc.timestamp_millis_opt(1_447_096_561_999).single().unwrap();
        let decoded = DATE_CODEC.decode_str(&DATE_CODEC.encode(&instant)).unwrap();
        assert_eq!(decoded.timestamp(), 1_447_096_561);
        assert_eq!(decoded.timestamp_subsec_millis(), 0);
    }

    #[test]
    fn test_rejects_non_primitive_values() {
        assert_eq!(
            DATE_CODEC.decode(&json!(true)),
            Err(DateFormatError::UnsupportedValue { found: "boolean" })
        );
        assert_eq!(
            DATE_CODEC.decode(&json!({"date": 1})),
            Err(DateFormatError::UnsupportedValue { found: "object" })
        );
    }

    #[test]
    fn test_rejects_unparseable_strings() {
        assert!(matches!(
            DATE_CODEC.decode_str(""),
            Err(DateFormatError::Unparseable { .. })
        ));
        assert!(matches!(
            DATE_CODEC.decode_str("next tuesday"),
            Err(DateFormatError::Unparseable { value }) if value == "next tuesday"
        ));
        assert!(DATE_CODEC.decode_str("2015-11-09T19:16:01Q").is_err());
    }

    #[test]
    fn test_concurrent_decoding_is_consistent() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                std::thread::spawn(move || {
                    (0..200).all(|_| {
                        let text = if i % 2 == 0 {
                            "2015-11-09T19:16:01Z"
                        } else {
                            "2015/11/09 19:16:01 +0000"
                        };
                        DATE_CODEC.decode_str(text).map(|d| d.timestamp()) == Ok(1_447_096_561)
                    })
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }

    #[test]
    fn test_serde_adapters() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Record {
            #[serde(with = "required")]
            created_at: DateTime<Utc>,
            #[serde(default, with = "optional")]
            closed_at: Option<DateTime<Utc>>,
        }

        let record: Record =
            serde_json::from_str(r#"{"created_at": "2015-11-09T19:16:01Z", "closed_at": null}"#)
                .unwrap();
        assert_eq!(record.created_at.timestamp(), 1_447_096_561);
        assert!(record.closed_at.is_none());

        let record: Record = serde_json::from_str(r#"{"created_at": 1447096561}"#).unwrap();
        assert!(record.closed_at.is_none());
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"created_at": "2015-11-09T19:16:01+0000", "closed_at": null})
        );

        let bad: Result<Record, _> = serde_json::from_str(r#"{"created_at": [1]}"#);
        assert!(bad.is_err());
    }
}
