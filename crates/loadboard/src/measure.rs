//! Metric values as they arrive from the load-test report.
//!
//! Report metrics are unit-suffixed strings such as `"120.50ms"`, `"95.00%"`
//! or `"0s"`, occasionally plain JSON numbers. A [`Measurement`] keeps the raw
//! text for display alongside the numeric value read from its leading decimal
//! number. Text without a leading number has no value; it is never read as
//! zero.

use std::fmt;

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize, Serializer};

/// Raw text the report uses for a zero-length duration placeholder.
pub const ZERO_DURATION_SENTINEL: &str = "0s";

/// A single metric cell: its original text and parsed value.
///
/// # Example
///
/// ```
/// use loadboard::Measurement;
///
/// let avg = Measurement::new("120.50ms");
/// assert_eq!(avg.value(), Some(120.5));
/// assert_eq!(avg.raw(), "120.50ms");
///
/// assert_eq!(Measurement::new("n/a").value(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "RawMeasurement")]
pub struct Measurement {
    raw: String,
    value: Option<f64>,
}

impl Measurement {
    /// Parses a measurement from its report text.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let value = parse_leading_number(&raw);
        Measurement { raw, value }
    }

    /// Builds a measurement from an already numeric value.
    pub fn from_value(value: f64) -> Self {
        Measurement {
            raw: value.to_string(),
            value: Some(value),
        }
    }

    /// A measurement absent from the report.
    pub fn missing() -> Self {
        Measurement::default()
    }

    /// The original text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed value, or `None` when missing or unparseable.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Returns `true` if a numeric value could be read.
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    /// Returns `true` for the report's zero-duration placeholder.
    pub fn is_zero_sentinel(&self) -> bool {
        self.raw == ZERO_DURATION_SENTINEL
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Measurement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl From<&str> for Measurement {
    fn from(raw: &str) -> Self {
        Measurement::new(raw)
    }
}

impl From<f64> for Measurement {
    fn from(value: f64) -> Self {
        Measurement::from_value(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMeasurement {
    Text(String),
    Number(f64),
    Other(IgnoredAny),
}

impl From<RawMeasurement> for Measurement {
    fn from(raw: RawMeasurement) -> Self {
        match raw {
            RawMeasurement::Text(text) => Measurement::new(text),
            RawMeasurement::Number(n) => Measurement::from_value(n),
            RawMeasurement::Other(_) => Measurement::missing(),
        }
    }
}

/// Reads the leading decimal number of `text`.
///
/// Leading whitespace is skipped, then an optional sign, digits with an
/// optional fraction, and an optional exponent are consumed. Anything after
/// the number (a unit suffix) is ignored. Returns `None` when no digits lead
/// the text.
///
/// ```
/// use loadboard::measure::parse_leading_number;
///
/// assert_eq!(parse_leading_number(" 42.5ms"), Some(42.5));
/// assert_eq!(parse_leading_number("1e3us"), Some(1000.0));
/// assert_eq!(parse_leading_number("ms"), None);
/// ```
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
