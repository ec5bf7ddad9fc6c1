//! Measurement parsing and millimeter-to-pixel conversion.
//!
//! All pixel math runs at a fixed [`DPI`] of 203 dots per inch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Print resolution used for every pixel computation.
pub const DPI: u32 = 203;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Unit suffix accepted on a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Millimeters (the default when no suffix is written).
    #[default]
    Mm,
    /// Inches.
    Inch,
}

impl Unit {
    /// Suffix text as written in source (`"mm"` or `"inch"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Mm => "mm",
            Unit::Inch => "inch",
        }
    }

    fn from_suffix(s: &str) -> Option<Self> {
        match s {
            "mm" => Some(Unit::Mm),
            "inch" => Some(Unit::Inch),
            _ => None,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numeric magnitude together with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    /// Magnitude as written.
    pub value: f64,
    /// Unit suffix, defaulting to millimeters.
    pub unit: Unit,
}

/// Failure to read a measurement token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// Nothing left after trimming.
    #[error("empty value")]
    Empty,
    /// The token does not start with a decimal number.
    #[error("cannot parse number in {0:?}")]
    NotANumber(String),
    /// The number does not fit in a finite `f64`.
    #[error("number {0} is out of range")]
    OutOfRange(String),
    /// Text after the number is not a recognized unit.
    #[error("unknown unit {unit:?} in {token:?} (expected mm or inch)")]
    UnknownUnit {
        /// The full trimmed token.
        token: String,
        /// The unrecognized suffix.
        unit: String,
    },
}

/// Parse `<digits>[.<digits>][ws][mm|inch]` into a [`Measurement`].
///
/// Surrounding whitespace and one trailing comma are removed first. The unit
/// defaults to [`Unit::Mm`]; unit words are case-sensitive.
pub fn parse_value_with_unit(token: &str) -> Result<Measurement, UnitError> {
    let s = token.trim();
    let s = s.strip_suffix(',').unwrap_or(s).trim_end();
    if s.is_empty() {
        return Err(UnitError::Empty);
    }

    let num_len = decimal_prefix_len(s);
    if num_len == 0 {
        return Err(UnitError::NotANumber(s.to_string()));
    }
    let (num, suffix) = s.split_at(num_len);
    // A digit run directly followed by '.' with no fraction is not a number.
    if suffix.starts_with('.') {
        return Err(UnitError::NotANumber(s.to_string()));
    }

    let suffix = suffix.trim_start();
    let unit = if suffix.is_empty() {
        Unit::Mm
    } else {
        Unit::from_suffix(suffix).ok_or_else(|| UnitError::UnknownUnit {
            token: s.to_string(),
            unit: suffix.to_string(),
        })?
    };

    let value = num
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| UnitError::OutOfRange(num.to_string()))?;
    Ok(Measurement { value, unit })
}

/// Length in bytes of the leading `<digits>[.<digits>]` run, or 0.
fn decimal_prefix_len(s: &str) -> usize {
    let b = s.as_bytes();
    let int_end = b.iter().take_while(|c| c.is_ascii_digit()).count();
    if int_end == 0 {
        return 0;
    }
    if b.get(int_end) == Some(&b'.') {
        let frac = b[int_end + 1..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count();
        if frac > 0 {
            return int_end + 1 + frac;
        }
    }
    int_end
}

/// Convert millimeters to whole pixels at [`DPI`], truncating toward zero.
///
/// One inch (25.4 mm) is exactly 203 pixels. Results saturate at the `i32`
/// bounds and NaN maps to 0.
pub fn mm_to_pixels(value_mm: f64) -> i32 {
    ((value_mm / MM_PER_INCH) * f64::from(DPI)) as i32
}
