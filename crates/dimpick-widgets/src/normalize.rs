#![forbid(unsafe_code)]

//! Value normalization: sanitizing, validating, and clamping field text.
//!
//! Everything here is a pure function of its arguments. The field keeps the
//! user's literal keystrokes and only calls [`nearest_valid`] at commit
//! checkpoints, so nothing is reformatted mid-keystroke.
//!
//! # Example
//!
//! ```rust
//! use dimpick_widgets::normalize::{nearest_valid, sanitize, validate, InvalidReason};
//! use dimpick_widgets::unit::Unit;
//!
//! assert_eq!(sanitize("75,25"), "75.25");
//! assert_eq!(validate("150", Unit::Percent).reason(), Some(InvalidReason::AboveMaximum));
//! assert_eq!(nearest_valid("150", Unit::Percent, "40"), "100");
//! assert_eq!(nearest_valid("abc", Unit::Percent, "40"), "40");
//! ```
//!
//! # Parsing
//!
//! Numbers are read with "longest numeric prefix" rules: optional leading
//! whitespace and sign, digits with at most one decimal point, then an
//! optional exponent. Trailing garbage is ignored, so `"12,5"` reads as 12
//! and `"5px"` as 5. Text with no leading digits (`""`, `"."`, `"abc"`) and
//! results that overflow to infinity do not parse.

use std::fmt;

use crate::unit::{PERCENT_MAX, Unit, VALUE_MIN};

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

/// Error code for text that does not start with a number.
pub const ERROR_CODE_NOT_A_NUMBER: &str = "not_a_number";
/// Error code for values at or below zero.
pub const ERROR_CODE_BELOW_MINIMUM: &str = "below_minimum";
/// Error code for percentages above one hundred.
pub const ERROR_CODE_ABOVE_MAXIMUM: &str = "above_maximum";

// ---------------------------------------------------------------------------
// ValidationOutcome
// ---------------------------------------------------------------------------

/// Which limit a value ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    /// Lower limit, always 0.
    Min,
    /// Upper limit, 100 under [`Unit::Percent`] only.
    Max,
}

/// Why a candidate failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidReason {
    /// Empty or no leading number.
    NotANumber,
    /// Parsed value is zero or negative.
    BelowMinimum,
    /// Parsed value exceeds 100 under [`Unit::Percent`].
    AboveMaximum,
}

impl InvalidReason {
    /// The bound this reason violates, if any.
    #[must_use]
    pub const fn bound(self) -> Option<Bound> {
        match self {
            Self::NotANumber => None,
            Self::BelowMinimum => Some(Bound::Min),
            Self::AboveMaximum => Some(Bound::Max),
        }
    }

    /// Stable identifier for programmatic handling.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotANumber => ERROR_CODE_NOT_A_NUMBER,
            Self::BelowMinimum => ERROR_CODE_BELOW_MINIMUM,
            Self::AboveMaximum => ERROR_CODE_ABOVE_MAXIMUM,
        }
    }

    /// User-facing tooltip text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotANumber => "Value must be a number",
            Self::BelowMinimum => "Value must be greater than 0",
            Self::AboveMaximum => "Value must be smaller than 100",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValidationOutcome {
    /// The candidate is a usable value for the unit.
    #[default]
    Valid,
    /// The candidate is rejected.
    Invalid(InvalidReason),
}

impl ValidationOutcome {
    /// Check if the outcome is valid.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The failure reason, if invalid.
    #[must_use]
    pub const fn reason(&self) -> Option<InvalidReason> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => Some(*reason),
        }
    }

    /// The violated bound, if any.
    #[must_use]
    pub const fn bound(&self) -> Option<Bound> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => reason.bound(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pure functions
// ---------------------------------------------------------------------------

/// Turn raw text into a numeric candidate.
///
/// Commas become decimal points, anything that is not an ASCII digit or a
/// point is dropped, and only the first point survives. Empty input stays
/// empty.
#[must_use]
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut seen_point = false;
    for c in raw.chars() {
        match c {
            '0'..='9' => out.push(c),
            '.' | ',' if !seen_point => {
                seen_point = true;
                out.push('.');
            }
            _ => {}
        }
    }
    out
}

/// Whether `text` only holds characters the field accepts: digits, `.`, `,`.
///
/// The empty string is accepted and means "no value yet".
#[must_use]
pub fn is_field_text(text: &str) -> bool {
    text.chars().all(is_field_char)
}

/// Whether a single typed character may enter the field.
#[must_use]
pub const fn is_field_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == ','
}

/// Read the longest numeric prefix of `text`.
///
/// Returns `None` when there is no leading number or the result is not
/// finite.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let scan_digits = |mut i: usize| {
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = scan_digits(end);
    let mut digits = int_end - end;
    end = int_end;

    if end < len && bytes[end] == b'.' {
        let frac_end = scan_digits(end + 1);
        digits += frac_end - (end + 1);
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp = end + 1;
        if exp < len && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        let exp_end = scan_digits(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Render a number the way the field displays it.
///
/// Shortest round-trip decimal, no exponent, no trailing zeros, and zero is
/// always `"0"` (never `"-0"`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Check `candidate` against the bounds of `unit`.
#[must_use]
pub fn validate(candidate: &str, unit: Unit) -> ValidationOutcome {
    let Some(value) = parse_number(candidate) else {
        return ValidationOutcome::Invalid(InvalidReason::NotANumber);
    };
    if value <= VALUE_MIN {
        return ValidationOutcome::Invalid(InvalidReason::BelowMinimum);
    }
    if unit.max().is_some_and(|max| value > max) {
        return ValidationOutcome::Invalid(InvalidReason::AboveMaximum);
    }
    ValidationOutcome::Valid
}

/// The closest committable value to `candidate`.
///
/// Empty text commits as `"0"`, unparsable text falls back to `last_valid`
/// unchanged, values at or below zero become `"0"`, percentages above one
/// hundred become `"100"`. Anything else commits as its canonical form, and
/// that is exactly the case where [`validate`] reports
/// [`ValidationOutcome::Valid`].
#[must_use]
pub fn nearest_valid(candidate: &str, unit: Unit, last_valid: &str) -> String {
    if candidate.is_empty() {
        return format_number(VALUE_MIN);
    }
    let Some(value) = parse_number(candidate) else {
        return last_valid.to_string();
    };
    if value <= VALUE_MIN {
        return format_number(VALUE_MIN);
    }
    if unit == Unit::Percent && value > PERCENT_MAX {
        return format_number(PERCENT_MAX);
    }
    format_number(value)
}
