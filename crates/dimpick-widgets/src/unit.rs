#![forbid(unsafe_code)]

//! Measurement unit of the picked value.

use std::fmt;
use std::str::FromStr;

/// Upper bound of a percentage value (inclusive).
pub const PERCENT_MAX: f64 = 100.0;

/// Lower bound of every value (inclusive when committed, exclusive for validity).
pub const VALUE_MIN: f64 = 0.0;

/// The measurement mode of the numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    /// Percentage of the container, bounded to `[0, 100]`.
    #[default]
    Percent,
    /// Absolute pixels, unbounded above.
    Pixel,
}

impl Unit {
    /// Both units in display order.
    pub const ALL: [Unit; 2] = [Unit::Percent, Unit::Pixel];

    /// Upper bound for this unit, if any.
    #[must_use]
    pub const fn max(self) -> Option<f64> {
        match self {
            Self::Percent => Some(PERCENT_MAX),
            Self::Pixel => None,
        }
    }

    /// Short label shown on the toggle.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Percent => "%",
            Self::Pixel => "px",
        }
    }

    /// The other unit.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Percent => Self::Pixel,
            Self::Pixel => Self::Percent,
        }
    }

    /// Clamp `value` into this unit's committed range.
    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        let upper = self.max().unwrap_or(f64::INFINITY);
        value.max(VALUE_MIN).min(upper)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when text names neither unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseUnitError {
    input: String,
}

impl ParseUnitError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseUnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown unit {:?} (expected \"%\" or \"px\")", self.input)
    }
}

impl std::error::Error for ParseUnitError {}

impl FromStr for Unit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "%" => Ok(Self::Percent),
            "px" | "PX" | "Px" => Ok(Self::Pixel),
            other => Err(ParseUnitError {
                input: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_percent() {
        assert_eq!(Unit::default(), Unit::Percent);
    }

    #[test]
    fn bounds() {
        assert_eq!(Unit::Percent.max(), Some(100.0));
        assert_eq!(Unit::Pixel.max(), None);
    }

    #[test]
    fn clamp_respects_unit() {
        assert_eq!(Unit::Percent.clamp(150.0), 100.0);
        assert_eq!(Unit::Percent.clamp(-3.0), 0.0);
        assert_eq!(Unit::Pixel.clamp(150.0), 150.0);
        assert_eq!(Unit::Pixel.clamp(-1.0), 0.0);
    }

    #[test]
    fn toggled_flips() {
        assert_eq!(Unit::Percent.toggled(), Unit::Pixel);
        assert_eq!(Unit::Pixel.toggled(), Unit::Percent);
    }

    #[test]
    fn parse_round_trips_symbols() {
        for unit in Unit::ALL {
            assert_eq!(unit.to_string().parse::<Unit>(), Ok(unit));
        }
        assert_eq!(" px ".parse::<Unit>(), Ok(Unit::Pixel));
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "em".parse::<Unit>().unwrap_err();
        assert_eq!(err.input(), "em");
        assert!(err.to_string().contains("\"em\""));
    }
}
