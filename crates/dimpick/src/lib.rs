#![forbid(unsafe_code)]

//! dimpick public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports the event and widget types from the internal crates and offers
//! a lightweight prelude for day-to-day usage.
//!
//! # Example
//!
//! ```rust
//! use dimpick::prelude::*;
//!
//! let mut panel = CalculatorPanel::new()
//!     .with_layout(PanelLayout::compute(Rect::new(0, 0, 30, 2)));
//! let increment = panel.layout().increment;
//! panel.handle_event(&Event::click(increment.x, increment.y));
//! assert_eq!(panel.value(), "1");
//!
//! let unit: Unit = "px".parse()?;
//! panel.set_unit(unit);
//! # Ok::<(), dimpick::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use dimpick_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
    PasteEvent,
};
pub use dimpick_core::geometry::Rect;
#[cfg(feature = "tracing-json")]
pub use dimpick_core::logging::{LoggingInitError, init_json};

// --- Widget re-exports -----------------------------------------------------

pub use dimpick_widgets::normalize::{Bound, InvalidReason, ValidationOutcome};
pub use dimpick_widgets::number_input::{NumberInput, NumberInputConfig};
pub use dimpick_widgets::panel::{CalculatorPanel, PanelLayout};
pub use dimpick_widgets::tooltip::{TooltipCause, TooltipState};
pub use dimpick_widgets::unit::{ParseUnitError, Unit};
pub use dimpick_widgets::unit_toggle::UnitToggle;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for dimpick hosts.
#[derive(Debug)]
pub enum Error {
    /// Text did not name a unit.
    Unit(ParseUnitError),
    /// The JSON log subscriber could not be installed.
    #[cfg(feature = "tracing-json")]
    Logging(LoggingInitError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit(err) => write!(f, "{err}"),
            #[cfg(feature = "tracing-json")]
            Self::Logging(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unit(err) => Some(err),
            #[cfg(feature = "tracing-json")]
            Self::Logging(err) => Some(err),
        }
    }
}

impl From<ParseUnitError> for Error {
    fn from(err: ParseUnitError) -> Self {
        Self::Unit(err)
    }
}

#[cfg(feature = "tracing-json")]
impl From<LoggingInitError> for Error {
    fn from(err: LoggingInitError) -> Self {
        Self::Logging(err)
    }
}

/// Standard result type for dimpick APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Bound, CalculatorPanel, Error, Event, KeyCode, KeyEvent, Modifiers, NumberInput,
        NumberInputConfig, PanelLayout, Rect, Result, TooltipState, Unit, UnitToggle,
    };

    pub use crate::{core, widgets};
}

pub use dimpick_core as core;
pub use dimpick_widgets as widgets;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_parse_error_converts() {
        let err: Error = "em".parse::<Unit>().unwrap_err().into();
        assert!(matches!(err, Error::Unit(_)));
        assert!(err.to_string().contains("\"em\""));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn prelude_drives_a_panel() {
        use crate::prelude::*;

        let mut panel = CalculatorPanel::with_state(Unit::Pixel, "150");
        panel.set_unit(Unit::Percent);
        assert_eq!(panel.value(), "100");
        assert_eq!(panel.tooltip().and_then(|t| t.bound), Some(Bound::Max));
    }
}
