#![forbid(unsafe_code)]

//! Widgets for the dimpick dimension picker.
//!
//! - [`normalize`]: pure sanitize / validate / nearest-valid functions.
//! - [`number_input`]: the numeric field and its validation state machine.
//! - [`unit_toggle`]: the `%` / `px` selector.
//! - [`panel`]: the coordinator that owns the shared `(unit, value)` pair.
//!
//! The widgets are headless: they consume [`dimpick_core::event::Event`]s and
//! expose everything a renderer needs (text, enabled flags, tooltip payload),
//! but never draw.

pub mod normalize;
pub mod number_input;
pub mod panel;
pub mod tooltip;
pub mod unit;
pub mod unit_toggle;

pub use normalize::{Bound, InvalidReason, ValidationOutcome};
pub use number_input::{NumberInput, NumberInputConfig};
pub use panel::{CalculatorPanel, PanelLayout};
pub use tooltip::{TooltipCause, TooltipState};
pub use unit::{ParseUnitError, Unit};
pub use unit_toggle::UnitToggle;
