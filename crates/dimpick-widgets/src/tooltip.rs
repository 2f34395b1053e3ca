#![forbid(unsafe_code)]

//! Validation tooltip slot with optional auto-hide countdown.
//!
//! The slot stores only the *cause* of the current tooltip and, for transient
//! tooltips, the remaining countdown. The message, bound, and visibility the
//! renderer sees are derived from the cause on demand, so they can never drift
//! out of sync with each other.
//!
//! # Example
//!
//! ```rust
//! use dimpick_widgets::tooltip::{TooltipCause, TooltipSlot};
//! use std::time::Duration;
//!
//! let mut slot = TooltipSlot::default();
//! slot.show_for(TooltipCause::UnitAdjusted, Duration::from_secs(2));
//! assert!(slot.is_visible());
//!
//! slot.tick(Duration::from_millis(1500));
//! assert!(slot.is_visible());
//! slot.tick(Duration::from_millis(500));
//! assert!(!slot.is_visible());
//! ```
//!
//! # Invariants
//!
//! 1. **Derived payload**: `state()` is a pure function of the stored cause.
//! 2. **Supersession**: every `show`, `show_for`, `hide`, or `apply` replaces
//!    any pending countdown; a countdown never hides a tooltip it did not start.
//!    `revalidate` only re-derives the reason of the tooltip already shown and
//!    keeps its countdown.
//! 3. **Fresh timer**: `show_for` always restarts the full duration.

use std::time::Duration;

use crate::normalize::{Bound, InvalidReason, ValidationOutcome};

/// How long transient tooltips stay up.
pub const DEFAULT_AUTO_HIDE: Duration = Duration::from_secs(2);

/// Message shown when a unit switch forced the value down to 100.
pub const UNIT_ADJUSTED_MESSAGE: &str = "Value automatically adjusted to 100%";

/// What the tooltip is reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TooltipCause {
    /// The latest validation pass rejected the value.
    Invalid(InvalidReason),
    /// Switching to percent clamped the value to 100.
    UnitAdjusted,
}

impl TooltipCause {
    /// Tooltip text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Invalid(reason) => reason.message(),
            Self::UnitAdjusted => UNIT_ADJUSTED_MESSAGE,
        }
    }

    /// The bound the tooltip points at, if any.
    #[must_use]
    pub const fn bound(self) -> Option<Bound> {
        match self {
            Self::Invalid(reason) => reason.bound(),
            Self::UnitAdjusted => Some(Bound::Max),
        }
    }
}

/// Tooltip payload for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TooltipState {
    /// Whether the tooltip is shown.
    pub visible: bool,
    /// Text to show (empty when hidden).
    pub message: &'static str,
    /// Which bound the message refers to.
    pub bound: Option<Bound>,
}

/// Storage for the field's single tooltip.
#[derive(Debug, Clone, Default)]
pub struct TooltipSlot {
    cause: Option<TooltipCause>,
    /// Remaining time before auto-hide; `None` for tooltips that stay up.
    remaining: Option<Duration>,
}

impl TooltipSlot {
    /// Show a tooltip that stays until superseded or dismissed.
    pub fn show(&mut self, cause: TooltipCause) {
        self.cause = Some(cause);
        self.remaining = None;
    }

    /// Show a tooltip that hides itself after `duration` of ticks.
    pub fn show_for(&mut self, cause: TooltipCause, duration: Duration) {
        self.cause = Some(cause);
        self.remaining = Some(duration);
    }

    /// Hide the tooltip and cancel any countdown.
    pub fn hide(&mut self) {
        self.cause = None;
        self.remaining = None;
    }

    /// Show the reason of an invalid outcome, or hide on a valid one.
    pub fn apply(&mut self, outcome: ValidationOutcome) {
        match outcome {
            ValidationOutcome::Valid => self.hide(),
            ValidationOutcome::Invalid(reason) => self.show(TooltipCause::Invalid(reason)),
        }
    }

    /// Like [`apply`](Self::apply) but an invalid outcome gets a countdown.
    pub fn apply_for(&mut self, outcome: ValidationOutcome, duration: Duration) {
        match outcome {
            ValidationOutcome::Valid => self.hide(),
            ValidationOutcome::Invalid(reason) => {
                self.show_for(TooltipCause::Invalid(reason), duration);
            }
        }
    }

    /// Re-derive the shown reason from a fresh outcome, keeping any countdown.
    ///
    /// A valid outcome hides the tooltip.
    pub fn revalidate(&mut self, outcome: ValidationOutcome) {
        match outcome {
            ValidationOutcome::Valid => self.hide(),
            ValidationOutcome::Invalid(reason) => {
                self.cause = Some(TooltipCause::Invalid(reason));
            }
        }
    }

    /// Advance the countdown by `delta`.
    ///
    /// Returns `true` if this tick hid the tooltip.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        let left = remaining.saturating_sub(delta);
        if left.is_zero() {
            self.hide();
            true
        } else {
            self.remaining = Some(left);
            false
        }
    }

    /// Whether a tooltip is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.cause.is_some()
    }

    /// The cause of the shown tooltip.
    #[must_use]
    pub fn cause(&self) -> Option<TooltipCause> {
        self.cause
    }

    /// Time left before auto-hide, for transient tooltips.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Derived payload.
    #[must_use]
    pub fn state(&self) -> TooltipState {
        match self.cause {
            Some(cause) => TooltipState {
                visible: true,
                message: cause.message(),
                bound: cause.bound(),
            },
            None => TooltipState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SECONDS: Duration = Duration::from_secs(2);

    #[test]
    fn hidden_by_default() {
        let slot = TooltipSlot::default();
        assert!(!slot.is_visible());
        assert_eq!(slot.state(), TooltipState::default());
    }

    #[test]
    fn state_derives_from_cause() {
        let mut slot = TooltipSlot::default();
        slot.show(TooltipCause::Invalid(InvalidReason::AboveMaximum));
        let state = slot.state();
        assert!(state.visible);
        assert_eq!(state.message, "Value must be smaller than 100");
        assert_eq!(state.bound, Some(Bound::Max));
    }

    #[test]
    fn unit_adjusted_points_at_max() {
        assert_eq!(TooltipCause::UnitAdjusted.bound(), Some(Bound::Max));
        assert_eq!(TooltipCause::UnitAdjusted.message(), UNIT_ADJUSTED_MESSAGE);
    }

    #[test]
    fn persistent_tooltip_ignores_ticks() {
        let mut slot = TooltipSlot::default();
        slot.show(TooltipCause::Invalid(InvalidReason::NotANumber));
        assert!(!slot.tick(Duration::from_secs(60)));
        assert!(slot.is_visible());
    }

    #[test]
    fn countdown_hides_at_zero() {
        let mut slot = TooltipSlot::default();
        slot.show_for(TooltipCause::UnitAdjusted, TWO_SECONDS);
        assert!(!slot.tick(Duration::from_millis(1999)));
        assert!(slot.is_visible());
        assert!(slot.tick(Duration::from_millis(1)));
        assert!(!slot.is_visible());
        assert_eq!(slot.remaining(), None);
    }

    #[test]
    fn show_for_restarts_countdown() {
        let mut slot = TooltipSlot::default();
        slot.show_for(TooltipCause::UnitAdjusted, TWO_SECONDS);
        slot.tick(Duration::from_millis(1500));
        slot.show_for(
            TooltipCause::Invalid(InvalidReason::BelowMinimum),
            TWO_SECONDS,
        );
        assert_eq!(slot.remaining(), Some(TWO_SECONDS));
        slot.tick(Duration::from_millis(1500));
        assert!(slot.is_visible());
    }

    #[test]
    fn persistent_show_cancels_countdown() {
        let mut slot = TooltipSlot::default();
        slot.show_for(TooltipCause::UnitAdjusted, TWO_SECONDS);
        slot.show(TooltipCause::Invalid(InvalidReason::NotANumber));
        assert!(!slot.tick(TWO_SECONDS));
        assert!(slot.is_visible());
    }

    #[test]
    fn apply_follows_outcome() {
        let mut slot = TooltipSlot::default();
        slot.apply(ValidationOutcome::Invalid(InvalidReason::BelowMinimum));
        assert_eq!(
            slot.cause(),
            Some(TooltipCause::Invalid(InvalidReason::BelowMinimum))
        );
        slot.apply(ValidationOutcome::Valid);
        assert!(!slot.is_visible());
    }

    #[test]
    fn revalidate_keeps_countdown() {
        let mut slot = TooltipSlot::default();
        slot.show_for(
            TooltipCause::Invalid(InvalidReason::NotANumber),
            TWO_SECONDS,
        );
        slot.tick(Duration::from_millis(500));
        slot.revalidate(ValidationOutcome::Invalid(InvalidReason::BelowMinimum));
        assert_eq!(
            slot.cause(),
            Some(TooltipCause::Invalid(InvalidReason::BelowMinimum))
        );
        assert_eq!(slot.remaining(), Some(Duration::from_millis(1500)));
        slot.revalidate(ValidationOutcome::Valid);
        assert!(!slot.is_visible());
        assert_eq!(slot.remaining(), None);
    }

    #[test]
    fn apply_for_only_times_invalid() {
        let mut slot = TooltipSlot::default();
        slot.apply_for(ValidationOutcome::Valid, TWO_SECONDS);
        assert!(!slot.is_visible());
        slot.apply_for(
            ValidationOutcome::Invalid(InvalidReason::AboveMaximum),
            TWO_SECONDS,
        );
        assert_eq!(slot.remaining(), Some(TWO_SECONDS));
    }
}
