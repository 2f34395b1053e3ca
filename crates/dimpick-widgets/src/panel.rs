#![forbid(unsafe_code)]

//! Calculator panel: the owner of the shared `(unit, value)` pair.
//!
//! The panel wires a [`UnitToggle`] and a [`NumberInput`] together. The toggle
//! asks for unit changes, the field reports committed values, and the panel is
//! the only place both are stored, so the two controls never disagree.
//!
//! ```text
//!            ┌──────────────────────────────┐
//!  row 0     │      tooltip (over field)    │
//!  last row  │ % │ px │ │ - │  field  │ + │ │
//!            └──────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use dimpick_widgets::panel::CalculatorPanel;
//! use dimpick_widgets::unit::Unit;
//!
//! let mut panel = CalculatorPanel::with_state(Unit::Pixel, "150");
//! panel.set_unit(Unit::Percent);
//! assert_eq!(panel.value(), "100");
//! assert!(panel.tooltip().is_some());
//! ```

use std::time::Duration;

use dimpick_core::event::Event;
use dimpick_core::geometry::Rect;

use crate::number_input::{NumberInput, NumberInputConfig};
use crate::tooltip::TooltipState;
use crate::unit::Unit;
use crate::unit_toggle::UnitToggle;

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
const LOG_TARGET: &str = "dimpick::panel";

/// Hit-test rectangles for every control of the panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelLayout {
    /// `%` segment of the toggle.
    pub percent: Rect,
    /// `px` segment of the toggle.
    pub pixel: Rect,
    /// Decrement button.
    pub decrement: Rect,
    /// Text field.
    pub field: Rect,
    /// Increment button.
    pub increment: Rect,
    /// Tooltip, drawn above the field.
    pub tooltip: Rect,
}

impl PanelLayout {
    /// Width of each toggle segment.
    pub const SEGMENT_WIDTH: u16 = 4;
    /// Width of each stepper button.
    pub const STEPPER_WIDTH: u16 = 3;

    /// Lay the controls out in `area`.
    ///
    /// Controls go on the bottom row; the row above, if any, holds the
    /// tooltip. Short areas saturate to empty rectangles rather than
    /// overlapping.
    #[must_use]
    pub fn compute(area: Rect) -> Self {
        let row = Rect::new(
            area.x,
            area.y.saturating_add(area.height.saturating_sub(1)),
            area.width,
            area.height.min(1),
        );
        let (percent, rest) = row.split_left(Self::SEGMENT_WIDTH);
        let (pixel, rest) = rest.split_left(Self::SEGMENT_WIDTH);
        let (_gap, rest) = rest.split_left(1);
        let (decrement, rest) = rest.split_left(Self::STEPPER_WIDTH);
        let (field, increment) = rest.split_right(Self::STEPPER_WIDTH);
        let tooltip_height = u16::from(area.height > 1);
        let tooltip = Rect::new(field.x, area.y, field.width, tooltip_height);

        Self {
            percent,
            pixel,
            decrement,
            field,
            increment,
            tooltip,
        }
    }
}

/// Coordinator for the unit toggle and the numeric field.
#[derive(Debug, Clone)]
pub struct CalculatorPanel {
    unit: Unit,
    value: String,
    field: NumberInput,
    toggle: UnitToggle,
    layout: PanelLayout,
}

impl Default for CalculatorPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorPanel {
    /// A panel in percent mode showing `"0"`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(Unit::Percent, "0")
    }

    /// A panel with an externally supplied initial state.
    #[must_use]
    pub fn with_state(unit: Unit, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            unit,
            field: NumberInput::new(unit).with_value(value.clone()),
            value,
            toggle: UnitToggle::new(),
            layout: PanelLayout::default(),
        }
    }

    /// Set the field configuration (builder).
    #[must_use]
    pub fn with_config(mut self, config: NumberInputConfig) -> Self {
        self.field = self.field.with_config(config);
        self
    }

    /// Set the hit-test layout (builder).
    #[must_use]
    pub fn with_layout(mut self, layout: PanelLayout) -> Self {
        self.set_layout(layout);
        self
    }

    /// The selected unit.
    #[must_use]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// The stored value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The numeric field.
    #[must_use]
    pub fn field(&self) -> &NumberInput {
        &self.field
    }

    /// The unit toggle.
    #[must_use]
    pub fn toggle(&self) -> &UnitToggle {
        &self.toggle
    }

    /// The current hit-test layout.
    #[must_use]
    pub fn layout(&self) -> PanelLayout {
        self.layout
    }

    /// Tooltip payload, only while shown.
    #[must_use]
    pub fn tooltip(&self) -> Option<TooltipState> {
        self.field.tooltip()
    }

    /// Whether the increment button is enabled.
    #[must_use]
    pub fn can_increment(&self) -> bool {
        self.field.can_increment()
    }

    /// Whether the decrement button is enabled.
    #[must_use]
    pub fn can_decrement(&self) -> bool {
        self.field.can_decrement()
    }

    /// Record where the host drew each control.
    pub fn set_layout(&mut self, layout: PanelLayout) {
        self.layout = layout;
        self.toggle.set_areas(layout.percent, layout.pixel);
        self.field.set_area(layout.field);
        self.field.set_tooltip_area(layout.tooltip);
    }

    /// Select a unit.
    ///
    /// Pixel to percent with a value above 100 clamps the value to `"100"`
    /// first. Returns `true` if the unit or value changed.
    pub fn set_unit(&mut self, unit: Unit) -> bool {
        let previous = std::mem::replace(&mut self.unit, unit);
        let clamped = self.field.set_unit(unit);
        self.sync_value();
        if previous != unit {
            dimpick_core::debug!(
                target: LOG_TARGET,
                from = %previous,
                to = %unit,
                value = %self.value,
                "unit changed"
            );
        }
        clamped || previous != unit
    }

    /// Store a value as-is, without validation.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.field.set_text(self.value.clone());
    }

    /// Route an input event to the controls.
    ///
    /// Returns `true` if anything changed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("calculator_panel_event", unit = %self.unit).entered();

        let changed = match event {
            Event::Mouse(mouse) if mouse.is_press() => self.handle_press(event, mouse.x, mouse.y),
            _ => self.field.handle_event(event),
        };
        self.sync_value();
        changed
    }

    fn handle_press(&mut self, event: &Event, x: u16, y: u16) -> bool {
        // The field sees the press first: outside it, that blurs and commits
        // before the pressed control acts on the committed value.
        let mut changed = self.field.handle_event(event);
        self.sync_value();

        if let Some(unit) = self.toggle.handle_event(event) {
            changed |= self.set_unit(unit);
        } else if self.layout.decrement.contains(x, y) {
            changed |= self.field.decrement();
        } else if self.layout.increment.contains(x, y) {
            changed |= self.field.increment();
        }
        changed
    }

    /// Advance the tooltip auto-hide countdown.
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.field.tick(delta)
    }

    fn sync_value(&mut self) {
        if let Some(value) = self.field.take_value_changed() {
            self.value = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Bound;
    use crate::tooltip::UNIT_ADJUSTED_MESSAGE;
    use dimpick_core::event::KeyCode;

    fn laid_out(unit: Unit, value: &str) -> CalculatorPanel {
        CalculatorPanel::with_state(unit, value).with_layout(PanelLayout::compute(Rect::new(
            0, 0, 30, 2,
        )))
    }

    fn click(panel: &mut CalculatorPanel, area: Rect) -> bool {
        panel.handle_event(&Event::click(area.x, area.y))
    }

    #[test]
    fn defaults() {
        let panel = CalculatorPanel::default();
        assert_eq!(panel.unit(), Unit::Percent);
        assert_eq!(panel.value(), "0");
        assert_eq!(panel.field().text(), "0");
    }

    #[test]
    fn set_value_is_direct() {
        let mut panel = CalculatorPanel::new();
        panel.set_value("50");
        assert_eq!(panel.value(), "50");
        panel.set_value("500");
        assert_eq!(panel.value(), "500");
        assert_eq!(panel.field().text(), "500");
        assert!(panel.tooltip().is_none());
    }

    #[test]
    fn set_unit_to_pixel_keeps_value() {
        let mut panel = CalculatorPanel::new();
        panel.set_value("75");
        assert!(panel.set_unit(Unit::Pixel));
        assert_eq!(panel.unit(), Unit::Pixel);
        assert_eq!(panel.value(), "75");
    }

    #[test]
    fn pixel_to_percent_clamps_above_hundred() {
        let mut panel = CalculatorPanel::with_state(Unit::Pixel, "0");
        panel.set_value("150");
        assert!(panel.set_unit(Unit::Percent));
        assert_eq!(panel.unit(), Unit::Percent);
        assert_eq!(panel.value(), "100");
        assert_eq!(panel.field().last_valid(), "100");
        let tooltip = panel.tooltip().expect("adjustment notice");
        assert_eq!(tooltip.message, UNIT_ADJUSTED_MESSAGE);
        assert_eq!(tooltip.bound, Some(Bound::Max));
    }

    #[test]
    fn pixel_to_percent_keeps_in_range_values() {
        for value in ["50", "99.5", "100"] {
            let mut panel = CalculatorPanel::with_state(Unit::Pixel, value);
            panel.set_unit(Unit::Percent);
            assert_eq!(panel.value(), value);
        }
    }

    #[test]
    fn pixel_to_percent_leaves_non_numeric() {
        let mut panel = CalculatorPanel::with_state(Unit::Pixel, "0");
        panel.set_value("abc");
        panel.set_unit(Unit::Percent);
        assert_eq!(panel.unit(), Unit::Percent);
        assert_eq!(panel.value(), "abc");
    }

    #[test]
    fn commit_after_switch_to_percent_stays_in_range() {
        let mut panel = CalculatorPanel::with_state(Unit::Pixel, "500");
        panel.set_value(".");
        panel.set_unit(Unit::Percent);
        assert_eq!(panel.value(), ".");
        panel.handle_event(&Event::Focus(true));
        panel.handle_event(&Event::Focus(false));
        assert_eq!(panel.value(), "100");
    }

    #[test]
    fn switch_to_pixel_clears_stale_maximum_notice() {
        let mut panel = CalculatorPanel::new();
        panel.handle_event(&Event::Focus(true));
        panel.handle_event(&Event::paste("150"));
        assert_eq!(panel.tooltip().and_then(|t| t.bound), Some(Bound::Max));
        panel.set_unit(Unit::Pixel);
        assert!(panel.tooltip().is_none());
        assert_eq!(panel.value(), "150");
    }

    #[test]
    fn same_unit_is_not_a_change() {
        let mut panel = CalculatorPanel::new();
        assert!(!panel.set_unit(Unit::Percent));
    }

    #[test]
    fn layout_places_controls_left_to_right() {
        let layout = PanelLayout::compute(Rect::new(0, 0, 30, 2));
        assert_eq!(layout.percent, Rect::new(0, 1, 4, 1));
        assert_eq!(layout.pixel, Rect::new(4, 1, 4, 1));
        assert_eq!(layout.decrement, Rect::new(9, 1, 3, 1));
        assert_eq!(layout.field, Rect::new(12, 1, 15, 1));
        assert_eq!(layout.increment, Rect::new(27, 1, 3, 1));
        assert_eq!(layout.tooltip, Rect::new(12, 0, 15, 1));
    }

    #[test]
    fn layout_without_tooltip_row() {
        let layout = PanelLayout::compute(Rect::new(0, 5, 30, 1));
        assert_eq!(layout.field.y, 5);
        assert!(layout.tooltip.is_empty());
    }

    #[test]
    fn layout_saturates_when_narrow() {
        let layout = PanelLayout::compute(Rect::new(0, 0, 6, 1));
        assert_eq!(layout.percent.width, 4);
        assert_eq!(layout.pixel.width, 2);
        assert!(layout.field.is_empty());
        assert!(layout.increment.is_empty());
    }

    #[test]
    fn toggle_press_switches_unit() {
        let mut panel = laid_out(Unit::Pixel, "150");
        let percent = panel.layout().percent;
        assert!(click(&mut panel, percent));
        assert_eq!(panel.unit(), Unit::Percent);
        assert_eq!(panel.value(), "100");
    }

    #[test]
    fn stepper_presses_commit_values() {
        let mut panel = laid_out(Unit::Percent, "0");
        let layout = panel.layout();
        assert!(!panel.can_decrement());
        assert!(!click(&mut panel, layout.decrement));
        assert_eq!(panel.value(), "0");

        assert!(click(&mut panel, layout.increment));
        assert!(click(&mut panel, layout.increment));
        assert_eq!(panel.value(), "2");
        assert!(click(&mut panel, layout.decrement));
        assert_eq!(panel.value(), "1");
    }

    #[test]
    fn increment_disabled_at_hundred_percent() {
        let mut panel = laid_out(Unit::Percent, "100");
        let increment = panel.layout().increment;
        assert!(!panel.can_increment());
        click(&mut panel, increment);
        assert_eq!(panel.value(), "100");
    }

    #[test]
    fn typing_updates_value() {
        let mut panel = laid_out(Unit::Pixel, "0");
        let field = panel.layout().field;
        click(&mut panel, field);
        assert!(panel.field().is_focused());
        panel.handle_event(&Event::key(KeyCode::End));
        panel.handle_event(&Event::key(KeyCode::Backspace));
        for c in "240".chars() {
            panel.handle_event(&Event::key(KeyCode::Char(c)));
        }
        assert_eq!(panel.value(), "240");
    }

    #[test]
    fn stepper_press_blurs_before_stepping() {
        let mut panel = laid_out(Unit::Percent, "0");
        let layout = panel.layout();
        click(&mut panel, layout.field);
        panel.handle_event(&Event::key(KeyCode::End));
        panel.handle_event(&Event::key(KeyCode::Backspace));
        assert_eq!(panel.value(), "");

        click(&mut panel, layout.increment);
        assert!(!panel.field().is_focused());
        assert_eq!(panel.value(), "1");
    }

    #[test]
    fn press_elsewhere_dismisses_tooltip() {
        let mut panel = laid_out(Unit::Percent, "0");
        panel.set_value("500");
        panel.handle_event(&Event::Focus(true));
        assert!(panel.tooltip().is_some());
        panel.handle_event(&Event::click(0, 0));
        assert_eq!(panel.value(), "100");
        // Blur re-shows the reason with a countdown.
        assert!(panel.tooltip().is_some());
        panel.tick(Duration::from_secs(2));
        assert!(panel.tooltip().is_none());
    }

    #[test]
    fn value_mirrors_field_text() {
        let mut panel = laid_out(Unit::Percent, "0");
        panel.handle_event(&Event::Focus(true));
        panel.handle_event(&Event::paste("12,5"));
        assert_eq!(panel.value(), panel.field().text());
        assert_eq!(panel.value(), "12.5");
    }
}
