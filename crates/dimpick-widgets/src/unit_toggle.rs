#![forbid(unsafe_code)]

//! Two-segment `%` / `px` selector.
//!
//! The toggle does not store the selected unit; its owner does. It only knows
//! where its two segments were drawn and reports which unit a press asked for.

use dimpick_core::event::Event;
use dimpick_core::geometry::Rect;

use crate::unit::Unit;

/// Hit-test areas of the two toggle segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitToggle {
    percent_area: Rect,
    pixel_area: Rect,
}

impl UnitToggle {
    /// Create a toggle with no hit areas yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            percent_area: Rect::new(0, 0, 0, 0),
            pixel_area: Rect::new(0, 0, 0, 0),
        }
    }

    /// Set both segment areas (builder).
    #[must_use]
    pub const fn with_areas(mut self, percent: Rect, pixel: Rect) -> Self {
        self.percent_area = percent;
        self.pixel_area = pixel;
        self
    }

    /// Record where the host drew the segments.
    pub fn set_areas(&mut self, percent: Rect, pixel: Rect) {
        self.percent_area = percent;
        self.pixel_area = pixel;
    }

    /// Area of the segment for `unit`.
    #[must_use]
    pub const fn area(&self, unit: Unit) -> Rect {
        match unit {
            Unit::Percent => self.percent_area,
            Unit::Pixel => self.pixel_area,
        }
    }

    /// Segment label.
    #[must_use]
    pub const fn label(unit: Unit) -> &'static str {
        unit.symbol()
    }

    /// Whether the segment for `unit` should render as selected.
    #[must_use]
    pub fn is_active(unit: Unit, current: Unit) -> bool {
        unit == current
    }

    /// The unit whose segment contains `(x, y)`.
    #[must_use]
    pub fn hit(&self, x: u16, y: u16) -> Option<Unit> {
        Unit::ALL
            .into_iter()
            .find(|&unit| self.area(unit).contains(x, y))
    }

    /// The unit a pointer press selects, if it landed on a segment.
    ///
    /// Pressing the already-active segment still reports it; the owner decides
    /// whether that is a change.
    #[must_use]
    pub fn handle_event(&self, event: &Event) -> Option<Unit> {
        match event {
            Event::Mouse(mouse) if mouse.is_press() => self.hit(mouse.x, mouse.y),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimpick_core::event::KeyCode;

    fn toggle() -> UnitToggle {
        UnitToggle::new().with_areas(Rect::new(0, 0, 3, 1), Rect::new(3, 0, 4, 1))
    }

    #[test]
    fn labels() {
        assert_eq!(UnitToggle::label(Unit::Percent), "%");
        assert_eq!(UnitToggle::label(Unit::Pixel), "px");
    }

    #[test]
    fn active_segment_matches_current() {
        assert!(UnitToggle::is_active(Unit::Percent, Unit::Percent));
        assert!(!UnitToggle::is_active(Unit::Pixel, Unit::Percent));
    }

    #[test]
    fn hit_finds_segment() {
        let toggle = toggle();
        assert_eq!(toggle.hit(1, 0), Some(Unit::Percent));
        assert_eq!(toggle.hit(3, 0), Some(Unit::Pixel));
        assert_eq!(toggle.hit(7, 0), None);
        assert_eq!(toggle.hit(1, 1), None);
    }

    #[test]
    fn press_reports_unit() {
        let toggle = toggle();
        assert_eq!(toggle.handle_event(&Event::click(4, 0)), Some(Unit::Pixel));
        assert_eq!(toggle.handle_event(&Event::key(KeyCode::Enter)), None);
    }

    #[test]
    fn unset_areas_never_hit() {
        let toggle = UnitToggle::new();
        assert_eq!(toggle.hit(0, 0), None);
    }
}
