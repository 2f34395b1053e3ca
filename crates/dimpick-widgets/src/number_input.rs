#![forbid(unsafe_code)]

//! Numeric input field with unit-aware validation.
//!
//! [`NumberInput`] owns the text the user sees, a single-slot fallback
//! ("last valid value"), focus, and the validation tooltip. It shows literal
//! keystrokes while editing and only normalizes at commit checkpoints: blur
//! (or Enter), paste, and the stepper buttons.
//!
//! # Example
//!
//! ```rust
//! use dimpick_core::event::{Event, KeyCode};
//! use dimpick_widgets::number_input::NumberInput;
//! use dimpick_widgets::unit::Unit;
//!
//! let mut input = NumberInput::new(Unit::Percent).with_focused(true);
//! input.handle_event(&Event::key(KeyCode::Backspace));
//! for c in "150".chars() {
//!     input.handle_event(&Event::key(KeyCode::Char(c)));
//! }
//! assert_eq!(input.text(), "150");
//! assert!(input.tooltip().is_some());
//!
//! input.handle_event(&Event::key(KeyCode::Enter));
//! assert_eq!(input.text(), "100");
//! assert_eq!(input.take_value_changed().as_deref(), Some("100"));
//! ```
//!
//! # Transitions
//!
//! | Event | Text | Last valid | Tooltip |
//! |-------|------|------------|---------|
//! | key / change | edited text if it only holds `0-9 . ,` | text, if valid | reason or hidden |
//! | paste | sanitized clipboard text | text, if valid | reason or hidden |
//! | focus | unchanged | unchanged | reason if invalid |
//! | blur / Enter | nearest valid value | committed value, if valid | reason for 2 s or hidden |
//! | increment / decrement | clamped step result | step result | reason or hidden |
//! | press outside | unchanged | unchanged | hidden |
//! | px → % above 100 | `100` | `100` | adjustment notice for 2 s |

use std::time::Duration;

use dimpick_core::event::{Event, KeyCode, KeyEvent};
use dimpick_core::geometry::Rect;

use crate::normalize::{
    ValidationOutcome, format_number, is_field_char, is_field_text, nearest_valid, parse_number,
    sanitize, validate,
};
use crate::tooltip::{DEFAULT_AUTO_HIDE, TooltipCause, TooltipSlot, TooltipState};
use crate::unit::{PERCENT_MAX, Unit};

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
const LOG_TARGET: &str = "dimpick::number_input";

/// Tunables for [`NumberInput`].
#[derive(Debug, Clone, PartialEq)]
pub struct NumberInputConfig {
    /// How long transient tooltips (blur, unit adjustment) stay up.
    pub auto_hide: Duration,
    /// Amount added or removed by the stepper buttons. Always finite and positive.
    step: f64,
}

impl Default for NumberInputConfig {
    fn default() -> Self {
        Self {
            auto_hide: DEFAULT_AUTO_HIDE,
            step: 1.0,
        }
    }
}

impl NumberInputConfig {
    /// Set the transient tooltip duration.
    #[must_use]
    pub fn auto_hide(mut self, duration: Duration) -> Self {
        self.auto_hide = duration;
        self
    }

    /// Set the stepper increment.
    ///
    /// Non-finite and non-positive steps are ignored and the previous step
    /// is kept.
    #[must_use]
    pub fn step(mut self, step: f64) -> Self {
        if step.is_finite() && step > 0.0 {
            self.step = step;
        }
        self
    }

    /// The stepper increment.
    #[must_use]
    pub fn step_size(&self) -> f64 {
        self.step
    }
}

/// A single-line numeric input bound to a [`Unit`].
#[derive(Debug, Clone)]
pub struct NumberInput {
    /// Raw text as displayed.
    text: String,
    /// Cursor position (char index).
    cursor: usize,
    /// Selection anchor (char index). When set, selection spans from anchor to cursor.
    selection_anchor: Option<usize>,
    /// Fallback used when the text does not parse at commit time.
    last_valid: String,
    /// Active unit.
    unit: Unit,
    /// Whether the field has keyboard focus.
    focused: bool,
    tooltip: TooltipSlot,
    config: NumberInputConfig,
    /// Where the host drew the field.
    area: Rect,
    /// Where the host drew the tooltip, while it is visible.
    tooltip_area: Rect,
    /// Pending value-changed notification for the parent.
    value_changed: Option<String>,
}

impl Default for NumberInput {
    fn default() -> Self {
        Self::new(Unit::default())
    }
}

impl NumberInput {
    /// Create a field showing `"0"` under `unit`.
    #[must_use]
    pub fn new(unit: Unit) -> Self {
        Self {
            text: "0".to_string(),
            cursor: 1,
            selection_anchor: None,
            last_valid: "0".to_string(),
            unit,
            focused: false,
            tooltip: TooltipSlot::default(),
            config: NumberInputConfig::default(),
            area: Rect::default(),
            tooltip_area: Rect::default(),
            value_changed: None,
        }
    }

    // --- Builder methods ---

    /// Set the initial text (builder).
    ///
    /// The text becomes the fallback value too when it validates.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_text(value);
        if validate(&self.text, self.unit).is_valid() {
            self.last_valid.clone_from(&self.text);
        }
        self
    }

    /// Set the configuration (builder).
    #[must_use]
    pub fn with_config(mut self, config: NumberInputConfig) -> Self {
        self.config = config;
        self
    }

    /// Set whether the input starts focused (builder).
    #[must_use]
    pub fn with_focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set the field's hit-test area (builder).
    #[must_use]
    pub fn with_area(mut self, area: Rect) -> Self {
        self.area = area;
        self
    }

    // --- Accessors ---

    /// The displayed text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The fallback value used when the text does not parse.
    #[must_use]
    pub fn last_valid(&self) -> &str {
        &self.last_valid
    }

    /// The active unit.
    #[must_use]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Cursor position (char index).
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the field has focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &NumberInputConfig {
        &self.config
    }

    /// The field's hit-test area.
    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Get selected text, if any.
    #[must_use]
    pub fn selected_text(&self) -> Option<&str> {
        let anchor = self.selection_anchor?;
        let (start, end) = self.selection_range(anchor);
        Some(&self.text[self.byte_offset(start)..self.byte_offset(end)])
    }

    /// The text read as a number, with unparsable text counting as 0.
    #[must_use]
    pub fn numeric_value(&self) -> f64 {
        parse_number(&self.text).unwrap_or(0.0)
    }

    /// Validation of the current text under the current unit.
    #[must_use]
    pub fn validation(&self) -> ValidationOutcome {
        validate(&self.text, self.unit)
    }

    /// Full tooltip state, visible or not.
    #[must_use]
    pub fn tooltip_state(&self) -> TooltipState {
        self.tooltip.state()
    }

    /// Tooltip payload, only while shown.
    #[must_use]
    pub fn tooltip(&self) -> Option<TooltipState> {
        let state = self.tooltip.state();
        state.visible.then_some(state)
    }

    /// Time left before a transient tooltip hides itself.
    #[must_use]
    pub fn tooltip_remaining(&self) -> Option<Duration> {
        self.tooltip.remaining()
    }

    /// Whether the decrement button is enabled.
    #[must_use]
    pub fn can_decrement(&self) -> bool {
        self.numeric_value() > 0.0
    }

    /// Whether the increment button is enabled.
    #[must_use]
    pub fn can_increment(&self) -> bool {
        let value = self.numeric_value();
        self.unit.max().is_none_or(|max| value < max)
    }

    /// Take the pending value-changed notification, if any.
    ///
    /// Set by every accepted edit, paste, commit, step, and unit clamp.
    pub fn take_value_changed(&mut self) -> Option<String> {
        self.value_changed.take()
    }

    // --- Host wiring ---

    /// Replace the text without validating or notifying.
    ///
    /// Used when the owner assigns a value directly.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_count();
        self.selection_anchor = None;
    }

    /// Record where the host drew the field.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    /// Record where the host drew the tooltip.
    pub fn set_tooltip_area(&mut self, area: Rect) {
        self.tooltip_area = area;
    }

    // --- Event handling ---

    /// Handle an input event.
    ///
    /// Returns `true` if the state changed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "number_input_event",
            unit = %self.unit,
            focused = self.focused
        )
        .entered();

        match event {
            Event::Key(key) if key.is_down() && self.focused => self.handle_key(key),
            Event::Paste(paste) if self.focused => self.paste(&paste.text),
            Event::Focus(true) => self.focus(),
            Event::Focus(false) => self.blur(),
            Event::Mouse(mouse) if mouse.is_press() => self.handle_press(mouse.x, mouse.y),
            _ => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        // Ctrl/Cmd chords belong to the host (copy, cut, ...) except select-all.
        if key.is_shortcut() {
            if matches!(key.code, KeyCode::Char('a' | 'A')) {
                self.select_all();
                return true;
            }
            return false;
        }

        let shift = key.shift();
        match key.code {
            KeyCode::Char(c) if is_field_char(c) => self.insert_char(c),
            KeyCode::Enter => self.blur(),
            KeyCode::Backspace => self.delete_char_back(),
            KeyCode::Delete => self.delete_char_forward(),
            KeyCode::Left => {
                if shift {
                    self.ensure_selection_anchor();
                    self.cursor = self.cursor.saturating_sub(1);
                } else {
                    self.move_cursor_left();
                }
                true
            }
            KeyCode::Right => {
                if shift {
                    self.ensure_selection_anchor();
                    self.cursor = (self.cursor + 1).min(self.char_count());
                } else {
                    self.move_cursor_right();
                }
                true
            }
            KeyCode::Home | KeyCode::Up => {
                self.move_cursor_to(0, shift);
                true
            }
            KeyCode::End | KeyCode::Down => {
                self.move_cursor_to(self.char_count(), shift);
                true
            }
            // Letters, symbols, Tab, Escape: never reach the text.
            _ => false,
        }
    }

    fn handle_press(&mut self, x: u16, y: u16) -> bool {
        if self.area.contains(x, y) {
            let column = usize::from(x - self.area.x);
            self.cursor = column.min(self.char_count());
            self.selection_anchor = None;
            if !self.focused {
                self.focus();
            }
            return true;
        }
        if self.tooltip.is_visible() && self.tooltip_area.contains(x, y) {
            return false;
        }
        let hid = self.dismiss_tooltip();
        let committed = self.focused && self.blur();
        hid || committed
    }

    // --- Transitions ---

    /// Replace the whole text as a direct edit.
    ///
    /// Rejected (returns `false`, nothing changes) unless the text only holds
    /// digits, `.` and `,`. Accepted text is validated as typed: a valid
    /// value becomes the new fallback, an invalid one shows its reason.
    pub fn change(&mut self, text: &str) -> bool {
        let cursor = text.chars().count();
        self.apply_change(text.to_string(), cursor)
    }

    /// Paste clipboard text, replacing the whole field.
    pub fn paste(&mut self, text: &str) -> bool {
        let cleaned = sanitize(text);
        let outcome = validate(&cleaned, self.unit);
        if outcome.is_valid() {
            self.last_valid.clone_from(&cleaned);
        }
        self.tooltip.apply(outcome);
        dimpick_core::debug!(
            target: LOG_TARGET,
            pasted = text,
            cleaned = %cleaned,
            valid = outcome.is_valid(),
            "paste"
        );
        self.set_text(cleaned);
        self.notify();
        true
    }

    /// Gain focus: re-validate and surface the reason if invalid.
    pub fn focus(&mut self) -> bool {
        let was_focused = std::mem::replace(&mut self.focused, true);
        let outcome = self.validation();
        if let ValidationOutcome::Invalid(reason) = outcome {
            self.tooltip.show(TooltipCause::Invalid(reason));
            return true;
        }
        !was_focused
    }

    /// Lose focus: commit the nearest valid value.
    ///
    /// The sanitized candidate (before clamping) decides the tooltip: its
    /// reason is shown for the auto-hide duration, or the tooltip is hidden
    /// when the candidate was already valid.
    pub fn blur(&mut self) -> bool {
        self.focused = false;
        let candidate = sanitize(&self.text);
        let outcome = validate(&candidate, self.unit);
        let committed = nearest_valid(&candidate, self.unit, &self.last_valid);
        if outcome.is_valid() {
            self.last_valid.clone_from(&committed);
        }
        self.tooltip.apply_for(outcome, self.config.auto_hide);
        dimpick_core::debug!(
            target: LOG_TARGET,
            raw = %self.text,
            committed = %committed,
            reason = ?outcome.reason(),
            "blur commit"
        );
        self.set_text(committed);
        self.notify();
        true
    }

    /// Step up by the configured amount, capped at 100 under percent.
    ///
    /// No-op while the increment button is disabled.
    pub fn increment(&mut self) -> bool {
        if !self.can_increment() {
            return false;
        }
        let next = self.unit.clamp(self.numeric_value() + self.config.step_size());
        self.step_to(next)
    }

    /// Step down by the configured amount, floored at 0.
    ///
    /// No-op while the decrement button is disabled.
    pub fn decrement(&mut self) -> bool {
        if !self.can_decrement() {
            return false;
        }
        let next = self.unit.clamp(self.numeric_value() - self.config.step_size());
        self.step_to(next)
    }

    /// Hide the tooltip after a press outside the field and tooltip.
    ///
    /// Returns `true` if a tooltip was shown.
    pub fn dismiss_tooltip(&mut self) -> bool {
        let was_visible = self.tooltip.is_visible();
        self.tooltip.hide();
        was_visible
    }

    /// Switch the active unit.
    ///
    /// Going from pixels to percent with a value above 100 clamps the value
    /// to 100 and shows a transient notice. Every other switch leaves the
    /// text alone: the new bounds apply from now on, a fallback above the new
    /// maximum is lowered to it, and a shown validation reason is re-derived
    /// from the text under the new unit.
    pub fn set_unit(&mut self, unit: Unit) -> bool {
        let previous = std::mem::replace(&mut self.unit, unit);
        if previous == unit {
            return false;
        }

        // The fallback must stay committable under the new bounds, even when
        // the text itself is left alone.
        if let Some(max) = unit.max()
            && parse_number(&self.last_valid).is_some_and(|value| value > max)
        {
            self.last_valid = format_number(max);
        }

        if previous == Unit::Pixel
            && unit == Unit::Percent
            && parse_number(&self.text).is_some_and(|value| value > PERCENT_MAX)
        {
            dimpick_core::debug!(
                target: LOG_TARGET,
                raw = %self.text,
                "value clamped to 100 after unit switch"
            );
            let clamped = format_number(PERCENT_MAX);
            self.last_valid.clone_from(&clamped);
            self.set_text(clamped);
            self.tooltip
                .show_for(TooltipCause::UnitAdjusted, self.config.auto_hide);
            self.notify();
            return true;
        }

        // A validation reason on screen must describe the text under the
        // bounds that apply now.
        if matches!(self.tooltip.cause(), Some(TooltipCause::Invalid(_))) {
            self.tooltip.revalidate(self.validation());
        }
        true
    }

    /// Advance the tooltip auto-hide countdown.
    ///
    /// Returns `true` if the tooltip was hidden by this tick.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let hid = self.tooltip.tick(delta);
        if hid {
            dimpick_core::trace!(target: LOG_TARGET, "tooltip auto-hidden");
        }
        hid
    }

    fn apply_change(&mut self, text: String, cursor: usize) -> bool {
        if !is_field_text(&text) {
            dimpick_core::trace!(target: LOG_TARGET, text = %text, "change rejected");
            return false;
        }
        let outcome = validate(&text, self.unit);
        if outcome.is_valid() {
            self.last_valid.clone_from(&text);
        }
        self.tooltip.apply(outcome);
        self.text = text;
        self.cursor = cursor.min(self.char_count());
        self.selection_anchor = None;
        self.notify();
        true
    }

    fn step_to(&mut self, value: f64) -> bool {
        let text = format_number(value);
        self.last_valid.clone_from(&text);
        self.tooltip.apply(validate(&text, self.unit));
        dimpick_core::debug!(target: LOG_TARGET, value = %text, "step");
        self.set_text(text);
        self.notify();
        true
    }

    fn notify(&mut self) {
        self.value_changed = Some(self.text.clone());
    }

    // --- Editing operations ---

    fn insert_char(&mut self, c: char) -> bool {
        let (mut text, cursor) = self.without_selection();
        let at = byte_offset(&text, cursor);
        text.insert(at, c);
        self.apply_change(text, cursor + 1)
    }

    fn delete_char_back(&mut self) -> bool {
        if self.selection_anchor.is_some() {
            let (text, cursor) = self.without_selection();
            return self.apply_change(text, cursor);
        }
        if self.cursor == 0 {
            return false;
        }
        let mut text = self.text.clone();
        let start = byte_offset(&text, self.cursor - 1);
        let end = byte_offset(&text, self.cursor);
        text.drain(start..end);
        self.apply_change(text, self.cursor - 1)
    }

    fn delete_char_forward(&mut self) -> bool {
        if self.selection_anchor.is_some() {
            let (text, cursor) = self.without_selection();
            return self.apply_change(text, cursor);
        }
        if self.cursor >= self.char_count() {
            return false;
        }
        let mut text = self.text.clone();
        let start = byte_offset(&text, self.cursor);
        let end = byte_offset(&text, self.cursor + 1);
        text.drain(start..end);
        self.apply_change(text, self.cursor)
    }

    /// The text with the selection removed, and where the cursor lands.
    fn without_selection(&self) -> (String, usize) {
        let mut text = self.text.clone();
        match self.selection_anchor {
            Some(anchor) => {
                let (start, end) = self.selection_range(anchor);
                text.drain(byte_offset(&self.text, start)..byte_offset(&self.text, end));
                (text, start)
            }
            None => (text, self.cursor),
        }
    }

    // --- Selection ---

    /// Select all text.
    pub fn select_all(&mut self) {
        self.selection_anchor = Some(0);
        self.cursor = self.char_count();
    }

    fn ensure_selection_anchor(&mut self) {
        if self.selection_anchor.is_none() {
            self.selection_anchor = Some(self.cursor);
        }
    }

    fn selection_range(&self, anchor: usize) -> (usize, usize) {
        if anchor <= self.cursor {
            (anchor, self.cursor)
        } else {
            (self.cursor, anchor)
        }
    }

    // --- Cursor movement ---

    fn move_cursor_left(&mut self) {
        if let Some(anchor) = self.selection_anchor.take() {
            self.cursor = self.cursor.min(anchor);
        } else if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    fn move_cursor_right(&mut self) {
        if let Some(anchor) = self.selection_anchor.take() {
            self.cursor = self.cursor.max(anchor);
        } else if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    fn move_cursor_to(&mut self, position: usize, select: bool) {
        if select {
            self.ensure_selection_anchor();
        } else {
            self.selection_anchor = None;
        }
        self.cursor = position;
    }

    // --- Internal helpers ---

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        byte_offset(&self.text, char_idx)
    }
}

fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(i, _)| i)
}
