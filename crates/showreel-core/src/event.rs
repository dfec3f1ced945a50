#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! This module defines the input events the navigation engine understands.
//! Hosts translate DOM (or native) input into these values before feeding
//! them to the gesture resolver and keyboard map.
//!
//! # Design Notes
//!
//! - Coordinates are CSS pixels relative to the viewport
//! - Pointer and touch streams are kept distinct because touch has no
//!   pointer id and no hover
//! - `KeyEventKind` defaults to `Press` when the host cannot tell
//! - `Modifiers` use bitflags for easy combination

use bitflags::bitflags;

use crate::geometry::Point;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer (mouse/pen) event.
    Pointer(PointerEvent),

    /// A touch event for the primary touch point.
    Touch(TouchEvent),

    /// A wheel/trackpad scroll sample.
    Wheel(WheelEvent),

    /// Focus gained or lost.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// True when Ctrl, Alt, or Super is held.
    ///
    /// Shift alone does not count; it is part of ordinary text entry.
    #[must_use]
    pub const fn has_command_modifier(&self) -> bool {
        self.modifiers
            .intersects(Modifiers::CTRL.union(Modifiers::ALT).union(Modifiers::SUPER))
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key (digits and space included).
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Unmapped key.
    Null,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer (mouse or pen) event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Host-assigned pointer id; distinguishes concurrent pointers.
    pub pointer_id: u32,

    /// Lifecycle phase of the pointer.
    pub kind: PointerEventKind,

    /// Position at the time of the event.
    pub pos: Point,
}

impl PointerEvent {
    /// Create a pointer event for the primary pointer (id 1).
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f32, y: f32) -> Self {
        Self {
            pointer_id: 1,
            kind,
            pos: Point::new(x, y),
        }
    }

    /// Override the pointer id.
    #[must_use]
    pub const fn with_pointer_id(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }
}

/// Pointer lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed / contact made.
    Down,
    /// Pointer moved.
    Move,
    /// Button released.
    Up,
    /// The host lost the pointer (capture lost, blur, visibility change).
    Cancel,
}

/// A touch event for the primary touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Lifecycle phase of the touch.
    pub phase: TouchPhase,

    /// Position of the primary touch point.
    pub pos: Point,
}

impl TouchEvent {
    /// Create a new touch event.
    #[must_use]
    pub const fn new(phase: TouchPhase, x: f32, y: f32) -> Self {
        Self {
            phase,
            pos: Point::new(x, y),
        }
    }
}

/// Touch lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Finger down.
    Start,
    /// Finger moved.
    Move,
    /// Finger lifted.
    End,
    /// Touch sequence interrupted by the platform.
    Cancel,
}

/// A wheel/trackpad scroll sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelEvent {
    /// Horizontal delta (positive = rightward).
    pub delta_x: f32,
    /// Vertical delta (positive = downward / toward later content).
    pub delta_y: f32,
}

impl WheelEvent {
    /// Create a vertical-only wheel sample.
    #[must_use]
    pub const fn vertical(delta_y: f32) -> Self {
        Self {
            delta_x: 0.0,
            delta_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_is_char() {
        let event = KeyEvent::new(KeyCode::Char('3'));
        assert!(event.is_char('3'));
        assert!(!event.is_char('4'));
    }

    #[test]
    fn shift_is_not_a_command_modifier() {
        let shifted = KeyEvent::new(KeyCode::Right).with_modifiers(Modifiers::SHIFT);
        assert!(!shifted.has_command_modifier());

        let ctrl = KeyEvent::new(KeyCode::Right).with_modifiers(Modifiers::CTRL);
        assert!(ctrl.has_command_modifier());

        let meta = KeyEvent::new(KeyCode::Right).with_modifiers(Modifiers::SUPER | Modifiers::SHIFT);
        assert!(meta.has_command_modifier());
    }

    #[test]
    fn key_event_kind() {
        let press = KeyEvent::new(KeyCode::Enter);
        assert_eq!(press.kind, KeyEventKind::Press);

        let release = press.with_kind(KeyEventKind::Release);
        assert_eq!(release.kind, KeyEventKind::Release);
    }

    #[test]
    fn pointer_defaults_to_primary_id() {
        let event = PointerEvent::new(PointerEventKind::Down, 10.0, 20.0);
        assert_eq!(event.pointer_id, 1);
        assert_eq!(event.pos, Point::new(10.0, 20.0));
        assert_eq!(event.with_pointer_id(7).pointer_id, 7);
    }

    #[test]
    fn wheel_vertical() {
        let wheel = WheelEvent::vertical(-42.0);
        assert_eq!(wheel.delta_x, 0.0);
        assert_eq!(wheel.delta_y, -42.0);
    }

    #[test]
    fn defaults() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
        assert_eq!(KeyEventKind::default(), KeyEventKind::Press);
    }
}
