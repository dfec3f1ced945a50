#![forbid(unsafe_code)]

//! Keyboard surface for scene navigation.
//!
//! [`KeyMap`] maps key events to [`NavAction`]s. It is stateless apart from
//! its configuration: key repeat is forwarded as a press, releases are
//! ignored, and anything chorded with Ctrl/Alt/Super is left to the browser.
//!
//! | Key | Action |
//! |-----|--------|
//! | `←` / `↑` | [`NavAction::Prev`] |
//! | `→` / `↓` | [`NavAction::Next`] |
//! | `1`..`9` | [`NavAction::GoTo`] with index `digit - 1` |
//! | `Home` / `End` | [`NavAction::First`] / [`NavAction::Last`] |
//! | `Esc` | [`NavAction::CloseDetail`] |
//! | `Enter` | [`NavAction::ActivateCta`] |
//! | `Space` | [`NavAction::ToggleAutoplay`] |
//!
//! # Example
//!
//! ```
//! use showreel_core::event::{KeyCode, KeyEvent};
//! use showreel_core::keybinding::{KeyMap, NavAction};
//!
//! let keys = KeyMap::default();
//! assert_eq!(keys.map(&KeyEvent::new(KeyCode::Char('3'))), Some(NavAction::GoTo(2)));
//! assert_eq!(keys.map(&KeyEvent::new(KeyCode::Right)), Some(NavAction::Next));
//! ```

use crate::event::{KeyCode, KeyEvent, KeyEventKind};

/// High-level navigation command produced by the keyboard surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    /// Step forward.
    Next,
    /// Step backward.
    Prev,
    /// Jump to a scene by zero-based index (unvalidated).
    GoTo(usize),
    /// Jump to the first scene.
    First,
    /// Jump to the last scene.
    Last,
    /// Close the modal detail view without moving.
    CloseDetail,
    /// Invoke the current scene's call-to-action.
    ActivateCta,
    /// Start or stop autoplay.
    ToggleAutoplay,
}

/// Keyboard mapping options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMap {
    /// Map Up/Down like Left/Right. Hosts whose page scrolls with arrow keys
    /// while the engine is not locked may turn this off.
    pub vertical_arrows: bool,
    /// Map `1`..`9` to scene jumps.
    pub digit_shortcuts: bool,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            vertical_arrows: true,
            digit_shortcuts: true,
        }
    }
}

impl KeyMap {
    /// Map a key event to a navigation action.
    #[must_use]
    pub fn map(&self, key: &KeyEvent) -> Option<NavAction> {
        if key.kind == KeyEventKind::Release || key.has_command_modifier() {
            return None;
        }
        match key.code {
            KeyCode::Left => Some(NavAction::Prev),
            KeyCode::Right => Some(NavAction::Next),
            KeyCode::Up if self.vertical_arrows => Some(NavAction::Prev),
            KeyCode::Down if self.vertical_arrows => Some(NavAction::Next),
            KeyCode::Home => Some(NavAction::First),
            KeyCode::End => Some(NavAction::Last),
            KeyCode::Escape => Some(NavAction::CloseDetail),
            KeyCode::Enter => Some(NavAction::ActivateCta),
            KeyCode::Char(' ') => Some(NavAction::ToggleAutoplay),
            KeyCode::Char(c @ '1'..='9') if self.digit_shortcuts => {
                let digit = c.to_digit(10)? as usize;
                Some(NavAction::GoTo(digit - 1))
            }
            _ => None,
        }
    }
}
