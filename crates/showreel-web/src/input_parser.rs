#![forbid(unsafe_code)]

//! JSON input parser for converting host-encoded DOM events to
//! [`showreel_core::event::Event`] values.
//!
//! The JS glue serializes each DOM event it forwards into a small flat JSON
//! record and hands the string to [`parse_dom_event`]:
//!
//! | `kind` | Fields | Maps to |
//! |--------|--------|---------|
//! | `pointer` | `phase` (`down`/`move`/`up`/`cancel`), `id`, `x`, `y` | [`Event::Pointer`] |
//! | `touch` | `phase` (`start`/`move`/`end`/`cancel`), `x`, `y` | [`Event::Touch`] |
//! | `wheel` | `dx`, `dy` | [`Event::Wheel`] |
//! | `key` | `phase` (`down`/`up`), `key`, `code`, `mods`, `repeat` | [`Event::Key`] |
//! | `focus` | `focused` | [`Event::Focus`] |
//!
//! Kinds without an `Event` equivalent (resize, visibility, unknown)
//! return `Ok(None)`, as does a wheel sample with no delta.
//!
//! # Design
//!
//! Coordinates are CSS pixels and are passed through unchanged; the
//! gesture resolver only looks at differences. `mods` is the
//! [`Modifiers`] bit pattern (shift=1, alt=2, ctrl=4, meta=8).

use serde::Deserialize;
use showreel_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerEvent, PointerEventKind, TouchEvent,
    TouchPhase, WheelEvent,
};

/// Errors from parsing encoded input JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputParseError {
    /// Malformed JSON.
    Json(String),
    /// Missing required field.
    MissingField(&'static str),
    /// Unknown phase value for the event kind.
    UnknownPhase(String),
}

impl core::fmt::Display for InputParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Json(msg) => write!(f, "JSON parse error: {msg}"),
            Self::MissingField(field) => write!(f, "missing required field: {field}"),
            Self::UnknownPhase(phase) => write!(f, "unknown phase: {phase}"),
        }
    }
}

impl std::error::Error for InputParseError {}

/// Internal deserialization target for the flat JSON record.
#[derive(Debug, Deserialize)]
struct RawInput {
    kind: String,
    #[serde(default)]
    phase: Option<String>,
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    x: Option<f32>,
    #[serde(default)]
    y: Option<f32>,
    #[serde(default)]
    dx: Option<f32>,
    #[serde(default)]
    dy: Option<f32>,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    mods: Option<i32>,
    #[serde(default)]
    repeat: Option<bool>,
    #[serde(default)]
    focused: Option<bool>,
}

/// Parse a JSON-encoded DOM event into an [`Event`].
///
/// Returns `Ok(None)` for event kinds that have no `Event` equivalent.
///
/// Returns `Err` for malformed JSON, missing required fields, or an
/// unknown phase.
pub fn parse_dom_event(json: &str) -> Result<Option<Event>, InputParseError> {
    let raw: RawInput =
        serde_json::from_str(json).map_err(|e| InputParseError::Json(e.to_string()))?;

    match raw.kind.as_str() {
        "pointer" => parse_pointer_event(&raw).map(Some),
        "touch" => parse_touch_event(&raw).map(Some),
        "wheel" => Ok(parse_wheel_event(&raw)),
        "key" => parse_key_event(&raw).map(Some),
        "focus" => parse_focus_event(&raw).map(Some),
        _ => Ok(None),
    }
}

/// Parse a batch of records, skipping ones without an `Event` mapping.
///
/// Stops at the first malformed record.
pub fn parse_dom_events<'a, I>(records: I) -> Result<Vec<Event>, InputParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut events = Vec::new();
    for record in records {
        if let Some(event) = parse_dom_event(record)? {
            events.push(event);
        }
    }
    Ok(events)
}

fn parse_modifiers(mods: Option<i32>) -> Modifiers {
    let bits = mods.unwrap_or(0).clamp(0, i32::from(u8::MAX)) as u8;
    Modifiers::from_bits_truncate(bits)
}

/// Sanitized coordinate; non-finite values count as missing.
fn coord(value: Option<f32>, field: &'static str) -> Result<f32, InputParseError> {
    value
        .filter(|v| v.is_finite())
        .ok_or(InputParseError::MissingField(field))
}

fn position(raw: &RawInput) -> Result<(f32, f32), InputParseError> {
    Ok((coord(raw.x, "x")?, coord(raw.y, "y")?))
}

fn parse_pointer_event(raw: &RawInput) -> Result<Event, InputParseError> {
    let phase = raw
        .phase
        .as_deref()
        .ok_or(InputParseError::MissingField("phase"))?;
    let kind = match phase {
        "down" => PointerEventKind::Down,
        "move" => PointerEventKind::Move,
        "up" => PointerEventKind::Up,
        "cancel" => PointerEventKind::Cancel,
        other => return Err(InputParseError::UnknownPhase(other.to_string())),
    };
    // A cancelled pointer carries no meaningful position.
    let (x, y) = if kind == PointerEventKind::Cancel {
        (raw.x.unwrap_or(0.0), raw.y.unwrap_or(0.0))
    } else {
        position(raw)?
    };
    let mut event = PointerEvent::new(kind, x, y);
    if let Some(id) = raw.id {
        event = event.with_pointer_id(id);
    }
    Ok(Event::Pointer(event))
}

fn parse_touch_event(raw: &RawInput) -> Result<Event, InputParseError> {
    let phase = raw
        .phase
        .as_deref()
        .ok_or(InputParseError::MissingField("phase"))?;
    let phase = match phase {
        "start" => TouchPhase::Start,
        "move" => TouchPhase::Move,
        "end" => TouchPhase::End,
        "cancel" => TouchPhase::Cancel,
        other => return Err(InputParseError::UnknownPhase(other.to_string())),
    };
    let (x, y) = if phase == TouchPhase::Cancel {
        (raw.x.unwrap_or(0.0), raw.y.unwrap_or(0.0))
    } else {
        position(raw)?
    };
    Ok(Event::Touch(TouchEvent::new(phase, x, y)))
}

fn parse_wheel_event(raw: &RawInput) -> Option<Event> {
    let dx = raw.dx.filter(|v| v.is_finite()).unwrap_or(0.0);
    let dy = raw.dy.filter(|v| v.is_finite()).unwrap_or(0.0);
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    Some(Event::Wheel(WheelEvent {
        delta_x: dx,
        delta_y: dy,
    }))
}

fn parse_key_code_opt(code: &str) -> Option<KeyCode> {
    match code {
        "Enter" | "NumpadEnter" => Some(KeyCode::Enter),
        "Escape" | "Esc" => Some(KeyCode::Escape),
        "Tab" => Some(KeyCode::Tab),
        "Home" => Some(KeyCode::Home),
        "End" => Some(KeyCode::End),
        "PageUp" => Some(KeyCode::PageUp),
        "PageDown" => Some(KeyCode::PageDown),
        "Up" | "ArrowUp" => Some(KeyCode::Up),
        "Down" | "ArrowDown" => Some(KeyCode::Down),
        "Left" | "ArrowLeft" => Some(KeyCode::Left),
        "Right" | "ArrowRight" => Some(KeyCode::Right),
        " " | "Space" | "Spacebar" => Some(KeyCode::Char(' ')),
        other => {
            // KeyboardEvent.code fallback: Digit0..Digit9, Numpad0..Numpad9
            if let Some(tail) = other
                .strip_prefix("Digit")
                .or_else(|| other.strip_prefix("Numpad"))
            {
                let mut chars = tail.chars();
                if let Some(c) = chars.next()
                    && chars.next().is_none()
                    && c.is_ascii_digit()
                {
                    return Some(KeyCode::Char(c));
                }
            }
            // KeyboardEvent.code fallback: KeyA..KeyZ
            if let Some(tail) = other.strip_prefix("Key") {
                let mut chars = tail.chars();
                if let Some(c) = chars.next()
                    && chars.next().is_none()
                {
                    return Some(KeyCode::Char(c.to_ascii_lowercase()));
                }
            }
            let mut chars = other.chars();
            if let Some(c) = chars.next()
                && chars.next().is_none()
            {
                return Some(KeyCode::Char(c));
            }
            None
        }
    }
}

fn parse_key_event(raw: &RawInput) -> Result<Event, InputParseError> {
    let phase = raw.phase.as_deref().unwrap_or("down");
    let kind = match phase {
        "down" if raw.repeat.unwrap_or(false) => KeyEventKind::Repeat,
        "down" => KeyEventKind::Press,
        "up" => KeyEventKind::Release,
        other => return Err(InputParseError::UnknownPhase(other.to_string())),
    };

    let key_str = raw.key.as_deref().filter(|s| !s.is_empty());
    let code_str = raw.code.as_deref().filter(|s| !s.is_empty());
    if key_str.is_none() && code_str.is_none() {
        return Err(InputParseError::MissingField("code"));
    }

    // Prefer the logical `key`; fall back to the physical `code` label.
    let code = key_str
        .and_then(parse_key_code_opt)
        .or_else(|| code_str.and_then(parse_key_code_opt))
        .unwrap_or(KeyCode::Null);

    Ok(Event::Key(
        KeyEvent::new(code)
            .with_modifiers(parse_modifiers(raw.mods))
            .with_kind(kind),
    ))
}

fn parse_focus_event(raw: &RawInput) -> Result<Event, InputParseError> {
    let focused = raw
        .focused
        .ok_or(InputParseError::MissingField("focused"))?;
    Ok(Event::Focus(focused))
}
