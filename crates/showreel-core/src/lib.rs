#![forbid(unsafe_code)]

//! Core: input events, gesture resolution, and the keyboard surface.
//!
//! # Role in Showreel
//! `showreel-core` is the input layer. It owns the canonical event types a
//! host feeds in, the [`gesture::GestureResolver`] that turns continuous
//! pointer/touch/wheel streams into discrete commits, and the
//! [`keybinding::KeyMap`] that turns keys into navigation actions.
//!
//! # How it fits in the system
//! The engine (`showreel-engine`) consumes commits and actions and mutates
//! its navigation cursor. Nothing here knows about scenes, so the same
//! resolver serves carousels, story sections, and modal galleries alike.

pub mod event;
pub mod geometry;
pub mod gesture;
pub mod keybinding;
