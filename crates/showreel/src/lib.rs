#![forbid(unsafe_code)]

//! Showreel public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.
//!
//! # Example
//!
//! ```
//! use showreel::prelude::*;
//!
//! let scenes = vec![
//!     Scene::new("hero", "Hero").with_primary_image("/hero.jpg"),
//!     Scene::new("specs", "Specs").with_primary_image("/specs.jpg"),
//! ];
//! let mut engine = SceneEngine::builder(scenes)
//!     .with_config(EngineConfig::story())
//!     .build();
//! engine.next(Instant::now());
//! assert_eq!(engine.cursor(), Some(NavigationCursor::new(1, 0)));
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use showreel_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerEvent, PointerEventKind, TouchEvent,
    TouchPhase, WheelEvent,
};
pub use showreel_core::gesture::{CommitSource, Direction, GestureConfig, GestureResolver};
pub use showreel_core::keybinding::{KeyMap, NavAction};

// --- Engine re-exports -----------------------------------------------------

pub use showreel_engine::{
    AddressableLocation, AmbientScroll, ArrivalIntent, AssetFetcher, BoundaryPolicy,
    CinematicView, ConfigError, EngineConfig, EngineState, GridItem, GridSelectPolicy,
    ListenerSet, LocationError, MediaAsset, Mode, NavOutcome, NavigationCursor, PreloadError,
    Scene, SceneEngine, SceneEngineBuilder, ScrollLockArbiter, ScrollSurface, SplitView,
    Subscription,
};

pub use web_time::{Duration, Instant};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use showreel_web::{
    HostEffects, HostScrollSurface, InputParseError, MemoryLocation, PreloadQueue, ScrollCommand,
    WebSession, parse_dom_event,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Showreel hosts.
#[derive(Debug)]
pub enum Error {
    /// Config loading or validation failure.
    Config(ConfigError),
    /// A host fetcher failed.
    Preload(PreloadError),
    /// A host location failed.
    Location(LocationError),
    /// A DOM event record could not be parsed.
    #[cfg(feature = "web")]
    Input(InputParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Preload(err) => write!(f, "{err}"),
            Self::Location(err) => write!(f, "{err}"),
            #[cfg(feature = "web")]
            Self::Input(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Preload(err) => Some(err),
            Self::Location(err) => Some(err),
            #[cfg(feature = "web")]
            Self::Input(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<PreloadError> for Error {
    fn from(err: PreloadError) -> Self {
        Self::Preload(err)
    }
}

impl From<LocationError> for Error {
    fn from(err: LocationError) -> Self {
        Self::Location(err)
    }
}

#[cfg(feature = "web")]
impl From<InputParseError> for Error {
    fn from(err: InputParseError) -> Self {
        Self::Input(err)
    }
}

/// Standard result type for Showreel APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Config loading --------------------------------------------------------

/// Load and validate an [`EngineConfig`] from disk.
///
/// `.json` files are read as JSON; anything else as TOML.
#[cfg(feature = "config-file")]
pub fn load_config(path: impl AsRef<std::path::Path>) -> Result<EngineConfig> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        EngineConfig::from_json_file(path)?
    } else {
        EngineConfig::from_toml_file(path)?
    };
    Ok(config.checked()?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ArrivalIntent, BoundaryPolicy, EngineConfig, EngineState, Error, Event, MediaAsset, Mode,
        NavOutcome, NavigationCursor, Result, Scene, SceneEngine, ScrollLockArbiter,
    };

    #[cfg(feature = "web")]
    pub use crate::{HostScrollSurface, WebSession};

    pub use crate::{Duration, Instant};

    pub use crate::{core, engine};

    #[cfg(feature = "web")]
    pub use crate::web;
}

pub use showreel_core as core;
pub use showreel_engine as engine;
#[cfg(feature = "web")]
pub use showreel_web as web;
