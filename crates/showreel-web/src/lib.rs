#![forbid(unsafe_code)]

//! `showreel-web` provides host-driven browser adapters for the Showreel
//! engine.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) pushes DOM events
//!   and intersection ratios, then drains the effects the engine produced.
//! - **Explicit time**: every call takes the host's `now`.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! This crate does not bind to `wasm-bindgen`. It provides the seam
//! implementations ([`MemoryLocation`], [`HostScrollSurface`],
//! [`PreloadQueue`]) and a [`WebSession`] wiring them to one engine, so a
//! thin JS shim only has to forward events and apply drained effects.

#[cfg(feature = "input-parser")]
pub mod input_parser;
pub mod location;
pub mod preload_queue;
pub mod scroll_surface;

use std::rc::Rc;

use showreel_core::event::Event;
use showreel_engine::{
    ArrivalIntent, EngineConfig, LocationError, NavOutcome, Scene, SceneEngine, ScrollLockArbiter,
};
use web_time::Instant;

#[cfg(feature = "input-parser")]
pub use input_parser::{InputParseError, parse_dom_event, parse_dom_events};
pub use location::MemoryLocation;
pub use preload_queue::PreloadQueue;
pub use scroll_surface::{HostScrollSurface, ScrollCommand};

/// Side effects the host must apply after driving a [`WebSession`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostEffects {
    /// New href for `history.replaceState`, if the engine changed it.
    pub replace_href: Option<String>,
    /// URLs to warm, oldest first.
    pub preload: Vec<String>,
}

impl HostEffects {
    /// True when there is nothing to apply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.replace_href.is_none() && self.preload.is_empty()
    }
}

/// One engine wired to in-memory browser adapters.
///
/// Scroll commands are page-wide, so they are drained from the
/// [`HostScrollSurface`] behind the shared arbiter rather than per session.
#[derive(Debug)]
pub struct WebSession {
    engine: SceneEngine,
    location: MemoryLocation,
    preload: PreloadQueue,
}

impl WebSession {
    /// Create a session over `scenes` at `href`.
    ///
    /// The arrival intent is read from the share marker on `href`.
    pub fn new(
        scenes: impl Into<Rc<[Scene]>>,
        config: EngineConfig,
        href: &str,
        arbiter: ScrollLockArbiter,
    ) -> Result<Self, LocationError> {
        let location = MemoryLocation::new(href)?;
        let intent = ArrivalIntent::from_href(href, &config.to_deep_link_config());
        let preload = PreloadQueue::new();
        let engine = SceneEngine::builder(scenes)
            .with_config(config)
            .with_fetcher(preload.clone())
            .with_location(location.clone(), intent)
            .with_arbiter(arbiter)
            .build();
        tracing::debug!(target: "showreel.web", ?intent, "web session created");
        Ok(Self {
            engine,
            location,
            preload,
        })
    }

    #[must_use]
    pub fn engine(&self) -> &SceneEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SceneEngine {
        &mut self.engine
    }

    #[must_use]
    pub fn location(&self) -> &MemoryLocation {
        &self.location
    }

    /// Feed a canonical event.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> NavOutcome {
        self.engine.handle_event(event, now)
    }

    /// Parse and feed a JSON-encoded DOM event.
    ///
    /// Records without an event mapping report [`NavOutcome::NoCommit`].
    #[cfg(feature = "input-parser")]
    pub fn handle_json(&mut self, json: &str, now: Instant) -> Result<NavOutcome, InputParseError> {
        Ok(match parse_dom_event(json)? {
            Some(event) => self.engine.handle_event(&event, now),
            None => NavOutcome::NoCommit,
        })
    }

    /// Drain the effects accumulated since the last call.
    pub fn drain_effects(&mut self) -> HostEffects {
        HostEffects {
            replace_href: self.location.take_pending_replace(),
            preload: self.preload.drain(),
        }
    }
}
