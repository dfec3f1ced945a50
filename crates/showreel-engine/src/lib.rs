#![forbid(unsafe_code)]

//! Showreel Engine
//!
//! The navigation state machine behind story heroes, card carousels, modal
//! media showcases, and chaptered galleries. One parameterized engine serves
//! all of them; the screens differ only in [`EngineConfig`].
//!
//! # Key Components
//!
//! - [`SceneEngine`] - Scene sequencer owning the cursor, mode, and favorites
//! - [`ScrollLockArbiter`] / [`ScrollLockController`] - Scoped page scroll interception
//! - [`ResourcePreloader`] - Best-effort warming of neighbor assets
//! - [`DeepLinkSynchronizer`] - Cursor to URL query and back
//! - [`mode`] - Cinematic, grid, and split projections of engine state
//! - [`Observable`] - Change notification for presentation layers
//!
//! # Role in Showreel
//! `showreel-engine` is the orchestrator. It consumes events and commits
//! from `showreel-core`, mutates its cursor, and drives the host seams
//! ([`AssetFetcher`], [`AddressableLocation`], [`ScrollSurface`]) that
//! `showreel-web` implements for browsers.
//!
//! # Example
//!
//! ```
//! use showreel_engine::{EngineConfig, MediaAsset, NavigationCursor, Scene, SceneEngine};
//! use web_time::Instant;
//!
//! let scenes = vec![
//!     Scene::new("exterior", "Exterior")
//!         .with_media(MediaAsset::new("/img/ext-1.jpg", "Front"))
//!         .with_media(MediaAsset::new("/img/ext-2.jpg", "Rear")),
//!     Scene::new("interior", "Interior").with_primary_image("/img/int.jpg"),
//! ];
//! let mut engine = SceneEngine::builder(scenes)
//!     .with_config(EngineConfig::carousel())
//!     .build();
//!
//! engine.next(Instant::now());
//! assert_eq!(engine.cursor(), Some(NavigationCursor::new(0, 1)));
//! ```

pub mod autoplay;
pub mod config;
pub mod cursor;
pub mod deep_link;
pub mod engine;
pub mod error;
pub mod mode;
pub mod observable;
pub mod preload;
pub mod scene;
pub mod scroll_lock;

pub use autoplay::AutoplayConfig;
pub use config::EngineConfig;
pub use cursor::{BoundaryPolicy, NavigationCursor};
pub use deep_link::{
    AddressableLocation, ArrivalIntent, DeepLinkConfig, DeepLinkPayload, DeepLinkSynchronizer,
};
pub use engine::{EngineState, ListenerSet, NavOutcome, SceneEngine, SceneEngineBuilder};
pub use error::{ConfigError, LocationError, PreloadError};
pub use mode::{CinematicView, GridItem, GridSelectPolicy, Mode, SplitEntry, SplitView};
pub use observable::{Observable, Subscription};
pub use preload::{AssetFetcher, ResourcePreloader};
pub use scene::{ActionRef, CallToAction, MediaAsset, Scene, Stat};
pub use scroll_lock::{
    AmbientScroll, LockOwner, ScrollLockArbiter, ScrollLockConfig, ScrollLockController,
    ScrollLockGuard, ScrollSurface,
};
