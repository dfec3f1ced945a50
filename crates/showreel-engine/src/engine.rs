#![forbid(unsafe_code)]

//! The scene sequencer: one engine instance per navigable region.
//!
//! [`SceneEngine`] owns the navigation cursor and composes the collaborators
//! that react to it:
//!
//! ```text
//!  Event ──▶ GestureResolver / KeyMap ──▶ next / prev / go_to
//!                                              │
//!                          ┌───────────────────┼────────────────────┐
//!                          ▼                   ▼                    ▼
//!                 ScrollLockController  ResourcePreloader  DeepLinkSynchronizer
//! ```
//!
//! Every cursor change runs the same three side effects in that order, then
//! publishes the new [`EngineState`] through an [`Observable`].
//!
//! # Invariants
//!
//! 1. The cursor is `None` iff the scene sequence is empty; otherwise it is
//!    always valid for the current sequence.
//! 2. A relative step arriving within the transition window of the previous
//!    move is dropped, never queued.
//! 3. Mode switches and favorite toggles never move the cursor.
//! 4. Replacing the scene sequence resets every field except favorites.
//! 5. After [`SceneEngine::unmount`] no listener is attached, the scroll lock
//!    is released, and every navigation operation is a no-op.
//! 6. Under clamp, a step that hits either end of the sequence releases the
//!    scroll lock until the cursor moves or the container leaves dominance.
//!    Scroll-lock is only ever asserted under clamp.
//!
//! # Failure Modes
//!
//! Nothing here fails. Out-of-range targets are clamped, unknown deep-link
//! scenes are ignored, preload failures are logged and dropped, and a
//! refused scroll lock simply reports unlocked.

use std::collections::BTreeSet;
use std::rc::Rc;

use bitflags::bitflags;
use showreel_core::event::Event;
use showreel_core::gesture::{CommitSource, Direction, GestureResolver};
use showreel_core::keybinding::{KeyMap, NavAction};
use tracing::{debug, trace};
use web_time::Instant;

use crate::autoplay::{AutoplayConfig, AutoplayTimer};
use crate::config::EngineConfig;
use crate::cursor::{self, BoundaryPolicy, NavigationCursor, Step};
use crate::deep_link::{AddressableLocation, ArrivalIntent, DeepLinkSynchronizer};
use crate::mode::{self, CinematicView, GridItem, GridSelectPolicy, Mode, SplitView};
use crate::observable::{Observable, Subscription};
use crate::preload::{AssetFetcher, ResourcePreloader};
use crate::scene::{self, Scene};
use crate::scroll_lock::{ScrollLockArbiter, ScrollLockController};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Everything a presentation layer renders from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineState {
    /// Current position; `None` for an empty sequence.
    pub cursor: Option<NavigationCursor>,
    pub mode: Mode,
    /// Favorited media URLs. May reference assets no longer in the sequence.
    pub favorites: BTreeSet<String>,
    pub is_autoplaying: bool,
    pub is_scroll_locked: bool,
    /// Whether the modal detail view is open.
    pub detail_open: bool,
}

/// What a navigation request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// The cursor changed.
    Moved {
        from: NavigationCursor,
        to: NavigationCursor,
    },
    /// The target is the current position.
    Unchanged,
    /// Clamp policy at an end; nothing moved.
    AtBoundary,
    /// Dropped because a transition is still settling.
    Suppressed,
    /// The input resolved to no navigation.
    NoCommit,
    /// The sequence is empty.
    Empty,
    /// The engine has been unmounted.
    Unmounted,
}

impl NavOutcome {
    #[must_use]
    pub const fn moved(self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

bitflags! {
    /// Host listeners the engine currently needs attached.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ListenerSet: u8 {
        /// Key presses on the container.
        const KEYBOARD        = 0b0001;
        /// Pointer down/move/up/cancel on the container.
        const POINTER         = 0b0010;
        /// Wheel on the page; only while scroll-locked.
        const WHEEL           = 0b0100;
        /// Non-passive touchmove that prevents page scroll; only while locked.
        const TOUCH_INTERCEPT = 0b1000;
    }
}

/// Why the cursor is moving; recorded in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Api,
    Keyboard,
    Gesture(CommitSource),
    Autoplay,
    Selection,
}

impl Origin {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Keyboard => "keyboard",
            Self::Gesture(CommitSource::Drag) => "drag",
            Self::Gesture(CommitSource::Flick) => "flick",
            Self::Gesture(CommitSource::Wheel) => "wheel",
            Self::Autoplay => "autoplay",
            Self::Selection => "selection",
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Assembles a [`SceneEngine`] from its host seams.
pub struct SceneEngineBuilder {
    scenes: Rc<[Scene]>,
    config: EngineConfig,
    fetcher: Option<Box<dyn AssetFetcher>>,
    location: Option<(Box<dyn AddressableLocation>, ArrivalIntent)>,
    arbiter: Option<ScrollLockArbiter>,
}

impl std::fmt::Debug for SceneEngineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneEngineBuilder")
            .field("scenes", &self.scenes.len())
            .field("config", &self.config)
            .field("has_fetcher", &self.fetcher.is_some())
            .field("has_location", &self.location.is_some())
            .field("has_arbiter", &self.arbiter.is_some())
            .finish()
    }
}

impl SceneEngineBuilder {
    /// Use `config` instead of the default carousel configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Warm neighbor assets through `fetcher`.
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: impl AssetFetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Mirror the cursor into `location`. `intent` says whether the visitor
    /// arrived through a shared link.
    #[must_use]
    pub fn with_location(
        mut self,
        location: impl AddressableLocation + 'static,
        intent: ArrivalIntent,
    ) -> Self {
        self.location = Some((Box::new(location), intent));
        self
    }

    /// Scroll-lock through the page's shared arbiter.
    #[must_use]
    pub fn with_arbiter(mut self, arbiter: ScrollLockArbiter) -> Self {
        self.arbiter = Some(arbiter);
        self
    }

    /// Build and hydrate the engine.
    #[must_use]
    pub fn build(self) -> SceneEngine {
        let config = self.config;
        let deep_link_config = config.to_deep_link_config();
        let mut deep_link = match self.location {
            Some((location, intent)) => {
                DeepLinkSynchronizer::from_boxed(deep_link_config, location, intent)
            }
            None => DeepLinkSynchronizer::detached(deep_link_config),
        };
        let preloader = match self.fetcher {
            Some(fetcher) => ResourcePreloader::from_boxed(fetcher),
            None => ResourcePreloader::disabled(),
        };
        let scroll_lock = ScrollLockController::new(config.to_scroll_lock_config(), self.arbiter);

        let scenes = self.scenes;
        let counts = scene::position_counts(&scenes);
        let hydrated = deep_link.hydrate(&scenes);
        let autoplay = config.to_autoplay_config();
        let state = EngineState {
            cursor: hydrated.or_else(|| cursor::first(&counts)),
            mode: config.navigation.initial_mode,
            favorites: BTreeSet::new(),
            is_autoplaying: autoplay.enabled_on_start,
            is_scroll_locked: false,
            detail_open: hydrated.is_some(),
        };

        let mut engine = SceneEngine {
            gestures: GestureResolver::new(config.to_gesture_config()),
            keys: config.to_key_map(),
            autoplay_config: autoplay,
            config,
            scenes,
            counts,
            state: Observable::new(state),
            scroll_lock,
            preloader,
            deep_link,
            autoplay: AutoplayTimer::new(),
            last_move: None,
            visibility_known: false,
            mounted: true,
        };
        engine.refresh_position_effects(false);
        engine
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Interactive scene navigation state machine.
pub struct SceneEngine {
    config: EngineConfig,
    scenes: Rc<[Scene]>,
    counts: Vec<usize>,
    state: Observable<EngineState>,
    gestures: GestureResolver,
    keys: KeyMap,
    scroll_lock: ScrollLockController,
    preloader: ResourcePreloader,
    deep_link: DeepLinkSynchronizer,
    autoplay: AutoplayTimer,
    autoplay_config: AutoplayConfig,
    last_move: Option<Instant>,
    visibility_known: bool,
    mounted: bool,
}

impl std::fmt::Debug for SceneEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneEngine")
            .field("scenes", &self.scenes.len())
            .field("state", &self.state)
            .field("scroll_lock", &self.scroll_lock)
            .field("deep_link", &self.deep_link)
            .field("mounted", &self.mounted)
            .finish()
    }
}

impl SceneEngine {
    /// Start building an engine over `scenes`.
    #[must_use]
    pub fn builder(scenes: impl Into<Rc<[Scene]>>) -> SceneEngineBuilder {
        SceneEngineBuilder {
            scenes: scenes.into(),
            config: EngineConfig::default(),
            fetcher: None,
            location: None,
            arbiter: None,
        }
    }

    /// An engine with default config and no host seams.
    #[must_use]
    pub fn new(scenes: impl Into<Rc<[Scene]>>) -> Self {
        Self::builder(scenes).build()
    }

    // -- Read access --------------------------------------------------------

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state.get()
    }

    #[must_use]
    pub fn cursor(&self) -> Option<NavigationCursor> {
        self.state.with(|s| s.cursor)
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.state.with(|s| s.mode)
    }

    #[must_use]
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub fn is_favorite(&self, url: &str) -> bool {
        self.state.with(|s| s.favorites.contains(url))
    }

    /// Whether the last move's transition window is still open at `now`.
    #[must_use]
    pub fn is_transitioning(&self, now: Instant) -> bool {
        let window = self.config.transition_window();
        self.last_move
            .is_some_and(|at| now.saturating_duration_since(at) < window)
    }

    /// Horizontal offset of an in-flight drag, for drag-follow rendering.
    #[must_use]
    pub fn drag_offset(&self) -> Option<f32> {
        self.gestures.live_offset()
    }

    /// Version counter of the published state.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.state.version()
    }

    /// Register a callback run after every state change.
    pub fn subscribe(&self, callback: impl Fn(&EngineState) + 'static) -> Subscription {
        self.state.subscribe(callback)
    }

    /// Listeners the host should have attached right now.
    #[must_use]
    pub fn listeners(&self) -> ListenerSet {
        if !self.mounted {
            return ListenerSet::empty();
        }
        let mut set = ListenerSet::KEYBOARD | ListenerSet::POINTER;
        if self.scroll_lock.is_locked() {
            set |= ListenerSet::WHEEL | ListenerSet::TOUCH_INTERCEPT;
        }
        set
    }

    // -- Projections --------------------------------------------------------

    #[must_use]
    pub fn cinematic_view(&self) -> Option<CinematicView<'_>> {
        self.state.with(|s| mode::cinematic_view(&self.scenes, s))
    }

    #[must_use]
    pub fn grid_items(&self) -> Vec<GridItem<'_>> {
        self.state.with(|s| mode::grid_items(&self.scenes, s))
    }

    #[must_use]
    pub fn split_view(&self) -> Option<SplitView<'_>> {
        self.state.with(|s| mode::split_view(&self.scenes, s))
    }

    // -- Navigation ---------------------------------------------------------

    /// Step forward. In split mode steps whole scenes.
    pub fn next(&mut self, now: Instant) -> NavOutcome {
        self.step(Direction::Advance, now, Origin::Api)
    }

    /// Step backward. In split mode steps whole scenes.
    pub fn prev(&mut self, now: Instant) -> NavOutcome {
        self.step(Direction::Retreat, now, Origin::Api)
    }

    /// Jump to `(scene_index, media_index)`, clamping out-of-range indices.
    pub fn go_to(&mut self, scene_index: usize, media_index: usize, now: Instant) -> NavOutcome {
        self.jump(scene_index, media_index, now, Origin::Api)
    }

    /// Jump to the first media of the first scene.
    pub fn first(&mut self, now: Instant) -> NavOutcome {
        self.jump(0, 0, now, Origin::Api)
    }

    /// Jump to the first media of the last scene.
    pub fn last(&mut self, now: Instant) -> NavOutcome {
        let last_scene = self.scenes.len().saturating_sub(1);
        self.jump(last_scene, 0, now, Origin::Api)
    }

    /// Select the grid cell at `flat_index` (clamped).
    ///
    /// Under [`GridSelectPolicy::ReturnToCinematic`] this also switches back
    /// to cinematic mode.
    pub fn select_grid_item(&mut self, flat_index: usize, now: Instant) -> NavOutcome {
        if !self.mounted {
            return NavOutcome::Unmounted;
        }
        let total = cursor::total_positions(&self.counts);
        let Some(target) = total
            .checked_sub(1)
            .and_then(|max| cursor::from_flat(&self.counts, flat_index.min(max)))
        else {
            return NavOutcome::Empty;
        };
        let outcome = self.jump(target.scene_index, target.media_index, now, Origin::Selection);
        if self.config.navigation.grid_select == GridSelectPolicy::ReturnToCinematic {
            self.set_mode(Mode::Cinematic);
        }
        outcome
    }

    /// Select a scene from the split-mode list; always lands on media 0.
    pub fn select_split_entry(&mut self, scene_index: usize, now: Instant) -> NavOutcome {
        self.jump(scene_index, 0, now, Origin::Selection)
    }

    /// Feed one host input event.
    ///
    /// Wheel events are ignored unless the engine holds the scroll lock.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> NavOutcome {
        if !self.mounted {
            return NavOutcome::Unmounted;
        }
        match event {
            Event::Key(key) => {
                // Escape abandons a drag in progress.
                self.gestures.process(event, now);
                match self.keys.map(key) {
                    Some(action) => self.dispatch(action, now),
                    None => NavOutcome::NoCommit,
                }
            }
            Event::Wheel(_) if !self.scroll_lock.is_locked() => NavOutcome::NoCommit,
            _ => match self.gestures.process(event, now) {
                Some(commit) => {
                    self.step(commit.direction, now, Origin::Gesture(commit.source))
                }
                None => NavOutcome::NoCommit,
            },
        }
    }

    /// Periodic host tick: expires stale gestures, retries a refused scroll
    /// lock, and advances autoplay when due.
    pub fn tick(&mut self, now: Instant) -> NavOutcome {
        if !self.mounted {
            return NavOutcome::Unmounted;
        }
        if self.gestures.expire(now) {
            trace!(target: "showreel.engine", "stale gesture sample expired");
        }
        let locked = self.scroll_lock.reevaluate();
        self.state.update(|s| s.is_scroll_locked = locked);

        let autoplaying = self.state.with(|s| s.is_autoplaying);
        let visible = !self.visibility_known || self.scroll_lock.is_dominant();
        if !autoplaying || !visible || !self.autoplay.due(now, self.autoplay_config.interval) {
            return NavOutcome::NoCommit;
        }
        let outcome = self.step(Direction::Advance, now, Origin::Autoplay);
        if outcome == NavOutcome::AtBoundary {
            self.state.update(|s| s.is_autoplaying = false);
        }
        outcome
    }

    // -- Non-positional state ----------------------------------------------

    /// Switch presentation mode. Returns whether it changed.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if !self.mounted || self.mode() == mode {
            return false;
        }
        self.state.update(|s| s.mode = mode);
        // Split mode changes what counts as terminal.
        self.refresh_lock();
        debug!(target: "showreel.engine", mode = %mode, "mode changed");
        true
    }

    /// Add or remove `url` from favorites. Returns whether it is now a
    /// favorite.
    pub fn toggle_favorite(&mut self, url: &str) -> bool {
        let mut now_favorite = false;
        self.state.update(|s| {
            now_favorite = if s.favorites.remove(url) {
                false
            } else {
                s.favorites.insert(url.to_string())
            };
        });
        now_favorite
    }

    /// Toggle several URLs with one notification (grid bulk selection).
    pub fn toggle_favorites<I, S>(&mut self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.state.update(|s| {
            for url in urls {
                let url = url.as_ref();
                if !s.favorites.remove(url) {
                    s.favorites.insert(url.to_string());
                }
            }
        });
    }

    /// Open the modal detail view. Never moves the cursor.
    pub fn open_detail(&mut self) -> bool {
        self.set_detail(true)
    }

    /// Close the modal detail view. Never moves the cursor.
    pub fn close_detail(&mut self) -> bool {
        self.set_detail(false)
    }

    /// Invoke the current scene's call-to-action. Returns whether one ran.
    pub fn activate_cta(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        let action = self
            .cursor()
            .and_then(|at| self.scenes.get(at.scene_index))
            .and_then(Scene::call_to_action)
            .map(|cta| cta.action.clone());
        match action {
            Some(action) => {
                action.invoke();
                true
            }
            None => false,
        }
    }

    /// Start or stop autoplay. Starting re-anchors the interval.
    pub fn set_autoplay(&mut self, on: bool) {
        if !self.mounted {
            return;
        }
        if on && !self.state.with(|s| s.is_autoplaying) {
            self.autoplay.clear();
        }
        self.state.update(|s| s.is_autoplaying = on);
    }

    /// Flip autoplay. Returns the new value.
    pub fn toggle_autoplay(&mut self) -> bool {
        let on = !self.state.with(|s| s.is_autoplaying);
        self.set_autoplay(on);
        self.state.with(|s| s.is_autoplaying)
    }

    /// Report the container's intersection ratio. Returns the lock state.
    pub fn set_intersection_ratio(&mut self, ratio: f32) -> bool {
        if !self.mounted {
            return false;
        }
        self.visibility_known = true;
        let locked = self.scroll_lock.set_intersection(ratio);
        self.state.update(|s| s.is_scroll_locked = locked);
        locked
    }

    /// Shareable link to the current position, carrying the one-shot marker.
    #[must_use]
    pub fn share_href(&self) -> Option<String> {
        let at = self.cursor()?;
        self.deep_link.share_href(&self.scenes, at)
    }

    /// Swap in a new scene sequence. Resets everything but favorites.
    pub fn replace_scenes(&mut self, scenes: impl Into<Rc<[Scene]>>) {
        if !self.mounted {
            return;
        }
        self.scenes = scenes.into();
        self.counts = scene::position_counts(&self.scenes);
        self.gestures.reset();
        self.autoplay.clear();
        self.last_move = None;
        let first = cursor::first(&self.counts);
        let initial_mode = self.config.navigation.initial_mode;
        let autoplay = self.autoplay_config.enabled_on_start;
        self.state.update(|s| {
            s.cursor = first;
            s.mode = initial_mode;
            s.is_autoplaying = autoplay;
            s.detail_open = false;
        });
        debug!(
            target: "showreel.engine",
            scenes = self.scenes.len(),
            positions = cursor::total_positions(&self.counts),
            "scenes replaced"
        );
        self.refresh_position_effects(true);
    }

    /// Detach from the host: release the lock, drop gesture state, and turn
    /// every later operation into a no-op. Idempotent.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.scroll_lock.release();
        self.gestures.reset();
        self.state.update(|s| {
            s.is_scroll_locked = false;
            s.is_autoplaying = false;
        });
        debug!(target: "showreel.engine", "unmounted");
    }

    // -- Internals ----------------------------------------------------------

    fn dispatch(&mut self, action: NavAction, now: Instant) -> NavOutcome {
        match action {
            NavAction::Next => self.step(Direction::Advance, now, Origin::Keyboard),
            NavAction::Prev => self.step(Direction::Retreat, now, Origin::Keyboard),
            NavAction::GoTo(scene) => self.jump(scene, 0, now, Origin::Keyboard),
            NavAction::First => self.jump(0, 0, now, Origin::Keyboard),
            NavAction::Last => {
                let last_scene = self.scenes.len().saturating_sub(1);
                self.jump(last_scene, 0, now, Origin::Keyboard)
            }
            NavAction::CloseDetail => {
                self.close_detail();
                NavOutcome::NoCommit
            }
            NavAction::ActivateCta => {
                self.activate_cta();
                NavOutcome::NoCommit
            }
            NavAction::ToggleAutoplay => {
                self.toggle_autoplay();
                NavOutcome::NoCommit
            }
        }
    }

    fn step(&mut self, direction: Direction, now: Instant, origin: Origin) -> NavOutcome {
        if !self.mounted {
            return NavOutcome::Unmounted;
        }
        let Some(at) = self.cursor() else {
            return NavOutcome::Empty;
        };
        if self.is_transitioning(now) {
            trace!(
                target: "showreel.engine",
                source = origin.as_str(),
                "commit suppressed during transition"
            );
            return NavOutcome::Suppressed;
        }
        let policy = self.config.navigation.boundary;
        let forward = direction == Direction::Advance;
        let step = match (self.mode(), forward) {
            (Mode::Split, _) => cursor::step_scene(&self.counts, at, forward, policy),
            (_, true) => cursor::step_forward(&self.counts, at, policy),
            (_, false) => cursor::step_backward(&self.counts, at, policy),
        };
        match step {
            Step::Moved(to) if to == at => NavOutcome::Unchanged,
            Step::Moved(to) => self.apply_move(at, to, now, origin),
            Step::Boundary => {
                trace!(target: "showreel.engine", source = origin.as_str(), "at boundary");
                if policy == BoundaryPolicy::Clamp {
                    // Let the page scroll on past either end.
                    let locked = self.scroll_lock.yield_to_page();
                    self.state.update(|s| s.is_scroll_locked = locked);
                }
                NavOutcome::AtBoundary
            }
        }
    }

    fn jump(
        &mut self,
        scene_index: usize,
        media_index: usize,
        now: Instant,
        origin: Origin,
    ) -> NavOutcome {
        if !self.mounted {
            return NavOutcome::Unmounted;
        }
        let (Some(at), Some(to)) = (
            self.cursor(),
            cursor::clamp(&self.counts, scene_index, media_index),
        ) else {
            return NavOutcome::Empty;
        };
        if at == to {
            return NavOutcome::Unchanged;
        }
        self.apply_move(at, to, now, origin)
    }

    fn apply_move(
        &mut self,
        from: NavigationCursor,
        to: NavigationCursor,
        now: Instant,
        origin: Origin,
    ) -> NavOutcome {
        self.last_move = Some(now);
        self.autoplay.restart(now);
        self.state.update(|s| s.cursor = Some(to));
        debug!(
            target: "showreel.engine",
            scene_index = to.scene_index,
            media_index = to.media_index,
            source = origin.as_str(),
            "cursor moved"
        );
        self.refresh_position_effects(true);
        NavOutcome::Moved { from, to }
    }

    /// Terminal means "nothing further forward": the last position under
    /// clamp, or the last scene when split mode steps by scene.
    fn is_terminal(&self, at: NavigationCursor) -> bool {
        let policy = self.config.navigation.boundary;
        if self.mode() == Mode::Split {
            policy == BoundaryPolicy::Clamp && at.scene_index + 1 >= self.counts.len()
        } else {
            cursor::is_terminal(&self.counts, at, policy)
        }
    }

    fn refresh_lock(&mut self) {
        let terminal = self.cursor().is_some_and(|at| self.is_terminal(at));
        let locked = self.scroll_lock.set_terminal(terminal);
        self.state.update(|s| s.is_scroll_locked = locked);
    }

    /// Scroll lock, preloader, deep link, in that order.
    fn refresh_position_effects(&mut self, publish: bool) {
        let at = self.cursor();
        let terminal = at.is_some_and(|k| self.is_terminal(k));
        let locked = self.scroll_lock.cursor_moved(terminal);
        if let Some(k) = at {
            self.preloader
                .warm(&self.scenes, k, self.config.navigation.boundary);
        }
        if publish {
            self.deep_link.publish(&self.scenes, at);
        }
        self.state.update(|s| {
            s.is_scroll_locked = locked;
            if terminal {
                s.is_autoplaying = false;
            }
        });
    }

    fn set_detail(&mut self, open: bool) -> bool {
        if !self.mounted || self.state.with(|s| s.detail_open) == open {
            return false;
        }
        self.state.update(|s| s.detail_open = open);
        true
    }
}

impl Drop for SceneEngine {
    fn drop(&mut self) {
        self.unmount();
    }
}
