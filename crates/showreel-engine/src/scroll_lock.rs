#![forbid(unsafe_code)]

//! Page scroll interception while the engine dominates the viewport.
//!
//! The page's scroll/touch-action state is the one resource the engine
//! mutates outside its own memory. It is owned by a [`ScrollLockArbiter`]
//! (one per page). Controllers never write it directly: they acquire a
//! [`ScrollLockGuard`], and dropping the guard restores exactly the state the
//! arbiter recorded at acquire time.
//!
//! # Invariants
//!
//! 1. At most one guard exists per arbiter. A second acquire, from any
//!    controller, is refused rather than queued.
//! 2. Release always restores the snapshot taken at acquire, never a
//!    hardcoded default.
//! 3. [`ScrollLockController`] holds the lock iff it is enabled, the
//!    container's intersection ratio is at or above the threshold, the
//!    cursor is not terminal, the controller has not yielded to the page,
//!    and the arbiter granted the guard.
//! 4. A yield lasts until the cursor moves or the container stops being
//!    dominant.
//! 5. Dropping a controller (engine teardown) drops its guard.
//!
//! # Failure Modes
//!
//! - A controller refused because another engine holds the lock reports
//!   unlocked and retries on its next reevaluation.
//! - Repeated acquire/release requests are no-ops.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use showreel_core::geometry::clamp_ratio;
use tracing::debug;

/// Default intersection ratio at which the container counts as dominant.
pub const DEFAULT_LOCK_THRESHOLD: f32 = 0.5;

/// Page-level scroll state that scroll-locking overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AmbientScroll {
    /// CSS `overflow` of the scrolling root.
    pub overflow: String,
    /// CSS `touch-action` of the scrolling root.
    pub touch_action: String,
}

impl AmbientScroll {
    #[must_use]
    pub fn new(overflow: impl Into<String>, touch_action: impl Into<String>) -> Self {
        Self {
            overflow: overflow.into(),
            touch_action: touch_action.into(),
        }
    }

    /// The state applied while locked.
    #[must_use]
    pub fn locked() -> Self {
        Self::new("hidden", "none")
    }
}

/// Host seam for reading and writing the page's scroll state.
pub trait ScrollSurface {
    /// Read the current ambient state.
    fn snapshot(&self) -> AmbientScroll;
    /// Write a state.
    fn apply(&mut self, state: &AmbientScroll);
}

/// Identity of one controller registered with an arbiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockOwner(u64);

struct ArbiterInner {
    surface: Box<dyn ScrollSurface>,
    holder: Option<LockOwner>,
    saved: Option<AmbientScroll>,
    next_owner: u64,
}

/// Page-wide owner of the scroll surface.
///
/// Cloning shares the same arbiter; hand one clone to every engine on the
/// page.
#[derive(Clone)]
pub struct ScrollLockArbiter {
    inner: Rc<RefCell<ArbiterInner>>,
}

impl fmt::Debug for ScrollLockArbiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ScrollLockArbiter")
            .field("holder", &inner.holder)
            .field("saved", &inner.saved)
            .finish()
    }
}

impl ScrollLockArbiter {
    /// Create an arbiter that owns `surface`.
    #[must_use]
    pub fn new(surface: impl ScrollSurface + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ArbiterInner {
                surface: Box::new(surface),
                holder: None,
                saved: None,
                next_owner: 1,
            })),
        }
    }

    /// Allocate a new owner identity.
    pub fn register(&self) -> LockOwner {
        let mut inner = self.inner.borrow_mut();
        let owner = LockOwner(inner.next_owner);
        inner.next_owner += 1;
        owner
    }

    /// Try to take the lock for `owner`.
    ///
    /// Returns `None` if any owner (including `owner`) already holds it.
    pub fn try_acquire(&self, owner: LockOwner) -> Option<ScrollLockGuard> {
        let mut inner = self.inner.borrow_mut();
        if let Some(holder) = inner.holder {
            debug!(?owner, ?holder, "scroll-lock refused: already held");
            return None;
        }
        let saved = inner.surface.snapshot();
        inner.surface.apply(&AmbientScroll::locked());
        debug!(?owner, overflow = %saved.overflow, touch_action = %saved.touch_action, "scroll-lock acquired");
        inner.saved = Some(saved);
        inner.holder = Some(owner);
        Some(ScrollLockGuard {
            inner: Rc::clone(&self.inner),
            owner,
        })
    }

    /// Current holder, if any.
    #[must_use]
    pub fn holder(&self) -> Option<LockOwner> {
        self.inner.borrow().holder
    }

    /// Whether any owner holds the lock.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.holder().is_some()
    }
}

/// Proof of holding the page scroll-lock. Dropping it restores the page.
pub struct ScrollLockGuard {
    inner: Rc<RefCell<ArbiterInner>>,
    owner: LockOwner,
}

impl ScrollLockGuard {
    #[must_use]
    pub fn owner(&self) -> LockOwner {
        self.owner
    }
}

impl fmt::Debug for ScrollLockGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollLockGuard")
            .field("owner", &self.owner)
            .finish()
    }
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let Ok(mut inner) = self.inner.try_borrow_mut() else {
            // Only reachable if a surface callback drops a guard re-entrantly.
            return;
        };
        if inner.holder != Some(self.owner) {
            return;
        }
        if let Some(saved) = inner.saved.take() {
            inner.surface.apply(&saved);
        }
        inner.holder = None;
        debug!(owner = ?self.owner, "scroll-lock released");
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Scroll-lock settings for one engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollLockConfig {
    /// Whether this engine scroll-jacks at all.
    pub enabled: bool,
    /// Intersection ratio at or above which the container is dominant.
    pub threshold: f32,
}

impl Default for ScrollLockConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: DEFAULT_LOCK_THRESHOLD,
        }
    }
}

/// Derives lock state from visibility and cursor position.
pub struct ScrollLockController {
    config: ScrollLockConfig,
    arbiter: Option<ScrollLockArbiter>,
    owner: Option<LockOwner>,
    ratio: f32,
    terminal: bool,
    yielded: bool,
    guard: Option<ScrollLockGuard>,
}

impl fmt::Debug for ScrollLockController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollLockController")
            .field("enabled", &self.config.enabled)
            .field("ratio", &self.ratio)
            .field("terminal", &self.terminal)
            .field("yielded", &self.yielded)
            .field("locked", &self.is_locked())
            .finish()
    }
}

impl ScrollLockController {
    /// Create a controller. Without an arbiter the controller never locks.
    #[must_use]
    pub fn new(config: ScrollLockConfig, arbiter: Option<ScrollLockArbiter>) -> Self {
        let owner = arbiter.as_ref().map(ScrollLockArbiter::register);
        Self {
            config,
            arbiter,
            owner,
            ratio: 0.0,
            terminal: false,
            yielded: false,
            guard: None,
        }
    }

    /// Record a new intersection ratio and reevaluate.
    pub fn set_intersection(&mut self, ratio: f32) -> bool {
        self.ratio = clamp_ratio(ratio);
        if !self.is_dominant() {
            self.yielded = false;
        }
        self.reevaluate()
    }

    /// Record whether the cursor is terminal and reevaluate.
    ///
    /// A pending yield is kept; use [`cursor_moved`](Self::cursor_moved)
    /// when the position actually changed.
    pub fn set_terminal(&mut self, terminal: bool) -> bool {
        self.terminal = terminal;
        self.reevaluate()
    }

    /// The cursor landed on a new position: end any yield and reevaluate.
    pub fn cursor_moved(&mut self, terminal: bool) -> bool {
        self.yielded = false;
        self.set_terminal(terminal)
    }

    /// Hand scrolling back to the page after a boundary was hit.
    ///
    /// Returns the lock state, which is `false` unless the controller is
    /// disabled from locking anyway.
    pub fn yield_to_page(&mut self) -> bool {
        self.yielded = true;
        self.reevaluate()
    }

    #[must_use]
    pub fn has_yielded(&self) -> bool {
        self.yielded
    }

    /// Acquire or release to match current inputs. Returns the lock state.
    pub fn reevaluate(&mut self) -> bool {
        if self.wants_lock() {
            if self.guard.is_none()
                && let (Some(arbiter), Some(owner)) = (&self.arbiter, self.owner)
            {
                self.guard = arbiter.try_acquire(owner);
            }
        } else {
            self.guard = None;
        }
        self.is_locked()
    }

    /// Release unconditionally (teardown). Safe to call when not locked.
    pub fn release(&mut self) {
        self.guard = None;
        self.ratio = 0.0;
        self.yielded = false;
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.guard.is_some()
    }

    /// Whether the container currently counts as dominant.
    #[must_use]
    pub fn is_dominant(&self) -> bool {
        self.ratio >= self.config.threshold
    }

    #[must_use]
    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    #[must_use]
    pub fn config(&self) -> &ScrollLockConfig {
        &self.config
    }

    fn wants_lock(&self) -> bool {
        self.config.enabled && self.is_dominant() && !self.terminal && !self.yielded
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Surface that shares its state with the test.
    #[derive(Clone)]
    struct SharedSurface(Rc<RefCell<(AmbientScroll, usize)>>);

    impl SharedSurface {
        fn new(overflow: &str, touch: &str) -> Self {
            Self(Rc::new(RefCell::new((AmbientScroll::new(overflow, touch), 0))))
        }
        fn state(&self) -> AmbientScroll {
            self.0.borrow().0.clone()
        }
        fn writes(&self) -> usize {
            self.0.borrow().1
        }
    }

    impl ScrollSurface for SharedSurface {
        fn snapshot(&self) -> AmbientScroll {
            self.state()
        }
        fn apply(&mut self, state: &AmbientScroll) {
            let mut inner = self.0.borrow_mut();
            inner.0 = state.clone();
            inner.1 += 1;
        }
    }

    fn enabled() -> ScrollLockConfig {
        ScrollLockConfig {
            enabled: true,
            ..ScrollLockConfig::default()
        }
    }

    #[test]
    fn guard_restores_recorded_state() {
        let surface = SharedSurface::new("scroll", "pan-y");
        let arbiter = ScrollLockArbiter::new(surface.clone());
        let owner = arbiter.register();

        let guard = arbiter.try_acquire(owner).expect("free");
        assert_eq!(surface.state(), AmbientScroll::locked());
        assert!(arbiter.is_locked());

        drop(guard);
        assert_eq!(surface.state(), AmbientScroll::new("scroll", "pan-y"));
        assert!(!arbiter.is_locked());
    }

    #[test]
    fn second_acquire_refused() {
        let arbiter = ScrollLockArbiter::new(SharedSurface::new("auto", "auto"));
        let a = arbiter.register();
        let b = arbiter.register();
        let _guard = arbiter.try_acquire(a).expect("free");
        assert!(arbiter.try_acquire(a).is_none());
        assert!(arbiter.try_acquire(b).is_none());
        assert_eq!(arbiter.holder(), Some(a));
    }

    #[test]
    fn lock_requires_dominance_and_non_terminal() {
        let surface = SharedSurface::new("auto", "auto");
        let arbiter = ScrollLockArbiter::new(surface.clone());
        let mut ctl = ScrollLockController::new(enabled(), Some(arbiter));

        assert!(!ctl.set_intersection(0.49));
        assert!(ctl.set_intersection(0.5));
        assert!(!ctl.set_terminal(true));
        assert_eq!(surface.state(), AmbientScroll::new("auto", "auto"));
        assert!(ctl.set_terminal(false));
        assert!(!ctl.set_intersection(0.1));
        assert_eq!(surface.state(), AmbientScroll::new("auto", "auto"));
    }

    #[test]
    fn yield_holds_until_move_or_viewport_exit() {
        let surface = SharedSurface::new("auto", "auto");
        let arbiter = ScrollLockArbiter::new(surface.clone());
        let mut ctl = ScrollLockController::new(enabled(), Some(arbiter));
        assert!(ctl.set_intersection(1.0));

        assert!(!ctl.yield_to_page());
        assert_eq!(surface.state(), AmbientScroll::new("auto", "auto"));
        // Still dominant, still non-terminal: the yield sticks.
        assert!(!ctl.reevaluate());
        assert!(!ctl.set_terminal(false));
        assert!(!ctl.set_intersection(0.9));

        assert!(ctl.cursor_moved(false));
        assert!(!ctl.has_yielded());

        assert!(!ctl.yield_to_page());
        assert!(!ctl.set_intersection(0.2));
        assert!(!ctl.has_yielded());
        assert!(ctl.set_intersection(0.8));
    }

    #[test]
    fn reevaluate_is_idempotent() {
        let surface = SharedSurface::new("auto", "auto");
        let arbiter = ScrollLockArbiter::new(surface.clone());
        let mut ctl = ScrollLockController::new(enabled(), Some(arbiter));
        ctl.set_intersection(0.9);
        let writes = surface.writes();
        for _ in 0..5 {
            assert!(ctl.reevaluate());
            assert!(ctl.set_intersection(0.8));
        }
        assert_eq!(surface.writes(), writes);

        ctl.release();
        ctl.release();
        assert_eq!(surface.writes(), writes + 1);
    }

    #[test]
    fn disabled_controller_never_locks() {
        let arbiter = ScrollLockArbiter::new(SharedSurface::new("auto", "auto"));
        let mut ctl = ScrollLockController::new(ScrollLockConfig::default(), Some(arbiter.clone()));
        assert!(!ctl.set_intersection(1.0));
        assert!(!arbiter.is_locked());
    }

    #[test]
    fn controller_without_arbiter_never_locks() {
        let mut ctl = ScrollLockController::new(enabled(), None);
        assert!(!ctl.set_intersection(1.0));
        assert!(ctl.is_dominant());
    }

    #[test]
    fn dropping_controller_releases() {
        let surface = SharedSurface::new("visible", "manipulation");
        let arbiter = ScrollLockArbiter::new(surface.clone());
        {
            let mut ctl = ScrollLockController::new(enabled(), Some(arbiter.clone()));
            assert!(ctl.set_intersection(1.0));
        }
        assert!(!arbiter.is_locked());
        assert_eq!(surface.state(), AmbientScroll::new("visible", "manipulation"));
    }

    #[test]
    fn two_controllers_share_one_lock() {
        let arbiter = ScrollLockArbiter::new(SharedSurface::new("auto", "auto"));
        let mut first = ScrollLockController::new(enabled(), Some(arbiter.clone()));
        let mut second = ScrollLockController::new(enabled(), Some(arbiter.clone()));

        assert!(first.set_intersection(0.9));
        assert!(!second.set_intersection(0.9));

        first.set_intersection(0.0);
        assert!(second.reevaluate());
        assert!(second.is_locked());
    }

    #[test]
    fn nan_ratio_never_locks() {
        let arbiter = ScrollLockArbiter::new(SharedSurface::new("auto", "auto"));
        let mut ctl = ScrollLockController::new(enabled(), Some(arbiter));
        assert!(!ctl.set_intersection(f32::NAN));
    }
}
