#![forbid(unsafe_code)]

//! Gesture resolution: turns raw pointer/touch/wheel streams into commits.
//!
//! [`GestureResolver`] is a stateful processor. It watches one interaction at
//! a time and, when that interaction ends, decides whether it was a deliberate
//! horizontal swipe (a [`Commit`]) or noise to be discarded.
//!
//! # State Machine
//!
//! ```text
//! ┌──────┐  down/start   ┌──────────┐  up/end   ┌─────────────────┐
//! │ Idle │──────────────▶│ Tracking │──────────▶│ resolve → Idle  │
//! └──────┘               └──────────┘           └─────────────────┘
//!    ▲                        │ cancel / focus loss / timeout
//!    └────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. At most one [`Commit`] is produced per interaction, no matter how many
//!    move events were reported in between.
//! 2. The sample is cleared unconditionally on up/end/cancel, so a lost
//!    interaction can never block the next one.
//! 3. A gesture whose vertical travel exceeds its horizontal travel is a page
//!    scroll; the resolver abstains.
//! 4. Dragging content leftward (`start.x > end.x`) advances.
//!
//! # Failure Modes
//!
//! - If the host never delivers an up/end event (pointer capture lost without
//!   a cancel), the sample is dropped once it is older than
//!   [`GestureConfig::sample_timeout`], either by [`GestureResolver::expire`]
//!   or lazily when the next interaction starts.

use web_time::{Duration, Instant};

use crate::event::{Event, KeyCode, KeyEventKind, PointerEventKind, TouchPhase, WheelEvent};
use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Default drag distance for tap-drag contexts (CSS px).
pub const DEFAULT_DISTANCE_THRESHOLD: f32 = 50.0;

/// Drag distance for full-bleed drag contexts (CSS px).
pub const FULL_BLEED_DISTANCE_THRESHOLD: f32 = 100.0;

/// Default wheel delta that counts as one step.
pub const DEFAULT_WHEEL_THRESHOLD: f32 = 30.0;

/// Default window during which further wheel steps are swallowed.
pub const DEFAULT_WHEEL_DEBOUNCE_MS: u64 = 150;

/// Default age after which an unfinished sample is treated as cancelled.
pub const DEFAULT_SAMPLE_TIMEOUT_MS: u64 = 2_000;

/// Velocity gate for fast flicks in storytelling contexts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlickGate {
    /// Minimum horizontal velocity in px/ms (exclusive).
    pub min_velocity: f32,
    /// Minimum horizontal travel in px; filters out taps.
    pub min_distance: f32,
}

impl Default for FlickGate {
    fn default() -> Self {
        Self {
            min_velocity: 0.1,
            min_distance: 20.0,
        }
    }
}

/// Thresholds and timeouts for gesture resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Horizontal travel (px, exclusive) above which a drag commits (default: 50).
    pub distance_threshold: f32,
    /// Optional flick acceptance for short but fast drags (default: none).
    pub flick: Option<FlickGate>,
    /// Wheel `delta_y` magnitude (exclusive) that counts as a step (default: 30).
    pub wheel_threshold: f32,
    /// Window after an accepted wheel step in which further steps are
    /// swallowed (default: 150ms).
    pub wheel_debounce: Duration,
    /// Age at which an unfinished sample is dropped (default: 2s).
    pub sample_timeout: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            flick: None,
            wheel_threshold: DEFAULT_WHEEL_THRESHOLD,
            wheel_debounce: Duration::from_millis(DEFAULT_WHEEL_DEBOUNCE_MS),
            sample_timeout: Duration::from_millis(DEFAULT_SAMPLE_TIMEOUT_MS),
        }
    }
}

impl GestureConfig {
    /// Card carousels and thumbnails: 50px drag.
    #[must_use]
    pub fn tap_drag() -> Self {
        Self::default()
    }

    /// Full-viewport media: 100px drag.
    #[must_use]
    pub fn full_bleed() -> Self {
        Self {
            distance_threshold: FULL_BLEED_DISTANCE_THRESHOLD,
            ..Self::default()
        }
    }

    /// Story scroll-jacking: 50px drag, fast flicks commit early.
    #[must_use]
    pub fn storytelling() -> Self {
        Self {
            flick: Some(FlickGate::default()),
            ..Self::default()
        }
    }

    /// Set the drag threshold.
    #[must_use]
    pub fn with_distance_threshold(mut self, px: f32) -> Self {
        self.distance_threshold = px;
        self
    }

    /// Set the wheel debounce window.
    #[must_use]
    pub fn with_wheel_debounce(mut self, debounce: Duration) -> Self {
        self.wheel_debounce = debounce;
        self
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Direction of a resolved navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Move to the next item.
    Advance,
    /// Move to the previous item.
    Retreat,
}

/// Which input path produced a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitSource {
    /// A drag that travelled past the distance threshold.
    Drag,
    /// A short drag accepted by the flick velocity gate.
    Flick,
    /// A wheel step.
    Wheel,
}

/// A resolved, discrete navigation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Commit {
    /// Which way to move.
    pub direction: Direction,
    /// Which input path produced it.
    pub source: CommitSource,
}

impl Commit {
    const fn new(direction: Direction, source: CommitSource) -> Self {
        Self { direction, source }
    }
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SampleOrigin {
    Pointer(u32),
    Touch,
}

/// One in-flight interaction.
#[derive(Debug, Clone, Copy)]
struct GestureSample {
    origin: SampleOrigin,
    start_point: Point,
    start_time: Instant,
    last_point: Point,
}

// ---------------------------------------------------------------------------
// GestureResolver
// ---------------------------------------------------------------------------

/// Stateful resolver that turns raw input into at most one commit per
/// interaction.
///
/// Call [`process`](GestureResolver::process) for each incoming [`Event`].
/// Call [`expire`](GestureResolver::expire) periodically (e.g., on tick) so
/// abandoned samples are dropped even when no further input arrives.
pub struct GestureResolver {
    config: GestureConfig,
    sample: Option<GestureSample>,
    last_wheel_commit: Option<Instant>,
}

impl std::fmt::Debug for GestureResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureResolver")
            .field("tracking", &self.is_tracking())
            .field("distance_threshold", &self.config.distance_threshold)
            .finish()
    }
}

impl GestureResolver {
    /// Create a new resolver with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            sample: None,
            last_wheel_commit: None,
        }
    }

    /// Process a raw event, returning a commit if the event completed a
    /// deliberate gesture.
    pub fn process(&mut self, event: &Event, now: Instant) -> Option<Commit> {
        match event {
            Event::Pointer(pointer) => {
                let origin = SampleOrigin::Pointer(pointer.pointer_id);
                match pointer.kind {
                    PointerEventKind::Down => {
                        self.begin(origin, pointer.pos, now);
                        None
                    }
                    PointerEventKind::Move => {
                        self.track(origin, pointer.pos);
                        None
                    }
                    PointerEventKind::Up => self.finish(origin, pointer.pos, now),
                    PointerEventKind::Cancel => {
                        self.cancel_if(origin);
                        None
                    }
                }
            }
            Event::Touch(touch) => match touch.phase {
                TouchPhase::Start => {
                    self.begin(SampleOrigin::Touch, touch.pos, now);
                    None
                }
                TouchPhase::Move => {
                    self.track(SampleOrigin::Touch, touch.pos);
                    None
                }
                TouchPhase::End => self.finish(SampleOrigin::Touch, touch.pos, now),
                TouchPhase::Cancel => {
                    self.cancel_if(SampleOrigin::Touch);
                    None
                }
            },
            Event::Wheel(wheel) => self.on_wheel(wheel, now),
            Event::Key(key) => {
                if key.kind == KeyEventKind::Press && key.code == KeyCode::Escape {
                    self.sample = None;
                }
                None
            }
            Event::Focus(false) => {
                self.sample = None;
                None
            }
            Event::Focus(true) => None,
        }
    }

    /// Drop the in-flight sample if it is older than the configured timeout.
    ///
    /// Returns `true` if a sample was dropped.
    pub fn expire(&mut self, now: Instant) -> bool {
        let stale = self
            .sample
            .is_some_and(|s| now.saturating_duration_since(s.start_time) > self.config.sample_timeout);
        if stale {
            self.sample = None;
            #[cfg(feature = "tracing")]
            tracing::trace!("gesture sample expired");
        }
        stale
    }

    /// Whether an interaction is currently being tracked.
    #[inline]
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.sample.is_some()
    }

    /// Horizontal offset of the in-flight interaction (last - start), for
    /// presentation layers that make content follow the finger.
    #[must_use]
    pub fn live_offset(&self) -> Option<f32> {
        self.sample.map(|s| s.last_point.x - s.start_point.x)
    }

    /// Reset all state to idle, including the wheel debounce window.
    pub fn reset(&mut self) {
        self.sample = None;
        self.last_wheel_commit = None;
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Update the configuration.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl GestureResolver {
    fn begin(&mut self, origin: SampleOrigin, pos: Point, now: Instant) {
        self.expire(now);
        if let Some(active) = self.sample
            && active.origin != origin
        {
            // Second pointer while one is live: ignore it.
            return;
        }
        self.sample = Some(GestureSample {
            origin,
            start_point: pos,
            start_time: now,
            last_point: pos,
        });
    }

    fn track(&mut self, origin: SampleOrigin, pos: Point) {
        if let Some(sample) = self.sample.as_mut()
            && sample.origin == origin
        {
            sample.last_point = pos;
        }
    }

    fn cancel_if(&mut self, origin: SampleOrigin) {
        if self.sample.is_some_and(|s| s.origin == origin) {
            self.sample = None;
        }
    }

    fn finish(&mut self, origin: SampleOrigin, pos: Point, now: Instant) -> Option<Commit> {
        let sample = self.sample.filter(|s| s.origin == origin)?;
        self.sample = None;

        if now.saturating_duration_since(sample.start_time) > self.config.sample_timeout {
            return None;
        }

        let distance = sample.start_point.x - pos.x;
        let vertical = sample.start_point.y - pos.y;
        if vertical.abs() > distance.abs() {
            return None;
        }

        let direction = if distance > 0.0 {
            Direction::Advance
        } else {
            Direction::Retreat
        };

        if distance.abs() > self.config.distance_threshold {
            return Some(Commit::new(direction, CommitSource::Drag));
        }

        let gate = self.config.flick?;
        let elapsed_ms = (now.saturating_duration_since(sample.start_time).as_secs_f32() * 1000.0)
            .max(1.0);
        let velocity = distance.abs() / elapsed_ms;
        if velocity > gate.min_velocity && distance.abs() >= gate.min_distance {
            return Some(Commit::new(direction, CommitSource::Flick));
        }
        None
    }

    fn on_wheel(&mut self, wheel: &WheelEvent, now: Instant) -> Option<Commit> {
        if wheel.delta_y.abs() <= self.config.wheel_threshold
            || wheel.delta_x.abs() > wheel.delta_y.abs()
        {
            return None;
        }
        if let Some(last) = self.last_wheel_commit
            && now.saturating_duration_since(last) < self.config.wheel_debounce
        {
            return None;
        }
        self.last_wheel_commit = Some(now);
        let direction = if wheel.delta_y > 0.0 {
            Direction::Advance
        } else {
            Direction::Retreat
        };
        Some(Commit::new(direction, CommitSource::Wheel))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{KeyEvent, PointerEvent, TouchEvent};

    fn pointer(kind: PointerEventKind, x: f32, y: f32) -> Event {
        Event::Pointer(PointerEvent::new(kind, x, y))
    }

    fn touch(phase: TouchPhase, x: f32, y: f32) -> Event {
        Event::Touch(TouchEvent::new(phase, x, y))
    }

    fn drag(gr: &mut GestureResolver, from: f32, to: f32, t: Instant, dt: Duration) -> Option<Commit> {
        gr.process(&pointer(PointerEventKind::Down, from, 100.0), t);
        gr.process(&pointer(PointerEventKind::Move, (from + to) / 2.0, 100.0), t + dt / 2);
        gr.process(&pointer(PointerEventKind::Up, to, 100.0), t + dt)
    }

    const MS_50: Duration = Duration::from_millis(50);
    const MS_100: Duration = Duration::from_millis(100);
    const MS_500: Duration = Duration::from_millis(500);

    // --- Drag tests ---

    #[test]
    fn drag_below_threshold_is_discarded() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        assert_eq!(drag(&mut gr, 200.0, 160.0, t, MS_500), None);
        assert_eq!(drag(&mut gr, 200.0, 240.0, t + MS_500 * 2, MS_500), None);
        assert!(!gr.is_tracking());
    }

    #[test]
    fn leftward_drag_advances() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        assert_eq!(
            drag(&mut gr, 200.0, 140.0, t, MS_500),
            Some(Commit::new(Direction::Advance, CommitSource::Drag))
        );
    }

    #[test]
    fn rightward_drag_retreats() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        assert_eq!(
            drag(&mut gr, 140.0, 200.0, t, MS_500),
            Some(Commit::new(Direction::Retreat, CommitSource::Drag))
        );
    }

    #[test]
    fn many_moves_still_one_commit() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        gr.process(&pointer(PointerEventKind::Down, 300.0, 50.0), t);
        for step in 0..40 {
            let x = 300.0 - step as f32 * 3.0;
            assert_eq!(
                gr.process(&pointer(PointerEventKind::Move, x, 50.0), t + MS_50),
                None
            );
        }
        let commit = gr.process(&pointer(PointerEventKind::Up, 180.0, 50.0), t + MS_100);
        assert_eq!(commit.map(|c| c.direction), Some(Direction::Advance));

        // A stray second up resolves nothing.
        assert_eq!(
            gr.process(&pointer(PointerEventKind::Up, 100.0, 50.0), t + MS_100),
            None
        );
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        assert_eq!(drag(&mut gr, 100.0, 50.0, t, MS_500), None);
        assert!(drag(&mut gr, 100.0, 49.0, t + MS_500 * 2, MS_500).is_some());
    }

    #[test]
    fn vertical_dominant_gesture_abstains() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        gr.process(&pointer(PointerEventKind::Down, 200.0, 100.0), t);
        let commit = gr.process(&pointer(PointerEventKind::Up, 130.0, 300.0), t + MS_100);
        assert_eq!(commit, None);
        assert!(!gr.is_tracking());
    }

    #[test]
    fn full_bleed_needs_more_travel() {
        let mut gr = GestureResolver::new(GestureConfig::full_bleed());
        let t = Instant::now();
        assert_eq!(drag(&mut gr, 300.0, 220.0, t, MS_500), None);
        assert!(drag(&mut gr, 300.0, 180.0, t + MS_500 * 2, MS_500).is_some());
    }

    // --- Touch tests ---

    #[test]
    fn touch_swipe_commits() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        gr.process(&touch(TouchPhase::Start, 50.0, 400.0), t);
        gr.process(&touch(TouchPhase::Move, 90.0, 402.0), t + MS_50);
        let commit = gr.process(&touch(TouchPhase::End, 130.0, 405.0), t + MS_100);
        assert_eq!(commit.map(|c| c.direction), Some(Direction::Retreat));
    }

    #[test]
    fn touch_cancel_clears_sample() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        gr.process(&touch(TouchPhase::Start, 300.0, 400.0), t);
        gr.process(&touch(TouchPhase::Cancel, 300.0, 400.0), t + MS_50);
        assert!(!gr.is_tracking());
        assert_eq!(gr.process(&touch(TouchPhase::End, 100.0, 400.0), t + MS_100), None);
    }

    // --- Flick tests ---

    #[test]
    fn flick_commits_short_fast_drag() {
        let mut gr = GestureResolver::new(GestureConfig::storytelling());
        let t = Instant::now();
        // 30px in 100ms = 0.3 px/ms
        let commit = drag(&mut gr, 200.0, 170.0, t, MS_100);
        assert_eq!(
            commit,
            Some(Commit::new(Direction::Advance, CommitSource::Flick))
        );
    }

    #[test]
    fn slow_short_drag_is_not_a_flick() {
        let mut gr = GestureResolver::new(GestureConfig::storytelling());
        let t = Instant::now();
        // 30px in 500ms = 0.06 px/ms
        assert_eq!(drag(&mut gr, 200.0, 170.0, t, MS_500), None);
    }

    #[test]
    fn tap_is_not_a_flick() {
        let mut gr = GestureResolver::new(GestureConfig::storytelling());
        let t = Instant::now();
        // 5px in 5ms is fast but too short
        assert_eq!(
            drag(&mut gr, 200.0, 195.0, t, Duration::from_millis(5)),
            None
        );
    }

    #[test]
    fn flick_gate_absent_by_default() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        assert_eq!(drag(&mut gr, 200.0, 170.0, t, MS_100), None);
    }

    // --- Wheel tests ---

    #[test]
    fn wheel_step_commits() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        let down = gr.process(&Event::Wheel(WheelEvent::vertical(60.0)), t);
        assert_eq!(down, Some(Commit::new(Direction::Advance, CommitSource::Wheel)));
        let up = gr.process(&Event::Wheel(WheelEvent::vertical(-60.0)), t + MS_500);
        assert_eq!(up.map(|c| c.direction), Some(Direction::Retreat));
    }

    #[test]
    fn small_wheel_delta_ignored() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        assert_eq!(gr.process(&Event::Wheel(WheelEvent::vertical(30.0)), t), None);
        assert_eq!(gr.process(&Event::Wheel(WheelEvent::vertical(-12.0)), t), None);
    }

    #[test]
    fn wheel_burst_is_debounced() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        let commits = (0..20)
            .filter_map(|i| {
                gr.process(
                    &Event::Wheel(WheelEvent::vertical(80.0)),
                    t + Duration::from_millis(i * 5),
                )
            })
            .count();
        assert_eq!(commits, 1);

        // After the window, the next step is accepted again.
        assert!(
            gr.process(
                &Event::Wheel(WheelEvent::vertical(80.0)),
                t + Duration::from_millis(95 + 150)
            )
            .is_some()
        );
    }

    #[test]
    fn horizontal_wheel_ignored() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let wheel = WheelEvent {
            delta_x: 120.0,
            delta_y: 40.0,
        };
        assert_eq!(gr.process(&Event::Wheel(wheel), Instant::now()), None);
    }

    // --- Lifecycle tests ---

    #[test]
    fn live_offset_follows_moves() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        assert_eq!(gr.live_offset(), None);
        gr.process(&pointer(PointerEventKind::Down, 300.0, 0.0), t);
        gr.process(&pointer(PointerEventKind::Move, 260.0, 0.0), t + MS_50);
        assert_eq!(gr.live_offset(), Some(-40.0));
    }

    #[test]
    fn pointer_cancel_clears_sample() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        gr.process(&pointer(PointerEventKind::Down, 300.0, 0.0), t);
        gr.process(&pointer(PointerEventKind::Cancel, 300.0, 0.0), t + MS_50);
        assert!(!gr.is_tracking());
    }

    #[test]
    fn focus_loss_clears_sample() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        gr.process(&pointer(PointerEventKind::Down, 300.0, 0.0), t);
        gr.process(&Event::Focus(false), t + MS_50);
        assert!(!gr.is_tracking());
    }

    #[test]
    fn escape_clears_sample() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        gr.process(&pointer(PointerEventKind::Down, 300.0, 0.0), t);
        gr.process(&Event::Key(KeyEvent::new(KeyCode::Escape)), t + MS_50);
        assert!(!gr.is_tracking());
    }

    #[test]
    fn abandoned_sample_expires() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        gr.process(&pointer(PointerEventKind::Down, 300.0, 0.0), t);
        assert!(!gr.expire(t + Duration::from_secs(1)));
        assert!(gr.is_tracking());
        assert!(gr.expire(t + Duration::from_secs(3)));
        assert!(!gr.is_tracking());
    }

    #[test]
    fn late_up_after_timeout_does_not_commit() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        gr.process(&pointer(PointerEventKind::Down, 300.0, 0.0), t);
        let commit = gr.process(
            &pointer(PointerEventKind::Up, 100.0, 0.0),
            t + Duration::from_secs(5),
        );
        assert_eq!(commit, None);
    }

    #[test]
    fn stale_sample_does_not_block_new_interaction() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        gr.process(&pointer(PointerEventKind::Down, 300.0, 0.0), t);
        // Pointer 1 vanished; pointer 2 starts after the timeout.
        let later = t + Duration::from_secs(3);
        let down2 = Event::Pointer(PointerEvent::new(PointerEventKind::Down, 300.0, 0.0).with_pointer_id(2));
        let up2 = Event::Pointer(PointerEvent::new(PointerEventKind::Up, 200.0, 0.0).with_pointer_id(2));
        gr.process(&down2, later);
        assert!(gr.process(&up2, later + MS_100).is_some());
    }

    #[test]
    fn second_pointer_ignored_while_tracking() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        gr.process(&pointer(PointerEventKind::Down, 300.0, 0.0), t);
        let other_down =
            Event::Pointer(PointerEvent::new(PointerEventKind::Down, 10.0, 0.0).with_pointer_id(9));
        let other_up =
            Event::Pointer(PointerEvent::new(PointerEventKind::Up, 400.0, 0.0).with_pointer_id(9));
        gr.process(&other_down, t + MS_50);
        assert_eq!(gr.process(&other_up, t + MS_50), None);

        let commit = gr.process(&pointer(PointerEventKind::Up, 200.0, 0.0), t + MS_100);
        assert_eq!(commit.map(|c| c.direction), Some(Direction::Advance));
    }

    #[test]
    fn reset_clears_wheel_window() {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let t = Instant::now();
        assert!(gr.process(&Event::Wheel(WheelEvent::vertical(80.0)), t).is_some());
        gr.reset();
        assert!(gr.process(&Event::Wheel(WheelEvent::vertical(80.0)), t + MS_50).is_some());
    }

    #[test]
    fn default_config_values() {
        let config = GestureConfig::default();
        assert_eq!(config.distance_threshold, 50.0);
        assert_eq!(config.flick, None);
        assert_eq!(config.wheel_threshold, 30.0);
        assert_eq!(config.wheel_debounce, Duration::from_millis(150));
        assert_eq!(GestureConfig::full_bleed().distance_threshold, 100.0);
        assert_eq!(
            GestureConfig::storytelling().flick.map(|f| f.min_velocity),
            Some(0.1)
        );
    }

    #[test]
    fn debug_format() {
        let gr = GestureResolver::new(GestureConfig::default());
        let dbg = format!("{gr:?}");
        assert!(dbg.contains("GestureResolver"));
        assert!(dbg.contains("tracking"));
    }
}
