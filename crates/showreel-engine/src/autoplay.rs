#![forbid(unsafe_code)]

//! Interval timer driving hands-free advancement.
//!
//! The timer owns no clock. The host calls [`SceneEngine::tick`] with the
//! current instant (typically once per animation frame) and the engine asks
//! [`AutoplayTimer::due`] whether the interval has elapsed since the last
//! commit. Any commit, user or automatic, restarts the interval.
//!
//! [`SceneEngine::tick`]: crate::engine::SceneEngine::tick

use web_time::{Duration, Instant};

/// Default interval between automatic advances.
pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u64 = 5_000;

/// Autoplay settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayConfig {
    /// Time between automatic advances (default: 5s).
    pub interval: Duration,
    /// Whether the engine starts autoplaying.
    pub enabled_on_start: bool,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(DEFAULT_AUTOPLAY_INTERVAL_MS),
            enabled_on_start: false,
        }
    }
}

/// Tracks when the last commit happened.
#[derive(Debug, Clone, Default)]
pub struct AutoplayTimer {
    anchor: Option<Instant>,
}

impl AutoplayTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the interval at `now`.
    pub fn restart(&mut self, now: Instant) {
        self.anchor = Some(now);
    }

    /// Forget the anchor; the next [`due`](Self::due) call re-anchors.
    pub fn clear(&mut self) {
        self.anchor = None;
    }

    /// Whether `interval` has elapsed since the anchor.
    ///
    /// An unanchored timer anchors at `now` and reports not due, so the
    /// first automatic advance happens a full interval after autoplay
    /// starts being observed.
    pub fn due(&mut self, now: Instant, interval: Duration) -> bool {
        match self.anchor {
            Some(at) => now.saturating_duration_since(at) >= interval,
            None => {
                self.anchor = Some(now);
                false
            }
        }
    }
}
