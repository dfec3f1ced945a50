#![forbid(unsafe_code)]

//! Policy-as-data configuration for a [`SceneEngine`](crate::engine::SceneEngine).
//!
//! The screens the engine serves differ only in thresholds and boundary
//! policy, so every knob lives in one [`EngineConfig`] that can be built from
//! a preset, overridden from the environment, or loaded from TOML/JSON with
//! the `config-file` feature.
//!
//! # Loading
//!
//! ```toml
//! # showreel.toml
//! [navigation]
//! boundary = "clamp"
//! transition_ms = 400
//!
//! [scroll_lock]
//! enabled = true
//! threshold = 0.5
//! ```
//!
//! ```rust,ignore
//! let config = EngineConfig::from_toml_file("showreel.toml")?;
//! let config = EngineConfig::from_json_str(json)?.checked()?;
//! ```
//!
//! # Environment
//!
//! | Variable | Field |
//! |---|---|
//! | `SHOWREEL_BOUNDARY` | `navigation.boundary` (`wrap` / `clamp`) |
//! | `SHOWREEL_TRANSITION_MS` | `navigation.transition_ms` |
//! | `SHOWREEL_SCROLL_LOCK` | `scroll_lock.enabled` (`1` / `true`) |
//! | `SHOWREEL_SCROLL_LOCK_THRESHOLD` | `scroll_lock.threshold` |
//! | `SHOWREEL_AUTOPLAY_INTERVAL_MS` | `autoplay.interval_ms` |
//!
//! Unparsable values are ignored and the previous value kept.

#[cfg(feature = "config-file")]
use std::path::Path;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

use showreel_core::gesture::{
    DEFAULT_DISTANCE_THRESHOLD, DEFAULT_SAMPLE_TIMEOUT_MS, DEFAULT_WHEEL_DEBOUNCE_MS,
    DEFAULT_WHEEL_THRESHOLD, FULL_BLEED_DISTANCE_THRESHOLD, FlickGate, GestureConfig,
};
use showreel_core::keybinding::KeyMap;
use web_time::Duration;

use crate::autoplay::{AutoplayConfig, DEFAULT_AUTOPLAY_INTERVAL_MS};
use crate::cursor::BoundaryPolicy;
use crate::deep_link::{
    DEFAULT_MEDIA_PARAM, DEFAULT_SCENE_PARAM, DEFAULT_SHARE_PARAM, DEFAULT_SHARE_VALUE,
    DeepLinkConfig,
};
use crate::error::ConfigError;
use crate::mode::{GridSelectPolicy, Mode};
use crate::scroll_lock::{DEFAULT_LOCK_THRESHOLD, ScrollLockConfig};

/// Default window during which a visual transition suppresses new commits.
pub const DEFAULT_TRANSITION_MS: u64 = 400;

// ---------------------------------------------------------------------------
// Top-level EngineConfig
// ---------------------------------------------------------------------------

/// Every tunable of one engine instance.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct EngineConfig {
    /// Boundary policy, transition window, modes.
    pub navigation: NavigationPolicyConfig,
    /// Drag, flick, and wheel thresholds.
    pub gesture: GesturePolicyConfig,
    /// Page scroll interception.
    pub scroll_lock: ScrollLockPolicyConfig,
    /// Automatic advancement.
    pub autoplay: AutoplayPolicyConfig,
    /// URL parameter names.
    pub deep_link: DeepLinkPolicyConfig,
    /// Keyboard surface.
    pub keys: KeyPolicyConfig,
}

impl EngineConfig {
    /// Card carousels: wrap, 50px drag, no scroll-lock.
    #[must_use]
    pub fn carousel() -> Self {
        Self::default()
    }

    /// Story sections: clamp, scroll-lock while dominant, fast flicks commit.
    #[must_use]
    pub fn story() -> Self {
        let mut config = Self::default();
        config.navigation.boundary = BoundaryPolicy::Clamp;
        config.scroll_lock.enabled = true;
        config.gesture.flick_enabled = true;
        config
    }

    /// Modal galleries: wrap, 100px full-bleed drag, grid selection returns
    /// to cinematic.
    #[must_use]
    pub fn gallery() -> Self {
        let mut config = Self::default();
        config.gesture.distance_threshold = FULL_BLEED_DISTANCE_THRESHOLD;
        config.navigation.grid_select = GridSelectPolicy::ReturnToCinematic;
        config
    }

    /// Defaults with `SHOWREEL_*` environment overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = lookup("SHOWREEL_BOUNDARY")
            && let Ok(policy) = val.parse::<BoundaryPolicy>()
        {
            self.navigation.boundary = policy;
        }

        if let Some(val) = lookup("SHOWREEL_TRANSITION_MS")
            && let Ok(ms) = val.parse::<u64>()
        {
            self.navigation.transition_ms = ms;
        }

        if let Some(val) = lookup("SHOWREEL_SCROLL_LOCK") {
            self.scroll_lock.enabled = val == "1" || val.eq_ignore_ascii_case("true");
        }

        if let Some(val) = lookup("SHOWREEL_SCROLL_LOCK_THRESHOLD")
            && let Ok(ratio) = val.parse::<f32>()
        {
            self.scroll_lock.threshold = ratio;
        }

        if let Some(val) = lookup("SHOWREEL_AUTOPLAY_INTERVAL_MS")
            && let Ok(ms) = val.parse::<u64>()
        {
            self.autoplay.interval_ms = ms;
        }

        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let g = &self.gesture;
        if g.distance_threshold.is_nan() || g.distance_threshold <= 0.0 {
            errors.push(format!(
                "gesture.distance_threshold must be > 0, got {}",
                g.distance_threshold
            ));
        }
        if g.wheel_threshold.is_nan() || g.wheel_threshold < 0.0 {
            errors.push(format!(
                "gesture.wheel_threshold must be >= 0, got {}",
                g.wheel_threshold
            ));
        }
        if g.flick_enabled && (g.flick_min_velocity.is_nan() || g.flick_min_velocity <= 0.0) {
            errors.push(format!(
                "gesture.flick_min_velocity must be > 0, got {}",
                g.flick_min_velocity
            ));
        }
        if g.flick_enabled && (g.flick_min_distance.is_nan() || g.flick_min_distance < 0.0) {
            errors.push(format!(
                "gesture.flick_min_distance must be >= 0, got {}",
                g.flick_min_distance
            ));
        }
        if g.sample_timeout_ms == 0 {
            errors.push("gesture.sample_timeout_ms must be > 0".into());
        }

        let t = self.scroll_lock.threshold;
        if t.is_nan() || t <= 0.0 || t > 1.0 {
            errors.push(format!("scroll_lock.threshold must be in (0, 1], got {t}"));
        }

        if self.scroll_lock.enabled && self.navigation.boundary == BoundaryPolicy::Wrap {
            errors.push("scroll_lock.enabled requires navigation.boundary = clamp".into());
        }

        if self.autoplay.interval_ms == 0 {
            errors.push("autoplay.interval_ms must be > 0".into());
        }

        let d = &self.deep_link;
        let params = [&d.scene_param, &d.media_param, &d.share_param];
        if params.iter().any(|p| p.is_empty()) {
            errors.push("deep_link parameter names must be non-empty".into());
        }
        if d.scene_param == d.media_param
            || d.scene_param == d.share_param
            || d.media_param == d.share_param
        {
            errors.push("deep_link parameter names must be distinct".into());
        }
        if d.share_value.is_empty() {
            errors.push("deep_link.share_value must be non-empty".into());
        }

        errors
    }

    /// `Ok(self)` if [`validate`](Self::validate) reports nothing.
    pub fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Window during which new commits are suppressed after a move.
    #[must_use]
    pub fn transition_window(&self) -> Duration {
        Duration::from_millis(self.navigation.transition_ms)
    }

    /// Build a [`GestureConfig`] from this config.
    #[must_use]
    pub fn to_gesture_config(&self) -> GestureConfig {
        let g = &self.gesture;
        GestureConfig {
            distance_threshold: g.distance_threshold,
            flick: g.flick_enabled.then_some(FlickGate {
                min_velocity: g.flick_min_velocity,
                min_distance: g.flick_min_distance,
            }),
            wheel_threshold: g.wheel_threshold,
            wheel_debounce: Duration::from_millis(g.wheel_debounce_ms),
            sample_timeout: Duration::from_millis(g.sample_timeout_ms),
        }
    }

    /// Build a [`ScrollLockConfig`] from this config.
    ///
    /// Locking is switched off under [`BoundaryPolicy::Wrap`] even when
    /// requested, so an unvalidated config cannot trap the page.
    #[must_use]
    pub fn to_scroll_lock_config(&self) -> ScrollLockConfig {
        ScrollLockConfig {
            enabled: self.scroll_lock.enabled
                && self.navigation.boundary == BoundaryPolicy::Clamp,
            threshold: self.scroll_lock.threshold,
        }
    }

    /// Build an [`AutoplayConfig`] from this config.
    #[must_use]
    pub fn to_autoplay_config(&self) -> AutoplayConfig {
        AutoplayConfig {
            interval: Duration::from_millis(self.autoplay.interval_ms),
            enabled_on_start: self.autoplay.enabled_on_start,
        }
    }

    /// Build a [`DeepLinkConfig`] from this config.
    #[must_use]
    pub fn to_deep_link_config(&self) -> DeepLinkConfig {
        let d = &self.deep_link;
        DeepLinkConfig {
            scene_param: d.scene_param.clone(),
            media_param: d.media_param.clone(),
            share_param: d.share_param.clone(),
            share_value: d.share_value.clone(),
        }
    }

    /// Build a [`KeyMap`] from this config.
    #[must_use]
    pub fn to_key_map(&self) -> KeyMap {
        KeyMap {
            vertical_arrows: self.keys.vertical_arrows,
            digit_shortcuts: self.keys.digit_shortcuts,
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Navigation behavior.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct NavigationPolicyConfig {
    /// Wrap (carousel) or clamp (story) at the ends.
    pub boundary: BoundaryPolicy,
    /// Commits arriving this soon after a move are dropped (ms).
    pub transition_ms: u64,
    /// Mode the engine starts in.
    pub initial_mode: Mode,
    /// Whether grid selection returns to cinematic.
    pub grid_select: GridSelectPolicy,
}

impl Default for NavigationPolicyConfig {
    fn default() -> Self {
        Self {
            boundary: BoundaryPolicy::Wrap,
            transition_ms: DEFAULT_TRANSITION_MS,
            initial_mode: Mode::Cinematic,
            grid_select: GridSelectPolicy::StayInGrid,
        }
    }
}

/// Gesture thresholds, flattened to primitives.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct GesturePolicyConfig {
    pub distance_threshold: f32,
    pub flick_enabled: bool,
    pub flick_min_velocity: f32,
    pub flick_min_distance: f32,
    pub wheel_threshold: f32,
    pub wheel_debounce_ms: u64,
    pub sample_timeout_ms: u64,
}

impl Default for GesturePolicyConfig {
    fn default() -> Self {
        let flick = FlickGate::default();
        Self {
            distance_threshold: DEFAULT_DISTANCE_THRESHOLD,
            flick_enabled: false,
            flick_min_velocity: flick.min_velocity,
            flick_min_distance: flick.min_distance,
            wheel_threshold: DEFAULT_WHEEL_THRESHOLD,
            wheel_debounce_ms: DEFAULT_WHEEL_DEBOUNCE_MS,
            sample_timeout_ms: DEFAULT_SAMPLE_TIMEOUT_MS,
        }
    }
}

/// Scroll-lock settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct ScrollLockPolicyConfig {
    pub enabled: bool,
    /// Intersection ratio at or above which the container is dominant.
    pub threshold: f32,
}

impl Default for ScrollLockPolicyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: DEFAULT_LOCK_THRESHOLD,
        }
    }
}

/// Autoplay settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct AutoplayPolicyConfig {
    pub interval_ms: u64,
    pub enabled_on_start: bool,
}

impl Default for AutoplayPolicyConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_AUTOPLAY_INTERVAL_MS,
            enabled_on_start: false,
        }
    }
}

/// URL parameter names.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct DeepLinkPolicyConfig {
    pub scene_param: String,
    pub media_param: String,
    pub share_param: String,
    pub share_value: String,
}

impl Default for DeepLinkPolicyConfig {
    fn default() -> Self {
        Self {
            scene_param: DEFAULT_SCENE_PARAM.into(),
            media_param: DEFAULT_MEDIA_PARAM.into(),
            share_param: DEFAULT_SHARE_PARAM.into(),
            share_value: DEFAULT_SHARE_VALUE.into(),
        }
    }
}

/// Keyboard surface.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct KeyPolicyConfig {
    pub vertical_arrows: bool,
    pub digit_shortcuts: bool,
}

impl Default for KeyPolicyConfig {
    fn default() -> Self {
        let keys = KeyMap::default();
        Self {
            vertical_arrows: keys.vertical_arrows,
            digit_shortcuts: keys.digit_shortcuts,
        }
    }
}
