#![forbid(unsafe_code)]

//! Error types for the engine's host-facing seams.
//!
//! Navigation itself never fails: out-of-range targets are clamped and
//! unresolvable deep links are ignored. The errors here come from the
//! collaborators a host plugs in (fetchers, locations) and from config
//! loading. The engine logs and swallows the first two kinds.

use std::fmt;

/// Failure reported by an [`AssetFetcher`](crate::preload::AssetFetcher).
///
/// Always swallowed by the preloader; preloading never affects navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreloadError {
    /// The transport refused or failed the request.
    Transport(String),
    /// The fetcher cannot handle this kind of asset (e.g. video posters).
    Unsupported(String),
}

impl fmt::Display for PreloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "preload transport error: {msg}"),
            Self::Unsupported(url) => write!(f, "preload unsupported for {url}"),
        }
    }
}

impl std::error::Error for PreloadError {}

/// Failure reported by an
/// [`AddressableLocation`](crate::deep_link::AddressableLocation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// The current href could not be parsed as an absolute URL.
    Malformed(String),
    /// The host refused the replace (e.g. cross-origin).
    Rejected(String),
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(href) => write!(f, "malformed location href: {href}"),
            Self::Rejected(msg) => write!(f, "location update rejected: {msg}"),
        }
    }
}

impl std::error::Error for LocationError {}

impl From<url::ParseError> for LocationError {
    fn from(err: url::ParseError) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Errors from loading an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// File read failure.
    Io(std::io::Error),
    /// TOML parse failure.
    #[cfg(feature = "config-file")]
    Toml(toml::de::Error),
    /// JSON parse failure.
    #[cfg(feature = "config-file")]
    Json(serde_json::Error),
    /// The config parsed but failed validation.
    Invalid(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config I/O error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => write!(f, "config TOML error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Json(e) => write!(f, "config JSON error: {e}"),
            Self::Invalid(errors) => write!(f, "invalid config: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Json(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
