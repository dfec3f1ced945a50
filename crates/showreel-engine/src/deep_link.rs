#![forbid(unsafe_code)]

//! Two-way sync between the navigation cursor and the page URL.
//!
//! The cursor is serialized as query parameters (by default
//! `?media=<scene id>&img=<media index>`). Scenes are addressed by stable id
//! rather than index so links survive content reordering.
//!
//! # Lifecycle
//!
//! ```text
//! construct ──▶ hydrate (inbound, once) ──▶ publish (outbound, per change)
//! ```
//!
//! - **Inbound** runs once. It only adopts the URL payload when the engine
//!   was told the visitor arrived through a deep link ([`ArrivalIntent`]).
//!   Stale parameters from an unrelated visit are ignored.
//! - **Outbound** is disabled until hydration completes, uses replace
//!   semantics (never a new history entry), and skips writes that would not
//!   change the href.
//!
//! A share action ([`DeepLinkSynchronizer::share_href`]) adds a one-shot
//! marker parameter to the link. Hydration recognizes and strips it.

use tracing::{debug, info_span, warn};
use url::Url;

use crate::cursor::{self, NavigationCursor};
use crate::error::LocationError;
use crate::scene::{self, Scene};

/// Default query parameter carrying the scene id.
pub const DEFAULT_SCENE_PARAM: &str = "media";
/// Default query parameter carrying the media index.
pub const DEFAULT_MEDIA_PARAM: &str = "img";
/// Default share-marker parameter name.
pub const DEFAULT_SHARE_PARAM: &str = "via";
/// Default share-marker value.
pub const DEFAULT_SHARE_VALUE: &str = "share";

/// Externally visible form of a cursor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeepLinkPayload {
    pub scene_id: String,
    pub media_index: usize,
}

impl DeepLinkPayload {
    /// Serialize `at` against `scenes`. `None` if the cursor is out of range.
    #[must_use]
    pub fn from_cursor(scenes: &[Scene], at: NavigationCursor) -> Option<Self> {
        let scene = scenes.get(at.scene_index)?;
        Some(Self {
            scene_id: scene.id().to_string(),
            media_index: at.media_index,
        })
    }

    /// Resolve against `scenes`: linear id lookup, then clamp the media index.
    ///
    /// An unknown scene id resolves to `None` and the payload is ignored.
    #[must_use]
    pub fn resolve(&self, scenes: &[Scene]) -> Option<NavigationCursor> {
        let scene_index = scene::index_of(scenes, &self.scene_id)?;
        let counts = scene::position_counts(scenes);
        cursor::clamp(&counts, scene_index, self.media_index)
    }
}

/// Host seam for the page's addressable location.
pub trait AddressableLocation {
    /// Current absolute href.
    fn href(&self) -> String;
    /// Replace the current history entry's URL (no new entry).
    fn replace(&mut self, href: &str) -> Result<(), LocationError>;
}

/// How the visitor reached the page.
///
/// Passed explicitly at construction; never inferred from referrer or
/// history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrivalIntent {
    /// Ordinary navigation; URL payloads are stale and ignored.
    #[default]
    Direct,
    /// The visitor followed a shared link; adopt the URL payload.
    DeepLink,
}

impl ArrivalIntent {
    /// `DeepLink` iff `href` carries the share marker.
    #[must_use]
    pub fn from_href(href: &str, config: &DeepLinkConfig) -> Self {
        match Url::parse(href) {
            Ok(url) if has_marker(&url, config) => Self::DeepLink,
            _ => Self::Direct,
        }
    }
}

/// Parameter names used on the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLinkConfig {
    pub scene_param: String,
    pub media_param: String,
    pub share_param: String,
    pub share_value: String,
}

impl Default for DeepLinkConfig {
    fn default() -> Self {
        Self {
            scene_param: DEFAULT_SCENE_PARAM.to_string(),
            media_param: DEFAULT_MEDIA_PARAM.to_string(),
            share_param: DEFAULT_SHARE_PARAM.to_string(),
            share_value: DEFAULT_SHARE_VALUE.to_string(),
        }
    }
}

/// Mirrors the cursor into an [`AddressableLocation`].
pub struct DeepLinkSynchronizer {
    config: DeepLinkConfig,
    location: Option<Box<dyn AddressableLocation>>,
    intent: ArrivalIntent,
    hydrated: bool,
}

impl std::fmt::Debug for DeepLinkSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepLinkSynchronizer")
            .field("has_location", &self.location.is_some())
            .field("intent", &self.intent)
            .field("hydrated", &self.hydrated)
            .finish()
    }
}

impl DeepLinkSynchronizer {
    /// A synchronizer with no location: hydration finds nothing and publish
    /// is a no-op.
    #[must_use]
    pub fn detached(config: DeepLinkConfig) -> Self {
        Self {
            config,
            location: None,
            intent: ArrivalIntent::Direct,
            hydrated: false,
        }
    }

    /// A synchronizer bound to `location`.
    #[must_use]
    pub fn new(
        config: DeepLinkConfig,
        location: impl AddressableLocation + 'static,
        intent: ArrivalIntent,
    ) -> Self {
        Self::from_boxed(config, Box::new(location), intent)
    }

    #[must_use]
    pub fn from_boxed(
        config: DeepLinkConfig,
        location: Box<dyn AddressableLocation>,
        intent: ArrivalIntent,
    ) -> Self {
        Self {
            config,
            location: Some(location),
            intent,
            hydrated: false,
        }
    }

    #[must_use]
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    #[must_use]
    pub fn intent(&self) -> ArrivalIntent {
        self.intent
    }

    /// Read the payload currently on the location, if any.
    #[must_use]
    pub fn read_payload(&self) -> Option<DeepLinkPayload> {
        let url = self.current_url()?;
        payload_from_url(&url, &self.config)
    }

    /// Inbound sync. Runs at most once; later calls return `None`.
    ///
    /// Consumes the arrival intent and strips the share marker. A payload
    /// that is not adopted (direct arrival, unknown scene) is stripped in the
    /// same replace so the address bar never disagrees with the cursor.
    pub fn hydrate(&mut self, scenes: &[Scene]) -> Option<NavigationCursor> {
        if self.hydrated {
            return None;
        }
        let _span = info_span!("showreel.hydrate", intent = ?self.intent).entered();
        self.hydrated = true;
        let intent = std::mem::take(&mut self.intent);

        let mut url = self.current_url()?;
        let payload = payload_from_url(&url, &self.config);
        let resolved = match (&payload, intent) {
            (Some(p), ArrivalIntent::DeepLink) => {
                let resolved = p.resolve(scenes);
                match resolved {
                    Some(at) => debug!(
                        scene_id = %p.scene_id,
                        scene_index = at.scene_index,
                        media_index = at.media_index,
                        "deep link adopted"
                    ),
                    None => debug!(scene_id = %p.scene_id, "deep link scene unknown; ignored"),
                }
                resolved
            }
            _ => None,
        };

        let c = &self.config;
        let mut strip = vec![c.share_param.as_str()];
        if resolved.is_none() {
            strip.extend([c.scene_param.as_str(), c.media_param.as_str()]);
        }
        let before = url.as_str().to_string();
        rewrite_query(&mut url, &strip, &[]);
        if url.as_str() != before {
            debug!(href = %url, "stale deep-link parameters stripped");
            self.replace(url.as_str());
        }
        resolved
    }

    /// Outbound sync. Returns `true` if the location was rewritten.
    ///
    /// `None` clears the payload (empty sequence).
    pub fn publish(&mut self, scenes: &[Scene], at: Option<NavigationCursor>) -> bool {
        if !self.hydrated {
            return false;
        }
        let Some(mut url) = self.current_url() else {
            return false;
        };
        let before = url.as_str().to_string();
        let payload = at.and_then(|k| DeepLinkPayload::from_cursor(scenes, k));
        let keys = [
            self.config.scene_param.as_str(),
            self.config.media_param.as_str(),
        ];
        match &payload {
            Some(p) => {
                let index = p.media_index.to_string();
                rewrite_query(
                    &mut url,
                    &keys,
                    &[(keys[0], p.scene_id.as_str()), (keys[1], index.as_str())],
                );
            }
            None => rewrite_query(&mut url, &keys, &[]),
        }
        if url.as_str() == before {
            return false;
        }
        self.replace(url.as_str())
    }

    /// Build a shareable href for `at`: the payload plus the one-shot marker.
    #[must_use]
    pub fn share_href(&self, scenes: &[Scene], at: NavigationCursor) -> Option<String> {
        let mut url = self.current_url()?;
        let payload = DeepLinkPayload::from_cursor(scenes, at)?;
        let index = payload.media_index.to_string();
        let c = &self.config;
        rewrite_query(
            &mut url,
            &[
                c.scene_param.as_str(),
                c.media_param.as_str(),
                c.share_param.as_str(),
            ],
            &[
                (c.scene_param.as_str(), payload.scene_id.as_str()),
                (c.media_param.as_str(), index.as_str()),
                (c.share_param.as_str(), c.share_value.as_str()),
            ],
        );
        Some(url.into())
    }

    fn current_url(&self) -> Option<Url> {
        let href = self.location.as_ref()?.href();
        match Url::parse(&href) {
            Ok(url) => Some(url),
            Err(err) => {
                warn!(%href, %err, "location href unparsable; deep link disabled for this call");
                None
            }
        }
    }

    fn replace(&mut self, href: &str) -> bool {
        let Some(location) = self.location.as_mut() else {
            return false;
        };
        match location.replace(href) {
            Ok(()) => true,
            Err(err) => {
                warn!(%href, %err, "location replace failed");
                false
            }
        }
    }
}

fn has_marker(url: &Url, config: &DeepLinkConfig) -> bool {
    url.query_pairs()
        .any(|(k, v)| k == config.share_param.as_str() && v == config.share_value.as_str())
}

fn payload_from_url(url: &Url, config: &DeepLinkConfig) -> Option<DeepLinkPayload> {
    let mut scene_id = None;
    let mut media_index = 0;
    for (k, v) in url.query_pairs() {
        if k == config.scene_param.as_str() {
            scene_id = Some(v.into_owned());
        } else if k == config.media_param.as_str() {
            media_index = v.parse::<usize>().unwrap_or(0);
        }
    }
    let scene_id = scene_id.filter(|id| !id.is_empty())?;
    Some(DeepLinkPayload {
        scene_id,
        media_index,
    })
}

/// Drop every pair whose key is in `remove`, then append `add`, keeping the
/// order of unrelated parameters.
fn rewrite_query(url: &mut Url, remove: &[&str], add: &[(&str, &str)]) {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !remove.contains(&k.as_ref()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if kept.is_empty() && add.is_empty() {
        url.set_query(None);
        return;
    }
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .extend_pairs(add.iter().copied());
}
