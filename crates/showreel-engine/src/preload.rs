#![forbid(unsafe_code)]

//! Best-effort warming of the assets adjacent to the cursor.
//!
//! After every cursor change the preloader asks its [`AssetFetcher`] to fetch
//! the slides a `prev` and a `next` would show. Requests are fire-and-forget:
//! failures are logged and dropped, and nothing is cached here. Caching is
//! whatever the host's transport already does.

use tracing::warn;

use crate::cursor::{self, BoundaryPolicy, NavigationCursor};
use crate::error::PreloadError;
use crate::scene::Scene;

/// Host seam that issues a non-blocking fetch for one URL.
pub trait AssetFetcher {
    /// Start fetching `url`. Must not block on completion.
    fn prefetch(&mut self, url: &str) -> Result<(), PreloadError>;
}

impl<F> AssetFetcher for F
where
    F: FnMut(&str) -> Result<(), PreloadError>,
{
    fn prefetch(&mut self, url: &str) -> Result<(), PreloadError> {
        self(url)
    }
}

/// Warms neighbor slides through an optional fetcher.
pub struct ResourcePreloader {
    fetcher: Option<Box<dyn AssetFetcher>>,
}

impl std::fmt::Debug for ResourcePreloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourcePreloader")
            .field("has_fetcher", &self.fetcher.is_some())
            .finish()
    }
}

impl ResourcePreloader {
    /// A preloader that never fetches.
    #[must_use]
    pub fn disabled() -> Self {
        Self { fetcher: None }
    }

    /// A preloader backed by `fetcher`.
    #[must_use]
    pub fn new(fetcher: impl AssetFetcher + 'static) -> Self {
        Self::from_boxed(Box::new(fetcher))
    }

    #[must_use]
    pub fn from_boxed(fetcher: Box<dyn AssetFetcher>) -> Self {
        Self {
            fetcher: Some(fetcher),
        }
    }

    /// URLs of the slides adjacent to `cursor`, previous first.
    ///
    /// Skips neighbors without a slide, neighbors showing the same URL as the
    /// current slide, and duplicates.
    #[must_use]
    pub fn neighbor_urls(
        scenes: &[Scene],
        at: NavigationCursor,
        policy: BoundaryPolicy,
    ) -> Vec<String> {
        let counts = crate::scene::position_counts(scenes);
        let current = slide_url(scenes, at);
        let (prev, next) = cursor::neighbors(&counts, at, policy);
        let mut urls: Vec<String> = Vec::with_capacity(2);
        for url in [prev, next]
            .into_iter()
            .flatten()
            .filter_map(|k| slide_url(scenes, k))
        {
            if Some(url) != current && !urls.iter().any(|u| u == url) {
                urls.push(url.to_string());
            }
        }
        urls
    }

    /// Issue prefetches for the neighbors of `at`. Returns the URLs requested.
    pub fn warm(
        &mut self,
        scenes: &[Scene],
        at: NavigationCursor,
        policy: BoundaryPolicy,
    ) -> Vec<String> {
        let Some(fetcher) = self.fetcher.as_mut() else {
            return Vec::new();
        };
        let urls = Self::neighbor_urls(scenes, at, policy);
        for url in &urls {
            if let Err(err) = fetcher.prefetch(url) {
                warn!(%url, %err, "preload failed; ignoring");
            }
        }
        urls
    }
}

fn slide_url(scenes: &[Scene], at: NavigationCursor) -> Option<&str> {
    scenes
        .get(at.scene_index)?
        .slide(at.media_index)
        .map(|a| a.url.as_str())
}
