#![forbid(unsafe_code)]

//! In-memory addressable location.
//!
//! [`MemoryLocation`] stands in for `window.location` + `history` when the
//! engine runs without direct DOM access. The JS glue mirrors
//! [`MemoryLocation::href`] into `history.replaceState` after each engine
//! step, and calls [`MemoryLocation::push`] when the visitor navigates by
//! other means (back/forward, in-page links).
//!
//! # Invariants
//!
//! - The engine only ever replaces; [`MemoryLocation::push_count`] counts
//!   host navigation so tests can assert the engine never added history
//!   entries.
//! - Clones share one location.

use std::cell::RefCell;
use std::rc::Rc;

use showreel_engine::{AddressableLocation, LocationError};
use url::Url;

#[derive(Debug)]
struct Inner {
    url: Url,
    replaces: usize,
    pushes: usize,
    dirty: bool,
}

/// Shared, `url::Url`-backed [`AddressableLocation`].
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryLocation {
    /// Create a location at `href`.
    pub fn new(href: &str) -> Result<Self, LocationError> {
        let url = Url::parse(href)?;
        Ok(Self {
            inner: Rc::new(RefCell::new(Inner {
                url,
                replaces: 0,
                pushes: 0,
                dirty: false,
            })),
        })
    }

    /// Current URL.
    #[must_use]
    pub fn url(&self) -> Url {
        self.inner.borrow().url.clone()
    }

    /// Host navigation: adds a history entry.
    pub fn push(&self, href: &str) -> Result<(), LocationError> {
        let url = Url::parse(href)?;
        let mut inner = self.inner.borrow_mut();
        inner.url = url;
        inner.pushes += 1;
        Ok(())
    }

    /// Number of `replace` calls that changed the URL.
    #[must_use]
    pub fn replace_count(&self) -> usize {
        self.inner.borrow().replaces
    }

    /// Number of host pushes.
    #[must_use]
    pub fn push_count(&self) -> usize {
        self.inner.borrow().pushes
    }

    /// The replaced href the host has not mirrored yet, clearing the flag.
    pub fn take_pending_replace(&self) -> Option<String> {
        let mut inner = self.inner.borrow_mut();
        if !inner.dirty {
            return None;
        }
        inner.dirty = false;
        Some(inner.url.to_string())
    }
}

impl AddressableLocation for MemoryLocation {
    fn href(&self) -> String {
        self.inner.borrow().url.to_string()
    }

    fn replace(&mut self, href: &str) -> Result<(), LocationError> {
        let url = Url::parse(href)?;
        let mut inner = self.inner.borrow_mut();
        if inner.url.origin() != url.origin() {
            return Err(LocationError::Rejected(format!(
                "cross-origin replace to {}",
                url.origin().ascii_serialization()
            )));
        }
        if inner.url == url {
            return Ok(());
        }
        tracing::trace!(target: "showreel.web", %url, "location replaced");
        inner.url = url;
        inner.replaces += 1;
        inner.dirty = true;
        Ok(())
    }
}
