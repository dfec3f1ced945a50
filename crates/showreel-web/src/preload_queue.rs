#![forbid(unsafe_code)]

//! Host-drained preload queue.
//!
//! [`PreloadQueue`] implements [`AssetFetcher`] by recording URLs; the JS
//! glue drains them and issues `new Image().src = url` (or
//! `<link rel=preload>`) itself. The queue never blocks and never fails
//! except for URL kinds the host has declared it will not warm.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use showreel_engine::{AssetFetcher, PreloadError};

/// Default cap on queued URLs; older entries are dropped first.
pub const DEFAULT_QUEUE_CAPACITY: usize = 32;

#[derive(Debug)]
struct Inner {
    queue: VecDeque<String>,
    seen: HashSet<String>,
    capacity: usize,
    skip_suffixes: Vec<String>,
}

/// Shared, host-drained [`AssetFetcher`].
#[derive(Debug, Clone)]
pub struct PreloadQueue {
    inner: Rc<RefCell<Inner>>,
}

impl Default for PreloadQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PreloadQueue {
    /// Create a queue with [`DEFAULT_QUEUE_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    /// Create a queue holding at most `capacity` URLs (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                queue: VecDeque::new(),
                seen: HashSet::new(),
                capacity: capacity.max(1),
                skip_suffixes: Vec::new(),
            })),
        }
    }

    /// Refuse URLs ending with `suffix` (case-insensitive), e.g. `".mp4"`.
    #[must_use]
    pub fn skipping(self, suffix: &str) -> Self {
        self.inner
            .borrow_mut()
            .skip_suffixes
            .push(suffix.to_ascii_lowercase());
        self
    }

    /// Number of URLs waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain queued URLs, oldest first.
    ///
    /// Drained URLs are remembered; the engine asking for them again later
    /// does not re-queue them.
    pub fn drain(&self) -> Vec<String> {
        self.inner.borrow_mut().queue.drain(..).collect()
    }

    /// Forget every URL seen so far (e.g. after the host evicts its cache).
    pub fn forget(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.queue.clear();
        inner.seen.clear();
    }
}

impl AssetFetcher for PreloadQueue {
    fn prefetch(&mut self, url: &str) -> Result<(), PreloadError> {
        let mut inner = self.inner.borrow_mut();
        let lower = url.to_ascii_lowercase();
        if inner.skip_suffixes.iter().any(|s| lower.ends_with(s.as_str())) {
            return Err(PreloadError::Unsupported(url.to_string()));
        }
        if !inner.seen.insert(url.to_string()) {
            return Ok(());
        }
        if inner.queue.len() == inner.capacity
            && let Some(evicted) = inner.queue.pop_front()
        {
            inner.seen.remove(&evicted);
        }
        inner.queue.push_back(url.to_string());
        Ok(())
    }
}
