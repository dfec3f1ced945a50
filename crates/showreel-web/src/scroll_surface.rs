#![forbid(unsafe_code)]

//! Command-queue scroll surface.
//!
//! The engine cannot touch `document.documentElement.style` itself. Instead
//! [`HostScrollSurface`] mirrors the ambient state in memory and queues a
//! [`ScrollCommand`] for every write; the JS glue drains the queue after
//! each engine call and applies the styles.
//!
//! # Invariants
//!
//! - [`ScrollSurface::snapshot`] returns the last state the host reported
//!   or the engine applied, so a release restores what the page had.
//! - Writes identical to the mirrored state enqueue nothing.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use showreel_engine::{AmbientScroll, ScrollSurface};

/// A style write the host must apply to the scrolling root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollCommand {
    /// Set CSS `overflow` and `touch-action` to the given values.
    Apply(AmbientScroll),
}

#[derive(Debug, Default)]
struct Inner {
    current: AmbientScroll,
    queue: VecDeque<ScrollCommand>,
}

/// Shared, host-drained [`ScrollSurface`].
///
/// Clone it before handing it to a
/// [`ScrollLockArbiter`](showreel_engine::ScrollLockArbiter); the host keeps
/// the other clone to drain commands.
#[derive(Debug, Clone, Default)]
pub struct HostScrollSurface {
    inner: Rc<RefCell<Inner>>,
}

impl HostScrollSurface {
    /// Create a surface mirroring the page's current computed state.
    #[must_use]
    pub fn new(initial: AmbientScroll) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                current: initial,
                queue: VecDeque::new(),
            })),
        }
    }

    /// Record a change made outside the engine (e.g. a modal opened by
    /// other page code). Enqueues nothing.
    pub fn sync_from_host(&self, state: AmbientScroll) {
        self.inner.borrow_mut().current = state;
    }

    /// The mirrored state.
    #[must_use]
    pub fn current(&self) -> AmbientScroll {
        self.inner.borrow().current.clone()
    }

    /// Number of commands waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Drain all pending commands, oldest first.
    pub fn drain_commands(&self) -> Vec<ScrollCommand> {
        self.inner.borrow_mut().queue.drain(..).collect()
    }
}

impl ScrollSurface for HostScrollSurface {
    fn snapshot(&self) -> AmbientScroll {
        self.current()
    }

    fn apply(&mut self, state: &AmbientScroll) {
        let mut inner = self.inner.borrow_mut();
        if inner.current == *state {
            return;
        }
        inner.current = state.clone();
        inner.queue.push_back(ScrollCommand::Apply(state.clone()));
    }
}
