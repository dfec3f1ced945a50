#![forbid(unsafe_code)]

//! Two-level navigation cursor and its arithmetic.
//!
//! Everything here is pure: functions take the per-scene position counts
//! (see [`crate::scene::position_counts`]) and return new cursors. The
//! sequencer owns the only live cursor.
//!
//! # Invariants
//!
//! For counts `c` (each entry treated as at least 1) and cursor `k`:
//! - `k.scene_index < c.len()`
//! - `k.media_index < c[k.scene_index]`
//! - [`step_backward`] undoes [`step_forward`] whenever the forward step moved.

/// The `(scene, media)` position identifying what is shown now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct NavigationCursor {
    pub scene_index: usize,
    pub media_index: usize,
}

impl NavigationCursor {
    #[must_use]
    pub const fn new(scene_index: usize, media_index: usize) -> Self {
        Self {
            scene_index,
            media_index,
        }
    }
}

/// What happens when navigation runs past either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "config-file",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum BoundaryPolicy {
    /// Carousel-style: wrap around to the other end.
    #[default]
    Wrap,
    /// Story-style: stop at the ends; the final position is terminal and
    /// releases scroll-lock.
    Clamp,
}

impl std::str::FromStr for BoundaryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wrap" => Ok(Self::Wrap),
            "clamp" => Ok(Self::Clamp),
            other => Err(format!("unknown boundary policy: {other}")),
        }
    }
}

/// Result of a single relative step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The cursor moved to a new position.
    Moved(NavigationCursor),
    /// Clamp policy at an end: nothing to do.
    Boundary,
}

#[inline]
fn count_at(counts: &[usize], scene: usize) -> usize {
    counts.get(scene).copied().unwrap_or(1).max(1)
}

/// Total number of addressable positions.
#[must_use]
pub fn total_positions(counts: &[usize]) -> usize {
    counts.iter().map(|&c| c.max(1)).sum()
}

/// First position, or `None` for an empty sequence.
#[must_use]
pub fn first(counts: &[usize]) -> Option<NavigationCursor> {
    (!counts.is_empty()).then(NavigationCursor::default)
}

/// Last position (last media of the last scene).
#[must_use]
pub fn last(counts: &[usize]) -> Option<NavigationCursor> {
    let scene = counts.len().checked_sub(1)?;
    Some(NavigationCursor::new(scene, count_at(counts, scene) - 1))
}

/// Clamp an arbitrary `(scene, media)` pair into range.
#[must_use]
pub fn clamp(counts: &[usize], scene_index: usize, media_index: usize) -> Option<NavigationCursor> {
    let last_scene = counts.len().checked_sub(1)?;
    let scene = scene_index.min(last_scene);
    let media = media_index.min(count_at(counts, scene) - 1);
    Some(NavigationCursor::new(scene, media))
}

/// Whether `cursor` satisfies the cursor invariants for `counts`.
#[must_use]
pub fn is_valid(counts: &[usize], cursor: NavigationCursor) -> bool {
    cursor.scene_index < counts.len() && cursor.media_index < count_at(counts, cursor.scene_index)
}

/// Forward step: next media, else first media of next scene, else boundary.
#[must_use]
pub fn step_forward(counts: &[usize], cursor: NavigationCursor, policy: BoundaryPolicy) -> Step {
    if cursor.media_index + 1 < count_at(counts, cursor.scene_index) {
        return Step::Moved(NavigationCursor::new(
            cursor.scene_index,
            cursor.media_index + 1,
        ));
    }
    if cursor.scene_index + 1 < counts.len() {
        return Step::Moved(NavigationCursor::new(cursor.scene_index + 1, 0));
    }
    match policy {
        BoundaryPolicy::Wrap if !counts.is_empty() => Step::Moved(NavigationCursor::default()),
        _ => Step::Boundary,
    }
}

/// Backward step: the exact inverse of [`step_forward`].
#[must_use]
pub fn step_backward(counts: &[usize], cursor: NavigationCursor, policy: BoundaryPolicy) -> Step {
    if cursor.media_index > 0 {
        return Step::Moved(NavigationCursor::new(
            cursor.scene_index,
            cursor.media_index - 1,
        ));
    }
    if cursor.scene_index > 0 {
        let scene = cursor.scene_index - 1;
        return Step::Moved(NavigationCursor::new(scene, count_at(counts, scene) - 1));
    }
    match (policy, last(counts)) {
        (BoundaryPolicy::Wrap, Some(end)) => Step::Moved(end),
        _ => Step::Boundary,
    }
}

/// Scene-granular step used by split mode: always lands on media 0.
#[must_use]
pub fn step_scene(
    counts: &[usize],
    cursor: NavigationCursor,
    forward: bool,
    policy: BoundaryPolicy,
) -> Step {
    let n = counts.len();
    if n == 0 {
        return Step::Boundary;
    }
    let scene = cursor.scene_index.min(n - 1);
    let target = match (forward, policy) {
        (true, _) if scene + 1 < n => scene + 1,
        (true, BoundaryPolicy::Wrap) => 0,
        (false, _) if scene > 0 => scene - 1,
        (false, BoundaryPolicy::Wrap) => n - 1,
        _ => return Step::Boundary,
    };
    let next = NavigationCursor::new(target, 0);
    if next == cursor {
        Step::Boundary
    } else {
        Step::Moved(next)
    }
}

/// Under clamp policy the last position is terminal; wrap has none.
#[must_use]
pub fn is_terminal(counts: &[usize], cursor: NavigationCursor, policy: BoundaryPolicy) -> bool {
    policy == BoundaryPolicy::Clamp && last(counts) == Some(cursor)
}

/// Position of `cursor` in the flattened sequence.
#[must_use]
pub fn flat_index(counts: &[usize], cursor: NavigationCursor) -> usize {
    counts[..cursor.scene_index.min(counts.len())]
        .iter()
        .map(|&c| c.max(1))
        .sum::<usize>()
        + cursor.media_index
}

/// Inverse of [`flat_index`]; `None` when out of range.
#[must_use]
pub fn from_flat(counts: &[usize], mut index: usize) -> Option<NavigationCursor> {
    for (scene, &count) in counts.iter().enumerate() {
        let count = count.max(1);
        if index < count {
            return Some(NavigationCursor::new(scene, index));
        }
        index -= count;
    }
    None
}

/// The positions a `prev` and a `next` from `cursor` would land on.
///
/// Under wrap policy with a single position both are `None` (there is no
/// other position to warm).
#[must_use]
pub fn neighbors(
    counts: &[usize],
    cursor: NavigationCursor,
    policy: BoundaryPolicy,
) -> (Option<NavigationCursor>, Option<NavigationCursor>) {
    let target = |step: Step| match step {
        Step::Moved(k) if k != cursor => Some(k),
        _ => None,
    };
    (
        target(step_backward(counts, cursor, policy)),
        target(step_forward(counts, cursor, policy)),
    )
}
