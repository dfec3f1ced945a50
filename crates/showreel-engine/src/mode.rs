#![forbid(unsafe_code)]

//! Presentation modes and the read models they project from engine state.
//!
//! All three modes share one [`EngineState`]: switching modes never moves
//! the cursor or touches favorites. Each projection borrows from the scene
//! slice, so building one per frame does not clone content.
//!
//! - **Cinematic**: one slide in focus, full relative navigation.
//! - **Grid**: every slide of every scene flattened into one collection for
//!   browsing and bulk favoriting. Selecting an item jumps the cursor there.
//! - **Split**: the current scene's primary slide beside a list of all
//!   scenes. Navigation is scene-granular and always lands on media 0.

use std::fmt;
use std::str::FromStr;

use crate::cursor::{self, NavigationCursor};
use crate::engine::EngineState;
use crate::scene::{self, MediaAsset, Scene};

/// Presentation contract currently bound to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "config-file",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Mode {
    #[default]
    Cinematic,
    Grid,
    Split,
}

impl Mode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cinematic => "cinematic",
            Self::Grid => "grid",
            Self::Split => "split",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cinematic" => Ok(Self::Cinematic),
            "grid" => Ok(Self::Grid),
            "split" => Ok(Self::Split),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// What selecting a grid item does to the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "config-file",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum GridSelectPolicy {
    /// Stay in grid mode; only the cursor moves.
    #[default]
    StayInGrid,
    /// Jump back to cinematic mode focused on the selection.
    ReturnToCinematic,
}

/// Focused slide in cinematic mode.
#[derive(Debug, Clone)]
pub struct CinematicView<'a> {
    pub cursor: NavigationCursor,
    pub scene: &'a Scene,
    /// `None` only for a scene with neither media nor primary image.
    pub asset: Option<&'a MediaAsset>,
    /// Zero-based position in the flattened sequence.
    pub position: usize,
    pub total: usize,
    pub is_favorite: bool,
}

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridItem<'a> {
    pub flat_index: usize,
    pub cursor: NavigationCursor,
    pub scene_id: &'a str,
    pub asset: Option<&'a MediaAsset>,
    pub is_favorite: bool,
    pub is_current: bool,
}

/// One row of the split-mode scene list.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitEntry<'a> {
    pub scene_index: usize,
    pub scene_id: &'a str,
    pub title: &'a str,
    pub thumbnail: Option<&'a str>,
    pub is_current: bool,
}

/// Split-mode read model.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitView<'a> {
    /// The current scene's primary slide (media 0).
    pub primary: Option<&'a MediaAsset>,
    pub entries: Vec<SplitEntry<'a>>,
}

fn is_fav(state: &EngineState, asset: Option<&MediaAsset>) -> bool {
    asset.is_some_and(|a| state.favorites.contains(&a.url))
}

/// Cinematic projection; `None` for an empty sequence.
#[must_use]
pub fn cinematic_view<'a>(scenes: &'a [Scene], state: &EngineState) -> Option<CinematicView<'a>> {
    let at = state.cursor?;
    let scene = scenes.get(at.scene_index)?;
    let counts = scene::position_counts(scenes);
    let asset = scene.slide(at.media_index);
    Some(CinematicView {
        cursor: at,
        scene,
        asset,
        position: cursor::flat_index(&counts, at),
        total: cursor::total_positions(&counts),
        is_favorite: is_fav(state, asset),
    })
}

/// Grid projection: every position, in navigation order.
#[must_use]
pub fn grid_items<'a>(scenes: &'a [Scene], state: &EngineState) -> Vec<GridItem<'a>> {
    let mut items = Vec::new();
    for (scene_index, scene) in scenes.iter().enumerate() {
        for media_index in 0..scene.position_count() {
            let at = NavigationCursor::new(scene_index, media_index);
            let asset = scene.slide(media_index);
            items.push(GridItem {
                flat_index: items.len(),
                cursor: at,
                scene_id: scene.id(),
                asset,
                is_favorite: is_fav(state, asset),
                is_current: state.cursor == Some(at),
            });
        }
    }
    items
}

/// Split projection; `None` for an empty sequence.
#[must_use]
pub fn split_view<'a>(scenes: &'a [Scene], state: &EngineState) -> Option<SplitView<'a>> {
    let at = state.cursor?;
    let current = scenes.get(at.scene_index)?;
    let entries = scenes
        .iter()
        .enumerate()
        .map(|(scene_index, s)| SplitEntry {
            scene_index,
            scene_id: s.id(),
            title: s.title(),
            thumbnail: s.slide(0).map(MediaAsset::thumbnail_or_url),
            is_current: scene_index == at.scene_index,
        })
        .collect();
    Some(SplitView {
        primary: current.slide(0),
        entries,
    })
}
