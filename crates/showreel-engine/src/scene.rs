#![forbid(unsafe_code)]

//! Scene content model.
//!
//! Scenes are supplied by an external content source and never mutated by
//! the engine. A scene with no media still occupies one cursor position; its
//! slide is an implicit asset built from the scene's primary image.

use std::fmt;
use std::rc::Rc;

/// One image or video poster within a scene.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaAsset {
    /// Full-resolution URL. Also the key for favorites.
    pub url: String,
    /// Optional smaller rendition for grid and strip views.
    pub thumbnail_url: Option<String>,
    /// Alt text / caption.
    pub caption: String,
    /// Gated behind a premium tier.
    pub is_premium: bool,
}

impl MediaAsset {
    /// Create an asset with a caption and no thumbnail.
    #[must_use]
    pub fn new(url: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            thumbnail_url: None,
            caption: caption.into(),
            is_premium: false,
        }
    }

    /// Set the thumbnail URL.
    #[must_use]
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    /// Mark the asset as premium.
    #[must_use]
    pub fn premium(mut self) -> Self {
        self.is_premium = true;
        self
    }

    /// Thumbnail if present, else the full URL.
    #[must_use]
    pub fn thumbnail_or_url(&self) -> &str {
        self.thumbnail_url.as_deref().unwrap_or(&self.url)
    }
}

/// A headline figure shown with a scene (e.g. "0-100 km/h, 4.2, s").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub label: String,
    pub value: String,
    pub unit: Option<String>,
}

impl Stat {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            unit: None,
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// Opaque side-effecting action owned by the content source.
///
/// The engine never inspects these; it only invokes them when the host wires
/// an "activate CTA" gesture to the current scene.
#[derive(Clone)]
pub struct ActionRef(Rc<dyn Fn()>);

impl ActionRef {
    /// Wrap a callback.
    pub fn new(action: impl Fn() + 'static) -> Self {
        Self(Rc::new(action))
    }

    /// Invoke the action.
    pub fn invoke(&self) {
        (self.0)();
    }
}

impl fmt::Debug for ActionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRef").finish_non_exhaustive()
    }
}

/// Labelled call-to-action attached to a scene.
#[derive(Debug, Clone)]
pub struct CallToAction {
    pub label: String,
    pub action: ActionRef,
}

impl CallToAction {
    #[must_use]
    pub fn new(label: impl Into<String>, action: ActionRef) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// One narrative unit in a navigable sequence.
#[derive(Debug, Clone)]
pub struct Scene {
    id: String,
    title: String,
    subtitle: String,
    description: String,
    media: Vec<MediaAsset>,
    fallback: Option<MediaAsset>,
    call_to_action: Option<CallToAction>,
    stats: Vec<Stat>,
}

impl Scene {
    /// Create a scene with a stable id and a title.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: String::new(),
            description: String::new(),
            media: Vec::new(),
            fallback: None,
            call_to_action: None,
            stats: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append one media asset.
    #[must_use]
    pub fn with_media(mut self, asset: MediaAsset) -> Self {
        self.media.push(asset);
        self
    }

    /// Replace the media list.
    #[must_use]
    pub fn with_media_list(mut self, media: Vec<MediaAsset>) -> Self {
        self.media = media;
        self
    }

    /// Primary image used as the implicit slide when `media` is empty.
    #[must_use]
    pub fn with_primary_image(mut self, url: impl Into<String>) -> Self {
        let caption = self.title.clone();
        self.fallback = Some(MediaAsset::new(url, caption));
        self
    }

    #[must_use]
    pub fn with_call_to_action(mut self, cta: CallToAction) -> Self {
        self.call_to_action = Some(cta);
        self
    }

    #[must_use]
    pub fn with_stat(mut self, stat: Stat) -> Self {
        self.stats.push(stat);
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Explicit media, possibly empty.
    #[must_use]
    pub fn media(&self) -> &[MediaAsset] {
        &self.media
    }

    #[must_use]
    pub fn call_to_action(&self) -> Option<&CallToAction> {
        self.call_to_action.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> &[Stat] {
        &self.stats
    }

    /// What actually gets shown: the media list, or the implicit primary-image
    /// slide when the list is empty.
    #[must_use]
    pub fn slides(&self) -> &[MediaAsset] {
        if self.media.is_empty() {
            self.fallback.as_slice()
        } else {
            &self.media
        }
    }

    /// Number of cursor positions this scene occupies. Always at least one.
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.media.len().max(1)
    }

    /// Slide at `media_index`, if any.
    #[must_use]
    pub fn slide(&self, media_index: usize) -> Option<&MediaAsset> {
        self.slides().get(media_index)
    }
}

/// Per-scene position counts, the shape cursor arithmetic works on.
#[must_use]
pub fn position_counts(scenes: &[Scene]) -> Vec<usize> {
    scenes.iter().map(Scene::position_count).collect()
}

/// Linear lookup of a scene index by stable id.
#[must_use]
pub fn index_of(scenes: &[Scene], id: &str) -> Option<usize> {
    scenes.iter().position(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn empty_media_falls_back_to_primary_image() {
        let scene = Scene::new("hero", "Hero").with_primary_image("/img/hero.jpg");
        assert_eq!(scene.position_count(), 1);
        assert_eq!(scene.slides().len(), 1);
        assert_eq!(scene.slide(0).map(|a| a.url.as_str()), Some("/img/hero.jpg"));
        assert_eq!(scene.slide(0).map(|a| a.caption.as_str()), Some("Hero"));
    }

    #[test]
    fn empty_media_without_primary_still_one_position() {
        let scene = Scene::new("blank", "Blank");
        assert_eq!(scene.position_count(), 1);
        assert!(scene.slides().is_empty());
        assert!(scene.slide(0).is_none());
    }

    #[test]
    fn explicit_media_wins_over_primary() {
        let scene = Scene::new("int", "Interior")
            .with_primary_image("/img/primary.jpg")
            .with_media(MediaAsset::new("/img/a.jpg", "A"))
            .with_media(MediaAsset::new("/img/b.jpg", "B"));
        assert_eq!(scene.position_count(), 2);
        assert_eq!(scene.slide(1).map(|a| a.url.as_str()), Some("/img/b.jpg"));
    }

    #[test]
    fn thumbnail_fallback() {
        let plain = MediaAsset::new("/full.jpg", "x");
        assert_eq!(plain.thumbnail_or_url(), "/full.jpg");
        let thumb = plain.clone().with_thumbnail("/thumb.jpg").premium();
        assert_eq!(thumb.thumbnail_or_url(), "/thumb.jpg");
        assert!(thumb.is_premium);
    }

    #[test]
    fn action_ref_invokes() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let cta = CallToAction::new("Book a test drive", ActionRef::new(move || {
            counter.set(counter.get() + 1);
        }));
        cta.action.invoke();
        cta.action.invoke();
        assert_eq!(hits.get(), 2);
        assert!(format!("{:?}", cta.action).contains("ActionRef"));
    }

    #[test]
    fn lookup_helpers() {
        let scenes = vec![
            Scene::new("a", "A"),
            Scene::new("b", "B").with_media_list(vec![
                MediaAsset::new("/1", ""),
                MediaAsset::new("/2", ""),
                MediaAsset::new("/3", ""),
            ]),
        ];
        assert_eq!(position_counts(&scenes), vec![1, 3]);
        assert_eq!(index_of(&scenes, "b"), Some(1));
        assert_eq!(index_of(&scenes, "zzz"), None);
    }

    #[test]
    fn stats_and_text() {
        let scene = Scene::new("perf", "Performance")
            .with_subtitle("Twin-turbo V6")
            .with_description("Launch control included.")
            .with_stat(Stat::new("Power", "415").with_unit("hp"));
        assert_eq!(scene.subtitle(), "Twin-turbo V6");
        assert_eq!(scene.description(), "Launch control included.");
        assert_eq!(scene.stats()[0].unit.as_deref(), Some("hp"));
    }
}
