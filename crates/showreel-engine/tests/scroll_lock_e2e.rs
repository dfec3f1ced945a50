#![forbid(unsafe_code)]

//! End-to-end scroll-lock behavior across engine instances sharing one page.
//!
//! Run:
//!   cargo test -p showreel-engine --test scroll_lock_e2e

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use showreel_core::event::{Event, WheelEvent};
use showreel_engine::{
    AmbientScroll, EngineConfig, ListenerSet, MediaAsset, NavOutcome, NavigationCursor, Scene,
    SceneEngine, ScrollLockArbiter, ScrollSurface,
};
use web_time::{Duration, Instant};

/// Page surface whose state the test can inspect.
#[derive(Clone)]
struct Page(Rc<RefCell<AmbientScroll>>);

impl Page {
    fn new() -> Self {
        Self(Rc::new(RefCell::new(AmbientScroll::new("auto", "pan-y"))))
    }
    fn state(&self) -> AmbientScroll {
        self.0.borrow().clone()
    }
}

impl ScrollSurface for Page {
    fn snapshot(&self) -> AmbientScroll {
        self.state()
    }
    fn apply(&mut self, state: &AmbientScroll) {
        *self.0.borrow_mut() = state.clone();
    }
}

/// Three scenes with media counts `[2, 1, 3]`.
fn story_scenes() -> Vec<Scene> {
    [2usize, 1, 3]
        .iter()
        .enumerate()
        .map(|(s, &n)| {
            (0..n).fold(Scene::new(format!("s{s}"), format!("Scene {s}")), |scene, m| {
                scene.with_media(MediaAsset::new(format!("/s{s}/{m}.jpg"), ""))
            })
        })
        .collect()
}

fn story_engine(arbiter: &ScrollLockArbiter) -> SceneEngine {
    let mut config = EngineConfig::story();
    config.navigation.transition_ms = 0;
    SceneEngine::builder(story_scenes())
        .with_config(config)
        .with_arbiter(arbiter.clone())
        .build()
}

fn original() -> AmbientScroll {
    AmbientScroll::new("auto", "pan-y")
}

#[test]
fn lock_requires_dominance_and_non_terminal_cursor() {
    let page = Page::new();
    let arbiter = ScrollLockArbiter::new(page.clone());
    let mut engine = story_engine(&arbiter);
    let t = Instant::now();

    assert!(!engine.set_intersection_ratio(0.49));
    assert_eq!(page.state(), original());

    assert!(engine.set_intersection_ratio(0.5));
    assert_eq!(page.state(), AmbientScroll::locked());
    assert!(engine.state().is_scroll_locked);

    // Reach the final position while still 80% visible.
    engine.set_intersection_ratio(0.8);
    engine.go_to(2, 2, t);
    assert!(!engine.state().is_scroll_locked);
    assert_eq!(page.state(), original());

    // Stepping back re-asserts.
    engine.prev(t + Duration::from_millis(1));
    assert!(engine.state().is_scroll_locked);
    assert_eq!(engine.cursor(), Some(NavigationCursor::new(2, 1)));
}

#[test]
fn next_at_clamp_end_leaves_page_scrollable() {
    let page = Page::new();
    let arbiter = ScrollLockArbiter::new(page.clone());
    let mut engine = story_engine(&arbiter);
    engine.set_intersection_ratio(1.0);
    let t = Instant::now();
    for _ in 0..5 {
        assert!(engine.next(t).moved());
    }
    assert_eq!(engine.next(t), NavOutcome::AtBoundary);
    assert!(!engine.state().is_scroll_locked);
    assert_eq!(page.state(), original());
}

#[test]
fn scrolling_up_from_the_first_scene_releases_the_page() {
    let page = Page::new();
    let arbiter = ScrollLockArbiter::new(page.clone());
    let mut engine = story_engine(&arbiter);
    engine.set_intersection_ratio(1.0);
    assert_eq!(page.state(), AmbientScroll::locked());

    let up = Event::Wheel(WheelEvent::vertical(-120.0));
    let t = Instant::now();
    assert_eq!(engine.handle_event(&up, t), NavOutcome::AtBoundary);
    assert!(!engine.state().is_scroll_locked);
    assert_eq!(page.state(), original());
    assert_eq!(engine.listeners(), ListenerSet::KEYBOARD | ListenerSet::POINTER);

    // Periodic ticks and unchanged ratios keep the page free.
    engine.tick(t + Duration::from_millis(500));
    engine.set_intersection_ratio(0.95);
    assert!(!arbiter.is_locked());

    // Scrolled out and back in: the lock returns.
    engine.set_intersection_ratio(0.3);
    assert!(engine.set_intersection_ratio(1.0));
    assert_eq!(page.state(), AmbientScroll::locked());

    // Yield again, then any real move re-asserts.
    assert_eq!(engine.prev(t + Duration::from_secs(1)), NavOutcome::AtBoundary);
    assert!(!engine.state().is_scroll_locked);
    assert!(engine.next(t + Duration::from_secs(2)).moved());
    assert!(engine.state().is_scroll_locked);
    assert_eq!(page.state(), AmbientScroll::locked());
}

#[test]
fn wrapping_sequences_never_lock_the_page() {
    let page = Page::new();
    let arbiter = ScrollLockArbiter::new(page.clone());
    let mut config = EngineConfig::carousel();
    config.scroll_lock.enabled = true;
    config.navigation.transition_ms = 0;
    let mut engine = SceneEngine::builder(story_scenes())
        .with_config(config)
        .with_arbiter(arbiter.clone())
        .build();

    assert!(!engine.set_intersection_ratio(1.0));
    let t = Instant::now();
    for i in 0..20 {
        engine.next(t + Duration::from_millis(500 * i));
    }
    assert!(!engine.state().is_scroll_locked);
    assert!(!arbiter.is_locked());
    assert_eq!(page.state(), original());
}

#[test]
fn leaving_viewport_restores_recorded_state() {
    let page = Page::new();
    let arbiter = ScrollLockArbiter::new(page.clone());
    let mut engine = story_engine(&arbiter);
    engine.set_intersection_ratio(0.9);
    assert_eq!(page.state(), AmbientScroll::locked());
    engine.set_intersection_ratio(0.1);
    assert_eq!(page.state(), original());
    // Repeated releases are harmless.
    engine.set_intersection_ratio(0.0);
    assert_eq!(page.state(), original());
}

#[test]
fn teardown_mid_lock_restores_page() {
    let page = Page::new();
    let arbiter = ScrollLockArbiter::new(page.clone());
    {
        let mut engine = story_engine(&arbiter);
        engine.set_intersection_ratio(1.0);
        assert!(arbiter.is_locked());
    }
    assert!(!arbiter.is_locked());
    assert_eq!(page.state(), original());
}

#[test]
fn second_engine_waits_for_the_first() {
    let page = Page::new();
    let arbiter = ScrollLockArbiter::new(page.clone());
    let mut first = story_engine(&arbiter);
    let mut second = story_engine(&arbiter);

    assert!(first.set_intersection_ratio(0.9));
    assert!(!second.set_intersection_ratio(0.9));
    assert!(!second.state().is_scroll_locked);

    first.set_intersection_ratio(0.0);
    assert!(!arbiter.is_locked());
    // The refused controller retries on its next reevaluation.
    second.tick(Instant::now());
    assert!(second.state().is_scroll_locked);

    drop(second);
    assert_eq!(page.state(), original());
}

#[test]
fn wheel_and_touch_listeners_follow_the_lock() {
    let page = Page::new();
    let arbiter = ScrollLockArbiter::new(page);
    let mut engine = story_engine(&arbiter);
    let t = Instant::now();

    assert_eq!(engine.listeners(), ListenerSet::KEYBOARD | ListenerSet::POINTER);
    let wheel = Event::Wheel(WheelEvent::vertical(80.0));
    assert_eq!(engine.handle_event(&wheel, t), NavOutcome::NoCommit);

    engine.set_intersection_ratio(1.0);
    assert!(engine.listeners().contains(ListenerSet::WHEEL | ListenerSet::TOUCH_INTERCEPT));
    assert!(engine.handle_event(&wheel, t).moved());
    // One physical scroll gesture: the debounce swallows the burst.
    assert!(!engine.handle_event(&wheel, t + Duration::from_millis(20)).moved());
    assert!(engine.handle_event(&wheel, t + Duration::from_millis(200)).moved());
    assert_eq!(engine.cursor(), Some(NavigationCursor::new(1, 0)));

    engine.unmount();
    assert_eq!(engine.listeners(), ListenerSet::empty());
    assert!(!arbiter.is_locked());
}
