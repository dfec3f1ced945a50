//! Property-based invariant tests for the gesture resolver.
//!
//! ## Invariants
//!
//! 1. Horizontal drags at or below the threshold never commit
//! 2. Drags beyond the threshold commit exactly once, in the drag direction,
//!    regardless of the number of intermediate moves
//! 3. Vertically dominant drags never commit
//! 4. The resolver is idle after every completed interaction

use proptest::prelude::*;
use showreel_core::event::{Event, PointerEvent, PointerEventKind};
use showreel_core::gesture::{Direction, GestureConfig, GestureResolver};
use web_time::{Duration, Instant};

fn run_drag(
    gr: &mut GestureResolver,
    t: Instant,
    start_x: f32,
    dx: f32,
    dy: f32,
    moves: &[f32],
) -> Vec<Direction> {
    let mut commits = Vec::new();
    let mut at = t;
    let mut record = |gr: &mut GestureResolver, event: Event, at: Instant| {
        if let Some(c) = gr.process(&event, at) {
            commits.push(c.direction);
        }
    };
    record(
        gr,
        Event::Pointer(PointerEvent::new(PointerEventKind::Down, start_x, 300.0)),
        at,
    );
    for fraction in moves {
        at += Duration::from_millis(10);
        record(
            gr,
            Event::Pointer(PointerEvent::new(
                PointerEventKind::Move,
                start_x + dx * fraction,
                300.0 + dy * fraction,
            )),
            at,
        );
    }
    at += Duration::from_millis(10);
    record(
        gr,
        Event::Pointer(PointerEvent::new(
            PointerEventKind::Up,
            start_x + dx,
            300.0 + dy,
        )),
        at,
    );
    commits
}

fn arb_moves() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(0.0f32..=1.0, 0..30)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn short_drags_never_commit(
        start_x in 100.0f32..1000.0,
        dx in -49.0f32..=49.0,
        moves in arb_moves(),
    ) {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let commits = run_drag(&mut gr, Instant::now(), start_x, dx, 0.0, &moves);
        prop_assert!(commits.is_empty());
        prop_assert!(!gr.is_tracking());
    }

    #[test]
    fn long_drags_commit_exactly_once(
        start_x in 100.0f32..1000.0,
        magnitude in 51.0f32..600.0,
        leftward in any::<bool>(),
        moves in arb_moves(),
    ) {
        let mut gr = GestureResolver::new(GestureConfig::default());
        let dx = if leftward { -magnitude } else { magnitude };
        let commits = run_drag(&mut gr, Instant::now(), start_x, dx, 0.0, &moves);
        let expected = if leftward { Direction::Advance } else { Direction::Retreat };
        prop_assert_eq!(commits, vec![expected]);
        prop_assert!(!gr.is_tracking());
    }

    #[test]
    fn vertical_drags_abstain(
        start_x in 100.0f32..1000.0,
        dx in -300.0f32..300.0,
        extra in 1.0f32..300.0,
        downward in any::<bool>(),
    ) {
        let mut gr = GestureResolver::new(GestureConfig::storytelling());
        let dy_mag = dx.abs() + extra;
        let dy = if downward { dy_mag } else { -dy_mag };
        let commits = run_drag(&mut gr, Instant::now(), start_x, dx, dy, &[0.5]);
        prop_assert!(commits.is_empty());
    }
}
