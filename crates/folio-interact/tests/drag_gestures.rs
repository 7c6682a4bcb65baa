//! Integration tests: tile click-vs-drag, drag-scroll, and momentum.

use folio_core::config::{ScrollConfig, SiteConfig};
use folio_core::layout::{ImageOutcome, TileSet, Viewport};
use folio_core::Point;
use folio_interact::{DragOutcome, DragScroll, InputEvent, Momentum, ScrollAction, TileDrag};
use pretty_assertions::assert_eq;

const VIEWPORT: Viewport = Viewport {
    width: 1440.0,
    height: 900.0,
};

fn loaded_set() -> TileSet {
    let mut set = TileSet::new(&SiteConfig::default(), 10);
    for i in 0..9 {
        set.resolve_image(
            i,
            ImageOutcome::Loaded {
                width: 800.0,
                height: 600.0,
            },
            VIEWPORT,
        );
    }
    set
}

// ─── Tile drag ───────────────────────────────────────────────────────────

#[test]
fn small_motion_is_a_click() {
    let mut set = loaded_set();
    let mut drag = TileDrag::new(5.0);
    let before = set.tile(1).unwrap().position;

    drag.press(1, Point::new(1150.0, 500.0), before, 0.0);
    for (dx, dy) in [(2.0, 1.0), (4.0, -3.0), (5.0, 5.0)] {
        if let Some((index, pos)) = drag.drag(Point::new(1150.0 + dx, 500.0 + dy), 0.0) {
            set.move_to(index, pos);
        }
    }
    assert_eq!(drag.release(), Some(DragOutcome::Click { index: 1 }));
    assert_eq!(set.tile(1).unwrap().position, before);
}

#[test]
fn large_motion_moves_without_click() {
    let mut set = loaded_set();
    let mut drag = TileDrag::new(5.0);
    let before = set.tile(2).unwrap().position;
    let press = Point::new(before.x + 10.0, before.y + 40.0);

    drag.press(2, press, before, 0.0);
    let (index, pos) = drag.drag(Point::new(press.x - 6.0, press.y), 0.0).unwrap();
    set.move_to(index, pos);
    let (index, pos) = drag.drag(Point::new(press.x - 200.0, press.y + 50.0), 0.0).unwrap();
    set.move_to(index, pos);

    assert_eq!(drag.release(), Some(DragOutcome::Dropped { index: 2 }));
    // grab offset preserved
    assert_eq!(
        set.tile(2).unwrap().position,
        Point::new(before.x - 200.0, before.y + 50.0)
    );
}

#[test]
fn drag_compensates_container_scroll() {
    let mut drag = TileDrag::new(5.0);
    let tile = Point::new(600.0, 900.0);
    // container scrolled 300 px: tile top shows at 600 in the viewport
    drag.press(0, Point::new(610.0, 620.0), tile, 300.0);
    let (_, pos) = drag.drag(Point::new(610.0, 720.0), 300.0).unwrap();
    assert_eq!(pos, Point::new(600.0, 1000.0));
    // scrolled further while holding
    let (_, pos) = drag.drag(Point::new(610.0, 720.0), 400.0).unwrap();
    assert_eq!(pos, Point::new(600.0, 1100.0));
}

#[test]
fn drag_start_brings_tile_to_front() {
    let mut set = loaded_set();
    let mut drag = TileDrag::new(5.0);
    drag.press(6, Point::new(0.0, 0.0), set.tile(6).unwrap().position, 0.0);
    let z = set.bring_to_front(drag.active().unwrap()).unwrap();
    assert!(set.tiles().iter().filter(|t| t.index != 6).all(|t| t.z_index < z));
}

// ─── Drag scroll ─────────────────────────────────────────────────────────

#[test]
fn secondary_button_is_ignored() {
    let mut ds = DragScroll::new(ScrollConfig::default());
    let right = InputEvent::PointerDown {
        x: 10.0,
        y: 10.0,
        button: 2,
        timestamp: 0.0,
    };
    assert_eq!(ds.handle(&right, 0.0, 1000.0), ScrollAction::Ignored);
    assert!(!ds.is_dragging());
}

#[test]
fn scroll_waits_for_threshold_then_scales() {
    let mut ds = DragScroll::new(ScrollConfig::default());
    assert_eq!(
        ds.handle(&InputEvent::down(500.0, 50.0, 0.0), 200.0, 1000.0),
        ScrollAction::Grabbed
    );
    assert_eq!(
        ds.handle(&InputEvent::moved(497.0, 50.0, 10.0), 200.0, 1000.0),
        ScrollAction::Pending
    );
    // 20 px left → scroll right by 30
    assert_eq!(
        ds.handle(&InputEvent::moved(480.0, 50.0, 20.0), 200.0, 1000.0),
        ScrollAction::ScrollTo(230.0)
    );
}

#[test]
fn scroll_is_clamped() {
    let mut ds = DragScroll::new(ScrollConfig::default());
    ds.handle(&InputEvent::down(100.0, 0.0, 0.0), 10.0, 500.0);
    assert_eq!(
        ds.handle(&InputEvent::moved(400.0, 0.0, 16.0), 10.0, 500.0),
        ScrollAction::ScrollTo(0.0)
    );
    assert_eq!(
        ds.handle(&InputEvent::moved(-400.0, 0.0, 32.0), 10.0, 500.0),
        ScrollAction::ScrollTo(500.0)
    );
}

#[test]
fn fast_release_starts_momentum() {
    let mut ds = DragScroll::new(ScrollConfig::default());
    ds.handle(&InputEvent::down(500.0, 0.0, 0.0), 0.0, 1000.0);
    ds.handle(&InputEvent::moved(450.0, 0.0, 16.0), 0.0, 1000.0);
    ds.handle(&InputEvent::moved(420.0, 0.0, 26.0), 0.0, 1000.0);
    let ScrollAction::Released { momentum: Some(m) } =
        ds.handle(&InputEvent::up(420.0, 0.0, 30.0), 75.0, 1000.0)
    else {
        panic!("expected momentum");
    };
    // last move: -30 px over 10 ms
    assert!((m.velocity() + 3.0).abs() < 1e-9);
    assert!(!ds.is_dragging());
}

#[test]
fn slow_release_and_leave_end_gesture() {
    let mut ds = DragScroll::new(ScrollConfig::default());
    ds.handle(&InputEvent::down(500.0, 0.0, 0.0), 0.0, 1000.0);
    ds.handle(&InputEvent::moved(499.0, 0.0, 100.0), 0.0, 1000.0);
    assert_eq!(
        ds.handle(&InputEvent::PointerLeave { timestamp: 120.0 }, 0.0, 1000.0),
        ScrollAction::Released { momentum: None }
    );
    assert_eq!(
        ds.handle(&InputEvent::up(0.0, 0.0, 130.0), 0.0, 1000.0),
        ScrollAction::Ignored
    );
}

// ─── Momentum ────────────────────────────────────────────────────────────

fn run_momentum(v0: f64, start: f64, max: f64) -> (usize, f64) {
    let config = ScrollConfig::default();
    let Some(mut m) = Momentum::start(v0, &config) else {
        return (0, start);
    };
    let mut offset = start;
    let mut frames = 0;
    while let Some(next) = m.step(offset, max) {
        offset = next;
        frames += 1;
        assert!(frames < 10_000, "momentum never stopped");
    }
    (frames, offset)
}

#[test]
fn momentum_stops_within_frame_bound() {
    let config = ScrollConfig::default();
    for v0 in [0.15, 0.5, 1.0, -2.0, 4.5, -8.0] {
        let (frames, _) = run_momentum(v0, 50_000.0, 100_000.0);
        let bound = Momentum::frame_bound(v0, &config);
        assert!(frames <= bound, "v0 = {v0}: {frames} frames > bound {bound}");
        assert!(frames > 0);
    }
}

#[test]
fn momentum_moves_against_pointer_direction() {
    // pointer flicked left (negative velocity) → content scrolls right
    let (_, offset) = run_momentum(-1.0, 100.0, 100_000.0);
    assert!(offset > 100.0);
    let (_, offset) = run_momentum(1.0, 5_000.0, 100_000.0);
    assert!(offset < 5_000.0);
}

#[test]
fn momentum_never_leaves_bounds() {
    let (_, offset) = run_momentum(5.0, 30.0, 400.0);
    assert_eq!(offset, 0.0);
    let (_, offset) = run_momentum(-5.0, 380.0, 400.0);
    assert_eq!(offset, 400.0);
}
