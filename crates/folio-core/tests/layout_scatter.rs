//! Integration tests: image-load join → stacked layout → scatter → drag z-order.

use folio_core::layout::{ImageOutcome, TileSet, Viewport};
use folio_core::{LayoutMode, Point, SiteConfig};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

const VIEWPORT: Viewport = Viewport {
    width: 1440.0,
    height: 900.0,
};

/// Ten tile elements (one hidden), every visible image resolved.
fn loaded_set() -> TileSet {
    let mut set = TileSet::new(&SiteConfig::default(), 10);
    let aspects = [1.5, 0.75, 1.0, 1.333, 2.0, 0.8, 1.2, 1.6, 0.9];
    for (index, aspect) in aspects.iter().enumerate() {
        let outcome = if index == 4 {
            ImageOutcome::Failed
        } else {
            ImageOutcome::Loaded {
                width: 1000.0 * aspect,
                height: 1000.0,
            }
        };
        set.resolve_image(index, outcome, VIEWPORT);
    }
    set
}

// ─── Load join ───────────────────────────────────────────────────────────

#[test]
fn join_fires_once_on_last_image() {
    let mut set = TileSet::new(&SiteConfig::default(), 10);
    let outcome = ImageOutcome::Loaded {
        width: 400.0,
        height: 300.0,
    };
    let fired: Vec<bool> = (0..9)
        .map(|i| set.resolve_image(i, outcome, VIEWPORT))
        .collect();
    assert_eq!(fired.iter().filter(|f| **f).count(), 1);
    assert!(fired[8]);
    assert!(!set.resolve_image(8, outcome, VIEWPORT));
    assert!(set.is_loaded());
}

#[test]
fn failed_image_gets_square_tile() {
    let set = loaded_set();
    let tile = set.tile(4).unwrap();
    assert_eq!(tile.aspect, Some(1.0));
    assert_eq!(tile.size.width, tile.size.height);
}

#[test]
fn hidden_tile_is_excluded() {
    let set = loaded_set();
    assert_eq!(set.visible_count(), 9);
    assert!(set.visible().all(|t| t.index != 9));
    assert_eq!(set.tile(9).unwrap().aspect, None);
}

// ─── Stacked ─────────────────────────────────────────────────────────────

#[test]
fn stacked_column_accumulates_tops() {
    let set = loaded_set();
    let width = set.target_width(VIEWPORT);
    assert_eq!(width, 450.0);

    let mut expected_top = 100.0;
    for tile in set.visible() {
        assert_eq!(tile.position.x, 1152.0);
        assert!((tile.position.y - expected_top).abs() < 1e-9);
        assert_eq!(tile.size.width, width);
        assert_eq!(tile.rotation_deg, 0.0);
        assert_eq!(tile.scale, 1.0);
        expected_top += tile.size.height + 12.0;
    }
}

#[test]
fn stacked_layout_is_deterministic() {
    let a = loaded_set();
    let b = loaded_set();
    let tops = |s: &TileSet| s.visible().map(|t| t.position.y).collect::<Vec<_>>();
    assert_eq!(tops(&a), tops(&b));
}

// ─── Scatter ─────────────────────────────────────────────────────────────

#[test]
fn scattered_tiles_stay_in_viewport() {
    for seed in 0..20 {
        let mut set = loaded_set();
        set.scatter(VIEWPORT, &mut StdRng::seed_from_u64(seed));
        for tile in set.visible() {
            let b = tile.bounds();
            assert!(
                b.x0 >= -1e-6 && b.y0 >= -1e-6,
                "seed {seed}: tile {} escapes top-left: {b:?}",
                tile.index
            );
            assert!(
                b.x1 <= VIEWPORT.width + 1e-6 && b.y1 <= VIEWPORT.height + 1e-6,
                "seed {seed}: tile {} escapes bottom-right: {b:?}",
                tile.index
            );
        }
    }
}

#[test]
fn scatter_sets_rotation_and_scale() {
    let mut set = loaded_set();
    set.scatter(VIEWPORT, &mut StdRng::seed_from_u64(7));
    assert_eq!(set.mode(), LayoutMode::Scattered);
    for tile in set.visible() {
        assert_eq!(tile.scale, 0.7);
        assert!(tile.rotation_deg.abs() <= 5.0);
        let tenths = tile.rotation_deg * 10.0;
        assert!((tenths - tenths.round()).abs() < 1e-9);
    }
}

#[test]
fn scatter_keeps_index_neighbors_apart() {
    let mut set = loaded_set();
    set.scatter(VIEWPORT, &mut StdRng::seed_from_u64(42));
    let centers: Vec<Point> = set.visible().map(|t| t.visual_center()).collect();
    for pair in centers.windows(2) {
        assert!(pair[0].distance(pair[1]) >= 80.0, "{pair:?}");
    }
}

#[test]
fn scatter_orders_lower_indices_on_top() {
    let mut set = loaded_set();
    set.scatter(VIEWPORT, &mut StdRng::seed_from_u64(1));
    let z: Vec<i32> = set.visible().map(|t| t.z_index).collect();
    assert_eq!(z[0], 1010);
    assert!(z.windows(2).all(|w| w[0] > w[1]));
}

#[test]
fn scatter_is_reproducible_with_same_seed() {
    let mut a = loaded_set();
    let mut b = loaded_set();
    a.scatter(VIEWPORT, &mut StdRng::seed_from_u64(9));
    b.scatter(VIEWPORT, &mut StdRng::seed_from_u64(9));
    assert_eq!(a.tiles(), b.tiles());
}

// ─── Drag z-order ────────────────────────────────────────────────────────

#[test]
fn dragged_tile_rises_above_all() {
    let mut set = loaded_set();
    let before: Vec<i32> = set.tiles().iter().map(|t| t.z_index).collect();
    let z = set.bring_to_front(5).unwrap();
    assert!(set.tiles().iter().filter(|t| t.index != 5).all(|t| t.z_index < z));
    // untouched tiles keep their values
    for (i, tile) in set.tiles().iter().enumerate() {
        if i != 5 {
            assert_eq!(tile.z_index, before[i]);
        }
    }
}

#[test]
fn drag_after_scatter_still_wins() {
    let mut set = loaded_set();
    set.bring_to_front(8);
    set.scatter(VIEWPORT, &mut StdRng::seed_from_u64(3));
    let z = set.bring_to_front(8).unwrap();
    assert!(set.tiles().iter().filter(|t| t.index != 8).all(|t| t.z_index < z));

    let z2 = set.bring_to_front(2).unwrap();
    assert!(z2 > z);
}

#[test]
fn move_keeps_transform() {
    let mut set = loaded_set();
    set.scatter(VIEWPORT, &mut StdRng::seed_from_u64(5));
    let rotation = set.tile(3).unwrap().rotation_deg;
    set.move_to(3, Point::new(10.0, 20.0));
    let tile = set.tile(3).unwrap();
    assert_eq!(tile.position, Point::new(10.0, 20.0));
    assert_eq!(tile.rotation_deg, rotation);
    assert_eq!(tile.scale, 0.7);
}

// ─── Toggle ──────────────────────────────────────────────────────────────

#[test]
fn toggle_label_tracks_cleanup_need() {
    let mut set = loaded_set();
    let mut rng = StdRng::seed_from_u64(11);
    assert_eq!(set.toggle_label(VIEWPORT), "Scatter");

    // dragged off the anchor by more than 5 % of the viewport width
    set.move_to(0, Point::new(1152.0 - 100.0, 100.0));
    assert!(set.needs_cleanup(VIEWPORT));
    assert_eq!(set.toggle_label(VIEWPORT), "Clean up");

    assert_eq!(set.toggle(VIEWPORT, &mut rng), LayoutMode::Stacked);
    assert_eq!(set.toggle_label(VIEWPORT), "Scatter");

    assert_eq!(set.toggle(VIEWPORT, &mut rng), LayoutMode::Scattered);
    assert_eq!(set.toggle_label(VIEWPORT), "Clean up");
}

#[test]
fn small_nudge_does_not_need_cleanup() {
    let mut set = loaded_set();
    set.move_to(0, Point::new(1152.0 + 30.0, 140.0));
    assert!(!set.needs_cleanup(VIEWPORT));
}
