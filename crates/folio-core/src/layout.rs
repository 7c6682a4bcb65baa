//! Tile layout engine.
//!
//! Owns the project tiles and places them in one of two presentations:
//! a deterministic stacked column, or a randomized scatter that keeps
//! every tile inside the viewport and away from its index neighbors.
//! Tile sizes come from the cover images' natural aspect ratios, which
//! arrive asynchronously; a completion join triggers the first stacked
//! placement once every visible tile has resolved.

use crate::config::{SiteConfig, TileConfig};
use crate::model::*;
use kurbo::{Point, Size};
use rand::Rng;

/// The viewport dimensions, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 900.0,
        }
    }
}

/// Result of loading a tile's cover image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageOutcome {
    Loaded { width: f64, height: f64 },
    Failed,
    /// The project has no cover image.
    Missing,
}

impl ImageOutcome {
    /// Width / height. Failures and degenerate images fall back to square.
    pub fn aspect(self) -> f64 {
        match self {
            Self::Loaded { width, height } if width > 0.0 && height > 0.0 => width / height,
            _ => 1.0,
        }
    }
}

// ─── Completion join ─────────────────────────────────────────────────────

/// Counts image resolutions and fires exactly once when all have arrived.
#[derive(Debug, Clone)]
pub struct LoadJoin {
    pending: Vec<bool>,
    remaining: usize,
    fired: bool,
}

impl LoadJoin {
    /// `expected` lists the indices to wait for; `slots` bounds the index range.
    pub fn new(expected: impl IntoIterator<Item = usize>, slots: usize) -> Self {
        let mut pending = vec![false; slots];
        let mut remaining = 0;
        for index in expected {
            if index < slots && !pending[index] {
                pending[index] = true;
                remaining += 1;
            }
        }
        Self {
            pending,
            remaining,
            fired: false,
        }
    }

    /// Mark one index resolved. Returns `true` on the resolution that
    /// completes the join, and never again afterwards.
    pub fn resolve(&mut self, index: usize) -> bool {
        match self.pending.get_mut(index) {
            Some(slot) if *slot => {
                *slot = false;
                self.remaining -= 1;
            }
            _ => return false,
        }
        if self.remaining == 0 && !self.fired {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_complete(&self) -> bool {
        self.fired
    }
}

// ─── Tile set ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TileSet {
    tiles: Vec<Tile>,
    mode: LayoutMode,
    /// Highest z-index handed out so far.
    top_z: i32,
    join: LoadJoin,
    config: TileConfig,
}

impl TileSet {
    /// Create `count` tiles (one per tile element on the page).
    pub fn new(site: &SiteConfig, count: usize) -> Self {
        let config = site.tiles.clone();
        let tiles: Vec<Tile> = (0..count)
            .map(|index| {
                let mut tile = Tile::new(index, site.projects.get(index), config.base_z);
                tile.hidden = site.is_hidden(index);
                tile
            })
            .collect();
        let join = LoadJoin::new(tiles.iter().filter(|t| !t.hidden).map(|t| t.index), count);
        Self {
            tiles,
            mode: LayoutMode::Stacked,
            top_z: config.base_z,
            join,
            config,
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Non-hidden tiles, in index order.
    pub fn visible(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|t| !t.hidden)
    }

    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn config(&self) -> &TileConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.join.is_complete()
    }

    /// Uniform tile width derived from the reserved column.
    pub fn target_width(&self, viewport: Viewport) -> f64 {
        let column = viewport.width * self.config.column_fraction - self.config.column_padding;
        column.min(self.config.max_width).max(1.0)
    }

    /// x-coordinate of the stacked column's center line.
    pub fn anchor_x(&self, viewport: Viewport) -> f64 {
        viewport.width * self.config.anchor_fraction
    }

    /// Record a tile's image outcome. When this completes the load join the
    /// stacked layout is applied and `true` is returned (exactly once).
    pub fn resolve_image(
        &mut self,
        index: usize,
        outcome: ImageOutcome,
        viewport: Viewport,
    ) -> bool {
        let Some(tile) = self.tiles.get_mut(index) else {
            return false;
        };
        if tile.hidden {
            return false;
        }
        tile.aspect = Some(outcome.aspect());
        if !matches!(outcome, ImageOutcome::Loaded { .. }) {
            log::warn!("tile {index}: cover image unavailable, using square size");
        }
        if self.join.resolve(index) {
            log::debug!("all {} tile images resolved", self.visible_count());
            self.layout_stacked(viewport);
            return true;
        }
        false
    }

    /// Lay ready tiles out in one centered column, in index order.
    pub fn layout_stacked(&mut self, viewport: Viewport) {
        let width = self.target_width(viewport);
        let anchor = self.anchor_x(viewport);
        let mut top = self.config.stack_top;

        for tile in self.tiles.iter_mut().filter(|t| t.is_ready()) {
            let aspect = tile.aspect.unwrap_or(1.0);
            tile.size = Size::new(width, width / aspect);
            tile.position = Point::new(anchor, top);
            tile.rotation_deg = 0.0;
            tile.scale = 1.0;
            top += tile.size.height + self.config.stack_gap;
        }
        self.mode = LayoutMode::Stacked;
    }

    /// Scatter ready tiles at random inside the viewport.
    pub fn scatter<R: Rng + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) {
        let order: Vec<usize> = self
            .tiles
            .iter()
            .filter(|t| t.is_ready())
            .map(|t| t.index)
            .collect();
        let count = self.tiles.len() as i32;
        let margin = self.config.scatter_margin;
        let min_distance_sq = self.config.min_neighbor_distance.powi(2);

        for (slot, &index) in order.iter().enumerate() {
            let next = Some(slot + 1).filter(|&n| n < order.len());
            let neighbors: Vec<Point> = [slot.checked_sub(1), next]
                .into_iter()
                .flatten()
                .map(|n| self.tiles[order[n]].visual_center())
                .collect();

            let tile = &self.tiles[index];
            let rotation =
                (rng.gen_range(-self.config.max_rotation_deg..=self.config.max_rotation_deg) * 10.0)
                    .round()
                    / 10.0;
            let extents = transformed_extents(tile.size, rotation, self.config.scatter_scale);
            let (half_w, half_h) = (extents.width / 2.0, extents.height / 2.0);
            let x_range = (margin + half_w, viewport.width - margin - half_w);
            let y_range = (margin + half_h, viewport.height - margin - half_h);

            let mut center = Point::ZERO;
            for _ in 0..self.config.max_scatter_attempts.max(1) {
                center = Point::new(
                    sample(rng, x_range.0, x_range.1),
                    sample(rng, y_range.0, y_range.1),
                );
                let crowded = neighbors
                    .iter()
                    .any(|n| (*n - center).hypot2() < min_distance_sq);
                if !crowded {
                    break;
                }
            }

            let tile = &mut self.tiles[index];
            tile.rotation_deg = rotation;
            tile.scale = self.config.scatter_scale;
            tile.position = Point::new(center.x, center.y - tile.size.height / 2.0);
            tile.z_index = self.config.base_z + (count - index as i32);
            self.top_z = self.top_z.max(tile.z_index);
        }
        self.mode = LayoutMode::Scattered;
    }

    /// Whether the toggle should clean up rather than scatter.
    pub fn needs_cleanup(&self, viewport: Viewport) -> bool {
        if self.mode == LayoutMode::Scattered {
            return true;
        }
        let anchor = self.anchor_x(viewport);
        let tolerance = viewport.width * self.config.cleanup_tolerance;
        self.tiles
            .iter()
            .filter(|t| t.is_ready())
            .any(|t| (t.position.x - anchor).abs() > tolerance)
    }

    /// Switch presentation. Returns the new mode.
    pub fn toggle<R: Rng + ?Sized>(&mut self, viewport: Viewport, rng: &mut R) -> LayoutMode {
        if self.needs_cleanup(viewport) {
            self.layout_stacked(viewport);
        } else {
            self.scatter(viewport, rng);
        }
        self.mode
    }

    /// Label for the toggle control.
    pub fn toggle_label(&self, viewport: Viewport) -> &'static str {
        if self.needs_cleanup(viewport) {
            "Clean up"
        } else {
            "Scatter"
        }
    }

    /// Raise a tile above every other tile. Returns its new z-index.
    pub fn bring_to_front(&mut self, index: usize) -> Option<i32> {
        let highest = self.tiles.iter().map(|t| t.z_index).max()?;
        let tile = self.tiles.get_mut(index)?;
        self.top_z = self.top_z.max(highest) + 1;
        tile.z_index = self.top_z;
        Some(self.top_z)
    }

    /// Move a tile, keeping its rotation and scale.
    pub fn move_to(&mut self, index: usize, position: Point) {
        if let Some(tile) = self.tiles.get_mut(index) {
            tile.position = position;
        }
    }

    /// Re-apply the stacked layout after a viewport change.
    pub fn relayout(&mut self, viewport: Viewport) {
        if self.mode == LayoutMode::Stacked && self.join.is_complete() {
            self.layout_stacked(viewport);
        }
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        (lo + hi) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_ignores_unknown_and_repeated_indices() {
        let mut join = LoadJoin::new([0, 1], 3);
        assert!(!join.resolve(2));
        assert!(!join.resolve(0));
        assert!(!join.resolve(0));
        assert_eq!(join.remaining(), 1);
        assert!(join.resolve(1));
        assert!(!join.resolve(1));
        assert!(join.is_complete());
    }

    #[test]
    fn degenerate_images_are_square() {
        assert_eq!(ImageOutcome::Failed.aspect(), 1.0);
        assert_eq!(ImageOutcome::Missing.aspect(), 1.0);
        assert_eq!(
            ImageOutcome::Loaded {
                width: 0.0,
                height: 10.0
            }
            .aspect(),
            1.0
        );
        assert_eq!(
            ImageOutcome::Loaded {
                width: 400.0,
                height: 200.0
            }
            .aspect(),
            2.0
        );
    }

    #[test]
    fn target_width_respects_column_and_cap() {
        let set = TileSet::new(&SiteConfig::default(), 2);
        let narrow = Viewport {
            width: 1000.0,
            height: 800.0,
        };
        assert_eq!(set.target_width(narrow), 320.0);
        let wide = Viewport {
            width: 3000.0,
            height: 800.0,
        };
        assert_eq!(set.target_width(wide), 450.0);
    }

    #[test]
    fn hidden_tile_is_never_sized() {
        let mut set = TileSet::new(&SiteConfig::default(), 10);
        assert_eq!(set.visible_count(), 9);
        let vp = Viewport::default();
        assert!(!set.resolve_image(9, ImageOutcome::Failed, vp));
        assert_eq!(set.tile(9).unwrap().aspect, None);
    }
}
