//! Site configuration.
//!
//! `SiteConfig::default()` is the fixed design of the page: the project
//! list and every tuning constant the widgets use. A JSON document can
//! override any subset of fields (`#[serde(default)]` throughout).

use crate::css::parse_css_color;
use crate::error::InitError;
use crate::model::{Color, ProjectSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub projects: Vec<ProjectSpec>,
    /// Tile index excluded from layout, scatter, and counts.
    pub hidden_index: Option<usize>,
    pub cursor: CursorConfig,
    pub tiles: TileConfig,
    pub scroll: ScrollConfig,
    pub background: BackgroundConfig,
    pub retry: RetryConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            projects: vec![
                ProjectSpec::new("DX10", "projects/assets/project-0/gallery/dx10 cover.jpg"),
                ProjectSpec::new("Terb", "projects/assets/project-1/gallery/terb cover.gif"),
                ProjectSpec::new(
                    "National Media Office",
                    "projects/assets/project-2/gallery/nmo cover.jpg",
                ),
                ProjectSpec::new(
                    "The Founders Office",
                    "projects/assets/project-3/gallery/tfo cover.jpg",
                ),
                ProjectSpec::new(
                    "Sheikh Zayed",
                    "projects/assets/project-4/gallery/zayed cover.jpg",
                ),
                ProjectSpec::new("Kojinn", "projects/assets/project-5/gallery/kojinn cover.jpg"),
                ProjectSpec::new("Hotaling & Co.", "projects/assets/project-6/gallery/hc cover.gif"),
                ProjectSpec::new("Farm Sanctuary", "projects/assets/project-7/gallery/fs cover.jpg"),
                ProjectSpec::new(
                    "Relief International",
                    "projects/assets/project-8/gallery/ri-cover.jpg",
                ),
            ],
            hidden_index: Some(9),
            cursor: CursorConfig::default(),
            tiles: TileConfig::default(),
            scroll: ScrollConfig::default(),
            background: BackgroundConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Parse a JSON override on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, InitError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Reject values that would stall an animation loop or a layout.
    pub fn validate(self) -> Result<Self, InitError> {
        if !(0.0..1.0).contains(&self.scroll.friction) {
            return Err(InitError::Config(format!(
                "scroll.friction must be in [0, 1), got {}",
                self.scroll.friction
            )));
        }
        if !(self.scroll.stop_velocity > 0.0 && self.scroll.stop_velocity.is_finite()) {
            return Err(InitError::Config(format!(
                "scroll.stop_velocity must be positive, got {}",
                self.scroll.stop_velocity
            )));
        }
        if self.cursor.trail_capacity == 0 {
            return Err(InitError::Config("cursor.trail_capacity must be > 0".into()));
        }
        if let Some(blob) = self.background.blobs.iter().find(|b| b.points < 3) {
            return Err(InitError::Config(format!(
                "background blob needs at least 3 outline points, got {}",
                blob.points
            )));
        }
        Ok(self)
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.hidden_index == Some(index)
    }
}

// ─── Cursor ──────────────────────────────────────────────────────────────

/// The three cursor colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorPalette {
    /// Over photographic tiles and the two action controls.
    #[serde(with = "hex_color")]
    pub media: Color,
    /// Over light backgrounds.
    #[serde(with = "hex_color")]
    pub accent: Color,
    /// Everywhere else.
    #[serde(with = "hex_color")]
    pub fallback: Color,
}

impl Default for CursorPalette {
    fn default() -> Self {
        Self {
            media: Color::BLACK,
            accent: Color::rgba(0.0, 2.0 / 255.0, 170.0 / 255.0, 1.0),
            fallback: Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub palette: CursorPalette,
    pub trail_capacity: usize,
    pub dot_radius: f64,
    pub ring_radius: f64,
    /// Chevron / X / grab glyph box size.
    pub glyph_size: f64,
    /// A background is "light" when every channel is above this.
    pub light_threshold: u8,
    /// How far up the ancestor chain to look for a text color.
    pub ancestor_depth: usize,
    /// Delay before a gallery press starts filling the progress arc.
    pub hold_press_delay_ms: f64,
    /// Time for the progress arc to fill once started.
    pub hold_fill_ms: f64,
    /// Delay after hover start before the "hold" hint appears.
    pub hold_hint_delay_ms: f64,
    pub hold_hint_text: String,
    /// Period of the overlay self-check.
    pub watchdog_interval_ms: u32,
    /// Reinitializations allowed before the permanent fallback.
    pub reinit_attempts: u32,
    /// Delay before the native cursor is hidden.
    pub hide_native_delay_ms: u32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            palette: CursorPalette::default(),
            trail_capacity: 40,
            dot_radius: 3.0,
            ring_radius: 8.0,
            glyph_size: 24.0,
            light_threshold: 180,
            ancestor_depth: 5,
            hold_press_delay_ms: 200.0,
            hold_fill_ms: 800.0,
            hold_hint_delay_ms: 600.0,
            hold_hint_text: "hold".to_string(),
            watchdog_interval_ms: 2000,
            reinit_attempts: 1,
            hide_native_delay_ms: 100,
        }
    }
}

// ─── Tiles ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileConfig {
    /// Starting z-index of every tile; drag bumps go above it.
    pub base_z: i32,
    /// Reserved column width as a fraction of the viewport width.
    pub column_fraction: f64,
    /// Horizontal padding subtracted from the column width.
    pub column_padding: f64,
    pub max_width: f64,
    /// Stacked x-anchor as a fraction of the viewport width.
    pub anchor_fraction: f64,
    pub stack_top: f64,
    pub stack_gap: f64,
    pub scatter_scale: f64,
    pub max_rotation_deg: f64,
    /// Gap kept between a scattered tile and the viewport edge.
    pub scatter_margin: f64,
    pub min_neighbor_distance: f64,
    pub max_scatter_attempts: u32,
    /// Pointer travel (per axis) below which a press counts as a click.
    pub click_threshold: f64,
    pub navigate_delay_ms: u32,
    /// `{index}` is replaced with the tile index.
    pub destination_template: String,
    /// Off-anchor distance, as a fraction of viewport width, that makes a
    /// stacked set need cleanup.
    pub cleanup_tolerance: f64,
    /// Gap between the pointer and the tooltip.
    pub tooltip_offset: f64,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            base_z: 1000,
            column_fraction: 0.4,
            column_padding: 80.0,
            max_width: 450.0,
            anchor_fraction: 0.8,
            stack_top: 100.0,
            stack_gap: 12.0,
            scatter_scale: 0.7,
            max_rotation_deg: 5.0,
            scatter_margin: 20.0,
            min_neighbor_distance: 80.0,
            max_scatter_attempts: 100,
            click_threshold: 5.0,
            navigate_delay_ms: 50,
            destination_template: "projects/projects.html#project-{index}".to_string(),
            cleanup_tolerance: 0.05,
            tooltip_offset: 5.0,
        }
    }
}

impl TileConfig {
    pub fn destination(&self, index: usize) -> String {
        self.destination_template
            .replace("{index}", &index.to_string())
    }
}

// ─── Drag scroll ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Scroll pixels per pointer pixel.
    pub sensitivity: f64,
    /// Pointer travel before a press starts scrolling.
    pub drag_threshold: f64,
    /// Release velocity (px/ms) needed to start momentum.
    pub min_velocity: f64,
    /// Momentum stops below this velocity (px/ms).
    pub stop_velocity: f64,
    /// Velocity multiplier per frame.
    pub friction: f64,
    /// Nominal frame duration used to turn velocity into distance.
    pub frame_ms: f64,
    /// How long scrollbars stay visible after release.
    pub scrollbar_linger_ms: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            sensitivity: 1.5,
            drag_threshold: 5.0,
            min_velocity: 0.1,
            stop_velocity: 0.1,
            friction: 0.95,
            frame_ms: 16.0,
            scrollbar_linger_ms: 2000,
        }
    }
}

// ─── Background ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobSpec {
    /// Anchor as fractions of the viewport (x, y).
    pub anchor: [f64; 2],
    pub radius: f64,
    #[serde(with = "hex_color")]
    pub color: Color,
    /// Noise time advanced per frame.
    pub speed: f64,
    /// Outline sample count.
    pub points: usize,
}

impl BlobSpec {
    fn new(anchor: [f64; 2], radius: f64, color: Color, speed: f64, points: usize) -> Self {
        Self {
            anchor,
            radius,
            color,
            speed,
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub blobs: Vec<BlobSpec>,
    #[serde(with = "hex_color")]
    pub clear_color: Color,
    /// Relative radius randomization at spawn (0.1 = ±10 %).
    pub radius_jitter: f64,
    pub min_opacity: f64,
    /// Radius added at full noise.
    pub wobble: f64,
    /// Drift distance of a blob center around its anchor at full noise.
    pub drift: f64,
    /// Angular sample spread on the noise lattice.
    pub lattice_scale: f64,
    /// Upper bound of the random per-blob noise offset.
    pub seed_range: f64,
    pub pointer_radius: f64,
    pub pointer_influence: f64,
    /// Gradient edge color shift (negative darkens).
    pub edge_shift: f32,
    /// Maximum per-channel grain offset.
    pub grain_amplitude: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        let blue = Color::rgba(0.0, 2.0 / 255.0, 170.0 / 255.0, 1.0);
        Self {
            blobs: vec![
                BlobSpec::new([0.3, 0.4], 200.0, blue, 0.002, 12),
                BlobSpec::new([0.7, 0.6], 150.0, Color::BLACK, 0.003, 10),
                BlobSpec::new([0.5, 0.3], 180.0, blue, 0.0015, 14),
                BlobSpec::new([0.2, 0.7], 120.0, Color::BLACK, 0.0025, 8),
            ],
            clear_color: Color::BLACK,
            radius_jitter: 0.1,
            min_opacity: 0.8,
            wobble: 50.0,
            drift: 24.0,
            lattice_scale: 2.0,
            seed_range: 1000.0,
            pointer_radius: 300.0,
            pointer_influence: 0.3,
            edge_shift: -0.3,
            grain_amplitude: 20.0,
        }
    }
}

// ─── Retry ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub base_delay_ms: u32,
    pub factor: f64,
    pub max_delay_ms: u32,
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 100,
            factor: 2.0,
            max_delay_ms: 2000,
            max_attempts: 5,
        }
    }
}

/// Colors as CSS strings in JSON.
mod hex_color {
    use super::{Color, parse_css_color};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Color, D::Error> {
        let raw = String::deserialize(d)?;
        parse_css_color(&raw).ok_or_else(|| D::Error::custom(format!("invalid color `{raw}`")))
    }
}
