//! Core data model for the portfolio decoration layer.
//!
//! Colors, project tiles, and the explicit layout mode of the tile set.
//! Geometry uses `kurbo` in CSS pixels; a tile's `position` is its
//! horizontal center and its top edge, which is how the page positions
//! tiles (`left` + `translateX(-50%)`).

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long = |i: usize| {
            let hi = hex_val(bytes[i])?;
            let lo = hex_val(bytes[i + 1])?;
            Some((hi << 4 | lo) as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Channels as 8-bit integers (r, g, b).
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// Emit as a CSS functional color, usable as a canvas fill/stroke style.
    pub fn to_css(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        if self.a >= 1.0 {
            format!("rgb({r}, {g}, {b})")
        } else {
            format!("rgba({r}, {g}, {b}, {})", self.a.max(0.0))
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// `true` when every RGB channel is strictly above `threshold` (0..=255).
    pub fn is_light(&self, threshold: u8) -> bool {
        let (r, g, b) = self.to_rgb8();
        r > threshold && g > threshold && b > threshold
    }

    /// Shift every channel by `factor` × 255, clamped. Negative darkens.
    pub fn adjust(&self, factor: f32) -> Self {
        let shift = |c: f32| (c + factor).clamp(0.0, 1.0);
        Self::rgba(shift(self.r), shift(self.g), shift(self.b), self.a)
    }
}

// ─── Projects & tiles ────────────────────────────────────────────────────

/// One entry of the static project list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub title: String,
    /// Cover image shown as the tile background.
    #[serde(default)]
    pub hero_image: Option<String>,
}

impl ProjectSpec {
    pub fn new(title: &str, hero_image: &str) -> Self {
        Self {
            title: title.to_string(),
            hero_image: Some(hero_image.to_string()),
        }
    }
}

/// Explicit presentation state of the tile set.
///
/// Written only by the stacked and scattered layout operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Stacked,
    Scattered,
}

impl LayoutMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stacked => "stacked",
            Self::Scattered => "scattered",
        }
    }
}

/// A draggable rectangle representing one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tile {
    pub index: usize,
    pub title: String,
    pub image: Option<String>,
    /// Horizontal center (x) and top edge (y), in CSS pixels.
    pub position: Point,
    pub rotation_deg: f64,
    pub scale: f64,
    pub z_index: i32,
    /// Laid-out size; zero until the image aspect is known.
    pub size: Size,
    /// Natural width / height of the cover image. `None` while loading.
    pub aspect: Option<f64>,
    /// Excluded from layout, scatter, and counts.
    pub hidden: bool,
}

impl Tile {
    pub fn new(index: usize, spec: Option<&ProjectSpec>, z_index: i32) -> Self {
        Self {
            index,
            title: spec
                .map(|s| s.title.clone())
                .unwrap_or_else(|| format!("Project {}", index + 1)),
            image: spec.and_then(|s| s.hero_image.clone()),
            position: Point::ZERO,
            rotation_deg: 0.0,
            scale: 1.0,
            z_index,
            size: Size::ZERO,
            aspect: None,
            hidden: false,
        }
    }

    /// Whether the tile has been sized and can take part in layout.
    pub fn is_ready(&self) -> bool {
        !self.hidden && self.aspect.is_some()
    }

    /// Visual center of the tile after its CSS transform.
    pub fn visual_center(&self) -> Point {
        Point::new(self.position.x, self.position.y + self.size.height / 2.0)
    }

    /// Axis-aligned box enclosing the rotated, scaled tile.
    pub fn bounds(&self) -> Rect {
        let extents = transformed_extents(self.size, self.rotation_deg, self.scale);
        Rect::from_center_size(self.visual_center(), extents)
    }

    /// Inline CSS transform, as applied to the tile element.
    pub fn css_transform(&self) -> String {
        if self.rotation_deg == 0.0 && self.scale == 1.0 {
            "translateX(-50%)".to_string()
        } else {
            format!(
                "translateX(-50%) rotate({}deg) scale({})",
                self.rotation_deg, self.scale
            )
        }
    }
}

/// Size of the axis-aligned box around a `size` rectangle rotated by
/// `rotation_deg` and scaled by `scale`.
pub fn transformed_extents(size: Size, rotation_deg: f64, scale: f64) -> Size {
    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    Size::new(
        scale * (size.width * cos + size.height * sin),
        scale * (size.width * sin + size.height * cos),
    )
}
