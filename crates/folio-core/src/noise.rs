//! Value noise and the animated background blobs.
//!
//! `value_noise` is a pure function of its coordinates: hashed lattice
//! values in [0, 1], quintic fade, trilinear interpolation over the eight
//! surrounding corners, lattice wrapped to 256 cells per axis.

use crate::config::{BackgroundConfig, BlobSpec};
use crate::layout::Viewport;
use crate::model::Color;
use kurbo::{BezPath, Point, Vec2};
use rand::Rng;
use smallvec::SmallVec;
use std::f64::consts::TAU;

/// Outline points of one blob for one frame.
pub type Outline = SmallVec<[Point; 16]>;

/// Quintic smoothstep `6t⁵ − 15t⁴ + 10t³`.
#[inline]
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Pseudo-random lattice value in [0, 1].
pub(crate) fn lattice(i: i32, j: i32, k: i32) -> f64 {
    let h = i.wrapping_mul(73_856_093) ^ j.wrapping_mul(19_349_663) ^ k.wrapping_mul(83_492_791);
    (h & 0xffff) as f64 / 0xffff as f64
}

/// 3-D value noise in [0, 1].
pub fn value_noise(x: f64, y: f64, z: f64) -> f64 {
    let (fx, fy, fz) = (x.floor(), y.floor(), z.floor());
    let (xi, yi, zi) = (fx as i32 & 255, fy as i32 & 255, fz as i32 & 255);
    let (u, v, w) = (fade(x - fx), fade(y - fy), fade(z - fz));

    let corner = |dx: i32, dy: i32, dz: i32| {
        lattice((xi + dx) & 255, (yi + dy) & 255, (zi + dz) & 255)
    };

    let near = lerp(
        lerp(corner(0, 0, 0), corner(1, 0, 0), u),
        lerp(corner(0, 1, 0), corner(1, 1, 0), u),
        v,
    );
    let far = lerp(
        lerp(corner(0, 0, 1), corner(1, 0, 1), u),
        lerp(corner(0, 1, 1), corner(1, 1, 1), u),
        v,
    );
    lerp(near, far, w)
}

// ─── Blobs ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    /// Anchor as viewport fractions.
    pub anchor: Vec2,
    pub radius: f64,
    pub color: Color,
    pub opacity: f64,
    /// Offset into the noise field, unique per blob.
    pub seed: f64,
    pub speed: f64,
    pub points: usize,
}

impl Blob {
    /// Instantiate a blob with a randomized seed, radius, and opacity.
    pub fn spawn<R: Rng + ?Sized>(spec: &BlobSpec, config: &BackgroundConfig, rng: &mut R) -> Self {
        let jitter = config.radius_jitter.abs();
        let radius_factor = if jitter > 0.0 {
            rng.gen_range(1.0 - jitter..=1.0 + jitter)
        } else {
            1.0
        };
        let opacity = if config.min_opacity < 1.0 {
            rng.gen_range(config.min_opacity.max(0.0)..=1.0)
        } else {
            1.0
        };
        Self {
            anchor: Vec2::new(spec.anchor[0], spec.anchor[1]),
            radius: spec.radius * radius_factor,
            color: spec.color,
            opacity,
            seed: rng.gen_range(0.0..config.seed_range.max(f64::EPSILON)),
            speed: spec.speed,
            points: spec.points.max(3),
        }
    }

    /// Center for this frame: the anchor plus a slow noise-driven drift.
    pub fn center(&self, viewport: Viewport, time: f64, config: &BackgroundConfig) -> Point {
        let t = time * self.speed;
        let dx = value_noise(self.seed, t, 0.0) * 2.0 - 1.0;
        let dy = value_noise(self.seed + 100.0, t, 0.0) * 2.0 - 1.0;
        Point::new(
            self.anchor.x * viewport.width + dx * config.drift,
            self.anchor.y * viewport.height + dy * config.drift,
        )
    }

    /// Outline points around `center`, perturbed by noise and warped
    /// toward `pointer` when it is close.
    pub fn outline(
        &self,
        center: Point,
        time: f64,
        pointer: Option<Point>,
        config: &BackgroundConfig,
    ) -> Outline {
        let warp = pointer.and_then(|p| {
            let to_pointer = p - center;
            let distance = to_pointer.hypot();
            (distance < config.pointer_radius).then(|| {
                let influence = config.pointer_influence * (1.0 - distance / config.pointer_radius);
                to_pointer.atan2() * influence
            })
        });

        (0..self.points)
            .map(|i| {
                let angle = i as f64 / self.points as f64 * TAU + warp.unwrap_or(0.0);
                let (sin, cos) = angle.sin_cos();
                let n = value_noise(
                    cos * config.lattice_scale + self.seed,
                    sin * config.lattice_scale + self.seed,
                    time * self.speed,
                );
                let r = self.radius + n * config.wobble;
                center + Vec2::new(cos * r, sin * r)
            })
            .collect()
    }

    /// Gradient edge color.
    pub fn edge_color(&self, config: &BackgroundConfig) -> Color {
        self.color.adjust(config.edge_shift)
    }
}

/// Closed smooth outline: quadratic curves through each point, joined at
/// the midpoints between neighbors.
pub fn outline_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some(&last) = points.last() else {
        return path;
    };
    path.move_to(last.midpoint(points[0]));
    for (i, &p) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        path.quad_to(p, p.midpoint(next));
    }
    path.close_path();
    path
}

/// The whole blob field and its frame clock.
#[derive(Debug, Clone)]
pub struct BlobField {
    pub blobs: Vec<Blob>,
    pub time: f64,
    config: BackgroundConfig,
}

impl BlobField {
    pub fn new<R: Rng + ?Sized>(config: BackgroundConfig, rng: &mut R) -> Self {
        let blobs = config
            .blobs
            .iter()
            .map(|spec| Blob::spawn(spec, &config, rng))
            .collect();
        Self {
            blobs,
            time: 0.0,
            config,
        }
    }

    pub fn config(&self) -> &BackgroundConfig {
        &self.config
    }

    /// Advance one frame.
    pub fn tick(&mut self) {
        self.time += 1.0;
    }

    /// Center and outline of every blob for the current frame.
    pub fn frame(&self, viewport: Viewport, pointer: Option<Point>) -> Vec<(Point, Outline)> {
        self.blobs
            .iter()
            .map(|blob| {
                let center = blob.center(viewport, self.time, &self.config);
                (center, blob.outline(center, self.time, pointer, &self.config))
            })
            .collect()
    }
}

/// Add film grain to RGBA pixel data in place. Each pixel gets one random
/// offset in `[-amplitude, amplitude]` applied to R, G, and B; alpha is
/// left alone.
pub fn apply_grain<R: Rng + ?Sized>(rgba: &mut [u8], amplitude: f64, rng: &mut R) {
    let amp = amplitude.abs().round() as i16;
    if amp == 0 {
        return;
    }
    for px in rgba.chunks_exact_mut(4) {
        let offset = rng.gen_range(-amp..=amp);
        for c in &mut px[..3] {
            *c = (*c as i16 + offset).clamp(0, 255) as u8;
        }
    }
}
