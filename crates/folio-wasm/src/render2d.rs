//! Canvas2D drawing for the cursor overlay and the background.
//!
//! Stateless helpers: every function leaves the context's state as it
//! found it (`save` / `restore`).

use folio_core::layout::Viewport;
use folio_core::model::Color;
use folio_interact::Direction;
use kurbo::{BezPath, PathEl, Point};
use std::f64::consts::{FRAC_PI_2, TAU};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Glyph outline drawn under the black stroke so it reads on any backdrop.
const HALO: &str = "white";
const INK: &str = "black";

/// Size the backing store for `dpr` and scale the context so drawing uses
/// CSS pixels.
pub fn fit_canvas(
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    viewport: Viewport,
    dpr: f64,
) {
    canvas.set_width((viewport.width * dpr).round() as u32);
    canvas.set_height((viewport.height * dpr).round() as u32);
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{}px", viewport.width));
    let _ = style.set_property("height", &format!("{}px", viewport.height));
    let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
}

/// Replay a kurbo path onto the context as the current path.
pub fn trace_path(ctx: &CanvasRenderingContext2d, path: &BezPath) {
    ctx.begin_path();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
            PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
            PathEl::QuadTo(c, p) => ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
            PathEl::CurveTo(c1, c2, p) => ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            PathEl::ClosePath => ctx.close_path(),
        }
    }
}

// ─── Cursor ──────────────────────────────────────────────────────────────

pub fn draw_segment(ctx: &CanvasRenderingContext2d, from: Point, to: Point, color: Color) {
    ctx.save();
    ctx.set_line_width(1.0);
    ctx.set_line_cap("round");
    ctx.set_stroke_style_str(&color.to_css());
    ctx.begin_path();
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke();
    ctx.restore();
}

pub fn draw_dot(ctx: &CanvasRenderingContext2d, at: Point, radius: f64, color: Color) {
    ctx.save();
    ctx.set_fill_style_str(&color.to_css());
    ctx.begin_path();
    let _ = ctx.arc(at.x, at.y, radius, 0.0, TAU);
    ctx.fill();
    ctx.restore();
}

pub fn draw_ring(ctx: &CanvasRenderingContext2d, at: Point, radius: f64, color: Color) {
    ctx.save();
    ctx.set_line_width(1.0);
    ctx.set_stroke_style_str(&color.to_css());
    ctx.begin_path();
    let _ = ctx.arc(at.x, at.y, radius, 0.0, TAU);
    ctx.stroke();
    ctx.restore();
}

/// Stroke the current path twice: wide halo, then narrow ink.
fn stroke_outlined(ctx: &CanvasRenderingContext2d) {
    ctx.set_line_width(4.0);
    ctx.set_stroke_style_str(HALO);
    ctx.stroke();
    ctx.set_line_width(2.0);
    ctx.set_stroke_style_str(INK);
    ctx.stroke();
}

pub fn draw_chevron(ctx: &CanvasRenderingContext2d, at: Point, direction: Direction, size: f64) {
    let h = size * 0.6 / 2.0;
    // tip points the way the viewer will navigate
    let tip = match direction {
        Direction::Left => -h,
        Direction::Right => h,
    };
    ctx.save();
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.begin_path();
    ctx.move_to(at.x - tip, at.y - h);
    ctx.line_to(at.x + tip, at.y);
    ctx.line_to(at.x - tip, at.y + h);
    stroke_outlined(ctx);
    ctx.restore();
}

pub fn draw_close(ctx: &CanvasRenderingContext2d, at: Point, size: f64) {
    let h = size * 0.6 / 2.0;
    ctx.save();
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.begin_path();
    ctx.move_to(at.x - h, at.y - h);
    ctx.line_to(at.x + h, at.y + h);
    ctx.move_to(at.x + h, at.y - h);
    ctx.line_to(at.x - h, at.y + h);
    stroke_outlined(ctx);
    ctx.restore();
}

/// Horizontal double arrow with a hand mark: open when idle, filled while
/// grabbing.
pub fn draw_grab(
    ctx: &CanvasRenderingContext2d,
    at: Point,
    grabbing: bool,
    size: f64,
    color: Color,
) {
    let half = size / 2.0;
    let head = size * 0.15;
    let css = color.to_css();

    ctx.save();
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.set_line_width(1.5);
    ctx.set_stroke_style_str(&css);
    ctx.set_fill_style_str(&css);

    ctx.begin_path();
    ctx.move_to(at.x - half, at.y);
    ctx.line_to(at.x + half, at.y);
    for sign in [-1.0, 1.0] {
        let end = at.x + sign * half;
        ctx.move_to(end - sign * head, at.y - head);
        ctx.line_to(end, at.y);
        ctx.line_to(end - sign * head, at.y + head);
    }
    ctx.stroke();

    let palm = Point::new(at.x, at.y - size * 0.35);
    ctx.begin_path();
    let _ = ctx.arc(palm.x, palm.y, size * 0.15, 0.0, TAU);
    if grabbing {
        ctx.fill();
    } else {
        ctx.stroke();
    }
    ctx.restore();
}

/// Ring with a clockwise progress arc from twelve o'clock and an optional
/// text hint beneath.
pub fn draw_hold(
    ctx: &CanvasRenderingContext2d,
    at: Point,
    radius: f64,
    progress: Option<f64>,
    hint: Option<&str>,
    color: Color,
) {
    let css = color.to_css();
    ctx.save();
    ctx.set_stroke_style_str(&css);
    ctx.set_fill_style_str(&css);
    ctx.set_line_width(1.0);
    ctx.begin_path();
    let _ = ctx.arc(at.x, at.y, radius, 0.0, TAU);
    ctx.stroke();

    if let Some(p) = progress.filter(|p| *p > 0.0) {
        ctx.set_line_width(2.0);
        ctx.begin_path();
        let start = -FRAC_PI_2;
        let _ = ctx.arc(at.x, at.y, radius + 3.0, start, start + p.min(1.0) * TAU);
        ctx.stroke();
    }

    if let Some(text) = hint {
        ctx.set_font("11px Arial, sans-serif");
        ctx.set_text_align("center");
        ctx.set_text_baseline("top");
        let _ = ctx.fill_text(text, at.x, at.y + radius + 6.0);
    }
    ctx.restore();
}

// ─── Background ──────────────────────────────────────────────────────────

/// Fill a blob outline with a radial gradient, blended with `lighten`.
pub fn fill_blob(
    ctx: &CanvasRenderingContext2d,
    outline: &BezPath,
    center: Point,
    radius: f64,
    inner: Color,
    edge: Color,
    opacity: f64,
) {
    ctx.save();
    let _ = ctx.set_global_composite_operation("lighten");
    ctx.set_global_alpha(opacity);
    trace_path(ctx, outline);
    match ctx.create_radial_gradient(center.x, center.y, 0.0, center.x, center.y, radius) {
        Ok(gradient) => {
            let _ = gradient.add_color_stop(0.0, &inner.to_css());
            let _ = gradient.add_color_stop(1.0, &edge.to_css());
            ctx.set_fill_style_canvas_gradient(&gradient);
        }
        Err(_) => ctx.set_fill_style_str(&inner.to_css()),
    }
    ctx.fill();
    ctx.restore();
}

pub fn clear(ctx: &CanvasRenderingContext2d, viewport: Viewport) {
    ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);
}

pub fn fill_background(ctx: &CanvasRenderingContext2d, viewport: Viewport, color: Color) {
    ctx.save();
    ctx.set_fill_style_str(&color.to_css());
    ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);
    ctx.restore();
}
