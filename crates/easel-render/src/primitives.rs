// crates/easel-render/src/primitives.rs
use easel_core::{color, Rectangle, ShapeStyle, TextStyle};
use glam::{Vec2, Vec4};
use std::f32::consts::TAU;
use tracing::trace;

use crate::{DrawingSurface, DrawingSurfaceExt, RenderError, RenderResult};

fn ensure_ready<S: DrawingSurface + ?Sized>(surface: &S) -> RenderResult<()> {
    if surface.is_ready() {
        Ok(())
    } else {
        Err(RenderError::NoRenderingContext)
    }
}

/// Fills and/or strokes the outline of `rect`, depending on which colors `style` sets.
pub fn draw_rect<S: DrawingSurface + ?Sized>(surface: &mut S, rect: &Rectangle, style: &ShapeStyle) -> RenderResult<()> {
    ensure_ready(surface)?;
    trace!(?rect, "draw_rect");

    let mut scoped = surface.saved();
    if let Some(fill) = style.fill {
        scoped.set_fill_style(fill);
    }
    if let Some(stroke) = style.stroke {
        scoped.set_stroke_style(stroke);
    }
    scoped.set_line_width(style.line_width);
    scoped.set_line_dash(&style.line_dash);
    scoped.set_line_dash_offset(style.line_dash_offset);

    scoped.begin_path();
    scoped.move_to(rect.x(), rect.y());
    scoped.line_to(rect.right(), rect.y());
    scoped.line_to(rect.right(), rect.bottom());
    scoped.line_to(rect.x(), rect.bottom());
    scoped.close_path();

    if style.fill.is_some() {
        scoped.fill();
    }
    if style.stroke.is_some() {
        scoped.stroke();
    }
    Ok(())
}

/// Outline-only rectangle in a solid line.
pub fn stroke_rectangle<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    rect: &Rectangle,
    stroke: Vec4,
    line_width: f32,
) -> RenderResult<()> {
    let style = ShapeStyle::default().with_stroke(stroke).with_line_width(line_width);
    draw_rect(surface, rect, &style)
}

pub fn fill_circle<S: DrawingSurface + ?Sized>(surface: &mut S, center: Vec2, radius: f32, fill: Vec4) -> RenderResult<()> {
    ensure_ready(surface)?;
    if !radius.is_finite() || radius < 0.0 {
        return Err(RenderError::InvalidRadius(radius));
    }

    let mut scoped = surface.saved();
    scoped.set_fill_style(fill);
    scoped.begin_path();
    scoped.arc(center.x, center.y, radius, 0.0, TAU);
    scoped.fill();
    Ok(())
}

/// Strokes a single segment with whatever stroke style is current.
pub fn stroke_line<S: DrawingSurface + ?Sized>(surface: &mut S, from: Vec2, to: Vec2) -> RenderResult<()> {
    ensure_ready(surface)?;
    surface.begin_path();
    surface.move_to(from.x, from.y);
    surface.line_to(to.x, to.y);
    surface.stroke();
    Ok(())
}

/// Coordinate axes at `origin`: x in red, y in blue.
pub fn stroke_coord<S: DrawingSurface + ?Sized>(surface: &mut S, origin: Vec2, width: f32, height: f32) -> RenderResult<()> {
    ensure_ready(surface)?;

    let mut scoped = surface.saved();
    scoped.set_stroke_style(color::RED);
    stroke_line(&mut *scoped, origin, origin + Vec2::new(width, 0.0))?;
    scoped.set_stroke_style(color::BLUE);
    stroke_line(&mut *scoped, origin, origin + Vec2::new(0.0, height))
}

/// Background grid over the whole surface, followed by a green origin dot
/// and the global coordinate axes.
pub fn stroke_grid<S: DrawingSurface + ?Sized>(surface: &mut S, line_color: Vec4, interval: f32) -> RenderResult<()> {
    ensure_ready(surface)?;
    if !interval.is_finite() || interval <= 0.0 {
        return Err(RenderError::InvalidGridInterval(interval));
    }

    let size = surface.size();
    {
        let mut scoped = surface.saved();
        scoped.set_stroke_style(line_color);
        scoped.set_line_width(0.5);

        // Half-pixel offsets keep 0.5 px lines on pixel centers.
        let mut x = interval + 0.5;
        while x < size.x {
            stroke_line(&mut *scoped, Vec2::new(x, 0.0), Vec2::new(x, size.y))?;
            x += interval;
        }
        let mut y = interval + 0.5;
        while y < size.y {
            stroke_line(&mut *scoped, Vec2::new(0.0, y), Vec2::new(size.x, y))?;
            y += interval;
        }
    }

    fill_circle(surface, Vec2::ZERO, 5.0, color::GREEN)?;
    stroke_coord(surface, Vec2::ZERO, size.x, size.y)
}

pub fn fill_text<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    text: &str,
    position: Vec2,
    style: &TextStyle,
) -> RenderResult<()> {
    ensure_ready(surface)?;

    let mut scoped = surface.saved();
    scoped.set_text_align(style.align);
    scoped.set_text_baseline(style.baseline);
    scoped.set_font(&style.font);
    scoped.set_fill_style(style.color);
    scoped.fill_text(text, position.x, position.y);
    Ok(())
}
