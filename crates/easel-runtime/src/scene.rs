// crates/easel-runtime/src/scene.rs
use easel_core::{color, FontDescriptor, Rectangle, ShapeStyle, TextStyle, Vec4};
use easel_layout::{place_text, AnchorPosition, TextPlacement};
use easel_render::{
    draw_rect, fill_circle, fill_text, stroke_grid, stroke_rectangle, DrawingSurface, RenderResult,
};

use crate::{FrameContext, TimerTick};

/// A per-frame drawing routine, invoked by the host after it clears the surface.
pub trait Scene<S: DrawingSurface> {
    fn name(&self) -> &str {
        "scene"
    }

    fn draw(&mut self, frame: &mut FrameContext<S>) -> RenderResult<()>;
}

/// Adapts a closure into a [`Scene`].
pub struct FnScene<F> {
    name: String,
    draw: F,
}

pub fn scene_fn<S, F>(name: impl Into<String>, draw: F) -> FnScene<F>
where
    S: DrawingSurface,
    F: FnMut(&mut FrameContext<S>) -> RenderResult<()>,
{
    FnScene {
        name: name.into(),
        draw,
    }
}

impl<S, F> Scene<S> for FnScene<F>
where
    S: DrawingSurface,
    F: FnMut(&mut FrameContext<S>) -> RenderResult<()>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn draw(&mut self, frame: &mut FrameContext<S>) -> RenderResult<()> {
        (self.draw)(frame)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridOptions {
    pub color: Vec4,
    pub interval: f32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            color: color::GREY,
            interval: 10.0,
        }
    }
}

/// Draws every anchor's label inside the canvas (inset by a margin), each
/// with a marker dot on its anchor point.
#[derive(Debug, Clone)]
pub struct AnchorTextScene {
    pub margin: f32,
    pub font: FontDescriptor,
    pub text_color: Vec4,
    pub marker_color: Vec4,
    pub marker_radius: f32,
    pub grid: Option<GridOptions>,
    /// Outline color for the computed text rectangles; `None` hides them.
    pub bounds_color: Option<Vec4>,
    placements: Vec<TextPlacement>,
}

impl Default for AnchorTextScene {
    fn default() -> Self {
        Self {
            margin: 20.0,
            font: FontDescriptor::label(),
            text_color: color::WHITE,
            marker_color: color::BLACK,
            marker_radius: 3.0,
            grid: None,
            bounds_color: None,
            placements: Vec::new(),
        }
    }
}

impl AnchorTextScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font(mut self, font: FontDescriptor) -> Self {
        self.font = font;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_grid(mut self, grid: GridOptions) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn with_bounds(mut self, outline: Vec4) -> Self {
        self.bounds_color = Some(outline);
        self
    }

    /// Placements computed by the most recent draw, in anchor order.
    pub fn placements(&self) -> &[TextPlacement] {
        &self.placements
    }
}

impl<S: DrawingSurface> Scene<S> for AnchorTextScene {
    fn name(&self) -> &str {
        "anchor-text"
    }

    fn draw(&mut self, frame: &mut FrameContext<S>) -> RenderResult<()> {
        let size = frame.surface.size();
        if let Some(grid) = self.grid {
            stroke_grid(&mut frame.surface, grid.color, grid.interval)?;
        }

        let parent = Rectangle::new(0.0, 0.0, size.x, size.y)?.inset(self.margin);
        self.placements.clear();

        for anchor in AnchorPosition::ALL {
            let label = anchor.label();
            let metrics = frame.probe.measure(&mut frame.surface, label, &self.font)?;
            let placement = place_text(anchor, label, &parent, metrics)?;

            let style = TextStyle::new(self.font.clone())
                .with_color(self.text_color)
                .with_align(placement.align)
                .with_baseline(placement.baseline);
            fill_text(&mut frame.surface, label, placement.origin, &style)?;
            if let Some(outline) = self.bounds_color {
                stroke_rectangle(&mut frame.surface, &placement.bounds, outline, 1.0)?;
            }
            fill_circle(&mut frame.surface, placement.marker, self.marker_radius, self.marker_color)?;

            self.placements.push(placement);
        }
        Ok(())
    }
}

/// Timer callback that advances the frame's dash phase and draws a
/// marching-ants rectangle at `rect`.
pub fn dashed_rect_timer<S: DrawingSurface>(
    rect: Rectangle,
) -> impl FnMut(&TimerTick, &mut FrameContext<S>) -> RenderResult<()> {
    move |_tick: &TimerTick, frame: &mut FrameContext<S>| {
        let phase = frame.state.advance_dash_offset();
        let style = ShapeStyle::default()
            .with_fill(color::GREY)
            .with_stroke(color::BLUE)
            .with_line_width(2.0)
            .with_dash(vec![10.0, 5.0], phase);
        draw_rect(&mut frame.surface, &rect, &style)
    }
}
