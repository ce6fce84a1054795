use glam::{Vec2, Vec4};
use ratatui::{
    backend::Backend,
    style::{Color, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Block, Borders,
    },
    Terminal,
};
use std::f32::consts::TAU;

use easel_render::{dash_segments, PathSegment, RenderError, RenderResult, SurfaceCommand};

// Segments used to approximate a partial arc.
const ARC_STEPS: usize = 16;

/// A recorded command reduced to what a character-cell canvas can draw, in
/// ratatui's bottom-up coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum TerminalShape {
    Line { from: Vec2, to: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Label { position: Vec2, text: String, color: Color },
}

pub struct TerminalPresenter<B: Backend> {
    pub terminal: Terminal<B>,
    marker: Marker,
    title: Option<String>,
}

impl<B: Backend> TerminalPresenter<B> {
    pub fn new(backend: B) -> RenderResult<Self> {
        let terminal = Terminal::new(backend)
            .map_err(|e| RenderError::RenderFailed(format!("Terminal initialization failed: {}", e)))?;
        Ok(Self {
            terminal,
            marker: Marker::Braille,
            title: Some("easel".to_string()),
        })
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    /// Draws one recorded frame, scaled so the whole `canvas_size` fits the terminal.
    pub fn present(&mut self, commands: &[SurfaceCommand], canvas_size: Vec2) -> RenderResult<()> {
        let shapes = flatten_commands(commands, canvas_size.y);
        let marker = self.marker;
        let title = self.title.clone();

        self.terminal
            .draw(|frame| {
                let mut canvas = Canvas::default()
                    .marker(marker)
                    .x_bounds([0.0, f64::from(canvas_size.x)])
                    .y_bounds([0.0, f64::from(canvas_size.y)])
                    .paint(|ctx| paint_shapes(ctx, &shapes));
                if let Some(title) = &title {
                    canvas = canvas.block(Block::default().borders(Borders::ALL).title(title.as_str()));
                }
                let area = frame.size();
                frame.render_widget(canvas, area);
            })
            .map_err(|e| RenderError::RenderFailed(e.to_string()))?;

        tracing::trace!("presented {} shapes", shapes.len());
        Ok(())
    }
}

fn paint_shapes(ctx: &mut ratatui::widgets::canvas::Context<'_>, shapes: &[TerminalShape]) {
    for shape in shapes {
        match shape {
            TerminalShape::Line { from, to, color } => ctx.draw(&CanvasLine {
                x1: f64::from(from.x),
                y1: f64::from(from.y),
                x2: f64::from(to.x),
                y2: f64::from(to.y),
                color: *color,
            }),
            TerminalShape::Circle { center, radius, color } => ctx.draw(&Circle {
                x: f64::from(center.x),
                y: f64::from(center.y),
                radius: f64::from(*radius),
                color: *color,
            }),
            TerminalShape::Label { .. } => {}
        }
    }
    // Labels go on a layer above the strokes.
    ctx.layer();
    for shape in shapes {
        if let TerminalShape::Label { position, text, color } = shape {
            ctx.print(
                f64::from(position.x),
                f64::from(position.y),
                Span::styled(text.clone(), Style::default().fg(*color)),
            );
        }
    }
}

/// Reduces recorded commands to terminal shapes, flipping y against `canvas_height`.
///
/// Strokes keep their dash pattern; fills are outlined; text is placed at the
/// top-left corner of its recorded bounds. Clears are dropped.
pub fn flatten_commands(commands: &[SurfaceCommand], canvas_height: f32) -> Vec<TerminalShape> {
    let flip = |p: Vec2| Vec2::new(p.x, canvas_height - p.y);
    let mut shapes = Vec::new();

    for command in commands {
        match command {
            SurfaceCommand::Clear { .. } => {}
            SurfaceCommand::FillPath { path, color } => {
                let color = vec4_to_ratatui_color(*color);
                push_path(&mut shapes, path, color, &[], 0.0, &flip);
            }
            SurfaceCommand::StrokePath {
                path,
                color,
                line_dash,
                line_dash_offset,
                ..
            } => {
                let color = vec4_to_ratatui_color(*color);
                push_path(&mut shapes, path, color, line_dash, *line_dash_offset, &flip);
            }
            SurfaceCommand::FillText { text, style, bounds, .. } => shapes.push(TerminalShape::Label {
                position: flip(bounds.origin()),
                text: text.clone(),
                color: vec4_to_ratatui_color(style.color),
            }),
        }
    }
    shapes
}

fn push_path(
    shapes: &mut Vec<TerminalShape>,
    path: &[PathSegment],
    color: Color,
    dash: &[f32],
    dash_offset: f32,
    flip: &dyn Fn(Vec2) -> Vec2,
) {
    let mut start: Option<Vec2> = None;
    let mut current: Option<Vec2> = None;
    // The dash pattern runs on across the segments of one path.
    let mut travelled = dash_offset;

    let line = |shapes: &mut Vec<TerminalShape>, from: Vec2, to: Vec2, travelled: &mut f32| {
        for (a, b) in dash_segments(from, to, dash, *travelled) {
            shapes.push(TerminalShape::Line {
                from: flip(a),
                to: flip(b),
                color,
            });
        }
        *travelled += from.distance(to);
    };

    for segment in path {
        match segment {
            PathSegment::MoveTo(p) => {
                start = Some(*p);
                current = Some(*p);
            }
            PathSegment::LineTo(p) => {
                match current {
                    Some(from) => line(shapes, from, *p, &mut travelled),
                    None => start = Some(*p),
                }
                current = Some(*p);
            }
            PathSegment::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => {
                let sweep = end_angle - start_angle;
                if sweep.abs() >= TAU - 1e-4 {
                    shapes.push(TerminalShape::Circle {
                        center: flip(*center),
                        radius: *radius,
                        color,
                    });
                    continue;
                }
                let point = |t: f32| *center + Vec2::new(t.cos(), t.sin()) * *radius;
                let mut previous = point(*start_angle);
                if let Some(from) = current {
                    line(shapes, from, previous, &mut travelled);
                }
                start.get_or_insert(previous);
                for step in 1..=ARC_STEPS {
                    let next = point(start_angle + sweep * step as f32 / ARC_STEPS as f32);
                    line(shapes, previous, next, &mut travelled);
                    previous = next;
                }
                current = Some(previous);
            }
            PathSegment::Close => {
                if let (Some(from), Some(to)) = (current, start) {
                    if from != to {
                        line(shapes, from, to, &mut travelled);
                    }
                }
                current = start;
            }
        }
    }
}

fn vec4_to_ratatui_color(color: Vec4) -> Color {
    if color.w < 0.1 {
        return Color::Reset;
    }
    Color::Rgb((color.x * 255.0) as u8, (color.y * 255.0) as u8, (color.z * 255.0) as u8)
}
