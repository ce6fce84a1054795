// crates/easel-render/src/recording.rs
use easel_core::{color, FontDescriptor, Rectangle, Size, TextAlign, TextBaseline, TextStyle};
use easel_layout::text_box_at;
use glam::{Vec2, Vec4};
use std::fmt::{self, Write as _};
use tracing::trace;

use crate::{DrawingSurface, TextMetricsProbe};

/// Canvas drawing state, as pushed and popped by `save`/`restore`.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub fill_style: Vec4,
    pub stroke_style: Vec4,
    pub line_width: f32,
    pub line_dash: Vec<f32>,
    pub line_dash_offset: f32,
    pub font: FontDescriptor,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
}

impl Default for DrawState {
    // Canvas 2D context defaults.
    fn default() -> Self {
        Self {
            fill_style: color::BLACK,
            stroke_style: color::BLACK,
            line_width: 1.0,
            line_dash: Vec::new(),
            line_dash_offset: 0.0,
            font: FontDescriptor::default(),
            text_align: TextAlign::Start,
            text_baseline: TextBaseline::Alphabetic,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    Arc {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
    Close,
}

/// A draw call resolved against the drawing state that was current when it was issued.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    Clear {
        origin: Vec2,
        size: Vec2,
    },
    FillPath {
        path: Vec<PathSegment>,
        color: Vec4,
    },
    StrokePath {
        path: Vec<PathSegment>,
        color: Vec4,
        line_width: f32,
        line_dash: Vec<f32>,
        line_dash_offset: f32,
    },
    FillText {
        text: String,
        origin: Vec2,
        style: TextStyle,
        bounds: Rectangle,
    },
}

/// Estimated glyph advances, as a fraction of the font pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphAdvances {
    pub narrow: f32,
    pub regular: f32,
    pub wide: f32,
}

impl Default for GlyphAdvances {
    fn default() -> Self {
        Self {
            narrow: 0.3,
            regular: 0.6,
            wide: 0.9,
        }
    }
}

impl GlyphAdvances {
    fn advance(&self, ch: char) -> f32 {
        match ch {
            ' ' | 'i' | 'l' | 'j' | 'I' | '!' | '|' | '.' | ',' | ':' | ';' | '\'' => self.narrow,
            'W' | 'M' | 'w' | 'm' => self.wide,
            _ => self.regular,
        }
    }

    pub fn text_width(&self, text: &str, font: &FontDescriptor) -> f32 {
        text.chars().map(|ch| self.advance(ch)).sum::<f32>() * font.size_px()
    }
}

/// Software drawing surface that records resolved draw commands instead of
/// rasterizing them.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    ready: bool,
    state: DrawState,
    stack: Vec<DrawState>,
    path: Vec<PathSegment>,
    commands: Vec<SurfaceCommand>,
    glyphs: GlyphAdvances,
    probe: TextMetricsProbe,
    keep_history: bool,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            ready: true,
            state: DrawState::default(),
            stack: Vec::new(),
            path: Vec::new(),
            commands: Vec::new(),
            glyphs: GlyphAdvances::default(),
            probe: TextMetricsProbe::default(),
            keep_history: true,
        }
    }

    /// A surface with no rendering context: draws are dropped and
    /// `measure_text` returns `None`.
    pub fn uninitialized(width: f32, height: f32) -> Self {
        Self {
            ready: false,
            ..Self::new(width, height)
        }
    }

    pub fn with_glyph_advances(mut self, glyphs: GlyphAdvances) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Probe used to size recorded text bounds.
    pub fn with_probe(mut self, probe: TextMetricsProbe) -> Self {
        self.probe = probe;
        self
    }

    /// Drop earlier frames whenever the whole canvas is cleared.
    pub fn discarding_history(mut self) -> Self {
        self.keep_history = false;
        self
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    pub fn state_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Commands recorded since the most recent clear that covers the whole canvas.
    pub fn current_frame(&self) -> &[SurfaceCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|command| self.is_full_clear(command))
            .unwrap_or(0);
        &self.commands[start..]
    }

    /// Deterministic one-line-per-command text dump of the current frame.
    pub fn frame_dump(&self) -> String {
        let mut out = String::new();
        for command in self.current_frame() {
            // Writing into a String cannot fail.
            let _ = writeln!(out, "{}", command);
        }
        out
    }

    fn is_full_clear(&self, command: &SurfaceCommand) -> bool {
        matches!(command, SurfaceCommand::Clear { origin, size } if *origin == Vec2::ZERO && *size == self.size)
    }

    fn record(&mut self, command: SurfaceCommand) {
        if !self.keep_history && self.is_full_clear(&command) {
            self.commands.clear();
        }
        trace!("record {}", command);
        self.commands.push(command);
    }

    fn text_size(&self, text: &str) -> Size {
        let font = &self.state.font;
        let width = self.glyphs.text_width(text, font);
        let reference = self.glyphs.text_width(self.probe.reference_glyph(), font);
        self.probe.box_size(width, reference).unwrap_or(Size::ZERO)
    }
}

impl DrawingSurface for RecordingSurface {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        // A restore without a matching save is ignored, as on a canvas.
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if !self.ready {
            return;
        }
        self.record(SurfaceCommand::Clear {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        });
    }

    fn set_fill_style(&mut self, color: Vec4) {
        self.state.fill_style = color;
    }

    fn set_stroke_style(&mut self, color: Vec4) {
        self.state.stroke_style = color;
    }

    fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn set_line_dash(&mut self, segments: &[f32]) {
        if segments.iter().all(|s| s.is_finite() && *s >= 0.0) {
            self.state.line_dash = segments.to_vec();
        }
    }

    fn set_line_dash_offset(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.line_dash_offset = offset;
        }
    }

    fn set_font(&mut self, font: &FontDescriptor) {
        self.state.font = font.clone();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.push(PathSegment::MoveTo(Vec2::new(x, y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.push(PathSegment::LineTo(Vec2::new(x, y)));
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32) {
        self.path.push(PathSegment::Arc {
            center: Vec2::new(x, y),
            radius,
            start_angle,
            end_angle,
        });
    }

    fn close_path(&mut self) {
        self.path.push(PathSegment::Close);
    }

    fn fill(&mut self) {
        if !self.ready || self.path.is_empty() {
            return;
        }
        self.record(SurfaceCommand::FillPath {
            path: self.path.clone(),
            color: self.state.fill_style,
        });
    }

    fn stroke(&mut self) {
        if !self.ready || self.path.is_empty() {
            return;
        }
        self.record(SurfaceCommand::StrokePath {
            path: self.path.clone(),
            color: self.state.stroke_style,
            line_width: self.state.line_width,
            line_dash: self.state.line_dash.clone(),
            line_dash_offset: self.state.line_dash_offset,
        });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        if !self.ready {
            return;
        }
        let origin = Vec2::new(x, y);
        let bounds = text_box_at(
            origin,
            self.state.text_align,
            self.state.text_baseline,
            self.text_size(text),
            self.probe.vertical_scale(),
        );
        let style = TextStyle::new(self.state.font.clone())
            .with_color(self.state.fill_style)
            .with_align(self.state.text_align)
            .with_baseline(self.state.text_baseline);
        self.record(SurfaceCommand::FillText {
            text: text.to_string(),
            origin,
            style,
            bounds,
        });
    }

    fn measure_text(&self, text: &str) -> Option<f32> {
        self.ready.then(|| self.glyphs.text_width(text, &self.state.font))
    }
}

fn write_path(f: &mut fmt::Formatter<'_>, path: &[PathSegment]) -> fmt::Result {
    f.write_str("[")?;
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        match segment {
            PathSegment::MoveTo(p) => write!(f, "M({},{})", p.x, p.y)?,
            PathSegment::LineTo(p) => write!(f, "L({},{})", p.x, p.y)?,
            PathSegment::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            } => write!(f, "A({},{} r{} {}..{})", center.x, center.y, radius, start_angle, end_angle)?,
            PathSegment::Close => f.write_str("Z")?,
        }
    }
    f.write_str("]")
}

impl fmt::Display for SurfaceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceCommand::Clear { origin, size } => {
                write!(f, "clear {},{} {}x{}", origin.x, origin.y, size.x, size.y)
            }
            SurfaceCommand::FillPath { path, color: fill } => {
                f.write_str("fill ")?;
                write_path(f, path)?;
                write!(f, " {}", color::to_css(*fill))
            }
            SurfaceCommand::StrokePath {
                path,
                color: stroke,
                line_width,
                line_dash,
                line_dash_offset,
            } => {
                f.write_str("stroke ")?;
                write_path(f, path)?;
                write!(f, " {} width={}", color::to_css(*stroke), line_width)?;
                if !line_dash.is_empty() {
                    write!(f, " dash={:?}@{}", line_dash, line_dash_offset)?;
                }
                Ok(())
            }
            SurfaceCommand::FillText {
                text,
                origin,
                style,
                bounds,
            } => write!(
                f,
                "text {:?} at ({},{}) {}/{} {} {} bounds=({},{} {}x{})",
                text,
                origin.x,
                origin.y,
                style.align.as_str(),
                style.baseline.as_str(),
                style.font,
                color::to_css(style.color),
                bounds.x(),
                bounds.y(),
                bounds.width(),
                bounds.height()
            ),
        }
    }
}
