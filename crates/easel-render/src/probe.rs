// crates/easel-render/src/probe.rs
use easel_core::{FontDescriptor, Size};
use tracing::debug;

use crate::{DrawingSurface, DrawingSurfaceExt, RenderError, RenderResult};

pub const DEFAULT_REFERENCE_GLYPH: &str = "W";
pub const DEFAULT_VERTICAL_SCALE: f32 = 0.5;

/// Estimates the box a line of text occupies.
///
/// Width is the surface's own measurement. Height is approximated from a wide
/// reference glyph: its advance stands in for the cap height, and
/// `vertical_scale` of that again is added for descenders.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMetricsProbe {
    reference_glyph: String,
    vertical_scale: f32,
}

impl Default for TextMetricsProbe {
    fn default() -> Self {
        Self {
            reference_glyph: DEFAULT_REFERENCE_GLYPH.to_string(),
            vertical_scale: DEFAULT_VERTICAL_SCALE,
        }
    }
}

impl TextMetricsProbe {
    pub fn new(reference_glyph: impl Into<String>, vertical_scale: f32) -> RenderResult<Self> {
        let reference_glyph = reference_glyph.into();
        if reference_glyph.is_empty() {
            return Err(RenderError::InvalidProbe("reference glyph is empty".to_string()));
        }
        if !vertical_scale.is_finite() || vertical_scale < 0.0 {
            return Err(RenderError::InvalidProbe(format!(
                "vertical scale must be a non-negative number, got {}",
                vertical_scale
            )));
        }
        Ok(Self {
            reference_glyph,
            vertical_scale,
        })
    }

    pub fn reference_glyph(&self) -> &str {
        &self.reference_glyph
    }

    pub fn vertical_scale(&self) -> f32 {
        self.vertical_scale
    }

    /// Measures `text` in `font`. The surface's drawing state is unchanged afterwards.
    pub fn measure<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
        text: &str,
        font: &FontDescriptor,
    ) -> RenderResult<Size> {
        if !surface.is_ready() {
            return Err(RenderError::NoRenderingContext);
        }

        let mut scoped = surface.saved();
        scoped.set_font(font);
        let width = scoped.measure_text(text).ok_or(RenderError::NoRenderingContext)?;
        let reference = scoped
            .measure_text(&self.reference_glyph)
            .ok_or(RenderError::NoRenderingContext)?;

        let size = self.box_size(width, reference)?;
        debug!("measured '{}' in {}: {}x{}", text, font, size.width(), size.height());
        Ok(size)
    }

    /// Text box for an already measured text width and reference glyph width.
    pub fn box_size(&self, text_width: f32, reference_width: f32) -> RenderResult<Size> {
        let height = reference_width + reference_width * self.vertical_scale;
        Ok(Size::new(text_width, height)?)
    }
}
