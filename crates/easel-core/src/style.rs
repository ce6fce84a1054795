// crates/easel-core/src/style.rs
use glam::Vec4;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Canvas `textAlign` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Start,
    #[default]
    Left,
    Center,
    Right,
    End,
}

impl TextAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::End => "end",
        }
    }
}

/// Canvas `textBaseline` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Alphabetic,
    Hanging,
    #[default]
    Top,
    Middle,
    Bottom,
}

impl TextBaseline {
    pub fn as_str(self) -> &'static str {
        match self {
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Hanging => "hanging",
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
            TextBaseline::Bottom => "bottom",
        }
    }
}

/// A CSS-like font shorthand restricted to `<size>px <family>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FontDescriptor {
    size_px: f32,
    family: String,
}

impl FontDescriptor {
    pub fn new(size_px: f32, family: impl Into<String>) -> crate::Result<Self> {
        let family = family.into();
        if !(size_px > 0.0) || !size_px.is_finite() || family.trim().is_empty() {
            return Err(CoreError::InvalidFont(format!("{}px {}", size_px, family)));
        }
        Ok(Self {
            size_px,
            family: family.trim().to_string(),
        })
    }

    /// `20px sans-serif`, the font anchored labels are drawn in.
    pub fn label() -> Self {
        Self {
            size_px: 20.0,
            family: "sans-serif".to_string(),
        }
    }

    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    pub fn family(&self) -> &str {
        &self.family
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            size_px: 10.0,
            family: "sans-serif".to_string(),
        }
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

impl FromStr for FontDescriptor {
    type Err = CoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let invalid = || CoreError::InvalidFont(value.to_string());

        let (size, family) = value.split_once(char::is_whitespace).ok_or_else(invalid)?;
        let size_px = size
            .strip_suffix("px")
            .and_then(|number| number.parse::<f32>().ok())
            .ok_or_else(invalid)?;

        Self::new(size_px, family).map_err(|_| invalid())
    }
}

impl TryFrom<String> for FontDescriptor {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FontDescriptor> for String {
    fn from(font: FontDescriptor) -> Self {
        font.to_string()
    }
}

/// Everything a single `fillText` call needs besides the text and position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub color: Vec4,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub font: FontDescriptor,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: color::WHITE,
            align: TextAlign::Left,
            baseline: TextBaseline::Top,
            font: FontDescriptor::default(),
        }
    }
}

impl TextStyle {
    pub fn new(font: FontDescriptor) -> Self {
        Self {
            font,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }
}

/// Fill/stroke configuration for path primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyle {
    pub fill: Option<Vec4>,
    pub stroke: Option<Vec4>,
    pub line_width: f32,
    pub line_dash: Vec<f32>,
    pub line_dash_offset: f32,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: Some(color::BLACK),
            line_width: 1.0,
            line_dash: Vec::new(),
            line_dash_offset: 0.0,
        }
    }
}

impl ShapeStyle {
    pub fn with_fill(mut self, fill: Vec4) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: Vec4) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn without_stroke(mut self) -> Self {
        self.stroke = None;
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_dash(mut self, pattern: impl Into<Vec<f32>>, offset: f32) -> Self {
        self.line_dash = pattern.into();
        self.line_dash_offset = offset;
        self
    }
}

/// Color utilities. Named colors use CSS values so canvas-era names keep their meaning.
pub mod color {
    use glam::Vec4;

    use crate::CoreError;

    pub const TRANSPARENT: Vec4 = Vec4::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Vec4 = Vec4::new(0.0, 128.0 / 255.0, 0.0, 1.0);
    pub const BLUE: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);
    pub const GREY: Vec4 = Vec4::new(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0, 1.0);
    pub const YELLOW: Vec4 = Vec4::new(1.0, 1.0, 0.0, 1.0);

    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Vec4 {
        Vec4::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    pub fn from_name(name: &str) -> Option<Vec4> {
        let color = match name.trim().to_ascii_lowercase().as_str() {
            "transparent" => TRANSPARENT,
            "black" => BLACK,
            "white" => WHITE,
            "red" => RED,
            "green" => GREEN,
            "blue" => BLUE,
            "grey" | "gray" => GREY,
            "yellow" => YELLOW,
            _ => return None,
        };
        Some(color)
    }

    /// Accepts a CSS color name, `#rrggbb` or `#rrggbbaa`.
    pub fn parse(value: &str) -> crate::Result<Vec4> {
        if let Some(color) = from_name(value) {
            return Ok(color);
        }

        let invalid = || CoreError::InvalidColor(value.to_string());
        let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return Err(invalid());
        }

        let channel = |index: usize| u8::from_str_radix(&hex[index..index + 2], 16).map_err(|_| invalid());
        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(from_rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// `rgba(r, g, b, a)` string, as a canvas `fillStyle` would print it.
    pub fn to_css(color: Vec4) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            (color.x * 255.0).round() as u8,
            (color.y * 255.0).round() as u8,
            (color.z * 255.0).round() as u8,
            color.w
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_descriptor_parsing() {
        let font: FontDescriptor = "20px sans-serif".parse().unwrap();
        assert_eq!(font.size_px(), 20.0);
        assert_eq!(font.family(), "sans-serif");
        assert_eq!(font.to_string(), "20px sans-serif");

        let font: FontDescriptor = "12.5px  Fira Code".parse().unwrap();
        assert_eq!(font.size_px(), 12.5);
        assert_eq!(font.family(), "Fira Code");
    }

    #[test]
    fn test_font_descriptor_rejects_garbage() {
        assert!("sans-serif".parse::<FontDescriptor>().is_err());
        assert!("20pt serif".parse::<FontDescriptor>().is_err());
        assert!("-3px serif".parse::<FontDescriptor>().is_err());
        assert!("20px".parse::<FontDescriptor>().is_err());
    }

    #[test]
    fn test_text_style_defaults_match_fill_text() {
        let style = TextStyle::default();
        assert_eq!(style.color, color::WHITE);
        assert_eq!(style.align, TextAlign::Left);
        assert_eq!(style.baseline, TextBaseline::Top);
        assert_eq!(style.font.to_string(), "10px sans-serif");
    }

    #[test]
    fn test_color_parsing() {
        assert_eq!(color::parse("grey").unwrap(), color::GREY);
        assert_eq!(color::parse("Blue").unwrap(), color::BLUE);
        assert_eq!(color::parse("#ff0000").unwrap(), color::RED);
        assert_eq!(color::parse("#00000000").unwrap(), color::TRANSPARENT);
        assert!(color::parse("#ff00").is_err());
        assert!(color::parse("chartreuse").is_err());
    }

    #[test]
    fn test_color_to_css() {
        assert_eq!(color::to_css(color::GREEN), "rgba(0, 128, 0, 1)");
    }
}
