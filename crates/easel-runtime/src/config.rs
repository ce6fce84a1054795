// crates/easel-runtime/src/config.rs

//! Host configuration, read from an optional TOML file.
//!
//! Every key has a default, so an empty file (or no file) describes the
//! stock anchor-text scene on an 800x600 canvas with the dashed-rect timer.

use easel_core::{color, FontDescriptor, Rectangle, Vec4};
use easel_render::TextMetricsProbe;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::{AnchorTextScene, GridOptions, HostError, HostResult};

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct HostConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub dashed_rect: DashedRectConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CanvasConfig {
    #[serde(default = "default_canvas_width")]
    pub width: f32,
    #[serde(default = "default_canvas_height")]
    pub height: f32,
}

fn default_canvas_width() -> f32 {
    800.0
}

fn default_canvas_height() -> f32 {
    600.0
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RunConfig {
    /// Simulated seconds for headless runs.
    #[serde(default = "default_seconds")]
    pub seconds: f32,
    #[serde(default = "default_fps")]
    pub fps: f32,
}

fn default_seconds() -> f32 {
    10.0
}

fn default_fps() -> f32 {
    60.0
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seconds: default_seconds(),
            fps: default_fps(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub margin: f32,
    pub font: FontDescriptor,
    pub text_color: String,
    pub marker_color: String,
    pub marker_radius: f32,
    pub show_bounds: bool,
    pub bounds_color: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 20.0,
            font: FontDescriptor::label(),
            text_color: "white".to_string(),
            marker_color: "black".to_string(),
            marker_radius: 3.0,
            show_bounds: false,
            bounds_color: "yellow".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GridConfig {
    pub enabled: bool,
    pub color: String,
    pub interval: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            color: "grey".to_string(),
            interval: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashedRectConfig {
    pub enabled: bool,
    /// Seconds between phase steps.
    pub interval: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for DashedRectConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: 0.033,
            x: 10.0,
            y: 10.0,
            width: 100.0,
            height: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub reference_glyph: String,
    pub vertical_scale: f32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            reference_glyph: easel_render::DEFAULT_REFERENCE_GLYPH.to_string(),
            vertical_scale: easel_render::DEFAULT_VERTICAL_SCALE,
        }
    }
}

fn invalid(message: impl Into<String>) -> HostError {
    HostError::Config(message.into())
}

fn parse_color(key: &str, value: &str) -> HostResult<Vec4> {
    color::parse(value).map_err(|err| invalid(format!("{}: {}", key, err)))
}

fn positive(key: &str, value: f32) -> HostResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{} must be a positive number, got {}", key, value)))
    }
}

fn non_negative(key: &str, value: f32) -> HostResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{} must not be negative, got {}", key, value)))
    }
}

impl HostConfig {
    pub fn load(path: &Path) -> HostResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|err| invalid(format!("failed to read {}: {}", path.display(), err)))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> HostResult<Self> {
        let config: Self = toml::from_str(content).map_err(|err| invalid(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> HostResult<()> {
        positive("canvas.width", self.canvas.width)?;
        positive("canvas.height", self.canvas.height)?;
        non_negative("run.seconds", self.run.seconds)?;
        positive("run.fps", self.run.fps)?;
        positive("frame step (1 / run.fps)", self.frame_step())?;
        non_negative("layout.margin", self.layout.margin)?;
        non_negative("layout.marker_radius", self.layout.marker_radius)?;
        parse_color("layout.text_color", &self.layout.text_color)?;
        parse_color("layout.marker_color", &self.layout.marker_color)?;
        parse_color("layout.bounds_color", &self.layout.bounds_color)?;
        parse_color("grid.color", &self.grid.color)?;
        positive("grid.interval", self.grid.interval)?;
        positive("dashed_rect.interval", self.dashed_rect.interval)?;
        self.dashed_rect()?;
        self.probe()?;
        Ok(())
    }

    /// Seconds per frame.
    pub fn frame_step(&self) -> f32 {
        1.0 / self.run.fps
    }

    pub fn probe(&self) -> HostResult<TextMetricsProbe> {
        TextMetricsProbe::new(self.probe.reference_glyph.clone(), self.probe.vertical_scale)
            .map_err(|err| invalid(format!("probe: {}", err)))
    }

    pub fn scene(&self) -> HostResult<AnchorTextScene> {
        let layout = &self.layout;
        let mut scene = AnchorTextScene::new()
            .with_font(layout.font.clone())
            .with_margin(layout.margin);
        scene.text_color = parse_color("layout.text_color", &layout.text_color)?;
        scene.marker_color = parse_color("layout.marker_color", &layout.marker_color)?;
        scene.marker_radius = layout.marker_radius;

        if self.grid.enabled {
            scene = scene.with_grid(GridOptions {
                color: parse_color("grid.color", &self.grid.color)?,
                interval: self.grid.interval,
            });
        }
        if layout.show_bounds {
            scene = scene.with_bounds(parse_color("layout.bounds_color", &layout.bounds_color)?);
        }
        Ok(scene)
    }

    /// Rectangle for the dashed-rect timer, or `None` when it is disabled.
    pub fn dashed_rect(&self) -> HostResult<Option<Rectangle>> {
        let rect = &self.dashed_rect;
        if !rect.enabled {
            return Ok(None);
        }
        Rectangle::new(rect.x, rect.y, rect.width, rect.height)
            .map(Some)
            .map_err(|err| invalid(format!("dashed_rect: {}", err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = HostConfig::from_toml_str("").unwrap();
        assert_eq!(config, HostConfig::default());
        assert_eq!(config.canvas.width, 800.0);
        assert_eq!(config.layout.font.to_string(), "20px sans-serif");
        assert_eq!(config.dashed_rect.interval, 0.033);
        assert!((config.frame_step() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_sections_keep_remaining_defaults() {
        let config = HostConfig::from_toml_str(
            r#"
            [canvas]
            width = 320

            [layout]
            font = "14px monospace"
            show_bounds = true

            [grid]
            enabled = true
            interval = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.canvas.width, 320.0);
        assert_eq!(config.canvas.height, 600.0);
        assert_eq!(config.layout.font.size_px(), 14.0);
        assert_eq!(config.layout.margin, 20.0);

        let scene = config.scene().unwrap();
        assert_eq!(scene.grid.map(|grid| grid.interval), Some(20.0));
        assert_eq!(scene.bounds_color, Some(color::YELLOW));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let cases = [
            "[canvas]\nwidth = -5",
            "[run]\nfps = 0",
            "[run]\nfps = 1e-39",
            "[layout]\nfont = \"huge\"",
            "[layout]\ntext_color = \"chartreuse\"",
            "[grid]\ninterval = 0",
            "[dashed_rect]\nwidth = -1",
            "[probe]\nreference_glyph = \"\"",
        ];
        for case in cases {
            assert!(
                matches!(HostConfig::from_toml_str(case), Err(HostError::Config(_))),
                "accepted: {}",
                case
            );
        }
    }

    #[test]
    fn test_disabled_dashed_rect() {
        let config = HostConfig::from_toml_str("[dashed_rect]\nenabled = false").unwrap();
        assert_eq!(config.dashed_rect().unwrap(), None);
    }
}
