// crates/easel-layout/src/placement.rs
use easel_core::{Rectangle, Size, TextAlign, TextBaseline};
use glam::Vec2;
use serde::Serialize;
use tracing::debug;

use crate::{anchor_point, compute_local_rectangle, AnchorPosition, LayoutResult};

fn align_factor(align: TextAlign) -> f32 {
    // Left-to-right text: start is left, end is right.
    match align {
        TextAlign::Start | TextAlign::Left => 0.0,
        TextAlign::Center => 0.5,
        TextAlign::Right | TextAlign::End => 1.0,
    }
}

fn baseline_offset(baseline: TextBaseline, height: f32, vertical_scale: f32) -> f32 {
    match baseline {
        TextBaseline::Top | TextBaseline::Hanging => 0.0,
        TextBaseline::Middle => height * 0.5,
        TextBaseline::Bottom => height,
        // The box is `cap * (1 + scale)` tall; the baseline sits under the cap.
        TextBaseline::Alphabetic => height / (1.0 + vertical_scale.max(0.0)),
    }
}

/// Rectangle covered by a canvas `fillText` drawn at `origin` with the
/// given align and baseline, for a text box of `metrics`.
///
/// `vertical_scale` is the descender share used by the metrics probe; only
/// the alphabetic baseline depends on it.
pub fn text_box_at(
    origin: Vec2,
    align: TextAlign,
    baseline: TextBaseline,
    metrics: Size,
    vertical_scale: f32,
) -> Rectangle {
    let offset = Vec2::new(
        metrics.width() * align_factor(align),
        baseline_offset(baseline, metrics.height(), vertical_scale),
    );
    Rectangle::from_origin_size(origin - offset, metrics)
}

/// Where and how to draw one anchored text label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPlacement {
    pub anchor: AnchorPosition,
    /// Text rectangle in the parent's local space.
    pub local: Rectangle,
    /// Text rectangle in the space the parent rectangle is expressed in.
    pub bounds: Rectangle,
    /// Canvas draw origin to use with `align` and `baseline`.
    pub origin: Vec2,
    /// Marker position. Always the raw anchor point, never a corner of `bounds`.
    pub marker: Vec2,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextPlacement {
    /// Draw origin for surfaces that only support left/top text placement.
    pub fn top_left(&self) -> Vec2 {
        self.bounds.origin()
    }
}

/// Anchors a measured text box inside `parent`, which may sit anywhere in its outer space.
pub fn place_text(anchor: AnchorPosition, text: &str, parent: &Rectangle, metrics: Size) -> LayoutResult<TextPlacement> {
    let alignment = anchor.alignment()?;
    let local = compute_local_rectangle(anchor, text, parent.width(), parent.height(), metrics)?;
    let point = parent.origin() + anchor_point(anchor, parent.width(), parent.height())?;

    let placement = TextPlacement {
        anchor,
        local,
        bounds: local.translate(parent.origin()),
        origin: point,
        marker: point,
        align: alignment.horizontal.to_text_align(),
        baseline: alignment.vertical.to_text_baseline(),
    };

    debug!(
        "placed '{}' at {:?}: origin={:?} bounds={:?}",
        text, anchor, placement.origin, placement.bounds
    );
    Ok(placement)
}
