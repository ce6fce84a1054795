// crates/easel-layout/src/anchor.rs
use easel_core::{Rectangle, Size, TextAlign, TextBaseline};
use glam::Vec2;
use serde::Serialize;
use tracing::trace;

use crate::{LayoutError, LayoutResult};

/// The nine named reference positions within a parent rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AnchorPosition {
    LeftTop,
    RightTop,
    RightBottom,
    LeftBottom,
    CenterMiddle,
    CenterTop,
    RightMiddle,
    CenterBottom,
    LeftMiddle,
}

impl AnchorPosition {
    /// Every anchor, in declaration order.
    pub const ALL: [AnchorPosition; 9] = [
        AnchorPosition::LeftTop,
        AnchorPosition::RightTop,
        AnchorPosition::RightBottom,
        AnchorPosition::LeftBottom,
        AnchorPosition::CenterMiddle,
        AnchorPosition::CenterTop,
        AnchorPosition::RightMiddle,
        AnchorPosition::CenterBottom,
        AnchorPosition::LeftMiddle,
    ];

    /// Human-readable label, e.g. `"right - bottom"`.
    pub fn label(self) -> &'static str {
        match self {
            AnchorPosition::LeftTop => "left - top",
            AnchorPosition::RightTop => "right - top",
            AnchorPosition::RightBottom => "right - bottom",
            AnchorPosition::LeftBottom => "left - bottom",
            AnchorPosition::CenterMiddle => "center - middle",
            AnchorPosition::CenterTop => "center - top",
            AnchorPosition::RightMiddle => "right - middle",
            AnchorPosition::CenterBottom => "center - bottom",
            AnchorPosition::LeftMiddle => "left - middle",
        }
    }

    /// The alignment pair implied by the anchor's name.
    pub fn alignment(self) -> LayoutResult<AnchorAlignment> {
        ANCHOR_TABLE
            .get(self as usize)
            .copied()
            .ok_or(LayoutError::UnhandledAnchor(self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

impl HorizontalAlign {
    /// Position of the anchor along the parent's width, and of the anchor
    /// within the text box, as a fraction of the respective width.
    pub fn factor(self) -> f32 {
        match self {
            HorizontalAlign::Left => 0.0,
            HorizontalAlign::Center => 0.5,
            HorizontalAlign::Right => 1.0,
        }
    }

    pub fn to_text_align(self) -> TextAlign {
        match self {
            HorizontalAlign::Left => TextAlign::Left,
            HorizontalAlign::Center => TextAlign::Center,
            HorizontalAlign::Right => TextAlign::Right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

impl VerticalAlign {
    pub fn factor(self) -> f32 {
        match self {
            VerticalAlign::Top => 0.0,
            VerticalAlign::Middle => 0.5,
            VerticalAlign::Bottom => 1.0,
        }
    }

    pub fn to_text_baseline(self) -> TextBaseline {
        match self {
            VerticalAlign::Top => TextBaseline::Top,
            VerticalAlign::Middle => TextBaseline::Middle,
            VerticalAlign::Bottom => TextBaseline::Bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AnchorAlignment {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
}

impl AnchorAlignment {
    const fn new(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        Self { horizontal, vertical }
    }

    /// Offset from the anchor point to the top-left corner of a box of `size`.
    pub fn offset_for(self, size: Size) -> Vec2 {
        Vec2::new(
            -size.width() * self.horizontal.factor(),
            -size.height() * self.vertical.factor(),
        )
    }
}

// Indexed by `AnchorPosition as usize`; order must follow the enum declaration.
const ANCHOR_TABLE: [AnchorAlignment; 9] = [
    AnchorAlignment::new(HorizontalAlign::Left, VerticalAlign::Top),
    AnchorAlignment::new(HorizontalAlign::Right, VerticalAlign::Top),
    AnchorAlignment::new(HorizontalAlign::Right, VerticalAlign::Bottom),
    AnchorAlignment::new(HorizontalAlign::Left, VerticalAlign::Bottom),
    AnchorAlignment::new(HorizontalAlign::Center, VerticalAlign::Middle),
    AnchorAlignment::new(HorizontalAlign::Center, VerticalAlign::Top),
    AnchorAlignment::new(HorizontalAlign::Right, VerticalAlign::Middle),
    AnchorAlignment::new(HorizontalAlign::Center, VerticalAlign::Bottom),
    AnchorAlignment::new(HorizontalAlign::Left, VerticalAlign::Middle),
];

/// Anchor point in the parent's local space (origin fixed at `(0, 0)`).
pub fn anchor_point(anchor: AnchorPosition, parent_width: f32, parent_height: f32) -> LayoutResult<Vec2> {
    let parent = Size::new(parent_width, parent_height)?;
    let alignment = anchor.alignment()?;
    Ok(Vec2::new(
        parent.width() * alignment.horizontal.factor(),
        parent.height() * alignment.vertical.factor(),
    ))
}

/// Rectangle occupied by a text box of `metrics` anchored at `anchor`,
/// expressed in the parent's local space.
///
/// Left/top alignment grows the box away from the anchor point, right/bottom
/// ends the box at the point, center/middle bisects it. Empty text yields a
/// zero-width rectangle sitting exactly on the anchor point.
pub fn compute_local_rectangle(
    anchor: AnchorPosition,
    text: &str,
    parent_width: f32,
    parent_height: f32,
    metrics: Size,
) -> LayoutResult<Rectangle> {
    let point = anchor_point(anchor, parent_width, parent_height)?;
    let offset = anchor.alignment()?.offset_for(metrics);
    let rect = Rectangle::from_origin_size(point + offset, metrics);

    trace!(?anchor, text, ?point, ?rect, "computed local text rectangle");
    Ok(rect)
}
