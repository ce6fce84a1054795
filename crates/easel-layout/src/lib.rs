// crates/easel-layout/src/lib.rs

//! Anchor-based text layout.
//!
//! A parent rectangle exposes nine anchors (corners, edge midpoints, center).
//! Anchoring a measured text box to one of them yields the box's rectangle in
//! the parent's local space, plus the canvas draw origin and align/baseline
//! that make a canvas `fillText` land on exactly that rectangle.

use easel_core::CoreError;

pub mod anchor;
pub mod placement;

pub use anchor::*;
pub use placement::*;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// Unreachable while the anchor table covers every variant.
    #[error("No alignment entry for anchor {0:?}")]
    UnhandledAnchor(AnchorPosition),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type LayoutResult<T> = std::result::Result<T, LayoutError>;
