// crates/easel-core/src/lib.rs
pub mod geometry;
pub mod style;

pub use geometry::*;
pub use style::*;

pub use glam::{vec2, Vec2, Vec4};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid dimension: {width}x{height} (width and height must be non-negative numbers)")]
    InvalidDimension { width: f32, height: f32 },

    #[error("Invalid font descriptor: '{0}' (expected e.g. '20px sans-serif')")]
    InvalidFont(String),

    #[error("Invalid color: '{0}'")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
