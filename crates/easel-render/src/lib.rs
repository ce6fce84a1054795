// crates/easel-render/src/lib.rs

use easel_core::CoreError;
use easel_layout::LayoutError;

pub mod dash;
pub mod primitives;
pub mod probe;
pub mod recording;
pub mod surface;

pub use dash::*;
pub use primitives::*;
pub use probe::*;
pub use recording::*;
pub use surface::*;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("No rendering context: the drawing surface is not initialized")]
    NoRenderingContext,
    #[error("Invalid circle radius: {0}")]
    InvalidRadius(f32),
    #[error("Invalid grid interval: {0}")]
    InvalidGridInterval(f32),
    #[error("Invalid metrics probe configuration: {0}")]
    InvalidProbe(String),
    #[error("Render operation failed: {0}")]
    RenderFailed(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;
