// crates/easel-runtime/src/lib.rs

use easel_render::RenderError;

pub mod config;
pub mod frame;
pub mod host;
pub mod scene;
pub mod timer;

pub use config::*;
pub use frame::*;
pub use host::*;
pub use scene::*;
pub use timer::*;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Drawing surface is not ready")]
    SurfaceNotReady,
    #[error("Invalid interval: {0} seconds")]
    InvalidInterval(f32),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type HostResult<T> = std::result::Result<T, HostError>;
