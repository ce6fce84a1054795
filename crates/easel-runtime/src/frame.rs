// crates/easel-runtime/src/frame.rs
use easel_render::{DrawingSurface, TextMetricsProbe};

/// Dash phases above this wrap back to zero.
pub const DASH_OFFSET_LIMIT: f32 = 10_000.0;

/// Mutable state carried from one frame to the next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameState {
    dash_offset: f32,
    frame_number: u64,
}

impl FrameState {
    pub fn dash_offset(&self) -> f32 {
        self.dash_offset
    }

    /// Moves the dash phase one step forward and returns the new phase.
    pub fn advance_dash_offset(&mut self) -> f32 {
        self.dash_offset += 1.0;
        if self.dash_offset > DASH_OFFSET_LIMIT {
            self.dash_offset = 0.0;
        }
        self.dash_offset
    }

    /// Number of frames rendered so far.
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub(crate) fn begin_frame(&mut self) {
        self.frame_number += 1;
    }
}

/// Everything a scene or timer callback may touch while drawing.
pub struct FrameContext<S: DrawingSurface> {
    pub surface: S,
    pub state: FrameState,
    pub probe: TextMetricsProbe,
    /// Seconds of scheduler time since the host started.
    pub elapsed: f64,
}

impl<S: DrawingSurface> FrameContext<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            state: FrameState::default(),
            probe: TextMetricsProbe::default(),
            elapsed: 0.0,
        }
    }
}
