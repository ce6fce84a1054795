// crates/easel-render/src/surface.rs
use easel_core::{FontDescriptor, TextAlign, TextBaseline};
use glam::{Vec2, Vec4};
use std::ops::{Deref, DerefMut};

/// A stateful 2D drawing surface modelled on the HTML canvas 2D context.
///
/// Style setters mutate the current drawing state; `save`/`restore` push and
/// pop it. Prefer [`DrawingSurfaceExt::saved`] over pairing the calls by hand.
pub trait DrawingSurface {
    /// Whether a rendering context exists. Drawing on a surface that is not
    /// ready is a no-op and measuring returns `None`.
    fn is_ready(&self) -> bool;

    /// Canvas width and height in pixels.
    fn size(&self) -> Vec2;

    fn save(&mut self);
    fn restore(&mut self);

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    fn clear(&mut self) {
        let size = self.size();
        self.clear_rect(0.0, 0.0, size.x, size.y);
    }

    fn set_fill_style(&mut self, color: Vec4);
    fn set_stroke_style(&mut self, color: Vec4);
    fn set_line_width(&mut self, width: f32);
    fn set_line_dash(&mut self, segments: &[f32]);
    fn set_line_dash_offset(&mut self, offset: f32);

    fn set_font(&mut self, font: &FontDescriptor);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn arc(&mut self, x: f32, y: f32, radius: f32, start_angle: f32, end_angle: f32);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn fill_text(&mut self, text: &str, x: f32, y: f32);

    /// Advance width of `text` in the current font.
    fn measure_text(&self, text: &str) -> Option<f32>;
}

/// Saves the drawing state on creation and restores it when dropped, so the
/// state is restored on every exit path of the scope holding the guard.
pub struct StateGuard<'a, S: DrawingSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: DrawingSurface + ?Sized> StateGuard<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: DrawingSurface + ?Sized> Deref for StateGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> DerefMut for StateGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> Drop for StateGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

pub trait DrawingSurfaceExt: DrawingSurface {
    fn saved(&mut self) -> StateGuard<'_, Self> {
        StateGuard::new(self)
    }

    fn with_saved_state<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let mut guard = StateGuard::new(self);
        f(&mut *guard)
    }
}

impl<S: DrawingSurface + ?Sized> DrawingSurfaceExt for S {}
