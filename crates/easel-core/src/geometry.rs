// crates/easel-core/src/geometry.rs
use glam::Vec2;
use serde::Serialize;

use crate::{CoreError, Result};

fn check_dimensions(width: f32, height: f32) -> Result<()> {
    // `!(x >= 0.0)` also rejects NaN
    if !(width >= 0.0) || !(height >= 0.0) {
        return Err(CoreError::InvalidDimension { width, height });
    }
    Ok(())
}

/// Width and height in pixels. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    pub fn new(width: f32, height: f32) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Axis-aligned rectangle. The coordinate space of `x`/`y` is whatever the
/// caller designates (parent-local or canvas-global).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rectangle {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self { x, y, width, height })
    }

    pub fn from_origin_size(origin: Vec2, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Same rectangle moved by `offset`, e.g. from parent-local into the parent's outer space.
    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }

    /// Shrinks every edge by `margin`, clamping the size at zero.
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            x: self.x + margin,
            y: self.y + margin,
            width: (self.width - margin * 2.0).max(0.0),
            height: (self.height - margin * 2.0).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_rejects_negative_and_nan() {
        assert_eq!(
            Size::new(-1.0, 2.0),
            Err(CoreError::InvalidDimension { width: -1.0, height: 2.0 })
        );
        assert!(Size::new(1.0, -0.5).is_err());
        assert!(Size::new(f32::NAN, 1.0).is_err());
        assert!(Size::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_size_equality_is_structural() {
        assert_eq!(Size::new(40.0, 20.0).unwrap(), Size::new(40.0, 20.0).unwrap());
        assert_ne!(Size::new(40.0, 20.0).unwrap(), Size::new(20.0, 40.0).unwrap());
        assert!(Size::ZERO.is_empty());
    }

    #[test]
    fn test_rectangle_edges_and_center() {
        let rect = Rectangle::new(120.0, 0.0, 40.0, 20.0).unwrap();
        assert_eq!(rect.right(), 160.0);
        assert_eq!(rect.bottom(), 20.0);
        assert_eq!(rect.center(), Vec2::new(140.0, 10.0));
        assert!(rect.contains_point(Vec2::new(160.0, 20.0)));
        assert!(!rect.contains_point(Vec2::new(119.0, 10.0)));
    }

    #[test]
    fn test_rectangle_rejects_negative_size() {
        assert!(Rectangle::new(0.0, 0.0, -4.0, 1.0).is_err());
    }

    #[test]
    fn test_translate_and_inset() {
        let rect = Rectangle::new(0.0, 0.0, 200.0, 100.0).unwrap();
        let moved = rect.translate(Vec2::new(20.0, 30.0));
        assert_eq!(moved.origin(), Vec2::new(20.0, 30.0));
        assert_eq!(moved.size(), rect.size());

        let inner = rect.inset(20.0);
        assert_eq!(inner, Rectangle::new(20.0, 20.0, 160.0, 60.0).unwrap());

        let collapsed = rect.inset(80.0);
        assert_eq!(collapsed.height(), 0.0);
    }
}
