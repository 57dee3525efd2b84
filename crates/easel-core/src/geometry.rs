//! Geometry snapshots and the visible transform.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Measured size of the surface and its containing element.
///
/// `element` is the rendered size, so it already includes the scale of the
/// last transform written to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub element: Size,
    pub parent: Size,
}

impl Geometry {
    pub fn new(element: Size, parent: Size) -> Self {
        Self { element, parent }
    }

    /// Element size with `current_scale` divided back out.
    pub fn unscaled_element(&self, current_scale: f64) -> Size {
        Size::new(
            self.element.width / current_scale,
            self.element.height / current_scale,
        )
    }
}

/// The (x, y, scale) triple written to the surface.
///
/// The translation is in pre-scale units: it is applied after scaling, so a
/// translation of `x` moves the element by `x * scale` on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }

    /// Translation as a point in pre-scale units.
    pub fn translation(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// CSS `transform` value: scale first, then translate in pre-scale pixels.
    pub fn to_css(&self) -> String {
        format!(
            "scale({}) translate({}px, {}px)",
            self.scale, self.x, self.y
        )
    }
}
