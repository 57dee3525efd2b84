//! Scale and translation limits.
//!
//! The visible transform is `scale(s) translate(x, y)` applied about the
//! element's center, so a translation of `x` moves the element by `x * s`
//! on screen. All bounds below are therefore expressed in pre-scale units.
//!
//! For one axis with unscaled length `L`, parent length `P` and scale `s`,
//! the scaled element spans `[s*x - d, s*x - d + L*s]` where
//! `d = (L*s - L) / 2`. Pinning its leading edge to the parent's leading
//! edge gives `a = d / s`; pinning its trailing edge to the parent's
//! trailing edge gives `b = (d - (L*s - P)) / s`. The legal range is
//! `[min(a, b), max(a, b)]`: a scaled element larger than the parent must
//! cover it, a smaller one must stay inside it.

use crate::config::Config;
use crate::geometry::Geometry;
use kurbo::Point;

/// Legal translation range on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    /// Bounds for one axis. `element` is the unscaled element length.
    pub fn for_axis(element: f64, parent: f64, scale: f64) -> Self {
        let scaled = element * scale;
        let diff = (scaled - element) / 2.0;
        let leading = diff / scale;
        let trailing = (diff - (scaled - parent)) / scale;
        Self {
            min: leading.min(trailing),
            max: leading.max(trailing),
        }
    }

    /// Clamp `value` into the range. Non-finite input collapses to the
    /// nearest finite bound.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.max(self.min).min(self.max)
    }
}

/// Upper scale bound: the configured maximum, widened so the unscaled
/// element can always be zoomed far enough to cover its parent.
pub fn effective_max_scale(current_scale: f64, config: &Config, geometry: &Geometry) -> f64 {
    let unscaled = geometry.unscaled_element(current_scale);
    let cover_width = geometry.parent.width / unscaled.width;
    let cover_height = geometry.parent.height / unscaled.height;
    // f64::max ignores a NaN operand, so degenerate (zero-sized) geometry
    // falls back to the configured maximum.
    config.max_scale.max(cover_width).max(cover_height)
}

/// Clamp `target` into `[config.min_scale, effective max]`.
///
/// A non-finite or non-positive target is replaced by `current_scale`
/// before clamping. The result is always positive.
pub fn constrain_scale(
    target: f64,
    current_scale: f64,
    config: &Config,
    geometry: &Geometry,
) -> f64 {
    let target = if target.is_finite() && target > 0.0 {
        target
    } else {
        current_scale
    };
    let max = effective_max_scale(current_scale, config, geometry);
    let scale = target.max(config.min_scale).min(max);
    // A non-positive configured maximum must not collapse the scale.
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        target
    }
}

/// Translation bounds at `target_scale`, one per axis.
pub fn pan_bounds(
    target_scale: f64,
    current_scale: f64,
    geometry: &Geometry,
) -> (AxisBounds, AxisBounds) {
    let unscaled = geometry.unscaled_element(current_scale);
    (
        AxisBounds::for_axis(unscaled.width, geometry.parent.width, target_scale),
        AxisBounds::for_axis(unscaled.height, geometry.parent.height, target_scale),
    )
}

/// Constrain a target translation at `target_scale`.
///
/// A disabled axis keeps `current` and is not clamped. With `disable_pan`
/// both axes keep `current`.
pub fn constrain_xy(
    target: Point,
    current: Point,
    target_scale: f64,
    current_scale: f64,
    config: &Config,
    geometry: &Geometry,
) -> Point {
    let (x_bounds, y_bounds) = pan_bounds(target_scale, current_scale, geometry);
    let x = if config.pans_x() {
        x_bounds.clamp(target.x)
    } else {
        current.x
    };
    let y = if config.pans_y() {
        y_bounds.clamp(target.y)
    } else {
        current.y
    };
    Point::new(x, y)
}
