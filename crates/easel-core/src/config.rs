//! Viewport configuration.
//!
//! A [`Config`] is built once from caller-supplied partial values layered
//! over the defaults and never changes afterward.

use crate::error::EaselResult;
use serde::{Deserialize, Serialize};

/// Overflow mode applied to the containing element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    #[default]
    Hidden,
    Scroll,
}

impl Overflow {
    /// CSS keyword for this mode.
    pub fn as_css(self) -> &'static str {
        match self {
            Overflow::Hidden => "hidden",
            Overflow::Scroll => "scroll",
        }
    }
}

/// Complete, immutable viewport configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Reserved; carried through but not acted on.
    pub animate: bool,
    /// Freeze both axes.
    pub disable_pan: bool,
    /// Keep the current scale on every zoom request.
    pub disable_zoom: bool,
    /// Freeze the horizontal axis.
    pub disable_x: bool,
    /// Freeze the vertical axis.
    pub disable_y: bool,
    /// Configured maximum scale (may be widened to cover the parent).
    pub max_scale: f64,
    /// Minimum scale.
    pub min_scale: f64,
    /// Overflow mode for the parent element.
    pub overflow: Overflow,
    pub start_x: f64,
    pub start_y: f64,
    pub start_scale: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            animate: false,
            disable_pan: false,
            disable_zoom: false,
            disable_x: false,
            disable_y: false,
            max_scale: 4.0,
            min_scale: 0.25,
            overflow: Overflow::Hidden,
            start_x: 0.0,
            start_y: 0.0,
            start_scale: 1.0,
        }
    }
}

/// Caller-supplied configuration where every field is optional.
///
/// Unknown keys are ignored when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialConfig {
    pub animate: Option<bool>,
    pub disable_pan: Option<bool>,
    pub disable_zoom: Option<bool>,
    pub disable_x: Option<bool>,
    pub disable_y: Option<bool>,
    pub max_scale: Option<f64>,
    pub min_scale: Option<f64>,
    pub overflow: Option<Overflow>,
    pub start_x: Option<f64>,
    pub start_y: Option<f64>,
    pub start_scale: Option<f64>,
}

impl PartialConfig {
    /// Parse partial configuration from JSON text.
    pub fn from_json(json: &str) -> EaselResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Config {
    /// Layer `partial` over the defaults.
    pub fn merged(partial: &PartialConfig) -> Self {
        Self::default().with(partial)
    }

    /// Layer `partial` over `self`, returning the new configuration.
    ///
    /// No range validation happens here: an inverted `min_scale`/`max_scale`
    /// pair is resolved by the constraint solver at zoom time.
    pub fn with(&self, partial: &PartialConfig) -> Self {
        Self {
            animate: partial.animate.unwrap_or(self.animate),
            disable_pan: partial.disable_pan.unwrap_or(self.disable_pan),
            disable_zoom: partial.disable_zoom.unwrap_or(self.disable_zoom),
            disable_x: partial.disable_x.unwrap_or(self.disable_x),
            disable_y: partial.disable_y.unwrap_or(self.disable_y),
            max_scale: partial.max_scale.unwrap_or(self.max_scale),
            min_scale: partial.min_scale.unwrap_or(self.min_scale),
            overflow: partial.overflow.unwrap_or(self.overflow),
            start_x: partial.start_x.unwrap_or(self.start_x),
            start_y: partial.start_y.unwrap_or(self.start_y),
            start_scale: partial.start_scale.unwrap_or(self.start_scale),
        }
    }

    /// Whether the horizontal axis may move.
    pub fn pans_x(&self) -> bool {
        !self.disable_pan && !self.disable_x
    }

    /// Whether the vertical axis may move.
    pub fn pans_y(&self) -> bool {
        !self.disable_pan && !self.disable_y
    }
}
