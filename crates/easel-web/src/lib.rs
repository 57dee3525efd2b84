//! Easel Web
//!
//! Browser binding for the Easel pan/zoom engine: DOM measurement and
//! styling, `requestAnimationFrame` scheduling, and gesture listeners.

pub mod css;

pub use css::StyleResolver;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use dom::{AnimationFrames, DomSurface, contact_event, detect_capabilities};
#[cfg(target_arch = "wasm32")]
pub use web::{PanZoom, start};
