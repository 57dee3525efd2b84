//! Easel Core Library
//!
//! Platform-agnostic pan/zoom engine: contact tracking, scale and
//! translation limits, and the gesture state machine that drives a surface.

pub mod config;
pub mod constraint;
pub mod contact;
pub mod error;
pub mod geometry;
pub mod headless;
pub mod input;
pub mod scheduler;
pub mod surface;
pub mod viewport;

pub use config::{Config, Overflow, PartialConfig};
pub use constraint::{AxisBounds, constrain_scale, constrain_xy, effective_max_scale, pan_bounds};
pub use contact::{Contact, ContactEvent, ContactId, ContactTracker, fold_midpoints};
pub use error::{EaselError, EaselResult};
pub use geometry::{Geometry, Transform};
pub use headless::{HeadlessSurface, ManualFrames};
pub use input::{EventTable, EventTarget, GestureEvent, InputCapabilities, InputMechanism};
pub use scheduler::UpdateScheduler;
pub use surface::{FrameScheduler, Surface};
pub use viewport::{GestureSession, GesturePhase, Viewport};
