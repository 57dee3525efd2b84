//! Host collaborators the engine drives.
//!
//! The engine never touches a platform directly. A host supplies a
//! [`Surface`] for measurement and style writes, and a [`FrameScheduler`]
//! for deferring visual updates to the next rendering opportunity.

use crate::geometry::{Geometry, Transform};

/// The element being panned and zoomed, plus its containing element.
pub trait Surface {
    /// Measure the element and its parent.
    ///
    /// The element size is reported at the scale of the last transform
    /// passed to [`Surface::apply_transform`], never at an in-between scale
    /// from a running transition.
    fn measure(&self) -> Geometry;

    /// Set a style property on the element.
    fn apply_style(&self, property: &str, value: &str);

    /// Set a style property on the containing element.
    fn apply_parent_style(&self, property: &str, value: &str);

    /// Write the visible transform.
    fn apply_transform(&self, transform: Transform) {
        self.apply_style("transform", &transform.to_css());
    }

    /// Name the host uses for a logical style property.
    ///
    /// Hosts that need vendor prefixes override this.
    fn style_name(&self, property: &str) -> String {
        property.to_string()
    }
}

/// Per-frame callback scheduling (e.g. `requestAnimationFrame`).
pub trait FrameScheduler {
    /// Run `callback` at the next rendering opportunity.
    fn request_frame(&self, callback: Box<dyn FnOnce()>);
}
