//! Headless host for tests and native embedders.
//!
//! [`HeadlessSurface`] records style writes and reports geometry derived
//! from the last applied transform. [`ManualFrames`] queues frame callbacks
//! until the host calls [`ManualFrames::run_frame`].

use crate::geometry::{Geometry, Transform};
use crate::surface::{FrameScheduler, Surface};
use kurbo::Size;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Which element a style write targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTarget {
    Element,
    Parent,
}

/// One recorded style write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleWrite {
    pub target: StyleTarget,
    pub property: String,
    pub value: String,
}

/// In-memory surface.
#[derive(Debug)]
pub struct HeadlessSurface {
    element: Cell<Size>,
    parent: Cell<Size>,
    applied: Cell<Transform>,
    transform_writes: Cell<usize>,
    styles: RefCell<Vec<StyleWrite>>,
}

impl HeadlessSurface {
    /// Surface with the given unscaled element size inside a parent.
    pub fn new(element: Size, parent: Size) -> Self {
        Self {
            element: Cell::new(element),
            parent: Cell::new(parent),
            applied: Cell::new(Transform::default()),
            transform_writes: Cell::new(0),
            styles: RefCell::new(Vec::new()),
        }
    }

    /// Resize the parent (e.g. a window resize).
    pub fn set_parent_size(&self, parent: Size) {
        self.parent.set(parent);
    }

    /// Last transform written by a frame callback.
    pub fn applied(&self) -> Transform {
        self.applied.get()
    }

    /// Number of transform writes so far.
    pub fn transform_writes(&self) -> usize {
        self.transform_writes.get()
    }

    /// Every style write in order.
    pub fn styles(&self) -> Vec<StyleWrite> {
        self.styles.borrow().clone()
    }

    /// Latest value written for `property` on `target`.
    pub fn style(&self, target: StyleTarget, property: &str) -> Option<String> {
        self.styles
            .borrow()
            .iter()
            .rev()
            .find(|w| w.target == target && w.property == property)
            .map(|w| w.value.clone())
    }

    fn record(&self, target: StyleTarget, property: &str, value: &str) {
        self.styles.borrow_mut().push(StyleWrite {
            target,
            property: property.to_string(),
            value: value.to_string(),
        });
    }
}

impl Surface for HeadlessSurface {
    fn measure(&self) -> Geometry {
        let scale = self.applied.get().scale;
        let element = self.element.get();
        Geometry::new(
            Size::new(element.width * scale, element.height * scale),
            self.parent.get(),
        )
    }

    fn apply_style(&self, property: &str, value: &str) {
        self.record(StyleTarget::Element, property, value);
    }

    fn apply_parent_style(&self, property: &str, value: &str) {
        self.record(StyleTarget::Parent, property, value);
    }

    fn apply_transform(&self, transform: Transform) {
        self.applied.set(transform);
        self.transform_writes.set(self.transform_writes.get() + 1);
        self.apply_style("transform", &transform.to_css());
    }
}

type FrameCallback = Box<dyn FnOnce()>;

/// Frame scheduler driven by hand.
///
/// Clones share one queue, so a test can keep a handle while the engine
/// owns another.
#[derive(Clone, Default)]
pub struct ManualFrames {
    queue: Rc<RefCell<VecDeque<FrameCallback>>>,
}

impl fmt::Debug for ManualFrames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualFrames")
            .field("pending", &self.pending())
            .finish()
    }
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run every callback queued before this call, in order.
    ///
    /// Callbacks requested while the frame runs wait for the next one.
    pub fn run_frame(&self) -> usize {
        let batch: Vec<FrameCallback> = self.queue.borrow_mut().drain(..).collect();
        let count = batch.len();
        for callback in batch {
            callback();
        }
        count
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&self, callback: Box<dyn FnOnce()>) {
        self.queue.borrow_mut().push_back(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_follows_applied_scale() {
        let surface = HeadlessSurface::new(Size::new(100.0, 50.0), Size::new(80.0, 80.0));
        surface.apply_transform(Transform::new(0.0, 0.0, 2.0));
        let geometry = surface.measure();
        assert_eq!(geometry.element, Size::new(200.0, 100.0));
        assert_eq!(geometry.parent, Size::new(80.0, 80.0));
    }

    #[test]
    fn test_style_lookup_returns_latest() {
        let surface = HeadlessSurface::new(Size::new(1.0, 1.0), Size::new(1.0, 1.0));
        surface.apply_style("opacity", "0.5");
        surface.apply_style("opacity", "1");
        surface.apply_parent_style("opacity", "0");
        assert_eq!(surface.style(StyleTarget::Element, "opacity").as_deref(), Some("1"));
        assert_eq!(surface.style(StyleTarget::Parent, "opacity").as_deref(), Some("0"));
        assert_eq!(surface.styles().len(), 3);
    }

    #[test]
    fn test_frames_requested_during_run_wait() {
        let frames = ManualFrames::new();
        let inner = frames.clone();
        let ran = Rc::new(Cell::new(0));
        let ran_outer = ran.clone();
        frames.request_frame(Box::new(move || {
            ran_outer.set(ran_outer.get() + 1);
            let ran_inner = ran_outer.clone();
            inner.request_frame(Box::new(move || ran_inner.set(ran_inner.get() + 1)));
        }));

        assert_eq!(frames.run_frame(), 1);
        assert_eq!(ran.get(), 1);
        assert_eq!(frames.pending(), 1);
        assert_eq!(frames.run_frame(), 1);
        assert_eq!(ran.get(), 2);
    }
}
