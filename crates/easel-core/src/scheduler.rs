//! Deferred transform writes.

use crate::geometry::Transform;
use crate::surface::{FrameScheduler, Surface};
use std::cell::Cell;
use std::rc::Rc;

/// Queues one visual-apply callback per committed transform.
///
/// Writes are not coalesced: every commit enqueues its own snapshot and the
/// last callback to run wins. Callbacks hold only a weak reference to the
/// surface, so a surface torn down before its frame arrives is skipped.
///
/// The scale of the last snapshot that actually reached the surface is
/// tracked separately from the committed one: measurements report the
/// element at that scale until the next callback runs.
#[derive(Debug)]
pub struct UpdateScheduler<F> {
    frames: F,
    requested: u64,
    rendered_scale: Rc<Cell<f64>>,
}

impl<F: FrameScheduler> UpdateScheduler<F> {
    pub fn new(frames: F) -> Self {
        Self {
            frames,
            requested: 0,
            rendered_scale: Rc::new(Cell::new(1.0)),
        }
    }

    /// Enqueue a write of `snapshot` to `surface`.
    pub fn schedule<S: Surface + 'static>(&mut self, surface: &Rc<S>, snapshot: Transform) {
        self.requested += 1;
        let surface = Rc::downgrade(surface);
        let rendered_scale = Rc::clone(&self.rendered_scale);
        let frame = self.requested;
        log::trace!("Scheduling frame {}: {:?}", frame, snapshot);
        self.frames.request_frame(Box::new(move || match surface.upgrade() {
            Some(surface) => {
                surface.apply_transform(snapshot);
                rendered_scale.set(snapshot.scale);
            }
            None => log::warn!("Surface dropped before frame {} could apply", frame),
        }));
    }

    /// Number of writes requested so far.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Scale of the last snapshot written to the surface.
    pub fn rendered_scale(&self) -> f64 {
        self.rendered_scale.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessSurface, ManualFrames};
    use kurbo::Size;

    #[test]
    fn test_snapshot_taken_at_enqueue_time() {
        let frames = ManualFrames::new();
        let surface = Rc::new(HeadlessSurface::new(Size::new(100.0, 100.0), Size::new(50.0, 50.0)));
        let mut scheduler = UpdateScheduler::new(frames.clone());

        scheduler.schedule(&surface, Transform::new(1.0, 2.0, 1.5));
        assert_eq!(frames.pending(), 1);
        assert_eq!(surface.applied(), Transform::default());
        assert!((scheduler.rendered_scale() - 1.0).abs() < f64::EPSILON);

        frames.run_frame();
        assert_eq!(surface.applied(), Transform::new(1.0, 2.0, 1.5));
        assert!((scheduler.rendered_scale() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_last_write_wins() {
        let frames = ManualFrames::new();
        let surface = Rc::new(HeadlessSurface::new(Size::new(100.0, 100.0), Size::new(50.0, 50.0)));
        let mut scheduler = UpdateScheduler::new(frames.clone());

        scheduler.schedule(&surface, Transform::new(1.0, 0.0, 1.0));
        scheduler.schedule(&surface, Transform::new(2.0, 0.0, 1.0));
        scheduler.schedule(&surface, Transform::new(3.0, 0.0, 1.0));
        assert_eq!(frames.pending(), 3);
        assert_eq!(scheduler.requested(), 3);

        frames.run_frame();
        assert_eq!(surface.transform_writes(), 3);
        assert_eq!(surface.applied(), Transform::new(3.0, 0.0, 1.0));
    }

    #[test]
    fn test_dropped_surface_is_skipped() {
        let frames = ManualFrames::new();
        let surface = Rc::new(HeadlessSurface::new(Size::new(100.0, 100.0), Size::new(50.0, 50.0)));
        let mut scheduler = UpdateScheduler::new(frames.clone());

        scheduler.schedule(&surface, Transform::new(1.0, 0.0, 3.0));
        drop(surface);

        // Must not panic
        frames.run_frame();
        assert_eq!(frames.pending(), 0);
        assert!((scheduler.rendered_scale() - 1.0).abs() < f64::EPSILON);
    }
}
