//! Viewport state machine: owns the transform and the gesture lifecycle.

use crate::config::Config;
use crate::constraint::{constrain_scale, constrain_xy};
use crate::contact::{ContactEvent, ContactTracker};
use crate::error::{EaselError, EaselResult};
use crate::geometry::Transform;
use crate::scheduler::UpdateScheduler;
use crate::surface::{FrameScheduler, Surface};
use kurbo::Point;
use std::rc::Rc;

/// Duration of the CSS transition installed on the surface.
pub const TRANSITION_MS: u32 = 400;

/// Origin captured when a pan starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Translation when the gesture started.
    pub origin: Point,
    /// Contact centroid when the gesture started.
    pub anchor: Point,
    /// Scale when the gesture started. Only reported when the pan ends.
    pub scale: f64,
}

/// Gesture phase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Panning(GestureSession),
}

impl GesturePhase {
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning(_))
    }
}

/// Pan/zoom controller for one surface.
///
/// All mutation goes through [`Viewport::handle_down`],
/// [`Viewport::handle_move`], [`Viewport::handle_up`] and
/// [`Viewport::zoom`]; each keeps the transform inside the limits computed
/// by the constraint solver and schedules a deferred write when it changes.
pub struct Viewport<S: Surface + 'static, F: FrameScheduler> {
    surface: Rc<S>,
    config: Config,
    transform: Transform,
    phase: GesturePhase,
    contacts: ContactTracker,
    updates: UpdateScheduler<F>,
}

impl<S: Surface + 'static, F: FrameScheduler> Viewport<S, F> {
    /// Attach to `surface`, install the initial style hints and zoom to the
    /// configured start scale.
    ///
    /// Fails with [`EaselError::MissingSurface`] before touching anything
    /// if `surface` is `None`.
    pub fn initialize(surface: Option<Rc<S>>, frames: F, config: Config) -> EaselResult<Self> {
        let surface = surface.ok_or(EaselError::MissingSurface)?;

        // The surface has not been transformed yet, so state starts at scale 1
        // to match what a measurement will report; the start scale is reached
        // through the initial zoom below.
        let transform = Transform::new(
            finite_or_zero(config.start_x),
            finite_or_zero(config.start_y),
            1.0,
        );
        let start_scale = config.start_scale;

        surface.apply_parent_style("overflow", config.overflow.as_css());
        surface.apply_style("transformOrigin", "center");
        let transform_property = surface.style_name("transform");
        surface.apply_style(
            "transition",
            &format!("{} {}ms", transform_property, TRANSITION_MS),
        );

        let mut viewport = Self {
            surface,
            config,
            transform,
            phase: GesturePhase::Idle,
            contacts: ContactTracker::new(),
            updates: UpdateScheduler::new(frames),
        };
        log::debug!("Viewport initialized with {:?}", viewport.config);
        viewport.zoom(start_scale);
        Ok(viewport)
    }

    /// Current transform snapshot.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn x(&self) -> f64 {
        self.transform.x
    }

    pub fn y(&self) -> f64 {
        self.transform.y
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Active contacts.
    pub fn contacts(&self) -> &ContactTracker {
        &self.contacts
    }

    pub fn surface(&self) -> &Rc<S> {
        &self.surface
    }

    pub fn updates(&self) -> &UpdateScheduler<F> {
        &self.updates
    }

    /// A contact went down.
    pub fn handle_down(&mut self, event: &ContactEvent) {
        self.contacts.add(event);
        if self.phase.is_panning() {
            return;
        }
        let Some(anchor) = self.contacts.centroid() else {
            return;
        };
        let session = GestureSession {
            origin: self.transform.translation(),
            anchor,
            scale: self.transform.scale,
        };
        log::debug!("Pan started at {:?}", anchor);
        self.phase = GesturePhase::Panning(session);
    }

    /// A contact moved. Ignored unless a pan is in progress.
    pub fn handle_move(&mut self, event: &ContactEvent) {
        let GesturePhase::Panning(session) = self.phase else {
            return;
        };
        self.contacts.add(event);
        let Some(current) = self.contacts.centroid() else {
            return;
        };

        let scale = self.transform.scale;
        let candidate = session.origin + (current - session.anchor) / scale;
        let geometry = self.surface.measure();
        let translation = constrain_xy(
            candidate,
            self.transform.translation(),
            scale,
            self.updates.rendered_scale(),
            &self.config,
            &geometry,
        );

        if translation.x != self.transform.x || translation.y != self.transform.y {
            self.commit(Transform::new(translation.x, translation.y, scale));
        }
    }

    /// A contact was released, left the surface, or was cancelled.
    pub fn handle_up(&mut self, event: &ContactEvent) {
        self.contacts.remove(event);
        let GesturePhase::Panning(session) = self.phase else {
            return;
        };
        if self.contacts.is_empty() {
            log::debug!(
                "Pan ended at ({}, {}) from ({}, {}) at scale {}",
                self.transform.x,
                self.transform.y,
                session.origin.x,
                session.origin.y,
                session.scale
            );
            self.phase = GesturePhase::Idle;
        }
    }

    /// Zoom to `target`, re-validating the current translation at the new scale.
    ///
    /// With `disable_zoom` the current scale is kept as the target.
    pub fn zoom(&mut self, target: f64) {
        let target = if self.config.disable_zoom {
            self.transform.scale
        } else {
            target
        };

        // The measurement reflects the last rendered frame, which may lag
        // behind the committed scale.
        let rendered_scale = self.updates.rendered_scale();
        let geometry = self.surface.measure();
        let scale = constrain_scale(target, rendered_scale, &self.config, &geometry);

        let current = self.transform.translation();
        let translation = constrain_xy(
            current,
            current,
            scale,
            rendered_scale,
            &self.config,
            &geometry,
        );

        self.commit(Transform::new(translation.x, translation.y, scale));
    }

    fn commit(&mut self, transform: Transform) {
        log::trace!("Commit {:?}", transform);
        self.transform = transform;
        self.updates.schedule(&self.surface, transform);
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
