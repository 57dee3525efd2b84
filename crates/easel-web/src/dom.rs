//! DOM implementations of the engine's host collaborators.

use crate::css::StyleResolver;
use easel_core::{
    ContactEvent, EaselError, EaselResult, FrameScheduler, Geometry, InputCapabilities,
    InputMechanism, Surface, Transform,
};
use kurbo::{Point, Size};
use std::cell::Cell;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CssStyleDeclaration, Event, HtmlElement, MouseEvent, PointerEvent, TouchEvent, Window,
};

type Probe = Box<dyn Fn(&str) -> bool>;

/// An element and its parent, styled through a per-instance prefix resolver.
pub struct DomSurface {
    element: HtmlElement,
    parent: HtmlElement,
    styles: StyleResolver<Probe>,
    applied_scale: Cell<f64>,
}

impl DomSurface {
    /// Wrap `element`. The element must already be attached to a parent.
    pub fn new(element: HtmlElement, window: &Window) -> EaselResult<Self> {
        let Some(parent) = element
            .parent_element()
            .and_then(|p| p.dyn_into::<HtmlElement>().ok())
        else {
            log::warn!("Surface element has no parent element to pan within");
            return Err(EaselError::MissingSurface);
        };

        let probe_style = window
            .document()
            .and_then(|doc| doc.create_element("div").ok())
            .and_then(|div| div.dyn_into::<HtmlElement>().ok())
            .map(|div| div.style());
        let probe: Probe = match probe_style {
            Some(style) => Box::new(move |name: &str| {
                js_sys::Reflect::has(&style, &JsValue::from_str(name)).unwrap_or(false)
            }),
            None => Box::new(|_: &str| true),
        };

        Ok(Self {
            element,
            parent,
            styles: StyleResolver::new(probe),
            applied_scale: Cell::new(1.0),
        })
    }

    fn set(&self, style: &CssStyleDeclaration, property: &str, value: &str) {
        let name = self.styles.resolve(property);
        if let Err(e) = js_sys::Reflect::set(style, &JsValue::from_str(&name), &JsValue::from_str(value)) {
            log::warn!("Failed to set style {}: {:?}", name, e);
        }
    }
}

impl Surface for DomSurface {
    fn measure(&self) -> Geometry {
        // Layout size ignores transforms, so a running transition cannot
        // leak an in-between scale into the measurement.
        let scale = self.applied_scale.get();
        let parent = self.parent.get_bounding_client_rect();
        Geometry::new(
            Size::new(
                f64::from(self.element.offset_width()) * scale,
                f64::from(self.element.offset_height()) * scale,
            ),
            Size::new(parent.width(), parent.height()),
        )
    }

    fn apply_style(&self, property: &str, value: &str) {
        self.set(&self.element.style(), property, value);
    }

    fn apply_parent_style(&self, property: &str, value: &str) {
        self.set(&self.parent.style(), property, value);
    }

    fn apply_transform(&self, transform: Transform) {
        self.applied_scale.set(transform.scale);
        self.apply_style("transform", &transform.to_css());
    }

    fn style_name(&self, property: &str) -> String {
        self.styles.resolve(property)
    }
}

/// Frame scheduling through `requestAnimationFrame`.
pub struct AnimationFrames {
    window: Window,
}

impl AnimationFrames {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&self, callback: Box<dyn FnOnce()>) {
        let closure = Closure::once_into_js(move || callback());
        if let Err(e) = self.window.request_animation_frame(closure.unchecked_ref()) {
            log::warn!("requestAnimationFrame failed: {:?}", e);
        }
    }
}

/// Which event constructors the window exposes.
pub fn detect_capabilities(window: &Window) -> InputCapabilities {
    let has = |name: &str| {
        js_sys::Reflect::get(window, &JsValue::from_str(name))
            .map(|v| !v.is_undefined())
            .unwrap_or(false)
    };
    InputCapabilities {
        pointer_events: has("PointerEvent"),
        touch_events: has("TouchEvent"),
    }
}

/// Convert a raw DOM event into a canonical contact event.
///
/// The table's mechanism decides how the event is read, so constructors the
/// browser lacks are never referenced.
pub fn contact_event(mechanism: InputMechanism, event: &Event) -> ContactEvent {
    match mechanism {
        InputMechanism::Touch => {
            let touches = event.unchecked_ref::<TouchEvent>().touches();
            let points = (0..touches.length())
                .filter_map(|i| touches.get(i))
                .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())))
                .collect();
            ContactEvent::Touches(points)
        }
        InputMechanism::Pointer => {
            let pointer = event.unchecked_ref::<PointerEvent>();
            ContactEvent::pointer(
                pointer.pointer_id(),
                Point::new(f64::from(pointer.client_x()), f64::from(pointer.client_y())),
            )
        }
        InputMechanism::Mouse => {
            let mouse = event.unchecked_ref::<MouseEvent>();
            ContactEvent::mouse(Point::new(
                f64::from(mouse.client_x()),
                f64::from(mouse.client_y()),
            ))
        }
    }
}
