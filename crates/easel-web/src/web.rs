//! WebAssembly entry point and the exported `PanZoom` controller.

use crate::dom::{AnimationFrames, DomSurface, contact_event, detect_capabilities};
use easel_core::{
    Config, EaselError, EaselResult, EventTable, EventTarget, GestureEvent, InputCapabilities,
    PartialConfig, Viewport,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Event, HtmlElement, Window};

type DomViewport = Viewport<DomSurface, AnimationFrames>;
type Listener = Closure<dyn FnMut(Event)>;

/// DOM element as a target for the event table.
struct DomTarget<'a>(&'a web_sys::EventTarget);

impl EventTarget for DomTarget<'_> {
    type Handler = js_sys::Function;

    fn add_listener(&self, event_name: &'static str, handler: &js_sys::Function, passive: bool) {
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        if let Err(e) = self
            .0
            .add_event_listener_with_callback_and_add_event_listener_options(
                event_name, handler, &options,
            )
        {
            log::warn!("Failed to listen for {}: {:?}", event_name, e);
        }
    }

    fn remove_listener(&self, event_name: &'static str, handler: &js_sys::Function) {
        if let Err(e) = self.0.remove_event_listener_with_callback(event_name, handler) {
            log::warn!("Failed to stop listening for {}: {:?}", event_name, e);
        }
    }
}

/// Handlers currently attached to the surface element.
struct Bindings {
    down: Listener,
    moved: Listener,
    up: Listener,
}

impl Bindings {
    fn each(&self) -> [(GestureEvent, &Listener); 3] {
        [
            (GestureEvent::Down, &self.down),
            (GestureEvent::Move, &self.moved),
            (GestureEvent::Up, &self.up),
        ]
    }
}

/// Pan and zoom controller for one element.
#[wasm_bindgen]
pub struct PanZoom {
    viewport: Rc<RefCell<DomViewport>>,
    element: HtmlElement,
    table: EventTable,
    bindings: Option<Bindings>,
}

#[wasm_bindgen]
impl PanZoom {
    /// Start pan/zoom on `element`. `config` is an optional plain object of
    /// partial options (`{ maxScale: 8, disableY: true }`).
    #[wasm_bindgen(constructor)]
    pub fn new(element: Option<HtmlElement>, config: JsValue) -> Result<PanZoom, JsError> {
        let window = web_sys::window().ok_or_else(|| JsError::new("No window available"))?;
        let capabilities = detect_capabilities(&window);
        Self::attach(element, read_config(config), capabilities, window)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Zoom to an absolute scale.
    pub fn zoom(&self, scale: f64) {
        match self.viewport.try_borrow_mut() {
            Ok(mut viewport) => viewport.zoom(scale),
            Err(_) => log::warn!("Zoom ignored while a gesture is being handled"),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.viewport.borrow().x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.viewport.borrow().y()
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.viewport.borrow().scale()
    }

    /// Attach the gesture handlers. Does nothing if already bound.
    pub fn bind(&mut self) {
        if self.bindings.is_some() {
            return;
        }
        let bindings = Bindings {
            down: self.listener(|viewport, event| viewport.handle_down(event)),
            moved: self.listener(|viewport, event| viewport.handle_move(event)),
            up: self.listener(|viewport, event| viewport.handle_up(event)),
        };
        let target = DomTarget(self.element.as_ref());
        for (gesture, listener) in bindings.each() {
            self.table
                .subscribe(&target, gesture, listener.as_ref().unchecked_ref());
        }
        log::debug!("Bound {:?} handlers", self.table.mechanism());
        self.bindings = Some(bindings);
    }

    /// Detach the gesture handlers. Frames already requested still run.
    pub fn unbind(&mut self) {
        let Some(bindings) = self.bindings.take() else {
            return;
        };
        let target = DomTarget(self.element.as_ref());
        for (gesture, listener) in bindings.each() {
            self.table
                .unsubscribe(&target, gesture, listener.as_ref().unchecked_ref());
        }
        log::debug!("Unbound handlers");
    }

    #[wasm_bindgen(getter, js_name = isBound)]
    pub fn is_bound(&self) -> bool {
        self.bindings.is_some()
    }
}

impl PanZoom {
    /// Attach with explicit configuration and capabilities.
    ///
    /// Fails with [`EaselError::MissingSurface`] before any styling or
    /// binding when `element` is `None`.
    pub fn attach(
        element: Option<HtmlElement>,
        config: Config,
        capabilities: InputCapabilities,
        window: Window,
    ) -> EaselResult<Self> {
        let element = element.ok_or(EaselError::MissingSurface)?;
        let surface = DomSurface::new(element.clone(), &window)?;
        let viewport =
            Viewport::initialize(Some(Rc::new(surface)), AnimationFrames::new(window), config)?;

        let mut pan_zoom = Self {
            viewport: Rc::new(RefCell::new(viewport)),
            element,
            table: EventTable::detect(capabilities),
            bindings: None,
        };
        pan_zoom.bind();
        Ok(pan_zoom)
    }

    /// Shared handle to the engine, for hosts driving it from Rust.
    pub fn viewport(&self) -> Rc<RefCell<DomViewport>> {
        self.viewport.clone()
    }

    fn listener<H>(&self, handle: H) -> Listener
    where
        H: Fn(&mut DomViewport, &easel_core::ContactEvent) + 'static,
    {
        let viewport = self.viewport.clone();
        let mechanism = self.table.mechanism();
        Closure::wrap(Box::new(move |event: Event| {
            let contact = contact_event(mechanism, &event);
            match viewport.try_borrow_mut() {
                Ok(mut viewport) => handle(&mut viewport, &contact),
                Err(_) => log::warn!("Dropped {} while the viewport was busy", event.type_()),
            }
        }) as Box<dyn FnMut(Event)>)
    }
}

impl Drop for PanZoom {
    fn drop(&mut self) {
        self.unbind();
    }
}

/// Read a partial configuration object, falling back to defaults when it
/// cannot be read at all.
fn read_config(value: JsValue) -> Config {
    if value.is_undefined() || value.is_null() {
        return Config::default();
    }
    match serde_wasm_bindgen::from_value::<PartialConfig>(value) {
        Ok(partial) => Config::merged(&partial),
        Err(e) => {
            log::warn!("Ignoring unreadable configuration: {}", e);
            Config::default()
        }
    }
}

/// Install the panic hook and console logger.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // The host page may already have installed a logger.
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("Easel ready");
    }
}
