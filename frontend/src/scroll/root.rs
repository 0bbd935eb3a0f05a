use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Interval;
use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Window};
use yew::prelude::*;

use crate::config::{use_site_config, ScrollSettings};
use crate::error::{Result, SiteError};
use crate::motion::dom::query_all;
use crate::responsive::{DeviceClass, MOBILE_MAX_WIDTH};
use crate::scroll::registry::{use_trigger_registry, TriggerRegistry};
use crate::scroll::smoother::{parallax_offset, SmoothScroller};
use crate::scroll::touch::TouchGuard;

/// Frame length assumed for the first frame after an idle period.
const FIRST_FRAME_SECONDS: f64 = 1.0 / 60.0;

/// How often the content height is checked while no frame is running.
const HEIGHT_POLL_MS: u32 = 250;

thread_local! {
    static ROOT_CLAIMED: Cell<bool> = Cell::new(false);
}

/// Claims the single smooth-scrolling root of the application. Only the first
/// call returns true.
fn claim_root() -> bool {
    ROOT_CLAIMED.with(|claimed| !claimed.replace(true))
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    fn read(window: &Window) -> Self {
        let measure = |value: std::result::Result<wasm_bindgen::JsValue, _>| {
            value.ok().and_then(|value| value.as_f64()).unwrap_or_default()
        };
        Self {
            width: measure(window.inner_width()),
            height: measure(window.inner_height()),
        }
    }
}

/// Whether a resize from `previous` to `next` invalidates trigger thresholds.
/// Mobile browsers resize the viewport height when their toolbar collapses;
/// that alone is ignored when `ignore_mobile_resize` is set. Whether the
/// layout is mobile is judged on the new viewport, so rotations count.
pub fn needs_refresh(previous: Viewport, next: Viewport, ignore_mobile_resize: bool) -> bool {
    if previous == next {
        return false;
    }
    let is_mobile = next.width < MOBILE_MAX_WIDTH;
    !(is_mobile && ignore_mobile_resize && previous.width == next.width)
}

/// Marks a parallax layer; the value is its speed relative to the page.
pub const SPEED_ATTRIBUTE: &str = "data-speed";

/// Parses a layer speed, ignoring values that cannot move an element sanely.
pub fn parse_speed(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|speed| speed.is_finite())
}

struct ParallaxLayer {
    element: HtmlElement,
    speed: f64,
    /// Document offset of the element's centre without any parallax shift.
    rest_center: f64,
}

/// Drives the smoothed content offset from the native scroll position.
struct ScrollEngine {
    window: Window,
    wrapper: HtmlElement,
    content: HtmlElement,
    body: HtmlElement,
    registry: TriggerRegistry,
    settings: ScrollSettings,
    scroller: RefCell<SmoothScroller>,
    viewport: Cell<Viewport>,
    content_height: Cell<f64>,
    last_timestamp: Cell<Option<f64>>,
    layers: RefCell<Option<Vec<ParallaxLayer>>>,
    frame: RefCell<Option<AnimationFrame>>,
    listeners: RefCell<Vec<EventListener>>,
    height_watch: RefCell<Option<Interval>>,
    touch: RefCell<Option<TouchGuard>>,
}

impl ScrollEngine {
    fn start(
        wrapper: HtmlElement,
        content: HtmlElement,
        registry: TriggerRegistry,
        settings: ScrollSettings,
        device: DeviceClass,
    ) -> Result<Rc<Self>> {
        let window = web_sys::window().ok_or(SiteError::NoWindow)?;
        let body = window
            .document()
            .and_then(|document| document.body())
            .ok_or(SiteError::Detached("document body"))?;

        let wrapper_style = wrapper.style();
        wrapper_style.set_property("position", "fixed")?;
        wrapper_style.set_property("inset", "0")?;
        wrapper_style.set_property("overflow", "hidden")?;
        content.style().set_property("will-change", "transform")?;

        let mut scroller = SmoothScroller::new(settings.smooth);
        scroller.jump_to(window.scroll_y()?);

        let engine = Rc::new(Self {
            viewport: Cell::new(Viewport::read(&window)),
            window,
            wrapper,
            content,
            body,
            registry,
            settings,
            scroller: RefCell::new(scroller),
            content_height: Cell::new(0.0),
            last_timestamp: Cell::new(None),
            layers: RefCell::new(None),
            frame: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            height_watch: RefCell::new(None),
            touch: RefCell::new(None),
        });

        engine.listen();
        if device.is_ios {
            match TouchGuard::install(engine.registry.clone()) {
                Ok(guard) => *engine.touch.borrow_mut() = Some(guard),
                Err(err) => warn!("iOS touch guard unavailable: {}", err),
            }
        }

        engine.on_frame(None);
        info!(
            "Scroll root started (smooth {}s, effects {})",
            engine.settings.smooth, engine.settings.effects
        );
        Ok(engine)
    }

    fn listen(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let on_scroll = EventListener::new(&self.window, "scroll", move |_| {
            if let Some(engine) = weak.upgrade() {
                let target = engine.window.scroll_y().unwrap_or_default();
                engine.scroller.borrow_mut().set_target(target);
                engine.wake();
            }
        });

        let weak = Rc::downgrade(self);
        let on_resize = EventListener::new(&self.window, "resize", move |_| {
            if let Some(engine) = weak.upgrade() {
                engine.resized();
            }
        });

        self.listeners.borrow_mut().extend([on_scroll, on_resize]);

        // Images and route changes resize the content without any scroll
        let weak = Rc::downgrade(self);
        let watch = Interval::new(HEIGHT_POLL_MS, move || {
            if let Some(engine) = weak.upgrade() {
                if engine.sync_height() {
                    engine.wake();
                }
            }
        });
        *self.height_watch.borrow_mut() = Some(watch);
    }

    fn resized(self: &Rc<Self>) {
        let previous = self.viewport.get();
        let next = Viewport::read(&self.window);
        self.viewport.set(next);

        if needs_refresh(previous, next, self.settings.ignore_mobile_resize) {
            debug!("Viewport resized to {}x{}", next.width, next.height);
            self.layers.borrow_mut().take();
            self.registry.refresh();
        }
        self.wake();
    }

    /// Schedules a frame unless one is already pending.
    fn wake(self: &Rc<Self>) {
        if self.frame.borrow().is_some() {
            return;
        }
        let weak: Weak<Self> = Rc::downgrade(self);
        let frame = request_animation_frame(move |timestamp| {
            if let Some(engine) = weak.upgrade() {
                engine.on_frame(Some(timestamp));
            }
        });
        *self.frame.borrow_mut() = Some(frame);
    }

    fn on_frame(self: &Rc<Self>, timestamp: Option<f64>) {
        self.frame.borrow_mut().take();

        let dt = match (self.last_timestamp.get(), timestamp) {
            (Some(previous), Some(now)) => ((now - previous) / 1000.0).max(0.0),
            _ => FIRST_FRAME_SECONDS,
        };
        let (position, animating) = {
            let mut scroller = self.scroller.borrow_mut();
            let position = scroller.tick(dt);
            (position, scroller.is_animating())
        };

        let _ = self
            .content
            .style()
            .set_property("transform", &format!("translate3d(0px, {}px, 0px)", -position));
        self.sync_height();
        if self.settings.effects {
            self.apply_parallax(position);
        }

        self.registry.set_interpolating(animating);
        self.registry.update(position, self.viewport.get().height);

        if animating {
            self.last_timestamp.set(timestamp);
            self.wake();
        } else {
            self.last_timestamp.set(None);
        }
    }

    /// Mirrors the content height onto the body so the native scrollbar spans
    /// the whole page. Returns whether the height changed.
    fn sync_height(&self) -> bool {
        let height = self.content.offset_height() as f64;
        if height == self.content_height.get() {
            return false;
        }
        self.content_height.set(height);
        let _ = self.body.style().set_property("height", &format!("{}px", height));
        debug!("Content height changed to {}px", height);
        self.layers.borrow_mut().take();
        self.registry.refresh();
        true
    }

    fn apply_parallax(&self, position: f64) {
        let mut layers = self.layers.borrow_mut();
        let layers = layers.get_or_insert_with(|| self.measure_layers(position));
        let viewport_center = position + self.viewport.get().height / 2.0;
        for layer in layers.iter() {
            let offset = parallax_offset(layer.speed, viewport_center - layer.rest_center);
            let _ = layer
                .element
                .style()
                .set_property("transform", &format!("translate3d(0px, {}px, 0px)", offset));
        }
    }

    fn measure_layers(&self, position: f64) -> Vec<ParallaxLayer> {
        query_all(&self.content, &format!("[{}]", SPEED_ATTRIBUTE))
            .into_iter()
            .filter_map(|element| {
                let speed = parse_speed(&element.get_attribute(SPEED_ATTRIBUTE)?)?;
                let element = element.dyn_into::<HtmlElement>().ok()?;
                let _ = element.style().remove_property("transform");
                let rect = element.get_bounding_client_rect();
                Some(ParallaxLayer {
                    element,
                    speed,
                    rest_center: rect.top() + rect.height() / 2.0 + position,
                })
            })
            .collect()
    }
}

impl Drop for ScrollEngine {
    fn drop(&mut self) {
        self.frame.borrow_mut().take();
        self.listeners.borrow_mut().clear();
        self.height_watch.borrow_mut().take();
        self.touch.borrow_mut().take();
        for property in ["position", "inset", "overflow"] {
            let _ = self.wrapper.style().remove_property(property);
        }
        let _ = self.content.style().remove_property("transform");
        let _ = self.body.style().remove_property("height");
        self.registry.set_interpolating(false);
        debug!("Scroll root stopped at {}px", self.scroller.borrow().position());
    }
}

#[derive(Properties, PartialEq)]
pub struct ScrollRootProps {
    pub children: Children,
}

/// Single smooth-scrolling viewport around every page section.
#[function_component(ScrollRoot)]
pub fn scroll_root(props: &ScrollRootProps) -> Html {
    let config = use_site_config();
    let registry = use_trigger_registry();
    let wrapper = use_node_ref();
    let content = use_node_ref();
    let owns_root = *use_state(claim_root);

    {
        let wrapper = wrapper.clone();
        let content = content.clone();
        let settings = config.scroll.clone();
        use_effect_with_deps(
            move |_| {
                let engine = if owns_root {
                    let started = match (wrapper.cast::<HtmlElement>(), content.cast::<HtmlElement>()) {
                        (Some(wrapper), Some(content)) => ScrollEngine::start(
                            wrapper,
                            content,
                            registry.clone(),
                            settings,
                            DeviceClass::detect(),
                        ),
                        _ => Err(SiteError::Detached("scroll root")),
                    };
                    match started {
                        Ok(engine) => Some(engine),
                        Err(err) => {
                            warn!("Smooth scrolling unavailable: {}", err);
                            registry.set_passthrough(true);
                            None
                        }
                    }
                } else {
                    debug!("Scroll root already claimed, rendering in place");
                    None
                };
                move || drop(engine)
            },
            (),
        );
    }

    html! {
        <div ref={wrapper} id="smooth-wrapper">
            <div ref={content} id="smooth-content" class="app-container">
                { for props.children.iter() }
            </div>
        </div>
    }
}
