use gloo_events::{EventListener, EventListenerOptions};
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement};

use crate::error::{Result, SiteError};
use crate::scroll::registry::TriggerRegistry;

/// Whether a `touchmove` should be swallowed. Native touch scrolling is left
/// alone except while the smoothed position is still catching up.
pub fn should_intercept(registry: &TriggerRegistry) -> bool {
    registry.is_interpolating()
}

/// iOS scroll normalisation, installed by the scroll root on iOS devices only.
/// Dropping the guard removes the listener and restores the overscroll style.
pub struct TouchGuard {
    root: HtmlElement,
    _listener: EventListener,
}

impl TouchGuard {
    pub fn install(registry: TriggerRegistry) -> Result<Self> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(SiteError::NoWindow)?;
        let root = document
            .document_element()
            .ok_or(SiteError::Detached("document element"))?;
        let root = root
            .dyn_into::<HtmlElement>()
            .map_err(|_| SiteError::Detached("document element"))?;

        // Keeps rubber-band overscroll from fighting the smoothed content
        root.style().set_property("overscroll-behavior", "none")?;

        let listener = EventListener::new_with_options(
            &document,
            "touchmove",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                if should_intercept(&registry) {
                    event.prevent_default();
                }
            },
        );
        debug!("Installed iOS touch guard");

        Ok(Self {
            root,
            _listener: listener,
        })
    }
}

impl Drop for TouchGuard {
    fn drop(&mut self) {
        let _ = self.root.style().remove_property("overscroll-behavior");
    }
}
