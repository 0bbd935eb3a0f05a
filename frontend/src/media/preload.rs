use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use log::debug;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlImageElement;
use yew::prelude::*;

/// Outcome of preloading a fixed set of images.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreloadState {
    expected: Vec<&'static str>,
    outcomes: BTreeMap<&'static str, bool>,
}

impl PreloadState {
    pub fn new(sources: &[&'static str]) -> Self {
        Self {
            expected: sources.to_vec(),
            outcomes: BTreeMap::new(),
        }
    }

    /// Records the first outcome of `src`. Later outcomes and unknown sources
    /// are ignored; returns whether anything changed.
    pub fn settle(&mut self, src: &'static str, loaded: bool) -> bool {
        if !self.expected.contains(&src) || self.outcomes.contains_key(src) {
            return false;
        }
        self.outcomes.insert(src, loaded);
        true
    }

    /// Every image either loaded or failed. An empty set is settled from the start.
    pub fn all_settled(&self) -> bool {
        self.expected.iter().all(|src| self.outcomes.contains_key(src))
    }

    pub fn loaded(&self, src: &str) -> bool {
        self.outcomes.get(src).copied().unwrap_or(false)
    }
}

pub enum PreloadAction {
    Settled { src: &'static str, loaded: bool },
}

impl Reducible for PreloadState {
    type Action = PreloadAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            PreloadAction::Settled { src, loaded } => {
                let mut next = (*self).clone();
                if !next.settle(src, loaded) {
                    return self;
                }
                if next.all_settled() {
                    debug!("Preloaded {} images", next.expected.len());
                }
                Rc::new(next)
            }
        }
    }
}

async fn decode(src: &str) -> bool {
    let Ok(image) = HtmlImageElement::new() else {
        return false;
    };
    image.set_src(src);
    match JsFuture::from(image.decode()).await {
        Ok(_) => true,
        Err(_) => {
            debug!("Preloading {} failed", src);
            false
        }
    }
}

/// Loads `sources` in the background and reports which of them settled.
#[hook]
pub fn use_image_preloader(sources: &'static [&'static str]) -> PreloadState {
    let state = use_reducer(|| PreloadState::new(sources));

    {
        let dispatcher = state.dispatcher();
        use_effect_with_deps(
            move |sources: &&'static [&'static str]| {
                let alive = Rc::new(Cell::new(true));
                for &src in sources.iter() {
                    let dispatcher = dispatcher.clone();
                    let alive = alive.clone();
                    spawn_local(async move {
                        let loaded = decode(src).await;
                        // The component may be gone by the time decoding finishes
                        if alive.get() {
                            dispatcher.dispatch(PreloadAction::Settled { src, loaded });
                        }
                    });
                }
                move || alive.set(false)
            },
            sources,
        );
    }

    (*state).clone()
}
