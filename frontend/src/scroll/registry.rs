use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use log::{debug, warn};
use web_sys::Element;
use yew::prelude::*;

use crate::scroll::threshold::{Bounds, Threshold};

pub type TriggerId = u64;

/// Measures where a trigger element currently sits in the document.
pub trait Probe {
    /// `None` while the element is not laid out.
    fn bounds(&self, scroll_y: f64) -> Option<Bounds>;
}

pub struct ElementProbe(pub Element);

impl Probe for ElementProbe {
    fn bounds(&self, scroll_y: f64) -> Option<Bounds> {
        if !self.0.is_connected() {
            return None;
        }
        let rect = self.0.get_bounding_client_rect();
        Some(Bounds {
            top: rect.top() + scroll_y,
            bottom: rect.bottom() + scroll_y,
        })
    }
}

enum Action {
    /// Fires once when the start threshold is crossed, then retires.
    Enter(Rc<dyn Fn()>),
    /// Reports progress in `0.0..=1.0` between start and end.
    Scrub {
        end: Threshold,
        on_progress: Rc<dyn Fn(f64)>,
    },
}

pub struct Trigger {
    start: Threshold,
    probe: Box<dyn Probe>,
    action: Action,
}

impl Trigger {
    pub fn enter(start: Threshold, probe: impl Probe + 'static, on_enter: impl Fn() + 'static) -> Self {
        Self {
            start,
            probe: Box::new(probe),
            action: Action::Enter(Rc::new(on_enter)),
        }
    }

    pub fn scrub(
        start: Threshold,
        end: Threshold,
        probe: impl Probe + 'static,
        on_progress: impl Fn(f64) + 'static,
    ) -> Self {
        Self {
            start,
            probe: Box::new(probe),
            action: Action::Scrub {
                end,
                on_progress: Rc::new(on_progress),
            },
        }
    }
}

struct Entry {
    trigger: Trigger,
    /// Cached scroll offsets of start and end; cleared by a refresh.
    range: Option<(f64, f64)>,
    last_progress: Option<f64>,
}

impl Entry {
    fn measure(&self, scroll_y: f64, viewport_height: f64) -> Option<(f64, f64)> {
        let bounds = self.trigger.probe.bounds(scroll_y)?;
        let start = self.trigger.start.scroll_offset(bounds, viewport_height);
        let end = match &self.trigger.action {
            Action::Enter(_) => start,
            Action::Scrub { end, .. } => end.scroll_offset(bounds, viewport_height),
        };
        Some((start, end))
    }
}

#[derive(Default)]
struct RegistryState {
    next_id: TriggerId,
    entries: BTreeMap<TriggerId, Entry>,
    scroll_y: f64,
    viewport_height: f64,
    interpolating: bool,
    passthrough: bool,
}

/// Process-wide set of scroll triggers, shared through a context provider.
///
/// Components never touch the set directly: [`TriggerRegistry::register`]
/// hands back a [`TriggerHandle`] that removes exactly that trigger when it is
/// released or dropped.
#[derive(Clone, Default)]
pub struct TriggerRegistry {
    state: Rc<RefCell<RegistryState>>,
}

impl PartialEq for TriggerRegistry {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl TriggerRegistry {
    pub fn register(&self, trigger: Trigger) -> TriggerHandle {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.entries.insert(
                id,
                Entry {
                    trigger,
                    range: None,
                    last_progress: None,
                },
            );
            id
        };
        debug!("Registered scroll trigger {}", id);

        let handle = TriggerHandle {
            id,
            registry: Rc::downgrade(&self.state),
            released: Cell::new(false),
        };
        // Content already past its threshold reveals right away
        self.evaluate();
        handle
    }

    /// Feeds the current (smoothed) scroll position and viewport height.
    pub fn update(&self, scroll_y: f64, viewport_height: f64) {
        {
            let mut state = self.state.borrow_mut();
            state.scroll_y = scroll_y;
            state.viewport_height = viewport_height;
        }
        self.evaluate();
    }

    /// Drops every cached threshold so the next evaluation measures against
    /// the current layout.
    pub fn refresh(&self) {
        let count = {
            let mut state = self.state.borrow_mut();
            for entry in state.entries.values_mut() {
                entry.range = None;
            }
            state.entries.len()
        };
        debug!("Refreshed {} scroll triggers", count);
        self.evaluate();
    }

    /// Fires every pending entrance immediately and pins scrubs at the end.
    /// Used when no scroll root is driving the registry.
    pub fn set_passthrough(&self, passthrough: bool) {
        self.state.borrow_mut().passthrough = passthrough;
        if passthrough {
            warn!("Scroll triggers running in passthrough mode");
        }
        self.evaluate();
    }

    pub fn set_interpolating(&self, interpolating: bool) {
        self.state.borrow_mut().interpolating = interpolating;
    }

    /// Whether the smoothed scroll position is still catching up.
    pub fn is_interpolating(&self) -> bool {
        self.state.borrow().interpolating
    }

    pub fn active_count(&self) -> usize {
        self.state.borrow().entries.len()
    }

    /// Application shutdown only: components release their own handles.
    pub fn kill_all(&self) {
        let killed = std::mem::take(&mut self.state.borrow_mut().entries);
        debug!("Killed {} scroll triggers", killed.len());
    }

    fn evaluate(&self) {
        let mut entered: Vec<Rc<dyn Fn()>> = Vec::new();
        let mut progressed: Vec<(Rc<dyn Fn(f64)>, f64)> = Vec::new();

        {
            let mut state = self.state.borrow_mut();
            let RegistryState {
                entries,
                scroll_y,
                viewport_height,
                passthrough,
                ..
            } = &mut *state;

            if !*passthrough && *viewport_height <= 0.0 {
                return;
            }

            let mut retired = Vec::new();
            for (id, entry) in entries.iter_mut() {
                let position = if *passthrough {
                    None
                } else {
                    if entry.range.is_none() {
                        entry.range = entry.measure(*scroll_y, *viewport_height);
                    }
                    match entry.range {
                        Some(range) => Some(range),
                        None => continue,
                    }
                };

                match &entry.trigger.action {
                    Action::Enter(on_enter) => {
                        let crossed = position.map_or(true, |(start, _)| *scroll_y >= start);
                        if crossed {
                            entered.push(on_enter.clone());
                            retired.push(*id);
                        }
                    }
                    Action::Scrub { on_progress, .. } => {
                        let progress = position
                            .map_or(1.0, |(start, end)| scrub_progress(*scroll_y, start, end));
                        if entry.last_progress != Some(progress) {
                            entry.last_progress = Some(progress);
                            progressed.push((on_progress.clone(), progress));
                        }
                    }
                }
            }

            for id in retired {
                entries.remove(&id);
            }
        }

        // Callbacks run without the borrow held so they may register or release
        for on_enter in entered {
            on_enter();
        }
        for (on_progress, progress) in progressed {
            on_progress(progress);
        }
    }
}

fn scrub_progress(scroll_y: f64, start: f64, end: f64) -> f64 {
    if end <= start {
        return if scroll_y >= start { 1.0 } else { 0.0 };
    }
    ((scroll_y - start) / (end - start)).clamp(0.0, 1.0)
}

/// Ownership of one registered trigger.
pub struct TriggerHandle {
    id: TriggerId,
    registry: Weak<RefCell<RegistryState>>,
    released: Cell<bool>,
}

impl TriggerHandle {
    /// Removes the trigger if it is still registered. Returns whether this
    /// call removed it; repeated calls are no-ops.
    pub fn release(&self) -> bool {
        if self.released.replace(true) {
            return false;
        }
        let Some(state) = self.registry.upgrade() else {
            return false;
        };
        let removed = state.borrow_mut().entries.remove(&self.id).is_some();
        removed
    }
}

impl Drop for TriggerHandle {
    fn drop(&mut self) {
        self.release();
    }
}

#[hook]
pub fn use_trigger_registry() -> TriggerRegistry {
    match use_context::<TriggerRegistry>() {
        Some(registry) => registry,
        None => {
            warn!("No TriggerRegistry in context, triggers will not be driven");
            TriggerRegistry::default()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Fixed-position stand-in for a laid out element.
    #[derive(Clone)]
    pub(crate) struct FixedProbe(pub Rc<Cell<Option<Bounds>>>);

    impl FixedProbe {
        pub(crate) fn at(top: f64, bottom: f64) -> Self {
            Self(Rc::new(Cell::new(Some(Bounds { top, bottom }))))
        }

        pub(crate) fn detached() -> Self {
            Self(Rc::new(Cell::new(None)))
        }

        pub(crate) fn move_to(&self, top: f64, bottom: f64) {
            self.0.set(Some(Bounds { top, bottom }));
        }
    }

    impl Probe for FixedProbe {
        fn bounds(&self, _scroll_y: f64) -> Option<Bounds> {
            self.0.get()
        }
    }

    fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = count.clone();
        (count, move || inner.set(inner.get() + 1))
    }

    #[test]
    fn enter_fires_once_when_threshold_crossed() {
        let registry = TriggerRegistry::default();
        registry.update(0.0, 1000.0);
        let (fired, on_enter) = counter();
        let _handle = registry.register(Trigger::enter(
            Threshold::top(0.8),
            FixedProbe::at(2000.0, 2500.0),
            on_enter,
        ));

        registry.update(1100.0, 1000.0);
        assert_eq!(fired.get(), 0);

        registry.update(1200.0, 1000.0);
        assert_eq!(fired.get(), 1);

        // scrolling back and forth does not replay it
        registry.update(0.0, 1000.0);
        registry.update(1500.0, 1000.0);
        assert_eq!(fired.get(), 1);
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn already_visible_content_fires_on_register() {
        let registry = TriggerRegistry::default();
        registry.update(0.0, 900.0);
        let (fired, on_enter) = counter();
        let _handle = registry.register(Trigger::enter(
            Threshold::DESKTOP_ENTRANCE,
            FixedProbe::at(100.0, 600.0),
            on_enter,
        ));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn nothing_fires_before_viewport_is_known() {
        let registry = TriggerRegistry::default();
        let (fired, on_enter) = counter();
        let _handle = registry.register(Trigger::enter(
            Threshold::top(0.85),
            FixedProbe::at(0.0, 100.0),
            on_enter,
        ));
        assert_eq!(fired.get(), 0);

        registry.update(0.0, 800.0);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn release_removes_only_own_trigger() {
        let registry = TriggerRegistry::default();
        registry.update(0.0, 800.0);
        let first = registry.register(Trigger::enter(
            Threshold::top(0.85),
            FixedProbe::at(5000.0, 5100.0),
            || {},
        ));
        let second = registry.register(Trigger::enter(
            Threshold::top(0.85),
            FixedProbe::at(6000.0, 6100.0),
            || {},
        ));
        assert_eq!(registry.active_count(), 2);

        assert!(first.release());
        assert_eq!(registry.active_count(), 1);

        // a second release must not touch anyone else's entry
        assert!(!first.release());
        assert_eq!(registry.active_count(), 1);

        drop(second);
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn release_after_fire_is_a_noop() {
        let registry = TriggerRegistry::default();
        registry.update(0.0, 800.0);
        let handle = registry.register(Trigger::enter(
            Threshold::top(0.85),
            FixedProbe::at(0.0, 100.0),
            || {},
        ));
        assert_eq!(registry.active_count(), 0);
        assert!(!handle.release());
    }

    #[test]
    fn stale_geometry_needs_refresh() {
        let registry = TriggerRegistry::default();
        registry.update(0.0, 1000.0);
        let probe = FixedProbe::at(1000.0, 1200.0);
        let (fired, on_enter) = counter();
        let _handle = registry.register(Trigger::enter(Threshold::top(0.8), probe.clone(), on_enter));

        // images above finished loading and pushed the section down
        probe.move_to(3000.0, 3200.0);
        registry.update(300.0, 1000.0);
        assert_eq!(fired.get(), 1, "cached threshold still fires at the old position");

        registry.update(0.0, 1000.0);
        let probe = FixedProbe::at(1000.0, 1200.0);
        let (fired, on_enter) = counter();
        let _handle = registry.register(Trigger::enter(Threshold::top(0.8), probe.clone(), on_enter));
        probe.move_to(3000.0, 3200.0);
        registry.refresh();
        registry.update(300.0, 1000.0);
        assert_eq!(fired.get(), 0);
        registry.update(2200.0, 1000.0);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn detached_probe_is_measured_later() {
        let registry = TriggerRegistry::default();
        registry.update(500.0, 1000.0);
        let probe = FixedProbe::detached();
        let (fired, on_enter) = counter();
        let _handle = registry.register(Trigger::enter(Threshold::top(0.8), probe.clone(), on_enter));
        assert_eq!(fired.get(), 0);

        probe.move_to(600.0, 800.0);
        registry.update(500.0, 1000.0);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn scrub_reports_clamped_progress() {
        let registry = TriggerRegistry::default();
        registry.update(0.0, 1000.0);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _handle = registry.register(Trigger::scrub(
            Threshold::new(crate::scroll::threshold::Edge::Top, 0.5),
            Threshold::new(crate::scroll::threshold::Edge::Bottom, 0.5),
            FixedProbe::at(1000.0, 2000.0),
            move |progress| sink.borrow_mut().push(progress),
        ));

        registry.update(1000.0, 1000.0);
        registry.update(1000.0, 1000.0);
        registry.update(3000.0, 1000.0);

        let seen = seen.borrow();
        // start=500, end=1500
        assert_eq!(*seen, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn passthrough_reveals_everything() {
        let registry = TriggerRegistry::default();
        let (fired, on_enter) = counter();
        let progress = Rc::new(Cell::new(0.0));
        let sink = progress.clone();
        let _enter = registry.register(Trigger::enter(
            Threshold::top(0.85),
            FixedProbe::detached(),
            on_enter,
        ));
        let _scrub = registry.register(Trigger::scrub(
            Threshold::top(0.5),
            Threshold::top(0.1),
            FixedProbe::detached(),
            move |p| sink.set(p),
        ));

        registry.set_passthrough(true);
        assert_eq!(fired.get(), 1);
        assert_eq!(progress.get(), 1.0);
    }

    #[test]
    fn callbacks_may_register_more_triggers() {
        let registry = TriggerRegistry::default();
        registry.update(0.0, 800.0);
        let nested: Rc<RefCell<Option<TriggerHandle>>> = Rc::new(RefCell::new(None));
        let (inner_fired, on_inner) = counter();
        let on_inner = Rc::new(on_inner);

        let _outer = {
            let registry_for_callback = registry.clone();
            let nested = nested.clone();
            registry.register(Trigger::enter(
                Threshold::top(0.85),
                FixedProbe::at(0.0, 10.0),
                move || {
                    let on_inner = on_inner.clone();
                    let handle = registry_for_callback.register(Trigger::enter(
                        Threshold::top(0.85),
                        FixedProbe::at(0.0, 10.0),
                        move || on_inner(),
                    ));
                    *nested.borrow_mut() = Some(handle);
                },
            ))
        };

        assert_eq!(inner_fired.get(), 1);
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn handle_outliving_registry_is_harmless() {
        let handle = {
            let registry = TriggerRegistry::default();
            registry.register(Trigger::enter(Threshold::top(0.85), FixedProbe::detached(), || {}))
        };
        assert!(!handle.release());
    }

    #[test]
    fn kill_all_clears_everything() {
        let registry = TriggerRegistry::default();
        let handles: Vec<_> = (0..3)
            .map(|_| {
                registry.register(Trigger::enter(
                    Threshold::top(0.85),
                    FixedProbe::detached(),
                    || {},
                ))
            })
            .collect();
        assert_eq!(registry.active_count(), 3);
        registry.kill_all();
        assert_eq!(registry.active_count(), 0);
        assert!(handles.iter().all(|handle| !handle.release()));
    }

    #[test]
    fn interpolating_flag_round_trips() {
        let registry = TriggerRegistry::default();
        assert!(!registry.is_interpolating());
        registry.set_interpolating(true);
        assert!(registry.clone().is_interpolating());
    }
}
