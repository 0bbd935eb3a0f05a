use gloo_timers::callback::Timeout;
use log::debug;

use crate::scroll::registry::{TriggerHandle, TriggerRegistry};

/// A running (or staged) animation that can be started and discarded.
pub trait Playback {
    fn play(&self);
    /// Stops the animation and drops its effect on the element.
    fn cancel(&self);
}

impl Playback for web_sys::Animation {
    fn play(&self) {
        let _ = web_sys::Animation::play(self);
    }

    fn cancel(&self) {
        web_sys::Animation::cancel(self);
    }
}

/// Everything one section created while building its animations.
///
/// Reverting cancels the animations, releases the section's scroll
/// triggers and drops pending timers; it happens at most once, and at the
/// latest when the scope is dropped.
pub struct AnimationScope<P: Playback = web_sys::Animation> {
    label: &'static str,
    animations: Vec<P>,
    triggers: Vec<TriggerHandle>,
    timers: Vec<Timeout>,
    reverted: bool,
}

impl<P: Playback> AnimationScope<P> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            animations: Vec::new(),
            triggers: Vec::new(),
            timers: Vec::new(),
            reverted: false,
        }
    }

    pub fn track(&mut self, animation: P) {
        self.animations.push(animation);
    }

    pub fn bind(&mut self, trigger: TriggerHandle) {
        self.triggers.push(trigger);
    }

    /// Schedules a recomputation of every trigger threshold, for content whose
    /// height settles after images finish loading.
    pub fn refresh_after(&mut self, registry: &TriggerRegistry, millis: u32) {
        let registry = registry.clone();
        self.timers.push(Timeout::new(millis, move || registry.refresh()));
    }

    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    /// Returns whether this call did the teardown.
    pub fn revert(&mut self) -> bool {
        if self.reverted {
            return false;
        }
        self.reverted = true;

        // Dropping a Timeout clears it
        self.timers.clear();
        let released = self
            .triggers
            .drain(..)
            .filter(|trigger| trigger.release())
            .count();
        for animation in self.animations.drain(..) {
            animation.cancel();
        }
        debug!("Reverted {} animations ({} triggers released)", self.label, released);
        true
    }
}

impl<P: Playback> Drop for AnimationScope<P> {
    fn drop(&mut self) {
        self.revert();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::scroll::registry::tests::FixedProbe;
    use crate::scroll::registry::Trigger;
    use crate::scroll::threshold::Threshold;

    #[derive(Clone, Default)]
    pub(crate) struct FakeAnimation {
        pub plays: Rc<Cell<u32>>,
        pub cancels: Rc<Cell<u32>>,
    }

    impl Playback for FakeAnimation {
        fn play(&self) {
            self.plays.set(self.plays.get() + 1);
        }

        fn cancel(&self) {
            self.cancels.set(self.cancels.get() + 1);
        }
    }

    fn scope_with_trigger(registry: &TriggerRegistry, animation: &FakeAnimation) -> AnimationScope<FakeAnimation> {
        let mut scope = AnimationScope::new("test");
        scope.track(animation.clone());
        let staged = animation.clone();
        scope.bind(registry.register(Trigger::enter(
            Threshold::top(0.85),
            FixedProbe::at(4000.0, 4200.0),
            move || staged.play(),
        )));
        scope
    }

    #[test]
    fn revert_cancels_and_releases_once() {
        let registry = TriggerRegistry::default();
        registry.update(0.0, 800.0);
        let animation = FakeAnimation::default();
        let mut scope = scope_with_trigger(&registry, &animation);
        assert_eq!(registry.active_count(), 1);
        assert_eq!(scope.animation_count(), 1);
        assert_eq!(scope.trigger_count(), 1);

        assert!(scope.revert());
        assert_eq!(registry.active_count(), 0);
        assert_eq!(animation.cancels.get(), 1);

        assert!(!scope.revert());
        drop(scope);
        assert_eq!(animation.cancels.get(), 1);
        assert_eq!(animation.plays.get(), 0);
    }

    #[test]
    fn drop_reverts() {
        let registry = TriggerRegistry::default();
        registry.update(0.0, 800.0);
        let animation = FakeAnimation::default();
        let scope = scope_with_trigger(&registry, &animation);
        drop(scope);
        assert_eq!(registry.active_count(), 0);
        assert_eq!(animation.cancels.get(), 1);
    }

    #[test]
    fn revert_leaves_other_scopes_alone() {
        let registry = TriggerRegistry::default();
        registry.update(0.0, 800.0);
        let first = FakeAnimation::default();
        let second = FakeAnimation::default();
        let mut a = scope_with_trigger(&registry, &first);
        let b = scope_with_trigger(&registry, &second);

        a.revert();
        assert_eq!(registry.active_count(), 1);
        assert_eq!(second.cancels.get(), 0);

        registry.update(4000.0, 800.0);
        assert_eq!(second.plays.get(), 1);
        assert_eq!(first.plays.get(), 0);
        drop(b);
    }
}
