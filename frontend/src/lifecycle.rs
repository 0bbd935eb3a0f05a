use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use log::debug;
use yew::prelude::*;

use crate::motion::ease::Ease;
use crate::motion::scope::AnimationScope;
use crate::motion::timeline::Timeline;
use crate::motion::tween::{Pose, Tween};
use crate::responsive::MotionProfile;
use crate::scroll::registry::{use_trigger_registry, TriggerRegistry};

/// Delay between the frame callback and the next construction attempt.
pub const RETRY_DELAY_MS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Waiting for the section's elements to attach.
    Pending,
    Ready,
    /// Terminal: the owning component unmounted.
    Cancelled,
}

#[derive(Debug)]
pub struct ReadinessGate {
    state: Readiness,
    attempts: u32,
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self {
            state: Readiness::Pending,
            attempts: 0,
        }
    }
}

impl ReadinessGate {
    pub fn state(&self) -> Readiness {
        self.state
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Records a construction attempt.
    pub fn observe(&mut self, attached: bool) -> Readiness {
        if self.state == Readiness::Pending {
            self.attempts += 1;
            if attached {
                self.state = Readiness::Ready;
            }
        }
        self.state
    }

    pub fn cancel(&mut self) {
        self.state = Readiness::Cancelled;
    }

    pub fn is_live(&self) -> bool {
        self.state != Readiness::Cancelled
    }

    /// Still waiting after at least one deferred attempt.
    pub fn abandoned(&self) -> bool {
        self.state == Readiness::Pending && self.attempts > 0
    }
}

/// Result of one attempt at building a section's animations.
pub enum Entrance {
    Built(AnimationScope),
    /// A required element is not attached yet; try again next frame.
    Deferred,
    /// Nothing to build for the current dependencies.
    Idle,
}

/// Runs a deferred construction attempt later. Dropping the returned handle
/// cancels the attempt if it has not run yet.
pub trait Scheduler {
    type Pending;

    fn defer(&self, retry: Box<dyn FnOnce()>) -> Self::Pending;
}

enum Stage {
    Frame(AnimationFrame),
    Timer(Timeout),
}

/// A retry waiting for the next animation frame, then [`RETRY_DELAY_MS`].
pub struct FrameRetry(Rc<RefCell<Option<Stage>>>);

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameScheduler;

impl Scheduler for FrameScheduler {
    type Pending = FrameRetry;

    fn defer(&self, retry: Box<dyn FnOnce()>) -> FrameRetry {
        let slot = Rc::new(RefCell::new(None));
        let weak: Weak<RefCell<Option<Stage>>> = Rc::downgrade(&slot);
        let frame = request_animation_frame(move |_| {
            if let Some(slot) = weak.upgrade() {
                let timer = Timeout::new(RETRY_DELAY_MS, retry);
                *slot.borrow_mut() = Some(Stage::Timer(timer));
            }
        });
        *slot.borrow_mut() = Some(Stage::Frame(frame));
        FrameRetry(slot)
    }
}

type Build<D> = Rc<dyn Fn(&D, &TriggerRegistry) -> Entrance>;

/// Owns one section's animation state between mount and unmount.
pub struct Controller<D, S: Scheduler = FrameScheduler> {
    label: &'static str,
    deps: D,
    registry: TriggerRegistry,
    build: Build<D>,
    scheduler: S,
    gate: RefCell<ReadinessGate>,
    scope: RefCell<Option<AnimationScope>>,
    retry: RefCell<Option<S::Pending>>,
}

impl<D: 'static> Controller<D> {
    pub fn start(label: &'static str, deps: D, registry: TriggerRegistry, build: Build<D>) -> Rc<Self> {
        Self::start_with(FrameScheduler, label, deps, registry, build)
    }
}

impl<D: 'static, S: Scheduler + 'static> Controller<D, S> {
    pub fn start_with(
        scheduler: S,
        label: &'static str,
        deps: D,
        registry: TriggerRegistry,
        build: Build<D>,
    ) -> Rc<Self> {
        let controller = Rc::new(Self {
            label,
            deps,
            registry,
            build,
            scheduler,
            gate: RefCell::new(ReadinessGate::default()),
            scope: RefCell::new(None),
            retry: RefCell::new(None),
        });
        controller.attempt();
        controller
    }

    pub fn readiness(&self) -> Readiness {
        self.gate.borrow().state()
    }

    fn attempt(self: &Rc<Self>) {
        if !self.gate.borrow().is_live() {
            return;
        }

        match (self.build)(&self.deps, &self.registry) {
            Entrance::Built(scope) => {
                self.gate.borrow_mut().observe(true);
                debug!(
                    "{} animations ready ({} animations, {} triggers, {} live in total)",
                    self.label,
                    scope.animation_count(),
                    scope.trigger_count(),
                    self.registry.active_count()
                );
                *self.scope.borrow_mut() = Some(scope);
            }
            Entrance::Deferred => {
                let attempts = {
                    let mut gate = self.gate.borrow_mut();
                    gate.observe(false);
                    gate.attempts()
                };
                debug!("{} elements not attached yet (attempt {})", self.label, attempts);
                self.schedule_retry();
            }
            Entrance::Idle => {}
        }
    }

    fn schedule_retry(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let pending = self.scheduler.defer(Box::new(move || {
            if let Some(controller) = weak.upgrade() {
                let finished = controller.retry.borrow_mut().take();
                controller.attempt();
                drop(finished);
            }
        }));
        *self.retry.borrow_mut() = Some(pending);
    }

    /// Cancels pending retries and reverts everything built. Safe to call
    /// more than once.
    pub fn stop(&self) {
        if self.gate.borrow().abandoned() {
            debug!("{} unmounted before its elements attached", self.label);
        }
        self.gate.borrow_mut().cancel();
        // Dropping the pending retry cancels its frame or timer
        self.retry.borrow_mut().take();
        if let Some(mut scope) = self.scope.borrow_mut().take() {
            scope.revert();
        }
    }
}

/// Runs `build` after mount and whenever `deps` change, tearing the previous
/// construction down first and on unmount.
#[hook]
pub fn use_entrance<D, F>(label: &'static str, deps: D, build: F)
where
    D: PartialEq + Clone + 'static,
    F: Fn(&D, &TriggerRegistry) -> Entrance + 'static,
{
    let registry = use_trigger_registry();
    let build: Build<D> = Rc::new(build);

    use_effect_with_deps(
        move |deps: &D| {
            let controller = Controller::start(label, deps.clone(), registry, build);
            move || controller.stop()
        },
        deps,
    );
}

/// What a cascaded section reveal animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeTarget {
    Title,
    Block(usize),
}

/// Title first, then each detail block a little later than the one before.
pub fn cascade(profile: &MotionProfile, blocks: usize) -> Timeline<CascadeTarget> {
    let title = Tween::entrance(
        Pose::hidden().shifted_y(profile.y_offset),
        profile.duration,
        Ease::Power2Out,
    );
    let block = Tween::entrance(
        Pose::hidden().shifted_y(profile.y_offset + 10.0),
        profile.duration - 0.1,
        Ease::Power2Out,
    );

    (0..blocks).fold(
        Timeline::new().at(0.0, CascadeTarget::Title, title),
        |timeline, index| {
            timeline.at(
                0.1 * (index + 1) as f64,
                CascadeTarget::Block(index),
                block.clone(),
            )
        },
    )
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::config::TriggerSettings;
    use crate::responsive::DeviceClass;
    use crate::scroll::registry::tests::FixedProbe;
    use crate::scroll::registry::Trigger;
    use crate::scroll::threshold::Threshold;

    #[test]
    fn gate_transitions() {
        let mut gate = ReadinessGate::default();
        assert_eq!(gate.state(), Readiness::Pending);
        assert_eq!(gate.observe(false), Readiness::Pending);
        assert_eq!(gate.observe(true), Readiness::Ready);
        assert_eq!(gate.attempts(), 2);

        // further observations do not move a ready gate
        assert_eq!(gate.observe(false), Readiness::Ready);
        gate.cancel();
        assert_eq!(gate.observe(true), Readiness::Cancelled);
        assert!(!gate.is_live());
    }

    #[test]
    fn cancelled_before_ready_stays_cancelled() {
        let mut gate = ReadinessGate::default();
        gate.cancel();
        assert_eq!(gate.observe(true), Readiness::Cancelled);
        assert_eq!(gate.attempts(), 0);
    }

    #[test]
    fn only_deferred_gates_count_as_abandoned() {
        let mut gate = ReadinessGate::default();
        // Idle sections never observe, so they are not waiting on anything
        assert!(!gate.abandoned());

        gate.observe(false);
        assert!(gate.abandoned());

        gate.observe(true);
        assert!(!gate.abandoned());
    }

    type Slot = RefCell<Option<Box<dyn FnOnce()>>>;

    /// Queues retries until `run_pending` is called.
    #[derive(Clone, Default)]
    struct ManualScheduler {
        queued: Rc<RefCell<Vec<Weak<Slot>>>>,
        /// Keeps retries runnable even after their handle was dropped.
        ignore_cancel: Option<Rc<RefCell<Vec<Rc<Slot>>>>>,
    }

    impl ManualScheduler {
        fn leaky() -> Self {
            Self {
                ignore_cancel: Some(Rc::default()),
                ..Self::default()
            }
        }

        fn run_pending(&self) -> usize {
            let queued: Vec<Weak<Slot>> = self.queued.borrow_mut().drain(..).collect();
            let mut ran = 0;
            for slot in queued {
                let Some(slot) = slot.upgrade() else {
                    continue;
                };
                let retry = slot.borrow_mut().take();
                if let Some(retry) = retry {
                    retry();
                    ran += 1;
                }
            }
            ran
        }
    }

    impl Scheduler for ManualScheduler {
        type Pending = Rc<Slot>;

        fn defer(&self, retry: Box<dyn FnOnce()>) -> Rc<Slot> {
            let slot = Rc::new(RefCell::new(Some(retry)));
            self.queued.borrow_mut().push(Rc::downgrade(&slot));
            if let Some(kept) = &self.ignore_cancel {
                kept.borrow_mut().push(slot.clone());
            }
            slot
        }
    }

    /// Defers until `attached` is set, then binds one trigger.
    fn waiting_build(attached: Rc<Cell<bool>>, calls: Rc<Cell<u32>>) -> Build<u32> {
        Rc::new(move |_deps: &u32, registry: &TriggerRegistry| {
            calls.set(calls.get() + 1);
            if !attached.get() {
                return Entrance::Deferred;
            }
            let mut scope = AnimationScope::new("test");
            scope.bind(registry.register(Trigger::enter(
                Threshold::top(0.85),
                FixedProbe::at(5000.0, 5100.0),
                || {},
            )));
            Entrance::Built(scope)
        })
    }

    #[test]
    fn deferred_build_retries_until_attached() {
        let registry = TriggerRegistry::default();
        registry.update(0.0, 800.0);
        let scheduler = ManualScheduler::default();
        let attached = Rc::new(Cell::new(false));
        let calls = Rc::new(Cell::new(0));

        let controller = Controller::start_with(
            scheduler.clone(),
            "test",
            0,
            registry.clone(),
            waiting_build(attached.clone(), calls.clone()),
        );
        assert_eq!(controller.readiness(), Readiness::Pending);
        assert_eq!(registry.active_count(), 0);

        // still detached: the retry defers again
        assert_eq!(scheduler.run_pending(), 1);
        assert_eq!(calls.get(), 2);
        assert_eq!(controller.readiness(), Readiness::Pending);

        attached.set(true);
        assert_eq!(scheduler.run_pending(), 1);
        assert_eq!(controller.readiness(), Readiness::Ready);
        assert_eq!(registry.active_count(), 1);
        assert_eq!(scheduler.run_pending(), 0);

        controller.stop();
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn stop_cancels_the_pending_retry() {
        let registry = TriggerRegistry::default();
        registry.update(0.0, 800.0);
        let scheduler = ManualScheduler::default();
        let attached = Rc::new(Cell::new(false));
        let calls = Rc::new(Cell::new(0));

        let controller = Controller::start_with(
            scheduler.clone(),
            "test",
            0,
            registry.clone(),
            waiting_build(attached.clone(), calls.clone()),
        );
        controller.stop();
        attached.set(true);

        assert_eq!(scheduler.run_pending(), 0);
        assert_eq!(calls.get(), 1);
        assert_eq!(controller.readiness(), Readiness::Cancelled);
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn late_retry_after_stop_builds_nothing() {
        let registry = TriggerRegistry::default();
        registry.update(0.0, 800.0);
        let scheduler = ManualScheduler::leaky();
        let attached = Rc::new(Cell::new(false));
        let calls = Rc::new(Cell::new(0));

        let controller = Controller::start_with(
            scheduler.clone(),
            "test",
            0,
            registry.clone(),
            waiting_build(attached.clone(), calls.clone()),
        );
        controller.stop();
        attached.set(true);

        // the callback still fires but finds the controller cancelled
        assert_eq!(scheduler.run_pending(), 1);
        assert_eq!(calls.get(), 1);
        assert_eq!(controller.readiness(), Readiness::Cancelled);
        assert_eq!(registry.active_count(), 0);
    }

    fn registering_build(bindings: usize) -> Build<u32> {
        Rc::new(move |_deps: &u32, registry: &TriggerRegistry| {
            let mut scope = AnimationScope::new("test");
            for offset in 0..bindings {
                scope.bind(registry.register(Trigger::enter(
                    Threshold::top(0.85),
                    FixedProbe::at(5000.0 + offset as f64, 5100.0),
                    || {},
                )));
            }
            Entrance::Built(scope)
        })
    }

    #[test]
    fn mount_then_unmount_leaves_no_bindings() {
        let registry = TriggerRegistry::default();
        registry.update(0.0, 800.0);

        let controller = Controller::start("test", 0, registry.clone(), registering_build(3));
        assert_eq!(controller.readiness(), Readiness::Ready);
        assert_eq!(registry.active_count(), 3);

        controller.stop();
        assert_eq!(registry.active_count(), 0);
        assert_eq!(controller.readiness(), Readiness::Cancelled);
    }

    #[test]
    fn stop_twice_is_harmless() {
        let registry = TriggerRegistry::default();
        registry.update(0.0, 800.0);
        let survivor = registry.register(Trigger::enter(
            Threshold::top(0.85),
            FixedProbe::at(9000.0, 9100.0),
            || {},
        ));

        let controller = Controller::start("test", 0, registry.clone(), registering_build(2));
        controller.stop();
        controller.stop();
        assert_eq!(registry.active_count(), 1);
        assert!(survivor.release());
    }

    #[test]
    fn remount_cycles_do_not_accumulate() {
        let registry = TriggerRegistry::default();
        registry.update(0.0, 800.0);
        for deps in 0..5 {
            let controller = Controller::start("test", deps, registry.clone(), registering_build(2));
            assert_eq!(registry.active_count(), 2);
            controller.stop();
        }
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn idle_builds_nothing() {
        let registry = TriggerRegistry::default();
        let calls = Rc::new(Cell::new(0));
        let counted = calls.clone();
        let controller = Controller::start(
            "test",
            false,
            registry.clone(),
            Rc::new(move |_: &bool, _: &TriggerRegistry| {
                counted.set(counted.get() + 1);
                Entrance::Idle
            }),
        );
        assert_eq!(calls.get(), 1);
        assert_eq!(controller.readiness(), Readiness::Pending);
        assert_eq!(registry.active_count(), 0);
        controller.stop();
    }

    #[test]
    fn cascade_staggers_blocks_after_title() {
        let profile = MotionProfile::for_device(DeviceClass::default(), &TriggerSettings::default());
        let timeline = cascade(&profile, 3);
        let steps = timeline.steps();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].target, CascadeTarget::Title);
        assert_eq!(steps[0].tween.delay, 0.0);

        let delays: Vec<f64> = steps[1..].iter().map(|step| step.tween.delay).collect();
        for (index, delay) in delays.iter().enumerate() {
            assert_eq!(steps[index + 1].target, CascadeTarget::Block(index));
            assert!((delay - 0.1 * (index + 1) as f64).abs() < 1e-12);
        }
        assert!(delays.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn cascade_is_gentler_on_mobile() {
        let triggers = TriggerSettings::default();
        let mobile = DeviceClass {
            is_mobile: true,
            ..DeviceClass::default()
        };
        let phone = cascade(&MotionProfile::for_device(mobile, &triggers), 1);
        let desktop = cascade(&MotionProfile::for_device(DeviceClass::default(), &triggers), 1);
        for (m, d) in phone.steps().iter().zip(desktop.steps()) {
            assert!(m.tween.duration < d.tween.duration);
            assert_ne!(m.tween.from, d.tween.from);
        }
    }
}
