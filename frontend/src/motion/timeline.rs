use crate::motion::tween::Tween;

/// A tween placed on a timeline, applied to every element `target` resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<K> {
    pub target: K,
    pub tween: Tween,
    /// Extra delay (seconds) added per resolved element, in document order.
    pub stagger: f64,
}

impl<K> Step<K> {
    /// Delay of the `index`-th resolved element.
    pub fn delay_for(&self, index: usize) -> f64 {
        self.tween.delay + self.stagger * index as f64
    }

    /// End of the step for `count` resolved elements.
    pub fn end_for(&self, count: usize) -> f64 {
        if count == 0 {
            return self.tween.delay;
        }
        self.delay_for(count - 1) + self.tween.duration
    }
}

/// Ordered plan of tweens keyed by symbolic targets, resolved to elements
/// only when the plan is staged.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<K> {
    steps: Vec<Step<K>>,
}

impl<K> Default for Timeline<K> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<K> Timeline<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `tween` at absolute position `at` (seconds).
    pub fn at(self, at: f64, target: K, tween: Tween) -> Self {
        self.stagger(at, target, tween, 0.0)
    }

    pub fn stagger(mut self, at: f64, target: K, tween: Tween, each: f64) -> Self {
        let delay = at + tween.delay;
        self.steps.push(Step {
            target,
            tween: tween.delayed(delay),
            stagger: each,
        });
        self
    }

    pub fn steps(&self) -> &[Step<K>] {
        &self.steps
    }

    /// Total length given how many elements each step resolves to.
    pub fn duration(&self, count: impl Fn(&K) -> usize) -> f64 {
        self.steps
            .iter()
            .map(|step| step.end_for(count(&step.target)))
            .fold(0.0, f64::max)
    }
}
