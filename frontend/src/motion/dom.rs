use js_sys::{Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Animation, Element, HtmlElement};

use crate::error::{Result, SiteError};
use crate::motion::scope::AnimationScope;
use crate::motion::timeline::Timeline;
use crate::motion::tween::{TimingValue, Tween};
use crate::scroll::registry::{ElementProbe, Trigger, TriggerRegistry};
use crate::scroll::threshold::Threshold;

/// Starts `tween` on `element` through the Web Animations API.
pub fn animate(element: &Element, tween: &Tween) -> Result<Animation> {
    let keyframes = js_sys::JSON::parse(&tween.keyframes_json()?)?;

    let options = Object::new();
    for (key, value) in tween.timing() {
        let value = match value {
            TimingValue::Number(number) => JsValue::from_f64(number),
            TimingValue::Text(text) => JsValue::from_str(&text),
        };
        Reflect::set(&options, &JsValue::from_str(key), &value)?;
    }

    let animate: Function = Reflect::get(element, &JsValue::from_str("animate"))?.dyn_into()?;
    let animation = animate.call2(element, &keyframes, &options)?;
    Ok(animation.dyn_into::<Animation>()?)
}

/// Creates every animation of `timeline`, tracks them in `scope` and returns
/// them. Staged animations hold their first frame until played.
pub fn stage<K>(
    timeline: &Timeline<K>,
    resolve: impl Fn(&K) -> Vec<Element>,
    scope: &mut AnimationScope,
    autoplay: bool,
) -> Result<Vec<Animation>> {
    let mut staged = Vec::new();
    for step in timeline.steps() {
        for (index, element) in resolve(&step.target).iter().enumerate() {
            let tween = step.tween.clone().delayed(step.delay_for(index));
            let animation = animate(element, &tween)?;
            if !autoplay {
                animation.pause()?;
            }
            scope.track(animation.clone());
            staged.push(animation);
        }
    }
    Ok(staged)
}

/// Seeks paused animations to `progress` of `duration` seconds.
pub fn seek(animations: &[Animation], duration: f64, progress: f64) {
    for animation in animations {
        animation.set_current_time(Some(duration * 1000.0 * progress));
    }
}

/// Stages `timeline` and plays it once `trigger` crosses `start`.
pub fn reveal_on_enter<K>(
    scope: &mut AnimationScope,
    registry: &TriggerRegistry,
    start: Threshold,
    trigger: &Element,
    timeline: &Timeline<K>,
    resolve: impl Fn(&K) -> Vec<Element>,
) -> Result<()> {
    let staged = stage(timeline, resolve, scope, false)?;
    if staged.is_empty() {
        return Ok(());
    }
    scope.bind(registry.register(Trigger::enter(
        start,
        ElementProbe(trigger.clone()),
        move || {
            for animation in &staged {
                let _ = animation.play();
            }
        },
    )));
    Ok(())
}

/// Stages `timeline` and ties its progress to the scroll position between
/// `start` and `end`.
pub fn scrub<K>(
    scope: &mut AnimationScope,
    registry: &TriggerRegistry,
    (start, end): (Threshold, Threshold),
    trigger: &Element,
    timeline: &Timeline<K>,
    resolve: impl Fn(&K) -> Vec<Element>,
) -> Result<()> {
    let duration = timeline.duration(|target| resolve(target).len());
    let staged = stage(timeline, resolve, scope, false)?;
    if staged.is_empty() {
        return Ok(());
    }

    scope.bind(registry.register(Trigger::scrub(
        start,
        end,
        ElementProbe(trigger.clone()),
        move |progress| seek(&staged, duration, progress),
    )));
    Ok(())
}

pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_style(element: &Element, property: &str, value: &str) -> Result<()> {
    let element = element
        .dyn_ref::<HtmlElement>()
        .ok_or(SiteError::Detached("styled element"))?;
    element.style().set_property(property, value)?;
    Ok(())
}

pub fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}
