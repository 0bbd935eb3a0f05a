use log::warn;
use web_sys::Element;
use yew::prelude::*;

use crate::components::split_text::{SplitBy, SplitText};
use crate::content::BANNER_IMAGE;
use crate::error::Result;
use crate::lifecycle::{use_entrance, Entrance};
use crate::motion::dom::{animate, query_all, scroll_to_top, set_style, stage};
use crate::motion::ease::Ease;
use crate::motion::scope::AnimationScope;
use crate::motion::timeline::Timeline;
use crate::motion::tween::{Keyframe, Pose, Tween};
use crate::responsive::{use_device_class, DeviceClass, MotionProfile};

const REFRESH_AFTER_MS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroPart {
    Container,
    Headings,
    HeadingChars,
    SubheadingChars,
}

/// Mount-time reveal: the banner fades in, headings rise, then the glyphs of
/// heading and subheading follow.
pub fn hero_plan(profile: &MotionProfile) -> Timeline<HeroPart> {
    let y = profile.y_offset;
    Timeline::new()
        .at(
            0.0,
            HeroPart::Container,
            Tween::entrance(Pose::hidden(), 0.5, Ease::Power3Out),
        )
        .stagger(
            0.0,
            HeroPart::Headings,
            Tween::entrance(Pose::default().shifted_y(y), profile.duration, Ease::Power3Out),
            0.2,
        )
        .stagger(
            0.5,
            HeroPart::HeadingChars,
            Tween::entrance(Pose::hidden().shifted_y(y), 0.8, Ease::BACK_OUT),
            profile.stagger,
        )
        .stagger(
            0.7,
            HeroPart::SubheadingChars,
            Tween::entrance(Pose::hidden().shifted_y(y), 0.6, Ease::Power2Out),
            profile.stagger,
        )
}

/// The glow drifts slower than the page while the banner scrolls away.
pub const GLOW_SPEED: &str = "0.8";

/// Side length (px) of the background glow.
pub fn glow_size(device: DeviceClass) -> u32 {
    device.pick(200, 300, 400)
}

pub fn glow_blur(device: DeviceClass) -> u32 {
    if device.is_mobile {
        40
    } else {
        80
    }
}

fn pulse() -> Tween {
    let opacity = |value| Keyframe {
        opacity: Some(value),
        ..Keyframe::default()
    };
    Tween::keyframes(opacity(0.2), opacity(0.4), 1.5, Ease::SineInOut).forever(true)
}

fn pan() -> Tween {
    let position = |value: &str| Keyframe {
        background_position: Some(value.to_string()),
        ..Keyframe::default()
    };
    Tween::keyframes(position("center"), position("center 40%"), 6.0, Ease::SineInOut).forever(true)
}

struct HeroElements {
    hero: Element,
    heading: Element,
    subheading: Element,
    glow: Option<Element>,
}

fn build(elements: &HeroElements, device: DeviceClass, scope: &mut AnimationScope) -> Result<()> {
    let HeroElements {
        hero,
        heading,
        subheading,
        glow,
    } = elements;

    stage(
        &hero_plan(&MotionProfile::hero(device)),
        |part| match part {
            HeroPart::Container => vec![hero.clone()],
            HeroPart::Headings => query_all(hero, "h1, h2"),
            HeroPart::HeadingChars => query_all(heading, SplitBy::Chars.selector()),
            HeroPart::SubheadingChars => query_all(subheading, SplitBy::Chars.selector()),
        },
        scope,
        true,
    )?;

    if let Some(glow) = glow {
        let size = format!("{}px", glow_size(device));
        set_style(glow, "width", &size)?;
        set_style(glow, "height", &size)?;
        set_style(glow, "filter", &format!("blur({}px)", glow_blur(device)))?;
        scope.track(animate(glow, &pulse())?);
    }

    scope.track(animate(hero, &pan())?);
    Ok(())
}

#[function_component(HeroBanner)]
pub fn hero_banner() -> Html {
    let device = use_device_class();
    let hero_ref = use_node_ref();
    let heading_ref = use_node_ref();
    let subheading_ref = use_node_ref();
    let glow_ref = use_node_ref();

    use_effect_with_deps(
        |_| {
            scroll_to_top();
            || ()
        },
        (),
    );

    {
        let hero_ref = hero_ref.clone();
        let heading_ref = heading_ref.clone();
        let subheading_ref = subheading_ref.clone();
        let glow_ref = glow_ref.clone();
        use_entrance("hero", device, move |device, registry| {
            let (Some(hero), Some(heading), Some(subheading)) = (
                hero_ref.cast::<Element>(),
                heading_ref.cast::<Element>(),
                subheading_ref.cast::<Element>(),
            ) else {
                return Entrance::Deferred;
            };
            let elements = HeroElements {
                hero,
                heading,
                subheading,
                glow: glow_ref.cast::<Element>(),
            };

            let mut scope = AnimationScope::new("hero");
            if let Err(err) = build(&elements, *device, &mut scope) {
                warn!("Hero animations incomplete: {}", err);
            }
            scope.refresh_after(registry, REFRESH_AFTER_MS);
            Entrance::Built(scope)
        });
    }

    let hero_style = format!(
        "height: {}; min-height: {}; position: relative; display: flex; flex-direction: column; \
         justify-content: center; align-items: center; \
         background-image: linear-gradient(rgba(0,0,0,0.3), rgba(0,0,0,0.9)), url({}); \
         background-size: cover; background-position: center; background-repeat: no-repeat; \
         color: white; text-align: center; padding: {}; overflow: hidden; will-change: transform;",
        if device.is_mobile { "90vh" } else { "100vh" },
        if device.is_mobile { "600px" } else { "700px" },
        BANNER_IMAGE,
        if device.is_mobile { "16px" } else { "24px" },
    );

    html! {
        <div ref={hero_ref} class="hero" style={hero_style}>
            <div
                data-speed={GLOW_SPEED}
                style="position: absolute; inset: 0; z-index: 0; pointer-events: none;"
            >
                <div
                    ref={glow_ref}
                    style="position: absolute; top: 40%; left: 50%; \
                           background: radial-gradient(circle, rgba(255,255,255,0.3), transparent 60%); \
                           transform: translate(-50%, -50%); pointer-events: none; opacity: 0.2;"
                />
            </div>
            <div style="transform: translateY(-30%); position: relative; z-index: 1;">
                <h1 ref={heading_ref} class="title">
                    <SplitText text="冰霧" by={SplitBy::Chars} />
                    <SplitText text="Eisnebel" by={SplitBy::Chars} class="special-text" />
                </h1>
                <div ref={subheading_ref} class="subtitle">
                    <SplitText text="2025 生日冰箱" by={SplitBy::Chars} />
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::root::parse_speed;
    use crate::scroll::smoother::parallax_offset;

    #[test]
    fn glyphs_follow_container_and_headings() {
        let plan = hero_plan(&MotionProfile::hero(DeviceClass::default()));
        let order: Vec<HeroPart> = plan.steps().iter().map(|step| step.target).collect();
        assert_eq!(
            order,
            vec![
                HeroPart::Container,
                HeroPart::Headings,
                HeroPart::HeadingChars,
                HeroPart::SubheadingChars
            ]
        );

        let steps = plan.steps();
        assert_eq!(steps[2].tween.delay, 0.5);
        assert_eq!(steps[3].tween.delay, 0.7);
        assert_eq!(steps[2].tween.ease, Ease::BACK_OUT);
        assert_eq!(steps[1].stagger, 0.2);
    }

    #[test]
    fn mobile_glyphs_travel_less() {
        let mobile = DeviceClass {
            is_mobile: true,
            ..DeviceClass::default()
        };
        let phone = hero_plan(&MotionProfile::hero(mobile));
        let desktop = hero_plan(&MotionProfile::hero(DeviceClass::default()));
        assert!(phone.steps()[2].stagger < desktop.steps()[2].stagger);
        assert_eq!(phone.steps()[2].tween.from, Keyframe::from(Pose::hidden().shifted_y(30.0)));
        assert_eq!(desktop.steps()[2].tween.from, Keyframe::from(Pose::hidden().shifted_y(50.0)));
    }

    #[test]
    fn glow_scales_with_device() {
        let tablet = DeviceClass {
            is_tablet: true,
            ..DeviceClass::default()
        };
        let mobile = DeviceClass {
            is_mobile: true,
            ..DeviceClass::default()
        };
        assert_eq!(glow_size(mobile), 200);
        assert_eq!(glow_size(tablet), 300);
        assert_eq!(glow_size(DeviceClass::default()), 400);
        assert_eq!(glow_blur(mobile), 40);
        assert_eq!(glow_blur(tablet), 80);
    }

    #[test]
    fn ambient_loops_run_forever() {
        assert_eq!(pulse().repeat, crate::motion::tween::Repeat::Forever { yoyo: true });
        assert_eq!(pan().duration, 6.0);
    }

    #[test]
    fn glow_layer_lags_behind_the_page() {
        let speed = parse_speed(GLOW_SPEED).unwrap();
        assert!(speed > 0.0 && speed < 1.0);
        // scrolling 100px down leaves the glow 20px further down the page
        assert!((parallax_offset(speed, 100.0) - 20.0).abs() < 1e-9);
    }
}
