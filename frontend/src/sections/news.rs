use log::warn;
use web_sys::Element;
use yew::prelude::*;

use crate::content::NEWS_IMAGE;
use crate::error::Result;
use crate::lifecycle::{use_entrance, Entrance};
use crate::motion::dom::reveal_on_enter;
use crate::motion::ease::Ease;
use crate::motion::scope::AnimationScope;
use crate::motion::timeline::Timeline;
use crate::motion::tween::{Pose, Tween};
use crate::responsive::{use_device_class, Adaptive, DeviceClass};
use crate::scroll::registry::TriggerRegistry;
use crate::scroll::threshold::Threshold;

const CARD_START: Adaptive<Threshold> = Adaptive::new(Threshold::top(0.7), Threshold::top(0.8));
const TITLE_START: Adaptive<Threshold> = Adaptive::new(Threshold::top(0.85), Threshold::top(0.9));
const REFRESH_AFTER_MS: u32 = 300;
const HOVER_SCALE: f64 = 1.03;

pub fn card_entrance(device: DeviceClass) -> Tween {
    let rise = if device.is_mobile { 60.0 } else { 100.0 };
    Tween::entrance(
        Pose::hidden().shifted_y(rise).scaled(0.95),
        1.2 * device.pace(),
        Ease::BACK_OUT,
    )
}

pub fn title_entrance(device: DeviceClass) -> Tween {
    let fall = if device.is_mobile { -30.0 } else { -50.0 };
    Tween::entrance(
        Pose::hidden().shifted_y(fall),
        1.5 * device.pace(),
        Ease::ElasticOut {
            amplitude: 1.0,
            period: 0.5,
        },
    )
}

/// Width of the featured card; only desktop visitors can expand it.
pub fn card_width(device: DeviceClass, expanded: bool) -> &'static str {
    if expanded && !device.is_mobile {
        "100vw"
    } else {
        "100%"
    }
}

pub fn image_scale(device: DeviceClass, hovered: bool) -> f64 {
    if hovered && !device.is_mobile {
        HOVER_SCALE
    } else {
        1.0
    }
}

fn build(
    device: DeviceClass,
    container: &Element,
    card: &Element,
    title: &Element,
    registry: &TriggerRegistry,
    scope: &mut AnimationScope,
) -> Result<()> {
    let card_reveal = Timeline::new().at(0.0, (), card_entrance(device));
    reveal_on_enter(scope, registry, CARD_START.get(device), container, &card_reveal, |_| {
        vec![card.clone()]
    })?;

    let title_reveal = Timeline::new().at(0.0, (), title_entrance(device));
    reveal_on_enter(scope, registry, TITLE_START.get(device), container, &title_reveal, |_| {
        vec![title.clone()]
    })
}

/// Featured light-box image embedded in the roster.
#[function_component(News)]
pub fn news() -> Html {
    let device = use_device_class();
    let expanded = use_state_eq(|| false);
    let hovered = use_state_eq(|| false);
    let container_ref = use_node_ref();
    let card_ref = use_node_ref();
    let title_ref = use_node_ref();

    {
        let container_ref = container_ref.clone();
        let card_ref = card_ref.clone();
        let title_ref = title_ref.clone();
        use_entrance("news", device, move |device, registry| {
            let (Some(container), Some(card), Some(title)) = (
                container_ref.cast::<Element>(),
                card_ref.cast::<Element>(),
                title_ref.cast::<Element>(),
            ) else {
                return Entrance::Deferred;
            };

            let mut scope = AnimationScope::new("news");
            if let Err(err) = build(*device, &container, &card, &title, registry, &mut scope) {
                warn!("News animations incomplete: {}", err);
            }
            scope.refresh_after(registry, REFRESH_AFTER_MS);
            Entrance::Built(scope)
        });
    }

    let onclick = {
        let expanded = expanded.clone();
        Callback::from(move |_: MouseEvent| {
            if !device.is_mobile {
                expanded.set(!*expanded);
            }
        })
    };
    let onmouseenter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let onmouseleave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(false))
    };

    let image_transition = if device.is_mobile {
        "none".to_string()
    } else {
        format!("transform 0.5s {}", Ease::Power2Out.css())
    };

    html! {
        <div
            ref={container_ref}
            class="gallery-container"
            style={format!(
                "padding: {}; display: flex; flex-direction: column; align-items: center;",
                if device.is_mobile { "20px 16px" } else { "40px 16px" }
            )}
        >
            <h2
                ref={title_ref}
                class="section-title gallery-title"
                style={format!(
                    "margin-bottom: {}; font-weight: bold; color: #1890ff; font-size: {};",
                    if device.is_mobile { "20px" } else { "40px" },
                    if device.is_mobile { "24px" } else { "32px" }
                )}
            >
                {"燈箱資訊"}
            </h2>
            <div
                ref={card_ref}
                class="featured-image-card"
                style={format!(
                    "width: {}; max-width: 100vw; transition: width 0.5s {};",
                    card_width(device, *expanded),
                    Ease::Power2InOut.css()
                )}
            >
                <div style="border-radius: 12px; overflow: hidden;">
                    <img
                        alt="News"
                        src={NEWS_IMAGE}
                        style={format!(
                            "display: block; width: 100%; height: 100%; object-fit: cover; \
                             transform: scale({}); transition: {}; cursor: {};",
                            image_scale(device, *hovered),
                            image_transition,
                            if device.is_mobile { "default" } else { "pointer" }
                        )}
                        {onclick}
                        {onmouseenter}
                        {onmouseleave}
                    />
                </div>
            </div>
        </div>
    }
}
