use log::warn;
use web_sys::Element;
use yew::prelude::*;

use crate::components::credit_card::CreditCard;
use crate::components::optimized_image::OptimizedImage;
use crate::components::split_text::{SplitBy, SplitText};
use crate::content::{CreditGroup, CREDIT_GROUPS, SIDE_IMAGES};
use crate::error::Result;
use crate::lifecycle::{use_entrance, Entrance};
use crate::media::preload::{use_image_preloader, PreloadState};
use crate::motion::dom::{query_all, reveal_on_enter};
use crate::motion::ease::Ease;
use crate::motion::scope::AnimationScope;
use crate::motion::timeline::Timeline;
use crate::motion::tween::{Pose, Tween};
use crate::responsive::{use_device_class, Adaptive, DeviceClass};
use crate::scroll::registry::TriggerRegistry;
use crate::scroll::threshold::Threshold;
use crate::sections::news::News;

const HEADING_START: Adaptive<Threshold> = Adaptive::new(Threshold::top(0.8), Threshold::top(0.85));
const GROUP_START: Adaptive<Threshold> = Adaptive::new(Threshold::top(0.7), Threshold::top(0.8));
const REFRESH_AFTER_MS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingPart {
    TitleChars,
    SubtitleWords,
}

/// Everything the roster animates once its side images have settled.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterPlan {
    pub heading_start: Threshold,
    pub group_start: Threshold,
    pub heading: Timeline<HeadingPart>,
    /// Card entrance per roster group, in page order.
    pub groups: Vec<Tween>,
    pub card_stagger: f64,
    /// Scale-in per side image; `None` for images that failed to load.
    pub side_images: Vec<Option<Tween>>,
}

/// Builds the roster animations, or nothing while any side image is still
/// loading.
pub fn roster_plan(preload: &PreloadState, device: DeviceClass) -> Option<RosterPlan> {
    if !preload.all_settled() {
        return None;
    }

    let (title_y, subtitle_y, travel) = if device.is_mobile {
        (30.0, 20.0, 30.0)
    } else {
        (50.0, 30.0, 50.0)
    };
    let pace = device.pace();
    let heading = Timeline::new()
        .stagger(
            0.0,
            HeadingPart::TitleChars,
            Tween::entrance(Pose::hidden().shifted_y(title_y), 0.8 * pace, Ease::BACK_OUT),
            0.05 * pace,
        )
        .stagger(
            0.2,
            HeadingPart::SubtitleWords,
            Tween::entrance(Pose::hidden().shifted_y(subtitle_y), 0.6 * pace, Ease::Power2Out),
            0.1 * pace,
        );

    let groups = (0..CREDIT_GROUPS.len())
        .map(|index| {
            let x = if index % 2 == 0 { -travel } else { travel };
            Tween::entrance(Pose::hidden().shifted_x(x), 0.6 * pace, Ease::Power2Out)
        })
        .collect();

    let side_images = SIDE_IMAGES
        .iter()
        .map(|src| {
            preload
                .loaded(src)
                .then(|| Tween::entrance(Pose::hidden().scaled(0.9), 0.8 * pace, Ease::Power2Out))
        })
        .collect();

    Some(RosterPlan {
        heading_start: HEADING_START.get(device),
        group_start: GROUP_START.get(device),
        heading,
        groups,
        card_stagger: 0.15 * pace,
        side_images,
    })
}

struct RosterElements {
    title: Element,
    subtitle: Element,
    groups: Vec<Element>,
    images: Vec<Option<Element>>,
}

fn build(
    plan: &RosterPlan,
    elements: &RosterElements,
    registry: &TriggerRegistry,
    scope: &mut AnimationScope,
) -> Result<()> {
    reveal_on_enter(
        scope,
        registry,
        plan.heading_start,
        &elements.title,
        &plan.heading,
        |part| match part {
            HeadingPart::TitleChars => query_all(&elements.title, SplitBy::Chars.selector()),
            HeadingPart::SubtitleWords => query_all(&elements.subtitle, SplitBy::Words.selector()),
        },
    )?;

    for (group, tween) in elements.groups.iter().zip(&plan.groups) {
        let cards = Timeline::new().stagger(0.0, (), tween.clone(), plan.card_stagger);
        reveal_on_enter(scope, registry, plan.group_start, group, &cards, |_| {
            query_all(group, ".card")
        })?;
    }

    for (image, tween) in elements.images.iter().zip(&plan.side_images) {
        if let (Some(image), Some(tween)) = (image, tween) {
            let reveal = Timeline::new().at(0.0, (), tween.clone());
            reveal_on_enter(scope, registry, plan.group_start, image, &reveal, |_| {
                vec![image.clone()]
            })?;
        }
    }
    Ok(())
}

fn credit_stack(group: &CreditGroup) -> Html {
    html! {
        <>
            <h3 style={format!("margin: 0 0 24px; color: {};", group.accent)}>{ group.title }</h3>
            <div class="roster-stack">
                { for group.members.iter().map(|entry| html! { <CreditCard entry={*entry} /> }) }
            </div>
        </>
    }
}

#[function_component(Team)]
pub fn team() -> Html {
    let device = use_device_class();
    let preload = use_image_preloader(&SIDE_IMAGES);
    let title_ref = use_node_ref();
    let subtitle_ref = use_node_ref();
    let organizers_ref = use_node_ref();
    let staff_ref = use_node_ref();
    let sponsors_ref = use_node_ref();
    let first_image_ref = use_node_ref();
    let second_image_ref = use_node_ref();
    let group_refs = [organizers_ref, staff_ref, sponsors_ref];
    let image_refs = [first_image_ref, second_image_ref];

    {
        let title_ref = title_ref.clone();
        let subtitle_ref = subtitle_ref.clone();
        let group_refs = group_refs.clone();
        let image_refs = image_refs.clone();
        use_entrance("team", (device, preload.clone()), move |(device, preload), registry| {
            let Some(plan) = roster_plan(preload, *device) else {
                return Entrance::Idle;
            };
            let (Some(title), Some(subtitle)) = (
                title_ref.cast::<Element>(),
                subtitle_ref.cast::<Element>(),
            ) else {
                return Entrance::Deferred;
            };
            let groups: Option<Vec<Element>> =
                group_refs.iter().map(|group| group.cast::<Element>()).collect();
            let Some(groups) = groups else {
                return Entrance::Deferred;
            };
            let elements = RosterElements {
                title,
                subtitle,
                groups,
                images: image_refs.iter().map(|image| image.cast::<Element>()).collect(),
            };

            let mut scope = AnimationScope::new("team");
            if let Err(err) = build(&plan, &elements, registry, &mut scope) {
                warn!("Roster animations incomplete: {}", err);
            }
            scope.refresh_after(registry, REFRESH_AFTER_MS);
            Entrance::Built(scope)
        });
    }

    let [organizers, staff, sponsors] = &CREDIT_GROUPS;
    let padding = if device.is_mobile { "40px 16px" } else { "80px 24px" };

    html! {
        <div
            class="team"
            style={format!("padding: {}; max-width: 1200px; margin: 0 auto; will-change: transform;", padding)}
        >
            <div style="text-align: center; margin-bottom: 60px;">
                <h2 ref={title_ref.clone()} class="section-title" style="color: #262626;">
                    <SplitText text="感謝名單" by={SplitBy::Chars} />
                </h2>
                <div
                    ref={subtitle_ref.clone()}
                    style={format!(
                        "display: block; color: #8c8c8c; font-size: {};",
                        if device.is_mobile { "14px" } else { "16px" }
                    )}
                >
                    <SplitText text="感謝以下人員與單位的熱情參與與支持" by={SplitBy::Words} />
                </div>
            </div>

            <div class="roster-row">
                <div ref={group_refs[0].clone()}>
                    { credit_stack(organizers) }
                </div>
                <div class="roster-image">
                    <OptimizedImage
                        src={SIDE_IMAGES[0]}
                        alt="主辦單位配圖"
                        image_ref={image_refs[0].clone()}
                        style="border-radius: 8px; width: 100%; height: auto;"
                    />
                </div>
            </div>

            <div class="roster-row">
                <div class="roster-image">
                    <OptimizedImage
                        src={SIDE_IMAGES[1]}
                        alt="繪師配圖"
                        image_ref={image_refs[1].clone()}
                        style="border-radius: 8px; width: 100%; height: auto; transform: translateY(5%);"
                    />
                </div>
                <div ref={group_refs[1].clone()}>
                    { credit_stack(staff) }
                </div>
            </div>

            <News />

            <div ref={group_refs[2].clone()}>
                <h3 style={format!("margin: 0 0 24px; color: {};", sponsors.accent)}>{ sponsors.title }</h3>
                <div class="sponsor-grid">
                    { for sponsors.members.iter().map(|entry| html! { <CreditCard entry={*entry} /> }) }
                </div>
            </div>
        </div>
    }
}
