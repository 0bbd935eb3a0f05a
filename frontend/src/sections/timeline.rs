use log::warn;
use web_sys::Element;
use yew::prelude::*;

use crate::components::external_link::ExternalLink;
use crate::content::{TimelineEntry, VIDEOS};
use crate::error::Result;
use crate::lifecycle::{use_entrance, Entrance};
use crate::motion::dom::{query_all, reveal_on_enter, scrub};
use crate::motion::ease::Ease;
use crate::motion::scope::AnimationScope;
use crate::motion::timeline::Timeline;
use crate::motion::tween::{Pose, Tween};
use crate::responsive::{use_device_class, Adaptive, DeviceClass};
use crate::scroll::registry::TriggerRegistry;
use crate::scroll::threshold::{Edge, Threshold};
use crate::theme::PRIMARY;

const ITEM_START: Adaptive<Threshold> = Adaptive::new(Threshold::top(0.8), Threshold::top(0.9));
const LINE_START: Threshold = Threshold::new(Edge::Top, 0.5);
const LINE_END: Threshold = Threshold::new(Edge::Bottom, 0.5);

/// Entries ordered by publication date; entries whose date does not parse
/// keep their relative order at the end.
pub fn chronological(entries: &[TimelineEntry]) -> Vec<TimelineEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|entry| (entry.published().is_none(), entry.published()));
    sorted
}

/// Entrance of the `index`-th entry, sliding in from its own side.
pub fn item_entrance(index: usize, device: DeviceClass) -> Tween {
    let travel = if device.is_mobile { 50.0 } else { 100.0 };
    let x = if index % 2 == 0 { -travel } else { travel };
    Tween::entrance(Pose::hidden().shifted_x(x), 0.8 * device.pace(), Ease::Power2Out)
}

/// The centre line grows downwards as the container scrolls past the middle
/// of the viewport.
pub fn line_growth() -> Tween {
    Tween::between(
        Pose::default().scaled_y(0.0),
        Pose::default(),
        2.0,
        Ease::Linear,
    )
}

fn build(
    container: &Element,
    device: DeviceClass,
    registry: &TriggerRegistry,
    scope: &mut AnimationScope,
) -> Result<()> {
    for (index, item) in query_all(container, ".timeline-item").iter().enumerate() {
        let reveal = Timeline::new().at(0.0, (), item_entrance(index, device));
        reveal_on_enter(scope, registry, ITEM_START.get(device), item, &reveal, |_| {
            vec![item.clone()]
        })?;
    }

    let growth = Timeline::new().at(0.0, (), line_growth());
    scrub(
        scope,
        registry,
        (LINE_START, LINE_END),
        container,
        &growth,
        |_| query_all(container, ".timeline-line"),
    )
}

fn entry_html(index: usize, entry: &TimelineEntry, device: DeviceClass) -> Html {
    let left = index % 2 == 0;
    html! {
        <div
            key={entry.url}
            class="timeline-item"
            style={format!(
                "position: relative; width: {}; margin-left: {}; margin-bottom: 32px; z-index: 2;",
                if device.is_mobile { "100%" } else { "45%" },
                if left { "0" } else { "auto" }
            )}
        >
            <div
                style={format!(
                    "position: absolute; top: 20px; {}: -10px; width: 20px; height: 20px; \
                     border-radius: 50%; background-color: {}; z-index: 3;",
                    if left { "right" } else { "left" },
                    PRIMARY
                )}
            />
            <div class="card">
                <strong style="display: block;">{ entry.date }</strong>
                <h4 style="margin: 8px 0 16px; font-size: 20px;">{ entry.title }</h4>
                <ExternalLink href={entry.url}>
                    <span style="color: #13c2c2;">{"Watch on YouTube"}</span>
                </ExternalLink>
            </div>
        </div>
    }
}

#[function_component(TimelineSection)]
pub fn timeline_section() -> Html {
    let device = use_device_class();
    let container_ref = use_node_ref();
    let entries = use_memo(|_| chronological(&VIDEOS), ());

    {
        let container_ref = container_ref.clone();
        use_entrance("timeline", device, move |device, registry| {
            let Some(container) = container_ref.cast::<Element>() else {
                return Entrance::Deferred;
            };
            let mut scope = AnimationScope::new("timeline");
            if let Err(err) = build(&container, *device, registry, &mut scope) {
                warn!("Timeline animations incomplete: {}", err);
            }
            registry.refresh();
            Entrance::Built(scope)
        });
    }

    html! {
        <div style="padding: 40px 16px; background-color: #f0f2f5; min-height: 100vh;">
            <h2 class="section-title" style={format!("margin-bottom: 40px; font-weight: bold; color: {};", PRIMARY)}>
                {"時間序"}
            </h2>
            <div
                ref={container_ref}
                class="timeline-container"
                style="max-width: 800px; margin: 0 auto; position: relative;"
            >
                <div
                    class="timeline-line"
                    style={format!(
                        "position: absolute; top: 0; left: calc(50% - 2px); width: 4px; height: 100%; \
                         background-color: {}; z-index: 1; transform-origin: top center;",
                        PRIMARY
                    )}
                />
                { for entries.iter().enumerate().map(|(index, entry)| entry_html(index, entry, device)) }
            </div>
        </div>
    }
}
