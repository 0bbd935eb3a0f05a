use log::warn;
use web_sys::Element;
use yew::prelude::*;

use crate::components::external_link::ExternalLink;
use crate::config::use_site_config;
use crate::content::footer::{
    ACCOUNT_HANDLE, ACCOUNT_NOTICE, ACCOUNT_URL, COMMUNITY_LABEL, COMMUNITY_URL, DISCLAIMERS,
    DISCLAIMER_TITLE, TITLE,
};
use crate::lifecycle::{cascade, use_entrance, CascadeTarget, Entrance};
use crate::motion::dom::reveal_on_enter;
use crate::motion::scope::AnimationScope;
use crate::responsive::{use_device_class, MotionProfile};
use crate::theme::{BORDER, INK, SURFACE};

/// Only mobile layouts need the extra refresh once the footer has settled.
const MOBILE_REFRESH_AFTER_MS: u32 = 100;

fn frame_style() -> String {
    format!(
        "background-color: {}; border-top: 1px solid {}; padding: 48px 24px; margin: 0 auto;",
        SURFACE, BORDER
    )
}

fn title_html(node: NodeRef) -> Html {
    html! {
        <h4
            ref={node}
            style="text-align: center; margin: 0 0 24px; font-size: 20px; font-weight: 500; will-change: transform, opacity;"
        >
            { TITLE }
        </h4>
    }
}

#[function_component(Footer)]
pub fn footer() -> Html {
    let config = use_site_config();
    let device = use_device_class();
    let mounted = use_state_eq(|| false);
    let section_ref = use_node_ref();
    let title_ref = use_node_ref();
    let account_ref = use_node_ref();
    let disclaimer_ref = use_node_ref();
    let community_ref = use_node_ref();

    {
        let mounted = mounted.clone();
        use_effect_with_deps(
            move |_| {
                mounted.set(true);
                || ()
            },
            (),
        );
    }

    {
        let section_ref = section_ref.clone();
        let title_ref = title_ref.clone();
        let blocks = [account_ref.clone(), disclaimer_ref.clone(), community_ref.clone()];
        let triggers = config.triggers.clone();
        use_entrance("footer", (device, *mounted), move |(device, mounted), registry| {
            if !*mounted {
                return Entrance::Idle;
            }
            let (Some(section), Some(title)) =
                (section_ref.cast::<Element>(), title_ref.cast::<Element>())
            else {
                return Entrance::Deferred;
            };

            let profile = MotionProfile::for_device(*device, &triggers);
            let blocks: Vec<Element> = blocks.iter().filter_map(|block| block.cast::<Element>()).collect();
            let plan = cascade(&profile, blocks.len());

            let mut scope = AnimationScope::new("footer");
            let built = reveal_on_enter(
                &mut scope,
                registry,
                profile.start,
                &section,
                &plan,
                |target| match target {
                    CascadeTarget::Title => vec![title.clone()],
                    CascadeTarget::Block(index) => blocks.get(*index).cloned().into_iter().collect(),
                },
            );
            if let Err(err) = built {
                warn!("Footer animations incomplete: {}", err);
            }
            if device.is_mobile {
                scope.refresh_after(registry, MOBILE_REFRESH_AFTER_MS);
            }
            Entrance::Built(scope)
        });
    }

    if !*mounted {
        return html! {
            <div style={frame_style()}>
                <div style="max-width: 1200px; margin: 0 auto;">
                    { title_html(NodeRef::default()) }
                </div>
            </div>
        };
    }

    html! {
        <div ref={section_ref} style={format!("{} will-change: transform, opacity;", frame_style())}>
            <div style="max-width: 1200px; margin: 0 auto;">
                { title_html(title_ref) }

                <div ref={account_ref} style="text-align: center; margin-bottom: 32px; will-change: transform, opacity;">
                    <ExternalLink href={ACCOUNT_URL}>
                        <span style={format!("display: inline-flex; align-items: center; color: {};", INK)}>
                            { ACCOUNT_HANDLE }
                        </span>
                    </ExternalLink>
                    <p style="display: block; margin: 16px 0 0; line-height: 1.5; color: #8c8c8c;">
                        { ACCOUNT_NOTICE[0] }<br />{ ACCOUNT_NOTICE[1] }
                    </p>
                </div>

                <div
                    ref={disclaimer_ref}
                    class="card"
                    style={format!("margin-bottom: 32px; padding: 0; box-shadow: none; border: 1px solid {}; will-change: transform, opacity;", BORDER)}
                >
                    <div style={format!("padding: 16px 24px; border-bottom: 1px solid {};", BORDER)}>
                        { DISCLAIMER_TITLE }
                    </div>
                    <ul style="list-style: none; margin: 0; padding: 24px;">
                        { for DISCLAIMERS.iter().map(|line| html! {
                            <li style="padding: 8px 0;">{ *line }</li>
                        }) }
                    </ul>
                </div>

                <div ref={community_ref} style="text-align: center; will-change: transform, opacity;">
                    <strong style="display: block; margin-bottom: 8px;">{ COMMUNITY_LABEL }</strong>
                    <ExternalLink href={COMMUNITY_URL}>
                        <span style={format!("color: {};", INK)}>{ COMMUNITY_URL }</span>
                    </ExternalLink>
                </div>
            </div>
        </div>
    }
}
