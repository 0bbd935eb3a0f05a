use yew::prelude::*;

use crate::media::avatar::LoadState;

#[derive(Properties, PartialEq)]
pub struct OptimizedImageProps {
    pub src: AttrValue,
    pub alt: AttrValue,
    #[prop_or_default]
    pub style: AttrValue,
    #[prop_or_default]
    pub image_ref: NodeRef,
    #[prop_or(true)]
    pub placeholder: bool,
}

/// Lazily loaded image behind a shimmering skeleton; a failed load is
/// replaced by a short notice.
#[function_component(OptimizedImage)]
pub fn optimized_image(props: &OptimizedImageProps) -> Html {
    let state = use_state_eq(|| LoadState::Loading);

    let onload = {
        let state = state.clone();
        Callback::from(move |_: Event| state.set(LoadState::Loaded))
    };
    let onerror = {
        let state = state.clone();
        Callback::from(move |_: Event| state.set(LoadState::Failed))
    };

    if *state == LoadState::Failed {
        return html! {
            <div class="image-failed" style={props.style.clone()}>
                {"圖片加載失敗"}
            </div>
        };
    }

    let loaded = *state == LoadState::Loaded;
    html! {
        <div class="optimized-image" style={format!("position: relative; {}", props.style)}>
            if !loaded && props.placeholder {
                <div class="skeleton skeleton-image"></div>
            }
            <img
                ref={props.image_ref.clone()}
                src={props.src.clone()}
                alt={props.alt.clone()}
                loading="lazy"
                style={format!(
                    "{} display: {}; transform: translateZ(0); will-change: transform; transition: opacity 0.3s ease-in-out;",
                    props.style,
                    if loaded { "block" } else { "none" }
                )}
                {onload}
                {onerror}
            />
        </div>
    }
}
