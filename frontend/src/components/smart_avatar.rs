use yew::prelude::*;

use crate::media::avatar::{AvatarChain, LoadState};

#[derive(Properties, PartialEq)]
pub struct SmartAvatarProps {
    /// Starting point of the fallback chain, usually `CreditEntry::avatar`.
    pub chain: AvatarChain,
}

/// Round avatar that walks the fallback chain on load errors.
#[function_component(SmartAvatar)]
pub fn smart_avatar(props: &SmartAvatarProps) -> Html {
    let chain = {
        let initial = props.chain.clone();
        use_state(move || initial)
    };

    let onerror = {
        let chain = chain.clone();
        Callback::from(move |_: Event| {
            let mut next = (*chain).clone();
            if next.on_error() {
                chain.set(next);
            }
        })
    };

    let onload = {
        let chain = chain.clone();
        Callback::from(move |_: Event| {
            let mut next = (*chain).clone();
            if next.on_load() {
                chain.set(next);
            }
        })
    };

    let size = chain.size();
    let class = classes!(
        "avatar",
        (chain.state() == LoadState::Loading).then_some("avatar-loading")
    );
    html! {
        <img
            {class}
            src={chain.src()}
            data-source={format!("{:?}", chain.stage()).to_lowercase()}
            alt={format!("@{}", chain.handle())}
            width={size.to_string()}
            height={size.to_string()}
            style={format!("width: {}px; height: {}px;", size, size)}
            loading="lazy"
            {onerror}
            {onload}
        />
    }
}
