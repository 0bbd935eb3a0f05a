use yew::prelude::*;

use crate::content::is_well_formed;

#[derive(Properties, PartialEq)]
pub struct ExternalLinkProps {
    pub href: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Children,
}

/// Outbound link opened in a new browsing context. Anything that does not
/// parse as a URL is rendered as plain text instead.
#[function_component(ExternalLink)]
pub fn external_link(props: &ExternalLinkProps) -> Html {
    if is_well_formed(&props.href) {
        html! {
            <a
                href={props.href.clone()}
                class={props.class.clone()}
                target="_blank"
                rel="noopener noreferrer"
            >
                { for props.children.iter() }
            </a>
        }
    } else {
        html! {
            <span class={props.class.clone()}>{ for props.children.iter() }</span>
        }
    }
}
