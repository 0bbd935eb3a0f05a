use yew::prelude::*;

use crate::components::external_link::ExternalLink;
use crate::components::smart_avatar::SmartAvatar;
use crate::content::CreditEntry;

#[derive(Properties, PartialEq)]
pub struct CreditCardProps {
    pub entry: CreditEntry,
    #[prop_or(64)]
    pub avatar_size: u32,
}

#[function_component(CreditCard)]
pub fn credit_card(props: &CreditCardProps) -> Html {
    let entry = props.entry;
    html! {
        <ExternalLink href={entry.profile_url} class="credit-link">
            <div class="card credit-card">
                <div class="credit-meta">
                    <SmartAvatar chain={entry.avatar(props.avatar_size)} />
                    <div>
                        <div class="credit-name">{ entry.name }</div>
                        if let Some(role) = entry.role {
                            <div class="credit-role">{ role }</div>
                        }
                    </div>
                </div>
                <div class="credit-handle">{ format!("@{}", entry.handle) }</div>
            </div>
        </ExternalLink>
    }
}
