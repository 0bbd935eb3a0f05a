use yew::prelude::*;

use crate::config::use_site_config;
use crate::sections::{
    footer::Footer, hero_banner::HeroBanner, team::Team, timeline::TimelineSection,
};

#[function_component]
pub fn Home() -> Html {
    let config = use_site_config();

    html! {
        <>
            <HeroBanner />
            if config.show_timeline {
                <TimelineSection />
            }
            <Team />
            <Footer />
        </>
    }
}

/// The video timeline on its own, reachable even when the home page leaves
/// it out.
#[function_component]
pub fn TimelinePage() -> Html {
    html! {
        <>
            <TimelineSection />
            <Footer />
        </>
    }
}
