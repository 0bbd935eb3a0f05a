use yew::prelude::*;
use yew_router::prelude::*;
use log::info;

mod config;
mod content;
mod error;
mod lifecycle;
mod responsive;
mod theme;
mod motion {
    pub mod dom;
    pub mod ease;
    pub mod scope;
    pub mod timeline;
    pub mod tween;
}
mod scroll {
    pub mod registry;
    pub mod root;
    pub mod smoother;
    pub mod threshold;
    pub mod touch;
}
mod media {
    pub mod avatar;
    pub mod preload;
}
mod components {
    pub mod credit_card;
    pub mod external_link;
    pub mod optimized_image;
    pub mod smart_avatar;
    pub mod split_text;
}
mod sections {
    pub mod footer;
    pub mod hero_banner;
    pub mod news;
    pub mod team;
    pub mod timeline;
}
mod pages {
    pub mod home;
}

use config::SiteConfig;
use pages::home::{Home, TimelinePage};
use scroll::registry::TriggerRegistry;
use scroll::root::ScrollRoot;
use theme::GlobalStyles;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/timeline")]
    Timeline,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home /> }
        },
        Route::Timeline => {
            info!("Rendering Timeline page");
            html! { <TimelinePage /> }
        },
        Route::NotFound => {
            info!("Unknown route, redirecting home");
            html! { <Redirect<Route> to={Route::Home} /> }
        },
    }
}

#[function_component]
fn App() -> Html {
    let config = use_memo(|_| SiteConfig::load(), ());
    let registry = use_memo(|_| TriggerRegistry::default(), ());

    // Sections release their own triggers; only shutdown clears the rest
    {
        let registry = (*registry).clone();
        use_effect_with_deps(move |_| move || registry.kill_all(), ());
    }

    html! {
        <ContextProvider<SiteConfig> context={(*config).clone()}>
            <ContextProvider<TriggerRegistry> context={(*registry).clone()}>
                <GlobalStyles />
                <BrowserRouter>
                    <ScrollRoot>
                        <Switch<Route> render={switch} />
                    </ScrollRoot>
                </BrowserRouter>
            </ContextProvider<TriggerRegistry>>
        </ContextProvider<SiteConfig>>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
