use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};
use web_sys::MouseEvent;

mod config;
mod error;
mod analytics;
mod clipboard;
mod animation {
    pub mod visibility;
    pub mod counter;
    pub mod scroll;
    pub mod typewriter;
}
mod charts {
    pub mod format;
    pub mod data;
    pub mod theme;
    pub mod spec;
    pub mod render;
    pub mod bootstrap;
    pub mod board;
}
mod components {
    pub mod notification;
    pub mod copy_button;
    pub mod modal;
}
mod forms {
    pub mod submit;
    pub mod contact;
    pub mod email;
}
mod pages {
    pub mod home;
    pub mod docs;
}

use animation::scroll::{active_section, is_scrolled, measure_sections, use_scroll_y};
use charts::theme::ChartTheme;
use components::notification::FlashProvider;
use config::{SiteConfig, APP_NAME};
use pages::home::Home;

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/features")]
    Features,
    #[at("/pricing")]
    Pricing,
    #[at("/docs")]
    Docs,
    #[at("/contact")]
    Contact,
    #[at("/download")]
    Download,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Landing-page section this route scrolls to.
    pub fn anchor(&self) -> Option<&'static str> {
        match self {
            Route::Home | Route::NotFound => None,
            Route::Features => Some("features"),
            Route::Pricing => Some("pricing"),
            Route::Docs => Some("docs"),
            Route::Contact => Some("contact"),
            Route::Download => Some("download"),
        }
    }
}

fn switch(routes: Route) -> Html {
    info!("Rendering {:?} page", routes);
    html! { <Home anchor={routes.anchor()} /> }
}

/// Path reported for a page view: the address the visitor opened, even
/// when it is not one of our routes.
pub fn page_path(location_path: &str) -> String {
    if location_path.is_empty() {
        "/".to_string()
    } else {
        location_path.to_string()
    }
}

/// Reports a page view every time the location changes.
#[function_component(PageTracker)]
fn page_tracker() -> Html {
    let config = use_context::<SiteConfig>().unwrap_or_default();
    let path = use_location().map(|location| page_path(location.path()));

    use_effect_with_deps(
        move |path| {
            if let Some(path) = path {
                analytics::track_page_view(&config, path);
            }
            || ()
        },
        path,
    );

    html! {}
}

const NAV_LINKS: [(Route, &str, &str); 5] = [
    (Route::Features, "features", "Features"),
    (Route::Docs, "docs", "Docs"),
    (Route::Pricing, "pricing", "Pricing"),
    (Route::Download, "download", "Download"),
    (Route::Contact, "contact", "Contact"),
];

#[function_component(Nav)]
pub fn nav() -> Html {
    let config = use_context::<SiteConfig>().unwrap_or_default();
    let menu_open = use_state(|| false);
    let scroll_y = use_scroll_y();

    let scrolled = is_scrolled(scroll_y, config.header_scroll_threshold);
    let sections = measure_sections();
    let current = active_section(scroll_y, &sections);

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class={classes!("top-nav", scrolled.then_some("scrolled"))}>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {APP_NAME}
                </Link<Route>>

                <button class="burger-menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    { for NAV_LINKS.iter().map(|(route, section, title)| html! {
                        <div onclick={close_menu.clone()}>
                            <Link<Route>
                                to={route.clone()}
                                classes={classes!("nav-link", (current == Some(*section)).then_some("active"))}
                            >
                                {*title}
                            </Link<Route>>
                        </div>
                    }) }
                </div>
            </div>
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    let config = use_memo(|_| SiteConfig::default(), ());
    let theme = use_memo(|_| ChartTheme::default(), ());

    html! {
        <ContextProvider<SiteConfig> context={(*config).clone()}>
            <ContextProvider<ChartTheme> context={(*theme).clone()}>
                <FlashProvider>
                    <BrowserRouter>
                        <PageTracker />
                        <Nav />
                        <Switch<Route> render={switch} />
                    </BrowserRouter>
                </FlashProvider>
            </ContextProvider<ChartTheme>>
        </ContextProvider<SiteConfig>>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting {}", APP_NAME);
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_routes_map_to_anchors() {
        assert_eq!(Route::Home.anchor(), None);
        assert_eq!(Route::Pricing.anchor(), Some("pricing"));
        assert_eq!(Route::recognize("/download"), Some(Route::Download));
        assert_eq!(Route::recognize("/nope"), Some(Route::NotFound));
    }

    #[test]
    fn unknown_paths_are_reported_as_opened() {
        let opened = "/blog/kubeopt-launch";
        assert_eq!(Route::recognize(opened), Some(Route::NotFound));
        assert_eq!(page_path(opened), opened);
        assert_eq!(page_path("/pricing"), "/pricing");
        assert_eq!(page_path(""), "/");
    }

    #[test]
    fn nav_links_point_at_their_sections() {
        for (route, section, _) in NAV_LINKS.iter() {
            assert_eq!(route.anchor(), Some(*section));
        }
    }
}
