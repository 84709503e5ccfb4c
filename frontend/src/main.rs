use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};
use web_sys::MouseEvent;

mod config;
mod transport;
mod components {
    pub mod contact_section;
    pub mod date_picker;
}
mod pages {
    pub mod home;
}

use pages::home::Home;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[derive(Properties, PartialEq)]
pub struct NavProps {
    pub menu_open: bool,
    pub on_menu_toggle: Callback<bool>,
}

#[function_component]
pub fn Nav(props: &NavProps) -> Html {
    let NavProps { menu_open, on_menu_toggle } = props;

    let toggle_menu = {
        let on_menu_toggle = on_menu_toggle.clone();
        let open = *menu_open;
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_menu_toggle.emit(!open);
        })
    };

    // Anchor navigation still happens, only the menu closes.
    let close_menu = {
        let on_menu_toggle = on_menu_toggle.clone();
        Callback::from(move |_: MouseEvent| on_menu_toggle.emit(false))
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class="top-nav">
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"IRON CLUB"}
                </Link<Route>>

                <button class="burger-menu" aria-label="Toggle menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    <a href="#contact" class="nav-link" onclick={close_menu.clone()}>{"Contact"}</a>
                    <a href="#contact" class="nav-login-button" onclick={close_menu}>{"Join now"}</a>
                </div>
            </div>
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    let menu_open = use_state(|| false);

    let on_menu_toggle = {
        let menu_open = menu_open.clone();
        Callback::from(move |open: bool| {
            info!("Menu {}", if open { "opened" } else { "closed" });
            menu_open.set(open);
        })
    };

    let open = *menu_open;
    let render = move |route: Route| match route {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Home menu_open={open} /> }
        }
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! { <Redirect<Route> to={Route::Home} /> }
        }
    };

    html! {
        <BrowserRouter>
            <Nav menu_open={open} {on_menu_toggle} />
            <Switch<Route> {render} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
