use yew::prelude::*;

use crate::components::contact_section::ContactSection;

#[derive(Properties, PartialEq)]
pub struct HomeProps {
    /// Mobile menu state owned by the app shell.
    pub menu_open: bool,
}

#[function_component]
pub fn Home(props: &HomeProps) -> Html {
    html! {
        <main class={classes!("home", props.menu_open.then_some("menu-open"))}>
            <style>
            {r#".home.menu-open .hero-intro { filter: blur(4px); }
            .hero-intro {
                min-height: 70vh;
                display: flex;
                flex-direction: column;
                align-items: center;
                justify-content: center;
                text-align: center;
                padding: 2rem;
                transition: filter 0.3s ease;
            }
            .hero-intro h1 { font-size: 3rem; margin-bottom: 1rem; }
            .hero-cta {
                display: inline-block;
                margin-top: 1.5rem;
                padding: 0.9rem 2rem;
                border-radius: 10px;
                background: linear-gradient(45deg, #3b82f6, #06b6d4);
                color: #fff;
                text-decoration: none;
            }"#}
            </style>
            <div class="hero-intro">
                <h1>{"Train harder. Live stronger."}</h1>
                <p>{"Gym, aqua zone and classes for the whole family."}</p>
                <a href="#contact" class="hero-cta">{"Book your visit"}</a>
            </div>
            <ContactSection />
        </main>
    }
}
