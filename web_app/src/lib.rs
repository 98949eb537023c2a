use leptos::prelude::*;
use leptos::mount::mount_to_body;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;
use wasm_bindgen::prelude::*;

mod components;
mod console;

use components::{DashboardPage, LoginPage, RestaurantWizard, SignupPage, ToastContainer};
use console::ConsoleContext;

#[wasm_bindgen(start)]
pub fn main() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    let console = ConsoleContext::new();
    provide_context(console);

    view! {
        <Router>
            <Routes fallback=|| view! { <Redirect path="/login"/> }>
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/signup") view=SignupPage />
                <Route
                    path=path!("/create-restaurant")
                    view=|| view! { <SignedIn><RestaurantWizard/></SignedIn> }
                />
                <Route
                    path=path!("/restaurant-dashboard")
                    view=|| view! { <SignedIn><DashboardPage/></SignedIn> }
                />
            </Routes>
            <ToastContainer/>
        </Router>
    }
}

/// Renders `children` only with a session; otherwise sends the user to sign in.
#[component]
fn SignedIn(children: ChildrenFn) -> impl IntoView {
    let console = use_context::<ConsoleContext>().expect("ConsoleContext not found");

    view! {
        <Show
            when=move || console.signed_in.get()
            fallback=|| view! { <Redirect path="/login"/> }
        >
            {children()}
        </Show>
    }
}
