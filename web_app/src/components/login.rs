use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use supamenu::{Destination, Severity};

use crate::console::ConsoleContext;

/// Sign-in form. A stored session skips straight to the dashboard.
#[component]
pub fn LoginPage() -> impl IntoView {
    let console = use_context::<ConsoleContext>().expect("ConsoleContext not found");
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        if console.signed_in.get() {
            navigate(Destination::Dashboard.path(), Default::default());
        }
    });

    let submit = move || {
        if is_submitting.get_untracked() {
            return;
        }
        let email = email.get_untracked();
        let password = password.get_untracked();
        if email.trim().is_empty() || password.is_empty() {
            set_error.set(Some("Email and password are required".to_string()));
            return;
        }

        let api = match console.api() {
            Ok(api) => api,
            Err(e) => {
                log::error!("Invalid API configuration: {}", e);
                set_error.set(Some(e.to_string()));
                return;
            }
        };

        set_error.set(None);
        set_is_submitting.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match api.login(&email, &password).await {
                Ok(response) => {
                    let name = response
                        .user
                        .map(|user| user.display_name())
                        .unwrap_or(email);
                    console.notify(Severity::Success, format!("Welcome back, {}", name));
                    console.sync_session();
                }
                Err(e) => {
                    log::warn!("Login failed: {}", e);
                    set_error.try_set(Some(e.to_string()));
                }
            }
            set_is_submitting.try_set(false);
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-[#0a0a0a] p-4">
            <form
                class="w-full max-w-sm bg-[#0d0d0d] border border-[#ffffff15] rounded-lg shadow-2xl p-6 space-y-4"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }
            >
                <h2 class="text-lg font-semibold text-white">"Sign in to SupaMenu"</h2>

                <div>
                    <label class="block text-[#888888] text-xs mb-1.5 font-medium">"Email"</label>
                    <input
                        type="email"
                        class="w-full bg-[#111111] border border-[#ffffff08] rounded px-3 py-2 text-sm text-white focus:border-[#00d9ff] focus:outline-none transition-colors"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </div>
                <div>
                    <label class="block text-[#888888] text-xs mb-1.5 font-medium">"Password"</label>
                    <input
                        type="password"
                        class="w-full bg-[#111111] border border-[#ffffff08] rounded px-3 py-2 text-sm text-white focus:border-[#00d9ff] focus:outline-none transition-colors"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </div>

                {move || error.get().map(|err| view! {
                    <div class="p-3 bg-[#ef444410] border border-[#ef4444] rounded text-sm text-[#ef4444]">
                        {err}
                    </div>
                })}

                <button
                    type="submit"
                    class="w-full px-4 py-2 bg-[#00d9ff] rounded text-sm text-black font-semibold hover:bg-[#00c4e6] transition-colors disabled:opacity-50"
                    disabled=move || is_submitting.get()
                >
                    {move || if is_submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>

                <p class="text-center text-xs text-[#888888]">
                    "No account yet? "
                    <A href=Destination::Signup.path() attr:class="text-[#00d9ff] hover:underline">"Sign up"</A>
                </p>
            </form>
        </div>
    }
}
