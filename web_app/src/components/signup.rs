use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use supamenu::validation::{is_valid_email, is_valid_phone};
use supamenu::{Destination, Severity};
use web_common::SignupRequest;

use crate::console::ConsoleContext;

/// First problem with the registration form, if any.
fn signup_problem(form: &SignupRequest) -> Option<&'static str> {
    let required = [
        &form.first_name,
        &form.last_name,
        &form.phone,
        &form.national_id,
        &form.email,
    ];
    if required.iter().any(|value| value.trim().is_empty()) || form.password.is_empty() {
        Some("All fields are required")
    } else if !is_valid_email(&form.email) {
        Some("Please enter a valid email address")
    } else if !is_valid_phone(&form.phone) {
        Some("Please enter a valid phone number")
    } else if !form.national_id.trim().chars().all(|c| c.is_ascii_digit()) {
        Some("National ID must be digits only")
    } else {
        None
    }
}

#[component]
fn SignupField(
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-[#888888] text-xs mb-1.5 font-medium">{label}</label>
            <input
                type=input_type
                class="w-full bg-[#111111] border border-[#ffffff08] rounded px-3 py-2 text-sm text-white focus:border-[#00d9ff] focus:outline-none transition-colors"
                prop:value=move || value.get()
                on:input=move |ev| set_value.set(event_target_value(&ev))
            />
        </div>
    }
}

/// Account registration. Does not sign in; the user continues at the login page.
#[component]
pub fn SignupPage() -> impl IntoView {
    let console = use_context::<ConsoleContext>().expect("ConsoleContext not found");
    let navigate = use_navigate();

    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (phone, set_phone) = signal(String::new());
    let (national_id, set_national_id) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let submit = move || {
        if is_submitting.get_untracked() {
            return;
        }
        let form = SignupRequest {
            first_name: first_name.get_untracked().trim().to_string(),
            last_name: last_name.get_untracked().trim().to_string(),
            phone: phone.get_untracked().trim().to_string(),
            national_id: national_id.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        if let Some(problem) = signup_problem(&form) {
            set_error.set(Some(problem.to_string()));
            return;
        }
        let api = match console.api() {
            Ok(api) => api,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };

        set_error.set(None);
        set_is_submitting.set(true);
        let navigate = navigate.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match api.signup(&form).await {
                Ok(user) => {
                    log::info!("registered {}", user.email);
                    console.notify(Severity::Success, "Account created successfully! Please sign in.");
                    navigate(Destination::Login.path(), Default::default());
                }
                Err(e) => {
                    log::warn!("Signup failed: {}", e);
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
                <h2 class="text-lg font-semibold text-white">"Create your SupaMenu account"</h2>

                <div class="grid grid-cols-2 gap-3">
                    <SignupField label="First name" value=first_name set_value=set_first_name />
                    <SignupField label="Last name" value=last_name set_value=set_last_name />
                </div>
                <SignupField label="Phone" input_type="tel" value=phone set_value=set_phone />
                <SignupField label="National ID" value=national_id set_value=set_national_id />
                <SignupField label="Email" input_type="email" value=email set_value=set_email />
                <SignupField label="Password" input_type="password" value=password set_value=set_password />

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
                    {move || if is_submitting.get() { "Creating account..." } else { "Sign up" }}
                </button>

                <p class="text-center text-xs text-[#888888]">
                    "Already have an account? "
                    <A href=Destination::Login.path() attr:class="text-[#00d9ff] hover:underline">"Sign in"</A>
                </p>
            </form>
        </div>
    }
}
