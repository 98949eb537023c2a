//! Toast stack for notifications raised by the wizard, login and dashboard.

use leptos::prelude::*;
use supamenu::Severity;

use crate::console::{ConsoleContext, Toast};

/// Toast container - renders every pending notification.
#[component]
pub fn ToastContainer() -> impl IntoView {
    let console = use_context::<ConsoleContext>().expect("ConsoleContext not found");
    let toasts = console.toasts;

    view! {
        <div class="fixed bottom-4 left-4 z-50 flex flex-col gap-2 max-w-sm">
            <For
                each=move || toasts.get()
                key=|toast| toast.id
                children=move |toast| view! { <ToastItem toast=toast /> }
            />
        </div>
    }
}

fn accent(severity: Severity) -> (&'static str, &'static str) {
    match severity {
        Severity::Success => ("text-[#22c55e]", "border-[#22c55e40]"),
        Severity::Info => ("text-[#00d9ff]", "border-[#00d9ff40]"),
        Severity::Warning => ("text-[#f59e0b]", "border-[#f59e0b40]"),
        Severity::Error => ("text-[#ff4444]", "border-[#ff444440]"),
    }
}

#[component]
fn ToastItem(toast: Toast) -> impl IntoView {
    let console = use_context::<ConsoleContext>().expect("ConsoleContext not found");
    let id = toast.id;

    // Errors stay up longer
    let lifetime = match toast.severity {
        Severity::Error => std::time::Duration::from_secs(8),
        _ => std::time::Duration::from_secs(5),
    };
    set_timeout(move || console.dismiss(id), lifetime);

    let (icon_class, border_class) = accent(toast.severity);
    let icon_path = match toast.severity {
        Severity::Success => "M5 13l4 4L19 7",
        _ => "M12 8v4m0 4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z",
    };

    view! {
        <div class=format!("flex items-start gap-2 p-3 rounded-lg border shadow-lg bg-[#0d0d0d] {}", border_class)>
            <div class=icon_class>
                <svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d=icon_path/>
                </svg>
            </div>
            <p class="flex-1 text-[11px] text-white">{toast.message}</p>
            <button
                class="text-[#666666] hover:text-white transition-colors"
                on:click=move |_| console.dismiss(id)
            >
                <svg class="w-3 h-3" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12"/>
                </svg>
            </button>
        </div>
    }
}
