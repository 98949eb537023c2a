use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use supamenu::{Destination, Severity};
use web_common::{MetricsDto, OrderDto, OrderStatus};

use super::menu_panel::MenuPanel;
use crate::console::ConsoleContext;

const STATUSES: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Preparing,
    OrderStatus::Served,
    OrderStatus::Paid,
    OrderStatus::Cancelled,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Orders,
    Menu,
}

/// Restaurant dashboard: headline metrics, then the orders or the menu.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let console = use_context::<ConsoleContext>().expect("ConsoleContext not found");
    let navigate = use_navigate();

    let (metrics, set_metrics) = signal::<Option<MetricsDto>>(None);
    let (orders, set_orders) = signal::<Vec<OrderDto>>(Vec::new());
    let (status, set_status) = signal::<Option<OrderStatus>>(None);
    let (loading, set_loading) = signal(false);
    let (tab, set_tab) = signal(Tab::Orders);

    // Reload whenever the filter changes
    Effect::new(move |_| {
        let filter = status.get();
        if !console.signed_in.get_untracked() {
            return;
        }
        let api = match console.api() {
            Ok(api) => api,
            Err(e) => {
                console.notify(Severity::Error, e.to_string());
                return;
            }
        };

        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match api.metrics().await {
                Ok(m) => {
                    set_metrics.try_set(Some(m));
                }
                Err(e) => console.report(e),
            }
            match api.orders(filter).await {
                Ok(list) => {
                    set_orders.try_set(list);
                }
                Err(e) => console.report(e),
            }
            set_loading.try_set(false);
        });
    });

    let greeting = move || {
        console
            .user
            .get()
            .map(|user| format!("Signed in as {}", user.display_name()))
            .unwrap_or_default()
    };

    view! {
        <div class="min-h-screen bg-[#0a0a0a] p-6 space-y-6">
            <header class="flex items-center justify-between">
                <div>
                    <h1 class="text-lg font-semibold text-white">"Restaurant Dashboard"</h1>
                    <p class="text-xs text-[#888888]">{greeting}</p>
                </div>
                <div class="flex gap-3">
                    <button
                        type="button"
                        class="px-4 py-2 bg-[#22c55e] rounded text-sm text-black font-semibold hover:bg-[#16a34a] transition-colors"
                        on:click=move |_| navigate(Destination::CreateRestaurant.path(), Default::default())
                    >
                        "+ New Restaurant"
                    </button>
                    <button
                        type="button"
                        class="px-4 py-2 text-sm text-[#888888] hover:text-white transition-colors"
                        on:click=move |_| {
                            console.sign_out();
                            console.notify(Severity::Info, "Signed out");
                        }
                    >
                        "Sign out"
                    </button>
                </div>
            </header>

            <div class="grid grid-cols-3 gap-4">
                <MetricCard label="Total Orders" value=Signal::derive(move || {
                    metrics.get().map(|m| m.total_orders.to_string()).unwrap_or_else(|| "-".to_string())
                }) />
                <MetricCard label="Pending Orders" value=Signal::derive(move || {
                    metrics.get().map(|m| m.pending_orders.to_string()).unwrap_or_else(|| "-".to_string())
                }) />
                <MetricCard label="Total Sales" value=Signal::derive(move || {
                    metrics.get().map(|m| format!("{:.0} RWF", m.total_sales)).unwrap_or_else(|| "-".to_string())
                }) />
            </div>

            <section class="bg-[#0d0d0d] border border-[#ffffff08] rounded-lg">
                <div class="flex items-center justify-between p-4 border-b border-[#ffffff08]">
                    <div class="flex gap-4">
                        <TabButton label="Orders" active=Signal::derive(move || tab.get() == Tab::Orders) on_click=move || set_tab.set(Tab::Orders) />
                        <TabButton label="Menu" active=Signal::derive(move || tab.get() == Tab::Menu) on_click=move || set_tab.set(Tab::Menu) />
                    </div>
                    <select
                        class:hidden=move || tab.get() != Tab::Orders
                        class="bg-[#111111] border border-[#ffffff08] rounded px-3 py-1.5 text-xs text-white"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            set_status.set(STATUSES.into_iter().find(|s| s.value() == value));
                        }
                    >
                        <option value="">"All statuses"</option>
                        {STATUSES
                            .into_iter()
                            .map(|s| view! { <option value=s.value()>{s.value()}</option> })
                            .collect_view()}
                    </select>
                </div>

                <Show when=move || tab.get() == Tab::Menu>
                    <MenuPanel/>
                </Show>
                <Show
                    when=move || tab.get() == Tab::Orders && !loading.get()
                    fallback=move || view! {
                        <Show when=move || tab.get() == Tab::Orders && loading.get()>
                            <p class="p-4 text-xs text-[#888888]">"Loading..."</p>
                        </Show>
                    }
                >
                    <table class="w-full text-xs text-left text-[#cccccc]">
                        <thead class="text-[#888888]">
                            <tr>
                                <th class="p-3">"Order"</th>
                                <th class="p-3">"Table"</th>
                                <th class="p-3">"Items"</th>
                                <th class="p-3">"Total"</th>
                                <th class="p-3">"Status"</th>
                                <th class="p-3">"Placed"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || orders.get()
                                key=|order| order.id.clone()
                                children=|order| {
                                    let items = order.order_items.iter().map(|line| line.quantity).sum::<u32>();
                                    view! {
                                        <tr class="border-t border-[#ffffff08]">
                                            <td class="p-3 font-mono">{format!("#{}", order.id)}</td>
                                            <td class="p-3">{order.table_number}</td>
                                            <td class="p-3">{items}</td>
                                            <td class="p-3">{format!("{:.0} RWF", order.total_amount)}</td>
                                            <td class="p-3">{order.status.value()}</td>
                                            <td class="p-3">{order.created_at}</td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                    <Show when=move || orders.with(Vec::is_empty)>
                        <p class="p-4 text-xs text-[#666666]">"No orders yet"</p>
                    </Show>
                </Show>
            </section>
        </div>
    }
}

#[component]
fn TabButton<F>(label: &'static str, active: Signal<bool>, on_click: F) -> impl IntoView
where
    F: Fn() + Clone + Send + Sync + 'static,
{
    view! {
        <button
            type="button"
            class=move || if active.get() {
                "text-sm font-semibold text-white border-b-2 border-[#00d9ff] pb-1"
            } else {
                "text-sm text-[#888888] hover:text-white pb-1"
            }
            on:click=move |_| on_click()
        >
            {label}
        </button>
    }
}

#[component]
fn MetricCard(label: &'static str, value: Signal<String>) -> impl IntoView {
    view! {
        <div class="bg-[#0d0d0d] border border-[#ffffff08] rounded-lg p-4">
            <p class="text-xs text-[#888888]">{label}</p>
            <p class="text-xl font-semibold text-white mt-1">{move || value.get()}</p>
        </div>
    }
}
