//! Menu tab of the dashboard: one restaurant's items, a category and a page at a time.

use leptos::prelude::*;
use supamenu::Severity;
use web_common::{MenuCategory, MenuItemPage, RestaurantDto};

use crate::console::ConsoleContext;

const PAGE_SIZE: u32 = 10;

#[component]
pub fn MenuPanel() -> impl IntoView {
    let console = use_context::<ConsoleContext>().expect("ConsoleContext not found");

    let (id_input, set_id_input) = signal(console.restaurant_id.get_untracked().unwrap_or_default());
    let (restaurant, set_restaurant) = signal::<Option<RestaurantDto>>(None);
    let (category, set_category) = signal(MenuCategory::Drink);
    let (page, set_page) = signal(0u32);
    let (items, set_items) = signal::<Option<MenuItemPage>>(None);
    let (confirm_delete, set_confirm_delete) = signal(false);

    // Restaurant header
    Effect::new(move |_| {
        let Some(id) = console.restaurant_id.get() else {
            set_restaurant.set(None);
            return;
        };
        let api = match console.api() {
            Ok(api) => api,
            Err(e) => {
                console.notify(Severity::Error, e.to_string());
                return;
            }
        };
        wasm_bindgen_futures::spawn_local(async move {
            match api.restaurant(&id).await {
                Ok(found) => {
                    set_restaurant.try_set(Some(found));
                }
                Err(e) => {
                    set_restaurant.try_set(None);
                    console.report(e);
                }
            }
        });
    });

    // Items for the selected category and page
    Effect::new(move |_| {
        let (Some(id), category, page) = (console.restaurant_id.get(), category.get(), page.get()) else {
            set_items.set(None);
            return;
        };
        let api = match console.api() {
            Ok(api) => api,
            Err(e) => {
                console.notify(Severity::Error, e.to_string());
                return;
            }
        };
        wasm_bindgen_futures::spawn_local(async move {
            match api.menu_items(&id, category, page, PAGE_SIZE).await {
                Ok(found) => {
                    set_items.try_set(Some(found));
                }
                Err(e) => console.report(e),
            }
        });
    });

    let open = move || {
        set_page.set(0);
        console.remember_restaurant(id_input.get_untracked());
    };

    let delete = move || {
        set_confirm_delete.set(false);
        let Some(id) = console.restaurant_id.get_untracked() else {
            return;
        };
        let api = match console.api() {
            Ok(api) => api,
            Err(e) => {
                console.notify(Severity::Error, e.to_string());
                return;
            }
        };
        wasm_bindgen_futures::spawn_local(async move {
            match api.delete_restaurant(&id).await {
                Ok(()) => {
                    console.notify(Severity::Success, "Restaurant deleted");
                    console.forget_restaurant();
                    set_id_input.try_set(String::new());
                }
                Err(e) => console.report(e),
            }
        });
    };

    let total_pages = move || items.with(|p| p.as_ref().map_or(0, |p| p.total_pages));

    view! {
        <div class="p-4 space-y-4">
            <form
                class="flex gap-2"
                on:submit=move |ev| {
                    ev.prevent_default();
                    open();
                }
            >
                <input
                    type="text"
                    placeholder="Restaurant ID"
                    class="flex-1 bg-[#111111] border border-[#ffffff08] rounded px-3 py-1.5 text-xs text-white focus:border-[#00d9ff] focus:outline-none"
                    prop:value=move || id_input.get()
                    on:input=move |ev| set_id_input.set(event_target_value(&ev))
                />
                <button type="submit" class="px-3 py-1.5 bg-[#111111] border border-[#ffffff08] rounded text-xs text-white hover:bg-[#1a1a1a]">
                    "Open"
                </button>
            </form>

            {move || restaurant.get().map(|r| view! {
                <div class="flex items-center justify-between">
                    <div>
                        <p class="text-sm font-semibold text-white">{r.name}</p>
                        <p class="text-xs text-[#888888]">
                            {format!("{} · {} · {}-{}", r.location, r.cuisine_type.display_name(), r.opening_hours.from, r.opening_hours.to)}
                        </p>
                    </div>
                    <button
                        type="button"
                        class="px-3 py-1.5 text-xs text-[#ff4444] border border-[#ff444440] rounded hover:bg-[#ff444410]"
                        on:click=move |_| set_confirm_delete.set(true)
                    >
                        "Delete restaurant"
                    </button>
                </div>
            })}

            <div class="flex flex-wrap gap-2">
                {MenuCategory::all()
                    .into_iter()
                    .map(|c| view! {
                        <button
                            type="button"
                            class=move || if category.get() == c {
                                "px-4 py-1.5 rounded-full text-xs bg-[#00d9ff] text-black font-semibold"
                            } else {
                                "px-4 py-1.5 rounded-full text-xs border border-[#00d9ff40] text-[#00d9ff]"
                            }
                            on:click=move |_| {
                                set_page.set(0);
                                set_category.set(c);
                            }
                        >
                            {c.display_name()}
                        </button>
                    })
                    .collect_view()}
            </div>

            <Show
                when=move || console.restaurant_id.with(Option::is_some)
                fallback=|| view! { <p class="text-xs text-[#666666]">"Open a restaurant to see its menu"</p> }
            >
                <div class="space-y-2">
                    <For
                        each=move || items.get().map(|p| p.content).unwrap_or_default()
                        key=|item| item.id.clone()
                        children=|item| {
                            let available = item.available;
                            view! {
                                <div class="flex items-start justify-between bg-[#111111] rounded p-3">
                                    <div>
                                        <p class="text-sm text-white">{item.name}</p>
                                        <p class="text-xs text-[#888888]">{item.description}</p>
                                    </div>
                                    <div class="text-right">
                                        <p class="text-xs text-[#22c55e]">{format!("Frw {}", item.price)}</p>
                                        <Show when=move || !available>
                                            <p class="text-[10px] text-[#f59e0b]">"unavailable"</p>
                                        </Show>
                                    </div>
                                </div>
                                }
                        }
                    />
                    <Show when=move || items.with(|p| p.as_ref().is_some_and(|p| p.content.is_empty()))>
                        <p class="text-xs text-[#666666]">"No items in this category"</p>
                    </Show>
                </div>
                <div class="flex items-center justify-end gap-3 text-xs text-[#888888]">
                    <button
                        type="button"
                        class="hover:text-white disabled:opacity-30"
                        disabled=move || page.get() == 0
                        on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1))
                    >
                        "Previous"
                    </button>
                    <span>{move || format!("Page {} of {}", page.get() + 1, total_pages().max(1))}</span>
                    <button
                        type="button"
                        class="hover:text-white disabled:opacity-30"
                        disabled=move || page.get() + 1 >= total_pages()
                        on:click=move |_| set_page.update(|p| *p += 1)
                    >
                        "Next"
                    </button>
                </div>
            </Show>

            <Show when=move || confirm_delete.get()>
                <div class="fixed inset-0 bg-black/80 flex items-center justify-center z-50">
                    <div class="bg-[#111111] border border-[#ffffff15] rounded-lg p-6 max-w-sm space-y-4">
                        <p class="text-sm text-white">"Delete this restaurant and its menu? This cannot be undone."</p>
                        <div class="flex justify-end gap-3">
                            <button
                                type="button"
                                class="px-4 py-2 text-sm text-[#888888] hover:text-white"
                                on:click=move |_| set_confirm_delete.set(false)
                            >
                                "Cancel"
                            </button>
                            <button
                                type="button"
                                class="px-4 py-2 bg-[#ff4444] rounded text-sm text-white font-semibold hover:bg-[#e03c3c]"
                                on:click=move |_| delete()
                            >
                                "Delete"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}
