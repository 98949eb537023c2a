//! Create-restaurant wizard.
//!
//! The component is a view over a [`WizardSession`]: inputs turn into
//! [`DraftPatch`]es, buttons call the session, and what is rendered is a
//! snapshot of the session's state and draft refreshed after every call.
//! Validation, submission, toasts and redirects all happen in the session.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos_router::hooks::use_navigate;
use supamenu::client::ReqwestTransport;
use supamenu::draft::fields;
use supamenu::{
    Attachment, Destination, DraftEntity, DraftMenuItem, DraftPatch, OwnerDetails, StepId,
    WizardSession, WizardState,
};
use web_common::{CuisineType, MenuCategory, OpeningHours, RestaurantType};

use super::files::{read_attachment, selected_files};
use crate::console::{ConsoleContext, RouterNavigator, ToastSink};

type ConsoleWizard = WizardSession<ReqwestTransport, ToastSink, RouterNavigator>;

const INPUT_CLASS: &str = "w-full bg-[#111111] border rounded px-3 py-2 text-sm text-white focus:border-[#00d9ff] focus:outline-none transition-colors";

fn input_class(has_error: bool) -> String {
    format!(
        "{} {}",
        INPUT_CLASS,
        if has_error { "border-[#ef4444]" } else { "border-[#ffffff08]" }
    )
}

/// Copyable handle the step components edit the wizard through.
#[derive(Clone, Copy)]
struct WizardHandle {
    session: StoredValue<Rc<ConsoleWizard>, LocalStorage>,
    state: ReadSignal<WizardState>,
    set_state: WriteSignal<WizardState>,
    draft: ReadSignal<DraftEntity>,
    set_draft: WriteSignal<DraftEntity>,
}

impl WizardHandle {
    fn refresh(&self) {
        self.session.try_with_value(|session| {
            self.set_state.set(session.state());
            self.set_draft.set(session.draft());
        });
    }

    fn edit(&self, patch: DraftPatch) {
        self.session.try_with_value(|session| session.edit(patch));
        self.refresh();
    }

    fn current(&self) -> Option<DraftEntity> {
        self.session.try_with_value(|session| session.draft())
    }

    fn edit_owner(&self, f: impl FnOnce(&mut OwnerDetails)) {
        let Some(mut owner) = self.current().map(|draft| draft.owner) else {
            return;
        };
        f(&mut owner);
        self.edit(DraftPatch {
            owner: Some(owner),
            ..Default::default()
        });
    }

    fn edit_hours(&self, f: impl FnOnce(&mut OpeningHours)) {
        let Some(mut hours) = self.current().map(|draft| draft.opening_hours) else {
            return;
        };
        f(&mut hours);
        self.edit(DraftPatch {
            opening_hours: Some(hours),
            ..Default::default()
        });
    }

    fn edit_images(&self, f: impl FnOnce(&mut Vec<Attachment>)) {
        let Some(mut images) = self.current().map(|draft| draft.images) else {
            return;
        };
        f(&mut images);
        self.edit(DraftPatch {
            images: Some(images),
            ..Default::default()
        });
    }

    fn edit_menu(&self, f: impl FnOnce(&mut Vec<DraftMenuItem>)) {
        let Some(mut items) = self.current().map(|draft| draft.menu_items) else {
            return;
        };
        f(&mut items);
        self.edit(DraftPatch {
            menu_items: Some(items),
            ..Default::default()
        });
    }

    fn edit_item(&self, index: usize, f: impl FnOnce(&mut DraftMenuItem)) {
        self.edit_menu(|items| {
            if let Some(item) = items.get_mut(index) {
                f(item);
            }
        });
    }

    fn text(&self, read: fn(&DraftEntity) -> String) -> Signal<String> {
        let draft = self.draft;
        Signal::derive(move || draft.with(read))
    }

    fn item_text(&self, index: usize, read: fn(&DraftMenuItem) -> String) -> Signal<String> {
        let draft = self.draft;
        Signal::derive(move || {
            draft.with(|d| d.menu_items.get(index).map(read).unwrap_or_default())
        })
    }

    fn error(&self, key: impl Into<String>) -> Signal<Option<String>> {
        let key = key.into();
        let state = self.state;
        Signal::derive(move || state.with(|s| s.error(&key).map(str::to_string)))
    }
}

/// Restaurant creation wizard page.
#[component]
pub fn RestaurantWizard() -> impl IntoView {
    let console = use_context::<ConsoleContext>().expect("ConsoleContext not found");
    let navigate = use_navigate();

    let api = match console.api() {
        Ok(api) => api,
        Err(e) => {
            log::error!("Invalid API configuration: {}", e);
            return view! {
                <div class="p-6 text-sm text-[#ef4444]">{e.to_string()}</div>
            }
            .into_any();
        }
    };

    let session = Rc::new(WizardSession::new(api, ToastSink::new(console), RouterNavigator::new()));
    let (state, set_state) = signal(session.state());
    let (draft, set_draft) = signal(session.draft());
    let wizard = WizardHandle {
        session: StoredValue::new_local(session),
        state,
        set_state,
        draft,
        set_draft,
    };

    let step = Memo::new(move |_| state.with(WizardState::step));
    let (is_submitting, set_is_submitting) = signal(false);
    let (show_exit_warning, set_show_exit_warning) = signal(false);

    let submit = move || {
        let Some(session) = wizard.session.try_with_value(Rc::clone) else {
            return;
        };
        set_is_submitting.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            match session.submit().await {
                Ok(restaurant) => console.remember_restaurant(restaurant.id),
                Err(e) => log::warn!("Restaurant not created: {}", e),
            }
            // The component may already be gone after a redirect.
            set_state.try_set(session.state());
            set_draft.try_set(session.draft());
            set_is_submitting.try_set(session.state().is_submitting());
            console.sync_session();
        });
    };

    view! {
        <div class="min-h-screen bg-[#0a0a0a] flex items-center justify-center p-4">
            <div class="bg-[#0d0d0d] border border-[#ffffff15] rounded-lg shadow-2xl w-full max-w-4xl max-h-[90vh] flex flex-col">
                <WizardHeader step=step />

                <div class="flex-1 overflow-y-auto p-6">
                    <Show when=move || step.get() == StepId::Profile>
                        <ProfileStep wizard=wizard />
                    </Show>
                    <Show when=move || step.get() == StepId::TypeAndTiming>
                        <TypeAndTimingStep wizard=wizard />
                    </Show>
                    <Show when=move || step.get() == StepId::Menu>
                        <MenuStep wizard=wizard />
                    </Show>
                </div>

                <WizardFooter
                    wizard=wizard
                    step=step
                    is_submitting=is_submitting
                    on_cancel=move || set_show_exit_warning.set(true)
                    on_submit=submit
                />
            </div>

            <Show when=move || show_exit_warning.get()>
                <ExitWarningModal
                    on_cancel=move || set_show_exit_warning.set(false)
                    on_confirm={
                        let navigate = navigate.clone();
                        move || {
                            set_show_exit_warning.set(false);
                            navigate(Destination::Dashboard.path(), Default::default());
                        }
                    }
                />
            </Show>
        </div>
    }
    .into_any()
}

/// Title and progress indicator.
#[component]
fn WizardHeader(step: Memo<StepId>) -> impl IntoView {
    view! {
        <div class="border-b border-[#ffffff08] p-6">
            <h2 class="text-lg font-semibold text-white mb-4">"Create Restaurant Profile"</h2>

            <div class="flex items-center gap-2">
                {StepId::ALL
                    .into_iter()
                    .map(|each| {
                        let is_current = move || step.get() == each;
                        let is_completed = move || step.get().number() > each.number();
                        view! {
                            <div class=move || format!(
                                "flex items-center justify-center w-8 h-8 rounded-full text-xs font-semibold transition-colors {}",
                                if is_current() {
                                    "bg-[#00d9ff] text-black"
                                } else if is_completed() {
                                    "bg-[#22c55e] text-black"
                                } else {
                                    "bg-[#1a1a1a] text-[#666666] border border-[#ffffff08]"
                                }
                            )>
                                {move || if is_completed() { "✓".to_string() } else { each.number().to_string() }}
                            </div>
                            <Show when=move || each != StepId::LAST>
                                <div class=move || format!(
                                    "h-0.5 w-12 transition-colors {}",
                                    if is_completed() { "bg-[#22c55e]" } else { "bg-[#ffffff08]" }
                                )></div>
                            </Show>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="mt-4">
                <h3 class="text-sm font-semibold text-white">{move || step.get().title()}</h3>
                <p class="text-xs text-[#888888] mt-1">{move || step.get().description()}</p>
            </div>
        </div>
    }
}

#[component]
fn FieldError(error: Signal<Option<String>>) -> impl IntoView {
    view! {
        {move || error.get().map(|message| view! {
            <p class="text-xs text-[#ef4444] mt-1">{message}</p>
        })}
    }
}

#[component]
fn TextField<F>(
    label: &'static str,
    value: Signal<String>,
    error: Signal<Option<String>>,
    on_input: F,
    #[prop(optional)] required: bool,
    #[prop(optional)] placeholder: &'static str,
    #[prop(default = "text")] input_type: &'static str,
) -> impl IntoView
where
    F: Fn(String) + Send + Sync + 'static,
{
    view! {
        <div>
            <label class="block text-[#888888] text-xs mb-1.5 font-medium">
                {label}
                {required.then(|| view! { <span class="text-[#ef4444]">" *"</span> })}
            </label>
            <input
                type=input_type
                class=move || input_class(error.with(Option::is_some))
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input(event_target_value(&ev))
            />
            <FieldError error=error />
        </div>
    }
}

#[component]
fn ProfileStep(wizard: WizardHandle) -> impl IntoView {
    view! {
        <div class="space-y-4">
            <div class="grid grid-cols-2 gap-4">
                <TextField
                    label="Restaurant Name" required=true placeholder="e.g., Joe's"
                    value=wizard.text(|d| d.name.clone())
                    error=wizard.error(fields::NAME)
                    on_input=move |v| wizard.edit(DraftPatch { name: Some(v), ..Default::default() })
                />
                <TextField
                    label="Location" required=true placeholder="e.g., Kigali Center"
                    value=wizard.text(|d| d.location.clone())
                    error=wizard.error(fields::LOCATION)
                    on_input=move |v| wizard.edit(DraftPatch { location: Some(v), ..Default::default() })
                />
            </div>
            <TextField
                label="Complete Name" placeholder="e.g., Joe's Grill & Bar"
                value=wizard.text(|d| d.complete_name.clone())
                error=wizard.error(fields::COMPLETE_NAME)
                on_input=move |v| wizard.edit(DraftPatch { complete_name: Some(v), ..Default::default() })
            />
            <TextField
                label="Contact Number" required=true placeholder="07XXXXXXXX" input_type="tel"
                value=wizard.text(|d| d.contact_number.clone())
                error=wizard.error(fields::CONTACT_NUMBER)
                on_input=move |v| wizard.edit(DraftPatch { contact_number: Some(v), ..Default::default() })
            />

            <div class="border-t border-[#ffffff08] pt-4">
                <h4 class="text-sm font-semibold text-white mb-3">"Owner Details"</h4>
                <div class="grid grid-cols-3 gap-4">
                    <TextField
                        label="Name" required=true
                        value=wizard.text(|d| d.owner.name.clone())
                        error=wizard.error(fields::OWNER_NAME)
                        on_input=move |v| wizard.edit_owner(|owner| owner.name = v)
                    />
                    <TextField
                        label="Email" required=true input_type="email"
                        value=wizard.text(|d| d.owner.email.clone())
                        error=wizard.error(fields::OWNER_EMAIL)
                        on_input=move |v| wizard.edit_owner(|owner| owner.email = v)
                    />
                    <TextField
                        label="Phone" required=true input_type="tel"
                        value=wizard.text(|d| d.owner.phone.clone())
                        error=wizard.error(fields::OWNER_PHONE)
                        on_input=move |v| wizard.edit_owner(|owner| owner.phone = v)
                    />
                </div>
            </div>
        </div>
    }
}

#[component]
fn TypeAndTimingStep(wizard: WizardHandle) -> impl IntoView {
    let draft = wizard.draft;
    let type_error = wizard.error(fields::RESTAURANT_TYPE);
    let cuisine_error = wizard.error(fields::CUISINE_TYPE);
    let images_error = wizard.error(fields::IMAGES);

    let add_images = move |ev: leptos::ev::Event| {
        for file in selected_files(&ev) {
            read_attachment(file, move |attachment| {
                wizard.edit_images(|images| images.push(attachment));
            });
        }
    };

    view! {
        <div class="space-y-4">
            <div class="grid grid-cols-2 gap-4">
                <div>
                    <label class="block text-[#888888] text-xs mb-1.5 font-medium">
                        "Restaurant Type" <span class="text-[#ef4444]">" *"</span>
                    </label>
                    <select
                        class=move || input_class(type_error.with(Option::is_some))
                        prop:value=move || draft.with(|d| d.restaurant_type.map(|t| t.value()).unwrap_or_default())
                        on:change=move |ev| wizard.edit(DraftPatch {
                            restaurant_type: event_target_value(&ev).parse::<RestaurantType>().ok(),
                            ..Default::default()
                        })
                    >
                        <option value="" disabled=true>"Select a type"</option>
                        {RestaurantType::all()
                            .into_iter()
                            .map(|t| view! { <option value=t.value()>{t.display_name()}</option> })
                            .collect_view()}
                    </select>
                    <FieldError error=type_error />
                </div>
                <div>
                    <label class="block text-[#888888] text-xs mb-1.5 font-medium">
                        "Cuisine" <span class="text-[#ef4444]">" *"</span>
                    </label>
                    <select
                        class=move || input_class(cuisine_error.with(Option::is_some))
                        prop:value=move || draft.with(|d| d.cuisine_type.map(|c| c.value()).unwrap_or_default())
                        on:change=move |ev| wizard.edit(DraftPatch {
                            cuisine_type: event_target_value(&ev).parse::<CuisineType>().ok(),
                            ..Default::default()
                        })
                    >
                        <option value="" disabled=true>"Select a cuisine"</option>
                        {CuisineType::all()
                            .into_iter()
                            .map(|c| view! { <option value=c.value()>{c.display_name()}</option> })
                            .collect_view()}
                    </select>
                    <FieldError error=cuisine_error />
                </div>
            </div>

            <div class="grid grid-cols-2 gap-4">
                <TextField
                    label="Opens at" required=true input_type="time"
                    value=wizard.text(|d| d.opening_hours.from.clone())
                    error=wizard.error(fields::OPENING_FROM)
                    on_input=move |v| wizard.edit_hours(|hours| hours.from = v)
                />
                <TextField
                    label="Closes at" required=true input_type="time"
                    value=wizard.text(|d| d.opening_hours.to.clone())
                    error=wizard.error(fields::OPENING_TO)
                    on_input=move |v| wizard.edit_hours(|hours| hours.to = v)
                />
            </div>

            <div class="border-t border-[#ffffff08] pt-4">
                <h4 class="text-sm font-semibold text-white mb-3">"Restaurant Images"</h4>
                <label class="block border-2 border-dashed border-[#ffffff20] rounded-lg p-4 text-center hover:border-[#00d9ff40] transition-colors cursor-pointer">
                    <p class="text-[10px] text-[#888888]">"Click to add images (max 5MB each)"</p>
                    <input type="file" accept="image/*" multiple=true class="hidden" on:change=add_images />
                </label>
                <ul class="mt-2 space-y-1">
                    {move || draft.with(|d| {
                        d.images
                            .iter()
                            .enumerate()
                            .map(|(index, image)| {
                                let label = format!("{} ({} KB)", image.file_name, image.size() / 1024);
                                view! {
                                    <li class="flex items-center justify-between text-xs text-[#cccccc]">
                                        <span>{label}</span>
                                        <button
                                            type="button"
                                            class="text-[#666666] hover:text-[#ef4444]"
                                            on:click=move |_| wizard.edit_images(|images| {
                                                if index < images.len() {
                                                    images.remove(index);
                                                }
                                            })
                                        >
                                            "Remove"
                                        </button>
                                    </li>
                                }
                            })
                            .collect_view()
                    })}
                </ul>
                <FieldError error=images_error />
            </div>
        </div>
    }
}

#[component]
fn MenuStep(wizard: WizardHandle) -> impl IntoView {
    let draft = wizard.draft;
    let rows = move || {
        draft.with(|d| {
            d.menu_items
                .iter()
                .enumerate()
                .map(|(index, item)| (index, item.id.clone()))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="space-y-4">
            <For
                each=rows
                key=|row| row.clone()
                children=move |(index, _)| view! { <MenuItemRow wizard=wizard index=index /> }
            />

            <FieldError error=wizard.error(fields::MENU_ITEMS) />

            <button
                type="button"
                class="px-4 py-2 bg-[#1a1a1a] border border-[#ffffff08] rounded text-sm text-white hover:bg-[#222222] transition-colors"
                on:click=move |_| wizard.edit_menu(|items| {
                    items.push(DraftMenuItem::new("", "", "", MenuCategory::default()));
                })
            >
                "+ Add menu item"
            </button>
        </div>
    }
}

#[component]
fn MenuItemRow(wizard: WizardHandle, index: usize) -> impl IntoView {
    let draft = wizard.draft;
    let key = move |attribute: &str| fields::menu_item(index, attribute);
    let image_error = wizard.error(key("image"));
    let id_error = wizard.error(key("id"));

    let set_image = move |ev: leptos::ev::Event| {
        if let Some(file) = selected_files(&ev).into_iter().next() {
            read_attachment(file, move |attachment| {
                wizard.edit_item(index, |item| item.image = Some(attachment));
            });
        }
    };

    view! {
        <div class="border border-[#ffffff08] rounded-lg p-4 bg-[#0a0a0a] space-y-3">
            <div class="flex items-center justify-between">
                <h4 class="text-sm font-semibold text-white">{format!("Item {}", index + 1)}</h4>
                <button
                    type="button"
                    class="text-xs text-[#666666] hover:text-[#ef4444] transition-colors"
                    on:click=move |_| wizard.edit_menu(|items| {
                        if index < items.len() {
                            items.remove(index);
                        }
                    })
                >
                    "Remove"
                </button>
            </div>

            <div class="grid grid-cols-3 gap-3">
                <TextField
                    label="Name" required=true
                    value=wizard.item_text(index, |item| item.name.clone())
                    error=wizard.error(key("name"))
                    on_input=move |v| wizard.edit_item(index, |item| item.name = v)
                />
                <TextField
                    label="Price (RWF)" required=true placeholder="3500"
                    value=wizard.item_text(index, |item| item.price.clone())
                    error=wizard.error(key("price"))
                    on_input=move |v| wizard.edit_item(index, |item| item.price = v)
                />
                <div>
                    <label class="block text-[#888888] text-xs mb-1.5 font-medium">"Category"</label>
                    <select
                        class=input_class(false)
                        prop:value=move || draft.with(|d| {
                            d.menu_items.get(index).map(|item| item.category.value()).unwrap_or_default()
                        })
                        on:change=move |ev| {
                            if let Ok(category) = event_target_value(&ev).parse::<MenuCategory>() {
                                wizard.edit_item(index, |item| item.category = category);
                            }
                        }
                    >
                        {MenuCategory::all()
                            .into_iter()
                            .map(|c| view! { <option value=c.value()>{c.display_name()}</option> })
                            .collect_view()}
                    </select>
                </div>
            </div>

            <TextField
                label="Description" required=true
                value=wizard.item_text(index, |item| item.description.clone())
                error=wizard.error(key("description"))
                on_input=move |v| wizard.edit_item(index, |item| item.description = v)
            />

            <div class="flex items-center gap-3">
                <label class="px-3 py-1.5 bg-[#1a1a1a] border border-[#ffffff08] rounded text-xs text-white cursor-pointer hover:bg-[#222222]">
                    "Choose image"
                    <input type="file" accept="image/*" class="hidden" on:change=set_image />
                </label>
                <span class="text-xs text-[#888888]">
                    {move || draft.with(|d| {
                        d.menu_items
                            .get(index)
                            .and_then(|item| item.image.as_ref())
                            .map(|image| image.file_name.clone())
                            .unwrap_or_else(|| "No image".to_string())
                    })}
                </span>
            </div>
            <FieldError error=image_error />
            <FieldError error=id_error />
        </div>
    }
}

/// Banner and navigation buttons.
#[component]
fn WizardFooter<C, S>(
    wizard: WizardHandle,
    step: Memo<StepId>,
    is_submitting: ReadSignal<bool>,
    on_cancel: C,
    on_submit: S,
) -> impl IntoView
where
    C: Fn() + Clone + Send + Sync + 'static,
    S: Fn() + Clone + Send + Sync + 'static,
{
    let state = wizard.state;
    let go_back = move |_| {
        wizard.session.try_with_value(|session| session.back());
        wizard.refresh();
    };
    let go_next = move |_| {
        wizard.session.try_with_value(|session| session.next());
        wizard.refresh();
    };

    view! {
        <div class="border-t border-[#ffffff08] p-6">
            {move || state.with(|s| s.banner().map(str::to_string)).map(|banner| view! {
                <div class="mb-4 p-3 bg-[#ef444410] border border-[#ef4444] rounded text-sm text-[#ef4444]">
                    {banner}
                </div>
            })}

            <div class="flex items-center justify-between">
                <button
                    type="button"
                    class="px-4 py-2 text-sm text-[#888888] hover:text-white transition-colors"
                    on:click=move |_| on_cancel()
                >
                    "Cancel"
                </button>

                <div class="flex gap-3">
                    <Show when=move || step.get() != StepId::FIRST>
                        <button
                            type="button"
                            class="px-4 py-2 bg-[#1a1a1a] border border-[#ffffff08] rounded text-sm text-white hover:bg-[#222222] transition-colors disabled:opacity-50"
                            disabled=move || is_submitting.get()
                            on:click=go_back
                        >
                            "← Back"
                        </button>
                    </Show>

                    <Show when=move || step.get() != StepId::LAST>
                        <button
                            type="button"
                            class="px-4 py-2 bg-[#00d9ff] rounded text-sm text-black font-semibold hover:bg-[#00c4e6] transition-colors"
                            on:click=go_next
                        >
                            "Next →"
                        </button>
                    </Show>

                    <Show when=move || step.get() == StepId::LAST>
                        {
                            let on_submit = on_submit.clone();
                            move || {
                                let on_submit = on_submit.clone();
                                view! {
                                    <button
                                        type="button"
                                        class=move || format!(
                                            "px-4 py-2 bg-[#22c55e] rounded text-sm text-black font-semibold transition-colors {}",
                                            if is_submitting.get() {
                                                "opacity-50 cursor-not-allowed"
                                            } else {
                                                "hover:bg-[#16a34a]"
                                            }
                                        )
                                        disabled=move || is_submitting.get()
                                        on:click=move |_| on_submit()
                                    >
                                        {move || if is_submitting.get() { "Creating..." } else { "Create Restaurant" }}
                                    </button>
                                }
                            }
                        }
                    </Show>
                </div>
            </div>
        </div>
    }
}

#[component]
fn ExitWarningModal<F1, F2>(on_cancel: F1, on_confirm: F2) -> impl IntoView
where
    F1: Fn() + Clone + Send + Sync + 'static,
    F2: Fn() + Clone + Send + Sync + 'static,
{
    view! {
        <div class="fixed inset-0 bg-black/70 flex items-center justify-center z-[60]">
            <div class="bg-[#0d0d0d] border border-[#ffffff15] rounded-lg shadow-2xl w-full max-w-md p-6">
                <div class="flex-1 mb-4">
                    <h3 class="text-base font-semibold text-white mb-1">"Discard this restaurant?"</h3>
                    <p class="text-sm text-[#888888]">
                        "The information you entered will be lost if you leave now."
                    </p>
                </div>

                <div class="flex gap-3 justify-end">
                    <button
                        type="button"
                        class="px-4 py-2 bg-[#1a1a1a] border border-[#ffffff08] rounded text-sm text-white hover:bg-[#222222] transition-colors"
                        on:click=move |_| on_cancel()
                    >
                        "Continue Editing"
                    </button>
                    <button
                        type="button"
                        class="px-4 py-2 bg-[#ef4444] rounded text-sm text-white font-semibold hover:bg-[#dc2626] transition-colors"
                        on:click=move |_| on_confirm()
                    >
                        "Discard"
                    </button>
                </div>
            </div>
        </div>
    }
}
