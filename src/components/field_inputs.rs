//! Field Inputs Component
//!
//! The content inputs a profile exposes, bound to a `RawFields` signal.
//! Shared by the add form and the editor.

use leptos::prelude::*;

use keeplist_core::AmountRule;

use crate::models::{Field, RawFields};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn FieldInputs(
    raw: ReadSignal<RawFields>,
    set_raw: WriteSignal<RawFields>,
    /// Show the body as a large editor instead of a short textarea
    #[prop(optional)]
    full_body: bool,
) -> impl IntoView {
    let store = use_app_store();
    let has_field = move |field: Field| store.profile().with(|profile| profile.has_field(field));

    let text_placeholder = move || {
        store.profile().with(|profile| match &profile.untitled {
            Some(untitled) => format!("{} (optional)", untitled),
            None => format!("Add {}...", profile.noun),
        })
    };
    let amount_placeholder = move || {
        store.profile().with(|profile| match profile.amount_rule {
            AmountRule::Positive => "Price",
            _ => "Amount (negative for expense)",
        })
    };
    let categories = move || store.profile().with(|profile| profile.categories.clone());
    let list_id = if full_body { "category-options-editor" } else { "category-options" };

    view! {
        <div class="field-inputs">
            <input
                type="text"
                class="field-text"
                placeholder=text_placeholder
                prop:value=move || raw.with(|r| r.text.clone())
                on:input=move |ev| set_raw.update(|r| r.text = event_target_value(&ev))
            />

            <Show when=move || has_field(Field::Body)>
                <textarea
                    class=if full_body { "field-body full" } else { "field-body" }
                    placeholder="Write in Markdown..."
                    prop:value=move || raw.with(|r| r.body.clone())
                    on:input=move |ev| set_raw.update(|r| r.body = event_target_value(&ev))
                ></textarea>
            </Show>

            <Show when=move || has_field(Field::Amount)>
                <input
                    type="number"
                    step="0.01"
                    class="field-amount"
                    placeholder=amount_placeholder
                    prop:value=move || raw.with(|r| r.amount.clone())
                    on:input=move |ev| set_raw.update(|r| r.amount = event_target_value(&ev))
                />
            </Show>

            <Show when=move || has_field(Field::Quantity)>
                <input
                    type="number"
                    min="1"
                    step="1"
                    class="field-quantity"
                    placeholder="Qty"
                    prop:value=move || raw.with(|r| r.quantity.clone())
                    on:input=move |ev| set_raw.update(|r| r.quantity = event_target_value(&ev))
                />
            </Show>

            <Show when=move || has_field(Field::Category)>
                <input
                    type="text"
                    class="field-category"
                    list=list_id
                    placeholder="Category"
                    prop:value=move || raw.with(|r| r.category.clone())
                    on:input=move |ev| set_raw.update(|r| r.category = event_target_value(&ev))
                />
                <datalist id=list_id>
                    {move || {
                        categories()
                            .into_iter()
                            .map(|category| view! { <option value=category></option> })
                            .collect_view()
                    }}
                </datalist>
            </Show>

            <Show when=move || has_field(Field::Date)>
                <input
                    type="date"
                    class="field-date"
                    prop:value=move || raw.with(|r| r.date.clone())
                    on:input=move |ev| set_raw.update(|r| r.date = event_target_value(&ev))
                />
            </Show>
        </div>
    }
}
