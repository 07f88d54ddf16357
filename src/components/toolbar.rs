//! Toolbar Component
//!
//! Search box, filter chips, sort selector and list-wide actions.

use leptos::prelude::*;

use crate::components::ConfirmButton;
use crate::context::use_app_context;
use crate::models::{ClearScope, Field, Filter, Flag, SortKey};
use crate::store::AppStateStoreFields;

#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store();

    // profile filters, then one chip per category in use
    let chips = move || {
        let (mut filters, by_category) = store
            .profile()
            .with(|profile| (profile.filters.clone(), profile.has_field(Field::Category)));
        if by_category {
            filters.extend(ctx.categories().into_iter().map(Filter::Category));
        }
        filters
    };

    let sort_value = move || {
        store
            .query()
            .with(|query| query.sort.map(|sort| sort.as_str()).unwrap_or(""))
    };
    let has_done = move || store.profile().with(|profile| profile.has_flag(Flag::Done));

    view! {
        <div class="toolbar">
            <input
                type="search"
                class="search-input"
                placeholder="Search..."
                prop:value=move || store.query().with(|query| query.search.clone())
                on:input=move |ev| ctx.set_search(event_target_value(&ev))
            />

            <div class="filter-chips">
                <For
                    each=chips
                    key=|filter| filter.key()
                    children=move |filter| {
                        let label = filter.label();
                        let current = filter.clone();
                        let is_active = move || store.query().with(|query| query.filter == current);
                        view! {
                            <button
                                class=move || if is_active() { "chip active" } else { "chip" }
                                on:click=move |_| ctx.set_filter(filter.clone())
                            >
                                {label}
                            </button>
                        }
                    }
                />
            </div>

            <select
                class="sort-select"
                prop:value=sort_value
                on:change=move |ev| ctx.set_sort(SortKey::parse(&event_target_value(&ev)))
            >
                <option value="">"Newest added"</option>
                {move || {
                    store.profile().with(|profile| {
                        profile
                            .sorts
                            .iter()
                            .map(|sort| view! { <option value=sort.as_str()>{sort.label()}</option> })
                            .collect_view()
                    })
                }}
            </select>

            <div class="toolbar-actions">
                <button class="export-btn" on:click=move |_| ctx.export()>"Export"</button>
                <Show when=has_done>
                    <button class="clear-done-btn" on:click=move |_| ctx.clear(ClearScope::Done)>
                        "Clear done"
                    </button>
                </Show>
                <ConfirmButton
                    button_class="clear-all-btn"
                    label="Clear all"
                    prompt="Clear every record?"
                    on_confirm=Callback::new(move |_| ctx.clear(ClearScope::All))
                />
            </div>
        </div>
    }
}
