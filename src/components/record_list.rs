//! Record List Component
//!
//! Renders the visible list. Row actions carry the record id, never a
//! position in the list.

use leptos::prelude::*;

use crate::components::RecordRow;
use crate::context::use_app_context;
use crate::models::Record;
use crate::store::AppStateStoreFields;

#[component]
pub fn RecordList(visible: Memo<Vec<Record>>) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store();

    let empty_message = move || {
        let noun = store.profile().with(|profile| profile.noun.clone());
        if store.records().with(|records| records.is_empty()) {
            format!("No {}s yet", noun)
        } else {
            format!("No {}s match", noun)
        }
    };

    view! {
        <div class="record-list">
            <Show when=move || visible.with(|records| records.is_empty())>
                <p class="empty-state">{empty_message}</p>
            </Show>

            <For
                each=move || visible.get()
                key=|record| {
                    // every field a row displays, so edits re-render the row
                    (
                        record.id.clone(),
                        record.updated_at,
                        record.done,
                        record.pinned,
                        record.quantity,
                    )
                }
                children=move |record| {
                    let id = record.id.clone();
                    let selected_id = id.clone();
                    let is_selected = move || {
                        store.selection().with(|selection| selection.is_selected(&selected_id))
                    };

                    view! {
                        <div
                            class=move || if is_selected() { "record-wrapper selected" } else { "record-wrapper" }
                            on:click=move |_| ctx.select(&id)
                        >
                            <RecordRow record=record />
                        </div>
                    }
                }
            />
        </div>
    }
}
