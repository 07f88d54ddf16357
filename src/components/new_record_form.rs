//! New Record Form Component
//!
//! Collects raw field values and submits them for validation. The inputs
//! are cleared only when the record was added.

use leptos::prelude::*;

use crate::components::FieldInputs;
use crate::context::use_app_context;
use crate::store::AppStateStoreFields;

#[component]
pub fn NewRecordForm() -> impl IntoView {
    let ctx = use_app_context();
    let (raw, set_raw) = signal(ctx.blank_fields());

    let create_record = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if ctx.create(&raw.get_untracked()) {
            set_raw.set(ctx.blank_fields());
        }
    };

    // a different profile has different fields
    Effect::new(move |_| {
        ctx.store().profile().track();
        set_raw.set(ctx.blank_fields());
    });

    view! {
        <form class="new-record-form" on:submit=create_record>
            <FieldInputs raw=raw set_raw=set_raw />
            <button type="submit">"Add"</button>
        </form>
    }
}
