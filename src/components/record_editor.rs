//! Record Editor Column
//!
//! Edits the selected record. Profiles with a body get a side-by-side
//! markdown preview. Edits are saved when focus leaves the form and
//! before another record is loaded into it.

use leptos::prelude::*;

use crate::components::FieldInputs;
use crate::context::use_app_context;
use crate::markdown::parse_markdown;
use crate::models::{format_timestamp, Field, RawFields, RecordId};
use crate::store::AppStateStoreFields;

#[component]
pub fn RecordEditor() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store();

    let (raw, set_raw) = signal(RawFields::default());
    let (last_target_id, set_last_target_id) = signal::<Option<RecordId>>(None);
    // Form values as last loaded or saved
    let baseline = RwSignal::new(RawFields::default());
    let dirty = move || raw.with(|r| baseline.with(|b| r != b));

    let selected = Memo::new(move |_| {
        let id = store.selection().with(|selection| selection.id().cloned())?;
        store
            .records()
            .with(|records| records.iter().find(|record| record.id == id).cloned())
    });

    // Write pending edits to `id` if it is still in the list
    let flush = move |id: &RecordId| {
        if raw.with_untracked(|r| baseline.with_untracked(|b| r == b)) {
            return;
        }
        let listed = store
            .records()
            .with_untracked(|records| records.iter().any(|record| &record.id == id));
        if listed && ctx.update(id, &raw.get_untracked()) {
            baseline.set(raw.get_untracked());
        }
    };
    let save_current = move || {
        if let Some(id) = last_target_id.get_untracked() {
            flush(&id);
        }
    };
    let load_selected = move || {
        let values = selected
            .with_untracked(|record| record.as_ref().map(RawFields::from_record))
            .unwrap_or_default();
        baseline.set(values.clone());
        set_raw.set(values);
    };

    // Save the old target, then load form values when the target changes
    Effect::new(move |_| {
        let current_id = selected.with(|record| record.as_ref().map(|r| r.id.clone()));
        if current_id != last_target_id.get_untracked() {
            save_current();
            load_selected();
            set_last_target_id.set(current_id);
        }
    });

    let has_body = move || store.profile().with(|profile| profile.has_field(Field::Body));
    let meta = move || {
        selected.with(|record| {
            record
                .as_ref()
                .map(|r| {
                    format!(
                        "Created {} · Updated {}",
                        format_timestamp(r.created_at),
                        format_timestamp(r.updated_at)
                    )
                })
                .unwrap_or_default()
        })
    };
    let rendered_html = move || raw.with(|r| parse_markdown(&r.body));

    view! {
        <Show when=move || selected.with(|record| record.is_some())>
            <div class="record-editor-column">
                <div class="record-editor-header">
                    <span class="record-editor-title">
                        {move || store.profile().with(|profile| format!("Edit {}", profile.noun))}
                    </span>
                    <span class="record-editor-meta">{meta}</span>
                    <Show when=dirty>
                        <span class="record-editor-dirty">"Unsaved changes"</span>
                    </Show>
                </div>

                <div class="record-editor-body">
                    <div class="record-edit-pane" on:focusout=move |_| save_current()>
                        <FieldInputs raw=raw set_raw=set_raw full_body=true />
                        <div class="record-editor-actions">
                            <button class="save-btn" on:click=move |_| save_current()>"Save"</button>
                        </div>
                    </div>

                    <Show when=has_body>
                        <div class="record-preview-pane">
                            <div class="pane-header">"Preview"</div>
                            <div class="record-preview-content" inner_html=rendered_html></div>
                        </div>
                    </Show>
                </div>
            </div>
        </Show>
    }
}
