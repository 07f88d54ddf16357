//! Keeplist Frontend App
//!
//! Main application component: list column plus editor column.

use leptos::prelude::*;

use crate::components::{
    NewRecordForm, ProfileTabBar, RecordEditor, RecordList, SummaryBar, ToastArea, Toolbar,
};
use crate::context::AppContext;
use crate::store::AppStateStoreFields;

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::open();
    let store = ctx.store();

    // Provide context to all children
    provide_context(ctx);
    provide_context(store);

    let visible = Memo::new(move |_| ctx.visible_records());

    // Keep the selection on a visible record
    Effect::new(move |_| {
        visible.with(|records| ctx.reconcile_selection(records));
    });

    view! {
        <div class="app-layout">
            <main class="main-content">
                <ProfileTabBar />

                <h1>{move || store.profile().with(|profile| profile.label.clone())}</h1>

                <NewRecordForm />
                <Toolbar />
                <RecordList visible=visible />
                <SummaryBar visible=visible />
            </main>

            <RecordEditor />
            <ToastArea />
        </div>
    }
}
