//! Toast Area Component

use leptos::prelude::*;

use crate::models::ToastKind;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ToastArea() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="toast-area">
            <For
                each=move || store.toasts().get()
                key=|toast| toast.id
                children=|toast| {
                    let class = match toast.kind {
                        ToastKind::Info => "toast",
                        ToastKind::Error => "toast error",
                    };
                    view! { <div class=class>{toast.message}</div> }
                }
            />
        </div>
    }
}
