//! Profile Tab Bar Component
//!
//! Tab bar for switching between the built-in lists.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::ListProfile;
use crate::store::AppStateStoreFields;

#[component]
pub fn ProfileTabBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store();

    view! {
        <div class="profile-tab-bar">
            {ListProfile::builtin()
                .into_iter()
                .map(|profile| {
                    let name = profile.name.clone();
                    let active_name = profile.name.clone();
                    let is_active = move || store.profile().with(|open| open.name == active_name);
                    let tab_class = move || {
                        if is_active() { "profile-tab active" } else { "profile-tab" }
                    };

                    view! {
                        <button class=tab_class on:click=move |_| ctx.open_profile(&name)>
                            {profile.label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
