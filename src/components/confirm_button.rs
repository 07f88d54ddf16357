//! Two-step button for actions that discard records.

use leptos::prelude::*;

/// Shows `label`; a click arms it and asks `prompt`. Only the second
/// click runs `on_confirm`. Row clicks never see either click.
#[component]
pub fn ConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into)] label: String,
    #[prop(into, default = "Delete?".to_string())] prompt: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let armed = RwSignal::new(false);
    let set_armed = move |ev: web_sys::MouseEvent, value: bool| {
        ev.stop_propagation();
        armed.set(value);
    };

    move || {
        if armed.get() {
            view! {
                <span class="confirm">
                    <span class="confirm-prompt">{prompt.clone()}</span>
                    <button
                        class="confirm-yes"
                        on:click=move |ev| {
                            set_armed(ev, false);
                            on_confirm.run(());
                        }
                    >
                        "Yes"
                    </button>
                    <button class="confirm-no" on:click=move |ev| set_armed(ev, false)>
                        "No"
                    </button>
                </span>
            }
            .into_any()
        } else {
            view! {
                <button class=button_class.clone() on:click=move |ev| set_armed(ev, true)>
                    {label.clone()}
                </button>
            }
            .into_any()
        }
    }
}
