//! Record Row Component
//!
//! One record in the list with its per-record actions.

use leptos::prelude::*;

use crate::components::ConfirmButton;
use crate::context::use_app_context;
use crate::models::{format_amount, format_timestamp, Field, Flag, Record};
use crate::store::AppStateStoreFields;

/// A single record row
#[component]
pub fn RecordRow(record: Record) -> impl IntoView {
    let ctx = use_app_context();
    let profile = ctx.store().profile().get_untracked();

    let id = record.id.clone();
    let title = profile.display_text(&record.text).to_string();
    let row_class = match (record.done, record.pinned) {
        (true, _) => "record-row done",
        (false, true) => "record-row pinned",
        (false, false) => "record-row",
    };

    let checkbox = profile.has_flag(Flag::Done).then(|| {
        let id = id.clone();
        view! {
            <input
                type="checkbox"
                checked=record.done
                on:click=|ev| ev.stop_propagation()
                on:change=move |_| ctx.toggle_flag(&id, Flag::Done)
            />
        }
    });

    let pin_button = profile.has_flag(Flag::Pinned).then(|| {
        let id = id.clone();
        let pinned = record.pinned;
        view! {
            <button
                class=if pinned { "pin-btn active" } else { "pin-btn" }
                title=if pinned { "Unpin" } else { "Pin" }
                on:click=move |ev| {
                    ev.stop_propagation();
                    ctx.toggle_flag(&id, Flag::Pinned);
                }
            >
                {if pinned { "★" } else { "☆" }}
            </button>
        }
    });

    let body_preview = profile.has_field(Field::Body).then(|| {
        view! {
            <span class="record-preview">{record.preview()}</span>
            <span class="record-meta">
                {format!("{} words · {}", record.word_count(), format_timestamp(record.updated_at))}
            </span>
        }
    });

    // signed amount for transactions, price × qty for cart lines
    let amount = record.amount.map(|amount| {
        let class = if amount < 0.0 { "record-amount expense" } else { "record-amount income" };
        let text = match record.quantity {
            Some(quantity) if profile.has_field(Field::Quantity) => format!(
                "{} × {} = {}",
                format_amount(amount),
                quantity,
                format_amount(record.line_total().unwrap_or(amount))
            ),
            _ => format_amount(amount),
        };
        view! { <span class=class>{text}</span> }
    });

    let category = record
        .category
        .clone()
        .map(|category| view! { <span class="record-category">{category}</span> });

    let date = record
        .date
        .map(|date| view! { <span class="record-date">{date.format("%Y-%m-%d").to_string()}</span> });

    let quantity_controls = profile.has_field(Field::Quantity).then(|| {
        let dec_id = id.clone();
        let inc_id = id.clone();
        view! {
            <span class="quantity-controls">
                <button
                    class="qty-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        ctx.adjust_quantity(&dec_id, -1);
                    }
                >
                    "−"
                </button>
                <button
                    class="qty-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        ctx.adjust_quantity(&inc_id, 1);
                    }
                >
                    "+"
                </button>
            </span>
        }
    });

    let duplicate_id = id.clone();
    let remove_id = id;

    view! {
        <div class=row_class>
            {checkbox}

            <div class="record-main">
                <span class="record-text">{title}</span>
                {body_preview}
                <span class="record-details">{amount} {category} {date}</span>
            </div>

            {quantity_controls}
            {pin_button}

            <button
                class="duplicate-btn"
                title="Duplicate"
                on:click=move |ev| {
                    ev.stop_propagation();
                    ctx.duplicate(&duplicate_id);
                }
            >
                "⧉"
            </button>

            <ConfirmButton
                button_class="delete-btn"
                label="×"
                on_confirm=Callback::new(move |_| ctx.remove(&remove_id))
            />
        </div>
    }
}
