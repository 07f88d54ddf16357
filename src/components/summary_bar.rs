//! Summary Bar Component
//!
//! Counts for the whole list, plus money totals for amount profiles.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::{format_amount, Field, Flag, Record};
use crate::store::AppStateStoreFields;

#[component]
pub fn SummaryBar(visible: Memo<Vec<Record>>) -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store();
    let summary = Memo::new(move |_| ctx.summary(visible.with(|records| records.len())));

    let counts = move || {
        let summary = summary.get();
        store.profile().with(|profile| {
            let mut parts = vec![format!("{} {}(s)", summary.total, profile.noun)];
            if summary.visible != summary.total {
                parts.push(format!("{} shown", summary.visible));
            }
            if profile.has_flag(Flag::Done) {
                parts.push(format!("{} done", summary.done));
            }
            if profile.has_flag(Flag::Pinned) {
                parts.push(format!("{} pinned", summary.pinned));
            }
            parts.join(" · ")
        })
    };

    // cart lines carry a quantity; transactions carry a sign
    let totals = move || {
        let amounts = summary.with(|summary| summary.amounts)?;
        let is_cart = store.profile().with(|profile| profile.has_field(Field::Quantity));
        let text = if is_cart {
            format!("{} unit(s) · Total {}", amounts.units, format_amount(amounts.balance))
        } else {
            format!(
                "Income {} · Expense {} · Balance {} · This month {}",
                format_amount(amounts.income),
                format_amount(amounts.expense),
                format_amount(amounts.balance),
                format_amount(amounts.this_month)
            )
        };
        Some(view! { <span class="summary-totals">{text}</span> })
    };

    view! {
        <p class="summary-bar">
            <span class="summary-counts">{counts}</span>
            {totals}
        </p>
    }
}
