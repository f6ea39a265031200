use dioxus::prelude::*;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::{
    app::Route,
    domain::{CategoryFilter, EditableField, PricedItem, PricingEngine, PricingError},
    ui::components::{
        editable_cell::format_margin,
        kpi_card::KpiCard,
        pricing_table::PricingTable,
        toast::{push_toast, ToastKind, ToastMessage},
    },
};

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const LONG_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:long] [day padded:none], [year]");

#[component]
pub fn PricingPage() -> Element {
    let mut engine = use_context::<Signal<PricingEngine>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();

    let mut search = use_signal(String::new);
    let mut category_filter = use_signal(CategoryFilter::default);

    let categories = engine.with(|eng| eng.categories().to_vec());
    let is_historical = engine.with(|eng| eng.is_historical());
    let view_date = engine.with(|eng| eng.view_date());

    let query = search().trim().to_lowercase();
    let items: Vec<PricedItem> = engine
        .with(|eng| eng.visible_items())
        .into_iter()
        .filter(|item| query.is_empty() || item.name.to_lowercase().contains(&query))
        .collect();

    let (product_count, total_stock, average_margin) = summarize(&items);
    let date_input_value = view_date
        .map(|date| format_date(date, ISO_DATE))
        .unwrap_or_default();
    let banner_date = view_date
        .filter(|_| is_historical)
        .map(|date| format_date(date, LONG_DATE));

    let on_commit = {
        let toasts = toasts.clone();
        move |(item_id, field, raw): (String, EditableField, String)| {
            let outcome = engine.with_mut(|eng| eng.set_field(&item_id, field, &raw));
            match outcome {
                Ok(item) => push_toast(
                    toasts.clone(),
                    ToastKind::Success,
                    format!("Updated {} {}", item.name, field.label()),
                ),
                Err(err) => push_edit_error(toasts.clone(), err),
            }
        }
    };

    let on_revert = {
        let toasts = toasts.clone();
        move |(item_id, field): (String, EditableField)| {
            let outcome = engine.with_mut(|eng| eng.revert_field(&item_id, field));
            match outcome {
                Ok(item) => push_toast(
                    toasts.clone(),
                    ToastKind::Success,
                    format!("Reverted {} {} to original value", item.name, field.label()),
                ),
                Err(err) => push_edit_error(toasts.clone(), err),
            }
        }
    };

    let on_open_item = move |id: String| {
        nav.push(Route::Item { id });
    };

    let on_date_change = move |evt: FormEvent| {
        let value = evt.value();
        engine.with_mut(|eng| {
            if value.is_empty() {
                eng.exit_historical_view();
            } else if let Ok(date) = Date::parse(&value, ISO_DATE) {
                eng.enter_historical_view(date);
            }
        });
    };

    let on_return_to_current = move |_| {
        engine.with_mut(|eng| eng.exit_historical_view());
    };

    let export_toasts = toasts.clone();
    let add_toasts = toasts.clone();

    rsx! {
        div { class: "space-y-8",
            section {
                class: "grid gap-4 sm:grid-cols-3",
                KpiCard {
                    title: "Products".to_string(),
                    value: format!("{product_count}"),
                    description: Some("Across all categories".to_string()),
                }
                KpiCard {
                    title: "Average Margin".to_string(),
                    value: average_margin.map(format_margin).unwrap_or_else(|| "—".to_string()),
                    description: Some("Products with a defined margin".to_string()),
                }
                KpiCard {
                    title: "Units In Stock".to_string(),
                    value: format!("{total_stock}"),
                    description: None,
                }
            }

            section {
                class: "flex flex-col gap-4 sm:flex-row sm:items-end sm:justify-between",
                div { class: "w-full max-w-sm",
                    label { class: "block text-xs font-semibold uppercase text-slate-500", "Search" }
                    input {
                        class: "mt-1 w-full rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                        value: search(),
                        oninput: move |evt| search.set(evt.value().to_string()),
                        placeholder: "Search products...",
                    }
                }
                div { class: "flex flex-wrap items-end gap-2",
                    div {
                        label { class: "block text-xs font-semibold uppercase text-slate-500", "View pricing as of" }
                        input {
                            class: "mt-1 rounded-lg border border-slate-700 bg-slate-950 px-3 py-2 text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                            r#type: "date",
                            value: date_input_value,
                            onchange: on_date_change,
                        }
                    }
                    button {
                        class: "rounded-lg border border-slate-700 px-4 py-2 text-sm text-slate-300 transition hover:border-slate-500 disabled:cursor-not-allowed disabled:opacity-40",
                        disabled: is_historical,
                        onclick: move |_| push_toast(
                            export_toasts.clone(),
                            ToastKind::Info,
                            "Export is not available in the sample build.",
                        ),
                        "Export"
                    }
                    button {
                        class: "rounded-lg bg-indigo-500 px-4 py-2 text-sm font-semibold text-white hover:bg-indigo-400 disabled:cursor-not-allowed disabled:opacity-40",
                        disabled: is_historical,
                        onclick: move |_| push_toast(
                            add_toasts.clone(),
                            ToastKind::Info,
                            "Add Product is not available in the sample build.",
                        ),
                        "Add Product"
                    }
                }
            }

            if let Some(date_label) = banner_date {
                div {
                    class: "flex flex-wrap items-center gap-2 rounded-md border border-amber-500/40 bg-amber-500/10 px-4 py-3 text-sm text-amber-200",
                    span { {format!("Viewing historical pricing data as of {date_label}. Editing is disabled.")} }
                    button {
                        class: "font-semibold underline hover:text-amber-100",
                        onclick: on_return_to_current,
                        "Return to current pricing"
                    }
                }
            }

            PricingTable {
                items,
                categories,
                category_filter: category_filter(),
                read_only: is_historical,
                on_filter_change: move |filter| category_filter.set(filter),
                on_commit,
                on_revert,
                on_open_item,
            }
        }
    }
}

fn summarize(items: &[PricedItem]) -> (usize, u64, Option<f64>) {
    let mut total_stock = 0u64;
    let mut margin_sum = 0.0;
    let mut margin_count = 0usize;
    for item in items {
        total_stock += u64::from(item.in_stock);
        if item.margin_defined() {
            margin_sum += item.profit_margin;
            margin_count += 1;
        }
    }
    let average = (margin_count > 0)
        .then(|| crate::domain::round_currency(margin_sum / margin_count as f64));
    (items.len(), total_stock, average)
}

fn format_date(date: Date, format: &[BorrowedFormatItem<'_>]) -> String {
    date.format(&format).unwrap_or_else(|_| date.to_string())
}

fn push_edit_error(toasts: Signal<Vec<ToastMessage>>, err: PricingError) {
    match err {
        PricingError::InvalidNumber(raw) => push_toast(
            toasts,
            ToastKind::Error,
            format!("{raw:?} is not a valid amount; the previous value was kept."),
        ),
        PricingError::UnknownItem(id) => {
            push_toast(toasts, ToastKind::Error, format!("Unknown product: {id}"))
        }
        PricingError::HistoricalView => push_toast(
            toasts,
            ToastKind::Warning,
            "Editing is disabled while viewing historical pricing.",
        ),
    }
}
