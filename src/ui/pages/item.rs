use dioxus::prelude::*;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::{
    domain::{pricing_history, EditableField, HistoryRecord, PricingEngine},
    ui::components::editable_cell::{format_margin, format_money},
};

const HISTORY_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[month repr:short] [day padded:none], [year]");

/// Per-product detail view: identity header plus the simulated pricing
/// history table, newest first.
#[component]
pub fn ItemPage(id: String) -> Element {
    let engine = use_context::<Signal<PricingEngine>>();

    let found = engine.with(|eng| eng.item(&id).cloned().map(|item| (item, eng.today())));

    let Some((item, today)) = found else {
        return rsx! {
            div { class: "space-y-6",
                BackButton {}
                div { class: "flex h-[40vh] items-center justify-center",
                    p { class: "text-xl text-slate-400", "Item not found" }
                }
            }
        };
    };

    let records = pricing_history(&item, today);

    rsx! {
        div { class: "space-y-8",
            div { class: "flex flex-col gap-4 sm:flex-row sm:items-center",
                BackButton {}
                div {
                    h2 { class: "text-2xl font-bold text-slate-100", "{item.name}" }
                    p { class: "text-sm text-slate-500", "UPC: {item.upc} | Category: {item.category}" }
                }
            }

            div {
                class: "rounded-xl border border-slate-800 bg-slate-900/40",
                header {
                    class: "border-b border-slate-800 px-4 py-3",
                    h3 { class: "text-lg font-semibold text-slate-200", "Pricing History" }
                    p { class: "text-sm text-slate-500", "Green values indicate changes from the previous period" }
                }
                div { class: "overflow-x-auto",
                    table {
                        class: "min-w-full divide-y divide-slate-800 text-sm",
                        thead {
                            class: "bg-slate-900 text-left text-xs uppercase tracking-wide text-slate-500",
                            tr {
                                th { class: "px-4 py-3 font-medium", "Date" }
                                th { class: "px-4 py-3 font-medium text-right", "Import Cost" }
                                th { class: "px-4 py-3 font-medium text-right", "Shipping" }
                                th { class: "px-4 py-3 font-medium text-right", "Customs" }
                                th { class: "px-4 py-3 font-medium text-right", "Handling" }
                                th { class: "px-4 py-3 font-medium text-right", "Cost Price" }
                                th { class: "px-4 py-3 font-medium text-right", "Sale Price" }
                                th { class: "px-4 py-3 font-medium text-right", "Net Profit" }
                                th { class: "px-4 py-3 font-medium text-right", "Margin %" }
                            }
                        }
                        tbody {
                            class: "divide-y divide-slate-800",
                            for record in records {
                                HistoryRowView { key: "{record.date}", record }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn BackButton() -> Element {
    let nav = use_navigator();
    rsx! {
        button {
            class: "rounded-lg border border-slate-700 px-4 py-2 text-sm text-slate-300 transition hover:border-slate-500 hover:text-slate-100",
            onclick: move |_| { nav.go_back(); },
            "← Back to Pricing"
        }
    }
}

#[component]
fn HistoryRowView(record: HistoryRecord) -> Element {
    let date_label = record
        .date
        .format(&HISTORY_DATE)
        .unwrap_or_else(|_| record.date.to_string());
    let item = &record.item;

    rsx! {
        tr {
            class: "hover:bg-slate-800/40",
            td {
                class: "px-4 py-3 font-medium text-slate-200",
                "{date_label}"
                if record.is_current {
                    span {
                        class: "ml-2 rounded bg-sky-500/15 px-2 py-0.5 text-xs font-medium text-sky-300",
                        "Current"
                    }
                }
            }
            td { class: history_cell(&record, Some(EditableField::ImportCost)), {format_money(item.import_cost)} }
            td { class: history_cell(&record, Some(EditableField::ShippingCost)), {format_money(item.shipping_cost)} }
            td { class: history_cell(&record, Some(EditableField::CustomsDuty)), {format_money(item.customs_duty)} }
            td { class: history_cell(&record, Some(EditableField::HandlingFee)), {format_money(item.handling_fee)} }
            td { class: "px-4 py-3 text-right font-medium text-slate-200", {format_money(item.cost_price)} }
            td { class: history_cell(&record, Some(EditableField::SalePrice)), {format_money(item.sale_price)} }
            td { class: history_cell(&record, None), {format_money(item.net_profit)} }
            td { class: history_cell(&record, None), {format_margin(item.profit_margin)} }
        }
    }
}

fn history_cell(record: &HistoryRecord, field: Option<EditableField>) -> &'static str {
    match field {
        Some(field) if record.field_changed(field) => {
            "px-4 py-3 text-right font-medium text-emerald-400"
        }
        _ => "px-4 py-3 text-right text-slate-300",
    }
}
