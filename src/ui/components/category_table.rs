use std::cmp::Ordering;

use dioxus::prelude::*;

use super::editable_cell::format_margin;
use super::margin_badge::MarginBadge;
use crate::domain::CategoryAggregate;

#[derive(Clone, Copy, PartialEq, Eq)]
enum SortMode {
    Name,
    Products,
    Margin,
    Stock,
}

/// Read-only summary grid over the category aggregates. The edit and
/// delete actions are presentational stubs surfaced to the page as events.
#[component]
pub fn CategoryTable(
    rows: Vec<CategoryAggregate>,
    on_edit: EventHandler<String>,
    on_delete: EventHandler<String>,
) -> Element {
    let sort_mode = use_signal(|| SortMode::Name);
    let current_sort = sort_mode();
    let is_empty = rows.is_empty();

    let mut rendered: Vec<(usize, CategoryAggregate)> = rows.into_iter().enumerate().collect();
    sort_rows(&mut rendered, current_sort);

    rsx! {
        div {
            class: "rounded-xl border border-slate-800 bg-slate-900/40",
            header {
                class: "flex flex-wrap items-center justify-between gap-2 border-b border-slate-800 px-4 py-3",
                h3 { class: "text-sm font-semibold text-slate-200", "Categories" }
                span { class: "text-xs text-slate-500", {format!("{} categories", rendered.len())} }
            }
            if !is_empty {
                div {
                    class: "flex flex-wrap items-center gap-2 border-b border-slate-800 bg-slate-950/40 px-4 py-2 text-xs uppercase tracking-wide text-slate-400",
                    span { "Sort:" }
                    SortButton { mode: SortMode::Name, label: "Name", current: current_sort, sort_mode: sort_mode.clone() }
                    SortButton { mode: SortMode::Products, label: "Products", current: current_sort, sort_mode: sort_mode.clone() }
                    SortButton { mode: SortMode::Margin, label: "Avg. Margin", current: current_sort, sort_mode: sort_mode.clone() }
                    SortButton { mode: SortMode::Stock, label: "Stock", current: current_sort, sort_mode: sort_mode.clone() }
                }
            }
            if is_empty {
                p { class: "px-4 py-6 text-sm text-slate-500", "No categories in the catalog." }
            } else {
                table {
                    class: "min-w-full divide-y divide-slate-800 text-sm",
                    thead {
                        class: "bg-slate-900 text-left text-xs uppercase tracking-wide text-slate-500",
                        tr {
                            th { class: "px-4 py-3 font-medium", "ID" }
                            th { class: "px-4 py-3 font-medium", "Category Name" }
                            th { class: "px-4 py-3 font-medium text-center", "Products" }
                            th { class: "px-4 py-3 font-medium text-right", "Avg. Margin" }
                            th { class: "px-4 py-3 font-medium text-right", "Total Stock" }
                            th { class: "px-4 py-3 font-medium text-right", "Actions" }
                        }
                    }
                    tbody {
                        class: "divide-y divide-slate-800",
                        for (index, aggregate) in rendered {
                            CategoryRowView {
                                key: "{aggregate.name}",
                                id: index + 1,
                                aggregate,
                                on_edit: on_edit.clone(),
                                on_delete: on_delete.clone(),
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CategoryRowView(
    id: usize,
    aggregate: CategoryAggregate,
    on_edit: EventHandler<String>,
    on_delete: EventHandler<String>,
) -> Element {
    let margin_text = aggregate
        .average_margin
        .map(format_margin)
        .unwrap_or_else(|| "—".to_string());
    let edit_name = aggregate.name.clone();
    let delete_name = aggregate.name.clone();

    rsx! {
        tr {
            class: "hover:bg-slate-800/40",
            td { class: "px-4 py-3 font-medium text-slate-400", "{id}" }
            td { class: "px-4 py-3 font-medium text-slate-100", "{aggregate.name}" }
            td { class: "px-4 py-3 text-center text-slate-300", "{aggregate.product_count}" }
            td {
                class: "px-4 py-3 text-right",
                div { class: "flex items-center justify-end gap-2",
                    span { class: "font-medium text-slate-200", "{margin_text}" }
                    MarginBadge { value: aggregate.average_margin }
                }
            }
            td { class: "px-4 py-3 text-right text-slate-300", "{aggregate.total_stock}" }
            td {
                class: "px-4 py-3 text-right",
                div { class: "flex items-center justify-end gap-2",
                    button {
                        class: "rounded-md border border-slate-800 px-2 py-1 text-[10px] font-semibold uppercase tracking-wide text-slate-300 hover:border-slate-600",
                        onclick: move |_| on_edit.call(edit_name.clone()),
                        "Edit"
                    }
                    button {
                        class: "rounded-md border border-rose-500/40 px-2 py-1 text-[10px] font-semibold uppercase tracking-wide text-rose-200 hover:bg-rose-500/10",
                        onclick: move |_| on_delete.call(delete_name.clone()),
                        "Delete"
                    }
                }
            }
        }
    }
}

#[component]
fn SortButton(
    mode: SortMode,
    label: &'static str,
    current: SortMode,
    sort_mode: Signal<SortMode>,
) -> Element {
    let class = if current == mode {
        "rounded-md border border-indigo-500/60 bg-indigo-500/15 px-2 py-1 text-[11px] font-semibold text-indigo-100"
    } else {
        "rounded-md border border-slate-800 px-2 py-1 text-[11px] text-slate-400 transition hover:border-slate-600 hover:text-slate-200"
    };
    let mut sort_mode = sort_mode.clone();
    rsx! {
        button {
            class: "{class}",
            onclick: move |_| sort_mode.set(mode),
            "{label}"
        }
    }
}

fn sort_rows(rows: &mut [(usize, CategoryAggregate)], mode: SortMode) {
    match mode {
        SortMode::Name => rows.sort_by(|a, b| a.1.name.cmp(&b.1.name)),
        SortMode::Products => rows.sort_by(|a, b| b.1.product_count.cmp(&a.1.product_count)),
        SortMode::Stock => rows.sort_by(|a, b| b.1.total_stock.cmp(&a.1.total_stock)),
        SortMode::Margin => rows.sort_by(|a, b| compare_margin_desc(&a.1, &b.1)),
    }
}

/// Categories without a defined margin sort below every defined one.
fn compare_margin_desc(a: &CategoryAggregate, b: &CategoryAggregate) -> Ordering {
    match (a.average_margin, b.average_margin) {
        (Some(av), Some(bv)) => bv.partial_cmp(&av).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
