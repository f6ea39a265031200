use std::cmp::Ordering;

use dioxus::prelude::*;

use super::editable_cell::{format_margin, format_money, EditableMoneyCell};
use crate::domain::{CategoryFilter, EditableField, PricedItem};

const PAGE_SIZE: usize = 10;

#[derive(Clone, Copy, PartialEq, Eq)]
enum SortColumn {
    Name,
    CostPrice,
    SalePrice,
    NetProfit,
    Margin,
}

impl SortColumn {
    const ALL: [SortColumn; 5] = [
        SortColumn::Name,
        SortColumn::CostPrice,
        SortColumn::SalePrice,
        SortColumn::NetProfit,
        SortColumn::Margin,
    ];

    fn label(self) -> &'static str {
        match self {
            SortColumn::Name => "Name",
            SortColumn::CostPrice => "Cost Price",
            SortColumn::SalePrice => "Sale Price",
            SortColumn::NetProfit => "Net Profit",
            SortColumn::Margin => "Margin",
        }
    }
}

/// The editable pricing grid: category tabs, sort buttons, paginated rows,
/// and one editable cell per cost input and sale price. All mutations flow
/// out through the commit/revert handlers; the table never touches the
/// engine itself.
#[component]
pub fn PricingTable(
    items: Vec<PricedItem>,
    categories: Vec<String>,
    category_filter: CategoryFilter,
    read_only: bool,
    on_filter_change: EventHandler<CategoryFilter>,
    on_commit: EventHandler<(String, EditableField, String)>,
    on_revert: EventHandler<(String, EditableField)>,
    on_open_item: EventHandler<String>,
) -> Element {
    let sort: Signal<Option<(SortColumn, bool)>> = use_signal(|| None);
    let mut page = use_signal(|| 0usize);

    let mut rows: Vec<PricedItem> = items
        .into_iter()
        .filter(|item| category_filter.matches(item))
        .collect();
    if let Some((column, ascending)) = sort() {
        sort_rows(&mut rows, column, ascending);
    }

    let total = rows.len();
    let page_count = total.div_ceil(PAGE_SIZE).max(1);
    let current_page = page().min(page_count - 1);
    let start = current_page * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(total);
    let visible: Vec<PricedItem> = rows[start..end].to_vec();
    let is_empty = total == 0;
    let current_sort = sort();

    rsx! {
        div {
            class: "rounded-xl border border-slate-800 bg-slate-900/40",
            div {
                class: "flex flex-wrap items-center gap-2 border-b border-slate-800 px-4 py-3",
                CategoryTab {
                    label: "All".to_string(),
                    active: category_filter == CategoryFilter::All,
                    onclick: {
                        let on_filter_change = on_filter_change.clone();
                        move |_| on_filter_change.call(CategoryFilter::All)
                    },
                }
                for category in categories.iter().cloned() {
                    CategoryTab {
                        key: "{category}",
                        label: category.clone(),
                        active: category_filter == CategoryFilter::Name(category.clone()),
                        onclick: {
                            let on_filter_change = on_filter_change.clone();
                            let category = category.clone();
                            move |_| on_filter_change.call(CategoryFilter::Name(category.clone()))
                        },
                    }
                }
            }
            if !is_empty {
                div {
                    class: "flex flex-wrap items-center gap-2 border-b border-slate-800 bg-slate-950/40 px-4 py-2 text-xs uppercase tracking-wide text-slate-400",
                    span { "Sort:" }
                    for column in SortColumn::ALL {
                        SortButton {
                            column,
                            current: current_sort,
                            sort: sort.clone(),
                        }
                    }
                }
            }
            if is_empty {
                p { class: "px-4 py-6 text-sm text-slate-500", "No products match the current filters." }
            } else {
                table {
                    class: "min-w-full divide-y divide-slate-800 text-sm",
                    thead {
                        class: "sticky top-0 z-10 bg-slate-900 text-left text-xs uppercase tracking-wide text-slate-500",
                        tr {
                            th { class: "px-4 py-3 font-medium", "UPC" }
                            th { class: "px-4 py-3 font-medium", "Product Name" }
                            th { class: "px-4 py-3 font-medium", "Category" }
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
                        for item in visible {
                            PricingRow {
                                key: "{item.id}",
                                item,
                                read_only,
                                on_commit: on_commit.clone(),
                                on_revert: on_revert.clone(),
                                on_open_item: on_open_item.clone(),
                            }
                        }
                    }
                }
            }
            div {
                class: "flex flex-wrap items-center justify-between gap-2 border-t border-slate-800 px-4 py-3 text-sm text-slate-400",
                if is_empty {
                    span { "0 products" }
                } else {
                    span { {format!("Showing {}–{} of {total} products", start + 1, end)} }
                }
                div {
                    class: "flex items-center gap-2",
                    button {
                        class: "rounded-md border border-slate-800 px-3 py-1 text-xs text-slate-300 transition hover:border-slate-600 disabled:cursor-not-allowed disabled:opacity-40",
                        disabled: current_page == 0,
                        onclick: move |_| {
                            if current_page > 0 {
                                page.set(current_page - 1);
                            }
                        },
                        "Previous"
                    }
                    button {
                        class: "rounded-md border border-slate-800 px-3 py-1 text-xs text-slate-300 transition hover:border-slate-600 disabled:cursor-not-allowed disabled:opacity-40",
                        disabled: current_page + 1 >= page_count,
                        onclick: move |_| {
                            if current_page + 1 < page_count {
                                page.set(current_page + 1);
                            }
                        },
                        "Next"
                    }
                }
            }
        }
    }
}

#[component]
fn CategoryTab(label: String, active: bool, onclick: EventHandler<()>) -> Element {
    let class = if active {
        "rounded-md border border-indigo-500/60 bg-indigo-500/15 px-3 py-1 text-xs font-semibold text-indigo-100"
    } else {
        "rounded-md border border-slate-800 px-3 py-1 text-xs text-slate-400 transition hover:border-slate-600 hover:text-slate-200"
    };
    rsx! {
        button {
            class: "{class}",
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}

#[component]
fn SortButton(
    column: SortColumn,
    current: Option<(SortColumn, bool)>,
    sort: Signal<Option<(SortColumn, bool)>>,
) -> Element {
    let active = current.map(|(c, _)| c == column).unwrap_or(false);
    let arrow = match current {
        Some((c, true)) if c == column => " ↑",
        Some((c, false)) if c == column => " ↓",
        _ => "",
    };
    let class = if active {
        "rounded-md border border-indigo-500/60 bg-indigo-500/15 px-2 py-1 text-[11px] font-semibold text-indigo-100"
    } else {
        "rounded-md border border-slate-800 px-2 py-1 text-[11px] text-slate-400 transition hover:border-slate-600 hover:text-slate-200"
    };
    let mut sort = sort.clone();
    rsx! {
        button {
            class: "{class}",
            onclick: move |_| {
                let next = match sort() {
                    Some((c, ascending)) if c == column => Some((column, !ascending)),
                    _ => Some((column, true)),
                };
                sort.set(next);
            },
            "{column.label()}{arrow}"
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct PricingRowProps {
    item: PricedItem,
    read_only: bool,
    on_commit: EventHandler<(String, EditableField, String)>,
    on_revert: EventHandler<(String, EditableField)>,
    on_open_item: EventHandler<String>,
}

#[component]
fn PricingRow(props: PricingRowProps) -> Element {
    let item = props.item;
    let read_only = props.read_only;
    let open_id = item.id.clone();
    let has_edits = item.has_edits();
    let derived_class = if has_edits {
        "px-4 py-3 text-right font-medium text-orange-400"
    } else {
        "px-4 py-3 text-right font-medium text-slate-200"
    };

    rsx! {
        tr {
            class: "hover:bg-slate-800/40",
            td { class: "px-4 py-3 font-medium text-slate-300", "{item.upc}" }
            td {
                class: "px-4 py-3",
                button {
                    class: "cursor-pointer text-left font-medium text-slate-100 transition hover:text-indigo-300",
                    onclick: move |_| props.on_open_item.call(open_id.clone()),
                    "{item.name}"
                }
            }
            td { class: "px-4 py-3 text-slate-400", "{item.category}" }
            for field in [
                EditableField::ImportCost,
                EditableField::ShippingCost,
                EditableField::CustomsDuty,
                EditableField::HandlingFee,
            ] {
                td {
                    class: "px-4 py-3",
                    EditableMoneyCell {
                        item_id: item.id.clone(),
                        field,
                        value: field.read(&item),
                        edited: item.is_edited(field),
                        read_only,
                        on_commit: props.on_commit.clone(),
                        on_revert: props.on_revert.clone(),
                    }
                }
            }
            // Cost price stays neutral even when its components are edited.
            td { class: "px-4 py-3 text-right font-medium text-slate-200", {format_money(item.cost_price)} }
            td {
                class: "px-4 py-3",
                EditableMoneyCell {
                    item_id: item.id.clone(),
                    field: EditableField::SalePrice,
                    value: item.sale_price,
                    edited: item.is_edited(EditableField::SalePrice),
                    read_only,
                    on_commit: props.on_commit.clone(),
                    on_revert: props.on_revert.clone(),
                }
            }
            td { class: derived_class, {format_money(item.net_profit)} }
            td { class: derived_class, {format_margin(item.profit_margin)} }
        }
    }
}

fn sort_rows(rows: &mut [PricedItem], column: SortColumn, ascending: bool) {
    match column {
        SortColumn::Name => rows.sort_by(|a, b| {
            let ordering = a.name.to_lowercase().cmp(&b.name.to_lowercase());
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        }),
        SortColumn::CostPrice => sort_by_f64(rows, |item| item.cost_price, ascending),
        SortColumn::SalePrice => sort_by_f64(rows, |item| item.sale_price, ascending),
        SortColumn::NetProfit => sort_by_f64(rows, |item| item.net_profit, ascending),
        SortColumn::Margin => sort_by_f64(rows, |item| item.profit_margin, ascending),
    }
}

/// NaN margins always sink to the bottom, whichever direction is active.
fn sort_by_f64(rows: &mut [PricedItem], key: impl Fn(&PricedItem) -> f64, ascending: bool) {
    rows.sort_by(|a, b| {
        let a = key(a);
        let b = key(b);
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
                if ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            }
        }
    });
}
