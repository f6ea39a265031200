use dioxus::prelude::*;

use crate::{
    domain::PricingEngine,
    ui::components::{
        category_table::CategoryTable,
        toast::{push_toast, ToastKind, ToastMessage},
    },
};

#[component]
pub fn CategoriesPage() -> Element {
    let engine = use_context::<Signal<PricingEngine>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let rows = engine.with(|eng| eng.aggregate_categories());

    let edit_toasts = toasts.clone();
    let delete_toasts = toasts.clone();

    rsx! {
        div { class: "space-y-6",
            div {
                h2 { class: "text-lg font-semibold text-slate-100", "Category Overview" }
                p { class: "text-sm text-slate-500",
                    "Counts, margins, and stock are derived from the current pricing data."
                }
            }
            CategoryTable {
                rows,
                on_edit: move |name: String| push_toast(
                    edit_toasts.clone(),
                    ToastKind::Info,
                    format!("Edit category: {name}"),
                ),
                on_delete: move |name: String| push_toast(
                    delete_toasts.clone(),
                    ToastKind::Info,
                    format!("Delete category: {name}"),
                ),
            }
        }
    }
}
