use dioxus::prelude::*;

/// Health pill for a profit margin. `None` covers categories and items
/// where no margin is defined (zero sale price or no products).
#[component]
pub fn MarginBadge(value: Option<f64>) -> Element {
    let (label, color) = match value {
        Some(v) if v < 0.0 => ("Loss", "bg-rose-500/10 text-rose-300 border-rose-500/40"),
        Some(v) if v < 15.0 => ("Thin", "bg-amber-500/10 text-amber-300 border-amber-500/40"),
        Some(_) => (
            "Healthy",
            "bg-emerald-500/10 text-emerald-300 border-emerald-500/40",
        ),
        None => ("N/A", "bg-slate-700/40 text-slate-300 border-slate-600/60"),
    };

    rsx! {
        span {
            class: "inline-flex items-center rounded-full border px-2 py-0.5 text-xs font-medium {color}",
            "{label}"
        }
    }
}
