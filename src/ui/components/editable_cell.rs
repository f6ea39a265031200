use dioxus::prelude::*;

use crate::domain::EditableField;

pub fn format_money(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${value:.2}")
    }
}

pub fn format_margin(value: f64) -> String {
    if value.is_nan() {
        "—".to_string()
    } else {
        format!("{value:.2}%")
    }
}

/// One editable currency cell. Commit with Enter or the check button,
/// cancel with Escape or the cross; the engine decides whether the commit
/// actually changes anything. Edited values render orange with a revert
/// affordance, and the whole cell turns read-only in a historical view.
#[component]
pub fn EditableMoneyCell(
    item_id: String,
    field: EditableField,
    value: f64,
    edited: bool,
    read_only: bool,
    on_commit: EventHandler<(String, EditableField, String)>,
    on_revert: EventHandler<(String, EditableField)>,
) -> Element {
    let mut editing = use_signal(|| false);
    let mut draft = use_signal(String::new);

    let initial = format!("{value:.2}");

    if editing() {
        let commit = {
            let item_id = item_id.clone();
            let initial = initial.clone();
            move || {
                let text = draft();
                editing.set(false);
                if text != initial {
                    on_commit.call((item_id.clone(), field, text));
                }
            }
        };
        let commit_on_key = commit.clone();
        let commit_on_click = commit;

        return rsx! {
            div { class: "flex items-center justify-end gap-1",
                input {
                    class: "h-8 w-24 rounded-lg border border-slate-700 bg-slate-950 px-2 text-right text-sm text-slate-100 focus:border-indigo-500 focus:outline-none",
                    inputmode: "decimal",
                    value: draft(),
                    autofocus: true,
                    oninput: move |evt| draft.set(evt.value().to_string()),
                    onkeydown: move |evt| match evt.key() {
                        Key::Enter => commit_on_key(),
                        Key::Escape => editing.set(false),
                        _ => {}
                    },
                }
                button {
                    class: "rounded-md px-1.5 py-1 text-xs text-emerald-300 hover:bg-emerald-500/10",
                    onclick: move |_| commit_on_click(),
                    "✓"
                }
                button {
                    class: "rounded-md px-1.5 py-1 text-xs text-slate-400 hover:bg-slate-700/40",
                    onclick: move |_| editing.set(false),
                    "✕"
                }
            }
        };
    }

    let value_class = if edited {
        "font-medium text-orange-400"
    } else {
        "font-medium text-slate-200"
    };

    let revert_id = item_id.clone();
    let edit_value = initial.clone();
    let tooltip = if edited { "Manually edited" } else { "" };

    rsx! {
        div { class: "group flex items-center justify-end gap-1",
            span { class: value_class, title: "{tooltip}", {format_money(value)} }
            if edited && !read_only {
                button {
                    class: "rounded-md px-1 py-0.5 text-[10px] text-slate-400 opacity-0 transition-opacity group-hover:opacity-100 hover:text-slate-100",
                    title: "Revert to original value",
                    onclick: move |_| on_revert.call((revert_id.clone(), field)),
                    "↺"
                }
            }
            if !read_only {
                button {
                    class: "rounded-md px-1 py-0.5 text-[10px] text-slate-400 opacity-0 transition-opacity group-hover:opacity-100 hover:text-slate-100",
                    title: "Edit value",
                    onclick: move |_| {
                        draft.set(edit_value.clone());
                        editing.set(true);
                    },
                    "✎"
                }
            }
        }
    }
}
