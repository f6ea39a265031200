use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;
use time::OffsetDateTime;

use crate::{
    domain::PricingEngine,
    infra::load_catalog,
    ui::{
        components::toast::{Toast, ToastMessage},
        pages::{CategoriesPage, ItemPage, PricingPage},
        shell::Shell,
    },
    util::assets,
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    #[route("/pricing")]
    Pricing {},
    #[route("/categories")]
    Categories {},
    #[route("/item/:id")]
    Item { id: String },
}

#[component]
pub fn App() -> Element {
    let engine = use_signal(seed_engine);
    use_context_provider(|| engine.clone());

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts.clone());

    rsx! {
        document::Link { rel: "icon", href: assets::favicon_data_uri() }
        document::Style { "{assets::main_css()}" }
        document::Style { "{assets::tailwind_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

/// Seeds the engine from the embedded catalog. A broken catalog is a build
/// defect, but the dashboard still opens on an empty collection rather
/// than refusing to start.
fn seed_engine() -> PricingEngine {
    let today = OffsetDateTime::now_utc().date();
    match load_catalog() {
        Ok(catalog) => {
            let (items, categories) = catalog.into_items();
            info!(
                products = items.len(),
                categories = categories.len(),
                "seeded pricing data from the embedded catalog"
            );
            PricingEngine::new(items, categories, today)
        }
        Err(err) => {
            warn!("failed to load the embedded catalog: {err}");
            PricingEngine::new(Vec::new(), Vec::new(), today)
        }
    }
}

#[component]
pub fn Pricing() -> Element {
    rsx! { Shell { PricingPage {} } }
}

#[component]
pub fn Categories() -> Element {
    rsx! { Shell { CategoriesPage {} } }
}

#[component]
pub fn Item(id: String) -> Element {
    rsx! { Shell { ItemPage { id } } }
}
