//! Pricing domain: entities, the recalculation engine, and history simulation.

pub mod engine;
pub mod entities;
pub mod history;

#[allow(unused_imports)]
pub use engine::{PricingEngine, PricingError};
#[allow(unused_imports)]
pub use entities::{
    round_currency, CategoryAggregate, CategoryFilter, EditableField, ItemId, PricedItem,
};
#[allow(unused_imports)]
pub use history::{bucket_for_age, decayed_as_of, pricing_history, DecayBucket, HistoryRecord};
