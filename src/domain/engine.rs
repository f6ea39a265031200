#![allow(dead_code)]

//! The pricing recalculation engine.
//!
//! Owns the original seed snapshot and the working copy of every priced
//! item, applies field edits and reverts, and keeps the derived figures in
//! step with the inputs. The UI layers call into it and render whatever it
//! returns; no component computes pricing on its own.

use thiserror::Error;
use time::Date;

use super::entities::{CategoryAggregate, CategoryFilter, EditableField, PricedItem};
use super::history::decayed_as_of;

#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("not a finite number: {0:?}")]
    InvalidNumber(String),
    #[error("unknown item: {0}")]
    UnknownItem(String),
    #[error("pricing is read-only in a historical view")]
    HistoricalView,
}

#[derive(Clone, Debug)]
pub struct PricingEngine {
    original: Vec<PricedItem>,
    working: Vec<PricedItem>,
    categories: Vec<String>,
    today: Date,
    view_date: Option<Date>,
}

impl PricingEngine {
    /// Seeds both the original snapshot and the working copy from the
    /// catalog. Derived figures are recomputed up front so the snapshot
    /// already satisfies the recompute invariant regardless of what the
    /// catalog listed.
    pub fn new(mut items: Vec<PricedItem>, categories: Vec<String>, today: Date) -> Self {
        for item in &mut items {
            item.edited_fields.clear();
            item.recalculate_costs();
        }
        Self {
            original: items.clone(),
            working: items,
            categories,
            today,
            view_date: None,
        }
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn items(&self) -> &[PricedItem] {
        &self.working
    }

    pub fn item(&self, item_id: &str) -> Option<&PricedItem> {
        self.working.iter().find(|item| item.id == item_id)
    }

    /// Parses the raw cell text and applies it to one field of one item,
    /// recomputing whatever the field feeds. Equal values are a no-op that
    /// leaves the edit bookkeeping untouched.
    pub fn set_field(
        &mut self,
        item_id: &str,
        field: EditableField,
        raw: &str,
    ) -> Result<PricedItem, PricingError> {
        self.ensure_mutable()?;

        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| PricingError::InvalidNumber(raw.to_string()))?;
        if !value.is_finite() {
            return Err(PricingError::InvalidNumber(raw.to_string()));
        }

        let item = self.working_item_mut(item_id)?;
        if field.read(item) == value {
            return Ok(item.clone());
        }

        field.write(item, value);
        item.edited_fields.insert(field);
        if field.is_cost_component() {
            item.recalculate_costs();
        } else {
            item.recalculate_profit();
        }
        Ok(item.clone())
    }

    /// Restores one field to its seed value and clears its edited flag.
    /// Reverting a field that was never edited returns the item unchanged.
    pub fn revert_field(
        &mut self,
        item_id: &str,
        field: EditableField,
    ) -> Result<PricedItem, PricingError> {
        self.ensure_mutable()?;

        let seed_value = self
            .original
            .iter()
            .find(|item| item.id == item_id)
            .map(|item| field.read(item))
            .ok_or_else(|| PricingError::UnknownItem(item_id.to_string()))?;

        let item = self.working_item_mut(item_id)?;
        if !item.edited_fields.remove(&field) {
            return Ok(item.clone());
        }

        field.write(item, seed_value);
        if field.is_cost_component() {
            item.recalculate_costs();
        } else {
            item.recalculate_profit();
        }
        Ok(item.clone())
    }

    /// Working items matching the filter, in seed order. Restartable and
    /// non-mutating.
    pub fn items_in_category<'a>(
        &'a self,
        filter: &'a CategoryFilter,
    ) -> impl Iterator<Item = &'a PricedItem> {
        self.working.iter().filter(move |item| filter.matches(item))
    }

    /// One aggregate per catalog category, in catalog order. Items whose
    /// margin is the NaN sentinel are left out of the mean; a category with
    /// no defined margins reports None rather than a silent zero.
    pub fn aggregate_categories(&self) -> Vec<CategoryAggregate> {
        self.categories
            .iter()
            .map(|name| {
                let mut product_count = 0;
                let mut total_stock = 0u64;
                let mut margin_sum = 0.0;
                let mut margin_count = 0usize;
                for item in self.working.iter().filter(|item| &item.category == name) {
                    product_count += 1;
                    total_stock += u64::from(item.in_stock);
                    if item.margin_defined() {
                        margin_sum += item.profit_margin;
                        margin_count += 1;
                    }
                }
                CategoryAggregate {
                    name: name.clone(),
                    product_count,
                    average_margin: (margin_count > 0)
                        .then(|| super::entities::round_currency(margin_sum / margin_count as f64)),
                    total_stock,
                }
            })
            .collect()
    }

    /// Reconstructs the full item list as of a given date. Dates today or
    /// later reproduce the current working state.
    pub fn snapshot_as_of(&self, date: Date) -> Vec<PricedItem> {
        if date >= self.today {
            return self.working.clone();
        }
        self.working
            .iter()
            .map(|item| decayed_as_of(item, date, self.today))
            .collect()
    }

    pub fn enter_historical_view(&mut self, date: Date) {
        self.view_date = Some(date);
    }

    pub fn exit_historical_view(&mut self) {
        self.view_date = None;
    }

    pub fn view_date(&self) -> Option<Date> {
        self.view_date
    }

    /// A view date today or in the future behaves like the live view.
    pub fn is_historical(&self) -> bool {
        self.view_date.map_or(false, |date| date < self.today)
    }

    /// What the pricing table should render under the current view date.
    pub fn visible_items(&self) -> Vec<PricedItem> {
        match self.view_date {
            Some(date) if date < self.today => self.snapshot_as_of(date),
            _ => self.working.clone(),
        }
    }

    fn ensure_mutable(&self) -> Result<(), PricingError> {
        if self.is_historical() {
            return Err(PricingError::HistoricalView);
        }
        Ok(())
    }

    fn working_item_mut(&mut self, item_id: &str) -> Result<&mut PricedItem, PricingError> {
        self.working
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| PricingError::UnknownItem(item_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use time::macros::date;

    fn item(id: &str, category: &str, costs: [f64; 4], sale: f64, stock: u32) -> PricedItem {
        PricedItem {
            id: id.to_string(),
            upc: format!("00000000{id}"),
            name: format!("Product {id}"),
            category: category.to_string(),
            import_cost: costs[0],
            shipping_cost: costs[1],
            customs_duty: costs[2],
            handling_fee: costs[3],
            sale_price: sale,
            in_stock: stock,
            cost_price: 0.0,
            net_profit: 0.0,
            profit_margin: 0.0,
            edited_fields: HashSet::new(),
        }
    }

    fn engine() -> PricingEngine {
        let items = vec![
            item("p-1", "Rifles", [10.0, 5.0, 2.0, 1.0], 30.0, 10),
            item("p-2", "Rifles", [20.0, 4.0, 3.0, 1.0], 35.0, 5),
            item("p-3", "Optics", [40.0, 6.0, 4.0, 2.0], 80.0, 8),
        ];
        let categories = vec![
            "Rifles".to_string(),
            "Optics".to_string(),
            "Storage".to_string(),
        ];
        PricingEngine::new(items, categories, date!(2025 - 06 - 30))
    }

    // ==================== seeding ====================

    #[test]
    fn seeding_computes_derived_fields() {
        let engine = engine();
        let first = engine.item("p-1").unwrap();
        assert_eq!(first.cost_price, 18.0);
        assert_eq!(first.net_profit, 12.0);
        assert_eq!(first.profit_margin, 40.0);
        assert!(first.edited_fields.is_empty());
    }

    #[test]
    fn zero_sale_price_seeds_the_margin_sentinel() {
        let items = vec![item("p-9", "Optics", [40.0, 6.0, 4.0, 2.0], 0.0, 8)];
        let engine = PricingEngine::new(items, vec!["Optics".to_string()], date!(2025 - 06 - 30));
        let optic = engine.item("p-9").unwrap();
        assert_eq!(optic.cost_price, 52.0);
        assert_eq!(optic.net_profit, -52.0);
        assert!(optic.profit_margin.is_nan());
    }

    // ==================== set_field ====================

    #[test]
    fn editing_a_cost_component_recomputes_everything() {
        let mut engine = engine();
        let updated = engine
            .set_field("p-1", EditableField::ImportCost, "15")
            .unwrap();
        assert_eq!(updated.import_cost, 15.0);
        assert_eq!(updated.cost_price, 23.0);
        assert_eq!(updated.net_profit, 7.0);
        assert_eq!(updated.profit_margin, 23.33);
        assert!(updated.is_edited(EditableField::ImportCost));
    }

    #[test]
    fn editing_the_sale_price_leaves_cost_price_alone() {
        let mut engine = engine();
        let updated = engine
            .set_field("p-1", EditableField::SalePrice, "40")
            .unwrap();
        assert_eq!(updated.cost_price, 18.0);
        assert_eq!(updated.net_profit, 22.0);
        assert_eq!(updated.profit_margin, 55.0);
        assert!(updated.is_edited(EditableField::SalePrice));
    }

    #[test]
    fn cost_price_closes_over_any_edit_sequence() {
        let mut engine = engine();
        let steps = [
            (EditableField::ShippingCost, "7.10"),
            (EditableField::CustomsDuty, "0.45"),
            (EditableField::ImportCost, "12.99"),
            (EditableField::HandlingFee, "2.25"),
            (EditableField::ShippingCost, "3.33"),
        ];
        for (field, raw) in steps {
            let updated = engine.set_field("p-1", field, raw).unwrap();
            let expected = super::super::entities::round_currency(
                updated.import_cost
                    + updated.shipping_cost
                    + updated.customs_duty
                    + updated.handling_fee,
            );
            assert_eq!(updated.cost_price, expected);
            assert_eq!(
                updated.net_profit,
                super::super::entities::round_currency(updated.sale_price - updated.cost_price)
            );
        }
    }

    #[test]
    fn equal_value_is_a_no_op() {
        let mut engine = engine();
        let before = engine.item("p-1").unwrap().clone();
        let after = engine
            .set_field("p-1", EditableField::ImportCost, "10")
            .unwrap();
        assert_eq!(after, before);
        assert!(!after.is_edited(EditableField::ImportCost));
    }

    #[test]
    fn unparsable_and_non_finite_input_is_rejected() {
        let mut engine = engine();
        for raw in ["abc", "", "12.5.1", "NaN", "inf", "-inf"] {
            let err = engine
                .set_field("p-1", EditableField::ImportCost, raw)
                .unwrap_err();
            assert_eq!(err, PricingError::InvalidNumber(raw.to_string()));
        }
        // Nothing was applied.
        assert_eq!(engine.item("p-1").unwrap().import_cost, 10.0);
    }

    #[test]
    fn unknown_item_is_rejected() {
        let mut engine = engine();
        let err = engine
            .set_field("p-99", EditableField::ImportCost, "1")
            .unwrap_err();
        assert_eq!(err, PricingError::UnknownItem("p-99".to_string()));
    }

    #[test]
    fn editing_to_a_zero_sale_price_yields_the_sentinel() {
        let mut engine = engine();
        let updated = engine
            .set_field("p-1", EditableField::SalePrice, "0")
            .unwrap();
        assert!(updated.profit_margin.is_nan());
        assert_eq!(updated.net_profit, -18.0);
    }

    // ==================== revert_field ====================

    #[test]
    fn revert_restores_the_pre_edit_state_exactly() {
        let mut engine = engine();
        let before = engine.item("p-1").unwrap().clone();
        for (field, raw) in [
            (EditableField::ImportCost, "19.37"),
            (EditableField::SalePrice, "44.44"),
        ] {
            engine.set_field("p-1", field, raw).unwrap();
            let reverted = engine.revert_field("p-1", field).unwrap();
            assert_eq!(reverted, before);
        }
    }

    #[test]
    fn reverting_an_unedited_field_is_a_no_op() {
        let mut engine = engine();
        engine
            .set_field("p-1", EditableField::ImportCost, "15")
            .unwrap();
        let before = engine.item("p-1").unwrap().clone();
        let after = engine
            .revert_field("p-1", EditableField::SalePrice)
            .unwrap();
        assert_eq!(after, before);
        assert!(after.is_edited(EditableField::ImportCost));
    }

    #[test]
    fn reverts_are_independent_per_field() {
        let mut engine = engine();
        engine
            .set_field("p-1", EditableField::ImportCost, "15")
            .unwrap();
        engine
            .set_field("p-1", EditableField::SalePrice, "50")
            .unwrap();
        let reverted = engine
            .revert_field("p-1", EditableField::ImportCost)
            .unwrap();
        assert_eq!(reverted.import_cost, 10.0);
        assert_eq!(reverted.sale_price, 50.0);
        assert_eq!(reverted.cost_price, 18.0);
        assert_eq!(reverted.net_profit, 32.0);
        assert!(reverted.is_edited(EditableField::SalePrice));
        assert!(!reverted.is_edited(EditableField::ImportCost));
    }

    // ==================== category views ====================

    #[test]
    fn category_listing_preserves_seed_order() {
        let engine = engine();
        let all: Vec<&str> = engine
            .items_in_category(&CategoryFilter::All)
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(all, ["p-1", "p-2", "p-3"]);

        let rifles: Vec<&str> = engine
            .items_in_category(&CategoryFilter::Name("Rifles".to_string()))
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(rifles, ["p-1", "p-2"]);
    }

    #[test]
    fn aggregates_follow_the_worked_example() {
        let engine = engine();
        // Seeded rifle margins sit at 40.00 and 20.00 with stock 10 and 5.
        assert_eq!(engine.item("p-2").unwrap().profit_margin, 20.0);

        let aggregates = engine.aggregate_categories();
        let rifles = &aggregates[0];
        assert_eq!(rifles.name, "Rifles");
        assert_eq!(rifles.product_count, 2);
        assert_eq!(rifles.average_margin, Some(30.0));
        assert_eq!(rifles.total_stock, 15);
    }

    #[test]
    fn undefined_margins_are_excluded_from_the_mean() {
        let mut engine = engine();
        engine
            .set_field("p-3", EditableField::SalePrice, "0")
            .unwrap();
        let aggregates = engine.aggregate_categories();
        let optics = &aggregates[1];
        assert_eq!(optics.product_count, 1);
        assert_eq!(optics.total_stock, 8);
        // The only member has a zero sale price, so no mean exists.
        assert_eq!(optics.average_margin, None);
    }

    #[test]
    fn empty_categories_aggregate_to_none_not_zero() {
        let engine = engine();
        let aggregates = engine.aggregate_categories();
        let storage = &aggregates[2];
        assert_eq!(storage.product_count, 0);
        assert_eq!(storage.average_margin, None);
        assert_eq!(storage.total_stock, 0);
    }

    // ==================== historical view ====================

    #[test]
    fn past_view_dates_reject_mutation_and_leave_state_untouched() {
        let mut engine = engine();
        engine.enter_historical_view(date!(2025 - 06 - 01));
        assert!(engine.is_historical());

        let before: Vec<PricedItem> = engine.items().to_vec();
        let err = engine
            .set_field("p-1", EditableField::ImportCost, "99")
            .unwrap_err();
        assert_eq!(err, PricingError::HistoricalView);
        let err = engine
            .revert_field("p-1", EditableField::ImportCost)
            .unwrap_err();
        assert_eq!(err, PricingError::HistoricalView);
        assert_eq!(engine.items(), before.as_slice());
    }

    #[test]
    fn today_or_future_view_dates_stay_live() {
        let mut engine = engine();
        engine.enter_historical_view(date!(2025 - 06 - 30));
        assert!(!engine.is_historical());
        assert!(engine
            .set_field("p-1", EditableField::ImportCost, "11")
            .is_ok());

        engine.enter_historical_view(date!(2025 - 07 - 04));
        assert!(!engine.is_historical());
        engine.exit_historical_view();
        assert_eq!(engine.view_date(), None);
    }

    #[test]
    fn snapshot_as_of_decays_every_item() {
        let engine = engine();
        let snapshot = engine.snapshot_as_of(date!(2025 - 06 - 20));
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].import_cost, 7.5);
        assert_eq!(snapshot[0].sale_price, 25.0);
        assert_eq!(snapshot[0].cost_price, 15.0);

        let current = engine.snapshot_as_of(date!(2025 - 06 - 30));
        assert_eq!(current.as_slice(), engine.items());
    }

    #[test]
    fn visible_items_track_the_view_date() {
        let mut engine = engine();
        engine.enter_historical_view(date!(2025 - 06 - 20));
        let shown = engine.visible_items();
        assert_eq!(shown[0].import_cost, 7.5);

        engine.exit_historical_view();
        let shown = engine.visible_items();
        assert_eq!(shown.as_slice(), engine.items());
    }
}
