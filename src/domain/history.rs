//! Synthetic pricing history.
//!
//! No change ledger exists for the sample catalog, so past pricing is
//! reconstructed by subtracting a fixed per-field offset table keyed to how
//! far back the requested date lies. Deterministic by construction: the same
//! item and date always reproduce the same rows.

use time::Date;

use super::entities::{EditableField, PricedItem};

/// One simulated pricing period: the offsets subtracted from present input
/// values and the fields reported as changed versus the preceding period.
#[derive(Clone, Copy, Debug)]
pub struct DecayBucket {
    pub min_age_days: i64,
    pub import_cost: f64,
    pub shipping_cost: f64,
    pub customs_duty: f64,
    pub handling_fee: f64,
    pub sale_price: f64,
    pub changed: &'static [EditableField],
}

/// Oldest bucket first so lookup can take the first entry the age reaches.
pub const DECAY_SCHEDULE: [DecayBucket; 3] = [
    DecayBucket {
        min_age_days: 30,
        import_cost: 5.00,
        shipping_cost: 1.25,
        customs_duty: 0.75,
        handling_fee: 0.50,
        sale_price: 15.00,
        changed: &[EditableField::ImportCost, EditableField::CustomsDuty],
    },
    DecayBucket {
        min_age_days: 14,
        import_cost: 2.50,
        shipping_cost: 1.25,
        customs_duty: 0.00,
        handling_fee: 0.50,
        sale_price: 10.00,
        changed: &[EditableField::ShippingCost, EditableField::SalePrice],
    },
    DecayBucket {
        min_age_days: 7,
        import_cost: 2.50,
        shipping_cost: 0.00,
        customs_duty: 0.00,
        handling_fee: 0.50,
        sale_price: 5.00,
        changed: &[
            EditableField::ImportCost,
            EditableField::HandlingFee,
            EditableField::SalePrice,
        ],
    },
];

pub fn bucket_for_age(age_days: i64) -> Option<&'static DecayBucket> {
    DECAY_SCHEDULE
        .iter()
        .find(|bucket| age_days >= bucket.min_age_days)
}

/// Reconstructs an item as it would have priced on `as_of`. Ages inside the
/// newest bucket reproduce the current values. Inputs are floored at zero
/// and the derived figures recomputed, so the reconstruction obeys the same
/// formulas as live data.
pub fn decayed_as_of(item: &PricedItem, as_of: Date, today: Date) -> PricedItem {
    let age_days = (today - as_of).whole_days();
    match bucket_for_age(age_days) {
        Some(bucket) => apply_bucket(item, bucket),
        None => item.clone(),
    }
}

fn apply_bucket(item: &PricedItem, bucket: &DecayBucket) -> PricedItem {
    let mut past = item.clone();
    past.import_cost = (past.import_cost - bucket.import_cost).max(0.0);
    past.shipping_cost = (past.shipping_cost - bucket.shipping_cost).max(0.0);
    past.customs_duty = (past.customs_duty - bucket.customs_duty).max(0.0);
    past.handling_fee = (past.handling_fee - bucket.handling_fee).max(0.0);
    past.sale_price = (past.sale_price - bucket.sale_price).max(0.0);
    past.edited_fields.clear();
    past.recalculate_costs();
    past
}

/// One row of the item detail page's history table.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryRecord {
    pub date: Date,
    pub item: PricedItem,
    pub changed: Vec<EditableField>,
    pub is_current: bool,
}

impl HistoryRecord {
    pub fn field_changed(&self, field: EditableField) -> bool {
        self.changed.contains(&field)
    }
}

/// Builds the detail-page history: the current row followed by one row per
/// decay bucket, newest first.
pub fn pricing_history(item: &PricedItem, today: Date) -> Vec<HistoryRecord> {
    let mut records = vec![HistoryRecord {
        date: today,
        item: item.clone(),
        changed: Vec::new(),
        is_current: true,
    }];

    let mut buckets: Vec<&DecayBucket> = DECAY_SCHEDULE.iter().collect();
    buckets.sort_by_key(|bucket| bucket.min_age_days);

    for bucket in buckets {
        let date = today - time::Duration::days(bucket.min_age_days);
        records.push(HistoryRecord {
            date,
            item: apply_bucket(item, bucket),
            changed: bucket.changed.to_vec(),
            is_current: false,
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use time::macros::date;

    fn sample_item() -> PricedItem {
        let mut item = PricedItem {
            id: "p-100".to_string(),
            upc: "000000000100".to_string(),
            name: "Sample".to_string(),
            category: "Rifles".to_string(),
            import_cost: 10.0,
            shipping_cost: 5.0,
            customs_duty: 2.0,
            handling_fee: 1.0,
            sale_price: 30.0,
            in_stock: 10,
            cost_price: 0.0,
            net_profit: 0.0,
            profit_margin: 0.0,
            edited_fields: HashSet::new(),
        };
        item.recalculate_costs();
        item
    }

    #[test]
    fn ages_inside_a_week_reproduce_current_values() {
        let item = sample_item();
        let today = date!(2025 - 06 - 30);
        let recent = decayed_as_of(&item, date!(2025 - 06 - 27), today);
        assert_eq!(recent, item);
    }

    #[test]
    fn week_old_bucket_applies_its_offsets() {
        let item = sample_item();
        let today = date!(2025 - 06 - 30);
        let past = decayed_as_of(&item, date!(2025 - 06 - 23), today);
        assert_eq!(past.import_cost, 7.5);
        assert_eq!(past.shipping_cost, 5.0);
        assert_eq!(past.handling_fee, 0.5);
        assert_eq!(past.sale_price, 25.0);
        // Derived figures follow the live formulas, not stored offsets.
        assert_eq!(past.cost_price, 15.0);
        assert_eq!(past.net_profit, 10.0);
        assert_eq!(past.profit_margin, 40.0);
    }

    #[test]
    fn month_old_bucket_wins_over_newer_ones() {
        let item = sample_item();
        let today = date!(2025 - 06 - 30);
        let past = decayed_as_of(&item, date!(2025 - 05 - 01), today);
        assert_eq!(past.import_cost, 5.0);
        assert_eq!(past.customs_duty, 1.25);
        assert_eq!(past.sale_price, 15.0);
    }

    #[test]
    fn decayed_inputs_floor_at_zero() {
        let mut item = sample_item();
        item.import_cost = 1.0;
        item.sale_price = 4.0;
        item.recalculate_costs();
        let today = date!(2025 - 06 - 30);
        let past = decayed_as_of(&item, date!(2025 - 05 - 01), today);
        assert_eq!(past.import_cost, 0.0);
        assert_eq!(past.sale_price, 0.0);
        assert!(past.profit_margin.is_nan());
    }

    #[test]
    fn history_lists_current_then_each_bucket() {
        let item = sample_item();
        let today = date!(2025 - 06 - 30);
        let records = pricing_history(&item, today);
        assert_eq!(records.len(), 4);
        assert!(records[0].is_current);
        assert_eq!(records[0].item, item);
        assert_eq!(records[1].date, date!(2025 - 06 - 23));
        assert_eq!(records[2].date, date!(2025 - 06 - 16));
        assert_eq!(records[3].date, date!(2025 - 05 - 31));
        assert!(records[1].field_changed(EditableField::HandlingFee));
        assert!(!records[1].field_changed(EditableField::ShippingCost));
        assert!(records[2].field_changed(EditableField::SalePrice));
        assert!(records[3].field_changed(EditableField::CustomsDuty));
    }
}
