#![allow(dead_code)]

use std::collections::HashSet;

/// Identifier for products in the catalog.
pub type ItemId = String;

/// One priced product: the five editable inputs, the derived pricing
/// figures, and the set of fields the user has overridden this session.
#[derive(Clone, Debug, PartialEq)]
pub struct PricedItem {
    pub id: ItemId,
    pub upc: String,
    pub name: String,
    pub category: String,
    pub import_cost: f64,
    pub shipping_cost: f64,
    pub customs_duty: f64,
    pub handling_fee: f64,
    pub sale_price: f64,
    pub in_stock: u32,
    /// Sum of the four cost inputs. Derived, never edited directly.
    pub cost_price: f64,
    /// `sale_price - cost_price`. Derived.
    pub net_profit: f64,
    /// Percent of sale price kept as profit. NaN when `sale_price` is zero.
    pub profit_margin: f64,
    pub edited_fields: HashSet<EditableField>,
}

impl PricedItem {
    /// Recomputes `cost_price` from the four cost inputs, then the profit
    /// figures from it.
    pub fn recalculate_costs(&mut self) {
        self.cost_price = round_currency(
            self.import_cost + self.shipping_cost + self.customs_duty + self.handling_fee,
        );
        self.recalculate_profit();
    }

    /// Recomputes `net_profit` and `profit_margin` from the current
    /// `sale_price` and `cost_price`. Margin falls back to the NaN sentinel
    /// instead of dividing by a zero sale price.
    pub fn recalculate_profit(&mut self) {
        self.net_profit = round_currency(self.sale_price - self.cost_price);
        self.profit_margin = if self.sale_price == 0.0 {
            f64::NAN
        } else {
            round_currency(self.net_profit / self.sale_price * 100.0)
        };
    }

    pub fn margin_defined(&self) -> bool {
        !self.profit_margin.is_nan()
    }

    pub fn is_edited(&self, field: EditableField) -> bool {
        self.edited_fields.contains(&field)
    }

    /// True when any input feeding the profit figures has been overridden.
    pub fn has_edits(&self) -> bool {
        !self.edited_fields.is_empty()
    }
}

/// Rounds a currency or percent amount to two decimal places, half away
/// from zero. Applied after every derived computation so repeated edits and
/// reverts never drift.
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The closed set of user-editable inputs. Dispatching on this enum keeps
/// the recompute rules in one place instead of string-keyed field lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditableField {
    ImportCost,
    ShippingCost,
    CustomsDuty,
    HandlingFee,
    SalePrice,
}

impl EditableField {
    pub const ALL: [EditableField; 5] = [
        EditableField::ImportCost,
        EditableField::ShippingCost,
        EditableField::CustomsDuty,
        EditableField::HandlingFee,
        EditableField::SalePrice,
    ];

    /// Cost components feed `cost_price`; the sale price only feeds the
    /// profit figures.
    pub fn is_cost_component(self) -> bool {
        !matches!(self, EditableField::SalePrice)
    }

    pub fn label(self) -> &'static str {
        match self {
            EditableField::ImportCost => "import cost",
            EditableField::ShippingCost => "shipping cost",
            EditableField::CustomsDuty => "customs duty",
            EditableField::HandlingFee => "handling fee",
            EditableField::SalePrice => "sale price",
        }
    }

    pub fn read(self, item: &PricedItem) -> f64 {
        match self {
            EditableField::ImportCost => item.import_cost,
            EditableField::ShippingCost => item.shipping_cost,
            EditableField::CustomsDuty => item.customs_duty,
            EditableField::HandlingFee => item.handling_fee,
            EditableField::SalePrice => item.sale_price,
        }
    }

    pub fn write(self, item: &mut PricedItem, value: f64) {
        match self {
            EditableField::ImportCost => item.import_cost = value,
            EditableField::ShippingCost => item.shipping_cost = value,
            EditableField::CustomsDuty => item.customs_duty = value,
            EditableField::HandlingFee => item.handling_fee = value,
            EditableField::SalePrice => item.sale_price = value,
        }
    }
}

/// Category selection for the pricing table tabs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Name(String),
}

impl CategoryFilter {
    pub fn matches(&self, item: &PricedItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Name(name) => &item.category == name,
        }
    }
}

/// Summary statistics for one category, computed on demand from the
/// working items.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryAggregate {
    pub name: String,
    pub product_count: usize,
    /// Mean of member margins. None when no member has a defined margin.
    pub average_margin: Option<f64>,
    pub total_stock: u64,
}
