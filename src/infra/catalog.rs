//! The embedded product catalog.
//!
//! Sample data ships inside the binary as JSON and is deserialized once at
//! startup. Records carry only identity, the five editable inputs, and
//! stock; the derived figures are computed when the engine seeds from them.

use serde::Deserialize;
use thiserror::Error;

use crate::domain::PricedItem;
use crate::util::assets;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("embedded catalog asset missing: {0}")]
    MissingAsset(String),
    #[error("embedded catalog is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("failed to decode catalog: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
pub struct Catalog {
    pub categories: Vec<String>,
    pub products: Vec<ProductRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub upc: String,
    pub name: String,
    pub category: String,
    pub import_cost: f64,
    pub shipping_cost: f64,
    pub customs_duty: f64,
    pub handling_fee: f64,
    pub sale_price: f64,
    pub in_stock: u32,
}

impl From<ProductRecord> for PricedItem {
    fn from(record: ProductRecord) -> Self {
        PricedItem {
            id: record.id,
            upc: record.upc,
            name: record.name,
            category: record.category,
            import_cost: record.import_cost,
            shipping_cost: record.shipping_cost,
            customs_duty: record.customs_duty,
            handling_fee: record.handling_fee,
            sale_price: record.sale_price,
            in_stock: record.in_stock,
            cost_price: 0.0,
            net_profit: 0.0,
            profit_margin: 0.0,
            edited_fields: Default::default(),
        }
    }
}

impl Catalog {
    pub fn into_items(self) -> (Vec<PricedItem>, Vec<String>) {
        let items = self.products.into_iter().map(PricedItem::from).collect();
        (items, self.categories)
    }
}

pub fn load_catalog() -> Result<Catalog, CatalogError> {
    let bytes = assets::catalog_bytes()
        .ok_or_else(|| CatalogError::MissingAsset("products.json".to_string()))?;
    let raw = String::from_utf8(bytes.into_owned())?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_decodes() {
        let catalog = load_catalog().expect("embedded catalog should decode");
        assert!(!catalog.categories.is_empty());
        assert!(!catalog.products.is_empty());
        for product in &catalog.products {
            assert!(
                catalog.categories.contains(&product.category),
                "{} references unknown category {}",
                product.id,
                product.category
            );
        }
    }

    #[test]
    fn product_ids_are_unique() {
        let catalog = load_catalog().unwrap();
        let mut ids: Vec<&str> = catalog.products.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn records_convert_without_derived_values() {
        let catalog = load_catalog().unwrap();
        let (items, categories) = catalog.into_items();
        assert!(!categories.is_empty());
        let first = &items[0];
        // Derived figures are the engine's job at seed time.
        assert_eq!(first.cost_price, 0.0);
        assert!(first.edited_fields.is_empty());
    }
}
