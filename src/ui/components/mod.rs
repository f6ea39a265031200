pub mod category_table;
pub mod editable_cell;
pub mod kpi_card;
pub mod margin_badge;
pub mod pricing_table;
pub mod toast;
