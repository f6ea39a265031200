pub mod categories;
pub mod item;
pub mod pricing;

pub use categories::CategoriesPage;
pub use item::ItemPage;
pub use pricing::PricingPage;
