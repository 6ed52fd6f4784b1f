pub mod product;
pub mod sale;
pub mod stock;

pub use product::{Product, RecipeIngredient};
pub use sale::{Sale, SaleItem, SaleMode};
pub use stock::{Dimension, MeasureUnit, StockItem};
