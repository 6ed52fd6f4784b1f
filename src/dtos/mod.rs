pub mod admin;
pub mod product;
pub mod recipe;
pub mod sale;
pub mod stock;
