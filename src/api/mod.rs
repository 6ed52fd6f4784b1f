mod admin;
mod client;
mod product;
mod recipe;
mod sale;
mod stock;

pub use client::ApiClient;
