//! Client for the panadería REST API: stock, products with batch recipes,
//! and point-of-sale, built around the price/unit calculator.

pub mod api;
pub mod calculator;
pub mod cli;
pub mod config;
pub mod dtos;
pub mod error;
pub mod models;
pub mod state;
pub mod views;

pub use api::ApiClient;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use state::AppState;
