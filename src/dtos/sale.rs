use serde::{Deserialize, Serialize};

use crate::models::SaleMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSaleRequest {
    pub items: Vec<SaleItemRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItemRequest {
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "tipo_venta")]
    pub mode: SaleMode,
    /// Only set for weight sales; the server reads kg from here first
    #[serde(rename = "cantidad_peso_kg")]
    pub weight_kg: Option<f64>,
}

impl SaleItemRequest {
    pub fn new(product_id: i64, quantity: f64, mode: SaleMode) -> Self {
        Self {
            product_id,
            quantity,
            mode,
            weight_kg: match mode {
                SaleMode::ByUnit => None,
                SaleMode::ByWeight => Some(quantity),
            },
        }
    }
}
