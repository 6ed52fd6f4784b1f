use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a sale line is quantified by unit count or by weight (kg).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaleMode {
    #[serde(rename = "unidad")]
    ByUnit,
    #[serde(rename = "peso")]
    ByWeight,
}

impl SaleMode {
    pub fn unit_label(&self) -> &'static str {
        match self {
            SaleMode::ByUnit => "unidades",
            SaleMode::ByWeight => "kg",
        }
    }
}

impl fmt::Display for SaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleMode::ByUnit => f.write_str("by_unit"),
            SaleMode::ByWeight => f.write_str("by_weight"),
        }
    }
}

/// A recorded sale line as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    pub id: i64,
    #[serde(rename = "venta_id")]
    pub sale_id: i64,
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    #[serde(rename = "producto_nombre")]
    pub product_name: String,
    /// Product base price at the time of the sale
    #[serde(rename = "producto_precio")]
    pub product_price: f64,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "tipo_venta", default = "default_mode")]
    pub mode: SaleMode,
    #[serde(rename = "cantidad_peso_kg", default)]
    pub weight_kg: Option<f64>,
}

fn default_mode() -> SaleMode {
    SaleMode::ByUnit
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    #[serde(rename = "fecha")]
    pub timestamp: NaiveDateTime,
    pub total: f64,
    #[serde(default)]
    pub items: Vec<SaleItem>,
}
