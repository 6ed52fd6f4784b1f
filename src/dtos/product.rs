// src/dtos/product.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub base_price: f64,
    #[serde(rename = "unidades")]
    pub stock_units: f64,
    #[serde(rename = "peso_kg")]
    pub stock_kg: f64,
    #[serde(rename = "unidades_por_receta")]
    pub units_per_batch: f64,
    #[serde(rename = "peso_por_receta")]
    pub weight_per_batch_kg: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "precio", skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(rename = "unidades", skip_serializing_if = "Option::is_none")]
    pub stock_units: Option<f64>,
    #[serde(rename = "peso_kg", skip_serializing_if = "Option::is_none")]
    pub stock_kg: Option<f64>,
    #[serde(rename = "unidades_por_receta", skip_serializing_if = "Option::is_none")]
    pub units_per_batch: Option<f64>,
    #[serde(rename = "peso_por_receta", skip_serializing_if = "Option::is_none")]
    pub weight_per_batch_kg: Option<f64>,
}

impl UpdateProductRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
