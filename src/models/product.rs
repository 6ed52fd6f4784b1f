use serde::{Deserialize, Serialize};

use crate::models::stock::MeasureUnit;

/// One line of a product's recipe, quantities are per batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub id: i64,
    #[serde(rename = "producto_id")]
    pub product_id: i64,
    /// Name of the stock item consumed
    #[serde(rename = "ingrediente")]
    pub ingredient: String,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "unidad")]
    pub unit: MeasureUnit,
}

/// A finished product. `base_price` is the price of one full batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub base_price: f64,
    #[serde(rename = "unidades", default)]
    pub stock_units: f64,
    #[serde(rename = "peso_kg", default)]
    pub stock_kg: f64,
    #[serde(rename = "unidades_por_receta")]
    pub units_per_batch: f64,
    #[serde(rename = "peso_por_receta")]
    pub weight_per_batch_kg: f64,
    #[serde(rename = "receta", default)]
    pub recipe: Vec<RecipeIngredient>,
}

impl Product {
    pub fn has_recipe(&self) -> bool {
        !self.recipe.is_empty()
    }
}
