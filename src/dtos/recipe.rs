// src/dtos/recipe.rs
use serde::{Deserialize, Serialize};

use crate::models::MeasureUnit;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddIngredientRequest {
    /// Must name an existing stock item
    #[serde(rename = "ingrediente")]
    pub ingredient: String,
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "unidad")]
    pub unit: MeasureUnit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareRecipeRequest {
    /// Number of batches to prepare
    #[serde(rename = "cantidad")]
    pub batches: f64,
}
