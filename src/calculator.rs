//! Price and unit conversion arithmetic for products made in fixed-yield batches.
//!
//! A product's `base_price` is the price of one whole batch. Every other
//! price is derived from it through the batch yield (`units_per_batch`,
//! `weight_per_batch_kg`), so the functions here reject yields that are
//! zero, negative or not finite instead of producing NaN/Infinity.

use crate::error::{AppError, AppResult};
use crate::models::{Product, SaleMode};

/// Positive, finite value used as a divisor.
fn ensure_ratio(value: f64, field: &str) -> AppResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AppError::validation(format!(
            "{field} must be a positive number, got {value}"
        )))
    }
}

/// Finite, non-negative price or quantity.
pub(crate) fn ensure_amount(value: f64, field: &str) -> AppResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(AppError::validation(format!(
            "{field} must be zero or a positive number, got {value}"
        )))
    }
}

/// Validated yield of one batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchYield {
    units_per_batch: f64,
    weight_per_batch_kg: f64,
}

impl BatchYield {
    pub fn new(units_per_batch: f64, weight_per_batch_kg: f64) -> AppResult<Self> {
        Ok(Self {
            units_per_batch: ensure_ratio(units_per_batch, "Units per batch")?,
            weight_per_batch_kg: ensure_ratio(weight_per_batch_kg, "Weight per batch")?,
        })
    }

    pub fn of(product: &Product) -> AppResult<Self> {
        Self::new(product.units_per_batch, product.weight_per_batch_kg)
    }

    pub fn units_per_batch(&self) -> f64 {
        self.units_per_batch
    }

    pub fn weight_per_batch_kg(&self) -> f64 {
        self.weight_per_batch_kg
    }

    pub fn kg_per_unit(&self) -> f64 {
        self.weight_per_batch_kg / self.units_per_batch
    }

    pub fn units_to_weight(&self, units: f64) -> f64 {
        units * self.kg_per_unit()
    }

    pub fn weight_to_units(&self, weight_kg: f64) -> f64 {
        weight_kg / self.kg_per_unit()
    }
}

// ==================== Price derivation ====================

/// Base price back-solved from an entered price per unit.
pub fn price_from_unit(price_per_unit: f64, units_per_batch: f64) -> AppResult<f64> {
    let price = ensure_amount(price_per_unit, "Price per unit")?;
    Ok(price * ensure_ratio(units_per_batch, "Units per batch")?)
}

/// Base price back-solved from an entered price per kilogram.
pub fn price_from_kg(price_per_kg: f64, weight_per_batch_kg: f64) -> AppResult<f64> {
    let price = ensure_amount(price_per_kg, "Price per kg")?;
    Ok(price * ensure_ratio(weight_per_batch_kg, "Weight per batch")?)
}

pub fn derive_price_per_unit(base_price: f64, units_per_batch: f64) -> AppResult<f64> {
    let base = ensure_amount(base_price, "Price")?;
    Ok(base / ensure_ratio(units_per_batch, "Units per batch")?)
}

pub fn derive_price_per_kg(base_price: f64, weight_per_batch_kg: f64) -> AppResult<f64> {
    let base = ensure_amount(base_price, "Price")?;
    Ok(base / ensure_ratio(weight_per_batch_kg, "Weight per batch")?)
}

/// All derived prices of a product at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBreakdown {
    pub base_price: f64,
    pub price_per_unit: f64,
    pub price_per_kg: f64,
    pub kg_per_unit: f64,
}

impl PriceBreakdown {
    pub fn new(base_price: f64, batch: BatchYield) -> AppResult<Self> {
        Ok(Self {
            base_price: ensure_amount(base_price, "Price")?,
            price_per_unit: derive_price_per_unit(base_price, batch.units_per_batch())?,
            price_per_kg: derive_price_per_kg(base_price, batch.weight_per_batch_kg())?,
            kg_per_unit: batch.kg_per_unit(),
        })
    }

    pub fn of(product: &Product) -> AppResult<Self> {
        Self::new(product.base_price, BatchYield::of(product)?)
    }
}

// ==================== Sales ====================

/// Price of `quantity` units (`ByUnit`) or kilograms (`ByWeight`) of `product`.
pub fn subtotal(product: &Product, quantity: f64, mode: SaleMode) -> AppResult<f64> {
    let quantity = ensure_amount(quantity, "Quantity")?;
    let unit_price = match mode {
        SaleMode::ByUnit => derive_price_per_unit(product.base_price, product.units_per_batch)?,
        SaleMode::ByWeight => derive_price_per_kg(product.base_price, product.weight_per_batch_kg)?,
    };
    Ok(unit_price * quantity)
}

/// Stock on hand for the field matching `mode`.
pub fn available_stock(product: &Product, mode: SaleMode) -> f64 {
    match mode {
        SaleMode::ByUnit => product.stock_units,
        SaleMode::ByWeight => product.stock_kg,
    }
}

// ==================== Unit <-> weight ====================

pub fn convert_units_to_weight(units: f64, product: &Product) -> AppResult<f64> {
    let units = ensure_amount(units, "Units")?;
    Ok(BatchYield::of(product)?.units_to_weight(units))
}

pub fn convert_weight_to_units(weight_kg: f64, product: &Product) -> AppResult<f64> {
    let weight_kg = ensure_amount(weight_kg, "Weight")?;
    Ok(BatchYield::of(product)?.weight_to_units(weight_kg))
}

// ==================== Batch preparation ====================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchOutput {
    pub units_produced: f64,
    pub weight_produced_kg: f64,
}

/// Amount of one stock item consumed by preparing some batches.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientRequirement {
    pub ingredient: String,
    pub required: f64,
    pub unit: crate::models::MeasureUnit,
}

pub fn batch_output(product: &Product, batches: f64) -> AppResult<BatchOutput> {
    let batches = ensure_amount(batches, "Batch count")?;
    let batch = BatchYield::of(product)?;
    Ok(BatchOutput {
        units_produced: batch.units_per_batch() * batches,
        weight_produced_kg: batch.weight_per_batch_kg() * batches,
    })
}

/// Adds the output of `batches` batches to the product's stock.
/// Ingredient consumption is applied by the server; see [`ingredient_requirements`].
pub fn prepare_batch(product: &mut Product, batches: f64) -> AppResult<BatchOutput> {
    let output = batch_output(product, batches)?;
    product.stock_units += output.units_produced;
    product.stock_kg += output.weight_produced_kg;
    Ok(output)
}

pub fn ingredient_requirements(product: &Product, batches: f64) -> Vec<IngredientRequirement> {
    product
        .recipe
        .iter()
        .map(|line| IngredientRequirement {
            ingredient: line.ingredient.clone(),
            required: line.quantity * batches,
            unit: line.unit,
        })
        .collect()
}

/// Two-decimal currency rounding used for display and comparisons.
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
