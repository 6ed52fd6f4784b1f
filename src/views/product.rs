// src/views/product.rs
use tracing::{info, instrument, warn};

use crate::calculator::{
    self, ensure_amount, price_from_kg, price_from_unit, BatchOutput, BatchYield, PriceBreakdown,
};
use crate::dtos::product::{CreateProductRequest, UpdateProductRequest};
use crate::dtos::recipe::AddIngredientRequest;
use crate::error::{AppError, AppResult};
use crate::models::{MeasureUnit, Product, RecipeIngredient};
use crate::state::AppState;
use crate::views::edit::EditSession;
use crate::views::{required_name, Confirmation};

// ==================== Price editor ====================

/// Which price field the user last typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    Base,
    PerUnit,
    PerKg,
}

/// Which stock field the user last typed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAmountField {
    Units,
    Kg,
}

/// One field change of the product form.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductField {
    Name(String),
    BasePrice(f64),
    PricePerUnit(f64),
    PricePerKg(f64),
    UnitsPerBatch(f64),
    WeightPerBatchKg(f64),
    StockUnits(f64),
    StockKg(f64),
}

/// Product form state.
///
/// Base price, batch yield and stock are the stored values; per-unit and
/// per-kg prices are always derived. The last edited price field (and stock
/// field) is the source of truth: when a yield changes, the field the user
/// typed keeps its value and the others are recomputed from it. Edits are
/// applied in the order received, so of two edits in the same tick the later
/// one wins. Stock fields are only re-derived after the user has typed one.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    name: String,
    base_price: f64,
    batch: BatchYield,
    stock_units: f64,
    stock_kg: f64,
    editing_price: PriceField,
    entered_price: f64,
    editing_stock: Option<StockAmountField>,
}

impl ProductForm {
    pub fn new(
        name: impl Into<String>,
        units_per_batch: f64,
        weight_per_batch_kg: f64,
    ) -> AppResult<Self> {
        Ok(Self {
            name: name.into(),
            base_price: 0.0,
            batch: BatchYield::new(units_per_batch, weight_per_batch_kg)?,
            stock_units: 0.0,
            stock_kg: 0.0,
            editing_price: PriceField::Base,
            entered_price: 0.0,
            editing_stock: None,
        })
    }

    pub fn from_product(product: &Product) -> AppResult<Self> {
        Ok(Self {
            name: product.name.clone(),
            base_price: ensure_amount(product.base_price, "Price")?,
            batch: BatchYield::of(product)?,
            stock_units: product.stock_units,
            stock_kg: product.stock_kg,
            editing_price: PriceField::Base,
            entered_price: product.base_price,
            editing_stock: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    pub fn units_per_batch(&self) -> f64 {
        self.batch.units_per_batch()
    }

    pub fn weight_per_batch_kg(&self) -> f64 {
        self.batch.weight_per_batch_kg()
    }

    pub fn stock_units(&self) -> f64 {
        self.stock_units
    }

    pub fn stock_kg(&self) -> f64 {
        self.stock_kg
    }

    pub fn editing_price(&self) -> PriceField {
        self.editing_price
    }

    pub fn prices(&self) -> PriceBreakdown {
        PriceBreakdown {
            base_price: self.base_price,
            price_per_unit: self.base_price / self.batch.units_per_batch(),
            price_per_kg: self.base_price / self.batch.weight_per_batch_kg(),
            kg_per_unit: self.batch.kg_per_unit(),
        }
    }

    /// Applies one edit atomically: a rejected value leaves every field as it was.
    pub fn apply(&mut self, field: ProductField) -> AppResult<()> {
        let mut next = self.clone();
        next.apply_in_place(field)?;
        *self = next;
        Ok(())
    }

    fn apply_in_place(&mut self, field: ProductField) -> AppResult<()> {
        match field {
            ProductField::Name(name) => self.name = name,
            ProductField::BasePrice(v) => {
                self.base_price = ensure_amount(v, "Price")?;
                self.entered_price = v;
                self.editing_price = PriceField::Base;
            }
            ProductField::PricePerUnit(v) => {
                self.base_price = price_from_unit(v, self.batch.units_per_batch())?;
                self.entered_price = v;
                self.editing_price = PriceField::PerUnit;
            }
            ProductField::PricePerKg(v) => {
                self.base_price = price_from_kg(v, self.batch.weight_per_batch_kg())?;
                self.entered_price = v;
                self.editing_price = PriceField::PerKg;
            }
            ProductField::UnitsPerBatch(u) => {
                self.batch = BatchYield::new(u, self.batch.weight_per_batch_kg())?;
                self.reanchor()?;
            }
            ProductField::WeightPerBatchKg(w) => {
                self.batch = BatchYield::new(self.batch.units_per_batch(), w)?;
                self.reanchor()?;
            }
            ProductField::StockUnits(v) => {
                self.stock_units = ensure_amount(v, "Stock (units)")?;
                self.stock_kg = self.batch.units_to_weight(self.stock_units);
                self.editing_stock = Some(StockAmountField::Units);
            }
            ProductField::StockKg(v) => {
                self.stock_kg = ensure_amount(v, "Stock (kg)")?;
                self.stock_units = self.batch.weight_to_units(self.stock_kg);
                self.editing_stock = Some(StockAmountField::Kg);
            }
        }
        Ok(())
    }

    /// Recomputes dependent fields after the batch yield changed.
    fn reanchor(&mut self) -> AppResult<()> {
        match self.editing_price {
            PriceField::Base => {}
            PriceField::PerUnit => {
                self.base_price =
                    price_from_unit(self.entered_price, self.batch.units_per_batch())?
            }
            PriceField::PerKg => {
                self.base_price =
                    price_from_kg(self.entered_price, self.batch.weight_per_batch_kg())?
            }
        }
        match self.editing_stock {
            None => {}
            Some(StockAmountField::Units) => {
                self.stock_kg = self.batch.units_to_weight(self.stock_units)
            }
            Some(StockAmountField::Kg) => {
                self.stock_units = self.batch.weight_to_units(self.stock_kg)
            }
        }
        Ok(())
    }

    pub fn to_create_request(&self) -> AppResult<CreateProductRequest> {
        Ok(CreateProductRequest {
            name: required_name(&self.name, "Product name")?,
            base_price: self.base_price,
            stock_units: self.stock_units,
            stock_kg: self.stock_kg,
            units_per_batch: self.batch.units_per_batch(),
            weight_per_batch_kg: self.batch.weight_per_batch_kg(),
        })
    }

    /// Fields of `self` that differ from `original`.
    pub fn changes_since(&self, original: &ProductForm) -> AppResult<UpdateProductRequest> {
        let name = required_name(&self.name, "Product name")?;
        let changed = |a: f64, b: f64| (a != b).then_some(a);
        Ok(UpdateProductRequest {
            name: (name != original.name).then_some(name),
            base_price: changed(self.base_price, original.base_price),
            stock_units: changed(self.stock_units, original.stock_units),
            stock_kg: changed(self.stock_kg, original.stock_kg),
            units_per_batch: changed(self.units_per_batch(), original.units_per_batch()),
            weight_per_batch_kg: changed(
                self.weight_per_batch_kg(),
                original.weight_per_batch_kg(),
            ),
        })
    }
}

// ==================== Recipe ====================

/// New recipe line form.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientDraft {
    pub ingredient: String,
    pub quantity: f64,
    pub unit: MeasureUnit,
}

/// Result of a successful preparation.
#[derive(Debug, Clone, PartialEq)]
pub struct Preparation {
    pub product: Product,
    pub output: BatchOutput,
}

#[derive(Debug, Default)]
pub struct ProductView {
    editing: Option<EditSession<ProductForm>>,
}

impl ProductView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing(&self) -> Option<&EditSession<ProductForm>> {
        self.editing.as_ref()
    }

    #[instrument(skip(self, state, form), fields(name = %form.name()))]
    pub async fn create_product(
        &mut self,
        state: &mut AppState,
        form: &ProductForm,
    ) -> AppResult<Product> {
        let payload = form.to_create_request()?;
        let created = state.client.create_product(&payload).await;
        let product = state.resync(created).await?;
        state.refresh_products().await;
        Ok(product)
    }

    pub fn start_edit(&mut self, state: &AppState, id: i64) -> AppResult<()> {
        let form = ProductForm::from_product(state.product(id)?)?;
        self.editing = Some(EditSession::start(id, form));
        Ok(())
    }

    pub fn update_field(&mut self, field: ProductField) -> AppResult<()> {
        self.editing
            .as_mut()
            .ok_or_else(|| AppError::validation("No product is being edited"))?
            .apply(|form| form.apply(field))
    }

    /// The session stays open if the call fails.
    #[instrument(skip(self, state))]
    pub async fn commit_edit(&mut self, state: &mut AppState) -> AppResult<Product> {
        let session = self
            .editing
            .as_ref()
            .ok_or_else(|| AppError::validation("No product is being edited"))?;
        let id = session.id();
        let payload = session.draft().changes_since(session.original())?;

        if payload.is_empty() {
            self.editing = None;
            return Ok(state.product(id)?.clone());
        }

        let updated = state.client.update_product(id, &payload).await;
        let product = state.resync(updated).await?;
        self.editing = None;
        info!(id, base_price = product.base_price, "Product updated");
        state.refresh_products().await;
        Ok(product)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    #[instrument(skip(self, state))]
    pub async fn delete_product(
        &mut self,
        state: &mut AppState,
        id: i64,
        confirmation: Confirmation,
    ) -> AppResult<()> {
        let name = state.product(id)?.name.clone();
        confirmation.require(&format!("Deleting '{name}'"))?;

        let deleted = state.client.delete_product(id).await;
        state.resync(deleted).await?;
        if self.editing.as_ref().map(|s| s.id()) == Some(id) {
            self.editing = None;
        }
        state.refresh_products().await;
        Ok(())
    }

    pub fn validate_ingredient(
        state: &AppState,
        product_id: i64,
        draft: &IngredientDraft,
    ) -> AppResult<AddIngredientRequest> {
        state.product(product_id)?;
        let ingredient = required_name(&draft.ingredient, "Ingredient")?;
        if !(draft.quantity.is_finite() && draft.quantity > 0.0) {
            return Err(AppError::validation("Ingredient quantity must be greater than 0"));
        }
        let stock = state.stock_item_by_name(&ingredient).ok_or_else(|| {
            AppError::not_found(format!("The ingredient '{ingredient}' does not exist in stock"))
        })?;
        if stock.unit.dimension() != draft.unit.dimension() {
            return Err(AppError::validation(format!(
                "'{ingredient}' is stocked in {} and cannot be measured in {}",
                stock.unit, draft.unit
            )));
        }
        Ok(AddIngredientRequest {
            ingredient,
            quantity: draft.quantity,
            unit: draft.unit,
        })
    }

    #[instrument(skip(self, state, draft), fields(ingredient = %draft.ingredient))]
    pub async fn add_ingredient(
        &mut self,
        state: &mut AppState,
        product_id: i64,
        draft: IngredientDraft,
    ) -> AppResult<RecipeIngredient> {
        let payload = Self::validate_ingredient(state, product_id, &draft)?;
        let added = state.client.add_ingredient(product_id, &payload).await;
        let line = state.resync(added).await?;
        state.refresh_products().await;
        Ok(line)
    }

    #[instrument(skip(self, state))]
    pub async fn remove_ingredient(
        &mut self,
        state: &mut AppState,
        product_id: i64,
        ingredient_id: i64,
        confirmation: Confirmation,
    ) -> AppResult<()> {
        let product = state.product(product_id)?;
        let line = product
            .recipe
            .iter()
            .find(|r| r.id == ingredient_id)
            .ok_or_else(|| AppError::not_found("Recipe ingredient not found"))?;
        confirmation.require(&format!("Removing '{}' from {}", line.ingredient, product.name))?;

        let removed = state.client.remove_ingredient(product_id, ingredient_id).await;
        state.resync(removed).await?;
        state.refresh_products().await;
        Ok(())
    }

    /// Checks batch count and ingredient stock before asking the server to prepare.
    pub fn validate_preparation(
        state: &AppState,
        product_id: i64,
        batches: f64,
    ) -> AppResult<BatchOutput> {
        if !(batches.is_finite() && batches > 0.0) {
            return Err(AppError::validation("Batch count must be greater than 0"));
        }
        let product = state.product(product_id)?;
        if !product.has_recipe() {
            return Err(AppError::validation(format!(
                "{} has no recipe defined",
                product.name
            )));
        }

        for need in calculator::ingredient_requirements(product, batches) {
            let stock = state.stock_item_by_name(&need.ingredient).ok_or_else(|| {
                AppError::not_found(format!(
                    "The ingredient '{}' does not exist in stock",
                    need.ingredient
                ))
            })?;
            let available = stock.unit.convert(stock.quantity, need.unit).ok_or_else(|| {
                AppError::validation(format!(
                    "'{}' is stocked in {} but the recipe uses {}",
                    need.ingredient, stock.unit, need.unit
                ))
            })?;
            if available < need.required {
                return Err(AppError::insufficient_stock(
                    need.ingredient,
                    available,
                    need.required,
                    need.unit.as_str(),
                ));
            }
        }

        calculator::batch_output(product, batches)
    }

    #[instrument(skip(self, state))]
    pub async fn prepare(
        &mut self,
        state: &mut AppState,
        product_id: i64,
        batches: f64,
    ) -> AppResult<Preparation> {
        let output = Self::validate_preparation(state, product_id, batches)?;
        let mut expected = state.product(product_id)?.clone();
        calculator::prepare_batch(&mut expected, batches)?;

        let prepared = state.client.prepare_recipe(product_id, batches).await;
        let product = state.resync(prepared).await?;

        let tolerance = 1e-6;
        if (product.stock_units - expected.stock_units).abs() > tolerance
            || (product.stock_kg - expected.stock_kg).abs() > tolerance
        {
            warn!(
                product_id,
                expected_units = expected.stock_units,
                actual_units = product.stock_units,
                expected_kg = expected.stock_kg,
                actual_kg = product.stock_kg,
                "Server stock differs from local calculation"
            );
        }

        state.replace_product(product.clone());
        state.refresh_stock().await;
        Ok(Preparation { product, output })
    }
}
